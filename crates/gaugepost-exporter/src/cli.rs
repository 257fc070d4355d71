//! Command-line surface.

use clap::Parser;

/// Serve statically configured gauge metrics over a scrape endpoint.
#[derive(Debug, Parser)]
#[command(name = "gaugepost", version)]
pub struct Args {
    /// The address to listen for requests on. A value starting with `/` is
    /// treated as a Unix socket path; `:port` means all IPv4 interfaces.
    #[arg(long = "web.listen-address", default_value = ":9001")]
    pub listen_address: String,
}
