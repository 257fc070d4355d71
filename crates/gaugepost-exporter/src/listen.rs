//! Listener plumbing: TCP vs Unix-socket bind selection.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use tokio::net::{TcpListener, UnixListener};

use gaugepost_core::error::{GaugePostError, Result};

/// Where the scrape endpoint listens. A configured address starting with
/// `/` selects a Unix domain socket at that path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenAddr {
    Tcp(SocketAddr),
    Unix(PathBuf),
}

impl ListenAddr {
    /// Parse the `--web.listen-address` value. The bare `:port` form means
    /// all IPv4 interfaces.
    pub fn parse(s: &str) -> Result<Self> {
        if s.starts_with('/') {
            return Ok(ListenAddr::Unix(PathBuf::from(s)));
        }
        let candidate = if s.starts_with(':') {
            format!("0.0.0.0{s}")
        } else {
            s.to_string()
        };
        let addr: SocketAddr = candidate
            .parse()
            .map_err(|e| GaugePostError::Listen(format!("invalid listen address {s}: {e}")))?;
        Ok(ListenAddr::Tcp(addr))
    }
}

impl fmt::Display for ListenAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenAddr::Tcp(addr) => write!(f, "{addr}"),
            ListenAddr::Unix(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Bind the requested address and serve until the process is killed.
pub async fn serve(addr: ListenAddr, app: Router) -> Result<()> {
    tracing::info!(addr = %addr, "listening");
    match addr {
        ListenAddr::Tcp(sock_addr) => {
            let listener = TcpListener::bind(sock_addr)
                .await
                .map_err(|e| GaugePostError::Listen(format!("bind {sock_addr} failed: {e}")))?;
            axum::serve(listener, app)
                .await
                .map_err(|e| GaugePostError::Listen(format!("serve failed: {e}")))
        }
        ListenAddr::Unix(path) => {
            let listener = UnixListener::bind(&path).map_err(|e| {
                GaugePostError::Listen(format!("bind {} failed: {e}", path.display()))
            })?;
            axum::serve(listener, app)
                .await
                .map_err(|e| GaugePostError::Listen(format!("serve failed: {e}")))
        }
    }
}
