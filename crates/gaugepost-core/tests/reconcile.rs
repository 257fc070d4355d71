//! Reconciler behavior tests against a live registry.
//!
//! Assertions go through the text exposition format so they exercise the
//! same surface a scraper sees. Label pairs render sorted by label name.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use prometheus::{Encoder, Registry, TextEncoder};

use gaugepost_core::reconcile::Reconciler;
use gaugepost_core::record::MetricRecord;
use gaugepost_core::GaugePostError;

fn record(name: &str, help: &str, value: f64, labels: &[(&str, &str)]) -> MetricRecord {
    MetricRecord {
        name: name.to_string(),
        help: help.to_string(),
        value,
        labels: labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

fn encode(registry: &Registry) -> String {
    let mut buf = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

/// Reconcile and render, expecting success.
fn render(records: &[MetricRecord]) -> String {
    let mut reconciler = Reconciler::new(Registry::new());
    reconciler.reconcile(records).expect("reconcile must succeed");
    encode(reconciler.registry())
}

fn family_count(text: &str) -> usize {
    text.matches("# TYPE").count()
}

#[test]
fn same_label_name_set_groups_into_one_family() {
    let text = render(&[
        record("r", "requests", 5.0, &[("env", "prod"), ("region", "us")]),
        record("r", "requests", 7.0, &[("region", "eu"), ("env", "prod")]),
    ]);

    assert_eq!(family_count(&text), 1, "{text}");
    assert!(text.contains("# TYPE r gauge"), "{text}");
    assert!(text.contains("r{env=\"prod\",region=\"us\"} 5"), "{text}");
    assert!(text.contains("r{env=\"prod\",region=\"eu\"} 7"), "{text}");
}

#[test]
fn help_is_first_write_wins_and_value_last_write_wins() {
    let text = render(&[
        record("x", "A", 1.0, &[]),
        record("x", "B", 2.0, &[]),
    ]);

    assert_eq!(family_count(&text), 1, "{text}");
    assert!(text.contains("# HELP x A"), "{text}");
    assert!(!text.contains("# HELP x B"), "{text}");
    assert!(text.contains("\nx 2"), "{text}");
}

#[test]
fn repeated_label_combination_keeps_last_value() {
    let text = render(&[
        record("hits", "", 1.0, &[("path", "/")]),
        record("hits", "", 9.0, &[("path", "/")]),
    ]);

    assert_eq!(family_count(&text), 1, "{text}");
    assert!(text.contains("hits{path=\"/\"} 9"), "{text}");
    assert!(!text.contains("hits{path=\"/\"} 1"), "{text}");
}

#[test]
fn empty_label_record_forms_unlabeled_series() {
    let text = render(&[record("uptime_days", "Uptime", 12.5, &[])]);

    assert_eq!(family_count(&text), 1, "{text}");
    assert!(text.contains("# TYPE uptime_days gauge"), "{text}");
    assert!(text.contains("\nuptime_days 12.5"), "{text}");
}

#[test]
fn distinct_names_form_distinct_families() {
    let text = render(&[
        record("a_total", "", 1.0, &[]),
        record("b_total", "", 2.0, &[]),
    ]);

    assert_eq!(family_count(&text), 2, "{text}");
    assert!(text.contains("# TYPE a_total gauge"), "{text}");
    assert!(text.contains("# TYPE b_total gauge"), "{text}");
}

#[test]
fn conflicting_label_sets_for_one_name_fail_fast() {
    let mut reconciler = Reconciler::new(Registry::new());
    let err = reconciler
        .reconcile(&[
            record("temp", "", 1.0, &[("room", "kitchen")]),
            record("temp", "", 2.0, &[("floor", "1")]),
        ])
        .expect_err("conflicting label sets must be rejected");

    assert!(matches!(err, GaugePostError::SchemaConflict(_)));
    let msg = err.to_string();
    assert!(msg.contains("temp"), "message should name the metric: {msg}");
    assert!(
        msg.contains("room") && msg.contains("floor"),
        "message should name both label sets: {msg}"
    );
}

#[test]
fn labeled_and_unlabeled_records_for_one_name_also_conflict() {
    let mut reconciler = Reconciler::new(Registry::new());
    let err = reconciler
        .reconcile(&[
            record("temp", "", 1.0, &[]),
            record("temp", "", 2.0, &[("room", "hall")]),
        ])
        .expect_err("adding a label dimension to an existing name must fail");

    assert!(matches!(err, GaugePostError::SchemaConflict(_)));
}

#[test]
fn empty_help_falls_back_to_the_metric_name() {
    let text = render(&[record("bare", "", 3.0, &[])]);
    assert!(text.contains("# HELP bare bare"), "{text}");
}

#[test]
fn invalid_metric_name_is_rejected() {
    let mut reconciler = Reconciler::new(Registry::new());
    let err = reconciler
        .reconcile(&[record("9leading_digit", "", 1.0, &[])])
        .expect_err("names may not start with a digit");
    assert!(matches!(err, GaugePostError::InvalidMetric(_)));
}

#[test]
fn invalid_label_name_is_rejected() {
    let mut reconciler = Reconciler::new(Registry::new());
    let err = reconciler
        .reconcile(&[record("ok_name", "", 1.0, &[("0bad", "v")])])
        .expect_err("label names may not start with a digit");
    assert!(matches!(err, GaugePostError::InvalidMetric(_)));
}

#[test]
fn records_land_in_the_registry_handed_in() {
    let registry = Registry::new();
    let mut reconciler = Reconciler::new(registry.clone());
    reconciler
        .reconcile(&[record("shared", "", 4.0, &[])])
        .unwrap();

    // The caller's clone sees the family; Registry shares its core.
    let text = encode(&registry);
    assert!(text.contains("\nshared 4"), "{text}");
}

#[test]
fn end_to_end_exposition_text() {
    let text = render(&[
        record("temp_c", "Temperature", 21.5, &[("room", "kitchen")]),
        record("temp_c", "Temperature", 18.0, &[("room", "hall")]),
    ]);

    assert_eq!(family_count(&text), 1, "{text}");
    assert!(text.contains("# HELP temp_c Temperature"), "{text}");
    assert!(text.contains("# TYPE temp_c gauge"), "{text}");
    assert!(text.contains("temp_c{room=\"kitchen\"} 21.5"), "{text}");
    assert!(text.contains("temp_c{room=\"hall\"} 18"), "{text}");
}
