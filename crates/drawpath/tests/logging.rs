//! Tests for logging functionality
//!
//! These tests verify that logging initialization works correctly
//! with different configurations.

use drawpath::core::logging::{init_default_logging, init_logging, LogFormat};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("Pretty").unwrap(), LogFormat::Pretty);
    assert!(LogFormat::from_str("yaml").is_err());
}

#[test]
fn test_log_format_variants() {
    let variants = LogFormat::variants();
    assert!(variants.contains(&"compact"));
    assert!(variants.contains(&"pretty"));
    assert!(variants.contains(&"json"));
}

#[test]
fn test_init_logging_with_levels() {
    // Only the first call can install the subscriber; the rest must not panic
    let _ = init_logging(Some("trace"), Some("compact"));
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("warn"), Some("compact"));
    let _ = init_logging(Some("off"), Some("compact"));
}

#[test]
fn test_init_logging_with_formats() {
    let _ = init_logging(Some("info"), Some("pretty"));
    let _ = init_logging(Some("info"), Some("json"));
}

#[test]
fn test_init_default_logging() {
    let _ = init_default_logging();
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_pipeline_runs_with_logging_enabled() {
    let _ = init_logging(Some("trace"), Some("compact"));
    let graph = drawpath::load(
        r#"<mxGraphModel><root>
  <mxCell id="a" style="ellipse;" vertex="1"/>
  <mxCell id="b" style="ellipse;" vertex="1"/>
  <mxCell id="ab" value="1" style="" edge="1" source="a" target="b"/>
</root></mxGraphModel>"#,
    )
    .unwrap();
    let engine = drawpath::shortest_paths(&graph, "a").unwrap();
    assert_eq!(engine.minimum_cost("b").unwrap(), 1.0);
}
