//! Loading and validating detector configuration files.

mod common;

use std::io::Write;

use rectsight::config::{CornerSampling, MAX_COSINE, MIN_AREA};
use rectsight::{load_config, ConfigError};
use tempfile::NamedTempFile;

use common::*;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("Failed to create temp config file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp config file");
    file
}

#[test]
fn test_empty_object_gives_defaults() -> anyhow::Result<()> {
    let file = config_file("{}");
    let config = load_config(file.path())?;
    assert_eq!(config, DetectorConfig::default());
    assert_eq!(config.threshold.low, 230);
    assert_eq!(config.threshold.high, 255);
    assert_eq!(config.morphology.dilate_iterations, 10);
    assert_eq!(config.morphology.erode_iterations, 8);
    assert_eq!(config.tolerance.min_area, MIN_AREA);
    assert_eq!(config.tolerance.max_cosine, MAX_COSINE);
    assert_eq!(config.tolerance.corner_sampling, CornerSampling::Three);
    Ok(())
}

#[test]
fn test_partial_config_keeps_other_defaults() -> anyhow::Result<()> {
    let file = config_file(
        r#"{
            "threshold": { "low": 200 },
            "tolerance": { "min_area": 250.5, "corner_sampling": "all" }
        }"#,
    );
    let config = load_config(file.path())?;

    assert_eq!(config.threshold.low, 200);
    assert_eq!(config.threshold.high, 255);
    assert_eq!(config.morphology, DetectorConfig::default().morphology);
    assert_eq!(config.tolerance.min_area, 250.5);
    assert_eq!(config.tolerance.approx_ratio, 0.02);
    assert_eq!(config.tolerance.corner_sampling, CornerSampling::All);
    Ok(())
}

#[test]
fn test_lower_threshold_finds_dim_box() -> anyhow::Result<()> {
    let file = config_file(r#"{ "threshold": { "low": 150 } }"#);
    let detector = RectangleDetector::new().with_config(load_config(file.path())?);
    let frame = frame_with_box(200, 160, BLACK, image::Rgb([200, 200, 200]), (50, 40, 129, 99));

    assert_eq!(detector.detect(&frame).len(), 3);
    assert!(RectangleDetector::new().detect(&frame).is_empty());
    Ok(())
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        (r#"{ "threshold": { "low": 0 } }"#, "threshold.low"),
        (r#"{ "threshold": { "high": 0 } }"#, "threshold.high"),
        (r#"{ "tolerance": { "approx_ratio": 0.0 } }"#, "tolerance.approx_ratio"),
        (r#"{ "tolerance": { "max_cosine": 1.5 } }"#, "tolerance.max_cosine"),
        (r#"{ "tolerance": { "min_area": -1.0 } }"#, "tolerance.min_area"),
    ];

    for (json, expected_field) in cases {
        let file = config_file(json);
        match load_config(file.path()) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected invalid {}, got {:?}", expected_field, other),
        }
    }
}

#[test]
fn test_malformed_json_is_parse_error() {
    let file = config_file(r#"{ "threshold": { "low": "bright" } }"#);
    assert!(matches!(load_config(file.path()), Err(ConfigError::Parse { .. })));

    let file = config_file("threshold = 230");
    assert!(matches!(load_config(file.path()), Err(ConfigError::Parse { .. })));
}

#[test]
fn test_missing_file_is_read_error() {
    let result = load_config(std::path::Path::new("/nonexistent/rectsight.json"));
    match result {
        Err(err @ ConfigError::Read { .. }) => {
            assert!(err.to_string().contains("/nonexistent/rectsight.json"));
        }
        other => panic!("expected read error, got {:?}", other),
    }
}
