use std::path::PathBuf;

use thiserror::Error;

/// Failures while obtaining a frame. Always fatal to the run.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("Failed to open image '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to read frame from stream: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to decode frame {index} from stream: {source}")]
    StreamDecode {
        index: usize,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
