use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Intensity at or above which a pixel is foreground
pub const LOW_THRESHOLD: u8 = 230;
/// Value written for foreground pixels
pub const HIGH_THRESHOLD: u8 = 255;
pub const DILATE_ITERATIONS: u8 = 10;
pub const ERODE_ITERATIONS: u8 = 8;
/// Fraction of the contour perimeter used as simplification tolerance
pub const APPROX_RATIO: f64 = 0.02;
pub const MIN_AREA: f64 = 1000.0;
/// Upper bound (exclusive) on the squareness score
pub const MAX_COSINE: f64 = 0.4;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub threshold: ThresholdParams,
    pub morphology: MorphologyParams,
    pub tolerance: ToleranceParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThresholdParams {
    pub low: u8,
    pub high: u8,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            low: LOW_THRESHOLD,
            high: HIGH_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MorphologyParams {
    pub dilate_iterations: u8,
    pub erode_iterations: u8,
}

impl Default for MorphologyParams {
    fn default() -> Self {
        Self {
            dilate_iterations: DILATE_ITERATIONS,
            erode_iterations: ERODE_ITERATIONS,
        }
    }
}

/// Which corners contribute to the squareness score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerSampling {
    /// Corners 1, 2 and 3 of the approximated quad; corner 0 is never checked.
    #[default]
    Three,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ToleranceParams {
    pub approx_ratio: f64,
    pub min_area: f64,
    pub max_cosine: f64,
    pub corner_sampling: CornerSampling,
}

impl Default for ToleranceParams {
    fn default() -> Self {
        Self {
            approx_ratio: APPROX_RATIO,
            min_area: MIN_AREA,
            max_cosine: MAX_COSINE,
            corner_sampling: CornerSampling::Three,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold.low == 0 {
            return Err(ConfigError::Invalid {
                field: "threshold.low",
                reason: "must be greater than 0, otherwise every pixel is foreground".into(),
            });
        }
        if self.threshold.high == 0 {
            return Err(ConfigError::Invalid {
                field: "threshold.high",
                reason: "foreground marker must be non-zero".into(),
            });
        }
        let ratio = self.tolerance.approx_ratio;
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(ConfigError::Invalid {
                field: "tolerance.approx_ratio",
                reason: format!("must be a positive number, got {}", ratio),
            });
        }
        let cosine = self.tolerance.max_cosine;
        if !(cosine > 0.0 && cosine <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "tolerance.max_cosine",
                reason: format!("must be in (0, 1], got {}", cosine),
            });
        }
        let area = self.tolerance.min_area;
        if !(area.is_finite() && area >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "tolerance.min_area",
                reason: format!("must be a non-negative number, got {}", area),
            });
        }
        Ok(())
    }
}

/// Load and validate a JSON detector configuration
pub fn load_config(path: &Path) -> Result<DetectorConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: DetectorConfig =
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}
