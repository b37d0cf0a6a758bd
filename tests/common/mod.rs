#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from rectsight for tests
pub use rectsight::{
    Channel, DetectorConfig, Point, RectangleDetector, Rectangle, Session, SessionSummary,
};
