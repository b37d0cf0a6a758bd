pub mod config;
pub mod debug;
pub mod detection;
pub mod error;
pub mod models;
pub mod render;
pub mod session;
pub mod source;

pub use config::{load_config, CornerSampling, DetectorConfig};
pub use detection::RectangleDetector;
pub use error::{AcquisitionError, ConfigError};
pub use models::{Channel, Contour, Point, Quadrilateral, Rectangle};
pub use render::{ConsoleRenderer, OverlayRenderer, Renderer, ReportFormat};
pub use session::{Session, SessionSummary};
pub use source::{load_image, FrameSource, PnmStream, StillImage};
