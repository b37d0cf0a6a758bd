pub mod contours;
pub mod filter;
pub mod mask;
pub mod ordering;
pub mod polygon;
pub mod preprocessing;

use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage};
use log::{debug, trace, warn};

use crate::config::DetectorConfig;
use crate::models::{Channel, Contour, Point, Rectangle};
use filter::Candidate;

/// Per-channel rectangle finder.
///
/// Holds only configuration: every call to [`RectangleDetector::detect`] works on
/// buffers it allocates itself, so repeated calls on the same frame agree.
#[derive(Debug, Clone, Default)]
pub struct RectangleDetector {
    pub config: DetectorConfig,
}

impl RectangleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: DetectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the full pipeline on every colour plane of `frame`
    pub fn detect(&self, frame: &RgbImage) -> Vec<Rectangle> {
        self.run(frame, None)
    }

    pub fn detect_image(&self, img: &DynamicImage) -> Vec<Rectangle> {
        self.detect(&img.to_rgb8())
    }

    /// Same as [`detect`](Self::detect), saving intermediate images into `dump_dir`.
    ///
    /// Only creating the directory can fail; individual image writes are logged
    /// and skipped.
    pub fn detect_with_dump(
        &self,
        frame: &RgbImage,
        dump_dir: &Path,
    ) -> anyhow::Result<Vec<Rectangle>> {
        std::fs::create_dir_all(dump_dir)?;
        Ok(self.run(frame, Some(dump_dir)))
    }

    fn run(&self, frame: &RgbImage, dump: Option<&Path>) -> Vec<Rectangle> {
        let Some(smoothed) = preprocessing::smooth(frame) else {
            debug!("Skipping degenerate {}x{} frame", frame.width(), frame.height());
            return Vec::new();
        };
        if let Some(dir) = dump {
            let path = dir.join("00_smoothed.png");
            report_dump(&path, smoothed.save(&path));
        }

        let mut found = Vec::new();
        for channel in Channel::ALL {
            found.extend(self.scan_channel(&smoothed, channel, dump));
        }
        debug!("Frame {}x{}: {} rectangles", frame.width(), frame.height(), found.len());
        found
    }

    /// Stages 2-8 for one plane. The plane and masks are owned here and dropped on return.
    fn scan_channel(
        &self,
        smoothed: &RgbImage,
        channel: Channel,
        dump: Option<&Path>,
    ) -> Vec<Rectangle> {
        let plane = mask::extract_channel(smoothed, channel);
        let binary = mask::binarize(&plane, self.config.threshold);
        let closed = mask::close(&binary, self.config.morphology);

        if let Some(dir) = dump {
            for (stage, img) in [("plane", &plane), ("mask", &binary), ("closed", &closed)] {
                let name = format!("{}_{}_{}.png", channel.index(), channel.name(), stage);
                let path = dir.join(name);
                report_dump(&path, img.save(&path));
            }
        }

        let contours = contours::find_contours(&closed);
        let mut accepted = Vec::new();
        for (i, contour) in contours.iter().enumerate() {
            let ratio = self.config.tolerance.approx_ratio;
            let poly = polygon::approximate_contour(&contour.points, ratio);
            match filter::check(&poly, &self.config.tolerance) {
                Ok(candidate) => accepted.push(finalize(candidate, channel)),
                Err(reason) => trace!(
                    "{} contour {} ({} points -> {} vertices) rejected: {:?}",
                    channel.name(),
                    i,
                    contour.len(),
                    poly.len(),
                    reason
                ),
            }
        }

        debug!(
            "{} channel: {} contours, {} rectangles",
            channel.name(),
            contours.len(),
            accepted.len()
        );
        accepted
    }

    /// Closed binary mask of one channel (for debugging)
    pub fn get_mask(&self, frame: &RgbImage, channel: Channel) -> Option<GrayImage> {
        let smoothed = preprocessing::smooth(frame)?;
        let plane = mask::extract_channel(&smoothed, channel);
        let binary = mask::binarize(&plane, self.config.threshold);
        Some(mask::close(&binary, self.config.morphology))
    }

    /// All traced contours of one channel (for debugging)
    pub fn get_contours(&self, frame: &RgbImage, channel: Channel) -> Vec<Contour> {
        self.get_mask(frame, channel)
            .map(|m| contours::find_contours(&m))
            .unwrap_or_default()
    }

    /// Simplified polygons of one channel before geometric filtering (for debugging)
    pub fn get_polygons(&self, frame: &RgbImage, channel: Channel) -> Vec<Vec<Point>> {
        self.get_contours(frame, channel)
            .iter()
            .map(|c| polygon::approximate_contour(&c.points, self.config.tolerance.approx_ratio))
            .collect()
    }
}

fn finalize(candidate: Candidate, channel: Channel) -> Rectangle {
    let ordered = ordering::order_vertically(&candidate.corners);
    Rectangle {
        corners: candidate.corners,
        ordered,
        vertical_extent: ordering::vertical_extent(&ordered),
        channel,
        area: candidate.area,
        squareness: candidate.squareness,
    }
}

fn report_dump(path: &Path, result: image::ImageResult<()>) {
    if let Err(e) = result {
        warn!("Failed to save debug image {}: {}", path.display(), e);
    }
}
