use image::GrayImage;
use imageproc::contours::{find_contours as trace_borders, BorderType};

use crate::models::{Contour, Point};

/// Trace every outer and hole border of the non-zero regions in `mask`.
///
/// The containment hierarchy is dropped: all contours come back as siblings,
/// in no particular order, with no size filtering. The image edge is not a
/// border, so a mask that is foreground everywhere has no contours.
pub fn find_contours(mask: &GrayImage) -> Vec<Contour> {
    trace_borders::<i32>(mask)
        .into_iter()
        .map(|c| Contour {
            points: c.points.into_iter().map(Point::from).collect(),
            hole: matches!(c.border_type, BorderType::Hole),
        })
        .collect()
}
