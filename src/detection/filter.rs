use crate::config::{CornerSampling, ToleranceParams};
use crate::detection::polygon;
use crate::models::{Point, Quadrilateral};

/// Why a simplified polygon was not accepted as a rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    VertexCount(usize),
    TooSmall(f64),
    NotConvex,
    NotSquare(f64),
}

/// A quadrilateral that passed every geometric test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub corners: Quadrilateral,
    pub area: f64,
    pub squareness: f64,
}

/// Cosine of the angle at `vertex` between the rays towards `a` and `b`
pub fn corner_cosine(a: Point, b: Point, vertex: Point) -> f64 {
    let dx1 = (a.x - vertex.x) as f64;
    let dy1 = (a.y - vertex.y) as f64;
    let dx2 = (b.x - vertex.x) as f64;
    let dy2 = (b.y - vertex.y) as f64;
    let norms = ((dx1 * dx1 + dy1 * dy1) * (dx2 * dx2 + dy2 * dy2)).sqrt();
    (dx1 * dx2 + dy1 * dy2) / (norms + 1e-10)
}

/// Largest |cos| over the sampled corners.
///
/// `Three` evaluates corners 1, 2 and 3 (for i in 2..=4, the corner at
/// `(i - 1) % 4` between `i % 4` and `(i - 2) % 4`); `All` adds corner 0.
pub fn squareness(quad: &Quadrilateral, sampling: CornerSampling) -> f64 {
    let range = match sampling {
        CornerSampling::Three => 2..5,
        CornerSampling::All => 1..5,
    };
    range
        .map(|i| corner_cosine(quad[i % 4], quad[(i + 2) % 4], quad[(i + 3) % 4]).abs())
        .fold(0.0, f64::max)
}

/// Apply the vertex-count, area, convexity and squareness tests in that order
pub fn check(polygon: &[Point], tolerance: &ToleranceParams) -> Result<Candidate, Rejection> {
    let corners: Quadrilateral = polygon
        .try_into()
        .map_err(|_| Rejection::VertexCount(polygon.len()))?;

    let area = polygon::area(&corners);
    if area < tolerance.min_area {
        return Err(Rejection::TooSmall(area));
    }
    if !polygon::is_convex(&corners) {
        return Err(Rejection::NotConvex);
    }

    let score = squareness(&corners, tolerance.corner_sampling);
    if score >= tolerance.max_cosine {
        return Err(Rejection::NotSquare(score));
    }

    Ok(Candidate {
        corners,
        area,
        squareness: score,
    })
}
