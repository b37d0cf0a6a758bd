use crate::models::{Point, Quadrilateral};

/// Stable sort of the corners by an extracted key; equal keys keep their order
pub fn order_by<K, F>(corners: &Quadrilateral, key: F) -> Quadrilateral
where
    K: Ord,
    F: FnMut(&Point) -> K,
{
    let mut ordered = *corners;
    ordered.sort_by_key(key);
    ordered
}

/// Corners sorted top to bottom
pub fn order_vertically(corners: &Quadrilateral) -> Quadrilateral {
    order_by(corners, |p| p.y)
}

/// Mean y of the bottom pair minus mean y of the top pair of y-sorted corners
pub fn vertical_extent(ordered: &Quadrilateral) -> f64 {
    let top = (ordered[0].y as f64 + ordered[1].y as f64) / 2.0;
    let bottom = (ordered[2].y as f64 + ordered[3].y as f64) / 2.0;
    bottom - top
}
