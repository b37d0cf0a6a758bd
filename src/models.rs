use serde::Serialize;

/// Integer pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<imageproc::point::Point<i32>> for Point {
    fn from(p: imageproc::point::Point<i32>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Point> for imageproc::point::Point<i32> {
    fn from(p: Point) -> Self {
        imageproc::point::Point::new(p.x, p.y)
    }
}

/// Colour plane of an RGB frame, numbered 1..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Zero-based offset of this channel inside an RGB pixel
    pub fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// One-based channel index
    pub fn index(self) -> usize {
        self.offset() + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

/// Traced boundary of one foreground region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point>,
    /// Whether this border encloses a hole rather than a region
    pub hole: bool,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Four corners in the winding order produced by polygon approximation
pub type Quadrilateral = [Point; 4];

/// A quadrilateral that passed the geometric filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rectangle {
    /// Corners in winding order, suitable for drawing as a closed polyline
    pub corners: Quadrilateral,
    /// Corners stably sorted by ascending y
    pub ordered: Quadrilateral,
    /// Mean y of the two lower corners minus mean y of the two upper corners
    pub vertical_extent: f64,
    pub channel: Channel,
    pub area: f64,
    /// Largest sampled |cos| of a corner angle; 0 means perfectly square
    pub squareness: f64,
}

impl Rectangle {
    pub fn min_y(&self) -> i32 {
        self.ordered[0].y
    }

    pub fn max_y(&self) -> i32 {
        self.ordered[3].y
    }

    /// Axis-aligned bounds as (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        let min_x = self.corners.iter().map(|p| p.x).min().unwrap_or(0);
        let max_x = self.corners.iter().map(|p| p.x).max().unwrap_or(0);
        (min_x, self.min_y(), max_x, self.max_y())
    }
}
