use imageproc::geometry::{arc_length, oriented_contour_area};

use crate::models::Point;

fn to_imageproc(points: &[Point]) -> Vec<imageproc::point::Point<i32>> {
    points.iter().map(|&p| p.into()).collect()
}

/// Length of the closed polyline through `points`
pub fn perimeter(points: &[Point]) -> f64 {
    arc_length(&to_imageproc(points), true)
}

/// Shoelace area; positive for counter-clockwise winding in a y-up frame
pub fn signed_area(points: &[Point]) -> f64 {
    oriented_contour_area(&to_imageproc(points))
}

pub fn area(points: &[Point]) -> f64 {
    signed_area(points).abs()
}

/// True if every turn of the closed polygon bends the same way.
///
/// Collinear consecutive edges and self-intersecting outlines both fail.
pub fn is_convex(points: &[Point]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut orientation = 0i64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let cross = (b.x - a.x) as i64 * (c.y - b.y) as i64
            - (b.y - a.y) as i64 * (c.x - b.x) as i64;
        if cross == 0 {
            return false;
        }
        let sign = cross.signum();
        if orientation == 0 {
            orientation = sign;
        } else if sign != orientation {
            return false;
        }
    }
    // a star or bow-tie turns consistently but winds more than once
    let turning: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            let c = points[(i + 2) % n];
            let h0 = ((b.y - a.y) as f64).atan2((b.x - a.x) as f64);
            let h1 = ((c.y - b.y) as f64).atan2((c.x - b.x) as f64);
            let mut d = h1 - h0;
            while d <= -std::f64::consts::PI {
                d += 2.0 * std::f64::consts::PI;
            }
            while d > std::f64::consts::PI {
                d -= 2.0 * std::f64::consts::PI;
            }
            d
        })
        .sum();
    turning.abs() < 3.0 * std::f64::consts::PI
}

fn dist_sq(a: Point, b: Point) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    dx * dx + dy * dy
}

/// Douglas-Peucker simplification of a closed contour.
///
/// Vertices deviating less than `epsilon` from the simplified outline are
/// dropped. The output keeps the winding of `contour` and starts at one of the
/// two anchor points found by farthest-point search. Contours shorter than three
/// points come back unchanged.
pub fn approximate_polygon(contour: &[Point], epsilon: f64) -> Vec<Point> {
    let n = contour.len();
    if n < 3 {
        return contour.to_vec();
    }
    let at = |i: usize| contour[i % n];
    let eps_sq = epsilon * epsilon;

    // three rounds of farthest-point search settle on a well separated pair
    let mut start = 0;
    let mut offset = 0;
    let mut max_dist = 0.0;
    for _ in 0..3 {
        start = (start + offset) % n;
        offset = 0;
        max_dist = 0.0;
        for j in 1..n {
            let d = dist_sq(at(start), at(start + j));
            if d > max_dist {
                max_dist = d;
                offset = j;
            }
        }
    }

    if max_dist <= eps_sq {
        return vec![at(start)];
    }

    let split = start + offset;
    let mut poly = Vec::new();
    // ranges are [first, last] over unwrapped indices; the left arc is popped first
    let mut stack = vec![(split, start + n), (start, split)];
    while let Some((first, last)) = stack.pop() {
        let a = at(first);
        if last <= first + 1 {
            poly.push(a);
            continue;
        }
        let b = at(last);
        let dx = (b.x - a.x) as f64;
        let dy = (b.y - a.y) as f64;

        let mut farthest = first;
        let mut max_cross = 0.0;
        for i in (first + 1)..last {
            let p = at(i);
            let cross = ((p.y - a.y) as f64 * dx - (p.x - a.x) as f64 * dy).abs();
            if cross > max_cross {
                max_cross = cross;
                farthest = i;
            }
        }

        // compare squared distances to the chord without dividing by its length
        if max_cross * max_cross <= eps_sq * (dx * dx + dy * dy) {
            poly.push(a);
        } else {
            stack.push((farthest, last));
            stack.push((first, farthest));
        }
    }
    poly
}

/// Simplify with a tolerance proportional to the contour's perimeter
pub fn approximate_contour(contour: &[Point], ratio: f64) -> Vec<Point> {
    approximate_polygon(contour, perimeter(contour) * ratio)
}
