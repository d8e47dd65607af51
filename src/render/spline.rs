//! Closed Catmull-Rom smoothing
//!
//! ## Segment Equation
//! For control points p0..p3 and s in [0, 1):
//! ```text
//! P(s) = 0.5 * (2·p1
//!             + (-p0 + p2)·s
//!             + (2·p0 - 5·p1 + 4·p2 - p3)·s²
//!             + (-p0 + 3·p1 - 3·p2 + p3)·s³)
//! ```
//! The curve passes through every input point.

use crate::morph::Point;

/// Smooth a closed polygon into `points.len() * samples_per_edge` points
///
/// Fewer than three points cannot form a curve and are returned unchanged.
pub fn smooth_closed(points: &[Point], samples_per_edge: usize) -> Vec<Point> {
    let n = points.len();
    if n < 3 || samples_per_edge == 0 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(n * samples_per_edge);
    for i in 0..n {
        let p0 = points[(i + n - 1) % n];
        let p1 = points[i];
        let p2 = points[(i + 1) % n];
        let p3 = points[(i + 2) % n];

        for step in 0..samples_per_edge {
            let s = step as f32 / samples_per_edge as f32;
            out.push(Point::new(
                catmull_rom(p0.x, p1.x, p2.x, p3.x, s),
                catmull_rom(p0.y, p1.y, p2.y, p3.y, s),
            ));
        }
    }
    out
}

fn catmull_rom(p0: f32, p1: f32, p2: f32, p3: f32, s: f32) -> f32 {
    let s2 = s * s;
    let s3 = s2 * s;
    0.5 * (2.0 * p1
        + (-p0 + p2) * s
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * s2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * s3)
}
