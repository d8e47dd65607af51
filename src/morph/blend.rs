//! Morphing between shape sets
//!
//! Sets and outlines rarely line up one-to-one, so both levels reconcile
//! mismatched counts:
//!
//! - **Shapes**: the output has as many shapes as the larger set. Indices
//!   missing from the smaller set borrow its *first* shape.
//! - **Vertices**: shared indices blend pairwise. Extra vertices on the
//!   longer outline all blend against the *last* vertex of the shorter one,
//!   which pinches them into a fan instead of crossing edges.
//!
//! Rotation is interpolated in raw radians without taking the shortest path,
//! so large angle deltas spin the shape through the long way round.

use super::types::{lerp, Point, Shape, ShapeSet};

/// Blend `current` towards `target` at `progress` (clamped to `[0, 1]`)
///
/// Pure: identical inputs always produce identical output.
pub fn blend(current: &ShapeSet, target: &ShapeSet, progress: f32) -> ShapeSet {
    let t = progress.clamp(0.0, 1.0);
    let n = current.len().max(target.len());

    let shapes = (0..n)
        .map(|i| {
            let from = current.get(i).unwrap_or_else(|| current.first());
            let to = target.get(i).unwrap_or_else(|| target.first());
            blend_shape(from, to, t)
        })
        .collect();

    // Both inputs are non-empty, so `n >= 1`
    ShapeSet::new(shapes).unwrap_or_else(|| current.clone())
}

/// Blend a single pair of shapes
pub fn blend_shape(from: &Shape, to: &Shape, t: f32) -> Shape {
    Shape {
        x: lerp(from.x, to.x, t),
        y: lerp(from.y, to.y, t),
        rotation: lerp(from.rotation, to.rotation, t),
        size: lerp(from.size, to.size, t),
        vertices: blend_vertices(&from.vertices, &to.vertices, t),
    }
}

/// Blend two outlines that may differ in vertex count
///
/// If either outline is empty there is nothing to anchor against and the
/// result is empty, which renders as nothing.
pub fn blend_vertices(from: &[Point], to: &[Point], t: f32) -> Vec<Point> {
    let (Some(&from_last), Some(&to_last)) = (from.last(), to.last()) else {
        return Vec::new();
    };

    let shared = from.len().min(to.len());
    let mut out = Vec::with_capacity(from.len().max(to.len()));

    out.extend(
        from.iter()
            .zip(to.iter())
            .map(|(&a, &b)| a.lerp(b, t)),
    );

    if from.len() > shared {
        out.extend(from[shared..].iter().map(|&a| a.lerp(to_last, t)));
    } else if to.len() > shared {
        out.extend(to[shared..].iter().map(|&b| from_last.lerp(b, t)));
    }

    out
}
