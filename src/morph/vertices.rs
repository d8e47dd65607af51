//! Vertex generation - jittered star-like polygon outlines
//!
//! Vertices start from evenly spaced angles around the origin and are
//! perturbed in angle, radius and position. Order is never re-sorted, so
//! moderate jitter keeps the outline from folding over itself.

use std::f32::consts::TAU;

use super::random::RandomSource;
use super::types::Point;

/// Jitter settings for polygon outlines
#[derive(Clone, Debug)]
pub struct VertexGenerator {
    /// Maximum angular offset per vertex (radians)
    pub angle_jitter: f32,
    /// Radius is `base_size * uniform(min_radius, max_radius)`
    pub min_radius: f32,
    pub max_radius: f32,
    /// Positional jitter as a fraction of `base_size`
    pub offset_jitter: f32,
}

impl Default for VertexGenerator {
    fn default() -> Self {
        Self {
            angle_jitter: 0.2,
            min_radius: 0.6,
            max_radius: 1.0,
            offset_jitter: 0.05,
        }
    }
}

impl VertexGenerator {
    /// Generate `count` vertices around the origin
    ///
    /// Callers pass `count >= 3`; the parameter store guarantees this for
    /// generated sets.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        count: usize,
        base_size: f32,
        rng: &mut R,
    ) -> Vec<Point> {
        let offset = base_size * self.offset_jitter;

        (0..count)
            .map(|i| {
                let base_angle = TAU * i as f32 / count as f32;
                let angle = base_angle + rng.uniform(-self.angle_jitter, self.angle_jitter);
                let radius = base_size * rng.uniform(self.min_radius, self.max_radius);
                let x = angle.cos() * radius + rng.uniform(-offset, offset);
                let y = angle.sin() * radius + rng.uniform(-offset, offset);
                Point::new(x, y)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morph::random::{FixedSource, RngSource};

    #[test]
    fn test_vertex_count() {
        let gen = VertexGenerator::default();
        let mut rng = RngSource::seeded(11);
        for count in 3..12 {
            assert_eq!(gen.generate(count, 100.0, &mut rng).len(), count);
        }
    }

    #[test]
    fn test_radius_bounds() {
        let gen = VertexGenerator::default();
        let mut rng = RngSource::seeded(5);
        let size = 100.0;
        // Positional jitter can add up to sqrt(2) * 5 on top of the radius
        let slack = 2.0_f32.sqrt() * size * 0.05 + 0.001;
        for p in gen.generate(64, size, &mut rng) {
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!(r >= size * 0.6 - slack && r <= size + slack, "radius {}", r);
        }
    }

    #[test]
    fn test_midpoint_draws_give_regular_polygon() {
        // Fraction 0.5 zeroes every jitter term and picks radius 0.8 * size
        let gen = VertexGenerator::default();
        let mut rng = FixedSource::constant(0.5);
        let verts = gen.generate(4, 10.0, &mut rng);
        assert!((verts[0].x - 8.0).abs() < 0.001);
        assert!(verts[0].y.abs() < 0.001);
        assert!(verts[1].x.abs() < 0.001);
        assert!((verts[1].y - 8.0).abs() < 0.001);
        assert!((verts[2].x + 8.0).abs() < 0.001);
    }

    #[test]
    fn test_angular_order_preserved() {
        let gen = VertexGenerator::default();
        let mut rng = RngSource::seeded(99);
        let verts = gen.generate(8, 50.0, &mut rng);
        let angles: Vec<f32> = verts
            .iter()
            .map(|p| p.y.atan2(p.x).rem_euclid(TAU))
            .collect();
        // With 8 vertices the 0.2 rad jitter never swaps neighbours,
        // so angles increase after the first vertex (which may wrap below 0)
        for w in angles[1..].windows(2) {
            assert!(w[1] > w[0]);
        }
    }
}
