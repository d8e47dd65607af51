//! Shape set generation
//!
//! A new set is drawn once per interval. All shapes in a set share one base
//! size and scatter around the canvas center within half that size.

use std::f32::consts::TAU;

use thiserror::Error;

use super::random::RandomSource;
use super::types::{Point, Shape, ShapeSet};
use super::vertices::VertexGenerator;
use crate::params::MorphParams;

/// Errors that can occur while generating a shape set
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("shape count resolved to zero after {0} attempts")]
    Empty(usize),
}

/// Fraction of the set's base size used for each shape's outline
const SHAPE_SIZE_FACTOR: f32 = 0.9;

/// Generates randomized shape sets
#[derive(Clone, Debug)]
pub struct ShapeSetGenerator {
    pub vertices: VertexGenerator,
    /// How many times to redraw when a set comes out empty
    pub max_attempts: usize,
}

impl Default for ShapeSetGenerator {
    fn default() -> Self {
        Self {
            vertices: VertexGenerator::default(),
            max_attempts: 8,
        }
    }
}

impl ShapeSetGenerator {
    /// Generate a set centered on `center`
    ///
    /// `params` must already be validated; inverted ranges are rejected by
    /// the parameter store, not here.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        params: &MorphParams,
        center: Point,
        rng: &mut R,
    ) -> Result<ShapeSet, GenerationError> {
        let attempts = self.max_attempts.max(1);
        for attempt in 1..=attempts {
            let shapes = self.draw_shapes(params, center, rng);
            if let Some(set) = ShapeSet::new(shapes) {
                return Ok(set);
            }
            log::warn!("Generated an empty shape set (attempt {}/{})", attempt, attempts);
        }
        Err(GenerationError::Empty(attempts))
    }

    fn draw_shapes<R: RandomSource + ?Sized>(
        &self,
        params: &MorphParams,
        center: Point,
        rng: &mut R,
    ) -> Vec<Shape> {
        let size = rng.uniform(params.min_size, params.max_size);

        // floor(uniform(1, n + 1)) is uniform over 1..=n; a source that
        // returns the upper bound itself is clamped back to n
        let count = (rng.uniform(1.0, params.num_shapes as f32 + 1.0).floor() as usize)
            .min(params.num_shapes);

        let half = size / 2.0;
        let shape_size = size * SHAPE_SIZE_FACTOR;

        (0..count)
            .map(|_| {
                let x = center.x + rng.uniform(-half, half);
                let y = center.y + rng.uniform(-half, half);
                let rotation = rng.uniform(0.0, TAU);
                let vertex_count = rng.uniform_int(params.min_vertices, params.max_vertices + 1);
                let vertices = self.vertices.generate(vertex_count, shape_size, rng);
                Shape {
                    x,
                    y,
                    rotation,
                    size: shape_size,
                    vertices,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morph::random::{FixedSource, RngSource};

    /// Returns a value below the requested range for the first `low_draws` calls
    struct UnderflowSource {
        low_draws: usize,
        inner: RngSource<rand::rngs::StdRng>,
    }

    impl RandomSource for UnderflowSource {
        fn uniform(&mut self, min: f32, max: f32) -> f32 {
            if self.low_draws > 0 {
                self.low_draws -= 1;
                return min - 1.0;
            }
            self.inner.uniform(min, max)
        }
    }

    #[test]
    fn test_counts_within_bounds() {
        let gen = ShapeSetGenerator::default();
        let params = MorphParams::default();
        let mut rng = RngSource::seeded(2024);
        let mut seen_counts = [false; 5];

        for _ in 0..500 {
            let set = gen.generate(&params, Point::new(300.0, 300.0), &mut rng).unwrap();
            assert!(set.len() >= 1 && set.len() <= params.num_shapes);
            seen_counts[set.len()] = true;
            for shape in set.iter() {
                let n = shape.vertices.len();
                assert!(n >= params.min_vertices && n <= params.max_vertices, "{} vertices", n);
            }
        }
        // Every count in 1..=4 shows up
        assert!(seen_counts[1..].iter().all(|&s| s));
    }

    #[test]
    fn test_placement_and_size() {
        let gen = ShapeSetGenerator::default();
        let params = MorphParams::default();
        let mut rng = RngSource::seeded(8);
        let center = Point::new(300.0, 200.0);

        for _ in 0..100 {
            let set = gen.generate(&params, center, &mut rng).unwrap();
            let size = set.first().size / SHAPE_SIZE_FACTOR;
            assert!(size >= params.min_size - 0.01 && size <= params.max_size + 0.01);
            for shape in set.iter() {
                assert!((shape.size - set.first().size).abs() < 1e-4);
                assert!((shape.x - center.x).abs() <= size / 2.0 + 0.01);
                assert!((shape.y - center.y).abs() <= size / 2.0 + 0.01);
                assert!(shape.rotation >= 0.0 && shape.rotation < TAU);
            }
        }
    }

    #[test]
    fn test_fixed_vertex_range() {
        let gen = ShapeSetGenerator::default();
        let params = MorphParams {
            min_vertices: 6,
            max_vertices: 6,
            min_size: 100.0,
            max_size: 100.0,
            ..MorphParams::default()
        };
        let mut rng = FixedSource::constant(0.999);
        let set = gen.generate(&params, Point::default(), &mut rng).unwrap();
        assert_eq!(set.len(), params.num_shapes);
        assert!(set.iter().all(|s| s.vertices.len() == 6));
        assert!((set.first().size - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_set_is_retried() {
        let gen = ShapeSetGenerator::default();
        let params = MorphParams::default();
        // First draw is size, second is the (underflowing) shape count
        let mut rng = UnderflowSource {
            low_draws: 2,
            inner: RngSource::seeded(1),
        };
        let set = gen.generate(&params, Point::default(), &mut rng).unwrap();
        assert!(set.len() >= 1);
    }

    #[test]
    fn test_persistent_empty_is_an_error() {
        let gen = ShapeSetGenerator {
            max_attempts: 3,
            ..ShapeSetGenerator::default()
        };
        let params = MorphParams::default();
        let mut rng = UnderflowSource {
            low_draws: usize::MAX,
            inner: RngSource::seeded(1),
        };
        let err = gen.generate(&params, Point::default(), &mut rng).unwrap_err();
        assert_eq!(err, GenerationError::Empty(3));
    }
}
