//! Morph engine - randomized shape sets blended over time
//!
//! This module provides:
//! - `ShapeSetGenerator` and `VertexGenerator` for random polygon sets
//! - `blend` for reconciling sets with different shape and vertex counts
//! - `Easing` curves and the `DrawModeCycler`
//! - `AnimationController`, which ties it together once per frame

mod blend;
mod controller;
mod draw_mode;
mod easing;
mod generator;
pub mod random;
mod types;
mod vertices;

#[allow(unused_imports)]
pub use blend::{blend, blend_shape, blend_vertices};
#[allow(unused_imports)]
pub use controller::{AnimationController, Canvas, Frame};
#[allow(unused_imports)]
pub use draw_mode::{DrawMode, DrawModeCycler, DrawStyle};
pub use easing::Easing;
#[allow(unused_imports)]
pub use generator::{GenerationError, ShapeSetGenerator};
#[allow(unused_imports)]
pub use random::{RandomSource, RngSource};
#[allow(unused_imports)]
pub use types::{lerp, Point, Shape, ShapeSet};
#[allow(unused_imports)]
pub use vertices::VertexGenerator;
