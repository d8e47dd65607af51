//! Render module - turns engine frames into pixels
//!
//! This module provides:
//! - `Renderer` trait, the seam between engine output and drawing
//! - `CanvasRenderer`, which paints onto an egui canvas
//! - Closed Catmull-Rom smoothing for shape outlines

mod canvas;
mod spline;

pub use canvas::CanvasRenderer;

use crate::morph::Frame;
use crate::params::MorphParams;

/// Something that can draw a morphed frame
///
/// Per shape, implementations translate to `(x, y)`, rotate by `rotation`,
/// draw a closed smoothed outline through the vertices, and add vertex
/// markers when the frame's style asks for them.
pub trait Renderer {
    fn draw(&mut self, frame: &Frame, params: &MorphParams);
}
