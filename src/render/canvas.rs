//! egui canvas renderer
//!
//! Generated shapes are star-shaped around their own center, but mid-morph
//! outlines with mismatched vertex counts often are not. Fills are
//! ear-clipped with `earcutr` so concave outlines keep their shape. A
//! triangle fan from the shape center is the fallback when ear clipping
//! yields nothing, which for self-intersecting outlines overfills.

use earcutr::earcut;
use eframe::egui::{self, Color32, Mesh, Pos2, Stroke};

use super::spline::smooth_closed;
use super::Renderer;
use crate::morph::{Frame, Point, Shape};
use crate::params::{MorphParams, Rgb};

/// Curve samples between consecutive vertices
const SAMPLES_PER_EDGE: usize = 12;

/// Paints frames into a rectangle of an egui painter
pub struct CanvasRenderer<'a> {
    painter: &'a egui::Painter,
    /// Screen position of the canvas origin
    origin: Pos2,
}

impl<'a> CanvasRenderer<'a> {
    pub fn new(painter: &'a egui::Painter, origin: Pos2) -> Self {
        Self { painter, origin }
    }

    fn to_screen(&self, p: Point) -> Pos2 {
        Pos2::new(self.origin.x + p.x, self.origin.y + p.y)
    }

    fn draw_shape(&self, shape: &Shape, frame: &Frame, params: &MorphParams) {
        if shape.vertices.is_empty() {
            return;
        }

        let key = to_color32(params.key_color);
        let world: Vec<Point> = shape.vertices.iter().map(|&v| shape.to_world(v)).collect();
        let outline: Vec<Pos2> = smooth_closed(&world, SAMPLES_PER_EDGE)
            .into_iter()
            .map(|p| self.to_screen(p))
            .collect();

        if frame.style.outline {
            self.painter.add(egui::Shape::closed_line(
                outline,
                Stroke::new(params.stroke_weight, key),
            ));
        } else {
            let center = self.to_screen(Point::new(shape.x, shape.y));
            self.painter.add(egui::Shape::mesh(fill_mesh(center, &outline, key)));
        }

        if frame.style.show_vertices {
            let color = to_color32(params.vertex_color);
            for &p in &world {
                self.painter
                    .circle_filled(self.to_screen(p), params.vertex_size / 2.0, color);
            }
        }
    }
}

impl Renderer for CanvasRenderer<'_> {
    fn draw(&mut self, frame: &Frame, params: &MorphParams) {
        for shape in frame.shapes.iter() {
            self.draw_shape(shape, frame, params);
        }
    }
}

pub fn to_color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

/// Triangle fan indices for a ring of `n` points around vertex 0
fn fan_indices(n: usize) -> Vec<[u32; 3]> {
    (0..n as u32)
        .map(|i| [0, i + 1, (i + 1) % n as u32 + 1])
        .collect()
}

/// Ear-clipped triangles over `ring`, or `None` when earcut finds none
fn ear_indices(ring: &[Pos2]) -> Option<Vec<[u32; 3]>> {
    let flattened: Vec<f64> = ring
        .iter()
        .flat_map(|p| [f64::from(p.x), f64::from(p.y)])
        .collect();
    let indices = earcut(&flattened, &[], 2).ok()?;
    if indices.is_empty() {
        return None;
    }
    Some(
        indices
            .chunks_exact(3)
            .map(|t| [t[0] as u32, t[1] as u32, t[2] as u32])
            .collect(),
    )
}

/// Filled outline, ear-clipped when possible
fn fill_mesh(center: Pos2, ring: &[Pos2], color: Color32) -> Mesh {
    if ring.len() < 3 {
        return Mesh::default();
    }
    let Some(triangles) = ear_indices(ring) else {
        log::trace!("Ear clipping failed for {} points, using fan", ring.len());
        return fan_mesh(center, ring, color);
    };

    let mut mesh = Mesh::default();
    for &p in ring {
        mesh.colored_vertex(p, color);
    }
    for [a, b, c] in triangles {
        mesh.add_triangle(a, b, c);
    }
    mesh
}

fn fan_mesh(center: Pos2, ring: &[Pos2], color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    if ring.len() < 3 {
        return mesh;
    }
    mesh.colored_vertex(center, color);
    for &p in ring {
        mesh.colored_vertex(p, color);
    }
    for [a, b, c] in fan_indices(ring.len()) {
        mesh.add_triangle(a, b, c);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_indices_close_the_ring() {
        let tris = fan_indices(4);
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 1]]);
    }

    #[test]
    fn test_fan_mesh_shape() {
        let ring = [
            Pos2::new(1.0, 0.0),
            Pos2::new(0.0, 1.0),
            Pos2::new(-1.0, 0.0),
            Pos2::new(0.0, -1.0),
            Pos2::new(0.5, -0.5),
        ];
        let mesh = fan_mesh(Pos2::ZERO, &ring, Color32::WHITE);
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.indices.len(), 15);

        let empty = fan_mesh(Pos2::ZERO, &ring[..2], Color32::WHITE);
        assert!(empty.vertices.is_empty());
    }

    fn triangle_area(a: Pos2, b: Pos2, c: Pos2) -> f32 {
        ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() / 2.0
    }

    fn mesh_area(mesh: &Mesh) -> f32 {
        mesh.indices
            .chunks_exact(3)
            .map(|t| {
                let v = |i: u32| mesh.vertices[i as usize].pos;
                triangle_area(v(t[0]), v(t[1]), v(t[2]))
            })
            .sum()
    }

    #[test]
    fn test_concave_fill_covers_outline_only() {
        // L-shape whose center (1.5, 1.5) sees part of the outline from behind
        let ring = [
            Pos2::new(0.0, 0.0),
            Pos2::new(3.0, 0.0),
            Pos2::new(3.0, 1.0),
            Pos2::new(1.0, 1.0),
            Pos2::new(1.0, 3.0),
            Pos2::new(0.0, 3.0),
        ];
        let mesh = fill_mesh(Pos2::new(1.5, 1.5), &ring, Color32::WHITE);
        assert_eq!(mesh.vertices.len(), ring.len());
        assert_eq!(mesh.indices.len(), (ring.len() - 2) * 3);
        assert!((mesh_area(&mesh) - 5.0).abs() < 1e-4);

        // The fan from the same center overfills the notch
        let fan = fan_mesh(Pos2::new(1.5, 1.5), &ring, Color32::WHITE);
        assert!(mesh_area(&fan) > 5.5);
    }

    #[test]
    fn test_fill_mesh_skips_degenerate_rings() {
        let ring = [Pos2::new(0.0, 0.0), Pos2::new(1.0, 0.0)];
        assert!(fill_mesh(Pos2::ZERO, &ring, Color32::WHITE).vertices.is_empty());
    }

    #[test]
    fn test_color_conversion() {
        let c = to_color32(Rgb::new(0x4C, 0x74, 0xB9));
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0x4C, 0x74, 0xB9, 255));
    }
}
