//! Core geometry types for the morph engine
//!
//! A `ShapeSet` is one animation frame's worth of content. Shapes carry their
//! own world-space placement, while vertices stay in the shape's local frame
//! (before rotation and translation).

/// A point in a shape's local frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other`
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(lerp(self.x, other.x, t), lerp(self.y, other.y, t))
    }
}

/// `a + (b - a) * t`
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A single polygonal shape
///
/// `vertices` is a cycle: the last vertex connects back to the first.
/// Vertex order matters, since morphing pairs vertices index-for-index.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    /// World-space center X
    pub x: f32,
    /// World-space center Y
    pub y: f32,
    /// Rotation in radians
    pub rotation: f32,
    /// Base size the vertices were generated from (kept for reference)
    pub size: f32,
    /// Outline in the local frame
    pub vertices: Vec<Point>,
}

impl Shape {
    /// Map a local vertex to world space (rotate, then translate)
    pub fn to_world(&self, p: Point) -> Point {
        let (sin_r, cos_r) = self.rotation.sin_cos();
        Point::new(
            self.x + p.x * cos_r - p.y * sin_r,
            self.y + p.x * sin_r + p.y * cos_r,
        )
    }
}

/// An ordered, non-empty collection of shapes
///
/// Order only determines index correspondence while morphing.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeSet {
    shapes: Vec<Shape>,
}

impl ShapeSet {
    /// Build a shape set, or `None` if `shapes` is empty
    pub fn new(shapes: Vec<Shape>) -> Option<Self> {
        if shapes.is_empty() {
            None
        } else {
            Some(Self { shapes })
        }
    }

    /// Number of shapes, never zero
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// The first shape, used as the fallback partner when set sizes differ
    pub fn first(&self) -> &Shape {
        &self.shapes[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}
