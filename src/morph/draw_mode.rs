//! Draw mode selection
//!
//! With cycling enabled, every regeneration steps a counter through four
//! slots: three filled frames, then one outline-with-vertices frame. The
//! outline-only mode exists but the cycle never lands on it; it is only
//! reachable through the `outlineOnly` flag with cycling switched off.

/// Rendering style selector
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DrawMode {
    #[default]
    Filled,
    Outline,
    OutlineWithVertices,
}

impl DrawMode {
    /// Mode for an index, clamping anything above 2
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => DrawMode::Filled,
            1 => DrawMode::Outline,
            _ => DrawMode::OutlineWithVertices,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            DrawMode::Filled => 0,
            DrawMode::Outline => 1,
            DrawMode::OutlineWithVertices => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DrawMode::Filled => "Filled",
            DrawMode::Outline => "Outline",
            DrawMode::OutlineWithVertices => "Outline + vertices",
        }
    }
}

/// Fully resolved style handed to the renderer
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DrawStyle {
    pub mode: DrawMode,
    /// Stroke the outline instead of filling it
    pub outline: bool,
    /// Draw a marker on every vertex
    pub show_vertices: bool,
}

/// Number of slots in one cycle
const CYCLE_LENGTH: u8 = 4;

/// Advances the draw mode on each regeneration
#[derive(Clone, Debug, Default)]
pub struct DrawModeCycler {
    counter: u8,
    active: DrawMode,
}

impl DrawModeCycler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// Mode picked by the most recent cycling step
    pub fn active(&self) -> DrawMode {
        self.active
    }

    /// Called once per target regeneration
    ///
    /// The slot being left decides the mode: slots 0-2 fill, slot 3 shows
    /// outline and vertices. Does nothing when cycling is off.
    pub fn advance(&mut self, cycling_enabled: bool) {
        if !cycling_enabled {
            return;
        }
        self.active = if self.counter < 3 {
            DrawMode::Filled
        } else {
            DrawMode::OutlineWithVertices
        };
        self.counter = (self.counter + 1) % CYCLE_LENGTH;
    }

    /// Resolve the style for this frame
    pub fn style(&self, cycling_enabled: bool, outline_only: bool, show_vertices: bool) -> DrawStyle {
        if cycling_enabled {
            DrawStyle {
                mode: self.active,
                outline: self.active != DrawMode::Filled,
                show_vertices: self.active == DrawMode::OutlineWithVertices,
            }
        } else {
            DrawStyle {
                mode: if outline_only { DrawMode::Outline } else { DrawMode::Filled },
                outline: outline_only,
                show_vertices,
            }
        }
    }
}
