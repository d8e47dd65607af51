//! Easing curves - remap linear progress to perceived animation speed
//!
//! Every curve maps `[0, 1]` onto `[0, 1]`, is monotonic, and fixes both
//! endpoints. Input outside `[0, 1]` is clamped first.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Available easing curves
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Easing {
    /// `4t³` then `1 - (-2t + 2)³ / 2`
    #[default]
    CubicInOut,
    /// `2t²` then `1 - (-2t + 2)² / 2`
    QuadInOut,
    /// `-(cos(πt) - 1) / 2`
    SineInOut,
}

impl Easing {
    pub const ALL: &[Easing] = &[Easing::CubicInOut, Easing::QuadInOut, Easing::SineInOut];

    pub fn name(&self) -> &'static str {
        match self {
            Easing::CubicInOut => "Cubic in/out",
            Easing::QuadInOut => "Quad in/out",
            Easing::SineInOut => "Sine in/out",
        }
    }

    /// Eased progress for linear progress `t`
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}
