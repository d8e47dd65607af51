//! Live parameter store
//!
//! Every tweakable value lives here, keyed by name, with an optional numeric
//! range and step for slider widgets. The engine never holds parameters
//! itself: it takes a validated `MorphParams` snapshot at the top of each frame.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when parameters are accepted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown parameter: {0}")]
    UnknownParam(String),

    #[error("parameter {key} expects {expected}")]
    TypeMismatch { key: &'static str, expected: &'static str },

    #[error("{min_key} ({min}) must not exceed {max_key} ({max})")]
    InvertedRange {
        min_key: &'static str,
        max_key: &'static str,
        min: f32,
        max: f32,
    },

    #[error("parameter {key} is out of bounds: {value}")]
    OutOfBounds { key: &'static str, value: f32 },

    #[error("invalid color: {0}")]
    InvalidColor(String),
}

/// An RGB color, serialized as `#RRGGBB`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (leading `#` optional)
    pub fn from_hex(s: &str) -> Result<Self, ConfigError> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ConfigError::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Names of all tweakable parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKey {
    Interval,
    MorphSpeed,
    NumShapes,
    MinVertices,
    MaxVertices,
    MinSize,
    MaxSize,
    StrokeWeight,
    KeyColor,
    ShowVertices,
    VertexSize,
    VertexColor,
    OutlineOnly,
    CycleDrawMode,
    CurrentDrawMode,
}

impl ParamKey {
    pub const ALL: &[ParamKey] = &[
        Self::Interval,
        Self::MorphSpeed,
        Self::NumShapes,
        Self::MinVertices,
        Self::MaxVertices,
        Self::MinSize,
        Self::MaxSize,
        Self::StrokeWeight,
        Self::KeyColor,
        Self::ShowVertices,
        Self::VertexSize,
        Self::VertexColor,
        Self::OutlineOnly,
        Self::CycleDrawMode,
        Self::CurrentDrawMode,
    ];

    /// Stable name used for lookup and persistence
    pub fn name(&self) -> &'static str {
        match self {
            Self::Interval => "interval",
            Self::MorphSpeed => "morphSpeed",
            Self::NumShapes => "numShapes",
            Self::MinVertices => "minVertices",
            Self::MaxVertices => "maxVertices",
            Self::MinSize => "minSize",
            Self::MaxSize => "maxSize",
            Self::StrokeWeight => "strokeWeight",
            Self::KeyColor => "keyColor",
            Self::ShowVertices => "showVertices",
            Self::VertexSize => "vertexSize",
            Self::VertexColor => "vertexColor",
            Self::OutlineOnly => "outlineOnly",
            Self::CycleDrawMode => "cycleDrawMode",
            Self::CurrentDrawMode => "currentDrawMode",
        }
    }

    /// Label for the tweak panel
    pub fn label(&self) -> &'static str {
        match self {
            Self::Interval => "Interval (ms)",
            Self::MorphSpeed => "Morph speed",
            Self::NumShapes => "Max shapes",
            Self::MinVertices => "Min vertices",
            Self::MaxVertices => "Max vertices",
            Self::MinSize => "Min size",
            Self::MaxSize => "Max size",
            Self::StrokeWeight => "Stroke weight",
            Self::KeyColor => "Key color",
            Self::ShowVertices => "Show vertices",
            Self::VertexSize => "Vertex size",
            Self::VertexColor => "Vertex color",
            Self::OutlineOnly => "Outline only",
            Self::CycleDrawMode => "Cycle draw mode",
            Self::CurrentDrawMode => "Draw mode",
        }
    }

    pub fn from_name(name: &str) -> Option<ParamKey> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// Default value and slider range
    fn default_param(&self) -> Param {
        match self {
            Self::Interval => Param::ranged(ParamValue::Float(2000.0), 200.0, 10000.0, 100.0),
            Self::MorphSpeed => Param::ranged(ParamValue::Float(0.08), 0.01, 1.0, 0.01),
            Self::NumShapes => Param::ranged(ParamValue::Int(4), 1.0, 12.0, 1.0),
            Self::MinVertices => Param::ranged(ParamValue::Int(3), 3.0, 24.0, 1.0),
            Self::MaxVertices => Param::ranged(ParamValue::Int(10), 3.0, 24.0, 1.0),
            Self::MinSize => Param::ranged(ParamValue::Float(150.0), 10.0, 400.0, 1.0),
            Self::MaxSize => Param::ranged(ParamValue::Float(180.0), 10.0, 400.0, 1.0),
            Self::StrokeWeight => Param::ranged(ParamValue::Float(2.0), 0.5, 12.0, 0.5),
            Self::KeyColor => Param::plain(ParamValue::Color(Rgb::new(0x4C, 0x74, 0xB9))),
            Self::ShowVertices => Param::plain(ParamValue::Bool(false)),
            Self::VertexSize => Param::ranged(ParamValue::Float(6.0), 1.0, 24.0, 0.5),
            Self::VertexColor => Param::plain(ParamValue::Color(Rgb::new(0xFF, 0xFF, 0xFF))),
            Self::OutlineOnly => Param::plain(ParamValue::Bool(false)),
            Self::CycleDrawMode => Param::plain(ParamValue::Bool(true)),
            Self::CurrentDrawMode => Param::ranged(ParamValue::Int(0), 0.0, 2.0, 1.0),
        }
    }
}

/// A parameter value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    Color(Rgb),
}

impl ParamValue {
    fn kind(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "a boolean",
            ParamValue::Int(_) => "an integer",
            ParamValue::Float(_) => "a number",
            ParamValue::Color(_) => "a color",
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            ParamValue::Float(v) => Some(v),
            ParamValue::Int(v) => Some(v as f32),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ParamValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgb> {
        match *self {
            ParamValue::Color(v) => Some(v),
            _ => None,
        }
    }
}

/// Slider range for numeric parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    /// Clamp into range and snap to the nearest step above `min`
    fn fit(&self, v: f32) -> f32 {
        let v = v.clamp(self.min, self.max);
        if self.step > 0.0 {
            let snapped = self.min + ((v - self.min) / self.step).round() * self.step;
            // Values already on the grid keep their exact representation
            if (snapped - v).abs() <= self.step * 1e-3 {
                v
            } else {
                snapped.clamp(self.min, self.max)
            }
        } else {
            v
        }
    }
}

/// A stored parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param {
    pub value: ParamValue,
    pub range: Option<ParamRange>,
}

impl Param {
    fn plain(value: ParamValue) -> Self {
        Self { value, range: None }
    }

    fn ranged(value: ParamValue, min: f32, max: f32, step: f32) -> Self {
        Self {
            value,
            range: Some(ParamRange { min, max, step }),
        }
    }
}

/// Typed snapshot of the parameter store, read once per frame
#[derive(Debug, Clone, PartialEq)]
pub struct MorphParams {
    pub interval_ms: f32,
    pub morph_speed: f32,
    pub num_shapes: usize,
    pub min_vertices: usize,
    pub max_vertices: usize,
    pub min_size: f32,
    pub max_size: f32,
    pub stroke_weight: f32,
    pub key_color: Rgb,
    pub vertex_color: Rgb,
    pub vertex_size: f32,
    pub show_vertices: bool,
    pub outline_only: bool,
    pub cycle_draw_mode: bool,
}

impl Default for MorphParams {
    fn default() -> Self {
        ParamStore::default().snapshot()
    }
}

impl MorphParams {
    /// Configuration boundary check; generation assumes this passed
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_shapes < 1 {
            return Err(ConfigError::OutOfBounds {
                key: ParamKey::NumShapes.name(),
                value: self.num_shapes as f32,
            });
        }
        if self.min_vertices < 3 {
            return Err(ConfigError::OutOfBounds {
                key: ParamKey::MinVertices.name(),
                value: self.min_vertices as f32,
            });
        }
        if self.min_vertices > self.max_vertices {
            return Err(ConfigError::InvertedRange {
                min_key: ParamKey::MinVertices.name(),
                max_key: ParamKey::MaxVertices.name(),
                min: self.min_vertices as f32,
                max: self.max_vertices as f32,
            });
        }
        if self.min_size.is_nan() || self.min_size <= 0.0 {
            return Err(ConfigError::OutOfBounds {
                key: ParamKey::MinSize.name(),
                value: self.min_size,
            });
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::InvertedRange {
                min_key: ParamKey::MinSize.name(),
                max_key: ParamKey::MaxSize.name(),
                min: self.min_size,
                max: self.max_size,
            });
        }
        if self.morph_speed.is_nan() || self.morph_speed < 0.0 {
            return Err(ConfigError::OutOfBounds {
                key: ParamKey::MorphSpeed.name(),
                value: self.morph_speed,
            });
        }
        if self.interval_ms.is_nan() || self.interval_ms < 0.0 {
            return Err(ConfigError::OutOfBounds {
                key: ParamKey::Interval.name(),
                value: self.interval_ms,
            });
        }
        Ok(())
    }
}

/// Name-keyed parameter store
#[derive(Debug, Clone)]
pub struct ParamStore {
    params: BTreeMap<ParamKey, Param>,
}

impl Default for ParamStore {
    fn default() -> Self {
        Self {
            params: ParamKey::ALL
                .iter()
                .map(|&k| (k, k.default_param()))
                .collect(),
        }
    }
}

impl ParamStore {
    pub fn get(&self, key: ParamKey) -> &Param {
        // Every key is inserted on construction and never removed
        &self.params[&key]
    }

    pub fn get_by_name(&self, name: &str) -> Result<&Param, ConfigError> {
        ParamKey::from_name(name)
            .map(|k| self.get(k))
            .ok_or_else(|| ConfigError::UnknownParam(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, &Param)> {
        self.params.iter().map(|(k, p)| (*k, p))
    }

    /// Set a parameter by name; see [`ParamStore::set`]
    pub fn set_by_name(&mut self, name: &str, value: ParamValue) -> Result<ParamValue, ConfigError> {
        let key = ParamKey::from_name(name).ok_or_else(|| ConfigError::UnknownParam(name.to_string()))?;
        self.set(key, value)
    }

    /// Set a parameter, returning the value actually stored
    ///
    /// Numeric values are clamped to the parameter's range and snapped to its
    /// step. An edit that would invert a min/max pair is rejected and the
    /// previous value kept.
    pub fn set(&mut self, key: ParamKey, value: ParamValue) -> Result<ParamValue, ConfigError> {
        let current = *self.get(key);
        let fitted = fit_value(key, &current, value)?;

        let previous = current.value;
        self.set_raw(key, fitted);
        if let Err(e) = self.morph_params() {
            self.set_raw(key, previous);
            return Err(e);
        }
        Ok(fitted)
    }

    fn set_raw(&mut self, key: ParamKey, value: ParamValue) {
        if let Some(param) = self.params.get_mut(&key) {
            param.value = value;
        }
    }

    fn float(&self, key: ParamKey) -> f32 {
        self.get(key).value.as_f32().unwrap_or_default()
    }

    fn count(&self, key: ParamKey) -> usize {
        self.float(key).max(0.0).round() as usize
    }

    fn flag(&self, key: ParamKey) -> bool {
        self.get(key).value.as_bool().unwrap_or_default()
    }

    fn color(&self, key: ParamKey) -> Rgb {
        self.get(key).value.as_color().unwrap_or(Rgb::new(0, 0, 0))
    }

    /// Validated snapshot of the current values
    pub fn morph_params(&self) -> Result<MorphParams, ConfigError> {
        let params = self.snapshot();
        params.validate()?;
        Ok(params)
    }

    fn snapshot(&self) -> MorphParams {
        MorphParams {
            interval_ms: self.float(ParamKey::Interval),
            morph_speed: self.float(ParamKey::MorphSpeed),
            num_shapes: self.count(ParamKey::NumShapes),
            min_vertices: self.count(ParamKey::MinVertices),
            max_vertices: self.count(ParamKey::MaxVertices),
            min_size: self.float(ParamKey::MinSize),
            max_size: self.float(ParamKey::MaxSize),
            stroke_weight: self.float(ParamKey::StrokeWeight),
            key_color: self.color(ParamKey::KeyColor),
            vertex_color: self.color(ParamKey::VertexColor),
            vertex_size: self.float(ParamKey::VertexSize),
            show_vertices: self.flag(ParamKey::ShowVertices),
            outline_only: self.flag(ParamKey::OutlineOnly),
            cycle_draw_mode: self.flag(ParamKey::CycleDrawMode),
        }
    }
}

/// Type-check `value` against the stored parameter and fit it to its range
fn fit_value(key: ParamKey, current: &Param, value: ParamValue) -> Result<ParamValue, ConfigError> {
    let mismatch = || ConfigError::TypeMismatch {
        key: key.name(),
        expected: current.value.kind(),
    };

    match (current.value, value) {
        (ParamValue::Bool(_), ParamValue::Bool(v)) => Ok(ParamValue::Bool(v)),
        (ParamValue::Color(_), ParamValue::Color(v)) => Ok(ParamValue::Color(v)),
        (ParamValue::Float(_), ParamValue::Float(_) | ParamValue::Int(_)) => {
            let v = value.as_f32().ok_or_else(mismatch)?;
            if !v.is_finite() {
                return Err(ConfigError::OutOfBounds { key: key.name(), value: v });
            }
            Ok(ParamValue::Float(current.range.map_or(v, |r| r.fit(v))))
        }
        (ParamValue::Int(_), ParamValue::Int(_) | ParamValue::Float(_)) => {
            let v = value.as_f32().ok_or_else(mismatch)?;
            if !v.is_finite() {
                return Err(ConfigError::OutOfBounds { key: key.name(), value: v });
            }
            let v = current.range.map_or(v, |r| r.fit(v));
            Ok(ParamValue::Int(v.round() as i64))
        }
        _ => Err(mismatch()),
    }
}
