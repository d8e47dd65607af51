//! Animation controller - per-frame orchestration
//!
//! The host calls [`AnimationController::tick`] once per frame with a
//! monotonic clock in milliseconds. The first tick generates a set and shows
//! it as-is. After that, every `interval` the previous target becomes the
//! current set, a fresh target is drawn and progress restarts from zero.

use super::blend::blend;
use super::draw_mode::{DrawModeCycler, DrawStyle};
use super::easing::Easing;
use super::generator::{GenerationError, ShapeSetGenerator};
use super::random::RandomSource;
use super::types::{Point, ShapeSet};
use crate::params::MorphParams;

/// Drawable area supplied by the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Output of one tick, ready for a renderer
#[derive(Clone, Debug)]
pub struct Frame {
    pub shapes: ShapeSet,
    pub style: DrawStyle,
    /// Linear progress used for this frame
    pub progress: f32,
    /// Progress after easing
    pub eased: f32,
}

enum State {
    Uninitialized,
    Steady { current: ShapeSet, target: ShapeSet },
}

/// Drives generation, timing and blending
pub struct AnimationController<R: RandomSource> {
    generator: ShapeSetGenerator,
    rng: R,
    easing: Easing,
    cycler: DrawModeCycler,
    state: State,
    progress: f32,
    last_transition_ms: f64,
}

impl<R: RandomSource> AnimationController<R> {
    pub fn new(rng: R) -> Self {
        Self::with_generator(rng, ShapeSetGenerator::default())
    }

    pub fn with_generator(rng: R, generator: ShapeSetGenerator) -> Self {
        Self {
            generator,
            rng,
            easing: Easing::default(),
            cycler: DrawModeCycler::new(),
            state: State::Uninitialized,
            progress: 0.0,
            last_transition_ms: 0.0,
        }
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, State::Steady { .. })
    }

    pub fn current(&self) -> Option<&ShapeSet> {
        match &self.state {
            State::Steady { current, .. } => Some(current),
            State::Uninitialized => None,
        }
    }

    pub fn target(&self) -> Option<&ShapeSet> {
        match &self.state {
            State::Steady { target, .. } => Some(target),
            State::Uninitialized => None,
        }
    }

    pub fn cycler(&self) -> &DrawModeCycler {
        &self.cycler
    }

    /// Advance one frame
    ///
    /// `params` is read fresh on every call, so edits made between ticks
    /// apply immediately.
    pub fn tick(
        &mut self,
        now_ms: f64,
        canvas: Canvas,
        params: &MorphParams,
    ) -> Result<Frame, GenerationError> {
        if !self.is_initialized() {
            return self.initialize(now_ms, canvas, params);
        }

        if now_ms - self.last_transition_ms >= f64::from(params.interval_ms) {
            self.transition(now_ms, canvas, params);
        }

        self.progress = (self.progress + params.morph_speed).clamp(0.0, 1.0);
        let eased = self.easing.apply(self.progress);
        let style = self.style(params);

        let State::Steady { current, target } = &self.state else {
            return self.initialize(now_ms, canvas, params);
        };

        Ok(Frame {
            shapes: blend(current, target, eased),
            style,
            progress: self.progress,
            eased,
        })
    }

    /// Regenerate right away instead of waiting for the interval
    pub fn force_transition(&mut self, now_ms: f64, canvas: Canvas, params: &MorphParams) {
        if self.is_initialized() {
            self.transition(now_ms, canvas, params);
        }
    }

    fn initialize(
        &mut self,
        now_ms: f64,
        canvas: Canvas,
        params: &MorphParams,
    ) -> Result<Frame, GenerationError> {
        let target = self.generator.generate(params, canvas.center(), &mut self.rng)?;
        log::debug!("Initial shape set with {} shapes", target.len());

        self.progress = 0.0;
        self.last_transition_ms = now_ms;

        // No current set yet: show the target without interpolating
        let frame = Frame {
            shapes: target.clone(),
            style: self.style(params),
            progress: 1.0,
            eased: 1.0,
        };
        self.state = State::Steady {
            current: target.clone(),
            target,
        };
        Ok(frame)
    }

    fn transition(&mut self, now_ms: f64, canvas: Canvas, params: &MorphParams) {
        self.last_transition_ms = now_ms;
        self.progress = 0.0;

        let State::Steady { current, target } = &mut self.state else {
            return;
        };

        match self.generator.generate(params, canvas.center(), &mut self.rng) {
            Ok(next) => {
                log::debug!("New target with {} shapes", next.len());
                *current = std::mem::replace(target, next);
            }
            Err(e) => {
                log::warn!("Keeping previous target: {}", e);
                *current = target.clone();
            }
        }

        self.cycler.advance(params.cycle_draw_mode);
    }

    fn style(&self, params: &MorphParams) -> DrawStyle {
        self.cycler
            .style(params.cycle_draw_mode, params.outline_only, params.show_vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morph::draw_mode::DrawMode;
    use crate::morph::random::RngSource;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Seeded source that can be switched to draw below every range, which
    /// makes the shape count floor to zero
    struct SwitchSource {
        failing: Rc<Cell<bool>>,
        inner: RngSource<rand::rngs::StdRng>,
    }

    impl RandomSource for SwitchSource {
        fn uniform(&mut self, min: f32, max: f32) -> f32 {
            if self.failing.get() {
                return min - 1.0;
            }
            self.inner.uniform(min, max)
        }
    }

    fn switchable(failing: bool) -> (AnimationController<SwitchSource>, Rc<Cell<bool>>) {
        let flag = Rc::new(Cell::new(failing));
        let source = SwitchSource {
            failing: Rc::clone(&flag),
            inner: RngSource::seeded(99),
        };
        let generator = ShapeSetGenerator {
            max_attempts: 2,
            ..ShapeSetGenerator::default()
        };
        (AnimationController::with_generator(source, generator), flag)
    }

    fn controller() -> AnimationController<RngSource<rand::rngs::StdRng>> {
        AnimationController::new(RngSource::seeded(1234))
    }

    fn canvas() -> Canvas {
        Canvas::new(600.0, 600.0)
    }

    fn params(interval_ms: f32, morph_speed: f32) -> MorphParams {
        MorphParams {
            interval_ms,
            morph_speed,
            ..MorphParams::default()
        }
    }

    #[test]
    fn test_first_tick_shows_target_directly() {
        let mut ctl = controller();
        assert!(ctl.current().is_none());

        let frame = ctl.tick(0.0, canvas(), &params(2000.0, 0.3)).unwrap();
        assert_eq!(frame.progress, 1.0);
        assert_eq!(Some(&frame.shapes), ctl.target());
        assert_eq!(ctl.current(), ctl.target());
        assert_eq!(ctl.progress(), 0.0);
    }

    #[test]
    fn test_end_to_end_timeline() {
        let mut ctl = controller();
        let p = params(2000.0, 0.3);

        ctl.tick(0.0, canvas(), &p).unwrap();
        let first_target = ctl.target().cloned().unwrap();

        // No interval elapsed yet
        let frame = ctl.tick(500.0, canvas(), &p).unwrap();
        assert!((frame.progress - 0.3).abs() < 1e-6);
        assert!((frame.eased - Easing::CubicInOut.apply(0.3)).abs() < 1e-6);
        assert_eq!(ctl.target(), Some(&first_target));

        // Interval elapsed: promote, regenerate, reset and advance in one tick
        let frame = ctl.tick(2100.0, canvas(), &p).unwrap();
        assert_eq!(ctl.current(), Some(&first_target));
        assert_ne!(ctl.target(), Some(&first_target));
        assert!((frame.progress - 0.3).abs() < 1e-6);

        let expected = blend(&first_target, ctl.target().unwrap(), Easing::CubicInOut.apply(0.3));
        assert_eq!(frame.shapes, expected);
    }

    #[test]
    fn test_progress_clamps_at_one() {
        let mut ctl = controller();
        let p = params(10_000.0, 0.4);
        ctl.tick(0.0, canvas(), &p).unwrap();
        for i in 1..10 {
            let frame = ctl.tick(i as f64 * 16.0, canvas(), &p).unwrap();
            assert!(frame.progress <= 1.0);
        }
        assert_eq!(ctl.progress(), 1.0);
    }

    #[test]
    fn test_fast_morph_snaps_on_first_tick() {
        let mut ctl = controller();
        let p = params(1000.0, 1.5);
        ctl.tick(0.0, canvas(), &p).unwrap();
        let frame = ctl.tick(1000.0, canvas(), &p).unwrap();
        assert_eq!(frame.progress, 1.0);
        assert_eq!(&frame.shapes, &blend(ctl.current().unwrap(), ctl.target().unwrap(), 1.0));
    }

    #[test]
    fn test_draw_mode_follows_regenerations() {
        let mut ctl = controller();
        let p = params(100.0, 0.1);
        ctl.tick(0.0, canvas(), &p).unwrap();

        let mut modes = Vec::new();
        for i in 1..=4 {
            let frame = ctl.tick(i as f64 * 100.0, canvas(), &p).unwrap();
            modes.push(frame.style.mode);
        }
        assert_eq!(
            modes,
            vec![
                DrawMode::Filled,
                DrawMode::Filled,
                DrawMode::Filled,
                DrawMode::OutlineWithVertices
            ]
        );
    }

    #[test]
    fn test_flags_apply_without_cycling() {
        let mut ctl = controller();
        let p = MorphParams {
            cycle_draw_mode: false,
            outline_only: true,
            show_vertices: true,
            ..MorphParams::default()
        };
        let frame = ctl.tick(0.0, canvas(), &p).unwrap();
        assert_eq!(frame.style.mode, DrawMode::Outline);
        assert!(frame.style.show_vertices);
    }

    #[test]
    fn test_force_transition() {
        let mut ctl = controller();
        let p = params(60_000.0, 0.1);
        ctl.tick(0.0, canvas(), &p).unwrap();
        let before = ctl.target().cloned();

        ctl.force_transition(10.0, canvas(), &p);
        assert_eq!(ctl.current().cloned(), before);
        assert_ne!(ctl.target().cloned(), before);
        assert_eq!(ctl.progress(), 0.0);
    }

    #[test]
    fn test_failed_regeneration_keeps_target() {
        let (mut ctl, failing) = switchable(false);
        let p = params(2000.0, 0.3);

        ctl.tick(0.0, canvas(), &p).unwrap();
        let first_target = ctl.target().cloned().unwrap();

        failing.set(true);
        let frame = ctl.tick(2100.0, canvas(), &p).unwrap();
        assert_eq!(ctl.current(), Some(&first_target));
        assert_eq!(ctl.target(), Some(&first_target));
        assert!((frame.progress - 0.3).abs() < 1e-6);
        assert_eq!(frame.shapes, first_target);
        assert_eq!(ctl.cycler().counter(), 1);

        // Generation recovers on the next interval
        failing.set(false);
        let frame = ctl.tick(4200.0, canvas(), &p).unwrap();
        assert_eq!(ctl.current(), Some(&first_target));
        assert_ne!(ctl.target(), Some(&first_target));
        assert!((frame.progress - 0.3).abs() < 1e-6);
        assert_eq!(ctl.cycler().counter(), 2);
    }

    #[test]
    fn test_failed_first_tick_retries_next_frame() {
        let (mut ctl, failing) = switchable(true);
        let p = params(2000.0, 0.3);

        let err = ctl.tick(0.0, canvas(), &p).unwrap_err();
        assert_eq!(err, GenerationError::Empty(2));
        assert!(!ctl.is_initialized());
        assert!(ctl.target().is_none());

        failing.set(false);
        let frame = ctl.tick(16.0, canvas(), &p).unwrap();
        assert!(ctl.is_initialized());
        assert_eq!(frame.progress, 1.0);
        assert_eq!(Some(&frame.shapes), ctl.target());
        assert_eq!(ctl.progress(), 0.0);
    }

    #[test]
    fn test_shapes_centered_on_canvas() {
        let mut ctl = controller();
        let frame = ctl
            .tick(0.0, Canvas::new(800.0, 400.0), &MorphParams::default())
            .unwrap();
        for shape in frame.shapes.iter() {
            assert!((shape.x - 400.0).abs() <= 90.0);
            assert!((shape.y - 200.0).abs() <= 90.0);
        }
    }
}
