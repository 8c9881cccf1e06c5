//! Frame driver: the tick/update/render loop.
//!
//! A [`Frame`] owns the output pixmap and drives a [`Scene`]: each tick it
//! measures elapsed time, runs the scene's update step on the configured
//! cadence, collects damage from the component tree, merges it, repaints
//! only the merged rectangles, and quantizes the repainted pixels. The
//! caller pulls the damage list to know what to flush downstream.
//!
//! Pausing is wall-clock aware: the paused interval is subtracted from
//! every timestamp on resume, so update deltas never see the gap.

pub mod scheduler;

pub use scheduler::{FrameScheduler, SchedulerCommand};

use crate::buffer::Pixmap;
use crate::color::{ColorTransformer, IdentityTransformer, Rgba};
use crate::component::ComponentHandle;
use crate::error::FrameError;
use crate::geometry::{Rect, Size};
use crate::render::PaintContext;
use std::time::{Duration, Instant};

/// The application side of the frame loop.
///
/// A scene owns the component tree and hands its root to the driver on
/// every tick. Returning a different handle (by identity) forces a full
/// render. The hooks are the scene's only notification channel; all of
/// them run on the ticking thread.
pub trait Scene: Send {
    /// The current root of the component tree.
    fn root(&mut self) -> ComponentHandle;

    /// Called once per non-suppressed tick, before any update or render.
    fn on_tick(&mut self, total: Duration, delta: Duration) {
        let _ = (total, delta);
    }

    /// Advance the scene by `delta`. Return `true` when something changed
    /// that warrants a render even if no component is dirty yet.
    fn on_update(&mut self, delta: Duration) -> bool {
        let _ = delta;
        false
    }

    /// Called when a pause is requested.
    fn on_pause(&mut self) {}

    /// Called when the frame resumes.
    fn on_resume(&mut self) {}
}

/// Construction-time configuration for a [`Frame`].
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Logical drawing resolution components are positioned in.
    pub canvas: Size,
    /// Output buffer resolution. Defaults to the canvas size; must be an
    /// integer multiple of it on both axes.
    pub viewport: Option<Size>,
    /// Minimum time between update invocations. Zero updates every tick.
    pub update_interval: Duration,
}

impl FrameConfig {
    /// Configuration with viewport equal to canvas and updates every tick.
    pub const fn new(canvas: Size) -> Self {
        Self {
            canvas,
            viewport: None,
            update_interval: Duration::ZERO,
        }
    }

    /// Set an explicit viewport resolution.
    #[must_use]
    pub const fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Set the update cadence.
    #[must_use]
    pub const fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }
}

/// The frame driver.
///
/// Designed to be ticked by a single external thread (see
/// [`FrameScheduler`]); components may be mutated from other threads
/// between ticks through their handles. The driver owns the viewport
/// pixmap exclusively during a tick; callers read it between ticks.
pub struct Frame<S: Scene> {
    scene: S,
    canvas: Size,
    scale: Size,
    update_interval: Duration,
    transformer: Box<dyn ColorTransformer>,
    viewport: Pixmap,
    damage: Vec<Rect>,
    last_root: Option<ComponentHandle>,
    started_at: Instant,
    last_update_at: Instant,
    paused_at: Option<Instant>,
    pausing: bool,
    paused: bool,
    total_time: Duration,
}

impl<S: Scene> Frame<S> {
    /// Create a frame with a pass-through color transformer.
    ///
    /// # Errors
    /// Returns [`FrameError::InvalidDimensions`] for a zero-size canvas or
    /// viewport and [`FrameError::NonIntegerScale`] when the viewport is
    /// not a whole multiple of the canvas per axis.
    pub fn new(scene: S, config: FrameConfig) -> Result<Self, FrameError> {
        Self::with_transformer(scene, config, Box::new(IdentityTransformer))
    }

    /// Create a frame that quantizes repainted pixels with `transformer`.
    ///
    /// # Errors
    /// Same conditions as [`Frame::new`].
    pub fn with_transformer(
        scene: S,
        config: FrameConfig,
        transformer: Box<dyn ColorTransformer>,
    ) -> Result<Self, FrameError> {
        let canvas = config.canvas;
        let viewport = config.viewport.unwrap_or(canvas);
        if canvas.is_empty() {
            return Err(FrameError::InvalidDimensions {
                width: canvas.width,
                height: canvas.height,
            });
        }
        if viewport.is_empty() {
            return Err(FrameError::InvalidDimensions {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if viewport.width % canvas.width != 0 || viewport.height % canvas.height != 0 {
            return Err(FrameError::NonIntegerScale { viewport, canvas });
        }

        let now = Instant::now();
        Ok(Self {
            scene,
            canvas,
            scale: viewport / canvas,
            update_interval: config.update_interval,
            transformer,
            viewport: Pixmap::new(viewport.width, viewport.height),
            damage: Vec::new(),
            last_root: None,
            started_at: now,
            last_update_at: now,
            paused_at: None,
            pausing: false,
            paused: false,
            total_time: Duration::ZERO,
        })
    }

    /// The logical canvas resolution.
    #[inline]
    pub const fn canvas(&self) -> Size {
        self.canvas
    }

    /// The per-axis canvas-to-viewport scale factor.
    #[inline]
    pub const fn scale(&self) -> Size {
        self.scale
    }

    /// Read-only access to the output pixmap.
    #[inline]
    pub const fn viewport(&self) -> &Pixmap {
        &self.viewport
    }

    /// Accumulated running time, excluding paused intervals.
    #[inline]
    pub const fn total_time(&self) -> Duration {
        self.total_time
    }

    /// Whether tick suppression is in effect (pause already took hold).
    #[inline]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// The configured update cadence.
    #[inline]
    pub const fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Change the update cadence.
    pub fn set_update_interval(&mut self, interval: Duration) {
        self.update_interval = interval;
    }

    /// The scene being driven.
    #[inline]
    pub const fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable access to the scene, for use between ticks.
    #[inline]
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Run one tick against the wall clock.
    pub fn tick(&mut self, force_update: bool) {
        self.tick_at(Instant::now(), force_update);
    }

    /// Request a pause at the current wall-clock time.
    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    /// Resume from a pause at the current wall-clock time.
    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    /// Request a pause with an explicit timestamp.
    ///
    /// Suppression starts one tick later: the tick already in flight (or
    /// the next one to arrive) still executes fully. No-op when already
    /// paused or pause-pending.
    pub fn pause_at(&mut self, now: Instant) {
        if self.paused || self.pausing {
            return;
        }
        self.paused_at = Some(now);
        self.pausing = true;
        self.scene.on_pause();
    }

    /// Resume from a pause with an explicit timestamp.
    ///
    /// Shifts every internal timestamp forward by the paused duration so
    /// elapsed and delta times exclude the gap. No-op when not paused.
    pub fn resume_at(&mut self, now: Instant) {
        let Some(paused_at) = self.paused_at.take() else {
            return;
        };
        let paused_for = now.saturating_duration_since(paused_at);
        self.started_at += paused_for;
        self.last_update_at += paused_for;
        self.paused = false;
        self.pausing = false;
        self.scene.on_resume();
    }

    /// Run one tick with an explicit timestamp.
    ///
    /// Suppressed while paused unless `force_update` is set. A forced tick
    /// also bypasses the update cadence, running exactly one update with
    /// the full delta.
    pub fn tick_at(&mut self, now: Instant, force_update: bool) {
        if self.paused && !force_update {
            return;
        }
        if self.pausing {
            self.paused = true;
            self.pausing = false;
        }

        let delta = now.saturating_duration_since(self.last_update_at);
        self.total_time = now.saturating_duration_since(self.started_at);
        self.scene.on_tick(self.total_time, delta);

        let due = force_update || self.update_interval.is_zero() || delta >= self.update_interval;
        let mut updated = false;
        if due {
            if self.update_interval.is_zero() || delta < self.update_interval {
                updated = self.scene.on_update(delta);
            } else {
                // Cover large gaps with several bounded steps instead of
                // one oversized delta. Computed in nanoseconds so
                // sub-millisecond cadences divide cleanly.
                let count = (delta.as_nanos() / self.update_interval.as_nanos()).max(1);
                let count = u32::try_from(count).unwrap_or(u32::MAX);
                let step = delta / count;
                for _ in 0..count {
                    updated = self.scene.on_update(step) || updated;
                }
            }
            self.last_update_at = now;
        }

        let root = self.scene.root();
        let full_render = self
            .last_root
            .as_ref()
            .is_some_and(|previous| !previous.ptr_eq(&root));

        if !updated && !full_render && !root.lock().is_dirty() {
            self.last_root = Some(root);
            return;
        }

        self.render_pass(&root, full_render);
        self.last_root = Some(root);
    }

    /// Collect, merge, paint, and quantize damage.
    fn render_pass(&mut self, root: &ComponentHandle, full_render: bool) {
        if full_render {
            log::debug!("root changed, full render");
            let mut root = root.lock();
            root.set_dirty(false);
            root.reset_previous_bounds();
            self.damage.clear();
            self.damage.push(self.viewport.bounds());
        } else {
            let mut sections = root.lock().collect_damage(false);
            // Deterministic merge results regardless of tree order.
            sections.sort_unstable_by_key(|section| (section.x, section.y));
            for section in sections {
                section.scaled(self.scale).combine_into(&mut self.damage);
            }
        }

        log::trace!("painting {} damaged sections", self.damage.len());
        for index in 0..self.damage.len() {
            let section = self.damage[index];
            self.viewport.fill_rect(section, Rgba::TRANSPARENT);

            let mut ctx = PaintContext::new(&mut self.viewport, self.scale);
            root.lock().render(&mut ctx, section.unscaled(self.scale));

            self.transformer.convert_region(&mut self.viewport, section);
        }
    }

    /// Take the pending damage list, leaving it empty.
    ///
    /// The returned rectangles are in viewport space and tell the caller
    /// exactly which parts of [`Frame::viewport`] changed since the last
    /// pull.
    pub fn pull_damage(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.damage)
    }

    /// Check for pending damage without consuming it.
    #[inline]
    pub fn has_damage(&self) -> bool {
        !self.damage.is_empty()
    }

    /// Drop pending damage without repainting.
    ///
    /// For sinks that just redrew everything themselves and do not want a
    /// stale flush.
    pub fn clear_damage(&mut self) {
        self.damage.clear();
    }
}

impl<S: Scene> std::fmt::Debug for Frame<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("canvas", &self.canvas)
            .field("viewport", &self.viewport.size())
            .field("scale", &self.scale)
            .field("paused", &self.paused)
            .field("pending_damage", &self.damage.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, FillComponent};
    use crate::geometry::Point;
    use std::sync::{Arc, Mutex};

    struct TestScene {
        root: ComponentHandle,
        tick_deltas: Vec<Duration>,
        update_deltas: Vec<Duration>,
        update_changes: bool,
        pauses: u32,
        resumes: u32,
    }

    impl TestScene {
        fn new(root: ComponentHandle) -> Self {
            Self {
                root,
                tick_deltas: Vec::new(),
                update_deltas: Vec::new(),
                update_changes: false,
                pauses: 0,
                resumes: 0,
            }
        }
    }

    impl Scene for TestScene {
        fn root(&mut self) -> ComponentHandle {
            self.root.clone()
        }

        fn on_tick(&mut self, _total: Duration, delta: Duration) {
            self.tick_deltas.push(delta);
        }

        fn on_update(&mut self, delta: Duration) -> bool {
            self.update_deltas.push(delta);
            self.update_changes
        }

        fn on_pause(&mut self) {
            self.pauses += 1;
        }

        fn on_resume(&mut self) {
            self.resumes += 1;
        }
    }

    fn fill(x: i32, y: i32, w: u32, h: u32) -> Arc<Mutex<FillComponent>> {
        Arc::new(Mutex::new(FillComponent::new(
            Point::new(x, y),
            Size::new(w, h),
            Rgba::WHITE,
        )))
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_construction_validates_dimensions() {
        let scene = TestScene::new(ComponentHandle::from_arc(fill(0, 0, 1, 1)));
        assert!(matches!(
            Frame::new(scene, FrameConfig::new(Size::ZERO)),
            Err(FrameError::InvalidDimensions { .. })
        ));

        let scene = TestScene::new(ComponentHandle::from_arc(fill(0, 0, 1, 1)));
        assert!(matches!(
            Frame::new(
                scene,
                FrameConfig::new(Size::new(10, 10)).with_viewport(Size::new(15, 20)),
            ),
            Err(FrameError::NonIntegerScale { .. })
        ));
    }

    #[test]
    fn test_dirty_root_produces_its_bounds_as_damage() {
        let leaf = fill(0, 0, 10, 10);
        leaf.lock().unwrap().set_dirty(true);
        let scene = TestScene::new(ComponentHandle::from_arc(leaf));
        let mut frame = Frame::new(scene, FrameConfig::new(Size::new(20, 20))).unwrap();

        frame.tick(false);
        assert_eq!(frame.pull_damage(), vec![Rect::new(0, 0, 10, 10)]);
        assert_eq!(frame.viewport().get(0, 0), Some(Rgba::WHITE));
        assert_eq!(frame.viewport().get(10, 10), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_clean_root_skips_render() {
        let scene = TestScene::new(ComponentHandle::from_arc(fill(0, 0, 10, 10)));
        let mut frame = Frame::new(scene, FrameConfig::new(Size::new(20, 20))).unwrap();

        frame.tick(false);
        assert!(!frame.has_damage());
        // on_tick still ran.
        assert_eq!(frame.scene().tick_deltas.len(), 1);
    }

    #[test]
    fn test_movement_damage_covers_old_and_new_bounds() {
        let leaf = fill(0, 0, 10, 10);
        leaf.lock().unwrap().set_dirty(true);
        let scene = TestScene::new(ComponentHandle::from_arc(leaf.clone()));
        let mut frame = Frame::new(scene, FrameConfig::new(Size::new(20, 20))).unwrap();

        frame.tick(false);
        frame.pull_damage();

        leaf.lock().unwrap().core_mut().set_position(Point::new(5, 0));
        frame.tick(false);

        let damage = frame.pull_damage();
        let covered = damage
            .iter()
            .fold(Rect::ZERO, |acc, section| acc.union(section));
        assert!(covered.contains_rect(&Rect::new(0, 0, 15, 10)));
        // The vacated strip was cleared.
        assert_eq!(frame.viewport().get(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(frame.viewport().get(5, 0), Some(Rgba::WHITE));
    }

    #[test]
    fn test_root_replacement_forces_full_render() {
        let scene = TestScene::new(ComponentHandle::from_arc(fill(0, 0, 10, 10)));
        let mut frame = Frame::new(scene, FrameConfig::new(Size::new(20, 20))).unwrap();

        frame.tick(false);
        frame.pull_damage();

        // A clean replacement root still forces the full viewport.
        frame.scene_mut().root = ComponentHandle::from_arc(fill(0, 0, 4, 4));
        frame.tick(false);
        assert_eq!(frame.pull_damage(), vec![Rect::new(0, 0, 20, 20)]);
    }

    #[test]
    fn test_damage_is_scaled_to_viewport_space() {
        let leaf = fill(2, 2, 3, 3);
        leaf.lock().unwrap().set_dirty(true);
        let scene = TestScene::new(ComponentHandle::from_arc(leaf));
        let config = FrameConfig::new(Size::new(10, 10)).with_viewport(Size::new(20, 20));
        let mut frame = Frame::new(scene, config).unwrap();

        frame.tick(false);
        assert_eq!(frame.pull_damage(), vec![Rect::new(4, 4, 6, 6)]);
        assert_eq!(frame.viewport().get(4, 4), Some(Rgba::WHITE));
        assert_eq!(frame.viewport().get(9, 9), Some(Rgba::WHITE));
        assert_eq!(frame.viewport().get(10, 10), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_update_interval_gates_updates() {
        let scene = TestScene::new(ComponentHandle::from_arc(fill(0, 0, 1, 1)));
        let config = FrameConfig::new(Size::new(4, 4)).with_update_interval(ms(100));
        let mut frame = Frame::new(scene, config).unwrap();
        let start = Instant::now();

        frame.tick_at(start + ms(50), false);
        assert!(frame.scene().update_deltas.is_empty());

        frame.tick_at(start + ms(120), false);
        assert_eq!(frame.scene().update_deltas.len(), 1);
    }

    #[test]
    fn test_large_delta_fans_out_updates() {
        let scene = TestScene::new(ComponentHandle::from_arc(fill(0, 0, 1, 1)));
        let config = FrameConfig::new(Size::new(4, 4)).with_update_interval(ms(100));
        let mut frame = Frame::new(scene, config).unwrap();
        let start = Instant::now();

        frame.tick_at(start + ms(100), false);
        assert_eq!(frame.scene().update_deltas.len(), 1);

        // 350ms gap at a 100ms cadence: three steps of ~116ms each.
        frame.tick_at(start + ms(450), false);
        assert_eq!(frame.scene().update_deltas.len(), 4);
        let step = frame.scene().update_deltas[1];
        assert!(step >= ms(116) && step <= ms(117));
    }

    #[test]
    fn test_sub_millisecond_interval_fans_out() {
        let scene = TestScene::new(ComponentHandle::from_arc(fill(0, 0, 1, 1)));
        let config =
            FrameConfig::new(Size::new(4, 4)).with_update_interval(Duration::from_micros(500));
        let mut frame = Frame::new(scene, config).unwrap();
        let start = Instant::now();

        // 5ms gap at a 500µs cadence: ten steps of 500µs each.
        frame.tick_at(start + ms(5), false);
        assert_eq!(frame.scene().update_deltas.len(), 10);
        let step = frame.scene().update_deltas[0];
        assert!(step >= Duration::from_micros(500) && step < Duration::from_micros(600));
    }

    #[test]
    fn test_forced_tick_updates_once_with_full_delta() {
        let scene = TestScene::new(ComponentHandle::from_arc(fill(0, 0, 1, 1)));
        let config = FrameConfig::new(Size::new(4, 4)).with_update_interval(ms(100));
        let mut frame = Frame::new(scene, config).unwrap();
        let start = Instant::now();

        frame.tick_at(start + ms(100), false);
        frame.tick_at(start + ms(130), true);
        assert_eq!(frame.scene().update_deltas.len(), 2);
        assert_eq!(frame.scene().update_deltas[1], ms(30));
    }

    #[test]
    fn test_pause_takes_effect_one_tick_late() {
        let scene = TestScene::new(ComponentHandle::from_arc(fill(0, 0, 1, 1)));
        let mut frame = Frame::new(scene, FrameConfig::new(Size::new(4, 4))).unwrap();
        let start = Instant::now();

        frame.pause_at(start + ms(10));
        assert_eq!(frame.scene().pauses, 1);
        assert!(!frame.is_paused());

        // First tick after the request still executes fully.
        frame.tick_at(start + ms(16), false);
        assert_eq!(frame.scene().tick_deltas.len(), 1);
        assert!(frame.is_paused());

        // Now suppressed.
        frame.tick_at(start + ms(32), false);
        assert_eq!(frame.scene().tick_deltas.len(), 1);
    }

    #[test]
    fn test_resume_excludes_paused_interval_from_delta() {
        let scene = TestScene::new(ComponentHandle::from_arc(fill(0, 0, 1, 1)));
        let mut frame = Frame::new(scene, FrameConfig::new(Size::new(4, 4))).unwrap();
        let start = Instant::now();

        frame.tick_at(start + ms(16), false);
        frame.pause_at(start + ms(16));
        frame.tick_at(start + ms(16), false);

        // Paused for five seconds.
        frame.resume_at(start + ms(5016));
        assert_eq!(frame.scene().resumes, 1);

        frame.tick_at(start + ms(5032), false);
        let delta = *frame.scene().tick_deltas.last().unwrap();
        assert_eq!(delta, ms(16));
        // Measured from the construction instant, so allow slack but make
        // sure the five paused seconds are gone.
        assert!(frame.total_time() >= ms(32) && frame.total_time() < ms(500));
    }

    #[test]
    fn test_resume_without_pause_is_noop() {
        let scene = TestScene::new(ComponentHandle::from_arc(fill(0, 0, 1, 1)));
        let mut frame = Frame::new(scene, FrameConfig::new(Size::new(4, 4))).unwrap();
        frame.resume();
        assert_eq!(frame.scene().resumes, 0);
    }

    #[test]
    fn test_pull_damage_clears_pending_list() {
        let leaf = fill(0, 0, 4, 4);
        leaf.lock().unwrap().set_dirty(true);
        let scene = TestScene::new(ComponentHandle::from_arc(leaf));
        let mut frame = Frame::new(scene, FrameConfig::new(Size::new(4, 4))).unwrap();

        frame.tick(false);
        assert!(frame.has_damage());
        assert!(!frame.pull_damage().is_empty());
        assert!(!frame.has_damage());
    }

    #[test]
    fn test_transformer_applies_to_painted_pixels() {
        struct Darken;
        impl ColorTransformer for Darken {
            fn convert(&mut self, color: Rgba) -> Rgba {
                Rgba::new(color.r / 2, color.g / 2, color.b / 2, color.a)
            }
        }

        let leaf = fill(0, 0, 4, 4);
        leaf.lock().unwrap().set_dirty(true);
        let scene = TestScene::new(ComponentHandle::from_arc(leaf));
        let mut frame = Frame::with_transformer(
            scene,
            FrameConfig::new(Size::new(4, 4)),
            Box::new(Darken),
        )
        .unwrap();

        frame.tick(false);
        assert_eq!(frame.viewport().get(0, 0), Some(Rgba::new(127, 127, 127, 255)));
    }
}
