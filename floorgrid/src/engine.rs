// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use floorgrid_anim::{AnimatedValue, Easing};
use floorgrid_event_state::PointerEvent;
use floorgrid_grid::{
    ActiveGridLine, EnglishUnitNames, GridLevelSelector, GridLevelTable, GridStyle, GridSurface,
    LengthUnit, UnitNames, draw_grid,
};
use floorgrid_view::Viewport;
use kurbo::{Affine, Point, Size, Vec2};

use crate::animation::ViewAnimator;
use crate::config::{ConfigError, EngineConfig};
use crate::floorplan::{BindingMode, FloorPlanProperties, FloorplanBinding};
use crate::gesture::{GestureController, GestureState, GestureTarget};
use crate::layer::{Layer, RedrawSignal};

type FloorPlanListener = Box<dyn FnMut(&FloorPlanProperties)>;

/// The grid engine: owns the grid transform, the floor plan binding and the
/// running animations, and turns pointer input into transform changes.
///
/// Hosts drive it with three calls per frame: pointer events through
/// [`handle_pointer_event`](Self::handle_pointer_event), then
/// [`advance`](Self::advance) with the frame time, then
/// [`render`](Self::render). It is also a [`Layer`].
///
/// ```rust
/// use floorgrid::{EngineConfig, ViewportEngine};
/// use floorgrid_event_state::PointerEvent;
/// use kurbo::{Point, Size};
///
/// let mut engine = ViewportEngine::new(EngineConfig::default()).unwrap();
/// engine.set_view_size(Size::new(800.0, 600.0));
/// let before = engine.scale();
///
/// // Double tap: zooms in about the tap over the next 500 ms.
/// let p = Point::new(200.0, 200.0);
/// engine.handle_pointer_event(&PointerEvent::down(p, 0));
/// engine.handle_pointer_event(&PointerEvent::up(p, 40));
/// engine.handle_pointer_event(&PointerEvent::down(p, 120));
/// engine.handle_pointer_event(&PointerEvent::up(p, 160));
/// engine.advance(620);
/// assert!((engine.scale() / before - 2.0).abs() < 1e-9);
/// ```
pub struct ViewportEngine {
    gestures: GestureController,
    core: EngineCore,
}

/// Everything gestures act on, split out so the controller can borrow it
/// mutably next to itself.
struct EngineCore {
    config: EngineConfig,
    viewport: Viewport,
    animator: ViewAnimator,
    selector: GridLevelSelector,
    metric: GridLevelTable,
    imperial: GridLevelTable,
    style: GridStyle,
    unit_names: Box<dyn UnitNames>,
    show_grid: bool,
    mode: BindingMode,
    floor_plan: Option<FloorplanBinding>,
    listener: Option<FloorPlanListener>,
    rotation: AnimatedValue,
    sized: bool,
    first_shown_ms: Option<u64>,
    redraw: RedrawSignal,
}

impl fmt::Debug for ViewportEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = &self.core;
        f.debug_struct("ViewportEngine")
            .field("gesture_state", &self.gestures.state())
            .field("mode", &core.mode)
            .field("viewport", &core.viewport.debug_info())
            .field("grid_lines", &core.selector.active())
            .field("floor_plan", &core.floor_plan)
            .field("show_grid", &core.show_grid)
            .finish_non_exhaustive()
    }
}

impl ViewportEngine {
    /// Creates an engine with an empty view.
    ///
    /// The world origin is centered once the first non-empty view size arrives.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let limits = config.zoom_limits()?;
        let shortest_px = config.shortest_grid_square_px();
        let metric = GridLevelTable::metric(shortest_px)?;
        let imperial = GridLevelTable::imperial(shortest_px)?;
        let table = match config.length_unit {
            LengthUnit::Metric => metric.clone(),
            LengthUnit::Imperial => imperial.clone(),
        };
        let viewport = Viewport::new(Size::ZERO, limits, config.initial_scale());
        let mut selector = GridLevelSelector::new(table);
        selector.select(viewport.scale());

        Ok(Self {
            gestures: GestureController::new(config.gestures),
            core: EngineCore {
                config,
                viewport,
                animator: ViewAnimator::default(),
                selector,
                metric,
                imperial,
                style: config.grid_style(),
                unit_names: Box::new(EnglishUnitNames),
                show_grid: true,
                mode: BindingMode::GridBound,
                floor_plan: None,
                listener: None,
                rotation: AnimatedValue::new(Easing::AccelerateDecelerate),
                sized: false,
                first_shown_ms: None,
                redraw: RedrawSignal::new(),
            },
        })
    }

    /// Returns the configuration the engine was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.core.config
    }

    /// Returns the grid viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.core.viewport
    }

    /// Returns the grid scale in device pixels per world centimeter.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.core.viewport.scale()
    }

    /// Returns the gesture interaction state.
    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.gestures.state()
    }

    /// Returns `true` while a fling, zoom or rotation animation runs.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.core.animator.is_running() || !self.core.rotation.is_finished()
    }

    /// Returns a handle the host polls to schedule frames.
    #[must_use]
    pub fn redraw_signal(&self) -> RedrawSignal {
        self.core.redraw.clone()
    }

    /// Sets the view size in device pixels.
    ///
    /// The first non-empty size centers the world origin in the view.
    pub fn set_view_size(&mut self, size: Size) {
        let core = &mut self.core;
        core.viewport.set_view_size(size);
        if !core.sized && !size.is_zero_area() {
            core.viewport.center_on(Point::ZERO);
            core.sized = true;
        }
        core.redraw.request();
    }

    /// Returns the unit system of the grid labels.
    #[must_use]
    pub fn length_unit(&self) -> LengthUnit {
        self.core.selector.unit()
    }

    /// Switches between metric and imperial grid levels.
    pub fn set_length_unit(&mut self, unit: LengthUnit) {
        let core = &mut self.core;
        if core.selector.unit() == unit {
            return;
        }
        let table = match unit {
            LengthUnit::Metric => core.metric.clone(),
            LengthUnit::Imperial => core.imperial.clone(),
        };
        core.selector.set_table(table);
        core.sync_grid_lines();
        tracing::debug!(?unit, "length unit changed");
        core.redraw.request();
    }

    /// Returns whether the grid is drawn.
    #[must_use]
    pub fn show_grid(&self) -> bool {
        self.core.show_grid
    }

    /// Shows or hides the grid.
    pub fn set_show_grid(&mut self, show: bool) {
        self.core.show_grid = show;
        self.core.redraw.request();
    }

    /// Replaces the unit names used in grid labels.
    pub fn set_unit_names(&mut self, names: impl UnitNames + 'static) {
        self.core.unit_names = Box::new(names);
        self.core.redraw.request();
    }

    /// Returns the binding mode.
    #[must_use]
    pub fn mode(&self) -> BindingMode {
        self.core.mode
    }

    /// Switches the binding mode.
    ///
    /// Calibration needs a floor plan; without one the switch is refused and
    /// `false` returned. Switching aborts running animations and any gesture
    /// in progress.
    pub fn set_mode(&mut self, mode: BindingMode) -> bool {
        let core = &mut self.core;
        if core.mode == mode {
            return true;
        }
        let grid = core.viewport.transform();
        match (mode, core.floor_plan.as_mut()) {
            (BindingMode::FloorplanCalibration, None) => {
                tracing::debug!("calibration refused without a floor plan");
                return false;
            }
            (BindingMode::FloorplanCalibration, Some(binding)) => binding.begin_calibration(&grid),
            (BindingMode::GridBound, _) => {}
        }
        core.abort_animations();
        self.gestures.reset();
        core.mode = mode;
        tracing::debug!(?mode, "binding mode changed");
        core.redraw.request();
        true
    }

    /// Returns the floor plan placement, if a floor plan is bound.
    #[must_use]
    pub fn floor_plan(&self) -> Option<FloorPlanProperties> {
        self.core.floor_plan.as_ref().map(FloorplanBinding::properties)
    }

    /// Binds, replaces or removes the floor plan.
    ///
    /// Removing it while calibrating returns to [`BindingMode::GridBound`].
    /// The listener is not notified of changes made here.
    pub fn set_floor_plan(&mut self, properties: Option<FloorPlanProperties>) {
        let core = &mut self.core;
        let grid = core.viewport.transform();
        let calibrating = core.mode == BindingMode::FloorplanCalibration;
        match properties {
            None => {
                core.floor_plan = None;
                if calibrating {
                    core.mode = BindingMode::GridBound;
                    self.gestures.reset();
                    tracing::debug!("floor plan removed, calibration ended");
                }
            }
            Some(props) => {
                let binding = core
                    .floor_plan
                    .get_or_insert_with(|| FloorplanBinding::new(props));
                binding.set_properties(props);
                if calibrating {
                    binding.begin_calibration(&grid);
                }
            }
        }
        core.redraw.request();
    }

    /// Image pixels to device pixels for drawing the floor plan, rotated by
    /// the current floor plan rotation.
    #[must_use]
    pub fn floor_plan_transform(&self) -> Option<Affine> {
        let core = &self.core;
        let grid = core.viewport.transform();
        core.floor_plan
            .as_ref()
            .map(|binding| binding.draw_transform(&grid, core.rotation.current()))
    }

    /// Registers the callback told about floor plan changes made by gestures.
    pub fn set_floor_plan_listener(&mut self, listener: impl FnMut(&FloorPlanProperties) + 'static) {
        self.core.listener = Some(Box::new(listener));
    }

    /// Removes the floor plan listener.
    pub fn clear_floor_plan_listener(&mut self) {
        self.core.listener = None;
    }

    /// Returns the floor plan rotation in degrees.
    #[must_use]
    pub fn floor_plan_rotation(&self) -> f64 {
        self.core.rotation.current()
    }

    /// Animates the floor plan rotation to `degrees`.
    pub fn rotate_floor_plan_to(&mut self, degrees: f64, now_ms: u64) {
        let core = &mut self.core;
        let from = core.rotation.current();
        core.rotation
            .start(now_ms, from, degrees - from, core.config.rotation_duration_ms);
        tracing::debug!(from, to = degrees, "floor plan rotation started");
        core.redraw.request();
    }

    /// Animates a zoom by `factor` about `focus`, clamped to the zoom limits.
    ///
    /// Only honored in [`BindingMode::GridBound`]. Returns whether a zoom
    /// started.
    pub fn zoom_to(&mut self, factor: f64, focus: Point, now_ms: u64) -> bool {
        if self.core.mode != BindingMode::GridBound {
            return false;
        }
        let started = self.core.start_zoom(factor, focus, now_ms);
        if started {
            self.gestures.animation_started();
        }
        started
    }

    /// Feeds a pointer event through gesture recognition.
    ///
    /// Returns whether the event was handled.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> bool {
        self.gestures.handle_pointer_event(event, &mut self.core)
    }

    /// Advances animations to `now_ms` and confirms pending single taps.
    ///
    /// Returns `true` if another frame is needed: an animation is running,
    /// the fade window after the first frame has not elapsed, or a tap is
    /// waiting for confirmation. Calling it twice with the same time changes
    /// nothing the second time.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        self.gestures.poll(now_ms, &mut self.core);
        let animated = self.core.step_animations(now_ms);
        self.gestures.settle(self.core.animator.is_running());

        let first_shown = *self.core.first_shown_ms.get_or_insert(now_ms);
        let fading = now_ms < first_shown.saturating_add(self.core.config.fade_window_ms);
        animated || fading || self.gestures.has_pending_tap()
    }

    /// Returns the grid levels currently shown, finest first.
    #[must_use]
    pub fn grid_lines(&self) -> &[ActiveGridLine] {
        self.core.selector.active()
    }

    /// Draws the grid and its labels.
    pub fn render(&mut self, surface: &mut dyn GridSurface) {
        let core = &self.core;
        if !core.show_grid {
            return;
        }
        draw_grid(
            surface,
            &core.viewport,
            core.selector.active(),
            core.selector.unit(),
            &*core.unit_names,
            &core.style,
        );
    }
}

impl Layer for ViewportEngine {
    fn on_input(&mut self, event: &PointerEvent) -> bool {
        self.handle_pointer_event(event)
    }

    fn on_animation_step(&mut self, now_ms: u64) -> bool {
        self.advance(now_ms)
    }

    fn render(&mut self, surface: &mut dyn GridSurface) {
        Self::render(self, surface);
    }
}

impl EngineCore {
    fn sync_grid_lines(&mut self) {
        self.selector.select(self.viewport.scale());
    }

    /// Keeps a running animation from overwriting a direct change.
    fn grid_changed(&mut self) {
        self.animator.rebase(self.viewport.transform());
        self.sync_grid_lines();
        self.redraw.request();
    }

    fn notify_floor_plan(&mut self) {
        let Some(properties) = self.floor_plan.as_ref().map(FloorplanBinding::properties) else {
            return;
        };
        if let Some(listener) = self.listener.as_mut() {
            listener(&properties);
        }
    }

    fn start_zoom(&mut self, factor: f64, focus: Point, now_ms: u64) -> bool {
        let scale = self.viewport.scale();
        if !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        let target = self.viewport.limits().clamp(scale * factor);
        if target == scale {
            return false;
        }
        self.animator.start_zoom(
            now_ms,
            focus,
            target / scale,
            self.config.zoom_duration_ms,
            self.viewport.transform(),
        );
        tracing::debug!(from = scale, to = target, ?focus, "zoom animation started");
        self.redraw.request();
        true
    }

    fn step_animations(&mut self, now_ms: u64) -> bool {
        let mut animated = false;
        if let Some(transform) = self.animator.advance(now_ms) {
            self.viewport.set_transform(transform);
            self.sync_grid_lines();
            animated = true;
        }
        if self.rotation.sample(now_ms).is_some() {
            animated = true;
        }
        if animated {
            self.redraw.request();
        }
        animated
    }
}

impl GestureTarget for EngineCore {
    fn mode(&self) -> BindingMode {
        self.mode
    }

    fn pan_by(&mut self, delta: Vec2) -> bool {
        match self.mode {
            BindingMode::GridBound => {
                self.viewport.pan_by_view(delta);
                self.grid_changed();
                true
            }
            BindingMode::FloorplanCalibration => {
                let grid = self.viewport.transform();
                let Some(binding) = self.floor_plan.as_mut() else {
                    return false;
                };
                if binding.pan_by(delta, &grid) {
                    self.notify_floor_plan();
                }
                self.redraw.request();
                true
            }
        }
    }

    fn pinch_begin(&mut self) {
        if let Some(binding) = self.floor_plan.as_mut() {
            binding.begin_pinch();
        }
    }

    fn pinch_by(&mut self, factor: f64, focus: Point) -> bool {
        match self.mode {
            BindingMode::GridBound => {
                if self.viewport.zoom_about_view_point(focus, factor) {
                    self.grid_changed();
                    true
                } else {
                    tracing::trace!(factor, scale = self.viewport.scale(), "grid pinch rejected");
                    false
                }
            }
            BindingMode::FloorplanCalibration => {
                let grid = self.viewport.transform();
                let Some(binding) = self.floor_plan.as_mut() else {
                    return false;
                };
                match binding.pinch_by(factor, focus, &grid) {
                    Some(changed) => {
                        if changed {
                            self.notify_floor_plan();
                        }
                        self.redraw.request();
                        true
                    }
                    None => false,
                }
            }
        }
    }

    fn fling(&mut self, velocity: Vec2, now_ms: u64) -> bool {
        self.animator.start_fling(
            now_ms,
            velocity,
            &self.config.fling,
            self.viewport.transform(),
        );
        if !self.animator.is_flinging() {
            return false;
        }
        tracing::debug!(?velocity, "fling started");
        self.redraw.request();
        true
    }

    fn double_tap_zoom(&mut self, focus: Point, now_ms: u64) -> bool {
        let ceiling = self.viewport.limits().max_scale() * self.config.double_tap_zoom_ceiling;
        if self.viewport.scale() >= ceiling {
            tracing::trace!(scale = self.viewport.scale(), "double tap zoom at ceiling");
            return false;
        }
        self.start_zoom(self.config.double_tap_zoom_factor, focus, now_ms)
    }

    fn single_tap(&mut self, pos: Point) -> bool {
        tracing::trace!(?pos, "single tap");
        true
    }

    fn abort_animations(&mut self) {
        if self.animator.is_running() {
            tracing::debug!("animations aborted");
        }
        self.animator.abort();
    }

    fn animations_running(&self) -> bool {
        self.animator.is_running()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use floorgrid_grid::{RecordingSurface, UnitName};

    use super::*;

    fn engine() -> ViewportEngine {
        let mut engine = ViewportEngine::new(EngineConfig::default()).unwrap();
        engine.set_view_size(Size::new(800.0, 600.0));
        engine
    }

    #[test]
    fn first_size_centers_the_origin() {
        let mut engine = engine();
        assert_eq!(engine.viewport().offset(), Vec2::new(400.0, 300.0));
        engine.set_view_size(Size::new(1_000.0, 1_000.0));
        assert_eq!(engine.viewport().offset(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn unit_switch_reselects_levels() {
        let mut engine = engine();
        let metric: Vec<u32> = engine.grid_lines().iter().map(|l| l.spacing).collect();
        engine.set_length_unit(LengthUnit::Imperial);
        let imperial: Vec<u32> = engine.grid_lines().iter().map(|l| l.spacing).collect();
        assert!(!imperial.is_empty());
        assert_ne!(metric, imperial);
        assert_eq!(engine.length_unit(), LengthUnit::Imperial);
    }

    #[test]
    fn calibration_needs_a_floor_plan() {
        let mut engine = engine();
        assert!(!engine.set_mode(BindingMode::FloorplanCalibration));
        engine.set_floor_plan(Some(FloorPlanProperties::new(0, 0, 1_000)));
        assert!(engine.set_mode(BindingMode::FloorplanCalibration));
        engine.set_floor_plan(None);
        assert_eq!(engine.mode(), BindingMode::GridBound);
    }

    #[test]
    fn calibration_drag_moves_plan_and_notifies() {
        let mut engine = engine();
        engine.set_floor_plan(Some(FloorPlanProperties::new(0, 0, 1_000)));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.set_floor_plan_listener(move |p| sink.borrow_mut().push(*p));
        assert!(engine.set_mode(BindingMode::FloorplanCalibration));
        let offset = engine.viewport().offset();

        engine.handle_pointer_event(&PointerEvent::down(Point::new(100.0, 100.0), 0));
        engine.handle_pointer_event(&PointerEvent::moved(Point::new(150.0, 100.0), 16));
        engine.handle_pointer_event(&PointerEvent::moved(Point::new(200.0, 100.0), 32));

        assert_eq!(engine.viewport().offset(), offset);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[1].px_center_x < seen[0].px_center_x);
        assert_eq!(engine.floor_plan(), seen.last().copied());
    }

    #[test]
    fn debug_output_shows_the_viewport_snapshot() {
        let engine = engine();
        let text = alloc::format!("{engine:?}");
        assert!(text.contains("visible_world_rect"), "{text}");
        assert!(text.contains("max_scale"), "{text}");
    }

    #[test]
    fn hidden_grid_renders_nothing() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.render(&mut surface);
        assert!(surface.lines().count() > 0);

        engine.set_show_grid(false);
        let mut surface = RecordingSurface::new();
        engine.render(&mut surface);
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn custom_unit_names_are_used() {
        struct Short;
        impl UnitNames for Short {
            fn unit_name(&self, unit: UnitName) -> &str {
                match unit {
                    UnitName::Meter => "M",
                    _ => "?",
                }
            }
        }
        let mut engine = engine();
        engine.set_unit_names(Short);
        let mut surface = RecordingSurface::new();
        engine.render(&mut surface);
        assert!(surface.texts().any(|(text, _)| text == "0 M"));
    }

    #[test]
    fn rotation_animates_floor_plan_transform() {
        let mut engine = engine();
        engine.set_floor_plan(Some(FloorPlanProperties::new(0, 0, 1_000)));
        engine.rotate_floor_plan_to(90.0, 0);
        assert!(engine.advance(500));
        let mid = engine.floor_plan_rotation();
        assert!(mid > 0.0 && mid < 90.0);
        engine.advance(1_000);
        assert_eq!(engine.floor_plan_rotation(), 90.0);
        assert!(engine.floor_plan_transform().is_some());
    }

    #[test]
    fn fade_window_keeps_frames_coming() {
        let mut engine = engine();
        assert!(engine.advance(0));
        assert!(engine.advance(7_499));
        assert!(!engine.advance(7_500));
    }
}
