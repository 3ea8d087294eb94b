//! Per-view interaction state
//!
//! [`Presentation`] owns every engine for one page view and is the only
//! thing the host talks to. Host events go in with explicit timestamps;
//! render snapshots come out. Frame delivery and the idle timer are requested
//! from the injected [`Scheduler`], and are only kept alive while there is
//! work for them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::NAV_SCROLL_THRESHOLD;
use crate::content::Service;
use crate::geometry::Viewport;
use crate::goal::{Goal, GoalSelector, SectionOrder, ServiceCategory, prioritize_services};
use crate::motion::{
    AttractionField, CursorEngine, CursorMode, MagneticElement, PointerTracker, Scheduler,
    TargetId,
};
use crate::settings::MotionSettings;
use crate::timeline::{
    GeometryProvider, ScrollRequest, TimelineController, TimelineRenderState, TouchResponse,
};

/// First frame (or a frame after a long gap) assumes 60 Hz
const DEFAULT_FRAME_DT: f32 = 1.0 / 60.0;

/// Cursor snapshot for one render tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorRenderState {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub visible: bool,
}

pub struct Presentation<S: Scheduler> {
    settings: MotionSettings,
    scheduler: S,
    viewport: Viewport,
    pointer: PointerTracker,
    field: AttractionField,
    cursor: CursorEngine,
    goals: GoalSelector,
    timeline: Option<TimelineController>,
    scroll_y: f64,
    last_frame_ms: Option<f64>,
    torn_down: bool,
}

impl<S: Scheduler> std::fmt::Debug for Presentation<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presentation")
            .field("viewport", &self.viewport)
            .field("goal", &self.goals.goal())
            .field("cursor_mode", &self.cursor.mode())
            .field("targets", &self.field)
            .field("timeline", &self.timeline)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

impl<S: Scheduler> Presentation<S> {
    pub fn new(settings: MotionSettings, scheduler: S, viewport: Viewport) -> Self {
        Self {
            pointer: PointerTracker::new(settings.idle_timeout_ms, settings.ripple_duration_ms),
            cursor: CursorEngine::new(settings.clone()),
            settings,
            scheduler,
            viewport,
            field: AttractionField::new(),
            goals: GoalSelector::new(),
            timeline: None,
            scroll_y: 0.0,
            last_frame_ms: None,
            torn_down: false,
        }
    }

    pub fn settings(&self) -> &MotionSettings {
        &self.settings
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.refresh();
        }
    }

    // === Goal ===

    pub fn on_goal_select(&mut self, goal: Goal) {
        if self.torn_down {
            return;
        }
        self.goals.select(goal);
    }

    pub fn on_goal_reset(&mut self) {
        if self.torn_down {
            return;
        }
        self.goals.reset();
    }

    pub fn current_goal(&self) -> Goal {
        self.goals.goal()
    }

    pub fn current_section_order(&self) -> SectionOrder {
        self.goals.section_order()
    }

    /// `None` means the natural service order
    pub fn current_priority_services(&self) -> Option<[ServiceCategory; 4]> {
        self.goals.priority_order()
    }

    pub fn prioritized_services(&self, services: &[Service]) -> Vec<Service> {
        prioritize_services(self.goals.goal(), services)
    }

    pub fn journey(&self) -> &[String] {
        self.goals.journey()
    }

    // === Magnetic targets ===

    pub fn register_magnetic_target(&mut self, id: TargetId, element: Box<dyn MagneticElement>) {
        if self.torn_down {
            return;
        }
        self.field.register(id, element);
    }

    pub fn unregister_magnetic_target(&mut self, id: TargetId) {
        self.field.unregister(id);
    }

    /// Hover displacement for each registered element at the live pointer
    pub fn magnetic_offsets(&self) -> Vec<(TargetId, Vec2)> {
        if !self.pointer.is_visible() {
            return self.field.ids().into_iter().map(|id| (id, Vec2::ZERO)).collect();
        }
        self.field
            .hover_offsets(self.pointer.position(), self.settings.hover_strength)
    }

    // === Pointer ===

    pub fn on_pointer_move(&mut self, pos: Vec2, now_ms: f64) {
        if self.torn_down {
            return;
        }
        let outcome = self.pointer.record_move(pos, now_ms);
        let snap = outcome.was_hidden || self.cursor.mode() == CursorMode::Drifting;
        self.cursor.follow(pos, snap);
        self.scheduler.arm_idle_timer(self.pointer.idle_timeout_ms());
        self.sync_frames();
    }

    pub fn on_wheel(&mut self, now_ms: f64) {
        if self.torn_down || !self.pointer.has_been_seen() {
            return;
        }
        self.pointer.record_wheel(now_ms);
        if self.cursor.mode() == CursorMode::Drifting {
            // Glide back to the real pointer
            self.cursor.follow(self.pointer.position(), false);
        }
        self.scheduler.arm_idle_timer(self.pointer.idle_timeout_ms());
        self.sync_frames();
    }

    pub fn on_click(&mut self, now_ms: f64) {
        if self.torn_down {
            return;
        }
        self.pointer.record_click(now_ms);
    }

    pub fn on_pointer_leave(&mut self) {
        if self.torn_down {
            return;
        }
        self.pointer.leave();
        self.cursor.hide();
        self.sync_frames();
    }

    /// The idle timer fired. A firing that lands before the timeout has
    /// fully elapsed re-arms for the remainder.
    pub fn on_idle_timeout(&mut self, now_ms: f64) {
        if self.torn_down {
            return;
        }
        if !self.pointer.check_idle(now_ms) {
            if let Some(remaining) = self.pointer.idle_remaining_ms(now_ms) {
                self.scheduler.arm_idle_timer(remaining);
            }
            return;
        }
        if !self.pointer.is_visible() {
            return;
        }
        // Bounds may have moved since the last idle period
        let targets = self.field.snapshot(&self.viewport, &self.settings.eligibility);
        self.cursor.begin_drift(self.pointer.position(), targets);
        self.sync_frames();
    }

    /// One animation frame
    pub fn on_frame(&mut self, now_ms: f64) {
        if self.torn_down {
            return;
        }
        let dt = match self.last_frame_ms {
            Some(last) if now_ms > last && now_ms - last < 250.0 => ((now_ms - last) / 1000.0) as f32,
            _ => DEFAULT_FRAME_DT,
        };
        self.last_frame_ms = Some(now_ms);
        self.cursor.step_frame(dt);
        self.sync_frames();
    }

    /// Run frames only while the cursor has work to do
    fn sync_frames(&mut self) {
        let needed = self.cursor.needs_frames();
        if needed && !self.scheduler.frames_running() {
            self.last_frame_ms = None;
            self.scheduler.start_frames();
        } else if !needed && self.scheduler.frames_running() {
            self.scheduler.stop_frames();
        }
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor.mode()
    }

    pub fn cursor_render_state(&self) -> CursorRenderState {
        let state = self.cursor.state();
        CursorRenderState {
            x: state.render_pos.x,
            y: state.render_pos.y,
            scale: state.scale,
            visible: self.cursor.is_visible(),
        }
    }

    pub fn ripple_active(&self, now_ms: f64) -> bool {
        self.pointer.ripple_active(now_ms)
    }

    // === Scroll / timeline ===

    pub fn attach_timeline(&mut self, step_count: usize, provider: Box<dyn GeometryProvider>) {
        if self.torn_down {
            return;
        }
        log::info!("Timeline attached with {} steps", step_count);
        self.timeline = Some(TimelineController::new(step_count, provider, &self.settings));
    }

    pub fn detach_timeline(&mut self) {
        self.timeline = None;
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        if self.torn_down {
            return;
        }
        self.scroll_y = scroll_y;
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.refresh();
        }
    }

    pub fn on_touch_start(&mut self, point: Vec2) {
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.touch_start(point);
        }
    }

    pub fn on_touch_move(&mut self, point: Vec2) -> TouchResponse {
        match self.timeline.as_mut() {
            Some(timeline) => timeline.touch_move(point),
            None => TouchResponse::default(),
        }
    }

    /// Returns the compensating scroll for a completed swipe
    pub fn on_touch_end(&mut self) -> Option<ScrollRequest> {
        self.timeline.as_mut().and_then(|timeline| timeline.touch_end())
    }

    /// Interrupted gesture: drop the swipe without scrolling
    pub fn on_touch_cancel(&mut self) {
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.touch_cancel();
        }
    }

    pub fn timeline_render_state(&self) -> Option<TimelineRenderState> {
        self.timeline.as_ref().map(|t| t.render_state())
    }

    /// Nav bar switches to its compact style once the page has scrolled
    pub fn nav_scrolled(&self) -> bool {
        self.scroll_y > NAV_SCROLL_THRESHOLD
    }

    // === Lifecycle ===

    /// Stop all frame and timer work and drop element references.
    /// Every later event is ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.scheduler.stop_frames();
        self.scheduler.disarm_idle_timer();
        self.field.clear();
        self.timeline = None;
        self.torn_down = true;
        log::info!("Presentation torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::motion::ManualScheduler;
    use crate::timeline::{ContainerGeometry, StaticGeometry};

    fn page() -> Presentation<ManualScheduler> {
        Presentation::new(
            MotionSettings::default(),
            ManualScheduler::new(),
            Viewport::new(1280.0, 800.0),
        )
    }

    /// Drive frames until the engine asks to stop (bounded)
    fn run_frames(p: &mut Presentation<ManualScheduler>, start_ms: f64, count: u32) -> f64 {
        let mut t = start_ms;
        for _ in 0..count {
            if !p.scheduler().frames_running() {
                break;
            }
            t += 16.0;
            p.on_frame(t);
        }
        t
    }

    #[test]
    fn test_cursor_hidden_until_first_move() {
        let mut p = page();
        assert!(!p.cursor_render_state().visible);
        p.on_wheel(0.0);
        p.on_idle_timeout(5000.0);
        assert_eq!(p.cursor_mode(), CursorMode::Following);
        assert!(!p.scheduler().frames_running());

        p.on_pointer_move(Vec2::new(200.0, 150.0), 10.0);
        let r = p.cursor_render_state();
        assert!(r.visible);
        assert_eq!((r.x, r.y), (200.0, 150.0));
        assert_eq!(p.scheduler().idle_timer, Some(1000.0));
    }

    #[test]
    fn test_idle_follow_exclusivity() {
        let mut p = page();
        p.register_magnetic_target(1, Box::new(Rect::new(580.0, 380.0, 40.0, 40.0)));
        p.on_pointer_move(Vec2::new(300.0, 400.0), 0.0);
        p.on_pointer_move(Vec2::new(310.0, 400.0), 500.0);

        // Timer from the first sample fires within 1000ms of the latest one
        p.on_idle_timeout(1000.0);
        assert_eq!(p.cursor_mode(), CursorMode::Following);

        p.on_idle_timeout(1500.0);
        assert_eq!(p.cursor_mode(), CursorMode::Drifting);
        assert!(p.scheduler().frames_running());

        let t = run_frames(&mut p, 1500.0, 20);
        assert_ne!(p.cursor_render_state().x, 310.0);

        // Very next move ends the drift and snaps
        p.on_pointer_move(Vec2::new(50.0, 60.0), t + 1.0);
        assert_eq!(p.cursor_mode(), CursorMode::Following);
        let r = p.cursor_render_state();
        assert_eq!((r.x, r.y, r.scale), (50.0, 60.0, 1.0));
        assert!(!p.scheduler().frames_running());
    }

    #[test]
    fn test_early_idle_firing_rearms_for_the_rest() {
        let mut p = page();
        p.on_pointer_move(Vec2::new(300.0, 400.0), 0.0);
        let arms = p.scheduler().timer_arms;

        // Timer clock ran slightly ahead of the event clock
        p.on_idle_timeout(999.6);
        assert_eq!(p.cursor_mode(), CursorMode::Following);
        assert_eq!(p.scheduler().timer_arms, arms + 1);
        let delay = p.scheduler().idle_timer.unwrap();
        assert!((delay - 0.4).abs() < 1e-6, "{delay}");

        p.on_idle_timeout(1000.0);
        assert_eq!(p.cursor_mode(), CursorMode::Drifting);

        // Once idle, further firings arm nothing
        let arms = p.scheduler().timer_arms;
        p.on_idle_timeout(1200.0);
        assert_eq!(p.scheduler().timer_arms, arms);
    }

    #[test]
    fn test_drift_heads_for_nearest_visible_target() {
        let mut p = page();
        // Off-screen target is ignored even though it is closer
        p.register_magnetic_target(1, Box::new(Rect::new(300.0, -200.0, 40.0, 40.0)));
        p.register_magnetic_target(2, Box::new(Rect::new(780.0, 380.0, 40.0, 40.0)));
        p.on_pointer_move(Vec2::new(300.0, 400.0), 0.0);
        p.on_idle_timeout(1000.0);
        run_frames(&mut p, 1000.0, 300);
        let r = p.cursor_render_state();
        // Capped 100 units toward x = 800
        assert!(Vec2::new(r.x, r.y).distance(Vec2::new(400.0, 400.0)) < 6.0, "{r:?}");
        assert!(r.scale >= 1.0 && r.scale <= 1.08);
    }

    #[test]
    fn test_drift_holds_without_targets() {
        let mut p = page();
        p.on_pointer_move(Vec2::new(300.0, 400.0), 0.0);
        p.on_idle_timeout(1000.0);
        run_frames(&mut p, 1000.0, 120);
        let r = p.cursor_render_state();
        assert_eq!((r.x, r.y), (300.0, 400.0));
    }

    #[test]
    fn test_unregistered_target_no_longer_attracts() {
        let mut p = page();
        p.register_magnetic_target(1, Box::new(Rect::new(580.0, 380.0, 40.0, 40.0)));
        p.unregister_magnetic_target(1);
        p.on_pointer_move(Vec2::new(300.0, 400.0), 0.0);
        p.on_idle_timeout(1000.0);
        run_frames(&mut p, 1000.0, 120);
        assert_eq!(p.cursor_render_state().x, 300.0);
    }

    #[test]
    fn test_leave_parks_and_blocks_drift() {
        let mut p = page();
        p.on_pointer_move(Vec2::new(300.0, 400.0), 0.0);
        p.on_pointer_leave();
        let r = p.cursor_render_state();
        assert!(!r.visible);
        assert_eq!((r.x, r.y), (-100.0, -100.0));
        p.on_idle_timeout(1000.0);
        assert_eq!(p.cursor_mode(), CursorMode::Following);
        assert!(!p.scheduler().frames_running());

        // Re-entry snaps straight to the pointer
        p.on_pointer_move(Vec2::new(640.0, 10.0), 2000.0);
        let r = p.cursor_render_state();
        assert_eq!((r.x, r.y), (640.0, 10.0));
    }

    #[test]
    fn test_following_spring_runs_then_stops_frames() {
        let mut p = page();
        p.on_pointer_move(Vec2::new(100.0, 100.0), 0.0);
        assert!(!p.scheduler().frames_running());
        p.on_pointer_move(Vec2::new(300.0, 100.0), 16.0);
        assert!(p.scheduler().frames_running());
        run_frames(&mut p, 16.0, 600);
        assert!(!p.scheduler().frames_running());
        assert_eq!(p.cursor_render_state().x, 300.0);
    }

    #[test]
    fn test_wheel_ends_drift() {
        let mut p = page();
        p.on_pointer_move(Vec2::new(300.0, 400.0), 0.0);
        p.on_idle_timeout(1000.0);
        assert_eq!(p.cursor_mode(), CursorMode::Drifting);
        p.on_wheel(1100.0);
        assert_eq!(p.cursor_mode(), CursorMode::Following);
        // Wheel restarted the idle timer
        p.on_idle_timeout(2000.0);
        assert_eq!(p.cursor_mode(), CursorMode::Following);
        p.on_idle_timeout(2100.0);
        assert_eq!(p.cursor_mode(), CursorMode::Drifting);
    }

    #[test]
    fn test_click_ripple() {
        let mut p = page();
        p.on_click(100.0);
        assert!(p.ripple_active(650.0));
        assert!(!p.ripple_active(700.0));
    }

    #[test]
    fn test_magnetic_offsets_follow_pointer() {
        let mut p = page();
        p.register_magnetic_target(4, Box::new(Rect::new(100.0, 100.0, 100.0, 100.0)));
        assert_eq!(p.magnetic_offsets(), vec![(4, Vec2::ZERO)]);
        p.on_pointer_move(Vec2::new(170.0, 130.0), 0.0);
        assert_eq!(p.magnetic_offsets(), vec![(4, Vec2::new(10.0, -10.0))]);
        p.on_pointer_leave();
        assert_eq!(p.magnetic_offsets(), vec![(4, Vec2::ZERO)]);
    }

    #[test]
    fn test_goal_journey_through_facade() {
        let mut p = page();
        p.on_goal_select(Goal::Customers);
        assert_eq!(p.current_section_order(), SectionOrder::ServicesFirst);
        assert_eq!(
            p.current_priority_services().map(|o| o[0]),
            Some(ServiceCategory::VideoProduction)
        );
        p.on_goal_reset();
        p.on_goal_reset();
        assert_eq!(p.current_goal(), Goal::None);
        assert_eq!(p.current_section_order(), SectionOrder::Default);
        assert!(p.current_priority_services().is_none());
    }

    #[test]
    fn test_timeline_through_facade() {
        let mut p = page();
        assert!(p.timeline_render_state().is_none());
        let geo = StaticGeometry {
            container: ContainerGeometry {
                top: 0.0,
                height: 2000.0,
            },
            viewport_height: 800.0,
        };
        p.attach_timeline(5, Box::new(geo));
        p.on_touch_start(Vec2::new(300.0, 400.0));
        assert!(p.on_touch_move(Vec2::new(150.0, 390.0)).suppress_scroll);
        assert_eq!(p.timeline_render_state().map(|r| r.active_step_index), Some(1));
        let req = p.on_touch_end().unwrap();
        assert!((req.delta_y - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_cancelled_swipe_does_not_scroll() {
        let mut p = page();
        let geo = StaticGeometry {
            container: ContainerGeometry {
                top: 0.0,
                height: 2000.0,
            },
            viewport_height: 800.0,
        };
        p.attach_timeline(5, Box::new(geo));
        p.on_touch_start(Vec2::new(300.0, 400.0));
        p.on_touch_move(Vec2::new(150.0, 390.0));
        p.on_touch_cancel();
        assert_eq!(p.timeline_render_state().map(|r| r.active_step_index), Some(0));
        assert!(p.on_touch_end().is_none());
    }

    #[test]
    fn test_nav_scrolled_threshold() {
        let mut p = page();
        p.on_scroll(50.0);
        assert!(!p.nav_scrolled());
        p.on_scroll(51.0);
        assert!(p.nav_scrolled());
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let mut p = page();
        p.register_magnetic_target(1, Box::new(Rect::new(580.0, 380.0, 40.0, 40.0)));
        p.on_pointer_move(Vec2::new(300.0, 400.0), 0.0);
        p.on_idle_timeout(1000.0);
        assert!(p.scheduler().frames_running());

        p.teardown();
        assert!(p.is_torn_down());
        assert!(!p.scheduler().frames_running());
        assert_eq!(p.scheduler().idle_timer, None);

        // A late frame or event must not move anything
        let before = p.cursor_render_state();
        p.on_frame(1016.0);
        p.on_pointer_move(Vec2::new(10.0, 10.0), 1020.0);
        assert_eq!(p.cursor_render_state(), before);
        assert!(!p.scheduler().frames_running());
        assert!(p.magnetic_offsets().is_empty());
    }
}
