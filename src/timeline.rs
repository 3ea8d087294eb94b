//! Scroll-driven process timeline
//!
//! The process section is a tall container with a pinned (sticky) viewport.
//! Scrolling through the container moves a horizontal track of steps; a
//! horizontal swipe on touch screens nudges the track ahead of the scroll
//! and is converted into a real scroll when the finger lifts.
//!
//! Geometry is read through [`GeometryProvider`] so the math runs without a
//! browser.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::MotionSettings;

/// Container bounds relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerGeometry {
    /// Distance from the viewport top to the container top (negative once
    /// scrolled past)
    pub top: f32,
    pub height: f32,
}

impl ContainerGeometry {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Live layout source for the pinned container
pub trait GeometryProvider {
    fn container_geometry(&self) -> ContainerGeometry;
    fn viewport_height(&self) -> f32;
}

/// Fixed geometry (headless previews)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticGeometry {
    pub container: ContainerGeometry,
    pub viewport_height: f32,
}

impl GeometryProvider for StaticGeometry {
    fn container_geometry(&self) -> ContainerGeometry {
        self.container
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }
}

/// Container height for `step_count` steps, in vh
pub fn section_height_vh(step_count: usize) -> f32 {
    (step_count as f32 + 0.5) * 60.0
}

/// Raw progress through the scrollable part of the container, in [0, 1].
/// A container no taller than the viewport has no progress.
pub fn scroll_progress(geometry: ContainerGeometry, viewport_height: f32) -> f32 {
    let scrollable = geometry.height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (-geometry.top / scrollable).clamp(0.0, 1.0)
}

/// Derived positions for a continuous raw position.
///
/// Returns `(active_step_index, smoothed_position)`, both clamped to
/// `[0, step_count - 1]`.
pub fn blend_position(raw: f32, step_count: usize, snap_blend: f32) -> (usize, f32) {
    if step_count == 0 {
        return (0, 0.0);
    }
    let last = (step_count - 1) as f32;
    let nearest = raw.round();
    let active = nearest.clamp(0.0, last) as usize;
    let smoothed = (raw * snap_blend + nearest * (1.0 - snap_blend)).clamp(0.0, last);
    (active, smoothed)
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineState {
    pub scroll_progress: f32,
    pub swipe_offset: f32,
    pub active_step_index: usize,
    pub smoothed_position: f32,
}

/// Snapshot consumed by the renderer each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineRenderState {
    pub active_step_index: usize,
    pub smoothed_position: f32,
    /// Width of the progress line, 0..=100
    pub timeline_progress_percent: f32,
    pub header_visible: bool,
    /// Horizontal track translation (viewport widths * 100)
    pub track_offset_vw: f32,
    /// Bottom gallery strip translation, percent of its own width
    pub gallery_offset_percent: f32,
    /// Background spotlight x position, percent
    pub spotlight_x_percent: f32,
}

impl TimelineRenderState {
    /// Steps up to and including the active one are highlighted
    pub fn step_reached(&self, index: usize) -> bool {
        index <= self.active_step_index
    }
}

/// Programmatic scroll to perform after a swipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRequest {
    pub delta_y: f32,
    pub smooth: bool,
}

/// How the host should treat a touch move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchResponse {
    /// Call `preventDefault` so the page does not scroll vertically
    pub suppress_scroll: bool,
}

#[derive(Debug, Clone, Copy)]
struct TouchGesture {
    last: Vec2,
}

pub struct TimelineController {
    step_count: usize,
    provider: Box<dyn GeometryProvider>,
    state: TimelineState,
    geometry: ContainerGeometry,
    viewport_height: f32,
    header_visible: bool,
    gesture: Option<TouchGesture>,
    snap_blend: f32,
    swipe_distance_per_step: f32,
    swipe_limit_fraction: f32,
    header_threshold: f32,
}

impl std::fmt::Debug for TimelineController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineController")
            .field("step_count", &self.step_count)
            .field("state", &self.state)
            .field("geometry", &self.geometry)
            .field("header_visible", &self.header_visible)
            .finish()
    }
}

impl TimelineController {
    pub fn new(
        step_count: usize,
        provider: Box<dyn GeometryProvider>,
        settings: &MotionSettings,
    ) -> Self {
        let mut controller = Self {
            step_count,
            provider,
            state: TimelineState::default(),
            geometry: ContainerGeometry::default(),
            viewport_height: 0.0,
            header_visible: false,
            gesture: None,
            snap_blend: settings.snap_blend,
            swipe_distance_per_step: settings.swipe_distance_per_step.max(1.0),
            swipe_limit_fraction: settings.swipe_limit_fraction,
            header_threshold: settings.header_threshold,
        };
        controller.refresh();
        controller
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn state(&self) -> &TimelineState {
        &self.state
    }

    /// Largest allowed |swipe_offset|
    pub fn swipe_limit(&self) -> f32 {
        if self.step_count <= 1 {
            return 0.0;
        }
        self.swipe_limit_fraction * (self.step_count - 1) as f32
    }

    /// Re-read geometry and recompute everything (scroll/touch tick)
    pub fn refresh(&mut self) {
        self.geometry = self.provider.container_geometry();
        self.viewport_height = self.provider.viewport_height();
        self.state.scroll_progress = scroll_progress(self.geometry, self.viewport_height);
        self.recompute();

        let header = self.geometry.top <= self.header_threshold
            && self.geometry.bottom() > self.viewport_height;
        if header != self.header_visible {
            log::debug!("timeline: header {}", if header { "shown" } else { "hidden" });
            self.header_visible = header;
        }
    }

    fn recompute(&mut self) {
        let raw = self.state.scroll_progress * self.step_count as f32 + self.state.swipe_offset;
        let (active, smoothed) = blend_position(raw, self.step_count, self.snap_blend);
        if active != self.state.active_step_index {
            log::debug!("timeline: step {} -> {}", self.state.active_step_index, active);
        }
        self.state.active_step_index = active;
        self.state.smoothed_position = smoothed;
    }

    pub fn touch_start(&mut self, point: Vec2) {
        self.gesture = Some(TouchGesture { last: point });
    }

    /// Each move is judged on its own delta: only horizontal-dominant moves
    /// swipe, everything else is left to the page scroll.
    pub fn touch_move(&mut self, point: Vec2) -> TouchResponse {
        let Some(gesture) = self.gesture.as_mut() else {
            return TouchResponse::default();
        };
        let delta = point - gesture.last;
        gesture.last = point;

        if delta.x.abs() <= delta.y.abs() {
            return TouchResponse::default();
        }

        let limit = self.swipe_limit();
        // Dragging left advances the timeline
        let offset = self.state.swipe_offset - delta.x / self.swipe_distance_per_step;
        self.state.swipe_offset = offset.clamp(-limit, limit);
        self.refresh();
        TouchResponse {
            suppress_scroll: true,
        }
    }

    /// Finger lifted: turn any swipe offset into a real scroll
    pub fn touch_end(&mut self) -> Option<ScrollRequest> {
        self.gesture = None;
        let offset = std::mem::take(&mut self.state.swipe_offset);
        self.refresh();
        if offset == 0.0 || self.step_count == 0 {
            return None;
        }

        let scrollable = self.geometry.height - self.viewport_height;
        if scrollable <= 0.0 {
            return None;
        }
        let delta_y = offset * (scrollable / self.step_count as f32);
        log::debug!("timeline: swipe {:.2} steps -> scroll by {:.0}", offset, delta_y);
        Some(ScrollRequest {
            delta_y,
            smooth: true,
        })
    }

    pub fn touch_cancel(&mut self) {
        self.gesture = None;
        self.state.swipe_offset = 0.0;
        self.refresh();
    }

    pub fn render_state(&self) -> TimelineRenderState {
        let smoothed = self.state.smoothed_position;
        let fraction = if self.step_count <= 1 {
            0.0
        } else {
            (smoothed / (self.step_count - 1) as f32).clamp(0.0, 1.0)
        };
        TimelineRenderState {
            active_step_index: self.state.active_step_index,
            smoothed_position: smoothed,
            timeline_progress_percent: (fraction * 100.0).min(100.0),
            header_visible: self.header_visible,
            track_offset_vw: smoothed * 100.0,
            gallery_offset_percent: smoothed * 12.5,
            spotlight_x_percent: 20.0 + fraction * 60.0,
        }
    }
}
