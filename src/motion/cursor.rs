//! Custom cursor motion engine
//!
//! Two modes:
//! - `Following`: a stiff spring chases the live pointer
//! - `Drifting`: the pointer has gone idle, the cursor swims from where it
//!   stopped toward the nearest eligible magnetic element, wobbling
//!   sideways and breathing
//!
//! The engine only mutates its own [`CursorState`]; callers feed it
//! transitions and frame ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::magnet::{AttractionTarget, nearest_eligible};
use super::spring::Spring2;
use crate::consts::{DRIFT_ARRIVAL, OFFSCREEN_SENTINEL, WAVE_SCALE};
use crate::settings::MotionSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorMode {
    Following,
    Drifting,
}

/// Where the pointer was when it went idle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftAnchor {
    pub origin: Vec2,
}

/// Cursor state (owned by [`CursorEngine`])
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorState {
    pub render_pos: Vec2,
    pub target_pos: Vec2,
    pub mode: CursorMode,
    pub wave_phase: f32,
    pub breath_phase: f32,
    pub scale: f32,
}

/// Drift destination: at most `max_offset` from the anchor toward the
/// target center. Holds at the anchor when there is no target, or when the
/// target is further than `max_range`.
pub fn resolve_drift_target(
    anchor: Vec2,
    target: Option<Vec2>,
    max_offset: f32,
    max_range: f32,
) -> Vec2 {
    let Some(target) = target else {
        return anchor;
    };
    let to_target = target - anchor;
    let distance = to_target.length();
    if distance > max_range || distance <= 0.0 {
        return anchor;
    }
    anchor + (to_target / distance) * distance.min(max_offset)
}

#[derive(Debug, Clone)]
pub struct CursorEngine {
    state: CursorState,
    spring: Spring2,
    anchor: Option<DriftAnchor>,
    targets: Vec<AttractionTarget>,
    visible: bool,
    seen: bool,
    settings: MotionSettings,
}

impl CursorEngine {
    pub fn new(settings: MotionSettings) -> Self {
        let parked = Vec2::new(OFFSCREEN_SENTINEL.0, OFFSCREEN_SENTINEL.1);
        let mut spring = Spring2::new(settings.spring_stiffness, settings.spring_damping);
        spring.snap_to(parked);
        Self {
            state: CursorState {
                render_pos: parked,
                target_pos: parked,
                mode: CursorMode::Following,
                wave_phase: 0.0,
                breath_phase: 0.0,
                scale: 1.0,
            },
            spring,
            anchor: None,
            targets: Vec::new(),
            visible: false,
            seen: false,
            settings,
        }
    }

    /// Follow the live pointer. `snap` jumps straight to it (first sample,
    /// re-entry, or leaving a drift) with no spring lag carried over.
    pub fn follow(&mut self, pointer: Vec2, snap: bool) {
        if self.state.mode == CursorMode::Drifting {
            log::debug!("cursor: drifting -> following");
        }
        self.state.mode = CursorMode::Following;
        self.state.target_pos = pointer;
        self.state.scale = 1.0;
        self.state.breath_phase = 0.0;
        self.anchor = None;
        self.targets.clear();
        self.visible = true;
        self.seen = true;

        if snap {
            self.spring.snap_to(pointer);
            self.state.render_pos = pointer;
        } else {
            self.spring.set_target(pointer);
        }
    }

    /// Pointer went idle at `origin`. Ignored while hidden.
    pub fn begin_drift(&mut self, origin: Vec2, targets: Vec<AttractionTarget>) -> bool {
        if !self.visible {
            return false;
        }
        log::debug!(
            "cursor: following -> drifting from ({:.0}, {:.0}), {} candidate targets",
            origin.x,
            origin.y,
            targets.iter().filter(|t| t.eligible).count()
        );
        self.state.mode = CursorMode::Drifting;
        self.state.wave_phase = 0.0;
        self.state.breath_phase = 0.0;
        self.anchor = Some(DriftAnchor { origin });
        self.targets = targets;
        // Drift integrates render_pos directly; keep the spring in sync
        self.spring.snap_to(self.state.render_pos);
        self.state.target_pos = self.drift_target();
        true
    }

    /// Pointer left the page
    pub fn hide(&mut self) {
        let parked = Vec2::new(OFFSCREEN_SENTINEL.0, OFFSCREEN_SENTINEL.1);
        self.visible = false;
        self.state.mode = CursorMode::Following;
        self.state.scale = 1.0;
        self.state.render_pos = parked;
        self.state.target_pos = parked;
        self.spring.snap_to(parked);
        self.anchor = None;
        self.targets.clear();
    }

    /// Advance one animation frame. Returns true if more frames are needed.
    pub fn step_frame(&mut self, dt: f32) -> bool {
        match self.state.mode {
            CursorMode::Following => {
                let moving = self.spring.update(dt);
                self.state.render_pos = self.spring.position;
                moving
            }
            CursorMode::Drifting => {
                self.step_drift();
                true
            }
        }
    }

    fn drift_target(&self) -> Vec2 {
        let Some(anchor) = self.anchor else {
            return self.state.render_pos;
        };
        let nearest = nearest_eligible(&self.targets, anchor.origin);
        resolve_drift_target(
            anchor.origin,
            nearest,
            self.settings.drift_max_offset,
            self.settings.drift_max_range,
        )
    }

    fn step_drift(&mut self) {
        let target = self.drift_target();
        self.state.target_pos = target;

        let delta = target - self.state.render_pos;
        let distance = delta.length();
        if distance > DRIFT_ARRIVAL {
            self.state.wave_phase += self.settings.wave_phase_step;
            let wobble = self.state.wave_phase.sin() * self.settings.effective_wave_amplitude();
            let perp = Vec2::new(-delta.y, delta.x) / distance;
            self.state.render_pos +=
                delta * self.settings.drift_speed + perp * wobble * WAVE_SCALE;
        }

        // Breathing runs whether or not the cursor has arrived
        self.state.breath_phase += self.settings.breath_phase_step;
        let depth = self.settings.effective_breath_depth();
        self.state.scale = 1.0 + depth * 0.5 * (1.0 - self.state.breath_phase.cos());
        self.spring.snap_to(self.state.render_pos);
    }

    /// True while frames have work to do
    pub fn needs_frames(&self) -> bool {
        match self.state.mode {
            CursorMode::Drifting => true,
            CursorMode::Following => self.visible && !self.spring.is_settled(),
        }
    }

    pub fn state(&self) -> &CursorState {
        &self.state
    }

    pub fn mode(&self) -> CursorMode {
        self.state.mode
    }

    pub fn anchor(&self) -> Option<DriftAnchor> {
        self.anchor
    }

    /// Rendered only after the first pointer sample and while on the page
    pub fn is_visible(&self) -> bool {
        self.seen && self.visible
    }
}
