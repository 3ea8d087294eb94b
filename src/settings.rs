//! Motion settings and preferences
//!
//! Tuned constants live here rather than in the engines so they can be
//! adjusted per deployment. Overrides are read from LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which elements may attract the idle cursor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Eligibility {
    /// Element must lie fully within the horizontal viewport bounds
    pub require_horizontal_containment: bool,
    /// Visible height / element height must exceed this
    pub min_visible_fraction: f32,
}

impl Default for Eligibility {
    fn default() -> Self {
        Self {
            require_horizontal_containment: true,
            min_visible_fraction: MIN_VISIBLE_FRACTION,
        }
    }
}

/// Motion tuning for one page view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    // === Pointer ===
    /// Inactivity before the cursor is considered idle (ms)
    pub idle_timeout_ms: f64,
    /// Click ripple lifetime (ms)
    pub ripple_duration_ms: f64,

    // === Cursor ===
    /// Following spring stiffness
    pub spring_stiffness: f32,
    /// Following spring damping
    pub spring_damping: f32,
    /// Fraction of the remaining distance covered per drift frame
    pub drift_speed: f32,
    /// Furthest the cursor drifts from where the pointer stopped
    pub drift_max_offset: f32,
    /// Targets further than this from the anchor are ignored
    pub drift_max_range: f32,
    /// Wobble amplitude
    pub wave_amplitude: f32,
    /// Wobble phase advance per frame (radians)
    pub wave_phase_step: f32,
    /// Breathing phase advance per frame (radians)
    pub breath_phase_step: f32,
    /// Breathing scale depth (peak scale = 1 + depth)
    pub breath_depth: f32,

    // === Magnetism ===
    pub eligibility: Eligibility,
    /// Hover pull strength
    pub hover_strength: f32,

    // === Timeline ===
    /// Weight of the continuous position (1.0 = no snapping)
    pub snap_blend: f32,
    /// Drag distance equal to one step
    pub swipe_distance_per_step: f32,
    /// Swipe offset limit as a fraction of (step_count - 1)
    pub swipe_limit_fraction: f32,
    /// Header appears once the section top passes this line
    pub header_threshold: f32,

    // === Accessibility ===
    /// Reduced motion (no wobble, no breathing)
    pub reduced_motion: bool,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            idle_timeout_ms: IDLE_TIMEOUT_MS,
            ripple_duration_ms: RIPPLE_DURATION_MS,

            spring_stiffness: CURSOR_STIFFNESS,
            spring_damping: CURSOR_DAMPING,
            drift_speed: DRIFT_SPEED,
            drift_max_offset: DRIFT_MAX_OFFSET,
            drift_max_range: DRIFT_MAX_RANGE,
            wave_amplitude: WAVE_AMPLITUDE,
            wave_phase_step: WAVE_PHASE_STEP,
            breath_phase_step: BREATH_PHASE_STEP,
            breath_depth: BREATH_DEPTH,

            eligibility: Eligibility::default(),
            hover_strength: HOVER_STRENGTH,

            snap_blend: SNAP_BLEND,
            swipe_distance_per_step: SWIPE_DISTANCE_PER_STEP,
            swipe_limit_fraction: SWIPE_LIMIT_FRACTION,
            header_threshold: HEADER_THRESHOLD,

            reduced_motion: false,
        }
    }
}

impl MotionSettings {
    /// Effective wobble amplitude (respects reduced_motion)
    pub fn effective_wave_amplitude(&self) -> f32 {
        if self.reduced_motion {
            0.0
        } else {
            self.wave_amplitude
        }
    }

    /// Effective breathing depth (respects reduced_motion)
    pub fn effective_breath_depth(&self) -> f32 {
        if self.reduced_motion {
            0.0
        } else {
            self.breath_depth
        }
    }

    /// Clamp out-of-range values from hand-edited storage
    pub fn sanitized(mut self) -> Self {
        self.idle_timeout_ms = self.idle_timeout_ms.max(0.0);
        self.drift_speed = self.drift_speed.clamp(0.0, 1.0);
        self.drift_max_offset = self.drift_max_offset.max(0.0);
        self.snap_blend = self.snap_blend.clamp(0.0, 1.0);
        self.swipe_distance_per_step = self.swipe_distance_per_step.max(1.0);
        self.swipe_limit_fraction = self.swipe_limit_fraction.max(0.0);
        self.eligibility.min_visible_fraction =
            self.eligibility.min_visible_fraction.clamp(0.0, 1.0);
        self
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "studio_motion_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<MotionSettings>(&json) {
                    Ok(settings) => {
                        log::info!("Loaded motion settings from LocalStorage");
                        return settings.sanitized();
                    }
                    Err(e) => log::warn!("Ignoring stored motion settings: {}", e),
                }
            }
        }

        log::info!("Using default motion settings");
        Self::default()
    }

    /// Native builds always use the defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_disables_wobble_and_breathing() {
        let mut s = MotionSettings::default();
        assert_eq!(s.effective_wave_amplitude(), WAVE_AMPLITUDE);
        s.reduced_motion = true;
        assert_eq!(s.effective_wave_amplitude(), 0.0);
        assert_eq!(s.effective_breath_depth(), 0.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: MotionSettings =
            serde_json::from_str(r#"{"snap_blend": 0.7, "reduced_motion": true}"#).unwrap();
        assert_eq!(s.snap_blend, 0.7);
        assert!(s.reduced_motion);
        assert_eq!(s.idle_timeout_ms, IDLE_TIMEOUT_MS);
        assert_eq!(s.eligibility.min_visible_fraction, MIN_VISIBLE_FRACTION);
    }

    #[test]
    fn test_sanitized_clamps() {
        let mut s = MotionSettings::default();
        s.snap_blend = 3.0;
        s.swipe_distance_per_step = 0.0;
        s.eligibility.min_visible_fraction = -1.0;
        let s = s.sanitized();
        assert_eq!(s.snap_blend, 1.0);
        assert_eq!(s.swipe_distance_per_step, 1.0);
        assert_eq!(s.eligibility.min_visible_fraction, 0.0);
    }
}
