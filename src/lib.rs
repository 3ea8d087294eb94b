//! Studio Motion - personalization and motion engine for the studio site
//!
//! Core modules:
//! - `motion`: Pointer tracking, magnetic attraction, custom cursor physics
//! - `timeline`: Scroll-driven horizontal process timeline with swipe blending
//! - `goal`: Visitor goal state machine and derived content ordering
//! - `presentation`: Per-view owner wiring the above to host events
//! - `content`: Typed content records loaded from JSON
//! - `contact`: Lead-capture form validation and submission sink
//! - `rotation`: Client logo grid and image carousel rotators
//! - `settings`: Tuned motion constants, persisted on web

pub mod contact;
pub mod content;
pub mod geometry;
pub mod goal;
pub mod motion;
pub mod presentation;
pub mod rotation;
pub mod settings;
pub mod timeline;

pub use geometry::{Rect, Viewport};
pub use goal::{Goal, GoalSelector, SectionOrder};
pub use presentation::{CursorRenderState, Presentation};
pub use settings::MotionSettings;
pub use timeline::{TimelineController, TimelineRenderState};

/// Tuned constants (defaults for [`MotionSettings`])
pub mod consts {
    /// Pointer inactivity before the cursor starts drifting
    pub const IDLE_TIMEOUT_MS: f64 = 1000.0;
    /// Lifetime of the click ripple
    pub const RIPPLE_DURATION_MS: f64 = 600.0;
    /// Where the cursor parks when the pointer leaves the page
    pub const OFFSCREEN_SENTINEL: (f32, f32) = (-100.0, -100.0);

    /// Fixed integration step for the following spring (seconds)
    pub const SPRING_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 12;
    /// Following spring (fast, lightly damped)
    pub const CURSOR_STIFFNESS: f32 = 500.0;
    pub const CURSOR_DAMPING: f32 = 28.0;

    /// Drift path
    pub const DRIFT_SPEED: f32 = 0.05;
    pub const DRIFT_MAX_OFFSET: f32 = 100.0;
    pub const DRIFT_MAX_RANGE: f32 = 1000.0;
    /// Closer than this the drift stops advancing
    pub const DRIFT_ARRIVAL: f32 = 1.0;

    /// Swimming wobble perpendicular to the drift direction
    pub const WAVE_AMPLITUDE: f32 = 15.0;
    pub const WAVE_PHASE_STEP: f32 = 0.15;
    pub const WAVE_SCALE: f32 = 0.1;

    /// Idle breathing (scale oscillates 1.0 ..= 1.0 + BREATH_DEPTH)
    pub const BREATH_PHASE_STEP: f32 = 0.02;
    pub const BREATH_DEPTH: f32 = 0.08;

    /// Hover magnetism pull (fraction of pointer offset from center)
    pub const HOVER_STRENGTH: f32 = 0.5;
    /// Fraction of an element's height that must be on screen to attract
    pub const MIN_VISIBLE_FRACTION: f32 = 0.5;

    /// Weight of the continuous position in the timeline snap blend
    pub const SNAP_BLEND: f32 = 0.5;
    /// Horizontal drag distance equal to one timeline step
    pub const SWIPE_DISTANCE_PER_STEP: f32 = 300.0;
    /// Swipe offset limit as a fraction of (step_count - 1)
    pub const SWIPE_LIMIT_FRACTION: f32 = 0.2;
    /// Timeline header shows once the section top passes this line
    pub const HEADER_THRESHOLD: f32 = 100.0;
    /// Nav bar switches to its compact style past this scroll offset
    pub const NAV_SCROLL_THRESHOLD: f64 = 50.0;
}
