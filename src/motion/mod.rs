//! Pointer-driven motion module
//!
//! Everything that reacts to the mouse lives here. The engines are pure state
//! machines fed with explicit timestamps:
//! - No global state (one owner per view)
//! - Frames and timers come from an injected [`Scheduler`]
//! - Element bounds are queried on demand, never cached across idle periods

pub mod cursor;
pub mod magnet;
pub mod pointer;
pub mod scheduler;
pub mod spring;

pub use cursor::{CursorEngine, CursorMode, CursorState, DriftAnchor, resolve_drift_target};
pub use magnet::{AttractionField, AttractionTarget, MagneticElement, TargetId, hover_displacement};
pub use pointer::{PointerSample, PointerTracker};
pub use scheduler::{ManualScheduler, Scheduler};
pub use spring::Spring2;
