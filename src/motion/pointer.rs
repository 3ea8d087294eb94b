//! Pointer sampling and idle detection

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::OFFSCREEN_SENTINEL;

/// Latest raw pointer position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub pos: Vec2,
    pub timestamp_ms: f64,
}

/// What changed when a move sample arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Pointer was idle before this sample
    pub was_idle: bool,
    /// Pointer was hidden (never seen, or left the page) before this sample
    pub was_hidden: bool,
}

/// Tracks the raw pointer, its visibility and whether it has gone idle.
///
/// Time is supplied by the caller; the tracker never reads a clock.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    sample: Option<PointerSample>,
    /// Last move or wheel event
    last_activity_ms: f64,
    idle: bool,
    visible: bool,
    ripple_until_ms: f64,
    idle_timeout_ms: f64,
    ripple_duration_ms: f64,
}

impl PointerTracker {
    pub fn new(idle_timeout_ms: f64, ripple_duration_ms: f64) -> Self {
        Self {
            sample: None,
            last_activity_ms: f64::NEG_INFINITY,
            idle: false,
            visible: false,
            ripple_until_ms: f64::NEG_INFINITY,
            idle_timeout_ms,
            ripple_duration_ms,
        }
    }

    /// Record a pointer-move sample
    pub fn record_move(&mut self, pos: Vec2, now_ms: f64) -> MoveOutcome {
        let outcome = MoveOutcome {
            was_idle: self.idle,
            was_hidden: !self.visible,
        };
        self.sample = Some(PointerSample {
            pos,
            timestamp_ms: now_ms,
        });
        self.last_activity_ms = now_ms;
        self.idle = false;
        self.visible = true;
        outcome
    }

    /// Wheel activity restarts the idle timer without moving the pointer.
    /// Returns true if the pointer was idle.
    pub fn record_wheel(&mut self, now_ms: f64) -> bool {
        let was_idle = self.idle;
        self.last_activity_ms = now_ms;
        self.idle = false;
        was_idle
    }

    /// Raise the click ripple
    pub fn record_click(&mut self, now_ms: f64) {
        self.ripple_until_ms = now_ms + self.ripple_duration_ms;
    }

    /// Pointer left the tracked surface
    pub fn leave(&mut self) {
        self.visible = false;
        let (x, y) = OFFSCREEN_SENTINEL;
        if let Some(sample) = self.sample.as_mut() {
            sample.pos = Vec2::new(x, y);
        }
    }

    /// Reports the active-to-idle transition exactly once.
    ///
    /// Returns false if the timeout has not fully elapsed since the last
    /// activity (a stale timer firing), if already idle, or if the pointer
    /// was never seen.
    pub fn check_idle(&mut self, now_ms: f64) -> bool {
        if self.idle || self.sample.is_none() {
            return false;
        }
        if now_ms - self.last_activity_ms < self.idle_timeout_ms {
            return false;
        }
        self.idle = true;
        true
    }

    /// Time left before the pointer counts as idle, if a transition is
    /// still pending
    pub fn idle_remaining_ms(&self, now_ms: f64) -> Option<f64> {
        if self.idle || self.sample.is_none() {
            return None;
        }
        let remaining = self.idle_timeout_ms - (now_ms - self.last_activity_ms);
        (remaining > 0.0).then_some(remaining)
    }

    /// Milliseconds until the idle timeout would fire
    pub fn idle_timeout_ms(&self) -> f64 {
        self.idle_timeout_ms
    }

    pub fn sample(&self) -> Option<PointerSample> {
        self.sample
    }

    /// Current position, or the off-surface sentinel if never seen
    pub fn position(&self) -> Vec2 {
        self.sample
            .map(|s| s.pos)
            .unwrap_or_else(|| Vec2::new(OFFSCREEN_SENTINEL.0, OFFSCREEN_SENTINEL.1))
    }

    pub fn is_idle(&self) -> bool {
        self.idle
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn has_been_seen(&self) -> bool {
        self.sample.is_some()
    }

    pub fn ripple_active(&self, now_ms: f64) -> bool {
        now_ms < self.ripple_until_ms
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(
            crate::consts::IDLE_TIMEOUT_MS,
            crate::consts::RIPPLE_DURATION_MS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_fires_once_after_timeout() {
        let mut p = PointerTracker::default();
        p.record_move(Vec2::new(10.0, 10.0), 0.0);
        assert!(!p.check_idle(999.0));
        assert!(p.check_idle(1000.0));
        assert!(p.is_idle());
        assert!(!p.check_idle(2500.0));
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut p = PointerTracker::default();
        p.record_move(Vec2::ZERO, 0.0);
        p.record_move(Vec2::new(5.0, 0.0), 600.0);
        // Timer armed by the first sample fires at 1000
        assert!(!p.check_idle(1000.0));
        assert!(p.check_idle(1600.0));
    }

    #[test]
    fn test_idle_remaining() {
        let mut p = PointerTracker::default();
        assert_eq!(p.idle_remaining_ms(500.0), None);
        p.record_move(Vec2::ZERO, 100.0);
        assert_eq!(p.idle_remaining_ms(600.0), Some(500.0));
        assert_eq!(p.idle_remaining_ms(1100.0), None);
        assert!(p.check_idle(1100.0));
        assert_eq!(p.idle_remaining_ms(1050.0), None);
    }

    #[test]
    fn test_never_seen_never_idles() {
        let mut p = PointerTracker::default();
        assert!(!p.has_been_seen());
        assert!(!p.check_idle(10_000.0));
        assert!(!p.is_visible());
    }

    #[test]
    fn test_wheel_resets_idle() {
        let mut p = PointerTracker::default();
        p.record_move(Vec2::ZERO, 0.0);
        assert!(p.check_idle(1000.0));
        assert!(p.record_wheel(1200.0));
        assert!(!p.is_idle());
        assert!(!p.check_idle(2100.0));
        assert!(p.check_idle(2200.0));
    }

    #[test]
    fn test_leave_parks_offscreen() {
        let mut p = PointerTracker::default();
        p.record_move(Vec2::new(300.0, 200.0), 0.0);
        p.leave();
        assert!(!p.is_visible());
        assert_eq!(p.position(), Vec2::new(-100.0, -100.0));
        let outcome = p.record_move(Vec2::new(50.0, 50.0), 10.0);
        assert!(outcome.was_hidden);
        assert!(p.is_visible());
    }

    #[test]
    fn test_ripple_lasts_600ms_regardless_of_idle() {
        let mut p = PointerTracker::default();
        p.record_move(Vec2::ZERO, 0.0);
        p.check_idle(1000.0);
        p.record_click(1100.0);
        assert!(p.ripple_active(1100.0));
        assert!(p.ripple_active(1699.0));
        assert!(!p.ripple_active(1700.0));
        assert!(p.is_idle());
    }
}
