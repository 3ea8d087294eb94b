//! Frame and timer scheduling
//!
//! The engines never call `requestAnimationFrame` or `setTimeout` directly.
//! The owning view asks a [`Scheduler`] to start/stop frame delivery and to
//! (re)arm the idle timer; the host calls back into the view when they fire.

/// Source of animation frames and the idle debounce timer
pub trait Scheduler {
    /// Begin delivering frames (no-op if already running)
    fn start_frames(&mut self);
    /// Stop delivering frames
    fn stop_frames(&mut self);
    fn frames_running(&self) -> bool;
    /// Fire the idle timeout `delay_ms` from now, replacing any pending one
    fn arm_idle_timer(&mut self, delay_ms: f64);
    /// Cancel the pending idle timeout, if any
    fn disarm_idle_timer(&mut self);
}

/// Deterministic scheduler for tests and headless runs.
///
/// Records requests; the driver decides when frames and timeouts "fire".
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pub running: bool,
    /// Delay of the currently armed idle timer
    pub idle_timer: Option<f64>,
    pub frame_starts: u32,
    pub frame_stops: u32,
    pub timer_arms: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for ManualScheduler {
    fn start_frames(&mut self) {
        if !self.running {
            self.running = true;
            self.frame_starts += 1;
        }
    }

    fn stop_frames(&mut self) {
        if self.running {
            self.running = false;
            self.frame_stops += 1;
        }
    }

    fn frames_running(&self) -> bool {
        self.running
    }

    fn arm_idle_timer(&mut self, delay_ms: f64) {
        self.idle_timer = Some(delay_ms);
        self.timer_arms += 1;
    }

    fn disarm_idle_timer(&mut self) {
        self.idle_timer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_idempotent() {
        let mut s = ManualScheduler::new();
        s.start_frames();
        s.start_frames();
        assert!(s.frames_running());
        assert_eq!(s.frame_starts, 1);
        s.stop_frames();
        s.stop_frames();
        assert_eq!(s.frame_stops, 1);
    }

    #[test]
    fn test_rearm_replaces_timer() {
        let mut s = ManualScheduler::new();
        s.arm_idle_timer(1000.0);
        s.arm_idle_timer(500.0);
        assert_eq!(s.idle_timer, Some(500.0));
        s.disarm_idle_timer();
        assert_eq!(s.idle_timer, None);
    }
}
