//! Damped spring for the following cursor

use glam::Vec2;

use crate::consts::{MAX_SUBSTEPS, SPRING_DT};

/// Below this distance and speed the spring snaps to rest
const REST_THRESHOLD: f32 = 0.01;

/// A 2D mass-spring-damper (unit mass) chasing a target
#[derive(Debug, Clone, Copy)]
pub struct Spring2 {
    pub position: Vec2,
    pub velocity: Vec2,
    pub target: Vec2,
    pub stiffness: f32,
    pub damping: f32,
}

impl Spring2 {
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            target: Vec2::ZERO,
            stiffness,
            damping,
        }
    }

    /// Jump to `pos` and stop
    pub fn snap_to(&mut self, pos: Vec2) {
        self.position = pos;
        self.target = pos;
        self.velocity = Vec2::ZERO;
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Advance by `dt` seconds in fixed substeps (semi-implicit Euler).
    /// Returns true while still moving.
    pub fn update(&mut self, dt: f32) -> bool {
        let dt = dt.clamp(0.0, 0.1);
        let mut remaining = dt;
        let mut substeps = 0;
        while remaining > 0.0 && substeps < MAX_SUBSTEPS {
            let h = remaining.min(SPRING_DT);
            let force = (self.target - self.position) * self.stiffness - self.velocity * self.damping;
            self.velocity += force * h;
            self.position += self.velocity * h;
            remaining -= h;
            substeps += 1;
        }

        if self.is_settled() {
            self.position = self.target;
            self.velocity = Vec2::ZERO;
            return false;
        }
        true
    }

    pub fn is_settled(&self) -> bool {
        self.position.distance(self.target) < REST_THRESHOLD
            && self.velocity.length() < REST_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CURSOR_DAMPING, CURSOR_STIFFNESS};

    #[test]
    fn test_converges_to_target() {
        let mut s = Spring2::new(CURSOR_STIFFNESS, CURSOR_DAMPING);
        s.set_target(Vec2::new(200.0, -50.0));
        let mut frames = 0;
        while s.update(1.0 / 60.0) {
            frames += 1;
            assert!(frames < 600, "spring never settled");
        }
        assert_eq!(s.position, Vec2::new(200.0, -50.0));
    }

    #[test]
    fn test_fast_tracking() {
        // Lightly damped but stiff: most of the distance is covered in ~100ms
        let mut s = Spring2::new(CURSOR_STIFFNESS, CURSOR_DAMPING);
        s.set_target(Vec2::new(100.0, 0.0));
        for _ in 0..6 {
            s.update(1.0 / 60.0);
        }
        assert!(s.position.x > 60.0, "x = {}", s.position.x);
    }

    #[test]
    fn test_snap_stops_motion() {
        let mut s = Spring2::new(CURSOR_STIFFNESS, CURSOR_DAMPING);
        s.set_target(Vec2::new(100.0, 0.0));
        s.update(1.0 / 60.0);
        s.snap_to(Vec2::new(5.0, 5.0));
        assert!(s.is_settled());
        assert!(!s.update(1.0 / 60.0));
        assert_eq!(s.position, Vec2::new(5.0, 5.0));
    }
}
