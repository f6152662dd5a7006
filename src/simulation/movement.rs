//! Straight-line movement with a fixed arrival threshold
//!
//! A worker arrives when the remaining distance is less than one speed
//! increment; otherwise it advances exactly one increment along the unit
//! vector toward the target. Steps are clamped to the floor rectangle.

use crate::core::types::{Vec2, FLOOR_BOUNDS};

/// Outcome of one movement step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepResult {
    /// Within one speed increment of the target; position unchanged
    Arrived,
    /// Advanced one speed increment toward the target
    Moved(Vec2),
}

/// Advance `current` toward `target` by one increment of `speed`
pub fn step_toward(current: Vec2, target: Vec2, speed: f32) -> StepResult {
    let distance = current.distance(&target);
    if distance < speed {
        StepResult::Arrived
    } else {
        let direction = (target - current).normalize();
        let next = (current + direction * speed).clamp_to(&FLOOR_BOUNDS);
        StepResult::Moved(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrival_threshold_is_strict() {
        let target = Vec2::new(10.0, 0.0);
        // Exactly at speed distance: not yet arrived, steps onto the target
        let at_speed = step_toward(Vec2::new(9.0, 0.0), target, 1.0);
        assert_eq!(at_speed, StepResult::Moved(Vec2::new(10.0, 0.0)));
        // Inside the threshold: arrived
        let inside = step_toward(Vec2::new(9.1, 0.0), target, 1.0);
        assert_eq!(inside, StepResult::Arrived);
    }

    #[test]
    fn test_step_is_exactly_one_speed_increment() {
        let current = Vec2::new(0.0, 0.0);
        let target = Vec2::new(30.0, 40.0);
        let speed = 1.3;
        match step_toward(current, target, speed) {
            StepResult::Moved(next) => {
                assert!((current.distance(&next) - speed).abs() < 0.0001);
                // Along the unit vector toward the target
                assert!((next.x - 0.78).abs() < 0.0001);
                assert!((next.y - 1.04).abs() < 0.0001);
            }
            StepResult::Arrived => panic!("should not arrive from 50 units out"),
        }
    }

    #[test]
    fn test_step_stays_on_the_floor() {
        // Target sits on the boundary; the step may not overshoot past it
        let result = step_toward(Vec2::new(99.5, 79.5), Vec2::new(150.0, 120.0), 2.0);
        match result {
            StepResult::Moved(next) => {
                assert!(next.x <= 100.0 && next.y <= 80.0);
            }
            StepResult::Arrived => panic!("target is far away"),
        }
    }
}
