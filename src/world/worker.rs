//! Workers - the mobile entities on the floor
//!
//! Workers are seeded once at startup and never destroyed. The simulation
//! clock is the only writer of their mutable fields (position, status,
//! battery, signal, trail).

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::types::{Vec2, WorkerId};

/// The closed set of worker roles
///
/// Role determines base movement speed and human/robot classification.
/// Both lookups are exhaustive matches, so adding a role is a
/// compile-time-checked change and an unknown role cannot exist at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Picker,
    Forklift,
    Welder,
    Painter,
    Assembler,
    QaSpecialist,
    Amr,
}

impl Role {
    /// Base movement speed in floor units per tick, before efficiency
    pub fn base_speed(&self) -> f32 {
        match self {
            Role::Picker => 0.9,
            Role::Forklift => 1.1,
            Role::Welder => 0.7,
            Role::Painter => 0.7,
            Role::Assembler => 0.8,
            Role::QaSpecialist => 0.8,
            Role::Amr => 1.3,
        }
    }

    /// Autonomous mobile robots get a distinct map glyph and never wander
    pub fn is_robot(&self) -> bool {
        matches!(self, Role::Amr)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Picker => "Picker",
            Role::Forklift => "Forklift Operator",
            Role::Welder => "Welder",
            Role::Painter => "Painter",
            Role::Assembler => "Assembler",
            Role::QaSpecialist => "QA Specialist",
            Role::Amr => "Autonomous Mobile Robot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Idle,
    Busy,
    Offline,
    Charging,
}

/// A mobile worker or robot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    /// Single-glyph avatar shown on the map
    pub avatar: char,
    pub role: Role,
    pub status: WorkerStatus,
    pub position: Vec2,
    /// 0-100, drains over time unless charging
    pub battery: f32,
    /// 0-100, randomly perturbed
    pub signal: f32,
    /// Movement speed multiplier
    pub efficiency: f32,
    /// Recent positions, oldest first (rendered as the motion trail)
    pub path_history: VecDeque<Vec2>,
}

impl Worker {
    pub fn new(name: impl Into<String>, avatar: char, role: Role, position: Vec2) -> Self {
        Self {
            id: WorkerId::new(),
            name: name.into(),
            avatar,
            role,
            status: WorkerStatus::Idle,
            position,
            battery: 100.0,
            signal: 95.0,
            efficiency: 1.0,
            path_history: VecDeque::new(),
        }
    }

    pub fn with_efficiency(mut self, efficiency: f32) -> Self {
        self.efficiency = efficiency;
        self
    }

    /// Role base speed scaled by this worker's efficiency
    pub fn effective_speed(&self) -> f32 {
        self.role.base_speed() * self.efficiency
    }

    /// Append the current position to the trail, evicting the oldest entry
    /// once the cap is exceeded
    pub fn record_position(&mut self, cap: usize) {
        self.path_history.push_back(self.position);
        while self.path_history.len() > cap {
            self.path_history.pop_front();
        }
    }

    pub fn drain_battery(&mut self, amount: f32) {
        self.battery = (self.battery - amount).clamp(0.0, 100.0);
    }

    pub fn charge_battery(&mut self, amount: f32) {
        self.battery = (self.battery + amount).clamp(0.0, 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_speed_scales_with_efficiency() {
        let worker =
            Worker::new("Mara", 'M', Role::Forklift, Vec2::new(10.0, 10.0)).with_efficiency(0.5);
        assert!((worker.effective_speed() - 0.55).abs() < 0.0001);
    }

    #[test]
    fn test_path_history_cap_is_fifo() {
        let mut worker = Worker::new("Unit-7", '7', Role::Amr, Vec2::new(0.0, 0.0));
        for i in 0..45 {
            worker.position = Vec2::new(i as f32, 0.0);
            worker.record_position(40);
        }
        assert_eq!(worker.path_history.len(), 40);
        // Oldest five entries were dropped
        assert_eq!(worker.path_history.front().unwrap().x, 5.0);
        assert_eq!(worker.path_history.back().unwrap().x, 44.0);
    }

    #[test]
    fn test_battery_clamped() {
        let mut worker = Worker::new("Joel", 'J', Role::Welder, Vec2::default());
        worker.drain_battery(500.0);
        assert_eq!(worker.battery, 0.0);
        worker.charge_battery(500.0);
        assert_eq!(worker.battery, 100.0);
    }

    #[test]
    fn test_only_amr_is_robot() {
        assert!(Role::Amr.is_robot());
        assert!(!Role::Picker.is_robot());
        assert!(!Role::QaSpecialist.is_robot());
    }
}
