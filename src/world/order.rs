//! Work orders - trackable units of simulated work
//!
//! Orders are seeded at startup and injected periodically by the clock.
//! Manufacturing orders additionally carry a pipeline stage and a quality
//! outcome; their lifecycle ends at `Completed` (they stay in the list for
//! the session but drop out of active rendering).

use serde::{Deserialize, Serialize};

use crate::core::types::{TaskId, Tick, Vec2, WorkerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Receiving,
    Putaway,
    Picking,
    Packing,
    Shipping,
    Manufacturing,
    QaInspection,
}

impl TaskKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Receiving => "Receiving",
            TaskKind::Putaway => "Putaway",
            TaskKind::Picking => "Picking",
            TaskKind::Packing => "Packing",
            TaskKind::Shipping => "Shipping",
            TaskKind::Manufacturing => "Manufacturing",
            TaskKind::QaInspection => "QA Inspection",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    FailedQa,
}

impl TaskStatus {
    /// Orders in these states are attached to a worker and advance each tick
    pub fn is_active(&self) -> bool {
        matches!(self, TaskStatus::Assigned | TaskStatus::InProgress)
    }

    /// Orders in these states are waiting for dispatch to hand them out
    pub fn is_claimable(&self) -> bool {
        matches!(self, TaskStatus::Pending | TaskStatus::FailedQa)
    }
}

/// Priority levels with explicit ordering values
///
/// Higher numeric value = claimed earlier by dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Priority {
    Low = 0,
    Normal = 1,
    High = 2,
    Critical = 3,
}

/// Manufacturing pipeline stages, in flow order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Welding,
    Paint,
    Assembly,
    Qa,
    Rework,
    Staging,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Welding => "Welding",
            Stage::Paint => "Paint",
            Stage::Assembly => "Assembly",
            Stage::Qa => "QA",
            Stage::Rework => "Rework",
            Stage::Staging => "Staging",
        }
    }

    /// Completed pipeline steps out of five, for the detail-panel progress bar
    ///
    /// Rework renders at the QA step; the quality flag tells the two apart.
    pub fn progress_steps(&self) -> u8 {
        match self {
            Stage::Welding => 1,
            Stage::Paint => 2,
            Stage::Assembly => 3,
            Stage::Qa => 4,
            Stage::Rework => 4,
            Stage::Staging => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityCheck {
    Pending,
    Pass,
    Fail,
}

/// A trackable unit of simulated work
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: TaskId,
    pub kind: TaskKind,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assigned_to: Option<WorkerId>,
    /// Where the work happens; for manufacturing orders the stage
    /// destination zone overrides this while the pipeline runs
    pub target: Vec2,
    pub created_at: Tick,
    pub ship_deadline: Tick,
    /// Refreshed whenever the carrying worker moves or the stage advances
    pub last_moved: Tick,
    /// Manufacturing orders only
    pub stage: Option<Stage>,
    pub quality: QualityCheck,
}

impl WorkOrder {
    pub fn new(kind: TaskKind, target: Vec2, created_at: Tick, ship_deadline: Tick) -> Self {
        Self {
            id: TaskId::new(),
            kind,
            status: TaskStatus::Pending,
            priority: Priority::Normal,
            assigned_to: None,
            target,
            created_at,
            ship_deadline,
            last_moved: created_at,
            stage: None,
            quality: QualityCheck::Pending,
        }
    }

    /// A manufacturing order entering the pipeline at Welding
    pub fn manufacturing(target: Vec2, created_at: Tick, ship_deadline: Tick) -> Self {
        let mut order = Self::new(TaskKind::Manufacturing, target, created_at, ship_deadline);
        order.stage = Some(Stage::Welding);
        order
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn is_late(&self, now: Tick) -> bool {
        now > self.ship_deadline
    }

    pub fn is_stalled(&self, now: Tick, threshold: Tick) -> bool {
        self.status.is_active() && now.saturating_sub(self.last_moved) > threshold
    }

    /// Countdown to the ship deadline, in ticks (zero once late)
    pub fn deadline_remaining(&self, now: Tick) -> Tick {
        self.ship_deadline.saturating_sub(now)
    }
}
