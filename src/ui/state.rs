//! UI state: selection and the dashboard log feed

use std::collections::VecDeque;

use crate::core::shift::ShiftClock;
use crate::core::types::{TaskId, Tick, WorkerId};
use crate::simulation::tick::SimulationEvent;
use crate::world::order::QualityCheck;
use crate::world::{TaskStatus, World};

/// Maximum log entries to keep
const MAX_LOG_ENTRIES: usize = 50;

/// What the detail panel is focused on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Worker(WorkerId),
    Order(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Info,
    Warn,
    Success,
}

/// An entry in the dashboard log feed
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub tick: Tick,
    /// Shift wall-clock label at emission time
    pub time: String,
    pub message: String,
    pub category: LogCategory,
}

/// Dashboard-side state (never consulted by the clock)
#[derive(Debug, Default)]
pub struct UiState {
    pub selection: Option<Selection>,
    /// Most recent entry first
    pub log: VecDeque<LogEntry>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            selection: None,
            log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        }
    }

    /// Prepend an entry, dropping the oldest past the cap
    pub fn push_log(&mut self, tick: Tick, message: String, category: LogCategory) {
        self.log.push_front(LogEntry {
            tick,
            time: ShiftClock::label_at(tick),
            message,
            category,
        });
        self.log.truncate(MAX_LOG_ENTRIES);
    }

    /// Convert a tick's events into log entries
    pub fn apply_events(&mut self, tick: Tick, events: &[SimulationEvent]) {
        for event in events {
            let (message, category) = format_event(event);
            self.push_log(tick, message, category);
        }
    }

    /// Cycle selection through the worker list
    pub fn select_next_worker(&mut self, world: &World) {
        if world.workers.is_empty() {
            return;
        }
        let current = match self.selection {
            Some(Selection::Worker(id)) => world.workers.iter().position(|w| w.id == id),
            _ => None,
        };
        let next = current.map(|i| (i + 1) % world.workers.len()).unwrap_or(0);
        self.selection = Some(Selection::Worker(world.workers[next].id));
    }

    /// Cycle selection through non-completed orders
    pub fn select_next_order(&mut self, world: &World) {
        let active: Vec<TaskId> = world
            .orders()
            .iter()
            .filter(|o| o.status != TaskStatus::Completed)
            .map(|o| o.id)
            .collect();
        if active.is_empty() {
            return;
        }
        let current = match self.selection {
            Some(Selection::Order(id)) => active.iter().position(|&a| a == id),
            _ => None,
        };
        let next = current.map(|i| (i + 1) % active.len()).unwrap_or(0);
        self.selection = Some(Selection::Order(active[next]));
    }

    pub fn deselect(&mut self) {
        self.selection = None;
    }
}

/// Short printable form of an order id
pub fn short_id(id: TaskId) -> String {
    let text = id.0.simple().to_string();
    format!("WO-{}", &text[..6].to_uppercase())
}

fn format_event(event: &SimulationEvent) -> (String, LogCategory) {
    match event {
        SimulationEvent::OrderAssigned { task_id, worker } => (
            format!("{} assigned to {}", short_id(*task_id), worker),
            LogCategory::Info,
        ),
        SimulationEvent::TaskStarted { task_id, kind, worker } => (
            format!("{} started {} {}", worker, kind.label(), short_id(*task_id)),
            LogCategory::Info,
        ),
        SimulationEvent::StageAdvanced { task_id, to, worker, .. } => (
            format!("{} moved {} into {}", worker, short_id(*task_id), to.label()),
            LogCategory::Info,
        ),
        SimulationEvent::QualityChecked { task_id, outcome } => match outcome {
            QualityCheck::Fail => (
                format!("{} failed inspection, sent to rework", short_id(*task_id)),
                LogCategory::Warn,
            ),
            _ => (
                format!("{} passed inspection", short_id(*task_id)),
                LogCategory::Success,
            ),
        },
        SimulationEvent::OrderCompleted { task_id, kind } => (
            format!("{} {} completed", kind.label(), short_id(*task_id)),
            LogCategory::Success,
        ),
        SimulationEvent::OrderInjected { task_id, .. } => (
            format!("New manufacturing order {} at Welding", short_id(*task_id)),
            LogCategory::Info,
        ),
        SimulationEvent::WorkerCharging { worker } => (
            format!("{} heading to charging bay", worker),
            LogCategory::Warn,
        ),
        SimulationEvent::BottleneckDetected { task_id, stalled_for } => (
            format!(
                "{} stalled for {}s",
                short_id(*task_id),
                ShiftClock::span_secs(*stalled_for)
            ),
            LogCategory::Warn,
        ),
        SimulationEvent::OrderExpedited { task_id } => (
            format!("{} expedited to critical", short_id(*task_id)),
            LogCategory::Warn,
        ),
        SimulationEvent::WorkerMessaged { worker } => {
            (format!("Message sent to {}", worker), LogCategory::Info)
        }
    }
}
