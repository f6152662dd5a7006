//! Detail panel projections for the selected worker or order

use crate::core::config::SimulationConfig;
use crate::core::shift::ShiftClock;
use crate::core::types::{TaskId, WorkerId};
use crate::ui::state::short_id;
use crate::world::order::{QualityCheck, TaskKind, TaskStatus};
use crate::world::worker::{Role, WorkerStatus};
use crate::world::World;

/// Live telemetry card for a selected worker
#[derive(Debug, Clone)]
pub struct WorkerDetail {
    pub name: String,
    pub role: &'static str,
    pub status: WorkerStatus,
    /// 0-1 ratios for the gauges
    pub battery: f64,
    pub signal: f64,
    pub efficiency: f32,
    /// Assigned device type shown under the gauges
    pub device: &'static str,
    pub current_order: Option<String>,
}

/// Work-order card for a selected order
#[derive(Debug, Clone)]
pub struct OrderDetail {
    pub title: String,
    pub kind: TaskKind,
    pub status: TaskStatus,
    pub stage: Option<&'static str>,
    /// Pipeline progress ratio for the stage bar (manufacturing only)
    pub progress: Option<f64>,
    pub quality: QualityCheck,
    pub priority: crate::world::order::Priority,
    /// Seconds until the ship deadline (zero once late)
    pub deadline_secs: u64,
    pub late: bool,
    pub stalled: bool,
    pub assigned_to: Option<String>,
}

pub fn worker_detail(world: &World, id: WorkerId) -> Option<WorkerDetail> {
    let worker = world.worker(id)?;
    let device = match worker.role {
        Role::Amr => "Onboard controller",
        Role::Forklift => "Vehicle terminal",
        _ => "Handheld scanner",
    };
    let current_order = world.active_order_of(id).map(short_id);
    Some(WorkerDetail {
        name: worker.name.clone(),
        role: worker.role.label(),
        status: worker.status,
        battery: f64::from(worker.battery) / 100.0,
        signal: f64::from(worker.signal) / 100.0,
        efficiency: worker.efficiency,
        device,
        current_order,
    })
}

pub fn order_detail(world: &World, config: &SimulationConfig, id: TaskId) -> Option<OrderDetail> {
    let order = world.order(id)?;
    let now = world.current_tick;
    let assigned_to = order
        .assigned_to
        .and_then(|w| world.worker(w))
        .map(|w| w.name.clone());
    Some(OrderDetail {
        title: short_id(order.id),
        kind: order.kind,
        status: order.status,
        stage: order.stage.map(|s| s.label()),
        progress: order
            .stage
            .map(|s| f64::from(s.progress_steps()) / 5.0),
        quality: order.quality,
        priority: order.priority,
        deadline_secs: ShiftClock::span_secs(order.deadline_remaining(now)),
        late: order.is_late(now),
        stalled: order.is_stalled(now, config.stall_threshold),
        assigned_to,
    })
}
