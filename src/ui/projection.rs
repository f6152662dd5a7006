//! Map projection - world state flattened into drawable markers

use crate::core::config::SimulationConfig;
use crate::core::types::{TaskId, Vec2, WorkerId};
use crate::simulation::pipeline::stage_destination;
use crate::ui::state::Selection;
use crate::world::order::{Stage, TaskStatus};
use crate::world::worker::WorkerStatus;
use crate::world::zone::{Zone, ZoneColor};
use crate::world::World;

/// Marker coloring for order urgency on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerUrgency {
    Normal,
    /// Past its ship deadline
    Late,
    /// Has not moved past the stall threshold
    Stalled,
}

#[derive(Debug, Clone)]
pub struct ZoneShape {
    pub label: &'static str,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: ZoneColor,
}

#[derive(Debug, Clone)]
pub struct WorkerMarker {
    pub id: WorkerId,
    pub position: Vec2,
    pub glyph: char,
    pub is_robot: bool,
    pub status: WorkerStatus,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct OrderMarker {
    pub id: TaskId,
    pub position: Vec2,
    pub urgency: MarkerUrgency,
    pub stage: Option<Stage>,
    pub selected: bool,
}

/// Indicator line from a busy worker to its current target
#[derive(Debug, Clone)]
pub struct HeadingLine {
    pub from: Vec2,
    pub to: Vec2,
}

/// Everything the map widget draws, in draw order
#[derive(Debug, Clone)]
pub struct MapView {
    pub zones: Vec<ZoneShape>,
    pub headings: Vec<HeadingLine>,
    pub orders: Vec<OrderMarker>,
    pub workers: Vec<WorkerMarker>,
    /// Trail of the selected worker, oldest first
    pub trail: Vec<Vec2>,
}

/// Stall beats late beats normal
pub fn classify_order(
    order: &crate::world::order::WorkOrder,
    now: crate::core::types::Tick,
    config: &SimulationConfig,
) -> MarkerUrgency {
    if order.is_stalled(now, config.stall_threshold) {
        MarkerUrgency::Stalled
    } else if order.is_late(now) {
        MarkerUrgency::Late
    } else {
        MarkerUrgency::Normal
    }
}

/// Project the world into a drawable map snapshot
pub fn build_map_view(
    world: &World,
    config: &SimulationConfig,
    selection: Option<Selection>,
) -> MapView {
    let now = world.current_tick;

    let zones = world
        .zones()
        .iter()
        .map(|zone: &Zone| ZoneShape {
            label: zone.id.label(),
            x: zone.rect.x,
            y: zone.rect.y,
            width: zone.rect.width,
            height: zone.rect.height,
            color: zone.color,
        })
        .collect();

    // Completed orders drop out of active rendering
    let orders = world
        .orders()
        .iter()
        .filter(|order| order.status != TaskStatus::Completed)
        .map(|order| OrderMarker {
            id: order.id,
            position: order.target,
            urgency: classify_order(order, now, config),
            stage: order.stage,
            selected: selection == Some(Selection::Order(order.id)),
        })
        .collect();

    let mut headings = Vec::new();
    for worker in &world.workers {
        if worker.status != WorkerStatus::Busy {
            continue;
        }
        let Some(task_id) = world.active_order_of(worker.id) else {
            continue;
        };
        let Some(order) = world.order(task_id) else {
            continue;
        };
        let target = match order.stage.and_then(stage_destination) {
            Some(zone) => world.zone(zone).entry_point(),
            None => order.target,
        };
        headings.push(HeadingLine {
            from: worker.position,
            to: target,
        });
    }

    let workers = world
        .workers
        .iter()
        .map(|worker| WorkerMarker {
            id: worker.id,
            position: worker.position,
            glyph: worker.avatar,
            is_robot: worker.role.is_robot(),
            status: worker.status,
            selected: selection == Some(Selection::Worker(worker.id)),
        })
        .collect();

    let trail = match selection {
        Some(Selection::Worker(id)) => world
            .worker(id)
            .map(|w| w.path_history.iter().copied().collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    MapView {
        zones,
        headings,
        orders,
        workers,
        trail,
    }
}
