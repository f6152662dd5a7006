//! World model - the static floor layout and the mutable entities on it

pub mod order;
pub mod seed;
pub mod worker;
pub mod zone;

pub use order::{Priority, QualityCheck, Stage, TaskKind, TaskStatus, WorkOrder};
pub use seed::WorldSeed;
pub use worker::{Role, Worker, WorkerStatus};
pub use zone::{Zone, ZoneColor, ZoneId};

use ahash::AHashMap;

use crate::core::error::{FlowError, Result};
use crate::core::shift::ShiftClock;
use crate::core::types::{TaskId, Tick, WorkerId, FLOOR_BOUNDS};

/// The simulated floor: zones, workers, and work orders
///
/// The simulation clock is the sole writer of mutable state. Worker-order
/// association is kept in an incremental index (`assignments`) instead of a
/// per-tick scan over the order list, and orders are addressable by id
/// through `order_slots` (orders are appended, never removed, so slots stay
/// stable for the whole session).
pub struct World {
    pub current_tick: Tick,
    pub shift: ShiftClock,
    pub workers: Vec<Worker>,
    zones: Vec<Zone>,
    zone_slots: AHashMap<ZoneId, usize>,
    orders: Vec<WorkOrder>,
    order_slots: AHashMap<TaskId, usize>,
    assignments: AHashMap<WorkerId, TaskId>,
}

impl World {
    /// Build a world from seed data
    ///
    /// Seed data is validated here rather than trusted: the manufacturing
    /// pipeline needs every station to exist, and out-of-bounds spawn
    /// positions would violate the containment invariant from tick one.
    pub fn from_seed(seed: WorldSeed) -> Result<Self> {
        let mut zone_slots = AHashMap::new();
        for (i, zone) in seed.zones.iter().enumerate() {
            if zone_slots.insert(zone.id, i).is_some() {
                return Err(FlowError::InvalidSeed(format!(
                    "duplicate zone: {}",
                    zone.id.label()
                )));
            }
        }
        for required in [
            ZoneId::Welding,
            ZoneId::Paint,
            ZoneId::Assembly,
            ZoneId::Qa,
            ZoneId::Rework,
            ZoneId::Staging,
            ZoneId::ChargingBay,
        ] {
            if !zone_slots.contains_key(&required) {
                return Err(FlowError::InvalidSeed(format!(
                    "missing zone: {}",
                    required.label()
                )));
            }
        }

        let workers = seed.build_workers();
        for worker in &workers {
            if !FLOOR_BOUNDS.contains(worker.position) {
                return Err(FlowError::InvalidSeed(format!(
                    "worker {} spawns outside the floor",
                    worker.name
                )));
            }
            if worker.efficiency <= 0.0 {
                return Err(FlowError::InvalidSeed(format!(
                    "worker {} has non-positive efficiency",
                    worker.name
                )));
            }
        }

        let orders = seed.build_orders();
        let order_slots = orders
            .iter()
            .enumerate()
            .map(|(i, order)| (order.id, i))
            .collect();

        Ok(Self {
            current_tick: 0,
            shift: ShiftClock::new(),
            workers,
            zones: seed.zones,
            zone_slots,
            orders,
            order_slots,
            assignments: AHashMap::new(),
        })
    }

    /// Advance the tick counter and the shift clock
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
        self.shift.advance();
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Look up a station; presence of all stations is a construction invariant
    pub fn zone(&self, id: ZoneId) -> &Zone {
        &self.zones[self.zone_slots[&id]]
    }

    pub fn orders(&self) -> &[WorkOrder] {
        &self.orders
    }

    pub fn orders_mut(&mut self) -> &mut [WorkOrder] {
        &mut self.orders
    }

    pub fn order(&self, id: TaskId) -> Option<&WorkOrder> {
        self.order_slots.get(&id).map(|&i| &self.orders[i])
    }

    pub fn order_mut(&mut self, id: TaskId) -> Option<&mut WorkOrder> {
        let slot = self.order_slots.get(&id).copied()?;
        Some(&mut self.orders[slot])
    }

    pub fn order_slot(&self, id: TaskId) -> Option<usize> {
        self.order_slots.get(&id).copied()
    }

    /// Append a new order, keeping the id index current
    pub fn push_order(&mut self, order: WorkOrder) -> TaskId {
        let id = order.id;
        self.order_slots.insert(id, self.orders.len());
        self.orders.push(order);
        id
    }

    pub fn worker(&self, id: WorkerId) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }

    pub fn worker_mut(&mut self, id: WorkerId) -> Option<&mut Worker> {
        self.workers.iter_mut().find(|w| w.id == id)
    }

    /// The order currently attached to a worker, if any
    pub fn active_order_of(&self, worker: WorkerId) -> Option<TaskId> {
        self.assignments.get(&worker).copied()
    }

    pub fn assigned_worker_count(&self) -> usize {
        self.assignments.len()
    }

    /// Attach an order to a worker (one active order per worker)
    pub fn assign(&mut self, worker: WorkerId, task: TaskId) -> Result<()> {
        let now = self.current_tick;
        let order = self
            .order_mut(task)
            .ok_or(FlowError::OrderNotFound(task))?;
        order.assigned_to = Some(worker);
        order.status = TaskStatus::Assigned;
        order.quality = QualityCheck::Pending;
        order.last_moved = now;
        self.assignments.insert(worker, task);
        Ok(())
    }

    /// Detach a worker from its active order, if it has one
    pub fn unassign(&mut self, worker: WorkerId) {
        if let Some(task) = self.assignments.remove(&worker) {
            if let Some(order) = self.order_mut(task) {
                order.assigned_to = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;

    #[test]
    fn test_default_seed_builds() {
        let world = World::from_seed(WorldSeed::default_layout()).unwrap();
        assert!(world.workers.len() >= 8);
        assert!(!world.orders().is_empty());
        assert_eq!(world.zone(ZoneId::Qa).id, ZoneId::Qa);
    }

    #[test]
    fn test_missing_zone_rejected() {
        let mut seed = WorldSeed::default_layout();
        seed.zones.retain(|z| z.id != ZoneId::Paint);
        assert!(matches!(
            World::from_seed(seed),
            Err(FlowError::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_out_of_bounds_worker_rejected() {
        let mut seed = WorldSeed::default_layout();
        seed.workers[0].x = 250.0;
        assert!(World::from_seed(seed).is_err());
    }

    #[test]
    fn test_assignment_index_roundtrip() {
        let mut world = World::from_seed(WorldSeed::default_layout()).unwrap();
        let worker_id = world.workers[0].id;
        let task_id = world.push_order(WorkOrder::new(
            TaskKind::Picking,
            Vec2::new(10.0, 10.0),
            0,
            500,
        ));

        world.assign(worker_id, task_id).unwrap();
        assert_eq!(world.active_order_of(worker_id), Some(task_id));
        assert_eq!(world.order(task_id).unwrap().assigned_to, Some(worker_id));
        assert_eq!(world.order(task_id).unwrap().status, TaskStatus::Assigned);

        world.unassign(worker_id);
        assert_eq!(world.active_order_of(worker_id), None);
        assert_eq!(world.order(task_id).unwrap().assigned_to, None);
    }
}
