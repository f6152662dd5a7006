//! Dispatch - hands claimable orders to idle workers
//!
//! Claimable orders (pending, or failed-qa awaiting rework pickup) are
//! offered highest priority first, ties broken by age. Each goes to the
//! nearest idle worker whose role can take the work. Assignment maintains
//! the worker->order index; nothing here moves anyone.

use crate::core::types::{TaskId, WorkerId};
use crate::world::order::TaskKind;
use crate::world::worker::{Role, WorkerStatus};
use crate::world::World;

/// Whether a role can take a kind of work
pub fn eligible(role: Role, kind: TaskKind) -> bool {
    match kind {
        TaskKind::Receiving | TaskKind::Putaway => {
            matches!(role, Role::Forklift | Role::Amr)
        }
        TaskKind::Picking => matches!(role, Role::Picker | Role::Amr),
        TaskKind::Packing => matches!(role, Role::Picker),
        TaskKind::Shipping => matches!(role, Role::Forklift),
        TaskKind::Manufacturing => {
            matches!(role, Role::Welder | Role::Painter | Role::Assembler | Role::Amr)
        }
        TaskKind::QaInspection => matches!(role, Role::QaSpecialist),
    }
}

/// One dispatch pass; returns the (worker, order) pairs that were matched
pub fn run_dispatch(world: &mut World) -> Vec<(WorkerId, TaskId)> {
    let mut claimable: Vec<usize> = world
        .orders()
        .iter()
        .enumerate()
        .filter(|(_, o)| o.status.is_claimable() && o.assigned_to.is_none())
        .map(|(i, _)| i)
        .collect();
    if claimable.is_empty() {
        return Vec::new();
    }
    claimable.sort_by_key(|&i| {
        let order = &world.orders()[i];
        (std::cmp::Reverse(order.priority as u8), order.created_at)
    });

    let mut matched = Vec::new();
    for slot in claimable {
        let (task_id, kind, target) = {
            let order = &world.orders()[slot];
            (order.id, order.kind, order.target)
        };

        let candidate = world
            .workers
            .iter()
            .filter(|w| {
                w.status == WorkerStatus::Idle
                    && eligible(w.role, kind)
                    && world.active_order_of(w.id).is_none()
            })
            .min_by(|a, b| {
                a.position
                    .distance(&target)
                    .total_cmp(&b.position.distance(&target))
            })
            .map(|w| w.id);

        if let Some(worker_id) = candidate {
            // assign() cannot fail here: the slot came from the live list
            if world.assign(worker_id, task_id).is_ok() {
                tracing::debug!(?worker_id, ?task_id, "dispatched order");
                matched.push((worker_id, task_id));
            }
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::world::order::{Priority, TaskStatus, WorkOrder};
    use crate::world::WorldSeed;

    fn world_without_seed_orders() -> World {
        let mut seed = WorldSeed::default_layout();
        seed.orders.clear();
        World::from_seed(seed).unwrap()
    }

    #[test]
    fn test_role_eligibility() {
        assert!(eligible(Role::Forklift, TaskKind::Receiving));
        assert!(eligible(Role::Amr, TaskKind::Picking));
        assert!(eligible(Role::Welder, TaskKind::Manufacturing));
        assert!(!eligible(Role::QaSpecialist, TaskKind::Shipping));
        assert!(!eligible(Role::Picker, TaskKind::Manufacturing));
    }

    #[test]
    fn test_nearest_eligible_worker_claims() {
        let mut world = world_without_seed_orders();
        // A picking order near Rosa (the picker at 10,40)
        let task = world.push_order(WorkOrder::new(
            TaskKind::Picking,
            Vec2::new(12.0, 42.0),
            0,
            1000,
        ));

        let matched = run_dispatch(&mut world);
        assert_eq!(matched.len(), 1);
        let (worker_id, task_id) = matched[0];
        assert_eq!(task_id, task);
        let worker = world.worker(worker_id).unwrap();
        assert!(eligible(worker.role, TaskKind::Picking));
        assert_eq!(world.order(task).unwrap().status, TaskStatus::Assigned);
    }

    #[test]
    fn test_higher_priority_claims_first() {
        let mut world = world_without_seed_orders();
        // Two shipping orders, one forklift available (the other is offline)
        let low = world.push_order(
            WorkOrder::new(TaskKind::Shipping, Vec2::new(92.0, 40.0), 0, 1000)
                .with_priority(Priority::Low),
        );
        let critical = world.push_order(
            WorkOrder::new(TaskKind::Shipping, Vec2::new(92.0, 40.0), 0, 1000)
                .with_priority(Priority::Critical),
        );

        run_dispatch(&mut world);
        assert_eq!(world.order(critical).unwrap().status, TaskStatus::Assigned);
        assert_eq!(world.order(low).unwrap().status, TaskStatus::Pending);
    }

    #[test]
    fn test_offline_workers_never_claim() {
        let mut world = world_without_seed_orders();
        for worker in &mut world.workers {
            worker.status = WorkerStatus::Offline;
        }
        world.push_order(WorkOrder::new(
            TaskKind::Picking,
            Vec2::new(12.0, 42.0),
            0,
            1000,
        ));
        assert!(run_dispatch(&mut world).is_empty());
    }

    #[test]
    fn test_busy_worker_keeps_single_order() {
        let mut world = world_without_seed_orders();
        let first = world.push_order(WorkOrder::new(
            TaskKind::Picking,
            Vec2::new(12.0, 42.0),
            0,
            1000,
        ));
        run_dispatch(&mut world);
        let carrier = world.order(first).unwrap().assigned_to.unwrap();

        // A second picking order; the only other eligible workers are AMRs
        let second = world.push_order(WorkOrder::new(
            TaskKind::Picking,
            Vec2::new(12.0, 42.0),
            0,
            1000,
        ));
        run_dispatch(&mut world);
        let second_carrier = world.order(second).unwrap().assigned_to;
        assert_ne!(second_carrier, Some(carrier));
        assert_eq!(world.active_order_of(carrier), Some(first));
    }
}
