//! Tick system - orchestrates simulation updates
//!
//! This is the core loop that ties together:
//! telemetry drift -> dispatch -> motion/stage execution -> chart sampling
//! -> order injection -> bottleneck scan
//!
//! Each tick advances the floor one step, processing all workers. The clock
//! is the sole writer of worker/order state; everything returned is an event
//! for the dashboard log feed. Tick N is the Nth call (the counter advances
//! at the start of the tick).

use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::types::{TaskId, Tick, Vec2, FLOOR_BOUNDS};
use crate::simulation::dispatch::run_dispatch;
use crate::simulation::movement::{step_toward, StepResult};
use crate::simulation::pipeline::{roll_quality, stage_after_arrival, stage_destination};
use crate::simulation::scheduler::SimulationState;
use crate::simulation::telemetry::{decay_telemetry, scan_bottlenecks};
use crate::world::order::{QualityCheck, Stage, TaskKind, TaskStatus, WorkOrder};
use crate::world::worker::WorkerStatus;
use crate::world::zone::ZoneId;
use crate::world::World;

/// Events generated during a simulation tick
///
/// These events are returned by `run_simulation_tick` for the dashboard
/// log feed and for test traces.
#[derive(Debug, Clone)]
pub enum SimulationEvent {
    /// Dispatch matched a claimable order with an idle worker
    OrderAssigned { task_id: TaskId, worker: String },
    /// A non-manufacturing order's worker reached the job site
    TaskStarted {
        task_id: TaskId,
        kind: TaskKind,
        worker: String,
    },
    /// A manufacturing order advanced one pipeline stage
    StageAdvanced {
        task_id: TaskId,
        from: Stage,
        to: Stage,
        worker: String,
    },
    /// A QA inspection resolved
    QualityChecked {
        task_id: TaskId,
        outcome: QualityCheck,
    },
    /// An order finished (staging for manufacturing, in place otherwise)
    OrderCompleted { task_id: TaskId, kind: TaskKind },
    /// The clock synthesized a new manufacturing order at Welding
    OrderInjected { task_id: TaskId, ship_deadline: Tick },
    /// An AMR dropped below the battery threshold and heads to the bay
    WorkerCharging { worker: String },
    /// An active order has not moved past the stall threshold
    BottleneckDetected { task_id: TaskId, stalled_for: Tick },
    /// User action: order bumped to critical priority
    OrderExpedited { task_id: TaskId },
    /// User action: message sent to a worker's device
    WorkerMessaged { worker: String },
}

/// Run a single simulation tick
///
/// Phases, in order:
/// 1. Advance the tick counter and shift clock
/// 2. Telemetry drift (battery cadence, signal jitter, trails)
/// 3. Dispatch claimable orders to idle workers
/// 4. Per-worker motion and stage/task execution
/// 5. Chart sample every `chart_interval` ticks
/// 6. Probabilistic order injection every `injection_interval` ticks
/// 7. Bottleneck scan every `bottleneck_scan_interval` ticks
pub fn run_simulation_tick(
    state: &mut SimulationState,
    config: &SimulationConfig,
) -> Vec<SimulationEvent> {
    let mut events = Vec::new();

    state.world.advance_tick();

    decay_telemetry(&mut state.world, config, &mut state.rng);

    for (worker_id, task_id) in run_dispatch(&mut state.world) {
        let worker = state
            .world
            .worker(worker_id)
            .map(|w| w.name.clone())
            .unwrap_or_default();
        events.push(SimulationEvent::OrderAssigned { task_id, worker });
    }

    step_workers(&mut state.world, config, &mut state.rng, &mut events);

    let tick = state.world.current_tick;

    if tick % config.chart_interval == 0 {
        let label = state.world.shift.time_label();
        state.chart.sample(&mut state.rng, config, label);
    }

    if tick % config.injection_interval == 0 && state.rng.gen_bool(config.injection_chance) {
        events.push(inject_order(&mut state.world, config));
    }

    if tick % config.bottleneck_scan_interval == 0 {
        for alert in scan_bottlenecks(&state.world, config) {
            events.push(SimulationEvent::BottleneckDetected {
                task_id: alert.task_id,
                stalled_for: alert.stalled_for,
            });
            state.push_alert(alert, config.max_alerts);
        }
    }

    events
}

/// Synthesize a new manufacturing order at the Welding station
fn inject_order(world: &mut World, config: &SimulationConfig) -> SimulationEvent {
    let now = world.current_tick;
    let entry = world.zone(ZoneId::Welding).entry_point();
    let ship_deadline = now + config.injection_deadline_ticks;
    let task_id = world.push_order(WorkOrder::manufacturing(entry, now, ship_deadline));
    tracing::info!(?task_id, ship_deadline, "injected manufacturing order");
    SimulationEvent::OrderInjected {
        task_id,
        ship_deadline,
    }
}

/// Motion and task execution for every worker
fn step_workers<R: Rng>(
    world: &mut World,
    config: &SimulationConfig,
    rng: &mut R,
    events: &mut Vec<SimulationEvent>,
) {
    for wi in 0..world.workers.len() {
        if world.workers[wi].status == WorkerStatus::Offline {
            continue;
        }
        let worker_id = world.workers[wi].id;
        match world.active_order_of(worker_id) {
            None => idle_step(world, wi, config, rng, events),
            Some(task_id) => work_step(world, wi, task_id, config, rng, events),
        }
    }
}

/// Idle-wander for humans; battery management for AMRs
fn idle_step<R: Rng>(
    world: &mut World,
    wi: usize,
    config: &SimulationConfig,
    rng: &mut R,
    events: &mut Vec<SimulationEvent>,
) {
    let charging_entry = world.zone(ZoneId::ChargingBay).entry_point();
    let worker = &mut world.workers[wi];

    if worker.role.is_robot() {
        if worker.status == WorkerStatus::Charging {
            match step_toward(worker.position, charging_entry, worker.effective_speed()) {
                StepResult::Moved(next) => worker.position = next,
                StepResult::Arrived => {
                    worker.charge_battery(config.charge_rate);
                    if worker.battery >= 100.0 {
                        worker.status = WorkerStatus::Idle;
                    }
                }
            }
        } else if worker.battery < config.low_battery_threshold {
            worker.status = WorkerStatus::Charging;
            tracing::debug!(name = %worker.name, battery = worker.battery, "low battery");
            events.push(SimulationEvent::WorkerCharging {
                worker: worker.name.clone(),
            });
        } else {
            worker.status = WorkerStatus::Idle;
        }
    } else {
        worker.status = WorkerStatus::Idle;
        if rng.gen_bool(config.wander_chance) {
            let dx = rng.gen_range(-config.wander_step..=config.wander_step);
            let dy = rng.gen_range(-config.wander_step..=config.wander_step);
            worker.position = (worker.position + Vec2::new(dx, dy)).clamp_to(&FLOOR_BOUNDS);
        }
    }
}

/// One movement/execution step for a worker with an active order
fn work_step<R: Rng>(
    world: &mut World,
    wi: usize,
    task_id: TaskId,
    config: &SimulationConfig,
    rng: &mut R,
    events: &mut Vec<SimulationEvent>,
) {
    let Some(slot) = world.order_slot(task_id) else {
        return;
    };

    // Manufacturing orders walk toward their stage's destination zone;
    // everything else walks to the order's stored coordinate.
    let target = match world.orders()[slot].stage {
        Some(stage) => match stage_destination(stage) {
            Some(zone) => world.zone(zone).entry_point(),
            None => {
                resolve_inspection(world, wi, slot, rng, config, events);
                return;
            }
        },
        None => world.orders()[slot].target,
    };

    let position = world.workers[wi].position;
    let speed = world.workers[wi].effective_speed();

    match step_toward(position, target, speed) {
        StepResult::Moved(next) => {
            let now = world.current_tick;
            let worker = &mut world.workers[wi];
            worker.position = next;
            worker.status = WorkerStatus::Busy;
            world.orders_mut()[slot].last_moved = now;
        }
        StepResult::Arrived => handle_arrival(world, wi, slot, rng, config, events),
    }
}

/// Apply arrival effects: stage transitions for manufacturing orders,
/// start/complete for everything else
fn handle_arrival<R: Rng>(
    world: &mut World,
    wi: usize,
    slot: usize,
    rng: &mut R,
    config: &SimulationConfig,
    events: &mut Vec<SimulationEvent>,
) {
    let now = world.current_tick;
    match world.orders()[slot].stage {
        Some(stage) => {
            let Some(dest) = stage_destination(stage) else {
                return;
            };
            // The transition fires on actual zone containment, not just
            // proximity to the entry point
            if !world.zone(dest).contains(world.workers[wi].position) {
                return;
            }
            let Some(next) = stage_after_arrival(stage) else {
                return;
            };
            // Entering QA means a fresh inspection roll
            let inspection =
                (next == Stage::Qa).then(|| roll_quality(rng, config.quality_pass_rate));

            let task_id = {
                let order = &mut world.orders_mut()[slot];
                order.stage = Some(next);
                if order.status == TaskStatus::Assigned {
                    order.status = TaskStatus::InProgress;
                }
                if let Some(quality) = inspection {
                    order.quality = quality;
                }
                order.last_moved = now;
                order.id
            };

            let worker = world.workers[wi].name.clone();
            tracing::debug!(?task_id, from = ?stage, to = ?next, "stage advanced");
            events.push(SimulationEvent::StageAdvanced {
                task_id,
                from: stage,
                to: next,
                worker,
            });
        }
        None => non_manufacturing_arrival(world, wi, slot, rng, config, events),
    }
}

fn non_manufacturing_arrival<R: Rng>(
    world: &mut World,
    wi: usize,
    slot: usize,
    rng: &mut R,
    config: &SimulationConfig,
    events: &mut Vec<SimulationEvent>,
) {
    let now = world.current_tick;
    let worker_id = world.workers[wi].id;

    match world.orders()[slot].status {
        TaskStatus::Assigned => {
            let (task_id, kind) = {
                let order = &mut world.orders_mut()[slot];
                order.status = TaskStatus::InProgress;
                order.last_moved = now;
                (order.id, order.kind)
            };
            events.push(SimulationEvent::TaskStarted {
                task_id,
                kind,
                worker: world.workers[wi].name.clone(),
            });
        }
        TaskStatus::InProgress => {
            if rng.gen_bool(config.completion_chance) {
                let (task_id, kind) = {
                    let order = &mut world.orders_mut()[slot];
                    order.status = TaskStatus::Completed;
                    order.last_moved = now;
                    (order.id, order.kind)
                };
                world.unassign(worker_id);
                world.workers[wi].status = WorkerStatus::Idle;
                tracing::debug!(?task_id, "order completed");
                events.push(SimulationEvent::OrderCompleted { task_id, kind });
            }
        }
        TaskStatus::Pending | TaskStatus::Completed | TaskStatus::FailedQa => {}
    }
}

/// Resolve a QA-stage order in place from its inspection outcome
fn resolve_inspection<R: Rng>(
    world: &mut World,
    wi: usize,
    slot: usize,
    rng: &mut R,
    config: &SimulationConfig,
    events: &mut Vec<SimulationEvent>,
) {
    let now = world.current_tick;
    let worker_id = world.workers[wi].id;
    let staging_entry = world.zone(ZoneId::Staging).entry_point();

    let (task_id, outcome) = {
        let order = &mut world.orders_mut()[slot];
        if order.stage != Some(Stage::Qa) {
            return;
        }
        if order.quality == QualityCheck::Pending {
            // Orders seeded directly at QA get their roll here
            order.quality = roll_quality(rng, config.quality_pass_rate);
        }
        (order.id, order.quality)
    };

    match outcome {
        QualityCheck::Pass => {
            {
                let order = &mut world.orders_mut()[slot];
                order.stage = Some(Stage::Staging);
                order.status = TaskStatus::Completed;
                order.target = staging_entry;
                order.last_moved = now;
            }
            world.unassign(worker_id);
            world.workers[wi].status = WorkerStatus::Idle;
            tracing::info!(?task_id, "order passed QA, staged");
            events.push(SimulationEvent::QualityChecked { task_id, outcome });
            events.push(SimulationEvent::OrderCompleted {
                task_id,
                kind: TaskKind::Manufacturing,
            });
        }
        QualityCheck::Fail => {
            {
                let order = &mut world.orders_mut()[slot];
                order.stage = Some(Stage::Rework);
                order.status = TaskStatus::FailedQa;
                order.last_moved = now;
            }
            world.unassign(worker_id);
            world.workers[wi].status = WorkerStatus::Idle;
            tracing::info!(?task_id, "order failed QA, routed to rework");
            events.push(SimulationEvent::QualityChecked { task_id, outcome });
        }
        QualityCheck::Pending => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::scheduler::SimulationState;
    use crate::world::worker::Role;
    use crate::world::WorldSeed;

    fn quiet_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.injection_chance = 0.0;
        config
    }

    fn empty_state(config: &SimulationConfig) -> SimulationState {
        let mut seed = WorldSeed::default_layout();
        seed.orders.clear();
        SimulationState::new(World::from_seed(seed).unwrap(), config)
    }

    #[test]
    fn test_workers_stay_on_the_floor() {
        let config = quiet_config();
        let mut state = empty_state(&config);
        for _ in 0..500 {
            run_simulation_tick(&mut state, &config);
            for worker in &state.world.workers {
                assert!(FLOOR_BOUNDS.contains(worker.position), "{}", worker.name);
            }
        }
    }

    #[test]
    fn test_idle_crew_reports_idle() {
        let config = quiet_config();
        let mut state = empty_state(&config);
        run_simulation_tick(&mut state, &config);
        for worker in &state.world.workers {
            match worker.status {
                WorkerStatus::Idle | WorkerStatus::Offline => {}
                other => panic!("{} should be idle, is {:?}", worker.name, other),
            }
        }
    }

    #[test]
    fn test_injection_cadence() {
        let mut config = quiet_config();
        config.injection_chance = 1.0;
        let mut state = empty_state(&config);

        let mut injected_at = Vec::new();
        for _ in 0..150 {
            for event in run_simulation_tick(&mut state, &config) {
                if let SimulationEvent::OrderInjected { .. } = event {
                    injected_at.push(state.world.current_tick);
                }
            }
        }
        assert_eq!(injected_at, vec![50, 100, 150]);
    }

    #[test]
    fn test_chart_samples_on_cadence() {
        let config = quiet_config();
        let mut state = empty_state(&config);
        for _ in 0..100 {
            run_simulation_tick(&mut state, &config);
        }
        assert_eq!(state.chart.len(), 5);
    }

    #[test]
    fn test_amr_charging_cycle() {
        let mut config = quiet_config();
        config.wander_chance = 0.0;
        config.charge_rate = 5.0;
        let mut state = empty_state(&config);

        let amr_idx = state
            .world
            .workers
            .iter()
            .position(|w| w.role == Role::Amr)
            .unwrap();
        state.world.workers[amr_idx].battery = 5.0;

        let mut saw_charging = false;
        for _ in 0..2000 {
            run_simulation_tick(&mut state, &config);
            let amr = &state.world.workers[amr_idx];
            if amr.status == WorkerStatus::Charging {
                saw_charging = true;
            }
            if saw_charging && amr.status == WorkerStatus::Idle {
                assert!(amr.battery >= config.low_battery_threshold);
                return;
            }
        }
        panic!("AMR never completed a charging cycle");
    }

    #[test]
    fn test_completed_orders_release_their_worker() {
        let mut config = quiet_config();
        config.completion_chance = 1.0;
        let mut state = empty_state(&config);

        let task = state.world.push_order(WorkOrder::new(
            TaskKind::Picking,
            Vec2::new(12.0, 42.0),
            0,
            2000,
        ));

        for _ in 0..300 {
            run_simulation_tick(&mut state, &config);
            if state.world.order(task).unwrap().status == TaskStatus::Completed {
                assert!(state.world.order(task).unwrap().assigned_to.is_none());
                assert_eq!(state.world.assigned_worker_count(), 0);
                return;
            }
        }
        panic!("picking order never completed");
    }
}
