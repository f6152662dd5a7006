//! Worker telemetry drift and the derived dashboard feeds
//!
//! Battery drains on a fixed cadence, signal strength jitters, and every
//! worker's trail is extended each tick. The throughput chart and the
//! bottleneck-alert ring are bounded, append-only projections of the same
//! tick stream.

use rand::Rng;
use serde::Serialize;
use std::collections::VecDeque;

use crate::core::config::SimulationConfig;
use crate::core::types::{TaskId, Tick};
use crate::world::worker::WorkerStatus;
use crate::world::World;

/// Per-tick telemetry pass over all workers
///
/// Offline workers are skipped entirely; their gauges freeze at the last
/// reported values.
pub fn decay_telemetry<R: Rng>(world: &mut World, config: &SimulationConfig, rng: &mut R) {
    let tick = world.current_tick;
    let drain_due = tick % config.battery_drain_interval == 0;

    for worker in &mut world.workers {
        if worker.status == WorkerStatus::Offline {
            continue;
        }

        if drain_due && worker.battery > 0.0 && worker.status != WorkerStatus::Charging {
            worker.drain_battery(1.0);
        }

        if rng.gen_bool(config.signal_resample_chance) {
            worker.signal = rng.gen_range(config.signal_floor..=100.0);
        }

        worker.record_position(config.path_history_cap);
    }
}

/// One point of the units-per-hour series
#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    /// Shift wall-clock label at sampling time
    pub label: String,
    pub value: f32,
}

/// Rolling units-per-hour gauge rendered behind a constant target line
///
/// The window is fixed-length: the oldest point is evicted exactly when a
/// new one is appended.
#[derive(Debug, Clone, Serialize)]
pub struct ThroughputSeries {
    points: VecDeque<ChartPoint>,
    window: usize,
    last_value: f32,
}

impl ThroughputSeries {
    pub fn new(window: usize, initial_value: f32) -> Self {
        Self {
            points: VecDeque::with_capacity(window),
            window,
            last_value: initial_value,
        }
    }

    /// Append the next random-walk sample
    pub fn sample<R: Rng>(&mut self, rng: &mut R, config: &SimulationConfig, label: String) {
        let step = rng.gen_range(-config.chart_step..=config.chart_step);
        let value = (self.last_value + step).clamp(config.chart_min, config.chart_max);
        self.last_value = value;
        if self.points.len() == self.window {
            self.points.pop_front();
        }
        self.points.push_back(ChartPoint { label, value });
    }

    pub fn points(&self) -> impl Iterator<Item = &ChartPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn latest(&self) -> Option<&ChartPoint> {
        self.points.back()
    }
}

/// A stalled order surfaced to the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct BottleneckAlert {
    pub tick: Tick,
    pub task_id: TaskId,
    /// Ticks since the order last moved
    pub stalled_for: Tick,
    pub message: String,
}

/// Collect alerts for every currently stalled active order
pub fn scan_bottlenecks(world: &World, config: &SimulationConfig) -> Vec<BottleneckAlert> {
    let now = world.current_tick;
    world
        .orders()
        .iter()
        .filter(|order| order.is_stalled(now, config.stall_threshold))
        .map(|order| {
            let stalled_for = now.saturating_sub(order.last_moved);
            BottleneckAlert {
                tick: now,
                task_id: order.id,
                stalled_for,
                message: format!(
                    "{} order has not moved for {}s",
                    order.kind.label(),
                    crate::core::shift::ShiftClock::span_secs(stalled_for)
                ),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::world::order::{TaskKind, TaskStatus, WorkOrder};
    use crate::world::WorldSeed;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_battery_drains_on_cadence_only() {
        let mut world = World::from_seed(WorldSeed::default_layout()).unwrap();
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let before = world.workers[0].battery;
        world.current_tick = 49;
        decay_telemetry(&mut world, &config, &mut rng);
        assert_eq!(world.workers[0].battery, before);

        world.current_tick = 50;
        decay_telemetry(&mut world, &config, &mut rng);
        assert_eq!(world.workers[0].battery, before - 1.0);
    }

    #[test]
    fn test_offline_workers_freeze() {
        let mut world = World::from_seed(WorldSeed::default_layout()).unwrap();
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let offline_idx = world
            .workers
            .iter()
            .position(|w| w.status == WorkerStatus::Offline)
            .unwrap();
        let before = world.workers[offline_idx].clone();

        world.current_tick = 50;
        for _ in 0..100 {
            decay_telemetry(&mut world, &config, &mut rng);
        }
        let after = &world.workers[offline_idx];
        assert_eq!(after.battery, before.battery);
        assert_eq!(after.signal, before.signal);
        assert!(after.path_history.is_empty());
    }

    #[test]
    fn test_signal_stays_in_range() {
        let mut world = World::from_seed(WorldSeed::default_layout()).unwrap();
        let mut config = SimulationConfig::default();
        config.signal_resample_chance = 1.0;
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..200 {
            decay_telemetry(&mut world, &config, &mut rng);
            for worker in &world.workers {
                assert!((0.0..=100.0).contains(&worker.signal));
            }
        }
    }

    #[test]
    fn test_chart_window_eviction() {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut series = ThroughputSeries::new(5, 120.0);

        for i in 0..12 {
            series.sample(&mut rng, &config, format!("t{}", i));
            assert!(series.len() <= 5);
        }
        assert_eq!(series.len(), 5);
        // Oldest labels were evicted in order
        assert_eq!(series.points().next().unwrap().label, "t7");
        assert_eq!(series.latest().unwrap().label, "t11");
    }

    #[test]
    fn test_chart_values_clamped() {
        let mut config = SimulationConfig::default();
        config.chart_step = 500.0;
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut series = ThroughputSeries::new(10, 120.0);

        for i in 0..50 {
            series.sample(&mut rng, &config, format!("t{}", i));
        }
        for point in series.points() {
            assert!((config.chart_min..=config.chart_max).contains(&point.value));
        }
    }

    #[test]
    fn test_bottleneck_scan_flags_stalled_orders() {
        let mut world = World::from_seed(WorldSeed::default_layout()).unwrap();
        let config = SimulationConfig::default();

        let stalled = world.push_order(WorkOrder::new(
            TaskKind::Picking,
            Vec2::new(30.0, 30.0),
            0,
            5000,
        ));
        if let Some(order) = world.order_mut(stalled) {
            order.status = TaskStatus::InProgress;
            order.last_moved = 0;
        }
        world.current_tick = config.stall_threshold + 1;

        let alerts = scan_bottlenecks(&world, &config);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].task_id, stalled);
        assert!(alerts[0].stalled_for > config.stall_threshold);
    }
}
