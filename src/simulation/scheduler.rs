//! Scheduler - owns simulation state and drives the periodic tick
//!
//! The scheduler is the single owner of everything the clock mutates: the
//! world, the RNG stream, and the derived chart/alert feeds. The front-end
//! calls `tick()` whenever the current period elapses; pausing just stops
//! those calls, no state is discarded. User actions mutate state here,
//! synchronously, between ticks.

use std::collections::VecDeque;
use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::{FlowError, Result};
use crate::core::types::{TaskId, WorkerId};
use crate::simulation::telemetry::{BottleneckAlert, ThroughputSeries};
use crate::simulation::tick::{run_simulation_tick, SimulationEvent};
use crate::world::order::Priority;
use crate::world::{World, WorldSeed};

/// User-selectable clock speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedMultiplier {
    #[default]
    X1,
    X2,
    X5,
}

impl SpeedMultiplier {
    pub fn factor(&self) -> u32 {
        match self {
            SpeedMultiplier::X1 => 1,
            SpeedMultiplier::X2 => 2,
            SpeedMultiplier::X5 => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpeedMultiplier::X1 => "1x",
            SpeedMultiplier::X2 => "2x",
            SpeedMultiplier::X5 => "5x",
        }
    }
}

impl TryFrom<u8> for SpeedMultiplier {
    type Error = FlowError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(SpeedMultiplier::X1),
            2 => Ok(SpeedMultiplier::X2),
            5 => Ok(SpeedMultiplier::X5),
            other => Err(FlowError::InvalidConfig(format!(
                "speed must be 1, 2 or 5, got {}",
                other
            ))),
        }
    }
}

/// Everything the tick loop mutates, gathered under one owner
pub struct SimulationState {
    pub world: World,
    pub chart: ThroughputSeries,
    pub alerts: VecDeque<BottleneckAlert>,
    pub rng: ChaCha8Rng,
}

impl SimulationState {
    pub fn new(world: World, config: &SimulationConfig) -> Self {
        // Series starts mid-band so early samples wander in both directions
        let initial = (config.chart_min + config.chart_max) / 2.0;
        Self {
            world,
            chart: ThroughputSeries::new(config.chart_window, initial),
            alerts: VecDeque::new(),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Retain the most recent `cap` alerts
    pub fn push_alert(&mut self, alert: BottleneckAlert, cap: usize) {
        if self.alerts.len() >= cap {
            self.alerts.pop_front();
        }
        self.alerts.push_back(alert);
    }
}

/// Drives the simulation and applies user actions between ticks
pub struct Scheduler {
    state: SimulationState,
    config: SimulationConfig,
    running: bool,
    speed: SpeedMultiplier,
}

impl Scheduler {
    /// Scheduler over the built-in demo floor
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::with_seed(config, WorldSeed::default_layout())
    }

    pub fn with_seed(config: SimulationConfig, seed: WorldSeed) -> Result<Self> {
        config.validate().map_err(FlowError::InvalidConfig)?;
        let world = World::from_seed(seed)?;
        let state = SimulationState::new(world, &config);
        Ok(Self {
            state,
            config,
            running: true,
            speed: SpeedMultiplier::X1,
        })
    }

    /// Advance the simulation one tick
    ///
    /// Always steps when called; the front-end is expected to consult
    /// `is_running()` before calling on a timer. Tests drive this directly.
    pub fn tick(&mut self) -> Vec<SimulationEvent> {
        run_simulation_tick(&mut self.state, &self.config)
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn speed(&self) -> SpeedMultiplier {
        self.speed
    }

    pub fn set_speed(&mut self, speed: SpeedMultiplier) {
        self.speed = speed;
    }

    /// Current tick period: the nominal period divided by the speed factor
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.config.tick_period_ms) / self.speed.factor()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    /// User action: bump an order to critical priority
    pub fn expedite_order(&mut self, task_id: TaskId) -> Result<SimulationEvent> {
        let order = self
            .state
            .world
            .order_mut(task_id)
            .ok_or(FlowError::OrderNotFound(task_id))?;
        order.priority = Priority::Critical;
        tracing::info!(?task_id, "order expedited");
        Ok(SimulationEvent::OrderExpedited { task_id })
    }

    /// User action: ping a worker's device (shows up in the log feed only)
    pub fn message_worker(&mut self, worker_id: WorkerId) -> Result<SimulationEvent> {
        let worker = self
            .state
            .world
            .worker(worker_id)
            .ok_or(FlowError::WorkerNotFound(worker_id))?;
        let name = worker.name.clone();
        tracing::info!(worker = %name, "message sent");
        Ok(SimulationEvent::WorkerMessaged { worker: name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::order::TaskStatus;

    #[test]
    fn test_pause_discards_nothing() {
        let mut scheduler = Scheduler::new(SimulationConfig::default()).unwrap();
        scheduler.tick();
        let tick_before = scheduler.state().world.current_tick;
        scheduler.pause();
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.state().world.current_tick, tick_before);
        scheduler.start();
        scheduler.tick();
        assert_eq!(scheduler.state().world.current_tick, tick_before + 1);
    }

    #[test]
    fn test_speed_divides_the_period() {
        let mut scheduler = Scheduler::new(SimulationConfig::default()).unwrap();
        let base = scheduler.tick_period();
        scheduler.set_speed(SpeedMultiplier::X5);
        assert_eq!(scheduler.tick_period(), base / 5);
    }

    #[test]
    fn test_speed_parse() {
        assert_eq!(SpeedMultiplier::try_from(2).unwrap(), SpeedMultiplier::X2);
        assert!(SpeedMultiplier::try_from(3).is_err());
    }

    #[test]
    fn test_expedite_sets_critical() {
        let mut scheduler = Scheduler::new(SimulationConfig::default()).unwrap();
        let task_id = scheduler.state().world.orders()[0].id;
        let event = scheduler.expedite_order(task_id).unwrap();
        assert!(matches!(event, SimulationEvent::OrderExpedited { .. }));
        assert_eq!(
            scheduler.state().world.order(task_id).unwrap().priority,
            Priority::Critical
        );
    }

    #[test]
    fn test_expedite_unknown_order_errors() {
        let mut scheduler = Scheduler::new(SimulationConfig::default()).unwrap();
        assert!(matches!(
            scheduler.expedite_order(TaskId::new()),
            Err(FlowError::OrderNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimulationConfig::default();
        config.quality_pass_rate = 2.0;
        assert!(Scheduler::new(config).is_err());
    }

    #[test]
    fn test_session_is_reproducible() {
        let run = |seed: u64| {
            let mut config = SimulationConfig::default();
            config.rng_seed = seed;
            let mut scheduler = Scheduler::new(config).unwrap();
            for _ in 0..300 {
                scheduler.tick();
            }
            let completed = scheduler
                .state()
                .world
                .orders()
                .iter()
                .filter(|o| o.status == TaskStatus::Completed)
                .count();
            let positions: Vec<_> = scheduler
                .state()
                .world
                .workers
                .iter()
                .map(|w| (w.position.x, w.position.y))
                .collect();
            (completed, positions)
        };
        assert_eq!(run(7), run(7));
    }
}
