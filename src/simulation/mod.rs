pub mod dispatch;
pub mod movement;
pub mod pipeline;
pub mod scheduler;
pub mod telemetry;
pub mod tick;

pub use movement::{step_toward, StepResult};
pub use pipeline::stage_destination;
pub use scheduler::{Scheduler, SimulationState, SpeedMultiplier};
pub use telemetry::{BottleneckAlert, ChartPoint, ThroughputSeries};
pub use tick::{run_simulation_tick, SimulationEvent};
