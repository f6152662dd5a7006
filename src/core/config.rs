//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::Tick;

/// Configuration for the simulation clock and its derived feeds
///
/// These values have been tuned to make the floor look busy without
/// saturating any single station. Changing them affects pacing and feel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === CLOCK ===
    /// Nominal tick period in milliseconds (divided by the speed multiplier)
    ///
    /// At 100ms the clock runs 10 ticks per nominal second, which is the
    /// conversion [`ShiftClock`](crate::core::shift::ShiftClock) assumes.
    pub tick_period_ms: u64,

    /// Seed for the simulation RNG
    ///
    /// Every probabilistic decision (signal drift, wander, quality rolls,
    /// injection) draws from one ChaCha stream, so a fixed seed replays
    /// an identical session.
    pub rng_seed: u64,

    // === WORKER TELEMETRY ===
    /// Battery drops one unit every this-many ticks (while not charging)
    ///
    /// At 50 ticks (5s nominal) a full battery lasts ~8 minutes of wall
    /// time at 1x speed, long enough to span a demo session.
    pub battery_drain_interval: u64,

    /// Per-tick chance that a worker's signal gauge is resampled
    pub signal_resample_chance: f64,

    /// Lower bound of the resampled signal range (upper bound is 100)
    pub signal_floor: f32,

    /// Maximum retained trail positions per worker (oldest dropped first)
    pub path_history_cap: usize,

    /// Battery level below which an idle AMR heads to the charging bay
    pub low_battery_threshold: f32,

    /// Battery recovered per tick while charging
    pub charge_rate: f32,

    // === IDLE BEHAVIOR ===
    /// Per-tick chance an unassigned human worker takes a wander step
    pub wander_chance: f64,

    /// Maximum wander step length (floor units)
    pub wander_step: f32,

    // === WORK ORDERS ===
    /// Per-tick chance an in-progress non-manufacturing order completes
    ///
    /// At 0.05 an order finishes ~20 ticks (2s nominal) after arrival,
    /// which reads as a plausible handling time on the map.
    pub completion_chance: f64,

    /// Probability that a QA inspection passes
    pub quality_pass_rate: f64,

    /// Ticks without movement after which an order counts as stalled
    ///
    /// 600 ticks = 60 nominal seconds, matching the dashboard's stall
    /// badge threshold.
    pub stall_threshold: Tick,

    // === ORDER INJECTION ===
    /// A new manufacturing order may be injected every this-many ticks
    pub injection_interval: u64,

    /// Probability that an injection window actually produces an order
    pub injection_chance: f64,

    /// Ship deadline for injected orders, relative to the injection tick
    ///
    /// 1800 ticks = 3 nominal minutes: tight enough that a QA detour
    /// can push an order past its deadline and light up the map.
    pub injection_deadline_ticks: Tick,

    // === THROUGHPUT CHART ===
    /// A chart point is appended every this-many ticks
    pub chart_interval: u64,

    /// Rolling window length of the chart series
    pub chart_window: usize,

    /// Largest per-sample random walk step
    pub chart_step: f32,

    /// Clamp range for chart values (units per hour)
    pub chart_min: f32,
    pub chart_max: f32,

    /// Constant units-per-hour target line drawn behind the series
    pub throughput_target: f32,

    // === BOTTLENECK ALERTS ===
    /// Stalled orders are scanned for every this-many ticks
    pub bottleneck_scan_interval: u64,

    /// Maximum retained alerts (most recent kept)
    pub max_alerts: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 100,
            rng_seed: 42,

            battery_drain_interval: 50,
            signal_resample_chance: 0.05,
            signal_floor: 60.0,
            path_history_cap: 40,
            low_battery_threshold: 15.0,
            charge_rate: 0.5,

            wander_chance: 0.08,
            wander_step: 0.6,

            completion_chance: 0.05,
            quality_pass_rate: 0.9,
            stall_threshold: 600,

            injection_interval: 50,
            injection_chance: 0.6,
            injection_deadline_ticks: 1800,

            chart_interval: 20,
            chart_window: 30,
            chart_step: 8.0,
            chart_min: 90.0,
            chart_max: 160.0,
            throughput_target: 140.0,

            bottleneck_scan_interval: 50,
            max_alerts: 20,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file (missing keys fall back to defaults)
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.tick_period_ms == 0 {
            return Err("tick_period_ms must be positive".into());
        }

        for (name, p) in [
            ("signal_resample_chance", self.signal_resample_chance),
            ("wander_chance", self.wander_chance),
            ("completion_chance", self.completion_chance),
            ("quality_pass_rate", self.quality_pass_rate),
            ("injection_chance", self.injection_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{} ({}) must be within [0, 1]", name, p));
            }
        }

        if self.chart_min >= self.chart_max {
            return Err(format!(
                "chart_min ({}) must be < chart_max ({})",
                self.chart_min, self.chart_max
            ));
        }

        if self.path_history_cap == 0 || self.chart_window == 0 || self.max_alerts == 0 {
            return Err("retention caps must be positive".into());
        }

        if self.battery_drain_interval == 0
            || self.injection_interval == 0
            || self.chart_interval == 0
            || self.bottleneck_scan_interval == 0
        {
            return Err("tick intervals must be positive".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let mut config = SimulationConfig::default();
        config.injection_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_chart_clamp_ordering_rejected() {
        let mut config = SimulationConfig::default();
        config.chart_min = 200.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: SimulationConfig = toml::from_str("injection_chance = 1.0").unwrap();
        assert!((config.injection_chance - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.battery_drain_interval, 50);
    }
}
