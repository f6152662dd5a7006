//! Shift clock for tick-to-wall-time conversion
//!
//! The dashboard labels chart points and log entries with shift wall-clock
//! times. Ten ticks make one nominal second; the shift starts at 08:00:00.

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// Ticks per nominal wall-clock second (100ms tick period)
pub const TICKS_PER_SECOND: u64 = 10;

/// Shift start, seconds after midnight (08:00:00)
const SHIFT_START_SECS: u64 = 8 * 3600;

/// Maps the tick counter onto shift wall-clock time
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ShiftClock {
    tick: Tick,
}

impl ShiftClock {
    pub fn new() -> Self {
        Self { tick: 0 }
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    /// Whole nominal seconds elapsed since shift start
    pub fn elapsed_secs(&self) -> u64 {
        self.tick / TICKS_PER_SECOND
    }

    /// Wall-clock label for the current tick, formatted `HH:MM:SS`
    pub fn time_label(&self) -> String {
        Self::label_at(self.tick)
    }

    /// Wall-clock label for an arbitrary tick
    pub fn label_at(tick: Tick) -> String {
        let total = SHIFT_START_SECS + tick / TICKS_PER_SECOND;
        let hours = (total / 3600) % 24;
        let minutes = (total / 60) % 60;
        let seconds = total % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }

    /// Nominal seconds represented by a tick span (for countdowns)
    pub fn span_secs(ticks: Tick) -> u64 {
        ticks / TICKS_PER_SECOND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_starts_at_eight() {
        assert_eq!(ShiftClock::new().time_label(), "08:00:00");
    }

    #[test]
    fn test_labels_advance_with_ticks() {
        let mut clock = ShiftClock::new();
        for _ in 0..TICKS_PER_SECOND * 61 {
            clock.advance();
        }
        assert_eq!(clock.time_label(), "08:01:01");
    }

    #[test]
    fn test_label_wraps_past_midnight() {
        // 16 hours into the shift lands at 00:00:00
        let tick = 16 * 3600 * TICKS_PER_SECOND;
        assert_eq!(ShiftClock::label_at(tick), "00:00:00");
    }

    #[test]
    fn test_span_secs() {
        assert_eq!(ShiftClock::span_secs(605), 60);
    }
}
