//! Presentation adapter - read-only projections of simulation state
//!
//! `projection` and `panel` are pure functions from world state to
//! display structs; `app` renders them with ratatui. Nothing in here
//! writes world state except by forwarding user actions to the scheduler.

pub mod app;
pub mod panel;
pub mod projection;
pub mod state;

pub use projection::{build_map_view, MapView, MarkerUrgency};
pub use state::{LogCategory, LogEntry, Selection, UiState};
