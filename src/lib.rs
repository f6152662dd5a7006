//! FloorFlow - Discrete-Event Warehouse Floor Simulator

pub mod core;
pub mod simulation;
pub mod ui;
pub mod world;
