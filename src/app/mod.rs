//! Application orchestration layer
//!
//! Ties monitor queries, grid math and the launch pool together into a
//! single stress run.

pub mod controller;

pub use controller::{AppError, INTERRUPT_MESSAGE, RunReport, StressController};
