//! Domain logic and core data structures
//!
//! Pure geometry that is independent of Win32 and of how monitors
//! were discovered.

pub mod core;
pub mod grid;
pub mod monitor;
