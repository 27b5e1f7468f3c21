//! Window placement stress test driver
//!
//! Splits every connected monitor into a grid and opens one placeholder
//! window per cell through an external launcher, all at once.

pub mod app;
pub mod config;
pub mod domain;
pub mod launch;
pub mod platform;
pub mod utils;
