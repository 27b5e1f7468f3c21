//! Platform-specific implementations
//!
//! All Win32 calls live here. The rest of the crate only sees domain
//! types and the [`monitors::DisplaySource`] trait.

pub mod console;
pub mod monitors;
#[cfg(windows)]
pub mod windows;
