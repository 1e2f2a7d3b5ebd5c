//! Core domain types shared by every tollway crate.
//!
//! Holds the driving states, the trigger events fed to the lane, the
//! error type surfaced by the state machine and payment flow, the fixed
//! strings shown to the driver, and the lane configuration.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::{LaneConfig, QrSize};
pub use error::{Result, TollError};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
