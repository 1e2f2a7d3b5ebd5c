//! Command-line argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tollway_core::constants::{DEFAULT_REGION_ID, DEFAULT_REGION_UUID, DEFAULT_SCAN_PERIOD_MS};

/// Interactive tollway lane emulator.
#[derive(Parser, Debug, Clone)]
#[command(name = "tollway")]
#[command(about = "Tollway lane emulator driven by button presses and beacon crossings")]
#[command(version)]
pub struct Cli {
    /// Lane configuration file (TOML). Built-in defaults are used if omitted.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Run without the beacon; only button presses drive the lane.
    #[arg(long)]
    pub no_beacon: bool,

    /// Identifier of the monitored beacon region.
    #[arg(long, default_value = DEFAULT_REGION_ID)]
    pub region: String,

    /// Proximity UUID of the monitored beacon region.
    #[arg(long, default_value = DEFAULT_REGION_UUID)]
    pub region_uuid: String,

    /// Beacon scan period in milliseconds.
    #[arg(long, default_value_t = DEFAULT_SCAN_PERIOD_MS)]
    pub scan_period_ms: u64,

    /// Width of the rendered screen in characters.
    #[arg(long, default_value_t = 60)]
    pub columns: usize,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn scan_period(&self) -> Duration {
        Duration::from_millis(self.scan_period_ms)
    }
}
