//! # config.rs – Centralized Parameter Store
//!
//! This module holds the default simulation parameters and the runtime
//! [SimConfig] built from them. Keeping configuration in one place makes tuning,
//! experimentation, and testing easier.
//!
//! The print flags at the bottom are process-wide switches read by [crate::print].

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

//
// ──────────────────────────────────────────────────────────────
//   1. BANK PARAMETERS
// ──────────────────────────────────────────────────────────────
//

/// Default number of cars in the bank
pub const DEFAULT_ELEVATOR_COUNT: usize = 2;

/// Default top floor. Floors are numbered from 1.
pub const DEFAULT_MAX_FLOOR: u8 = 7;

/// The floor every car starts on
pub const GROUND_FLOOR: u8 = 1;

//
// ──────────────────────────────────────────────────────────────
//   2. TIMING & INTAKE
// ──────────────────────────────────────────────────────────────
//

/// Wall-clock time between two rounds
pub const DEFAULT_ROUND_PERIOD: Duration = Duration::from_secs(5);

/// Named pipe the request reader listens on
pub static DEFAULT_REQUEST_PIPE: &str = "/tmp/elevator_request_queue";

/// Path value meaning "read requests from stdin"
pub static STDIN_SOURCE: &str = "-";

/// Pause before the reader retries after a failed open/read
pub const READER_RETRY_DELAY: Duration = Duration::from_millis(500);

//
// ──────────────────────────────────────────────────────────────
//   3. RUNTIME CONFIG
// ──────────────────────────────────────────────────────────────
//

/// Runtime configuration for one simulation.
///
/// Every field falls back to its default when missing from a config file,
/// so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of cars in the bank.
    /// Default: [DEFAULT_ELEVATOR_COUNT]
    pub elevator_count: usize,

    /// Highest reachable floor.
    /// Default: [DEFAULT_MAX_FLOOR]
    pub max_floor: u8,

    /// Milliseconds between rounds.
    /// Default: [DEFAULT_ROUND_PERIOD]
    pub round_period_ms: u64,

    /// Where requests are read from. [STDIN_SOURCE] reads stdin.
    /// Default: [DEFAULT_REQUEST_PIPE]
    pub request_pipe: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            elevator_count: DEFAULT_ELEVATOR_COUNT,
            max_floor: DEFAULT_MAX_FLOOR,
            round_period_ms: DEFAULT_ROUND_PERIOD.as_millis() as u64,
            request_pipe: PathBuf::from(DEFAULT_REQUEST_PIPE),
        }
    }
}

impl SimConfig {
    /// Reads a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SimConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON in config file {}", path.display()))?;
        Ok(config)
    }

    /// Rejects configurations the bank cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.elevator_count == 0 {
            bail!("elevator_count must be at least 1");
        }
        if self.max_floor < GROUND_FLOOR {
            bail!("max_floor must be at least {}", GROUND_FLOOR);
        }
        Ok(())
    }

    /// The pacing interval as a [Duration]
    pub fn round_period(&self) -> Duration {
        Duration::from_millis(self.round_period_ms)
    }

    /// True if requests should be read from stdin instead of a pipe
    pub fn reads_stdin(&self) -> bool {
        self.request_pipe.as_os_str() == STDIN_SOURCE
    }
}

//
// ──────────────────────────────────────────────────────────────
//   4. LOGGING CONFIGURATION
// ──────────────────────────────────────────────────────────────
//

/// Enable/disable printing of the bank table after each round
pub static PRINT_VIEW_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable the one-line JSON snapshot after each round
pub static PRINT_JSON_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(false));

/// Enable/disable printing of errors
pub static PRINT_ERR_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable printing of warnings
pub static PRINT_WARN_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable printing of success messages
pub static PRINT_OK_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable printing of general info
pub static PRINT_INFO_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Reads a print flag. A poisoned flag counts as on.
pub fn is_on(flag: &Lazy<Mutex<bool>>) -> bool {
    flag.lock().map(|on| *on).unwrap_or(true)
}

/// Switches a print flag.
pub fn set_flag(flag: &Lazy<Mutex<bool>>, on: bool) {
    if let Ok(mut guard) = flag.lock() {
        *guard = on;
    }
}
