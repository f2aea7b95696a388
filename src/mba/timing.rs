//! Bus timing configuration.
//!
//! The settle and pacing delays are requirements of the controller, not
//! tuning knobs; they are configurable so tests and slower setups can
//! adjust them without touching the engine.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::MbaError;

/// Delays and deadlines applied around every command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MbaTiming {
    /// Wait after a block write before touching the bus again
    pub settle_delay: Duration,
    /// Wait after a completed command before the next one
    pub post_command_delay: Duration,
    /// Ceiling for the response poll loop
    pub read_timeout: Duration,
    /// Step of the response poll loop
    pub poll_interval: Duration,
}

impl Default for MbaTiming {
    fn default() -> Self {
        TimingConfig::default().into()
    }
}

/// On-disk form of [`MbaTiming`], in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub settle_delay_ms: u64,
    pub post_command_delay_ms: u64,
    pub read_timeout_ms: u64,
    pub poll_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            post_command_delay_ms: DEFAULT_POST_COMMAND_DELAY_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl From<TimingConfig> for MbaTiming {
    fn from(cfg: TimingConfig) -> Self {
        MbaTiming {
            settle_delay: Duration::from_millis(cfg.settle_delay_ms),
            post_command_delay: Duration::from_millis(cfg.post_command_delay_ms),
            read_timeout: Duration::from_millis(cfg.read_timeout_ms),
            poll_interval: Duration::from_millis(cfg.poll_interval_ms),
        }
    }
}

impl MbaTiming {
    /// Parse a JSON timing file; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, MbaError> {
        let cfg: TimingConfig = serde_json::from_str(json)?;
        if cfg.poll_interval_ms == 0 {
            return Err(MbaError::Config("poll_interval_ms must be non-zero".into()));
        }
        if cfg.poll_interval_ms > cfg.read_timeout_ms {
            return Err(MbaError::Config(format!(
                "poll_interval_ms ({}) exceeds read_timeout_ms ({})",
                cfg.poll_interval_ms, cfg.read_timeout_ms
            )));
        }
        Ok(cfg.into())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MbaError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }
}
