//! Table configuration.
//!
//! A `TableConfig` is built once alongside the session, either in code via
//! the `with_*` builders or from JSON:
//!
//! ```json
//! { "local_seat": 0, "illegal_penalty": 1e9, "max_bot_turns": 256 }
//! ```
//!
//! Every field has a default, so `{}` is a valid document.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::seat::SeatId;

/// Subtracted from the logit of every illegal category.
pub const DEFAULT_ILLEGAL_PENALTY: f32 = 1e9;

/// Consecutive bot turns tolerated before the engine is considered stuck.
pub const DEFAULT_MAX_BOT_TURNS: usize = 256;

/// Configuration for a table session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Seat controlled by the local player. The other three are bots.
    pub local_seat: SeatId,

    /// Penalty applied to illegal logits before the argmax.
    /// Must dominate any logit the model can produce.
    pub illegal_penalty: f32,

    /// Upper bound on bot turns resolved inside one `reset` or submission.
    pub max_bot_turns: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            local_seat: SeatId::default(),
            illegal_penalty: DEFAULT_ILLEGAL_PENALTY,
            max_bot_turns: DEFAULT_MAX_BOT_TURNS,
        }
    }
}

impl TableConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the local seat.
    pub fn with_local_seat(mut self, seat: SeatId) -> Self {
        self.local_seat = seat;
        self
    }

    /// Set the illegal-category penalty.
    pub fn with_illegal_penalty(mut self, penalty: f32) -> Self {
        self.illegal_penalty = penalty;
        self
    }

    /// Set the bot turn limit.
    pub fn with_max_bot_turns(mut self, turns: usize) -> Self {
        self.max_bot_turns = turns;
        self
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: TableConfig =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse {
                source,
                path: None,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path.to_path_buf(),
        })?;
        let config: TableConfig = serde_json::from_reader(BufReader::new(file)).map_err(
            |source| ConfigError::Parse {
                source,
                path: Some(path.to_path_buf()),
            },
        )?;
        config.validate()?;
        Ok(config)
    }

    /// Check values without performing I/O.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.illegal_penalty.is_finite() || self.illegal_penalty <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "illegal_penalty",
                message: format!("must be a positive finite number, got {}", self.illegal_penalty),
            });
        }
        if self.max_bot_turns == 0 {
            return Err(ConfigError::Invalid {
                field: "max_bot_turns",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Read {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config{}: {source}", display_path(.path))]
    Parse {
        source: serde_json::Error,
        path: Option<PathBuf>,
    },
    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" at {}", p.display()))
        .unwrap_or_default()
}
