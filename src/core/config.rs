//! Rule and session configuration.
//!
//! - `RulesConfig`: board options the rules engine consults (safe cells)
//! - `SessionConfig`: rules plus Death Mode settings for one game
//!
//! Both deserialize from TOML with every field optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::track::TRACK_LENGTH;
use crate::error::ConfigError;

/// Default Death Mode move ceiling.
pub const DEFAULT_MAX_MOVES: u32 = 2000;

/// Board rule options.
///
/// The default marks no safe cells, so a capture happens on any shared track
/// cell. Use [`RulesConfig::classic`] for the board layout that protects every
/// eighth cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Main-track cells where pieces cannot be captured.
    pub safe_cells: Vec<u8>,
}

impl RulesConfig {
    /// Rules with every main-track index divisible by 8 marked safe.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            safe_cells: (0..TRACK_LENGTH as u8).step_by(8).collect(),
        }
    }

    /// Mark additional safe cells.
    #[must_use]
    pub fn with_safe_cells(mut self, cells: impl IntoIterator<Item = u8>) -> Self {
        self.safe_cells.extend(cells);
        self.safe_cells.sort_unstable();
        self.safe_cells.dedup();
        self
    }

    /// Check whether a main-track cell is safe.
    #[must_use]
    pub fn is_safe(&self, cell: u8) -> bool {
        self.safe_cells.contains(&cell)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(&cell) = self.safe_cells.iter().find(|&&c| i32::from(c) >= TRACK_LENGTH) {
            return Err(ConfigError::Validation(format!(
                "rules.safe_cells entry {} is off the {}-cell track",
                cell, TRACK_LENGTH
            )));
        }
        Ok(())
    }

    /// Load rules from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: RulesConfig = toml::from_str(&read_config(path)?)?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration for one game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub rules: RulesConfig,

    /// Terminate the game once `max_moves` turns have been played.
    pub death_mode: bool,

    /// Turn ceiling applied in Death Mode.
    pub max_moves: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            death_mode: false,
            max_moves: DEFAULT_MAX_MOVES,
        }
    }
}

impl SessionConfig {
    /// Standard game with no move ceiling.
    #[must_use]
    pub fn standard() -> Self {
        Self::default()
    }

    /// Death Mode game terminating after `max_moves` turns.
    #[must_use]
    pub fn death_mode(max_moves: u32) -> Self {
        Self {
            death_mode: true,
            max_moves,
            ..Self::default()
        }
    }

    /// Replace the rules.
    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Turn ceiling if one applies.
    #[must_use]
    pub fn move_limit(&self) -> Option<u32> {
        self.death_mode.then_some(self.max_moves)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()?;
        if self.death_mode && self.max_moves == 0 {
            return Err(ConfigError::Validation(
                "max_moves must be > 0 in death mode".into(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(&read_config(path)?)?;
        config.validate()?;
        Ok(config)
    }
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}
