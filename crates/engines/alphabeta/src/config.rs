//! Search configuration, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Slot count of the transposition table unless configured otherwise.
pub const DEFAULT_TT_SLOTS: usize = 18_000_000;

/// Engine settings. Missing keys fall back to [`SearchConfig::default`].
///
/// ```toml
/// tt_slots = 1048576
/// threads = 4
/// default_depth = 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of transposition table slots (two 64-bit words each)
    pub tt_slots: usize,
    /// Worker threads for root moves; 0 uses one per available core
    pub threads: usize,
    /// Depth used by [`SearchEngine::best_move`](crate::SearchEngine::best_move)
    pub default_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tt_slots: DEFAULT_TT_SLOTS,
            threads: 0,
            default_depth: 4,
        }
    }
}

impl SearchConfig {
    pub fn with_tt_slots(mut self, slots: usize) -> Self {
        self.tt_slots = slots;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, EngineError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml_string(&self) -> Result<String, EngineError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
