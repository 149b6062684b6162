//! Mutator configuration.
//!
//! The mutator itself never reads the environment. Operator-facing layers build a
//! [`MutatorConfig`] from a JSON file, a debug-knob string (`fuzzseed=123,fuzzworker=2`) or
//! command line flags, and hand it to [`Mutator::from_config`](crate::Mutator::from_config).

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::ConfigError;

/// Shared-memory capacity of a fuzzing worker, the default size budget.
pub const DEFAULT_MAX_SIZE: usize = 100 << 20;

/// Seed knob, kept compatible with the `fuzzseed` debug setting.
pub const SEED_KNOB: &str = "fuzzseed";
/// Worker index knob.
pub const WORKER_KNOB: &str = "fuzzworker";
/// Text policy knob.
pub const TEXT_POLICY_KNOB: &str = "fuzztext";

/// What to do with a text edit that breaks UTF-8.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TextPolicy {
    /// Keep the edit, replacing invalid sequences with U+FFFD.
    #[default]
    Repair,
    /// Discard the edit and draw another one.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutatorConfig {
    /// Pinned seed. `None` seeds from a high-entropy source.
    pub seed: Option<u64>,
    /// Worker index, selects an independent random stream for the same seed.
    pub worker: u64,
    pub text_policy: TextPolicy,
    /// Size budget handed to every mutation call.
    pub max_size: usize,
}

impl Default for MutatorConfig {
    fn default() -> Self {
        Self { seed: None, worker: 0, text_policy: TextPolicy::Repair, max_size: DEFAULT_MAX_SIZE }
    }
}

impl MutatorConfig {
    /// Loads a JSON config file. Missing fields take their default.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Parses a comma-separated debug-knob string on top of the defaults.
    pub fn from_debug_knobs(knobs: &str) -> Result<Self, ConfigError> {
        Self::default().with_debug_knobs(knobs)
    }

    /// Applies the knobs this crate understands: `fuzzseed`, `fuzzworker` and `fuzztext`.
    ///
    /// Knobs owned by other tools are skipped, so the whole debug string of a process can be
    /// passed in. When a knob repeats, the last one wins.
    pub fn with_debug_knobs(mut self, knobs: &str) -> Result<Self, ConfigError> {
        for knob in knobs.split(',').map(str::trim).filter(|knob| !knob.is_empty()) {
            let (key, value) =
                knob.split_once('=').ok_or_else(|| ConfigError::InvalidKnob(knob.to_owned()))?;
            let value = value.trim();

            match key.trim() {
                SEED_KNOB => {
                    let seed = value.parse().map_err(|source| ConfigError::InvalidSeed {
                        value: value.to_owned(),
                        source,
                    })?;
                    self.seed = Some(seed);
                }
                WORKER_KNOB => {
                    self.worker = value.parse().map_err(|source| ConfigError::InvalidWorker {
                        value: value.to_owned(),
                        source,
                    })?;
                }
                TEXT_POLICY_KNOB => {
                    self.text_policy = value
                        .parse()
                        .map_err(|_| ConfigError::InvalidTextPolicy(value.to_owned()))?;
                }
                _ => {}
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knobs_override_defaults() {
        let config =
            MutatorConfig::from_debug_knobs("gctrace=1, fuzzseed=123,fuzzworker=3,fuzztext=reject")
                .unwrap();
        assert_eq!(config.seed, Some(123));
        assert_eq!(config.worker, 3);
        assert_eq!(config.text_policy, TextPolicy::Reject);
        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
    }

    #[test]
    fn last_knob_wins() {
        let config = MutatorConfig::from_debug_knobs("fuzzseed=1,fuzzseed=2").unwrap();
        assert_eq!(config.seed, Some(2));
    }

    #[test]
    fn empty_knobs_are_defaults() {
        assert_eq!(MutatorConfig::from_debug_knobs("").unwrap(), MutatorConfig::default());
        assert_eq!(MutatorConfig::from_debug_knobs(" , ").unwrap(), MutatorConfig::default());
    }

    #[test]
    fn bad_seed_is_reported() {
        let err = MutatorConfig::from_debug_knobs("fuzzseed=abc").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeed { ref value, .. } if value == "abc"));
    }

    #[test]
    fn knob_without_value_is_reported() {
        let err = MutatorConfig::from_debug_knobs("fuzzseed").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKnob(_)));
    }

    #[test]
    fn unknown_text_policy_is_reported() {
        let err = MutatorConfig::from_debug_knobs("fuzztext=ignore").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTextPolicy(_)));
    }

    #[test]
    fn json_fills_missing_fields() {
        let config: MutatorConfig =
            serde_json::from_str(r#"{ "seed": 9, "text_policy": "reject" }"#).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.worker, 0);
        assert_eq!(config.text_policy, TextPolicy::Reject);
        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = MutatorConfig::from_file("/nonexistent/mutkit.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
