use std::num::ParseIntError;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Errors returned by a mutation call or by building a [`Value`](crate::Value).
pub enum MutateError {
    #[error("cannot mutate an empty value set")]
    /// The caller passed no values.
    EmptyInput,

    #[error("unsupported value type: {0}")]
    /// The value is not one of the supported kinds.
    UnsupportedType(String),

    #[error("size budget of {max_size} bytes cannot hold the {required} bytes the values need")]
    /// No edit can bring the value set within the size budget.
    SizeBudgetUnsatisfiable { required: usize, max_size: usize },

    #[error("invalid {kind} literal {literal:?}: {reason}")]
    /// A value literal has a known kind but a malformed payload.
    InvalidLiteral { kind: &'static str, literal: String, reason: String },
}

#[derive(Error, Debug)]
/// Errors that can occur while loading a [`MutatorConfig`](crate::MutatorConfig).
pub enum ConfigError {
    #[error("malformed debug knob {0:?}, expected key=value")]
    InvalidKnob(String),

    #[error("invalid seed {value:?}: {source}")]
    InvalidSeed { value: String, source: ParseIntError },

    #[error("invalid worker index {value:?}: {source}")]
    InvalidWorker { value: String, source: ParseIntError },

    #[error("unknown text policy {0:?}")]
    InvalidTextPolicy(String),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}
