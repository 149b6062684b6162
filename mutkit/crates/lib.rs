//! # Mutkit
//!
//! A typed value mutation engine for coverage-guided fuzzers. Each call takes the argument values
//! of a fuzz target, changes exactly one of them and keeps the whole set within a size budget:
//!
//! 1) deterministic for a given seed
//! 2) type preserving
//! 3) bounded by `max_size`
//!
//! ## Modules
//!
//! - [`config`] - [`MutatorConfig`] loading from JSON files and debug-knob strings.
//! - [`error`] - Error types returned by mutation calls and config loading.
//! - [`mutations`] - [`Mutable`](mutations::Mutable) implementations for every supported kind.
//! - [`mutator`] - The [`Mutator`] driver that picks a value, dispatches and enforces the budget.
//! - [`random`] - The seedable [`PcgRand`] generator every edit draws from.
//! - [`value`] - The [`Value`] sum type and its [`Kind`] tags.

pub mod config;
pub mod error;
pub mod mutations;
pub mod mutator;
pub mod random;
pub mod value;


pub use config::{MutatorConfig, TextPolicy, DEFAULT_MAX_SIZE};
pub use error::{ConfigError, MutateError};
pub use mutator::Mutator;
pub use random::PcgRand;
pub use value::{encoded_size, Kind, Value};
