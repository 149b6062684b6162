//! Mutation strategies for each supported value kind.
//!
//! Provides the [`Mutable`] trait and implementations for byte sequences, text, booleans and
//! every fixed-width integer and float the mutator handles.

#[macro_use]
mod macros;

mod bool;
mod bytes;
mod constants;
mod float;
mod int;
mod text;
mod traits;

pub use bytes::{mutate_bytes, shrink_bytes};
pub use constants::*;
pub use text::{mutate_text, shrink_text, truncate_to_room};
pub use traits::*;
