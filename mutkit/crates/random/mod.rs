//! Random source for the mutator.
//!
//! [`PcgRand`] is the only generator the mutator owns. It implements
//! [`rand::RngCore`], so strategies are written against [`rand::Rng`] and can be
//! driven by any other generator in tests.

mod choice;
mod pcg;

pub use choice::RandomChoice;
pub use pcg::{PcgRand, DEFAULT_STREAM};
