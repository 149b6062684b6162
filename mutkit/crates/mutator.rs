//! The mutation driver.

use tracing::{debug, trace};

use crate::{
    config::{MutatorConfig, TextPolicy},
    error::MutateError,
    mutations::{mutate_bytes, mutate_text, shrink_bytes, shrink_text, Mutable},
    random::PcgRand,
    value::{encoded_size, Value},
};

/// Mutates typed value sets one value at a time within a size budget.
///
/// The only state carried between calls is the random source, so a mutator built from a fixed
/// seed replays the same sequence of mutations for the same sequence of inputs. A mutator is
/// meant to be owned by a single worker: every call needs `&mut self`.
#[derive(Debug, Clone)]
pub struct Mutator {
    /// Random source every edit draws from
    random: PcgRand,

    /// Seed the random source was last built from, reported for replay
    seed: u64,

    /// How text edits that break UTF-8 are resolved
    text_policy: TextPolicy,

    /// Scratch buffer for the byte run under edit
    scratch: Vec<u8>,

    /// Copy of the text under edit, to undo rejected edits
    original: Vec<u8>,
}

impl Mutator {
    /// Creates a mutator seeded with `seed`, or with a high-entropy seed when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(entropy_seed);
        debug!(seed, "mutator seeded");
        Self::with_random(PcgRand::new(seed), seed)
    }

    /// Creates the mutator described by `config`: its seed (or a high-entropy one), the random
    /// stream of its worker index, and its text policy.
    pub fn from_config(config: &MutatorConfig) -> Self {
        let seed = config.seed.unwrap_or_else(entropy_seed);
        debug!(seed, worker = config.worker, text_policy = %config.text_policy, "mutator seeded");
        let mut mutator = Self::with_random(PcgRand::for_worker(seed, config.worker), seed);
        mutator.text_policy = config.text_policy;
        mutator
    }

    /// Creates a mutator around an existing random source. `seed` is only reported back by
    /// [`Mutator::seed`].
    pub fn with_random(random: PcgRand, seed: u64) -> Self {
        Self {
            random,
            seed,
            text_policy: TextPolicy::default(),
            scratch: Vec::new(),
            original: Vec::new(),
        }
    }

    /// Seed to replay this mutator's run from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn text_policy(&self) -> TextPolicy {
        self.text_policy
    }

    pub fn set_text_policy(&mut self, policy: TextPolicy) {
        self.text_policy = policy;
    }

    /// Replaces the random source. Nothing from the previous one carries over.
    pub fn set_random(&mut self, random: PcgRand) {
        self.random = random;
    }

    /// Restarts the default random stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.random = PcgRand::new(seed);
    }

    pub fn random(&self) -> &PcgRand {
        &self.random
    }

    pub fn random_mut(&mut self) -> &mut PcgRand {
        &mut self.random
    }

    /// Mutates one randomly chosen element of `values` in place and returns its index.
    ///
    /// The aggregate [`encoded_size`] of `values` never exceeds `max_size` after a successful
    /// call, every element keeps its kind, and every other element is left untouched.
    ///
    /// When the set is over budget and the chosen element cannot make room on its own, the call
    /// falls back to one of the elements whose shrinking alone brings the set within budget, and
    /// shrinks it instead.
    ///
    /// # Errors
    ///
    /// - [`MutateError::EmptyInput`] when `values` is empty.
    /// - [`MutateError::SizeBudgetUnsatisfiable`] when no single element can be shrunk far
    ///   enough for the set to fit in `max_size`. `required` is the smallest budget a single
    ///   shrink could meet. Nothing is modified.
    pub fn mutate(&mut self, values: &mut [Value], max_size: usize) -> Result<usize, MutateError> {
        if values.is_empty() {
            return Err(MutateError::EmptyInput);
        }

        let total = encoded_size(values);
        let mut idx = self.pick(values.len());
        if floor(total, &values[idx]) > max_size {
            idx = self.pick_shrinkable(values, total, max_size)?;
        }

        let room = max_size - (total - values[idx].encoded_size());
        let value = &mut values[idx];
        if value.encoded_size() > room {
            debug!(
                kind = %value.kind(),
                size = value.encoded_size(),
                room,
                "value overflows its budget, shrinking"
            );
            self.shrink(value, room);
        } else if !self.apply(value, room) {
            trace!(kind = %value.kind(), room, "no edit applies, value left as is");
        }

        // Strategies stay within `room` on their own, this only guards the invariant.
        if value.encoded_size() > room {
            value.truncate_to(room);
        }
        Ok(idx)
    }

    /// Uniform pick among the elements that can bring an over-budget set within `max_size` by
    /// shrinking alone.
    fn pick_shrinkable(
        &mut self,
        values: &[Value],
        total: usize,
        max_size: usize,
    ) -> Result<usize, MutateError> {
        let candidates: Vec<usize> = (0..values.len())
            .filter(|&i| floor(total, &values[i]) <= max_size)
            .collect();

        if candidates.is_empty() {
            let required = values.iter().map(|value| floor(total, value)).min().unwrap_or(total);
            return Err(MutateError::SizeBudgetUnsatisfiable { required, max_size });
        }

        let idx = candidates[self.pick(candidates.len())];
        debug!(idx, total, max_size, "value set over budget, shrinking a value that can fit it");
        Ok(idx)
    }

    /// Uniform index in `[0, len)`.
    fn pick(&mut self, len: usize) -> usize {
        match u32::try_from(len) {
            Ok(len) => self.random.below(len) as usize,
            Err(_) => rand::Rng::random_range(&mut self.random, 0..len),
        }
    }

    fn apply(&mut self, value: &mut Value, room: usize) -> bool {
        let random = &mut self.random;
        match value {
            Value::Bytes(bytes) => mutate_bytes(bytes, random, room, &mut self.scratch),
            Value::Text(text) => mutate_text(
                text,
                random,
                room,
                self.text_policy,
                &mut self.original,
                &mut self.scratch,
            ),
            Value::Bool(v) => v.mutate(random, room),
            Value::I8(v) => v.mutate(random, room),
            Value::I16(v) => v.mutate(random, room),
            Value::I32(v) => v.mutate(random, room),
            Value::I64(v) => v.mutate(random, room),
            Value::U8(v) => v.mutate(random, room),
            Value::U16(v) => v.mutate(random, room),
            Value::U32(v) => v.mutate(random, room),
            Value::U64(v) => v.mutate(random, room),
            Value::F32(v) => v.mutate(random, room),
            Value::F64(v) => v.mutate(random, room),
        }
    }

    fn shrink(&mut self, value: &mut Value, room: usize) {
        match value {
            Value::Bytes(bytes) => shrink_bytes(bytes, &mut self.random, room),
            Value::Text(text) => shrink_text(text, &mut self.random, room),
            // Fixed-size values never exceed a room that admitted their kind.
            _ => {}
        }
    }
}

/// Smallest aggregate size reachable by changing `value` alone in a set of size `total`.
fn floor(total: usize, value: &Value) -> usize {
    total - value.encoded_size() + value.kind().min_size()
}

fn entropy_seed() -> u64 {
    rand::random()
}
