use crate::constants::{BenchKind, BENCH_SIZES, GREEN, RED, RESET, YELLOW};
use anyhow::Result;
use mutkit::{encoded_size, Kind, MutateError, Mutator, MutatorConfig, PcgRand, Value};
use std::{
    hint::black_box,
    io::{self, Write},
    time::Instant,
};
use strum::VariantArray;
use tracing::{info, warn};

pub struct App {
    /// Config the mutator was built from
    config: MutatorConfig,

    /// The mutator driven by every session and benchmark
    mutator: Mutator,
}

/// One benchmark case: a label and the value set every iteration starts from.
struct BenchCase {
    name: String,
    values: Vec<Value>,
}

impl App {
    pub fn new(config: MutatorConfig) -> Self {
        let mutator = Mutator::from_config(&config);
        Self { config, mutator }
    }

    pub fn config(&self) -> &MutatorConfig {
        &self.config
    }

    pub fn mutator(&self) -> &Mutator {
        &self.mutator
    }

    /// Mutates `values` for `rounds` rounds, printing the set after each one.
    pub fn run(&mut self, mut values: Vec<Value>, rounds: usize) -> Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "[{GREEN}+{RESET}] Input: {}", render(&values))?;

        for round in 1..=rounds {
            match self.mutator.mutate(&mut values, self.config.max_size) {
                Ok(idx) => writeln!(
                    stdout,
                    "[{GREEN}+{RESET}] Round {RED}{round}{RESET} | Index: {RED}{idx}{RESET} | \
                     Size: {RED}{}{RESET} | {}",
                    encoded_size(&values),
                    render(&values),
                )?,
                Err(err @ MutateError::SizeBudgetUnsatisfiable { .. }) => {
                    warn!(round, "{err}");
                    writeln!(stdout, "[{YELLOW}!{RESET}] Round {RED}{round}{RESET} | {err}")?;
                }
                Err(err) => return Err(err.into()),
            }
        }

        stdout.flush()?;
        Ok(())
    }

    /// Times single mutation calls. Every iteration restores the case's input and restarts the
    /// random source from `seed`, so each call does the same work.
    pub fn bench(&mut self, kind: BenchKind, iterations: u64, seed: u64) {
        let iterations = iterations.max(1);
        info!(?kind, iterations, seed, "starting benchmark");

        for case in cases(kind) {
            let mut values = case.values.clone();
            let start = Instant::now();

            for _ in 0..iterations {
                reset(&mut values, &case.values);
                self.mutator.set_random(PcgRand::new(seed));
                let result = self.mutator.mutate(black_box(&mut values), self.config.max_size);
                let _ = black_box(result);
            }

            let elapsed = start.elapsed();
            let ns_per_op = elapsed.as_nanos() / u128::from(iterations);
            println!(
                "[{GREEN}+{RESET}] {:<24} {RED}{:>10}{RESET} iters {RED}{:>10}{RESET} ns/op",
                case.name, iterations, ns_per_op,
            );
        }
    }
}

fn render(values: &[Value]) -> String {
    values.iter().map(Value::to_string).collect::<Vec<_>>().join(" ")
}

/// Restores `values` to `original` without giving up the buffers already allocated.
fn reset(values: &mut [Value], original: &[Value]) {
    for (value, original) in values.iter_mut().zip(original) {
        match (value, original) {
            (Value::Bytes(bytes), Value::Bytes(original)) => {
                bytes.clear();
                bytes.extend_from_slice(original);
            }
            (Value::Text(text), Value::Text(original)) => {
                text.clear();
                text.push_str(original);
            }
            (value, original) => *value = original.clone(),
        }
    }
}

fn cases(kind: BenchKind) -> Vec<BenchCase> {
    match kind {
        BenchKind::Bytes => sized_cases("bytes", |size| Value::Bytes(vec![0; size])),
        BenchKind::String => sized_cases("string", |size| Value::Text("\0".repeat(size))),
        BenchKind::All => Kind::VARIANTS
            .iter()
            .map(|kind| BenchCase { name: kind.to_string(), values: vec![kind.zero()] })
            .collect(),
    }
}

fn sized_cases(name: &str, build: fn(usize) -> Value) -> Vec<BenchCase> {
    BENCH_SIZES
        .iter()
        .map(|&size| BenchCase { name: format!("{name}/{size}"), values: vec![build(size)] })
        .collect()
}
