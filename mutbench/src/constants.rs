use clap::ValueEnum;

pub(crate) const RED: &str = "\x1b[31m";
pub(crate) const GREEN: &str = "\x1b[32m";
pub(crate) const YELLOW: &str = "\x1b[33m";
pub(crate) const RESET: &str = "\x1b[0m";

/// The header displayed when running this tool.
pub(crate) const HEADER: &str = "
╭─────────────────────────────────────────────────────────────────╮
│                           MUTBENCH                              │
│            Typed Value Mutation Sessions and Benchmarks         │
╰─────────────────────────────────────────────────────────────────╯
";

/// Environment variable holding the comma-separated debug knobs.
pub(crate) const DEBUG_ENV: &str = "MUTKIT_DEBUG";

/// Seed every benchmark iteration restarts from.
pub(crate) const DEFAULT_BENCH_SEED: u64 = 123;

pub(crate) const DEFAULT_BENCH_ITERATIONS: u64 = 100_000;

pub(crate) const DEFAULT_ROUNDS: usize = 10;

/// Buffer sizes benchmarked for the variable-size kinds.
pub(crate) const BENCH_SIZES: [usize; 6] = [1, 10, 100, 1_000, 10_000, 100_000];

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum BenchKind {
    /// Zero-filled byte buffers of every benchmark size
    Bytes,
    /// Zero-filled strings of every benchmark size
    String,
    /// One case per kind, starting from its zero value
    All,
}
