mod app;
mod constants;

use std::path::PathBuf;

use crate::app::App;
use anyhow::Result;
use clap::{Parser, Subcommand};
use constants::{
    BenchKind, DEBUG_ENV, DEFAULT_BENCH_ITERATIONS, DEFAULT_BENCH_SEED, DEFAULT_ROUNDS, GREEN,
    HEADER, RED, RESET,
};
use mutkit::{MutatorConfig, TextPolicy, Value};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mutbench", about = "Typed value mutation sessions and benchmarks")]
struct Cli {
    #[arg(long, help = "JSON mutator config file")]
    config: Option<PathBuf>,

    #[arg(
        long,
        env = DEBUG_ENV,
        default_value = "",
        help = "Debug knobs, e.g. fuzzseed=123,fuzzworker=2,fuzztext=reject"
    )]
    debug: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mutate a set of value literals for a number of rounds
    Run {
        #[arg(long, help = "Seed for the random generator")]
        seed: Option<u64>,

        #[arg(long, help = "Worker index, selects the random stream")]
        worker: Option<u64>,

        #[arg(long, help = "Size budget in bytes for the whole value set")]
        max_size: Option<usize>,

        #[arg(long, help = "What to do with text edits that break UTF-8 (repair, reject)")]
        text_policy: Option<TextPolicy>,

        #[arg(long, default_value_t = DEFAULT_ROUNDS, help = "Number of mutation rounds")]
        rounds: usize,

        #[arg(required = true, help = "Value literals, e.g. bytes:00ff string:hi bool:false i32:7")]
        values: Vec<Value>,
    },

    /// Measure the cost of a single mutation call
    Bench {
        #[arg(long, value_enum, default_value = "all", help = "Kinds to benchmark")]
        kind: BenchKind,

        #[arg(long, default_value_t = DEFAULT_BENCH_ITERATIONS, help = "Iterations per case")]
        iterations: u64,

        #[arg(long, default_value_t = DEFAULT_BENCH_SEED, help = "Seed every iteration restarts from")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // File first, then the debug knobs, then explicit flags
    let mut config = match &cli.config {
        Some(path) => MutatorConfig::from_file(path)?,
        None => MutatorConfig::default(),
    };
    config = config.with_debug_knobs(&cli.debug)?;

    match cli.command {
        Command::Run { seed, worker, max_size, text_policy, rounds, values } => {
            config.seed = seed.or(config.seed);
            config.worker = worker.unwrap_or(config.worker);
            config.max_size = max_size.unwrap_or(config.max_size);
            config.text_policy = text_policy.unwrap_or(config.text_policy);

            let mut app = App::new(config);
            print!("{}", prelude(&app));
            app.run(values, rounds)?;
        }
        Command::Bench { kind, iterations, seed } => {
            config.seed = Some(seed);

            let mut app = App::new(config);
            print!("{}", prelude(&app));
            app.bench(kind, iterations, seed);
        }
    }

    Ok(())
}

fn prelude(app: &App) -> String {
    format!(
        "{HEADER}\n{GREEN}INFO{RESET}      Seed:                   \
         {RED}{}{RESET}\n{GREEN}INFO{RESET}      Worker:                 \
         {RED}{}{RESET}\n{GREEN}INFO{RESET}      Max size:               \
         {RED}{}{RESET}\n{GREEN}INFO{RESET}      Text policy:            {RED}{}{RESET}\n\n",
        app.mutator().seed(),
        app.config().worker,
        app.config().max_size,
        app.config().text_policy,
    )
}
