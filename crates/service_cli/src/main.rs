//! Randgen CLI - pseudorandom value streams from the command line
//!
//! # Usage
//!
//! - `randgen exponential 2.0 -n 100` - 100 draws from Exp(2.0)
//! - `randgen normal 0 1 --sep ,` - unbounded comma-separated draws
//! - `randgen uniform --seed 42 -n 10 --siter 5 --snapshot state.json` -
//!   reproducible draws, writing the generator state every 5 values
//! - `randgen uniform --state state.json -n 10` - resume from a snapshot
//!
//! # Architecture
//!
//! As the service layer of the randgen workspace, this binary wires the
//! foundation and engine layers to the terminal: argument parsing,
//! snapshot file I/O, and the consumer side of the stream channel.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use randgen_core::options::StreamOptions;
use randgen_core::seed::Seed;
use randgen_core::state::StateBuffer;
use randgen_stream::item::StreamItem;
use randgen_stream::stream::RandomStream;

mod dist;
mod error;
mod statefile;

pub use error::{CliError, Result};

/// Randgen pseudorandom stream CLI
#[derive(Parser)]
#[command(name = "randgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Distribution to sample from (uniform, normal, exponential, lognormal)
    distribution: String,

    /// Positional distribution parameters
    #[arg(allow_negative_numbers = true)]
    params: Vec<f64>,

    /// Separator appended to each generated value
    #[arg(long, default_value = "\n")]
    sep: String,

    /// Total number of values to generate (unbounded when omitted)
    #[arg(short = 'n', long)]
    iter: Option<u64>,

    /// Seed words, comma separated
    #[arg(long, value_delimiter = ',')]
    seed: Option<Vec<u64>>,

    /// Produced values between state snapshots
    #[arg(long)]
    siter: Option<u64>,

    /// Load the generator state from a JSON snapshot file
    #[arg(long)]
    state: Option<PathBuf>,

    /// Write each state snapshot to this JSON file
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialise tracing; diagnostics go to stderr, generated values own
    // stdout.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let sampler = dist::build_sampler(&cli.distribution, &cli.params)?;

    let mut options = StreamOptions::default();
    options.sep = Some(cli.sep.clone());
    options.iter = cli.iter;
    options.siter = cli.siter;
    options.seed = cli.seed.map(|words| {
        if words.len() == 1 {
            Seed::Scalar(words[0])
        } else {
            Seed::Words(words)
        }
    });
    if let Some(path) = &cli.state {
        options.state = Some(StateBuffer::Owned(statefile::load(path)?));
        info!("resumed generator state from {}", path.display());
    }

    let mut stream = RandomStream::new(options, sampler)?;
    if let Some(seed) = stream.seed() {
        debug!("generator seed words: {:?}", seed);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    while let Some(item) = stream.recv().await {
        match item? {
            StreamItem::Value(value) => write!(out, "{}{}", value, cli.sep)?,
            StreamItem::Text(text) => write!(out, "{}", text)?,
            StreamItem::Bytes(bytes) => out.write_all(&bytes)?,
            StreamItem::State(words) => {
                if let Some(path) = &cli.snapshot {
                    statefile::save(path, &words)?;
                    debug!("snapshot written to {}", path.display());
                }
            }
        }
    }

    // A trailing newline is always appended before exit.
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
