//! Run configuration and the command line that produces it.

use std::path::PathBuf;

use clap::Parser;

use crate::error::{BenchError, Result};
use crate::order_book::Variant;

/// Validated settings for one benchmark run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    pub variant: Variant,
    /// Events applied in the measured phase
    pub events: usize,
    /// Events applied before timing starts
    pub warmup: usize,
    /// Time every Nth measured event
    pub sample_every: usize,
    /// Event generator seed
    pub seed: u64,
    /// Pin the benchmark thread to the last CPU core
    pub pin_core: bool,
}

impl BenchConfig {
    pub const DEFAULT_EVENTS: usize = 100_000;
    pub const DEFAULT_WARMUP: usize = 10_000;
    pub const DEFAULT_SAMPLE_EVERY: usize = 100;
    pub const DEFAULT_SEED: u64 = 42;

    /// Defaults for a given variant
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            events: Self::DEFAULT_EVENTS,
            warmup: Self::DEFAULT_WARMUP,
            sample_every: Self::DEFAULT_SAMPLE_EVERY,
            seed: Self::DEFAULT_SEED,
            pin_core: false,
        }
    }

    pub fn with_events(mut self, events: usize) -> Self {
        self.events = events;
        self
    }

    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    pub fn with_sample_every(mut self, sample_every: usize) -> Self {
        self.sample_every = sample_every;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.events == 0 {
            return Err(BenchError::InvalidConfig("events must be greater than zero"));
        }
        if self.sample_every == 0 {
            return Err(BenchError::InvalidConfig("sample-every must be greater than zero"));
        }
        Ok(())
    }

    /// Number of latency samples the measured phase will take
    pub fn expected_samples(&self) -> usize {
        self.events.div_ceil(self.sample_every.max(1))
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self::new(Variant::Map)
    }
}

/// Order book structure microbenchmark
#[derive(Parser, Debug, Clone)]
#[command(name = "lob-bench")]
#[command(version)]
#[command(about = "Compare order book backing structures under a synthetic event stream", long_about = None)]
pub struct CliArgs {
    /// Backing structure: map, vector or hash
    #[arg(long, default_value = "map")]
    pub variant: String,

    /// Events in the measured phase
    #[arg(long, default_value_t = BenchConfig::DEFAULT_EVENTS)]
    pub events: usize,

    /// Untimed warm-up events
    #[arg(long, default_value_t = BenchConfig::DEFAULT_WARMUP)]
    pub warmup: usize,

    /// Sample the latency of every Nth event
    #[arg(long, default_value_t = BenchConfig::DEFAULT_SAMPLE_EVERY)]
    pub sample_every: usize,

    /// Event generator seed
    #[arg(long, default_value_t = BenchConfig::DEFAULT_SEED)]
    pub seed: u64,

    /// Pin to the last CPU core
    #[arg(long, default_value_t = false)]
    pub pin_core: bool,

    /// Append the result to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Log level (RUST_LOG overrides)
    #[arg(short = 'l', long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: String,
}

impl CliArgs {
    /// Parse the variant and validate the numeric settings.
    pub fn to_config(&self) -> Result<BenchConfig> {
        let config = BenchConfig {
            variant: self.variant.parse()?,
            events: self.events,
            warmup: self.warmup,
            sample_every: self.sample_every,
            seed: self.seed,
            pin_core: self.pin_core,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `level` when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so report lines on stdout stay clean
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
