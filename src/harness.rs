//! Harness - warm-up, sampled replay and reporting for one book variant.
//!
//! The timed loop does no logging and records into a pre-sized buffer, so
//! the only allocations it can trigger are the book's own.

use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::command::Side;
use crate::config::BenchConfig;
use crate::error::Result;
use crate::generator::EventGenerator;
use crate::order_book::OrderBook;
use crate::report::RunReport;
use crate::stats::LatencySamples;

/// Drives one benchmark run.
#[derive(Clone, Debug)]
pub struct Harness {
    config: BenchConfig,
}

impl Harness {
    /// Create a harness, rejecting invalid settings up front.
    pub fn new(config: BenchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Build the configured variant and run it.
    pub fn run(&self) -> Result<RunReport> {
        let mut book = self.config.variant.build();
        self.run_on(book.as_mut())
    }

    /// Run against a caller-supplied book.
    ///
    /// The book is used as-is; a non-empty book starts the warm-up from
    /// its current state.
    pub fn run_on(&self, book: &mut dyn OrderBook) -> Result<RunReport> {
        self.run_sampled(book).map(|(report, _)| report)
    }

    /// Like [`Harness::run_on`], also returning the sorted raw samples.
    pub fn run_sampled(&self, book: &mut dyn OrderBook) -> Result<(RunReport, LatencySamples)> {
        let config = &self.config;

        tracing::info!(
            variant = %book.variant(),
            events = config.events,
            warmup = config.warmup,
            seed = config.seed,
            "starting run"
        );

        if config.pin_core {
            pin_to_core();
        }

        let mut events = EventGenerator::new(config.seed);
        warm_up(book, &mut events, config.warmup);
        tracing::debug!(
            bid_levels = book.level_count(Side::Bid),
            ask_levels = book.level_count(Side::Ask),
            "warm-up complete"
        );

        let mut samples = LatencySamples::with_capacity(config.expected_samples());
        let elapsed = measure(book, &mut events, config, &mut samples);

        let latency = samples.summarize();
        let report = RunReport {
            variant: book.variant(),
            events: config.events,
            seed: config.seed,
            elapsed,
            throughput: throughput(config.events, elapsed),
            latency,
            best_bid: book.best_bid(),
            best_ask: book.best_ask(),
        };

        tracing::info!(
            variant = %report.variant,
            throughput_ev_s = report.throughput,
            p99_ns = report.latency.p99,
            "run complete"
        );

        Ok((report, samples))
    }
}

/// Apply `count` events without timing them.
pub fn warm_up(book: &mut dyn OrderBook, events: &mut EventGenerator, count: usize) {
    for _ in 0..count {
        let event = events.next_event();
        book.apply(&event);
    }
}

/// Measured phase. Returns the wall time of the whole phase.
fn measure(
    book: &mut dyn OrderBook,
    events: &mut EventGenerator,
    config: &BenchConfig,
    samples: &mut LatencySamples,
) -> Duration {
    let start = Instant::now();
    for i in 0..config.events {
        let event = events.next_event();
        if i % config.sample_every == 0 {
            let t0 = Instant::now();
            book.apply(black_box(&event));
            samples.record(t0.elapsed().as_nanos() as u64);
        } else {
            book.apply(black_box(&event));
        }
    }
    start.elapsed()
}

/// Events per second over `elapsed`; 0 for a zero-length phase.
pub fn throughput(events: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        events as f64 / secs
    } else {
        0.0
    }
}

/// Pin the current thread to the last available CPU core.
///
/// The last core is typically isolated from OS interrupts.
pub fn pin_to_core() {
    match core_affinity::get_core_ids().and_then(|ids| ids.last().copied()) {
        Some(core) => {
            let pinned = core_affinity::set_for_current(core);
            tracing::debug!(core = core.id, pinned, "pinned benchmark thread");
        }
        None => tracing::warn!("no CPU core ids available; running unpinned"),
    }
}
