//! Run reports: one human-readable line per run, optionally appended to CSV.

use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::order_book::Variant;
use crate::price_level::{Price, NO_PRICE};
use crate::stats::LatencySummary;

/// Outcome of one benchmark run
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub variant: Variant,
    /// Measured events (warm-up excluded)
    pub events: usize,
    pub seed: u64,
    /// Wall time of the measured phase
    pub elapsed: Duration,
    /// Events per second over the measured phase
    pub throughput: f64,
    pub latency: LatencySummary,
    pub best_bid: Option<Price>,
    pub best_ask: Option<Price>,
}

impl RunReport {
    /// Flatten into a CSV row stamped with `recorded_at`.
    pub fn to_record(&self, recorded_at: DateTime<Utc>) -> CsvRecord {
        CsvRecord {
            recorded_at,
            variant: self.variant.as_str(),
            events: self.events,
            seed: self.seed,
            elapsed_ns: self.elapsed.as_nanos() as u64,
            throughput_ev_s: self.throughput,
            min_ns: self.latency.min,
            median_ns: self.latency.median,
            p95_ns: self.latency.p95,
            p99_ns: self.latency.p99,
            p999_ns: self.latency.p999,
            max_ns: self.latency.max,
            best_bid: self.best_bid.unwrap_or(NO_PRICE),
            best_ask: self.best_ask.unwrap_or(NO_PRICE),
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "variant={} events={} throughput_ev_s={:.0} median_ns={} p95_ns={} p99_ns={} best_bid={} best_ask={}",
            self.variant,
            self.events,
            self.throughput,
            self.latency.median,
            self.latency.p95,
            self.latency.p99,
            self.best_bid.unwrap_or(NO_PRICE),
            self.best_ask.unwrap_or(NO_PRICE),
        )
    }
}

/// One CSV row
#[derive(Clone, Debug, Serialize)]
pub struct CsvRecord {
    pub recorded_at: DateTime<Utc>,
    pub variant: &'static str,
    pub events: usize,
    pub seed: u64,
    pub elapsed_ns: u64,
    pub throughput_ev_s: f64,
    pub min_ns: u64,
    pub median_ns: u64,
    pub p95_ns: u64,
    pub p99_ns: u64,
    pub p999_ns: u64,
    pub max_ns: u64,
    pub best_bid: Price,
    pub best_ask: Price,
}

/// Append `report` to the CSV file at `path`.
///
/// The header row is written only when the file is new or empty.
pub fn append_csv(path: &Path, report: &RunReport) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let write_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(write_headers)
        .from_writer(file);
    writer.serialize(report.to_record(Utc::now()))?;
    writer.flush()?;
    Ok(())
}
