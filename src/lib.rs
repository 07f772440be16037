//! # lob-bench
//!
//! A deterministic microbenchmark harness comparing backing structures for
//! an aggregated limit order book.
//!
//! ## Variants
//!
//! - **vector**: sorted `Vec` per side, binary search, O(n) shifting
//! - **map**: `BTreeMap` per side, O(log n) everywhere
//! - **hash**: `FxHashMap` per side with a cached best price, O(1) point
//!   operations and an O(n) rescan when the best level disappears
//!
//! All three implement [`OrderBook`] with identical semantics, so the
//! numbers measure only the structure.
//!
//! ## Measurement
//!
//! ```text
//! [EventGenerator(seed)] --> warm-up (untimed) --> measured phase
//!                                                   |  every Nth event timed
//!                                                   v
//!                                  [LatencySamples] --> RunReport
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod generator;
pub mod harness;
pub mod hash_book;
pub mod map_book;
pub mod order_book;
pub mod price_level;
pub mod report;
pub mod stats;
pub mod vector_book;

// Re-exports for convenience
pub use command::{Event, EventKind, Side};
pub use config::{BenchConfig, CliArgs};
pub use error::{BenchError, Result};
pub use generator::EventGenerator;
pub use harness::Harness;
pub use hash_book::HashOrderBook;
pub use map_book::MapOrderBook;
pub use order_book::{OrderBook, Variant};
pub use price_level::{Level, Price, Qty, NO_PRICE};
pub use report::RunReport;
pub use stats::{LatencySamples, LatencySummary};
pub use vector_book::VectorOrderBook;
