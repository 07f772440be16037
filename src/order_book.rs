//! Order Book - the capability interface shared by every backing structure.
//!
//! Each variant keeps one bid side and one ask side of aggregated
//! [`Level`]s. Bids are ordered by descending price and asks by ascending
//! price, so the first level of either side is always its best price.
//! Variants differ only in how they store and search those levels; the
//! observable semantics are identical.

use std::fmt;
use std::str::FromStr;

use crate::command::{Event, EventKind, Side};
use crate::error::BenchError;
use crate::hash_book::HashOrderBook;
use crate::map_book::MapOrderBook;
use crate::price_level::{Level, Price, Qty, NO_PRICE};
use crate::vector_book::VectorOrderBook;

/// Aggregated limit order book.
///
/// All mutating operations are total: they never fail and return nothing.
/// A cancel at a missing price and a market order larger than the
/// available liquidity are silent no-ops for the unfilled part.
pub trait OrderBook {
    /// Which backing structure this is
    fn variant(&self) -> Variant;

    /// Add resting quantity at `price` on `side`.
    ///
    /// Merges into an existing level or inserts a new one in order.
    /// A non-positive `qty` is ignored.
    fn add_limit(&mut self, side: Side, price: Price, qty: Qty);

    /// Consume up to `qty` from the side opposite to `side`, best price first.
    ///
    /// Drained levels are removed. Any residual is dropped once the
    /// opposite side is empty.
    fn add_market(&mut self, side: Side, qty: Qty);

    /// Reduce the level at `price` on `side` by `qty`, removing it once it
    /// reaches zero or below. No-op if no level exists at `price`.
    fn cancel(&mut self, side: Side, price: Price, qty: Qty);

    /// Get the best bid price (highest buy price)
    fn best_bid(&self) -> Option<Price>;

    /// Get the best ask price (lowest sell price)
    fn best_ask(&self) -> Option<Price>;

    /// Snapshot of one side, best price first.
    fn levels(&self, side: Side) -> Vec<Level>;

    /// Number of price levels on a side
    fn level_count(&self, side: Side) -> usize;

    /// Resting quantity at a price (0 if absent)
    fn qty_at(&self, side: Side, price: Price) -> Qty;

    /// Remove every level. Allocated capacity is kept.
    fn clear(&mut self);

    // ========================================================================
    // Provided
    // ========================================================================

    /// Dispatch a generated event to the matching operation.
    #[inline]
    fn apply(&mut self, event: &Event) {
        match event.kind {
            EventKind::AddLimit => self.add_limit(event.side, event.price, event.qty),
            EventKind::Market => self.add_market(event.side, event.qty),
            EventKind::Cancel => self.cancel(event.side, event.price, event.qty),
        }
    }

    /// Get the best price on a given side
    #[inline]
    fn best_price(&self, side: Side) -> Option<Price> {
        match side {
            Side::Bid => self.best_bid(),
            Side::Ask => self.best_ask(),
        }
    }

    /// Best bid, or [`NO_PRICE`] (-1) when there are no bids.
    #[inline]
    fn best_bid_or_sentinel(&self) -> Price {
        self.best_bid().unwrap_or(NO_PRICE)
    }

    /// Best ask, or [`NO_PRICE`] (-1) when there are no asks.
    #[inline]
    fn best_ask_or_sentinel(&self) -> Price {
        self.best_ask().unwrap_or(NO_PRICE)
    }

    /// Total resting quantity across all levels of a side
    fn total_qty(&self, side: Side) -> Qty {
        self.levels(side).iter().map(|l| l.total_qty).sum()
    }

    /// Check if both sides are empty
    fn is_empty(&self) -> bool {
        self.level_count(Side::Bid) == 0 && self.level_count(Side::Ask) == 0
    }
}

// ============================================================================
// Variant selection
// ============================================================================

/// The backing structure under test
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// `BTreeMap` per side
    Map,
    /// Sorted `Vec` per side with binary search
    Vector,
    /// `FxHashMap` per side with a tracked best price
    Hash,
}

impl Variant {
    /// Every variant, in report order
    pub const ALL: [Variant; 3] = [Variant::Map, Variant::Vector, Variant::Hash];

    pub const fn as_str(self) -> &'static str {
        match self {
            Variant::Map => "map",
            Variant::Vector => "vector",
            Variant::Hash => "hash",
        }
    }

    /// Construct an empty book of this variant.
    pub fn build(self) -> Box<dyn OrderBook> {
        match self {
            Variant::Map => Box::new(MapOrderBook::new()),
            Variant::Vector => Box::new(VectorOrderBook::new()),
            Variant::Hash => Box::new(HashOrderBook::new()),
        }
    }

    /// Construct an empty book with room for `levels` price levels per side.
    pub fn build_with_capacity(self, levels: usize) -> Box<dyn OrderBook> {
        match self {
            // B-trees grow node by node; there is nothing to reserve
            Variant::Map => Box::new(MapOrderBook::new()),
            Variant::Vector => Box::new(VectorOrderBook::with_capacity(levels)),
            Variant::Hash => Box::new(HashOrderBook::with_capacity(levels)),
        }
    }
}

impl FromStr for Variant {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "map" => Ok(Variant::Map),
            "vector" => Ok(Variant::Vector),
            "hash" => Ok(Variant::Hash),
            other => Err(BenchError::UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
