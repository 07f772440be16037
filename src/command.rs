//! Event types consumed by the order book variants.
//!
//! Events are produced by the generator and applied once; the book
//! never retains them.

use crate::price_level::{Price, Qty};

/// Order side (bid = buy, ask = sell)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    /// Buy side (bids)
    Bid = 0,
    /// Sell side (asks)
    Ask = 1,
}

impl Side {
    /// Returns the opposite side
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }

    /// Side for an `is_buy` flag.
    #[inline]
    pub const fn from_is_buy(is_buy: bool) -> Self {
        if is_buy {
            Side::Bid
        } else {
            Side::Ask
        }
    }

    #[inline]
    pub const fn is_buy(self) -> bool {
        matches!(self, Side::Bid)
    }

    /// Returns true if price `a` ranks strictly ahead of price `b` on this side.
    ///
    /// Bids rank higher prices first, asks rank lower prices first.
    #[inline]
    pub const fn is_better(self, a: Price, b: Price) -> bool {
        match self {
            Side::Bid => a > b,
            Side::Ask => a < b,
        }
    }
}

// ============================================================================
// Events
// ============================================================================

/// Kind of synthetic order event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventKind {
    /// Rest liquidity at a price
    AddLimit = 0,
    /// Consume liquidity from the opposite side
    Market = 1,
    /// Remove resting quantity at a price
    Cancel = 2,
}

/// A single synthetic order event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Event {
    pub kind: EventKind,
    /// Side of the aggressor (for `Market`) or of the resting level
    pub side: Side,
    /// Ignored for `Market`
    pub price: Price,
    /// Always positive
    pub qty: Qty,
}

impl Event {
    pub const fn add_limit(side: Side, price: Price, qty: Qty) -> Self {
        Self { kind: EventKind::AddLimit, side, price, qty }
    }

    pub const fn market(side: Side, qty: Qty) -> Self {
        Self { kind: EventKind::Market, side, price: 0, qty }
    }

    pub const fn cancel(side: Side, price: Price, qty: Qty) -> Self {
        Self { kind: EventKind::Cancel, side, price, qty }
    }
}
