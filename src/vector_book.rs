//! Sorted-array order book.
//!
//! Each side is a dense `Vec<Level>` kept in best-first order. Lookups are
//! binary searches; inserts and removals shift the tail, so churn near the
//! front of a deep book is O(n). The best price is always `levels[0]`.

use crate::command::Side;
use crate::order_book::{OrderBook, Variant};
use crate::price_level::{Level, Price, Qty};

/// One side of the sorted-array book
#[derive(Clone, Debug)]
pub struct VecSide {
    side: Side,
    levels: Vec<Level>,
}

impl VecSide {
    pub fn with_capacity(side: Side, capacity: usize) -> Self {
        Self {
            side,
            levels: Vec::with_capacity(capacity),
        }
    }

    /// Index of the first level that does not rank ahead of `price`.
    ///
    /// This is either the level at `price` or the insertion point for it.
    #[inline]
    fn search(&self, price: Price) -> usize {
        let side = self.side;
        self.levels.partition_point(|l| side.is_better(l.price, price))
    }

    /// Position of the level at exactly `price`, if present.
    #[inline]
    fn find(&self, price: Price) -> Option<usize> {
        let idx = self.search(price);
        match self.levels.get(idx) {
            Some(level) if level.price == price => Some(idx),
            _ => None,
        }
    }

    pub fn add(&mut self, price: Price, qty: Qty) {
        let idx = self.search(price);
        match self.levels.get_mut(idx) {
            Some(level) if level.price == price => {
                level.total_qty = level.total_qty.saturating_add(qty)
            }
            _ => self.levels.insert(idx, Level::new(price, qty)),
        }
    }

    pub fn cancel(&mut self, price: Price, qty: Qty) {
        if let Some(idx) = self.find(price) {
            let level = &mut self.levels[idx];
            level.total_qty -= qty;
            if level.is_drained() {
                self.levels.remove(idx);
            }
        }
    }

    /// Consume up to `qty` from the front, returning the unfilled remainder.
    pub fn consume(&mut self, mut qty: Qty) -> Qty {
        let mut drained = 0;
        for level in self.levels.iter_mut() {
            if qty <= 0 {
                break;
            }
            qty -= level.take(qty);
            if !level.is_drained() {
                break;
            }
            drained += 1;
        }
        // One shift for the whole sweep
        self.levels.drain(..drained);
        qty
    }

    #[inline]
    pub fn best(&self) -> Option<Price> {
        self.levels.first().map(|l| l.price)
    }

    #[inline]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn qty_at(&self, price: Price) -> Qty {
        self.find(price).map_or(0, |idx| self.levels[idx].total_qty)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }
}

/// Order book backed by two sorted arrays.
#[derive(Clone, Debug)]
pub struct VectorOrderBook {
    bids: VecSide,
    asks: VecSide,
}

impl VectorOrderBook {
    /// Default number of levels reserved per side
    pub const DEFAULT_CAPACITY: usize = 1024;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a book with `levels` slots pre-allocated per side
    pub fn with_capacity(levels: usize) -> Self {
        Self {
            bids: VecSide::with_capacity(Side::Bid, levels),
            asks: VecSide::with_capacity(Side::Ask, levels),
        }
    }

    #[inline]
    fn side(&self, side: Side) -> &VecSide {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    #[inline]
    fn side_mut(&mut self, side: Side) -> &mut VecSide {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }
}

impl Default for VectorOrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook for VectorOrderBook {
    fn variant(&self) -> Variant {
        Variant::Vector
    }

    #[inline]
    fn add_limit(&mut self, side: Side, price: Price, qty: Qty) {
        if qty <= 0 {
            return;
        }
        self.side_mut(side).add(price, qty);
    }

    #[inline]
    fn add_market(&mut self, side: Side, qty: Qty) {
        self.side_mut(side.opposite()).consume(qty);
    }

    #[inline]
    fn cancel(&mut self, side: Side, price: Price, qty: Qty) {
        self.side_mut(side).cancel(price, qty);
    }

    #[inline]
    fn best_bid(&self) -> Option<Price> {
        self.bids.best()
    }

    #[inline]
    fn best_ask(&self) -> Option<Price> {
        self.asks.best()
    }

    fn levels(&self, side: Side) -> Vec<Level> {
        self.side(side).levels().to_vec()
    }

    fn level_count(&self, side: Side) -> usize {
        self.side(side).len()
    }

    fn qty_at(&self, side: Side, price: Price) -> Qty {
        self.side(side).qty_at(price)
    }

    fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices(side: &VecSide) -> Vec<Price> {
        side.levels().iter().map(|l| l.price).collect()
    }

    #[test]
    fn test_bid_side_descending() {
        let mut bids = VecSide::with_capacity(Side::Bid, 8);
        for p in [100, 105, 95, 102, 98] {
            bids.add(p, 1);
        }
        assert_eq!(prices(&bids), vec![105, 102, 100, 98, 95]);
        assert_eq!(bids.best(), Some(105));
    }

    #[test]
    fn test_ask_side_ascending() {
        let mut asks = VecSide::with_capacity(Side::Ask, 8);
        for p in [100, 105, 95, 102, 98] {
            asks.add(p, 1);
        }
        assert_eq!(prices(&asks), vec![95, 98, 100, 102, 105]);
        assert_eq!(asks.best(), Some(95));
    }

    #[test]
    fn test_same_price_merges() {
        let mut asks = VecSide::with_capacity(Side::Ask, 8);
        asks.add(100, 10);
        asks.add(100, 15);
        assert_eq!(asks.len(), 1);
        assert_eq!(asks.qty_at(100), 25);
    }

    #[test]
    fn test_cancel_partial_and_full() {
        let mut bids = VecSide::with_capacity(Side::Bid, 8);
        bids.add(100, 10);
        bids.add(99, 10);

        bids.cancel(100, 4);
        assert_eq!(bids.qty_at(100), 6);

        // Oversized cancel removes the level instead of going negative
        bids.cancel(100, 50);
        assert_eq!(prices(&bids), vec![99]);
    }

    #[test]
    fn test_cancel_missing_price_is_noop() {
        let mut bids = VecSide::with_capacity(Side::Bid, 8);
        bids.add(100, 10);
        bids.add(98, 10);
        let before = bids.levels().to_vec();

        bids.cancel(99, 5);
        bids.cancel(1_000, 5);
        bids.cancel(-1_000, 5);
        assert_eq!(bids.levels(), &before[..]);
    }

    #[test]
    fn test_consume_sweeps_levels() {
        let mut asks = VecSide::with_capacity(Side::Ask, 8);
        asks.add(100, 5);
        asks.add(101, 5);
        asks.add(102, 5);

        let remaining = asks.consume(12);
        assert_eq!(remaining, 0);
        assert_eq!(asks.levels(), &[Level::new(102, 3)]);
    }

    #[test]
    fn test_consume_exhausts_side() {
        let mut bids = VecSide::with_capacity(Side::Bid, 8);
        bids.add(100, 5);
        bids.add(99, 5);

        let remaining = bids.consume(25);
        assert_eq!(remaining, 15);
        assert!(bids.is_empty());
        assert_eq!(bids.best(), None);
    }

    #[test]
    fn test_consume_exact_level_boundary() {
        let mut asks = VecSide::with_capacity(Side::Ask, 8);
        asks.add(100, 5);
        asks.add(101, 5);

        asks.consume(5);
        assert_eq!(asks.levels(), &[Level::new(101, 5)]);
    }

    #[test]
    fn test_market_hits_opposite_side() {
        let mut book = VectorOrderBook::new();
        book.add_limit(Side::Bid, 99, 10);
        book.add_limit(Side::Ask, 101, 10);

        book.add_market(Side::Bid, 4);
        assert_eq!(book.qty_at(Side::Ask, 101), 6);
        assert_eq!(book.qty_at(Side::Bid, 99), 10);

        book.add_market(Side::Ask, 10);
        assert_eq!(book.best_bid(), None);
        assert_eq!(book.best_ask(), Some(101));
    }

    #[test]
    fn test_non_positive_limit_ignored() {
        let mut book = VectorOrderBook::new();
        book.add_limit(Side::Bid, 100, 0);
        book.add_limit(Side::Bid, 100, -3);
        assert!(book.is_empty());
    }

    #[test]
    fn test_negative_prices_order() {
        let mut book = VectorOrderBook::with_capacity(4);
        book.add_limit(Side::Bid, -5, 1);
        book.add_limit(Side::Bid, -1, 1);
        book.add_limit(Side::Bid, -10, 1);
        assert_eq!(book.best_bid(), Some(-1));

        let bid_prices: Vec<Price> = book.levels(Side::Bid).iter().map(|l| l.price).collect();
        assert_eq!(bid_prices, vec![-1, -5, -10]);
    }
}
