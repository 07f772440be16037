//! Hash-map order book.
//!
//! Price levels live in an `FxHashMap` for O(1) point operations. The map
//! has no ordering, so each side caches its best price:
//! - insert: compare against the cache, O(1)
//! - remove a non-best level: cache untouched, O(1)
//! - remove the best level: rescan every key, O(n)
//!
//! Reading the best price is always O(1). Market orders pay the rescan once
//! per drained level.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use crate::command::Side;
use crate::order_book::{OrderBook, Variant};
use crate::price_level::{Level, Price, Qty};

/// One side of the hash book with a cached best price
#[derive(Clone, Debug)]
pub struct HashSide {
    side: Side,
    levels: FxHashMap<Price, Qty>,
    /// Cached best price (highest bid / lowest ask)
    best: Option<Price>,
}

impl HashSide {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: FxHashMap::default(),
            best: None,
        }
    }

    pub fn with_capacity(side: Side, levels: usize) -> Self {
        Self {
            side,
            levels: FxHashMap::with_capacity_and_hasher(levels, Default::default()),
            best: None,
        }
    }

    pub fn add(&mut self, price: Price, qty: Qty) {
        let total = self.levels.entry(price).or_insert(0);
        *total = total.saturating_add(qty);
        self.update_best_on_add(price);
    }

    pub fn cancel(&mut self, price: Price, qty: Qty) {
        if let Entry::Occupied(mut entry) = self.levels.entry(price) {
            *entry.get_mut() -= qty;
            if *entry.get() <= 0 {
                entry.remove();
                self.on_level_removed(price);
            }
        }
    }

    /// Consume up to `qty` from the best levels, returning the unfilled remainder.
    pub fn consume(&mut self, mut qty: Qty) -> Qty {
        while qty > 0 {
            let Some(best) = self.best else {
                break;
            };
            let Some(level_qty) = self.levels.get_mut(&best) else {
                break;
            };
            let taken = qty.min(*level_qty);
            *level_qty -= taken;
            qty -= taken;
            if *level_qty <= 0 {
                self.levels.remove(&best);
                self.recalculate_best();
            }
        }
        qty
    }

    #[inline]
    pub fn best(&self) -> Option<Price> {
        self.best
    }

    pub fn qty_at(&self, price: Price) -> Qty {
        self.levels.get(&price).copied().unwrap_or(0)
    }

    /// Levels sorted best-first. O(n log n).
    pub fn sorted_levels(&self) -> Vec<Level> {
        let mut levels: Vec<Level> = self
            .levels
            .iter()
            .map(|(&price, &qty)| Level::new(price, qty))
            .collect();
        match self.side {
            Side::Bid => levels.sort_unstable_by(|a, b| b.price.cmp(&a.price)),
            Side::Ask => levels.sort_unstable_by_key(|l| l.price),
        }
        levels
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
        self.best = None;
    }

    // ========================================================================
    // Best Price Management
    // ========================================================================

    #[inline]
    fn update_best_on_add(&mut self, price: Price) {
        let side = self.side;
        if self.best.map_or(true, |best| side.is_better(price, best)) {
            self.best = Some(price);
        }
    }

    #[inline]
    fn on_level_removed(&mut self, price: Price) {
        if self.best == Some(price) {
            self.recalculate_best();
        }
    }

    /// Recalculate the best price by scanning all levels.
    /// Called when the current best level is removed.
    fn recalculate_best(&mut self) {
        self.best = match self.side {
            Side::Bid => self.levels.keys().copied().max(),
            Side::Ask => self.levels.keys().copied().min(),
        };
    }
}

/// Order book backed by two hash maps.
#[derive(Clone, Debug)]
pub struct HashOrderBook {
    bids: HashSide,
    asks: HashSide,
}

impl HashOrderBook {
    pub fn new() -> Self {
        Self {
            bids: HashSide::new(Side::Bid),
            asks: HashSide::new(Side::Ask),
        }
    }

    /// Create a book with pre-allocated capacity per side
    pub fn with_capacity(levels: usize) -> Self {
        Self {
            bids: HashSide::with_capacity(Side::Bid, levels),
            asks: HashSide::with_capacity(Side::Ask, levels),
        }
    }

    #[inline]
    fn side(&self, side: Side) -> &HashSide {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    #[inline]
    fn side_mut(&mut self, side: Side) -> &mut HashSide {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }
}

impl Default for HashOrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook for HashOrderBook {
    fn variant(&self) -> Variant {
        Variant::Hash
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
        self.side(side).sorted_levels()
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
