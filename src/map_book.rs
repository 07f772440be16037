//! Ordered-map order book.
//!
//! Each side is a `BTreeMap` whose key order puts the best price first:
//! asks key on the raw price, bids on `Reverse<Price>`. Insert, lookup and
//! removal are O(log n) with no shifting.

use std::cmp::Reverse;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::command::Side;
use crate::order_book::{OrderBook, Variant};
use crate::price_level::{Level, Price, Qty};

/// Map key whose `Ord` encodes a side's priority.
pub trait PriceKey: Ord + Copy {
    fn from_price(price: Price) -> Self;
    fn price(self) -> Price;
}

/// Ascending key (asks)
impl PriceKey for Price {
    #[inline]
    fn from_price(price: Price) -> Self {
        price
    }

    #[inline]
    fn price(self) -> Price {
        self
    }
}

/// Descending key (bids)
impl PriceKey for Reverse<Price> {
    #[inline]
    fn from_price(price: Price) -> Self {
        Reverse(price)
    }

    #[inline]
    fn price(self) -> Price {
        self.0
    }
}

/// One side of the ordered-map book
#[derive(Clone, Debug, Default)]
pub struct MapSide<K: PriceKey> {
    levels: BTreeMap<K, Qty>,
}

impl<K: PriceKey> MapSide<K> {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, price: Price, qty: Qty) {
        let total = self.levels.entry(K::from_price(price)).or_insert(0);
        *total = total.saturating_add(qty);
    }

    pub fn cancel(&mut self, price: Price, qty: Qty) {
        if let Entry::Occupied(mut entry) = self.levels.entry(K::from_price(price)) {
            *entry.get_mut() -= qty;
            if *entry.get() <= 0 {
                entry.remove();
            }
        }
    }

    /// Consume up to `qty` from the best levels, returning the unfilled remainder.
    pub fn consume(&mut self, mut qty: Qty) -> Qty {
        while qty > 0 {
            let Some(mut best) = self.levels.first_entry() else {
                break;
            };
            let taken = qty.min(*best.get());
            *best.get_mut() -= taken;
            qty -= taken;
            if *best.get() <= 0 {
                best.remove();
            }
        }
        qty
    }

    #[inline]
    pub fn best(&self) -> Option<Price> {
        self.levels.first_key_value().map(|(k, _)| k.price())
    }

    pub fn qty_at(&self, price: Price) -> Qty {
        self.levels.get(&K::from_price(price)).copied().unwrap_or(0)
    }

    /// Levels in best-first order
    pub fn iter(&self) -> impl Iterator<Item = Level> + '_ {
        self.levels.iter().map(|(k, &qty)| Level::new(k.price(), qty))
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

/// Order book backed by two ordered maps.
#[derive(Clone, Debug, Default)]
pub struct MapOrderBook {
    bids: MapSide<Reverse<Price>>,
    asks: MapSide<Price>,
}

impl MapOrderBook {
    pub fn new() -> Self {
        Self {
            bids: MapSide::new(),
            asks: MapSide::new(),
        }
    }
}

impl OrderBook for MapOrderBook {
    fn variant(&self) -> Variant {
        Variant::Map
    }

    #[inline]
    fn add_limit(&mut self, side: Side, price: Price, qty: Qty) {
        if qty <= 0 {
            return;
        }
        match side {
            Side::Bid => self.bids.add(price, qty),
            Side::Ask => self.asks.add(price, qty),
        }
    }

    #[inline]
    fn add_market(&mut self, side: Side, qty: Qty) {
        // A buy lifts the asks, a sell hits the bids
        match side {
            Side::Bid => self.asks.consume(qty),
            Side::Ask => self.bids.consume(qty),
        };
    }

    #[inline]
    fn cancel(&mut self, side: Side, price: Price, qty: Qty) {
        match side {
            Side::Bid => self.bids.cancel(price, qty),
            Side::Ask => self.asks.cancel(price, qty),
        }
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
        match side {
            Side::Bid => self.bids.iter().collect(),
            Side::Ask => self.asks.iter().collect(),
        }
    }

    fn level_count(&self, side: Side) -> usize {
        match side {
            Side::Bid => self.bids.len(),
            Side::Ask => self.asks.len(),
        }
    }

    fn qty_at(&self, side: Side, price: Price) -> Qty {
        match side {
            Side::Bid => self.bids.qty_at(price),
            Side::Ask => self.asks.qty_at(price),
        }
    }

    fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
    }
}
