//! Deterministic synthetic event stream.
//!
//! A ChaCha8 PRNG seeded from a single `u64` drives every choice, so the
//! same seed always replays the same sequence on every platform. No wall
//! clock or OS entropy is involved.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::command::{Event, Side};
use crate::price_level::{Price, Qty};

/// Centre of the synthetic price band
pub const MID_PRICE: Price = 10_000;
/// How far limit and cancel prices reach away from the mid
pub const BAND: Price = 50;
/// How far each side may reach through the mid (produces crossed books)
pub const OVERLAP: Price = 5;

const MAX_LIMIT_QTY: Qty = 100;
const MAX_MARKET_QTY: Qty = 200;

/// Infinite, seeded generator of order events.
///
/// Mix: 60% limit adds, 20% market orders, 20% cancels. Sides are 50/50.
#[derive(Clone, Debug)]
pub struct EventGenerator {
    rng: ChaCha8Rng,
}

impl EventGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Produce the next event in the sequence.
    pub fn next_event(&mut self) -> Event {
        let roll = self.rng.gen_range(0..100u32);
        let side = if self.rng.gen_bool(0.5) { Side::Bid } else { Side::Ask };

        if roll < 60 {
            let price = self.price_for(side);
            let qty = self.rng.gen_range(1..=MAX_LIMIT_QTY);
            Event::add_limit(side, price, qty)
        } else if roll < 80 {
            let qty = self.rng.gen_range(1..=MAX_MARKET_QTY);
            Event::market(side, qty)
        } else {
            let price = self.price_for(side);
            let qty = self.rng.gen_range(1..=MAX_LIMIT_QTY);
            Event::cancel(side, price, qty)
        }
    }

    /// Bids in `[mid - BAND, mid + OVERLAP)`, asks in `(mid - OVERLAP, mid + BAND]`.
    #[inline]
    fn price_for(&mut self, side: Side) -> Price {
        match side {
            Side::Bid => self.rng.gen_range(MID_PRICE - BAND..MID_PRICE + OVERLAP),
            Side::Ask => self.rng.gen_range(MID_PRICE - OVERLAP + 1..=MID_PRICE + BAND),
        }
    }
}

impl Iterator for EventGenerator {
    type Item = Event;

    #[inline]
    fn next(&mut self) -> Option<Event> {
        Some(self.next_event())
    }
}
