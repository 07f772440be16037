//! Price Level - aggregated resting quantity at a single price.

/// Integer price in ticks. May be negative.
pub type Price = i64;

/// Aggregated quantity. Signed so that an oversized cancel can be detected
/// before the level is dropped.
pub type Qty = i64;

/// Rendering of an empty side's best price in reports.
pub const NO_PRICE: Price = -1;

/// A price level: the sum of all resting quantity at one price.
///
/// Individual orders are not tracked. A level stored in a book always
/// has `total_qty > 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Level {
    pub price: Price,
    pub total_qty: Qty,
}

impl Level {
    #[inline]
    pub const fn new(price: Price, total_qty: Qty) -> Self {
        Self { price, total_qty }
    }

    /// Take up to `wanted` from this level.
    ///
    /// # Returns
    /// The quantity actually taken. The level is drained when
    /// `total_qty` reaches zero.
    #[inline]
    pub fn take(&mut self, wanted: Qty) -> Qty {
        let taken = wanted.min(self.total_qty);
        self.total_qty -= taken;
        taken
    }

    #[inline]
    pub const fn is_drained(&self) -> bool {
        self.total_qty <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_partial() {
        let mut level = Level::new(100, 10);
        assert_eq!(level.take(3), 3);
        assert_eq!(level.total_qty, 7);
        assert!(!level.is_drained());
    }

    #[test]
    fn test_take_more_than_available() {
        let mut level = Level::new(100, 10);
        assert_eq!(level.take(25), 10);
        assert_eq!(level.total_qty, 0);
        assert!(level.is_drained());
    }

    #[test]
    fn test_negative_is_drained() {
        let level = Level::new(100, -2);
        assert!(level.is_drained());
    }
}
