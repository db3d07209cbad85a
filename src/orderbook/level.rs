//! Aggregated resting size at a single price

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate resting size at one discrete price on one side of the book.
///
/// A level whose `size` has dropped to zero stays in its side as a
/// tombstone; it is still found by `peek` but never shows up in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Price of the level
    pub price: f64,
    /// Total resting size at this price
    pub size: u64,
}

impl PriceLevel {
    /// Create a level at `price` holding `size`
    pub fn new(price: f64, size: u64) -> Self {
        Self { price, size }
    }

    /// True when nothing rests at this price anymore
    pub fn is_tombstone(&self) -> bool {
        self.size == 0
    }

    /// Notional value of the level (price * size)
    pub fn value(&self) -> f64 {
        self.price * self.size as f64
    }
}

impl fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.size, self.price)
    }
}
