//! Core LimitOrderBook implementation composing a bid and an ask side

use super::error::OrderBookError;
use super::level::PriceLevel;
use super::side::{BookSide, Direction};
use super::snapshot::OrderBookSnapshot;
use crate::utils::current_time_millis;
use pricelevel::Side;
use tracing::trace;

/// The LimitOrderBook keeps the aggregated resting size per price for both
/// the bid and the ask side of one instrument.
///
/// It never matches, fills or crosses: every call is an immediate update or
/// read of the two independent sides.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitOrderBook {
    /// The symbol or identifier for this order book
    symbol: String,

    /// Bid side price levels (buy interest), best is the highest price
    bids: BookSide,

    /// Ask side price levels (sell interest), best is the lowest price
    asks: BookSide,
}

impl LimitOrderBook {
    /// Create a new, empty order book for the given symbol
    pub fn new(symbol: &str) -> Self {
        Self::with_capacity(symbol, 0)
    }

    /// Create an empty order book reserving room for `levels` price levels per side
    pub fn with_capacity(symbol: &str, levels: usize) -> Self {
        Self {
            symbol: symbol.to_string(),
            bids: BookSide::with_capacity(Direction::BestIsMax, levels),
            asks: BookSide::with_capacity(Direction::BestIsMin, levels),
        }
    }

    /// Get the symbol of this order book
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Bid side of the book
    pub fn bids(&self) -> &BookSide {
        &self.bids
    }

    /// Ask side of the book
    pub fn asks(&self) -> &BookSide {
        &self.asks
    }

    /// The book side addressed by `side` (`Buy` is the bid side)
    pub fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Add `delta` to the bid size resting at `price`
    pub fn bid(&mut self, price: f64, delta: i64) -> Result<(), OrderBookError> {
        self.update(Side::Buy, price, delta)
    }

    /// Add `delta` to the ask size resting at `price`
    pub fn ask(&mut self, price: f64, delta: i64) -> Result<(), OrderBookError> {
        self.update(Side::Sell, price, delta)
    }

    /// Add `delta` to the size resting at `price` on `side`
    pub fn update(&mut self, side: Side, price: f64, delta: i64) -> Result<(), OrderBookError> {
        trace!(
            "Order book {}: {} {} at {}",
            self.symbol, side, delta, price
        );
        self.side_mut(side).upsert(price, delta)
    }

    /// Replace the bid size resting at `price` with `size`
    pub fn set_bid(&mut self, price: f64, size: u64) -> Result<(), OrderBookError> {
        trace!("Order book {}: set bid {} at {}", self.symbol, size, price);
        self.bids.replace(price, size)
    }

    /// Replace the ask size resting at `price` with `size`
    pub fn set_ask(&mut self, price: f64, size: u64) -> Result<(), OrderBookError> {
        trace!("Order book {}: set ask {} at {}", self.symbol, size, price);
        self.asks.replace(price, size)
    }

    /// Level resting exactly at `price` on `side`, tombstones included
    pub fn peek(&self, price: f64, side: Side) -> Option<PriceLevel> {
        self.side(side).peek(price)
    }

    /// Get the best bid price, if any bid has resting size
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.best().map(|level| level.price)
    }

    /// Get the best ask price, if any ask has resting size
    pub fn best_ask(&self) -> Option<f64> {
        self.asks.best().map(|level| level.price)
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
            _ => None,
        }
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// True when the best bid is at or above the best ask.
    ///
    /// The book does not prevent this state, it only reports it.
    pub fn is_crossed(&self) -> bool {
        matches!((self.best_bid(), self.best_ask()), (Some(bid), Some(ask)) if bid >= ask)
    }

    /// Detached copy of the book holding at most `levels` non-empty levels
    /// per side, starting from each side's best level.
    pub fn snapshot(&self, levels: usize) -> LimitOrderBook {
        trace!("Order book {}: snapshot of {} levels", self.symbol, levels);
        LimitOrderBook {
            symbol: self.symbol.clone(),
            bids: BookSide::from_best_first(Direction::BestIsMax, self.bids.snapshot(levels)),
            asks: BookSide::from_best_first(Direction::BestIsMin, self.asks.snapshot(levels)),
        }
    }

    /// Create a timestamped market-data snapshot of the best `depth` levels per side
    pub fn create_snapshot(&self, depth: usize) -> OrderBookSnapshot {
        OrderBookSnapshot {
            symbol: self.symbol.clone(),
            timestamp: current_time_millis(),
            bids: self.bids.snapshot(depth),
            asks: self.asks.snapshot(depth),
        }
    }
}
