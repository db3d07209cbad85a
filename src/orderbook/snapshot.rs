//! Order book snapshot for market data

use super::error::OrderBookError;
use super::level::PriceLevel;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A snapshot of the order book state at a specific point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// The symbol or identifier for this order book
    pub symbol: String,

    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    /// Bid levels, highest price first
    pub bids: Vec<PriceLevel>,

    /// Ask levels, lowest price first
    pub asks: Vec<PriceLevel>,
}

impl OrderBookSnapshot {
    /// Get the best bid price and size
    pub fn best_bid(&self) -> Option<(f64, u64)> {
        let bid = self.bids.first().map(|level| (level.price, level.size));
        trace!("best_bid: {:?}", bid);
        bid
    }

    /// Get the best ask price and size
    pub fn best_ask(&self) -> Option<(f64, u64)> {
        let ask = self.asks.first().map(|level| (level.price, level.size));
        trace!("best_ask: {:?}", ask);
        ask
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => Some((bid_price + ask_price) / 2.0),
            _ => None,
        }
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => Some(ask_price - bid_price),
            _ => None,
        }
    }

    /// Total resting size on the bid side, saturating at `u64::MAX`
    pub fn total_bid_size(&self) -> u64 {
        self.bids
            .iter()
            .fold(0u64, |total, level| total.saturating_add(level.size))
    }

    /// Total resting size on the ask side, saturating at `u64::MAX`
    pub fn total_ask_size(&self) -> u64 {
        self.asks
            .iter()
            .fold(0u64, |total, level| total.saturating_add(level.size))
    }

    /// Total value on the bid side (price * size)
    pub fn total_bid_value(&self) -> f64 {
        self.bids.iter().map(PriceLevel::value).sum()
    }

    /// Total value on the ask side (price * size)
    pub fn total_ask_value(&self) -> f64 {
        self.asks.iter().map(PriceLevel::value).sum()
    }

    /// Encode the snapshot as JSON
    pub fn to_json(&self) -> Result<String, OrderBookError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, OrderBookError> {
        Ok(serde_json::from_str(json)?)
    }
}
