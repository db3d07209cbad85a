//! Order book error types

use std::fmt;

/// Errors that can occur while mutating the OrderBook
#[derive(Debug, Clone, PartialEq)]
pub enum OrderBookError {
    /// Price is NaN, infinite or negative and cannot be ordered
    InvalidPrice(f64),

    /// An accumulating update would leave a level with negative size
    SizeUnderflow {
        /// Price of the level
        price: f64,
        /// Size resting at the level before the update
        size: u64,
        /// Signed change that was requested
        delta: i64,
    },

    /// An accumulating update would overflow the level size
    SizeOverflow {
        /// Price of the level
        price: f64,
        /// Size resting at the level before the update
        size: u64,
        /// Signed change that was requested
        delta: i64,
    },

    /// Snapshot could not be encoded or decoded
    Serialization {
        /// Description of the error
        message: String,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::InvalidPrice(price) => write!(f, "Invalid price: {}", price),
            OrderBookError::SizeUnderflow { price, size, delta } => {
                write!(
                    f,
                    "Size underflow at {}: resting {} cannot absorb {}",
                    price, size, delta
                )
            }
            OrderBookError::SizeOverflow { price, size, delta } => {
                write!(
                    f,
                    "Size overflow at {}: resting {} cannot absorb {}",
                    price, size, delta
                )
            }
            OrderBookError::Serialization { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for OrderBookError {}

impl From<serde_json::Error> for OrderBookError {
    fn from(err: serde_json::Error) -> Self {
        OrderBookError::Serialization {
            message: err.to_string(),
        }
    }
}
