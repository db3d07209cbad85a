//! LimitOrderBook implementation built from two sorted price-level sides.

pub mod book;
mod error;
mod level;
pub mod side;
mod snapshot;

pub use book::LimitOrderBook;
pub use error::OrderBookError;
pub use level::PriceLevel;
pub use side::{BookSide, Direction};
pub use snapshot::OrderBookSnapshot;
