//! # Sorted Price-Level Limit Order Book
//!
//! A compact, single-threaded limit order book that keeps the aggregated
//! resting size per price for the bid and ask sides of one instrument. It is
//! meant to sit behind a market-data feed handler: the handler decodes
//! exchange messages into `(price, size, side)` updates and posts them here,
//! then reads the best prices or a depth-bounded snapshot.
//!
//! ## Key Features
//!
//! - **One side type for both directions**: [`BookSide`] stores levels in
//!   ascending price order and is parameterized by a [`Direction`]. Asks use
//!   `BestIsMin`, bids use `BestIsMax`.
//!
//! - **Binary search with closest match**: price lookup runs in `O(log n)` and,
//!   on a miss, reports the nearest existing level so the caller can decide
//!   whether to insert before or after it.
//!
//! - **Head tracking**: each side keeps the index of its best non-empty level
//!   up to date on every update, so best-price queries are `O(1)` and never
//!   rescan the book.
//!
//! - **Tombstones**: a level whose size falls to zero is kept in place. It is
//!   still visible to [`LimitOrderBook::peek`] but skipped by snapshots.
//!
//! - **Detached snapshots**: [`LimitOrderBook::snapshot`] copies at most `n`
//!   non-empty levels per side into an independent book, and
//!   [`LimitOrderBook::create_snapshot`] produces a serializable
//!   [`OrderBookSnapshot`] for market-data consumers.
//!
//! ## Size semantics
//!
//! [`LimitOrderBook::bid`] and [`LimitOrderBook::ask`] accumulate a signed
//! delta into the level, so partial cancels are posted as negative deltas.
//! [`LimitOrderBook::set_bid`] and [`LimitOrderBook::set_ask`] replace the
//! resting size outright. A level never goes below zero; such an update is
//! rejected with [`OrderBookError::SizeUnderflow`].
//!
//! ## Example
//!
//! ```
//! use lob_rs::{LimitOrderBook, Side};
//!
//! let mut book = LimitOrderBook::new("BTC/USD");
//! book.ask(100.0, 5).unwrap();
//! book.ask(99.0, 3).unwrap();
//! book.bid(98.0, 7).unwrap();
//!
//! assert_eq!(book.best_ask(), Some(99.0));
//! assert_eq!(book.best_bid(), Some(98.0));
//!
//! let top = book.snapshot(1);
//! assert_eq!(top.asks().snapshot(10).len(), 1);
//! assert_eq!(book.peek(100.0, Side::Sell).map(|level| level.size), Some(5));
//! ```
//!
//! ## Concurrency
//!
//! The book holds plain owned state and takes `&mut self` for updates. Callers
//! that share a book between threads serialize access themselves, for example
//! with one lock per book or a single writer task. Snapshots copy their data
//! and can be handed to readers freely.

pub mod orderbook;

mod utils;

pub use orderbook::{
    BookSide, Direction, LimitOrderBook, OrderBookError, OrderBookSnapshot, PriceLevel,
};
pub use pricelevel::Side;
pub use utils::current_time_millis;
