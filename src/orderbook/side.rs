//! One side of the book: price levels kept sorted by ascending price

use super::error::OrderBookError;
use super::level::PriceLevel;
use tracing::{debug, trace, warn};

/// Which end of the price axis is the competitive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Lowest price is best (ask side)
    BestIsMin,
    /// Highest price is best (bid side)
    BestIsMax,
}

impl Direction {
    /// True when price `a` is strictly more competitive than price `b`
    pub fn is_better(&self, a: f64, b: f64) -> bool {
        match self {
            Direction::BestIsMin => a < b,
            Direction::BestIsMax => a > b,
        }
    }
}

/// Price levels of one market side.
///
/// Levels are stored in ascending price order whatever the direction, and
/// `head` designates the best level with positive size. Every level strictly
/// better than `head` holds zero size, so moving the head after an update
/// never requires a full rescan. Levels are never removed: a level whose size
/// falls to zero stays in place as a tombstone.
#[derive(Debug, Clone, PartialEq)]
pub struct BookSide {
    direction: Direction,
    levels: Vec<PriceLevel>,
    head: usize,
}

impl BookSide {
    /// Create an empty side
    pub fn new(direction: Direction) -> Self {
        Self::with_capacity(direction, 0)
    }

    /// Create an empty side with room for `capacity` levels
    pub fn with_capacity(direction: Direction, capacity: usize) -> Self {
        Self {
            direction,
            levels: Vec::with_capacity(capacity),
            head: 0,
        }
    }

    /// Build a detached side from levels ordered best-first.
    ///
    /// The input must already be sorted in the direction's best-first order
    /// and hold unique prices, as produced by [`BookSide::snapshot`].
    pub(crate) fn from_best_first(direction: Direction, mut levels: Vec<PriceLevel>) -> Self {
        let head = match direction {
            Direction::BestIsMin => 0,
            Direction::BestIsMax => {
                levels.reverse();
                levels.len().saturating_sub(1)
            }
        };
        Self {
            direction,
            levels,
            head,
        }
    }

    /// Direction this side is ordered by
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Index of the best level in the ascending level array
    pub fn head(&self) -> usize {
        self.head
    }

    /// All levels in ascending price order, tombstones included
    pub fn levels(&self) -> &[PriceLevel] {
        &self.levels
    }

    /// Number of price levels, tombstones included
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// True when no level was ever created on this side
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// True when at least one level has resting size
    pub fn has_liquidity(&self) -> bool {
        self.best().is_some()
    }

    /// Best level with positive size, if any
    pub fn best(&self) -> Option<PriceLevel> {
        self.levels
            .get(self.head)
            .filter(|level| level.size > 0)
            .copied()
    }

    /// Total resting size across all levels, saturating at `u64::MAX`
    pub fn total_size(&self) -> u64 {
        self.levels
            .iter()
            .fold(0u64, |total, level| total.saturating_add(level.size))
    }

    /// Closest existing level to `price`.
    ///
    /// Returns `None` when the side has no levels. Otherwise the index is
    /// either an exact match or the nearest neighbour by absolute distance,
    /// with ties going to the higher price; callers compare prices to tell
    /// the two apart.
    pub fn find(&self, price: f64) -> Option<usize> {
        let levels = &self.levels;
        let last = levels.len().checked_sub(1)?;

        if price <= levels[0].price {
            return Some(0);
        }
        if price >= levels[last].price {
            return Some(last);
        }

        let (mut lo, mut hi) = (0, levels.len());
        while lo < hi {
            let mid = (lo + hi) >> 1;
            let mid_price = levels[mid].price;

            if price == mid_price {
                return Some(mid);
            }
            if price < mid_price {
                if mid > 0 && price > levels[mid - 1].price {
                    return Some(self.closest(mid - 1, mid, price));
                }
                hi = mid;
            } else {
                if mid < last && price < levels[mid + 1].price {
                    return Some(self.closest(mid, mid + 1, price));
                }
                lo = mid + 1;
            }
        }

        Some(lo.min(last))
    }

    /// Pick between neighbours `a < b` straddling `price`
    fn closest(&self, a: usize, b: usize, price: f64) -> usize {
        if price - self.levels[a].price >= self.levels[b].price - price {
            b
        } else {
            a
        }
    }

    /// First level with positive size at or after `from`, walking away from
    /// the best end. Returns `from` unchanged when there is none.
    pub fn scan(&self, from: usize) -> usize {
        let found = match self.direction {
            Direction::BestIsMin => self.levels.get(from..).and_then(|rest| {
                rest.iter()
                    .position(|level| level.size > 0)
                    .map(|offset| from + offset)
            }),
            Direction::BestIsMax => {
                let end = from.saturating_add(1).min(self.levels.len());
                self.levels[..end].iter().rposition(|level| level.size > 0)
            }
        };
        found.unwrap_or(from)
    }

    /// Neighbour of `index` on the worse side, if it exists
    fn next_worse(&self, index: usize) -> Option<usize> {
        match self.direction {
            Direction::BestIsMin => Some(index + 1).filter(|&next| next < self.levels.len()),
            Direction::BestIsMax => index.checked_sub(1),
        }
    }

    /// Level resting exactly at `price`, tombstones included
    pub fn peek(&self, price: f64) -> Option<PriceLevel> {
        if price.is_nan() {
            return None;
        }
        self.find(price)
            .map(|index| self.levels[index])
            .filter(|level| level.price == price)
    }

    /// Add the signed `delta` to the size resting at `price`, creating the
    /// level when the price is new.
    pub fn upsert(&mut self, price: f64, delta: i64) -> Result<(), OrderBookError> {
        self.apply(price, |size| accumulate(price, size, delta))
    }

    /// Set the size resting at `price` to `size`, creating the level when
    /// the price is new.
    pub fn replace(&mut self, price: f64, size: u64) -> Result<(), OrderBookError> {
        self.apply(price, |_| Ok(size))
    }

    fn apply<F>(&mut self, price: f64, update: F) -> Result<(), OrderBookError>
    where
        F: FnOnce(u64) -> Result<u64, OrderBookError>,
    {
        if !price.is_finite() || price < 0.0 {
            warn!("Rejecting update at invalid price {}", price);
            return Err(OrderBookError::InvalidPrice(price));
        }

        let Some(index) = self.find(price) else {
            let size = update(0)?;
            self.levels.push(PriceLevel::new(price, size));
            self.head = 0;
            trace!("First level {} on {:?} side", self.levels[0], self.direction);
            return Ok(());
        };

        let existing = self.levels[index];
        if existing.price == price {
            let size = update(existing.size)?;
            self.levels[index].size = size;
            trace!(
                "Level {} updated from size {} on {:?} side",
                self.levels[index], existing.size, self.direction
            );
            self.refresh_head(index);
            return Ok(());
        }

        let size = update(0)?;
        let insert_at = if price < existing.price {
            index
        } else {
            index + 1
        };
        self.insert(insert_at, PriceLevel::new(price, size));
        Ok(())
    }

    /// Head maintenance after the level at `index` changed size in place
    fn refresh_head(&mut self, index: usize) {
        if index == self.head {
            if self.levels[index].size == 0 {
                self.head = self
                    .next_worse(index)
                    .map_or(index, |next| self.scan(next));
                if self.best().is_none() {
                    debug!("{:?} side has no resting size", self.direction);
                }
                trace!("Head moved from {} to {}", index, self.head);
            }
            return;
        }

        if self.levels[index].size > 0 && self.outranks_head(self.levels[index].price) {
            trace!("Head moved from {} to {}", self.head, index);
            self.head = index;
        }
    }

    fn insert(&mut self, index: usize, level: PriceLevel) {
        self.levels.insert(index, level);
        if index <= self.head {
            self.head += 1;
        }
        trace!(
            "Inserted level {} at {} on {:?} side",
            level, index, self.direction
        );

        let improves = match self.levels.get(self.head) {
            Some(head) if head.size > 0 => self.direction.is_better(level.price, head.price),
            _ => level.size > 0,
        };
        if improves {
            self.head = self.scan(index);
            trace!("Head moved to {}", self.head);
        }
    }

    /// True when a positive level at `price` should become the head
    fn outranks_head(&self, price: f64) -> bool {
        match self.levels.get(self.head) {
            Some(head) if head.size > 0 => self.direction.is_better(price, head.price),
            _ => true,
        }
    }

    /// Levels with positive size, best first
    pub fn iter_best_first(&self) -> impl Iterator<Item = &PriceLevel> + '_ {
        let none: &[PriceLevel] = &[];
        let (forward, backward) = match self.direction {
            Direction::BestIsMin => (self.levels.get(self.head..).unwrap_or(none), none),
            Direction::BestIsMax => (none, self.levels.get(..=self.head).unwrap_or(none)),
        };
        forward
            .iter()
            .chain(backward.iter().rev())
            .filter(|level| level.size > 0)
    }

    /// Up to `max_levels` levels with positive size, best first.
    ///
    /// Tombstones encountered on the way are skipped and not counted. The walk
    /// stops as soon as `max_levels` levels are collected, whether or not a
    /// tombstone follows, so the result never exceeds `max_levels`.
    pub fn snapshot(&self, max_levels: usize) -> Vec<PriceLevel> {
        let levels: Vec<PriceLevel> = self
            .iter_best_first()
            .take(max_levels)
            .copied()
            .collect();
        trace!(
            "Snapshot of {:?} side: {} of {} levels",
            self.direction,
            levels.len(),
            self.levels.len()
        );
        levels
    }
}

/// Resulting size after applying a signed change to `size`
fn accumulate(price: f64, size: u64, delta: i64) -> Result<u64, OrderBookError> {
    let result = if delta >= 0 {
        size.checked_add(delta.unsigned_abs())
            .ok_or(OrderBookError::SizeOverflow { price, size, delta })
    } else {
        size.checked_sub(delta.unsigned_abs())
            .ok_or(OrderBookError::SizeUnderflow { price, size, delta })
    };
    if let Err(err) = &result {
        warn!("Rejecting update: {}", err);
    }
    result
}
