//! Property tests checking side invariants against a simple map model
//! under random sequences of accumulate, replace and reduce updates.

use lob_rs::{BookSide, Direction, LimitOrderBook, PriceLevel, Side};
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Update {
    Add { tick: u32, size: u64 },
    Set { tick: u32, size: u64 },
    Reduce { tick: u32, size: u64 },
}

fn price_of(tick: u32) -> f64 {
    tick as f64 * 0.25
}

fn arb_update() -> impl Strategy<Value = Update> {
    prop_oneof![
        (0u32..60, 0u64..20).prop_map(|(tick, size)| Update::Add { tick, size }),
        (0u32..60, 0u64..20).prop_map(|(tick, size)| Update::Set { tick, size }),
        (0u32..60, 0u64..20).prop_map(|(tick, size)| Update::Reduce { tick, size }),
    ]
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::BestIsMin), Just(Direction::BestIsMax)]
}

/// Apply `update` to both the side and the model, keeping reductions valid
fn apply(side: &mut BookSide, model: &mut BTreeMap<u32, u64>, update: &Update) {
    match *update {
        Update::Add { tick, size } => {
            side.upsert(price_of(tick), size as i64).unwrap();
            *model.entry(tick).or_insert(0) += size;
        }
        Update::Set { tick, size } => {
            side.replace(price_of(tick), size).unwrap();
            model.insert(tick, size);
        }
        Update::Reduce { tick, size } => {
            let resting = model.get(&tick).copied().unwrap_or(0);
            let cut = size.min(resting);
            side.upsert(price_of(tick), -(cut as i64)).unwrap();
            *model.entry(tick).or_insert(0) -= cut;
        }
    }
}

/// Positive levels from the model, best first
fn expected_best_first(model: &BTreeMap<u32, u64>, direction: Direction) -> Vec<PriceLevel> {
    let positive = model
        .iter()
        .filter(|(_, size)| **size > 0)
        .map(|(tick, size)| PriceLevel::new(price_of(*tick), *size));
    match direction {
        Direction::BestIsMin => positive.collect(),
        Direction::BestIsMax => positive.rev().collect(),
    }
}

proptest! {
    #[test]
    fn prop_levels_sorted_and_unique(
        direction in arb_direction(),
        updates in prop::collection::vec(arb_update(), 1..200)
    ) {
        let mut side = BookSide::new(direction);
        let mut model = BTreeMap::new();

        for update in &updates {
            apply(&mut side, &mut model, update);
            let levels = side.levels();
            prop_assert!(levels.windows(2).all(|pair| pair[0].price < pair[1].price));
        }
        prop_assert_eq!(side.len(), model.len());
    }

    #[test]
    fn prop_sizes_match_model(
        direction in arb_direction(),
        updates in prop::collection::vec(arb_update(), 1..200)
    ) {
        let mut side = BookSide::new(direction);
        let mut model = BTreeMap::new();

        for update in &updates {
            apply(&mut side, &mut model, update);
        }
        for (tick, size) in &model {
            prop_assert_eq!(side.peek(price_of(*tick)), Some(PriceLevel::new(price_of(*tick), *size)));
        }
        prop_assert_eq!(side.total_size(), model.values().sum::<u64>());
    }

    #[test]
    fn prop_head_is_best_positive_level(
        direction in arb_direction(),
        updates in prop::collection::vec(arb_update(), 1..200)
    ) {
        let mut side = BookSide::new(direction);
        let mut model = BTreeMap::new();

        for update in &updates {
            apply(&mut side, &mut model, update);
            let expected = expected_best_first(&model, direction).first().copied();
            prop_assert_eq!(side.best(), expected);
            prop_assert_eq!(side.has_liquidity(), expected.is_some());
        }
    }

    #[test]
    fn prop_snapshot_bounded_ordered_and_positive(
        direction in arb_direction(),
        updates in prop::collection::vec(arb_update(), 1..200),
        depth in 0usize..40
    ) {
        let mut side = BookSide::new(direction);
        let mut model = BTreeMap::new();

        for update in &updates {
            apply(&mut side, &mut model, update);
        }

        let snapshot = side.snapshot(depth);
        prop_assert!(snapshot.len() <= depth);
        prop_assert!(snapshot.iter().all(|level| level.size > 0));
        match direction {
            Direction::BestIsMin => prop_assert!(snapshot.windows(2).all(|pair| pair[0].price <= pair[1].price)),
            Direction::BestIsMax => prop_assert!(snapshot.windows(2).all(|pair| pair[0].price >= pair[1].price)),
        }

        let mut expected = expected_best_first(&model, direction);
        expected.truncate(depth);
        prop_assert_eq!(snapshot, expected);
    }

    #[test]
    fn prop_accumulation_adds_sizes(
        direction in arb_direction(),
        tick in 0u32..60,
        first in 0i64..1_000,
        second in 0i64..1_000
    ) {
        let mut side = BookSide::new(direction);
        side.upsert(price_of(tick), first).unwrap();
        side.upsert(price_of(tick), second).unwrap();

        prop_assert_eq!(side.peek(price_of(tick)).map(|level| level.size), Some((first + second) as u64));
    }

    #[test]
    fn prop_peek_is_idempotent(
        updates in prop::collection::vec(arb_update(), 1..100),
        probe in 0u32..80
    ) {
        let mut book = LimitOrderBook::new("PROP");
        let mut model: BTreeMap<u32, u64> = BTreeMap::new();
        for update in &updates {
            match *update {
                Update::Add { tick, size } => {
                    book.ask(price_of(tick), size as i64).unwrap();
                    *model.entry(tick).or_insert(0) += size;
                }
                Update::Set { tick, size } => {
                    book.set_ask(price_of(tick), size).unwrap();
                    model.insert(tick, size);
                }
                Update::Reduce { tick, size } => {
                    let cut = size.min(model.get(&tick).copied().unwrap_or(0));
                    book.ask(price_of(tick), -(cut as i64)).unwrap();
                    *model.entry(tick).or_insert(0) -= cut;
                }
            }
        }

        let before = book.clone();
        let first = book.peek(price_of(probe), Side::Sell);
        let second = book.peek(price_of(probe), Side::Sell);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first.map(|level| level.size), model.get(&probe).copied());
        prop_assert_eq!(book, before);
    }
}
