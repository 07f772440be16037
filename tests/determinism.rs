//! Determinism Test - cross-variant equivalence on a seeded event stream.
//!
//! The three variants exist purely as performance alternatives, so replaying
//! the same events must leave them with the same best prices after every
//! single event and the same levels at the end.

use lob_bench::{Event, EventGenerator, Harness, BenchConfig, OrderBook, Side, Variant};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hash of both sides' full level snapshots
fn state_hash(book: &dyn OrderBook) -> u64 {
    let mut hasher = DefaultHasher::new();
    for side in [Side::Bid, Side::Ask] {
        for level in book.levels(side) {
            level.price.hash(&mut hasher);
            level.total_qty.hash(&mut hasher);
        }
        "|".hash(&mut hasher);
    }
    hasher.finish()
}

fn replay_lockstep(seed: u64, count: usize) -> Vec<Box<dyn OrderBook>> {
    let events: Vec<Event> = EventGenerator::new(seed).take(count).collect();
    let mut books: Vec<Box<dyn OrderBook>> = Variant::ALL.iter().map(|v| v.build()).collect();

    for (i, event) in events.iter().enumerate() {
        for book in books.iter_mut() {
            book.apply(event);
        }
        let bid = books[0].best_bid();
        let ask = books[0].best_ask();
        for book in &books[1..] {
            assert_eq!(
                book.best_bid(), bid,
                "best_bid mismatch after event {} ({:?}) on {}", i, event, book.variant()
            );
            assert_eq!(
                book.best_ask(), ask,
                "best_ask mismatch after event {} ({:?}) on {}", i, event, book.variant()
            );
        }
    }
    books
}

#[test]
fn test_variants_agree_every_event_small() {
    let books = replay_lockstep(42, 20_000);

    let first = state_hash(books[0].as_ref());
    for book in &books[1..] {
        assert_eq!(state_hash(book.as_ref()), first, "state mismatch on {}", book.variant());
    }
}

#[test]
fn test_variants_agree_many_seeds() {
    for seed in [0u64, 1, 7, 0xDEADBEEF, 0xCAFEBABE] {
        let books = replay_lockstep(seed, 5_000);
        for side in [Side::Bid, Side::Ask] {
            let expected = books[0].levels(side);
            for book in &books[1..] {
                assert_eq!(book.levels(side), expected, "seed {seed} {side:?} on {}", book.variant());
            }
        }
    }
}

#[test]
fn test_replay_is_repeatable() {
    const SEED: u64 = 0xDEADBEEF;
    const RUNS: usize = 5;

    let hashes: Vec<u64> = (0..RUNS)
        .map(|_| {
            let mut book = Variant::Vector.build();
            for event in EventGenerator::new(SEED).take(10_000) {
                book.apply(&event);
            }
            state_hash(book.as_ref())
        })
        .collect();

    for (run, hash) in hashes.iter().enumerate() {
        assert_eq!(*hash, hashes[0], "State hash mismatch on run {}", run);
    }
}

#[test]
fn test_different_seeds_produce_different_results() {
    let mut a = Variant::Map.build();
    let mut b = Variant::Map.build();
    for event in EventGenerator::new(1).take(5_000) {
        a.apply(&event);
    }
    for event in EventGenerator::new(2).take(5_000) {
        b.apply(&event);
    }
    assert_ne!(state_hash(a.as_ref()), state_hash(b.as_ref()));
}

#[test]
fn test_harness_runs_agree_on_final_prices() {
    let reports: Vec<_> = Variant::ALL
        .iter()
        .map(|&variant| {
            let config = BenchConfig::new(variant)
                .with_events(50_000)
                .with_warmup(10_000)
                .with_seed(42);
            Harness::new(config).unwrap().run().unwrap()
        })
        .collect();

    for report in &reports[1..] {
        assert_eq!(report.best_bid, reports[0].best_bid, "{}", report.variant);
        assert_eq!(report.best_ask, reports[0].best_ask, "{}", report.variant);
    }
}
