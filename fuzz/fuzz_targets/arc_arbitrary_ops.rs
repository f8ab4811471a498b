#![no_main]

use arckit::builder::{AdaptStep, ArcBuilder, InitialPivot};
use arckit::policy::arc::EntryState;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary get/set/delete/peek/clear sequences on ArcCache
//
// Byte 0 picks the capacity and tuning; then each (op, key) byte pair is one
// operation. Every structural and policy invariant is checked after each op.
fuzz_target!(|data: &[u8]| {
    let Some((&config, ops)) = data.split_first() else {
        return;
    };

    let capacity = usize::from(config % 32) + 1;
    let initial_pivot = if config & 0x20 == 0 {
        InitialPivot::Zero
    } else {
        InitialPivot::Half
    };
    let adapt_step = if config & 0x40 == 0 {
        AdaptStep::Ratio
    } else {
        AdaptStep::Unit
    };
    let mut cache = ArcBuilder::new(capacity)
        .initial_pivot(initial_pivot)
        .adapt_step(adapt_step)
        .build::<u8, u16>();

    for pair in ops.chunks_exact(2) {
        let (op, key) = (pair[0], pair[1]);
        let value = u16::from(op) << 8 | u16::from(key);

        match op % 8 {
            0..=2 => {
                let before = cache.state(&key);
                let old = cache.set(key, value);
                assert_eq!(old.is_some(), before.list().is_some_and(|list| list.is_live()));
                assert_eq!(cache.peek(&key), Some(&value));
                let expected = match before {
                    EntryState::Absent => EntryState::LiveRecency,
                    _ => EntryState::LiveFrequency,
                };
                assert_eq!(cache.state(&key), expected);
            }
            3..=5 => {
                let expected = cache.peek(&key).copied();
                assert_eq!(cache.get(&key).copied(), expected);
                if expected.is_some() {
                    assert_eq!(cache.state(&key), EntryState::LiveFrequency);
                }
            }
            6 => {
                let pivot = cache.pivot();
                let expected = cache.peek(&key).copied();
                assert_eq!(cache.delete(&key), expected);
                assert_eq!(cache.state(&key), EntryState::Absent);
                assert_eq!(cache.pivot(), pivot);
            }
            7 => {
                if key == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                    assert_eq!(cache.ghost_len(), 0);
                }
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        if let Err(e) = cache.check_invariants() {
            panic!("invariant violated: {}", e);
        }
    }
});
