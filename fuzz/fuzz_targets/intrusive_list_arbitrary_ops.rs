#![no_main]

use arckit::ds::IntrusiveList;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on IntrusiveList
//
// Ops: push_front, pop_back, move_to_front, remove, get, clear. Slot ids are
// reused after removal, so a remembered id may name a newer element; the list
// must stay well-linked either way.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut list: IntrusiveList<u32> = IntrusiveList::new();
    let mut all_ids = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 7;
        let value = u32::from(data[idx + 1]);

        match op {
            0 => {
                let id = list.push_front(value);
                all_ids.push(id);

                assert_eq!(list.front(), Some(&value));
                assert_eq!(list.front_id(), Some(id));
                assert_eq!(list.get(id), Some(&value));
            }
            1 => {
                let old_len = list.len();
                let expected = list.back().copied();
                let popped = list.pop_back();

                assert_eq!(popped, expected);
                if popped.is_some() {
                    assert_eq!(list.len(), old_len - 1);
                } else {
                    assert_eq!(list.len(), 0);
                }
            }
            2 => {
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    if list.move_to_front(id) {
                        assert_eq!(list.front_id(), Some(id));
                    } else {
                        assert!(!list.contains(id));
                    }
                }
            }
            3 => {
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let old_len = list.len();
                    if list.remove(id).is_some() {
                        assert_eq!(list.len(), old_len - 1);
                        assert!(!list.contains(id));
                    }
                }
            }
            4 => {
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    assert_eq!(list.get(id).is_some(), list.contains(id));
                }
            }
            5 => {
                assert_eq!(list.iter().count(), list.len());
                assert_eq!(list.iter().next(), list.front());
            }
            6 => {
                list.clear();
                all_ids.clear();

                assert!(list.is_empty());
                assert_eq!(list.front(), None);
                assert_eq!(list.back(), None);
            }
            _ => unreachable!(),
        }

        assert!(list.check_links().is_ok());
        idx += 2;
    }
});
