//! One half of an ARC cache: a key index over a recency list and a frequency list.
//!
//! The same type backs both halves. The live half stores values
//! (`Segment<K, V>`); the ghost half stores keys only (`Segment<K, ()>`).
//! A segment has no policy of its own: the caller chooses which list to push
//! to, pop from, or promote within.
//!
//! ```text
//!   table: FxHashMap<K, Handle>
//!   ┌─────┬──────────────────────┐
//!   │ "a" │ Handle(Recency, #0)  │──► recency:   [a] ◄──► [c]      front = newest
//!   │ "b" │ Handle(Frequency, #0)│──► frequency: [b]               back  = next victim
//!   │ "c" │ Handle(Recency, #1)  │
//!   └─────┴──────────────────────┘
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
use crate::error::InvariantError;

/// Which discipline an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// Seen once since admission (MRU side).
    Recency,
    /// Seen at least twice, or re-admitted from a ghost list (MFU side).
    Frequency,
}

/// The unit of storage in a segment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
    pub class: Class,
}

/// Position of an entry: its list and its slot in that list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    class: Class,
    slot: SlotId,
}

impl Handle {
    pub fn class(self) -> Class {
        self.class
    }
}

#[derive(Debug)]
pub struct Segment<K, V> {
    table: FxHashMap<K, Handle>,
    recency: IntrusiveList<Entry<K, V>>,
    frequency: IntrusiveList<Entry<K, V>>,
}

impl<K, V> Segment<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty segment sized for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            recency: IntrusiveList::with_capacity(capacity),
            frequency: IntrusiveList::with_capacity(capacity),
        }
    }

    /// Total entries across both lists.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn list_len(&self, class: Class) -> usize {
        self.list(class).len()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.table.contains_key(key)
    }

    pub fn handle(&self, key: &K) -> Option<Handle> {
        self.table.get(key).copied()
    }

    pub fn get(&self, handle: Handle) -> Option<&Entry<K, V>> {
        self.list(handle.class).get(handle.slot)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Entry<K, V>> {
        self.list_mut(handle.class).get_mut(handle.slot)
    }

    /// Keys of one list, front (newest) to back (next victim).
    pub fn keys(&self, class: Class) -> impl Iterator<Item = &K> + '_ {
        self.list(class).iter().map(|entry| &entry.key)
    }

    /// Inserts a new entry at the front of `class`'s list.
    ///
    /// The key must not already be present in this segment.
    pub fn push_front(&mut self, class: Class, key: K, value: V) -> Handle {
        debug_assert!(!self.table.contains_key(&key), "key already indexed");
        let slot = self.list_mut(class).push_front(Entry {
            key: key.clone(),
            value,
            class,
        });
        let handle = Handle { class, slot };
        self.table.insert(key, handle);
        handle
    }

    /// Moves an entry to the front of the frequency list, reclassifying it if
    /// it came from the recency list. Returns its new handle.
    pub fn promote(&mut self, handle: Handle) -> Option<Handle> {
        if handle.class == Class::Frequency {
            return self.frequency.move_to_front(handle.slot).then_some(handle);
        }

        let mut entry = self.recency.remove(handle.slot)?;
        entry.class = Class::Frequency;
        let slot = self.frequency.push_front(entry);
        let promoted = Handle {
            class: Class::Frequency,
            slot,
        };
        let key = &self.frequency.get(slot)?.key;
        if let Some(indexed) = self.table.get_mut(key) {
            *indexed = promoted;
        }
        Some(promoted)
    }

    /// Moves an entry to the front of the list it is already in.
    pub fn move_to_front(&mut self, handle: Handle) -> bool {
        self.list_mut(handle.class).move_to_front(handle.slot)
    }

    /// Unlinks the entry behind `handle` and drops it from the table.
    pub fn remove(&mut self, handle: Handle) -> Option<Entry<K, V>> {
        let entry = self.list_mut(handle.class).remove(handle.slot)?;
        self.table.remove(&entry.key);
        Some(entry)
    }

    pub fn remove_key(&mut self, key: &K) -> Option<Entry<K, V>> {
        let handle = self.handle(key)?;
        self.remove(handle)
    }

    /// Pops the back (least recently used or promoted) entry of one list.
    pub fn remove_back(&mut self, class: Class) -> Option<Entry<K, V>> {
        let entry = self.list_mut(class).pop_back()?;
        self.table.remove(&entry.key);
        Some(entry)
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.recency.clear();
        self.frequency.clear();
    }

    /// Verifies table/list agreement for both lists.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        for class in [Class::Recency, Class::Frequency] {
            let list = self.list(class);
            list.check_links()
                .map_err(|e| InvariantError::new(format!("{:?} list: {}", class, e)))?;
            for entry in list.iter() {
                if entry.class != class {
                    return Err(InvariantError::new(format!(
                        "entry of class {:?} found in {:?} list",
                        entry.class, class
                    )));
                }
                match self.table.get(&entry.key) {
                    Some(handle) if handle.class == class => {},
                    Some(handle) => {
                        return Err(InvariantError::new(format!(
                            "table points a {:?} entry at the {:?} list",
                            class, handle.class
                        )));
                    },
                    None => {
                        return Err(InvariantError::new(format!(
                            "{:?} list holds a key missing from the table",
                            class
                        )));
                    },
                }
            }
        }

        for handle in self.table.values() {
            if !self.list(handle.class).contains(handle.slot) {
                return Err(InvariantError::new(format!(
                    "table handle {:?} names an empty slot",
                    handle
                )));
            }
        }

        let listed = self.recency.len() + self.frequency.len();
        if listed != self.table.len() {
            return Err(InvariantError::new(format!(
                "lists hold {} entries but table holds {}",
                listed,
                self.table.len()
            )));
        }
        Ok(())
    }

    fn list(&self, class: Class) -> &IntrusiveList<Entry<K, V>> {
        match class {
            Class::Recency => &self.recency,
            Class::Frequency => &self.frequency,
        }
    }

    fn list_mut(&mut self, class: Class) -> &mut IntrusiveList<Entry<K, V>> {
        match class {
            Class::Recency => &mut self.recency,
            Class::Frequency => &mut self.frequency,
        }
    }
}
