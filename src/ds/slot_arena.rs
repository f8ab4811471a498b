//! Index-addressed storage with slot reuse.
//!
//! Values live in a `Vec` of slots; a removed slot joins a free chain threaded
//! through the vacant slots themselves, so the next insert reuses it. Handles
//! are plain indices ([`SlotId`]) and stay valid until their slot is removed.
//!
//! ```text
//!   slots: [ Occupied(a) | Vacant(next: 3) | Occupied(b) | Vacant(next: END) ]
//!   free_head: 1 ──► 3 ──► END
//! ```

const END: usize = usize::MAX;

/// Stable handle to a slot in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: usize },
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_head: usize,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: END,
            len: 0,
        }
    }

    /// Stores `value`, reusing the most recently vacated slot if there is one.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.len += 1;
        if self.free_head == END {
            self.slots.push(Slot::Occupied(value));
            return SlotId(self.slots.len() - 1);
        }

        let idx = self.free_head;
        match std::mem::replace(&mut self.slots[idx], Slot::Occupied(value)) {
            Slot::Vacant { next_free } => self.free_head = next_free,
            Slot::Occupied(_) => unreachable!("free chain points at an occupied slot"),
        }
        SlotId(idx)
    }

    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        if let Slot::Vacant { .. } = slot {
            return None;
        }
        let old = std::mem::replace(
            slot,
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = id.0;
        self.len -= 1;
        match old {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = END;
        self.len = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
