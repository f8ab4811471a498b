pub mod intrusive_list;
pub mod segment;
pub mod slot_arena;

pub use intrusive_list::IntrusiveList;
pub use segment::{Class, Entry, Handle, Segment};
pub use slot_arena::{SlotArena, SlotId};
