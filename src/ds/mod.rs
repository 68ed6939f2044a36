pub mod recency_list;
pub mod selector;
pub mod slot_arena;

pub use recency_list::RecencyList;
pub use selector::ShardSelector;
pub use slot_arena::{SlotArena, SlotId};
