//! Specialized collection types

pub use slotmap::{new_key_type, Key, SlotMap};

/// Generation-checked arena keyed by a handle type
///
/// Removing an entry bumps its slot generation, so a handle kept past
/// removal resolves to `None` instead of to whatever reused the slot.
pub type HandleArena<K, T> = SlotMap<K, T>;

/// Order two keys so an unordered pair always has the same representation
pub fn ordered_pair<K: Key + Ord>(a: K, b: K) -> (K, K) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
