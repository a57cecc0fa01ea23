//! Tri-state slot of the backing store

use std::mem;

/// A single position in the backing store.
///
/// A slot starts `Empty`, becomes `Occupied` on insert and `Tombstone` on
/// removal. A tombstone may be reused by a later insert; it disappears only
/// when the store is rebuilt.
#[derive(Debug, Clone)]
pub(crate) enum Slot<K, V> {
    /// Never written since the store was allocated; ends every probe walk
    Empty,
    /// Holds a live entry
    Occupied {
        /// The key of the entry
        key: K,
        /// The value associated with the key
        value: V,
    },
    /// Held an entry that was removed; probe walks continue past it
    Tombstone,
}

impl<K, V> Slot<K, V> {
    /// Returns true if the slot holds a live entry
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied { .. })
    }

    /// Returns the key of a live entry
    pub(crate) fn key(&self) -> Option<&K> {
        match self {
            Self::Occupied { key, .. } => Some(key),
            Self::Empty | Self::Tombstone => None,
        }
    }

    /// Returns the key and value of a live entry
    pub(crate) fn entry(&self) -> Option<(&K, &V)> {
        match self {
            Self::Occupied { key, value } => Some((key, value)),
            Self::Empty | Self::Tombstone => None,
        }
    }

    /// Returns the value of a live entry for modification
    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Self::Occupied { value, .. } => Some(value),
            Self::Empty | Self::Tombstone => None,
        }
    }

    /// Turns a live entry into a tombstone, handing back its value.
    ///
    /// Empty slots and tombstones are left untouched.
    pub(crate) fn bury(&mut self) -> Option<V> {
        if !self.is_occupied() {
            return None;
        }
        match mem::replace(self, Self::Tombstone) {
            Self::Occupied { value, .. } => Some(value),
            Self::Empty | Self::Tombstone => None,
        }
    }

    /// Consumes the slot, yielding its live entry if any
    pub(crate) fn into_entry(self) -> Option<(K, V)> {
        match self {
            Self::Occupied { key, value } => Some((key, value)),
            Self::Empty | Self::Tombstone => None,
        }
    }
}
