//! Authorization table
//!
//! Maps a credential tag to its authorization flag. At most one record per
//! distinct tag value; capacity is fixed at construction and a full table
//! rejects inserts without mutating state.

use gatelink_core::Tag;

/// Outcome of an insert attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Record stored
    Added,
    /// Table at capacity, nothing stored
    Full,
}

/// Outcome of rewriting an existing record's flag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthUpdate {
    /// Stored flag now differs from what it was
    Changed,
    /// Requested flag equals the stored one (or the tag is absent)
    Unchanged,
}

/// Tag -> authorization lookup consumed by the dispatcher
pub trait AccessTable {
    /// Stored flag for a tag, `None` when the tag is absent
    fn authorization(&self, tag: &Tag) -> Option<bool>;

    /// Insert a new record; fails without mutating when at capacity
    fn insert(&mut self, tag: Tag, authorized: bool) -> InsertOutcome;

    /// Rewrite the flag of an existing record
    fn set_authorization(&mut self, tag: &Tag, authorized: bool) -> AuthUpdate;

    /// Drop every record
    fn clear(&mut self);

    /// Total slots
    fn capacity(&self) -> u16;

    /// Occupied slots
    fn used(&self) -> u16;
}

/// In-memory reference table
///
/// Slot order is insertion order; lookups scan. The table is small (hundreds
/// of records at most) and the device presents no other load while a command
/// runs, so a scan is fine.
#[derive(Debug)]
pub struct MemoryTable {
    slots: Vec<(Tag, bool)>,
    capacity: usize,
}

impl MemoryTable {
    pub fn with_capacity(capacity: usize) -> Self {
        MemoryTable {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    fn position(&self, tag: &Tag) -> Option<usize> {
        self.slots.iter().position(|(stored, _)| stored == tag)
    }
}

impl AccessTable for MemoryTable {
    fn authorization(&self, tag: &Tag) -> Option<bool> {
        self.position(tag).map(|i| self.slots[i].1)
    }

    fn insert(&mut self, tag: Tag, authorized: bool) -> InsertOutcome {
        if self.slots.len() >= self.capacity {
            return InsertOutcome::Full;
        }
        self.slots.push((tag, authorized));
        InsertOutcome::Added
    }

    fn set_authorization(&mut self, tag: &Tag, authorized: bool) -> AuthUpdate {
        match self.position(tag) {
            Some(i) if self.slots[i].1 != authorized => {
                self.slots[i].1 = authorized;
                AuthUpdate::Changed
            }
            _ => AuthUpdate::Unchanged,
        }
    }

    fn clear(&mut self) {
        self.slots.clear();
    }

    fn capacity(&self) -> u16 {
        self.capacity as u16
    }

    fn used(&self) -> u16 {
        self.slots.len() as u16
    }
}
