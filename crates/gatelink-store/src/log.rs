//! Access event log
//!
//! Bounded FIFO of access events. The authorization logic records events as
//! credentials are presented; the dump-logging command drains them oldest
//! first. When the log is full the oldest event is dropped to make room, so
//! the device keeps the most recent history across a long unattended stretch.

use std::collections::VecDeque;
use std::time::Instant;

use gatelink_core::{AccessEvent, EventKind, Tag};

/// FIFO event store consumed by the dispatcher
pub trait EventLog {
    /// Events currently logged
    fn pending(&self) -> u16;

    /// Remove and return the oldest event
    fn pop_oldest(&mut self) -> Option<AccessEvent>;

    /// Append an event, stamped now (producer side)
    fn record(&mut self, kind: EventKind, tag: Tag);
}

/// In-memory reference log
///
/// Each entry keeps its record instant; the age is computed on pop and
/// saturates at 255 seconds.
#[derive(Debug)]
pub struct MemoryLog {
    entries: VecDeque<(EventKind, Tag, Instant)>,
    capacity: usize,
}

impl MemoryLog {
    pub fn with_capacity(capacity: usize) -> Self {
        MemoryLog {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn saturated_age(recorded_at: Instant) -> u8 {
        recorded_at.elapsed().as_secs().min(u8::MAX as u64) as u8
    }
}

impl EventLog for MemoryLog {
    fn pending(&self) -> u16 {
        self.entries.len() as u16
    }

    fn pop_oldest(&mut self) -> Option<AccessEvent> {
        self.entries
            .pop_front()
            .map(|(kind, tag, at)| AccessEvent::new(kind, tag, Self::saturated_age(at)))
    }

    fn record(&mut self, kind: EventKind, tag: Tag) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((kind, tag, Instant::now()));
    }
}
