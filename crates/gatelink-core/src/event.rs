//! Access event definitions
//!
//! Events are produced by the authorization logic whenever a credential is
//! presented, and drained FIFO by the dump-logging command.

use crate::Tag;

/// What happened when a credential was presented
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventKind {
    /// First authorization in double activation mode
    Attempt = 0x30,
    /// Authorized user activated the relay
    Confirm = 0x31,
    /// Authorized user deactivated the relay
    Logout = 0x32,
    /// Unauthorized user credential detected
    Fail = 0x33,
    /// Unknown credential detected
    Unknown = 0x34,
}

impl EventKind {
    /// Parse from wire byte
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x30 => Some(EventKind::Attempt),
            0x31 => Some(EventKind::Confirm),
            0x32 => Some(EventKind::Logout),
            0x33 => Some(EventKind::Fail),
            0x34 => Some(EventKind::Unknown),
            _ => None,
        }
    }

    /// Convert to wire byte
    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// One logged access event
///
/// `age_secs` is the elapsed time since the event was recorded, saturating at
/// 255 seconds. Ages beyond that are indistinguishable; the precision loss is
/// part of the contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessEvent {
    pub kind: EventKind,
    pub tag: Tag,
    pub age_secs: u8,
}

impl AccessEvent {
    pub fn new(kind: EventKind, tag: Tag, age_secs: u8) -> Self {
        AccessEvent {
            kind,
            tag,
            age_secs,
        }
    }
}
