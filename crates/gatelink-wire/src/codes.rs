//! Opcode and result-code tables

/// Status byte leading every reply frame
pub const REPLY_OK: u8 = 0xAF;

/// Command opcodes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// Return to automatic mode
    AutoMode = 0xA0,
    /// Force the relay on
    Enable = 0xA1,
    /// Reject all credentials
    Disable = 0xA2,
    /// Pop and report one logged access event
    DumpLogging = 0xA3,
    /// Insert or modify one authorization record
    UpdateTable = 0xA4,
    /// Report table capacity and usage
    MemoryCheck = 0xA5,
    /// Erase the whole authorization table
    ClearTable = 0xA6,
    /// Liveness check, acknowledge only
    Check = 0xA7,
    /// Require two credentials before activation
    DoubleActivation = 0xA8,
    /// Require one credential before activation
    SingleActivation = 0xA9,
}

impl Opcode {
    /// Parse from wire byte
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0xA0 => Some(Opcode::AutoMode),
            0xA1 => Some(Opcode::Enable),
            0xA2 => Some(Opcode::Disable),
            0xA3 => Some(Opcode::DumpLogging),
            0xA4 => Some(Opcode::UpdateTable),
            0xA5 => Some(Opcode::MemoryCheck),
            0xA6 => Some(Opcode::ClearTable),
            0xA7 => Some(Opcode::Check),
            0xA8 => Some(Opcode::DoubleActivation),
            0xA9 => Some(Opcode::SingleActivation),
            _ => None,
        }
    }

    /// Convert to wire byte
    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Total command length on the wire, opcode included
    pub fn command_len(self) -> usize {
        match self {
            Opcode::UpdateTable => crate::UPDATE_COMMAND_SIZE,
            _ => 1,
        }
    }
}

/// Outcome of one table-update record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UpdateResult {
    /// Record present, stored flag already equal to the requested one
    NotModified = 0xD1,
    /// Record present, flag rewritten
    Modified = 0xD2,
    /// Record absent, inserted
    Added = 0xD3,
    /// Record absent and the table is at capacity
    Full = 0xDF,
}

impl UpdateResult {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0xD1 => Some(UpdateResult::NotModified),
            0xD2 => Some(UpdateResult::Modified),
            0xD3 => Some(UpdateResult::Added),
            0xDF => Some(UpdateResult::Full),
            _ => None,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}
