//! Error types for the gatelink protocol

use thiserror::Error;

/// Core gatelink errors
#[derive(Error, Debug)]
pub enum GatelinkError {
    // Wire errors
    #[error("unknown opcode: {0:#04x}")]
    UnknownOpcode(u8),

    #[error("buffer too short: expected {expected}, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("bad reply status: {0:#04x}")]
    BadReplyStatus(u8),

    #[error("unknown update result code: {0:#04x}")]
    UnknownResultCode(u8),

    #[error("unknown event kind: {0:#04x}")]
    UnknownEventKind(u8),

    // Command errors
    #[error("table update declares zero records")]
    EmptyBatch,

    // Link errors
    #[error("peer silent after {attempts} poll attempts")]
    PeerSilent { attempts: u32 },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Result type for gatelink operations
pub type GatelinkResult<T> = Result<T, GatelinkError>;
