//! Command frames
//!
//! A command is one opcode byte plus, for table updates, a fixed payload:
//! - Byte 0: opcode
//! - Byte 1: remaining records in the batch, this one included
//! - Byte 2: authorization flag (0 = revoke, nonzero = grant)
//! - Bytes 3-6: credential tag

use bytes::{BufMut, Bytes, BytesMut};
use gatelink_core::{GatelinkError, GatelinkResult, Tag};

use crate::Opcode;

/// Table-update command size in bytes, opcode included
pub const UPDATE_COMMAND_SIZE: usize = 7;

/// One table-update record as carried on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableUpdate {
    /// Records remaining in the batch, this one included
    pub remaining: u8,
    /// Requested authorization flag
    pub authorized: bool,
    /// Credential to insert or modify
    pub tag: Tag,
}

/// Decoded command frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Check,
    DoubleActivation,
    SingleActivation,
    AutoMode,
    Enable,
    Disable,
    DumpLogging,
    UpdateTable(TableUpdate),
    MemoryCheck,
    ClearTable,
}

impl Command {
    /// Decode one command from the front of a buffer.
    ///
    /// Returns the command and the number of bytes consumed, so a caller can
    /// walk a buffer holding several back-to-back commands.
    pub fn parse(buf: &[u8]) -> GatelinkResult<(Command, usize)> {
        let Some(&first) = buf.first() else {
            return Err(GatelinkError::BufferTooShort {
                expected: 1,
                actual: 0,
            });
        };
        let opcode = Opcode::from_byte(first).ok_or(GatelinkError::UnknownOpcode(first))?;

        let command = match opcode {
            Opcode::Check => Command::Check,
            Opcode::DoubleActivation => Command::DoubleActivation,
            Opcode::SingleActivation => Command::SingleActivation,
            Opcode::AutoMode => Command::AutoMode,
            Opcode::Enable => Command::Enable,
            Opcode::Disable => Command::Disable,
            Opcode::DumpLogging => Command::DumpLogging,
            Opcode::MemoryCheck => Command::MemoryCheck,
            Opcode::ClearTable => Command::ClearTable,
            Opcode::UpdateTable => {
                if buf.len() < UPDATE_COMMAND_SIZE {
                    return Err(GatelinkError::BufferTooShort {
                        expected: UPDATE_COMMAND_SIZE,
                        actual: buf.len(),
                    });
                }
                Command::UpdateTable(TableUpdate {
                    remaining: buf[1],
                    authorized: buf[2] != 0,
                    tag: Tag::from_bytes(buf[3..7].try_into().unwrap()),
                })
            }
        };

        Ok((command, opcode.command_len()))
    }

    /// Opcode of this command
    pub fn opcode(&self) -> Opcode {
        match self {
            Command::Check => Opcode::Check,
            Command::DoubleActivation => Opcode::DoubleActivation,
            Command::SingleActivation => Opcode::SingleActivation,
            Command::AutoMode => Opcode::AutoMode,
            Command::Enable => Opcode::Enable,
            Command::Disable => Opcode::Disable,
            Command::DumpLogging => Opcode::DumpLogging,
            Command::UpdateTable(_) => Opcode::UpdateTable,
            Command::MemoryCheck => Opcode::MemoryCheck,
            Command::ClearTable => Opcode::ClearTable,
        }
    }

    /// Encode to wire bytes (the peer side of the link)
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.opcode().command_len());
        buf.put_u8(self.opcode().to_byte());
        if let Command::UpdateTable(update) = self {
            buf.put_u8(update.remaining);
            buf.put_u8(u8::from(update.authorized));
            buf.put_slice(&update.tag.to_bytes());
        }
        buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_command_roundtrip() {
        for command in [
            Command::Check,
            Command::DoubleActivation,
            Command::SingleActivation,
            Command::AutoMode,
            Command::Enable,
            Command::Disable,
            Command::DumpLogging,
            Command::MemoryCheck,
            Command::ClearTable,
        ] {
            let bytes = command.encode();
            let (parsed, consumed) = Command::parse(&bytes).unwrap();
            assert_eq!(parsed, command);
            assert_eq!(consumed, 1);
        }
    }

    #[test]
    fn test_update_command_roundtrip() {
        let command = Command::UpdateTable(TableUpdate {
            remaining: 3,
            authorized: true,
            tag: Tag::new([0xAA, 0xBB, 0xCC, 0xDD]),
        });

        let bytes = command.encode();
        assert_eq!(bytes.len(), UPDATE_COMMAND_SIZE);
        assert_eq!(&bytes[..], &[0xA4, 0x03, 0x01, 0xAA, 0xBB, 0xCC, 0xDD]);

        let (parsed, consumed) = Command::parse(&bytes).unwrap();
        assert_eq!(parsed, command);
        assert_eq!(consumed, UPDATE_COMMAND_SIZE);
    }

    #[test]
    fn test_nonzero_flag_means_authorized() {
        let raw = [0xA4, 0x01, 0x7F, 0x01, 0x02, 0x03, 0x04];
        let (parsed, _) = Command::parse(&raw).unwrap();
        let Command::UpdateTable(update) = parsed else {
            panic!("expected table update");
        };
        assert!(update.authorized);
    }

    #[test]
    fn test_parse_empty_buffer() {
        let err = Command::parse(&[]).unwrap_err();
        assert!(matches!(err, GatelinkError::BufferTooShort { .. }));
    }

    #[test]
    fn test_parse_unknown_opcode() {
        let err = Command::parse(&[0x42]).unwrap_err();
        assert!(matches!(err, GatelinkError::UnknownOpcode(0x42)));
    }

    #[test]
    fn test_parse_truncated_update() {
        let err = Command::parse(&[0xA4, 0x01, 0x01]).unwrap_err();
        assert!(matches!(
            err,
            GatelinkError::BufferTooShort {
                expected: UPDATE_COMMAND_SIZE,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_parse_leaves_trailing_bytes() {
        // Two commands back to back; the consumed count walks the buffer.
        let raw = [0xA1, 0xA2];
        let (first, consumed) = Command::parse(&raw).unwrap();
        assert_eq!(first, Command::Enable);
        let (second, _) = Command::parse(&raw[consumed..]).unwrap();
        assert_eq!(second, Command::Disable);
    }
}
