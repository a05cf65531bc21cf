//! Reply frames
//!
//! Every reply leads with the `REPLY_OK` status byte. Single-byte replies
//! acknowledge; the three long forms echo their opcode and carry fixed
//! fields:
//!
//! - Dump logging (9 bytes): `[OK, 0xA3, remaining, kind, tag0..tag3, age]`
//! - Update table (3 bytes): `[OK, 0xA4, result]`
//! - Memory check (6 bytes): `[OK, 0xA5, cap_lo, cap_hi, used_lo, used_hi]`
//!
//! Counters are encoded low byte first. An empty log is reported with a
//! remaining count of zero and zeroed event fields.

use bytes::{BufMut, Bytes, BytesMut};
use gatelink_core::{AccessEvent, EventKind, GatelinkError, GatelinkResult, Tag};

use crate::{Opcode, UpdateResult, REPLY_OK};

/// Dump-logging reply size in bytes
pub const DUMP_REPLY_SIZE: usize = 9;

/// Update-table reply size in bytes
pub const UPDATE_REPLY_SIZE: usize = 3;

/// Memory-check reply size in bytes
pub const MEMORY_REPLY_SIZE: usize = 6;

/// Decoded reply frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Bare acknowledge, one status byte
    Ack,
    /// Pending-event count and, when nonzero, the popped event
    DumpLogging {
        /// Events still logged, the reported one included
        remaining: u8,
        /// Popped event; `None` exactly when `remaining` is zero
        event: Option<AccessEvent>,
    },
    /// Outcome of one table-update record
    UpdateTable { result: UpdateResult },
    /// Table capacity and used slots
    MemoryCheck { capacity: u16, used: u16 },
}

impl Reply {
    /// Size of this reply on the wire
    pub fn wire_len(&self) -> usize {
        match self {
            Reply::Ack => 1,
            Reply::DumpLogging { .. } => DUMP_REPLY_SIZE,
            Reply::UpdateTable { .. } => UPDATE_REPLY_SIZE,
            Reply::MemoryCheck { .. } => MEMORY_REPLY_SIZE,
        }
    }

    /// Encode to wire bytes
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        buf.put_u8(REPLY_OK);

        match self {
            Reply::Ack => {}
            Reply::DumpLogging { remaining, event } => {
                buf.put_u8(Opcode::DumpLogging.to_byte());
                buf.put_u8(*remaining);
                match event {
                    Some(event) => {
                        buf.put_u8(event.kind.to_byte());
                        buf.put_slice(&event.tag.to_bytes());
                        buf.put_u8(event.age_secs);
                    }
                    None => {
                        // Empty log: event fields pinned to zero
                        buf.put_bytes(0, 6);
                    }
                }
            }
            Reply::UpdateTable { result } => {
                buf.put_u8(Opcode::UpdateTable.to_byte());
                buf.put_u8(result.to_byte());
            }
            Reply::MemoryCheck { capacity, used } => {
                buf.put_u8(Opcode::MemoryCheck.to_byte());
                buf.put_slice(&capacity.to_le_bytes());
                buf.put_slice(&used.to_le_bytes());
            }
        }

        buf.freeze()
    }

    /// Decode a reply frame
    pub fn parse(buf: &[u8]) -> GatelinkResult<Reply> {
        let Some(&status) = buf.first() else {
            return Err(GatelinkError::BufferTooShort {
                expected: 1,
                actual: 0,
            });
        };
        if status != REPLY_OK {
            return Err(GatelinkError::BadReplyStatus(status));
        }
        if buf.len() == 1 {
            return Ok(Reply::Ack);
        }

        match Opcode::from_byte(buf[1]) {
            Some(Opcode::DumpLogging) => {
                if buf.len() < DUMP_REPLY_SIZE {
                    return Err(GatelinkError::BufferTooShort {
                        expected: DUMP_REPLY_SIZE,
                        actual: buf.len(),
                    });
                }
                let remaining = buf[2];
                let event = if remaining == 0 {
                    None
                } else {
                    let kind = EventKind::from_byte(buf[3])
                        .ok_or(GatelinkError::UnknownEventKind(buf[3]))?;
                    let tag = Tag::from_bytes(buf[4..8].try_into().unwrap());
                    Some(AccessEvent::new(kind, tag, buf[8]))
                };
                Ok(Reply::DumpLogging { remaining, event })
            }
            Some(Opcode::UpdateTable) => {
                if buf.len() < UPDATE_REPLY_SIZE {
                    return Err(GatelinkError::BufferTooShort {
                        expected: UPDATE_REPLY_SIZE,
                        actual: buf.len(),
                    });
                }
                let result = UpdateResult::from_byte(buf[2])
                    .ok_or(GatelinkError::UnknownResultCode(buf[2]))?;
                Ok(Reply::UpdateTable { result })
            }
            Some(Opcode::MemoryCheck) => {
                if buf.len() < MEMORY_REPLY_SIZE {
                    return Err(GatelinkError::BufferTooShort {
                        expected: MEMORY_REPLY_SIZE,
                        actual: buf.len(),
                    });
                }
                let capacity = u16::from_le_bytes([buf[2], buf[3]]);
                let used = u16::from_le_bytes([buf[4], buf[5]]);
                Ok(Reply::MemoryCheck { capacity, used })
            }
            _ => Err(GatelinkError::UnknownOpcode(buf[1])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ack_roundtrip() {
        let bytes = Reply::Ack.encode();
        assert_eq!(&bytes[..], &[REPLY_OK]);
        assert_eq!(Reply::parse(&bytes).unwrap(), Reply::Ack);
    }

    #[test]
    fn test_dump_reply_layout() {
        let reply = Reply::DumpLogging {
            remaining: 2,
            event: Some(AccessEvent::new(
                EventKind::Confirm,
                Tag::new([0xAA, 0xBB, 0xCC, 0xDD]),
                17,
            )),
        };

        let bytes = reply.encode();
        assert_eq!(
            &bytes[..],
            &[REPLY_OK, 0xA3, 0x02, 0x31, 0xAA, 0xBB, 0xCC, 0xDD, 17]
        );
        assert_eq!(Reply::parse(&bytes).unwrap(), reply);
    }

    #[test]
    fn test_dump_reply_empty_log() {
        let reply = Reply::DumpLogging {
            remaining: 0,
            event: None,
        };

        let bytes = reply.encode();
        assert_eq!(&bytes[..], &[REPLY_OK, 0xA3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(Reply::parse(&bytes).unwrap(), reply);
    }

    #[test]
    fn test_memory_reply_low_byte_first() {
        let reply = Reply::MemoryCheck {
            capacity: 0x0201,
            used: 0x0403,
        };

        let bytes = reply.encode();
        assert_eq!(&bytes[..], &[REPLY_OK, 0xA5, 0x01, 0x02, 0x03, 0x04]);
        assert_eq!(Reply::parse(&bytes).unwrap(), reply);
    }

    #[test]
    fn test_memory_reply_high_byte_preserved() {
        // Counts above 255 survive the split into low/high pairs.
        let reply = Reply::MemoryCheck {
            capacity: 512,
            used: 300,
        };

        let parsed = Reply::parse(&reply.encode()).unwrap();
        assert_eq!(parsed, reply);
    }

    #[test]
    fn test_parse_bad_status() {
        let err = Reply::parse(&[0x00, 0xA4, 0xD1]).unwrap_err();
        assert!(matches!(err, GatelinkError::BadReplyStatus(0x00)));
    }

    #[test]
    fn test_parse_unknown_result_code() {
        let err = Reply::parse(&[REPLY_OK, 0xA4, 0x99]).unwrap_err();
        assert!(matches!(err, GatelinkError::UnknownResultCode(0x99)));
    }

    fn event_kind_strategy() -> impl Strategy<Value = EventKind> {
        prop_oneof![
            Just(EventKind::Attempt),
            Just(EventKind::Confirm),
            Just(EventKind::Logout),
            Just(EventKind::Fail),
            Just(EventKind::Unknown),
        ]
    }

    fn reply_strategy() -> impl Strategy<Value = Reply> {
        prop_oneof![
            Just(Reply::Ack),
            (1..=255u8, event_kind_strategy(), any::<[u8; 4]>(), any::<u8>()).prop_map(
                |(remaining, kind, tag, age)| Reply::DumpLogging {
                    remaining,
                    event: Some(AccessEvent::new(kind, Tag::new(tag), age)),
                }
            ),
            Just(Reply::DumpLogging {
                remaining: 0,
                event: None
            }),
            prop_oneof![
                Just(UpdateResult::NotModified),
                Just(UpdateResult::Modified),
                Just(UpdateResult::Added),
                Just(UpdateResult::Full),
            ]
            .prop_map(|result| Reply::UpdateTable { result }),
            (any::<u16>(), any::<u16>())
                .prop_map(|(capacity, used)| Reply::MemoryCheck { capacity, used }),
        ]
    }

    proptest! {
        #[test]
        fn prop_reply_roundtrip(reply in reply_strategy()) {
            let bytes = reply.encode();
            prop_assert_eq!(bytes.len(), reply.wire_len());
            let parsed = Reply::parse(&bytes).unwrap();
            prop_assert_eq!(parsed, reply);
        }
    }
}
