//! Buffered byte channel
//!
//! The direct-wired transport variant: a serial-style duplex byte stream
//! with driver-side buffering. Reads drain whatever has accumulated since
//! the last poll; a single read may therefore hand back several back-to-back
//! commands.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use gatelink_core::{GatelinkError, GatelinkResult};

/// Byte-stream transport consumed by the polled session
pub trait ByteChannel {
    /// Drain buffered bytes into `buf`, returning how many were copied
    fn read_available(&mut self, buf: &mut [u8]) -> GatelinkResult<usize>;

    /// Queue bytes for the peer
    fn write_all(&mut self, bytes: &[u8]) -> GatelinkResult<()>;
}

/// In-memory duplex byte pipe
///
/// `pair()` returns the two endpoints; bytes written on one side become
/// readable on the other.
#[derive(Debug)]
pub struct MemoryChannel {
    incoming: Arc<Mutex<VecDeque<u8>>>,
    outgoing: Arc<Mutex<VecDeque<u8>>>,
}

impl MemoryChannel {
    /// Create a connected endpoint pair
    pub fn pair() -> (MemoryChannel, MemoryChannel) {
        let a_to_b = Arc::new(Mutex::new(VecDeque::new()));
        let b_to_a = Arc::new(Mutex::new(VecDeque::new()));

        let a = MemoryChannel {
            incoming: Arc::clone(&b_to_a),
            outgoing: Arc::clone(&a_to_b),
        };
        let b = MemoryChannel {
            incoming: a_to_b,
            outgoing: b_to_a,
        };
        (a, b)
    }
}

impl ByteChannel for MemoryChannel {
    fn read_available(&mut self, buf: &mut [u8]) -> GatelinkResult<usize> {
        let mut incoming = self
            .incoming
            .lock()
            .map_err(|_| GatelinkError::Transport("channel poisoned".into()))?;

        let mut copied = 0;
        while copied < buf.len() {
            match incoming.pop_front() {
                Some(byte) => {
                    buf[copied] = byte;
                    copied += 1;
                }
                None => break,
            }
        }
        Ok(copied)
    }

    fn write_all(&mut self, bytes: &[u8]) -> GatelinkResult<()> {
        let mut outgoing = self
            .outgoing
            .lock()
            .map_err(|_| GatelinkError::Transport("channel poisoned".into()))?;
        outgoing.extend(bytes.iter().copied());
        Ok(())
    }
}
