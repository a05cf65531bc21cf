//! Half-duplex frame transceiver
//!
//! The packet-radio transport variant. The radio is in exactly one of two
//! modes: listening (frames can arrive and are buffered by the driver) or
//! transmitting. Sending a frame implicitly leaves listen mode; the session
//! driver switches back explicitly before waiting for the peer.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use gatelink_core::{GatelinkError, GatelinkResult};

use crate::MAX_FRAME_SIZE;

/// Half-duplex packet transceiver consumed by the radio session
pub trait FrameTransceiver {
    /// Switch to transmit mode and send one frame
    fn send_frame(&mut self, frame: &[u8]) -> GatelinkResult<()>;

    /// Switch to receive mode
    fn start_listening(&mut self);

    /// True when a received frame is buffered (receive mode only)
    fn frame_pending(&mut self) -> bool;

    /// Pop the oldest buffered frame
    fn recv_frame(&mut self) -> GatelinkResult<Vec<u8>>;
}

/// In-memory half-duplex radio pair
///
/// Each endpoint buffers inbound frames regardless of the peer's mode (the
/// driver hardware does the same); `frame_pending` only reports them while
/// the endpoint is listening.
#[derive(Debug)]
pub struct LoopbackRadio {
    inbound: Arc<Mutex<VecDeque<Vec<u8>>>>,
    outbound: Arc<Mutex<VecDeque<Vec<u8>>>>,
    listening: bool,
}

impl LoopbackRadio {
    /// Create a connected endpoint pair, both listening
    pub fn pair() -> (LoopbackRadio, LoopbackRadio) {
        let a_to_b = Arc::new(Mutex::new(VecDeque::new()));
        let b_to_a = Arc::new(Mutex::new(VecDeque::new()));

        let a = LoopbackRadio {
            inbound: Arc::clone(&b_to_a),
            outbound: Arc::clone(&a_to_b),
            listening: true,
        };
        let b = LoopbackRadio {
            inbound: a_to_b,
            outbound: b_to_a,
            listening: true,
        };
        (a, b)
    }

    /// Whether this endpoint is in receive mode
    pub fn is_listening(&self) -> bool {
        self.listening
    }
}

impl FrameTransceiver for LoopbackRadio {
    fn send_frame(&mut self, frame: &[u8]) -> GatelinkResult<()> {
        if frame.len() > MAX_FRAME_SIZE {
            return Err(GatelinkError::Transport(format!(
                "frame exceeds payload budget: {} > {}",
                frame.len(),
                MAX_FRAME_SIZE
            )));
        }
        self.listening = false;
        let mut outbound = self
            .outbound
            .lock()
            .map_err(|_| GatelinkError::Transport("radio poisoned".into()))?;
        outbound.push_back(frame.to_vec());
        Ok(())
    }

    fn start_listening(&mut self) {
        self.listening = true;
    }

    fn frame_pending(&mut self) -> bool {
        if !self.listening {
            return false;
        }
        self.inbound.lock().map(|q| !q.is_empty()).unwrap_or(false)
    }

    fn recv_frame(&mut self) -> GatelinkResult<Vec<u8>> {
        let mut inbound = self
            .inbound
            .lock()
            .map_err(|_| GatelinkError::Transport("radio poisoned".into()))?;
        inbound.pop_front().ok_or_else(|| {
            tracing::warn!("recv_frame with no frame buffered");
            GatelinkError::Transport("no frame buffered".into())
        })
    }
}
