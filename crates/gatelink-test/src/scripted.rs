//! Scripted half-duplex radio
//!
//! A test double for the radio transport with a programmable peer: inbound
//! frames are queued up front, the peer can be told to go silent after a
//! number of device transmissions, and every availability poll is counted
//! so retry-budget behavior can be asserted exactly.

use std::collections::VecDeque;

use gatelink_core::{GatelinkError, GatelinkResult};
use gatelink_transport::FrameTransceiver;

/// Radio double with a scripted peer on the other end
#[derive(Debug, Default)]
pub struct ScriptedRadio {
    inbound: VecDeque<Vec<u8>>,
    sent: Vec<Vec<u8>>,
    silent_after: Option<usize>,
    polls: u32,
    listening: bool,
}

impl ScriptedRadio {
    pub fn new() -> Self {
        ScriptedRadio {
            listening: true,
            ..ScriptedRadio::default()
        }
    }

    /// Queue a frame the peer will have on the air
    pub fn queue_frame(&mut self, frame: &[u8]) {
        self.inbound.push_back(frame.to_vec());
    }

    /// Make the peer go silent once the device has sent `sent` frames
    pub fn silent_after(mut self, sent: usize) -> Self {
        self.silent_after = Some(sent);
        self
    }

    /// Frames the device transmitted, in order
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }

    /// Availability polls observed
    pub fn polls(&self) -> u32 {
        self.polls
    }

    fn peer_silent(&self) -> bool {
        self.silent_after
            .is_some_and(|after| self.sent.len() >= after)
    }
}

impl FrameTransceiver for ScriptedRadio {
    fn send_frame(&mut self, frame: &[u8]) -> GatelinkResult<()> {
        self.listening = false;
        self.sent.push(frame.to_vec());
        Ok(())
    }

    fn start_listening(&mut self) {
        self.listening = true;
    }

    fn frame_pending(&mut self) -> bool {
        self.polls += 1;
        self.listening && !self.peer_silent() && !self.inbound.is_empty()
    }

    fn recv_frame(&mut self) -> GatelinkResult<Vec<u8>> {
        if self.peer_silent() {
            return Err(GatelinkError::Transport("peer silent".into()));
        }
        self.inbound
            .pop_front()
            .ok_or_else(|| GatelinkError::Transport("no frame buffered".into()))
    }
}
