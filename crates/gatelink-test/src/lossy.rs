//! Lossy link wrapper
//!
//! Wraps a frame transceiver and drops outbound frames with a configured
//! probability, seeded for reproducible runs. Models the degraded radio
//! conditions the retry budget exists for.

use gatelink_core::GatelinkResult;
use gatelink_transport::FrameTransceiver;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Frame transceiver that loses a fraction of what it sends
pub struct LossyRadio<R> {
    inner: R,
    loss_rate: f64,
    rng: StdRng,
    frames_dropped: u32,
}

impl<R: FrameTransceiver> LossyRadio<R> {
    pub fn new(inner: R, loss_rate: f64, seed: u64) -> Self {
        LossyRadio {
            inner,
            loss_rate,
            rng: StdRng::seed_from_u64(seed),
            frames_dropped: 0,
        }
    }

    /// Frames swallowed by the link so far
    pub fn frames_dropped(&self) -> u32 {
        self.frames_dropped
    }

    /// Access the wrapped transceiver
    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.inner
    }
}

impl<R: FrameTransceiver> FrameTransceiver for LossyRadio<R> {
    fn send_frame(&mut self, frame: &[u8]) -> GatelinkResult<()> {
        if self.rng.gen::<f64>() < self.loss_rate {
            self.frames_dropped += 1;
            return Ok(());
        }
        self.inner.send_frame(frame)
    }

    fn start_listening(&mut self) {
        self.inner.start_listening();
    }

    fn frame_pending(&mut self) -> bool {
        self.inner.frame_pending()
    }

    fn recv_frame(&mut self) -> GatelinkResult<Vec<u8>> {
        self.inner.recv_frame()
    }
}
