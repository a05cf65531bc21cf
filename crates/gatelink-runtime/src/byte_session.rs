//! Byte-channel session - one record per caller exchange
//!
//! The direct-wired variant keeps the dispatcher stateless: the peer
//! re-issues a batch command once per record, and each poll here answers
//! whatever has accumulated in the channel buffer. One buffered read may
//! contain several back-to-back commands; the consumed count from the
//! dispatcher walks them all.

use gatelink_core::{DeviceControl, GatelinkResult};
use gatelink_store::{AccessTable, EventLog};
use gatelink_transport::ByteChannel;

use crate::CommandEngine;

/// Channel read buffer; commands are at most 7 bytes, so this holds a
/// healthy backlog of them
const READ_BUF_SIZE: usize = 64;

/// Drives the command protocol over a buffered byte channel
pub struct ByteSession<C> {
    channel: C,
}

impl<C: ByteChannel> ByteSession<C> {
    pub fn new(channel: C) -> Self {
        ByteSession { channel }
    }

    /// Access the underlying channel
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Answer every command currently buffered in the channel.
    ///
    /// Returns the number of commands served; zero when the channel was
    /// quiet. A malformed command aborts the poll and drops the rest of the
    /// read buffer; the peer decides whether to retry.
    pub fn poll_once<T, L>(
        &mut self,
        engine: &mut CommandEngine<'_, T, L>,
        device: &mut DeviceControl,
    ) -> GatelinkResult<usize>
    where
        T: AccessTable,
        L: EventLog,
    {
        let mut buf = [0u8; READ_BUF_SIZE];
        let len = self.channel.read_available(&mut buf)?;

        let mut offset = 0;
        let mut served = 0;
        while offset < len {
            let processed = engine.process(&buf[offset..len], device)?;
            self.channel.write_all(&processed.reply.encode())?;
            offset += processed.consumed;
            served += 1;
        }
        Ok(served)
    }
}
