//! Radio session - self-driven multi-record transfers
//!
//! Over the radio the device drives a whole batch itself: process the
//! buffered record, send the reply, and if the batch has records left,
//! switch to receive mode and wait for the peer's next record under the
//! retry policy. A silent peer aborts the operation; records already
//! applied stay applied, and the peer re-synchronizes by re-issuing the
//! top-level command.

use gatelink_core::{DeviceControl, GatelinkError, GatelinkResult};
use gatelink_store::{AccessTable, EventLog};
use gatelink_transport::FrameTransceiver;

use crate::{CommandEngine, RetryPolicy};

/// What one serve call moved across the link
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExchangeReport {
    /// Records processed and answered
    pub records_sent: u32,
    /// Availability polls that found nothing
    pub wait_attempts: u32,
}

/// Drives the command protocol over a half-duplex radio
pub struct RadioSession<R> {
    radio: R,
    policy: RetryPolicy,
}

impl<R: FrameTransceiver> RadioSession<R> {
    pub fn new(radio: R) -> Self {
        RadioSession {
            radio,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(radio: R, policy: RetryPolicy) -> Self {
        RadioSession { radio, policy }
    }

    /// Access the underlying radio
    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    /// Serve one top-level command already buffered by the radio.
    ///
    /// Runs the full multi-record sequence for batch commands. Whatever the
    /// outcome, the radio is back in receive mode when this returns, ready
    /// for the next top-level command.
    pub async fn serve<T, L>(
        &mut self,
        engine: &mut CommandEngine<'_, T, L>,
        device: &mut DeviceControl,
    ) -> GatelinkResult<ExchangeReport>
    where
        T: AccessTable,
        L: EventLog,
    {
        let mut report = ExchangeReport::default();
        let result = self.drive(engine, device, &mut report).await;
        self.radio.start_listening();
        result.map(|()| report)
    }

    async fn drive<T, L>(
        &mut self,
        engine: &mut CommandEngine<'_, T, L>,
        device: &mut DeviceControl,
        report: &mut ExchangeReport,
    ) -> GatelinkResult<()>
    where
        T: AccessTable,
        L: EventLog,
    {
        let mut frame = self.radio.recv_frame()?;

        loop {
            let processed = engine.process(&frame, device)?;
            self.radio.send_frame(&processed.reply.encode())?;
            report.records_sent += 1;

            if !processed.more_records {
                return Ok(());
            }

            self.radio.start_listening();
            frame = self.wait_for_frame(report).await?;
        }
    }

    /// Poll for the peer's next record under the retry budget
    async fn wait_for_frame(&mut self, report: &mut ExchangeReport) -> GatelinkResult<Vec<u8>> {
        for _ in 0..self.policy.max_attempts {
            if self.radio.frame_pending() {
                return self.radio.recv_frame();
            }
            report.wait_attempts += 1;
            tokio::time::sleep(self.policy.poll_delay).await;
        }

        tracing::warn!(
            attempts = self.policy.max_attempts,
            "peer silent, aborting transfer"
        );
        Err(GatelinkError::PeerSilent {
            attempts: self.policy.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatelink_core::{DeviceState, EventKind, Tag};
    use gatelink_store::{MemoryLog, MemoryTable};
    use gatelink_transport::LoopbackRadio;
    use gatelink_wire::{Command, Reply, TableUpdate, UpdateResult};

    fn fixtures() -> (MemoryTable, MemoryLog, DeviceControl) {
        (
            MemoryTable::with_capacity(10),
            MemoryLog::with_capacity(16),
            DeviceControl::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_command_exchange() {
        let (mut table, mut log, mut device) = fixtures();
        let (device_radio, mut peer) = LoopbackRadio::pair();
        let mut session = RadioSession::new(device_radio);

        peer.send_frame(&Command::Enable.encode()).unwrap();

        let mut engine = CommandEngine::new(&mut table, &mut log);
        let report = session.serve(&mut engine, &mut device).await.unwrap();

        assert_eq!(report.records_sent, 1);
        assert_eq!(device.state, DeviceState::Enabled);
        peer.start_listening();
        assert_eq!(Reply::parse(&peer.recv_frame().unwrap()).unwrap(), Reply::Ack);
        assert!(session.radio_mut().is_listening());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dump_streams_all_events() {
        let (mut table, mut log, mut device) = fixtures();
        for n in 0..3 {
            log.record(EventKind::Confirm, Tag::new([n, n, n, n]));
        }

        let (device_radio, mut peer) = LoopbackRadio::pair();
        // The peer re-issues the dump command once per record; all three
        // requests are on the air before the device starts serving.
        for _ in 0..3 {
            peer.send_frame(&Command::DumpLogging.encode()).unwrap();
        }

        let mut session = RadioSession::new(device_radio);
        let mut engine = CommandEngine::new(&mut table, &mut log);
        let report = session.serve(&mut engine, &mut device).await.unwrap();

        assert_eq!(report.records_sent, 3);
        assert_eq!(log.pending(), 0);

        peer.start_listening();
        for expected_remaining in [3u8, 2, 1] {
            let reply = Reply::parse(&peer.recv_frame().unwrap()).unwrap();
            let Reply::DumpLogging { remaining, event } = reply else {
                panic!("expected dump reply");
            };
            assert_eq!(remaining, expected_remaining);
            assert!(event.is_some());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_batch_applies_all_records() {
        let (mut table, mut log, mut device) = fixtures();
        let (device_radio, mut peer) = LoopbackRadio::pair();

        for (remaining, n) in [(3u8, 1u8), (2, 2), (1, 3)] {
            let update = Command::UpdateTable(TableUpdate {
                remaining,
                authorized: true,
                tag: Tag::new([n, n, n, n]),
            });
            peer.send_frame(&update.encode()).unwrap();
        }

        let mut session = RadioSession::new(device_radio);
        let mut engine = CommandEngine::new(&mut table, &mut log);
        let report = session.serve(&mut engine, &mut device).await.unwrap();

        assert_eq!(report.records_sent, 3);
        assert_eq!(table.used(), 3);

        peer.start_listening();
        for _ in 0..3 {
            assert_eq!(
                Reply::parse(&peer.recv_frame().unwrap()).unwrap(),
                Reply::UpdateTable {
                    result: UpdateResult::Added
                }
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_record_batch_rejected_before_transfer() {
        let (mut table, mut log, mut device) = fixtures();
        let (device_radio, mut peer) = LoopbackRadio::pair();

        let update = Command::UpdateTable(TableUpdate {
            remaining: 0,
            authorized: true,
            tag: Tag::new([1, 2, 3, 4]),
        });
        peer.send_frame(&update.encode()).unwrap();

        let mut session = RadioSession::new(device_radio);
        let mut engine = CommandEngine::new(&mut table, &mut log);
        let err = session.serve(&mut engine, &mut device).await.unwrap_err();

        assert!(matches!(err, GatelinkError::EmptyBatch));
        assert_eq!(table.used(), 0);
        // No reply on the air, and the device is back to listening
        peer.start_listening();
        assert!(!peer.frame_pending());
        assert!(session.radio_mut().is_listening());
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_peer_aborts_with_budget() {
        let (mut table, mut log, mut device) = fixtures();
        log.record(EventKind::Fail, Tag::new([9, 9, 9, 9]));
        log.record(EventKind::Fail, Tag::new([8, 8, 8, 8]));

        let (device_radio, mut peer) = LoopbackRadio::pair();
        // Only the first request arrives; the peer then goes silent.
        peer.send_frame(&Command::DumpLogging.encode()).unwrap();

        let policy = RetryPolicy::new(16, std::time::Duration::from_millis(5));
        let mut session = RadioSession::with_policy(device_radio, policy);
        let mut engine = CommandEngine::new(&mut table, &mut log);
        let err = session.serve(&mut engine, &mut device).await.unwrap_err();

        assert!(matches!(err, GatelinkError::PeerSilent { attempts: 16 }));
        // The first record went out and stays popped
        assert_eq!(log.pending(), 1);
        assert!(session.radio_mut().is_listening());
    }
}
