//! Device harness for end-to-end testing
//!
//! Bundles the stores and the control surface of one device so tests can
//! speak to it the way a peer would: raw command bytes in, reply bytes out.

use gatelink_core::{DeviceControl, GatelinkResult};
use gatelink_runtime::{CommandEngine, ExchangeReport, Processed, RadioSession};
use gatelink_store::{EventLog, MemoryLog, MemoryTable};
use gatelink_transport::FrameTransceiver;

/// One simulated access controller
pub struct DeviceHarness {
    pub table: MemoryTable,
    pub log: MemoryLog,
    pub device: DeviceControl,
}

impl DeviceHarness {
    pub fn new(table_capacity: usize, log_capacity: usize) -> Self {
        DeviceHarness {
            table: MemoryTable::with_capacity(table_capacity),
            log: MemoryLog::with_capacity(log_capacity),
            device: DeviceControl::default(),
        }
    }

    /// Process one command the way the byte-channel variant would
    pub fn process(&mut self, cmd: &[u8]) -> GatelinkResult<Processed> {
        CommandEngine::new(&mut self.table, &mut self.log).process(cmd, &mut self.device)
    }

    /// Serve one buffered top-level command over a radio session
    pub async fn serve_radio<R: FrameTransceiver>(
        &mut self,
        session: &mut RadioSession<R>,
    ) -> GatelinkResult<ExchangeReport> {
        let mut engine = CommandEngine::new(&mut self.table, &mut self.log);
        session.serve(&mut engine, &mut self.device).await
    }

    /// Pending events in the log
    pub fn pending_events(&self) -> u16 {
        self.log.pending()
    }
}
