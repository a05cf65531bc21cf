//! Command dispatcher
//!
//! Maps one decoded command to one action and one reply. The dispatcher owns
//! no data: it borrows the authorization table and the event log, and mutates
//! the device control surface lent to it per call. Malformed input is an
//! error to the caller; no reply frame is produced for it.

use gatelink_core::{ActivationMode, DeviceControl, GatelinkError, GatelinkResult};
use gatelink_store::{AccessTable, AuthUpdate, EventLog, InsertOutcome};
use gatelink_wire::{Command, Reply, TableUpdate, UpdateResult};

/// Result of processing one command
#[derive(Clone, Copy, Debug)]
pub struct Processed {
    /// Bytes of the input buffer consumed by this command
    pub consumed: usize,
    /// The reply frame to send
    pub reply: Reply,
    /// Whether the command is part of a batch with records still to exchange
    pub more_records: bool,
}

/// The command protocol engine
pub struct CommandEngine<'a, T, L> {
    table: &'a mut T,
    events: &'a mut L,
}

impl<'a, T: AccessTable, L: EventLog> CommandEngine<'a, T, L> {
    pub fn new(table: &'a mut T, events: &'a mut L) -> Self {
        CommandEngine { table, events }
    }

    /// Process one command from the front of `buf`.
    ///
    /// Returns the bytes consumed so a caller can walk a buffer holding
    /// several commands, the reply to send, and whether the enclosing batch
    /// has records left to exchange.
    pub fn process(
        &mut self,
        buf: &[u8],
        device: &mut DeviceControl,
    ) -> GatelinkResult<Processed> {
        let (command, consumed) = Command::parse(buf)?;

        let (reply, more_records) = match command {
            Command::Check => (Reply::Ack, false),
            Command::DoubleActivation => {
                device.set_mode(ActivationMode::Double);
                (Reply::Ack, false)
            }
            Command::SingleActivation => {
                device.set_mode(ActivationMode::Single);
                (Reply::Ack, false)
            }
            Command::AutoMode => {
                device.request_auto();
                (Reply::Ack, false)
            }
            Command::Enable => {
                device.enable();
                (Reply::Ack, false)
            }
            Command::Disable => {
                device.disable();
                (Reply::Ack, false)
            }
            Command::ClearTable => {
                self.table.clear();
                (Reply::Ack, false)
            }
            Command::DumpLogging => self.dump_logging(),
            Command::UpdateTable(update) => self.update_table(update)?,
            Command::MemoryCheck => (
                Reply::MemoryCheck {
                    capacity: self.table.capacity(),
                    used: self.table.used(),
                },
                false,
            ),
        };

        Ok(Processed {
            consumed,
            reply,
            more_records,
        })
    }

    fn dump_logging(&mut self) -> (Reply, bool) {
        let pending = self.events.pending();
        if pending == 0 {
            return (
                Reply::DumpLogging {
                    remaining: 0,
                    event: None,
                },
                false,
            );
        }

        match self.events.pop_oldest() {
            Some(event) => (
                Reply::DumpLogging {
                    // The wire field is one byte; a deeper backlog reports 255
                    // until it drains below that.
                    remaining: pending.min(u8::MAX as u16) as u8,
                    event: Some(event),
                },
                pending > 1,
            ),
            None => (
                Reply::DumpLogging {
                    remaining: 0,
                    event: None,
                },
                false,
            ),
        }
    }

    fn update_table(&mut self, update: TableUpdate) -> GatelinkResult<(Reply, bool)> {
        if update.remaining == 0 {
            return Err(GatelinkError::EmptyBatch);
        }
        tracing::debug!(tag = %update.tag, authorized = update.authorized, "table update");

        let result = match self.table.authorization(&update.tag) {
            None => match self.table.insert(update.tag, update.authorized) {
                InsertOutcome::Added => UpdateResult::Added,
                InsertOutcome::Full => UpdateResult::Full,
            },
            Some(_) => match self.table.set_authorization(&update.tag, update.authorized) {
                AuthUpdate::Changed => UpdateResult::Modified,
                AuthUpdate::Unchanged => UpdateResult::NotModified,
            },
        };

        Ok((Reply::UpdateTable { result }, update.remaining > 1))
    }
}
