//! Gatelink Store - Authorization table and access event log
//!
//! This crate defines the two data stores the command link reads and writes:
//! - The authorization table: tag -> authorized flag, fixed capacity
//! - The event log: bounded FIFO of access events with saturating age
//!
//! The dispatcher consumes both through traits; the in-memory
//! implementations here are the reference backends used by the device and
//! the tests. Persistent backends plug in behind the same traits.

pub mod log;
pub mod table;

pub use log::*;
pub use table::*;
