//! Gatelink Test Harness - link simulation and protocol validation
//!
//! This crate provides:
//! - A scripted half-duplex radio with programmable peer behavior
//! - A lossy link wrapper for degraded-radio testing
//! - A device harness bundling the stores and control surface
//! - End-to-end integration tests

pub mod harness;
pub mod lossy;
pub mod scripted;

pub use harness::*;
pub use lossy::*;
pub use scripted::*;
