//! Gatelink Wire Protocol - Binary command and reply format
//!
//! This crate implements the wire format for the command link:
//! - Fixed single-byte opcodes, ascending from 0xA0
//! - Commands: opcode plus an optional fixed-size payload
//! - Replies: leading status byte, then an opcode echo and fixed fields
//!
//! The codec is pure: no state, no side effects, length and code-range
//! validation only. Semantic validation belongs to the dispatcher.

pub mod codes;
pub mod command;
pub mod reply;

pub use codes::*;
pub use command::*;
pub use reply::*;
