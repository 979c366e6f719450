//! The trap cycle core.
//!
//! A [`TrapCycle`] installs a handler, raises a synchronous `ecall`, lets the
//! handler advance `mepc` past the trapping instruction and finally reports the
//! completion flag. Everything that touches real CSRs sits behind the [`Hart`]
//! trait so the same driver runs on hardware and under the host test harness.

#![cfg_attr(not(test), no_std)]

pub mod cause;
pub mod cycle;
pub mod error;
pub mod flag;
pub mod hart;
pub mod phase;
pub mod status;
pub mod vector;

#[cfg(test)]
mod sim;

pub use cause::Cause;
pub use cycle::{CycleRecord, TrapCycle};
pub use error::TrapError;
pub use flag::CompletionFlag;
pub use hart::Hart;
pub use phase::Phase;
pub use status::Mstatus;
pub use vector::{TrapMode, TrapVector};

/// `ecall` has no compressed encoding, so the trapping instruction is always
/// one full word wide.
pub const INSTRUCTION_WIDTH: usize = 4;

/// Encoding of `ecall` (SYSTEM opcode, funct12 = 0).
pub const ECALL_ENCODING: u32 = 0x0000_0073;

pub const JUMP_MSG: &str = "Jumping to handler...\n";
pub const HANDLER_MSG: &str = "Made it to handler!\n";
pub const REPORT_PREFIX: &str = "Flag is 0x";
