//! This crate implements an interpreter core for the Chip-8 virtual machine:
//! 4KiB of memory, sixteen 8-bit registers, a 64x32 1-bpp display buffer, two
//! countdown timers, a sixteen-key keypad and a sixteen-deep call stack.
//!
//! The core owns all machine state and does no I/O of its own. A host feeds it
//! program bytes and key state, drives [Cpu::step] and [Cpu::tick] at its own
//! cadence, and consumes the display buffer whenever the redraw flag is set.

pub mod cpu;
pub mod error;

pub use cpu::{Cpu, Step};
pub use error::{Error, Result};

/// Common imports for ocho
pub mod prelude {
    pub use crate::cpu::{insn::Insn, mem, screen, Cpu, Step, STACK_DEPTH};
    pub use crate::error::{Error, Result};
}
