//! Instruction handlers, grouped by family.
//!
//! Every handler takes the execution context, performs the instruction's
//! side effects on registers, flags, memory and the interrupt-enable flag,
//! and returns the address of the next instruction.

mod alu;
mod cb;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

pub(super) use alu::*;
pub(super) use cb::*;
pub(super) use control::*;
pub(super) use incdec::*;
pub(super) use ld::*;
pub(super) use stack::*;
pub(super) use system::*;
