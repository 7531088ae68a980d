//! SM83 (LR35902) instruction core.
//!
//! The dispatcher fetches an opcode at PC, resolves it through the static
//! opcode tables, runs the bound handler against an [`ExecContext`] and
//! commits the returned PC. Everything outside the CPU is reached through
//! the [`Bus`] trait.

mod alu;
mod bus;
mod context;
mod error;
mod exec;
mod init;
mod interrupts;
mod opcode;
mod regs;
mod step;
mod table;

#[cfg(test)]
mod tests;

pub use bus::Bus;
pub use context::ExecContext;
pub use error::CpuError;
pub use init::BootState;
pub use opcode::{
    lookup, Condition, Handler, HandlerResult, OpcodeDescriptor, Operand, INVALID, PREFIX_CB,
    PREFIX_STOP,
};
pub use regs::{Flags, Reg16, Reg8, Registers};

/// Joypad register (P1). STOP polls its low nibble for a pressed line.
pub const JOYPAD_ADDR: u16 = 0xFF00;
/// Interrupt request flags (IF).
pub const IF_ADDR: u16 = 0xFF0F;
/// Interrupt enable mask (IE).
pub const IE_ADDR: u16 = 0xFFFF;

/// Execution state of the core between instructions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Running,
    /// Entered by HALT; left once an enabled interrupt is requested.
    Halted,
    /// Entered by STOP; left once a joypad line goes low.
    Stopped,
}

/// Game Boy CPU core.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    ime: bool,
    state: RunState,
    /// Location and code of the decode fault that locked the core, if any.
    fault: Option<(u16, u16)>,
    boot: BootState,
}

impl Cpu {
    /// Whether maskable interrupts are currently enabled.
    #[inline]
    pub fn ime(&self) -> bool {
        self.ime
    }

    #[inline]
    pub fn set_ime(&mut self, enabled: bool) {
        self.ime = enabled;
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// True once a decode fault has stopped the core.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.fault.is_some()
    }

    /// The fault that locked the core, reported as it was first raised.
    pub fn fault(&self) -> Option<CpuError> {
        self.fault
            .map(|(address, opcode)| CpuError::DecodeFault { address, opcode })
    }

    fn set_state(&mut self, state: RunState) {
        if self.state != state {
            log::debug!(
                "GB CPU state {:?} -> {:?} at PC=0x{:04X}",
                self.state,
                state,
                self.regs.pc
            );
            self.state = state;
        }
    }
}
