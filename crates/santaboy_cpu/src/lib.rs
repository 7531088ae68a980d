//! LR35902 instruction core: opcode tables, dispatcher and handlers, plus
//! the handful of registers the core talks to directly.

pub mod cpu;
pub mod peripherals;
pub mod system;

pub use cpu::{BootState, Bus, Cpu, CpuError, Flags, Registers, RunState};
pub use peripherals::InterruptSources;
pub use system::SystemBus;
