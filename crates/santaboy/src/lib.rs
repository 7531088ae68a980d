//! Headless runner: load a ROM into a flat bus and execute it until it
//! faults, spins or hits the step limit.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use santaboy_cpu::{BootState, Cpu, CpuError, Registers, RunState, SystemBus};
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_STEPS: u64 = 10_000_000;

#[derive(Debug, Clone, TypedBuilder)]
pub struct RunConfig {
    #[builder(setter(into))]
    pub rom_path: PathBuf,
    #[builder(default = DEFAULT_MAX_STEPS)]
    pub max_steps: u64,
    #[builder(default = BootState::Dmg)]
    pub boot_state: BootState,
    /// Dispatch pending interrupts between steps.
    #[builder(default = true)]
    pub service_interrupts: bool,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Fault(CpuError),
    StepLimit,
    /// An instruction jumped to itself (`JR -2`, `JP self`), the usual way
    /// test ROMs signal that they are done.
    Spin { pc: u16 },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fault(err) => write!(f, "{err}"),
            Self::StepLimit => f.write_str("step limit reached"),
            Self::Spin { pc } => write!(f, "spinning at 0x{pc:04X}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub steps: u64,
    pub cycles: u64,
    pub registers: Registers,
    pub reason: StopReason,
}

impl RunSummary {
    pub fn faulted(&self) -> bool {
        matches!(self.reason, StopReason::Fault(_))
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "stopped: {}", self.reason)?;
        writeln!(f, "instructions: {}", self.steps)?;
        writeln!(f, "cycles: {}", self.cycles)?;
        write!(f, "registers: {}", self.registers)
    }
}

/// Read the ROM named by `config` and run it.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let rom = std::fs::read(&config.rom_path)
        .with_context(|| format!("failed to read ROM '{}'", config.rom_path.display()))?;
    log::info!(
        "Running ROM '{}' ({} bytes)",
        config.rom_path.display(),
        rom.len()
    );
    Ok(run_rom(&rom, config))
}

/// Run an in-memory ROM image. `config.rom_path` is not used.
pub fn run_rom(rom: &[u8], config: &RunConfig) -> RunSummary {
    let mut bus = SystemBus::new();
    bus.load_rom(rom);
    let mut cpu = Cpu::with_boot_state(config.boot_state);

    let mut steps = 0u64;
    let reason = loop {
        if steps >= config.max_steps {
            break StopReason::StepLimit;
        }

        if config.service_interrupts {
            cpu.service_interrupt(&mut bus);
        }

        let pc = cpu.regs.pc;
        let state = cpu.state();
        if let Err(err) = cpu.step(&mut bus) {
            break StopReason::Fault(err);
        }
        steps += 1;

        if state == RunState::Running && cpu.state() == RunState::Running && cpu.regs.pc == pc {
            break StopReason::Spin { pc };
        }
    };

    log::debug!("Run ended after {steps} steps: {reason}");

    RunSummary {
        steps,
        cycles: bus.cycles(),
        registers: cpu.regs,
        reason,
    }
}
