use super::{Cpu, Registers, RunState};

/// Register state a [`Cpu`] starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BootState {
    /// Values left by the DMG boot ROM when it hands control to the
    /// cartridge at 0x0100.
    #[default]
    Dmg,
    /// Every register zero, PC at 0x0000.
    Zeroed,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self::with_boot_state(BootState::Dmg)
    }

    pub fn with_boot_state(boot: BootState) -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            ime: false,
            state: RunState::Running,
            fault: None,
            boot,
        };
        cpu.apply_boot_state();
        cpu
    }

    /// Reset to the boot state this core was created with. Clears a lock.
    pub fn reset(&mut self) {
        self.state = RunState::Running;
        self.fault = None;
        self.apply_boot_state();
    }

    fn apply_boot_state(&mut self) {
        self.regs = Registers::default();
        // IME is clear when control reaches the cartridge; software enables
        // interrupts with EI/RETI.
        self.ime = false;

        if self.boot == BootState::Dmg {
            self.regs.set_af(0x01B0);
            self.regs.set_bc(0x0013);
            self.regs.set_de(0x00D8);
            self.regs.set_hl(0x014D);
            self.regs.sp = 0xFFFE;
            self.regs.pc = 0x0100;
        }
    }
}
