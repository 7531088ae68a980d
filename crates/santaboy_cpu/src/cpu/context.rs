use super::{Bus, OpcodeDescriptor, Operand, Registers, RunState};

/// Everything a handler may touch while executing one instruction.
///
/// The dispatcher builds one of these per instruction. It borrows the
/// register file, the bus and the interrupt-enable flag from the CPU for the
/// duration of the handler call only.
pub struct ExecContext<'a> {
    /// Address of the first byte of the instruction (the prefix byte for
    /// prefixed opcodes).
    pub pc: u16,
    /// Code that was looked up, e.g. `0x3E` or `0xCB11`.
    pub code: u16,
    pub opcode: &'static OpcodeDescriptor,
    pub bus: &'a mut dyn Bus,
    pub regs: &'a mut Registers,
    pub ime: &'a mut bool,
    branch_taken: bool,
    run_state: Option<RunState>,
}

impl<'a> ExecContext<'a> {
    pub fn new(
        pc: u16,
        code: u16,
        opcode: &'static OpcodeDescriptor,
        bus: &'a mut dyn Bus,
        regs: &'a mut Registers,
        ime: &'a mut bool,
    ) -> Self {
        Self {
            pc,
            code,
            opcode,
            bus,
            regs,
            ime,
            branch_taken: false,
            run_state: None,
        }
    }

    /// Address of the instruction that follows this one.
    #[inline]
    pub fn next_pc(&self) -> u16 {
        self.pc.wrapping_add(self.opcode.length as u16)
    }

    #[inline]
    pub fn imm8(&mut self) -> u8 {
        self.bus.read8(self.pc.wrapping_add(1))
    }

    #[inline]
    pub fn imm16(&mut self) -> u16 {
        let lo = self.bus.read8(self.pc.wrapping_add(1));
        let hi = self.bus.read8(self.pc.wrapping_add(2));
        u16::from_le_bytes([lo, hi])
    }

    /// Address of a memory operand that does not modify registers.
    fn address(&mut self, operand: Operand) -> u16 {
        match operand {
            Operand::Indirect(pair) => self.regs.get16(pair),
            Operand::Absolute => self.imm16(),
            Operand::HighImm => 0xFF00 | self.imm8() as u16,
            Operand::HighC => 0xFF00 | self.regs.c as u16,
            _ => unreachable!("operand {operand:?} is not a memory location"),
        }
    }

    /// Step HL for the `(HL+)`/`(HL-)` forms and return the address to use.
    fn hl_post_adjust(&mut self, operand: Operand) -> u16 {
        let hl = self.regs.hl();
        let next = match operand {
            Operand::HlIncrement => hl.wrapping_add(1),
            _ => hl.wrapping_sub(1),
        };
        self.regs.set_hl(next);
        hl
    }

    /// Read an 8-bit operand.
    pub fn read8(&mut self, operand: Operand) -> u8 {
        match operand {
            Operand::Reg(reg) => self.regs.get8(reg),
            Operand::Imm8 | Operand::SignedImm8 => self.imm8(),
            Operand::HlIncrement | Operand::HlDecrement => {
                let addr = self.hl_post_adjust(operand);
                self.bus.read8(addr)
            }
            _ => {
                let addr = self.address(operand);
                self.bus.read8(addr)
            }
        }
    }

    /// Write an 8-bit operand.
    pub fn write8(&mut self, operand: Operand, value: u8) {
        match operand {
            Operand::Reg(reg) => self.regs.set8(reg, value),
            Operand::HlIncrement | Operand::HlDecrement => {
                let addr = self.hl_post_adjust(operand);
                self.bus.write8(addr, value);
            }
            _ => {
                let addr = self.address(operand);
                self.bus.write8(addr, value);
            }
        }
    }

    /// Read a 16-bit operand (a register pair or the immediate word).
    pub fn read16(&mut self, operand: Operand) -> u16 {
        match operand {
            Operand::Pair(pair) => self.regs.get16(pair),
            Operand::Imm16 => self.imm16(),
            _ => unreachable!("operand {operand:?} has no 16-bit value"),
        }
    }

    /// Write a 16-bit operand. `(a16)` stores low byte first.
    pub fn write16(&mut self, operand: Operand, value: u16) {
        match operand {
            Operand::Pair(pair) => self.regs.set16(pair, value),
            Operand::Absolute => {
                let addr = self.imm16();
                let [lo, hi] = value.to_le_bytes();
                self.bus.write8(addr, lo);
                self.bus.write8(addr.wrapping_add(1), hi);
            }
            _ => unreachable!("operand {operand:?} cannot hold a 16-bit value"),
        }
    }

    /// Push a word: high byte first, each write preceded by SP - 1, so that
    /// memory[SP] = low and memory[SP+1] = high.
    pub fn push16(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.bus.write8(self.regs.sp, lo);
    }

    /// Pop a word: low byte at SP, high byte at SP + 1, then SP + 2.
    pub fn pop16(&mut self) -> u16 {
        let lo = self.bus.read8(self.regs.sp);
        let hi = self.bus.read8(self.regs.sp.wrapping_add(1));
        self.regs.sp = self.regs.sp.wrapping_add(2);
        u16::from_le_bytes([lo, hi])
    }

    /// Evaluate a branch condition operand. `Operand::None` always holds.
    pub fn condition(&self, operand: Operand) -> bool {
        match operand {
            Operand::Cond(cond) => cond.holds(self.regs.f),
            _ => true,
        }
    }

    /// Record that a conditional branch was taken (selects the taken cost).
    #[inline]
    pub fn take_branch(&mut self) {
        self.branch_taken = true;
    }

    #[inline]
    pub fn branch_taken(&self) -> bool {
        self.branch_taken
    }

    /// Ask the dispatcher to switch run state once the handler returns.
    #[inline]
    pub fn enter(&mut self, state: RunState) {
        self.run_state = Some(state);
    }

    #[inline]
    pub fn requested_state(&self) -> Option<RunState> {
        self.run_state
    }
}
