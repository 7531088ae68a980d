use super::{Bus, Cpu, RunState, IE_ADDR, IF_ADDR};

/// T-cycles charged for an interrupt dispatch.
const DISPATCH_CYCLES: u32 = 20;

impl Cpu {
    /// Dispatch the highest-priority pending interrupt, if any.
    ///
    /// Requires IME. The lowest-numbered source that is both requested and
    /// enabled wins (v-blank, LCD-stat, timer, serial, joypad). Its IF bit
    /// and IME are cleared, PC is pushed as CALL would push it and control
    /// moves to `0x40 + 8 * index`. Returns the cycles spent, or `None` when
    /// nothing was dispatched. Never called by [`Cpu::step`] itself.
    pub fn service_interrupt<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        if !self.ime || self.fault.is_some() || self.state == RunState::Stopped {
            return None;
        }

        let iflags = bus.read8(IF_ADDR);
        let pending = bus.read8(IE_ADDR) & iflags & 0x1F;
        if pending == 0 {
            return None;
        }

        let index = pending.trailing_zeros() as u16;
        let vector = 0x0040 + index * 8;
        bus.write8(IF_ADDR, iflags & !(1 << index));

        self.ime = false;
        self.set_state(RunState::Running);

        let pc = self.regs.pc;
        let [lo, hi] = pc.to_le_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);

        log::debug!(
            "GB CPU interrupt: idx={} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
            index,
            vector,
            pc,
            self.regs.sp,
        );

        self.regs.pc = vector;
        bus.tick(DISPATCH_CYCLES);
        Some(DISPATCH_CYCLES)
    }
}
