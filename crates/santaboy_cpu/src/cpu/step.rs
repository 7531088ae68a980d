use super::context::ExecContext;
use super::opcode::{lookup, PREFIX_CB, PREFIX_STOP};
use super::{Bus, Cpu, CpuError, RunState, IE_ADDR, IF_ADDR, JOYPAD_ADDR};

/// Cost reported for a step spent idling in HALT or STOP.
const IDLE_CYCLES: u32 = 4;

impl Cpu {
    /// Execute a single instruction and return the number of T-cycles taken.
    ///
    /// The bus is ticked once with that count, except while stopped. A
    /// decode fault locks the core: the faulting step returns
    /// [`CpuError::DecodeFault`] and every later step returns
    /// [`CpuError::Locked`] without touching the bus.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, CpuError> {
        if let Some((address, opcode)) = self.fault {
            return Err(CpuError::Locked { address, opcode });
        }

        match self.state {
            RunState::Running => {}
            RunState::Stopped => {
                // Any low P10-P13 line ends STOP. Timers stay frozen, so the
                // bus is not ticked.
                if bus.read8(JOYPAD_ADDR) & 0x0F != 0x0F {
                    self.set_state(RunState::Running);
                }
                return Ok(IDLE_CYCLES);
            }
            RunState::Halted => {
                // HALT ends on any requested and enabled source, even with
                // IME clear; servicing is left to the host.
                let pending = bus.read8(IE_ADDR) & bus.read8(IF_ADDR) & 0x1F;
                if pending == 0 {
                    bus.tick(IDLE_CYCLES);
                    return Ok(IDLE_CYCLES);
                }
                self.set_state(RunState::Running);
            }
        }

        let pc = self.regs.pc;
        let first = bus.read8(pc);
        let code = match first {
            PREFIX_CB | PREFIX_STOP => {
                let second = bus.read8(pc.wrapping_add(1));
                u16::from_be_bytes([first, second])
            }
            _ => first as u16,
        };
        let descriptor = lookup(code);

        log::trace!("GB CPU 0x{pc:04X}: {descriptor}");

        let mut ctx = ExecContext::new(pc, code, descriptor, bus, &mut self.regs, &mut self.ime);
        let result = (descriptor.handler)(&mut ctx);
        let taken = ctx.branch_taken();
        let requested = ctx.requested_state();
        // `ctx` borrows `bus`; release it before ticking.
        drop(ctx);

        let next_pc = match result {
            Ok(next_pc) => next_pc,
            Err(err) => {
                log::error!(
                    "GB CPU locked: {err} (SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X})",
                    sp = self.regs.sp,
                    af = self.regs.af(),
                    bc = self.regs.bc(),
                    de = self.regs.de(),
                    hl = self.regs.hl(),
                );
                self.fault = Some((pc, code));
                return Err(err);
            }
        };

        self.regs.pc = next_pc;
        if let Some(state) = requested {
            self.set_state(state);
        }

        let cycles = u32::from(if taken {
            descriptor.cycles_taken
        } else {
            descriptor.cycles
        });
        bus.tick(cycles);
        Ok(cycles)
    }
}
