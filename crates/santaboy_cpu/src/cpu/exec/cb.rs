//! CB-prefixed instructions (bit operations, shifts, and rotates).

use crate::cpu::alu::{self, Shift};
use crate::cpu::context::ExecContext;
use crate::cpu::opcode::{HandlerResult, Operand};
use crate::cpu::Flags;

fn shift_target(ctx: &mut ExecContext<'_>, kind: Shift) -> HandlerResult {
    let target = ctx.opcode.operand1;
    let value = ctx.read8(target);
    let (result, carry) = alu::shift(kind, value, ctx.regs.flag(Flags::C));
    ctx.write8(target, result);
    ctx.regs.f = alu::shift_flags(result, carry);
    Ok(ctx.next_pc())
}

pub(crate) fn rlc(ctx: &mut ExecContext<'_>) -> HandlerResult {
    shift_target(ctx, Shift::Rlc)
}

pub(crate) fn rrc(ctx: &mut ExecContext<'_>) -> HandlerResult {
    shift_target(ctx, Shift::Rrc)
}

pub(crate) fn rl(ctx: &mut ExecContext<'_>) -> HandlerResult {
    shift_target(ctx, Shift::Rl)
}

pub(crate) fn rr(ctx: &mut ExecContext<'_>) -> HandlerResult {
    shift_target(ctx, Shift::Rr)
}

pub(crate) fn sla(ctx: &mut ExecContext<'_>) -> HandlerResult {
    shift_target(ctx, Shift::Sla)
}

pub(crate) fn sra(ctx: &mut ExecContext<'_>) -> HandlerResult {
    shift_target(ctx, Shift::Sra)
}

pub(crate) fn srl(ctx: &mut ExecContext<'_>) -> HandlerResult {
    shift_target(ctx, Shift::Srl)
}

pub(crate) fn swap(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let target = ctx.opcode.operand1;
    let value = ctx.read8(target);
    let (result, flags) = alu::swap(value);
    ctx.write8(target, result);
    ctx.regs.f = flags;
    Ok(ctx.next_pc())
}

#[inline]
fn bit_mask(operand: Operand) -> u8 {
    match operand {
        Operand::Bit(bit) => 1 << (bit & 0x07),
        _ => unreachable!("operand {operand:?} is not a bit index"),
    }
}

/// BIT b,r: Z is set when the tested bit is 0; H=1, N=0, C preserved.
pub(crate) fn bit(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let mask = bit_mask(ctx.opcode.operand1);
    let value = ctx.read8(ctx.opcode.operand2);
    let carry = ctx.regs.f & Flags::C;
    ctx.regs.f = carry | Flags::H;
    ctx.regs.set_flag(Flags::Z, value & mask == 0);
    Ok(ctx.next_pc())
}

/// RES b,r. No flags are affected.
pub(crate) fn res(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let mask = bit_mask(ctx.opcode.operand1);
    let target = ctx.opcode.operand2;
    let value = ctx.read8(target);
    ctx.write8(target, value & !mask);
    Ok(ctx.next_pc())
}

/// SET b,r. No flags are affected.
pub(crate) fn set(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let mask = bit_mask(ctx.opcode.operand1);
    let target = ctx.opcode.operand2;
    let value = ctx.read8(target);
    ctx.write8(target, value | mask);
    Ok(ctx.next_pc())
}
