use crate::cpu::alu::{self, Shift};
use crate::cpu::context::ExecContext;
use crate::cpu::opcode::HandlerResult;
use crate::cpu::Flags;

#[inline]
fn source(ctx: &mut ExecContext<'_>) -> u8 {
    ctx.read8(ctx.opcode.operand2)
}

#[inline]
fn store_a(ctx: &mut ExecContext<'_>, (result, flags): (u8, Flags)) -> HandlerResult {
    ctx.regs.a = result;
    ctx.regs.f = flags;
    Ok(ctx.next_pc())
}

pub(crate) fn add(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let value = source(ctx);
    let out = alu::add8(ctx.regs.a, value, false);
    store_a(ctx, out)
}

pub(crate) fn adc(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let value = source(ctx);
    let carry = ctx.regs.flag(Flags::C);
    let out = alu::add8(ctx.regs.a, value, carry);
    store_a(ctx, out)
}

pub(crate) fn sub(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let value = source(ctx);
    let out = alu::sub8(ctx.regs.a, value, false);
    store_a(ctx, out)
}

pub(crate) fn sbc(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let value = source(ctx);
    let carry = ctx.regs.flag(Flags::C);
    let out = alu::sub8(ctx.regs.a, value, carry);
    store_a(ctx, out)
}

pub(crate) fn and(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let value = source(ctx);
    let out = alu::and8(ctx.regs.a, value);
    store_a(ctx, out)
}

pub(crate) fn xor(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let value = source(ctx);
    let out = alu::xor8(ctx.regs.a, value);
    store_a(ctx, out)
}

pub(crate) fn or(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let value = source(ctx);
    let out = alu::or8(ctx.regs.a, value);
    store_a(ctx, out)
}

/// Compare A with the operand, setting flags as if `A - value` was
/// performed. A itself is not modified.
pub(crate) fn cp(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let value = source(ctx);
    let (_, flags) = alu::sub8(ctx.regs.a, value, false);
    ctx.regs.f = flags;
    Ok(ctx.next_pc())
}

/// ADD HL,rr.
pub(crate) fn add_hl(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let value = ctx.read16(ctx.opcode.operand2);
    let (result, flags) = alu::add16(ctx.regs.hl(), value, ctx.regs.f);
    ctx.regs.set_hl(result);
    ctx.regs.f = flags;
    Ok(ctx.next_pc())
}

/// ADD SP,r8.
pub(crate) fn add_sp(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let offset = ctx.imm8();
    let (result, flags) = alu::add_signed(ctx.regs.sp, offset);
    ctx.regs.sp = result;
    ctx.regs.f = flags;
    Ok(ctx.next_pc())
}

pub(crate) fn daa(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let out = alu::daa(ctx.regs.a, ctx.regs.f);
    store_a(ctx, out)
}

/// CPL: A = !A, sets N and H.
pub(crate) fn cpl(ctx: &mut ExecContext<'_>) -> HandlerResult {
    ctx.regs.a = !ctx.regs.a;
    ctx.regs.f |= Flags::N | Flags::H;
    Ok(ctx.next_pc())
}

/// CCF: flip C, clear N and H, keep Z.
pub(crate) fn ccf(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let carry = ctx.regs.flag(Flags::C);
    ctx.regs.f &= Flags::Z;
    ctx.regs.set_flag(Flags::C, !carry);
    Ok(ctx.next_pc())
}

/// SCF: set C, clear N and H, keep Z.
pub(crate) fn scf(ctx: &mut ExecContext<'_>) -> HandlerResult {
    ctx.regs.f = (ctx.regs.f & Flags::Z) | Flags::C;
    Ok(ctx.next_pc())
}

/// Unprefixed accumulator rotates always clear Z, unlike their CB forms.
fn rotate_a(ctx: &mut ExecContext<'_>, kind: Shift) -> HandlerResult {
    let (result, carry) = alu::shift(kind, ctx.regs.a, ctx.regs.flag(Flags::C));
    ctx.regs.a = result;
    ctx.regs.f = if carry { Flags::C } else { Flags::empty() };
    Ok(ctx.next_pc())
}

pub(crate) fn rlca(ctx: &mut ExecContext<'_>) -> HandlerResult {
    rotate_a(ctx, Shift::Rlc)
}

pub(crate) fn rrca(ctx: &mut ExecContext<'_>) -> HandlerResult {
    rotate_a(ctx, Shift::Rrc)
}

pub(crate) fn rla(ctx: &mut ExecContext<'_>) -> HandlerResult {
    rotate_a(ctx, Shift::Rl)
}

pub(crate) fn rra(ctx: &mut ExecContext<'_>) -> HandlerResult {
    rotate_a(ctx, Shift::Rr)
}
