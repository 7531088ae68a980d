use crate::cpu::alu;
use crate::cpu::context::ExecContext;
use crate::cpu::opcode::HandlerResult;

/// INC r / INC (HL). C is left unchanged.
pub(crate) fn inc8(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let target = ctx.opcode.operand1;
    let value = ctx.read8(target);
    let (result, flags) = alu::inc8(value, ctx.regs.f);
    ctx.write8(target, result);
    ctx.regs.f = flags;
    Ok(ctx.next_pc())
}

/// DEC r / DEC (HL). C is left unchanged.
pub(crate) fn dec8(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let target = ctx.opcode.operand1;
    let value = ctx.read8(target);
    let (result, flags) = alu::dec8(value, ctx.regs.f);
    ctx.write8(target, result);
    ctx.regs.f = flags;
    Ok(ctx.next_pc())
}

/// INC rr. No flags are affected.
pub(crate) fn inc16(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let target = ctx.opcode.operand1;
    let value = ctx.read16(target).wrapping_add(1);
    ctx.write16(target, value);
    Ok(ctx.next_pc())
}

/// DEC rr. No flags are affected.
pub(crate) fn dec16(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let target = ctx.opcode.operand1;
    let value = ctx.read16(target).wrapping_sub(1);
    ctx.write16(target, value);
    Ok(ctx.next_pc())
}
