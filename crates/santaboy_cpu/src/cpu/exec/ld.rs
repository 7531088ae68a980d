use crate::cpu::alu;
use crate::cpu::context::ExecContext;
use crate::cpu::opcode::HandlerResult;

/// LD for every 8-bit form: register, immediate, `(rr)`, `(HL±)`, `(a16)`
/// and the high-page `(FF00+n)` variants. No flags are affected.
pub(crate) fn ld8(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let value = ctx.read8(ctx.opcode.operand2);
    ctx.write8(ctx.opcode.operand1, value);
    Ok(ctx.next_pc())
}

/// LD rr,d16 / LD SP,HL / LD (a16),SP.
pub(crate) fn ld16(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let value = ctx.read16(ctx.opcode.operand2);
    ctx.write16(ctx.opcode.operand1, value);
    Ok(ctx.next_pc())
}

/// LD HL,SP+r8. Flags as for ADD SP,r8.
pub(crate) fn ld_hl_sp_offset(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let offset = ctx.imm8();
    let (result, flags) = alu::add_signed(ctx.regs.sp, offset);
    ctx.regs.set_hl(result);
    ctx.regs.f = flags;
    Ok(ctx.next_pc())
}
