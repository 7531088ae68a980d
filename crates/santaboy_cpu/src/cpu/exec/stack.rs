use crate::cpu::context::ExecContext;
use crate::cpu::opcode::HandlerResult;

/// PUSH rr.
pub(crate) fn push(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let value = ctx.read16(ctx.opcode.operand1);
    ctx.push16(value);
    Ok(ctx.next_pc())
}

/// POP rr. POP AF drops the low nibble of F.
pub(crate) fn pop(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let value = ctx.pop16();
    ctx.write16(ctx.opcode.operand1, value);
    Ok(ctx.next_pc())
}
