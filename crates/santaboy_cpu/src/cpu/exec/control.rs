use crate::cpu::context::ExecContext;
use crate::cpu::opcode::{HandlerResult, Operand};

/// JP a16.
pub(crate) fn jp(ctx: &mut ExecContext<'_>) -> HandlerResult {
    Ok(ctx.imm16())
}

/// JP cc,a16.
pub(crate) fn jp_cc(ctx: &mut ExecContext<'_>) -> HandlerResult {
    if ctx.condition(ctx.opcode.operand1) {
        ctx.take_branch();
        Ok(ctx.imm16())
    } else {
        Ok(ctx.next_pc())
    }
}

/// JP (HL). Jumps to HL itself, not to the word stored at HL.
pub(crate) fn jp_hl(ctx: &mut ExecContext<'_>) -> HandlerResult {
    Ok(ctx.regs.hl())
}

/// Target of a relative jump: the signed offset applies to the address
/// following the operand.
#[inline]
fn relative_target(ctx: &mut ExecContext<'_>) -> u16 {
    let offset = ctx.imm8() as i8;
    ctx.next_pc().wrapping_add_signed(offset as i16)
}

/// JR r8.
pub(crate) fn jr(ctx: &mut ExecContext<'_>) -> HandlerResult {
    Ok(relative_target(ctx))
}

/// JR cc,r8.
pub(crate) fn jr_cc(ctx: &mut ExecContext<'_>) -> HandlerResult {
    if ctx.condition(ctx.opcode.operand1) {
        ctx.take_branch();
        Ok(relative_target(ctx))
    } else {
        Ok(ctx.next_pc())
    }
}

/// CALL a16: push the address after the CALL, then jump.
pub(crate) fn call(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let target = ctx.imm16();
    let ret = ctx.next_pc();
    ctx.push16(ret);
    Ok(target)
}

/// CALL cc,a16.
pub(crate) fn call_cc(ctx: &mut ExecContext<'_>) -> HandlerResult {
    if ctx.condition(ctx.opcode.operand1) {
        ctx.take_branch();
        call(ctx)
    } else {
        Ok(ctx.next_pc())
    }
}

/// RST n: call one of the eight fixed low-memory vectors.
pub(crate) fn rst(ctx: &mut ExecContext<'_>) -> HandlerResult {
    let vector = match ctx.opcode.operand1 {
        Operand::Vector(vector) => vector as u16,
        other => unreachable!("operand {other:?} is not a restart vector"),
    };
    let ret = ctx.next_pc();
    ctx.push16(ret);
    Ok(vector)
}

/// RET.
pub(crate) fn ret(ctx: &mut ExecContext<'_>) -> HandlerResult {
    Ok(ctx.pop16())
}

/// RET cc.
pub(crate) fn ret_cc(ctx: &mut ExecContext<'_>) -> HandlerResult {
    if ctx.condition(ctx.opcode.operand1) {
        ctx.take_branch();
        Ok(ctx.pop16())
    } else {
        Ok(ctx.next_pc())
    }
}

/// RETI: RET and re-enable interrupts.
pub(crate) fn reti(ctx: &mut ExecContext<'_>) -> HandlerResult {
    *ctx.ime = true;
    Ok(ctx.pop16())
}
