use crate::cpu::context::ExecContext;
use crate::cpu::opcode::HandlerResult;
use crate::cpu::{CpuError, RunState};

pub(crate) fn nop(ctx: &mut ExecContext<'_>) -> HandlerResult {
    Ok(ctx.next_pc())
}

/// HALT: stop fetching until an enabled interrupt is requested.
pub(crate) fn halt(ctx: &mut ExecContext<'_>) -> HandlerResult {
    ctx.enter(RunState::Halted);
    Ok(ctx.next_pc())
}

/// STOP: enter low-power mode until a joypad line goes low.
pub(crate) fn stop(ctx: &mut ExecContext<'_>) -> HandlerResult {
    ctx.enter(RunState::Stopped);
    Ok(ctx.next_pc())
}

pub(crate) fn di(ctx: &mut ExecContext<'_>) -> HandlerResult {
    *ctx.ime = false;
    Ok(ctx.next_pc())
}

pub(crate) fn ei(ctx: &mut ExecContext<'_>) -> HandlerResult {
    *ctx.ime = true;
    Ok(ctx.next_pc())
}

/// Bound to every code without defined semantics.
pub(crate) fn invalid(ctx: &mut ExecContext<'_>) -> HandlerResult {
    Err(CpuError::DecodeFault {
        address: ctx.pc,
        opcode: ctx.code,
    })
}
