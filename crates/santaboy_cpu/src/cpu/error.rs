use thiserror::Error;

/// Faults raised by the dispatcher.
///
/// `opcode` is the full code that was looked up: a single byte for the
/// primary table, or prefix-high/operand-low for the extended families
/// (e.g. `0xCBxx`, `0x10xx`).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CpuError {
    #[error("decode fault: opcode {opcode:#06x} at {address:#06x} has no table entry")]
    DecodeFault { address: u16, opcode: u16 },

    #[error("cpu locked by an earlier decode fault (opcode {opcode:#06x} at {address:#06x})")]
    Locked { address: u16, opcode: u16 },
}
