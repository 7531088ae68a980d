use std::fmt;

use super::context::ExecContext;
use super::{CpuError, Flags, Reg16, Reg8};

/// Result of running one handler: the address of the next instruction.
pub type HandlerResult = Result<u16, CpuError>;

/// Semantic function bound to an opcode.
pub type Handler = fn(&mut ExecContext<'_>) -> HandlerResult;

/// Prefix byte selecting the CB extended table.
pub const PREFIX_CB: u8 = 0xCB;
/// STOP shares the two-byte prefixed encoding (`10 00`).
pub const PREFIX_STOP: u8 = 0x10;

/// Name given to descriptors with no defined semantics.
pub const INVALID: &str = "INVALID";

/// Branch condition tested by JP/JR/CALL/RET cc.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    NZ,
    Z,
    NC,
    C,
}

impl Condition {
    /// Decode the 2-bit `cc` field (bits 4:3 of the opcode).
    pub const fn from_index(cc: u8) -> Self {
        match cc & 0x03 {
            0 => Self::NZ,
            1 => Self::Z,
            2 => Self::NC,
            _ => Self::C,
        }
    }

    #[inline]
    pub fn holds(self, flags: Flags) -> bool {
        match self {
            Self::NZ => !flags.contains(Flags::Z),
            Self::Z => flags.contains(Flags::Z),
            Self::NC => !flags.contains(Flags::C),
            Self::C => flags.contains(Flags::C),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NZ => "NZ",
            Self::Z => "Z",
            Self::NC => "NC",
            Self::C => "C",
        };
        f.write_str(name)
    }
}

/// Where an instruction operand lives.
///
/// Operands are fixed per opcode when the table is built; handlers resolve
/// them against the live registers and bus through [`ExecContext`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    None,
    /// An 8-bit register.
    Reg(Reg8),
    /// A 16-bit register or register pair.
    Pair(Reg16),
    /// Memory addressed by a register pair: `(BC)`, `(DE)`, `(HL)`.
    Indirect(Reg16),
    /// `(HL+)`: memory at HL, then HL is incremented.
    HlIncrement,
    /// `(HL-)`: memory at HL, then HL is decremented.
    HlDecrement,
    /// `d8`: the byte following the opcode.
    Imm8,
    /// `r8`: the byte following the opcode, read as a signed offset.
    SignedImm8,
    /// `d16`/`a16`: the little-endian word following the opcode.
    Imm16,
    /// `(a16)`: memory addressed by the immediate word.
    Absolute,
    /// `(FF00+a8)`: high page addressed by the immediate byte.
    HighImm,
    /// `(FF00+C)`: high page addressed by register C.
    HighC,
    /// `SP+r8`, only used by `LD HL,SP+r8`.
    SpOffset,
    Cond(Condition),
    /// Bit index for BIT/SET/RES.
    Bit(u8),
    /// Restart vector for RST.
    Vector(u8),
}

impl Operand {
    /// Number of immediate bytes this operand adds to the encoding.
    pub const fn immediate_len(self) -> u8 {
        match self {
            Self::Imm8 | Self::SignedImm8 | Self::HighImm | Self::SpOffset => 1,
            Self::Imm16 | Self::Absolute => 2,
            _ => 0,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Reg(reg) => write!(f, "{reg}"),
            Self::Pair(pair) => write!(f, "{pair}"),
            Self::Indirect(pair) => write!(f, "({pair})"),
            Self::HlIncrement => f.write_str("(HL+)"),
            Self::HlDecrement => f.write_str("(HL-)"),
            Self::Imm8 => f.write_str("d8"),
            Self::SignedImm8 => f.write_str("r8"),
            Self::Imm16 => f.write_str("a16"),
            Self::Absolute => f.write_str("(a16)"),
            Self::HighImm => f.write_str("(FF00+a8)"),
            Self::HighC => f.write_str("(FF00+C)"),
            Self::SpOffset => f.write_str("SP+r8"),
            Self::Cond(cond) => write!(f, "{cond}"),
            Self::Bit(bit) => write!(f, "{bit}"),
            Self::Vector(vector) => write!(f, "{vector:02X}H"),
        }
    }
}

/// Static description of one opcode.
#[derive(Clone, Copy, Debug)]
pub struct OpcodeDescriptor {
    /// Full code: `0x00..=0xFF`, or prefix-high/operand-low for `0xCBxx`
    /// and `0x10xx`.
    pub opcode: u16,
    pub name: &'static str,
    pub operand1: Operand,
    pub operand2: Operand,
    /// Encoded length in bytes, prefix included.
    pub length: u8,
    /// T-cycles when no branch is taken (or for unconditional forms).
    pub cycles: u8,
    /// T-cycles when a conditional branch is taken.
    pub cycles_taken: u8,
    pub handler: Handler,
}

impl OpcodeDescriptor {
    #[inline]
    pub fn is_implemented(&self) -> bool {
        self.name != INVALID
    }

    /// Human-readable form such as `LD B, (HL)` or `BIT 7, A`.
    pub fn mnemonic(&self) -> String {
        match (self.operand1, self.operand2) {
            (Operand::None, Operand::None) => self.name.to_string(),
            (op, Operand::None) | (Operand::None, op) => format!("{} {op}", self.name),
            (op1, op2) => format!("{} {op1}, {op2}", self.name),
        }
    }
}

impl fmt::Display for OpcodeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mnemonic())
    }
}

/// Resolve a (possibly prefixed) opcode to its descriptor.
///
/// `0x00..=0xFF` index the primary table, `0xCBxx` the CB table and `0x1000`
/// is STOP. Anything else maps to the invalid descriptor.
pub fn lookup(code: u16) -> &'static OpcodeDescriptor {
    let [prefix, low] = code.to_be_bytes();
    match prefix {
        0x00 => {
            let primary: &'static [OpcodeDescriptor; 256] = &super::table::PRIMARY;
            &primary[low as usize]
        }
        PREFIX_CB => {
            let extended: &'static [OpcodeDescriptor; 256] = &super::table::EXTENDED;
            &extended[low as usize]
        }
        PREFIX_STOP if low == 0x00 => &super::table::STOP,
        _ => &super::table::INVALID_DESCRIPTOR,
    }
}
