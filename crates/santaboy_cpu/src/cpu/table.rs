//! Static opcode tables.
//!
//! Both tables are built once, on first use, by walking the regular
//! `x/y/z` structure of the instruction set. Every defined opcode is
//! registered exactly once; codes nobody registers end up bound to the
//! invalid descriptor.

use lazy_static::lazy_static;

use super::exec;
use super::opcode::{
    Condition, Handler, OpcodeDescriptor, Operand, INVALID, PREFIX_CB, PREFIX_STOP,
};
use super::{Reg16, Reg8};

lazy_static! {
    /// Unprefixed opcodes `0x00..=0xFF`.
    pub(crate) static ref PRIMARY: [OpcodeDescriptor; 256] = build_primary();
    /// CB-prefixed opcodes, indexed by the byte after the prefix.
    pub(crate) static ref EXTENDED: [OpcodeDescriptor; 256] = build_extended();
}

/// `10 00`: the only defined member of the STOP family.
pub(crate) static STOP: OpcodeDescriptor = OpcodeDescriptor {
    opcode: (PREFIX_STOP as u16) << 8,
    name: "STOP",
    operand1: Operand::None,
    operand2: Operand::None,
    length: 2,
    cycles: 4,
    cycles_taken: 4,
    handler: exec::stop,
};

/// Shared fallback for codes outside both tables.
pub(crate) static INVALID_DESCRIPTOR: OpcodeDescriptor = invalid_descriptor(0);

const fn invalid_descriptor(opcode: u16) -> OpcodeDescriptor {
    OpcodeDescriptor {
        opcode,
        name: INVALID,
        operand1: Operand::None,
        operand2: Operand::None,
        length: 1,
        cycles: 0,
        cycles_taken: 0,
        handler: exec::invalid,
    }
}

/// Register pairs selected by the `p` field of `rr` forms.
const RP: [Reg16; 4] = [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::SP];
/// Register pairs selected by PUSH/POP.
const RP2: [Reg16; 4] = [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::AF];

/// 8-bit ALU group in opcode order. SUB/AND/XOR/OR/CP leave A implicit.
const ALU_OPS: [(&str, bool, Handler); 8] = [
    ("ADD", true, exec::add),
    ("ADC", true, exec::adc),
    ("SUB", false, exec::sub),
    ("SBC", true, exec::sbc),
    ("AND", false, exec::and),
    ("XOR", false, exec::xor),
    ("OR", false, exec::or),
    ("CP", false, exec::cp),
];

const SHIFT_OPS: [(&str, Handler); 8] = [
    ("RLC", exec::rlc),
    ("RRC", exec::rrc),
    ("RL", exec::rl),
    ("RR", exec::rr),
    ("SLA", exec::sla),
    ("SRA", exec::sra),
    ("SWAP", exec::swap),
    ("SRL", exec::srl),
];

const A: Operand = Operand::Reg(Reg8::A);
const HL: Operand = Operand::Pair(Reg16::HL);
const AT_HL: Operand = Operand::Indirect(Reg16::HL);
const NONE: Operand = Operand::None;

/// Operand for the 3-bit register field; index 6 is `(HL)`.
fn r8(index: u8) -> Operand {
    Reg8::from_index(index).map_or(AT_HL, Operand::Reg)
}

/// T-cycle cost that depends on whether the operand goes through memory.
fn cost(operand: Operand, register: u8, memory: u8) -> u8 {
    if operand == AT_HL {
        memory
    } else {
        register
    }
}

struct TableBuilder {
    prefix: u16,
    entries: [Option<OpcodeDescriptor>; 256],
}

impl TableBuilder {
    fn new(prefix: u8) -> Self {
        Self {
            prefix: (prefix as u16) << 8,
            entries: [None; 256],
        }
    }

    fn branch(
        &mut self,
        code: u8,
        name: &'static str,
        operand1: Operand,
        operand2: Operand,
        cycles: u8,
        cycles_taken: u8,
        handler: Handler,
    ) {
        let slot = &mut self.entries[code as usize];
        debug_assert!(
            slot.is_none(),
            "opcode {:#06x} registered twice",
            self.prefix | code as u16
        );

        let base = if self.prefix == 0 { 1 } else { 2 };
        *slot = Some(OpcodeDescriptor {
            opcode: self.prefix | code as u16,
            name,
            operand1,
            operand2,
            length: base + operand1.immediate_len() + operand2.immediate_len(),
            cycles,
            cycles_taken,
            handler,
        });
    }

    fn define(
        &mut self,
        code: u8,
        name: &'static str,
        operand1: Operand,
        operand2: Operand,
        cycles: u8,
        handler: Handler,
    ) {
        self.branch(code, name, operand1, operand2, cycles, cycles, handler);
    }

    fn finish(self) -> [OpcodeDescriptor; 256] {
        let prefix = self.prefix;
        std::array::from_fn(|code| {
            self.entries[code].unwrap_or_else(|| invalid_descriptor(prefix | code as u16))
        })
    }
}

fn build_primary() -> [OpcodeDescriptor; 256] {
    let mut t = TableBuilder::new(0x00);

    t.define(0x00, "NOP", NONE, NONE, 4, exec::nop);
    t.define(0x08, "LD", Operand::Absolute, Operand::Pair(Reg16::SP), 20, exec::ld16);
    t.define(0x18, "JR", Operand::SignedImm8, NONE, 12, exec::jr);

    for (p, &pair) in RP.iter().enumerate() {
        let row = (p as u8) << 4;
        let rr = Operand::Pair(pair);
        t.define(row | 0x01, "LD", rr, Operand::Imm16, 12, exec::ld16);
        t.define(row | 0x03, "INC", rr, NONE, 8, exec::inc16);
        t.define(row | 0x09, "ADD", HL, rr, 8, exec::add_hl);
        t.define(row | 0x0B, "DEC", rr, NONE, 8, exec::dec16);
    }

    // LD (rr),A / LD A,(rr) with the HL auto-increment/decrement forms.
    let indirect = [
        Operand::Indirect(Reg16::BC),
        Operand::Indirect(Reg16::DE),
        Operand::HlIncrement,
        Operand::HlDecrement,
    ];
    for (p, &mem) in indirect.iter().enumerate() {
        let row = (p as u8) << 4;
        t.define(row | 0x02, "LD", mem, A, 8, exec::ld8);
        t.define(row | 0x0A, "LD", A, mem, 8, exec::ld8);
    }

    for y in 0..8u8 {
        let target = r8(y);
        t.define((y << 3) | 0x04, "INC", target, NONE, cost(target, 4, 12), exec::inc8);
        t.define((y << 3) | 0x05, "DEC", target, NONE, cost(target, 4, 12), exec::dec8);
        t.define(
            (y << 3) | 0x06,
            "LD",
            target,
            Operand::Imm8,
            cost(target, 8, 12),
            exec::ld8,
        );
    }

    t.define(0x07, "RLCA", NONE, NONE, 4, exec::rlca);
    t.define(0x0F, "RRCA", NONE, NONE, 4, exec::rrca);
    t.define(0x17, "RLA", NONE, NONE, 4, exec::rla);
    t.define(0x1F, "RRA", NONE, NONE, 4, exec::rra);
    t.define(0x27, "DAA", NONE, NONE, 4, exec::daa);
    t.define(0x2F, "CPL", NONE, NONE, 4, exec::cpl);
    t.define(0x37, "SCF", NONE, NONE, 4, exec::scf);
    t.define(0x3F, "CCF", NONE, NONE, 4, exec::ccf);

    // 0x40–0x7F: LD r,r' (0x76 would be LD (HL),(HL) and is HALT instead).
    for y in 0..8u8 {
        for z in 0..8u8 {
            let code = 0x40 | (y << 3) | z;
            if code == 0x76 {
                t.define(code, "HALT", NONE, NONE, 4, exec::halt);
                continue;
            }
            let (dst, src) = (r8(y), r8(z));
            let cycles = if dst == AT_HL || src == AT_HL { 8 } else { 4 };
            t.define(code, "LD", dst, src, cycles, exec::ld8);
        }
    }

    // 0x80–0xBF: ALU A,r and the matching d8 forms at 0xC6 + 8*y.
    for (y, &(name, explicit_a, handler)) in ALU_OPS.iter().enumerate() {
        let y = y as u8;
        let dst = if explicit_a { A } else { NONE };
        for z in 0..8u8 {
            let src = r8(z);
            t.define(0x80 | (y << 3) | z, name, dst, src, cost(src, 4, 8), handler);
        }
        t.define(0xC6 | (y << 3), name, dst, Operand::Imm8, 8, handler);
    }

    for cc in 0..4u8 {
        let cond = Operand::Cond(Condition::from_index(cc));
        let offset = cc << 3;
        t.branch(0x20 | offset, "JR", cond, Operand::SignedImm8, 8, 12, exec::jr_cc);
        t.branch(0xC0 | offset, "RET", cond, NONE, 8, 20, exec::ret_cc);
        t.branch(0xC2 | offset, "JP", cond, Operand::Imm16, 12, 16, exec::jp_cc);
        t.branch(0xC4 | offset, "CALL", cond, Operand::Imm16, 12, 24, exec::call_cc);
    }

    for (p, &pair) in RP2.iter().enumerate() {
        let row = (p as u8) << 4;
        t.define(0xC1 | row, "POP", Operand::Pair(pair), NONE, 12, exec::pop);
        t.define(0xC5 | row, "PUSH", Operand::Pair(pair), NONE, 16, exec::push);
    }

    for n in 0..8u8 {
        let vector = n << 3;
        t.define(0xC7 | vector, "RST", Operand::Vector(vector), NONE, 16, exec::rst);
    }

    t.define(0xC3, "JP", Operand::Imm16, NONE, 16, exec::jp);
    t.define(0xC9, "RET", NONE, NONE, 16, exec::ret);
    t.define(0xCD, "CALL", Operand::Imm16, NONE, 24, exec::call);
    t.define(0xD9, "RETI", NONE, NONE, 16, exec::reti);

    t.define(0xE0, "LDH", Operand::HighImm, A, 12, exec::ld8);
    t.define(0xF0, "LDH", A, Operand::HighImm, 12, exec::ld8);
    t.define(0xE2, "LD", Operand::HighC, A, 8, exec::ld8);
    t.define(0xF2, "LD", A, Operand::HighC, 8, exec::ld8);
    t.define(0xEA, "LD", Operand::Absolute, A, 16, exec::ld8);
    t.define(0xFA, "LD", A, Operand::Absolute, 16, exec::ld8);

    t.define(0xE8, "ADD", Operand::Pair(Reg16::SP), Operand::SignedImm8, 16, exec::add_sp);
    t.define(0xE9, "JP", HL, NONE, 4, exec::jp_hl);
    t.define(0xF8, "LD", HL, Operand::SpOffset, 12, exec::ld_hl_sp_offset);
    t.define(0xF9, "LD", Operand::Pair(Reg16::SP), HL, 8, exec::ld16);
    t.define(0xF3, "DI", NONE, NONE, 4, exec::di);
    t.define(0xFB, "EI", NONE, NONE, 4, exec::ei);

    // 0xCB and 0x10 are prefixes; the dispatcher never looks them up here.
    t.finish()
}

fn build_extended() -> [OpcodeDescriptor; 256] {
    let mut t = TableBuilder::new(PREFIX_CB);

    for y in 0..8u8 {
        for z in 0..8u8 {
            let target = r8(z);
            let column = (y << 3) | z;

            let (name, handler) = SHIFT_OPS[y as usize];
            t.define(column, name, target, NONE, cost(target, 8, 16), handler);

            let bit = Operand::Bit(y);
            t.define(0x40 | column, "BIT", bit, target, cost(target, 8, 12), exec::bit);
            t.define(0x80 | column, "RES", bit, target, cost(target, 8, 16), exec::res);
            t.define(0xC0 | column, "SET", bit, target, cost(target, 8, 16), exec::set);
        }
    }

    t.finish()
}
