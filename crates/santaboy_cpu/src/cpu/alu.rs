//! Flag arithmetic shared by the instruction handlers.
//!
//! Every helper is a pure function of its inputs and returns the result
//! together with the flags it produces, so handlers only decide where the
//! value goes and which flags they keep.

use super::Flags;

#[inline]
fn bit(value: u32, n: u32) -> bool {
    (value >> n) & 1 != 0
}

/// Carry out of bit `n` of `left + right`, given the wrapped `result`.
///
/// A carry leaves bit `n` when both operand bits are set, or when exactly one
/// of them is set and the result bit came out clear (the incoming carry
/// rippled through). This also covers ADC, because `result` already includes
/// the carry-in.
#[inline]
pub(crate) fn carry_out(left: u32, right: u32, result: u32, n: u32) -> bool {
    let (l, r) = (bit(left, n), bit(right, n));
    (l && r) || ((l ^ r) && !bit(result, n))
}

/// Borrow out of bit `n` of `left - right`, given the wrapped `result`.
///
/// A borrow leaves bit `n` when the subtrahend bit is set and the minuend bit
/// is clear, or when both bits are equal and the result bit is set (the
/// incoming borrow rippled through).
#[inline]
pub(crate) fn borrow_out(left: u32, right: u32, result: u32, n: u32) -> bool {
    let (l, r) = (bit(left, n), bit(right, n));
    (!l && r) || (l == r && bit(result, n))
}

#[inline]
fn zero(value: u8) -> Flags {
    if value == 0 {
        Flags::Z
    } else {
        Flags::empty()
    }
}

/// Core 8-bit ADD/ADC.
pub(crate) fn add8(a: u8, value: u8, carry_in: bool) -> (u8, Flags) {
    let result = a.wrapping_add(value).wrapping_add(carry_in as u8);
    let (l, r, res) = (a as u32, value as u32, result as u32);

    let mut flags = zero(result);
    flags.set(Flags::H, carry_out(l, r, res, 3));
    flags.set(Flags::C, carry_out(l, r, res, 7));
    (result, flags)
}

/// Core 8-bit SUB/SBC. CP uses this too and discards the result.
pub(crate) fn sub8(a: u8, value: u8, carry_in: bool) -> (u8, Flags) {
    let result = a.wrapping_sub(value).wrapping_sub(carry_in as u8);
    let (l, r, res) = (a as u32, value as u32, result as u32);

    let mut flags = zero(result) | Flags::N;
    flags.set(Flags::H, borrow_out(l, r, res, 3));
    flags.set(Flags::C, borrow_out(l, r, res, 7));
    (result, flags)
}

pub(crate) fn and8(a: u8, value: u8) -> (u8, Flags) {
    let result = a & value;
    (result, zero(result) | Flags::H)
}

pub(crate) fn or8(a: u8, value: u8) -> (u8, Flags) {
    let result = a | value;
    (result, zero(result))
}

pub(crate) fn xor8(a: u8, value: u8) -> (u8, Flags) {
    let result = a ^ value;
    (result, zero(result))
}

/// INC r / INC (HL). C is carried over from `flags`.
pub(crate) fn inc8(value: u8, flags: Flags) -> (u8, Flags) {
    let result = value.wrapping_add(1);
    let mut out = zero(result) | (flags & Flags::C);
    out.set(Flags::H, carry_out(value as u32, 1, result as u32, 3));
    (result, out)
}

/// DEC r / DEC (HL). C is carried over from `flags`.
pub(crate) fn dec8(value: u8, flags: Flags) -> (u8, Flags) {
    let result = value.wrapping_sub(1);
    let mut out = zero(result) | Flags::N | (flags & Flags::C);
    out.set(Flags::H, borrow_out(value as u32, 1, result as u32, 3));
    (result, out)
}

/// ADD HL,rr. Z is carried over; N cleared; H and C from bits 11 and 15.
pub(crate) fn add16(left: u16, right: u16, flags: Flags) -> (u16, Flags) {
    let result = left.wrapping_add(right);
    let (l, r, res) = (left as u32, right as u32, result as u32);

    let mut out = flags & Flags::Z;
    out.set(Flags::H, carry_out(l, r, res, 11));
    out.set(Flags::C, carry_out(l, r, res, 15));
    (result, out)
}

/// ADD SP,e and LD HL,SP+e.
///
/// The literal is a signed byte: its sign selects whether its magnitude is
/// added to or subtracted from `base`. H and C are the carries out of bits 3
/// and 7 of the unsigned low-byte addition, Z and N are cleared.
pub(crate) fn add_signed(base: u16, imm8: u8) -> (u16, Flags) {
    let offset = imm8 as i8;
    let result = if offset < 0 {
        base.wrapping_sub(offset.unsigned_abs() as u16)
    } else {
        base.wrapping_add(offset as u16)
    };

    let low = base & 0x00FF;
    let low_sum = (low + imm8 as u16) as u32;
    let mut flags = Flags::empty();
    flags.set(Flags::H, carry_out(low as u32, imm8 as u32, low_sum, 3));
    flags.set(Flags::C, carry_out(low as u32, imm8 as u32, low_sum, 7));
    (result, flags)
}

/// Decimal adjust accumulator after BCD addition/subtraction.
///
/// Uses C, H, N and A to pick a 0x06/0x60 correction. N is preserved, H is
/// cleared, Z follows the result and C is set when the high digit was
/// corrected.
pub(crate) fn daa(a: u8, flags: Flags) -> (u8, Flags) {
    let mut adjust: u8 = if flags.contains(Flags::C) { 0x60 } else { 0x00 };
    if flags.contains(Flags::H) {
        adjust |= 0x06;
    }

    let result = if !flags.contains(Flags::N) {
        // After an addition.
        if (a & 0x0F) > 0x09 {
            adjust |= 0x06;
        }
        if a > 0x99 {
            adjust |= 0x60;
        }
        a.wrapping_add(adjust)
    } else {
        a.wrapping_sub(adjust)
    };

    let mut out = zero(result) | (flags & Flags::N);
    out.set(Flags::C, adjust >= 0x60);
    (result, out)
}

/// Rotate and shift primitives. Each one captures the bit leaving the byte
/// before shifting and returns it as the new carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Shift {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Srl,
}

pub(crate) fn shift(kind: Shift, value: u8, carry_in: bool) -> (u8, bool) {
    match kind {
        Shift::Rlc => (value.rotate_left(1), value & 0x80 != 0),
        Shift::Rrc => (value.rotate_right(1), value & 0x01 != 0),
        Shift::Rl => ((value << 1) | carry_in as u8, value & 0x80 != 0),
        Shift::Rr => ((value >> 1) | ((carry_in as u8) << 7), value & 0x01 != 0),
        Shift::Sla => (value << 1, value & 0x80 != 0),
        Shift::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
        Shift::Srl => (value >> 1, value & 0x01 != 0),
    }
}

/// Flags for the CB-prefixed rotates and shifts: Z from the result, C from
/// the shifted-out bit, N and H cleared.
pub(crate) fn shift_flags(result: u8, carry: bool) -> Flags {
    let mut flags = zero(result);
    flags.set(Flags::C, carry);
    flags
}

pub(crate) fn swap(value: u8) -> (u8, Flags) {
    let result = value.rotate_left(4);
    (result, zero(result))
}
