use bitflags::bitflags;

use super::Peripheral;
use crate::cpu::{IE_ADDR, IF_ADDR};

bitflags! {
    /// Interrupt sources as laid out in IF and IE. Bit n vectors to
    /// `0x40 + 8 * n`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InterruptSources: u8 {
        const VBLANK = 0b0000_0001;
        const LCD_STAT = 0b0000_0010;
        const TIMER = 0b0000_0100;
        const SERIAL = 0b0000_1000;
        const JOYPAD = 0b0001_0000;
    }
}

impl InterruptSources {
    /// Dispatch address of a single source.
    pub fn vector(self) -> Option<u16> {
        if self.bits().count_ones() != 1 {
            return None;
        }
        Some(0x0040 + self.bits().trailing_zeros() as u16 * 8)
    }
}

/// IF (0xFF0F) or IE (0xFFFF).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterruptRegister {
    address: u16,
    value: u8,
    /// Bits that read back as 1 regardless of what was written.
    unused: u8,
}

impl InterruptRegister {
    /// The request register. Its unused top bits read back as 1.
    pub const fn request() -> Self {
        Self {
            address: IF_ADDR,
            value: 0,
            unused: 0b1110_0000,
        }
    }

    /// The enable register. All eight bits are stored.
    pub const fn enable() -> Self {
        Self {
            address: IE_ADDR,
            value: 0,
            unused: 0,
        }
    }

    #[inline]
    pub fn sources(&self) -> InterruptSources {
        InterruptSources::from_bits_truncate(self.value)
    }

    #[inline]
    pub fn contains(&self, source: InterruptSources) -> bool {
        self.sources().contains(source)
    }

    pub fn set(&mut self, source: InterruptSources, requested: bool) {
        if requested {
            self.value |= source.bits();
        } else {
            self.value &= !source.bits();
        }
    }

    pub fn clear(&mut self) {
        self.value = 0;
    }
}

impl Peripheral for InterruptRegister {
    fn address(&self) -> u16 {
        self.address
    }

    fn read(&self) -> u8 {
        self.value | self.unused
    }

    fn write(&mut self, value: u8) {
        log::trace!(
            "interrupt register 0x{:04X}: {:?} -> {:?}",
            self.address,
            self.sources(),
            InterruptSources::from_bits_truncate(value)
        );
        self.value = value & !self.unused;
    }
}
