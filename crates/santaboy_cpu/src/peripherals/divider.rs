use super::Peripheral;

/// Divider register.
pub const DIV_ADDR: u16 = 0xFF04;

/// T-cycles per DIV increment (16384 Hz on a 4.19 MHz clock).
const CYCLES_PER_INCREMENT: u32 = 256;

/// DIV: a free-running counter. Any write resets it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Divider {
    value: u8,
    /// Cycles accumulated towards the next increment.
    counter: u32,
}

impl Divider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Peripheral for Divider {
    fn address(&self) -> u16 {
        DIV_ADDR
    }

    fn read(&self) -> u8 {
        self.value
    }

    fn write(&mut self, _value: u8) {
        self.value = 0;
        self.counter = 0;
    }

    fn tick(&mut self, cycles: u32) {
        self.counter += cycles;
        let increments = self.counter / CYCLES_PER_INCREMENT;
        self.counter %= CYCLES_PER_INCREMENT;
        // DIV wraps; only the low byte of the increment count matters.
        self.value = self.value.wrapping_add(increments as u8);
    }
}
