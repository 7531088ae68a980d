use crate::cpu::{Bus, IE_ADDR, IF_ADDR};
use crate::peripherals::{Divider, InterruptRegister, InterruptSources, Peripheral, DIV_ADDR};

/// Size of the flat address space.
pub const MEMORY_SIZE: usize = 0x10000;

/// Flat 64 KiB bus with the divider and the interrupt registers mapped
/// over it.
///
/// There is no cartridge banking and no PPU; everything that is not one of
/// the three registers is plain RAM, ROM area included.
pub struct SystemBus {
    memory: Box<[u8; MEMORY_SIZE]>,
    divider: Divider,
    if_reg: InterruptRegister,
    ie_reg: InterruptRegister,
    cycles: u64,
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemBus {
    pub fn new() -> Self {
        let mut bus = Self {
            memory: Box::new([0; MEMORY_SIZE]),
            divider: Divider::new(),
            if_reg: InterruptRegister::request(),
            ie_reg: InterruptRegister::enable(),
            cycles: 0,
        };
        // P1 with no lines pulled low, so STOP does not wake on its own.
        bus.memory[0xFF00] = 0xFF;
        bus
    }

    /// Copy a ROM image to the bottom of the address space. Bytes that
    /// would not fit are ignored.
    pub fn load_rom(&mut self, rom: &[u8]) {
        let len = rom.len().min(MEMORY_SIZE);
        self.memory[..len].copy_from_slice(&rom[..len]);
        if len < rom.len() {
            log::warn!(
                "ROM image is {} bytes; only the first {} were mapped",
                rom.len(),
                len
            );
        }
    }

    pub fn request_interrupt(&mut self, source: InterruptSources) {
        self.if_reg.set(source, true);
    }

    pub fn interrupt_flag(&self) -> &InterruptRegister {
        &self.if_reg
    }

    pub fn interrupt_enable(&self) -> &InterruptRegister {
        &self.ie_reg
    }

    pub fn divider(&self) -> &Divider {
        &self.divider
    }

    /// Total T-cycles ticked so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    fn peripheral_mut(&mut self, addr: u16) -> Option<&mut dyn Peripheral> {
        match addr {
            DIV_ADDR => Some(&mut self.divider),
            IF_ADDR => Some(&mut self.if_reg),
            IE_ADDR => Some(&mut self.ie_reg),
            _ => None,
        }
    }
}

impl Bus for SystemBus {
    fn read8(&mut self, addr: u16) -> u8 {
        match self.peripheral_mut(addr) {
            Some(peripheral) => peripheral.read(),
            None => self.memory[addr as usize],
        }
    }

    fn write8(&mut self, addr: u16, value: u8) {
        match self.peripheral_mut(addr) {
            Some(peripheral) => peripheral.write(value),
            None => self.memory[addr as usize] = value,
        }
    }

    fn tick(&mut self, cycles: u32) {
        self.cycles += u64::from(cycles);
        self.divider.tick(cycles);
    }
}
