/// Abstraction over the Game Boy bus (memory and IO).
///
/// The core only needs a byte-addressable read/write surface over the whole
/// 16-bit address space. Bank switching, ROM/RAM partitioning and IO register
/// semantics are the implementor's business; reads and writes always succeed
/// from the CPU's point of view.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Advance bus-side peripherals by a given number of CPU cycles.
    ///
    /// The dispatcher calls this once per executed instruction with the
    /// instruction's T-cycle cost. Default implementation does nothing;
    /// system buses can override this to drive timers and the like.
    fn tick(&mut self, _cycles: u32) {}
}

impl<B: Bus + ?Sized> Bus for &mut B {
    fn read8(&mut self, addr: u16) -> u8 {
        (**self).read8(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        (**self).write8(addr, value)
    }

    fn tick(&mut self, cycles: u32) {
        (**self).tick(cycles)
    }
}
