//! Memory-mapped registers that sit next to the CPU on the bus.

mod divider;
mod interrupt;


pub use divider::{Divider, DIV_ADDR};
pub use interrupt::{InterruptRegister, InterruptSources};

/// A single memory-mapped register.
///
/// Reads and writes only ever target [`Peripheral::address`]; the bus does
/// the routing.
pub trait Peripheral {
    fn address(&self) -> u16;
    fn read(&self) -> u8;
    fn write(&mut self, value: u8);

    /// Advance the register's clock by `cycles` T-cycles.
    fn tick(&mut self, _cycles: u32) {}
}
