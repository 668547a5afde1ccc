use crate::error::Result;
use crate::machine::InterruptController;

/// What the CPU needs from the rest of the machine.
///
/// Memory accesses are fallible so that decode bugs which wander into
/// reserved ranges stop execution instead of reading garbage.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> Result<u8>;
    fn write8(&mut self, addr: u16, value: u8) -> Result<()>;

    /// Little-endian: low byte at `addr`, high byte at `addr + 1`.
    fn read16(&mut self, addr: u16) -> Result<u16> {
        let lo = self.read8(addr)?;
        let hi = self.read8(addr.wrapping_add(1))?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    fn write16(&mut self, addr: u16, value: u16) -> Result<()> {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo)?;
        self.write8(addr.wrapping_add(1), hi)
    }

    /// Advance bus-side peripherals by a number of system ticks.
    ///
    /// Default implementation does nothing; the machine bus overrides this
    /// to drive the timer.
    fn tick(&mut self, _cycles: u32) {}

    /// The interrupt controller whose IE/IF registers live on this bus.
    fn interrupts(&mut self) -> &mut InterruptController;
}
