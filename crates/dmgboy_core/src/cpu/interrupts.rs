use crate::error::Result;

use super::{Bus, Cpu};

/// System ticks charged for dispatching to an interrupt vector.
pub(super) const INTERRUPT_CYCLES: u32 = 20;

impl Cpu {
    /// Service at most one pending interrupt.
    ///
    /// With the master enable set, the highest-priority source that is both
    /// enabled and requested is acknowledged and PC jumps to its vector.
    /// With the master enable clear, a pending source only wakes the CPU from
    /// HALT. Returns the ticks spent on dispatch (0 when nothing happened).
    pub(super) fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        let Some(interrupt) = bus.interrupts().pending() else {
            return Ok(0);
        };

        if !bus.interrupts().ime() {
            if self.halted {
                log::debug!("GB CPU leaving HALT for {interrupt:?} with IME clear");
                self.halted = false;
            }
            return Ok(0);
        }

        let pc = self.regs.pc;
        self.push16(bus, pc)?;

        let interrupts = bus.interrupts();
        interrupts.acknowledge(interrupt);
        interrupts.disable_now();
        let (iflags, ie) = (interrupts.read_if(), interrupts.read_ie());

        self.regs.pc = interrupt.vector();
        self.halted = false;

        log::debug!(
            "GB CPU interrupt: {:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X} IF=0x{:02X} IE=0x{:02X}",
            interrupt,
            self.regs.pc,
            pc,
            self.regs.sp,
            iflags,
            ie,
        );

        bus.tick(INTERRUPT_CYCLES);
        Ok(INTERRUPT_CYCLES)
    }
}
