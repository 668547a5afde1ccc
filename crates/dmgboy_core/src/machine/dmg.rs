use crate::config::MachineConfig;
use crate::cpu::Cpu;
use crate::error::Result;
use crate::trace::TraceSink;

use super::{Cartridge, MemoryBus};

/// CPU plus memory bus, in the state the DMG boot ROM leaves them.
///
/// This is the entry point used by the `dmgboy` runner.
pub struct Dmg {
    pub cpu: Cpu,
    bus: MemoryBus,
}

impl Dmg {
    pub fn new(cartridge: Box<dyn Cartridge>, config: MachineConfig) -> Self {
        let cpu = Cpu::new(cartridge.header_checksum());
        Self {
            cpu,
            bus: MemoryBus::new(cartridge, config),
        }
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn bus(&self) -> &MemoryBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut MemoryBus {
        &mut self.bus
    }

    /// Execute one instruction (or one HALT slot) and return its ticks.
    pub fn step(&mut self, trace: Option<&mut dyn TraceSink>) -> Result<u32> {
        self.cpu.step(&mut self.bus, trace)
    }

    /// Step up to `max_steps` times, stopping at the first error.
    ///
    /// Returns the total number of ticks consumed.
    pub fn run(&mut self, max_steps: u64, mut trace: Option<&mut dyn TraceSink>) -> Result<u64> {
        let mut ticks = 0u64;
        for _ in 0..max_steps {
            let sink = trace.as_mut().map(|sink| &mut **sink as &mut dyn TraceSink);
            ticks += self.step(sink)? as u64;
        }
        log::info!(
            "ran {max_steps} steps ({ticks} ticks), PC=0x{:04X}",
            self.cpu.regs.pc
        );
        Ok(ticks)
    }

    /// Halted with no interrupt source enabled: nothing can resume the CPU.
    pub fn is_stalled(&self) -> bool {
        self.cpu.halted && self.bus.interrupts.enabled().is_empty()
    }

    /// Bytes the program has sent over the serial port.
    pub fn serial_output(&self) -> &[u8] {
        self.bus.serial().output()
    }
}
