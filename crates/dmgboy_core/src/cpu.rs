mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod operand;
mod regs;


pub use bus::Bus;
pub use regs::{Flag, Reg, Registers};

use crate::error::Result;
use crate::instruction::{decode, CB_PREFIX};
use crate::trace::{StepTrace, TraceSink};

/// System ticks charged while the CPU idles in HALT.
const HALT_TICK: u32 = 4;

/// Sharp LR35902 core.
///
/// The master interrupt enable lives with IE/IF in the bus-side
/// [`InterruptController`](crate::machine::InterruptController); the CPU
/// only tracks its registers and the HALT state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cpu {
    pub regs: Registers,
    pub halted: bool,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.regs.flag(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.regs.set_flag(flag, value);
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.f = 0;
    }

    /// Overwrite all four flags at once.
    #[inline]
    pub(crate) fn set_flags(&mut self, z: bool, n: bool, h: bool, c: bool) {
        self.regs.f = (z as u8) << 7 | (n as u8) << 6 | (h as u8) << 5 | (c as u8) << 4;
    }

    /// Run one instruction (or one HALT idle slot) followed by the interrupt
    /// check, returning the number of system ticks consumed.
    ///
    /// Any error is fatal to the instruction stream: it is logged with the
    /// register file and handed back without further recovery.
    pub fn step<B: Bus>(&mut self, bus: &mut B, trace: Option<&mut dyn TraceSink>) -> Result<u32> {
        let result = self.step_instruction(bus, trace);
        if let Err(err) = &result {
            log::error!(
                "GB CPU stopped: {err}; PC=0x{:04X} SP=0x{:04X} AF=0x{:04X} BC=0x{:04X} DE=0x{:04X} HL=0x{:04X}",
                self.regs.pc,
                self.regs.sp,
                self.regs.af(),
                self.regs.bc(),
                self.regs.de(),
                self.regs.hl(),
            );
        }
        result
    }

    fn step_instruction<B: Bus>(
        &mut self,
        bus: &mut B,
        trace: Option<&mut dyn TraceSink>,
    ) -> Result<u32> {
        if self.halted {
            bus.tick(HALT_TICK);
            return Ok(HALT_TICK + self.handle_interrupts(bus)?);
        }

        let pc = self.regs.pc;
        let sp = self.regs.sp;

        let mut opcode = self.fetch8(bus)?;
        let prefixed = opcode == CB_PREFIX;
        if prefixed {
            opcode = self.fetch8(bus)?;
        }

        let instruction = decode(opcode, prefixed)?;
        let cycles = self.execute(bus, instruction)?;
        bus.tick(cycles);

        if let Some(sink) = trace {
            sink.on_step(&StepTrace {
                pc,
                sp,
                opcode,
                prefixed,
                instruction,
                regs: self.regs,
                cycles,
            });
        }

        bus.interrupts().advance();
        Ok(cycles + self.handle_interrupts(bus)?)
    }
}
