use crate::error::{DmgError, Result};
use crate::instruction::{Instruction, Mnemonic};

use super::super::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_halt(&mut self, instr: &Instruction) -> u32 {
        self.halted = true;
        instr.cycles as u32
    }

    /// STOP consumes its padding byte and then fails: leaving STOP needs
    /// joypad input, which is not modelled.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> Result<u32> {
        for operand in instr.operands {
            self.locate(bus, instr.mnemonic, operand)?;
        }
        Err(DmgError::NotImplemented {
            mnemonic: instr.mnemonic,
        })
    }

    /// DI/EI only arm the delayed transition; the controller applies it once
    /// the following instruction has completed.
    pub(super) fn exec_di_ei<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> u32 {
        let interrupts = bus.interrupts();
        if instr.mnemonic == Mnemonic::Ei {
            interrupts.schedule_enable();
        } else {
            interrupts.schedule_disable();
        }
        instr.cycles as u32
    }
}
