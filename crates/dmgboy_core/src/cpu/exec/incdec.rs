use crate::error::Result;
use crate::instruction::{Instruction, Mnemonic};

use super::super::operand::invalid_operand;
use super::super::{Bus, Cpu};

impl Cpu {
    /// INC/DEC on an 8-bit register, (HL) or a 16-bit register.
    ///
    /// The 16-bit forms never touch the flags.
    pub(super) fn exec_inc_dec<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> Result<u32> {
        let [target] = instr.operands else {
            return Err(invalid_operand(instr.mnemonic, instr));
        };
        let increment = instr.mnemonic == Mnemonic::Inc;
        let location = self.locate(bus, instr.mnemonic, target)?;

        if target.is_wide() {
            let value = self.load16(bus, location)?;
            let result = if increment {
                value.wrapping_add(1)
            } else {
                value.wrapping_sub(1)
            };
            self.store16(bus, instr.mnemonic, location, result)?;
        } else {
            let value = self.load8(bus, location)?;
            let result = if increment {
                self.alu_inc8(value)
            } else {
                self.alu_dec8(value)
            };
            self.store8(bus, instr.mnemonic, location, result)?;
        }
        Ok(instr.cycles as u32)
    }
}
