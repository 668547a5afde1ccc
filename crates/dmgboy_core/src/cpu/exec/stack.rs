use crate::error::Result;
use crate::instruction::Instruction;

use super::super::operand::invalid_operand;
use super::super::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> Result<u32> {
        let [source] = instr.operands else {
            return Err(invalid_operand(instr.mnemonic, instr));
        };
        let value = self.read_operand16(bus, instr.mnemonic, source)?;
        self.push16(bus, value)?;
        Ok(instr.cycles as u32)
    }

    /// POP rr. Writing AF goes through the register file, which drops the
    /// low nibble of F.
    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> Result<u32> {
        let [target] = instr.operands else {
            return Err(invalid_operand(instr.mnemonic, instr));
        };
        let location = self.locate(bus, instr.mnemonic, target)?;
        let value = self.pop16(bus)?;
        self.store16(bus, instr.mnemonic, location, value)?;
        Ok(instr.cycles as u32)
    }
}
