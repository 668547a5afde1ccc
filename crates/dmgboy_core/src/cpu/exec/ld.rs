use crate::error::Result;
use crate::instruction::Instruction;

use super::super::operand::invalid_operand;
use super::super::{Bus, Cpu};

impl Cpu {
    /// LD and LDH in every addressing form.
    ///
    /// The width follows the operands: any 16-bit register or immediate on
    /// either side makes it a 16-bit transfer, which covers `LD (a16),SP`.
    pub(super) fn exec_ld<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> Result<u32> {
        match instr.operands {
            [dst, src] => {
                let dst_loc = self.locate(bus, instr.mnemonic, dst)?;
                let src_loc = self.locate(bus, instr.mnemonic, src)?;

                if dst.is_wide() || src.is_wide() {
                    let value = self.load16(bus, src_loc)?;
                    self.store16(bus, instr.mnemonic, dst_loc, value)?;
                } else {
                    let value = self.load8(bus, src_loc)?;
                    self.store8(bus, instr.mnemonic, dst_loc, value)?;
                }
            }
            // LD HL,SP+r8
            [dst, base, offset] => {
                let dst_loc = self.locate(bus, instr.mnemonic, dst)?;
                let base = self.read_operand16(bus, instr.mnemonic, base)?;
                let offset = self.read_operand8(bus, instr.mnemonic, offset)?;
                let value = self.alu_add16_signed(base, offset);
                self.store16(bus, instr.mnemonic, dst_loc, value)?;
            }
            _ => return Err(invalid_operand(instr.mnemonic, instr)),
        }
        Ok(instr.cycles as u32)
    }
}
