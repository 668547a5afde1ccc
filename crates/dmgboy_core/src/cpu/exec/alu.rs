use crate::error::Result;
use crate::instruction::{Instruction, Mnemonic, Operand, Symbol};

use super::super::operand::invalid_operand;
use super::super::{Bus, Cpu, Flag, Reg};

impl Cpu {
    /// 8-bit arithmetic/logic on A, plus the two 16-bit ADD forms.
    ///
    /// The source is always the last operand; the opcode map spells out the
    /// `A` destination for ADD/ADC/SBC only.
    pub(super) fn exec_alu<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> Result<u32> {
        let (dst, src) = match instr.operands {
            [src] => (None, src),
            [dst, src] => (Some(dst), src),
            _ => return Err(invalid_operand(instr.mnemonic, instr)),
        };

        if let Some(dst) = dst.filter(|dst| dst.is_wide()) {
            return self.exec_add16(bus, instr, dst, src);
        }

        let value = self.read_operand8(bus, instr.mnemonic, src)?;
        match instr.mnemonic {
            Mnemonic::Add => self.alu_add(value, false),
            Mnemonic::Adc => self.alu_add(value, true),
            Mnemonic::Sub => self.alu_sub(value, false),
            Mnemonic::Sbc => self.alu_sub(value, true),
            Mnemonic::And => self.alu_and(value),
            Mnemonic::Xor => self.alu_xor(value),
            Mnemonic::Or => self.alu_or(value),
            Mnemonic::Cp => self.alu_cp(value),
            other => return Err(invalid_operand(other, instr)),
        }
        Ok(instr.cycles as u32)
    }

    /// `ADD HL,rr` and `ADD SP,r8`.
    fn exec_add16<B: Bus>(
        &mut self,
        bus: &mut B,
        instr: &Instruction,
        dst: &Operand,
        src: &Operand,
    ) -> Result<u32> {
        match (instr.mnemonic, dst.symbol) {
            (Mnemonic::Add, Symbol::Register(Reg::HL)) => {
                let value = self.read_operand16(bus, instr.mnemonic, src)?;
                self.alu_add16_hl(value);
            }
            (Mnemonic::Add, Symbol::Register(Reg::SP)) => {
                let offset = self.read_operand8(bus, instr.mnemonic, src)?;
                self.regs.sp = self.alu_add16_signed(self.regs.sp, offset);
            }
            _ => return Err(invalid_operand(instr.mnemonic, dst)),
        }
        Ok(instr.cycles as u32)
    }

    /// DAA, CPL, SCF and CCF.
    pub(super) fn exec_accumulator(&mut self, instr: &Instruction) -> u32 {
        match instr.mnemonic {
            Mnemonic::Daa => self.alu_daa(),
            Mnemonic::Cpl => {
                self.regs.a = !self.regs.a;
                self.set_flag(Flag::N, true);
                self.set_flag(Flag::H, true);
            }
            Mnemonic::Scf => {
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, false);
                self.set_flag(Flag::C, true);
            }
            _ => {
                let carry = self.get_flag(Flag::C);
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, false);
                self.set_flag(Flag::C, !carry);
            }
        }
        instr.cycles as u32
    }
}
