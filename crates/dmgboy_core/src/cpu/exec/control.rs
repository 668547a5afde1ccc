use crate::error::Result;
use crate::instruction::{Instruction, Mnemonic, Operand};

use super::super::operand::invalid_operand;
use super::super::{Bus, Cpu};

impl Cpu {
    /// Target operand of a possibly conditional branch.
    fn branch_target(instr: &Instruction) -> Result<&'static Operand> {
        let operands: &'static [Operand] = instr.operands;
        let rest = match instr.condition() {
            Some(_) => &operands[1..],
            None => operands,
        };
        match rest {
            [target] => Ok(target),
            _ => Err(invalid_operand(instr.mnemonic, instr)),
        }
    }

    #[inline]
    fn branch_cycles(instr: &Instruction, taken: bool) -> u32 {
        if taken {
            instr.cycles as u32
        } else {
            instr.cycles_not_taken as u32
        }
    }

    /// JP a16 / JP cc,a16 / JP HL and JR r8 / JR cc,r8.
    ///
    /// The target is resolved before the condition is evaluated so that the
    /// operand bytes are consumed on both paths.
    pub(super) fn exec_jump<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> Result<u32> {
        let target = Self::branch_target(instr)?;
        let value = self.read_operand16(bus, instr.mnemonic, target)?;

        let taken = self.condition_met(instr.condition());
        if taken {
            self.regs.pc = match instr.mnemonic {
                // Relative to the address after the offset byte.
                Mnemonic::Jr => self.regs.pc.wrapping_add(value),
                _ => value,
            };
        }
        Ok(Self::branch_cycles(instr, taken))
    }

    /// CALL a16 / CALL cc,a16.
    pub(super) fn exec_call<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> Result<u32> {
        let target = Self::branch_target(instr)?;
        let addr = self.read_operand16(bus, instr.mnemonic, target)?;

        let taken = self.condition_met(instr.condition());
        if taken {
            let ret = self.regs.pc;
            self.push16(bus, ret)?;
            self.regs.pc = addr;
        }
        Ok(Self::branch_cycles(instr, taken))
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> Result<u32> {
        let [vector] = instr.operands else {
            return Err(invalid_operand(instr.mnemonic, instr));
        };
        let addr = self.read_operand16(bus, instr.mnemonic, vector)?;
        let ret = self.regs.pc;
        self.push16(bus, ret)?;
        self.regs.pc = addr;
        Ok(instr.cycles as u32)
    }

    /// RET / RET cc / RETI. RETI turns the master enable on without the
    /// delay EI has.
    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> Result<u32> {
        let taken = self.condition_met(instr.condition());
        if !taken {
            return Ok(Self::branch_cycles(instr, false));
        }

        self.regs.pc = self.pop16(bus)?;
        if instr.mnemonic == Mnemonic::Reti {
            bus.interrupts().enable_now();
        }
        Ok(Self::branch_cycles(instr, true))
    }
}
