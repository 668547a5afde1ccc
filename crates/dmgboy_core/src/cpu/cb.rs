use crate::error::Result;
use crate::instruction::{Instruction, Mnemonic};

use super::operand::invalid_operand;
use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Shared rotate/shift core. Returns the result and the bit shifted
    /// out, which always lands in C.
    fn shift(&self, mnemonic: Mnemonic, value: u8) -> Result<(u8, bool)> {
        let carry_in = self.get_flag(Flag::C) as u8;
        let out = match mnemonic {
            Mnemonic::Rlc | Mnemonic::Rlca => (value.rotate_left(1), value & 0x80 != 0),
            Mnemonic::Rrc | Mnemonic::Rrca => (value.rotate_right(1), value & 0x01 != 0),
            Mnemonic::Rl | Mnemonic::Rla => ((value << 1) | carry_in, value & 0x80 != 0),
            Mnemonic::Rr | Mnemonic::Rra => ((value >> 1) | (carry_in << 7), value & 0x01 != 0),
            Mnemonic::Sla => (value << 1, value & 0x80 != 0),
            Mnemonic::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            Mnemonic::Swap => (value.rotate_left(4), false),
            Mnemonic::Srl => (value >> 1, value & 0x01 != 0),
            other => return Err(invalid_operand(other, "shift target")),
        };
        Ok(out)
    }

    /// RLCA/RRCA/RLA/RRA: like their CB forms on A, but Z is always cleared.
    pub(super) fn exec_rotate_a(&mut self, instr: &Instruction) -> Result<u32> {
        let (result, carry) = self.shift(instr.mnemonic, self.regs.a)?;
        self.regs.a = result;
        self.set_flags(false, false, false, carry);
        Ok(instr.cycles as u32)
    }

    /// RLC/RRC/RL/RR/SLA/SRA/SWAP/SRL on a register or (HL).
    pub(super) fn exec_shift<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> Result<u32> {
        let [target] = instr.operands else {
            return Err(invalid_operand(instr.mnemonic, instr));
        };
        let location = self.locate(bus, instr.mnemonic, target)?;
        let value = self.load8(bus, location)?;
        let (result, carry) = self.shift(instr.mnemonic, value)?;
        self.set_flags(result == 0, false, false, carry);
        self.store8(bus, instr.mnemonic, location, result)?;
        Ok(instr.cycles as u32)
    }

    /// BIT b, r: Z reflects the complement of the tested bit, H=1, N=0,
    /// C preserved.
    pub(super) fn exec_bit<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> Result<u32> {
        let [bit, target] = instr.operands else {
            return Err(invalid_operand(instr.mnemonic, instr));
        };
        let bit = self.read_operand8(bus, instr.mnemonic, bit)?;
        let value = self.read_operand8(bus, instr.mnemonic, target)?;

        self.set_flag(Flag::Z, value & (1 << (bit & 0x07)) == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, true);
        Ok(instr.cycles as u32)
    }

    /// RES b, r and SET b, r. No flags are affected.
    pub(super) fn exec_res_set<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> Result<u32> {
        let [bit, target] = instr.operands else {
            return Err(invalid_operand(instr.mnemonic, instr));
        };
        let mask = 1u8 << (self.read_operand8(bus, instr.mnemonic, bit)? & 0x07);
        let location = self.locate(bus, instr.mnemonic, target)?;
        let value = self.load8(bus, location)?;

        let result = match instr.mnemonic {
            Mnemonic::Set => value | mask,
            _ => value & !mask,
        };
        self.store8(bus, instr.mnemonic, location, result)?;
        Ok(instr.cycles as u32)
    }
}
