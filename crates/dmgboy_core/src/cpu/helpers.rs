use crate::error::Result;
use crate::instruction::Condition;

use super::{Bus, Cpu, Flag};

impl Cpu {
    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> Result<u8> {
        let value = bus.read8(self.regs.pc)?;
        self.regs.pc = self.regs.pc.wrapping_add(1);
        Ok(value)
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> Result<u16> {
        let lo = self.fetch8(bus)?;
        let hi = self.fetch8(bus)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    #[inline]
    pub(super) fn push16<B: Bus>(&mut self, bus: &mut B, value: u16) -> Result<()> {
        let [lo, hi] = value.to_le_bytes();
        // Stack grows downward. We want memory[SP] = low, memory[SP+1] = high.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi)?;
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo)
    }

    #[inline]
    pub(super) fn pop16<B: Bus>(&mut self, bus: &mut B) -> Result<u16> {
        let lo = bus.read8(self.regs.sp)?;
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let hi = bus.read8(self.regs.sp)?;
        self.regs.sp = self.regs.sp.wrapping_add(1);
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// True for unconditional branches and for satisfied conditions.
    #[inline]
    pub(super) fn condition_met(&self, condition: Option<Condition>) -> bool {
        match condition {
            None => true,
            Some(Condition::NZ) => !self.get_flag(Flag::Z),
            Some(Condition::Z) => self.get_flag(Flag::Z),
            Some(Condition::NC) => !self.get_flag(Flag::C),
            Some(Condition::C) => self.get_flag(Flag::C),
        }
    }
}
