//! Operand resolution and writeback.
//!
//! Resolution happens in two stages: [`Cpu::locate`] consumes any immediate
//! bytes and decides where the operand lives, then `load*`/`store*` move the
//! data. Splitting the two lets read-modify-write handlers (INC (HL),
//! RLC (HL), ...) touch the same location twice without refetching.
use std::fmt::Display;

use crate::error::{DmgError, Result};
use crate::instruction::{Mnemonic, Operand, Symbol};

use super::{Bus, Cpu, Reg};

/// High page used by `(C)` and `a8` operands.
const IO_PAGE: u16 = 0xFF00;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Location {
    Register(Reg),
    Memory(u16),
    /// Value baked into the instruction stream (or the table itself).
    Immediate(u16),
}

pub(super) fn invalid_operand(mnemonic: Mnemonic, operand: impl Display) -> DmgError {
    DmgError::InvalidOperand {
        mnemonic,
        operand: operand.to_string(),
    }
}

impl Cpu {
    pub(super) fn locate<B: Bus>(
        &mut self,
        bus: &mut B,
        mnemonic: Mnemonic,
        operand: &Operand,
    ) -> Result<Location> {
        let location = match operand.symbol {
            Symbol::Register(reg) if operand.deref => {
                let value = self.regs.get(reg);
                // `(C)` addresses the I/O page.
                let addr = if reg.is_wide() { value } else { IO_PAGE | value };
                Location::Memory(addr)
            }
            Symbol::Register(reg) => Location::Register(reg),
            Symbol::Imm8 => Location::Immediate(self.fetch8(bus)? as u16),
            Symbol::Imm16 => Location::Immediate(self.fetch16(bus)?),
            Symbol::Rel8 => Location::Immediate(self.fetch8(bus)? as i8 as i16 as u16),
            Symbol::Io8 => Location::Memory(IO_PAGE | self.fetch8(bus)? as u16),
            Symbol::Addr16 => {
                let addr = self.fetch16(bus)?;
                if operand.deref {
                    Location::Memory(addr)
                } else {
                    Location::Immediate(addr)
                }
            }
            Symbol::Literal(value) => Location::Immediate(value as u16),
            Symbol::Condition(_) => return Err(invalid_operand(mnemonic, operand)),
        };
        Ok(location)
    }

    pub(super) fn load8<B: Bus>(&mut self, bus: &mut B, location: Location) -> Result<u8> {
        match location {
            Location::Register(reg) => Ok(self.regs.get(reg) as u8),
            Location::Memory(addr) => bus.read8(addr),
            Location::Immediate(value) => Ok(value as u8),
        }
    }

    pub(super) fn load16<B: Bus>(&mut self, bus: &mut B, location: Location) -> Result<u16> {
        match location {
            Location::Register(reg) => Ok(self.regs.get(reg)),
            Location::Memory(addr) => bus.read16(addr),
            Location::Immediate(value) => Ok(value),
        }
    }

    pub(super) fn store8<B: Bus>(
        &mut self,
        bus: &mut B,
        mnemonic: Mnemonic,
        location: Location,
        value: u8,
    ) -> Result<()> {
        match location {
            Location::Register(reg) => {
                self.regs.set(reg, value as u16);
                Ok(())
            }
            Location::Memory(addr) => bus.write8(addr, value),
            Location::Immediate(_) => Err(invalid_operand(mnemonic, "immediate destination")),
        }
    }

    pub(super) fn store16<B: Bus>(
        &mut self,
        bus: &mut B,
        mnemonic: Mnemonic,
        location: Location,
        value: u16,
    ) -> Result<()> {
        match location {
            Location::Register(reg) => {
                self.regs.set(reg, value);
                Ok(())
            }
            Location::Memory(addr) => bus.write16(addr, value),
            Location::Immediate(_) => Err(invalid_operand(mnemonic, "immediate destination")),
        }
    }

    /// Locate and read an 8-bit operand in one go.
    pub(super) fn read_operand8<B: Bus>(
        &mut self,
        bus: &mut B,
        mnemonic: Mnemonic,
        operand: &Operand,
    ) -> Result<u8> {
        let location = self.locate(bus, mnemonic, operand)?;
        self.load8(bus, location)
    }

    /// Locate and read a 16-bit operand in one go.
    pub(super) fn read_operand16<B: Bus>(
        &mut self,
        bus: &mut B,
        mnemonic: Mnemonic,
        operand: &Operand,
    ) -> Result<u16> {
        let location = self.locate(bus, mnemonic, operand)?;
        self.load16(bus, location)
    }

    /// Apply `(HL+)` / `(HL-)` adjustments once the data transfer is done.
    pub(super) fn apply_hl_step(&mut self, operands: &[Operand]) {
        for operand in operands {
            if operand.symbol != Symbol::Register(Reg::HL) {
                continue;
            }
            if operand.inc {
                self.regs.set_hl(self.regs.hl().wrapping_add(1));
            } else if operand.dec {
                self.regs.set_hl(self.regs.hl().wrapping_sub(1));
            }
        }
    }
}
