//! Instruction descriptors and the opcode decoder.
//!
//! An [`Instruction`] is pure data: a mnemonic plus an ordered list of operand
//! descriptors and its cycle cost. The CPU resolves the operands at execution
//! time and dispatches on the mnemonic.
mod table;

use std::fmt;

use crate::cpu::Reg;
use crate::error::{DmgError, Result};

/// Escape byte that selects the secondary (bit/rotate/shift) table.
pub const CB_PREFIX: u8 = 0xCB;

/// Opcode holes that hard-lock the CPU on real hardware.
pub const ILLEGAL_OPCODES: [u8; 11] = [
    0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,
    Prefix,
    Ld,
    Ldh,
    Push,
    Pop,
    Inc,
    Dec,
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
    Daa,
    Cpl,
    Scf,
    Ccf,
    Rlca,
    Rrca,
    Rla,
    Rra,
    Jp,
    Jr,
    Call,
    Rst,
    Ret,
    Reti,
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
    Bit,
    Res,
    Set,
}

impl Mnemonic {
    pub fn name(self) -> &'static str {
        match self {
            Mnemonic::Nop => "NOP",
            Mnemonic::Stop => "STOP",
            Mnemonic::Halt => "HALT",
            Mnemonic::Di => "DI",
            Mnemonic::Ei => "EI",
            Mnemonic::Prefix => "PREFIX",
            Mnemonic::Ld => "LD",
            Mnemonic::Ldh => "LDH",
            Mnemonic::Push => "PUSH",
            Mnemonic::Pop => "POP",
            Mnemonic::Inc => "INC",
            Mnemonic::Dec => "DEC",
            Mnemonic::Add => "ADD",
            Mnemonic::Adc => "ADC",
            Mnemonic::Sub => "SUB",
            Mnemonic::Sbc => "SBC",
            Mnemonic::And => "AND",
            Mnemonic::Xor => "XOR",
            Mnemonic::Or => "OR",
            Mnemonic::Cp => "CP",
            Mnemonic::Daa => "DAA",
            Mnemonic::Cpl => "CPL",
            Mnemonic::Scf => "SCF",
            Mnemonic::Ccf => "CCF",
            Mnemonic::Rlca => "RLCA",
            Mnemonic::Rrca => "RRCA",
            Mnemonic::Rla => "RLA",
            Mnemonic::Rra => "RRA",
            Mnemonic::Jp => "JP",
            Mnemonic::Jr => "JR",
            Mnemonic::Call => "CALL",
            Mnemonic::Rst => "RST",
            Mnemonic::Ret => "RET",
            Mnemonic::Reti => "RETI",
            Mnemonic::Rlc => "RLC",
            Mnemonic::Rrc => "RRC",
            Mnemonic::Rl => "RL",
            Mnemonic::Rr => "RR",
            Mnemonic::Sla => "SLA",
            Mnemonic::Sra => "SRA",
            Mnemonic::Swap => "SWAP",
            Mnemonic::Srl => "SRL",
            Mnemonic::Bit => "BIT",
            Mnemonic::Res => "RES",
            Mnemonic::Set => "SET",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Branch condition tested against the Z and C flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    NZ,
    Z,
    NC,
    C,
}

/// What an operand refers to, before any dereference is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    Register(Reg),
    /// `d8`: unsigned immediate byte.
    Imm8,
    /// `d16`: little-endian immediate word.
    Imm16,
    /// `r8`: signed relative offset.
    Rel8,
    /// `a8`: high-page address, `0xFF00 | byte`. Always a memory access.
    Io8,
    /// `a16`: little-endian absolute address.
    Addr16,
    /// Bit index for BIT/RES/SET or the target of RST.
    Literal(u8),
    Condition(Condition),
}

/// Operand descriptor: a symbol plus the `(..)`, `+` and `-` modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operand {
    pub symbol: Symbol,
    /// Use the resolved value as a bus address.
    pub deref: bool,
    /// Increment HL after the data transfer.
    pub inc: bool,
    /// Decrement HL after the data transfer.
    pub dec: bool,
}

impl Operand {
    pub const fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            deref: false,
            inc: false,
            dec: false,
        }
    }

    pub const fn reg(reg: Reg) -> Self {
        Self::new(Symbol::Register(reg))
    }

    pub const fn literal(value: u8) -> Self {
        Self::new(Symbol::Literal(value))
    }

    pub const fn cond(condition: Condition) -> Self {
        Self::new(Symbol::Condition(condition))
    }

    pub const fn deref(mut self) -> Self {
        self.deref = true;
        self
    }

    pub const fn inc(mut self) -> Self {
        self.inc = true;
        self
    }

    pub const fn dec(mut self) -> Self {
        self.dec = true;
        self
    }

    /// True when the operand carries a 16-bit value (register pair, SP, PC or
    /// a 16-bit immediate) that is not dereferenced.
    pub fn is_wide(&self) -> bool {
        if self.deref {
            return false;
        }
        match self.symbol {
            Symbol::Register(reg) => reg.is_wide(),
            Symbol::Imm16 | Symbol::Addr16 => true,
            _ => false,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = match self.symbol {
            Symbol::Register(reg) => reg.name().to_string(),
            Symbol::Imm8 => "d8".to_string(),
            Symbol::Imm16 => "d16".to_string(),
            Symbol::Rel8 => "r8".to_string(),
            Symbol::Io8 => "a8".to_string(),
            Symbol::Addr16 => "a16".to_string(),
            Symbol::Literal(value) => value.to_string(),
            Symbol::Condition(cond) => format!("{cond:?}"),
        };
        if self.inc {
            text.push('+');
        }
        if self.dec {
            text.push('-');
        }
        if self.deref {
            write!(f, "({text})")
        } else {
            f.write_str(&text)
        }
    }
}

/// Immutable decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub operands: &'static [Operand],
    /// System ticks consumed (taken path for conditional branches).
    pub cycles: u8,
    /// System ticks consumed when a conditional branch is not taken.
    pub cycles_not_taken: u8,
}

impl Instruction {
    pub(crate) const fn new(
        mnemonic: Mnemonic,
        operands: &'static [Operand],
        cycles: u8,
        cycles_not_taken: u8,
    ) -> Self {
        Self {
            mnemonic,
            operands,
            cycles,
            cycles_not_taken,
        }
    }

    /// The branch condition, when the first operand is one.
    pub fn condition(&self) -> Option<Condition> {
        match self.operands.first()?.symbol {
            Symbol::Condition(cond) => Some(cond),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic)?;
        for (i, operand) in self.operands.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            match (self.mnemonic, operand.symbol) {
                (Mnemonic::Rst, Symbol::Literal(vector)) => write!(f, "{sep}{vector:02X}H")?,
                _ => write!(f, "{sep}{operand}")?,
            }
        }
        Ok(())
    }
}

/// Look up the instruction for `opcode`.
///
/// `prefixed` selects the CB table; the caller is responsible for having
/// fetched the escape byte first.
pub fn decode(opcode: u8, prefixed: bool) -> Result<&'static Instruction> {
    let table = if prefixed {
        table::cb_prefixed()
    } else {
        if ILLEGAL_OPCODES.contains(&opcode) {
            return Err(DmgError::IllegalInstruction { opcode });
        }
        table::unprefixed()
    };

    table[opcode as usize]
        .as_ref()
        .ok_or(DmgError::UnknownOpcode { opcode, prefixed })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_opcodes_are_not_reported_as_unknown() {
        for opcode in ILLEGAL_OPCODES {
            assert_eq!(
                decode(opcode, false),
                Err(DmgError::IllegalInstruction { opcode })
            );
        }
        assert!(matches!(
            decode(0xD3, false),
            Err(DmgError::IllegalInstruction { opcode: 0xD3 })
        ));
    }

    #[test]
    fn every_documented_opcode_decodes() {
        for opcode in 0..=0xFFu8 {
            if !ILLEGAL_OPCODES.contains(&opcode) {
                assert!(decode(opcode, false).is_ok(), "0x{opcode:02X}");
            }
            assert!(decode(opcode, true).is_ok(), "CB 0x{opcode:02X}");
        }
    }

    #[test]
    fn disassembly_matches_opcode_map() {
        let cases = [
            (0x00, false, "NOP"),
            (0x01, false, "LD BC, d16"),
            (0x08, false, "LD (a16), SP"),
            (0x20, false, "JR NZ, r8"),
            (0x22, false, "LD (HL+), A"),
            (0x3A, false, "LD A, (HL-)"),
            (0x76, false, "HALT"),
            (0xAF, false, "XOR A"),
            (0x8E, false, "ADC A, (HL)"),
            (0xCB, false, "PREFIX"),
            (0xE0, false, "LDH (a8), A"),
            (0xE2, false, "LD (C), A"),
            (0xE8, false, "ADD SP, r8"),
            (0xF8, false, "LD HL, SP, r8"),
            (0xFF, false, "RST 38H"),
            (0xC7, false, "RST 00H"),
            (0x11, true, "RL C"),
            (0x37, true, "SWAP A"),
            (0x7C, true, "BIT 7, H"),
            (0x86, true, "RES 0, (HL)"),
            (0xFE, true, "SET 7, (HL)"),
        ];
        for (opcode, prefixed, text) in cases {
            let instr = decode(opcode, prefixed).expect("documented opcode");
            assert_eq!(instr.to_string(), text);
        }
    }

    #[test]
    fn conditional_branches_declare_both_timings() {
        let jr_nz = decode(0x20, false).unwrap();
        assert_eq!((jr_nz.cycles, jr_nz.cycles_not_taken), (12, 8));
        assert_eq!(jr_nz.condition(), Some(Condition::NZ));

        let call_c = decode(0xDC, false).unwrap();
        assert_eq!((call_c.cycles, call_c.cycles_not_taken), (24, 12));

        let ret_z = decode(0xC8, false).unwrap();
        assert_eq!((ret_z.cycles, ret_z.cycles_not_taken), (20, 8));

        let jp = decode(0xC3, false).unwrap();
        assert_eq!(jp.condition(), None);
    }

    #[test]
    fn cb_timings_depend_on_target() {
        assert_eq!(decode(0x00, true).unwrap().cycles, 8);
        assert_eq!(decode(0x06, true).unwrap().cycles, 16);
        assert_eq!(decode(0x46, true).unwrap().cycles, 12);
        assert_eq!(decode(0xC6, true).unwrap().cycles, 16);
    }
}
