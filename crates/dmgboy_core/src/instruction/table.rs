//! Opcode tables.
//!
//! The unprefixed table is written out row by row, keyed by opcode, in the
//! operand order of the public opcode map. The CB table is regular enough to
//! generate from the `x`/`y`/`z` fields of the opcode byte.
use lazy_static::lazy_static;

use super::{Condition, Instruction, Mnemonic, Operand, Symbol};
use crate::cpu::Reg;

const A: Operand = Operand::reg(Reg::A);
const B: Operand = Operand::reg(Reg::B);
const C: Operand = Operand::reg(Reg::C);
const D: Operand = Operand::reg(Reg::D);
const E: Operand = Operand::reg(Reg::E);
const H: Operand = Operand::reg(Reg::H);
const L: Operand = Operand::reg(Reg::L);
const AF: Operand = Operand::reg(Reg::AF);
const BC: Operand = Operand::reg(Reg::BC);
const DE: Operand = Operand::reg(Reg::DE);
const HL: Operand = Operand::reg(Reg::HL);
const SP: Operand = Operand::reg(Reg::SP);

const AT_BC: Operand = BC.deref();
const AT_DE: Operand = DE.deref();
const AT_HL: Operand = HL.deref();
const AT_HLI: Operand = HL.deref().inc();
const AT_HLD: Operand = HL.deref().dec();
const AT_C: Operand = C.deref();

const D8: Operand = Operand::new(Symbol::Imm8);
const D16: Operand = Operand::new(Symbol::Imm16);
const R8: Operand = Operand::new(Symbol::Rel8);
const A8: Operand = Operand::new(Symbol::Io8).deref();
const A16: Operand = Operand::new(Symbol::Addr16);
const AT_A16: Operand = A16.deref();

const RST_00: Operand = Operand::literal(0x00);
const RST_08: Operand = Operand::literal(0x08);
const RST_10: Operand = Operand::literal(0x10);
const RST_18: Operand = Operand::literal(0x18);
const RST_20: Operand = Operand::literal(0x20);
const RST_28: Operand = Operand::literal(0x28);
const RST_30: Operand = Operand::literal(0x30);
const RST_38: Operand = Operand::literal(0x38);

const NZ: Operand = Operand::cond(Condition::NZ);
const Z: Operand = Operand::cond(Condition::Z);
const NC: Operand = Operand::cond(Condition::NC);
const CY: Operand = Operand::cond(Condition::C);

macro_rules! op {
    ($code:literal, $m:ident [$($o:expr),*] $taken:literal / $skipped:literal) => {
        ($code, Instruction::new(Mnemonic::$m, &[$($o),*], $taken, $skipped))
    };
    ($code:literal, $m:ident [$($o:expr),*] $cycles:literal) => {
        ($code, Instruction::new(Mnemonic::$m, &[$($o),*], $cycles, $cycles))
    };
}

#[rustfmt::skip]
static UNPREFIXED_ROWS: &[(u8, Instruction)] = &[
    op!(0x00, Nop [] 4),
    op!(0x01, Ld [BC, D16] 12),
    op!(0x02, Ld [AT_BC, A] 8),
    op!(0x03, Inc [BC] 8),
    op!(0x04, Inc [B] 4),
    op!(0x05, Dec [B] 4),
    op!(0x06, Ld [B, D8] 8),
    op!(0x07, Rlca [] 4),
    op!(0x08, Ld [AT_A16, SP] 20),
    op!(0x09, Add [HL, BC] 8),
    op!(0x0A, Ld [A, AT_BC] 8),
    op!(0x0B, Dec [BC] 8),
    op!(0x0C, Inc [C] 4),
    op!(0x0D, Dec [C] 4),
    op!(0x0E, Ld [C, D8] 8),
    op!(0x0F, Rrca [] 4),

    op!(0x10, Stop [D8] 4),
    op!(0x11, Ld [DE, D16] 12),
    op!(0x12, Ld [AT_DE, A] 8),
    op!(0x13, Inc [DE] 8),
    op!(0x14, Inc [D] 4),
    op!(0x15, Dec [D] 4),
    op!(0x16, Ld [D, D8] 8),
    op!(0x17, Rla [] 4),
    op!(0x18, Jr [R8] 12),
    op!(0x19, Add [HL, DE] 8),
    op!(0x1A, Ld [A, AT_DE] 8),
    op!(0x1B, Dec [DE] 8),
    op!(0x1C, Inc [E] 4),
    op!(0x1D, Dec [E] 4),
    op!(0x1E, Ld [E, D8] 8),
    op!(0x1F, Rra [] 4),

    op!(0x20, Jr [NZ, R8] 12 / 8),
    op!(0x21, Ld [HL, D16] 12),
    op!(0x22, Ld [AT_HLI, A] 8),
    op!(0x23, Inc [HL] 8),
    op!(0x24, Inc [H] 4),
    op!(0x25, Dec [H] 4),
    op!(0x26, Ld [H, D8] 8),
    op!(0x27, Daa [] 4),
    op!(0x28, Jr [Z, R8] 12 / 8),
    op!(0x29, Add [HL, HL] 8),
    op!(0x2A, Ld [A, AT_HLI] 8),
    op!(0x2B, Dec [HL] 8),
    op!(0x2C, Inc [L] 4),
    op!(0x2D, Dec [L] 4),
    op!(0x2E, Ld [L, D8] 8),
    op!(0x2F, Cpl [] 4),

    op!(0x30, Jr [NC, R8] 12 / 8),
    op!(0x31, Ld [SP, D16] 12),
    op!(0x32, Ld [AT_HLD, A] 8),
    op!(0x33, Inc [SP] 8),
    op!(0x34, Inc [AT_HL] 12),
    op!(0x35, Dec [AT_HL] 12),
    op!(0x36, Ld [AT_HL, D8] 12),
    op!(0x37, Scf [] 4),
    op!(0x38, Jr [CY, R8] 12 / 8),
    op!(0x39, Add [HL, SP] 8),
    op!(0x3A, Ld [A, AT_HLD] 8),
    op!(0x3B, Dec [SP] 8),
    op!(0x3C, Inc [A] 4),
    op!(0x3D, Dec [A] 4),
    op!(0x3E, Ld [A, D8] 8),
    op!(0x3F, Ccf [] 4),

    op!(0x40, Ld [B, B] 4),
    op!(0x41, Ld [B, C] 4),
    op!(0x42, Ld [B, D] 4),
    op!(0x43, Ld [B, E] 4),
    op!(0x44, Ld [B, H] 4),
    op!(0x45, Ld [B, L] 4),
    op!(0x46, Ld [B, AT_HL] 8),
    op!(0x47, Ld [B, A] 4),
    op!(0x48, Ld [C, B] 4),
    op!(0x49, Ld [C, C] 4),
    op!(0x4A, Ld [C, D] 4),
    op!(0x4B, Ld [C, E] 4),
    op!(0x4C, Ld [C, H] 4),
    op!(0x4D, Ld [C, L] 4),
    op!(0x4E, Ld [C, AT_HL] 8),
    op!(0x4F, Ld [C, A] 4),

    op!(0x50, Ld [D, B] 4),
    op!(0x51, Ld [D, C] 4),
    op!(0x52, Ld [D, D] 4),
    op!(0x53, Ld [D, E] 4),
    op!(0x54, Ld [D, H] 4),
    op!(0x55, Ld [D, L] 4),
    op!(0x56, Ld [D, AT_HL] 8),
    op!(0x57, Ld [D, A] 4),
    op!(0x58, Ld [E, B] 4),
    op!(0x59, Ld [E, C] 4),
    op!(0x5A, Ld [E, D] 4),
    op!(0x5B, Ld [E, E] 4),
    op!(0x5C, Ld [E, H] 4),
    op!(0x5D, Ld [E, L] 4),
    op!(0x5E, Ld [E, AT_HL] 8),
    op!(0x5F, Ld [E, A] 4),

    op!(0x60, Ld [H, B] 4),
    op!(0x61, Ld [H, C] 4),
    op!(0x62, Ld [H, D] 4),
    op!(0x63, Ld [H, E] 4),
    op!(0x64, Ld [H, H] 4),
    op!(0x65, Ld [H, L] 4),
    op!(0x66, Ld [H, AT_HL] 8),
    op!(0x67, Ld [H, A] 4),
    op!(0x68, Ld [L, B] 4),
    op!(0x69, Ld [L, C] 4),
    op!(0x6A, Ld [L, D] 4),
    op!(0x6B, Ld [L, E] 4),
    op!(0x6C, Ld [L, H] 4),
    op!(0x6D, Ld [L, L] 4),
    op!(0x6E, Ld [L, AT_HL] 8),
    op!(0x6F, Ld [L, A] 4),

    op!(0x70, Ld [AT_HL, B] 8),
    op!(0x71, Ld [AT_HL, C] 8),
    op!(0x72, Ld [AT_HL, D] 8),
    op!(0x73, Ld [AT_HL, E] 8),
    op!(0x74, Ld [AT_HL, H] 8),
    op!(0x75, Ld [AT_HL, L] 8),
    op!(0x76, Halt [] 4),
    op!(0x77, Ld [AT_HL, A] 8),
    op!(0x78, Ld [A, B] 4),
    op!(0x79, Ld [A, C] 4),
    op!(0x7A, Ld [A, D] 4),
    op!(0x7B, Ld [A, E] 4),
    op!(0x7C, Ld [A, H] 4),
    op!(0x7D, Ld [A, L] 4),
    op!(0x7E, Ld [A, AT_HL] 8),
    op!(0x7F, Ld [A, A] 4),

    op!(0x80, Add [A, B] 4),
    op!(0x81, Add [A, C] 4),
    op!(0x82, Add [A, D] 4),
    op!(0x83, Add [A, E] 4),
    op!(0x84, Add [A, H] 4),
    op!(0x85, Add [A, L] 4),
    op!(0x86, Add [A, AT_HL] 8),
    op!(0x87, Add [A, A] 4),
    op!(0x88, Adc [A, B] 4),
    op!(0x89, Adc [A, C] 4),
    op!(0x8A, Adc [A, D] 4),
    op!(0x8B, Adc [A, E] 4),
    op!(0x8C, Adc [A, H] 4),
    op!(0x8D, Adc [A, L] 4),
    op!(0x8E, Adc [A, AT_HL] 8),
    op!(0x8F, Adc [A, A] 4),

    op!(0x90, Sub [B] 4),
    op!(0x91, Sub [C] 4),
    op!(0x92, Sub [D] 4),
    op!(0x93, Sub [E] 4),
    op!(0x94, Sub [H] 4),
    op!(0x95, Sub [L] 4),
    op!(0x96, Sub [AT_HL] 8),
    op!(0x97, Sub [A] 4),
    op!(0x98, Sbc [A, B] 4),
    op!(0x99, Sbc [A, C] 4),
    op!(0x9A, Sbc [A, D] 4),
    op!(0x9B, Sbc [A, E] 4),
    op!(0x9C, Sbc [A, H] 4),
    op!(0x9D, Sbc [A, L] 4),
    op!(0x9E, Sbc [A, AT_HL] 8),
    op!(0x9F, Sbc [A, A] 4),

    op!(0xA0, And [B] 4),
    op!(0xA1, And [C] 4),
    op!(0xA2, And [D] 4),
    op!(0xA3, And [E] 4),
    op!(0xA4, And [H] 4),
    op!(0xA5, And [L] 4),
    op!(0xA6, And [AT_HL] 8),
    op!(0xA7, And [A] 4),
    op!(0xA8, Xor [B] 4),
    op!(0xA9, Xor [C] 4),
    op!(0xAA, Xor [D] 4),
    op!(0xAB, Xor [E] 4),
    op!(0xAC, Xor [H] 4),
    op!(0xAD, Xor [L] 4),
    op!(0xAE, Xor [AT_HL] 8),
    op!(0xAF, Xor [A] 4),

    op!(0xB0, Or [B] 4),
    op!(0xB1, Or [C] 4),
    op!(0xB2, Or [D] 4),
    op!(0xB3, Or [E] 4),
    op!(0xB4, Or [H] 4),
    op!(0xB5, Or [L] 4),
    op!(0xB6, Or [AT_HL] 8),
    op!(0xB7, Or [A] 4),
    op!(0xB8, Cp [B] 4),
    op!(0xB9, Cp [C] 4),
    op!(0xBA, Cp [D] 4),
    op!(0xBB, Cp [E] 4),
    op!(0xBC, Cp [H] 4),
    op!(0xBD, Cp [L] 4),
    op!(0xBE, Cp [AT_HL] 8),
    op!(0xBF, Cp [A] 4),

    op!(0xC0, Ret [NZ] 20 / 8),
    op!(0xC1, Pop [BC] 12),
    op!(0xC2, Jp [NZ, A16] 16 / 12),
    op!(0xC3, Jp [A16] 16),
    op!(0xC4, Call [NZ, A16] 24 / 12),
    op!(0xC5, Push [BC] 16),
    op!(0xC6, Add [A, D8] 8),
    op!(0xC7, Rst [RST_00] 16),
    op!(0xC8, Ret [Z] 20 / 8),
    op!(0xC9, Ret [] 16),
    op!(0xCA, Jp [Z, A16] 16 / 12),
    op!(0xCB, Prefix [] 4),
    op!(0xCC, Call [Z, A16] 24 / 12),
    op!(0xCD, Call [A16] 24),
    op!(0xCE, Adc [A, D8] 8),
    op!(0xCF, Rst [RST_08] 16),

    op!(0xD0, Ret [NC] 20 / 8),
    op!(0xD1, Pop [DE] 12),
    op!(0xD2, Jp [NC, A16] 16 / 12),
    op!(0xD4, Call [NC, A16] 24 / 12),
    op!(0xD5, Push [DE] 16),
    op!(0xD6, Sub [D8] 8),
    op!(0xD7, Rst [RST_10] 16),
    op!(0xD8, Ret [CY] 20 / 8),
    op!(0xD9, Reti [] 16),
    op!(0xDA, Jp [CY, A16] 16 / 12),
    op!(0xDC, Call [CY, A16] 24 / 12),
    op!(0xDE, Sbc [A, D8] 8),
    op!(0xDF, Rst [RST_18] 16),

    op!(0xE0, Ldh [A8, A] 12),
    op!(0xE1, Pop [HL] 12),
    op!(0xE2, Ld [AT_C, A] 8),
    op!(0xE5, Push [HL] 16),
    op!(0xE6, And [D8] 8),
    op!(0xE7, Rst [RST_20] 16),
    op!(0xE8, Add [SP, R8] 16),
    op!(0xE9, Jp [HL] 4),
    op!(0xEA, Ld [AT_A16, A] 16),
    op!(0xEE, Xor [D8] 8),
    op!(0xEF, Rst [RST_28] 16),

    op!(0xF0, Ldh [A, A8] 12),
    op!(0xF1, Pop [AF] 12),
    op!(0xF2, Ld [A, AT_C] 8),
    op!(0xF3, Di [] 4),
    op!(0xF5, Push [AF] 16),
    op!(0xF6, Or [D8] 8),
    op!(0xF7, Rst [RST_30] 16),
    op!(0xF8, Ld [HL, SP, R8] 12),
    op!(0xF9, Ld [SP, HL] 8),
    op!(0xFA, Ld [A, AT_A16] 16),
    op!(0xFB, Ei [] 4),
    op!(0xFE, Cp [D8] 8),
    op!(0xFF, Rst [RST_38] 16),
];

/// Register order encoded in the low three bits of a CB opcode.
static CB_TARGETS: [Operand; 8] = [B, C, D, E, H, L, AT_HL, A];

const CB_ROTATES: [Mnemonic; 8] = [
    Mnemonic::Rlc,
    Mnemonic::Rrc,
    Mnemonic::Rl,
    Mnemonic::Rr,
    Mnemonic::Sla,
    Mnemonic::Sra,
    Mnemonic::Swap,
    Mnemonic::Srl,
];

lazy_static! {
    static ref UNPREFIXED: Vec<Option<Instruction>> = build_unprefixed();

    /// `[bit, target]` pairs for BIT/RES/SET, indexed by `bit * 8 + target`.
    static ref CB_BIT_OPERANDS: Vec<[Operand; 2]> = (0..64u8)
        .map(|i| [Operand::literal(i / 8), CB_TARGETS[(i % 8) as usize]])
        .collect();

    static ref CB_PREFIXED: Vec<Option<Instruction>> = build_cb_prefixed();
}

pub(super) fn unprefixed() -> &'static [Option<Instruction>] {
    &UNPREFIXED
}

pub(super) fn cb_prefixed() -> &'static [Option<Instruction>] {
    &CB_PREFIXED
}

fn build_unprefixed() -> Vec<Option<Instruction>> {
    let mut table = vec![None; 256];
    for (code, instr) in UNPREFIXED_ROWS {
        debug_assert!(table[*code as usize].is_none(), "duplicate row 0x{code:02X}");
        table[*code as usize] = Some(*instr);
    }
    table
}

fn build_cb_prefixed() -> Vec<Option<Instruction>> {
    let bit_operands: &'static [[Operand; 2]] = &CB_BIT_OPERANDS;

    (0..=0xFFu8)
        .map(|code| {
            let x = code >> 6;
            let y = ((code >> 3) & 0x07) as usize;
            let z = (code & 0x07) as usize;
            let on_hl = z == 6;

            let instr = match x {
                0 => Instruction::new(
                    CB_ROTATES[y],
                    &CB_TARGETS[z..=z],
                    if on_hl { 16 } else { 8 },
                    if on_hl { 16 } else { 8 },
                ),
                _ => {
                    let (mnemonic, hl_cycles) = match x {
                        1 => (Mnemonic::Bit, 12),
                        2 => (Mnemonic::Res, 16),
                        _ => (Mnemonic::Set, 16),
                    };
                    let cycles = if on_hl { hl_cycles } else { 8 };
                    Instruction::new(mnemonic, &bit_operands[y * 8 + z], cycles, cycles)
                }
            };
            Some(instr)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unprefixed_rows_are_unique_and_leave_only_the_holes() {
        let table = unprefixed();
        let empty: Vec<u8> = (0..=0xFFu8)
            .filter(|code| table[*code as usize].is_none())
            .collect();
        assert_eq!(empty, super::super::ILLEGAL_OPCODES.to_vec());
        assert_eq!(UNPREFIXED_ROWS.len(), 256 - 11);
    }

    #[test]
    fn cb_rows_follow_opcode_fields() {
        let table = cb_prefixed();
        let swap_hl = table[0x36].unwrap();
        assert_eq!(swap_hl.mnemonic, Mnemonic::Swap);
        assert_eq!(swap_hl.operands, &[AT_HL]);

        let set_3_e = table[0xDB].unwrap();
        assert_eq!(set_3_e.mnemonic, Mnemonic::Set);
        assert_eq!(set_3_e.operands, &[Operand::literal(3), E]);
    }
}
