use crate::arith;

use super::{Cpu, Flag};

impl Cpu {
    /// Core 8-bit ADD/ADC operation on A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true).
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = use_carry && self.get_flag(Flag::C);
        let (result, carry) = arith::add8(a, value, carry_in);
        let half = arith::half_carry_add8(a, value, carry_in);

        self.regs.a = result;
        self.set_flags(result == 0, false, half, carry);
    }

    /// Core 8-bit SUB/SBC operation on A.
    ///
    /// `use_carry` selects between SUB (false) and SBC (true).
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let borrow_in = use_carry && self.get_flag(Flag::C);
        self.regs.a = self.sub_flags(value, borrow_in);
    }

    /// Compare A with `value`, setting flags as if `A - value` was performed.
    /// A itself is not modified.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.sub_flags(value, false);
    }

    fn sub_flags(&mut self, value: u8, borrow_in: bool) -> u8 {
        let a = self.regs.a;
        let (result, borrow) = arith::sub8(a, value, borrow_in);
        let half = arith::half_borrow_sub8(a, value, borrow_in);
        self.set_flags(result == 0, true, half, borrow);
        result
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.regs.a = result;
        self.set_flags(result == 0, false, true, false);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.regs.a = result;
        self.set_flags(result == 0, false, false, false);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;
        self.set_flags(result == 0, false, false, false);
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// The correction is derived from the N/H/C flags left by the previous
    /// operation. Updates A, Z, H, C; leaves N unchanged.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.get_flag(Flag::C) { 0x60 } else { 0x00 };
        if self.get_flag(Flag::H) {
            adjust |= 0x06;
        }

        if !self.get_flag(Flag::N) {
            // After an addition.
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            // After a subtraction.
            a = a.wrapping_sub(adjust);
        }

        self.set_flag(Flag::C, adjust >= 0x60);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::Z, a == 0);
        self.regs.a = a;
    }

    /// 8-bit increment used by INC r and INC (HL). C is left alone.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, arith::half_carry_add8(value, 1, false));
        result
    }

    /// 8-bit decrement used by DEC r and DEC (HL). C is left alone.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, arith::half_borrow_sub8(value, 1, false));
        result
    }

    /// `ADD HL,rr`: Z is unaffected, N is cleared, H comes from bit 11 and C
    /// from bit 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let (result, carry) = arith::add16(hl, value, false);

        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, arith::half_carry_add16(hl, value));
        self.set_flag(Flag::C, carry);

        self.regs.set_hl(result);
    }

    /// Signed 8-bit offset added to a 16-bit base, shared by `ADD SP,r8` and
    /// `LD HL,SP+r8`.
    ///
    /// Z and N are cleared; H and C are computed from the low byte as an
    /// unsigned 8-bit addition.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, offset: u8) -> u16 {
        let low = base as u8;
        let (_, carry) = arith::add8(low, offset, false);
        let half = arith::half_carry_add8(low, offset, false);
        self.set_flags(false, false, half, carry);
        base.wrapping_add(offset as i8 as i16 as u16)
    }
}
