//! Carry-chain arithmetic on 8- and 16-bit words.
//!
//! Each helper returns the wrapped result together with the carry (or borrow)
//! out of the most significant bit. The carry is derived from the operand and
//! result bits rather than from a widened intermediate, which keeps the same
//! formula usable for both widths.

/// `x + y + carry`, returning the 8-bit sum and the carry out of bit 7.
#[inline]
pub fn add8(x: u8, y: u8, carry: bool) -> (u8, bool) {
    let sum = x.wrapping_add(y).wrapping_add(carry as u8);
    let carry_out = ((x & y) | ((x | y) & !sum)) >> 7;
    (sum, carry_out != 0)
}

/// `x + y + carry`, returning the 16-bit sum and the carry out of bit 15.
#[inline]
pub fn add16(x: u16, y: u16, carry: bool) -> (u16, bool) {
    let sum = x.wrapping_add(y).wrapping_add(carry as u16);
    let carry_out = ((x & y) | ((x | y) & !sum)) >> 15;
    (sum, carry_out != 0)
}

/// `x - y - borrow`, returning the 8-bit difference and the borrow out of bit 7.
#[inline]
pub fn sub8(x: u8, y: u8, borrow: bool) -> (u8, bool) {
    let diff = x.wrapping_sub(y).wrapping_sub(borrow as u8);
    let borrow_out = ((!x & y) | (!(x ^ y) & diff)) >> 7;
    (diff, borrow_out != 0)
}

/// `x - y - borrow`, returning the 16-bit difference and the borrow out of bit 15.
#[inline]
pub fn sub16(x: u16, y: u16, borrow: bool) -> (u16, bool) {
    let diff = x.wrapping_sub(y).wrapping_sub(borrow as u16);
    let borrow_out = ((!x & y) | (!(x ^ y) & diff)) >> 15;
    (diff, borrow_out != 0)
}

/// Carry out of bit 3 for `x + y + carry`.
#[inline]
pub fn half_carry_add8(x: u8, y: u8, carry: bool) -> bool {
    (x & 0x0F) + (y & 0x0F) + carry as u8 > 0x0F
}

/// Borrow out of bit 3 for `x - y - borrow`.
#[inline]
pub fn half_borrow_sub8(x: u8, y: u8, borrow: bool) -> bool {
    (x & 0x0F) < (y & 0x0F) + borrow as u8
}

/// Carry out of bit 11 for `x + y`.
#[inline]
pub fn half_carry_add16(x: u16, y: u16) -> bool {
    (x & 0x0FFF) + (y & 0x0FFF) > 0x0FFF
}
