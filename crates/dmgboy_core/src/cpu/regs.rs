/// Registers for the Game Boy CPU (LR35902).
///
/// The 16-bit pairs are views over the 8-bit halves and are never stored
/// separately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

/// Register names as they appear in operand descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg {
    A,
    F,
    B,
    C,
    D,
    E,
    H,
    L,
    AF,
    BC,
    DE,
    HL,
    SP,
    PC,
}

impl Reg {
    #[inline]
    pub fn is_wide(self) -> bool {
        matches!(self, Reg::AF | Reg::BC | Reg::DE | Reg::HL | Reg::SP | Reg::PC)
    }

    pub fn name(self) -> &'static str {
        match self {
            Reg::A => "A",
            Reg::F => "F",
            Reg::B => "B",
            Reg::C => "C",
            Reg::D => "D",
            Reg::E => "E",
            Reg::H => "H",
            Reg::L => "L",
            Reg::AF => "AF",
            Reg::BC => "BC",
            Reg::DE => "DE",
            Reg::HL => "HL",
            Reg::SP => "SP",
            Reg::PC => "PC",
        }
    }
}

impl Registers {
    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f & 0xF0])
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        // Lower 4 bits of F are always zero.
        self.f = f & 0xF0;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        [self.b, self.c] = value.to_be_bytes();
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        [self.d, self.e] = value.to_be_bytes();
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        [self.h, self.l] = value.to_be_bytes();
    }

    /// Read any register by name. 8-bit registers are zero-extended.
    pub fn get(&self, reg: Reg) -> u16 {
        match reg {
            Reg::A => self.a as u16,
            Reg::F => (self.f & 0xF0) as u16,
            Reg::B => self.b as u16,
            Reg::C => self.c as u16,
            Reg::D => self.d as u16,
            Reg::E => self.e as u16,
            Reg::H => self.h as u16,
            Reg::L => self.l as u16,
            Reg::AF => self.af(),
            Reg::BC => self.bc(),
            Reg::DE => self.de(),
            Reg::HL => self.hl(),
            Reg::SP => self.sp,
            Reg::PC => self.pc,
        }
    }

    /// Write any register by name. 8-bit registers keep the low byte.
    pub fn set(&mut self, reg: Reg, value: u16) {
        let byte = value as u8;
        match reg {
            Reg::A => self.a = byte,
            Reg::F => self.f = byte & 0xF0,
            Reg::B => self.b = byte,
            Reg::C => self.c = byte,
            Reg::D => self.d = byte,
            Reg::E => self.e = byte,
            Reg::H => self.h = byte,
            Reg::L => self.l = byte,
            Reg::AF => self.set_af(value),
            Reg::BC => self.set_bc(value),
            Reg::DE => self.set_de(value),
            Reg::HL => self.set_hl(value),
            Reg::SP => self.sp = value,
            Reg::PC => self.pc = value,
        }
    }

    #[inline]
    pub fn flag(&self, flag: Flag) -> bool {
        self.f & flag.mask() != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        if value {
            self.f |= flag.mask();
        } else {
            self.f &= !flag.mask();
        }
    }
}

/// Flag bits in the F register.
///
/// Layout (bit index in the byte, from MSB to LSB):
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0–3 are always zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

impl Flag {
    #[inline]
    pub fn mask(self) -> u8 {
        1 << self as u8
    }
}
