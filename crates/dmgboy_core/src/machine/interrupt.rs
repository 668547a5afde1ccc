use bitflags::bitflags;

bitflags! {
    /// Interrupt source bits as laid out in IE (`0xFFFF`) and IF (`0xFF0F`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 0x01;
        const LCD_STAT = 0x02;
        const TIMER = 0x04;
        const SERIAL = 0x08;
        const JOYPAD = 0x10;
    }
}

/// Interrupt sources in priority order (lowest bit first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    VBlank,
    LcdStat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    #[inline]
    pub fn flag(self) -> InterruptFlags {
        match self {
            Interrupt::VBlank => InterruptFlags::VBLANK,
            Interrupt::LcdStat => InterruptFlags::LCD_STAT,
            Interrupt::Timer => InterruptFlags::TIMER,
            Interrupt::Serial => InterruptFlags::SERIAL,
            Interrupt::Joypad => InterruptFlags::JOYPAD,
        }
    }

    /// Fixed jump target for the source.
    #[inline]
    pub fn vector(self) -> u16 {
        0x0040 + 8 * self as u16
    }
}

/// Number of `advance` calls between EI/DI and the IME change: the change
/// lands once the instruction after EI/DI has completed.
const IME_DELAY: u8 = 2;

/// IE/IF registers plus the master enable and its delayed transitions.
#[derive(Clone, Debug, Default)]
pub struct InterruptController {
    enable: InterruptFlags,
    flag: InterruptFlags,
    ime: bool,
    pending_enable: u8,
    pending_disable: u8,
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    /// IE and IF as left by the DMG boot ROM.
    pub(crate) fn init_dmg(&mut self) {
        self.enable = InterruptFlags::empty();
        self.flag = InterruptFlags::VBLANK;
        self.ime = false;
        self.pending_enable = 0;
        self.pending_disable = 0;
    }

    #[inline]
    pub fn ime(&self) -> bool {
        self.ime
    }

    #[inline]
    pub fn enabled(&self) -> InterruptFlags {
        self.enable
    }

    #[inline]
    pub fn requested(&self) -> InterruptFlags {
        self.flag
    }

    /// IF as seen by the CPU; bits 7-5 are unused and read back set.
    #[inline]
    pub fn read_if(&self) -> u8 {
        self.flag.bits() | 0xE0
    }

    #[inline]
    pub fn write_if(&mut self, value: u8) {
        self.flag = InterruptFlags::from_bits_truncate(value);
    }

    #[inline]
    pub fn read_ie(&self) -> u8 {
        self.enable.bits()
    }

    #[inline]
    pub fn write_ie(&mut self, value: u8) {
        self.enable = InterruptFlags::from_bits_retain(value);
    }

    #[inline]
    pub fn request(&mut self, interrupt: Interrupt) {
        self.flag.insert(interrupt.flag());
    }

    /// Clear the request bit of a serviced source.
    #[inline]
    pub fn acknowledge(&mut self, interrupt: Interrupt) {
        self.flag.remove(interrupt.flag());
    }

    /// EI: master enable turns on after the following instruction.
    pub fn schedule_enable(&mut self) {
        self.pending_enable = IME_DELAY;
        self.pending_disable = 0;
    }

    /// DI: master enable turns off after the following instruction.
    pub fn schedule_disable(&mut self) {
        self.pending_disable = IME_DELAY;
        self.pending_enable = 0;
    }

    /// Immediate enable, used by RETI.
    pub fn enable_now(&mut self) {
        self.ime = true;
        self.pending_enable = 0;
        self.pending_disable = 0;
    }

    /// Immediate disable, used on interrupt entry.
    pub fn disable_now(&mut self) {
        self.ime = false;
        self.pending_enable = 0;
        self.pending_disable = 0;
    }

    /// Count down the delayed transitions once per executed instruction.
    pub fn advance(&mut self) {
        if self.pending_enable > 0 {
            self.pending_enable -= 1;
            if self.pending_enable == 0 {
                self.ime = true;
            }
        }
        if self.pending_disable > 0 {
            self.pending_disable -= 1;
            if self.pending_disable == 0 {
                self.ime = false;
            }
        }
    }

    /// Highest-priority source that is both enabled and requested,
    /// regardless of the master enable.
    pub fn pending(&self) -> Option<Interrupt> {
        let active = self.enable & self.flag;
        Interrupt::ALL
            .into_iter()
            .find(|interrupt| active.contains(interrupt.flag()))
    }
}
