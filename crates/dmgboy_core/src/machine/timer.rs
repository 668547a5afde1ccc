/// Timer / divider unit.
///
/// DIV exposes the upper byte of a free-running 16-bit counter that advances
/// once per system tick. TIMA counts falling edges of the counter bit chosen
/// by TAC and reloads from TMA when it wraps.
use super::interrupt::{Interrupt, InterruptController};

pub const DIV: u16 = 0xFF04;
pub const TIMA: u16 = 0xFF05;
pub const TMA: u16 = 0xFF06;
pub const TAC: u16 = 0xFF07;

const TAC_ENABLE: u8 = 0x04;

#[derive(Clone, Debug, Default)]
pub struct Timer {
    /// System counter; DIV is its high byte.
    counter: u16,
    tima: u8,
    tma: u8,
    /// TAC raw value (lower 3 bits meaningful).
    tac: u8,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter value at the hand-off from the DMG boot ROM.
    pub(crate) fn init_dmg(&mut self) {
        self.counter = 0xAC00;
        self.tima = 0x00;
        self.tma = 0x00;
        self.tac = 0x00;
    }

    #[inline]
    pub fn counter(&self) -> u16 {
        self.counter
    }

    #[inline]
    fn enabled(&self) -> bool {
        self.tac & TAC_ENABLE != 0
    }

    /// Counter bit watched for TIMA increments. The mapping is:
    /// - 00 → bit 9
    /// - 01 → bit 3
    /// - 10 → bit 5
    /// - 11 → bit 7
    #[inline]
    fn selected_bit(&self) -> u16 {
        match self.tac & 0x03 {
            0x00 => 1 << 9,
            0x01 => 1 << 3,
            0x02 => 1 << 5,
            _ => 1 << 7,
        }
    }

    /// Advance by one system tick.
    pub fn tick(&mut self, interrupts: &mut InterruptController) {
        let old = self.counter;
        self.counter = self.counter.wrapping_add(1);

        let bit = self.selected_bit();
        let falling = old & bit != 0 && self.counter & bit == 0;
        if self.enabled() && falling {
            self.increment_tima(interrupts);
        }
    }

    fn increment_tima(&mut self, interrupts: &mut InterruptController) {
        let (next, overflow) = self.tima.overflowing_add(1);
        if overflow {
            log::trace!("timer overflow, TIMA reloaded with 0x{:02X}", self.tma);
            self.tima = self.tma;
            interrupts.request(Interrupt::Timer);
        } else {
            self.tima = next;
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            DIV => (self.counter >> 8) as u8,
            TIMA => self.tima,
            TMA => self.tma,
            TAC => self.tac | 0xF8,
            _ => 0xFF,
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            DIV => {
                log::debug!("DIV reset (counter was 0x{:04X})", self.counter);
                self.counter = 0;
            }
            TIMA => self.tima = value,
            TMA => self.tma = value,
            TAC => self.tac = value & 0x07,
            _ => {}
        }
    }
}
