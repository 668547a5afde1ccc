/// Serial port reduced to a debug sink.
///
/// No link partner is modelled: when a transfer is started on SC with the
/// internal clock selected, the current SB value is appended to `output`,
/// the start bit is cleared and the Serial interrupt is requested. Test ROMs
/// report their results this way.
use super::interrupt::{Interrupt, InterruptController};

pub const SB: u16 = 0xFF01;
pub const SC: u16 = 0xFF02;

const SC_START: u8 = 0x80;
const SC_INTERNAL_CLOCK: u8 = 0x01;

#[derive(Clone, Debug, Default)]
pub struct Serial {
    sb: u8,
    sc: u8,
    output: Vec<u8>,
    echo: bool,
}

impl Serial {
    pub fn new(echo: bool) -> Self {
        Self {
            echo,
            ..Self::default()
        }
    }

    pub(crate) fn init_dmg(&mut self) {
        self.sb = 0x00;
        self.sc = 0x7E;
    }

    /// Bytes sent so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            SB => self.sb,
            SC => self.sc,
            _ => 0xFF,
        }
    }

    pub fn write(&mut self, addr: u16, value: u8, interrupts: &mut InterruptController) {
        match addr {
            SB => self.sb = value,
            SC => {
                self.sc = value;
                let start = SC_START | SC_INTERNAL_CLOCK;
                if self.sc & start == start {
                    self.transfer(interrupts);
                }
            }
            _ => {}
        }
    }

    fn transfer(&mut self, interrupts: &mut InterruptController) {
        let byte = self.sb;
        self.output.push(byte);
        self.sc &= !SC_START;
        interrupts.request(Interrupt::Serial);

        if self.echo {
            log::info!("serial: {:?}", byte as char);
        } else {
            log::debug!("serial byte 0x{byte:02X}");
        }
    }
}
