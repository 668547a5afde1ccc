use crate::config::MachineConfig;
use crate::cpu::Bus;
use crate::error::{DmgError, Result};

use super::cartridge::Cartridge;
use super::interrupt::InterruptController;
use super::serial::Serial;
use super::timer::Timer;

const WRAM_START: u16 = 0xC000;
const WRAM_SIZE: usize = 0x2000;
const HRAM_START: u16 = 0xFF80;
const HRAM_SIZE: usize = 0x7F;

const LY_ADDR: u16 = 0xFF44;

/// Backing handler for one slice of the address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Region {
    Cartridge,
    WorkRam,
    HighRam,
    Serial,
    Timer,
    InterruptFlag,
    InterruptEnable,
    Lcd,
    /// Hardware that is not modelled: fixed read value, writes dropped.
    Stub(&'static str),
    /// Reserved ranges; any access is a decode bug.
    Forbidden(&'static str),
}

/// Ordered, contiguous and exhaustive partition of `0x0000..=0xFFFF`.
pub(crate) const MEMORY_MAP: &[(u16, u16, Region)] = &[
    (0x0000, 0x7FFF, Region::Cartridge),
    (0x8000, 0x9FFF, Region::Stub("vram")),
    (0xA000, 0xBFFF, Region::Cartridge),
    (0xC000, 0xDFFF, Region::WorkRam),
    (0xE000, 0xFDFF, Region::Forbidden("echo ram")),
    (0xFE00, 0xFE9F, Region::Stub("oam")),
    (0xFEA0, 0xFEFF, Region::Forbidden("unusable")),
    (0xFF00, 0xFF00, Region::Stub("joypad")),
    (0xFF01, 0xFF02, Region::Serial),
    (0xFF03, 0xFF03, Region::Stub("io")),
    (0xFF04, 0xFF07, Region::Timer),
    (0xFF08, 0xFF0E, Region::Stub("io")),
    (0xFF0F, 0xFF0F, Region::InterruptFlag),
    (0xFF10, 0xFF3F, Region::Stub("audio")),
    (0xFF40, 0xFF4B, Region::Lcd),
    (0xFF4C, 0xFF7F, Region::Stub("io")),
    (0xFF80, 0xFFFE, Region::HighRam),
    (0xFFFF, 0xFFFF, Region::InterruptEnable),
];

pub(crate) fn region_of(addr: u16) -> Option<Region> {
    MEMORY_MAP
        .iter()
        .find(|(start, end, _)| (*start..=*end).contains(&addr))
        .map(|(_, _, region)| *region)
}

/// System bus: routes CPU accesses to the cartridge, RAM and I/O devices.
pub struct MemoryBus {
    cartridge: Box<dyn Cartridge>,
    wram: [u8; WRAM_SIZE],
    hram: [u8; HRAM_SIZE],
    pub(crate) serial: Serial,
    pub(crate) timer: Timer,
    pub(crate) interrupts: InterruptController,
    config: MachineConfig,
}

impl MemoryBus {
    pub fn new(cartridge: Box<dyn Cartridge>, config: MachineConfig) -> Self {
        let mut bus = Self {
            cartridge,
            wram: [0; WRAM_SIZE],
            hram: [0; HRAM_SIZE],
            serial: Serial::new(config.serial_echo),
            timer: Timer::new(),
            interrupts: InterruptController::new(),
            config,
        };
        bus.apply_dmg_initial_io_state();
        bus
    }

    /// I/O registers as the DMG boot ROM leaves them at PC=0x0100.
    fn apply_dmg_initial_io_state(&mut self) {
        self.serial.init_dmg();
        self.timer.init_dmg();
        self.interrupts.init_dmg();
    }

    pub fn cartridge(&self) -> &dyn Cartridge {
        self.cartridge.as_ref()
    }

    pub fn serial(&self) -> &Serial {
        &self.serial
    }

    pub fn serial_mut(&mut self) -> &mut Serial {
        &mut self.serial
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    fn region(addr: u16) -> Result<Region> {
        region_of(addr).ok_or(DmgError::BusAccess {
            addr,
            region: "unmapped",
        })
    }
}

impl Bus for MemoryBus {
    fn read8(&mut self, addr: u16) -> Result<u8> {
        let value = match Self::region(addr)? {
            Region::Cartridge => self.cartridge.read(addr),
            Region::WorkRam => self.wram[(addr - WRAM_START) as usize],
            Region::HighRam => self.hram[(addr - HRAM_START) as usize],
            Region::Serial => self.serial.read(addr),
            Region::Timer => self.timer.read(addr),
            Region::InterruptFlag => self.interrupts.read_if(),
            Region::InterruptEnable => self.interrupts.read_ie(),
            Region::Lcd if addr == LY_ADDR => self.config.ly_value,
            Region::Lcd | Region::Stub(_) => self.config.stub_value,
            Region::Forbidden(region) => return Err(DmgError::BusAccess { addr, region }),
        };
        Ok(value)
    }

    fn write8(&mut self, addr: u16, value: u8) -> Result<()> {
        match Self::region(addr)? {
            Region::Cartridge => self.cartridge.write(addr, value),
            Region::WorkRam => self.wram[(addr - WRAM_START) as usize] = value,
            Region::HighRam => self.hram[(addr - HRAM_START) as usize] = value,
            Region::Serial => self.serial.write(addr, value, &mut self.interrupts),
            Region::Timer => self.timer.write(addr, value),
            Region::InterruptFlag => self.interrupts.write_if(value),
            Region::InterruptEnable => self.interrupts.write_ie(value),
            Region::Lcd => {}
            Region::Stub(name) => {
                log::trace!("dropped write 0x{value:02X} to {name} at 0x{addr:04X}");
            }
            Region::Forbidden(region) => return Err(DmgError::BusAccess { addr, region }),
        }
        Ok(())
    }

    /// The timer advances once per system tick.
    fn tick(&mut self, cycles: u32) {
        for _ in 0..cycles {
            self.timer.tick(&mut self.interrupts);
        }
    }

    fn interrupts(&mut self) -> &mut InterruptController {
        &mut self.interrupts
    }
}
