/// Cartridge address windows as seen from the bus.
pub const ROM_END: u16 = 0x7FFF;
pub const RAM_START: u16 = 0xA000;
pub const RAM_END: u16 = 0xBFFF;

/// Offset of the header checksum byte inside the ROM image.
pub const HEADER_CHECKSUM: usize = 0x014D;

const RAM_SIZE: usize = 0x2000;

/// Cartridge collaborator.
///
/// The bus forwards the ROM window (`0x0000..=0x7FFF`) and the external RAM
/// window (`0xA000..=0xBFFF`) here with the bus address, not rebased.
pub trait Cartridge {
    fn read(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);
    /// Header checksum byte; only used to pick the initial flag state.
    fn header_checksum(&self) -> u8;
}

/// Flat ROM + RAM pass-through with no bank switching.
#[derive(Clone, Debug)]
pub struct FlatCartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
}

impl FlatCartridge {
    pub fn new(rom: Vec<u8>) -> Self {
        Self {
            rom,
            ram: vec![0; RAM_SIZE],
        }
    }

    pub fn rom(&self) -> &[u8] {
        &self.rom
    }
}

impl Cartridge for FlatCartridge {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=ROM_END => self.rom.get(addr as usize).copied().unwrap_or(0xFF),
            RAM_START..=RAM_END => self.ram[(addr - RAM_START) as usize],
            _ => 0xFF,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        // ROM writes would select banks on a mapper; a flat image ignores them.
        if let RAM_START..=RAM_END = addr {
            self.ram[(addr - RAM_START) as usize] = value;
        }
    }

    fn header_checksum(&self) -> u8 {
        self.rom.get(HEADER_CHECKSUM).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rom_is_read_only_and_ram_is_writable() {
        let mut cart = FlatCartridge::new(vec![0x11, 0x22]);
        cart.write(0x0000, 0x99);
        assert_eq!(cart.read(0x0000), 0x11);
        assert_eq!(cart.read(0x0001), 0x22);
        assert_eq!(cart.read(0x4000), 0xFF);

        cart.write(0xA000, 0x42);
        cart.write(0xBFFF, 0x24);
        assert_eq!(cart.read(0xA000), 0x42);
        assert_eq!(cart.read(0xBFFF), 0x24);
    }

    #[test]
    fn header_checksum_comes_from_0x014d() {
        let mut rom = vec![0; 0x8000];
        rom[HEADER_CHECKSUM] = 0x5A;
        assert_eq!(FlatCartridge::new(rom).header_checksum(), 0x5A);
        assert_eq!(FlatCartridge::new(Vec::new()).header_checksum(), 0);
    }
}
