use super::{Cpu, Flag, Registers};

impl Cpu {
    /// CPU as the DMG boot ROM leaves it when it hands control to the
    /// cartridge at 0x0100.
    pub fn new(header_checksum: u8) -> Self {
        let mut cpu = Self::default();
        cpu.apply_dmg_boot_state(header_checksum);
        cpu
    }

    pub fn reset(&mut self, header_checksum: u8) {
        self.regs = Registers::default();
        self.halted = false;
        self.apply_dmg_boot_state(header_checksum);
    }

    /// Initialize registers to the DMG post-boot values.
    ///
    /// Z is always set; the boot ROM leaves H and C set as well unless the
    /// header checksum byte is zero.
    fn apply_dmg_boot_state(&mut self, header_checksum: u8) {
        self.regs.a = 0x01;
        self.regs.b = 0x00;
        self.regs.c = 0x13;
        self.regs.d = 0x00;
        self.regs.e = 0xD8;
        self.regs.h = 0x01;
        self.regs.l = 0x4D;
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;

        self.clear_flags();
        self.set_flag(Flag::Z, true);
        let checksum_set = header_checksum != 0;
        self.set_flag(Flag::H, checksum_set);
        self.set_flag(Flag::C, checksum_set);
    }
}
