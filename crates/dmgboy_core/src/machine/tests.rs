use pretty_assertions::assert_eq;

use super::bus::{region_of, Region, MEMORY_MAP};
use super::*;
use crate::config::MachineConfig;
use crate::cpu::Bus;
use crate::error::DmgError;

fn bus_with_rom(rom: Vec<u8>) -> MemoryBus {
    MemoryBus::new(Box::new(FlatCartridge::new(rom)), MachineConfig::default())
}

fn blank_bus() -> MemoryBus {
    bus_with_rom(vec![0; 0x8000])
}

#[test]
fn memory_map_is_contiguous_and_exhaustive() {
    assert_eq!(MEMORY_MAP.first().map(|(start, _, _)| *start), Some(0x0000));
    assert_eq!(MEMORY_MAP.last().map(|(_, end, _)| *end), Some(0xFFFF));

    for window in MEMORY_MAP.windows(2) {
        let (_, prev_end, _) = window[0];
        let (next_start, next_end, _) = window[1];
        assert_eq!(next_start, prev_end + 1);
        assert!(next_start <= next_end);
    }

    assert!((0..=0xFFFFu16).all(|addr| region_of(addr).is_some()));
}

#[test]
fn region_lookup_matches_hardware_layout() {
    assert_eq!(region_of(0x0150), Some(Region::Cartridge));
    assert_eq!(region_of(0xA123), Some(Region::Cartridge));
    assert_eq!(region_of(0xDFFF), Some(Region::WorkRam));
    assert_eq!(region_of(0xE000), Some(Region::Forbidden("echo ram")));
    assert_eq!(region_of(0xFF05), Some(Region::Timer));
    assert_eq!(region_of(0xFF0F), Some(Region::InterruptFlag));
    assert_eq!(region_of(0xFF44), Some(Region::Lcd));
    assert_eq!(region_of(0xFFFE), Some(Region::HighRam));
    assert_eq!(region_of(0xFFFF), Some(Region::InterruptEnable));
}

#[test]
fn echo_and_unusable_ranges_are_rejected() {
    let mut bus = blank_bus();

    assert_eq!(
        bus.read8(0xE000),
        Err(DmgError::BusAccess {
            addr: 0xE000,
            region: "echo ram"
        })
    );
    assert_eq!(
        bus.write8(0xFDFF, 0x12),
        Err(DmgError::BusAccess {
            addr: 0xFDFF,
            region: "echo ram"
        })
    );
    assert_eq!(
        bus.write8(0xFEA0, 0x00),
        Err(DmgError::BusAccess {
            addr: 0xFEA0,
            region: "unusable"
        })
    );
}

#[test]
fn stubbed_hardware_reads_configured_values() {
    let config = MachineConfig::builder().stub_value(0xFF).build();
    let mut bus = MemoryBus::new(Box::new(FlatCartridge::new(vec![0; 0x8000])), config);

    for addr in [0x8000, 0x9FFF, 0xFE00, 0xFF00, 0xFF26, 0xFF40, 0xFF4D] {
        bus.write8(addr, 0x12).unwrap();
        assert_eq!(bus.read8(addr).unwrap(), 0xFF, "addr 0x{addr:04X}");
    }
    assert_eq!(bus.read8(0xFF44).unwrap(), 0x90);
}

#[test]
fn ly_reading_can_be_overridden() {
    let config = MachineConfig::builder().ly_value(0x00).build();
    let mut bus = MemoryBus::new(Box::new(FlatCartridge::new(Vec::new())), config);
    assert_eq!(bus.read8(0xFF44).unwrap(), 0x00);
}

#[test]
fn ram_regions_round_trip() {
    let mut bus = blank_bus();

    for addr in [0xC000, 0xDFFF, 0xA000, 0xBFFF, 0xFF80, 0xFFFE] {
        bus.write8(addr, 0x5A).unwrap();
        assert_eq!(bus.read8(addr).unwrap(), 0x5A, "addr 0x{addr:04X}");
    }
}

#[test]
fn rom_is_read_through_and_write_protected() {
    let mut rom = vec![0; 0x8000];
    rom[0x0150] = 0xC3;
    let mut bus = bus_with_rom(rom);

    assert_eq!(bus.read8(0x0150).unwrap(), 0xC3);
    bus.write8(0x0150, 0x00).unwrap();
    assert_eq!(bus.read8(0x0150).unwrap(), 0xC3);
    assert_eq!(bus.read16(0x014F).unwrap(), 0xC300);
}

#[test]
fn io_registers_start_in_boot_rom_state() {
    let mut bus = blank_bus();

    assert_eq!(bus.read8(0xFF0F).unwrap(), 0xE1);
    assert_eq!(bus.read8(0xFFFF).unwrap(), 0x00);
    assert_eq!(bus.read8(0xFF02).unwrap(), 0x7E);
    assert_eq!(bus.read8(0xFF04).unwrap(), 0xAC);
    assert_eq!(bus.read8(0xFF05).unwrap(), 0x00);
    assert_eq!(bus.read8(0xFF07).unwrap(), 0xF8);
}

#[test]
fn interrupt_registers_are_routed_to_the_controller() {
    let mut bus = blank_bus();

    bus.write8(0xFFFF, 0x05).unwrap();
    bus.write8(0xFF0F, 0x04).unwrap();

    let interrupts = bus.interrupts();
    assert_eq!(interrupts.enabled(), InterruptFlags::VBLANK | InterruptFlags::TIMER);
    assert_eq!(interrupts.pending(), Some(Interrupt::Timer));
    assert_eq!(bus.read8(0xFF0F).unwrap(), 0xE4);
}

#[test]
fn div_counts_system_ticks_and_resets_on_write() {
    let mut bus = blank_bus();

    bus.write8(0xFF04, 0x77).unwrap();
    assert_eq!(bus.read8(0xFF04).unwrap(), 0x00);

    bus.tick(0x100);
    assert_eq!(bus.read8(0xFF04).unwrap(), 0x01);
    assert_eq!(bus.timer().counter(), 0x0100);

    bus.write8(0xFF04, 0x00).unwrap();
    assert_eq!(bus.timer().counter(), 0x0000);
}

#[test]
fn tima_counts_falling_edges_of_selected_bit() {
    let mut bus = blank_bus();
    // Enabled, 16-tick period.
    bus.write8(0xFF07, 0x05).unwrap();
    bus.write8(0xFF04, 0x00).unwrap();

    bus.tick(15);
    assert_eq!(bus.read8(0xFF05).unwrap(), 0x00);
    bus.tick(1);
    assert_eq!(bus.read8(0xFF05).unwrap(), 0x01);
    bus.tick(16 * 4);
    assert_eq!(bus.read8(0xFF05).unwrap(), 0x05);

    // Slowest rate: 1024 ticks per increment.
    bus.write8(0xFF07, 0x04).unwrap();
    bus.write8(0xFF04, 0x00).unwrap();
    bus.tick(1024);
    assert_eq!(bus.read8(0xFF05).unwrap(), 0x06);
}

#[test]
fn tima_is_frozen_while_disabled() {
    let mut bus = blank_bus();
    bus.write8(0xFF07, 0x01).unwrap();
    bus.tick(4096);
    assert_eq!(bus.read8(0xFF05).unwrap(), 0x00);
}

#[test]
fn tima_overflow_reloads_and_requests_interrupt() {
    let mut bus = blank_bus();
    bus.write8(0xFF0F, 0x00).unwrap();
    bus.write8(0xFF06, 0xAB).unwrap();
    bus.write8(0xFF05, 0xFF).unwrap();
    bus.write8(0xFF07, 0x05).unwrap();
    bus.write8(0xFF04, 0x00).unwrap();

    bus.tick(16);

    assert_eq!(bus.read8(0xFF05).unwrap(), 0xAB);
    assert_eq!(bus.read8(0xFF0F).unwrap() & 0x04, 0x04);
}

#[test]
fn serial_transfer_appends_to_output() {
    let mut bus = blank_bus();
    bus.write8(0xFF0F, 0x00).unwrap();

    for byte in b"ok" {
        bus.write8(0xFF01, *byte).unwrap();
        bus.write8(0xFF02, 0x81).unwrap();
    }

    assert_eq!(bus.serial().output(), b"ok");
    assert_eq!(bus.read8(0xFF02).unwrap(), 0x01);
    assert_eq!(bus.read8(0xFF0F).unwrap() & 0x08, 0x08);

    assert_eq!(bus.serial_mut().take_output(), b"ok".to_vec());
    assert!(bus.serial().output().is_empty());
}

#[test]
fn serial_with_external_clock_does_not_transfer() {
    let mut bus = blank_bus();
    bus.write8(0xFF01, b'x').unwrap();
    bus.write8(0xFF02, 0x80).unwrap();

    assert!(bus.serial().output().is_empty());
    assert_eq!(bus.read8(0xFF02).unwrap(), 0x80);
}

#[test]
fn dmg_boots_at_entry_point_with_checksum_flags() {
    let mut rom = vec![0; 0x8000];
    rom[0x014D] = 0xE7;
    let dmg = Dmg::new(Box::new(FlatCartridge::new(rom)), MachineConfig::default());

    assert_eq!(dmg.cpu().regs.pc, 0x0100);
    assert_eq!(dmg.cpu().regs.sp, 0xFFFE);
    assert_eq!(dmg.cpu().regs.af(), 0x01B0);
    assert!(!dmg.cpu().halted);
    assert_eq!(dmg.bus().cartridge().header_checksum(), 0xE7);

    let dmg = Dmg::new(
        Box::new(FlatCartridge::new(vec![0; 0x8000])),
        MachineConfig::default(),
    );
    assert_eq!(dmg.cpu().regs.af(), 0x0180);
}

#[test]
fn dmg_run_stops_at_first_error() {
    let mut rom = vec![0; 0x8000];
    // NOP ; NOP ; illegal 0xDD
    rom[0x0100..0x0103].copy_from_slice(&[0x00, 0x00, 0xDD]);
    let mut dmg = Dmg::new(Box::new(FlatCartridge::new(rom)), MachineConfig::default());

    let err = dmg.run(10, None).unwrap_err();

    assert_eq!(err, DmgError::IllegalInstruction { opcode: 0xDD });
    assert_eq!(dmg.cpu().regs.pc, 0x0103);
}

#[test]
fn halt_without_enabled_sources_is_a_stall() {
    let mut rom = vec![0; 0x8000];
    // HALT
    rom[0x0100] = 0x76;
    let mut dmg = Dmg::new(Box::new(FlatCartridge::new(rom)), MachineConfig::default());

    assert!(!dmg.is_stalled());
    dmg.step(None).unwrap();
    assert!(dmg.is_stalled());

    dmg.bus_mut().write8(0xFFFF, 0x04).unwrap();
    assert!(!dmg.is_stalled());
}
