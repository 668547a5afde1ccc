//! Small hand-assembled programs run through the full machine.
use pretty_assertions::assert_eq;

use dmgboy_core::machine::FlatCartridge;
use dmgboy_core::trace::StepTrace;
use dmgboy_core::{Dmg, MachineConfig};

const ENTRY: usize = 0x0100;

fn rom_with(chunks: &[(usize, &[u8])]) -> Vec<u8> {
    let mut rom = vec![0; 0x8000];
    for (offset, bytes) in chunks {
        rom[*offset..*offset + bytes.len()].copy_from_slice(bytes);
    }
    rom
}

fn boot(rom: Vec<u8>) -> Dmg {
    Dmg::new(Box::new(FlatCartridge::new(rom)), MachineConfig::default())
}

#[test]
fn prints_a_string_over_serial_then_halts() {
    #[rustfmt::skip]
    let program: &[u8] = &[
        0x31, 0xFE, 0xFF, // 0100: LD SP, 0xFFFE
        0x21, 0x20, 0x01, // 0103: LD HL, 0x0120
        0x2A,             // 0106: LD A, (HL+)
        0xB7,             // 0107: OR A
        0x28, 0x08,       // 0108: JR Z, 0x0112
        0xE0, 0x01,       // 010A: LDH (SB), A
        0x3E, 0x81,       // 010C: LD A, 0x81
        0xE0, 0x02,       // 010E: LDH (SC), A
        0x18, 0xF4,       // 0110: JR 0x0106
        0x76,             // 0112: HALT
        0x18, 0xFD,       // 0113: JR 0x0112
    ];
    let mut dmg = boot(rom_with(&[(ENTRY, program), (0x0120, &b"Hi!\0"[..])]));
    let mut steps: Vec<StepTrace> = Vec::new();

    let mut guard = 0;
    while !dmg.cpu().halted {
        dmg.step(Some(&mut steps)).unwrap();
        guard += 1;
        assert!(guard < 1_000, "program never halted");
    }

    assert_eq!(dmg.serial_output(), b"Hi!");
    assert_eq!(dmg.cpu().regs.pc, 0x0113);
    assert_eq!(steps[0].pc, 0x0100);
    assert_eq!(steps[0].instruction.to_string(), "LD SP, d16");
    assert_eq!(steps.last().map(|s| s.pc), Some(0x0112));
}

#[test]
fn timer_interrupt_wakes_halt_and_runs_handler() {
    #[rustfmt::skip]
    let handler: &[u8] = &[
        0x04,       // 0050: INC B
        0xD9,       // 0051: RETI
    ];
    #[rustfmt::skip]
    let program: &[u8] = &[
        0x31, 0xFE, 0xFF, // 0100: LD SP, 0xFFFE
        0xAF,             // 0103: XOR A
        0xE0, 0x0F,       // 0104: LDH (IF), A
        0x3E, 0x04,       // 0106: LD A, 0x04
        0xE0, 0xFF,       // 0108: LDH (IE), A
        0x3E, 0xFE,       // 010A: LD A, 0xFE
        0xE0, 0x05,       // 010C: LDH (TIMA), A
        0x3E, 0x05,       // 010E: LD A, 0x05
        0xE0, 0x07,       // 0110: LDH (TAC), A
        0xAF,             // 0112: XOR A
        0xFB,             // 0113: EI
        0x76,             // 0114: HALT
        0x18, 0xFD,       // 0115: JR 0x0114
    ];
    let mut dmg = boot(rom_with(&[(0x0050, handler), (ENTRY, program)]));

    let mut guard = 0;
    while dmg.cpu().regs.b < 2 {
        dmg.step(None).unwrap();
        guard += 1;
        assert!(guard < 10_000, "timer interrupt never fired twice");
    }

    // Stopped inside the handler, before RETI.
    assert_eq!(dmg.cpu().regs.b, 2);
    assert_eq!(dmg.cpu().regs.pc, 0x0051);
    assert_eq!(dmg.cpu().regs.sp, 0xFFFC);
    // TMA is zero, so TIMA restarts from zero after each overflow.
    assert!(dmg.bus().timer().read(0xFF05) < 0x10);
}

#[test]
fn run_reports_accumulated_ticks() {
    // NOP ; JR -3 (back to the NOP)
    let mut dmg = boot(rom_with(&[(ENTRY, &[0x00u8, 0x18, 0xFD][..])]));

    let ticks = dmg.run(10, None).unwrap();

    assert_eq!(ticks, 5 * 4 + 5 * 12);
    assert_eq!(dmg.cpu().regs.pc, 0x0100);
}
