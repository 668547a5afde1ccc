//! Per-instruction trace hooks.
//!
//! The engine hands a [`StepTrace`] to the sink passed into
//! [`Cpu::step`](crate::cpu::Cpu::step) after each executed instruction.
//! Passing `None` runs silently.
use std::fmt;

use crate::cpu::Registers;
use crate::instruction::Instruction;

/// Snapshot of one executed instruction.
#[derive(Debug, Clone, Copy)]
pub struct StepTrace {
    /// Address the opcode was fetched from.
    pub pc: u16,
    /// Stack pointer before the instruction ran.
    pub sp: u16,
    pub opcode: u8,
    pub prefixed: bool,
    pub instruction: &'static Instruction,
    /// Register file after the instruction ran.
    pub regs: Registers,
    pub cycles: u32,
}

impl fmt::Display for StepTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.prefixed { "CB " } else { "" };
        let r = &self.regs;
        write!(
            f,
            "{:04X} - {:04X}: [{prefix}{:02X}] {:<16} A:{:02X} F:{:02X} B:{:02X} C:{:02X} D:{:02X} E:{:02X} H:{:02X} L:{:02X} SP:{:04X} PC:{:04X}",
            self.sp,
            self.pc,
            self.opcode,
            self.instruction.to_string(),
            r.a,
            r.f,
            r.b,
            r.c,
            r.d,
            r.e,
            r.h,
            r.l,
            r.sp,
            r.pc,
        )
    }
}

/// Observer of executed instructions. Sinks only read the snapshot.
pub trait TraceSink {
    fn on_step(&mut self, step: &StepTrace);
}

/// Forwards every step to `log::trace!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn on_step(&mut self, step: &StepTrace) {
        log::trace!("{step}");
    }
}

/// Collects every step; handy in tests.
impl TraceSink for Vec<StepTrace> {
    fn on_step(&mut self, step: &StepTrace) {
        self.push(*step);
    }
}
