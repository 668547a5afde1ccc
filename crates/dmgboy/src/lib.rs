//! Host runner for the `dmgboy_core` CPU core.
//!
//! Loads a ROM image from disk, boots a [`Dmg`] with it and steps until a step
//! budget runs out, the CPU stalls in HALT, or the core reports an error.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dmgboy_core::machine::FlatCartridge;
use dmgboy_core::trace::{StepTrace, TraceSink};
use dmgboy_core::{Dmg, MachineConfig};
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, TypedBuilder)]
pub struct RunConfig {
    #[builder(setter(into))]
    pub rom_path: PathBuf,
    /// Stop after this many steps; `None` runs until a stall or an error.
    #[builder(default)]
    pub max_steps: Option<u64>,
    /// Print every executed instruction to stdout.
    #[builder(default = false)]
    pub trace: bool,
    #[builder(default = false)]
    pub serial_echo: bool,
}

/// Outcome of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u64,
    pub ticks: u64,
    pub serial: Vec<u8>,
}

/// Writes one line per executed instruction.
#[derive(Debug, Default)]
pub struct StdoutTrace;

impl TraceSink for StdoutTrace {
    fn on_step(&mut self, step: &StepTrace) {
        println!("{step}");
    }
}

pub fn load_rom(path: &Path) -> Result<Vec<u8>> {
    let rom = std::fs::read(path)
        .with_context(|| format!("failed to read ROM file '{}'", path.display()))?;
    log::info!("Loaded ROM '{}' ({} bytes)", path.display(), rom.len());
    Ok(rom)
}

pub fn run(config: RunConfig) -> Result<RunSummary> {
    let rom = load_rom(&config.rom_path)?;
    let machine_config = MachineConfig::builder()
        .serial_echo(config.serial_echo)
        .build();
    let mut dmg = Dmg::new(Box::new(FlatCartridge::new(rom)), machine_config);
    let mut sink = StdoutTrace;

    let mut steps = 0u64;
    let mut ticks = 0u64;
    while config.max_steps.map_or(true, |max| steps < max) {
        if dmg.is_stalled() {
            log::info!(
                "CPU halted with no interrupt source enabled at PC=0x{:04X}",
                dmg.cpu().regs.pc
            );
            break;
        }

        let trace: Option<&mut dyn TraceSink> = if config.trace {
            Some(&mut sink)
        } else {
            None
        };
        let cycles = dmg.step(trace).with_context(|| {
            format!(
                "execution stopped after {steps} steps at PC=0x{:04X}",
                dmg.cpu().regs.pc
            )
        })?;
        ticks += cycles as u64;
        steps += 1;
    }

    log::info!("Finished after {steps} steps ({ticks} ticks)");
    Ok(RunSummary {
        steps,
        ticks,
        serial: dmg.serial_output().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_rom(name: &str, program: &[u8]) -> PathBuf {
        let mut rom = vec![0; 0x8000];
        rom[0x0100..0x0100 + program.len()].copy_from_slice(program);
        let path = std::env::temp_dir().join(format!("dmgboy-{}-{name}.gb", std::process::id()));
        std::fs::write(&path, rom).unwrap();
        path
    }

    #[test]
    fn runs_until_halt_stalls() {
        #[rustfmt::skip]
        let path = write_rom("serial", &[
            0x3E, b'A', // LD A, 'A'
            0xE0, 0x01, // LDH (SB), A
            0x3E, 0x81, // LD A, 0x81
            0xE0, 0x02, // LDH (SC), A
            0x76,       // HALT
        ]);
        let config = RunConfig::builder().rom_path(path.clone()).build();

        let summary = run(config).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(
            summary,
            RunSummary {
                steps: 5,
                ticks: 8 + 12 + 8 + 12 + 4,
                serial: b"A".to_vec(),
            }
        );
    }

    #[test]
    fn step_budget_is_respected() {
        // JR -2 (spin)
        let path = write_rom("spin", &[0x18, 0xFE]);
        let config = RunConfig::builder()
            .rom_path(path.clone())
            .max_steps(Some(3))
            .build();

        let summary = run(config).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(summary.steps, 3);
        assert_eq!(summary.ticks, 36);
    }

    #[test]
    fn core_errors_carry_context() {
        let path = write_rom("illegal", &[0x00, 0xFD]);
        let config = RunConfig::builder().rom_path(path.clone()).build();

        let err = run(config).unwrap_err();
        std::fs::remove_file(path).ok();

        assert_eq!(
            err.to_string(),
            "execution stopped after 1 steps at PC=0x0102"
        );
        assert_eq!(err.root_cause().to_string(), "illegal instruction 0xFD");
    }

    #[test]
    fn missing_rom_is_reported() {
        let config = RunConfig::builder()
            .rom_path("/nonexistent/dmgboy/rom.gb")
            .build();
        let err = run(config).unwrap_err();
        assert!(err.to_string().contains("failed to read ROM file"));
    }
}
