//! Sharp LR35902 (Game Boy DMG) CPU core.
//!
//! The crate decodes and executes the full documented instruction set against
//! a memory bus that models the DMG address map, the interrupt controller,
//! the timer/divider and a serial debug sink. Video, audio, joypad and
//! bank-switching hardware are reduced to fixed-value stubs.
pub mod arith;
pub mod config;
pub mod cpu;
pub mod error;
pub mod instruction;
pub mod machine;
pub mod trace;

pub use config::MachineConfig;
pub use cpu::Cpu;
pub use error::{DmgError, Result};
pub use machine::Dmg;
