use thiserror::Error;

use crate::instruction::Mnemonic;

/// Fatal conditions raised by the core.
///
/// None of these are recovered from internally: the fetch-execute loop stops
/// at the first error and hands it back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DmgError {
    /// No table entry exists for the byte.
    #[error("unknown opcode 0x{opcode:02X} (cb-prefixed: {prefixed})")]
    UnknownOpcode { opcode: u8, prefixed: bool },

    /// One of the documented opcode holes that lock up the hardware.
    #[error("illegal instruction 0x{opcode:02X}")]
    IllegalInstruction { opcode: u8 },

    /// A handler received an operand it cannot act on. This always points at
    /// a bad table entry.
    #[error("invalid operand for {mnemonic}: {operand}")]
    InvalidOperand { mnemonic: Mnemonic, operand: String },

    /// Access to a reserved, echo or unusable address range.
    #[error("invalid bus access at 0x{addr:04X} ({region})")]
    BusAccess { addr: u16, region: &'static str },

    /// Documented instruction whose behaviour is not modelled.
    #[error("{mnemonic} is not implemented")]
    NotImplemented { mnemonic: Mnemonic },
}

pub type Result<T> = std::result::Result<T, DmgError>;
