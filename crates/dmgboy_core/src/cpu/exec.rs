mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use crate::error::Result;
use crate::instruction::{Instruction, Mnemonic};

use super::{Bus, Cpu};

impl Cpu {
    /// Execute a decoded instruction and return the number of system ticks
    /// it consumed.
    ///
    /// Operand bytes are fetched by the handlers as they resolve operands,
    /// so PC points past the whole instruction once this returns.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> Result<u32> {
        let cycles = match instr.mnemonic {
            Mnemonic::Nop | Mnemonic::Prefix => instr.cycles as u32,
            Mnemonic::Halt => self.exec_halt(instr),
            Mnemonic::Stop => self.exec_stop(bus, instr)?,
            Mnemonic::Di | Mnemonic::Ei => self.exec_di_ei(bus, instr),

            Mnemonic::Ld | Mnemonic::Ldh => self.exec_ld(bus, instr)?,
            Mnemonic::Push => self.exec_push(bus, instr)?,
            Mnemonic::Pop => self.exec_pop(bus, instr)?,

            Mnemonic::Inc | Mnemonic::Dec => self.exec_inc_dec(bus, instr)?,
            Mnemonic::Add
            | Mnemonic::Adc
            | Mnemonic::Sub
            | Mnemonic::Sbc
            | Mnemonic::And
            | Mnemonic::Xor
            | Mnemonic::Or
            | Mnemonic::Cp => self.exec_alu(bus, instr)?,
            Mnemonic::Daa | Mnemonic::Cpl | Mnemonic::Scf | Mnemonic::Ccf => {
                self.exec_accumulator(instr)
            }

            Mnemonic::Rlca | Mnemonic::Rrca | Mnemonic::Rla | Mnemonic::Rra => {
                self.exec_rotate_a(instr)?
            }
            Mnemonic::Rlc
            | Mnemonic::Rrc
            | Mnemonic::Rl
            | Mnemonic::Rr
            | Mnemonic::Sla
            | Mnemonic::Sra
            | Mnemonic::Swap
            | Mnemonic::Srl => self.exec_shift(bus, instr)?,
            Mnemonic::Bit => self.exec_bit(bus, instr)?,
            Mnemonic::Res | Mnemonic::Set => self.exec_res_set(bus, instr)?,

            Mnemonic::Jp | Mnemonic::Jr => self.exec_jump(bus, instr)?,
            Mnemonic::Call => self.exec_call(bus, instr)?,
            Mnemonic::Rst => self.exec_rst(bus, instr)?,
            Mnemonic::Ret | Mnemonic::Reti => self.exec_ret(bus, instr)?,
        };

        self.apply_hl_step(instr.operands);
        Ok(cycles)
    }
}
