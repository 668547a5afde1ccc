mod bus;
mod cartridge;
mod dmg;
mod interrupt;
mod serial;
mod timer;

pub use bus::MemoryBus;
pub use cartridge::{Cartridge, FlatCartridge};
pub use dmg::Dmg;
pub use interrupt::{Interrupt, InterruptController, InterruptFlags};
pub use serial::Serial;
pub use timer::Timer;

#[cfg(test)]
mod tests;
