use typed_builder::TypedBuilder;

/// Knobs for the parts of the machine that are not modelled.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct MachineConfig {
    /// Value returned by reads from stubbed hardware (video, audio, joypad
    /// and unassigned I/O).
    #[builder(default = 0x00)]
    pub stub_value: u8,
    /// Fixed LY (`0xFF44`) reading. 0x90 is line 144, the first VBlank line,
    /// so code that waits for VBlank falls through.
    #[builder(default = 0x90)]
    pub ly_value: u8,
    /// Log every serial byte at `info` level.
    #[builder(default = false)]
    pub serial_echo: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
