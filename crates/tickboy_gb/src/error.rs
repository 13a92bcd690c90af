use thiserror::Error;

/// Terminal conditions of the emulated machine.
///
/// Any of these puts the machine into its fatal state: once a step has
/// reported a fault, no further cycles are executed until `reset`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// One of the opcode holes (D3, DB, DD, E3, E4, EB, EC, ED, F4, FC, FD).
    #[error("illegal opcode 0x{opcode:02X} at PC=0x{pc:04X}")]
    IllegalOpcode { opcode: u8, pc: u16 },

    /// An instruction reported a zero length or zero duration. This is an
    /// emulator bug rather than a guest condition.
    #[error("opcode 0x{opcode:02X} at PC=0x{pc:04X} reported length={length} duration={duration}")]
    CycleAccounting {
        opcode: u8,
        pc: u16,
        length: u16,
        duration: u32,
    },

    /// Execution ran past the end of the attached cartridge image.
    #[error("PC=0x{pc:04X} ran past the end of the cartridge ({cart_len} bytes)")]
    PcOutOfRange { pc: u16, cart_len: usize },

    /// A step was requested after the machine had already faulted.
    #[error("machine is halted after an earlier fault: {0}")]
    Halted(String),
}
