pub mod config;
pub mod cpu;
pub mod error;
pub mod machine;

pub use config::MachineConfig;
pub use error::Fault;
pub use machine::{Buttons, GameBoy, SysMode};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
/// Clock cycles in one full DMG frame (154 lines of 456 dots).
pub const CYCLES_PER_FRAME: u32 = 70_224;
