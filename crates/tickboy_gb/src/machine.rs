mod bus;
mod gameboy;
mod ppu;
mod serial;
mod timer;

pub(crate) use bus::SystemBus;
pub use bus::{Buttons, Region};
pub use gameboy::{GameBoy, SysMode};
pub use ppu::{
    Mode as PpuMode, BACKGROUND_SIZE, TILE_SHEET_HEIGHT, TILE_SHEET_WIDTH,
};

/// Total addressable memory for the Game Boy (64 KiB).
///
/// The bus keeps one flat byte buffer; `Region` decides which part of it
/// (or which side component) an address resolves to.
const MEMORY_SIZE: usize = 0x10000;
