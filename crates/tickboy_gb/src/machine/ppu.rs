mod regs;
mod render;

pub(crate) use regs::*;

use crate::cpu::InterruptFlags;
use crate::{CYCLES_PER_FRAME, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Dots per scanline.
pub const DOTS_PER_LINE: u32 = 456;
/// First scanline of vertical blank.
pub const VBLANK_LINE: u32 = 144;
/// Width and height of the background and window layers.
pub const BACKGROUND_SIZE: usize = 256;
/// Tile sheet: 384 tiles, 16 per row.
pub const TILE_SHEET_WIDTH: usize = 128;
pub const TILE_SHEET_HEIGHT: usize = 192;

const OAM_SEARCH_END: u32 = 80;
const TRANSFER_END: u32 = 291;

/// PPU mode as reported in STAT bits 0-1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamSearch = 2,
    Transfer = 3,
}

impl Mode {
    /// Mode for a position in the frame, in dots since LY=0 began.
    pub fn at(dots: u32) -> Mode {
        if dots / DOTS_PER_LINE >= VBLANK_LINE {
            return Mode::VBlank;
        }
        let line_dot = dots % DOTS_PER_LINE;
        if line_dot < OAM_SEARCH_END {
            Mode::OamSearch
        } else if line_dot < TRANSFER_END {
            Mode::Transfer
        } else {
            Mode::HBlank
        }
    }

    pub fn from_stat(stat: u8) -> Mode {
        match stat & 0x03 {
            0 => Mode::HBlank,
            1 => Mode::VBlank,
            2 => Mode::OamSearch,
            _ => Mode::Transfer,
        }
    }

    /// STAT select bit that raises INT $48 on entry into this mode.
    fn interrupt_select(self) -> Option<Stat> {
        match self {
            Mode::HBlank => Some(Stat::HBLANK_INT),
            Mode::VBlank => Some(Stat::VBLANK_INT),
            Mode::OamSearch => Some(Stat::OAM_INT),
            Mode::Transfer => None,
        }
    }
}

/// Dot-counter driven LCD controller.
///
/// The PPU control block itself lives in the bus's I/O bytes; this struct
/// only owns the timing state and the rendered buffers. Each buffer holds
/// one shade (0-3) per pixel.
#[derive(Clone, Debug)]
pub(crate) struct Ppu {
    dots: u32,
    mode: Mode,
    coincidence: bool,
    frames: u64,
    pub(crate) display: Vec<u8>,
    pub(crate) background: Vec<u8>,
    pub(crate) window: Vec<u8>,
    pub(crate) tiles: Vec<u8>,
}

impl Default for Ppu {
    fn default() -> Self {
        Self {
            dots: 0,
            mode: Mode::OamSearch,
            coincidence: false,
            frames: 0,
            display: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
            background: vec![0; BACKGROUND_SIZE * BACKGROUND_SIZE],
            window: vec![0; BACKGROUND_SIZE * BACKGROUND_SIZE],
            tiles: vec![0; TILE_SHEET_WIDTH * TILE_SHEET_HEIGHT],
        }
    }
}

impl Ppu {
    #[inline]
    pub(crate) fn dots(&self) -> u32 {
        self.dots
    }

    /// Frames completed (VBlank entries) since power-on.
    #[inline]
    pub(crate) fn frames(&self) -> u64 {
        self.frames
    }

    /// Write LY and the STAT mode/coincidence bits for the current dot
    /// position without raising interrupts.
    pub(crate) fn sync(&mut self, memory: &mut [u8]) {
        let lcd_on = lcdc(memory).contains(Lcdc::LCD_ENABLE);
        self.mode = if lcd_on { Mode::at(self.dots) } else { Mode::HBlank };
        memory[LY as usize] = (self.dots / DOTS_PER_LINE) as u8;
        self.coincidence = memory[LY as usize] == memory[LYC as usize];
        self.write_stat_bits(memory);
    }

    /// Advance by `cycles` dots, requesting STAT and VBlank interrupts in
    /// `if_reg` as mode boundaries are crossed.
    pub(crate) fn step(&mut self, memory: &mut [u8], if_reg: &mut u8, cycles: u32) {
        if !lcdc(memory).contains(Lcdc::LCD_ENABLE) {
            if self.dots != 0 || self.mode != Mode::HBlank {
                self.disable(memory);
            }
            return;
        }

        for _ in 0..cycles {
            self.tick_dot(memory, if_reg);
        }
    }

    /// LCD switched off: LY=0, mode 0 and the dot counter restarts.
    pub(crate) fn disable(&mut self, memory: &mut [u8]) {
        log::debug!("GB PPU: LCD off at LY={}", memory[LY as usize]);
        self.dots = 0;
        self.sync(memory);
    }

    /// LYC write: the coincidence bit tracks the new compare value at once,
    /// and a rising match requests the STAT interrupt while the LCD is on.
    pub(crate) fn write_lyc(&mut self, memory: &mut [u8], if_reg: &mut u8, value: u8) {
        memory[LYC as usize] = value;
        let coincidence = memory[LY as usize] == value;
        let stat = Stat::from_bits_truncate(memory[STAT as usize]);
        if coincidence
            && !self.coincidence
            && stat.contains(Stat::LYC_INT)
            && lcdc(memory).contains(Lcdc::LCD_ENABLE)
        {
            *if_reg |= InterruptFlags::LCD_STAT.bits();
        }
        self.coincidence = coincidence;
        self.write_stat_bits(memory);
    }

    fn tick_dot(&mut self, memory: &mut [u8], if_reg: &mut u8) {
        self.dots = (self.dots + 1) % CYCLES_PER_FRAME;
        memory[LY as usize] = (self.dots / DOTS_PER_LINE) as u8;

        let stat = Stat::from_bits_truncate(memory[STAT as usize]);
        let mode = Mode::at(self.dots);
        if mode != self.mode {
            self.mode = mode;
            if mode == Mode::VBlank {
                *if_reg |= InterruptFlags::VBLANK.bits();
                self.frames += 1;
                log::debug!("GB PPU: VBlank, frame {}", self.frames);
                self.render(memory);
            }
            if mode.interrupt_select().is_some_and(|select| stat.contains(select)) {
                *if_reg |= InterruptFlags::LCD_STAT.bits();
            }
        }

        let coincidence = memory[LY as usize] == memory[LYC as usize];
        if coincidence && !self.coincidence && stat.contains(Stat::LYC_INT) {
            *if_reg |= InterruptFlags::LCD_STAT.bits();
        }
        self.coincidence = coincidence;

        self.write_stat_bits(memory);
    }

    fn write_stat_bits(&self, memory: &mut [u8]) {
        let mut stat = memory[STAT as usize] & Stat::WRITABLE;
        stat |= self.mode as u8;
        if self.coincidence {
            stat |= Stat::COINCIDENCE.bits();
        }
        memory[STAT as usize] = 0x80 | stat;
    }
}

#[inline]
fn lcdc(memory: &[u8]) -> Lcdc {
    Lcdc::from_bits_retain(memory[LCDC as usize])
}
