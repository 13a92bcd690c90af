use bitflags::bitflags;

pub(crate) const LCDC: u16 = 0xFF40;
pub(crate) const STAT: u16 = 0xFF41;
pub(crate) const SCY: u16 = 0xFF42;
pub(crate) const SCX: u16 = 0xFF43;
pub(crate) const LY: u16 = 0xFF44;
pub(crate) const LYC: u16 = 0xFF45;
pub(crate) const DMA: u16 = 0xFF46;
pub(crate) const BGP: u16 = 0xFF47;
pub(crate) const OBP0: u16 = 0xFF48;
pub(crate) const OBP1: u16 = 0xFF49;
pub(crate) const WY: u16 = 0xFF4A;
pub(crate) const WX: u16 = 0xFF4B;

pub(crate) const OAM_START: u16 = 0xFE00;
pub(crate) const OAM_SIZE: u16 = 0xA0;

bitflags! {
    /// LCD control register (LCDC, $FF40).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) struct Lcdc: u8 {
        const BG_ENABLE = 1 << 0;
        const OBJ_ENABLE = 1 << 1;
        /// 8x16 sprites.
        const OBJ_TALL = 1 << 2;
        /// Background map at 0x9C00 instead of 0x9800.
        const BG_MAP = 1 << 3;
        /// Unsigned tile addressing from 0x8000 instead of signed from 0x9000.
        const TILE_DATA = 1 << 4;
        const WINDOW_ENABLE = 1 << 5;
        /// Window map at 0x9C00 instead of 0x9800.
        const WINDOW_MAP = 1 << 6;
        const LCD_ENABLE = 1 << 7;
    }
}

bitflags! {
    /// Writable and flag bits of the LCD status register (STAT, $FF41).
    /// Bits 0-1 hold the current mode.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) struct Stat: u8 {
        const COINCIDENCE = 1 << 2;
        const HBLANK_INT = 1 << 3;
        const VBLANK_INT = 1 << 4;
        const OAM_INT = 1 << 5;
        const LYC_INT = 1 << 6;
    }
}

impl Stat {
    pub(crate) const WRITABLE: u8 = 0b0111_1000;
}

bitflags! {
    /// Attribute byte of an OAM entry.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) struct SpriteFlags: u8 {
        /// Use OBP1 instead of OBP0.
        const PALETTE = 1 << 4;
        const FLIP_X = 1 << 5;
        const FLIP_Y = 1 << 6;
        /// Hidden behind background colours 1-3.
        const BEHIND_BG = 1 << 7;
    }
}

/// One 4-byte OAM descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Sprite {
    pub(crate) y: u8,
    pub(crate) x: u8,
    pub(crate) tile: u8,
    pub(crate) flags: SpriteFlags,
}

impl Sprite {
    pub(crate) fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            y: bytes[0],
            x: bytes[1],
            tile: bytes[2],
            flags: SpriteFlags::from_bits_retain(bytes[3]),
        }
    }

    /// Screen position after removing the OAM bias (X-8, Y-16).
    pub(crate) fn screen_pos(&self) -> (i16, i16) {
        (self.x as i16 - 8, self.y as i16 - 16)
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.y == 0 && self.x == 0 && self.tile == 0 && self.flags.is_empty()
    }
}

/// Map a 2-bit colour index through a BGP/OBP palette to a shade 0-3
/// (0 = lightest).
#[inline]
pub(crate) fn shade(palette: u8, color: u8) -> u8 {
    (palette >> ((color & 0x03) * 2)) & 0x03
}

/// Identity palette used for the tile sheet debug view.
pub(crate) const IDENTITY_PALETTE: u8 = 0b11_10_01_00;

/// Address of the first byte of a background/window tile.
///
/// With `unsigned` set the index counts up from 0x8000; otherwise it is a
/// signed offset from 0x9000, so 0x80-0xFF land in 0x8800-0x8FFF.
#[inline]
pub(crate) fn tile_address(index: u8, unsigned: bool) -> u16 {
    if unsigned {
        0x8000 + index as u16 * 16
    } else {
        0x9000u16.wrapping_add_signed(index as i8 as i16 * 16)
    }
}

/// Colour index (0-3) of pixel `x` in a tile row given its two bitplanes.
#[inline]
pub(crate) fn pixel_color(lo: u8, hi: u8, x: u8) -> u8 {
    let bit = 7 - (x & 7);
    (((hi >> bit) & 0x01) << 1) | ((lo >> bit) & 0x01)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_addressing_wraps_below_9000() {
        assert_eq!(tile_address(0x00, true), 0x8000);
        assert_eq!(tile_address(0xFF, true), 0x8FF0);
        assert_eq!(tile_address(0x00, false), 0x9000);
        assert_eq!(tile_address(0x7F, false), 0x97F0);
        assert_eq!(tile_address(0x80, false), 0x8800);
        assert_eq!(tile_address(0xFF, false), 0x8FF0);
    }

    #[test]
    fn palette_maps_each_colour_pair() {
        assert_eq!(shade(0xE4, 0), 0);
        assert_eq!(shade(0xE4, 3), 3);
        assert_eq!(shade(0x1B, 0), 3);
        assert_eq!(shade(0x1B, 3), 0);
    }

    #[test]
    fn pixel_color_combines_bitplanes_msb_first() {
        assert_eq!(pixel_color(0x80, 0x00, 0), 1);
        assert_eq!(pixel_color(0x00, 0x80, 0), 2);
        assert_eq!(pixel_color(0x01, 0x01, 7), 3);
    }
}
