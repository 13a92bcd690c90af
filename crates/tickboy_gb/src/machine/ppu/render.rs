use super::regs::*;
use super::{Ppu, BACKGROUND_SIZE, TILE_SHEET_WIDTH};
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

const TILE_COUNT: usize = 384;
const TILES_PER_ROW: usize = TILE_SHEET_WIDTH / 8;
const SPRITE_COUNT: u16 = 40;

#[inline]
fn map_base(high: bool) -> u16 {
    if high { 0x9C00 } else { 0x9800 }
}

/// Colour index at pixel (x, y) of a 256x256 tile-map layer.
fn map_pixel(memory: &[u8], map: u16, unsigned: bool, x: u8, y: u8) -> u8 {
    let tile_x = (x / 8) as u16;
    let tile_y = (y / 8) as u16;
    let index = memory[(map + tile_y * 32 + tile_x) as usize];
    let row = tile_address(index, unsigned) + (y & 7) as u16 * 2;
    pixel_color(memory[row as usize], memory[row as usize + 1], x & 7)
}

impl Ppu {
    /// Full-frame rasterisation from the current VRAM, OAM and register
    /// contents. Runs once per frame on VBlank entry.
    pub(super) fn render(&mut self, memory: &[u8]) {
        let lcdc = Lcdc::from_bits_retain(memory[LCDC as usize]);
        let bgp = memory[BGP as usize];
        let unsigned = lcdc.contains(Lcdc::TILE_DATA);
        let bg_map = map_base(lcdc.contains(Lcdc::BG_MAP));
        let window_map = map_base(lcdc.contains(Lcdc::WINDOW_MAP));

        self.render_tile_sheet(memory);
        render_layer(memory, bg_map, unsigned, bgp, &mut self.background);
        render_layer(memory, window_map, unsigned, bgp, &mut self.window);

        // Background/window colour indices, kept for sprite priority.
        let mut bg_colors = vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT];

        if lcdc.contains(Lcdc::BG_ENABLE) {
            let scx = memory[SCX as usize];
            let scy = memory[SCY as usize];
            let window_on = lcdc.contains(Lcdc::WINDOW_ENABLE);
            let wx = memory[WX as usize] as i16 - 7;
            let wy = memory[WY as usize] as i16;

            for y in 0..SCREEN_HEIGHT {
                for x in 0..SCREEN_WIDTH {
                    let (sx, sy) = (x as i16, y as i16);
                    let color = if window_on && sx >= wx && sy >= wy {
                        map_pixel(memory, window_map, unsigned, (sx - wx) as u8, (sy - wy) as u8)
                    } else {
                        let bx = (x as u8).wrapping_add(scx);
                        let by = (y as u8).wrapping_add(scy);
                        map_pixel(memory, bg_map, unsigned, bx, by)
                    };
                    let idx = y * SCREEN_WIDTH + x;
                    bg_colors[idx] = color;
                    self.display[idx] = shade(bgp, color);
                }
            }
        } else {
            // DMG: BG off blanks both background and window to white.
            self.display.fill(0);
        }

        if lcdc.contains(Lcdc::OBJ_ENABLE) {
            self.render_sprites(memory, lcdc, &bg_colors);
        }
    }

    fn render_sprites(&mut self, memory: &[u8], lcdc: Lcdc, bg_colors: &[u8]) {
        let height: i16 = if lcdc.contains(Lcdc::OBJ_TALL) { 16 } else { 8 };
        let obp0 = memory[OBP0 as usize];
        let obp1 = memory[OBP1 as usize];

        // Lower OAM indices win, so draw them last.
        for i in (0..SPRITE_COUNT).rev() {
            let base = (OAM_START + i * 4) as usize;
            let sprite = Sprite::from_bytes([
                memory[base],
                memory[base + 1],
                memory[base + 2],
                memory[base + 3],
            ]);
            if sprite.is_blank() {
                continue;
            }

            let (sx, sy) = sprite.screen_pos();
            if sx <= -8 || sx >= SCREEN_WIDTH as i16 || sy <= -height || sy >= SCREEN_HEIGHT as i16 {
                continue;
            }

            let tile = if height == 16 { sprite.tile & 0xFE } else { sprite.tile };
            let tile_base = tile_address(tile, true);
            let palette = if sprite.flags.contains(SpriteFlags::PALETTE) { obp1 } else { obp0 };

            for row in 0..height {
                let py = sy + row;
                if py < 0 || py >= SCREEN_HEIGHT as i16 {
                    continue;
                }
                let src_row = if sprite.flags.contains(SpriteFlags::FLIP_Y) {
                    height - 1 - row
                } else {
                    row
                };
                let row_addr = (tile_base + src_row as u16 * 2) as usize;
                let (lo, hi) = (memory[row_addr], memory[row_addr + 1]);

                for col in 0..8i16 {
                    let px = sx + col;
                    if px < 0 || px >= SCREEN_WIDTH as i16 {
                        continue;
                    }
                    let src_col = if sprite.flags.contains(SpriteFlags::FLIP_X) { 7 - col } else { col };
                    let color = pixel_color(lo, hi, src_col as u8);
                    // Colour 0 is transparent for sprites.
                    if color == 0 {
                        continue;
                    }
                    let idx = py as usize * SCREEN_WIDTH + px as usize;
                    if sprite.flags.contains(SpriteFlags::BEHIND_BG) && bg_colors[idx] != 0 {
                        continue;
                    }
                    self.display[idx] = shade(palette, color);
                }
            }
        }
    }

    /// All 384 tiles of 0x8000-0x97FF, 16 per row, identity palette.
    fn render_tile_sheet(&mut self, memory: &[u8]) {
        for tile in 0..TILE_COUNT {
            let base = 0x8000 + tile * 16;
            let origin_x = (tile % TILES_PER_ROW) * 8;
            let origin_y = (tile / TILES_PER_ROW) * 8;
            for row in 0..8 {
                let (lo, hi) = (memory[base + row * 2], memory[base + row * 2 + 1]);
                for col in 0..8 {
                    let color = pixel_color(lo, hi, col as u8);
                    self.tiles[(origin_y + row) * TILE_SHEET_WIDTH + origin_x + col] =
                        shade(IDENTITY_PALETTE, color);
                }
            }
        }
    }
}

fn render_layer(memory: &[u8], map: u16, unsigned: bool, palette: u8, target: &mut [u8]) {
    for y in 0..BACKGROUND_SIZE {
        for x in 0..BACKGROUND_SIZE {
            let color = map_pixel(memory, map, unsigned, x as u8, y as u8);
            target[y * BACKGROUND_SIZE + x] = shade(palette, color);
        }
    }
}
