use super::super::{ppu, serial::Serial, timer::Timer};
use super::SystemBus;

impl SystemBus {
    /// I/O registers as the DMG boot ROM leaves them at PC=0x0100.
    pub(super) fn apply_post_boot_io_state(&mut self) {
        self.timer = Timer::post_boot();
        self.serial = Serial::post_boot();

        // IF's upper 3 bits always read as 1 on DMG; the boot ROM leaves a
        // VBlank request behind.
        self.if_reg = 0x01;
        self.ie_reg = 0x00;

        // Sound registers: inert storage, but software can read them back.
        const SOUND_DEFAULTS: [(u16, u8); 21] = [
            (0xFF10, 0x80),
            (0xFF11, 0xBF),
            (0xFF12, 0xF3),
            (0xFF13, 0xFF),
            (0xFF14, 0xBF),
            (0xFF16, 0x3F),
            (0xFF17, 0x00),
            (0xFF18, 0xFF),
            (0xFF19, 0xBF),
            (0xFF1A, 0x7F),
            (0xFF1B, 0xFF),
            (0xFF1C, 0x9F),
            (0xFF1D, 0xFF),
            (0xFF1E, 0xBF),
            (0xFF20, 0xFF),
            (0xFF21, 0x00),
            (0xFF22, 0x00),
            (0xFF23, 0xBF),
            (0xFF24, 0x77),
            (0xFF25, 0xF3),
            (0xFF26, 0xF1),
        ];
        for (addr, value) in SOUND_DEFAULTS {
            self.memory[addr as usize] = value;
        }

        self.memory[ppu::LCDC as usize] = 0x91;
        self.memory[ppu::STAT as usize] = 0x85;
        self.memory[ppu::SCY as usize] = 0x00;
        self.memory[ppu::SCX as usize] = 0x00;
        self.memory[ppu::LYC as usize] = 0x00;
        self.memory[ppu::DMA as usize] = 0xFF;
        self.memory[ppu::BGP as usize] = 0xFC;
        // OBP0/OBP1 are officially uninitialised; leave them at 0.
        self.memory[ppu::WY as usize] = 0x00;
        self.memory[ppu::WX as usize] = 0x00;
        self.memory[super::BOOT_OFF as usize] = 0x01;
    }

    /// Fill WRAM and HRAM with a fixed-seed xorshift32 pattern, standing in
    /// for the undefined power-on contents while keeping runs reproducible.
    pub(super) fn randomize_internal_ram(&mut self) {
        let mut x: u32 = 0xC0DE_1234;
        let mut next_byte = || {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            x as u8
        };

        for addr in 0xC000..=0xDFFF {
            self.memory[addr] = next_byte();
        }
        // HRAM: 0xFF80–0xFFFE (IE at 0xFFFF is a separate register).
        for addr in 0xFF80..=0xFFFE {
            self.memory[addr] = next_byte();
        }
    }
}
