use super::super::ppu::{Lcdc, Stat, DMA, LCDC, LY, LYC, STAT};
use super::super::timer;
use super::{Region, SystemBus, BOOT_OFF};
use crate::cpu::{InterruptFlags, IF_ADDR};

const JOYP: u16 = 0xFF00;
const SB: u16 = 0xFF01;
const SC: u16 = 0xFF02;

impl SystemBus {
    pub(super) fn read8_mmio(&self, addr: u16) -> u8 {
        match Region::of(addr) {
            Region::Cartridge => {
                if let Some(boot) = &self.boot {
                    if addr < 0x0100 {
                        return boot[addr as usize];
                    }
                }
                // Past the end of the image the bus floats high.
                self.cart.get(addr as usize).copied().unwrap_or(0xFF)
            }
            Region::Unusable => 0xFF,
            Region::Io => self.read_io(addr),
            Region::InterruptEnable => self.ie_reg,
            _ => self.memory[Region::backing(addr) as usize],
        }
    }

    pub(super) fn write8_mmio(&mut self, addr: u16, value: u8) {
        match Region::of(addr) {
            // The cartridge is ROM: CPU writes have no effect.
            Region::Cartridge | Region::Unusable => {}
            Region::Io => self.write_io(addr, value),
            Region::InterruptEnable => self.ie_reg = value,
            _ => self.memory[Region::backing(addr) as usize] = value,
        }
    }

    fn read_io(&self, addr: u16) -> u8 {
        match addr {
            JOYP => self.read_joyp(),
            SB => self.serial.sb,
            SC => self.serial.read_sc(),
            timer::DIV..=timer::TAC => self.timer.read(addr),
            // Upper 3 bits always read as 1.
            IF_ADDR => self.if_reg | 0b1110_0000,
            _ => self.memory[addr as usize],
        }
    }

    fn write_io(&mut self, addr: u16, value: u8) {
        match addr {
            JOYP => self.write_joyp(value),
            SB => self.serial.sb = value,
            SC => {
                if self.serial.write_sc(value) {
                    self.if_reg |= InterruptFlags::SERIAL.bits();
                }
            }
            timer::DIV..=timer::TAC => self.timer.write(addr, value),
            IF_ADDR => self.if_reg = value & 0x1F,

            LCDC => {
                let was_on = Lcdc::from_bits_retain(self.memory[LCDC as usize])
                    .contains(Lcdc::LCD_ENABLE);
                let now_on = Lcdc::from_bits_retain(value).contains(Lcdc::LCD_ENABLE);
                self.memory[LCDC as usize] = value;
                if was_on && !now_on {
                    self.ppu.disable(&mut self.memory);
                } else if !was_on && now_on {
                    // Back on at dot 0: STAT reports OAM search straight away.
                    self.ppu.sync(&mut self.memory);
                }
            }
            // Mode and coincidence bits are read-only.
            STAT => {
                let stat = self.memory[STAT as usize];
                self.memory[STAT as usize] =
                    (stat & !Stat::WRITABLE) | (value & Stat::WRITABLE);
            }
            // LY is read-only.
            LY => {}
            LYC => self.ppu.write_lyc(&mut self.memory, &mut self.if_reg, value),
            DMA => self.do_oam_dma(value),

            BOOT_OFF => {
                self.memory[BOOT_OFF as usize] = value;
                if self.boot.take().is_some() {
                    log::debug!("GB bus: boot overlay retired (0xFF50 <- 0x{value:02X})");
                }
            }

            // Sound block and the rest of the I/O page are plain storage.
            _ => self.memory[addr as usize] = value,
        }
    }
}
