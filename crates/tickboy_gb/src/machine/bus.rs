use super::{ppu::Ppu, serial::Serial, timer::Timer, MEMORY_SIZE};
use crate::config::{MachineConfig, BOOT_IMAGE_SIZE};
use crate::cpu::Bus;

mod dma;
mod init;
mod joypad;
mod mmio;
mod region;

pub use joypad::Buttons;
pub use region::Region;

/// Address that retires the boot overlay when written.
pub(crate) const BOOT_OFF: u16 = 0xFF50;

/// The DMG system bus.
///
/// Owns every addressable byte plus the components that sit behind the
/// I/O block (timer, PPU, serial, joypad). The cartridge image is kept
/// separately so that it can never be written through the bus.
#[derive(Clone, Debug)]
pub(crate) struct SystemBus {
    pub(crate) memory: Vec<u8>,
    cart: Vec<u8>,
    boot: Option<[u8; BOOT_IMAGE_SIZE]>,
    pub(crate) if_reg: u8,
    pub(crate) ie_reg: u8,
    pub(crate) timer: Timer,
    pub(crate) ppu: Ppu,
    pub(crate) serial: Serial,
    // Joypad: currently held inputs and the P14/P15 select bits written
    // by software (0 = line selected).
    buttons: Buttons,
    joyp_select: u8,
}

impl SystemBus {
    pub(crate) fn new(cart: Vec<u8>, config: &MachineConfig) -> Self {
        let mut bus = Self {
            memory: vec![0; MEMORY_SIZE],
            cart,
            boot: None,
            if_reg: 0,
            ie_reg: 0,
            timer: Timer::default(),
            ppu: Ppu::default(),
            serial: Serial::default(),
            buttons: Buttons::empty(),
            joyp_select: 0x30,
        };
        bus.power_on(config);
        bus
    }

    /// Bring every component back to its power-on state, keeping the
    /// cartridge.
    pub(crate) fn power_on(&mut self, config: &MachineConfig) {
        self.memory.fill(0);
        self.boot = config.boot_rom();
        self.if_reg = 0;
        self.ie_reg = 0;
        self.timer = Timer::default();
        self.ppu = Ppu::default();
        self.serial = Serial::default();
        self.buttons = Buttons::empty();
        self.joyp_select = 0x30;

        if !config.zero_ram {
            self.randomize_internal_ram();
        }
        if self.boot.is_none() {
            self.apply_post_boot_io_state();
        }
        self.ppu.sync(&mut self.memory);
    }

    #[inline]
    pub(crate) fn cart_len(&self) -> usize {
        self.cart.len()
    }

    /// True while reads of 0x0000-0x00FF are served by the boot image.
    #[inline]
    pub(crate) fn boot_active(&self) -> bool {
        self.boot.is_some()
    }

    /// Side-effect free read, used by the host-facing accessors.
    pub(crate) fn peek(&self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }
}

impl Bus for SystemBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value)
    }

    fn tick(&mut self, cycles: u32) {
        self.timer.step(cycles, &mut self.if_reg);
        self.ppu.step(&mut self.memory, &mut self.if_reg, cycles);
    }
}
