use crate::config::MachineConfig;
use crate::cpu::{Bus, Cpu, Registers};
use crate::error::Fault;
use crate::CYCLES_PER_FRAME;

use super::{Buttons, SystemBus};

/// Coarse machine state, as a frontend would display it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SysMode {
    Normal,
    /// HALT: no instructions fetched, timer and PPU keep running.
    Halt,
    /// STOP: everything frozen until an enabled interrupt is requested.
    Stop,
    /// A fault ended execution; only `reset` leaves this state.
    Fatal,
}

/// High-level Game Boy machine.
///
/// Holds the CPU core and the bus and drives them in lock-step: every
/// step services an interrupt or executes one instruction, advances the
/// timer and PPU by the cycles it took, then checks the breakpoint.
pub struct GameBoy {
    pub(crate) cpu: Cpu,
    pub(crate) bus: SystemBus,
    config: MachineConfig,
    breakpoint: Option<u16>,
    fault: Option<Fault>,
}

impl GameBoy {
    /// Machine with the default configuration: no boot image, so it starts
    /// in the post-boot state at PC=0x0100.
    pub fn new(cart: Vec<u8>) -> Self {
        Self::with_config(cart, MachineConfig::default())
    }

    pub fn with_config(cart: Vec<u8>, config: MachineConfig) -> Self {
        log::info!(
            "GB: attaching {} byte cartridge (boot image: {})",
            cart.len(),
            config.boot_image.is_some()
        );
        let bus = SystemBus::new(cart, &config);
        let mut gb = Self {
            cpu: Cpu::new(),
            bus,
            breakpoint: config.breakpoint,
            config,
            fault: None,
        };
        gb.reset_cpu();
        gb
    }

    /// Return to the power-on state. The cartridge and configuration are
    /// kept, including the configured breakpoint.
    pub fn reset(&mut self) {
        log::info!("GB: reset");
        self.bus.power_on(&self.config);
        self.breakpoint = self.config.breakpoint;
        self.fault = None;
        self.reset_cpu();
    }

    fn reset_cpu(&mut self) {
        let regs = if self.bus.boot_active() {
            Registers::default()
        } else {
            Registers::post_boot()
        };
        self.cpu.reset(regs);
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn mode(&self) -> SysMode {
        if self.fault.is_some() {
            SysMode::Fatal
        } else if self.cpu.is_stopped() {
            SysMode::Stop
        } else if self.cpu.halted {
            SysMode::Halt
        } else {
            SysMode::Normal
        }
    }

    /// The fault that ended execution, if any.
    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    pub fn breakpoint(&self) -> Option<u16> {
        self.breakpoint
    }

    pub fn set_breakpoint(&mut self, breakpoint: Option<u16>) {
        self.breakpoint = breakpoint;
    }

    /// One driving step: an interrupt dispatch, one instruction, or one
    /// idle HALT/STOP slice. Returns the clock cycles consumed.
    pub fn step(&mut self) -> Result<u32, Fault> {
        if let Some(fault) = &self.fault {
            return Err(Fault::Halted(fault.to_string()));
        }

        if !self.cpu.halted && !self.cpu.is_stopped() {
            self.check_pc()?;
        }

        self.cpu.step(&mut self.bus).map_err(|fault| self.enter_fatal(fault))
    }

    /// Run until at least `budget` cycles were consumed or PC reaches the
    /// breakpoint. Returns the cycles actually consumed, so a caller can
    /// resume from exactly this point. Cycles reported while the CPU sits
    /// in STOP are nominal: the timer and PPU do not advance during them.
    pub fn step_cycles(&mut self, budget: u32) -> Result<u32, Fault> {
        self.run(budget).map(|(cycles, _)| cycles)
    }

    /// Run `frames` full frames, stopping early at the breakpoint.
    pub fn step_frames(&mut self, frames: u32) -> Result<u32, Fault> {
        let mut total = 0;
        for _ in 0..frames {
            let (cycles, hit_breakpoint) = self.run(CYCLES_PER_FRAME)?;
            total += cycles;
            if hit_breakpoint {
                break;
            }
        }
        Ok(total)
    }

    fn run(&mut self, budget: u32) -> Result<(u32, bool), Fault> {
        let mut consumed = 0u32;
        while consumed < budget {
            consumed += self.step()?;
            if self.breakpoint == Some(self.cpu.regs.pc) {
                log::debug!("GB: breakpoint at PC=0x{:04X}", self.cpu.regs.pc);
                return Ok((consumed, true));
            }
        }
        Ok((consumed, false))
    }

    /// Execution may not run off the end of the cartridge image. Jumps
    /// into RAM, and the boot overlay while it is mapped, are fine.
    fn check_pc(&mut self) -> Result<(), Fault> {
        let pc = self.cpu.regs.pc;
        let in_boot = self.bus.boot_active() && pc < 0x0100;
        if pc < 0x8000 && !in_boot && pc as usize >= self.bus.cart_len() {
            let fault = Fault::PcOutOfRange {
                pc,
                cart_len: self.bus.cart_len(),
            };
            return Err(self.enter_fatal(fault));
        }
        Ok(())
    }

    fn enter_fatal(&mut self, fault: Fault) -> Fault {
        if self.fault.is_none() {
            log::error!("GB: fatal: {fault}");
            self.fault = Some(fault.clone());
        }
        fault
    }

    pub fn buttons(&self) -> Buttons {
        self.bus.buttons()
    }

    /// Set the currently held buttons and directions.
    pub fn set_buttons(&mut self, buttons: Buttons) {
        self.bus.set_buttons(buttons);
    }

    /// Read a byte as the CPU would see it, without advancing time.
    pub fn read(&self, addr: u16) -> u8 {
        self.bus.peek(addr)
    }

    /// Write a byte through the bus, with the same side effects as a CPU
    /// store (DMA trigger, boot overlay retirement, ...).
    pub fn write(&mut self, addr: u16, value: u8) {
        self.bus.write8(addr, value);
    }

    /// 160x144 display, one shade (0-3) per pixel, row-major. Updated in
    /// place once per frame on VBlank entry.
    pub fn display(&self) -> &[u8] {
        &self.bus.ppu.display
    }

    /// 256x256 background layer from the last rendered frame.
    pub fn background(&self) -> &[u8] {
        &self.bus.ppu.background
    }

    /// 256x256 window layer from the last rendered frame.
    pub fn window(&self) -> &[u8] {
        &self.bus.ppu.window
    }

    /// All 384 VRAM tiles as a 128x192 sheet.
    pub fn tile_data(&self) -> &[u8] {
        &self.bus.ppu.tiles
    }

    /// Bytes sent over the serial port so far.
    pub fn serial_output(&self) -> &[u8] {
        &self.bus.serial.output
    }

    /// Frames completed since power-on.
    pub fn frame_count(&self) -> u64 {
        self.bus.ppu.frames()
    }

    /// Position of the PPU within the current frame, in dots.
    pub fn ppu_dots(&self) -> u32 {
        self.bus.ppu.dots()
    }
}
