mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod interrupts;
mod regs;

pub use alu::{will_borrow_from, will_carry_from};
pub use bus::Bus;
pub use exec::ILLEGAL_OPCODES;
pub use interrupts::{Interrupt, InterruptFlags, IE_ADDR, IF_ADDR};
pub use regs::{Flag, Registers};

use crate::error::Fault;

/// Outcome of executing one instruction.
///
/// `jump` is the program counter after the instruction (the fall-through
/// address or the branch target), `length` the number of bytes fetched
/// from the instruction stream, and `duration` the clock cycles it took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpResult {
    pub jump: u16,
    pub length: u16,
    pub duration: u32,
}

/// Game Boy CPU core.
///
/// Holds the register file and the control flags (`ime`, `halted`,
/// `stopped`). Decoding lives in `exec`/`cb`, interrupt entry in
/// `interrupts`.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    /// Interrupt master enable.
    pub ime: bool,
    pub halted: bool,
    /// STOP low-power state. Cleared as soon as an enabled interrupt is
    /// requested (in practice a joypad press).
    stopped: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    /// Set once an illegal opcode has executed. On hardware the CPU is
    /// dead until power-off.
    locked: bool,
    /// Bytes fetched from the instruction stream by the current opcode.
    fetched: u16,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// CPU in the post-boot state (PC=0x0100).
    pub fn new() -> Self {
        Self::with_registers(Registers::post_boot())
    }

    pub fn with_registers(regs: Registers) -> Self {
        Self {
            regs,
            ime: false,
            halted: false,
            stopped: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
            locked: false,
            fetched: 0,
        }
    }

    /// Reset the CPU to the given register state with every control flag
    /// cleared.
    pub fn reset(&mut self, regs: Registers) {
        *self = Self::with_registers(regs);
    }

    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.regs.flag(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.regs.set_flag(flag, value);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Run one driving step: service a pending interrupt if there is one,
    /// otherwise execute the next instruction (or idle while halted).
    ///
    /// Peripherals are advanced through `Bus::tick` by the cycles consumed
    /// before this returns.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, Fault> {
        if self.locked {
            return Err(Fault::Halted(format!(
                "CPU locked at PC=0x{:04X}",
                self.regs.pc
            )));
        }

        if self.stopped {
            if interrupts::pending(bus).is_empty() {
                // Timer and PPU stay frozen in STOP. The cost is nominal so
                // cycle-budget loops keep making progress.
                return Ok(4);
            }
            log::debug!("GB CPU: leaving STOP at PC=0x{:04X}", self.regs.pc);
            self.stopped = false;
        }

        if let Some(cycles) = self.handle_interrupts(bus) {
            bus.tick(cycles);
            return Ok(cycles);
        }

        if self.halted {
            // HALT idles one machine cycle at a time until an interrupt is
            // requested; peripherals keep running.
            bus.tick(4);
            return Ok(4);
        }

        let result = self.execute(bus)?;
        bus.tick(result.duration);
        self.apply_ime_delay();
        Ok(result.duration)
    }

    /// Decode and execute the instruction at PC.
    ///
    /// This does not service interrupts or advance peripherals; `step` is
    /// the driving entry point.
    pub fn execute<B: Bus>(&mut self, bus: &mut B) -> Result<OpResult, Fault> {
        let pc = self.regs.pc;
        self.fetched = 0;
        let opcode = self.fetch8(bus);

        let duration = match self.exec_opcode(bus, opcode) {
            Some(duration) => duration,
            None => {
                self.lock(pc);
                return Err(Fault::IllegalOpcode { opcode, pc });
            }
        };

        let length = self.fetched;
        if length == 0 || duration == 0 {
            self.lock(pc);
            return Err(Fault::CycleAccounting {
                opcode,
                pc,
                length,
                duration,
            });
        }

        log::trace!(
            "GB CPU: pc=0x{:04X} op=0x{:02X} len={} cycles={} -> pc=0x{:04X}",
            pc,
            opcode,
            length,
            duration,
            self.regs.pc
        );

        Ok(OpResult {
            jump: self.regs.pc,
            length,
            duration,
        })
    }

    fn lock(&mut self, pc: u16) {
        if !self.locked {
            log::error!(
                "GB CPU locked at PC=0x{pc:04X} (SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X})",
                pc = pc,
                sp = self.regs.sp,
                af = self.regs.af(),
                bc = self.regs.bc(),
                de = self.regs.de(),
                hl = self.regs.hl(),
            );
        }
        self.locked = true;
    }

    /// Apply delayed IME change requested by EI.
    #[inline]
    fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            // Second step after EI: actually enable IME.
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            // First step after EI: arm the delayed enable.
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}
