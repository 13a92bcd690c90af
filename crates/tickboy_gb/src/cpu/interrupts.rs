use bitflags::bitflags;

use super::{Bus, Cpu};

/// Interrupt request register (IF).
pub const IF_ADDR: u16 = 0xFF0F;
/// Interrupt enable register (IE).
pub const IE_ADDR: u16 = 0xFFFF;

/// Clock cycles charged for interrupt entry: the same as `CALL a16`.
const DISPATCH_CYCLES: u32 = 24;

bitflags! {
    /// Bit layout shared by IF ($FF0F) and IE ($FFFF).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 1 << 0;
        const LCD_STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

/// Interrupt sources in priority order (VBlank is serviced first).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupt {
    VBlank,
    LcdStat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    pub const PRIORITY: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    pub fn flag(self) -> InterruptFlags {
        match self {
            Interrupt::VBlank => InterruptFlags::VBLANK,
            Interrupt::LcdStat => InterruptFlags::LCD_STAT,
            Interrupt::Timer => InterruptFlags::TIMER,
            Interrupt::Serial => InterruptFlags::SERIAL,
            Interrupt::Joypad => InterruptFlags::JOYPAD,
        }
    }

    /// Fixed handler address the CPU calls into.
    pub fn vector(self) -> u16 {
        match self {
            Interrupt::VBlank => 0x0040,
            Interrupt::LcdStat => 0x0048,
            Interrupt::Timer => 0x0050,
            Interrupt::Serial => 0x0058,
            Interrupt::Joypad => 0x0060,
        }
    }

    /// Highest-priority source in `pending`, if any.
    pub fn highest(pending: InterruptFlags) -> Option<Interrupt> {
        Self::PRIORITY
            .into_iter()
            .find(|interrupt| pending.contains(interrupt.flag()))
    }
}

/// Requested and enabled interrupt sources (`IF & IE`).
pub(super) fn pending<B: Bus>(bus: &mut B) -> InterruptFlags {
    let ie = InterruptFlags::from_bits_truncate(bus.read8(IE_ADDR));
    let iflags = InterruptFlags::from_bits_truncate(bus.read8(IF_ADDR));
    ie & iflags
}

impl Cpu {
    /// Handle maskable interrupts if IME is set and a pending interrupt exists.
    ///
    /// Returns `Some(cycles)` if an interrupt was taken, or `None` when the
    /// step should fall through to an ordinary opcode fetch.
    pub(super) fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        let pending = pending(bus);
        if pending.is_empty() {
            return None;
        }

        // A pending interrupt always ends HALT, even with IME clear; in that
        // case execution simply resumes after the HALT opcode.
        self.halted = false;

        if !self.ime {
            return None;
        }

        let interrupt = Interrupt::highest(pending)?;

        // Entry behaves like a synthetic `CALL vector`: IME drops, the
        // request bit is acknowledged and PC is pushed high byte first.
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;

        let iflags = InterruptFlags::from_bits_truncate(bus.read8(IF_ADDR));
        bus.write8(IF_ADDR, (iflags - interrupt.flag()).bits());

        let pc = self.regs.pc;
        self.push_u16(bus, pc);
        self.regs.pc = interrupt.vector();

        log::debug!(
            "GB CPU interrupt: {:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
            interrupt,
            interrupt.vector(),
            pc,
            self.regs.sp,
        );

        Some(DISPATCH_CYCLES)
    }
}
