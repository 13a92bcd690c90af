use crate::cpu::InterruptFlags;

pub(super) const DIV: u16 = 0xFF04;
pub(super) const TIMA: u16 = 0xFF05;
pub(super) const TMA: u16 = 0xFF06;
pub(super) const TAC: u16 = 0xFF07;

/// Divider and programmable timer (DIV/TIMA/TMA/TAC).
///
/// Time is accumulated in a 16-bit cycle counter; DIV exposes its upper
/// byte. TIMA is advanced by however many of the selected intervals the
/// counter crossed during a step.
#[derive(Clone, Debug, Default)]
pub(crate) struct Timer {
    counter: u16,
    tima: u8,
    tma: u8,
    tac: u8,
}

impl Timer {
    /// DIV reads 0xAB at PC=0x0100 on DMG hardware.
    pub(super) fn post_boot() -> Self {
        Self {
            counter: 0xABCC,
            ..Self::default()
        }
    }

    #[inline]
    fn enabled(&self) -> bool {
        self.tac & 0x04 != 0
    }

    /// Cycles per TIMA increment for TAC[1:0].
    #[inline]
    fn interval(&self) -> u32 {
        match self.tac & 0x03 {
            0b00 => 1024,
            0b01 => 16,
            0b10 => 64,
            _ => 256,
        }
    }

    /// Advance by `cycles` clock cycles, requesting the timer interrupt
    /// in `if_reg` on every TIMA overflow.
    pub(super) fn step(&mut self, cycles: u32, if_reg: &mut u8) {
        let old = self.counter as u32;
        let new = old + cycles;
        self.counter = new as u16;

        if !self.enabled() {
            return;
        }

        let interval = self.interval();
        let increments = new / interval - old / interval;
        for _ in 0..increments {
            let (next, overflow) = self.tima.overflowing_add(1);
            if overflow {
                self.tima = self.tma;
                *if_reg |= InterruptFlags::TIMER.bits();
            } else {
                self.tima = next;
            }
        }
    }

    pub(super) fn read(&self, addr: u16) -> u8 {
        match addr {
            DIV => (self.counter >> 8) as u8,
            TIMA => self.tima,
            TMA => self.tma,
            TAC => self.tac | 0xF8,
            _ => 0xFF,
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            // Any write clears the whole divider.
            DIV => self.counter = 0,
            TIMA => self.tima = value,
            TMA => self.tma = value,
            TAC => self.tac = value & 0x07,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_is_the_upper_byte_of_the_counter() {
        let mut timer = Timer::default();
        let mut if_reg = 0;
        timer.step(255, &mut if_reg);
        assert_eq!(timer.read(DIV), 0);
        timer.step(1, &mut if_reg);
        assert_eq!(timer.read(DIV), 1);

        timer.write(DIV, 0x5A);
        assert_eq!(timer.read(DIV), 0);
    }

    #[test]
    fn disabled_timer_leaves_tima_alone() {
        let mut timer = Timer::default();
        let mut if_reg = 0;
        timer.write(TAC, 0x01);
        timer.step(4096, &mut if_reg);
        assert_eq!(timer.read(TIMA), 0);
        assert_eq!(if_reg, 0);
    }

    #[test]
    fn every_rate_selector_counts_its_interval() {
        for (tac, interval) in [(0x04u8, 1024u32), (0x05, 16), (0x06, 64), (0x07, 256)] {
            let mut timer = Timer::default();
            let mut if_reg = 0;
            timer.write(TAC, tac);
            timer.step(interval - 1, &mut if_reg);
            assert_eq!(timer.read(TIMA), 0, "TAC={tac:#04x}");
            timer.step(1, &mut if_reg);
            assert_eq!(timer.read(TIMA), 1, "TAC={tac:#04x}");
        }
    }

    #[test]
    fn overflow_reloads_from_tma_and_requests_interrupt() {
        let mut timer = Timer::default();
        let mut if_reg = 0;
        timer.write(TAC, 0x05);
        timer.write(TMA, 0x42);
        timer.write(TIMA, 0xFF);

        timer.step(16, &mut if_reg);
        assert_eq!(timer.read(TIMA), 0x42);
        assert_eq!(if_reg, InterruptFlags::TIMER.bits());
    }

    #[test]
    fn steps_spanning_several_intervals_count_each_one() {
        let mut timer = Timer::default();
        let mut if_reg = 0;
        timer.write(TAC, 0x05);
        timer.step(8, &mut if_reg);
        timer.step(24, &mut if_reg);
        assert_eq!(timer.read(TIMA), 2);
    }

    #[test]
    fn tac_reads_back_with_unused_bits_set() {
        let mut timer = Timer::default();
        timer.write(TAC, 0xFF);
        assert_eq!(timer.read(TAC), 0xFF);
        timer.write(TAC, 0x00);
        assert_eq!(timer.read(TAC), 0xF8);
    }
}
