use bitflags::bitflags;

use super::SystemBus;
use crate::cpu::InterruptFlags;

bitflags! {
    /// Held inputs. The low nibble is the direction pad (read through
    /// P14), the high nibble the buttons (read through P15).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        const RIGHT = 0x01;
        const LEFT = 0x02;
        const UP = 0x04;
        const DOWN = 0x08;
        const A = 0x10;
        const B = 0x20;
        const SELECT = 0x40;
        const START = 0x80;
    }
}

/// P14: 0 selects the direction pad.
const SELECT_DPAD: u8 = 0x10;
/// P15: 0 selects the buttons.
const SELECT_BUTTONS: u8 = 0x20;

impl SystemBus {
    pub(crate) fn buttons(&self) -> Buttons {
        self.buttons
    }

    /// Replace the held inputs; any newly pressed input requests the
    /// joypad interrupt.
    pub(crate) fn set_buttons(&mut self, buttons: Buttons) {
        let pressed = buttons - self.buttons;
        self.buttons = buttons;
        if !pressed.is_empty() {
            self.if_reg |= InterruptFlags::JOYPAD.bits();
        }
    }

    pub(super) fn read_joyp(&self) -> u8 {
        // Bits 7-6 always read as 1 on DMG.
        let select = self.joyp_select & (SELECT_DPAD | SELECT_BUTTONS);
        let held = self.buttons.bits();

        // A pressed input is observed as 0.
        let mut low = 0x0F;
        if select & SELECT_DPAD == 0 {
            low &= !held & 0x0F;
        }
        if select & SELECT_BUTTONS == 0 {
            low &= !(held >> 4) & 0x0F;
        }
        0xC0 | select | low
    }

    pub(super) fn write_joyp(&mut self, value: u8) {
        // Only bits 5 and 4 are writable; lower nibble is read-only.
        self.joyp_select = value & (SELECT_DPAD | SELECT_BUTTONS);
    }
}
