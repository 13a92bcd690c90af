use super::{Cpu, Flag};

/// True when adding `a` and `b` carries out of bit `bit`.
///
/// `will_carry_from(3, ..)` is the 8-bit half carry, `will_carry_from(7, ..)`
/// the 8-bit carry, and 11/15 the 16-bit equivalents.
#[inline]
pub fn will_carry_from(bit: u32, a: u32, b: u32) -> bool {
    let mask = (1u32 << (bit + 1)) - 1;
    (a & mask) + (b & mask) > mask
}

/// True when subtracting `b` from `a` borrows into bit `bit`.
///
/// `will_borrow_from(4, ..)` is the 8-bit half borrow and
/// `will_borrow_from(8, ..)` the full 8-bit borrow.
#[inline]
pub fn will_borrow_from(bit: u32, a: u32, b: u32) -> bool {
    let mask = (1u32 << bit) - 1;
    (a & mask) < (b & mask)
}

impl Cpu {
    /// ADD (or ADC with `use_carry`) into A.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a as u32;
        let carry_in = (use_carry && self.get_flag(Flag::C)) as u32;
        let value = value as u32;

        let half = (a & 0x0F) + (value & 0x0F) + carry_in > 0x0F;
        let full = a + value + carry_in > 0xFF;
        let result = (a + value + carry_in) as u8;

        self.regs.a = result;
        self.regs.set_flags(result == 0, false, half, full);
    }

    /// SUB (or SBC with `use_carry`) from A.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let result = self.sub_flags(value, use_carry);
        self.regs.a = result;
    }

    /// CP: the flags of `A - value`, A untouched.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.sub_flags(value, false);
    }

    fn sub_flags(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = self.regs.a as u32;
        let carry_in = (use_carry && self.get_flag(Flag::C)) as u32;
        let value = value as u32;

        let half = (a & 0x0F) < (value & 0x0F) + carry_in;
        let full = a < value + carry_in;
        let result = a.wrapping_sub(value + carry_in) as u8;

        self.regs.set_flags(result == 0, true, half, full);
        result
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.regs.a = result;
        self.regs.set_flags(result == 0, false, true, false);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.regs.a = result;
        self.regs.set_flags(result == 0, false, false, false);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;
        self.regs.set_flags(result == 0, false, false, false);
    }

    /// Dispatch one of the eight accumulator operations by its opcode
    /// index: ADD, ADC, SUB, SBC, AND, XOR, OR, CP.
    pub(super) fn alu_op(&mut self, operation: u8, value: u8) {
        match operation & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cp(value),
        }
    }

    /// DAA. N picks the direction of the BCD correction; H and C say which
    /// digits overflowed. N survives, H is cleared.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.get_flag(Flag::C) { 0x60 } else { 0x00 };
        if self.get_flag(Flag::H) {
            adjust |= 0x06;
        }

        if !self.get_flag(Flag::N) {
            // Previous op was an add: also correct digits past 9.
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.set_flag(Flag::C, adjust >= 0x60);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::Z, a == 0);
        self.regs.a = a;
    }

    /// INC r / INC (HL). Carry is preserved.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, will_carry_from(3, value as u32, 1));
        result
    }

    /// DEC r / DEC (HL). Carry is preserved.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, will_borrow_from(4, value as u32, 1));
        result
    }

    /// ADD HL,rr. Z is preserved, H and C come from bits 11 and 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();

        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, will_carry_from(11, hl as u32, value as u32));
        self.set_flag(Flag::C, will_carry_from(15, hl as u32, value as u32));

        self.regs.set_hl(hl.wrapping_add(value));
    }

    /// `base + r8` for ADD SP,r8 and LD HL,SP+r8. H and C are those of the
    /// unsigned low-byte addition; Z and N are cleared.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        let h = will_carry_from(3, base as u32, imm8 as u32);
        let c = will_carry_from(7, base as u32, imm8 as u32);
        self.regs.set_flags(false, false, h, c);
        base.wrapping_add(offset)
    }

    /// Rotate/shift group shared by the CB table and the unprefixed
    /// accumulator rotates.
    ///
    /// `operation` is the CB `y` field: RLC, RRC, RL, RR, SLA, SRA, SWAP,
    /// SRL. Sets Z from the result, clears N and H, and sets C from the bit
    /// shifted out (SWAP clears it).
    pub(super) fn alu_shift(&mut self, operation: u8, value: u8) -> u8 {
        let carry_in = self.get_flag(Flag::C);
        let (result, carry) = match operation & 0x07 {
            0 => (value.rotate_left(1), value & 0x80 != 0),
            1 => (value.rotate_right(1), value & 0x01 != 0),
            2 => ((value << 1) | carry_in as u8, value & 0x80 != 0),
            3 => ((value >> 1) | ((carry_in as u8) << 7), value & 0x01 != 0),
            4 => (value << 1, value & 0x80 != 0),
            5 => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            6 => (value.rotate_left(4), false),
            _ => (value >> 1, value & 0x01 != 0),
        };
        self.regs.set_flags(result == 0, false, false, carry);
        result
    }
}
