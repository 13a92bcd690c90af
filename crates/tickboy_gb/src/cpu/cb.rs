use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Handle CB-prefixed instructions (bit operations, shifts, and rotates).
    pub(super) fn step_cb<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let cb = self.fetch8(bus);
        let x = cb >> 6;
        let y = (cb >> 3) & 0x07;
        let z = cb & 0x07;
        let value = self.read_reg8(bus, z);

        match x {
            0 => {
                // Rotates and shifts.
                let result = self.alu_shift(y, value);
                self.write_reg8(bus, z, result);
                if z == 6 { 16 } else { 8 }
            }
            1 => {
                // BIT b, r: preserve C, set H=1, N=0.
                let bit_set = value & (1 << y) != 0;
                let carry = self.get_flag(Flag::C);
                self.regs.set_flags(!bit_set, false, true, carry);
                if z == 6 { 12 } else { 8 }
            }
            _ => {
                // RES b, r / SET b, r
                let result = if x == 2 {
                    value & !(1 << y)
                } else {
                    value | (1 << y)
                };
                self.write_reg8(bus, z, result);
                if z == 6 { 16 } else { 8 }
            }
        }
    }
}
