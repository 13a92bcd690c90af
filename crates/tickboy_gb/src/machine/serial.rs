/// Serial port stub modelled via SB/SC.
///
/// There is no link partner: starting a transfer with the internal clock
/// completes it immediately and captures the outgoing byte in `output`.
/// Test ROMs use this to print their results.
#[derive(Clone, Debug, Default)]
pub(crate) struct Serial {
    pub(super) sb: u8,
    sc: u8,
    pub(super) output: Vec<u8>,
}

impl Serial {
    pub(super) fn post_boot() -> Self {
        Self {
            sc: 0x7E,
            ..Self::default()
        }
    }

    pub(super) fn read_sc(&self) -> u8 {
        self.sc | 0x7E
    }

    /// Returns true when the write completed a transfer, in which case the
    /// serial interrupt should be requested.
    pub(super) fn write_sc(&mut self, value: u8) -> bool {
        self.sc = value;
        // Internal clock & start bit set?
        if self.sc & 0x81 == 0x81 {
            self.output.push(self.sb);
            self.sc &= !0x80;
            return true;
        }
        false
    }
}
