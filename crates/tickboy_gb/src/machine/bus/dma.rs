use super::super::ppu::{DMA, OAM_SIZE, OAM_START};
use super::SystemBus;

impl SystemBus {
    pub(super) fn do_oam_dma(&mut self, value: u8) {
        // OAM DMA: copy 160 bytes from source XX00..XX9F to FE00..FE9F.
        // The transfer is immediate; CPU bus conflicts are not modelled.
        let base = (value as u16) << 8;
        for i in 0..OAM_SIZE {
            let byte = self.read8_mmio(base.wrapping_add(i));
            self.memory[(OAM_START + i) as usize] = byte;
        }
        // The trigger self-clears.
        self.memory[DMA as usize] = 0;
        log::trace!("GB bus: OAM DMA from 0x{base:04X}");
    }
}
