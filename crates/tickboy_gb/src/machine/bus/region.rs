/// Regions of the 16-bit address space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// 0x0000-0x7FFF, read-only cartridge image (and the boot overlay).
    Cartridge,
    /// 0x8000-0x9FFF
    VideoRam,
    /// 0xA000-0xBFFF
    ExternalRam,
    /// 0xC000-0xDFFF
    WorkRam,
    /// 0xE000-0xFDFF, alias of 0xC000-0xDDFF.
    Echo,
    /// 0xFE00-0xFE9F
    Oam,
    /// 0xFEA0-0xFEFF
    Unusable,
    /// 0xFF00-0xFF7F
    Io,
    /// 0xFF80-0xFFFE
    HighRam,
    /// 0xFFFF
    InterruptEnable,
}

impl Region {
    pub const ECHO_OFFSET: u16 = 0x2000;

    pub fn of(addr: u16) -> Region {
        match addr {
            0x0000..=0x7FFF => Region::Cartridge,
            0x8000..=0x9FFF => Region::VideoRam,
            0xA000..=0xBFFF => Region::ExternalRam,
            0xC000..=0xDFFF => Region::WorkRam,
            0xE000..=0xFDFF => Region::Echo,
            0xFE00..=0xFE9F => Region::Oam,
            0xFEA0..=0xFEFF => Region::Unusable,
            0xFF00..=0xFF7F => Region::Io,
            0xFF80..=0xFFFE => Region::HighRam,
            0xFFFF => Region::InterruptEnable,
        }
    }

    /// Address whose storage actually backs `addr`.
    #[inline]
    pub fn backing(addr: u16) -> u16 {
        match Region::of(addr) {
            Region::Echo => addr - Self::ECHO_OFFSET,
            _ => addr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_boundaries() {
        assert_eq!(Region::of(0x7FFF), Region::Cartridge);
        assert_eq!(Region::of(0x8000), Region::VideoRam);
        assert_eq!(Region::of(0xDFFF), Region::WorkRam);
        assert_eq!(Region::of(0xE000), Region::Echo);
        assert_eq!(Region::of(0xFDFF), Region::Echo);
        assert_eq!(Region::of(0xFE9F), Region::Oam);
        assert_eq!(Region::of(0xFEA0), Region::Unusable);
        assert_eq!(Region::of(0xFF7F), Region::Io);
        assert_eq!(Region::of(0xFF80), Region::HighRam);
        assert_eq!(Region::of(0xFFFF), Region::InterruptEnable);
    }

    #[test]
    fn echo_is_backed_by_work_ram() {
        assert_eq!(Region::backing(0xE000), 0xC000);
        assert_eq!(Region::backing(0xFDFF), 0xDDFF);
        assert_eq!(Region::backing(0xC123), 0xC123);
    }
}
