use typed_builder::TypedBuilder;

/// Size of the DMG boot ROM overlay.
pub const BOOT_IMAGE_SIZE: usize = 0x100;

/// Options used when constructing a [`GameBoy`](crate::GameBoy).
///
/// ```
/// use tickboy_gb::MachineConfig;
///
/// let config = MachineConfig::builder().breakpoint(Some(0x0150)).build();
/// assert!(config.boot_image.is_none());
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct MachineConfig {
    /// Boot ROM overlaid on 0x0000–0x00FF until software writes 0xFF50.
    ///
    /// When absent the machine starts directly in the post-boot state at
    /// PC=0x0100.
    #[builder(default)]
    pub boot_image: Option<Vec<u8>>,
    /// Address that stops `step_cycles` once PC reaches it.
    #[builder(default)]
    pub breakpoint: Option<u16>,
    /// Start with WRAM/HRAM cleared instead of a power-on noise pattern.
    #[builder(default = true)]
    pub zero_ram: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MachineConfig {
    /// Boot image normalised to exactly 256 bytes.
    pub(crate) fn boot_rom(&self) -> Option<[u8; BOOT_IMAGE_SIZE]> {
        let image = self.boot_image.as_ref()?;
        if image.len() != BOOT_IMAGE_SIZE {
            log::warn!(
                "boot image is {} bytes, expected {}; truncating/padding",
                image.len(),
                BOOT_IMAGE_SIZE
            );
        }
        let mut rom = [0u8; BOOT_IMAGE_SIZE];
        let len = image.len().min(BOOT_IMAGE_SIZE);
        rom[..len].copy_from_slice(&image[..len]);
        Some(rom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_rom_is_padded_to_256_bytes() {
        let config = MachineConfig::builder()
            .boot_image(Some(vec![0x31, 0xFE, 0xFF]))
            .build();
        let rom = config.boot_rom().unwrap();
        assert_eq!(&rom[..3], &[0x31, 0xFE, 0xFF]);
        assert!(rom[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn default_config_starts_post_boot() {
        let config = MachineConfig::default();
        assert!(config.boot_rom().is_none());
        assert!(config.zero_ram);
        assert_eq!(config.breakpoint, None);
    }
}
