/// Abstraction over the Game Boy bus (memory and IO).
///
/// The CPU only ever talks to memory through these two accessors; it never
/// holds on to a reference into bus storage across calls.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Advance bus-side peripherals (timer, PPU) by a number of clock
    /// cycles once the CPU has finished an instruction or interrupt entry.
    ///
    /// Default implementation does nothing; plain memory buses used in
    /// tests can leave it alone.
    fn tick(&mut self, _cycles: u32) {}
}
