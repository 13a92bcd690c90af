//! Small hand-assembled cartridges run through the public machine API.
//!
//! Each ROM is 32 KiB with its program at the 0x0100 entry point and starts
//! in the post-boot state.

use anyhow::{ensure, Result};
use tickboy_gb::{GameBoy, MachineConfig, SysMode, SCREEN_WIDTH};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a ROM from `(address, bytes)` chunks.
fn assemble(chunks: &[(usize, &[u8])]) -> Vec<u8> {
    let mut rom = vec![0; 0x8000];
    for &(addr, bytes) in chunks {
        rom[addr..addr + bytes.len()].copy_from_slice(bytes);
    }
    rom
}

#[test]
fn prints_a_message_over_serial() -> Result<()> {
    init_logger();

    #[rustfmt::skip]
    let program: &[u8] = &[
        0x21, 0x50, 0x01, // LD HL,0x0150
        0x2A,             // loop: LD A,(HL+)
        0xB7,             // OR A
        0x28, 0x08,       // JR Z,done
        0xE0, 0x01,       // LDH (SB),A
        0x3E, 0x81,       // LD A,0x81
        0xE0, 0x02,       // LDH (SC),A
        0x18, 0xF4,       // JR loop
        0x18, 0xFE,       // done: JR done
    ];
    let rom = assemble(&[(0x100, program), (0x150, &b"OK\0"[..])]);

    let config = MachineConfig::builder().breakpoint(Some(0x010F)).build();
    let mut gb = GameBoy::with_config(rom, config);
    gb.step_cycles(10_000)?;

    ensure!(gb.cpu().regs.pc == 0x010F, "stopped at {:04X}", gb.cpu().regs.pc);
    assert_eq!(gb.serial_output(), b"OK");
    Ok(())
}

#[test]
fn vblank_handler_counts_frames() -> Result<()> {
    init_logger();

    #[rustfmt::skip]
    let main: &[u8] = &[
        0x3E, 0x01, // LD A,0x01
        0xE0, 0xFF, // LDH (IE),A
        0xAF,       // XOR A
        0xE0, 0x0F, // LDH (IF),A
        0x47,       // LD B,A
        0xFB,       // EI
        0x76,       // wait: HALT
        0x18, 0xFD, // JR wait
    ];
    #[rustfmt::skip]
    let handler: &[u8] = &[
        0x04, // INC B
        0xD9, // RETI
    ];
    let mut gb = GameBoy::new(assemble(&[(0x40, handler), (0x100, main)]));

    gb.step_frames(3)?;

    assert_eq!(gb.cpu().regs.b, 3);
    assert_eq!(gb.frame_count(), 3);
    assert_eq!(gb.mode(), SysMode::Halt);
    Ok(())
}

#[test]
fn timer_interrupt_fires_every_overflow() -> Result<()> {
    init_logger();

    #[rustfmt::skip]
    let main: &[u8] = &[
        0xAF,       // XOR A
        0xE0, 0x06, // LDH (TMA),A
        0xE0, 0x05, // LDH (TIMA),A
        0xE0, 0x0F, // LDH (IF),A
        0x4F,       // LD C,A
        0x3E, 0x04, // LD A,0x04
        0xE0, 0xFF, // LDH (IE),A
        0x3E, 0x05, // LD A,0x05
        0xE0, 0x07, // LDH (TAC),A
        0xE0, 0x04, // LDH (DIV),A
        0xFB,       // EI
        0x76,       // wait: HALT
        0x18, 0xFD, // JR wait
    ];
    #[rustfmt::skip]
    let handler: &[u8] = &[
        0x0C, // INC C
        0xD9, // RETI
    ];
    let mut gb = GameBoy::new(assemble(&[(0x50, handler), (0x100, main)]));

    // 256 increments at 16 cycles each per overflow.
    gb.step_cycles(5 * 4096 + 200)?;

    assert_eq!(gb.cpu().regs.c, 5);
    Ok(())
}

#[test]
fn draws_a_tile_written_with_the_lcd_off() -> Result<()> {
    init_logger();

    #[rustfmt::skip]
    let program: &[u8] = &[
        0xAF,             // XOR A
        0xE0, 0x40,       // LDH (LCDC),A
        0x21, 0x10, 0x80, // LD HL,0x8010
        0x0E, 0x10,       // LD C,16
        0x3E, 0xFF,       // fill: LD A,0xFF
        0x22,             // LD (HL+),A
        0x0D,             // DEC C
        0x20, 0xFA,       // JR NZ,fill
        0x3E, 0x01,       // LD A,0x01
        0xEA, 0x00, 0x98, // LD (0x9800),A
        0x3E, 0x91,       // LD A,0x91
        0xE0, 0x40,       // LDH (LCDC),A
        0x18, 0xFE,       // JR self
    ];
    let mut gb = GameBoy::new(assemble(&[(0x100, program)]));

    gb.step_frames(2)?;
    ensure!(gb.frame_count() >= 1, "no frame was rendered");

    let display = gb.display();
    assert!(display[..8].iter().all(|&shade| shade == 3));
    assert_eq!(display[8], 0);
    assert_eq!(display[7 * SCREEN_WIDTH], 3);
    assert_eq!(display[8 * SCREEN_WIDTH], 0);

    // Tile 1 sits next to tile 0 on the sheet.
    assert_eq!(gb.tile_data()[8], 3);
    assert_eq!(gb.tile_data()[0], 0);
    Ok(())
}

#[test]
fn illegal_opcode_ends_the_run() -> Result<()> {
    init_logger();

    let mut gb = GameBoy::new(assemble(&[(0x100, &[0x00u8, 0x00, 0xFC][..])]));
    let err = gb
        .step_cycles(1_000)
        .expect_err("illegal opcode must stop the machine");

    assert_eq!(err.to_string(), "illegal opcode 0xFC at PC=0x0102");
    assert_eq!(gb.mode(), SysMode::Fatal);

    gb.reset();
    ensure!(gb.mode() == SysMode::Normal, "reset did not clear the fault");
    Ok(())
}
