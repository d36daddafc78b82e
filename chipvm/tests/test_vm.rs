//! Interpreter behavior driven through the public API.
//!
//! Test programs are hand assembled big-endian byte pairs, loaded at
//! 0x200 like any ROM image.
use chipvm::constants::{DISPLAY_WIDTH, MAX_ROM_SIZE};
use chipvm::prelude::*;

fn load(rom: &[u8]) -> Chip8Vm {
    let mut vm = Chip8Vm::new(Chip8Conf::default());
    vm.load_rom(rom).unwrap();
    vm
}

fn load_with(conf: Chip8Conf, rom: &[u8]) -> Chip8Vm {
    let mut vm = Chip8Vm::new(conf);
    vm.load_rom(rom).unwrap();
    vm
}

/// 7XNN with NN=1 applied 256 times returns Vx to its original value.
#[test]
fn test_add_byte_wraparound_law() {
    let mut rom = vec![0x6A, 0x07]; // LD vA, 7
    for _ in 0..256 {
        rom.extend([0x7A, 0x01]); // ADD vA, 1
    }

    let mut vm = load(&rom);
    vm.run_steps(257).unwrap();

    assert_eq!(vm.registers()[0xA], 0x07);
    // The add-byte instruction never touches the flag register.
    assert_eq!(vm.registers()[0xF], 0x00);
}

#[test]
fn test_alu_add_carry() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0xFF, // LD v0, 0xFF
        0x61, 0x01, // LD v1, 0x01
        0x80, 0x14, // ADD v0, v1
    ];
    let mut vm = load(&rom);
    vm.run_steps(3).unwrap();
    assert_eq!(vm.registers()[0x0], 0x00);
    assert_eq!(vm.registers()[0xF], 1);

    #[rustfmt::skip]
    let rom = [
        0x60, 0x01,
        0x61, 0x01,
        0x80, 0x14,
    ];
    let mut vm = load(&rom);
    vm.run_steps(3).unwrap();
    assert_eq!(vm.registers()[0x0], 0x02);
    assert_eq!(vm.registers()[0xF], 0);
}

#[test]
fn test_alu_sub_borrow() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x05,
        0x61, 0x03,
        0x80, 0x15, // SUB v0, v1
    ];
    let mut vm = load(&rom);
    vm.run_steps(3).unwrap();
    assert_eq!(vm.registers()[0x0], 0x02);
    assert_eq!(vm.registers()[0xF], 1);

    #[rustfmt::skip]
    let rom = [
        0x60, 0x03,
        0x61, 0x05,
        0x80, 0x15,
    ];
    let mut vm = load(&rom);
    vm.run_steps(3).unwrap();
    assert_eq!(vm.registers()[0x0], 0xFE);
    assert_eq!(vm.registers()[0xF], 0);
}

#[test]
fn test_clear_screen() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x00, // LD v0, 0
        0xF0, 0x29, // LD F, v0    ; I := glyph 0
        0xD0, 0x05, // DRW v0, v0, 5
        0x00, 0xE0, // CLS
    ];
    let mut vm = load(&rom);

    vm.run_steps(3).unwrap();
    assert!(vm.display_buffer().iter().any(|px| *px));

    vm.run_steps(1).unwrap();
    assert!(vm.display_buffer().iter().all(|px| !px));
}

/// FX55 then FX65 from the same address reproduces the registers exactly.
#[test]
fn test_store_load_roundtrip() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0xDE, // LD v0..v3
        0x61, 0xAD,
        0x62, 0xBE,
        0x63, 0xEF,
        0xA3, 0x00, // LD I, 0x300
        0xF3, 0x55, // LD [I], v3
        0x60, 0x00, // clobber v0..v3
        0x61, 0x00,
        0x62, 0x00,
        0x63, 0x00,
        0xF3, 0x65, // LD v3, [I]
    ];
    let mut vm = load(&rom);
    vm.run_steps(11).unwrap();

    assert_eq!(vm.registers()[0..4], [0xDE, 0xAD, 0xBE, 0xEF]);
    assert_eq!(vm.index(), 0x300);
}

/// A call followed by a return lands just past the call.
#[test]
fn test_call_return() {
    #[rustfmt::skip]
    let rom = [
        0x22, 0x04, // 0x200: CALL 0x204
        0x00, 0x00, // 0x202: never executed
        0x00, 0xEE, // 0x204: RET
    ];
    let mut vm = load(&rom);

    assert_eq!(vm.step().unwrap(), Flow::Jump);
    assert_eq!(vm.pc(), 0x204);

    assert_eq!(vm.step().unwrap(), Flow::Jump);
    assert_eq!(vm.pc(), 0x202);
}

/// Drawing the same sprite twice erases it and reports the collision.
#[test]
fn test_draw_collision_toggle() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x00, // LD v0, 0
        0xF0, 0x29, // LD F, v0
        0xD0, 0x05, // DRW v0, v0, 5
        0xD0, 0x05, // DRW v0, v0, 5
    ];
    let mut vm = load(&rom);

    vm.run_steps(3).unwrap();
    assert!(vm.display_buffer()[0]);
    assert_eq!(vm.registers()[0xF], 0);

    vm.run_steps(1).unwrap();
    assert!(vm.display_buffer().iter().all(|px| !px));
    assert_eq!(vm.registers()[0xF], 1);
}

/// FX29 points I at the glyph for the digit in Vx.
#[test]
fn test_font_lookup() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x0A, // LD v0, 0xA
        0xF0, 0x29, // LD F, v0
    ];
    let mut vm = load(&rom);
    vm.run_steps(2).unwrap();

    assert_eq!(vm.index(), 0x050 + 10 * 5); // 0x082
}

#[test]
fn test_delay_timer() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x05, // LD v0, 5
        0xF0, 0x15, // LD DT, v0
        0xF1, 0x07, // LD v1, DT
    ];
    let mut vm = load(&rom);
    vm.run_steps(3).unwrap();
    assert_eq!(vm.delay_timer(), 5);
    assert_eq!(vm.registers()[0x1], 5);

    vm.tick_timers();
    assert_eq!(vm.delay_timer(), 4);

    // No underflow below zero.
    let mut vm = load(&[0x00, 0xE0]);
    vm.tick_timers();
    assert_eq!(vm.delay_timer(), 0);
}

#[test]
fn test_sound_timer() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x03, // LD v0, 3
        0xF0, 0x18, // LD ST, v0
    ];
    let mut vm = load(&rom);

    vm.step().unwrap();
    assert_eq!(vm.step().unwrap(), Flow::Sound);
    assert_eq!(vm.sound_timer(), 3);
    assert!(vm.sound_active());

    for _ in 0..3 {
        vm.tick_timers();
    }
    assert_eq!(vm.sound_timer(), 0);
    assert!(!vm.sound_active());
}

#[test]
fn test_shift_right_quirk() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x05, // LD v0, 5
        0x61, 0x08, // LD v1, 8
        0x80, 0x16, // SHR v0 {, v1}
    ];

    // CHIP-48 lineage: Vx shifted in place.
    let mut vm = load(&rom);
    vm.run_steps(3).unwrap();
    assert_eq!(vm.registers()[0x0], 0x02);
    assert_eq!(vm.registers()[0xF], 1);

    // COSMAC lineage: Vy shifted into Vx.
    let conf = Chip8Conf {
        quirks: Quirks {
            shift_source: ShiftSource::Vy,
            ..Quirks::default()
        },
        ..Chip8Conf::default()
    };
    let mut vm = load_with(conf, &rom);
    vm.run_steps(3).unwrap();
    assert_eq!(vm.registers()[0x0], 0x04);
    assert_eq!(vm.registers()[0xF], 0);
}

#[test]
fn test_shift_left_quirk() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x81, // LD v0, 0b1000_0001
        0x80, 0x1E, // SHL v0 {, v1}
    ];
    let mut vm = load(&rom);
    vm.run_steps(2).unwrap();
    assert_eq!(vm.registers()[0x0], 0x02);
    assert_eq!(vm.registers()[0xF], 1);
}

/// The flag register is written after the result, so a shift targeting
/// VF leaves the flag, not the shifted value.
#[test]
fn test_shift_flag_written_last() {
    #[rustfmt::skip]
    let rom = [
        0x6F, 0x04, // LD vF, 4
        0x8F, 0x06, // SHR vF
    ];
    let mut vm = load(&rom);
    vm.run_steps(2).unwrap();
    assert_eq!(vm.registers()[0xF], 0);
}

#[test]
fn test_index_add_carry_quirk() {
    #[rustfmt::skip]
    let rom = [
        0xAF, 0xFF, // LD I, 0xFFF
        0x60, 0x02, // LD v0, 2
        0xF0, 0x1E, // ADD I, v0
    ];

    let mut vm = load(&rom);
    vm.run_steps(3).unwrap();
    assert_eq!(vm.index(), 0x1001);
    assert_eq!(vm.registers()[0xF], 0);

    let conf = Chip8Conf {
        quirks: Quirks {
            index_add_carry: true,
            ..Quirks::default()
        },
        ..Chip8Conf::default()
    };
    let mut vm = load_with(conf, &rom);
    vm.run_steps(3).unwrap();
    assert_eq!(vm.index(), 0x1001);
    assert_eq!(vm.registers()[0xF], 1);
}

#[test]
fn test_jump_offset_quirk() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x06, // LD v0, 6
        0xB2, 0x00, // JP v0, 0x200
    ];
    let mut vm = load(&rom);
    vm.run_steps(2).unwrap();
    assert_eq!(vm.pc(), 0x206);

    // CHIP-48 lineage reads Vx, with X from the target's high nibble.
    #[rustfmt::skip]
    let rom = [
        0x62, 0x02, // LD v2, 2
        0xB2, 0x08, // JP v2, 0x208
    ];
    let conf = Chip8Conf {
        quirks: Quirks {
            jump_offset_vx: true,
            ..Quirks::default()
        },
        ..Chip8Conf::default()
    };
    let mut vm = load_with(conf, &rom);
    vm.run_steps(2).unwrap();
    assert_eq!(vm.pc(), 0x20A);
}

/// The seventeenth nested call overflows the sixteen level stack.
#[test]
fn test_stack_overflow() {
    let mut rom = Vec::new();
    for depth in 0..17u16 {
        let target = 0x202 + depth * 2;
        rom.push(0x20 | (target >> 8) as u8);
        rom.push((target & 0xFF) as u8);
    }

    let mut vm = load(&rom);
    assert!(matches!(
        vm.run_steps(17),
        Err(Chip8Error::StackOverflow { .. })
    ));
}

#[test]
fn test_stack_underflow() {
    let mut vm = load(&[0x00, 0xEE]);
    assert!(matches!(
        vm.step(),
        Err(Chip8Error::StackUnderflow { pc: 0x200 })
    ));
}

#[test]
fn test_undefined_opcode_policy() {
    // Fault by default.
    let mut vm = load(&[0xFF, 0xFF]);
    assert!(matches!(
        vm.step(),
        Err(Chip8Error::UnknownOpcode {
            word: 0xFFFF,
            pc: 0x200
        })
    ));

    // 0NNN machine code routines take the same route.
    let mut vm = load(&[0x03, 0x00]);
    assert!(matches!(vm.step(), Err(Chip8Error::UnknownOpcode { .. })));

    // Ignore policy advances past the word as a no-op.
    let conf = Chip8Conf {
        undefined_opcode: UndefinedOpcode::Ignore,
        ..Chip8Conf::default()
    };
    let mut vm = load_with(conf, &[0xFF, 0xFF]);
    assert_eq!(vm.step().unwrap(), Flow::Ok);
    assert_eq!(vm.pc(), 0x202);
}

/// Under the wrapping policy, I-relative addresses wrap into the 12-bit
/// space, so a store straddling the end of memory reads back intact.
#[test]
fn test_memory_wrap_policy() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x11,
        0x61, 0x22,
        0x62, 0x33,
        0x63, 0x44,
        0xAF, 0xFE, // LD I, 0xFFE
        0xF3, 0x55, // stores wrap to 0x000, 0x001
        0x60, 0x00,
        0x61, 0x00,
        0x62, 0x00,
        0x63, 0x00,
        0xF3, 0x65,
    ];
    let mut vm = load(&rom);
    vm.run_steps(11).unwrap();
    assert_eq!(vm.registers()[0..4], [0x11, 0x22, 0x33, 0x44]);
}

#[test]
fn test_memory_fault_policy() {
    #[rustfmt::skip]
    let rom = [
        0xAF, 0xFF, // LD I, 0xFFF
        0x60, 0x07, // LD v0, 7
        0xF0, 0x33, // LD B, v0 ; second digit lands at 0x1000
    ];
    let conf = Chip8Conf {
        memory_access: MemoryAccess::Fault,
        ..Chip8Conf::default()
    };
    let mut vm = load_with(conf, &rom);
    assert!(matches!(
        vm.run_steps(3),
        Err(Chip8Error::MemoryOutOfBounds { addr: 0x1000, .. })
    ));
}

/// Sprites are clipped at the right edge, not wrapped onto the next row.
#[test]
fn test_draw_clips_right_edge() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x3C, // LD v0, 60
        0xF2, 0x29, // LD F, v2   ; I := glyph 0
        0xD0, 0x11, // DRW v0, v1, 1
    ];
    let mut vm = load(&rom);
    vm.run_steps(3).unwrap();

    // Glyph 0 row is 0xF0: four lit pixels from x=60.
    for px in 60..64 {
        assert!(vm.display_buffer()[px], "pixel {px} should be lit");
    }
    // Nothing wraps onto the left edge of the same or next row.
    assert!(!vm.display_buffer()[0]);
    assert!(!vm.display_buffer()[DISPLAY_WIDTH]);
}

/// Sprites are clipped at the bottom edge, not wrapped to the top.
#[test]
fn test_draw_clips_bottom_edge() {
    #[rustfmt::skip]
    let rom = [
        0x61, 0x1E, // LD v1, 30
        0xF0, 0x29, // LD F, v0   ; I := glyph 0
        0xD0, 0x15, // DRW v0, v1, 5
    ];
    let mut vm = load(&rom);
    vm.run_steps(3).unwrap();

    // Rows 30 and 31 take the first two glyph rows (0xF0, 0x90).
    assert!(vm.display_buffer()[30 * DISPLAY_WIDTH]);
    assert!(vm.display_buffer()[31 * DISPLAY_WIDTH]);
    assert!(vm.display_buffer()[31 * DISPLAY_WIDTH + 3]);
    assert!(!vm.display_buffer()[31 * DISPLAY_WIDTH + 1]);
    // The remaining three rows are clipped, not wrapped to the top.
    assert!((0..DISPLAY_WIDTH).all(|px| !vm.display_buffer()[px]));
}

#[test]
fn test_skip_if_key() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x05, // LD v0, 5
        0xE0, 0x9E, // SKP v0
    ];

    let mut vm = load(&rom);
    vm.set_key(KeyCode::Key5, true);
    vm.run_steps(2).unwrap();
    assert_eq!(vm.pc(), 0x206);

    let mut vm = load(&rom);
    vm.run_steps(2).unwrap();
    assert_eq!(vm.pc(), 0x204);
}

#[test]
fn test_skip_if_not_key() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x05, // LD v0, 5
        0xE0, 0xA1, // SKNP v0
    ];

    let mut vm = load(&rom);
    vm.run_steps(2).unwrap();
    assert_eq!(vm.pc(), 0x206);

    let mut vm = load(&rom);
    vm.set_key(KeyCode::Key5, true);
    vm.run_steps(2).unwrap();
    assert_eq!(vm.pc(), 0x204);
}

#[test]
fn test_clear_keys() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x05, // LD v0, 5
        0xE0, 0x9E, // SKP v0
    ];
    let mut vm = load(&rom);
    vm.set_key(KeyCode::Key5, true);
    vm.clear_keys();
    vm.run_steps(2).unwrap();
    assert_eq!(vm.pc(), 0x204); // all keys up, no skip
}

#[test]
fn test_config_access() {
    let conf = Chip8Conf {
        steps_per_frame: 7,
        ..Chip8Conf::default()
    };
    let vm = Chip8Vm::new(conf.clone());
    assert_eq!(vm.config(), &conf);
}

/// A frame executes exactly the configured number of instructions.
#[test]
fn test_run_frame_step_budget() {
    #[rustfmt::skip]
    let rom = [
        0x70, 0x01, // ADD v0, 1
        0x12, 0x00, // JP 0x200
    ];
    let conf = Chip8Conf {
        steps_per_frame: 3,
        ..Chip8Conf::default()
    };
    let mut vm = load_with(conf, &rom);

    vm.run_frame().unwrap();
    assert_eq!(vm.registers()[0x0], 2); // ADD, JP, ADD

    vm.run_frame().unwrap();
    assert_eq!(vm.registers()[0x0], 3); // JP, ADD, JP
}

/// RND masks the random byte with NN.
#[test]
fn test_random_mask() {
    let mut vm = load(&[0xC0, 0x00]); // RND v0, 0x00
    vm.step().unwrap();
    assert_eq!(vm.registers()[0x0], 0);
}

#[test]
fn test_rom_size_limits() {
    let mut vm = Chip8Vm::new(Chip8Conf::default());
    assert!(vm.load_rom(&vec![0; MAX_ROM_SIZE]).is_ok());
    assert!(matches!(
        vm.load_rom(&vec![0; MAX_ROM_SIZE + 1]),
        Err(Chip8Error::RomTooLarge { size }) if size == MAX_ROM_SIZE + 1
    ));
}

/// Loading a second program leaves no residue of the first.
#[test]
fn test_rom_reload_resets() {
    let mut vm = load(&[0x60, 0x11, 0x61, 0x22]);
    vm.run_steps(2).unwrap();
    assert_eq!(vm.registers()[0x0], 0x11);

    vm.load_rom(&[0x00, 0xE0]).unwrap();
    assert_eq!(vm.pc(), 0x200);
    assert!(vm.registers().iter().all(|v| *v == 0));
    assert_eq!(vm.dump_ram(4).unwrap(), "0200: 00E0\n0202: 0000\n");
}

#[test]
fn test_custom_font() {
    let mut vm = load(&[0xF0, 0x29, 0xD0, 0x01]); // LD F, v0 ; DRW v0, v0, 1

    // Wrong length is rejected.
    assert!(matches!(
        vm.load_font(&[0; 10]),
        Err(Chip8Error::Font { got: 10 })
    ));

    // A replacement table is used by the draw that follows.
    vm.load_font(&[0xAA; 80]).unwrap();
    vm.run_steps(2).unwrap();
    let row: Vec<bool> = (0..8).map(|px| vm.display_buffer()[px]).collect();
    assert_eq!(row, [true, false, true, false, true, false, true, false]);
}
