//! Virtual machine.
use std::fmt::{self, Write};

use log::warn;
use rand::prelude::*;

use crate::{
    conf::{Chip8Conf, MemoryAccess, ShiftSource, UndefinedOpcode},
    constants::*,
    cpu::Chip8Cpu,
    decode,
    error::{Chip8Error, Chip8Result},
    keypad::KeyCode,
    Chip8DisplayBuffer,
};

pub struct Chip8Vm {
    cpu: Chip8Cpu,
    conf: Chip8Conf,
}

impl Chip8Vm {
    pub fn new(conf: Chip8Conf) -> Self {
        Chip8Vm {
            cpu: Chip8Cpu::new(),
            conf,
        }
    }

    /// Configuration that was used to instantiate the VM.
    pub fn config(&self) -> &Chip8Conf {
        &self.conf
    }

    /// Replace the builtin font with a caller supplied glyph table.
    ///
    /// Call after [`load_rom`](Self::load_rom), which reinstalls the
    /// builtin font as part of its reset.
    pub fn load_font(&mut self, fontset: &[u8]) -> Chip8Result<()> {
        if fontset.len() != FONTSET_DATA_LENGTH {
            return Err(Chip8Error::Font {
                got: fontset.len(),
            });
        }

        self.cpu.ram[FONTSET_START..FONTSET_START + FONTSET_DATA_LENGTH].copy_from_slice(fontset);

        Ok(())
    }

    /// Load a program image, placing byte `k` of the image at `0x200 + k`.
    ///
    /// All machine state is reset first, so no residue of a previously
    /// loaded program survives. There is no header and no validation
    /// beyond the size check.
    pub fn load_rom(&mut self, rom: &[u8]) -> Chip8Result<()> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge { size: rom.len() });
        }

        // Start with clean memory to avoid leaking the previous program.
        self.cpu.reset();

        self.cpu.ram[FONTSET_START..FONTSET_START + FONTSET_DATA_LENGTH]
            .copy_from_slice(&FONTSET);
        self.cpu.ram[MEM_START..MEM_START + rom.len()].copy_from_slice(rom);

        Ok(())
    }

    /// Read-only view of the framebuffer for the rendering collaborator.
    pub fn display_buffer(&self) -> Chip8DisplayBuffer {
        &self.cpu.display
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.cpu.registers
    }

    pub fn pc(&self) -> Address {
        self.cpu.pc
    }

    pub fn index(&self) -> Address {
        self.cpu.index
    }

    pub fn delay_timer(&self) -> u8 {
        self.cpu.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.cpu.sound_timer
    }

    /// Whether the audio collaborator should be playing a tone.
    pub fn sound_active(&self) -> bool {
        self.cpu.buzzer_state
    }

    /// Whether the machine is suspended on FX0A waiting for a keypress.
    pub fn is_waiting_for_key(&self) -> bool {
        self.cpu.key_wait
    }
}

/// Execution flow signal returned by a successful step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Flow {
    Ok,
    /// Program counter has jumped to a new address.
    ///
    /// This is useful for the caller to avoid being
    /// blocked on infinite or long running loops.
    ///
    /// This is returned when the interpreter encounters:
    ///
    /// - 1nnn (`JP addr`)
    /// - Bnnn (`JP V0, addr`)
    /// - 2nnn (`CALL addr`)
    /// - 00EE (`RET`)
    Jump,
    /// The framebuffer was mutated and is worth presenting.
    Draw,
    /// The sound timer was reloaded.
    Sound,
    /// Wait for a keypress.
    ///
    /// This is triggered by the opcode `Fx0A` (`LD Vx, K`), which stops
    /// execution until a key is pressed, and loads the key value into `Vx`.
    KeyWait,
    /// The host cancellation hook was tripped, or a previous step faulted.
    Interrupt,
}

/// Interpreter
impl Chip8Vm {
    /// Sets the keyboard key input state.
    ///
    /// A press wakes a machine suspended on FX0A; the key is latched on
    /// its next step.
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        self.cpu.set_key_state(key.into(), pressed);
    }

    /// Clear the keyboard input state, setting all keys to up.
    pub fn clear_keys(&mut self) {
        self.cpu.clear_keys()
    }

    /// Cancellation hook for host shutdown.
    ///
    /// Trips the trap flag so the next [`step`](Self::step) returns
    /// [`Flow::Interrupt`] instead of executing.
    pub fn interrupt(&mut self) {
        self.cpu.trap = true;
    }

    /// Count both timers down by one, never below zero.
    ///
    /// The host calls this once per 60 Hz frame, independently of the
    /// instruction rate. Returns whether the buzzer should be audible.
    pub fn tick_timers(&mut self) -> bool {
        self.cpu.tick_delay();
        self.cpu.tick_sound();

        // Buzzer is on while the sound timer counts down,
        // then turned off when the timer reaches zero.
        self.cpu.buzzer_state = self.cpu.sound_timer > 0;
        self.cpu.buzzer_state
    }

    /// Run a bounded number of fetch-execute cycles.
    pub fn run_steps(&mut self, step_count: usize) -> Chip8Result<Flow> {
        for _ in 0..step_count {
            if let Flow::Interrupt = self.step()? {
                return Ok(Flow::Interrupt);
            }
        }

        Ok(Flow::Ok)
    }

    /// Run one frame's worth of instructions, as configured by
    /// `steps_per_frame`.
    ///
    /// Returns early on [`Flow::KeyWait`], since no instruction can
    /// retire until the input collaborator reports a keypress, and on
    /// [`Flow::Interrupt`].
    pub fn run_frame(&mut self) -> Chip8Result<Flow> {
        for _ in 0..self.conf.steps_per_frame {
            match self.step()? {
                Flow::KeyWait => return Ok(Flow::KeyWait),
                Flow::Interrupt => return Ok(Flow::Interrupt),
                _ => {}
            }
        }

        Ok(Flow::Ok)
    }

    /// Latch the trap flag and hand the fault to the caller.
    ///
    /// A host that keeps stepping after an error observes
    /// [`Flow::Interrupt`] rather than a repeat of the fault.
    fn fault(&mut self, err: Chip8Error) -> Chip8Error {
        self.cpu.trap = true;
        err
    }

    /// Resolve an `I`-relative effective address against the configured
    /// memory access policy.
    fn effective_addr(&mut self, offset: u16, at: Address) -> Chip8Result<usize> {
        let addr = self.cpu.index.wrapping_add(offset);
        if (addr as usize) < MEM_SIZE {
            Ok(addr as usize)
        } else {
            match self.conf.memory_access {
                MemoryAccess::Wrap => Ok(addr as usize & MEM_MASK),
                MemoryAccess::Fault => Err(self.fault(Chip8Error::MemoryOutOfBounds { addr, pc: at })),
            }
        }
    }

    /// Route an instruction word that matches no defined pattern.
    fn undefined(&mut self, word: u16, at: Address) -> Chip8Result<Flow> {
        match self.conf.undefined_opcode {
            UndefinedOpcode::Fault => Err(self.fault(Chip8Error::UnknownOpcode { word, pc: at })),
            UndefinedOpcode::Ignore => {
                warn!("ignoring unknown opcode {word:04X} at {at:03X}");
                Ok(Flow::Ok)
            }
        }
    }

    /// One fetch-decode-execute cycle.
    pub fn step(&mut self) -> Chip8Result<Flow> {
        if self.cpu.trap {
            // Interrupt signal is set.
            return Ok(Flow::Interrupt);
        }

        // Each instruction is two bytes, with the opcode identity in the
        // first 4-bit nibble.
        let at = self.cpu.pc;
        let [a, b] = self.cpu.instr();
        let word = decode::word(a, b);
        let op = decode::op_code(word);
        let x = decode::op_x(word);
        let y = decode::op_y(word);
        let n = decode::op_n(word);
        let nn = decode::op_nn(word);
        let nnn = decode::op_nnn(word);

        // The counter always advances past the fetched instruction before
        // the instruction's own control flow applies.
        self.cpu.pc = self.cpu.pc.wrapping_add(2);

        let control_flow = match op {
            // Instructions identified by their full word, or by NN.
            0x0 | 0xE | 0xF => self.exec_misc(word, at, op, x, nn)?,
            // 1NNN (JP addr)
            //
            // Jump to address.
            0x1 => {
                op_trace_nnn(at, "JP", nnn);

                self.cpu.pc = nnn;

                Flow::Jump
            }
            // 2NNN (CALL addr)
            //
            // Call subroutine at NNN, remembering the address of the
            // instruction that follows the call.
            0x2 => {
                op_trace_nnn(at, "CALL", nnn);

                let return_addr = self.cpu.pc;
                if self.cpu.stack_push(return_addr).is_none() {
                    return Err(self.fault(Chip8Error::StackOverflow { pc: at }));
                }
                self.cpu.pc = nnn;

                Flow::Jump
            }
            // 3XNN (SE Vx, byte)
            //
            // Skip the next instruction if register VX equals value NN.
            0x3 => {
                op_trace_xnn(at, "SE", x, nn);

                if self.cpu.registers[x as usize] == nn {
                    self.cpu.pc = self.cpu.pc.wrapping_add(2);
                }

                Flow::Ok
            }
            // 4XNN (SNE Vx, byte)
            //
            // Skip the next instruction if register VX does not equal value NN.
            0x4 => {
                op_trace_xnn(at, "SNE", x, nn);

                if self.cpu.registers[x as usize] != nn {
                    self.cpu.pc = self.cpu.pc.wrapping_add(2);
                }

                Flow::Ok
            }
            // 5XY0 (SE Vx, Vy)
            //
            // Skip the next instruction if register VX equals register VY.
            0x5 if n == 0 => {
                op_trace_xy(at, "SE", x, y);

                if self.cpu.registers[x as usize] == self.cpu.registers[y as usize] {
                    self.cpu.pc = self.cpu.pc.wrapping_add(2);
                }

                Flow::Ok
            }
            // 6XNN (LD Vx, byte)
            //
            // Set register VX to value NN.
            0x6 => {
                op_trace_xnn(at, "LD", x, nn);

                self.cpu.registers[x as usize] = nn;

                Flow::Ok
            }
            // 7XNN (ADD Vx, byte)
            //
            // Add value NN to register VX. The carry flag is not touched.
            0x7 => {
                op_trace_xnn(at, "ADD", x, nn);

                let vx = self.cpu.registers[x as usize];
                self.cpu.registers[x as usize] = vx.wrapping_add(nn);

                Flow::Ok
            }
            // Register-register arithmetic, identified by N.
            0x8 => self.exec_alu(word, at, x, y, n)?,
            // 9XY0 (SNE Vx, Vy)
            //
            // Skip the next instruction if register VX does not equal register VY.
            0x9 if n == 0 => {
                op_trace_xy(at, "SNE", x, y);

                if self.cpu.registers[x as usize] != self.cpu.registers[y as usize] {
                    self.cpu.pc = self.cpu.pc.wrapping_add(2);
                }

                Flow::Ok
            }
            // ANNN (LD I, addr)
            //
            // Set index register I to value NNN.
            0xA => {
                op_trace_nnn(at, "LD I", nnn);

                self.cpu.index = nnn;

                Flow::Ok
            }
            // BNNN (JP V0, addr)
            //
            // Jump to NNN plus an offset register. Historically V0; the
            // CHIP-48 lineage reads Vx with X taken from the high nibble
            // of the target.
            0xB => {
                op_trace_nnn(at, "JP V0", nnn);

                let offset = if self.conf.quirks.jump_offset_vx {
                    self.cpu.registers[x as usize]
                } else {
                    self.cpu.registers[0]
                };
                self.cpu.pc = nnn.wrapping_add(offset as u16);

                Flow::Jump
            }
            // CXNN (RND Vx, byte)
            //
            // Set register VX to the bitwise AND of a random byte and NN.
            0xC => {
                op_trace_xnn(at, "RND", x, nn);

                let mut rng = thread_rng();
                self.cpu.registers[x as usize] = rng.gen::<u8>() & nn;

                Flow::Ok
            }
            // DXYN (DRW Vx, Vy, nibble)
            //
            // Draw an 8 pixel wide, N pixel high sprite read from memory at
            // index register I, at the coordinates held in VX and VY.
            //
            // The starting coordinate wraps around the display edges. The
            // sprite itself does not: rows and columns falling outside the
            // display are clipped.
            //
            // Sprite bits are XORed into the framebuffer. VF is set to 1
            // when any pixel is erased by the draw, 0 otherwise, judged
            // over the whole sprite.
            0xD => {
                op_trace_xyn(at, "DRW", x, y, n);

                let x0 = self.cpu.registers[x as usize] as usize % DISPLAY_WIDTH;
                let y0 = self.cpu.registers[y as usize] as usize % DISPLAY_HEIGHT;
                let mut erased = false;

                for row in 0..n as usize {
                    let py = y0 + row;
                    if py >= DISPLAY_HEIGHT {
                        break;
                    }

                    let addr = self.effective_addr(row as u16, at)?;
                    let bits = self.cpu.ram[addr];

                    // Each row is 8 bits, most significant bit leftmost.
                    for col in 0..8 {
                        let px = x0 + col;
                        if px >= DISPLAY_WIDTH {
                            break;
                        }
                        if (bits >> (7 - col)) & 1 == 0 {
                            continue;
                        }

                        let d = px + py * DISPLAY_WIDTH;
                        let old_px = self.cpu.display[d];

                        // XOR erases a pixel when the old value is also 1.
                        erased |= old_px;
                        self.cpu.display[d] = !old_px;
                    }
                }

                // If a pixel was erased, then a collision occurred.
                self.cpu.registers[0xF] = erased as u8;

                Flow::Draw
            }
            _ => self.undefined(word, at)?,
        };

        Ok(control_flow)
    }

    /// Execute an arithmetic instruction.
    #[inline]
    fn exec_alu(&mut self, word: u16, at: Address, x: u8, y: u8, n: u8) -> Chip8Result<Flow> {
        let vx = self.cpu.registers[x as usize];
        let vy = self.cpu.registers[y as usize];

        match n {
            // 8XY0 (LD Vx, Vy)
            //
            // Store the value of register VY in register VX.
            0x0 => {
                op_trace_xy(at, "LD", x, y);

                self.cpu.registers[x as usize] = vy;
            }
            // 8XY1 (OR Vx, Vy)
            //
            // Performs bitwise OR on VX and VY, and stores the result in VX.
            0x1 => {
                op_trace_xy(at, "OR", x, y);

                self.cpu.registers[x as usize] = vx | vy;
            }
            // 8XY2 (AND Vx, Vy)
            //
            // Performs bitwise AND on VX and VY, and stores the result in VX.
            0x2 => {
                op_trace_xy(at, "AND", x, y);

                self.cpu.registers[x as usize] = vx & vy;
            }
            // 8XY3 (XOR Vx, Vy)
            //
            // Performs bitwise XOR on VX and VY, and stores the result in VX.
            0x3 => {
                op_trace_xy(at, "XOR", x, y);

                self.cpu.registers[x as usize] = vx ^ vy;
            }
            // 8XY4 (ADD Vx, Vy)
            //
            // Adds VY to VX. Overflow wraps, and sets VF to 1, else 0.
            // The flag is written after the result so VF as a destination
            // still receives the flag.
            0x4 => {
                op_trace_xy(at, "ADD", x, y);

                let (result, carry) = vx.overflowing_add(vy);
                self.cpu.registers[x as usize] = result;
                self.cpu.registers[0xF] = carry as u8;
            }
            // 8XY5 (SUB Vx, Vy)
            //
            // Subtracts VY from VX, wrapping. VF is set to 0 when there is
            // a borrow, 1 when there isn't.
            0x5 => {
                op_trace_xy(at, "SUB", x, y);

                let (result, borrow) = vx.overflowing_sub(vy);
                self.cpu.registers[x as usize] = result;
                self.cpu.registers[0xF] = !borrow as u8;
            }
            // 8XY6 (SHR Vx {, Vy})
            //
            // Shift right by 1. VF receives the bit shifted out. The
            // operand register is a configured quirk.
            0x6 => {
                op_trace_xy(at, "SHR", x, y);

                let operand = match self.conf.quirks.shift_source {
                    ShiftSource::Vx => vx,
                    ShiftSource::Vy => vy,
                };
                self.cpu.registers[x as usize] = operand >> 1;
                self.cpu.registers[0xF] = operand & 1;
            }
            // 8XY7 (SUBN Vx, Vy)
            //
            // Subtracts VX from VY, storing the result in VX. VF is set to
            // 0 when there is a borrow, 1 when there isn't.
            0x7 => {
                op_trace_xy(at, "SUBN", x, y);

                let (result, borrow) = vy.overflowing_sub(vx);
                self.cpu.registers[x as usize] = result;
                self.cpu.registers[0xF] = !borrow as u8;
            }
            // 8XYE (SHL Vx {, Vy})
            //
            // Shift left by 1, truncating to 8 bits. VF receives the bit
            // shifted out. The operand register is a configured quirk.
            0xE => {
                op_trace_xy(at, "SHL", x, y);

                let operand = match self.conf.quirks.shift_source {
                    ShiftSource::Vx => vx,
                    ShiftSource::Vy => vy,
                };
                self.cpu.registers[x as usize] = operand << 1;
                self.cpu.registers[0xF] = operand >> 7;
            }
            _ => return self.undefined(word, at),
        }

        Ok(Flow::Ok)
    }

    /// Execute a system, keypad or timer instruction.
    #[inline]
    fn exec_misc(&mut self, word: u16, at: Address, op: u8, x: u8, nn: u8) -> Chip8Result<Flow> {
        match (op, nn) {
            // 00E0 (CLS)
            //
            // Clear display.
            (0x0, 0xE0) => {
                op_trace(at, "CLS");

                self.cpu.clear_display();
            }
            // 00EE (RET)
            //
            // Return from a subroutine. Set the program counter to the
            // address at the top of the stack.
            (0x0, 0xEE) => {
                op_trace(at, "RET");

                match self.cpu.stack_pop() {
                    Some(addr) => self.cpu.pc = addr,
                    None => return Err(self.fault(Chip8Error::StackUnderflow { pc: at })),
                }

                return Ok(Flow::Jump);
            }
            // EX9E (SKP Vx)
            //
            // Skip the next instruction if the key named by VX is pressed.
            (0xE, 0x9E) => {
                op_trace_xk(at, "SKP", x, "K");

                if self.cpu.key_state(self.cpu.registers[x as usize] & 0xF) {
                    self.cpu.pc = self.cpu.pc.wrapping_add(2);
                }
            }
            // EXA1 (SKNP Vx)
            //
            // Skip the next instruction if the key named by VX is not pressed.
            (0xE, 0xA1) => {
                op_trace_xk(at, "SKNP", x, "K");

                if !self.cpu.key_state(self.cpu.registers[x as usize] & 0xF) {
                    self.cpu.pc = self.cpu.pc.wrapping_add(2);
                }
            }
            // FX07 (LD Vx, DT)
            //
            // Set Vx = delay timer value.
            (0xF, 0x07) => {
                op_trace_xk(at, "LD", x, "DT");

                self.cpu.registers[x as usize] = self.cpu.delay_timer;
            }
            // FX0A (LD Vx, K)
            //
            // Wait for a key press, store the value of the key in Vx.
            //
            // Suspension point: the program counter is rewound so this
            // instruction re-executes on every step until the input
            // collaborator reports a pressed key.
            (0xF, 0x0A) => {
                op_trace_xk(at, "LD", x, "K");

                match self.cpu.first_key() {
                    Some(k) => {
                        self.cpu.registers[x as usize] = k;
                        self.cpu.key_wait = false;
                    }
                    None => {
                        // Rewind the program counter to stall the machine.
                        self.cpu.pc = at;
                        self.cpu.key_wait = true;
                        return Ok(Flow::KeyWait);
                    }
                }
            }
            // FX15 (LD DT, Vx)
            //
            // Set delay timer = Vx.
            (0xF, 0x15) => {
                op_trace_kx(at, "LD", "DT", x);

                self.cpu.delay_timer = self.cpu.registers[x as usize];
            }
            // FX18 (LD ST, Vx)
            //
            // Set sound timer = Vx.
            (0xF, 0x18) => {
                op_trace_kx(at, "LD", "ST", x);

                self.cpu.sound_timer = self.cpu.registers[x as usize];
                self.cpu.buzzer_state = self.cpu.sound_timer > 0;

                return Ok(Flow::Sound);
            }
            // FX1E (ADD I, Vx)
            //
            // Add Vx to I, wrapping at 16 bits. Whether VF reports the
            // index crossing the end of memory is a configured quirk.
            (0xF, 0x1E) => {
                op_trace_kx(at, "ADD", "I", x);

                let sum = self
                    .cpu
                    .index
                    .wrapping_add(self.cpu.registers[x as usize] as u16);
                self.cpu.index = sum;
                if self.conf.quirks.index_add_carry {
                    self.cpu.registers[0xF] = (sum as usize > MEM_MASK) as u8;
                }
            }
            // FX29 (LD F, Vx)
            //
            // Set I to the location of the builtin glyph for the hex digit
            // in the low nibble of Vx.
            (0xF, 0x29) => {
                op_trace_kx(at, "LD", "F", x);

                let digit = self.cpu.registers[x as usize] & 0xF;
                self.cpu.index =
                    (FONTSET_START + digit as usize * FONTSET_GLYPH_HEIGHT) as Address;
            }
            // FX33 (LD B, Vx)
            //
            // Store the three decimal digits of Vx in memory at I, I+1 and
            // I+2, most significant first.
            (0xF, 0x33) => {
                op_trace_kx(at, "LD", "B", x);

                let vx = self.cpu.registers[x as usize];
                let digits = [vx / 100, vx / 10 % 10, vx % 10];
                for (k, digit) in digits.into_iter().enumerate() {
                    let addr = self.effective_addr(k as u16, at)?;
                    self.cpu.ram[addr] = digit;
                }
            }
            // FX55 (LD [I], Vx)
            //
            // Store registers V0 through Vx in memory starting at location I.
            (0xF, 0x55) => {
                op_trace_kx(at, "LD", "[I]", x);

                for v in 0..=x as usize {
                    let addr = self.effective_addr(v as u16, at)?;
                    self.cpu.ram[addr] = self.cpu.registers[v];
                }
            }
            // FX65 (LD Vx, [I])
            //
            // Read registers V0 through Vx from memory starting at location I.
            (0xF, 0x65) => {
                op_trace_xk(at, "LD", x, "[I]");

                for v in 0..=x as usize {
                    let addr = self.effective_addr(v as u16, at)?;
                    self.cpu.registers[v] = self.cpu.ram[addr];
                }
            }
            _ => return self.undefined(word, at),
        }

        Ok(Flow::Ok)
    }
}

/// Troubleshooting
impl Chip8Vm {
    /// Returns the contents of program memory as a human readable string.
    pub fn dump_ram(&self, count: usize) -> Result<String, fmt::Error> {
        let iter = self
            .cpu
            .ram
            .iter()
            .enumerate()
            .skip(MEM_START)
            .take(count)
            .step_by(2);
        let mut buf = String::new();

        for (i, op) in iter {
            writeln!(buf, "{:04X}: {:02X}{:02X}", i, op, self.cpu.ram[i + 1])?;
        }

        Ok(buf)
    }

    /// Returns the framebuffer as a human readable string.
    pub fn dump_display(&self) -> Result<String, fmt::Error> {
        let mut buf = String::new();

        for y in 0..DISPLAY_HEIGHT {
            for x in 0..DISPLAY_WIDTH {
                if self.cpu.display[x + y * DISPLAY_WIDTH] {
                    write!(buf, "#")?;
                } else {
                    write!(buf, ".")?;
                }
            }
            writeln!(buf)?;
        }

        Ok(buf)
    }
}

#[inline]
fn op_trace(at: Address, name: &str) {
    log::trace!("{at:03X}: {name:4}");
}

#[inline]
fn op_trace_nnn(at: Address, name: &str, nnn: u16) {
    log::trace!("{at:03X}: {name:4} {nnn:03X}");
}

#[inline]
fn op_trace_xnn(at: Address, name: &str, x: u8, nn: u8) {
    log::trace!("{at:03X}: {name:4} V{x:X}, {nn:02X}");
}

#[inline]
fn op_trace_xy(at: Address, name: &str, x: u8, y: u8) {
    log::trace!("{at:03X}: {name:4} V{x:X}, V{y:X}");
}

#[inline]
fn op_trace_xyn(at: Address, name: &str, x: u8, y: u8, n: u8) {
    log::trace!("{at:03X}: {name:4} V{x:X}, V{y:X}, {n:X}");
}

#[inline]
fn op_trace_xk(at: Address, name: &str, x: u8, k: &str) {
    log::trace!("{at:03X}: {name:4} V{x:X}, {k}");
}

#[inline]
fn op_trace_kx(at: Address, name: &str, k: &str, x: u8) {
    log::trace!("{at:03X}: {name:4} {k}, V{x:X}");
}
