//! Result and errors.
use std::fmt;

use thiserror::Error;

use crate::constants::Address;

pub type Chip8Result<T> = std::result::Result<T, Chip8Error>;

#[derive(Debug, Error)]
pub enum Chip8Error {
    /// Attempt to load a program image that can't fit in memory.
    #[error("ROM of {size} bytes does not fit in program memory")]
    RomTooLarge { size: usize },
    /// Subroutine call with all nesting levels in use.
    #[error("call stack overflow at {pc:03X}")]
    StackOverflow { pc: Address },
    /// Subroutine return without a matching call.
    #[error("call stack underflow at {pc:03X}")]
    StackUnderflow { pc: Address },
    /// Instruction word that matches no defined pattern.
    #[error("unknown opcode {word:04X} at {pc:03X}")]
    UnknownOpcode { word: u16, pc: Address },
    /// Effective address past the end of memory, under the faulting
    /// memory access policy.
    #[error("memory access out of bounds at {pc:03X}: {addr:04X}")]
    MemoryOutOfBounds { addr: Address, pc: Address },
    /// Replacement fontset with the wrong length.
    #[error("fontset data must be 80 bytes, got {got}")]
    Font { got: usize },
    /// Keypad code outside 0x0-0xF.
    #[error("keycode must be in range 0 <= keycode < 16")]
    InvalidKey,
    #[error(transparent)]
    Fmt(#[from] fmt::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
