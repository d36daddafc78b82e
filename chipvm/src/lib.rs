mod conf;
pub mod constants;
mod cpu;
mod decode;
mod error;
mod keypad;
mod vm;

use self::constants::DISPLAY_BUFFER_SIZE;

/// Read-only view of the 64x32 monochrome framebuffer, row-major with
/// the origin top-left. `true` is a lit pixel.
pub type Chip8DisplayBuffer<'a> = &'a [bool; DISPLAY_BUFFER_SIZE];

/// Version of this implementation.
pub const IMPL_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    pub use super::{
        conf::{Chip8Conf, MemoryAccess, Quirks, ShiftSource, UndefinedOpcode},
        error::{Chip8Error, Chip8Result},
        keypad::KeyCode,
        vm::{Chip8Vm, Flow},
        Chip8DisplayBuffer,
    };
}
