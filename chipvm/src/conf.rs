//! VM configuration parameters.
//!
//! Historical interpreters disagree on a handful of behaviors. Rather than
//! hardcoding one lineage, each point of divergence is a named flag chosen
//! once at construction.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Instructions executed per frame by [`run_frame`], approximating a
/// 600 Hz machine when the host paces frames at 60 Hz.
///
/// [`run_frame`]: crate::prelude::Chip8Vm::run_frame
pub const DEFAULT_STEPS_PER_FRAME: u32 = 10;

/// VM configuration, resolved once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Chip8Conf {
    pub quirks: Quirks,
    /// What to do with an instruction word that matches no defined pattern.
    pub undefined_opcode: UndefinedOpcode,
    /// How to treat `I`-relative effective addresses past the end of memory.
    pub memory_access: MemoryAccess,
    /// Number of fetch-execute cycles per 60 Hz frame.
    pub steps_per_frame: u32,
}

impl Default for Chip8Conf {
    fn default() -> Self {
        Self {
            quirks: Quirks::default(),
            undefined_opcode: UndefinedOpcode::default(),
            memory_access: MemoryAccess::default(),
            steps_per_frame: DEFAULT_STEPS_PER_FRAME,
        }
    }
}

/// Documented behavioral variance between historical interpreters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Quirks {
    /// Which register the shift instructions 8XY6/8XYE read.
    pub shift_source: ShiftSource,
    /// Whether FX1E sets VF when the index register crosses the end of
    /// addressable memory (0x0FFF). Amiga lineage sets it, most don't.
    pub index_add_carry: bool,
    /// Whether BNNN reads the offset from Vx, with X taken from the high
    /// nibble of the target address, instead of from V0.
    pub jump_offset_vx: bool,
}

/// Operand register of the shift instructions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShiftSource {
    /// CHIP-48 lineage: shift Vx in place, Vy is unused.
    #[default]
    Vx,
    /// COSMAC VIP: shift Vy, storing the result in Vx.
    Vy,
}

/// Policy for instruction words that match no defined pattern.
///
/// Includes 0NNN machine code routines, which called native RCA 1802
/// code on the original hardware and cannot be honored here.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UndefinedOpcode {
    /// Halt with [`Chip8Error::UnknownOpcode`](crate::prelude::Chip8Error).
    #[default]
    Fault,
    /// Log a diagnostic and continue as a no-op.
    Ignore,
}

/// Policy for `I`-relative effective addresses past the end of memory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MemoryAccess {
    /// Wrap into the 12-bit memory space. Keeps historical ROMs running.
    #[default]
    Wrap,
    /// Halt with [`Chip8Error::MemoryOutOfBounds`](crate::prelude::Chip8Error).
    Fault,
}
