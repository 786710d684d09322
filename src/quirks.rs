//! The behavioural variants historical chip8 interpreters disagree on.
//!
//! The [`Default`] is the reference set: shifts read `VY`, `BNNN` adds `V0`,
//! `FX55`/`FX65` advance `I` and the logic opcodes clear `VF`.
//!
//! ```rust
//! # use chip::quirks::*;
//! let quirks = Quirks::default()
//!     .with_shift_source(ShiftSource::VX)
//!     .with_load_store_increments_index(false);
//! assert_eq!(quirks.shift_source, ShiftSource::VX);
//! assert_eq!(quirks.jump_offset, JumpOffset::V0);
//! ```

/// Which register `8XY6` and `8XYE` shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftSource {
    /// `VX = VY >> 1`, the original COSMAC VIP behaviour
    VY,
    /// `VX = VX >> 1`, `VY` is ignored
    VX,
}

/// Which register `BNNN` adds to the jump target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOffset {
    /// `PC = NNN + V0`
    V0,
    /// `PC = XNN + VX`
    VX,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    pub shift_source: ShiftSource,
    pub jump_offset: JumpOffset,
    /// `FX55`/`FX65` leave `I` advanced by `X + 1`
    pub load_store_increments_index: bool,
    /// `8XY1`, `8XY2` and `8XY3` set `VF` to zero
    pub logic_resets_flag: bool,
}

impl Default for Quirks {
    fn default() -> Self {
        Self {
            shift_source: ShiftSource::VY,
            jump_offset: JumpOffset::V0,
            load_store_increments_index: true,
            logic_resets_flag: true,
        }
    }
}

impl Quirks {
    pub fn with_shift_source(mut self, source: ShiftSource) -> Self {
        self.shift_source = source;
        self
    }

    pub fn with_jump_offset(mut self, offset: JumpOffset) -> Self {
        self.jump_offset = offset;
        self
    }

    pub fn with_load_store_increments_index(mut self, increments: bool) -> Self {
        self.load_store_increments_index = increments;
        self
    }

    pub fn with_logic_resets_flag(mut self, resets: bool) -> Self {
        self.logic_resets_flag = resets;
        self
    }
}
