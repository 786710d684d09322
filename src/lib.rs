//! An interpreter core for the chip8 virtual machine.
//!
//! The [`ChipSet`](chip8::ChipSet) owns all of the machine state. A driving
//! loop loads a [`Rom`](resources::Rom), calls
//! [`step`](chip8::ChipSet::step) at its instruction rate and
//! [`tick_timers`](chip8::ChipSet::tick_timers) at 60 hertz, feeds key events
//! in and reads the framebuffer out.
//!
//! ```rust
//! # use chip::{chip8::ChipSet, opcode::Operation, resources::Rom};
//! // 00E0 clears the screen, 1202 loops back onto itself
//! let rom = Rom::new("loop", &[0x00, 0xE0, 0x12, 0x02]).expect("the rom is tiny");
//! let mut chip = ChipSet::new();
//! chip.load_rom(&rom).expect("the rom fits");
//!
//! assert_eq!(chip.step(), Ok(Operation::Draw));
//! assert_eq!(chip.step(), Ok(Operation::None));
//! assert_eq!(chip.get_program_counter(), 0x202);
//! ```
pub mod chip8;
pub mod definitions;
pub mod devices;
pub mod memory;
pub mod opcode;
pub mod quirks;
pub mod resources;
pub mod timer;
mod error;

// reexporting for convinience
pub use error::*;
