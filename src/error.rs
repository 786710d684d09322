use std::io;

use thiserror::Error;

use crate::opcode::Opcode;

/// Everything that can go wrong while the chipset executes a program.
///
/// All of these are fatal to the running session, the chipset halts on the
/// failing instruction.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ProcessError {
    #[error("An unsupported opcode {opcode:#06X} was found at {pc:#06X}.")]
    UnknownOpcode { opcode: Opcode, pc: usize },
    #[error("Invalid stack state '{0}'.")]
    Stack(#[from] StackError),
    #[error("Memory access at {address:#06X} is out of bounds, memory size is {len:#06X}.")]
    MemoryOutOfBounds { address: usize, len: usize },
    #[error("The chipset was halted by an earlier error.")]
    Halted,
}

/// Raised by the decoder, the chipset attaches the program counter.
#[derive(Error, Debug, PartialEq, Clone, Copy)]
#[error("An unsupported opcode was used {0:#06X?}.")]
pub struct InvalidOpcode(pub Opcode);

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum StackError {
    #[error("Stack is full!")]
    Overflow,
    #[error("Stack is empty!")]
    Underflow,
}

/// Errors during rom ingestion, the caller may retry with another rom.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum RomError {
    #[error("The rom is {size} bytes large, but only {max} bytes fit into memory.")]
    TooLarge { size: usize, max: usize },
    #[error("Unable to read the rom data '{0}'.")]
    Read(String),
}

impl From<io::Error> for RomError {
    fn from(err: io::Error) -> Self {
        RomError::Read(err.to_string())
    }
}
