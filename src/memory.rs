//! The checked 4KB address space of the chipset.
//!
//! - `0x000-0x04F` - The built in `4x5` pixel font set (`0-F`)
//! - `0x050-0x1FF` - Reserved for the interpreter
//! - `0x200-0xFFF` - Program ROM and work RAM
use crate::{
    definitions::{display::fontset, memory},
    opcode::{self, Opcode},
    ProcessError,
};

/// A fixed size arena, every access is checked against its bounds and
/// reported as [`ProcessError::MemoryOutOfBounds`].
#[derive(Clone)]
pub struct Memory {
    data: Box<[u8; memory::SIZE]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Creates zeroed memory with the font set in place.
    pub fn new() -> Self {
        let mut data = Box::new([0; memory::SIZE]);
        data[fontset::LOCATION..(fontset::LOCATION + fontset::FONTSET.len())]
            .copy_from_slice(&fontset::FONTSET);
        Self { data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn out_of_bounds(&self, address: usize) -> ProcessError {
        ProcessError::MemoryOutOfBounds {
            address,
            len: self.len(),
        }
    }

    /// Will check that `len` bytes starting at `address` are inside memory.
    fn range(&self, address: usize, len: usize) -> Result<std::ops::Range<usize>, ProcessError> {
        match address.checked_add(len) {
            Some(end) if end <= self.len() => Ok(address..end),
            // report the first address that is not accessible
            _ => Err(self.out_of_bounds(address.max(self.len()))),
        }
    }

    /// Reads the big endian opcode at `pointer`.
    pub fn opcode(&self, pointer: usize) -> Result<Opcode, ProcessError> {
        opcode::build_opcode(&self.data[..], pointer)
    }

    pub fn read(&self, address: usize) -> Result<u8, ProcessError> {
        self.data
            .get(address)
            .copied()
            .ok_or_else(|| self.out_of_bounds(address))
    }

    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8], ProcessError> {
        let range = self.range(address, len)?;
        Ok(&self.data[range])
    }

    pub fn slice_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8], ProcessError> {
        let range = self.range(address, len)?;
        Ok(&mut self.data[range])
    }

    /// Copies `data` into memory starting at `address`, nothing is written
    /// if the data does not fit.
    pub fn write(&mut self, address: usize, data: &[u8]) -> Result<(), ProcessError> {
        self.slice_mut(address, data.len())?.copy_from_slice(data);
        Ok(())
    }

    /// The complete raw memory.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}
