use std::io::Read;

use crate::{definitions::cpu, RomError};

#[derive(Clone, Debug, PartialEq)]
/// Represents a single rom with it's information, it is guaranteed to fit
/// into the program area of the memory.
pub struct Rom {
    /// The rom name
    name: String,
    /// The raw opcode stream
    /// stored as a u8 slice on the heap
    data: Box<[u8]>,
}

impl Rom {
    /// Will check the size of the given data
    fn check_size(size: usize) -> Result<(), RomError> {
        if size > cpu::PROGRAM_SIZE {
            log::warn!(
                "Rejecting a rom of {} bytes, the limit is {}.",
                size,
                cpu::PROGRAM_SIZE
            );
            Err(RomError::TooLarge {
                size,
                max: cpu::PROGRAM_SIZE,
            })
        } else {
            Ok(())
        }
    }

    /// Will generate a new rom based of the given data
    ///
    /// # Example
    /// ```rust
    /// # use chip::{resources::Rom, RomError};
    /// let rom = Rom::new("jump", &[0x12, 0x00]).expect("fits into memory");
    /// assert_eq!(rom.get_data(), &[0x12, 0x00]);
    ///
    /// let huge = vec![0; 0x1000];
    /// assert_eq!(
    ///     Rom::new("huge", &huge),
    ///     Err(RomError::TooLarge { size: 0x1000, max: 0xE00 })
    /// );
    /// ```
    pub fn new(name: &str, data: &[u8]) -> Result<Self, RomError> {
        Self::check_size(data.len())?;
        Ok(Rom {
            name: name.to_string(),
            data: data.into(),
        })
    }

    /// Will read exactly `len` bytes from the reader, a source that ends
    /// early or fails is reported as [`RomError::Read`].
    pub fn from_reader<R: Read>(name: &str, mut reader: R, len: usize) -> Result<Self, RomError> {
        Self::check_size(len)?;
        let mut data = vec![0; len].into_boxed_slice();
        reader.read_exact(&mut data)?;
        Ok(Rom {
            name: name.to_string(),
            data,
        })
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}
