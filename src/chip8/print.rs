//! The pretty print implementation for the [`ChipSet`](super::ChipSet), a
//! full state dump used for debugging a running rom.

use super::{ChipSet, ExecutionState};
use crate::definitions::cpu;
use once_cell::sync::Lazy;
use std::fmt::{self, Write};

/// The amount of entries printed per row, has to be bigger then 0.
const HEX_PRINT_STEP: usize = 8;

const END_OF_LINE: char = '\n';
const INDENT_FILLAMENT: char = '\t';
const INDENT_SIZE: usize = 2;

/// Will add an indent post processing
fn indent_helper(text: &mut String, indent: usize) {
    for _ in 0..indent {
        text.push(INDENT_FILLAMENT);
    }
}

/// Removes the trailing newline of a block.
fn trim_block(text: &mut String) {
    if text.ends_with(END_OF_LINE) {
        text.pop();
    }
}

static INTEGER_LEN: Lazy<usize> = Lazy::new(|| {
    let mut string = String::new();
    // writing into a string can not fail
    let _ = integer_print::formatter(&mut string, 0u8);
    string.len()
});

static POINTER_LEN: Lazy<usize> = Lazy::new(|| {
    let mut string = String::new();
    let _ = pointer_print::formatter(&mut string, 0, 0);
    string.len()
});

/// a row is a bit bigger then this, used for preallocating
static LENLINE: Lazy<usize> =
    Lazy::new(|| INDENT_SIZE + HEX_PRINT_STEP * (*INTEGER_LEN + 1) + 1 + *POINTER_LEN);

/// Handles all the printing of the pointer values.
mod pointer_print {
    use std::fmt::{self, Write};

    /// will format the pointers of a row
    pub(super) fn formatter(line: &mut String, from: usize, to: usize) -> fmt::Result {
        write!(line, "{:#06X} - {:#06X} :", from, to)
    }
}

/// handles printing of any and all of integers.
mod integer_print {
    use super::{pointer_print, END_OF_LINE, HEX_PRINT_STEP};
    use num_traits::Unsigned;
    use std::fmt::{self, Write};

    /// will format all integer types
    pub(super) fn formatter<T>(line: &mut String, data: T) -> fmt::Result
    where
        T: fmt::UpperHex + Unsigned + Copy,
    {
        write!(line, "{:#06X}", data)
    }

    /// will pretty print all the integer data given, a row per
    /// [`HEX_PRINT_STEP`] entries
    pub(super) fn printer<T>(data: &[T], indent: usize) -> Result<String, fmt::Error>
    where
        T: fmt::UpperHex + Unsigned + Copy,
    {
        let mut res = String::with_capacity(*super::LENLINE * (data.len() / HEX_PRINT_STEP + 1));

        for (row, chunk) in data.chunks(HEX_PRINT_STEP).enumerate() {
            let from = row * HEX_PRINT_STEP;
            super::indent_helper(&mut res, indent);
            pointer_print::formatter(&mut res, from, from + chunk.len() - 1)?;

            for entry in chunk {
                res.push(' ');
                formatter(&mut res, *entry)?;
            }
            res.push(END_OF_LINE);
        }
        super::trim_block(&mut res);
        Ok(res)
    }
}

/// Handles the memory dump, consecutive rows of zeros are collapsed
/// into a single one.
mod opcode_print {
    use super::{integer_print, pointer_print, END_OF_LINE, HEX_PRINT_STEP};
    use crate::{definitions::memory, opcode::Opcode};
    use once_cell::sync::Lazy;
    use std::fmt::{self, Write};

    /// The amount of bytes in a row, as an opcode is two bytes long.
    const POINTER_INCREMENT: usize = HEX_PRINT_STEP * memory::opcodes::SIZE;
    /// Marks a block of rows that only hold zeros.
    const FILLER_BASE: &str = "...";

    /// Stands in for the opcodes of a zero row, keeps the row width.
    static ZERO_FILLER: Lazy<String> = Lazy::new(|| {
        let mut formatted = String::new();
        let _ = integer_print::formatter(&mut formatted, 0u16);
        match HEX_PRINT_STEP {
            1 => formatted,
            2 => format!("{} {}", formatted, formatted),
            _ => {
                let length = formatted.len() * (HEX_PRINT_STEP - 2) + (HEX_PRINT_STEP - 1)
                    - FILLER_BASE.len();
                let filler = " ".repeat(length / 2);
                format!(
                    "{}{}{}{}{}",
                    formatted, filler, FILLER_BASE, filler, formatted
                )
            }
        }
    });

    /// a single row of opcodes
    struct Row {
        from: usize,
        to: usize,
        data: [Opcode; HEX_PRINT_STEP],
        only_null: bool,
    }

    impl fmt::Display for Row {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut res = String::with_capacity(*super::LENLINE);
            pointer_print::formatter(&mut res, self.from, self.to)?;

            if self.only_null {
                res.push(' ');
                res.push_str(&ZERO_FILLER);
            } else {
                for entry in self.data.iter() {
                    res.push(' ');
                    integer_print::formatter(&mut res, *entry)?;
                }
            }
            f.write_str(&res)
        }
    }

    /// will pretty print the content of the raw memory, the addresses are
    /// counted from the start of the given slice
    pub(super) fn printer(memory: &[u8], indent: usize) -> Result<String, fmt::Error> {
        let mut rows: Vec<Row> = Vec::with_capacity(memory.len() / POINTER_INCREMENT + 1);

        for (index, chunk) in memory.chunks(POINTER_INCREMENT).enumerate() {
            let from = index * POINTER_INCREMENT;
            let mut data = [0; HEX_PRINT_STEP];

            for (opcode, bytes) in data.iter_mut().zip(chunk.chunks(memory::opcodes::SIZE)) {
                // an odd trailing byte is printed as the high byte
                let low = bytes.get(1).copied().unwrap_or(0);
                *opcode = Opcode::from_be_bytes([bytes[0], low]);
            }

            let mut row = Row {
                from,
                to: from + chunk.len() - 1,
                only_null: data.iter().all(|opcode| *opcode == 0),
                data,
            };

            if row.only_null {
                if let Some(last) = rows.last() {
                    if last.only_null {
                        row.from = last.from;
                        rows.pop();
                    }
                }
            }
            rows.push(row);
        }

        let mut string = String::with_capacity((*super::LENLINE + 1) * rows.len());
        for row in rows {
            super::indent_helper(&mut string, indent);
            write!(string, "{}{}", row, END_OF_LINE)?;
        }
        super::trim_block(&mut string);
        Ok(string)
    }
}

/// Handles all the boolean data types.
mod bool_print {
    use super::{pointer_print, END_OF_LINE, HEX_PRINT_STEP};
    use once_cell::sync::Lazy;
    use std::fmt;

    /// the prepared true string
    static TRUE: Lazy<String> = Lazy::new(|| formatter("true"));
    /// the prepared false string
    static FALSE: Lazy<String> = Lazy::new(|| formatter("false"));

    /// pads the message to the width of an integer
    fn formatter(message: &str) -> String {
        format!("{:width$}", message, width = *super::INTEGER_LEN)
    }

    pub(super) fn printer(data: &[bool], indent: usize) -> Result<String, fmt::Error> {
        let mut res = String::with_capacity(*super::LENLINE * (data.len() / HEX_PRINT_STEP + 1));
        let check_type = |val: bool| if val { &*TRUE } else { &*FALSE };

        for (row, chunk) in data.chunks(HEX_PRINT_STEP).enumerate() {
            let from = row * HEX_PRINT_STEP;
            super::indent_helper(&mut res, indent);
            pointer_print::formatter(&mut res, from, from + chunk.len() - 1)?;

            for value in chunk {
                res.push(' ');
                res.push_str(check_type(*value));
            }
            // the padding of the last entry is not needed
            let trimmed = res.trim_end().len();
            res.truncate(trimmed);
            res.push(END_OF_LINE);
        }
        super::trim_block(&mut res);
        Ok(res)
    }
}

/// A single value on its own indented line.
fn single_line(value: impl fmt::Display) -> String {
    let mut line = String::with_capacity(INDENT_SIZE + *INTEGER_LEN);
    indent_helper(&mut line, INDENT_SIZE);
    let _ = write!(line, "{}", value);
    line
}

fn integer_line(value: usize) -> Result<String, fmt::Error> {
    let mut line = String::with_capacity(INDENT_SIZE + *INTEGER_LEN);
    indent_helper(&mut line, INDENT_SIZE);
    integer_print::formatter(&mut line, value)?;
    Ok(line)
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionState::Running => write!(f, "running"),
            ExecutionState::AwaitingKeyRelease { register } => {
                write!(f, "awaiting key release into V{:X}", register)
            }
            ExecutionState::Halted => write!(f, "halted"),
        }
    }
}

impl fmt::Display for ChipSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nam = single_line(&self.name);
        let sts = single_line(self.state);
        let opc = integer_line(self.opcode as usize)?;
        let prc = integer_line(self.program_counter)?;
        let idx = integer_line(self.index_register as usize)?;
        let tim = integer_print::printer(
            &[self.delay_timer.get_value(), self.sound_timer.get_value()],
            INDENT_SIZE,
        )?;

        let mem = opcode_print::printer(self.memory.as_slice(), INDENT_SIZE)?;
        let key = bool_print::printer(self.keyboard.get_keys(), INDENT_SIZE)?;
        let reg = integer_print::printer(&self.registers, INDENT_SIZE)?;

        // the unused stack entries are shown as zeros
        let mut stack = [0usize; cpu::stack::SIZE];
        stack[..self.stack.len()].copy_from_slice(&self.stack);
        let sta = integer_print::printer(&stack, INDENT_SIZE)?;

        write!(
            f,
            "Chipset {{\n\
                \tProgram Name :\n{}\n\
                \tState :\n{}\n\
                \tOpcode :\n{}\n\
                \tProgram Counter :\n{}\n\
                \tIndex Register :\n{}\n\
                \tTimers :\n{}\n\
                \tMemory :\n{}\n\
                \tKeyboard :\n{}\n\
                \tStack :\n{}\n\
                \tRegister :\n{}\n\
                }}",
            nam, sts, opc, prc, idx, tim, mem, key, sta, reg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::get_default_chip;
    use super::*;

    #[test]
    fn test_indent_helper() {
        let mut text = String::new();
        indent_helper(&mut text, 2);
        text.push_str("some text");
        assert_eq!(&text, "\t\tsome text");
    }

    #[test]
    fn test_integer_printer() {
        let data: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 0xAB, 0xFF];
        let res = integer_print::printer(&data, 1).expect("formatting into a string");
        assert_eq!(
            res,
            "\t0x0000 - 0x0007 : 0x0000 0x0001 0x0002 0x0003 0x0004 0x0005 0x0006 0x0007\n\
             \t0x0008 - 0x0009 : 0x00AB 0x00FF"
        );
    }

    #[test]
    fn test_bool_printer() {
        let data = (0..16).map(|i| i % 2 != 0).collect::<Vec<_>>();
        let res = bool_print::printer(&data, 0).expect("formatting into a string");
        assert_eq!(
            res,
            "0x0000 - 0x0007 : false  true   false  true   false  true   false  true\n\
             0x0008 - 0x000F : false  true   false  true   false  true   false  true"
        );
    }

    #[test]
    fn test_memory_rows_collapse() {
        let mut memory = [0u8; 0x40];
        memory[0x20] = 0x12;
        memory[0x21] = 0x34;
        let res = opcode_print::printer(&memory, 0).expect("formatting into a string");
        let filler = format!("0x0000{0}...{0}0x0000", " ".repeat(20));
        assert_eq!(
            res,
            format!(
                "0x0000 - 0x001F : {0}\n\
                 0x0020 - 0x002F : 0x1234 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                 0x0030 - 0x003F : {0}",
                filler
            )
        );
    }

    #[test]
    /// checks the interesting parts of a full dump
    fn test_full_print() {
        let mut chip = get_default_chip();
        chip.registers = [0; cpu::register::SIZE];
        chip.registers[0xF] = 0x01;
        chip.stack.push(0x0202);
        chip.key_down(0x1);

        let output = format!("{}", chip);

        assert!(output.starts_with("Chipset {\n\tProgram Name :\n\t\tloop\n"));
        assert!(output.ends_with("\n}"));
        for line in &[
            "\tState :\n\t\trunning\n",
            "\tProgram Counter :\n\t\t0x0200\n",
            "\t\t0x0000 - 0x000F : 0xF090 0x9090 0xF020 0x6020 0x2070 0xF010 0xF080 0xF0F0\n",
            "\t\t0x0200 - 0x020F : 0x00E0 0x1202 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n",
            "\t\t0x0000 - 0x0007 : false  true   false  false  false  false  false  false\n",
            "\tStack :\n\t\t0x0000 - 0x0007 : 0x0202 0x0000",
            "\t\t0x0008 - 0x000F : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0001\n}",
        ] {
            assert!(output.contains(line), "missing {:?} in\n{}", line, output);
        }
    }
}
