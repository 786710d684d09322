use crate::{
    definitions::{cpu, display},
    opcode::{
        Address, Arithmetic, ArithmeticOpcode, ChipOpcodes, Constant, Key, KeyOpcode, Misc,
        MiscOpcode, Operation, ProgramCounterStep, Skip, Sprite, System,
    },
    quirks::{JumpOffset, ShiftSource},
    ProcessError,
};

use super::{ChipSet, ExecutionState};

/// the width of a sprite row in pixels
const SPRITE_WIDTH: usize = 8;

impl ChipSet {
    #[inline]
    fn index(&self) -> usize {
        self.index_register as usize
    }

    /// Moves `I` past a `FX55`/`FX65` block if the quirk asks for it.
    fn increment_index(&mut self, x: usize) {
        if self.quirks.load_store_increments_index {
            self.index_register = self.index_register.wrapping_add(x as u16 + 1);
        }
    }

    fn set_flag(&mut self, flag: bool) {
        self.registers[cpu::register::LAST] = flag as u8;
    }
}

impl ChipOpcodes for ChipSet {
    fn system(&mut self, opcode: &System) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        match opcode {
            System::Clear => {
                // 00E0
                // clear display
                for row in self.display.iter_mut() {
                    for pixel in row.iter_mut() {
                        *pixel = false;
                    }
                }
                self.redraw = true;
                self.pause = true;
                Ok((ProgramCounterStep::Next, Operation::Draw))
            }
            System::Return => {
                // 00EE
                // Return from sub routine => pop from stack
                let pc = self.pop_stack()?;
                Ok((ProgramCounterStep::Jump(pc), Operation::None))
            }
        }
    }

    fn jump(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // 1NNN
        Ok(ProgramCounterStep::Jump(opcode.nnn))
    }

    fn call(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // 2NNN
        // the counter already points to the instruction after the call
        self.push_stack(self.program_counter)?;
        Ok(ProgramCounterStep::Jump(opcode.nnn))
    }

    fn skip(&self, opcode: &Skip) -> Result<ProgramCounterStep, ProcessError> {
        let cond = match *opcode {
            // 3XNN
            Skip::Equal { x, nn } => self.registers[x] == nn,
            // 4XNN
            Skip::NotEqual { x, nn } => self.registers[x] != nn,
            // 5XY0
            Skip::RegistersEqual { x, y } => self.registers[x] == self.registers[y],
            // 9XY0
            Skip::RegistersNotEqual { x, y } => self.registers[x] != self.registers[y],
        };
        Ok(ProgramCounterStep::cond(cond))
    }

    fn load(&mut self, opcode: &Constant) -> Result<ProgramCounterStep, ProcessError> {
        // 6XNN
        self.registers[opcode.x] = opcode.nn;
        Ok(ProgramCounterStep::Next)
    }

    fn add(&mut self, opcode: &Constant) -> Result<ProgramCounterStep, ProcessError> {
        // 7XNN
        // let VX overflow, but ignore carry
        self.registers[opcode.x] = self.registers[opcode.x].wrapping_add(opcode.nn);
        Ok(ProgramCounterStep::Next)
    }

    fn arithmetic(&mut self, opcode: &Arithmetic) -> Result<ProgramCounterStep, ProcessError> {
        let Arithmetic { ops, x, y } = *opcode;
        let vx = self.registers[x];
        let vy = self.registers[y];
        let shift_source = match self.quirks.shift_source {
            ShiftSource::VY => vy,
            ShiftSource::VX => vx,
        };

        // the flag is written after the result, so it wins for X = F
        let (res, flag) = match ops {
            // 8XY0
            ArithmeticOpcode::Assign => (vy, None),
            // 8XY1
            ArithmeticOpcode::Or => (vx | vy, self.quirks.logic_resets_flag.then(|| false)),
            // 8XY2
            ArithmeticOpcode::And => (vx & vy, self.quirks.logic_resets_flag.then(|| false)),
            // 8XY3
            ArithmeticOpcode::Xor => (vx ^ vy, self.quirks.logic_resets_flag.then(|| false)),
            // 8XY4
            ArithmeticOpcode::Add => {
                let (res, carry) = vx.overflowing_add(vy);
                (res, Some(carry))
            }
            // 8XY5
            ArithmeticOpcode::Sub => (vx.wrapping_sub(vy), Some(vx >= vy)),
            // 8XY6
            ArithmeticOpcode::ShiftRight => (shift_source >> 1, Some(shift_source & 0x01 == 1)),
            // 8XY7
            ArithmeticOpcode::SubReverse => (vy.wrapping_sub(vx), Some(vy >= vx)),
            // 8XYE
            ArithmeticOpcode::ShiftLeft => (shift_source << 1, Some(shift_source >> 7 == 1)),
        };

        self.registers[x] = res;
        if let Some(flag) = flag {
            self.set_flag(flag);
        }
        Ok(ProgramCounterStep::Next)
    }

    fn load_index(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // ANNN
        self.index_register = opcode.nnn as u16;
        Ok(ProgramCounterStep::Next)
    }

    fn jump_offset(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // BNNN (or BXNN)
        let offset = match self.quirks.jump_offset {
            JumpOffset::V0 => self.registers[0],
            JumpOffset::VX => self.registers[opcode.nnn >> 8],
        };
        Ok(ProgramCounterStep::Jump(opcode.nnn + offset as usize))
    }

    fn random(&mut self, opcode: &Constant) -> Result<ProgramCounterStep, ProcessError> {
        // CXNN
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand: [u8; 1] = [0];
        self.rng.fill_bytes(&mut rand);
        self.registers[opcode.x] = opcode.nn & rand[0];
        Ok(ProgramCounterStep::Next)
    }

    fn draw(&mut self, opcode: &Sprite) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // DXYN
        // Draws the sprite rows at I onto (VX, VY), the start is wrapped onto
        // the screen. A row landing exactly on row 32 and a column landing
        // exactly on column 64 are dropped, anything further out wraps around.
        let Sprite { x, y, n } = *opcode;

        let coorx = self.registers[x] as usize % display::WIDTH;
        let coory = self.registers[y] as usize % display::HEIGHT;

        // checked before any pixel is touched
        let index = self.index();
        let mut sprite = [0u8; 0xF];
        let sprite = &mut sprite[..n as usize];
        sprite.copy_from_slice(self.memory.slice(index, n as usize)?);

        let mut collision = false;

        for (i, row) in sprite.iter().enumerate() {
            let y = coory + i;
            if y == display::HEIGHT {
                continue;
            }
            let y = y % display::HEIGHT;

            for bit in 0..SPRITE_WIDTH {
                let x = coorx + bit;
                if x == display::WIDTH {
                    continue;
                }

                let mask = 0x80 >> bit;
                if row & mask == 0 {
                    continue;
                }

                let pixel = &mut self.display[y][x % display::WIDTH];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }

        self.set_flag(collision);
        self.redraw = true;
        self.pause = true;

        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn key(&self, opcode: &Key) -> Result<ProgramCounterStep, ProcessError> {
        let pressed = self.keyboard.is_pressed(self.registers[opcode.x] as usize);
        let cond = match opcode.ops {
            // EX9E
            KeyOpcode::Pressed => pressed,
            // EXA1
            KeyOpcode::NotPressed => !pressed,
        };
        Ok(ProgramCounterStep::cond(cond))
    }

    fn misc(&mut self, opcode: &Misc) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        let x = opcode.x;
        let mut op = Operation::None;
        let mut pcs = ProgramCounterStep::Next;
        match opcode.ops {
            MiscOpcode::GetDelayTimer => {
                // FX07
                self.registers[x] = self.get_delay_timer();
            }
            MiscOpcode::AwaitKeyRelease => {
                // FX0A
                // only a key that was down at the last snapshot and is up now counts
                match self.keyboard.released() {
                    Some(key) => {
                        log::debug!("key {:#X} released into V{:X}", key, x);
                        self.registers[x] = key as u8;
                        self.state = ExecutionState::Running;
                        self.pause = true;
                    }
                    None => {
                        if self.state == ExecutionState::Running {
                            log::debug!("awaiting a key release for V{:X}", x);
                        }
                        self.state = ExecutionState::AwaitingKeyRelease { register: x };
                        pcs = ProgramCounterStep::Repeat;
                        op = Operation::Wait;
                    }
                }
            }
            MiscOpcode::SetDelayTimer => {
                // FX15
                self.delay_timer.set_value(self.registers[x]);
            }
            MiscOpcode::SetSoundTimer => {
                // FX18
                self.sound_timer.set_value(self.registers[x]);
            }
            MiscOpcode::AddVxToI => {
                // FX1E
                // VF is not affected
                self.index_register = self.index_register.wrapping_add(self.registers[x] as u16);
            }
            MiscOpcode::SetIToSprite => {
                // FX29
                let glyph = self.registers[x] as usize * display::fontset::GLYPH_SIZE;
                self.index_register = (display::fontset::LOCATION + glyph) as u16;
            }
            MiscOpcode::StoreBCD => {
                // FX33
                let r = self.registers[x];
                let index = self.index();
                // 246 => 2, 4, 6
                self.memory.write(index, &[r / 100, r / 10 % 10, r % 10])?;
            }
            MiscOpcode::StoreV0ToVx => {
                // FX55
                let index = self.index();
                self.memory.write(index, &self.registers[..=x])?;
                self.increment_index(x);
            }
            MiscOpcode::FillV0ToVx => {
                // FX65
                let index = self.index();
                let data = self.memory.slice(index, x + 1)?;
                self.registers[..=x].copy_from_slice(data);
                self.increment_index(x);
            }
        }
        Ok((pcs, op))
    }
}
