//! Opcode abstractions, functionality and constants.
use std::convert::TryFrom;

use crate::{
    definitions::memory,
    InvalidOpcode, ProcessError,
};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a single nibble
const NIBBLE_SIZE: u16 = 0x4;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from data and the given point
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// # use chip::ProcessError;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xEE, 0x1E, 0xDA];
///  for (i, val) in OPCODES.iter().enumerate() {
///      let opcode = build_opcode(&SPLIT_OPCODE, i * 2).expect("This will work.");
///      assert_eq!(opcode, *val);
///  }
/// # let address = 4;
/// # assert_eq!(
/// #    Err(ProcessError::MemoryOutOfBounds { address, len: SPLIT_OPCODE.len() }),
/// #    build_opcode(&SPLIT_OPCODE, 3)
/// # );
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Result<Opcode, ProcessError> {
    // controlling that there is no illegal access here
    match (data.get(pointer), data.get(pointer + 1)) {
        (Some(high), Some(low)) => Ok(Opcode::from_be_bytes([*high, *low])),
        (None, _) => Err(ProcessError::MemoryOutOfBounds {
            address: pointer,
            len: data.len(),
        }),
        (Some(_), None) => Err(ProcessError::MemoryOutOfBounds {
            address: pointer + 1,
            len: data.len(),
        }),
    }
}

/// These are special traits used to filter out information
/// from opcodes
pub trait OpcodeTrait {
    /// the opcode family, the top nibble `T` of `TXYN`
    fn t(&self) -> u8;

    /// extractor for the opcode type `TNNN`
    fn nnn(&self) -> usize;

    /// extractor for the opcode type `TXNN`
    fn xnn(&self) -> (usize, u8);

    /// extractor for the opcode type `TXYN`
    fn xyn(&self) -> (usize, usize, u8);

    /// extractor for the opcode type `TXYT`
    fn xy(&self) -> (usize, usize);

    /// extractor for the opcode type `TXTT`
    fn x(&self) -> usize;
}

impl OpcodeTrait for Opcode {
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> u8 {
        ((self & OPCODE_MASK_F000) >> (3 * NIBBLE_SIZE)) as u8
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.nnn(), 0xEDA)
    /// ```
    fn nnn(&self) -> usize {
        (self & OPCODE_MASK_0FFF) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.xnn(), (0xE, 0xDA));
    /// ```
    fn xnn(&self) -> (usize, u8) {
        (self.x(), (self & OPCODE_MASK_00FF) as u8)
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.xyn(), (0xE, 0xD, 0xA));
    /// ```
    fn xyn(&self) -> (usize, usize, u8) {
        let (x, y) = self.xy();
        (x, y, (self & OPCODE_MASK_000F) as u8)
    }

    fn xy(&self) -> (usize, usize) {
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        let y = ((self & MASK) >> NIBBLE_SIZE) as usize;
        (self.x(), y)
    }

    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> (2 * NIBBLE_SIZE)) as usize
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents the way the program counter moves after an opcode was executed.
///
/// The counter already points to the following instruction when the opcode
/// runs, so every step is relative to that position.
pub enum ProgramCounterStep {
    /// Continue with the instruction after the current one
    Next,
    /// Skip over the next instruction
    Skip,
    /// Move the counter back onto the current instruction, so it runs again
    Repeat,
    /// Will simply move the program counter to the given location.
    Jump(usize),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// Calculates the new program counter from the already advanced one.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next.apply(0x202), 0x202);
    /// assert_eq!(ProgramCounterStep::Skip.apply(0x202), 0x204);
    /// assert_eq!(ProgramCounterStep::Repeat.apply(0x202), 0x200);
    /// assert_eq!(ProgramCounterStep::Jump(0x300).apply(0x202), 0x300);
    /// ```
    #[inline]
    pub fn apply(&self, pc: usize) -> usize {
        match *self {
            ProgramCounterStep::Next => pc,
            ProgramCounterStep::Skip => pc + memory::opcodes::SIZE,
            ProgramCounterStep::Repeat => pc.saturating_sub(memory::opcodes::SIZE),
            ProgramCounterStep::Jump(pointer) => pointer,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents a command from the interpreter up to the driving loop.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The chipset waits for a key to be released, the same
    /// instruction will run again on the next step.
    Wait,
    /// The framebuffer changed and should be presented.
    Draw,
}

/// `TNNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    pub nnn: usize,
}

/// `TXNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant {
    pub x: usize,
    pub nn: u8,
}

/// `DXYN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub x: usize,
    pub y: usize,
    pub n: u8,
}

/// implOperands is a macro responsible for creating the boilerplate code
/// needed for extracting the operands of an opcode.
macro_rules! implOperands {
    ($type_name:ident : | $value:ident | $inner:expr) => {
        impl From<Opcode> for $type_name {
            fn from($value: Opcode) -> Self {
                $inner
            }
        }
    };
}

implOperands!(Address: |value| Address { nnn: value.nnn() });

implOperands!(Constant: |value| {
    let (x, nn) = value.xnn();
    Constant { x, nn }
});

implOperands!(Sprite: |value| {
    let (x, y, n) = value.xyn();
    Sprite { x, y, n }
});

/// implSubOpcode is a macro responsible for mapping the sub opcode nibbles of
/// the multi form families onto their enum.
macro_rules! implSubOpcode {
    ($type_name:ty : $type_from:ty : $( $key:literal => $val:expr ),+ $(,)? ) => {
        impl TryFrom<$type_from> for $type_name {
            type Error = ();

            fn try_from(value: $type_from) -> Result<Self, Self::Error> {
                match value {
                    $(
                        $key => Ok($val),
                    )+
                    _ => Err(()),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum System {
    /// Clears the display
    Clear,
    /// Returns from the subroutine
    Return,
}

implSubOpcode!(System : Opcode :
    // 00E0
    0x00E0 => System::Clear,
    // 00EE
    0x00EE => System::Return,
);

/// The conditional skips `3XNN`, `4XNN`, `5XY0` and `9XY0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    Equal { x: usize, nn: u8 },
    NotEqual { x: usize, nn: u8 },
    RegistersEqual { x: usize, y: usize },
    RegistersNotEqual { x: usize, y: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOpcode {
    Assign,
    Or,
    And,
    Xor,
    Add,
    Sub,
    ShiftRight,
    SubReverse,
    ShiftLeft,
}

implSubOpcode!(ArithmeticOpcode : u8 :
    // 8XY0
    0x0 => ArithmeticOpcode::Assign,
    // 8XY1
    0x1 => ArithmeticOpcode::Or,
    // 8XY2
    0x2 => ArithmeticOpcode::And,
    // 8XY3
    0x3 => ArithmeticOpcode::Xor,
    // 8XY4
    0x4 => ArithmeticOpcode::Add,
    // 8XY5
    0x5 => ArithmeticOpcode::Sub,
    // 8XY6
    0x6 => ArithmeticOpcode::ShiftRight,
    // 8XY7
    0x7 => ArithmeticOpcode::SubReverse,
    // 8XYE
    0xE => ArithmeticOpcode::ShiftLeft,
);

/// `8XYT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arithmetic {
    pub ops: ArithmeticOpcode,
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOpcode {
    Pressed,
    NotPressed,
}

implSubOpcode!(KeyOpcode : u8 :
    // EX9E
    0x9E => KeyOpcode::Pressed,
    // EXA1
    0xA1 => KeyOpcode::NotPressed,
);

/// `EXTT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub ops: KeyOpcode,
    pub x: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscOpcode {
    GetDelayTimer,
    AwaitKeyRelease,
    SetDelayTimer,
    SetSoundTimer,
    AddVxToI,
    SetIToSprite,
    StoreBCD,
    StoreV0ToVx,
    FillV0ToVx,
}

implSubOpcode!(MiscOpcode : u8 :
    // FX07
    0x07 => MiscOpcode::GetDelayTimer,
    // FX0A
    0x0A => MiscOpcode::AwaitKeyRelease,
    // FX15
    0x15 => MiscOpcode::SetDelayTimer,
    // FX18
    0x18 => MiscOpcode::SetSoundTimer,
    // FX1E
    0x1E => MiscOpcode::AddVxToI,
    // FX29
    0x29 => MiscOpcode::SetIToSprite,
    // FX33
    0x33 => MiscOpcode::StoreBCD,
    // FX55
    0x55 => MiscOpcode::StoreV0ToVx,
    // FX65
    0x65 => MiscOpcode::FillV0ToVx,
);

/// `FXTT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Misc {
    pub ops: MiscOpcode,
    pub x: usize,
}

/// A fully decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcodes {
    System(System),
    Jump(Address),
    Call(Address),
    Skip(Skip),
    Load(Constant),
    Add(Constant),
    Arithmetic(Arithmetic),
    LoadIndex(Address),
    JumpOffset(Address),
    Random(Constant),
    Draw(Sprite),
    Key(Key),
    Misc(Misc),
}

impl TryFrom<Opcode> for Opcodes {
    type Error = InvalidOpcode;

    fn try_from(value: Opcode) -> Result<Self, Self::Error> {
        let err = |_| InvalidOpcode(value);
        let res = match value.t() {
            0x0 => Opcodes::System(System::try_from(value).map_err(err)?),
            0x1 => Opcodes::Jump(value.into()),
            0x2 => Opcodes::Call(value.into()),
            0x3 => {
                let (x, nn) = value.xnn();
                Opcodes::Skip(Skip::Equal { x, nn })
            }
            0x4 => {
                let (x, nn) = value.xnn();
                Opcodes::Skip(Skip::NotEqual { x, nn })
            }
            0x5 => match value.xyn() {
                (x, y, 0) => Opcodes::Skip(Skip::RegistersEqual { x, y }),
                _ => return Err(InvalidOpcode(value)),
            },
            0x6 => Opcodes::Load(value.into()),
            0x7 => Opcodes::Add(value.into()),
            0x8 => {
                let (x, y, n) = value.xyn();
                let ops = ArithmeticOpcode::try_from(n).map_err(err)?;
                Opcodes::Arithmetic(Arithmetic { ops, x, y })
            }
            0x9 => match value.xyn() {
                (x, y, 0) => Opcodes::Skip(Skip::RegistersNotEqual { x, y }),
                _ => return Err(InvalidOpcode(value)),
            },
            0xA => Opcodes::LoadIndex(value.into()),
            0xB => Opcodes::JumpOffset(value.into()),
            0xC => Opcodes::Random(value.into()),
            0xD => Opcodes::Draw(value.into()),
            0xE => {
                let (x, nn) = value.xnn();
                let ops = KeyOpcode::try_from(nn).map_err(err)?;
                Opcodes::Key(Key { ops, x })
            }
            0xF => {
                let (x, nn) = value.xnn();
                let ops = MiscOpcode::try_from(nn).map_err(err)?;
                Opcodes::Misc(Misc { ops, x })
            }
            _ => return Err(InvalidOpcode(value)),
        };
        Ok(res)
    }
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter by the given step.
    fn advance(&mut self, step: ProgramCounterStep);
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// This trait requires the implementation of the [`ProgramCounter`](ProgramCounter)
/// trait, as every opcode ends with a movement of the counter.
pub trait ChipOpcodes: ProgramCounter {
    /// will run the decoded opcode and move the program counter
    fn calc(&mut self, opcode: &Opcodes) -> Result<Operation, ProcessError> {
        let mut operation = Operation::None;
        let step_op = |(step, op): (ProgramCounterStep, Operation)| {
            operation = op;
            step
        };

        let step = match opcode {
            Opcodes::System(opcode) => self.system(opcode).map(step_op),
            Opcodes::Jump(opcode) => self.jump(opcode),
            Opcodes::Call(opcode) => self.call(opcode),
            Opcodes::Skip(opcode) => self.skip(opcode),
            Opcodes::Load(opcode) => self.load(opcode),
            Opcodes::Add(opcode) => self.add(opcode),
            Opcodes::Arithmetic(opcode) => self.arithmetic(opcode),
            Opcodes::LoadIndex(opcode) => self.load_index(opcode),
            Opcodes::JumpOffset(opcode) => self.jump_offset(opcode),
            Opcodes::Random(opcode) => self.random(opcode),
            Opcodes::Draw(opcode) => self.draw(opcode).map(step_op),
            Opcodes::Key(opcode) => self.key(opcode),
            Opcodes::Misc(opcode) => self.misc(opcode).map(step_op),
        }?;

        self.advance(step);
        Ok(operation)
    }

    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    fn system(&mut self, opcode: &System)
        -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    fn jump(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    fn call(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XNN` - Cond     - `if(Vx==NN)`          - Skips the next instruction if `VX` equals `NN`.
    /// - `4XNN` - Cond     - `if(Vx!=NN)`          - Skips the next instruction if `VX` doesn't equal `NN`.
    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn skip(&self, opcode: &Skip) -> Result<ProgramCounterStep, ProcessError>;

    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    fn load(&mut self, opcode: &Constant) -> Result<ProgramCounterStep, ProcessError>;

    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    fn add(&mut self, opcode: &Constant) -> Result<ProgramCounterStep, ProcessError>;

    /// A mutiuse opcode base for type `8XYT` (T is a sub opcode)
    ///
    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`.
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`.
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`.
    /// - `8XY4` - Math     - `Vx += Vy`            - Adds `VY` to `VX`. `VF` is the carry.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VF` is `1` when there is no borrow.
    /// - `8XY6` - BitOp    - `Vx=Vy>>1`            - `VF` is the shifted out bit.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - `VF` is `1` when there is no borrow.
    /// - `8XYE` - BitOp    - `Vx=Vy<<1`            - `VF` is the shifted out bit.
    fn arithmetic(&mut self, opcode: &Arithmetic) -> Result<ProgramCounterStep, ProcessError>;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn load_index(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    fn jump_offset(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `CXNN` - Rand     - `Vx=rand()&NN`        - Sets `VX` to a random byte and `NN`.
    fn random(&mut self, opcode: &Constant) -> Result<ProgramCounterStep, ProcessError>;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws the `8xN` sprite at `I` to `(VX, VY)`, `VF` reports a collision.
    fn draw(&mut self, opcode: &Sprite) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn key(&self, opcode: &Key) -> Result<ProgramCounterStep, ProcessError>;

    /// A multiuse opcode base for type `FXTT` (T is a sub opcode)
    ///
    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - Waits for a key release and stores the key in `VX`.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`. `VF` is not affected.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the font glyph for `VX`.
    /// - `FX33` - BCD      - `set_BCD(Vx)`         - Stores the decimal digits of `VX` at `I`, `I+1` and `I+2`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` in memory starting at `I`.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` from memory starting at `I`.
    fn misc(&mut self, opcode: &Misc) -> Result<(ProgramCounterStep, Operation), ProcessError>;
}
