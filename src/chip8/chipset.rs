use std::convert::TryFrom;

use {
    crate::{
        definitions::{cpu, display, memory},
        devices::{DisplayCommands, Framebuffer, Keyboard, SoundCommands},
        memory::Memory,
        opcode::{Opcode, Opcodes, Operation, ProgramCounter, ProgramCounterStep},
        quirks::Quirks,
        resources::Rom,
        timer::Timer,
        ProcessError, RomError, StackError,
    },
    rand::RngCore,
    tinyvec::ArrayVec,
};

/// Where the chipset is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    /// Every step executes the next instruction.
    Running,
    /// `FX0A` is waiting for a key to be released, every step
    /// re-executes it until that happens.
    AwaitingKeyRelease { register: usize },
    /// A fatal error occurred, steps are refused until the next reset.
    Halted,
}

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
pub struct ChipSet {
    /// name of the loaded rom
    pub(super) name: String,
    /// the last fetched opcode, two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// The 4KB address space, see [`Memory`] for the layout.
    pub(super) memory: Memory,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions; thus, it should be avoided. In an addition operation, `VF` is the carry flag,
    /// while in subtraction, it is the "no borrow" flag. In the draw instruction `VF` is set upon
    /// pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index register `I`, it is 16 bit wide and may point past the memory,
    /// an access through it is checked.
    pub(super) index_register: u16,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: usize,
    /// The stack is only used to store return addresses when subroutines are called.
    pub(super) stack: ArrayVec<[usize; cpu::stack::SIZE]>,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    pub(super) delay_timer: Timer,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    pub(super) sound_timer: Timer,
    /// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
    /// `(64 x 32)`.
    pub(super) display: Framebuffer,
    /// The hex keypad and its snapshot of the last frame.
    pub(super) keyboard: Keyboard,
    /// Set whenever the framebuffer changed, consumed by the driving loop.
    pub(super) redraw: bool,
    /// Set by opcodes whose effect has to be observed before the next fetch.
    pub(super) pause: bool,
    pub(super) state: ExecutionState,
    pub(super) quirks: Quirks,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
}

impl Default for ChipSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ChipSet {
    /// will create a new chipset object with the reference quirks
    pub fn new() -> Self {
        Self::with_quirks(Quirks::default())
    }

    /// will create a new chipset object
    pub fn with_quirks(quirks: Quirks) -> Self {
        Self {
            name: String::new(),
            opcode: 0,
            memory: Memory::new(),
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER,
            stack: ArrayVec::default(),
            delay_timer: Timer::default(),
            sound_timer: Timer::default(),
            display: [[false; display::WIDTH]; display::HEIGHT],
            keyboard: Keyboard::new(),
            redraw: false,
            pause: false,
            state: ExecutionState::Running,
            quirks,
            rng: Box::new(rand::rngs::OsRng),
        }
    }

    /// Brings the chipset back into its initial state, the quirks and the
    /// random number generator are kept.
    pub fn reset(&mut self) {
        log::debug!("resetting the chipset");
        self.name.clear();
        self.opcode = 0;
        self.memory = Memory::new();
        self.registers = [0; cpu::register::SIZE];
        self.index_register = 0;
        self.program_counter = cpu::PROGRAM_COUNTER;
        self.stack.clear();
        self.delay_timer = Timer::default();
        self.sound_timer = Timer::default();
        self.display = [[false; display::WIDTH]; display::HEIGHT];
        self.keyboard.reset();
        self.redraw = false;
        self.pause = false;
        self.state = ExecutionState::Running;
    }

    /// Replaces the random number generator used by `CXNN`.
    pub fn set_rng(&mut self, rng: Box<dyn RngCore + Send>) {
        self.rng = rng;
    }

    /// Will write the rom data into memory at the program start, the rest of
    /// the state is left as is.
    pub fn load_rom(&mut self, rom: &Rom) -> Result<(), RomError> {
        let data = rom.get_data();
        if data.len() > cpu::PROGRAM_SIZE {
            return Err(RomError::TooLarge {
                size: data.len(),
                max: cpu::PROGRAM_SIZE,
            });
        }
        self.memory
            .write(cpu::PROGRAM_COUNTER, data)
            .map_err(|_| RomError::TooLarge {
                size: data.len(),
                max: cpu::PROGRAM_SIZE,
            })?;
        self.name = rom.get_name().to_string();
        log::debug!("loaded rom '{}' with {} bytes", self.name, data.len());
        Ok(())
    }

    /// will get the next opcode from memory and move the counter past it
    pub(super) fn set_opcode(&mut self) -> Result<(), ProcessError> {
        self.opcode = self.memory.opcode(self.program_counter)?;
        log::trace!("{:#06X}: {:#06X}", self.program_counter, self.opcode);
        self.program_counter += memory::opcodes::SIZE;
        Ok(())
    }

    /// will advance the program by a single instruction
    pub fn step(&mut self) -> Result<Operation, ProcessError> {
        // import here as to not bloat the namespace
        use crate::opcode::ChipOpcodes;

        if self.state == ExecutionState::Halted {
            return Err(ProcessError::Halted);
        }
        self.pause = false;

        let pc = self.program_counter;
        let res = self.set_opcode().and_then(|_| {
            let opcode = Opcodes::try_from(self.opcode).map_err(|err| {
                ProcessError::UnknownOpcode {
                    opcode: err.0,
                    pc,
                }
            })?;
            log::debug!("opcode {:#06X} => {:?}", self.opcode, opcode);
            self.calc(&opcode)
        });

        if let Err(err) = &res {
            // keep the failing instruction in view for diagnostics
            self.program_counter = pc;
            self.state = ExecutionState::Halted;
            log::error!("halting at {:#06X}: {}", pc, err);
        }
        res
    }

    /// Counts both timers down by one, has to be called at
    /// [`HERTZ`](crate::definitions::timer::HERTZ) independent of
    /// [`step`](Self::step). Returns if the tone shall play.
    pub fn tick_timers(&mut self) -> bool {
        self.delay_timer.tick();
        self.sound_timer.tick()
    }

    /// Same as [`tick_timers`](Self::tick_timers), but forwards the tone state.
    pub fn tick_timers_with<S: SoundCommands>(&mut self, sound: &mut S) -> bool {
        let playing = self.tick_timers();
        sound.tone(playing);
        playing
    }

    /// Will write keyboard data into interncal keyboard representation.
    pub fn set_keyboard(&mut self, keys: &[bool]) {
        self.keyboard.set_mult(keys);
    }

    /// Marks the key as pressed, panics on an index above `0xF`.
    pub fn key_down(&mut self, key: usize) {
        self.keyboard.set_key(key, true)
    }

    /// Marks the key as released, panics on an index above `0xF`.
    pub fn key_up(&mut self, key: usize) {
        self.keyboard.set_key(key, false)
    }

    /// Takes the key snapshot `FX0A` compares against, call this once per
    /// frame.
    pub fn latch_keys(&mut self) {
        self.keyboard.latch();
    }

    /// Will get the current state of the keyboard
    pub fn get_keyboard(&self) -> &[bool] {
        self.keyboard.get_keys()
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.sound_timer.get_value()
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.delay_timer.get_value()
    }

    /// Should a tone be playing right now.
    pub fn is_sound_playing(&self) -> bool {
        self.sound_timer.is_running()
    }

    /// Will return the current framebuffer
    pub fn get_display(&self) -> &Framebuffer {
        &self.display
    }

    /// An owned copy of the framebuffer, for renderers on another thread.
    pub fn snapshot(&self) -> Framebuffer {
        self.display
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Returns and clears the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.redraw, false)
    }

    /// Hands the framebuffer to the display if it changed since the last
    /// presentation.
    pub fn present<D: DisplayCommands>(&mut self, display: &mut D) -> bool {
        let redraw = self.take_redraw();
        if redraw {
            display.display(&self.display);
        }
        redraw
    }

    /// Did the last instruction ask the driving loop to stop the current batch.
    pub fn should_pause(&self) -> bool {
        self.pause
    }

    pub fn get_state(&self) -> ExecutionState {
        self.state
    }

    pub fn get_quirks(&self) -> &Quirks {
        &self.quirks
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_registers(&self) -> &[u8] {
        &self.registers
    }

    pub fn get_index_register(&self) -> u16 {
        self.index_register
    }

    pub fn get_program_counter(&self) -> usize {
        self.program_counter
    }

    /// The return addresses, the most recent last.
    pub fn get_stack(&self) -> &[usize] {
        &self.stack
    }

    pub fn get_memory(&self) -> &[u8] {
        self.memory.as_slice()
    }

    /// Will push the current pointer to the stack
    pub(super) fn push_stack(&mut self, pointer: usize) -> Result<(), StackError> {
        match self.stack.try_push(pointer) {
            None => {
                log::debug!("push {:#06X}, depth {}", pointer, self.stack.len());
                Ok(())
            }
            Some(_) => Err(StackError::Overflow),
        }
    }

    /// Will pop from the stack
    pub(super) fn pop_stack(&mut self) -> Result<usize, StackError> {
        let pointer = self.stack.pop().ok_or(StackError::Underflow)?;
        log::debug!("pop {:#06X}, depth {}", pointer, self.stack.len());
        Ok(pointer)
    }
}

impl ProgramCounter for ChipSet {
    fn advance(&mut self, step: ProgramCounterStep) {
        self.program_counter = step.apply(self.program_counter);
    }
}
