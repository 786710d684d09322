use crate::definitions::{display, keyboard};

/// The `64x32` monochrome framebuffer, indexed `[row][column]`.
pub type Framebuffer = [[bool; display::WIDTH]; display::HEIGHT];

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will display all from the pixels
    fn display(&mut self, pixels: &Framebuffer);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for the audio sink
pub trait SoundCommands {
    /// Is called once per timer tick, with `true` as long as the tone shall play.
    fn tone(&mut self, playing: bool);
}

/// Will store the live key matrix and the snapshot taken at the last frame.
///
/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key to be pressed and released, and then
/// stores it in one of the data registers.
#[derive(Default, Debug, Clone)]
pub struct Keyboard {
    keys: [bool; keyboard::SIZE],
    /// Only refreshed by [`latch`](Keyboard::latch), so that a release can be
    /// detected across a complete frame.
    previous: [bool; keyboard::SIZE],
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    pub fn reset(&mut self) {
        self.keys = [false; keyboard::SIZE];
        self.previous = [false; keyboard::SIZE];
    }

    /// Will set the value of the given key, panics on an index above `0xF`.
    pub fn set_key(&mut self, key: usize, to: bool) {
        assert!(key < keyboard::SIZE, "There is no key {:#X}.", key);
        self.keys[key] = to;
    }

    pub fn set_mult(&mut self, keys: &[bool]) {
        assert!(keys.len() == self.keys.len());
        self.keys.copy_from_slice(keys);
    }

    /// Takes the snapshot of the current keys.
    pub fn latch(&mut self) {
        self.previous = self.keys;
    }

    /// Is the key pressed, keys outside of the keypad are never pressed.
    pub fn is_pressed(&self, key: usize) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// The lowest key that was pressed at the last snapshot, but isn't anymore.
    pub fn released(&self) -> Option<usize> {
        self.previous
            .iter()
            .zip(self.keys.iter())
            .position(|(last, current)| *last && !*current)
    }

    pub fn get_keys(&self) -> &[bool] {
        &self.keys
    }

    pub fn get_previous(&self) -> &[bool] {
        &self.previous
    }
}
