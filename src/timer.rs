/// Represents a timer inside of the chip infrastructure, it counts down to
/// zero by one on every tick. The driving loop ticks it at
/// [`HERTZ`](crate::definitions::timer::HERTZ).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    value: u8,
}

impl Timer {
    /// Will create a new timer with the given value.
    pub fn new(value: u8) -> Self {
        Self { value }
    }

    /// Will set the value from which the timer shall count down from.
    pub fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    /// Will get the value that the counter is currently at.
    pub fn get_value(&self) -> u8 {
        self.value
    }

    /// Counts down by one, the timer stays at zero once reached.
    /// Returns if the timer is still running.
    pub fn tick(&mut self) -> bool {
        self.value = self.value.saturating_sub(1);
        self.is_running()
    }

    pub fn is_running(&self) -> bool {
        self.value > 0
    }
}
