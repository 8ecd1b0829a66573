//! GPIO output abstraction
//!
//! Only outputs are needed on this board (the three LED lines).

/// Digital output pin
///
/// Levels are electrical: `set_high` drives the line to VDD regardless of
/// what the attached device considers "on".
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to the given level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Level currently latched in the output register
    fn is_set_high(&self) -> bool;

    /// Inverse of [`OutputPin::is_set_high`]
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}
