//! LED colors and the timed color cycle
//!
//! An RGB LED built from three single-color LEDs can show the eight
//! combinations of lit channels. The firmware uses six of them.

/// Color shown on the RGB LED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// All channels dark
    #[default]
    Off,
    Red,
    /// Red and green
    Yellow,
    Green,
    Blue,
    /// All channels lit
    White,
}

/// Which channels are lit for a color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channels {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl Color {
    /// Lit channels for this color
    pub const fn channels(self) -> Channels {
        let (red, green, blue) = match self {
            Color::Off => (false, false, false),
            Color::Red => (true, false, false),
            Color::Yellow => (true, true, false),
            Color::Green => (false, true, false),
            Color::Blue => (false, false, true),
            Color::White => (true, true, true),
        };
        Channels { red, green, blue }
    }
}

/// One step of a color cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorStep {
    /// Color to show
    pub color: Color,
    /// How long to hold it, in milliseconds
    pub hold_ms: u32,
}

impl ColorStep {
    pub const fn new(color: Color, hold_ms: u32) -> Self {
        Self { color, hold_ms }
    }
}

/// Endless iterator over a list of steps
///
/// Wraps around to the first step after the last. An empty list yields
/// nothing.
#[derive(Debug, Clone)]
pub struct ColorCycle<'a> {
    steps: &'a [ColorStep],
    index: usize,
}

impl<'a> ColorCycle<'a> {
    /// Start a cycle at the first step
    pub const fn new(steps: &'a [ColorStep]) -> Self {
        Self { steps, index: 0 }
    }

    /// Index of the step the next call to `next` returns
    pub fn position(&self) -> usize {
        self.index
    }

    /// Total time for one pass through all steps
    pub fn period_ms(&self) -> u32 {
        self.steps
            .iter()
            .fold(0u32, |acc, step| acc.saturating_add(step.hold_ms))
    }
}

impl Iterator for ColorCycle<'_> {
    type Item = ColorStep;

    fn next(&mut self) -> Option<ColorStep> {
        let step = *self.steps.get(self.index)?;
        self.index = (self.index + 1) % self.steps.len();
        Some(step)
    }
}
