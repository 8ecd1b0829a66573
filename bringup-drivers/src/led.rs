//! GPIO LEDs
//!
//! A single LED on one output pin, and an RGB LED made of three of them.

use bringup_core::color::Color;
use bringup_hal::OutputPin;

/// LED on a GPIO pin
///
/// The pin can be wired active-high (default) or active-low.
pub struct Led<P> {
    pin: P,
    /// If true, LED lit = pin LOW
    inverted: bool,
    /// Current logical state (true = lit)
    on: bool,
}

impl<P: OutputPin> Led<P> {
    /// Create an LED, initially off
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the LED lights when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut led = Self {
            pin,
            inverted,
            on: false,
        };
        led.set_on(false);
        led
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Light or darken the LED
    pub fn set_on(&mut self, on: bool) {
        self.on = on;

        if on != self.inverted {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// The underlying pin
    pub fn pin(&self) -> &P {
        &self.pin
    }
}

/// RGB LED made of three single-color LEDs
pub struct RgbLed<R, G, B> {
    red: Led<R>,
    green: Led<G>,
    blue: Led<B>,
    color: Color,
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> RgbLed<R, G, B> {
    /// Combine three LEDs, switching them all off
    pub fn new(mut red: Led<R>, mut green: Led<G>, mut blue: Led<B>) -> Self {
        red.set_on(false);
        green.set_on(false);
        blue.set_on(false);
        Self {
            red,
            green,
            blue,
            color: Color::Off,
        }
    }

    /// Three LEDs that light when their pin is driven low
    pub fn new_active_low(red: R, green: G, blue: B) -> Self {
        Self::new(
            Led::new_active_low(red),
            Led::new_active_low(green),
            Led::new_active_low(blue),
        )
    }

    /// Show a color (writes all three pins)
    pub fn set_color(&mut self, color: Color) {
        let channels = color.channels();
        self.red.set_on(channels.red);
        self.green.set_on(channels.green);
        self.blue.set_on(channels.blue);
        self.color = color;
    }

    /// Color currently shown
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn red(&self) -> &Led<R> {
        &self.red
    }

    pub fn green(&self) -> &Led<G> {
        &self.green
    }

    pub fn blue(&self) -> &Led<B> {
        &self.blue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
        writes: u32,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: false,
                writes: 0,
            }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
            self.writes += 1;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.writes += 1;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_active_high_led() {
        let mut led = Led::new_active_high(MockPin::new());

        assert!(!led.is_on());
        assert!(led.pin().is_set_low());

        led.set_on(true);
        assert!(led.is_on());
        assert!(led.pin().is_set_high());
    }

    #[test]
    fn test_active_low_led() {
        let mut led = Led::new_active_low(MockPin::new());

        // Off means driven high
        assert!(!led.is_on());
        assert!(led.pin().is_set_high());

        led.set_on(true);
        assert!(led.is_on());
        assert!(led.pin().is_set_low());

        led.set_on(false);
        assert!(led.pin().is_set_high());
    }

    #[test]
    fn test_rgb_starts_off() {
        let rgb = RgbLed::new_active_low(MockPin::new(), MockPin::new(), MockPin::new());

        assert_eq!(rgb.color(), Color::Off);
        assert!(rgb.red().pin().is_set_high());
        assert!(rgb.green().pin().is_set_high());
        assert!(rgb.blue().pin().is_set_high());
    }

    #[test]
    fn test_rgb_colors_low_active() {
        let mut rgb = RgbLed::new_active_low(MockPin::new(), MockPin::new(), MockPin::new());

        // (color, red pin high, green pin high, blue pin high)
        let cases = [
            (Color::Red, false, true, true),
            (Color::Yellow, false, false, true),
            (Color::Green, true, false, true),
            (Color::White, false, false, false),
            (Color::Blue, true, true, false),
            (Color::Off, true, true, true),
        ];

        for (color, r, g, b) in cases {
            rgb.set_color(color);
            assert_eq!(rgb.color(), color);
            assert_eq!(rgb.red().pin().is_set_high(), r, "{color:?} red");
            assert_eq!(rgb.green().pin().is_set_high(), g, "{color:?} green");
            assert_eq!(rgb.blue().pin().is_set_high(), b, "{color:?} blue");
        }
    }

    #[test]
    fn test_set_color_writes_every_pin() {
        let mut rgb = RgbLed::new_active_low(MockPin::new(), MockPin::new(), MockPin::new());
        let before = rgb.blue().pin().writes;

        rgb.set_color(Color::Red);
        assert_eq!(rgb.blue().pin().writes, before + 1);
    }
}
