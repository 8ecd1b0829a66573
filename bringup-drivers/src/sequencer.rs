//! Timed LED color sequence

use bringup_core::color::{ColorCycle, ColorStep};
use bringup_hal::OutputPin;
use embedded_hal_async::delay::DelayNs;

use crate::led::RgbLed;

/// Shows each step of a color cycle for its hold time, forever
pub struct ColorSequencer<'a> {
    cycle: ColorCycle<'a>,
}

impl<'a> ColorSequencer<'a> {
    pub fn new(steps: &'a [ColorStep]) -> Self {
        Self {
            cycle: ColorCycle::new(steps),
        }
    }

    /// Index of the next step to show
    pub fn position(&self) -> usize {
        self.cycle.position()
    }

    /// Show the next color and wait out its hold time
    ///
    /// Returns the step shown, or `None` for an empty cycle.
    pub async fn advance<R, G, B, D>(
        &mut self,
        led: &mut RgbLed<R, G, B>,
        delay: &mut D,
    ) -> Option<ColorStep>
    where
        R: OutputPin,
        G: OutputPin,
        B: OutputPin,
        D: DelayNs,
    {
        let step = self.cycle.next()?;
        hold_step(led, delay, step).await;
        Some(step)
    }
}

/// Show one step's color and wait out its hold time
pub async fn hold_step<R, G, B, D>(led: &mut RgbLed<R, G, B>, delay: &mut D, step: ColorStep)
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
    D: DelayNs,
{
    led.set_color(step.color);
    delay.delay_ms(step.hold_ms).await;
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use bringup_core::color::Color;
    use bringup_core::config::{LED_CYCLE, UART_READY_HOLD_MS, UART_READY_STEP};
    use embassy_futures::block_on;
    use std::vec::Vec;

    struct MockPin(bool);

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.0 = true;
        }

        fn set_low(&mut self) {
            self.0 = false;
        }

        fn is_set_high(&self) -> bool {
            self.0
        }
    }

    /// Records requested delays instead of waiting
    #[derive(Default)]
    struct RecordingDelay {
        waits_ms: Vec<u32>,
    }

    impl DelayNs for RecordingDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.waits_ms.push(ns / 1_000_000);
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.waits_ms.push(ms);
        }
    }

    fn leds() -> RgbLed<MockPin, MockPin, MockPin> {
        RgbLed::new_active_low(MockPin(false), MockPin(false), MockPin(false))
    }

    #[test]
    fn test_cycle_order_and_hold_times() {
        let mut led = leds();
        let mut delay = RecordingDelay::default();
        let mut seq = ColorSequencer::new(&LED_CYCLE);

        let mut shown = Vec::new();
        for _ in 0..LED_CYCLE.len() {
            let step = block_on(seq.advance(&mut led, &mut delay)).unwrap();
            assert_eq!(led.color(), step.color);
            shown.push(step.color);
        }

        assert_eq!(
            shown,
            [Color::Red, Color::Yellow, Color::Green, Color::White, Color::Blue]
        );
        assert_eq!(delay.waits_ms, [1_500, 1_500, 1_500, 10_000, 2_000]);
    }

    #[test]
    fn test_cycle_wraps() {
        let mut led = leds();
        let mut delay = RecordingDelay::default();
        let mut seq = ColorSequencer::new(&LED_CYCLE);

        for _ in 0..LED_CYCLE.len() {
            block_on(seq.advance(&mut led, &mut delay));
        }
        assert_eq!(seq.position(), 0);

        let step = block_on(seq.advance(&mut led, &mut delay)).unwrap();
        assert_eq!(step, ColorStep::new(Color::Red, 1_500));
        assert_eq!(led.color(), Color::Red);
    }

    #[test]
    fn test_ready_color_held_before_cycle() {
        let mut led = leds();
        let mut delay = RecordingDelay::default();
        let mut seq = ColorSequencer::new(&LED_CYCLE);

        block_on(hold_step(&mut led, &mut delay, UART_READY_STEP));
        assert_eq!(led.color(), Color::Blue);
        assert_eq!(delay.waits_ms, [UART_READY_HOLD_MS]);
        // The cycle has not started yet
        assert_eq!(seq.position(), 0);

        let step = block_on(seq.advance(&mut led, &mut delay)).unwrap();
        assert_eq!(step.color, Color::Red);
        assert_eq!(delay.waits_ms, [UART_READY_HOLD_MS, 1_500]);
    }

    #[test]
    fn test_empty_cycle() {
        let mut led = leds();
        let mut delay = RecordingDelay::default();
        let mut seq = ColorSequencer::new(&[]);

        assert_eq!(block_on(seq.advance(&mut led, &mut delay)), None);
        assert_eq!(led.color(), Color::Off);
        assert!(delay.waits_ms.is_empty());
    }
}
