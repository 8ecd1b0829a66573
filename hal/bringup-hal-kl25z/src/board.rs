//! FRDM-KL25Z board wiring
//!
//! RGB LED on PTB18/PTB19/PTD1 (low-active), UART0 on the OpenSDA virtual
//! COM port.

use bringup_core::config::{UART_BAUD, UART_READY_COLOR};
use bringup_drivers::led::RgbLed;
use bringup_hal::RegisterBus;

use crate::clock::Clocks;
use crate::gpio::{configure_leds, KlPin, LED_BLUE, LED_GREEN, LED_RED};
use crate::uart::{Uart0, UartError};

/// The on-board RGB LED
pub type BoardLeds<B> = RgbLed<KlPin<B>, KlPin<B>, KlPin<B>>;

/// Configure the LED pins and return the RGB LED, all channels off
pub fn init_leds<B: RegisterBus + Clone>(bus: B) -> BoardLeds<B> {
    configure_leds(&bus);
    RgbLed::new_active_low(
        KlPin::new(bus.clone(), LED_RED),
        KlPin::new(bus.clone(), LED_GREEN),
        KlPin::new(bus, LED_BLUE),
    )
}

/// Bring up UART0 at 115200 8N1 and show the ready color
///
/// On error the LEDs keep whatever they showed before.
pub fn init_uart<B: RegisterBus>(
    bus: B,
    clocks: &Clocks,
    leds: &mut BoardLeds<B>,
) -> Result<Uart0<B>, UartError> {
    let uart = Uart0::configure(bus, clocks, &UART_BAUD)?;
    leds.set_color(UART_READY_COLOR);
    Ok(uart)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::regs::{gpio, uart0};
    use crate::sim::SimBus;
    use bringup_core::color::Color;
    use bringup_core::config::{BOOT_COLOR, ECHO_FIRST_BYTE};
    use bringup_core::state::TransceiverState;
    use bringup_drivers::echo::{Echo, EchoEvent};
    use bringup_hal::OutputPin;
    use std::vec::Vec;

    #[test]
    fn test_init_leds_off() {
        let bus = SimBus::new();
        let leds = init_leds(&bus);

        assert_eq!(leds.color(), Color::Off);
        assert_eq!(bus.peek32(gpio::PTB + gpio::PDOR), 1 << 18 | 1 << 19);
        assert_eq!(bus.peek32(gpio::PTD + gpio::PDOR), 1 << 1);
    }

    #[test]
    fn test_boot_color_red_only() {
        let bus = SimBus::new();
        let mut leds = init_leds(&bus);
        leds.set_color(BOOT_COLOR);

        assert!(leds.red().pin().is_set_low());
        assert!(leds.green().pin().is_set_high());
        assert!(leds.blue().pin().is_set_high());
    }

    #[test]
    fn test_init_uart_shows_ready_color() {
        let bus = SimBus::new();
        let mut leds = init_leds(&bus);
        leds.set_color(BOOT_COLOR);

        let uart = init_uart(&bus, &Clocks::PEE_48MHZ, &mut leds).unwrap();

        assert_eq!(leds.color(), Color::Blue);
        assert!(leds.red().pin().is_set_high());
        assert!(leds.green().pin().is_set_high());
        assert!(leds.blue().pin().is_set_low());

        // Indicator goes on only after the transceiver is enabled
        let enable = bus.last_write(uart0::C2).unwrap();
        let blue_on = bus.last_write(gpio::PTD + gpio::PCOR).unwrap();
        assert!(enable < blue_on);
        assert!(uart.state().is_enabled());
    }

    #[test]
    fn test_init_uart_failure_keeps_leds() {
        let bus = SimBus::new();
        let mut leds = init_leds(&bus);
        leds.set_color(BOOT_COLOR);

        // UART0 clock far too slow for 115200 with these divisors
        let slow = Clocks {
            uart0_hz: 8_000_000,
            ..Clocks::PEE_48MHZ
        };
        assert!(init_uart(&bus, &slow, &mut leds).is_err());
        assert_eq!(leds.color(), BOOT_COLOR);
    }

    #[test]
    fn test_echo_over_uart0() {
        let bus = SimBus::new();
        let mut leds = init_leds(&bus);
        let mut uart = init_uart(&bus, &Clocks::PEE_48MHZ, &mut leds).unwrap();
        bus.push_rx(&[0x41, 0x42]);

        let mut echo = Echo::new(ECHO_FIRST_BYTE, uart.state());
        let mut events = Vec::new();
        loop {
            match echo.poll(&mut uart) {
                Ok(event) => events.push(event),
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(e)) => panic!("echo failed: {:?}", e),
            }
        }

        assert_eq!(bus.transmitted().as_slice(), &[b'a', 0x41, 0x42]);
        assert_eq!(
            events,
            [
                EchoEvent::Sent(b'a'),
                EchoEvent::Received(0x41),
                EchoEvent::Sent(0x41),
                EchoEvent::Received(0x42),
                EchoEvent::Sent(0x42),
            ]
        );
        assert_eq!(echo.state(), TransceiverState::Receiving);
        assert!(!uart.line_errors().any());
    }
}
