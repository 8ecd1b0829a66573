//! Compile-time configuration
//!
//! There is no runtime configuration: every parameter is a constant here,
//! and the ones with invariants are checked by `const` assertions so a bad
//! edit fails the build instead of the board.

use crate::baud::BaudConfig;
use crate::color::{Color, ColorStep};

/// Core clock after PLL lock
pub const CORE_CLOCK_HZ: u32 = 48_000_000;

/// UART0 module clock (MCGPLLCLK / 2)
pub const UART0_CLOCK_HZ: u32 = CORE_CLOCK_HZ / 2;

/// SysTick rate: one tick per millisecond
pub const TICK_HZ: u32 = 1_000;

/// Target serial rate
pub const UART_BAUD_RATE: u32 = 115_200;

/// Baud-rate generator settings: 16x oversampling, divisor 13
pub const UART_BAUD: BaudConfig = BaudConfig::new(UART_BAUD_RATE, 15, 13);

/// Byte transmitted before anything has been received
pub const ECHO_FIRST_BYTE: u8 = b'a';

/// Color shown once the LEDs are configured, before the UART
pub const BOOT_COLOR: Color = Color::Red;

/// Color shown once UART0 is enabled
pub const UART_READY_COLOR: Color = Color::Blue;

/// How long the ready color stays up before the LED cycle takes over
pub const UART_READY_HOLD_MS: u32 = 2_000;

/// Ready indicator as a cycle step
pub const UART_READY_STEP: ColorStep = ColorStep::new(UART_READY_COLOR, UART_READY_HOLD_MS);

/// LED color cycle, repeated forever
pub const LED_CYCLE: [ColorStep; 5] = [
    ColorStep::new(Color::Red, 1_500),
    ColorStep::new(Color::Yellow, 1_500),
    ColorStep::new(Color::Green, 1_500),
    ColorStep::new(Color::White, 10_000),
    ColorStep::new(Color::Blue, 2_000),
];

const _: () = assert!(UART_BAUD.check(UART0_CLOCK_HZ).is_ok());

// The fixed divisor is the one the generator would pick for this clock
const _: () = assert!(match BaudConfig::compute(UART0_CLOCK_HZ, UART_BAUD_RATE, 15) {
    Ok(computed) => computed.sbr == UART_BAUD.sbr,
    Err(_) => false,
});

const _: () = assert!(CORE_CLOCK_HZ % TICK_HZ == 0);

const _: () = assert!(UART_READY_HOLD_MS > 0);
