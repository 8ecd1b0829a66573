//! Hardware driver implementations
//!
//! Drivers written against the bringup-hal traits, independent of the chip:
//!
//! - Single LEDs and RGB LEDs on GPIO outputs (active-high or active-low)
//! - Single-byte UART echo
//! - Timed LED color sequencer

#![no_std]
#![deny(unsafe_code)]

pub mod echo;
pub mod led;
pub mod sequencer;
