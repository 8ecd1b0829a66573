//! Board-agnostic core logic for the bring-up firmware
//!
//! This crate contains everything that does not touch a register:
//!
//! - Baud-rate generator arithmetic and tolerance checking
//! - LED colors and the timed color cycle
//! - Transceiver state machine
//! - Compile-time board configuration

#![no_std]
#![deny(unsafe_code)]

pub mod baud;
pub mod color;
pub mod config;
pub mod state;
