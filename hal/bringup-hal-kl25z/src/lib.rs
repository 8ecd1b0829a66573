//! KL25Z HAL implementation
//!
//! Implements the bringup-hal traits for the NXP Kinetis KL25Z
//! (Cortex-M0+, 48 MHz) on the FRDM-KL25Z board. Every driver takes a
//! [`RegisterBus`](bringup_hal::RegisterBus): [`mmio::Mmio`] on the chip,
//! [`sim::SimBus`] on the host (feature `sim`).
//!
//! # Modules
//!
//! - [`clock`] - Watchdog off, MCG to PEE at 48 MHz
//! - [`delay`] - SysTick millisecond tick and delays
//! - [`gpio`] - Output pins and LED pin setup
//! - [`uart`] - UART0 configuration and polled byte I/O
//! - [`board`] - FRDM-KL25Z LED and UART wiring
//! - [`flash`] - Flash configuration field

#![no_std]

pub mod board;
pub mod clock;
pub mod delay;
pub mod flash;
pub mod gpio;
pub mod mmio;
pub mod regs;
pub mod uart;

#[cfg(any(test, feature = "sim"))]
pub mod sim;
