//! Bring-up Hardware Abstraction Layer
//!
//! This crate defines the traits every driver in the workspace is written
//! against. Chip crates implement them on top of a [`RegisterBus`], so the
//! same driver code runs against real memory-mapped registers on the target
//! and against a simulated register file in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  bringup-firmware / bringup-drivers     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bringup-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bringup-hal-kl25z                      │
//! │    Mmio (target)  |  SimBus (host)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::RegisterBus`] - 8/32-bit register access at physical addresses
//! - [`gpio::OutputPin`] - Digital output
//! - [`uart::UartTx`], [`uart::UartRx`] - Polled serial byte I/O
//! - [`wait::spin_until`] - Busy-waiting with an optional spin budget

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod gpio;
pub mod uart;
pub mod wait;

// Re-export key traits at crate root for convenience
pub use bus::RegisterBus;
pub use gpio::OutputPin;
pub use uart::{Uart, UartRx, UartTx};
pub use wait::{spin_until, SpinBudget, WaitError};
