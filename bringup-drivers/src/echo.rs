//! Single-byte UART echo
//!
//! Holds one pending byte. It is transmitted, then the next received byte
//! replaces it and is transmitted in turn, so the output stream is the
//! first byte followed by every byte received:
//!
//! ```text
//! rx:      b0      b1      b2 ...
//! tx:  a       b0      b1      b2 ...
//! ```
//!
//! [`Echo::poll`] never blocks; callers spin or yield on `WouldBlock`.

use bringup_core::state::{TransceiverEvent, TransceiverState};
use bringup_hal::{Uart, UartRx, UartTx};

/// What a successful poll did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EchoEvent {
    /// The pending byte went to the transmitter
    Sent(u8),
    /// A byte arrived and is now pending
    Received(u8),
}

/// Echo state machine
#[derive(Debug, Clone)]
pub struct Echo {
    pending: u8,
    state: TransceiverState,
    sent: u32,
    received: u32,
}

impl Echo {
    /// Start an echo whose first transmitted byte is `first`
    ///
    /// `link` is the state of the UART the echo runs on. Only an `Idle`
    /// link starts the echo; any other state leaves it stopped and every
    /// poll returns `WouldBlock`.
    pub fn new(first: u8, link: TransceiverState) -> Self {
        Self {
            pending: first,
            state: link.transition(TransceiverEvent::Start),
            sent: 0,
            received: 0,
        }
    }

    /// Byte that will be (or was just) transmitted
    pub fn pending(&self) -> u8 {
        self.pending
    }

    /// Transmitting or Receiving
    pub fn state(&self) -> TransceiverState {
        self.state
    }

    pub fn bytes_sent(&self) -> u32 {
        self.sent
    }

    pub fn bytes_received(&self) -> u32 {
        self.received
    }

    /// Advance by at most one transfer
    ///
    /// While transmitting, only the transmitter is touched; while
    /// receiving, only the receiver. A receive error leaves the echo
    /// waiting for the next byte.
    pub fn poll<U: Uart>(&mut self, uart: &mut U) -> nb::Result<EchoEvent, <U as UartTx>::Error> {
        match self.state {
            TransceiverState::Transmitting => {
                uart.try_write_byte(self.pending)?;
                self.sent = self.sent.wrapping_add(1);
                self.state = self.state.transition(TransceiverEvent::ByteSent);
                Ok(EchoEvent::Sent(self.pending))
            }
            TransceiverState::Receiving => {
                let byte = UartRx::try_read_byte(uart)?;
                self.pending = byte;
                self.received = self.received.wrapping_add(1);
                self.state = self.state.transition(TransceiverEvent::ByteReceived);
                Ok(EchoEvent::Received(byte))
            }
            _ => Err(nb::Error::WouldBlock),
        }
    }
}
