//! Transceiver state machine
//!
//! ```text
//! Uninitialized ─► Configuring ─► Idle ─► Transmitting ⇄ Receiving
//! ```
//!
//! A configuration that is rejected never leaves `Uninitialized`: the
//! settings are validated before `BeginConfigure`.
//!
//! Transmit and receive never overlap: one byte goes out, then one byte is
//! awaited, then the next goes out.

/// Transceiver states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransceiverState {
    /// Registers untouched since reset
    #[default]
    Uninitialized,
    /// Register sequence in progress, TE/RE disabled
    Configuring,
    /// TE/RE enabled, no transfer started yet
    Idle,
    /// Waiting for the transmitter to accept the pending byte
    Transmitting,
    /// Waiting for a byte to arrive
    Receiving,
}

/// Events that move the transceiver between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransceiverEvent {
    /// Register sequence started
    BeginConfigure,
    /// TE/RE enabled after the full sequence
    ConfigureComplete,
    /// First byte queued for transmission
    Start,
    /// Pending byte handed to the transmitter
    ByteSent,
    /// A byte was taken from the receiver
    ByteReceived,
}

impl TransceiverState {
    /// Whether TE and RE are enabled in this state
    pub fn is_enabled(&self) -> bool {
        matches!(
            self,
            TransceiverState::Idle | TransceiverState::Transmitting | TransceiverState::Receiving
        )
    }

    /// Process an event and return the next state
    ///
    /// Events that make no sense in the current state leave it unchanged.
    pub fn transition(self, event: TransceiverEvent) -> Self {
        use TransceiverEvent::*;
        use TransceiverState::*;

        match (self, event) {
            (Uninitialized, BeginConfigure) => Configuring,
            (Configuring, ConfigureComplete) => Idle,

            (Idle, Start) => Transmitting,
            (Transmitting, ByteSent) => Receiving,
            (Receiving, ByteReceived) => Transmitting,

            // Default: stay in current state
            _ => self,
        }
    }
}
