//! UART serial communication abstractions
//!
//! The primitives are single-byte and non-blocking ([`nb`]): they either
//! complete immediately or report `WouldBlock`. Callers decide how to wait,
//! by spinning or by yielding to an executor.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Hand one byte to the transmitter if it can take it
    fn try_write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Take one received byte if one is waiting
    fn try_read_byte(&mut self) -> nb::Result<u8, Self::Error>;
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on one peripheral with a shared
/// error type.
pub trait Uart: UartTx + UartRx<Error = <Self as UartTx>::Error> {}

// Blanket implementation
impl<T: UartTx + UartRx<Error = <T as UartTx>::Error>> Uart for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wait::{spin_until, SpinBudget, WaitError};

    /// Loopback that accepts a byte only every other poll
    struct SlowLoopback {
        buf: Option<u8>,
        busy: bool,
    }

    impl UartTx for SlowLoopback {
        type Error = ();

        fn try_write_byte(&mut self, byte: u8) -> nb::Result<(), ()> {
            self.busy = !self.busy;
            if self.busy || self.buf.is_some() {
                return Err(nb::Error::WouldBlock);
            }
            self.buf = Some(byte);
            Ok(())
        }
    }

    impl UartRx for SlowLoopback {
        type Error = ();

        fn try_read_byte(&mut self) -> nb::Result<u8, ()> {
            self.buf.take().ok_or(nb::Error::WouldBlock)
        }
    }

    fn round_trip<U: Uart>(uart: &mut U, byte: u8) -> Result<u8, WaitError<<U as UartTx>::Error>> {
        spin_until(SpinBudget::Spins(10), || uart.try_write_byte(byte))?;
        spin_until(SpinBudget::Spins(10), || UartRx::try_read_byte(uart))
    }

    #[test]
    fn test_combined_trait_round_trip() {
        let mut uart = SlowLoopback {
            buf: None,
            busy: false,
        };

        assert_eq!(round_trip(&mut uart, b'x'), Ok(b'x'));
        assert_eq!(uart.try_read_byte(), Err(nb::Error::WouldBlock));
    }

    #[test]
    fn test_full_transmitter_blocks() {
        let mut uart = SlowLoopback {
            buf: Some(b'q'),
            busy: false,
        };

        assert_eq!(
            spin_until(SpinBudget::Spins(10), || uart.try_write_byte(b'z')),
            Err(WaitError::Timeout)
        );
    }
}
