//! UART echo task
//!
//! Sends `a`, then echoes every received byte. Line errors are logged and
//! cleared; the echo never stops.

use defmt::*;
use embassy_futures::yield_now;

use bringup_core::config::ECHO_FIRST_BYTE;
use bringup_drivers::echo::{Echo, EchoEvent};
use bringup_hal_kl25z::mmio::Mmio;
use bringup_hal_kl25z::uart::Uart0;

/// Echo task - owns UART0 for the lifetime of the firmware
#[embassy_executor::task]
pub async fn echo_task(mut uart: Uart0<Mmio>) {
    info!("Echo task started");

    let mut echo = Echo::new(ECHO_FIRST_BYTE, uart.state());

    loop {
        match echo.poll(&mut uart) {
            Ok(EchoEvent::Sent(byte)) => {
                trace!("tx {=u8:#x}", byte);
            }
            Ok(EchoEvent::Received(byte)) => {
                trace!("rx {=u8:#x}", byte);

                let errors = uart.take_line_errors();
                if errors.any() {
                    warn!("Line errors on received byte: {}", errors);
                }
            }
            Err(nb::Error::WouldBlock) => yield_now().await,
            Err(nb::Error::Other(e)) => {
                warn!(
                    "Receive error after {} bytes: {}",
                    echo.bytes_received(),
                    e
                );
            }
        }
    }
}
