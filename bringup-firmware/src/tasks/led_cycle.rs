//! LED color cycle task

use defmt::*;

use bringup_core::config::{LED_CYCLE, UART_READY_STEP};
use bringup_drivers::sequencer::{hold_step, ColorSequencer};
use bringup_hal_kl25z::board::BoardLeds;
use bringup_hal_kl25z::delay::TickDelay;
use bringup_hal_kl25z::mmio::Mmio;

/// Cycle the RGB LED through the configured colors, forever
#[embassy_executor::task]
pub async fn led_cycle_task(mut leds: BoardLeds<Mmio>) {
    info!("LED cycle task started");

    let mut delay = TickDelay::new();

    // Leave the ready indicator up before the cycle starts
    hold_step(&mut leds, &mut delay, UART_READY_STEP).await;

    let mut sequencer = ColorSequencer::new(&LED_CYCLE);

    while let Some(step) = sequencer.advance(&mut leds, &mut delay).await {
        debug!("LED {} for {} ms", step.color, step.hold_ms);
    }

    warn!("LED cycle is empty");
}
