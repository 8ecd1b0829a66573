//! KL25Z bring-up firmware
//!
//! First firmware for a fresh FRDM-KL25Z: proves the clock tree, the GPIO
//! LEDs and UART0 work. Once up, it echoes every byte received on the
//! OpenSDA serial port (115200 8N1, starting with an `a`) while cycling the
//! RGB LED through red, yellow, green, white and blue.

#![no_std]
#![no_main]

use cortex_m_rt::exception;
use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use bringup_core::config::{BOOT_COLOR, UART_BAUD_RATE};
use bringup_hal_kl25z::flash::FLASH_CONFIG as FLASH_CONFIG_FIELD;
use bringup_hal_kl25z::mmio::Mmio;
use bringup_hal_kl25z::{board, clock, delay};

mod tasks;

/// Flash configuration field, placed at 0x400 by memory.x
#[link_section = ".flash_config"]
#[used]
static FLASH_CONFIG: [u8; 16] = FLASH_CONFIG_FIELD;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // SAFETY: the only bus handle in the program; every peripheral driver
    // below is built from copies of it and each owns disjoint registers
    let bus = unsafe { Mmio::new() };

    let clocks = match clock::init(&bus) {
        Ok(clocks) => clocks,
        Err(e) => defmt::panic!("Clock setup failed: {}", e),
    };
    info!(
        "Clocks: core {} Hz, bus {} Hz, UART0 {} Hz",
        clocks.core_hz, clocks.bus_hz, clocks.uart0_hz
    );

    let mut core = unwrap!(cortex_m::Peripherals::take());
    delay::start_systick(&mut core.SYST, clocks.core_hz);

    let mut leds = board::init_leds(bus);
    leds.set_color(BOOT_COLOR);
    info!("LEDs initialized");

    let uart = match board::init_uart(bus, &clocks, &mut leds) {
        Ok(uart) => uart,
        Err(e) => defmt::panic!("UART0 setup failed: {}", e),
    };
    info!(
        "UART0 up: {} Bd requested, {} Bd actual",
        UART_BAUD_RATE,
        uart.actual_baud()
    );

    spawner.spawn(tasks::echo_task(uart)).unwrap();
    spawner.spawn(tasks::led_cycle_task(leds)).unwrap();

    info!("All tasks spawned, firmware running");
}

#[exception]
fn SysTick() {
    delay::on_systick();
}
