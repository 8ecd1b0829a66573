//! Millisecond tick and delays
//!
//! SysTick fires once per millisecond and bumps [`TICKS`]. Delays compare
//! against that counter: the blocking delay spins, the async one yields to
//! the executor between checks so other tasks keep running.

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use portable_atomic::{AtomicU32, Ordering};

use bringup_core::config::TICK_HZ;

/// Free-running millisecond counter
pub struct Ticks {
    count: AtomicU32,
}

impl Ticks {
    pub const fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
        }
    }

    /// Advance by one tick (called from the SysTick handler)
    pub fn advance(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Current tick count
    pub fn now(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Ticks elapsed since `start`, correct across counter wrap-around
    pub fn since(&self, start: u32) -> u32 {
        self.now().wrapping_sub(start)
    }
}

impl Default for Ticks {
    fn default() -> Self {
        Self::new()
    }
}

/// System tick counter driven by the SysTick exception
pub static TICKS: Ticks = Ticks::new();

/// Call from the `SysTick` exception handler
pub fn on_systick() {
    TICKS.advance();
}

/// Start SysTick at [`TICK_HZ`] from the core clock, with its interrupt
/// enabled
pub fn start_systick(syst: &mut SYST, core_hz: u32) {
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(core_hz / TICK_HZ - 1);
    syst.clear_current();
    syst.enable_interrupt();
    syst.enable_counter();
}

/// Millisecond delay on a tick counter
///
/// Waits until strictly more than `ms` ticks have passed, so the delay is
/// never shorter than requested even when started just before a tick.
#[derive(Clone, Copy)]
pub struct TickDelay {
    ticks: &'static Ticks,
}

impl TickDelay {
    /// Delay on the global SysTick counter
    pub fn new() -> Self {
        Self::on(&TICKS)
    }

    /// Delay on a specific counter
    pub fn on(ticks: &'static Ticks) -> Self {
        Self { ticks }
    }

    fn expired(&self, start: u32, ms: u32) -> bool {
        self.ticks.since(start) > ms
    }
}

impl Default for TickDelay {
    fn default() -> Self {
        Self::new()
    }
}

fn ns_to_ms(ns: u32) -> u32 {
    ns.div_ceil(1_000_000)
}

impl embedded_hal::delay::DelayNs for TickDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns_to_ms(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        if ms == 0 {
            return;
        }
        let start = self.ticks.now();
        while !self.expired(start, ms) {
            core::hint::spin_loop();
        }
    }
}

impl embedded_hal_async::delay::DelayNs for TickDelay {
    async fn delay_ns(&mut self, ns: u32) {
        embedded_hal_async::delay::DelayNs::delay_ms(self, ns_to_ms(ns)).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        if ms == 0 {
            return;
        }
        let start = self.ticks.now();
        while !self.expired(start, ms) {
            embassy_futures::yield_now().await;
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::thread;
    use std::time::Duration;

    fn ticker(ticks: &'static Ticks, count: u32) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            for _ in 0..count {
                thread::sleep(Duration::from_millis(1));
                ticks.advance();
            }
        })
    }

    #[test]
    fn test_elapsed_wraps() {
        static T: Ticks = Ticks::new();
        T.count.store(u32::MAX - 1, Ordering::Relaxed);
        let start = T.now();
        T.advance();
        T.advance();
        T.advance();
        assert_eq!(T.now(), 1);
        assert_eq!(T.since(start), 3);
    }

    #[test]
    fn test_ns_rounds_up() {
        assert_eq!(ns_to_ms(0), 0);
        assert_eq!(ns_to_ms(1), 1);
        assert_eq!(ns_to_ms(1_000_000), 1);
        assert_eq!(ns_to_ms(1_000_001), 2);
    }

    #[test]
    fn test_zero_delay_returns_immediately() {
        static T: Ticks = Ticks::new();
        let mut delay = TickDelay::on(&T);
        embedded_hal::delay::DelayNs::delay_ms(&mut delay, 0);
        embassy_futures::block_on(embedded_hal_async::delay::DelayNs::delay_ms(&mut delay, 0));
    }

    #[test]
    fn test_blocking_delay_waits_for_ticks() {
        static T: Ticks = Ticks::new();
        let handle = ticker(&T, 20);

        let mut delay = TickDelay::on(&T);
        let start = T.now();
        embedded_hal::delay::DelayNs::delay_ms(&mut delay, 5);
        assert!(T.since(start) > 5);

        handle.join().unwrap();
    }

    #[test]
    fn test_async_delay_waits_for_ticks() {
        static T: Ticks = Ticks::new();
        let handle = ticker(&T, 20);

        let mut delay = TickDelay::on(&T);
        let start = T.now();
        embassy_futures::block_on(embedded_hal_async::delay::DelayNs::delay_ms(&mut delay, 5));
        assert!(T.since(start) > 5);

        handle.join().unwrap();
    }
}
