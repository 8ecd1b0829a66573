//! Clock tree setup
//!
//! Moves the MCG from its reset mode (FEI, ~21 MHz from the internal
//! reference) to PEE with the FRDM-KL25Z's 8 MHz crystal:
//!
//! ```text
//! 8 MHz ─► /4 (PRDIV0) ─► 2 MHz ─► x24 (VDIV0) ─► PLL 48 MHz
//!                                                  ├─► /1 OUTDIV1 ─► core 48 MHz
//!                                                  │     └─► /2 OUTDIV4 ─► bus 24 MHz
//!                                                  └─► /2 (PLLFLLSEL) ─► UART0 24 MHz
//! ```
//!
//! The mode walk is FEI → FBE → PBE → PEE; each step waits on an MCG status
//! flag with a bounded spin budget.

use bringup_core::config;
use bringup_hal::wait::{ready, spin_until, SpinBudget, WaitError};
use bringup_hal::RegisterBus;

use crate::regs::{mcg, osc, sim};

/// 8 MHz crystal on EXTAL0/XTAL0 of the FRDM-KL25Z
pub const CRYSTAL_HZ: u32 = 8_000_000;

/// PLL reference divider (PRDIV0 + 1)
pub const PLL_REF_DIVIDER: u32 = 4;

/// PLL multiplier (VDIV0 + 24)
pub const PLL_MULTIPLIER: u32 = 24;

/// PLL output
pub const PLL_HZ: u32 = CRYSTAL_HZ / PLL_REF_DIVIDER * PLL_MULTIPLIER;

/// Core clock divider (OUTDIV1 + 1)
pub const CORE_DIVIDER: u32 = 1;

/// Bus clock divider from core (OUTDIV4 + 1)
pub const BUS_DIVIDER: u32 = 2;

/// Polls allowed per MCG status wait before giving up
pub const MCG_SPIN_BUDGET: u32 = 100_000;

// PLL reference must be 2-4 MHz
const _: () = assert!(CRYSTAL_HZ / PLL_REF_DIVIDER >= 2_000_000);
const _: () = assert!(CRYSTAL_HZ / PLL_REF_DIVIDER <= 4_000_000);
const _: () = assert!(PLL_HZ / CORE_DIVIDER == config::CORE_CLOCK_HZ);
const _: () = assert!(PLL_HZ / 2 == config::UART0_CLOCK_HZ);

/// Frozen clock frequencies after [`init`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Clocks {
    /// Core/platform/system clock
    pub core_hz: u32,
    /// Bus/flash clock
    pub bus_hz: u32,
    /// UART0 module clock (MCGPLLCLK / 2)
    pub uart0_hz: u32,
}

impl Clocks {
    /// Frequencies produced by [`init`]
    pub const PEE_48MHZ: Clocks = Clocks {
        core_hz: PLL_HZ / CORE_DIVIDER,
        bus_hz: PLL_HZ / CORE_DIVIDER / BUS_DIVIDER,
        uart0_hz: PLL_HZ / 2,
    };
}

/// MCG transition that did not complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockStage {
    /// Crystal oscillator never reported OSCINIT0
    OscillatorStart,
    /// FLL reference never switched to external
    ExternalReference,
    /// MCGOUT never switched to the external reference (FBE)
    ExternalBypass,
    /// PLL never became the PLLS source
    PllSelect,
    /// PLL never locked
    PllLock,
    /// MCGOUT never switched to the PLL (PEE)
    PllEngage,
}

/// Clock setup errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// A status flag did not reach the expected value within the budget
    Timeout(ClockStage),
}

/// Disable the COP watchdog
///
/// The COP is enabled out of reset and resets the chip after ~1 s unless
/// serviced. COPC is write-once, so this must be the first write after reset.
pub fn disable_watchdog<B: RegisterBus>(bus: &B) {
    bus.write32(sim::COPC, 0);
}

/// Bring the clock tree to 48 MHz PEE
///
/// Disables the watchdog first. On error the MCG is left in whatever
/// intermediate mode it reached; the core keeps running from it.
pub fn init<B: RegisterBus>(bus: &B) -> Result<Clocks, ClockError> {
    disable_watchdog(bus);

    // Dividers first so the core never exceeds its 48 MHz limit during the switch
    bus.write32(
        sim::CLKDIV1,
        sim::clkdiv1_outdiv1(CORE_DIVIDER - 1) | sim::clkdiv1_outdiv4(BUS_DIVIDER - 1),
    );

    // FEI -> FBE: crystal in high-frequency range, MCGOUT from external ref
    bus.write8(osc::CR, 0);
    bus.write8(mcg::C2, mcg::c2_range0(1) | mcg::C2_EREFS0);
    bus.write8(mcg::C1, mcg::c1_clks(2) | mcg::c1_frdiv(3));

    wait_status(bus, ClockStage::OscillatorStart, |s| s & mcg::S_OSCINIT0 != 0)?;
    wait_status(bus, ClockStage::ExternalReference, |s| s & mcg::S_IREFST == 0)?;
    wait_status(bus, ClockStage::ExternalBypass, |s| clkst(s) == 2)?;

    // FBE -> PBE: 8 MHz / 4 = 2 MHz reference, x24
    bus.write8(mcg::C5, mcg::c5_prdiv0((PLL_REF_DIVIDER - 1) as u8));
    bus.write8(
        mcg::C6,
        mcg::C6_PLLS | mcg::c6_vdiv0((PLL_MULTIPLIER - 24) as u8),
    );

    wait_status(bus, ClockStage::PllSelect, |s| s & mcg::S_PLLST != 0)?;
    wait_status(bus, ClockStage::PllLock, |s| s & mcg::S_LOCK0 != 0)?;

    // PBE -> PEE
    bus.write8(mcg::C1, mcg::c1_clks(0) | mcg::c1_frdiv(3));
    wait_status(bus, ClockStage::PllEngage, |s| clkst(s) == 3)?;

    Ok(Clocks::PEE_48MHZ)
}

fn clkst(status: u8) -> u8 {
    (status & mcg::S_CLKST_MASK) >> mcg::S_CLKST_SHIFT
}

fn wait_status<B, F>(bus: &B, stage: ClockStage, done: F) -> Result<(), ClockError>
where
    B: RegisterBus,
    F: Fn(u8) -> bool,
{
    spin_until::<_, (), _>(SpinBudget::Spins(MCG_SPIN_BUDGET), || {
        ready(done(bus.read8(mcg::S)))
    })
    .map_err(|_: WaitError<()>| ClockError::Timeout(stage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimBus;

    #[test]
    fn test_pee_frequencies() {
        assert_eq!(PLL_HZ, 48_000_000);
        assert_eq!(Clocks::PEE_48MHZ.core_hz, 48_000_000);
        assert_eq!(Clocks::PEE_48MHZ.bus_hz, 24_000_000);
        assert_eq!(Clocks::PEE_48MHZ.uart0_hz, Clocks::PEE_48MHZ.core_hz / 2);
    }

    #[test]
    fn test_init_reaches_pee() {
        let bus = SimBus::new();

        assert_eq!(init(&bus), Ok(Clocks::PEE_48MHZ));
        assert_eq!(clkst(bus.peek8(mcg::S)), 3);
        assert_eq!(bus.peek8(mcg::C5), 3);
        assert_eq!(bus.peek8(mcg::C6), mcg::C6_PLLS);
    }

    #[test]
    fn test_watchdog_disabled_first() {
        let bus = SimBus::new();
        init(&bus).unwrap();

        assert_eq!(bus.first_write(sim::COPC), Some(0));
        assert_eq!(bus.writes_to(sim::COPC).as_slice(), &[0]);
    }

    #[test]
    fn test_dividers_set_before_pll_engaged() {
        let bus = SimBus::new();
        init(&bus).unwrap();

        let clkdiv = bus.first_write(sim::CLKDIV1).unwrap();
        let engage = bus.last_write(mcg::C1).unwrap();
        assert!(clkdiv < engage);
        assert_eq!(bus.peek32(sim::CLKDIV1), 1 << 16);
    }

    #[test]
    fn test_missing_crystal_times_out() {
        let bus = SimBus::new();
        // Status stuck at reset value: oscillator never starts
        bus.hold(mcg::S, mcg::S_IREFST as u32);

        assert_eq!(
            init(&bus),
            Err(ClockError::Timeout(ClockStage::OscillatorStart))
        );
    }

    #[test]
    fn test_pll_never_locks() {
        let bus = SimBus::new();
        // External clock engaged (CLKST = 2) but no PLL status bits
        bus.hold(mcg::S, (mcg::S_OSCINIT0 | 2 << mcg::S_CLKST_SHIFT) as u32);

        assert_eq!(init(&bus), Err(ClockError::Timeout(ClockStage::PllSelect)));
    }
}
