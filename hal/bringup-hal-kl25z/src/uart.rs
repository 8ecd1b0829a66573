//! UART0 driver
//!
//! Polled, single-byte UART0 on PTA1 (RX) / PTA2 (TX), 8N1, clocked from
//! MCGPLLCLK/2. [`Uart0::configure`] runs the full register sequence:
//!
//! ```text
//! validate baud ─► clock gates ─► TE/RE off ─► clock source ─► pin mux
//!   ─► BDH/BDL ─► C4 (OSR) ─► C5 ─► C1 ─► MA1/MA2 ─► clear S1/S2 ─► TE/RE on
//! ```
//!
//! A rejected configuration returns before the first register write.

use bringup_core::baud::{BaudConfig, BaudError};
use bringup_core::state::{TransceiverEvent, TransceiverState};
use bringup_hal::{RegisterBus, UartRx, UartTx};

use crate::clock::Clocks;
use crate::gpio::{PinId, Port};
use crate::regs::{port, sim, uart0};

/// UART0 receive pin (PTA1, ALT2)
pub const RX_PIN: PinId = PinId::new(Port::A, 1);
/// UART0 transmit pin (PTA2, ALT2)
pub const TX_PIN: PinId = PinId::new(Port::A, 2);

/// SOPT2 UART0SRC value selecting MCGFLLCLK or MCGPLLCLK/2
const UART0SRC_PLLFLL: u32 = 0b01;

/// UART0 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartError {
    /// Baud settings rejected for the UART0 clock
    Baud(BaudError),
    /// A received byte was lost because the previous one was not read in time
    Overrun,
}

impl From<BaudError> for UartError {
    fn from(e: BaudError) -> Self {
        UartError::Baud(e)
    }
}

/// Snapshot of the S1 line error flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineErrors {
    pub overrun: bool,
    pub noise: bool,
    pub framing: bool,
    pub parity: bool,
}

impl LineErrors {
    fn from_s1(s1: u8) -> Self {
        Self {
            overrun: s1 & uart0::S1_OR != 0,
            noise: s1 & uart0::S1_NF != 0,
            framing: s1 & uart0::S1_FE != 0,
            parity: s1 & uart0::S1_PF != 0,
        }
    }

    fn to_s1(self) -> u8 {
        let mut s1 = 0;
        if self.overrun {
            s1 |= uart0::S1_OR;
        }
        if self.noise {
            s1 |= uart0::S1_NF;
        }
        if self.framing {
            s1 |= uart0::S1_FE;
        }
        if self.parity {
            s1 |= uart0::S1_PF;
        }
        s1
    }

    /// Whether any flag is set
    pub fn any(&self) -> bool {
        self.overrun || self.noise || self.framing || self.parity
    }
}

/// Configured UART0
pub struct Uart0<B> {
    bus: B,
    state: TransceiverState,
    actual_baud: u32,
}

impl<B: RegisterBus> Uart0<B> {
    /// Configure UART0 for 8N1 and enable the transmitter and receiver
    ///
    /// TE/RE are switched off first and switched back on by the last
    /// register write, so the peripheral never runs half-configured.
    pub fn configure(bus: B, clocks: &Clocks, baud: &BaudConfig) -> Result<Self, UartError> {
        let actual_baud = baud.check(clocks.uart0_hz)?;

        let mut state = TransceiverState::default().transition(TransceiverEvent::BeginConfigure);

        // Gates first: UART0 and PORTA registers fault while unclocked
        bus.set_bits32(sim::SCGC4, sim::SCGC4_UART0);
        bus.set_bits32(sim::SCGC5, sim::SCGC5_PORTA);

        bus.clear_bits8(uart0::C2, uart0::C2_TE | uart0::C2_RE);

        bus.modify32(sim::SOPT2, |v| {
            v & !(sim::SOPT2_UART0SRC_MASK | sim::SOPT2_PLLFLLSEL)
        });
        bus.set_bits32(
            sim::SOPT2,
            sim::sopt2_uart0src(UART0SRC_PLLFLL) | sim::SOPT2_PLLFLLSEL,
        );

        bus.write32(RX_PIN.pcr(), port::pcr_mux(2));
        bus.write32(TX_PIN.pcr(), port::pcr_mux(2) | port::PCR_DSE);

        // BDH: no break/edge interrupts, SBNS clear for one stop bit
        bus.write8(uart0::BDH, baud.sbr_high() & uart0::BDH_SBR_MASK);
        bus.write8(uart0::BDL, baud.sbr_low());

        bus.modify8(uart0::C4, |v| {
            (v & !uart0::C4_OSR_MASK) | uart0::c4_osr(baud.osr)
        });

        let c5 = if baud.needs_both_edge_sampling() {
            uart0::C5_BOTHEDGE
        } else {
            0
        };
        bus.write8(uart0::C5, c5);

        // 8 data bits, no parity, no loopback
        bus.write8(uart0::C1, 0);

        bus.write8(uart0::MA1, 0);
        bus.write8(uart0::MA2, 0);

        bus.set_bits8(uart0::S1, uart0::S1_W1C_MASK);
        bus.write8(uart0::S2, uart0::S2_LBKDIF | uart0::S2_RXEDGIF);

        bus.set_bits8(uart0::C2, uart0::C2_TE | uart0::C2_RE);
        state = state.transition(TransceiverEvent::ConfigureComplete);

        Ok(Self {
            bus,
            state,
            actual_baud,
        })
    }

    /// Transceiver state reached by configuration, where the echo starts
    pub fn state(&self) -> TransceiverState {
        self.state
    }

    /// Baud rate actually produced by the generator
    pub fn actual_baud(&self) -> u32 {
        self.actual_baud
    }

    /// Line error flags currently latched in S1
    pub fn line_errors(&self) -> LineErrors {
        LineErrors::from_s1(self.bus.read8(uart0::S1))
    }

    /// Clear the given line error flags (write-1-to-clear)
    pub fn clear_line_errors(&mut self, errors: LineErrors) {
        let mask = errors.to_s1();
        if mask != 0 {
            self.bus.write8(uart0::S1, mask);
        }
    }

    /// Read and clear all latched line errors
    pub fn take_line_errors(&mut self) -> LineErrors {
        let errors = self.line_errors();
        self.clear_line_errors(errors);
        errors
    }
}

impl<B: RegisterBus> UartTx for Uart0<B> {
    type Error = UartError;

    fn try_write_byte(&mut self, byte: u8) -> nb::Result<(), UartError> {
        let s1 = self.bus.read8(uart0::S1);
        if s1 & (uart0::S1_TDRE | uart0::S1_TC) == 0 {
            return Err(nb::Error::WouldBlock);
        }
        self.bus.write8(uart0::D, byte);
        Ok(())
    }
}

impl<B: RegisterBus> UartRx for Uart0<B> {
    type Error = UartError;

    /// Take one received byte
    ///
    /// A latched overrun blocks RDRF until cleared, so it is cleared here
    /// and reported once; the next poll receives normally.
    fn try_read_byte(&mut self) -> nb::Result<u8, UartError> {
        let s1 = self.bus.read8(uart0::S1);
        if s1 & uart0::S1_RDRF != 0 {
            return Ok(self.bus.read8(uart0::D));
        }
        if s1 & uart0::S1_OR != 0 {
            self.bus.write8(uart0::S1, uart0::S1_OR);
            return Err(nb::Error::Other(UartError::Overrun));
        }
        Err(nb::Error::WouldBlock)
    }
}
