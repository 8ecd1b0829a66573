//! Baud-rate generator arithmetic
//!
//! The KL25Z UART0 derives its bit clock from the module clock with two
//! integers: an oversampling ratio (OSR, programmed as `samples - 1`) and a
//! 13-bit divisor (SBR):
//!
//! ```text
//! actual_baud = uart_clock / ((osr + 1) * sbr)
//! ```
//!
//! Everything here is integer arithmetic and `const`, so the firmware's
//! fixed configuration is checked at compile time.

/// Smallest OSR register value the hardware accepts (4x oversampling)
pub const MIN_OSR: u8 = 3;

/// Largest OSR register value (32x oversampling)
pub const MAX_OSR: u8 = 31;

/// Largest divisor that fits the 13-bit SBR field
pub const MAX_SBR: u16 = 0x1FFF;

/// Allowed deviation between actual and target baud rate, in percent
pub const TOLERANCE_PERCENT: u32 = 3;

/// Reasons a baud configuration cannot be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BaudError {
    /// OSR outside 3..=31
    OversamplingOutOfRange(u8),
    /// SBR of zero or wider than 13 bits
    DivisorOutOfRange(u32),
    /// Actual rate further than [`TOLERANCE_PERCENT`] from the target
    OutOfTolerance {
        /// Rate the divisors actually produce
        actual: u32,
        /// Rate that was asked for
        target: u32,
    },
}

/// Baud-rate generator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaudConfig {
    /// Requested baud rate in bits per second
    pub target: u32,
    /// OSR register value (samples per bit minus one)
    pub osr: u8,
    /// Baud-rate generator divisor
    pub sbr: u16,
}

impl BaudConfig {
    /// Create a configuration from explicit divisors
    ///
    /// Nothing is validated here; see [`BaudConfig::check`].
    pub const fn new(target: u32, osr: u8, sbr: u16) -> Self {
        Self { target, osr, sbr }
    }

    /// Pick the divisor for a fixed oversampling ratio
    ///
    /// The divisor is rounded to the nearest integer, then the result is
    /// checked like any other configuration.
    pub const fn compute(clock_hz: u32, target: u32, osr: u8) -> Result<Self, BaudError> {
        if osr < MIN_OSR || osr > MAX_OSR {
            return Err(BaudError::OversamplingOutOfRange(osr));
        }
        if target == 0 {
            return Err(BaudError::DivisorOutOfRange(0));
        }

        let per_divisor = (osr as u64 + 1) * target as u64;
        let sbr = (clock_hz as u64 + per_divisor / 2) / per_divisor;
        if sbr == 0 || sbr > MAX_SBR as u64 {
            return Err(BaudError::DivisorOutOfRange(sbr as u32));
        }

        let config = Self::new(target, osr, sbr as u16);
        match config.check(clock_hz) {
            Ok(_) => Ok(config),
            Err(e) => Err(e),
        }
    }

    /// Samples taken per bit period
    pub const fn oversampling(&self) -> u32 {
        self.osr as u32 + 1
    }

    /// Baud rate the divisors produce from `clock_hz`
    ///
    /// Truncating division, as the hardware counts whole clock cycles.
    /// Returns 0 for a zero divisor.
    pub const fn actual_baud(&self, clock_hz: u32) -> u32 {
        if self.sbr == 0 {
            return 0;
        }
        clock_hz / (self.oversampling() * self.sbr as u32)
    }

    /// Absolute difference between actual and target rate
    pub const fn error_hz(&self, clock_hz: u32) -> u32 {
        self.actual_baud(clock_hz).abs_diff(self.target)
    }

    /// Largest acceptable [`BaudConfig::error_hz`]
    pub const fn tolerance_hz(&self) -> u32 {
        (self.target as u64 * TOLERANCE_PERCENT as u64 / 100) as u32
    }

    /// Whether the actual rate is within tolerance of the target
    pub const fn is_within_tolerance(&self, clock_hz: u32) -> bool {
        self.sbr != 0 && self.error_hz(clock_hz) <= self.tolerance_hz()
    }

    /// Validate register ranges and tolerance
    ///
    /// Returns the actual baud rate on success.
    pub const fn check(&self, clock_hz: u32) -> Result<u32, BaudError> {
        if self.osr < MIN_OSR || self.osr > MAX_OSR {
            return Err(BaudError::OversamplingOutOfRange(self.osr));
        }
        if self.sbr == 0 || self.sbr > MAX_SBR {
            return Err(BaudError::DivisorOutOfRange(self.sbr as u32));
        }
        let actual = self.actual_baud(clock_hz);
        if !self.is_within_tolerance(clock_hz) {
            return Err(BaudError::OutOfTolerance {
                actual,
                target: self.target,
            });
        }
        Ok(actual)
    }

    /// SBR bits 12..8, as programmed into BDH
    pub const fn sbr_high(&self) -> u8 {
        ((self.sbr & 0x1F00) >> 8) as u8
    }

    /// SBR bits 7..0, as programmed into BDL
    pub const fn sbr_low(&self) -> u8 {
        (self.sbr & 0x00FF) as u8
    }

    /// Oversampling of 4x to 7x requires sampling on both clock edges
    pub const fn needs_both_edge_sampling(&self) -> bool {
        self.osr >= 3 && self.osr <= 6
    }
}
