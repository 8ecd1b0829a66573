//! Busy-wait helpers
//!
//! Every hardware handshake in this firmware is a status flag that is
//! polled until it flips. An unbounded poll hangs forever if the flag never
//! flips (unclocked peripheral, missing crystal, disconnected peer), so
//! callers that can report a failure pass a spin budget instead.

/// How long [`spin_until`] keeps polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpinBudget {
    /// Poll until the operation completes, however long that takes
    Unbounded,
    /// Give up after this many polls that would block
    Spins(u32),
}

/// Error from a budgeted wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitError<E> {
    /// The spin budget ran out before the operation completed
    Timeout,
    /// The operation itself failed
    Other(E),
}

impl<E> From<E> for WaitError<E> {
    fn from(e: E) -> Self {
        WaitError::Other(e)
    }
}

/// Poll a non-blocking operation until it completes, fails, or the budget
/// runs out
pub fn spin_until<T, E, F>(budget: SpinBudget, mut op: F) -> Result<T, WaitError<E>>
where
    F: FnMut() -> nb::Result<T, E>,
{
    let mut spins: u32 = 0;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(nb::Error::Other(e)) => return Err(WaitError::Other(e)),
            Err(nb::Error::WouldBlock) => {
                if let SpinBudget::Spins(limit) = budget {
                    if spins >= limit {
                        return Err(WaitError::Timeout);
                    }
                }
                spins = spins.saturating_add(1);
                core::hint::spin_loop();
            }
        }
    }
}

/// Turn a readiness check into a non-blocking result
///
/// Handy for flag polls: `spin_until(budget, || ready(flag_is_set()))`.
pub fn ready<E>(condition: bool) -> nb::Result<(), E> {
    if condition {
        Ok(())
    } else {
        Err(nb::Error::WouldBlock)
    }
}
