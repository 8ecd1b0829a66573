//! Memory-mapped register bus for the real chip

use bringup_hal::RegisterBus;

/// Volatile access to the KL25Z peripheral address space
///
/// Zero-sized and `Copy`: every driver gets its own handle. Only addresses
/// from [`crate::regs`] are ever passed in.
#[derive(Debug, Clone, Copy)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Create the bus handle
    ///
    /// # Safety
    ///
    /// The caller must be the only code in the program accessing the
    /// peripherals driven through this bus, and the program must run on a
    /// KL25Z (any other address map turns every access into a fault or a
    /// write to the wrong peripheral).
    pub const unsafe fn new() -> Self {
        Mmio { _private: () }
    }
}

impl RegisterBus for Mmio {
    #[inline]
    fn read8(&self, addr: u32) -> u8 {
        // SAFETY: `Mmio` only exists on the target, addresses come from the
        // register map and are valid, aligned peripheral registers
        unsafe { core::ptr::read_volatile(addr as usize as *const u8) }
    }

    #[inline]
    fn write8(&self, addr: u32, value: u8) {
        // SAFETY: see `read8`
        unsafe { core::ptr::write_volatile(addr as usize as *mut u8, value) }
    }

    #[inline]
    fn read32(&self, addr: u32) -> u32 {
        // SAFETY: see `read8`
        unsafe { core::ptr::read_volatile(addr as usize as *const u32) }
    }

    #[inline]
    fn write32(&self, addr: u32, value: u32) {
        // SAFETY: see `read8`
        unsafe { core::ptr::write_volatile(addr as usize as *mut u32, value) }
    }
}
