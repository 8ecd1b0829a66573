//! Register bus abstraction
//!
//! Peripherals are reached through a bus handle instead of global register
//! pointers. Drivers take the bus as a value (`Copy` on the target) or by
//! reference (simulated bus in tests).

/// Access to memory-mapped peripheral registers
///
/// All methods take `&self`: register writes are side effects on hardware
/// that the bus does not own, and several drivers share one bus.
pub trait RegisterBus {
    /// Read an 8-bit register
    fn read8(&self, addr: u32) -> u8;

    /// Write an 8-bit register
    fn write8(&self, addr: u32, value: u8);

    /// Read a 32-bit register
    fn read32(&self, addr: u32) -> u32;

    /// Write a 32-bit register
    fn write32(&self, addr: u32, value: u32);

    /// Read-modify-write an 8-bit register
    fn modify8<F: FnOnce(u8) -> u8>(&self, addr: u32, f: F) {
        let value = self.read8(addr);
        self.write8(addr, f(value));
    }

    /// Read-modify-write a 32-bit register
    fn modify32<F: FnOnce(u32) -> u32>(&self, addr: u32, f: F) {
        let value = self.read32(addr);
        self.write32(addr, f(value));
    }

    /// Set bits in an 8-bit register (read-modify-write)
    fn set_bits8(&self, addr: u32, mask: u8) {
        self.modify8(addr, |v| v | mask);
    }

    /// Clear bits in an 8-bit register (read-modify-write)
    fn clear_bits8(&self, addr: u32, mask: u8) {
        self.modify8(addr, |v| v & !mask);
    }

    /// Set bits in a 32-bit register (read-modify-write)
    fn set_bits32(&self, addr: u32, mask: u32) {
        self.modify32(addr, |v| v | mask);
    }
}

impl<B: RegisterBus + ?Sized> RegisterBus for &B {
    fn read8(&self, addr: u32) -> u8 {
        (**self).read8(addr)
    }

    fn write8(&self, addr: u32, value: u8) {
        (**self).write8(addr, value)
    }

    fn read32(&self, addr: u32) -> u32 {
        (**self).read32(addr)
    }

    fn write32(&self, addr: u32, value: u32) {
        (**self).write32(addr, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// One 32-bit register at address 0, viewed through both widths
    struct OneRegister {
        value: Cell<u32>,
    }

    impl RegisterBus for OneRegister {
        fn read8(&self, _addr: u32) -> u8 {
            self.value.get() as u8
        }

        fn write8(&self, _addr: u32, value: u8) {
            self.value.set(value as u32);
        }

        fn read32(&self, _addr: u32) -> u32 {
            self.value.get()
        }

        fn write32(&self, _addr: u32, value: u32) {
            self.value.set(value);
        }
    }

    #[test]
    fn test_modify_helpers() {
        let reg = OneRegister {
            value: Cell::new(0b1010),
        };

        reg.set_bits8(0, 0b0001);
        assert_eq!(reg.read8(0), 0b1011);

        reg.clear_bits8(0, 0b1000);
        assert_eq!(reg.read8(0), 0b0011);

        reg.set_bits32(0, 1 << 20);
        assert_eq!(reg.read32(0), (1 << 20) | 0b0011);
    }

    #[test]
    fn test_reference_forwards() {
        let reg = OneRegister {
            value: Cell::new(0),
        };

        fn poke<B: RegisterBus>(bus: B) {
            bus.write32(0, 0xDEAD_BEEF);
        }

        poke(&reg);
        assert_eq!(reg.read32(0), 0xDEAD_BEEF);
    }
}
