//! GPIO outputs and the FRDM-KL25Z LED pins
//!
//! Pins are driven through the set/clear registers (PSOR/PCOR), so writes to
//! one pin never disturb the others on the same port. The latched level is
//! read back from PDOR.

use bringup_hal::{OutputPin, RegisterBus};

use crate::regs::{gpio, port, sim};

/// GPIO port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
}

impl Port {
    /// PORTx (pin control) base address
    pub const fn port_base(self) -> u32 {
        match self {
            Port::A => port::PORTA,
            Port::B => port::PORTB,
            Port::C => port::PORTC,
            Port::D => port::PORTD,
            Port::E => port::PORTE,
        }
    }

    /// GPIOx register block base address
    pub const fn gpio_base(self) -> u32 {
        match self {
            Port::A => gpio::PTA,
            Port::B => gpio::PTB,
            Port::C => gpio::PTC,
            Port::D => gpio::PTD,
            Port::E => gpio::PTE,
        }
    }

    /// SIM_SCGC5 clock gate for this port
    pub const fn clock_gate(self) -> u32 {
        match self {
            Port::A => sim::SCGC5_PORTA,
            Port::B => sim::SCGC5_PORTB,
            Port::C => sim::SCGC5_PORTC,
            Port::D => sim::SCGC5_PORTD,
            Port::E => sim::SCGC5_PORTE,
        }
    }
}

/// A pin on a port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    pub port: Port,
    pub pin: u8,
}

impl PinId {
    pub const fn new(port: Port, pin: u8) -> Self {
        Self { port, pin }
    }

    /// Bit of this pin in the port's GPIO registers
    pub const fn mask(self) -> u32 {
        1 << self.pin
    }

    /// Address of this pin's PCR
    pub const fn pcr(self) -> u32 {
        port::pcr(self.port.port_base(), self.pin)
    }

    const fn gpio_reg(self, offset: u32) -> u32 {
        self.port.gpio_base() + offset
    }
}

/// Red LED (PTB18)
pub const LED_RED: PinId = PinId::new(Port::B, 18);
/// Green LED (PTB19)
pub const LED_GREEN: PinId = PinId::new(Port::B, 19);
/// Blue LED (PTD1)
pub const LED_BLUE: PinId = PinId::new(Port::D, 1);

/// PCR value for an LED output: GPIO function, high drive strength
pub const LED_PCR: u32 = port::pcr_mux(1) | port::PCR_DSE;

/// A GPIO pin configured as output
pub struct KlPin<B> {
    bus: B,
    id: PinId,
}

impl<B: RegisterBus> KlPin<B> {
    /// Wrap a pin that has already been configured as an output
    pub fn new(bus: B, id: PinId) -> Self {
        Self { bus, id }
    }

    pub fn id(&self) -> PinId {
        self.id
    }
}

impl<B: RegisterBus> OutputPin for KlPin<B> {
    fn set_high(&mut self) {
        self.bus.write32(self.id.gpio_reg(gpio::PSOR), self.id.mask());
    }

    fn set_low(&mut self) {
        self.bus.write32(self.id.gpio_reg(gpio::PCOR), self.id.mask());
    }

    fn is_set_high(&self) -> bool {
        self.bus.read32(self.id.gpio_reg(gpio::PDOR)) & self.id.mask() != 0
    }
}

/// Configure the three LED pins as outputs, all LEDs off
///
/// The LEDs are low-active, so "off" is every line driven high. Must run
/// before any color is written.
pub fn configure_leds<B: RegisterBus>(bus: &B) {
    bus.set_bits32(sim::SCGC5, sim::SCGC5_PORTB | sim::SCGC5_PORTD);

    for pin in [LED_RED, LED_GREEN, LED_BLUE] {
        bus.write32(pin.pcr(), LED_PCR);
    }

    bus.set_bits32(LED_RED.gpio_reg(gpio::PDDR), LED_RED.mask() | LED_GREEN.mask());
    bus.set_bits32(LED_BLUE.gpio_reg(gpio::PDDR), LED_BLUE.mask());

    bus.write32(LED_RED.gpio_reg(gpio::PSOR), LED_RED.mask() | LED_GREEN.mask());
    bus.write32(LED_BLUE.gpio_reg(gpio::PSOR), LED_BLUE.mask());
}
