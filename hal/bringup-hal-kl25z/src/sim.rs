//! Simulated KL25Z register file
//!
//! A [`RegisterBus`] backed by plain memory, with just enough peripheral
//! behavior for the drivers in this workspace to run on the host:
//!
//! - GPIO set/clear/toggle registers update the data output register
//! - UART0 status reflects the receive queue, D feeds/drains byte queues,
//!   S1/S2 flags are write-1-to-clear
//! - MCG status follows C1/C2/C6 as if the oscillator and PLL lock instantly
//!
//! Every write is logged in order, so tests can check register sequencing.
//! A register can be "held" at a fixed value to simulate a flag that never
//! flips.
//!
//! Storage is fixed-size. Running out of room panics rather than losing a
//! write, so a test never passes on a truncated log.

use core::cell::RefCell;

use bringup_hal::RegisterBus;
use heapless::{Deque, FnvIndexMap, Vec};

use crate::regs::{gpio, mcg, uart0};

/// Maximum number of logged writes; one more panics
pub const LOG_CAPACITY: usize = 256;

/// Capacity of the simulated receive and transmit queues
pub const FIFO_CAPACITY: usize = 64;

/// Access width of a logged write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Byte,
    Word,
}

/// One logged register write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegWrite {
    pub addr: u32,
    pub value: u32,
    pub width: Width,
}

struct SimState {
    regs: FnvIndexMap<u32, u32, 128>,
    held: FnvIndexMap<u32, u32, 8>,
    writes: Vec<RegWrite, LOG_CAPACITY>,
    rx: Deque<u8, FIFO_CAPACITY>,
    tx: Vec<u8, FIFO_CAPACITY>,
    /// Latched UART0 S1 error and idle bits
    line_flags: u8,
}

impl SimState {
    fn get(&self, addr: u32) -> u32 {
        self.regs.get(&addr).copied().unwrap_or(0)
    }

    fn set(&mut self, addr: u32, value: u32) {
        self.regs
            .insert(addr, value)
            .expect("SimBus register file full");
    }

    fn log(&mut self, addr: u32, value: u32, width: Width) {
        self.writes
            .push(RegWrite { addr, value, width })
            .expect("SimBus write log full");
    }

    fn uart_s1(&self) -> u8 {
        let mut s1 = uart0::S1_TDRE | uart0::S1_TC | self.line_flags;
        if !self.rx.is_empty() {
            s1 |= uart0::S1_RDRF;
        }
        s1
    }

    fn update_mcg_status(&mut self) {
        let c1 = self.get(mcg::C1) as u8;
        let c2 = self.get(mcg::C2) as u8;
        let c6 = self.get(mcg::C6) as u8;

        let mut s = 0u8;
        if c1 & mcg::C1_IREFS != 0 {
            s |= mcg::S_IREFST;
        }
        if c2 & mcg::C2_EREFS0 != 0 {
            s |= mcg::S_OSCINIT0;
        }
        if c6 & mcg::C6_PLLS != 0 {
            s |= mcg::S_PLLST | mcg::S_LOCK0;
        }
        let clkst = match (c1 & mcg::C1_CLKS_MASK) >> 6 {
            0 if c6 & mcg::C6_PLLS != 0 => 3,
            clks => clks,
        };
        s |= clkst << mcg::S_CLKST_SHIFT;
        self.set(mcg::S, s as u32);
    }
}

/// Split a GPIO register address into (port block, offset)
fn gpio_register(addr: u32) -> Option<(u32, u32)> {
    if (gpio::PTA..gpio::PTE + 0x40).contains(&addr) {
        Some((addr & !0x3F, addr & 0x3F))
    } else {
        None
    }
}

/// Simulated register bus
pub struct SimBus {
    state: RefCell<SimState>,
}

impl Default for SimBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimBus {
    /// Create a register file in its reset state (MCG in FEI mode)
    pub fn new() -> Self {
        let mut state = SimState {
            regs: FnvIndexMap::new(),
            held: FnvIndexMap::new(),
            writes: Vec::new(),
            rx: Deque::new(),
            tx: Vec::new(),
            line_flags: 0,
        };
        state.set(mcg::C1, mcg::C1_IREFS as u32);
        state.update_mcg_status();
        Self {
            state: RefCell::new(state),
        }
    }

    /// All logged writes, oldest first
    pub fn writes(&self) -> Vec<RegWrite, LOG_CAPACITY> {
        self.state.borrow().writes.clone()
    }

    /// Values written to one register, oldest first
    pub fn writes_to(&self, addr: u32) -> Vec<u32, 32> {
        let state = self.state.borrow();
        let mut values = Vec::new();
        for w in state.writes.iter().filter(|w| w.addr == addr) {
            values
                .push(w.value)
                .expect("more than 32 writes to one register");
        }
        values
    }

    /// Log index of the first write to `addr`
    pub fn first_write(&self, addr: u32) -> Option<usize> {
        self.state
            .borrow()
            .writes
            .iter()
            .position(|w| w.addr == addr)
    }

    /// Log index of the last write to `addr`
    pub fn last_write(&self, addr: u32) -> Option<usize> {
        self.state
            .borrow()
            .writes
            .iter()
            .rposition(|w| w.addr == addr)
    }

    /// Forget logged writes (register contents are kept)
    pub fn clear_log(&self) {
        self.state.borrow_mut().writes.clear();
    }

    /// Read an 8-bit register without side effects
    pub fn peek8(&self, addr: u32) -> u8 {
        let state = self.state.borrow();
        if let Some(&held) = state.held.get(&addr) {
            return held as u8;
        }
        match addr {
            uart0::S1 => state.uart_s1(),
            _ => state.get(addr) as u8,
        }
    }

    /// Read a 32-bit register without side effects
    pub fn peek32(&self, addr: u32) -> u32 {
        let state = self.state.borrow();
        state.held.get(&addr).copied().unwrap_or_else(|| state.get(addr))
    }

    /// Queue bytes as if they arrived on the UART0 RX line
    pub fn push_rx(&self, bytes: &[u8]) {
        let mut state = self.state.borrow_mut();
        for &b in bytes {
            state.rx.push_back(b).expect("SimBus receive queue full");
        }
    }

    /// Bytes written to UART0 D so far
    pub fn transmitted(&self) -> Vec<u8, FIFO_CAPACITY> {
        self.state.borrow().tx.clone()
    }

    /// Latch UART0 S1 flags (error or idle bits), as the receiver would
    pub fn raise_line_flags(&self, flags: u8) {
        self.state.borrow_mut().line_flags |= flags & uart0::S1_W1C_MASK;
    }

    /// Pin a register to a fixed read value
    pub fn hold(&self, addr: u32, value: u32) {
        self.state
            .borrow_mut()
            .held
            .insert(addr, value)
            .expect("SimBus hold table full");
    }

    /// Undo [`SimBus::hold`]
    pub fn release(&self, addr: u32) {
        self.state.borrow_mut().held.remove(&addr);
    }
}

impl RegisterBus for SimBus {
    fn read8(&self, addr: u32) -> u8 {
        if addr == uart0::D && !self.state.borrow().held.contains_key(&addr) {
            return self.state.borrow_mut().rx.pop_front().unwrap_or(0);
        }
        self.peek8(addr)
    }

    fn write8(&self, addr: u32, value: u8) {
        let mut state = self.state.borrow_mut();
        state.log(addr, value as u32, Width::Byte);

        match addr {
            uart0::S1 => {
                state.line_flags &= !(value & uart0::S1_W1C_MASK);
            }
            uart0::S2 => {
                let w1c = uart0::S2_LBKDIF | uart0::S2_RXEDGIF;
                let old = state.get(addr) as u8;
                let next = (old & !(value & w1c)) | (value & !w1c);
                state.set(addr, next as u32);
            }
            uart0::D => {
                state.tx.push(value).expect("SimBus transmit queue full");
            }
            mcg::C1 | mcg::C2 | mcg::C6 => {
                state.set(addr, value as u32);
                state.update_mcg_status();
            }
            mcg::S => {}
            _ => state.set(addr, value as u32),
        }
    }

    fn read32(&self, addr: u32) -> u32 {
        if let Some((_, offset)) = gpio_register(addr) {
            if matches!(offset, gpio::PSOR | gpio::PCOR | gpio::PTOR) {
                return 0;
            }
        }
        self.peek32(addr)
    }

    fn write32(&self, addr: u32, value: u32) {
        let mut state = self.state.borrow_mut();
        state.log(addr, value, Width::Word);

        if let Some((block, offset)) = gpio_register(addr) {
            let pdor = block + gpio::PDOR;
            let current = state.get(pdor);
            match offset {
                gpio::PSOR => return state.set(pdor, current | value),
                gpio::PCOR => return state.set(pdor, current & !value),
                gpio::PTOR => return state.set(pdor, current ^ value),
                _ => {}
            }
        }
        state.set(addr, value);
    }
}
