//! KL25Z register map
//!
//! Absolute addresses and bit masks for the registers this firmware
//! touches (KL25 Sub-Family Reference Manual, KL25P80M48SF0RM). SIM, PORT
//! and GPIO registers are 32 bits wide; MCG, OSC and UART0 registers are 8
//! bits wide.

/// System Integration Module
pub mod sim {
    /// System Options Register 2 (clock source selects)
    pub const SOPT2: u32 = 0x4004_8004;
    /// System Clock Gating Control Register 4
    pub const SCGC4: u32 = 0x4004_8034;
    /// System Clock Gating Control Register 5
    pub const SCGC5: u32 = 0x4004_8038;
    /// System Clock Divider Register 1
    pub const CLKDIV1: u32 = 0x4004_8044;
    /// COP (watchdog) Control Register
    pub const COPC: u32 = 0x4004_8100;

    /// SOPT2: UART0 clock source select (bits 27..26)
    pub const SOPT2_UART0SRC_MASK: u32 = 0b11 << 26;
    /// SOPT2: PLL/FLL clock select (set = MCGPLLCLK/2)
    pub const SOPT2_PLLFLLSEL: u32 = 1 << 16;

    /// SOPT2 UART0SRC field value
    pub const fn sopt2_uart0src(src: u32) -> u32 {
        (src & 0b11) << 26
    }

    /// SCGC4: UART0 clock gate
    pub const SCGC4_UART0: u32 = 1 << 10;

    /// SCGC5: PORTA clock gate
    pub const SCGC5_PORTA: u32 = 1 << 9;
    /// SCGC5: PORTB clock gate
    pub const SCGC5_PORTB: u32 = 1 << 10;
    /// SCGC5: PORTC clock gate
    pub const SCGC5_PORTC: u32 = 1 << 11;
    /// SCGC5: PORTD clock gate
    pub const SCGC5_PORTD: u32 = 1 << 12;
    /// SCGC5: PORTE clock gate
    pub const SCGC5_PORTE: u32 = 1 << 13;

    /// CLKDIV1 OUTDIV1 field (core/platform clock divider minus one)
    pub const fn clkdiv1_outdiv1(div: u32) -> u32 {
        (div & 0xF) << 28
    }

    /// CLKDIV1 OUTDIV4 field (bus/flash clock divider minus one)
    pub const fn clkdiv1_outdiv4(div: u32) -> u32 {
        (div & 0x7) << 16
    }
}

/// Multipurpose Clock Generator
pub mod mcg {
    pub const C1: u32 = 0x4006_4000;
    pub const C2: u32 = 0x4006_4001;
    pub const C5: u32 = 0x4006_4004;
    pub const C6: u32 = 0x4006_4005;
    /// Status register
    pub const S: u32 = 0x4006_4006;

    /// C1 CLKS field: 0 = FLL/PLL output, 1 = internal ref, 2 = external ref
    pub const fn c1_clks(src: u8) -> u8 {
        (src & 0b11) << 6
    }
    /// C1 FRDIV field (FLL external reference divider)
    pub const fn c1_frdiv(div: u8) -> u8 {
        (div & 0b111) << 3
    }
    /// C1: internal reference select for the FLL
    pub const C1_IREFS: u8 = 1 << 2;
    pub const C1_CLKS_MASK: u8 = 0b11 << 6;

    /// C2 RANGE0 field (crystal frequency range)
    pub const fn c2_range0(range: u8) -> u8 {
        (range & 0b11) << 4
    }
    /// C2: external reference is an oscillator (crystal)
    pub const C2_EREFS0: u8 = 1 << 2;

    /// C5 PRDIV0 field (PLL reference divider minus one)
    pub const fn c5_prdiv0(div: u8) -> u8 {
        div & 0x1F
    }

    /// C6: PLL select
    pub const C6_PLLS: u8 = 1 << 6;
    /// C6 VDIV0 field (PLL multiplier minus 24)
    pub const fn c6_vdiv0(mul: u8) -> u8 {
        mul & 0x1F
    }

    /// S: PLL locked
    pub const S_LOCK0: u8 = 1 << 6;
    /// S: PLLS clock source status (PLL feeds MCGOUT mux)
    pub const S_PLLST: u8 = 1 << 5;
    /// S: FLL reference is the internal clock
    pub const S_IREFST: u8 = 1 << 4;
    /// S CLKST field (clock mode status)
    pub const S_CLKST_MASK: u8 = 0b11 << 2;
    pub const S_CLKST_SHIFT: u8 = 2;
    /// S: crystal oscillator initialized
    pub const S_OSCINIT0: u8 = 1 << 1;
}

/// System oscillator
pub mod osc {
    /// OSC0 control register
    pub const CR: u32 = 0x4006_5000;
}

/// Port control (pin multiplexing)
pub mod port {
    pub const PORTA: u32 = 0x4004_9000;
    pub const PORTB: u32 = 0x4004_A000;
    pub const PORTC: u32 = 0x4004_B000;
    pub const PORTD: u32 = 0x4004_C000;
    pub const PORTE: u32 = 0x4004_D000;

    /// Pin Control Register address for `pin` on the port at `base`
    pub const fn pcr(base: u32, pin: u8) -> u32 {
        base + 4 * pin as u32
    }

    /// PCR MUX field (0 = analog, 1 = GPIO, 2..7 = alternate functions)
    pub const fn pcr_mux(alt: u32) -> u32 {
        (alt & 0b111) << 8
    }
    pub const PCR_MUX_MASK: u32 = 0b111 << 8;

    /// PCR: high drive strength
    pub const PCR_DSE: u32 = 1 << 6;
}

/// General-purpose I/O (fast register block is not used)
pub mod gpio {
    pub const PTA: u32 = 0x400F_F000;
    pub const PTB: u32 = 0x400F_F040;
    pub const PTC: u32 = 0x400F_F080;
    pub const PTD: u32 = 0x400F_F0C0;
    pub const PTE: u32 = 0x400F_F100;

    /// Port Data Output Register
    pub const PDOR: u32 = 0x00;
    /// Port Set Output Register (write 1 to drive high)
    pub const PSOR: u32 = 0x04;
    /// Port Clear Output Register (write 1 to drive low)
    pub const PCOR: u32 = 0x08;
    /// Port Toggle Output Register
    pub const PTOR: u32 = 0x0C;
    /// Port Data Input Register
    pub const PDIR: u32 = 0x10;
    /// Port Data Direction Register (1 = output)
    pub const PDDR: u32 = 0x14;
}

/// UART0 (low-power UART with configurable oversampling)
pub mod uart0 {
    pub const BASE: u32 = 0x4006_A000;

    pub const BDH: u32 = BASE;
    pub const BDL: u32 = BASE + 0x1;
    pub const C1: u32 = BASE + 0x2;
    pub const C2: u32 = BASE + 0x3;
    pub const S1: u32 = BASE + 0x4;
    pub const S2: u32 = BASE + 0x5;
    pub const C3: u32 = BASE + 0x6;
    pub const D: u32 = BASE + 0x7;
    pub const MA1: u32 = BASE + 0x8;
    pub const MA2: u32 = BASE + 0x9;
    pub const C4: u32 = BASE + 0xA;
    pub const C5: u32 = BASE + 0xB;

    /// BDH: LIN break detect interrupt enable
    pub const BDH_LBKDIE: u8 = 1 << 7;
    /// BDH: RX input active edge interrupt enable
    pub const BDH_RXEDGIE: u8 = 1 << 6;
    /// BDH: stop bit number select (set = two stop bits)
    pub const BDH_SBNS: u8 = 1 << 5;
    pub const BDH_SBR_MASK: u8 = 0x1F;

    /// C1: loop mode
    pub const C1_LOOPS: u8 = 1 << 7;
    /// C1: 9-bit mode
    pub const C1_M: u8 = 1 << 4;
    /// C1: parity enable
    pub const C1_PE: u8 = 1 << 1;
    /// C1: odd parity
    pub const C1_PT: u8 = 1 << 0;

    /// C2: transmitter enable
    pub const C2_TE: u8 = 1 << 3;
    /// C2: receiver enable
    pub const C2_RE: u8 = 1 << 2;

    /// S1: transmit data register empty
    pub const S1_TDRE: u8 = 1 << 7;
    /// S1: transmission complete
    pub const S1_TC: u8 = 1 << 6;
    /// S1: receive data register full
    pub const S1_RDRF: u8 = 1 << 5;
    /// S1: idle line (write 1 to clear)
    pub const S1_IDLE: u8 = 1 << 4;
    /// S1: receiver overrun (write 1 to clear)
    pub const S1_OR: u8 = 1 << 3;
    /// S1: noise flag (write 1 to clear)
    pub const S1_NF: u8 = 1 << 2;
    /// S1: framing error (write 1 to clear)
    pub const S1_FE: u8 = 1 << 1;
    /// S1: parity error (write 1 to clear)
    pub const S1_PF: u8 = 1 << 0;
    /// S1 bits cleared by writing 1
    pub const S1_W1C_MASK: u8 = S1_IDLE | S1_OR | S1_NF | S1_FE | S1_PF;
    /// S1 line error bits
    pub const S1_ERROR_MASK: u8 = S1_OR | S1_NF | S1_FE | S1_PF;

    /// S2: LIN break detect interrupt flag (write 1 to clear)
    pub const S2_LBKDIF: u8 = 1 << 7;
    /// S2: RX pin active edge interrupt flag (write 1 to clear)
    pub const S2_RXEDGIF: u8 = 1 << 6;

    /// C4 OSR field (oversampling ratio minus one)
    pub const C4_OSR_MASK: u8 = 0x1F;
    pub const fn c4_osr(osr: u8) -> u8 {
        osr & C4_OSR_MASK
    }

    /// C5: sample received data on both clock edges
    pub const C5_BOTHEDGE: u8 = 1 << 1;
}
