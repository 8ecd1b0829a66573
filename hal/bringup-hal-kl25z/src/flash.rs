//! Flash configuration field
//!
//! Sixteen bytes at 0x400..0x410 that the boot ROM reads out of flash at
//! reset: backdoor key, program-flash protection, FSEC, FOPT, FEPROT and
//! FDPROT. Erased (0xFF) means "no protection, default options"; FSEC must
//! not be left erased, since 0xFF secures the chip and locks out the debugger.

/// Offset of FSEC within the field
pub const FSEC_OFFSET: usize = 0xC;

/// FSEC: unsecured, backdoor key disabled, mass erase allowed
pub const FSEC_UNSECURED: u8 = 0xFE;

/// Contents of the flash configuration field
pub const FLASH_CONFIG: [u8; 16] = {
    let mut field = [0xFF; 16];
    field[FSEC_OFFSET] = FSEC_UNSECURED;
    field
};
