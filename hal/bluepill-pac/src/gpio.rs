//! GPIO port registers
//!
//! | Offset | Register | Access | Contents |
//! |--------|----------|--------|----------|
//! | 0x00 | CRL  | rw | CNF/MODE nibbles for pins 0-7 |
//! | 0x04 | CRH  | rw | CNF/MODE nibbles for pins 8-15 |
//! | 0x08 | IDR  | r  | input levels |
//! | 0x0C | ODR  | rw | output latch |
//! | 0x10 | BSRR | w  | bits 0-15 set, bits 16-31 reset |
//! | 0x14 | BRR  | w  | bits 0-15 reset |
//! | 0x18 | LCKR | rw | per-pin lock bits, lock key at bit 16 |

use core::mem::{offset_of, size_of};

use tock_registers::registers::{ReadOnly, ReadWrite, WriteOnly};
use tock_registers::{register_bitfields, register_structs};

/// CRL/CRH reset value: every pin a floating input
pub const CR_RESET: u32 = 0x4444_4444;

/// LCKR lock key bit as a raw mask
pub const LCKK: u32 = 1 << 16;

register_bitfields![u32,
    pub LCKR [
        LCK OFFSET(0) NUMBITS(16) [],
        LCKK OFFSET(16) NUMBITS(1) []
    ]
];

register_structs! {
    /// One GPIO port (GPIOA..GPIOE)
    pub RegisterBlock {
        (0x000 => pub crl: ReadWrite<u32>),
        (0x004 => pub crh: ReadWrite<u32>),
        (0x008 => pub idr: ReadOnly<u32>),
        (0x00C => pub odr: ReadWrite<u32>),
        (0x010 => pub bsrr: WriteOnly<u32>),
        (0x014 => pub brr: WriteOnly<u32>),
        (0x018 => pub lckr: ReadWrite<u32, LCKR::Register>),
        (0x01C => @END),
    }
}

const _: () = {
    assert!(offset_of!(RegisterBlock, crl) == 0x00);
    assert!(offset_of!(RegisterBlock, crh) == 0x04);
    assert!(offset_of!(RegisterBlock, idr) == 0x08);
    assert!(offset_of!(RegisterBlock, odr) == 0x0C);
    assert!(offset_of!(RegisterBlock, bsrr) == 0x10);
    assert!(offset_of!(RegisterBlock, brr) == 0x14);
    assert!(offset_of!(RegisterBlock, lckr) == 0x18);
    assert!(size_of::<RegisterBlock>() == 0x1C);
};
