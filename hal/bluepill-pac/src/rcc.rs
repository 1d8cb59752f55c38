//! Reset and clock control registers
//!
//! Only the APB2 enable and reset registers carry named fields; the driver
//! layer never touches the clock tree beyond single peripheral bits.

use core::mem::{offset_of, size_of};

use tock_registers::registers::ReadWrite;
use tock_registers::{register_bitfields, register_structs};

register_bitfields![u32,
    pub APB2ENR [
        AFIOEN OFFSET(0) NUMBITS(1) [],
        IOPAEN OFFSET(2) NUMBITS(1) [],
        IOPBEN OFFSET(3) NUMBITS(1) [],
        IOPCEN OFFSET(4) NUMBITS(1) [],
        IOPDEN OFFSET(5) NUMBITS(1) [],
        IOPEEN OFFSET(6) NUMBITS(1) []
    ],
    pub APB2RSTR [
        AFIORST OFFSET(0) NUMBITS(1) [],
        IOPARST OFFSET(2) NUMBITS(1) [],
        IOPBRST OFFSET(3) NUMBITS(1) [],
        IOPCRST OFFSET(4) NUMBITS(1) [],
        IOPDRST OFFSET(5) NUMBITS(1) [],
        IOPERST OFFSET(6) NUMBITS(1) []
    ]
];

register_structs! {
    /// Reset and clock control
    pub RegisterBlock {
        (0x000 => pub cr: ReadWrite<u32>),
        (0x004 => pub cfgr: ReadWrite<u32>),
        (0x008 => pub cir: ReadWrite<u32>),
        (0x00C => pub apb2rstr: ReadWrite<u32, APB2RSTR::Register>),
        (0x010 => pub apb1rstr: ReadWrite<u32>),
        (0x014 => pub ahbenr: ReadWrite<u32>),
        (0x018 => pub apb2enr: ReadWrite<u32, APB2ENR::Register>),
        (0x01C => pub apb1enr: ReadWrite<u32>),
        (0x020 => pub bdcr: ReadWrite<u32>),
        (0x024 => pub csr: ReadWrite<u32>),
        (0x028 => @END),
    }
}

const _: () = {
    assert!(offset_of!(RegisterBlock, cr) == 0x00);
    assert!(offset_of!(RegisterBlock, cfgr) == 0x04);
    assert!(offset_of!(RegisterBlock, cir) == 0x08);
    assert!(offset_of!(RegisterBlock, apb2rstr) == 0x0C);
    assert!(offset_of!(RegisterBlock, apb1rstr) == 0x10);
    assert!(offset_of!(RegisterBlock, ahbenr) == 0x14);
    assert!(offset_of!(RegisterBlock, apb2enr) == 0x18);
    assert!(offset_of!(RegisterBlock, apb1enr) == 0x1C);
    assert!(offset_of!(RegisterBlock, bdcr) == 0x20);
    assert!(offset_of!(RegisterBlock, csr) == 0x24);
    assert!(size_of::<RegisterBlock>() == 0x28);
};
