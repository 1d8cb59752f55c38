//! Alternate-function I/O registers (layout only)

use core::mem::{offset_of, size_of};

use tock_registers::register_structs;
use tock_registers::registers::ReadWrite;

register_structs! {
    /// Alternate-function I/O
    pub RegisterBlock {
        (0x000 => pub evcr: ReadWrite<u32>),
        (0x004 => pub mapr: ReadWrite<u32>),
        (0x008 => pub exticr1: ReadWrite<u32>),
        (0x00C => pub exticr2: ReadWrite<u32>),
        (0x010 => pub exticr3: ReadWrite<u32>),
        (0x014 => pub exticr4: ReadWrite<u32>),
        (0x018 => _reserved0),
        (0x01C => pub mapr2: ReadWrite<u32>),
        (0x020 => @END),
    }
}

const _: () = {
    assert!(offset_of!(RegisterBlock, evcr) == 0x00);
    assert!(offset_of!(RegisterBlock, mapr) == 0x04);
    assert!(offset_of!(RegisterBlock, exticr1) == 0x08);
    assert!(offset_of!(RegisterBlock, exticr2) == 0x0C);
    assert!(offset_of!(RegisterBlock, exticr3) == 0x10);
    assert!(offset_of!(RegisterBlock, exticr4) == 0x14);
    assert!(offset_of!(RegisterBlock, mapr2) == 0x1C);
    assert!(size_of::<RegisterBlock>() == 0x20);
};

#[cfg(test)]
mod tests {
    use super::*;
    use tock_registers::interfaces::{Readable, Writeable};

    /// Word at `offset` as the bus sees it
    fn word(regs: &RegisterBlock, offset: usize) -> u32 {
        // SAFETY: `offset` is a word-aligned offset inside the block.
        unsafe { (regs as *const RegisterBlock as *const u32).add(offset / 4).read_volatile() }
    }

    #[test]
    fn test_mapr2_skips_reserved_word() {
        let regs: RegisterBlock = unsafe { core::mem::zeroed() };

        regs.exticr4.set(0x1234);
        regs.mapr2.set(0x0020);

        assert_eq!(word(&regs, 0x14), 0x1234);
        assert_eq!(word(&regs, 0x18), 0);
        assert_eq!(word(&regs, 0x1C), 0x0020);
        assert_eq!(regs.mapr2.get(), 0x0020);
    }
}
