//! External interrupt controller registers (layout only)

use core::mem::{offset_of, size_of};

use tock_registers::register_structs;
use tock_registers::registers::ReadWrite;

register_structs! {
    /// External interrupt/event controller
    pub RegisterBlock {
        (0x000 => pub imr: ReadWrite<u32>),
        (0x004 => pub emr: ReadWrite<u32>),
        (0x008 => pub rtsr: ReadWrite<u32>),
        (0x00C => pub ftsr: ReadWrite<u32>),
        (0x010 => pub swier: ReadWrite<u32>),
        (0x014 => pub pr: ReadWrite<u32>),
        (0x018 => @END),
    }
}

const _: () = {
    assert!(offset_of!(RegisterBlock, imr) == 0x00);
    assert!(offset_of!(RegisterBlock, emr) == 0x04);
    assert!(offset_of!(RegisterBlock, rtsr) == 0x08);
    assert!(offset_of!(RegisterBlock, ftsr) == 0x0C);
    assert!(offset_of!(RegisterBlock, swier) == 0x10);
    assert!(offset_of!(RegisterBlock, pr) == 0x14);
    assert!(size_of::<RegisterBlock>() == 0x18);
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
    fn test_registers_land_on_their_offsets() {
        let regs: RegisterBlock = unsafe { core::mem::zeroed() };

        regs.imr.set(0x1);
        regs.ftsr.set(0x8);
        regs.pr.set(0x4_0000);

        assert_eq!(word(&regs, 0x00), 0x1);
        assert_eq!(word(&regs, 0x0C), 0x8);
        assert_eq!(word(&regs, 0x14), 0x4_0000);
        assert_eq!(regs.pr.get(), 0x4_0000);
    }
}
