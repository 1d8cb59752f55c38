//! Peripheral clock gates
//!
//! GPIO ports and AFIO sit on APB2 and are clocked off at reset. Code that
//! brings up a port must open its gate here before the driver can touch it;
//! the GPIO driver never does this itself.

use bluepill_pac::rcc::{RegisterBlock, APB2ENR, APB2RSTR};
use tock_registers::fields::Field;
use tock_registers::interfaces::{ReadWriteable, Readable};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// APB2 peripheral with an enable and a reset bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Peripheral {
    Afio,
    GpioA,
    GpioB,
    GpioC,
    GpioD,
    GpioE,
}

impl Peripheral {
    fn enable_field(self) -> Field<u32, APB2ENR::Register> {
        match self {
            Peripheral::Afio => APB2ENR::AFIOEN,
            Peripheral::GpioA => APB2ENR::IOPAEN,
            Peripheral::GpioB => APB2ENR::IOPBEN,
            Peripheral::GpioC => APB2ENR::IOPCEN,
            Peripheral::GpioD => APB2ENR::IOPDEN,
            Peripheral::GpioE => APB2ENR::IOPEEN,
        }
    }

    fn reset_field(self) -> Field<u32, APB2RSTR::Register> {
        match self {
            Peripheral::Afio => APB2RSTR::AFIORST,
            Peripheral::GpioA => APB2RSTR::IOPARST,
            Peripheral::GpioB => APB2RSTR::IOPBRST,
            Peripheral::GpioC => APB2RSTR::IOPCRST,
            Peripheral::GpioD => APB2RSTR::IOPDRST,
            Peripheral::GpioE => APB2RSTR::IOPERST,
        }
    }
}

/// Clock gate control over the RCC block
#[derive(Clone, Copy)]
pub struct Rcc<'a> {
    regs: &'a RegisterBlock,
}

impl Rcc<'static> {
    /// RCC at its fixed address.
    ///
    /// # Safety
    ///
    /// See [`bluepill_pac::steal`].
    pub unsafe fn steal() -> Self {
        Self::new(bluepill_pac::steal(bluepill_pac::RCC))
    }
}

impl<'a> Rcc<'a> {
    pub fn new(regs: &'a RegisterBlock) -> Self {
        Self { regs }
    }

    pub fn enable(&self, peripheral: Peripheral) {
        self.regs.apb2enr.modify(peripheral.enable_field().val(1));
        debug!("rcc: {} clock on", peripheral);
    }

    pub fn disable(&self, peripheral: Peripheral) {
        self.regs.apb2enr.modify(peripheral.enable_field().val(0));
        debug!("rcc: {} clock off", peripheral);
    }

    pub fn is_enabled(&self, peripheral: Peripheral) -> bool {
        self.regs.apb2enr.is_set(peripheral.enable_field())
    }

    /// Pulse the peripheral's reset line, returning all its registers
    /// (including a GPIO port's lock) to their reset values
    pub fn reset(&self, peripheral: Peripheral) {
        let field = peripheral.reset_field();
        self.regs.apb2rstr.modify(field.val(1));
        self.regs.apb2rstr.modify(field.val(0));
        debug!("rcc: {} reset", peripheral);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tock_registers::interfaces::Writeable;

    const ALL: [Peripheral; 6] = [
        Peripheral::Afio,
        Peripheral::GpioA,
        Peripheral::GpioB,
        Peripheral::GpioC,
        Peripheral::GpioD,
        Peripheral::GpioE,
    ];

    fn zeroed_block() -> RegisterBlock {
        // SAFETY: every field is a plain u32 cell.
        unsafe { core::mem::zeroed() }
    }

    #[test]
    fn test_enable_bits_match_reference_manual() {
        let regs = zeroed_block();
        let rcc = Rcc::new(&regs);
        let expected = [0, 2, 3, 4, 5, 6];

        for (peripheral, bit) in ALL.into_iter().zip(expected) {
            regs.apb2enr.set(0);
            rcc.enable(peripheral);
            assert_eq!(regs.apb2enr.get(), 1 << bit);
            assert!(rcc.is_enabled(peripheral));
        }
    }

    #[test]
    fn test_enable_preserves_other_gates() {
        let regs = zeroed_block();
        regs.apb2enr.set(0x0000_4000); // USART1EN
        let rcc = Rcc::new(&regs);

        rcc.enable(Peripheral::GpioA);
        rcc.enable(Peripheral::GpioC);
        assert_eq!(regs.apb2enr.get(), 0x0000_4014);

        rcc.disable(Peripheral::GpioA);
        assert_eq!(regs.apb2enr.get(), 0x0000_4010);
        assert!(!rcc.is_enabled(Peripheral::GpioA));
    }

    #[test]
    fn test_reset_leaves_line_released() {
        let regs = zeroed_block();
        let rcc = Rcc::new(&regs);

        // Plain memory only shows the state after the pulse, not the pulse

        rcc.reset(Peripheral::GpioB);
        assert_eq!(regs.apb2rstr.get(), 0);
        assert_eq!(regs.apb2enr.get(), 0);
    }
}
