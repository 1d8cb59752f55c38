//! Register access seam between the driver and a GPIO port
//!
//! The driver only ever talks to a port through [`PortRegisters`]. The real
//! memory-mapped block implements it with volatile accesses; host tests plug
//! in the simulated port instead.

use bluepill_pac::gpio::RegisterBlock;
use tock_registers::interfaces::{Readable, Writeable};

/// Which of the two configuration registers holds a pin's nibble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigRegister {
    /// CRL, pins 0-7
    Low,
    /// CRH, pins 8-15
    High,
}

/// Raw access to the seven registers of one GPIO port
///
/// Methods take `&self`: registers are shared hardware state, and every call
/// is a single 32-bit access.
pub trait PortRegisters {
    fn config(&self, reg: ConfigRegister) -> u32;
    fn set_config(&self, reg: ConfigRegister, value: u32);

    /// IDR (read-only)
    fn input(&self) -> u32;

    fn output(&self) -> u32;
    fn set_output(&self, value: u32);

    /// BSRR (write-only)
    fn set_reset(&self, value: u32);

    /// BRR (write-only)
    fn reset(&self, value: u32);

    fn lock(&self) -> u32;
    fn set_lock(&self, value: u32);
}

impl PortRegisters for RegisterBlock {
    #[inline]
    fn config(&self, reg: ConfigRegister) -> u32 {
        match reg {
            ConfigRegister::Low => self.crl.get(),
            ConfigRegister::High => self.crh.get(),
        }
    }

    #[inline]
    fn set_config(&self, reg: ConfigRegister, value: u32) {
        match reg {
            ConfigRegister::Low => self.crl.set(value),
            ConfigRegister::High => self.crh.set(value),
        }
    }

    #[inline]
    fn input(&self) -> u32 {
        self.idr.get()
    }

    #[inline]
    fn output(&self) -> u32 {
        self.odr.get()
    }

    #[inline]
    fn set_output(&self, value: u32) {
        self.odr.set(value)
    }

    #[inline]
    fn set_reset(&self, value: u32) {
        self.bsrr.set(value)
    }

    #[inline]
    fn reset(&self, value: u32) {
        self.brr.set(value)
    }

    #[inline]
    fn lock(&self) -> u32 {
        self.lckr.get()
    }

    #[inline]
    fn set_lock(&self, value: u32) {
        self.lckr.set(value)
    }
}
