//! Port-level GPIO operations

use bluepill_pac::gpio::{RegisterBlock, CR_RESET, LCKK};

use super::{ConfigRegister, Mode, Pin, PinConfig, PinId, PinMask, PinState, Port, PortRegisters};
use crate::error::{GpioError, GpioResult};

/// Nibble mask for one pin in CRL/CRH
const CONFIG_NIBBLE: u32 = 0xF;

/// Driver for one GPIO port
///
/// Holds a shared borrow of the port's registers; it is `Copy` so pin
/// handles and application code can each carry one.
pub struct Gpio<'a, R: PortRegisters + ?Sized = RegisterBlock> {
    regs: &'a R,
}

impl<R: PortRegisters + ?Sized> Clone for Gpio<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: PortRegisters + ?Sized> Copy for Gpio<'_, R> {}

impl Gpio<'static, RegisterBlock> {
    /// Driver for a memory-mapped port.
    ///
    /// # Safety
    ///
    /// See [`Port::registers`].
    pub unsafe fn steal(port: Port) -> Self {
        Self::new(port.registers())
    }
}

impl<'a, R: PortRegisters + ?Sized> Gpio<'a, R> {
    pub fn new(regs: &'a R) -> Self {
        Self { regs }
    }

    pub fn registers(&self) -> &'a R {
        self.regs
    }

    /// Single-pin handle implementing the `embedded-hal` digital traits
    pub fn pin(&self, pin: PinId) -> Pin<'a, R> {
        Pin::new(*self, pin)
    }

    /// Configure one pin's mode and speed.
    ///
    /// Rewrites only that pin's CNF/MODE nibble. Pull-up and pull-down
    /// inputs also latch the pull direction into the pin's ODR bit.
    pub fn init(&self, config: PinConfig) -> GpioResult<()> {
        let pin = config.pin.single().ok_or(GpioError::InvalidPin)?;

        if self.is_locked(config.pin) {
            warn!("gpio: pin {} is locked, init refused", pin.index());
            return Err(GpioError::PinLocked);
        }

        let reg = pin.config_register();
        let shift = pin.config_shift();
        let mut value = self.regs.config(reg);
        value &= !(CONFIG_NIBBLE << shift);
        value |= config.mode.config_bits(config.speed) << shift;
        self.regs.set_config(reg, value);

        match config.mode {
            Mode::InputPullUp => self.regs.set_reset(config.pin.bits() as u32),
            Mode::InputPullDown => self.regs.reset(config.pin.bits() as u32),
            _ => {}
        }

        trace!("gpio: pin {} config {=u32:#b}", pin.index(), (value >> shift) & CONFIG_NIBBLE);
        Ok(())
    }

    /// Return every register of the port to its reset value.
    ///
    /// IDR is read-only and follows the pins. On hardware, a lock taken with
    /// [`Gpio::lock_pin`] survives this; only a peripheral reset clears it.
    pub fn deinit(&self) {
        self.regs.set_config(ConfigRegister::Low, CR_RESET);
        self.regs.set_config(ConfigRegister::High, CR_RESET);
        self.regs.set_output(0);
        self.regs.set_reset(0);
        self.regs.reset(0);
        self.regs.set_lock(0);
        debug!("gpio: port reset");
    }

    /// Input level of the selected pin
    ///
    /// With several pins selected, reports `Set` if any of them is high.
    pub fn read_pin(&self, pin: PinMask) -> PinState {
        PinState::from(self.regs.input() & pin.bits() as u32 != 0)
    }

    /// Input levels of all 16 pins
    pub fn read_port(&self) -> u16 {
        self.regs.input() as u16
    }

    /// Output latch of the selected pin
    pub fn read_output_pin(&self, pin: PinMask) -> PinState {
        PinState::from(self.regs.output() & pin.bits() as u32 != 0)
    }

    /// Drive the selected pins through BSRR/BRR, leaving the others alone
    pub fn write_pin(&self, pin: PinMask, state: PinState) {
        match state {
            PinState::Set => self.regs.set_reset(pin.bits() as u32),
            PinState::Reset => self.regs.reset(pin.bits() as u32),
        }
    }

    /// Overwrite the whole output latch
    pub fn write_port(&self, value: u16) {
        self.regs.set_output(value as u32);
    }

    /// Invert the output latch of the selected pins
    pub fn toggle_pin(&self, pin: PinMask) {
        let odr = self.regs.output();
        self.regs.set_output(odr ^ pin.bits() as u32);
    }

    /// Freeze the configuration of the selected pins until the next reset.
    ///
    /// Runs the LCKK key sequence once and confirms it by reading the key
    /// bit back. A failed attempt leaves the lock state undefined until
    /// reset, so there is no retry.
    ///
    /// Once LCKR is frozen by an earlier lock, the key sequence is ignored:
    /// a later call still reports `Ok(())` but locks no new pins. An empty
    /// selector also reports `Ok(())`. Use [`Gpio::is_locked`] to check
    /// which pins are actually locked.
    pub fn lock_pin(&self, pin: PinMask) -> GpioResult<()> {
        let bits = pin.bits() as u32;

        self.regs.set_lock(LCKK | bits);
        self.regs.set_lock(bits);
        self.regs.set_lock(LCKK | bits);
        let _ = self.regs.lock();

        if self.regs.lock() & LCKK != 0 {
            debug!("gpio: locked pins {=u16:#x}", pin.bits());
            Ok(())
        } else {
            warn!("gpio: lock sequence failed for {=u16:#x}", pin.bits());
            Err(GpioError::LockFailed)
        }
    }

    /// Whether the lock key is active and every selected pin is locked
    pub fn is_locked(&self, pin: PinMask) -> bool {
        let lckr = self.regs.lock();
        let bits = pin.bits() as u32;
        !pin.is_empty() && lckr & LCKK != 0 && lckr & bits == bits
    }
}
