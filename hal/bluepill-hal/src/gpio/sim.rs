//! Simulated GPIO port
//!
//! An in-memory port that behaves like the silicon where plain memory would
//! not:
//!
//! - BSRR/BRR update ODR; in BSRR a set bit wins over its reset bit
//! - IDR reads ODR for output pins, the externally driven level for input
//!   pins, the pull direction for undriven pull inputs and 0 in analog mode
//! - LCKR runs the key sequence; once locked, writes to locked pins'
//!   configuration nibbles and to LCKR itself are ignored until
//!   [`SimPort::power_on_reset`]

use core::cell::Cell;

use bluepill_pac::gpio::{CR_RESET, LCKK};

use super::{ConfigRegister, PinId, PinMask, PinState, PortRegisters, PINS_PER_PORT};

/// Progress through the LCKR key sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockKey {
    Idle,
    /// First write (LCKK = 1) seen with these pin bits
    First(u32),
    /// Second write (LCKK = 0) seen
    Second(u32),
    Locked,
}

/// In-memory model of one GPIO port
#[derive(Debug)]
pub struct SimPort {
    crl: Cell<u32>,
    crh: Cell<u32>,
    odr: Cell<u32>,
    lckr: Cell<u32>,
    key: Cell<LockKey>,
    /// Pins driven from outside the chip
    driven: Cell<u16>,
    /// Levels on the driven pins
    levels: Cell<u16>,
    reject_key: Cell<bool>,
}

impl Default for SimPort {
    fn default() -> Self {
        Self::new()
    }
}

impl SimPort {
    /// Port in its power-on state: all pins floating inputs, nothing driven
    pub fn new() -> Self {
        Self {
            crl: Cell::new(CR_RESET),
            crh: Cell::new(CR_RESET),
            odr: Cell::new(0),
            lckr: Cell::new(0),
            key: Cell::new(LockKey::Idle),
            driven: Cell::new(0),
            levels: Cell::new(0),
            reject_key: Cell::new(false),
        }
    }

    /// Return every register to its power-on value, releasing any lock
    pub fn power_on_reset(&self) {
        self.crl.set(CR_RESET);
        self.crh.set(CR_RESET);
        self.odr.set(0);
        self.lckr.set(0);
        self.key.set(LockKey::Idle);
    }

    /// Drive the selected pins from outside
    pub fn drive(&self, pins: PinMask, state: PinState) {
        self.driven.set(self.driven.get() | pins.bits());
        let levels = match state {
            PinState::Set => self.levels.get() | pins.bits(),
            PinState::Reset => self.levels.get() & !pins.bits(),
        };
        self.levels.set(levels);
    }

    /// Stop driving the selected pins
    pub fn release(&self, pins: PinMask) {
        self.driven.set(self.driven.get() & !pins.bits());
    }

    /// Make the next lock key sequence fail, as if the key was interrupted
    pub fn reject_lock_key(&self) {
        self.reject_key.set(true);
    }

    fn is_frozen(&self) -> bool {
        self.key.get() == LockKey::Locked
    }

    fn cell(&self, reg: ConfigRegister) -> &Cell<u32> {
        match reg {
            ConfigRegister::Low => &self.crl,
            ConfigRegister::High => &self.crh,
        }
    }

    fn nibble(&self, pin: PinId) -> u32 {
        (self.cell(pin.config_register()).get() >> pin.config_shift()) & 0xF
    }

    /// Nibble mask of the locked pins held in `reg`
    fn locked_nibbles(&self, reg: ConfigRegister) -> u32 {
        if !self.is_frozen() {
            return 0;
        }
        let locked = PinMask::from_bits(self.lckr.get() as u16);
        locked
            .pins()
            .filter(|pin| pin.config_register() == reg)
            .fold(0, |acc, pin| acc | (0xF << pin.config_shift()))
    }

    fn pin_level(&self, pin: PinId) -> bool {
        let bit = 1u16 << pin.index();
        let nibble = self.nibble(pin);
        let mode = nibble & 0b11;
        let cnf = nibble >> 2;

        if mode != 0 {
            // Output: the input buffer samples the driven latch
            return self.odr.get() as u16 & bit != 0;
        }
        if cnf == 0b00 {
            // Analog: Schmitt trigger disabled
            return false;
        }
        if self.driven.get() & bit != 0 {
            return self.levels.get() & bit != 0;
        }
        cnf == 0b10 && self.odr.get() as u16 & bit != 0
    }
}

impl PortRegisters for SimPort {
    fn config(&self, reg: ConfigRegister) -> u32 {
        self.cell(reg).get()
    }

    fn set_config(&self, reg: ConfigRegister, value: u32) {
        let frozen = self.locked_nibbles(reg);
        let cell = self.cell(reg);
        cell.set((value & !frozen) | (cell.get() & frozen));
    }

    fn input(&self) -> u32 {
        (0..PINS_PER_PORT)
            .filter_map(PinId::new)
            .filter(|&pin| self.pin_level(pin))
            .fold(0, |acc, pin| acc | (1 << pin.index()))
    }

    fn output(&self) -> u32 {
        self.odr.get()
    }

    fn set_output(&self, value: u32) {
        self.odr.set(value & 0xFFFF);
    }

    fn set_reset(&self, value: u32) {
        let set = value & 0xFFFF;
        let reset = value >> 16;
        self.odr.set((self.odr.get() & !reset) | set);
    }

    fn reset(&self, value: u32) {
        self.odr.set(self.odr.get() & !(value & 0xFFFF));
    }

    fn lock(&self) -> u32 {
        self.lckr.get()
    }

    fn set_lock(&self, value: u32) {
        if self.is_frozen() {
            return;
        }

        let bits = value & 0xFFFF;
        let key_bit = value & LCKK != 0;
        let next = match (self.key.get(), key_bit) {
            (LockKey::Idle, true) => LockKey::First(bits),
            (LockKey::First(prev), false) if prev == bits => LockKey::Second(bits),
            (LockKey::Second(prev), true) if prev == bits && !self.reject_key.get() => {
                LockKey::Locked
            }
            (_, true) => LockKey::First(bits),
            (_, false) => LockKey::Idle,
        };

        self.key.set(next);
        self.lckr.set(if next == LockKey::Locked { bits | LCKK } else { bits });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bsrr_set_wins_over_reset() {
        let port = SimPort::new();
        port.set_output(0x0F00);

        port.set_reset(0x0001_0001 | (0x0100 << 16));

        assert_eq!(port.output(), 0x0E01);
    }

    #[test]
    fn test_analog_pin_reads_low() {
        let port = SimPort::new();
        port.drive(PinMask::PIN_0, PinState::Set);
        assert_eq!(port.input(), 1);

        port.set_config(ConfigRegister::Low, CR_RESET & !0xF);
        assert_eq!(port.input(), 0);
    }

    #[test]
    fn test_released_pin_falls_back_to_pull() {
        let port = SimPort::new();
        // Pin 1 as pull input, pulled up
        port.set_config(ConfigRegister::Low, (CR_RESET & !0xF0) | 0x80);
        port.set_output(0x2);

        port.drive(PinMask::PIN_1, PinState::Reset);
        assert_eq!(port.input(), 0);

        port.release(PinMask::PIN_1);
        assert_eq!(port.input(), 0x2);
    }

    #[test]
    fn test_wrong_key_sequence_does_not_lock() {
        let port = SimPort::new();

        port.set_lock(LCKK | 0x1);
        port.set_lock(0x2);
        port.set_lock(LCKK | 0x1);

        assert_eq!(port.lock() & LCKK, 0);

        port.set_config(ConfigRegister::Low, 0);
        assert_eq!(port.config(ConfigRegister::Low), 0);
    }

    #[test]
    fn test_locked_nibbles_ignore_writes() {
        let port = SimPort::new();

        port.set_lock(LCKK | 0x0101);
        port.set_lock(0x0101);
        port.set_lock(LCKK | 0x0101);
        assert_eq!(port.lock(), LCKK | 0x0101);

        port.set_config(ConfigRegister::Low, 0);
        port.set_config(ConfigRegister::High, 0);
        assert_eq!(port.config(ConfigRegister::Low), 0x0000_0004);
        assert_eq!(port.config(ConfigRegister::High), 0x0000_0004);

        port.set_lock(0);
        assert_eq!(port.lock(), LCKK | 0x0101);
    }
}
