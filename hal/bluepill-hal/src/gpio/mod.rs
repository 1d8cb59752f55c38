//! GPIO driver layer
//!
//! A port is driven through [`Gpio`], which borrows one register block and
//! performs every operation as a short sequence of volatile register
//! accesses. Pins are selected with [`PinMask`] bitmasks, as the hardware
//! does; [`PinId`] is the bit position when exactly one pin is meant.
//!
//! ```no_run
//! use bluepill_hal::gpio::{Gpio, Mode, PinConfig, PinMask, PinState, Port, Speed};
//! use bluepill_hal::rcc::Rcc;
//!
//! // SAFETY: single-threaded start-up code on a Blue Pill.
//! let rcc = unsafe { Rcc::steal() };
//! rcc.enable(Port::C.clock());
//!
//! let gpioc = unsafe { Gpio::steal(Port::C) };
//! gpioc.init(PinConfig::new(PinMask::PIN_13, Mode::OutputPushPull, Speed::Mhz2)).ok();
//! gpioc.write_pin(PinMask::PIN_13, PinState::Reset);
//! ```
//!
//! Initialization and toggling are read-modify-write sequences. Callers that
//! share a port with interrupt handlers must provide their own exclusion.

mod driver;
mod pin;
mod regs;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use driver::Gpio;
pub use pin::Pin;
pub use regs::{ConfigRegister, PortRegisters};

use core::ops::{BitOr, BitOrAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GpioError;
use crate::rcc::Peripheral;

/// Number of pins on one port
pub const PINS_PER_PORT: u8 = 16;

/// GPIO port instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
}

impl Port {
    /// All ports, in address order
    pub const ALL: [Port; 5] = [Port::A, Port::B, Port::C, Port::D, Port::E];

    /// Register block address of this port
    pub const fn base(self) -> usize {
        match self {
            Port::A => bluepill_pac::GPIOA_BASE,
            Port::B => bluepill_pac::GPIOB_BASE,
            Port::C => bluepill_pac::GPIOC_BASE,
            Port::D => bluepill_pac::GPIOD_BASE,
            Port::E => bluepill_pac::GPIOE_BASE,
        }
    }

    /// Clock gate that must be open before the port is used
    pub const fn clock(self) -> Peripheral {
        match self {
            Port::A => Peripheral::GpioA,
            Port::B => Peripheral::GpioB,
            Port::C => Peripheral::GpioC,
            Port::D => Peripheral::GpioD,
            Port::E => Peripheral::GpioE,
        }
    }

    /// Port from its letter (`'A'`..`'E'`, either case)
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(Port::A),
            'B' => Some(Port::B),
            'C' => Some(Port::C),
            'D' => Some(Port::D),
            'E' => Some(Port::E),
            _ => None,
        }
    }

    /// Borrow this port's registers at their fixed address.
    ///
    /// # Safety
    ///
    /// See [`bluepill_pac::steal`]. The port's clock must also be enabled
    /// before the registers respond.
    pub unsafe fn registers(self) -> &'static bluepill_pac::gpio::RegisterBlock {
        bluepill_pac::steal(self.base() as *const bluepill_pac::gpio::RegisterBlock)
    }
}

/// Bit position of a single pin (0-15)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinId(u8);

impl PinId {
    /// Pin at `index`, if it exists on a port
    pub const fn new(index: u8) -> Option<Self> {
        if index < PINS_PER_PORT {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Selector naming only this pin
    pub const fn mask(self) -> PinMask {
        PinMask(1 << self.0)
    }

    /// Configuration register holding this pin's nibble
    pub const fn config_register(self) -> ConfigRegister {
        if self.0 < 8 {
            ConfigRegister::Low
        } else {
            ConfigRegister::High
        }
    }

    /// Bit offset of this pin's nibble inside its configuration register
    pub const fn config_shift(self) -> u32 {
        (self.0 as u32 % 8) * 4
    }
}

/// Pin selector bitmask, one bit per pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinMask(u16);

impl PinMask {
    pub const PIN_0: Self = Self(0x0001);
    pub const PIN_1: Self = Self(0x0002);
    pub const PIN_2: Self = Self(0x0004);
    pub const PIN_3: Self = Self(0x0008);
    pub const PIN_4: Self = Self(0x0010);
    pub const PIN_5: Self = Self(0x0020);
    pub const PIN_6: Self = Self(0x0040);
    pub const PIN_7: Self = Self(0x0080);
    pub const PIN_8: Self = Self(0x0100);
    pub const PIN_9: Self = Self(0x0200);
    pub const PIN_10: Self = Self(0x0400);
    pub const PIN_11: Self = Self(0x0800);
    pub const PIN_12: Self = Self(0x1000);
    pub const PIN_13: Self = Self(0x2000);
    pub const PIN_14: Self = Self(0x4000);
    pub const PIN_15: Self = Self(0x8000);
    pub const ALL: Self = Self(0xFFFF);
    pub const NONE: Self = Self(0);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: PinMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// The single pin this selector names, or `None` for zero or several pins
    pub const fn single(self) -> Option<PinId> {
        if self.0.count_ones() == 1 {
            Some(PinId(self.0.trailing_zeros() as u8))
        } else {
            None
        }
    }

    /// Iterate the selected pins in ascending order
    pub fn pins(self) -> impl Iterator<Item = PinId> {
        (0..PINS_PER_PORT)
            .filter(move |&i| self.0 & (1u16 << i) != 0)
            .map(PinId)
    }
}

impl From<PinId> for PinMask {
    fn from(pin: PinId) -> Self {
        pin.mask()
    }
}

impl TryFrom<PinMask> for PinId {
    type Error = GpioError;

    fn try_from(mask: PinMask) -> Result<Self, Self::Error> {
        mask.single().ok_or(GpioError::InvalidPin)
    }
}

impl BitOr for PinMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PinMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Pin mode
///
/// Discriminants are the raw mode codes used in configuration tables, not
/// the register encoding; see [`Mode::config_bits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Mode {
    Analog = 0,
    /// Floating input (reset state)
    FloatingInput = 1,
    InputPullUp = 2,
    InputPullDown = 3,
    OutputPushPull = 4,
    OutputOpenDrain = 5,
    AltPushPull = 6,
    AltOpenDrain = 7,
}

impl Mode {
    pub const fn is_output(self) -> bool {
        (self as u8) >= Mode::OutputPushPull as u8
    }

    /// CNF field of the pin nibble
    pub const fn cnf(self) -> u8 {
        match self {
            Mode::Analog => 0b00,
            Mode::FloatingInput => 0b01,
            Mode::InputPullUp | Mode::InputPullDown => 0b10,
            Mode::OutputPushPull => 0b00,
            Mode::OutputOpenDrain => 0b01,
            Mode::AltPushPull => 0b10,
            Mode::AltOpenDrain => 0b11,
        }
    }

    /// Full CNF/MODE nibble for this mode at `speed`
    ///
    /// Inputs always encode MODE = 00; the speed only applies to outputs.
    pub const fn config_bits(self, speed: Speed) -> u32 {
        let mode = if self.is_output() { speed as u8 } else { 0 };
        ((self.cnf() << 2) | mode) as u32
    }
}

impl TryFrom<u8> for Mode {
    type Error = GpioError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Ok(match raw {
            0 => Mode::Analog,
            1 => Mode::FloatingInput,
            2 => Mode::InputPullUp,
            3 => Mode::InputPullDown,
            4 => Mode::OutputPushPull,
            5 => Mode::OutputOpenDrain,
            6 => Mode::AltPushPull,
            7 => Mode::AltOpenDrain,
            _ => return Err(GpioError::InvalidMode(raw)),
        })
    }
}

/// Maximum output slew rate
///
/// Discriminants are the MODE field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Speed {
    Mhz10 = 0b01,
    Mhz2 = 0b10,
    Mhz50 = 0b11,
}

impl TryFrom<u8> for Speed {
    type Error = GpioError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0b01 => Ok(Speed::Mhz10),
            0b10 => Ok(Speed::Mhz2),
            0b11 => Ok(Speed::Mhz50),
            _ => Err(GpioError::InvalidSpeed(raw)),
        }
    }
}

/// Logical pin level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    Reset,
    Set,
}

impl PinState {
    pub const fn is_set(self) -> bool {
        matches!(self, PinState::Set)
    }
}

impl From<bool> for PinState {
    fn from(high: bool) -> Self {
        if high {
            PinState::Set
        } else {
            PinState::Reset
        }
    }
}

impl core::ops::Not for PinState {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            PinState::Set => PinState::Reset,
            PinState::Reset => PinState::Set,
        }
    }
}

/// Configuration applied to one pin by [`Gpio::init`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// Must name exactly one pin
    pub pin: PinMask,
    pub mode: Mode,
    /// Ignored for input and analog modes
    pub speed: Speed,
}

impl PinConfig {
    pub const fn new(pin: PinMask, mode: Mode, speed: Speed) -> Self {
        Self { pin, mode, speed }
    }

    /// Input or analog pin; the speed field is irrelevant
    pub const fn input(pin: PinMask, mode: Mode) -> Self {
        Self {
            pin,
            mode,
            speed: Speed::Mhz2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_single() {
        assert_eq!(PinMask::PIN_0.single(), PinId::new(0));
        assert_eq!(PinMask::PIN_15.single(), PinId::new(15));
        assert_eq!(PinMask::NONE.single(), None);
        assert_eq!((PinMask::PIN_1 | PinMask::PIN_2).single(), None);
        assert_eq!(PinMask::ALL.single(), None);
    }

    #[test]
    fn test_pin_id_round_trip() {
        for i in 0..PINS_PER_PORT {
            let pin = PinId::new(i).unwrap();
            assert_eq!(pin.mask().single(), Some(pin));
            assert_eq!(PinId::try_from(pin.mask()), Ok(pin));
        }
        assert_eq!(PinId::new(16), None);
        assert_eq!(PinId::try_from(PinMask::NONE), Err(GpioError::InvalidPin));
    }

    #[test]
    fn test_config_register_selection() {
        let p7 = PinId::new(7).unwrap();
        let p8 = PinId::new(8).unwrap();
        assert_eq!(p7.config_register(), ConfigRegister::Low);
        assert_eq!(p7.config_shift(), 28);
        assert_eq!(p8.config_register(), ConfigRegister::High);
        assert_eq!(p8.config_shift(), 0);
    }

    #[test]
    fn test_mask_iteration() {
        let mask = PinMask::PIN_0 | PinMask::PIN_5 | PinMask::PIN_15;
        let mut pins = mask.pins();
        assert_eq!(pins.next(), PinId::new(0));
        assert_eq!(pins.next(), PinId::new(5));
        assert_eq!(pins.next(), PinId::new(15));
        assert_eq!(pins.next(), None);
        assert!(mask.contains(PinMask::PIN_5));
        assert!(!mask.contains(PinMask::PIN_4));
    }

    #[test]
    fn test_mode_encoding() {
        assert_eq!(Mode::Analog.config_bits(Speed::Mhz50), 0b0000);
        assert_eq!(Mode::FloatingInput.config_bits(Speed::Mhz50), 0b0100);
        assert_eq!(Mode::InputPullUp.config_bits(Speed::Mhz10), 0b1000);
        assert_eq!(Mode::InputPullDown.config_bits(Speed::Mhz2), 0b1000);
        assert_eq!(Mode::OutputPushPull.config_bits(Speed::Mhz50), 0b0011);
        assert_eq!(Mode::OutputOpenDrain.config_bits(Speed::Mhz10), 0b0101);
        assert_eq!(Mode::AltPushPull.config_bits(Speed::Mhz2), 0b1010);
        assert_eq!(Mode::AltOpenDrain.config_bits(Speed::Mhz50), 0b1111);
    }

    #[test]
    fn test_raw_codes() {
        for raw in 0..8u8 {
            let mode = Mode::try_from(raw).unwrap();
            assert_eq!(mode as u8, raw);
        }
        assert_eq!(Mode::try_from(8), Err(GpioError::InvalidMode(8)));

        assert_eq!(Speed::try_from(1), Ok(Speed::Mhz10));
        assert_eq!(Speed::try_from(2), Ok(Speed::Mhz2));
        assert_eq!(Speed::try_from(3), Ok(Speed::Mhz50));
        assert_eq!(Speed::try_from(0), Err(GpioError::InvalidSpeed(0)));
    }

    #[test]
    fn test_port_letters() {
        assert_eq!(Port::from_letter('a'), Some(Port::A));
        assert_eq!(Port::from_letter('E'), Some(Port::E));
        assert_eq!(Port::from_letter('F'), None);
        assert_eq!(Port::C.base(), 0x4001_1000);
        assert_eq!(Port::C.clock(), Peripheral::GpioC);
    }
}
