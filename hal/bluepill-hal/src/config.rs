//! Board pin configuration
//!
//! Board files name pins the way the silkscreen does (`"PA0"`, `"PC13"`), with
//! a leading `!` for active-low pins. A [`PinTable`] collects those names with
//! their mode and speed, and applies them one port at a time.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::gpio::{Gpio, Mode, PinConfig, PinId, PinMask, PinState, Port, PortRegisters, Speed};

/// Maximum entries in one pin table
pub const MAX_PINS: usize = 16;

/// Parsed pin name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinName {
    pub port: Port,
    pub pin: PinId,
    /// Active-low
    pub inverted: bool,
}

/// Parse a pin string from a board description
///
/// Supports formats:
/// - "PA0" -> (Port A, Pin 0, false)
/// - "!PC13" -> (Port C, Pin 13, true/inverted)
pub fn parse_pin_string(s: &str) -> Result<PinName, ConfigError> {
    let s = s.trim();

    let (s, inverted) = match s.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let rest = s.strip_prefix('P').ok_or(ConfigError::InvalidPinName)?;
    let mut chars = rest.chars();
    let letter = chars.next().ok_or(ConfigError::InvalidPinName)?;
    let number = chars.as_str();

    if !letter.is_ascii_alphabetic() || number.is_empty() {
        return Err(ConfigError::InvalidPinName);
    }
    // Plain decimal only: no sign, no leading zero
    let leading_zero = number.len() > 1 && number.starts_with('0');
    if !number.bytes().all(|b| b.is_ascii_digit()) || leading_zero {
        return Err(ConfigError::InvalidPinName);
    }
    let port = Port::from_letter(letter).ok_or(ConfigError::UnknownPort)?;

    let index: u8 = number.parse().map_err(|_| ConfigError::InvalidPinName)?;
    let pin = PinId::new(index).ok_or(ConfigError::PinOutOfRange)?;

    Ok(PinName {
        port,
        pin,
        inverted,
    })
}

/// One configured pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinEntry {
    pub name: PinName,
    pub mode: Mode,
    pub speed: Speed,
}

impl PinEntry {
    pub fn config(&self) -> PinConfig {
        PinConfig::new(self.name.pin.mask(), self.mode, self.speed)
    }
}

/// Pins a board uses, with their configuration
#[derive(Debug, Clone, Default)]
pub struct PinTable {
    entries: Vec<PinEntry, MAX_PINS>,
}

impl PinTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pin by name
    pub fn add(&mut self, name: &str, mode: Mode, speed: Speed) -> Result<PinName, ConfigError> {
        let name = parse_pin_string(name)?;

        let taken = self
            .entries
            .iter()
            .any(|e| e.name.port == name.port && e.name.pin == name.pin);
        if taken {
            return Err(ConfigError::DuplicatePin);
        }

        self.entries
            .push(PinEntry { name, mode, speed })
            .map_err(|_| ConfigError::TableFull)?;
        Ok(name)
    }

    pub fn entries(&self) -> &[PinEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ports with at least one pin in the table, in address order
    pub fn ports(&self) -> Vec<Port, 5> {
        Port::ALL
            .into_iter()
            .filter(|port| self.entries.iter().any(|e| e.name.port == *port))
            .collect()
    }

    /// Pins of the table on `port`
    pub fn pins_on(&self, port: Port) -> PinMask {
        self.entries
            .iter()
            .filter(|e| e.name.port == port)
            .fold(PinMask::NONE, |mask, e| mask | e.name.pin.mask())
    }

    /// Configure every table entry that lives on `port`.
    ///
    /// Outputs are parked at their inactive level before the mode switch so
    /// they come up off. Returns how many pins were configured.
    pub fn apply<R: PortRegisters + ?Sized>(
        &self,
        port: Port,
        gpio: Gpio<'_, R>,
    ) -> Result<usize, ConfigError> {
        let mut count = 0;

        for entry in self.entries.iter().filter(|e| e.name.port == port) {
            if entry.mode.is_output() {
                let idle = PinState::from(entry.name.inverted);
                gpio.write_pin(entry.name.pin.mask(), idle);
            }
            gpio.init(entry.config())?;
            count += 1;
        }

        debug!("config: {} pins applied on port {}", count, port);
        Ok(count)
    }
}
