//! Error types for driver and configuration operations

use core::fmt;

/// GPIO driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Pin selector must name exactly one pin
    InvalidPin,
    /// Raw mode value outside 0-7
    InvalidMode(u8),
    /// Raw speed value outside 1-3
    InvalidSpeed(u8),
    /// Pin configuration is frozen by the port lock
    PinLocked,
    /// Lock key sequence did not take effect
    LockFailed,
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPin => write!(f, "pin selector must name exactly one pin"),
            Self::InvalidMode(raw) => write!(f, "invalid pin mode: {}", raw),
            Self::InvalidSpeed(raw) => write!(f, "invalid pin speed: {}", raw),
            Self::PinLocked => write!(f, "pin configuration is locked"),
            Self::LockFailed => write!(f, "lock key sequence failed"),
        }
    }
}

/// Board configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin string is not of the form `PA5` / `!PC13`
    InvalidPinName,
    /// Port letter outside A-E
    UnknownPort,
    /// Pin number outside 0-15
    PinOutOfRange,
    /// The same pin appears twice
    DuplicatePin,
    /// Pin table is full
    TableFull,
    /// Applying a table entry failed
    Gpio(GpioError),
}

impl From<GpioError> for ConfigError {
    fn from(e: GpioError) -> Self {
        ConfigError::Gpio(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPinName => write!(f, "invalid pin name"),
            Self::UnknownPort => write!(f, "unknown GPIO port"),
            Self::PinOutOfRange => write!(f, "pin number out of range"),
            Self::DuplicatePin => write!(f, "pin listed twice"),
            Self::TableFull => write!(f, "pin table full"),
            Self::Gpio(e) => write!(f, "gpio: {}", e),
        }
    }
}

/// Result type for GPIO operations
pub type GpioResult<T> = Result<T, GpioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_wraps_gpio_error() {
        let err: ConfigError = GpioError::PinLocked.into();
        assert_eq!(err, ConfigError::Gpio(GpioError::PinLocked));
    }
}
