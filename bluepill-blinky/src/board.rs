//! Blue Pill board description
//!
//! The on-board LED on PC13 sinks current (active-low). A push button
//! between PA0 and ground is read with the internal pull-up.

use bluepill_hal::config::{PinName, PinTable};
use bluepill_hal::{ConfigError, Mode, Speed};

pub const LED: &str = "!PC13";
pub const BUTTON: &str = "!PA0";

pub struct Board {
    pub pins: PinTable,
    pub led: PinName,
    pub button: PinName,
}

pub fn board() -> Result<Board, ConfigError> {
    let mut pins = PinTable::new();
    let led = pins.add(LED, Mode::OutputPushPull, Speed::Mhz2)?;
    let button = pins.add(BUTTON, Mode::InputPullUp, Speed::Mhz2)?;

    Ok(Board { pins, led, button })
}
