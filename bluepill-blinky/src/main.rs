//! Blue Pill blinky
//!
//! Brings up the ports the board table uses, locks the LED pin's
//! configuration and blinks it. Holding the button keeps the LED lit.
//!
//! Build for `thumbv7m-none-eabi`:
//! `cargo build -p bluepill-blinky --target thumbv7m-none-eabi --release`

#![no_std]
#![no_main]

mod board;

use cortex_m_rt::entry;
use defmt::*;
use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};
use {defmt_rtt as _, panic_probe as _};

use bluepill_hal::rcc::Rcc;
use bluepill_hal::Gpio;

/// Core clock out of reset (HSI, no PLL)
const SYSCLK_HZ: u32 = 8_000_000;

/// Half of a 2 Hz blink, in core cycles
const BLINK_HALF_PERIOD: u32 = SYSCLK_HZ / 4;

#[entry]
fn main() -> ! {
    info!("bluepill-blinky starting");

    let board = unwrap!(board::board());

    // SAFETY: single-threaded start-up, nothing else owns RCC or the ports.
    let rcc = unsafe { Rcc::steal() };
    for port in board.pins.ports() {
        rcc.enable(port.clock());
        let gpio = unsafe { Gpio::steal(port) };
        let count = unwrap!(board.pins.apply(port, gpio));
        info!("port {}: {} pins configured", port, count);
    }

    let led_port = unsafe { Gpio::steal(board.led.port) };
    match led_port.lock_pin(board.led.pin.mask()) {
        Ok(()) => info!("LED configuration locked"),
        Err(e) => warn!("LED lock failed: {}", e),
    }

    let mut led = led_port.pin(board.led.pin).inverted(board.led.inverted);
    let mut button = unsafe { Gpio::steal(board.button.port) }
        .pin(board.button.pin)
        .inverted(board.button.inverted);

    loop {
        // Pin operations are infallible
        if button.is_high().unwrap_or(false) {
            led.set_high().ok();
        } else {
            led.toggle().ok();
        }
        cortex_m::asm::delay(BLINK_HALF_PERIOD);
    }
}
