//! GPIO HAL for STM32F103x8 (Blue Pill) boards
//!
//! Drives the GPIO ports described by `bluepill-pac`:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (bluepill-blinky, etc.)    │
//! └─────────────────────────────────────────┘
//!          │                    │
//!          ▼                    ▼
//! ┌─────────────────┐  ┌─────────────────┐
//! │ config (pin     │  │ rcc (clock      │
//! │ tables)         │  │ gates)          │
//! └─────────────────┘  └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────────────────────────────┐
//! │  gpio (driver, pin handles)             │
//! └─────────────────────────────────────────┘
//!                     │  PortRegisters
//!          ┌──────────┴──────────┐
//!          ▼                     ▼
//! ┌─────────────────┐   ┌─────────────────┐
//! │ bluepill-pac    │   │ gpio::sim       │
//! │ register blocks │   │ (host tests)    │
//! └─────────────────┘   └─────────────────┘
//! ```
//!
//! # Features
//!
//! - `defmt` - log through `defmt` and derive `defmt::Format` on public types
//! - `serde` - serialisable configuration types
//! - `sim` - export [`gpio::sim::SimPort`] for downstream host tests
//!
//! Every operation assumes the port's clock gate is already open
//! ([`rcc::Rcc::enable`]); nothing checks it.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod config;
pub mod error;
pub mod gpio;
pub mod rcc;

pub use bluepill_pac as pac;
pub use error::{ConfigError, GpioError, GpioResult};
pub use gpio::{Gpio, Mode, PinConfig, PinId, PinMask, PinState, Port, Speed};
