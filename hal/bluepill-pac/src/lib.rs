//! STM32F103x8 register map
//!
//! Memory layout of the peripherals the Blue Pill HAL drives, written as
//! `#[repr(C)]` overlays over their fixed addresses:
//!
//! ```text
//! 0x4000_0000  peripherals
//!   +0x1_0000  AFIO      alternate-function I/O
//!   +0x1_0400  EXTI      external interrupt controller
//!   +0x1_0800  GPIOA
//!   +0x1_0C00  GPIOB
//!   +0x1_1000  GPIOC
//!   +0x1_1400  GPIOD
//!   +0x1_1800  GPIOE
//!   +0x2_1000  RCC       reset and clock control
//! ```
//!
//! Every block asserts its field offsets and total size at compile time.
//! Nothing here has behaviour; the driver crate layers operations on top.
//!
//! # Package availability
//!
//! GPIOA is bonded out on every package. The VFQFPN36 package only brings out
//! part of GPIOB and pins 0-1 of GPIOD; LQFP48 has a partial GPIOC and GPIOD;
//! GPIOE only exists on the 100-pin packages. The register blocks are present
//! regardless of package.

#![no_std]

pub mod afio;
pub mod exti;
pub mod gpio;
pub mod rcc;

/// Main flash memory
pub const FLASH_MEM_BASE: usize = 0x0800_0000;
/// System memory (bootloader ROM)
pub const SYSTEM_MEM_BASE: usize = 0x1FFF_F800;
/// SRAM
pub const SRAM_BASE: usize = 0x2000_0000;
/// Start of the peripheral address space
pub const PERIPH_BASE: usize = 0x4000_0000;
/// Cortex-M3 internal peripherals (NVIC, SysTick, SCB)
pub const CORTEX_M3_PERIPH_BASE: usize = 0xE000_0000;

// AHB
pub const RCC_BASE: usize = PERIPH_BASE + 0x0002_1000;

// APB2
pub const AFIO_BASE: usize = PERIPH_BASE + 0x0001_0000;
pub const EXTI_BASE: usize = PERIPH_BASE + 0x0001_0400;
pub const GPIOA_BASE: usize = PERIPH_BASE + 0x0001_0800;
pub const GPIOB_BASE: usize = PERIPH_BASE + 0x0001_0C00;
pub const GPIOC_BASE: usize = PERIPH_BASE + 0x0001_1000;
pub const GPIOD_BASE: usize = PERIPH_BASE + 0x0001_1400;
pub const GPIOE_BASE: usize = PERIPH_BASE + 0x0001_1800;

pub const GPIOA: *const gpio::RegisterBlock = GPIOA_BASE as *const _;
pub const GPIOB: *const gpio::RegisterBlock = GPIOB_BASE as *const _;
pub const GPIOC: *const gpio::RegisterBlock = GPIOC_BASE as *const _;
pub const GPIOD: *const gpio::RegisterBlock = GPIOD_BASE as *const _;
pub const GPIOE: *const gpio::RegisterBlock = GPIOE_BASE as *const _;
pub const RCC: *const rcc::RegisterBlock = RCC_BASE as *const _;
pub const AFIO: *const afio::RegisterBlock = AFIO_BASE as *const _;
pub const EXTI: *const exti::RegisterBlock = EXTI_BASE as *const _;

/// Borrow a peripheral's registers at its fixed address.
///
/// # Safety
///
/// `block` must be one of the instance constants of this crate and the code
/// must run on an STM32F103 where that peripheral exists. The caller is
/// responsible for serialising access with anything else touching the same
/// registers.
pub unsafe fn steal<T>(block: *const T) -> &'static T {
    &*block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpio_ports_are_contiguous() {
        let bases = [GPIOA_BASE, GPIOB_BASE, GPIOC_BASE, GPIOD_BASE, GPIOE_BASE];
        for pair in bases.windows(2) {
            assert_eq!(pair[1] - pair[0], 0x400);
        }
        assert_eq!(GPIOA_BASE, 0x4001_0800);
        assert_eq!(GPIOE_BASE, 0x4001_1800);
    }

    #[test]
    fn test_instance_addresses() {
        assert_eq!(RCC as usize, 0x4002_1000);
        assert_eq!(AFIO as usize, 0x4001_0000);
        assert_eq!(EXTI as usize, 0x4001_0400);
        assert_eq!(GPIOC as usize, 0x4001_1000);
    }
}
