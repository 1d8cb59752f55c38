//! Logging macros
//!
//! Thin wrappers over `defmt`. With the `defmt` feature disabled they expand
//! to nothing, so drivers can log freely without pulling a logger into host
//! builds.

#![macro_use]
#![allow(unused_macros)]

macro_rules! __log {
    ($level:ident, $($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::$level!($($arg)*);
    }};
}

macro_rules! trace {
    ($($arg:tt)*) => { __log!(trace, $($arg)*) };
}

macro_rules! debug {
    ($($arg:tt)*) => { __log!(debug, $($arg)*) };
}

macro_rules! info {
    ($($arg:tt)*) => { __log!(info, $($arg)*) };
}

macro_rules! warn {
    ($($arg:tt)*) => { __log!(warn, $($arg)*) };
}
