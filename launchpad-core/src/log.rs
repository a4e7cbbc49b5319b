//! Logging macros
//!
//! Forward to `defmt` when the `defmt` feature is enabled. Without it the
//! arguments are only borrowed, so host builds carry no logging transport
//! and no unused-variable noise.

macro_rules! info {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        #[cfg(feature = "defmt")]
        ::defmt::info!($fmt $(, $arg)*);
        #[cfg(not(feature = "defmt"))]
        let _ = ($(&$arg,)*);
    };
}

// `warn` would clash with the built-in lint attribute
macro_rules! warning {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        #[cfg(feature = "defmt")]
        ::defmt::warn!($fmt $(, $arg)*);
        #[cfg(not(feature = "defmt"))]
        let _ = ($(&$arg,)*);
    };
}

macro_rules! error {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        #[cfg(feature = "defmt")]
        ::defmt::error!($fmt $(, $arg)*);
        #[cfg(not(feature = "defmt"))]
        let _ = ($(&$arg,)*);
    };
}

macro_rules! debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        #[cfg(feature = "defmt")]
        ::defmt::debug!($fmt $(, $arg)*);
        #[cfg(not(feature = "defmt"))]
        let _ = ($(&$arg,)*);
    };
}

pub(crate) use {debug, error, info, warning};
