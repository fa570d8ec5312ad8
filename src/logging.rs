//! Logging macros
//!
//! - `defmt` feature: forwards to defmt
//! - host tests: prints with `println!`
//! - otherwise: compiles to nothing

#[allow(unused_macros)]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);
        #[cfg(all(not(feature = "defmt"), test))]
        std::println!("[TRACE] {}", std::format!($($arg)*));
    }};
}

#[allow(unused_macros)]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);
        #[cfg(all(not(feature = "defmt"), test))]
        std::println!("[DEBUG] {}", std::format!($($arg)*));
    }};
}

#[allow(unused_macros)]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);
        #[cfg(all(not(feature = "defmt"), test))]
        std::println!("[WARN] {}", std::format!($($arg)*));
    }};
}
