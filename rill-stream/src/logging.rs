// Conditional logging shim: uses `tracing` when enabled, falls back to eprintln!.

#[cfg(feature = "tracing")]
pub use tracing::{error, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
    }};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
    }};
}
