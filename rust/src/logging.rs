//! Logging macros for program generation with verbosity level control.
//!
//! Logging is off unless a caller raises the verbosity, so the scheduler and
//! document builders stay silent by default.
//! Levels:
//! - 0: SILENT
//! - 1: PLACEMENTS (which session each presentation lands in)
//! - 2: CHECKS (capacity and group validation details)
//! - 3: DEBUG (round-robin cursors, overflow pool contents)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_PLACEMENTS: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at PLACEMENTS level (verbosity >= 1).
///
/// Used for: presentation-to-session placements and pass summaries.
#[macro_export]
macro_rules! log_placements {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_PLACEMENTS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// Used for: capacity totals, group sizes, validation outcomes.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(VERBOSITY_SILENT < VERBOSITY_PLACEMENTS);
        assert!(VERBOSITY_PLACEMENTS < VERBOSITY_CHECKS);
        assert!(VERBOSITY_CHECKS < VERBOSITY_DEBUG);
    }

    #[test]
    fn test_log_macros_silent() {
        let verbosity = VERBOSITY_SILENT;
        log_placements!(verbosity, "session {} <- {}", 1, "5401");
        log_checks!(verbosity, "capacity {}", 18);
        log_debug!(verbosity, "cursor {}", 0);
    }
}
