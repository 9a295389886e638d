#![deny(missing_docs)]
//! Shared logging utilities for the insight workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! a helper for keeping logged payloads short, and a minimal test initializer
//! for the global logger.

use std::borrow::Cow;

/// Maximum number of characters of a payload that ends up in a log line.
pub const LOG_PREVIEW_CHARS: usize = 120;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Shortens `text` to at most [`LOG_PREVIEW_CHARS`] characters on one line.
///
/// Newlines are flattened so a markdown body never spans several log records.
pub fn log_preview(text: &str) -> Cow<'_, str> {
    let needs_flatten = text.contains('\n');
    let too_long = text.chars().nth(LOG_PREVIEW_CHARS).is_some();
    if !needs_flatten && !too_long {
        return Cow::Borrowed(text);
    }
    let mut out: String = text
        .chars()
        .take(LOG_PREVIEW_CHARS)
        .map(|ch| if ch == '\n' { ' ' } else { ch })
        .collect();
    if too_long {
        out.push('…');
    }
    Cow::Owned(out)
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
