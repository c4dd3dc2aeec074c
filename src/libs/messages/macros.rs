//! Console output macros with optional tracing routing.
//!
//! Every macro takes anything implementing `Display` (usually a
//! [`Message`](super::Message)) and prints it with a level prefix. When debug
//! mode is on, output is routed through `tracing` instead so it carries
//! timestamps and targets from the installed subscriber.
//!
//! ## Debug Mode Detection
//!
//! Debug mode is enabled when either variable is present:
//! - **`TAIGA_SYNC_DEBUG`**: application-specific switch
//! - **`RUST_LOG`**: standard `tracing-subscriber` filter
//!
//! The check runs once and is cached for the rest of the process.
//!
//! ## Macros
//!
//! - **`msg_success!`**: success notice with ✅ prefix (stdout)
//! - **`msg_info!`**: informational notice with ℹ️ prefix (stdout)
//! - **`msg_warning!`**: warning with ⚠️ prefix (stderr)
//! - **`msg_error!`**: error with ❌ prefix (stderr)
//! - **`msg_error_anyhow!`**: builds an `anyhow::Error` from a message
//!
//! ```rust
//! use taiga_sync::libs::messages::Message;
//! use taiga_sync::{msg_info, msg_success};
//!
//! msg_info!(Message::TaskAlreadyCreated("Standup".to_string()));
//! msg_success!(Message::SyncCompleted);
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Returns `true` when `TAIGA_SYNC_DEBUG` or `RUST_LOG` is set.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("TAIGA_SYNC_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Prints a success message with a ✅ prefix.
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
}

/// Prints an informational message with an ℹ️ prefix.
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
}

/// Prints a warning with a ⚠️ prefix to stderr.
#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            eprintln!("⚠️ {}", $msg);
        }
    };
}

/// Prints an error with a ❌ prefix to stderr.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
}

/// Creates an `anyhow::Error` from a message.
///
/// ```rust
/// use taiga_sync::libs::messages::Message;
/// use taiga_sync::msg_error_anyhow;
///
/// let error = msg_error_anyhow!(Message::NoInputFile);
/// assert_eq!(error.to_string(), "Error: No input file provided");
/// ```
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("{}", $msg)
    };
}
