//! Generic error handling utilities
//!
//! Unified fatal-error logging that works across the audit's error types
//! while keeping user-actionable messages distinct from system detail.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// User-actionable errors (a missing `GITHUB_TOKEN`, a bad `--months` value)
/// carry a message the operator can act on directly. System errors (API
/// failures, IO) get generic context on the fatal line with full detail at
/// debug level.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a specific, user-actionable message
    fn is_user_actionable(&self) -> bool;

    /// The specific user message when `is_user_actionable()` is true, `None`
    /// otherwise
    fn user_message(&self) -> Option<&str>;
}

/// Log a fatal error with appropriate detail level based on error specificity
///
/// User-actionable errors log their own message; system errors log the
/// operation context, with `Display` and `Debug` detail demoted to the
/// debug level.
pub fn log_error_with_context<E: ContextualError>(error: &E, operation_context: &str) {
    if let Some(user_msg) = error.user_message().filter(|_| error.is_user_actionable()) {
        log::error!("FATAL: {}", user_msg);
    } else {
        log::error!("FATAL: {}", operation_context);
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
