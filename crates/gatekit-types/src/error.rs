//! Unified error interface for GateKit.
//!
//! This module provides the [`ErrorCode`] trait for standardized
//! error handling across all GateKit crates.
//!
//! # Design
//!
//! All GateKit error types should implement [`ErrorCode`] to provide:
//!
//! - **Machine-readable codes**: for audit records and monitoring
//! - **Recoverability info**: for retry logic and operator feedback
//!
//! # Example
//!
//! ```
//! use gatekit_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum MyError {
//!     NotFound(String),
//!     Busy,
//! }
//!
//! impl ErrorCode for MyError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::NotFound(_) => "NOT_FOUND",
//!             Self::Busy => "BUSY",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Busy)
//!     }
//! }
//!
//! let err = MyError::Busy;
//! assert_eq!(err.code(), "BUSY");
//! assert!(err.is_recoverable());
//! ```

/// Unified error code interface for GateKit errors.
///
/// Implement this trait for all error types to enable:
///
/// - Consistent error code format across crates
/// - Uniform audit logging of rejected writes and integrity faults
/// - Standardized monitoring
///
/// # Code Format
///
/// Error codes should be:
///
/// - **UPPER_SNAKE_CASE**: e.g., `"LOCK_POISONED"`
/// - **Namespace-prefixed for specificity**: e.g., `"ACCESS_ROLE_CYCLE"`,
///   `"STORE_DUPLICATE_RULE"`
/// - **Stable**: codes should not change once defined (API contract)
///
/// # Recoverability
///
/// An error is recoverable if retrying may succeed or an administrator
/// can fix it with a configuration change. Integrity violations (a
/// cycle in stored hierarchy data, a dangling reference) are not
/// recoverable by retry — they indicate corrupted configuration that
/// must be repaired.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    ///
    /// # Format
    ///
    /// - UPPER_SNAKE_CASE
    /// - Prefixed with domain (e.g., `"ACCESS_"`, `"STORE_"`)
    /// - Stable across versions (breaking change if modified)
    fn code(&self) -> &'static str;

    /// Returns whether the error is recoverable.
    ///
    /// # Returns
    ///
    /// - `true`: retry may succeed, or an operator can take corrective action
    /// - `false`: retry will not help; requires config repair or a code change
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows GateKit conventions.
///
/// # Checks
///
/// 1. Code is UPPER_SNAKE_CASE
/// 2. Code starts with expected prefix
/// 3. Code is not empty
///
/// # Panics
///
/// Panics with descriptive message if validation fails.
///
/// # Example
///
/// ```
/// use gatekit_types::{assert_error_code, ErrorCode};
///
/// #[derive(Debug)]
/// enum MyError { Busy }
///
/// impl ErrorCode for MyError {
///     fn code(&self) -> &'static str { "MY_BUSY" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&MyError::Busy, "MY_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");

    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );

    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates multiple error codes at once.
///
/// Use this to verify all variants of an error enum.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

/// Checks if a string is UPPER_SNAKE_CASE.
fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }

    // Must not start or end with underscore
    if s.starts_with('_') || s.ends_with('_') {
        return false;
    }

    // Only uppercase ASCII letters, digits, and underscores
    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
