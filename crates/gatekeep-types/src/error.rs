//! Shared error-code interface.
//!
//! Every gatekeep error type implements [`ErrorCode`] so frontends can map
//! failures to stable identifiers and decide whether to prompt the user
//! again (bad password) or abort (broken configuration file).
//!
//! | Prefix    | Crate              | Example                      |
//! |-----------|--------------------|------------------------------|
//! | `AUTH_`   | `gatekeep-auth`    | `AUTH_NOT_AUTHENTICATED`     |
//! | `CONFIG_` | `gatekeep-runtime` | `CONFIG_PARSE_TOML`          |
//! | `SIGNIN_` | `gatekeep-runtime` | `SIGNIN_INVALID_CREDENTIALS` |
//! | `CATALOG_`| `gatekeep-runtime` | `CATALOG_DUPLICATE_PATH`     |
//! | `ROUTE_`  | `gatekeep-runtime` | `ROUTE_UNKNOWN_TARGET`       |
//!
//! # Example
//!
//! ```
//! use gatekeep_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LoginError {
//!     BadPassword,
//!     StoreOffline,
//! }
//!
//! impl ErrorCode for LoginError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::BadPassword => "LOGIN_BAD_PASSWORD",
//!             Self::StoreOffline => "LOGIN_STORE_OFFLINE",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::BadPassword)
//!     }
//! }
//!
//! assert_eq!(LoginError::BadPassword.code(), "LOGIN_BAD_PASSWORD");
//! assert!(!LoginError::StoreOffline.is_recoverable());
//! ```

/// Machine-readable identity of an error.
///
/// Codes are UPPER_SNAKE_CASE, prefixed with the owning area and stable
/// once published.
///
/// An error is recoverable when the user can fix it by acting differently
/// (retyping a password, signing in). Malformed configuration and catalog
/// conflicts are not recoverable: they need an edit and a restart.
pub trait ErrorCode {
    /// Returns the stable error code, e.g. `"AUTH_MISSING_PERMISSIONS"`.
    fn code(&self) -> &'static str;

    /// Returns `true` if the user can correct the condition without a
    /// configuration change.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that `err` carries a well-formed code starting with `expected_prefix`.
///
/// Intended for unit tests of error enums.
///
/// # Panics
///
/// Panics if the code is empty, has the wrong prefix, or is not
/// UPPER_SNAKE_CASE.
///
/// # Example
///
/// ```
/// use gatekeep_types::{assert_error_code, ErrorCode};
///
/// struct Locked;
///
/// impl ErrorCode for Locked {
///     fn code(&self) -> &'static str { "SIGNIN_LOCKED" }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_code(&Locked, "SIGNIN_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{code}' must start with prefix '{expected_prefix}'"
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

/// Runs [`assert_error_code`] over every error in `errors`.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('_')
        && !s.ends_with('_')
        && !s.contains("__")
        && s.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
