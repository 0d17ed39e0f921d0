//! Access denied error type.
//!
//! Evaluation itself never fails; [`AccessDenied`] exists for callers that
//! want to turn a denial into an error and propagate it with `?`.
//!
//! ```text
//! Decision::Denied(DenyReason) ──into_result()──► Err(AccessDenied)
//!        │                                            │
//!   NotAuthenticated                         AUTH_NOT_AUTHENTICATED
//!   MissingPermissions                       AUTH_MISSING_PERMISSIONS
//! ```

use crate::DenyReason;
use gatekeep_types::{ErrorCode, PermissionCode};
use thiserror::Error;

/// A denial expressed as an error.
///
/// # Example
///
/// ```
/// use gatekeep_auth::AccessDenied;
/// use gatekeep_types::{ErrorCode, PermissionCode};
///
/// let err = AccessDenied::MissingPermissions {
///     missing: vec![PermissionCode::ORDER_VIEW],
/// };
///
/// assert!(err.to_string().contains("order_view"));
/// assert_eq!(err.code(), "AUTH_MISSING_PERMISSIONS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// No active principal.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Principal lacks required codes.
    #[error("missing permissions: {}", join_codes(.missing))]
    MissingPermissions {
        /// The codes that were not held.
        missing: Vec<PermissionCode>,
    },
}

impl AccessDenied {
    /// Returns the missing codes (empty for [`AccessDenied::NotAuthenticated`]).
    #[must_use]
    pub fn missing(&self) -> &[PermissionCode] {
        match self {
            Self::NotAuthenticated => &[],
            Self::MissingPermissions { missing } => missing,
        }
    }
}

impl From<DenyReason> for AccessDenied {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::NotAuthenticated => Self::NotAuthenticated,
            DenyReason::MissingPermissions { missing } => Self::MissingPermissions { missing },
        }
    }
}

impl ErrorCode for AccessDenied {
    fn code(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "AUTH_NOT_AUTHENTICATED",
            Self::MissingPermissions { .. } => "AUTH_MISSING_PERMISSIONS",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Signing in fixes the first; the second needs an administrator.
        matches!(self, Self::NotAuthenticated)
    }
}

fn join_codes(codes: &[PermissionCode]) -> String {
    codes
        .iter()
        .map(PermissionCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekeep_types::assert_error_codes;

    #[test]
    fn error_codes_are_prefixed() {
        assert_error_codes(
            &[
                AccessDenied::NotAuthenticated,
                AccessDenied::MissingPermissions { missing: vec![] },
            ],
            "AUTH_",
        );
    }

    #[test]
    fn missing_display_lists_codes() {
        let err = AccessDenied::MissingPermissions {
            missing: vec![PermissionCode::ORDER_VIEW, PermissionCode::ORDER_EDIT],
        };
        assert_eq!(err.to_string(), "missing permissions: order_view, order_edit");
        assert!(!err.is_recoverable());
        assert_eq!(err.missing().len(), 2);
    }

    #[test]
    fn not_authenticated_is_recoverable() {
        let err = AccessDenied::from(DenyReason::NotAuthenticated);
        assert!(err.is_recoverable());
        assert!(err.missing().is_empty());
    }
}
