//! Evaluation outcomes.

use crate::AccessDenied;
use gatekeep_types::PermissionCode;

/// Why access was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowReason {
    /// The principal has the admin role.
    AdminBypass,
    /// The requirement was empty; any signed-in principal passes.
    Unrestricted,
    /// Every required code is held.
    Held,
}

/// Why access was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// There is no active principal.
    NotAuthenticated,
    /// The principal lacks one or more required codes.
    MissingPermissions {
        /// Missing codes in requirement order, without duplicates.
        missing: Vec<PermissionCode>,
    },
}

/// Result of one evaluation.
///
/// # Example
///
/// ```
/// use gatekeep_auth::{AllowReason, Decision, DenyReason};
///
/// let allowed = Decision::Allowed(AllowReason::AdminBypass);
/// assert!(allowed.is_allowed());
/// assert_eq!(allowed.status_str(), "allowed");
///
/// let denied = Decision::Denied(DenyReason::NotAuthenticated);
/// assert!(denied.is_denied());
/// assert!(denied.into_result().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Access granted.
    Allowed(AllowReason),
    /// Access refused.
    Denied(DenyReason),
}

impl Decision {
    /// Returns `true` if access was granted.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    /// Returns `true` if access was refused.
    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied(_))
    }

    /// Returns the deny reason, if any.
    #[must_use]
    pub fn deny_reason(&self) -> Option<&DenyReason> {
        match self {
            Self::Allowed(_) => None,
            Self::Denied(reason) => Some(reason),
        }
    }

    /// Returns `"allowed"` or `"denied"`.
    #[must_use]
    pub fn status_str(&self) -> &'static str {
        match self {
            Self::Allowed(_) => "allowed",
            Self::Denied(_) => "denied",
        }
    }

    /// Converts into a `Result`, for callers that propagate with `?`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] when the decision is a denial.
    pub fn into_result(self) -> Result<AllowReason, AccessDenied> {
        match self {
            Self::Allowed(reason) => Ok(reason),
            Self::Denied(reason) => Err(reason.into()),
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.status_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deny_reason_only_on_denial() {
        assert!(Decision::Allowed(AllowReason::Held).deny_reason().is_none());

        let denied = Decision::Denied(DenyReason::MissingPermissions {
            missing: vec![PermissionCode::ORDER_VIEW],
        });
        assert!(matches!(
            denied.deny_reason(),
            Some(DenyReason::MissingPermissions { missing }) if missing.len() == 1
        ));
    }

    #[test]
    fn into_result_maps_reason() {
        let err = Decision::Denied(DenyReason::NotAuthenticated)
            .into_result()
            .expect_err("denied");
        assert!(matches!(err, AccessDenied::NotAuthenticated));

        let ok = Decision::Allowed(AllowReason::Unrestricted).into_result();
        assert_eq!(ok.ok(), Some(AllowReason::Unrestricted));
    }

    #[test]
    fn display_is_status() {
        assert_eq!(Decision::Allowed(AllowReason::Held).to_string(), "allowed");
        assert_eq!(
            Decision::Denied(DenyReason::NotAuthenticated).to_string(),
            "denied"
        );
    }
}
