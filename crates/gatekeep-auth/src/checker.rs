//! Default evaluator.
//!
//! # Example
//!
//! ```
//! use gatekeep_auth::{DefaultPolicy, PermissionPolicy, RequiredPermission};
//! use gatekeep_types::{PermissionCode, Principal, PrincipalId, Role};
//!
//! let policy = DefaultPolicy;
//! let clerk = Principal::new(PrincipalId::named("clerk"), "clerk", Role::User)
//!     .with_permissions([PermissionCode::ORDER_VIEW]);
//!
//! // Single code
//! assert!(policy.evaluate(Some(&clerk), &PermissionCode::ORDER_VIEW.into()));
//!
//! // All-of: one missing code denies
//! let edit = RequiredPermission::all([PermissionCode::ORDER_VIEW, PermissionCode::ORDER_EDIT]);
//! assert!(!policy.evaluate(Some(&clerk), &edit));
//!
//! // No principal: denied even without requirement
//! assert!(!policy.evaluate(None, &RequiredPermission::None));
//! ```

use crate::{AllowReason, Decision, DenyReason, PermissionPolicy, RequiredPermission};
use gatekeep_types::Principal;

/// Standard permission policy.
///
/// # Rules
///
/// | Principal           | `None` req | `Single`/`All` req          |
/// |---------------------|------------|-----------------------------|
/// | absent              | Denied     | Denied                      |
/// | admin               | Allowed    | Allowed (even unknown codes)|
/// | other role          | Allowed    | Allowed iff every code held |
///
/// # Audit Logging
///
/// Every decision, allowed or denied, is logged at debug level.
/// User-facing denials are reported by the navigation guard's hooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl PermissionPolicy for DefaultPolicy {
    fn decide(&self, principal: Option<&Principal>, required: &RequiredPermission) -> Decision {
        let Some(principal) = principal else {
            tracing::debug!(required = %required, "access denied: not authenticated");
            return Decision::Denied(DenyReason::NotAuthenticated);
        };

        if principal.is_admin() {
            tracing::debug!(
                principal = %principal,
                required = %required,
                "access allowed: admin bypass"
            );
            return Decision::Allowed(AllowReason::AdminBypass);
        }

        if required.is_none() {
            tracing::debug!(principal = %principal, "access allowed: unrestricted");
            return Decision::Allowed(AllowReason::Unrestricted);
        }

        let missing = required.missing_from(principal);
        if missing.is_empty() {
            tracing::debug!(
                principal = %principal,
                required = %required,
                "access allowed"
            );
            Decision::Allowed(AllowReason::Held)
        } else {
            tracing::debug!(
                principal = %principal,
                required = %required,
                missing = ?missing,
                "access denied: missing permissions"
            );
            Decision::Denied(DenyReason::MissingPermissions { missing })
        }
    }
}
