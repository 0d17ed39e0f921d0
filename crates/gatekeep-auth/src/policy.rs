//! Permission policy trait.
//!
//! Defines [`PermissionPolicy`], the evaluator every enforcement point
//! calls. Menu filtering, navigation guarding and element visibility all
//! route through the same policy so the AND rule and admin bypass are
//! applied identically everywhere.
//!
//! # Architecture
//!
//! ```text
//! PermissionPolicy trait (THIS)      <- abstract decision function
//!          │
//!          ├── DefaultPolicy         <- admin bypass + AND membership + audit log
//!          │
//!          └── custom impls for tests or stricter deployments
//! ```
//!
//! # Evaluation Order
//!
//! | Step | Condition                     | Result                      |
//! |------|-------------------------------|-----------------------------|
//! | 1    | no principal                  | deny (`NotAuthenticated`)   |
//! | 2    | role is admin                 | allow (`AdminBypass`)       |
//! | 3    | requirement is empty          | allow (`Unrestricted`)      |
//! | 4    | every required code held      | allow (`Held`)              |
//! | 5    | otherwise                     | deny (`MissingPermissions`) |

use crate::{Decision, RequiredPermission};
use gatekeep_types::{PermissionCode, Principal};

/// Abstract permission policy.
///
/// Implementations must be pure: the result depends only on the
/// principal's role, its held codes and the requirement. No call order,
/// clock or cached state may influence it.
///
/// # Example
///
/// ```
/// use gatekeep_auth::{AllowReason, Decision, DenyReason, PermissionPolicy, RequiredPermission};
/// use gatekeep_types::{PermissionCode, Principal, PrincipalId, Role};
///
/// /// Lets anyone signed in through.
/// struct OpenPolicy;
///
/// impl PermissionPolicy for OpenPolicy {
///     fn decide(&self, principal: Option<&Principal>, _required: &RequiredPermission) -> Decision {
///         match principal {
///             Some(_) => Decision::Allowed(AllowReason::Unrestricted),
///             None => Decision::Denied(DenyReason::NotAuthenticated),
///         }
///     }
/// }
///
/// let user = Principal::new(PrincipalId::named("eve"), "eve", Role::User);
/// let required = RequiredPermission::from(PermissionCode::SYSTEM_EDIT);
///
/// assert!(OpenPolicy.evaluate(Some(&user), &required));
/// assert!(!OpenPolicy.evaluate(None, &required));
/// ```
pub trait PermissionPolicy: Send + Sync {
    /// Decides whether `principal` satisfies `required`.
    fn decide(&self, principal: Option<&Principal>, required: &RequiredPermission) -> Decision;

    /// Boolean form of [`decide`](Self::decide).
    fn evaluate(&self, principal: Option<&Principal>, required: &RequiredPermission) -> bool {
        self.decide(principal, required).is_allowed()
    }

    /// Returns `true` if `principal` is admin or holds at least one of `codes`.
    ///
    /// This is the only OR check. An empty `codes` list is satisfied by
    /// admin only.
    fn has_any(&self, principal: Option<&Principal>, codes: &[PermissionCode]) -> bool {
        match principal {
            None => false,
            Some(p) if p.is_admin() => true,
            Some(p) => codes.iter().any(|code| p.holds(code)),
        }
    }
}
