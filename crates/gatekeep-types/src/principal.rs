//! Principal (signed-in identity) types.
//!
//! A [`Principal`] is the authenticated identity known during one session:
//! who it is, which role it has and which permission codes it holds.
//!
//! # Design Rationale
//!
//! Principal is placed in `gatekeep-types` (not `gatekeep-auth`) because:
//!
//! 1. **No decision logic**: it is data; the evaluator reads it
//! 2. **Shared by all enforcement points**: menu, guard, element visibility
//! 3. **Owned by the session store**: consumers only read a shared reference

use crate::{PermissionCode, PrincipalId, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The signed-in identity and its role/permission set.
///
/// # Immutability
///
/// Principals are immutable values. [`with_permission`](Self::with_permission)
/// and [`without_permission`](Self::without_permission) return new
/// principals rather than modifying the existing one. Changing what a
/// signed-in user may do means publishing a new principal to the session
/// cell, which readers observe atomically.
///
/// # Example
///
/// ```
/// use gatekeep_types::{PermissionCode, Principal, PrincipalId, Role};
///
/// let bob = Principal::new(PrincipalId::named("bob"), "bob", Role::User)
///     .with_permissions([PermissionCode::DASHBOARD_VIEW, PermissionCode::PRODUCT_VIEW]);
///
/// let granted = bob.with_permission(PermissionCode::PRODUCT_EDIT);
/// assert!(granted.holds(&PermissionCode::PRODUCT_EDIT));
///
/// // Original unchanged
/// assert!(!bob.holds(&PermissionCode::PRODUCT_EDIT));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: PrincipalId,
    username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    role: Role,
    #[serde(default)]
    permissions: BTreeSet<PermissionCode>,
}

impl Principal {
    /// Creates a principal with no permissions.
    #[must_use]
    pub fn new(id: PrincipalId, username: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: None,
            role,
            permissions: BTreeSet::new(),
        }
    }

    /// Sets the human-readable display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Returns a principal holding every code in `codes` in addition to
    /// the current set. Duplicates have no effect.
    #[must_use]
    pub fn with_permissions(mut self, codes: impl IntoIterator<Item = PermissionCode>) -> Self {
        self.permissions.extend(codes);
        self
    }

    /// Returns a new principal that additionally holds `code`.
    #[must_use]
    pub fn with_permission(&self, code: PermissionCode) -> Self {
        let mut next = self.clone();
        next.permissions.insert(code);
        next
    }

    /// Returns a new principal that no longer holds `code`.
    #[must_use]
    pub fn without_permission(&self, code: &PermissionCode) -> Self {
        let mut next = self.clone();
        next.permissions.remove(code);
        next
    }

    /// Returns the principal id.
    #[must_use]
    pub fn id(&self) -> PrincipalId {
        self.id
    }

    /// Returns the login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the display name, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    /// Returns the role.
    #[must_use]
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Returns `true` if the role is [`Role::Admin`].
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns the held permission codes in sorted order.
    #[must_use]
    pub fn permissions(&self) -> &BTreeSet<PermissionCode> {
        &self.permissions
    }

    /// Returns `true` if `code` is a member of the held permission set.
    ///
    /// This is a plain membership test; it does not apply admin bypass.
    #[must_use]
    pub fn holds(&self, code: &PermissionCode) -> bool {
        self.permissions.contains(code)
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.username, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Principal {
        Principal::new(PrincipalId::named("carol"), "carol", Role::User)
    }

    #[test]
    fn new_principal_holds_nothing() {
        let p = user();
        assert!(p.permissions().is_empty());
        assert!(!p.holds(&PermissionCode::DASHBOARD_VIEW));
    }

    #[test]
    fn with_permissions_ignores_duplicates() {
        let p = user().with_permissions([
            PermissionCode::ORDER_VIEW,
            PermissionCode::ORDER_VIEW,
            PermissionCode::ORDER_EDIT,
        ]);
        assert_eq!(p.permissions().len(), 2);
    }

    #[test]
    fn without_permission_returns_new_value() {
        let p = user().with_permissions([PermissionCode::ORDER_VIEW]);
        let revoked = p.without_permission(&PermissionCode::ORDER_VIEW);

        assert!(p.holds(&PermissionCode::ORDER_VIEW));
        assert!(!revoked.holds(&PermissionCode::ORDER_VIEW));
        assert_eq!(p.id(), revoked.id());
    }

    #[test]
    fn admin_membership_is_not_bypassed_here() {
        let admin = Principal::new(PrincipalId::named("root"), "root", Role::Admin);
        assert!(admin.is_admin());
        assert!(!admin.holds(&PermissionCode::SYSTEM_EDIT));
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let p = user();
        assert_eq!(p.display_name(), "carol");

        let named = user().with_display_name("Carol C.");
        assert_eq!(named.display_name(), "Carol C.");
    }

    #[test]
    fn display_shows_role() {
        assert_eq!(format!("{}", user()), "carol(user)");
    }

    #[test]
    fn serde_roundtrip() {
        let p = user()
            .with_display_name("Carol")
            .with_permissions([PermissionCode::PRODUCT_VIEW]);
        let json = serde_json::to_string(&p).expect("serialize");
        let parsed: Principal = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, p);
    }
}
