//! Principal roles.

use serde::{Deserialize, Serialize};

/// The role assigned to a [`Principal`](crate::Principal).
///
/// Only [`Role::Admin`] carries special meaning: admin principals bypass
/// every permission check. Any other role is evaluated purely on the
/// permissions the principal holds.
///
/// Serialized as a lowercase string (`"admin"`, `"user"`, or the custom
/// role name).
///
/// # Example
///
/// ```
/// use gatekeep_types::Role;
///
/// assert!(Role::Admin.is_admin());
/// assert!(!Role::User.is_admin());
///
/// let auditor = Role::from("auditor");
/// assert_eq!(auditor, Role::Custom("auditor".to_string()));
/// assert_eq!(Role::from("ADMIN"), Role::Admin);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Full access; never permission-checked.
    Admin,
    /// Standard signed-in user.
    #[default]
    User,
    /// Additional deployment-specific role.
    Custom(String),
}

impl Role {
    /// Returns `true` for [`Role::Admin`].
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns the role name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Custom(name) => name,
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "user" => Self::User,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::from("Admin"), Role::Admin);
        assert_eq!(Role::from(" user "), Role::User);
    }

    #[test]
    fn custom_role_is_not_admin() {
        let role = Role::from("superuser");
        assert!(!role.is_admin());
        assert_eq!(role.as_str(), "superuser");
    }

    #[test]
    fn serde_roundtrip_as_string() {
        let json = serde_json::to_string(&Role::Admin).expect("serialize");
        assert_eq!(json, "\"admin\"");

        let parsed: Role = serde_json::from_str("\"auditor\"").expect("deserialize");
        assert_eq!(parsed, Role::Custom("auditor".to_string()));
    }
}
