//! Permission code identifiers.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// An opaque identifier naming one grantable capability.
///
/// The set of codes the application understands is closed and fixed at
/// build time; it is exposed as associated constants and collected in
/// [`PermissionCode::KNOWN`]. Codes outside that set can still be
/// represented (they arrive from configuration files or account records),
/// but they never match anything except an identical held code.
///
/// # Example
///
/// ```
/// use gatekeep_types::PermissionCode;
///
/// let code = PermissionCode::ORDER_VIEW;
/// assert_eq!(code.as_str(), "order_view");
/// assert!(code.is_known());
///
/// let legacy = PermissionCode::from("report_export");
/// assert!(!legacy.is_known());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionCode(Cow<'static, str>);

impl PermissionCode {
    pub const DASHBOARD_VIEW: Self = Self::from_static("dashboard_view");

    pub const PRODUCT_VIEW: Self = Self::from_static("product_view");
    pub const PRODUCT_CREATE: Self = Self::from_static("product_create");
    pub const PRODUCT_EDIT: Self = Self::from_static("product_edit");
    pub const PRODUCT_DELETE: Self = Self::from_static("product_delete");

    pub const USER_VIEW: Self = Self::from_static("user_view");
    pub const USER_CREATE: Self = Self::from_static("user_create");
    pub const USER_EDIT: Self = Self::from_static("user_edit");
    pub const USER_DELETE: Self = Self::from_static("user_delete");

    pub const ORDER_VIEW: Self = Self::from_static("order_view");
    pub const ORDER_CREATE: Self = Self::from_static("order_create");
    pub const ORDER_EDIT: Self = Self::from_static("order_edit");
    pub const ORDER_DELETE: Self = Self::from_static("order_delete");

    pub const SYSTEM_VIEW: Self = Self::from_static("system_view");
    pub const SYSTEM_EDIT: Self = Self::from_static("system_edit");

    pub const SETTINGS_VIEW: Self = Self::from_static("settings_view");
    pub const SETTINGS_EDIT: Self = Self::from_static("settings_edit");

    /// Every code defined at build time.
    pub const KNOWN: &'static [Self] = &[
        Self::DASHBOARD_VIEW,
        Self::PRODUCT_VIEW,
        Self::PRODUCT_CREATE,
        Self::PRODUCT_EDIT,
        Self::PRODUCT_DELETE,
        Self::USER_VIEW,
        Self::USER_CREATE,
        Self::USER_EDIT,
        Self::USER_DELETE,
        Self::ORDER_VIEW,
        Self::ORDER_CREATE,
        Self::ORDER_EDIT,
        Self::ORDER_DELETE,
        Self::SYSTEM_VIEW,
        Self::SYSTEM_EDIT,
        Self::SETTINGS_VIEW,
        Self::SETTINGS_EDIT,
    ];

    /// Creates a code from a static string without allocating.
    #[must_use]
    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this code is part of the build-time enumeration.
    #[must_use]
    pub fn is_known(&self) -> bool {
        Self::KNOWN.iter().any(|known| known.as_str() == self.as_str())
    }
}

impl From<&str> for PermissionCode {
    fn from(value: &str) -> Self {
        Self(Cow::Owned(value.to_string()))
    }
}

impl From<String> for PermissionCode {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl AsRef<str> for PermissionCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for PermissionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
