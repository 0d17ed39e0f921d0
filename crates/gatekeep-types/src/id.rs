//! Identifier types for gatekeep.

use serde::{Deserialize, Serialize};
use uuid::{uuid, Uuid};

/// Namespace UUID for deterministic UUID v5 principal ids.
///
/// Accounts defined in configuration derive their id from the username
/// under this namespace so the id is stable across restarts.
const GATEKEEP_NAMESPACE: Uuid = uuid!("6f0b8d52-3c1e-4a57-9a2d-5d4e1c7b9f30");

/// Identifier for a [`Principal`](crate::Principal).
///
/// # UUID Strategy
///
/// - **Configured accounts**: UUID v5 derived from the username via [`named`](Self::named)
/// - **Ad-hoc principals**: UUID v4 via [`new`](Self::new)
///
/// # Example
///
/// ```
/// use gatekeep_types::PrincipalId;
///
/// let a = PrincipalId::named("admin");
/// let b = PrincipalId::named("admin");
/// assert_eq!(a, b);
///
/// let random = PrincipalId::new();
/// assert_ne!(random, a);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(pub Uuid);

impl PrincipalId {
    /// Creates a new random [`PrincipalId`] (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a deterministic [`PrincipalId`] from a username (UUID v5).
    #[must_use]
    pub fn named(username: &str) -> Self {
        Self(Uuid::new_v5(&GATEKEEP_NAMESPACE, username.as_bytes()))
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "principal:{}", self.0)
    }
}
