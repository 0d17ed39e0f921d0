//! Sign-in over a static credential directory.
//!
//! [`SignInService`] is the write side of the session: it checks
//! credentials, builds the [`Principal`] and publishes it to the
//! [`SessionCell`] together with a fresh token. Everything else only reads
//! the cell.
//!
//! ```text
//! login(user, pw) ──▶ accounts ──match──▶ Principal ──▶ SessionCell::sign_in
//!                        │
//!                        └─no match──▶ guest_fallback? ──yes──▶ role=user, guest codes
//!                                            │
//!                                            └─no──▶ SignInError::InvalidCredentials
//! ```

use crate::config::SignInConfig;
use gatekeep_auth::{SessionCell, SessionToken};
use gatekeep_types::{ErrorCode, PermissionCode, Principal, PrincipalId, Role};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// One entry of the credential directory.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<PermissionCode>,
}

impl Account {
    /// Creates an account without explicit permissions.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
            display_name: None,
            permissions: Vec::new(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the held permission codes.
    #[must_use]
    pub fn with_permissions(mut self, codes: impl IntoIterator<Item = PermissionCode>) -> Self {
        self.permissions = codes.into_iter().collect();
        self
    }

    /// Builds the principal this account signs in as.
    #[must_use]
    pub fn principal(&self) -> Principal {
        let principal = Principal::new(
            PrincipalId::named(&self.username),
            self.username.clone(),
            self.role.clone(),
        )
        .with_permissions(self.permissions.iter().cloned());

        match &self.display_name {
            Some(name) => principal.with_display_name(name.clone()),
            None => principal,
        }
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("display_name", &self.display_name)
            .field("permissions", &self.permissions)
            .finish()
    }
}

/// Sign-in failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignInError {
    /// Username or password is empty.
    #[error("username and password are required")]
    MissingCredentials,

    /// No account matches.
    #[error("invalid username or password for '{username}'")]
    InvalidCredentials { username: String },
}

impl ErrorCode for SignInError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "SIGNIN_MISSING_CREDENTIALS",
            Self::InvalidCredentials { .. } => "SIGNIN_INVALID_CREDENTIALS",
        }
    }

    fn is_recoverable(&self) -> bool {
        true
    }
}

/// Signs principals in and out of a [`SessionCell`].
///
/// # Example
///
/// ```
/// use gatekeep_auth::{SessionCell, SessionSource};
/// use gatekeep_runtime::config::SignInConfig;
/// use gatekeep_runtime::defaults;
/// use gatekeep_runtime::signin::SignInService;
/// use std::sync::Arc;
///
/// let cell = Arc::new(SessionCell::new());
/// let service = SignInService::new(cell.clone(), defaults::accounts(), SignInConfig::default());
///
/// let admin = service.login("admin", "123456")?;
/// assert!(admin.is_admin());
/// assert!(cell.is_authenticated());
///
/// service.logout();
/// assert!(!cell.is_authenticated());
/// # Ok::<(), gatekeep_runtime::signin::SignInError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SignInService {
    cell: Arc<SessionCell>,
    accounts: Arc<[Account]>,
    config: SignInConfig,
}

impl SignInService {
    /// Creates a service over `accounts`.
    #[must_use]
    pub fn new(cell: Arc<SessionCell>, accounts: Vec<Account>, config: SignInConfig) -> Self {
        Self {
            cell,
            accounts: accounts.into(),
            config,
        }
    }

    /// Returns the session cell this service writes to.
    #[must_use]
    pub fn session(&self) -> &Arc<SessionCell> {
        &self.cell
    }

    /// Checks credentials and publishes the principal with a new token.
    ///
    /// A known username with a wrong password is always rejected, even
    /// with guest fallback enabled.
    ///
    /// # Errors
    ///
    /// Returns [`SignInError::MissingCredentials`] for blank input and
    /// [`SignInError::InvalidCredentials`] when no account matches and
    /// guest fallback is off. The session is left unchanged on error.
    pub fn login(&self, username: &str, password: &str) -> Result<Arc<Principal>, SignInError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(SignInError::MissingCredentials);
        }

        let principal = match self.accounts.iter().find(|a| a.username == username) {
            Some(account) if account.password == password => account.principal(),
            Some(_) => {
                tracing::warn!(username, "sign-in rejected: wrong password");
                return Err(SignInError::InvalidCredentials {
                    username: username.to_string(),
                });
            }
            None if self.config.guest_fallback => self.guest(username),
            None => {
                tracing::warn!(username, "sign-in rejected: unknown user");
                return Err(SignInError::InvalidCredentials {
                    username: username.to_string(),
                });
            }
        };

        tracing::debug!(username, role = %principal.role(), "credentials accepted");
        Ok(self.cell.sign_in(SessionToken::generate(), principal))
    }

    /// Clears the session.
    pub fn logout(&self) {
        self.cell.sign_out();
    }

    fn guest(&self, username: &str) -> Principal {
        Principal::new(PrincipalId::named(username), username, Role::User)
            .with_permissions(self.config.guest_permissions.iter().cloned())
    }
}
