//! Query facade over the current session.

use crate::{
    AccessDenied, AllowReason, Decision, DefaultPolicy, PermissionPolicy, RequiredPermission,
    SessionSnapshot, SessionSource,
};
use gatekeep_types::{PermissionCode, Principal};
use std::sync::Arc;

/// Permission checks against the principal active at call time.
///
/// The principal is read from the session on every call, never cached,
/// so a sign-in or grant is visible to the very next query. Cloning is
/// cheap (two `Arc`s) and every consumer in the runtime holds one.
///
/// # Example
///
/// ```
/// use gatekeep_auth::{PermissionQuery, RequiredPermission, SessionCell, SessionToken};
/// use gatekeep_types::{PermissionCode, Principal, PrincipalId, Role};
/// use std::sync::Arc;
///
/// let cell = Arc::new(SessionCell::new());
/// let query = PermissionQuery::with_default_policy(cell.clone());
///
/// let kate = Principal::new(PrincipalId::named("kate"), "kate", Role::User)
///     .with_permissions([PermissionCode::ORDER_VIEW]);
/// cell.sign_in(SessionToken::generate(), kate);
///
/// let both = [PermissionCode::ORDER_VIEW, PermissionCode::ORDER_EDIT];
/// assert!(query.check(&PermissionCode::ORDER_VIEW.into()));
/// assert!(!query.has_all(&both));
/// assert!(query.has_any(&both));
/// ```
#[derive(Clone)]
pub struct PermissionQuery {
    session: Arc<dyn SessionSource>,
    policy: Arc<dyn PermissionPolicy>,
}

impl PermissionQuery {
    /// Creates a facade with an explicit policy.
    #[must_use]
    pub fn new(session: Arc<dyn SessionSource>, policy: Arc<dyn PermissionPolicy>) -> Self {
        Self { session, policy }
    }

    /// Creates a facade using [`DefaultPolicy`].
    #[must_use]
    pub fn with_default_policy(session: Arc<dyn SessionSource>) -> Self {
        Self::new(session, Arc::new(DefaultPolicy))
    }

    /// Evaluates `required` against the current principal.
    #[must_use]
    pub fn check(&self, required: &RequiredPermission) -> bool {
        self.decide(required).is_allowed()
    }

    /// Like [`check`](Self::check) but returns the full decision.
    #[must_use]
    pub fn decide(&self, required: &RequiredPermission) -> Decision {
        let principal = self.session.current_principal();
        self.policy.decide(principal.as_deref(), required)
    }

    /// Like [`check`](Self::check) for callers that propagate a denial.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] carrying the deny reason.
    pub fn require(&self, required: &RequiredPermission) -> Result<AllowReason, AccessDenied> {
        self.decide(required).into_result()
    }

    /// Returns `true` if admin or every code is held.
    ///
    /// An empty list passes for any signed-in principal.
    #[must_use]
    pub fn has_all(&self, codes: &[PermissionCode]) -> bool {
        self.check(&RequiredPermission::all(codes.iter().cloned()))
    }

    /// Returns `true` if admin or at least one code is held.
    #[must_use]
    pub fn has_any(&self, codes: &[PermissionCode]) -> bool {
        let principal = self.session.current_principal();
        self.policy.has_any(principal.as_deref(), codes)
    }

    /// Returns `true` if the current principal is admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.session
            .current_principal()
            .is_some_and(|p| p.is_admin())
    }

    /// Returns `true` if a complete session is active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Returns the current principal.
    #[must_use]
    pub fn principal(&self) -> Option<Arc<Principal>> {
        self.session.current_principal()
    }

    /// Returns the current session snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Returns the underlying session source.
    #[must_use]
    pub fn session(&self) -> &Arc<dyn SessionSource> {
        &self.session
    }

    /// Returns the policy in use.
    #[must_use]
    pub fn policy(&self) -> &Arc<dyn PermissionPolicy> {
        &self.policy
    }
}

impl std::fmt::Debug for PermissionQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionQuery")
            .field("session", &self.session.snapshot())
            .finish_non_exhaustive()
    }
}
