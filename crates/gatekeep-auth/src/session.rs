//! Session state shared by every enforcement point.
//!
//! The active principal lives in a [`SessionCell`]: a reference-swappable
//! cell injected into each consumer. Sign-in, sign-out and permission
//! changes publish a whole new [`SessionSnapshot`]; readers clone the
//! snapshot out and never observe a half-updated role/permission mix.
//!
//! ```text
//!                 ┌──────────────────────┐
//!  sign_in ──────►│      SessionCell      │──── snapshot() ───► PermissionQuery
//!  sign_out ─────►│ watch<SessionSnapshot>│──── snapshot() ───► NavigationGuard
//!  replace ──────►│                       │──── subscribe() ──► MenuComposer
//!                 └──────────────────────┘
//! ```

use gatekeep_types::Principal;
use std::sync::Arc;
use tokio::sync::watch;

/// Opaque bearer token issued at sign-in.
///
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps an existing token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Issues a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("gk-{}", uuid::Uuid::new_v4().simple()))
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// One consistent view of the session.
///
/// | token | principal | state                 |
/// |-------|-----------|-----------------------|
/// | none  | none      | anonymous             |
/// | some  | none      | incomplete principal  |
/// | some  | some      | authenticated         |
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    token: Option<SessionToken>,
    principal: Option<Arc<Principal>>,
}

impl SessionSnapshot {
    /// No session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A complete session.
    #[must_use]
    pub fn signed_in(token: SessionToken, principal: Arc<Principal>) -> Self {
        Self {
            token: Some(token),
            principal: Some(principal),
        }
    }

    /// A token whose principal record has not been resolved.
    #[must_use]
    pub fn token_only(token: SessionToken) -> Self {
        Self {
            token: Some(token),
            principal: None,
        }
    }

    /// Returns the token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    /// Returns the principal, if resolved.
    #[must_use]
    pub fn principal(&self) -> Option<&Arc<Principal>> {
        self.principal.as_ref()
    }

    /// Returns `true` if a token is present.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Returns `true` only when both token and principal are present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.principal.is_some()
    }
}

/// Read access to the current session.
///
/// Consumers depend on this trait rather than on a process-wide global so
/// tests can hand in any session they like.
pub trait SessionSource: Send + Sync {
    /// Returns the current snapshot.
    fn snapshot(&self) -> SessionSnapshot;

    /// Returns a receiver notified on every published change.
    fn subscribe(&self) -> watch::Receiver<SessionSnapshot>;

    /// Returns the active principal, or `None` when signed out.
    fn current_principal(&self) -> Option<Arc<Principal>> {
        self.snapshot().principal
    }

    /// Returns `true` if a complete session is active.
    fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated()
    }
}

/// The owned, swappable session state.
///
/// # Example
///
/// ```
/// use gatekeep_auth::{SessionCell, SessionSource, SessionToken};
/// use gatekeep_types::{PermissionCode, Principal, PrincipalId, Role};
///
/// let cell = SessionCell::new();
/// assert!(!cell.is_authenticated());
///
/// let ops = Principal::new(PrincipalId::named("ops"), "ops", Role::User);
/// cell.sign_in(SessionToken::generate(), ops);
/// assert!(cell.is_authenticated());
///
/// // Grant by replacing the principal.
/// cell.update_principal(|p| p.with_permission(PermissionCode::ORDER_VIEW));
/// let current = cell.current_principal().expect("signed in");
/// assert!(current.holds(&PermissionCode::ORDER_VIEW));
///
/// cell.sign_out();
/// assert!(cell.current_principal().is_none());
/// ```
#[derive(Debug)]
pub struct SessionCell {
    tx: watch::Sender<SessionSnapshot>,
}

impl SessionCell {
    /// Creates an anonymous cell.
    #[must_use]
    pub fn new() -> Self {
        Self::with_snapshot(SessionSnapshot::anonymous())
    }

    /// Creates a cell holding `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: SessionSnapshot) -> Self {
        let (tx, _rx) = watch::channel(snapshot);
        Self { tx }
    }

    /// Publishes a complete session and returns the shared principal.
    pub fn sign_in(&self, token: SessionToken, principal: Principal) -> Arc<Principal> {
        let principal = Arc::new(principal);
        tracing::info!(principal = %principal, "session started");
        self.tx
            .send_replace(SessionSnapshot::signed_in(token, Arc::clone(&principal)));
        principal
    }

    /// Clears the session.
    pub fn sign_out(&self) {
        let previous = self.tx.send_replace(SessionSnapshot::anonymous());
        if let Some(principal) = previous.principal() {
            tracing::info!(principal = %principal, "session ended");
        }
    }

    /// Publishes an arbitrary snapshot (e.g. a token-only state).
    pub fn publish(&self, snapshot: SessionSnapshot) {
        self.tx.send_replace(snapshot);
    }

    /// Replaces the principal, keeping the token.
    ///
    /// Returns `false` and leaves the cell unchanged when no token is held.
    pub fn replace_principal(&self, principal: Principal) -> bool {
        let principal = Arc::new(principal);
        self.tx.send_if_modified(|snapshot| {
            if snapshot.token.is_none() {
                return false;
            }
            tracing::debug!(principal = %principal, "principal replaced");
            snapshot.principal = Some(Arc::clone(&principal));
            true
        })
    }

    /// Derives a new principal from the current one and publishes it.
    ///
    /// Returns `false` when there is no principal to update.
    pub fn update_principal(&self, f: impl FnOnce(&Principal) -> Principal) -> bool {
        self.tx.send_if_modified(|snapshot| match snapshot.principal.as_ref() {
            Some(current) => {
                let next = f(current);
                tracing::debug!(principal = %next, "principal updated");
                snapshot.principal = Some(Arc::new(next));
                true
            }
            None => false,
        })
    }
}

impl Default for SessionCell {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionSource for SessionCell {
    fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekeep_types::{PermissionCode, PrincipalId, Role};
    use std::thread;

    fn principal(name: &str) -> Principal {
        Principal::new(PrincipalId::named(name), name, Role::User)
    }

    #[test]
    fn starts_anonymous() {
        let cell = SessionCell::new();
        let snap = cell.snapshot();
        assert!(!snap.has_token());
        assert!(!snap.is_authenticated());
        assert!(cell.current_principal().is_none());
    }

    #[test]
    fn token_without_principal_is_not_authenticated() {
        let cell = SessionCell::with_snapshot(SessionSnapshot::token_only(SessionToken::generate()));
        assert!(cell.snapshot().has_token());
        assert!(!cell.is_authenticated());
    }

    #[test]
    fn sign_in_then_out() {
        let cell = SessionCell::new();
        let shared = cell.sign_in(SessionToken::new("t-1"), principal("henry"));
        assert_eq!(shared.username(), "henry");
        assert_eq!(
            cell.snapshot().token().map(SessionToken::as_str),
            Some("t-1")
        );

        cell.sign_out();
        assert!(!cell.snapshot().has_token());
    }

    #[test]
    fn replace_principal_requires_token() {
        let cell = SessionCell::new();
        assert!(!cell.replace_principal(principal("ivy")));
        assert!(cell.current_principal().is_none());

        cell.sign_in(SessionToken::generate(), principal("ivy"));
        let granted = principal("ivy").with_permission(PermissionCode::ORDER_VIEW);
        assert!(cell.replace_principal(granted));
        assert!(cell
            .current_principal()
            .is_some_and(|p| p.holds(&PermissionCode::ORDER_VIEW)));
    }

    #[test]
    fn update_principal_without_session_is_noop() {
        let cell = SessionCell::new();
        assert!(!cell.update_principal(|p| p.with_permission(PermissionCode::ORDER_VIEW)));
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = SessionToken::new("secret-value");
        assert_eq!(format!("{token:?}"), "SessionToken(***)");
        assert!(SessionToken::generate().as_str().starts_with("gk-"));
    }

    #[test]
    fn readers_never_see_mixed_state() {
        let cell = Arc::new(SessionCell::new());
        let viewer = principal("viewer").with_permissions([PermissionCode::ORDER_VIEW]);
        let editor = principal("editor")
            .with_permissions([PermissionCode::ORDER_VIEW, PermissionCode::ORDER_EDIT]);
        cell.sign_in(SessionToken::generate(), viewer.clone());

        let writer = {
            let cell = Arc::clone(&cell);
            thread::spawn(move || {
                for i in 0..500 {
                    let next = if i % 2 == 0 { editor.clone() } else { viewer.clone() };
                    cell.replace_principal(next);
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cell = Arc::clone(&cell);
                thread::spawn(move || {
                    for _ in 0..500 {
                        let p = cell.current_principal().expect("signed in");
                        let edits = p.holds(&PermissionCode::ORDER_EDIT);
                        assert_eq!(edits, p.username() == "editor");
                    }
                })
            })
            .collect();

        writer.join().expect("writer");
        for reader in readers {
            reader.join().expect("reader");
        }
    }

    #[tokio::test]
    async fn subscribers_are_notified() {
        let cell = SessionCell::new();
        let mut rx = cell.subscribe();

        cell.sign_in(SessionToken::generate(), principal("jack"));
        rx.changed().await.expect("sender alive");
        assert!(rx.borrow_and_update().is_authenticated());

        cell.sign_out();
        rx.changed().await.expect("sender alive");
        assert!(!rx.borrow_and_update().is_authenticated());
    }
}
