//! Principal-filtered menu views.

use super::{MenuCatalog, MenuEntry};
use gatekeep_auth::{PermissionQuery, RequiredPermission, SessionSnapshot};
use gatekeep_types::{PermissionCode, Principal};
use tokio::sync::watch;

/// Read-only counts derived from one evaluation of the catalog.
///
/// `hidden_items == total_items - visible_items` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuStats {
    pub total_items: usize,
    pub visible_items: usize,
    pub hidden_items: usize,
    pub admin_access: bool,
}

impl std::fmt::Display for MenuStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} visible, {} hidden{}",
            self.visible_items,
            self.total_items,
            self.hidden_items,
            if self.admin_access { " (admin)" } else { "" }
        )
    }
}

/// Visible entries and stats computed from the same principal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuView {
    pub entries: Vec<MenuEntry>,
    pub stats: MenuStats,
}

/// Filters the catalog down to what the current principal may see.
///
/// Nothing is cached: every call reads the session, so the result always
/// reflects the latest sign-in, sign-out or grant. Use
/// [`subscribe`](Self::subscribe) to be told when to re-read.
///
/// # Example
///
/// ```
/// use gatekeep_auth::{PermissionQuery, SessionCell, SessionToken};
/// use gatekeep_runtime::menu::{MenuCatalog, MenuComposer, MenuEntry};
/// use gatekeep_types::{PermissionCode, Principal, PrincipalId, Role};
/// use std::sync::Arc;
///
/// let catalog = MenuCatalog::try_new(vec![
///     MenuEntry::new("orders", "Orders", "/orders").requires([PermissionCode::ORDER_VIEW]),
///     MenuEntry::new("users", "Users", "/users").requires([PermissionCode::USER_VIEW]),
/// ])?;
///
/// let cell = Arc::new(SessionCell::new());
/// let composer = MenuComposer::new(catalog, PermissionQuery::with_default_policy(cell.clone()));
///
/// let clerk = Principal::new(PrincipalId::named("clerk"), "clerk", Role::User)
///     .with_permissions([PermissionCode::ORDER_VIEW]);
/// cell.sign_in(SessionToken::generate(), clerk);
///
/// let visible: Vec<_> = composer.visible_entries().into_iter().map(|e| e.id).collect();
/// assert_eq!(visible, ["orders"]);
/// assert!(!composer.is_path_visible("/users"));
/// # Ok::<(), gatekeep_runtime::menu::CatalogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MenuComposer {
    catalog: MenuCatalog,
    query: PermissionQuery,
}

impl MenuComposer {
    /// Creates a composer over `catalog`.
    #[must_use]
    pub fn new(catalog: MenuCatalog, query: PermissionQuery) -> Self {
        Self { catalog, query }
    }

    /// Returns the unfiltered catalog.
    #[must_use]
    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    /// Returns the visible entries and stats from one session read.
    #[must_use]
    pub fn view(&self) -> MenuView {
        let principal = self.query.principal();
        let entries: Vec<MenuEntry> = self
            .visible_for(principal.as_deref())
            .cloned()
            .collect();
        let total_items = self.catalog.len();
        let visible_items = entries.len();
        let stats = MenuStats {
            total_items,
            visible_items,
            hidden_items: total_items - visible_items,
            admin_access: principal.is_some_and(|p| p.is_admin()),
        };
        tracing::trace!(%stats, "menu composed");
        MenuView { entries, stats }
    }

    /// Returns the visible entries in catalog order.
    #[must_use]
    pub fn visible_entries(&self) -> Vec<MenuEntry> {
        self.view().entries
    }

    /// Returns the derived counts.
    #[must_use]
    pub fn stats(&self) -> MenuStats {
        self.view().stats
    }

    /// Returns `true` if the entry with exactly `path` exists and is visible.
    ///
    /// Unknown paths are not visible.
    #[must_use]
    pub fn is_path_visible(&self, path: &str) -> bool {
        self.catalog
            .find_by_path(path)
            .is_some_and(|entry| self.query.check(&entry.required))
    }

    /// Returns the visible entries whose requirement includes `code`.
    #[must_use]
    pub fn entries_for_permission(&self, code: &PermissionCode) -> Vec<MenuEntry> {
        let principal = self.query.principal();
        self.visible_for(principal.as_deref())
            .filter(|entry| entry.required.contains(code))
            .cloned()
            .collect()
    }

    /// Evaluates an arbitrary requirement against the current principal.
    #[must_use]
    pub fn has_permission(&self, required: &RequiredPermission) -> bool {
        self.query.check(required)
    }

    /// Returns `true` if the current principal is admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.query.is_admin()
    }

    /// Returns a handle that yields a fresh view after every session change.
    #[must_use]
    pub fn subscribe(&self) -> MenuSubscription {
        MenuSubscription {
            rx: self.query.session().subscribe(),
            composer: self.clone(),
        }
    }

    fn visible_for<'a>(
        &'a self,
        principal: Option<&'a Principal>,
    ) -> impl Iterator<Item = &'a MenuEntry> + 'a {
        let policy = self.query.policy();
        self.catalog
            .entries()
            .iter()
            .filter(move |entry| policy.evaluate(principal, &entry.required))
    }
}

/// Change-driven menu view.
///
/// # Example
///
/// ```
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// use gatekeep_auth::{PermissionQuery, SessionCell, SessionToken};
/// use gatekeep_runtime::menu::{MenuCatalog, MenuComposer, MenuEntry};
/// use gatekeep_types::{Principal, PrincipalId, Role};
/// use std::sync::Arc;
///
/// let catalog = MenuCatalog::try_new(vec![MenuEntry::new("home", "Home", "/")]).unwrap();
/// let cell = Arc::new(SessionCell::new());
/// let composer = MenuComposer::new(catalog, PermissionQuery::with_default_policy(cell.clone()));
///
/// let mut sub = composer.subscribe();
/// assert_eq!(sub.current().stats.visible_items, 0);
///
/// cell.sign_in(SessionToken::generate(), Principal::new(PrincipalId::named("a"), "a", Role::User));
/// let view = sub.changed().await.unwrap();
/// assert_eq!(view.stats.visible_items, 1);
/// # });
/// ```
#[derive(Debug)]
pub struct MenuSubscription {
    rx: watch::Receiver<SessionSnapshot>,
    composer: MenuComposer,
}

impl MenuSubscription {
    /// Returns the view for the latest session and marks it seen.
    pub fn current(&mut self) -> MenuView {
        let _ = self.rx.borrow_and_update();
        self.composer.view()
    }

    /// Returns `true` if the session changed since the last read.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Waits for the next session change and returns the recomputed view.
    ///
    /// Returns `None` if the session source stopped publishing.
    pub async fn changed(&mut self) -> Option<MenuView> {
        self.rx.changed().await.ok()?;
        Some(self.current())
    }
}
