//! The per-navigation checklist.

use super::{
    LogicalRoute, NavigationHooks, RouteLocation, RouteMeta, RouteTable, ACCESS_DENIED_MESSAGE,
};
use gatekeep_auth::PermissionQuery;
use std::sync::Arc;

/// Checklist stage at which the guard reached its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardStage {
    /// Target is the configured login route.
    LoginRoute,
    /// Target does not require sign-in.
    AuthRequirement,
    /// No session token is present.
    SessionPresence,
    /// A token is present but no principal.
    PrincipalPresence,
    /// The principal is an admin.
    AdminBypass,
    /// The route's required permissions were evaluated.
    Permission,
}

impl GuardStage {
    /// Returns a snake_case label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoginRoute => "login_route",
            Self::AuthRequirement => "auth_requirement",
            Self::SessionPresence => "session_presence",
            Self::PrincipalPresence => "principal_presence",
            Self::AdminBypass => "admin_bypass",
            Self::Permission => "permission",
        }
    }
}

impl std::fmt::Display for GuardStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the router should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Proceed to the requested location.
    Allow,
    /// Go to a logical route instead, optionally carrying where to resume.
    Redirect {
        /// Where to go instead.
        to: LogicalRoute,
        /// Original location to return to after sign-in.
        resume: Option<String>,
    },
}

/// The guard's answer for one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardVerdict {
    /// Allow or redirect.
    pub outcome: NavigationOutcome,
    /// Stage that produced the outcome.
    pub stage: GuardStage,
    /// Requested location (normalized path plus query).
    pub target: String,
    /// Name of the matched route, if any.
    pub route: Option<String>,
    /// Page title passed to the hooks, if the route has one.
    pub title: Option<String>,
    /// Rendered redirect location, for redirects.
    pub location: Option<String>,
}

impl GuardVerdict {
    /// Returns `true` if navigation may proceed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self.outcome, NavigationOutcome::Allow)
    }

    /// Returns the redirect target, if redirected.
    #[must_use]
    pub fn redirect_target(&self) -> Option<LogicalRoute> {
        match self.outcome {
            NavigationOutcome::Allow => None,
            NavigationOutcome::Redirect { to, .. } => Some(to),
        }
    }

    /// Returns the resume location carried by a redirect.
    #[must_use]
    pub fn resume(&self) -> Option<&str> {
        match &self.outcome {
            NavigationOutcome::Redirect { resume, .. } => resume.as_deref(),
            NavigationOutcome::Allow => None,
        }
    }
}

/// Decides every route transition before it happens.
///
/// # Checklist
///
/// ```text
/// to ──► [title] ──► login route? ── yes ─► authenticated? ─ yes ─► redirect home
///                         │                      └────── no ──────► allow
///                         no
///                         ▼
///                  requires auth? ──── no ─────────────────────────► allow
///                         │ yes
///                         ▼
///                   token present? ─── no ───► redirect login (+resume)
///                         │ yes
///                         ▼
///                principal present? ── no ───► redirect login (+resume)
///                         │ yes
///                         ▼
///                       admin? ─────── yes ──────────────────────────► allow
///                         │ no
///                         ▼
///                  permission held? ── no ───► notify + redirect forbidden
///                         │ yes
///                         ▼
///                       allow
/// ```
///
/// The guard keeps no state between calls. The session is read once per
/// call so the whole checklist sees one consistent snapshot.
///
/// # Example
///
/// ```
/// use gatekeep_auth::{PermissionQuery, SessionCell};
/// use gatekeep_runtime::config::NavigationConfig;
/// use gatekeep_runtime::defaults;
/// use gatekeep_runtime::guard::{LogicalRoute, NavigationGuard, RouteTable, TracingHooks};
/// use std::sync::Arc;
///
/// let routes = RouteTable::try_new(defaults::routes(), &NavigationConfig::default())?;
/// let cell = Arc::new(SessionCell::new());
/// let guard = NavigationGuard::new(
///     Arc::new(routes),
///     PermissionQuery::with_default_policy(cell),
///     Arc::new(TracingHooks),
/// );
///
/// let verdict = guard.check("/orders", None);
/// assert_eq!(verdict.redirect_target(), Some(LogicalRoute::Login));
/// assert_eq!(verdict.location.as_deref(), Some("/login?redirect=%2Forders"));
/// # Ok::<(), gatekeep_runtime::guard::RouteError>(())
/// ```
#[derive(Clone)]
pub struct NavigationGuard {
    routes: Arc<RouteTable>,
    query: PermissionQuery,
    hooks: Arc<dyn NavigationHooks>,
    app_title: Option<String>,
}

impl NavigationGuard {
    /// Creates a guard.
    #[must_use]
    pub fn new(
        routes: Arc<RouteTable>,
        query: PermissionQuery,
        hooks: Arc<dyn NavigationHooks>,
    ) -> Self {
        Self {
            routes,
            query,
            hooks,
            app_title: None,
        }
    }

    /// Appends `" - {title}"` to every page title.
    #[must_use]
    pub fn with_app_title(mut self, title: impl Into<String>) -> Self {
        self.app_title = Some(title.into());
        self
    }

    /// Returns the route table.
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Runs the checklist for a transition from `from` to `to`.
    pub fn check(&self, to: &str, from: Option<&str>) -> GuardVerdict {
        let target = RouteLocation::parse(to);
        let route = self.routes.resolve(target.path());
        let unresolved = RouteMeta::default();
        let meta = route.map_or(&unresolved, |r| &r.meta);

        tracing::trace!(
            to = %target,
            from = from.unwrap_or("-"),
            route = route.map(|r| r.name.as_str()),
            "navigation check"
        );

        let verdict = Verdict {
            target: target.full_path(),
            route: route.map(|r| r.name.clone()),
            title: meta.title.as_deref().map(|t| self.page_title(t)),
        };

        // 1. title
        if let Some(title) = &verdict.title {
            self.hooks.set_page_title(title);
        }

        let session = self.query.snapshot();

        // 2. login route
        if route.is_some_and(|r| self.routes.is_login(r)) {
            return if session.is_authenticated() {
                self.redirect(verdict, GuardStage::LoginRoute, LogicalRoute::Home, None)
            } else {
                verdict.allow(GuardStage::LoginRoute)
            };
        }

        // 3. public route
        if !meta.requires_auth {
            return verdict.allow(GuardStage::AuthRequirement);
        }

        // 4. no session
        if !session.has_token() {
            let resume = Some(verdict.target.clone());
            return self.redirect(verdict, GuardStage::SessionPresence, LogicalRoute::Login, resume);
        }

        // 5. token without principal
        let Some(principal) = session.principal() else {
            let resume = Some(verdict.target.clone());
            return self.redirect(
                verdict,
                GuardStage::PrincipalPresence,
                LogicalRoute::Login,
                resume,
            );
        };

        // 6. admin
        if principal.is_admin() {
            return verdict.allow(GuardStage::AdminBypass);
        }

        // 7. permission
        let decision = self.query.policy().decide(Some(principal.as_ref()), &meta.required);
        if decision.is_allowed() {
            verdict.allow(GuardStage::Permission)
        } else {
            self.hooks.notify_denied(ACCESS_DENIED_MESSAGE);
            self.redirect(verdict, GuardStage::Permission, LogicalRoute::Forbidden, None)
        }
    }

    fn page_title(&self, route_title: &str) -> String {
        match &self.app_title {
            Some(app) => format!("{route_title} - {app}"),
            None => route_title.to_string(),
        }
    }

    fn redirect(
        &self,
        verdict: Verdict,
        stage: GuardStage,
        to: LogicalRoute,
        resume: Option<String>,
    ) -> GuardVerdict {
        let location = self.routes.location(to, resume.as_deref());
        tracing::debug!(
            to = %verdict.target,
            stage = %stage,
            location = %location,
            "navigation redirected"
        );
        GuardVerdict {
            outcome: NavigationOutcome::Redirect { to, resume },
            stage,
            target: verdict.target,
            route: verdict.route,
            title: verdict.title,
            location: Some(location),
        }
    }
}

impl std::fmt::Debug for NavigationGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationGuard")
            .field("routes", &self.routes.routes().len())
            .field("app_title", &self.app_title)
            .finish_non_exhaustive()
    }
}

/// Fields shared by every verdict of one check.
struct Verdict {
    target: String,
    route: Option<String>,
    title: Option<String>,
}

impl Verdict {
    fn allow(self, stage: GuardStage) -> GuardVerdict {
        tracing::debug!(to = %self.target, stage = %stage, "navigation allowed");
        GuardVerdict {
            outcome: NavigationOutcome::Allow,
            stage,
            target: self.target,
            route: self.route,
            title: self.title,
            location: None,
        }
    }
}
