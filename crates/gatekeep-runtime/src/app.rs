//! Application wiring.
//!
//! [`GatekeepApp`] owns one [`SessionCell`] and hands the same
//! [`PermissionQuery`] to every enforcement point, so menu, guard and
//! element visibility always agree on who is signed in.
//!
//! ```text
//!                      GatekeepConfig
//!                            │
//!           ┌────────────────┼────────────────┐
//!           ▼                ▼                ▼
//!     MenuCatalog       RouteTable        accounts
//!           │                │                │
//!           ▼                ▼                ▼
//!     MenuComposer    NavigationGuard   SignInService
//!           │                │                │
//!           └──── PermissionQuery ◀── SessionCell ◀┘
//!                            │
//!                            ▼
//!                  VisibilityController
//! ```

use crate::config::{ConfigError, GatekeepConfig};
use crate::guard::{NavigationGuard, NavigationHooks, TracingHooks};
use crate::menu::MenuComposer;
use crate::signin::SignInService;
use crate::visibility::VisibilityController;
use gatekeep_auth::{DefaultPolicy, PermissionPolicy, PermissionQuery, SessionCell};
use std::sync::Arc;

/// Builder for [`GatekeepApp`].
///
/// # Example
///
/// ```
/// use gatekeep_runtime::app::GatekeepApp;
/// use gatekeep_runtime::config::GatekeepConfig;
/// use gatekeep_runtime::testing::RecordingHooks;
/// use std::sync::Arc;
///
/// let hooks = Arc::new(RecordingHooks::new());
/// let app = GatekeepApp::builder(GatekeepConfig::default())
///     .with_hooks(hooks.clone())
///     .build()?;
///
/// app.signin().login("admin", "123456").expect("admin account");
/// assert!(app.guard().check("/permission-management", None).is_allowed());
/// assert_eq!(app.menu().stats().visible_items, 13);
/// # Ok::<(), gatekeep_runtime::config::ConfigError>(())
/// ```
pub struct GatekeepAppBuilder {
    config: GatekeepConfig,
    hooks: Arc<dyn NavigationHooks>,
    policy: Arc<dyn PermissionPolicy>,
    cell: Option<Arc<SessionCell>>,
}

impl GatekeepAppBuilder {
    /// Creates a builder with tracing hooks and the default policy.
    #[must_use]
    pub fn new(config: GatekeepConfig) -> Self {
        Self {
            config,
            hooks: Arc::new(TracingHooks),
            policy: Arc::new(DefaultPolicy),
            cell: None,
        }
    }

    /// Sets the navigation side-effect sink.
    #[must_use]
    pub fn with_hooks(mut self, hooks: Arc<dyn NavigationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Replaces the evaluation policy.
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn PermissionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Shares an existing session cell instead of creating a new one.
    #[must_use]
    pub fn with_session(mut self, cell: Arc<SessionCell>) -> Self {
        self.cell = Some(cell);
        self
    }

    /// Validates the config and wires the enforcement points.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the menu catalog or route table is invalid.
    pub fn build(self) -> Result<GatekeepApp, ConfigError> {
        let catalog = self.config.menu_catalog()?;
        let routes = Arc::new(self.config.route_table()?);

        let cell = self.cell.unwrap_or_default();
        let query = PermissionQuery::new(cell.clone(), self.policy);

        let menu = MenuComposer::new(catalog, query.clone());
        let guard = NavigationGuard::new(routes, query.clone(), self.hooks)
            .with_app_title(self.config.app_title.clone());
        let visibility = VisibilityController::new(query.clone());
        let signin = SignInService::new(
            cell.clone(),
            self.config.accounts.clone(),
            self.config.signin.clone(),
        );

        tracing::debug!(
            menu_entries = menu.catalog().len(),
            routes = guard.routes().routes().len(),
            accounts = self.config.accounts.len(),
            "gatekeep app built"
        );

        Ok(GatekeepApp {
            config: self.config,
            cell,
            query,
            menu,
            guard,
            visibility,
            signin,
        })
    }
}

/// Wired set of enforcement points sharing one session.
#[derive(Debug)]
pub struct GatekeepApp {
    config: GatekeepConfig,
    cell: Arc<SessionCell>,
    query: PermissionQuery,
    menu: MenuComposer,
    guard: NavigationGuard,
    visibility: VisibilityController,
    signin: SignInService,
}

impl GatekeepApp {
    /// Starts a builder.
    #[must_use]
    pub fn builder(config: GatekeepConfig) -> GatekeepAppBuilder {
        GatekeepAppBuilder::new(config)
    }

    /// Returns the merged configuration.
    #[must_use]
    pub fn config(&self) -> &GatekeepConfig {
        &self.config
    }

    /// Returns the session cell.
    #[must_use]
    pub fn session(&self) -> &Arc<SessionCell> {
        &self.cell
    }

    /// Returns the query facade.
    #[must_use]
    pub fn query(&self) -> &PermissionQuery {
        &self.query
    }

    /// Returns the menu composer.
    #[must_use]
    pub fn menu(&self) -> &MenuComposer {
        &self.menu
    }

    /// Returns the navigation guard.
    #[must_use]
    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Returns the element visibility controller.
    #[must_use]
    pub fn visibility(&self) -> &VisibilityController {
        &self.visibility
    }

    /// Returns the sign-in service.
    #[must_use]
    pub fn signin(&self) -> &SignInService {
        &self.signin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::{LogicalRoute, ACCESS_DENIED_MESSAGE};
    use crate::testing::RecordingHooks;
    use crate::visibility::{ElementBinding, ElementState, Presentation};
    use gatekeep_types::PermissionCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{self, Layer, SubscriberExt};

    fn app(guest_fallback: bool) -> (GatekeepApp, Arc<RecordingHooks>) {
        let mut config = GatekeepConfig::default();
        config.signin.guest_fallback = guest_fallback;
        let hooks = Arc::new(RecordingHooks::new());
        let app = GatekeepApp::builder(config)
            .with_hooks(hooks.clone())
            .build()
            .expect("built-in config");
        (app, hooks)
    }

    #[test]
    fn guest_session_end_to_end() {
        let (app, hooks) = app(true);

        assert!(app.menu().visible_entries().is_empty());
        assert_eq!(
            app.guard().check("/orders", None).redirect_target(),
            Some(LogicalRoute::Login)
        );

        app.signin().login("zoe", "pw").expect("guest");

        let ids: Vec<String> = app.menu().visible_entries().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["products".to_string(), "orders".to_string()]);
        assert!(app.guard().check("/orders", None).is_allowed());

        let denied = app.guard().check("/user-center", Some("/orders"));
        assert_eq!(denied.redirect_target(), Some(LogicalRoute::Forbidden));
        assert_eq!(hooks.notices(), vec![ACCESS_DENIED_MESSAGE.to_string()]);
    }

    #[test]
    fn grant_reaches_every_consumer() {
        let (app, _hooks) = app(true);
        app.signin().login("zoe", "pw").expect("guest");

        let binding = ElementBinding::hide(PermissionCode::USER_VIEW);
        let mut el = ElementState::new();
        assert_eq!(
            app.visibility().on_attach(&mut el, &binding),
            Presentation::Hidden
        );
        assert!(!app.menu().is_path_visible("/user-center"));

        app.session()
            .update_principal(|p| p.with_permission(PermissionCode::USER_VIEW));

        assert!(app.menu().is_path_visible("/user-center"));
        assert!(app.guard().check("/user-center", None).is_allowed());
        assert_eq!(
            app.visibility().on_update(&mut el, &binding),
            Presentation::Visible
        );
    }

    /// Counts events at `warn` or above.
    #[derive(Clone, Default)]
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: layer::Context<'_, S>) {
            if *event.metadata().level() <= Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn routine_filtering_stays_below_warn() {
        let counter = WarnCounter::default();
        let subscriber = tracing_subscriber::registry().with(counter.clone());
        let mut config = GatekeepConfig::default();
        config.signin.guest_fallback = true;
        let app = GatekeepApp::builder(config).build().expect("built-in config");

        tracing::subscriber::with_default(subscriber, || {
            let view = app.menu().view();
            assert_eq!(view.stats.hidden_items, 13);

            let mut el = ElementState::new();
            let binding = ElementBinding::hide(PermissionCode::USER_EDIT);
            app.visibility().on_attach(&mut el, &binding);

            app.signin().login("zoe", "pw").expect("guest");
            assert_eq!(app.menu().view().stats.hidden_items, 11);
            app.visibility().on_update(&mut el, &binding);
            assert_eq!(counter.0.load(Ordering::SeqCst), 0);

            // A blocked navigation is still reported, once.
            let verdict = app.guard().check("/user-center", None);
            assert_eq!(verdict.redirect_target(), Some(LogicalRoute::Forbidden));
            assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        });
    }

    #[test]
    fn shared_session_cell() {
        let cell = Arc::new(SessionCell::new());
        let app = GatekeepApp::builder(GatekeepConfig::default())
            .with_session(cell.clone())
            .build()
            .expect("build");
        assert!(Arc::ptr_eq(app.session(), &cell));
    }

    #[test]
    fn invalid_navigation_fails_build() {
        let mut config = GatekeepConfig::default();
        config.navigation.login_route = "SignIn".into();
        assert!(matches!(
            GatekeepApp::builder(config).build(),
            Err(ConfigError::Route(_))
        ));
    }
}
