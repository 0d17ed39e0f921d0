//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values. The
//! list sections default to the built-in catalog, routes and accounts from
//! [`crate::defaults`].

use crate::defaults;
use crate::guard::{RouteDef, RouteError, RouteTable};
use crate::menu::{CatalogError, MenuCatalog, MenuEntry};
use crate::signin::Account;
use gatekeep_types::PermissionCode;
use serde::{Deserialize, Serialize};

/// Default application title appended to page titles.
pub const DEFAULT_APP_TITLE: &str = "Commerce Admin";

/// Main configuration structure.
///
/// This is the unified configuration after merging all layers.
///
/// # Example
///
/// ```
/// use gatekeep_runtime::config::GatekeepConfig;
///
/// let config = GatekeepConfig::from_toml(
///     r#"
/// app_title = "Back Office"
///
/// [signin]
/// guest_fallback = true
/// "#,
/// )?;
/// assert_eq!(config.app_title, "Back Office");
/// assert!(config.signin.guest_fallback);
/// assert_eq!(config.menu.len(), 13);
/// # Ok::<(), toml::de::Error>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GatekeepConfig {
    /// Application title, rendered after the route title.
    pub app_title: String,

    /// Logical redirect targets.
    pub navigation: NavigationConfig,

    /// Sign-in behavior.
    pub signin: SignInConfig,

    /// Menu catalog, in display order.
    pub menu: Vec<MenuEntry>,

    /// Route table.
    pub routes: Vec<RouteDef>,

    /// Credential directory.
    pub accounts: Vec<Account>,
}

impl Default for GatekeepConfig {
    fn default() -> Self {
        Self {
            app_title: DEFAULT_APP_TITLE.into(),
            navigation: NavigationConfig::default(),
            signin: SignInConfig::default(),
            menu: defaults::menu_entries(),
            routes: defaults::routes(),
            accounts: defaults::accounts(),
        }
    }
}

impl GatekeepConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Builds the validated menu catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the menu section is inconsistent.
    pub fn menu_catalog(&self) -> Result<MenuCatalog, CatalogError> {
        MenuCatalog::try_new(self.menu.clone())
    }

    /// Builds the validated route table.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] if the routes conflict or a navigation
    /// target is missing.
    pub fn route_table(&self) -> Result<RouteTable, RouteError> {
        RouteTable::try_new(self.routes.clone(), &self.navigation)
    }

    /// Merges another config into this one.
    ///
    /// Scalars override only when `other` differs from the default. A list
    /// section overrides wholesale when it is non-empty and differs from
    /// the built-in list.
    pub fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.app_title != default.app_title {
            self.app_title = other.app_title.clone();
        }

        self.navigation.merge(&other.navigation);
        self.signin.merge(&other.signin);

        merge_list(&mut self.menu, &other.menu, &default.menu);
        merge_list(&mut self.routes, &other.routes, &default.routes);
        merge_list(&mut self.accounts, &other.accounts, &default.accounts);
    }
}

fn merge_list<T: Clone + PartialEq>(target: &mut Vec<T>, other: &[T], default: &[T]) {
    if !other.is_empty() && other != default {
        *target = other.to_vec();
    }
}

/// Names of the routes the guard redirects to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NavigationConfig {
    /// Route name for sign-in redirects.
    pub login_route: String,

    /// Route name for permission-denied redirects.
    pub forbidden_route: String,

    /// Route name used when the login route is entered while signed in.
    pub home_route: String,

    /// Query parameter carrying the resume location on login redirects.
    pub resume_param: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            login_route: "Login".into(),
            forbidden_route: "Forbidden".into(),
            home_route: "Home".into(),
            resume_param: "redirect".into(),
        }
    }
}

impl NavigationConfig {
    fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.login_route != default.login_route {
            self.login_route = other.login_route.clone();
        }
        if other.forbidden_route != default.forbidden_route {
            self.forbidden_route = other.forbidden_route.clone();
        }
        if other.home_route != default.home_route {
            self.home_route = other.home_route.clone();
        }
        if other.resume_param != default.resume_param {
            self.resume_param = other.resume_param.clone();
        }
    }
}

/// Sign-in configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SignInConfig {
    /// Sign in unknown usernames as ordinary users instead of rejecting them.
    pub guest_fallback: bool,

    /// Codes granted to fallback principals.
    pub guest_permissions: Vec<PermissionCode>,
}

impl Default for SignInConfig {
    fn default() -> Self {
        Self {
            guest_fallback: false,
            guest_permissions: vec![PermissionCode::PRODUCT_VIEW, PermissionCode::ORDER_VIEW],
        }
    }
}

impl SignInConfig {
    fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.guest_fallback != default.guest_fallback {
            self.guest_fallback = other.guest_fallback;
        }
        merge_list(
            &mut self.guest_permissions,
            &other.guest_permissions,
            &default.guest_permissions,
        );
    }
}
