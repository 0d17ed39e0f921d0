//! Route definitions and resolution.

use crate::config::NavigationConfig;
use gatekeep_auth::RequiredPermission;
use gatekeep_types::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

fn default_requires_auth() -> bool {
    true
}

/// Access metadata attached to a route.
///
/// The default (used for paths no route matches) requires authentication
/// and no permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    /// Whether a signed-in principal is required at all.
    #[serde(default = "default_requires_auth")]
    pub requires_auth: bool,
    /// Codes the principal must hold (checked only when `requires_auth`).
    #[serde(default, skip_serializing_if = "RequiredPermission::is_none")]
    pub required: RequiredPermission,
    /// Page title shown while the route is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Default for RouteMeta {
    fn default() -> Self {
        Self::protected()
    }
}

impl RouteMeta {
    /// Reachable without signing in.
    #[must_use]
    pub fn public() -> Self {
        Self {
            requires_auth: false,
            required: RequiredPermission::None,
            title: None,
        }
    }

    /// Requires a signed-in principal.
    #[must_use]
    pub fn protected() -> Self {
        Self {
            requires_auth: true,
            required: RequiredPermission::None,
            title: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the required permission.
    #[must_use]
    pub fn requires(mut self, required: impl Into<RequiredPermission>) -> Self {
        self.required = required.into();
        self
    }
}

/// A named, navigable route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDef {
    /// Logical name, unique within a table.
    pub name: String,
    /// Path pattern matched exactly (trailing slash ignored).
    pub path: String,
    #[serde(flatten)]
    pub meta: RouteMeta,
}

impl RouteDef {
    /// Creates a route.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>, meta: RouteMeta) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            meta,
        }
    }
}

/// Redirect targets, named rather than spelled as paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalRoute {
    /// The sign-in page.
    Login,
    /// The access denied page.
    Forbidden,
    /// The landing page for signed-in users.
    Home,
}

impl LogicalRoute {
    /// Returns the lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Forbidden => "forbidden",
            Self::Home => "home",
        }
    }
}

impl std::fmt::Display for LogicalRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested location split into path and query.
///
/// # Example
///
/// ```
/// use gatekeep_runtime::guard::RouteLocation;
///
/// let loc = RouteLocation::parse("/orders/?status=open#top");
/// assert_eq!(loc.path(), "/orders");
/// assert_eq!(loc.query_param("status").as_deref(), Some("open"));
/// assert_eq!(loc.full_path(), "/orders?status=open");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLocation {
    path: String,
    query: Option<String>,
}

impl RouteLocation {
    /// Parses `raw`, dropping any fragment and normalizing the path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let without_fragment = raw.split_once('#').map_or(raw, |(head, _)| head);
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (without_fragment, None),
        };
        Self {
            path: normalize_path(path),
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
        }
    }

    /// Returns the normalized path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the path with its query string.
    #[must_use]
    pub fn full_path(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{query}", self.path),
            None => self.path.clone(),
        }
    }

    /// Returns the first percent-decoded value for `name`.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query.as_deref()?.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key == name).then(|| {
                urlencoding::decode(value)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| value.to_string())
            })
        })
    }
}

impl std::fmt::Display for RouteLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_path())
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Route table validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Two routes share a name.
    #[error("duplicate route name '{name}'")]
    DuplicateName { name: String },

    /// Two routes share a path.
    #[error("duplicate route path '{path}'")]
    DuplicatePath { path: String },

    /// A logical redirect target names no route.
    #[error("{role} route '{name}' is not defined")]
    UnknownTarget { role: LogicalRoute, name: String },
}

impl ErrorCode for RouteError {
    fn code(&self) -> &'static str {
        match self {
            Self::DuplicateName { .. } => "ROUTE_DUPLICATE_NAME",
            Self::DuplicatePath { .. } => "ROUTE_DUPLICATE_PATH",
            Self::UnknownTarget { .. } => "ROUTE_UNKNOWN_TARGET",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Validated set of routes plus the logical redirect targets.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
    login: usize,
    forbidden: usize,
    home: usize,
    resume_param: String,
}

impl RouteTable {
    /// Validates `routes` against the logical names in `nav`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] on a duplicate name or path, or when the
    /// login, forbidden or home name matches no route.
    pub fn try_new(routes: Vec<RouteDef>, nav: &NavigationConfig) -> Result<Self, RouteError> {
        let mut routes = routes;
        for route in &mut routes {
            route.path = normalize_path(&route.path);
        }

        for (i, route) in routes.iter().enumerate() {
            for earlier in &routes[..i] {
                if earlier.name == route.name {
                    return Err(RouteError::DuplicateName {
                        name: route.name.clone(),
                    });
                }
                if earlier.path == route.path {
                    return Err(RouteError::DuplicatePath {
                        path: route.path.clone(),
                    });
                }
            }
        }

        let index_of = |role: LogicalRoute, name: &str| {
            routes
                .iter()
                .position(|r| r.name == name)
                .ok_or_else(|| RouteError::UnknownTarget {
                    role,
                    name: name.to_string(),
                })
        };
        let login = index_of(LogicalRoute::Login, &nav.login_route)?;
        let forbidden = index_of(LogicalRoute::Forbidden, &nav.forbidden_route)?;
        let home = index_of(LogicalRoute::Home, &nav.home_route)?;

        Ok(Self {
            routes,
            login,
            forbidden,
            home,
            resume_param: nav.resume_param.clone(),
        })
    }

    /// Returns all routes in definition order.
    #[must_use]
    pub fn routes(&self) -> &[RouteDef] {
        &self.routes
    }

    /// Finds the route whose path equals the normalized `path`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&RouteDef> {
        let path = normalize_path(path);
        self.routes.iter().find(|r| r.path == path)
    }

    /// Finds a route by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&RouteDef> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Returns the route behind a logical target.
    #[must_use]
    pub fn logical(&self, target: LogicalRoute) -> &RouteDef {
        let index = match target {
            LogicalRoute::Login => self.login,
            LogicalRoute::Forbidden => self.forbidden,
            LogicalRoute::Home => self.home,
        };
        &self.routes[index]
    }

    /// Returns `true` if `route` is the login route.
    #[must_use]
    pub fn is_login(&self, route: &RouteDef) -> bool {
        route.name == self.routes[self.login].name
    }

    /// Returns the query parameter that carries the resume location.
    #[must_use]
    pub fn resume_param(&self) -> &str {
        &self.resume_param
    }

    /// Renders a redirect location, e.g. `/login?redirect=%2Forders`.
    #[must_use]
    pub fn location(&self, target: LogicalRoute, resume: Option<&str>) -> String {
        let path = &self.logical(target).path;
        match resume {
            Some(resume) => format!(
                "{path}?{}={}",
                self.resume_param,
                urlencoding::encode(resume)
            ),
            None => path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekeep_types::{assert_error_codes, PermissionCode};

    fn nav() -> NavigationConfig {
        NavigationConfig::default()
    }

    fn table() -> RouteTable {
        RouteTable::try_new(
            vec![
                RouteDef::new("Login", "/login", RouteMeta::public().with_title("Sign in")),
                RouteDef::new("Forbidden", "/403", RouteMeta::public()),
                RouteDef::new("Home", "/", RouteMeta::protected()),
                RouteDef::new(
                    "OrderList",
                    "/orders/",
                    RouteMeta::protected().requires(PermissionCode::ORDER_VIEW),
                ),
            ],
            &nav(),
        )
        .expect("valid table")
    }

    #[test]
    fn resolve_ignores_trailing_slash() {
        let table = table();
        assert_eq!(table.resolve("/orders").map(|r| r.name.as_str()), Some("OrderList"));
        assert_eq!(table.resolve("/orders/").map(|r| r.name.as_str()), Some("OrderList"));
        assert_eq!(table.resolve("").map(|r| r.name.as_str()), Some("Home"));
        assert!(table.resolve("/nope").is_none());
    }

    #[test]
    fn logical_targets() {
        let table = table();
        assert_eq!(table.logical(LogicalRoute::Login).path, "/login");
        assert_eq!(table.logical(LogicalRoute::Forbidden).path, "/403");
        assert_eq!(table.logical(LogicalRoute::Home).path, "/");
        assert!(table.is_login(table.logical(LogicalRoute::Login)));
    }

    #[test]
    fn location_encodes_resume() {
        let table = table();
        assert_eq!(
            table.location(LogicalRoute::Login, Some("/orders?page=2")),
            "/login?redirect=%2Forders%3Fpage%3D2"
        );
        assert_eq!(table.location(LogicalRoute::Forbidden, None), "/403");
    }

    #[test]
    fn rejects_duplicates_and_unknown_targets() {
        let dup = RouteTable::try_new(
            vec![
                RouteDef::new("Login", "/login", RouteMeta::public()),
                RouteDef::new("Login", "/signin", RouteMeta::public()),
            ],
            &nav(),
        );
        assert!(matches!(dup, Err(RouteError::DuplicateName { .. })));

        let same_path = RouteTable::try_new(
            vec![
                RouteDef::new("A", "/a", RouteMeta::public()),
                RouteDef::new("B", "/a/", RouteMeta::public()),
            ],
            &nav(),
        );
        assert!(matches!(same_path, Err(RouteError::DuplicatePath { path }) if path == "/a"));

        let missing = RouteTable::try_new(
            vec![RouteDef::new("Login", "/login", RouteMeta::public())],
            &nav(),
        )
        .expect_err("no forbidden route");
        assert_eq!(missing.to_string(), "forbidden route 'Forbidden' is not defined");
    }

    #[test]
    fn location_parse() {
        let loc = RouteLocation::parse("orders?redirect=%2Fa%2Fb&x");
        assert_eq!(loc.path(), "/orders");
        assert_eq!(loc.query_param("redirect").as_deref(), Some("/a/b"));
        assert_eq!(loc.query_param("x").as_deref(), Some(""));
        assert_eq!(loc.query_param("y"), None);

        let bare = RouteLocation::parse("/?");
        assert_eq!(bare.full_path(), "/");
    }

    #[test]
    fn meta_default_requires_auth() {
        let meta = RouteMeta::default();
        assert!(meta.requires_auth);
        assert!(meta.required.is_none());
        assert!(meta.title.is_none());
    }

    #[test]
    fn route_def_from_toml() {
        #[derive(Deserialize)]
        struct File {
            route: Vec<RouteDef>,
        }

        let file: File = toml::from_str(
            r#"
[[route]]
name = "About"
path = "/about"
requires_auth = false

[[route]]
name = "OrderEdit"
path = "/orders/edit"
title = "Edit order"
required = ["order_view", "order_edit"]
"#,
        )
        .expect("parse");

        assert!(!file.route[0].meta.requires_auth);
        assert!(file.route[1].meta.requires_auth);
        assert_eq!(file.route[1].meta.required.codes().len(), 2);
        assert_eq!(file.route[1].meta.title.as_deref(), Some("Edit order"));
    }

    #[test]
    fn error_codes() {
        assert_error_codes(
            &[
                RouteError::DuplicateName { name: "a".into() },
                RouteError::DuplicatePath { path: "/".into() },
                RouteError::UnknownTarget {
                    role: LogicalRoute::Home,
                    name: "Home".into(),
                },
            ],
            "ROUTE_",
        );
    }
}
