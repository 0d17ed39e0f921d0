//! Navigation guard.
//!
//! Every route transition is checked by [`NavigationGuard::check`] before
//! it completes. Authentication state is checked first, then a single
//! policy evaluation against the target route's [`RouteMeta`].
//!
//! Redirect targets are [`LogicalRoute`]s (`login`, `forbidden`, `home`);
//! the [`RouteTable`] maps them to concrete paths so the checklist does
//! not depend on the URL scheme.

mod hooks;
mod navigation;
mod route;

pub use hooks::{NavigationHooks, TracingHooks, ACCESS_DENIED_MESSAGE};
pub use navigation::{GuardStage, GuardVerdict, NavigationGuard, NavigationOutcome};
pub use route::{LogicalRoute, RouteDef, RouteError, RouteLocation, RouteMeta, RouteTable};
