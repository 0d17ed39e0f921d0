//! Gatekeep Runtime - enforcement points over a shared session.
//!
//! This crate turns the decisions of `gatekeep-auth` into UI behavior:
//! which menu entries exist, whether a navigation completes, and whether
//! an element is shown.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  gatekeep-types : PermissionCode, Role, Principal, ErrorCode │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │  gatekeep-auth  : Evaluator, Query Facade, SessionCell       │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Runtime Layer (THIS CRATE)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  menu/       : MenuCatalog, MenuComposer                     │
//! │  guard/      : RouteTable, NavigationGuard                   │
//! │  visibility/ : VisibilityController, UiElement               │
//! │  signin      : SignInService                                 │
//! │  config/     : GatekeepConfig, ConfigLoader                  │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │  gatekeep-cli   : `gatekeep` binary                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! ## [`menu`] - Menu Composer
//!
//! - [`MenuCatalog`](menu::MenuCatalog): validated static entries
//! - [`MenuComposer`](menu::MenuComposer): principal-filtered view and stats
//!
//! ## [`guard`] - Navigation Guard
//!
//! - [`RouteTable`](guard::RouteTable): routes and logical redirect targets
//! - [`NavigationGuard`](guard::NavigationGuard): the pre-transition checklist
//!
//! ## [`visibility`] - Element Visibility Controller
//!
//! - [`VisibilityController`](visibility::VisibilityController): attach/update hook
//! - [`UiElement`](visibility::UiElement): host element handle
//!
//! ## [`signin`] - Session writes
//!
//! - [`SignInService`](signin::SignInService): login/logout over configured accounts
//!
//! ## [`config`] - Configuration Management
//!
//! - [`GatekeepConfig`](config::GatekeepConfig): unified configuration type
//! - [`ConfigLoader`](config::ConfigLoader): multi-source config loader
//!
//! Configuration priority: Environment > Explicit file > Project > Global > Default

pub mod app;
pub mod config;
pub mod defaults;
pub mod guard;
pub mod menu;
pub mod signin;
pub mod testing;
pub mod visibility;

// Re-exports for convenience
pub use app::{GatekeepApp, GatekeepAppBuilder};
pub use config::{
    default_config_dir, default_config_path, ConfigError, ConfigLoader, GatekeepConfig,
    NavigationConfig, SignInConfig,
};
pub use guard::{
    GuardStage, GuardVerdict, LogicalRoute, NavigationGuard, NavigationHooks, NavigationOutcome,
    RouteDef, RouteMeta, RouteTable, TracingHooks,
};
pub use menu::{MenuCatalog, MenuComposer, MenuEntry, MenuStats, MenuView};
pub use signin::{Account, SignInError, SignInService};
pub use visibility::{
    ElementBinding, ElementState, Presentation, RemovalMode, UiElement, VisibilityController,
};

// Re-export the core model so frontends need a single dependency.
pub use gatekeep_auth::{PermissionQuery, RequiredPermission, SessionCell};
pub use gatekeep_types::{PermissionCode, Principal, Role};
