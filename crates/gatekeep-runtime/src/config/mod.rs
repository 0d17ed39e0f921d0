//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! Configuration is loaded from multiple sources with priority-based merging:
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌─────────────────────────────────────────────┐
//! │  1. Environment Variables (GATEKEEP_*)      │  Runtime override
//! ├─────────────────────────────────────────────┤
//! │  2. Explicit file (--config)                │  Per-invocation
//! ├─────────────────────────────────────────────┤
//! │  3. Project Config (.gatekeep/config.toml)  │  Project-specific
//! ├─────────────────────────────────────────────┤
//! │  4. Global Config (~/.gatekeep/config.toml) │  User defaults
//! ├─────────────────────────────────────────────┤
//! │  5. Built-in catalog, routes and accounts   │  Fallback
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The menu catalog and route table are read once at startup and are
//! immutable afterwards. Changing them needs a restart.
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `GATEKEEP_APP_TITLE` | `app_title` | String |
//! | `GATEKEEP_HOME_ROUTE` | `navigation.home_route` | String |
//! | `GATEKEEP_GUEST_FALLBACK` | `signin.guest_fallback` | bool |
//!
//! # Example Configuration
//!
//! ```toml
//! app_title = "Commerce Admin"
//!
//! [navigation]
//! login_route = "Login"
//! forbidden_route = "Forbidden"
//! home_route = "Home"
//! resume_param = "redirect"
//!
//! [signin]
//! guest_fallback = false
//! guest_permissions = ["product_view", "order_view"]
//!
//! # A non-empty list replaces the built-in list wholesale.
//! [[menu]]
//! id = "orders"
//! title = "Orders"
//! icon = "List"
//! path = "/orders"
//! required = ["order_view"]
//!
//! [[routes]]
//! name = "OrderList"
//! path = "/orders"
//! title = "Orders"
//! required = "order_view"
//!
//! [[accounts]]
//! username = "admin"
//! password = "123456"
//! role = "admin"
//! ```

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::{ConfigLoader, EnvLookup};
pub use types::{GatekeepConfig, NavigationConfig, SignInConfig, DEFAULT_APP_TITLE};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".gatekeep")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".gatekeep";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
