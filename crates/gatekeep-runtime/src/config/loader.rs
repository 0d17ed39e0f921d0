//! Configuration loader with hierarchical merging.
//!
//! # Load Order
//!
//! 1. Default values (built-in catalog, routes, accounts)
//! 2. Global config (`~/.gatekeep/config.toml`)
//! 3. Project config (`<root>/.gatekeep/config.toml`)
//! 4. Explicit config file (`--config`)
//! 5. Environment variables (`GATEKEEP_*`)
//!
//! Each layer overrides the previous. The merged menu and routes are
//! validated before the config is returned.

use super::{default_config_path, ConfigError, GatekeepConfig, PROJECT_CONFIG_DIR, PROJECT_CONFIG_FILE};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Reads one environment variable.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Helper macro for parsing boolean environment variables.
macro_rules! parse_env_bool {
    ($self:ident, $field:expr, $var:literal) => {
        if let Some(val) = $self.env($var) {
            $field = parse_bool(&val)
                .ok_or_else(|| ConfigError::invalid_env_var($var, "expected bool"))?;
        }
    };
}

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```
/// use gatekeep_runtime::config::ConfigLoader;
///
/// let config = ConfigLoader::new()
///     .skip_global_config()
///     .skip_project_config()
///     .with_env(|name| (name == "GATEKEEP_APP_TITLE").then(|| "Ops Console".to_string()))
///     .load()?;
/// assert_eq!(config.app_title, "Ops Console");
/// # Ok::<(), gatekeep_runtime::config::ConfigError>(())
/// ```
#[derive(Clone)]
pub struct ConfigLoader {
    /// Global config file path (defaults to ~/.gatekeep/config.toml).
    global_config_path: Option<PathBuf>,

    /// Project root directory.
    project_root: Option<PathBuf>,

    /// Explicit config file; must exist when set.
    config_file: Option<PathBuf>,

    /// Environment source; `None` reads the process environment.
    env: Option<EnvLookup>,

    /// Skip environment variable loading.
    skip_env: bool,

    /// Skip global config loading.
    skip_global: bool,

    /// Skip project config loading.
    skip_project: bool,
}

impl ConfigLoader {
    /// Creates a new loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            global_config_path: None,
            project_root: None,
            config_file: None,
            env: None,
            skip_env: false,
            skip_global: false,
            skip_project: false,
        }
    }

    /// Sets a custom global config path.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Sets the project root directory.
    ///
    /// Project config will be loaded from `<project_root>/.gatekeep/config.toml`.
    #[must_use]
    pub fn with_project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    /// Adds an explicit config file layered above the project config.
    ///
    /// Unlike the global and project files, a missing explicit file is an error.
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Replaces the process environment with `lookup`.
    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        self.env = Some(Arc::new(lookup));
        self
    }

    /// Skips environment variable loading.
    ///
    /// Useful for testing with deterministic config.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Skips global config loading.
    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    /// Skips project config loading.
    #[must_use]
    pub fn skip_project_config(mut self) -> Self {
        self.skip_project = true;
        self
    }

    /// Loads, merges and validates configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file exists but cannot be parsed,
    /// the explicit file is missing, an environment variable is malformed,
    /// or the merged menu or routes are invalid. Missing global and project
    /// files are silently ignored.
    pub fn load(&self) -> Result<GatekeepConfig, ConfigError> {
        let mut config = GatekeepConfig::default();

        // Layer 1: Global config
        if !self.skip_global {
            let global_path = self
                .global_config_path
                .clone()
                .unwrap_or_else(default_config_path);

            if let Some(global_config) = self.load_file(&global_path)? {
                debug!(path = %global_path.display(), "Loaded global config");
                config.merge(&global_config);
            }
        }

        // Layer 2: Project config
        if !self.skip_project {
            if let Some(ref project_root) = self.project_root {
                let project_config_path = project_root
                    .join(PROJECT_CONFIG_DIR)
                    .join(PROJECT_CONFIG_FILE);

                if let Some(project_config) = self.load_file(&project_config_path)? {
                    debug!(
                        path = %project_config_path.display(),
                        project = %project_root.display(),
                        "Loaded project config"
                    );
                    config.merge(&project_config);
                }
            }
        }

        // Layer 3: Explicit file
        if let Some(ref path) = self.config_file {
            let explicit = self
                .load_file(path)?
                .ok_or_else(|| ConfigError::NotFound { path: path.clone() })?;
            debug!(path = %path.display(), "Loaded config file");
            config.merge(&explicit);
        }

        // Layer 4: Environment variables
        if !self.skip_env {
            self.apply_env_vars(&mut config)?;
        }

        config.menu_catalog()?;
        config.route_table()?;

        Ok(config)
    }

    /// Loads a config file, returning None if it doesn't exist.
    fn load_file(&self, path: &Path) -> Result<Option<GatekeepConfig>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

        let config =
            GatekeepConfig::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;

        Ok(Some(config))
    }

    fn env(&self, name: &str) -> Option<String> {
        match &self.env {
            Some(lookup) => lookup(name),
            None => std::env::var(name).ok(),
        }
    }

    /// Applies environment variable overrides.
    fn apply_env_vars(&self, config: &mut GatekeepConfig) -> Result<(), ConfigError> {
        parse_env_bool!(self, config.signin.guest_fallback, "GATEKEEP_GUEST_FALLBACK");

        if let Some(val) = self.env("GATEKEEP_APP_TITLE") {
            config.app_title = val;
        }
        if let Some(val) = self.env("GATEKEEP_HOME_ROUTE") {
            if val.trim().is_empty() {
                return Err(ConfigError::invalid_env_var(
                    "GATEKEEP_HOME_ROUTE",
                    "expected a route name",
                ));
            }
            config.navigation.home_route = val;
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("global_config_path", &self.global_config_path)
            .field("project_root", &self.project_root)
            .field("config_file", &self.config_file)
            .field("custom_env", &self.env.is_some())
            .field("skip_env", &self.skip_env)
            .field("skip_global", &self.skip_global)
            .field("skip_project", &self.skip_project)
            .finish()
    }
}

/// Parses a boolean from string.
///
/// Accepts: "true", "false", "1", "0", "yes", "no", "on", "off" (case-insensitive).
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn create_config_file(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + Send + Sync + 'static {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn isolated() -> ConfigLoader {
        ConfigLoader::new()
            .skip_global_config()
            .skip_project_config()
            .with_env(env_of(&[]))
    }

    #[test]
    fn load_defaults_only() {
        let config = ConfigLoader::new()
            .skip_global_config()
            .skip_project_config()
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config, GatekeepConfig::default());
    }

    #[test]
    fn load_global_config() {
        let temp = TempDir::new().unwrap();
        let config_path = create_config_file(
            temp.path(),
            r#"
app_title = "Global Title"

[signin]
guest_fallback = true
"#,
        );

        let config = ConfigLoader::new()
            .with_global_config(&config_path)
            .skip_project_config()
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config.app_title, "Global Title");
        assert!(config.signin.guest_fallback);
    }

    #[test]
    fn load_project_overrides_global() {
        let global_temp = TempDir::new().unwrap();
        let project_temp = TempDir::new().unwrap();

        let project_dir = project_temp.path().join(".gatekeep");
        std::fs::create_dir_all(&project_dir).unwrap();

        let global_path = create_config_file(
            global_temp.path(),
            r#"
app_title = "Global Title"

[signin]
guest_fallback = true
"#,
        );

        create_config_file(
            &project_dir,
            r#"
app_title = "Project Title"
"#,
        );

        let config = ConfigLoader::new()
            .with_global_config(&global_path)
            .with_project_root(project_temp.path())
            .skip_env_vars()
            .load()
            .unwrap();

        // guest_fallback from global (not overridden in project)
        assert!(config.signin.guest_fallback);
        assert_eq!(config.app_title, "Project Title");
    }

    #[test]
    fn explicit_file_overrides_project() {
        let project_temp = TempDir::new().unwrap();
        let project_dir = project_temp.path().join(".gatekeep");
        std::fs::create_dir_all(&project_dir).unwrap();
        create_config_file(&project_dir, "app_title = \"Project\"");

        let explicit_temp = TempDir::new().unwrap();
        let explicit = create_config_file(
            explicit_temp.path(),
            r#"
[[menu]]
id = "reports"
title = "Reports"
path = "/reports"
required = "order_view"
"#,
        );

        let config = ConfigLoader::new()
            .skip_global_config()
            .with_project_root(project_temp.path())
            .with_config_file(&explicit)
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config.app_title, "Project");
        assert_eq!(config.menu.len(), 1);
        assert_eq!(config.menu[0].id, "reports");
    }

    #[test]
    fn missing_config_files_ok() {
        let config = ConfigLoader::new()
            .with_global_config("/nonexistent/path/config.toml")
            .with_project_root("/nonexistent/project")
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config, GatekeepConfig::default());
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let err = isolated()
            .with_config_file("/nonexistent/gatekeep.toml")
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn malformed_toml_is_error() {
        let temp = TempDir::new().unwrap();
        let path = create_config_file(temp.path(), "app_title = [");
        let err = isolated().with_config_file(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }

    #[test]
    fn duplicate_menu_path_rejected() {
        let temp = TempDir::new().unwrap();
        let path = create_config_file(
            temp.path(),
            r#"
[[menu]]
id = "a"
title = "A"
path = "/same"

[[menu]]
id = "b"
title = "B"
path = "/same"
"#,
        );
        let err = isolated().with_config_file(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Catalog(_)));
    }

    #[test]
    fn routes_without_login_rejected() {
        let temp = TempDir::new().unwrap();
        let path = create_config_file(
            temp.path(),
            r#"
[[routes]]
name = "Home"
path = "/"
"#,
        );
        let err = isolated().with_config_file(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Route(_)));
    }

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("on"), Some(true));

        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("FALSE"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));

        assert_eq!(parse_bool("invalid"), None);
    }

    #[test]
    fn env_var_override() {
        let config = ConfigLoader::new()
            .skip_global_config()
            .skip_project_config()
            .with_env(env_of(&[
                ("GATEKEEP_GUEST_FALLBACK", "yes"),
                ("GATEKEEP_APP_TITLE", "Env Title"),
                ("GATEKEEP_HOME_ROUTE", "OrderList"),
            ]))
            .load()
            .unwrap();

        assert!(config.signin.guest_fallback);
        assert_eq!(config.app_title, "Env Title");
        assert_eq!(config.navigation.home_route, "OrderList");
    }

    #[test]
    fn env_home_route_is_validated() {
        let err = ConfigLoader::new()
            .skip_global_config()
            .skip_project_config()
            .with_env(env_of(&[("GATEKEEP_HOME_ROUTE", "Missing")]))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Route(_)));
    }

    #[test]
    fn invalid_env_bool() {
        let err = ConfigLoader::new()
            .skip_global_config()
            .skip_project_config()
            .with_env(env_of(&[("GATEKEEP_GUEST_FALLBACK", "maybe")]))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { .. }));
    }
}
