//! Presentation side effects requested by the guard.

/// Message shown when a signed-in principal lacks a route's permission.
pub const ACCESS_DENIED_MESSAGE: &str = "You do not have permission to access this page";

/// Receives the guard's presentation side effects.
///
/// The guard never touches the UI directly; the host decides how a page
/// title or a denial notice is shown.
pub trait NavigationHooks: Send + Sync {
    /// Sets the page title for the route being entered.
    fn set_page_title(&self, title: &str);

    /// Shows a user-visible access denied notice.
    fn notify_denied(&self, message: &str);
}

/// Hooks that only write to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHooks;

impl NavigationHooks for TracingHooks {
    fn set_page_title(&self, title: &str) {
        tracing::debug!(title, "page title");
    }

    fn notify_denied(&self, message: &str) {
        tracing::warn!(message, "navigation denied");
    }
}
