//! Test doubles for embedding code.

use crate::guard::NavigationHooks;
use parking_lot::Mutex;

/// [`NavigationHooks`] that records every call.
///
/// # Example
///
/// ```
/// use gatekeep_runtime::guard::NavigationHooks;
/// use gatekeep_runtime::testing::RecordingHooks;
///
/// let hooks = RecordingHooks::new();
/// hooks.set_page_title("Orders - Commerce Admin");
/// assert_eq!(hooks.titles(), vec!["Orders - Commerce Admin".to_string()]);
/// assert!(hooks.notices().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct RecordingHooks {
    titles: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
}

impl RecordingHooks {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Page titles set so far, oldest first.
    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().clone()
    }

    /// Denial notices shown so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().clone()
    }

    /// Forgets everything recorded.
    pub fn clear(&self) {
        self.titles.lock().clear();
        self.notices.lock().clear();
    }
}

impl NavigationHooks for RecordingHooks {
    fn set_page_title(&self, title: &str) {
        self.titles.lock().push(title.to_string());
    }

    fn notify_denied(&self, message: &str) {
        self.notices.lock().push(message.to_string());
    }
}
