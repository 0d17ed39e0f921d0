//! UI element handles.

use std::collections::{BTreeMap, BTreeSet};

/// Class added to permission-hidden elements.
pub const HIDDEN_CLASS: &str = "permission-hidden";

/// Attribute set to `"true"` on permission-hidden elements.
pub const HIDDEN_ATTRIBUTE: &str = "data-permission-hidden";

/// Presentation of an element after a visibility pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presentation {
    /// Default presentation, no marker.
    Visible,
    /// Attached, not displayed, not interactive, carries the hidden marker.
    Hidden,
    /// Detached for good.
    Removed,
}

impl Presentation {
    /// Returns a lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
            Self::Removed => "removed",
        }
    }
}

impl std::fmt::Display for Presentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle the visibility controller drives.
///
/// The host UI implements this for its own element type. Implementations
/// must make [`detach`](Self::detach) final: once detached, `show` and
/// `hide` are never called again by the controller.
pub trait UiElement {
    /// Restores default presentation and removes the hidden marker.
    fn show(&mut self);

    /// Hides the element and sets the hidden marker. The element stays attached.
    fn hide(&mut self);

    /// Detaches the element.
    fn detach(&mut self);

    /// Returns `false` after [`detach`](Self::detach).
    fn is_attached(&self) -> bool;
}

/// In-memory element with style, class and attribute state.
///
/// Hiding sets `display: none`, `visibility: hidden`, the
/// [`HIDDEN_CLASS`] class and the [`HIDDEN_ATTRIBUTE`] attribute. Showing
/// clears all four and leaves unrelated classes and attributes alone.
///
/// # Example
///
/// ```
/// use gatekeep_runtime::visibility::{ElementState, Presentation, UiElement};
///
/// let mut button = ElementState::new().with_class("btn");
/// button.hide();
/// assert_eq!(button.presentation(), Presentation::Hidden);
/// assert_eq!(button.display(), Some("none"));
///
/// button.show();
/// assert_eq!(button.presentation(), Presentation::Visible);
/// assert!(button.has_class("btn"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementState {
    display: Option<String>,
    visibility: Option<String>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    attached: bool,
}

impl ElementState {
    /// Creates an attached element with default presentation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            display: None,
            visibility: None,
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
            attached: true,
        }
    }

    /// Adds a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    /// Sets an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns the inline `display` style, if set.
    #[must_use]
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// Returns the inline `visibility` style, if set.
    #[must_use]
    pub fn visibility(&self) -> Option<&str> {
        self.visibility.as_deref()
    }

    /// Returns `true` if the class is present.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Derives the presentation from the current state.
    #[must_use]
    pub fn presentation(&self) -> Presentation {
        if !self.attached {
            Presentation::Removed
        } else if self.has_class(HIDDEN_CLASS) {
            Presentation::Hidden
        } else {
            Presentation::Visible
        }
    }
}

impl Default for ElementState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiElement for ElementState {
    fn show(&mut self) {
        self.display = None;
        self.visibility = None;
        self.classes.remove(HIDDEN_CLASS);
        self.attributes.remove(HIDDEN_ATTRIBUTE);
    }

    fn hide(&mut self) {
        self.display = Some("none".to_string());
        self.visibility = Some("hidden".to_string());
        self.classes.insert(HIDDEN_CLASS.to_string());
        self.attributes
            .insert(HIDDEN_ATTRIBUTE.to_string(), "true".to_string());
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}

impl std::fmt::Display for ElementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.presentation())?;
        if !self.attached {
            return Ok(());
        }
        if let Some(display) = &self.display {
            write!(f, " display={display}")?;
        }
        if let Some(visibility) = &self.visibility {
            write!(f, " visibility={visibility}")?;
        }
        if !self.classes.is_empty() {
            let classes: Vec<&str> = self.classes.iter().map(String::as_str).collect();
            write!(f, " class=\"{}\"", classes.join(" "))?;
        }
        for (name, value) in &self.attributes {
            write!(f, " {name}=\"{value}\"")?;
        }
        Ok(())
    }
}
