//! Static menu catalog.

use gatekeep_auth::RequiredPermission;
use gatekeep_types::{ErrorCode, PermissionCode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// One navigable sidebar entry.
///
/// # Example
///
/// ```
/// use gatekeep_runtime::menu::MenuEntry;
/// use gatekeep_types::PermissionCode;
///
/// let orders = MenuEntry::new("orders", "Orders", "/orders")
///     .with_icon("List")
///     .requires([PermissionCode::ORDER_VIEW]);
///
/// assert!(orders.required.contains(&PermissionCode::ORDER_VIEW));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Unique identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Icon name understood by the UI layer.
    #[serde(default)]
    pub icon: String,
    /// Route path the entry navigates to. Unique within a catalog.
    pub path: String,
    /// Codes that must all be held to see the entry.
    #[serde(default, skip_serializing_if = "RequiredPermission::is_none")]
    pub required: RequiredPermission,
}

impl MenuEntry {
    /// Creates an unrestricted entry without an icon.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: String::new(),
            path: path.into(),
            required: RequiredPermission::None,
        }
    }

    /// Sets the icon name.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Sets the required codes (all must be held).
    #[must_use]
    pub fn requires(mut self, codes: impl IntoIterator<Item = PermissionCode>) -> Self {
        self.required = RequiredPermission::all(codes);
        self
    }
}

/// Menu catalog validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// An entry has an empty id.
    #[error("menu entry at position {index} has an empty id")]
    EmptyId { index: usize },

    /// Two entries share an id.
    #[error("duplicate menu entry id '{id}'")]
    DuplicateId { id: String },

    /// Two entries share a path.
    #[error("duplicate menu entry path '{path}' (entries '{first}' and '{second}')")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },
}

impl ErrorCode for CatalogError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyId { .. } => "CATALOG_EMPTY_ID",
            Self::DuplicateId { .. } => "CATALOG_DUPLICATE_ID",
            Self::DuplicatePath { .. } => "CATALOG_DUPLICATE_PATH",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Ordered, immutable list of menu entries.
///
/// Ids are non-empty and unique, and paths are unique, so
/// [`find_by_path`](Self::find_by_path) has at most one answer. Cloning
/// shares the entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCatalog {
    entries: Arc<[MenuEntry]>,
}

impl MenuCatalog {
    /// Validates and wraps `entries`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on an empty id, a duplicate id or a
    /// duplicate path.
    pub fn try_new(entries: Vec<MenuEntry>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        let mut paths: Vec<(&str, &str)> = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            if entry.id.trim().is_empty() {
                return Err(CatalogError::EmptyId { index });
            }
            if !ids.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: entry.id.clone(),
                });
            }
            if let Some((_, first)) = paths.iter().find(|(path, _)| *path == entry.path) {
                return Err(CatalogError::DuplicatePath {
                    path: entry.path.clone(),
                    first: (*first).to_string(),
                    second: entry.id.clone(),
                });
            }
            paths.push((entry.path.as_str(), entry.id.as_str()));
        }

        Ok(Self {
            entries: entries.into(),
        })
    }

    /// Returns the entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry with exactly this path.
    #[must_use]
    pub fn find_by_path(&self, path: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    /// Returns the entry with this id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}
