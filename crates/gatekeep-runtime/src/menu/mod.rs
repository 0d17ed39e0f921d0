//! Sidebar menu filtering.
//!
//! # Architecture
//!
//! ```text
//! MenuCatalog (static, validated)     SessionCell (current principal)
//!        │                                   │
//!        └────────────► MenuComposer ◄───────┘
//!                            │
//!             ┌──────────────┼──────────────────┐
//!             ▼              ▼                  ▼
//!      visible_entries()   stats()        is_path_visible()
//! ```
//!
//! The catalog is flat. Entries are evaluated with the same policy the
//! navigation guard uses; an entry's `required` list is all-of.

mod catalog;
mod composer;

pub use catalog::{CatalogError, MenuCatalog, MenuEntry};
pub use composer::{MenuComposer, MenuStats, MenuSubscription, MenuView};
