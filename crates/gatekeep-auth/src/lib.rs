//! Permission evaluation for gatekeep.
//!
//! This crate holds the single decision rule that every enforcement point
//! shares, plus the session cell the rule reads from.
//!
//! # Decision Model
//!
//! ```text
//! allowed = principal present ∧ (admin ∨ required ⊆ held)
//! ```
//!
//! | Type | Role |
//! |------|------|
//! | [`RequiredPermission`] | What a resource demands: none, one code, or all of a list |
//! | [`PermissionPolicy`] / [`DefaultPolicy`] | The evaluator |
//! | [`Decision`] | Allow/deny plus the reason |
//! | [`SessionCell`] | Owned, swappable current principal |
//! | [`PermissionQuery`] | `check` / `has_all` / `has_any` against the current principal |
//!
//! # Crate Architecture
//!
//! ```text
//! gatekeep-types  (PermissionCode, Role, Principal)
//!        ↑
//! gatekeep-auth   ◄── THIS CRATE
//!        ↑
//! gatekeep-runtime (menu, guard, visibility, signin)
//! ```
//!
//! # Design Principles
//!
//! - **Fail closed**: missing principal, unknown code, empty permission set all deny
//! - **Pure evaluation**: no I/O, no clock, no hidden state
//! - **Injected session**: consumers receive the cell; nothing reads a global

mod checker;
mod decision;
pub mod error;
mod policy;
mod query;
mod required;
pub mod session;

pub use checker::DefaultPolicy;
pub use decision::{AllowReason, Decision, DenyReason};
pub use error::AccessDenied;
pub use policy::PermissionPolicy;
pub use query::PermissionQuery;
pub use required::RequiredPermission;
pub use session::{SessionCell, SessionSnapshot, SessionSource, SessionToken};

// Re-export identity types for convenience
pub use gatekeep_types::{PermissionCode, Principal, PrincipalId, Role};
