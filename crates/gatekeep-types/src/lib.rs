//! Core types for gatekeep.
//!
//! This crate provides the identity vocabulary shared by every layer of
//! the gatekeep access-control stack.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Identity Layer                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  gatekeep-types   : PermissionCode, Role, Principal  ◄── HERE │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Decision Layer                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  gatekeep-auth    : RequiredPermission, PermissionPolicy,    │
//! │                     SessionCell, PermissionQuery             │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Enforcement Layer                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  gatekeep-runtime : menu, guard, visibility, signin, config │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Frontend Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  gatekeep-cli     : Command-line interface                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Why a Separate Types Crate?
//!
//! - **No decision logic**: a [`Principal`] is pure data; evaluation lives
//!   in `gatekeep-auth`
//! - **Minimal dependencies**: only `serde` and `uuid`
//! - **Shared by every enforcement point**: menu, guard and element
//!   visibility all read the same types
//!
//! # Example
//!
//! ```
//! use gatekeep_types::{PermissionCode, Principal, PrincipalId, Role};
//!
//! let alice = Principal::new(PrincipalId::named("alice"), "alice", Role::User)
//!     .with_permission(PermissionCode::PRODUCT_VIEW);
//!
//! assert!(alice.holds(&PermissionCode::PRODUCT_VIEW));
//! assert!(!alice.holds(&PermissionCode::ORDER_VIEW));
//! assert!(!alice.is_admin());
//! ```

mod error;
mod id;
mod permission;
mod principal;
mod role;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::PrincipalId;
pub use permission::PermissionCode;
pub use principal::Principal;
pub use role::Role;
