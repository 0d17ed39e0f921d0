//! Element visibility control.
//!
//! The controller only decides a [`Presentation`]; the host UI performs it
//! through its [`UiElement`] implementation. [`ElementState`] is the
//! in-memory implementation used by the CLI and tests.
//!
//! | Decision | Mode     | Effect                                    |
//! |----------|----------|-------------------------------------------|
//! | allow    | any      | show, clear hidden marker                 |
//! | deny     | `Hide`   | hide, set hidden marker, stay attached    |
//! | deny     | `Remove` | detach (one-way)                          |

mod controller;
mod element;

pub use controller::{ElementBinding, RemovalMode, VisibilityController};
pub use element::{ElementState, Presentation, UiElement, HIDDEN_ATTRIBUTE, HIDDEN_CLASS};
