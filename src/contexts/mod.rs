//! Step-definition contexts.
//!
//! Each context is a bundle of steps over the shared session (and, where
//! needed, the store). Contexts are cheap borrowing views; a
//! [`crate::suite::Suite`] hands them out per step.

mod alert;
mod javascript;
mod page;

pub use alert::AlertContext;
pub use javascript::JavaScriptContext;
pub use page::{PageContext, PopupKind};
