//! Browser helpers shared across the widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (cookies, session
//! storage) from the runtime so the runtime stays testable natively.

pub mod cookie;
pub mod session_storage;
