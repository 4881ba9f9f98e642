//! Chat state owned by the runtime.
//!
//! DESIGN
//! ======
//! State is split by concern (`channel`, `session`, `scroll`, `history`,
//! `panels`) so
//! the runtime components depend on small focused models instead of
//! page-level globals.

pub mod channel;
pub mod history;
pub mod panels;
pub mod scroll;
pub mod session;
