//! Chat runtime: polling, rendering, tabs and the composer.
//!
//! SYSTEM CONTEXT
//! ==============
//! `poll`, `render`, `tabs` and `composer` each own one behavior and talk to
//! the page only through [`render::ChatView`]. `runtime` composes them into
//! an event-in / effect-out state machine, and `driver` runs that machine on
//! the browser event loop.

pub mod composer;
pub mod driver;
pub mod poll;
pub mod render;
pub mod runtime;
pub mod tabs;
