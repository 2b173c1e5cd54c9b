//! CLI command handlers.

pub mod contact;
pub mod page;
pub mod typewriter;
