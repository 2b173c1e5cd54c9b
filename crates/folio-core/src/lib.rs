//! Core behavior for the folio portfolio: the role typewriter, page
//! animations, the contact form, and configuration.

pub mod config;
pub mod contact;
pub mod interrupt;
pub mod logging;
pub mod page;
pub mod typewriter;
