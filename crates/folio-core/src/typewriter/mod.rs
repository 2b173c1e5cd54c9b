//! Role typewriter.
//!
//! Cycles through an ordered list of roles, typing each one character by
//! character into a [`TextSink`], holding it, deleting it, and moving on to
//! the next role. The loop never ends on its own; [`RoleTypewriter::stop`]
//! (or dropping the handle) ends it.
//!
//! The pieces are split so each can be driven on its own:
//! - [`Typewriter`]: the pure step function over [`TypewriterState`]
//! - [`Scheduler`]: delay-based one-shot callbacks (tokio or manual clock)
//! - [`RoleTypewriter`]: owns a `Typewriter` and a sink and reschedules itself

pub mod rotator;
pub mod scheduler;
pub mod sink;
pub mod state;

use std::fmt;

pub use rotator::RoleTypewriter;
pub use scheduler::{Callback, ManualScheduler, ScheduledTask, Scheduler, TokioScheduler};
pub use sink::{RecordingSink, TextSink};
pub use state::{Step, StepEvent, Typewriter, TypewriterState};

/// Errors raised when configuring a typewriter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypewriterError {
    /// The role list was empty.
    EmptyRoles,
}

impl fmt::Display for TypewriterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypewriterError::EmptyRoles => write!(f, "typewriter needs at least one role"),
        }
    }
}

impl std::error::Error for TypewriterError {}

/// Ordered, non-empty list of roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleList(Vec<String>);

impl RoleList {
    /// Builds a role list.
    ///
    /// # Errors
    /// Returns [`TypewriterError::EmptyRoles`] if `roles` is empty.
    pub fn new<I, S>(roles: I) -> Result<Self, TypewriterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: Vec<String> = roles.into_iter().map(Into::into).collect();
        if roles.is_empty() {
            return Err(TypewriterError::EmptyRoles);
        }
        Ok(Self(roles))
    }

    /// Number of roles (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Role at `index`, wrapping around the list.
    pub fn get(&self, index: usize) -> &str {
        &self.0[index % self.0.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
