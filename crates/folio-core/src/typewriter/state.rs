//! The typewriter step function.
//!
//! One [`Typewriter::step`] call is one tick of the animation: it produces the
//! text to display and the delay before the next tick, and moves the state
//! forward. Scheduling is someone else's job.

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

use super::RoleList;
use crate::config::TypewriterConfig;

/// Mutable animation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypewriterState {
    /// Index of the role being animated.
    pub role_index: usize,
    /// Characters of the current role counted as typed.
    ///
    /// Reaches `len + 1` for the single step that starts the post-typing pause.
    pub char_index: usize,
    /// Direction of the current phase.
    pub is_deleting: bool,
}

/// What a step did, beyond writing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// Typed forward, more to go.
    Typed,
    /// Deleted one character, more to go.
    Deleted,
    /// The role is fully typed; the pause before deleting starts now.
    FinishedTyping,
    /// The role is fully erased; the next step types `next_role`.
    FinishedDeleting { next_role: usize },
}

/// Result of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Text to display.
    pub text: String,
    /// Delay before the next step.
    pub delay: Duration,
    pub event: StepEvent,
}

/// Typewriter state machine over a fixed role list.
#[derive(Debug, Clone)]
pub struct Typewriter {
    roles: RoleList,
    timing: TypewriterConfig,
    state: TypewriterState,
}

impl Typewriter {
    pub fn new(roles: RoleList, timing: TypewriterConfig) -> Self {
        Self {
            roles,
            timing,
            state: TypewriterState::default(),
        }
    }

    pub fn state(&self) -> TypewriterState {
        self.state
    }

    /// The role currently being typed or deleted.
    pub fn current_role(&self) -> &str {
        self.roles.get(self.state.role_index)
    }

    /// Advances the animation by one step.
    pub fn step(&mut self) -> Step {
        let current = self.roles.get(self.state.role_index);
        let len = char_len(current);

        let shown = if self.state.is_deleting {
            self.state.char_index.saturating_sub(1)
        } else {
            self.state.char_index + 1
        };
        let text = prefix(current, shown).to_string();

        if self.state.is_deleting {
            self.state.char_index = self.state.char_index.saturating_sub(1);
        } else {
            self.state.char_index += 1;
        }

        // The typed check runs one step after the word is complete, so the
        // full word stays on screen for an extra typing tick before the pause.
        let (delay, event) = if !self.state.is_deleting && self.state.char_index == len + 1 {
            self.state.is_deleting = true;
            (self.timing.pause_after_typed(), StepEvent::FinishedTyping)
        } else if self.state.is_deleting && self.state.char_index == 0 {
            self.state.is_deleting = false;
            self.state.role_index = (self.state.role_index + 1) % self.roles.len();
            (
                self.timing.pause_after_deleted(),
                StepEvent::FinishedDeleting {
                    next_role: self.state.role_index,
                },
            )
        } else if self.state.is_deleting {
            (self.timing.deleting_delay(), StepEvent::Deleted)
        } else {
            (self.timing.typing_delay(), StepEvent::Typed)
        };

        Step { text, delay, event }
    }
}

/// Number of user-perceived characters in `s`.
pub fn char_len(s: &str) -> usize {
    s.graphemes(true).count()
}

/// First `n` user-perceived characters of `s`, or all of `s` if shorter.
pub fn prefix(s: &str, n: usize) -> &str {
    match s.grapheme_indices(true).nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
