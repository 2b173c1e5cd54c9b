//! Events consumed by the reducer.

use std::time::Instant;

use crossterm::event::Event;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Animation tick. Carries the time used for every time-based value
    /// until the next tick.
    Tick { now: Instant },
    /// Emitted once per loop iteration with the current terminal size.
    Frame { width: u16, height: u16 },
    Terminal(Event),
    /// New text from the hero typewriter.
    RoleText(String),
    /// A contact submission finished.
    ContactFinished {
        attempt: u64,
        result: Result<(), String>,
    },
    /// The submit button reset timer for `attempt` fired.
    ContactReset { attempt: u64 },
}
