//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never performs I/O or spawns tasks itself.

use std::time::Duration;

use folio_core::contact::ValidContact;

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Post a validated contact form.
    SubmitContact { attempt: u64, contact: ValidContact },

    /// Send `ContactReset` for `attempt` after `after`.
    ScheduleContactReset { attempt: u64, after: Duration },
}
