//! Self-rescheduling typewriter loop.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tracing::{debug, info, trace};

use super::scheduler::{ScheduledTask, Scheduler};
use super::sink::TextSink;
use super::state::{StepEvent, Typewriter, TypewriterState};
use super::{RoleList, TypewriterError};
use crate::config::TypewriterConfig;

/// Animates a [`TextSink`] through a role list until stopped.
///
/// Each step runs under the rotator's lock and schedules its successor
/// before releasing it, so steps are strictly sequential. Scheduled
/// callbacks only hold a weak reference; dropping the handle stops the loop.
pub struct RoleTypewriter {
    shared: Arc<Shared>,
}

struct Shared {
    scheduler: Arc<dyn Scheduler>,
    inner: Mutex<Inner>,
}

struct Inner {
    machine: Typewriter,
    sink: Box<dyn TextSink>,
    pending: Option<ScheduledTask>,
    stopped: bool,
    steps: u64,
}

impl RoleTypewriter {
    /// Validates `roles` and starts the loop.
    ///
    /// The first step runs after `config.start_delay_ms`.
    ///
    /// # Errors
    /// Returns [`TypewriterError::EmptyRoles`] if `roles` is empty. Nothing is
    /// scheduled and nothing is written in that case.
    pub fn start<S, I, R>(
        sink: S,
        roles: I,
        config: TypewriterConfig,
        scheduler: Arc<dyn Scheduler>,
    ) -> Result<Self, TypewriterError>
    where
        S: TextSink + 'static,
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        let roles = RoleList::new(roles)?;
        Ok(Self::start_with(sink, roles, config, scheduler))
    }

    /// Starts the loop over an already validated role list.
    pub fn start_with<S>(
        sink: S,
        roles: RoleList,
        config: TypewriterConfig,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self
    where
        S: TextSink + 'static,
    {
        let start_delay = config.start_delay();
        let role_count = roles.len();
        let shared = Arc::new(Shared {
            scheduler,
            inner: Mutex::new(Inner {
                machine: Typewriter::new(roles, config),
                sink: Box::new(sink),
                pending: None,
                stopped: false,
                steps: 0,
            }),
        });

        {
            let mut inner = shared.lock();
            inner.pending = Some(schedule_step(&shared, start_delay));
        }

        info!(roles = role_count, ?start_delay, "typewriter started");
        Self { shared }
    }

    /// Stops the loop. Calling it again does nothing.
    ///
    /// The pending step is cancelled; if it fires anyway it writes nothing.
    pub fn stop(&self) {
        let mut inner = self.shared.lock();
        if inner.stopped {
            return;
        }
        inner.stopped = true;
        if let Some(task) = inner.pending.take() {
            task.cancel();
        }
        debug!(steps = inner.steps, "typewriter stopped");
    }

    pub fn is_running(&self) -> bool {
        !self.shared.lock().stopped
    }

    /// Current animation state.
    pub fn snapshot(&self) -> TypewriterState {
        self.shared.lock().machine.state()
    }

    /// Number of steps taken so far.
    pub fn steps(&self) -> u64 {
        self.shared.lock().steps
    }
}

impl Drop for RoleTypewriter {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for RoleTypewriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.shared.lock();
        f.debug_struct("RoleTypewriter")
            .field("state", &inner.machine.state())
            .field("steps", &inner.steps)
            .field("stopped", &inner.stopped)
            .finish_non_exhaustive()
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fire(self: &Arc<Self>) {
        let mut inner = self.lock();
        if inner.stopped {
            return;
        }

        let step = inner.machine.step();
        inner.sink.set_text(&step.text);
        inner.steps += 1;

        match step.event {
            StepEvent::FinishedTyping => trace!(text = %step.text, "role typed"),
            StepEvent::FinishedDeleting { next_role } => debug!(next_role, "role erased"),
            StepEvent::Typed | StepEvent::Deleted => {}
        }

        inner.pending = Some(schedule_step(self, step.delay));
    }
}

fn schedule_step(shared: &Arc<Shared>, delay: Duration) -> ScheduledTask {
    let weak: Weak<Shared> = Arc::downgrade(shared);
    shared.scheduler.after(
        delay,
        Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.fire();
            }
        }),
    )
}
