//! Delay-based one-shot scheduling.
//!
//! [`TokioScheduler`] runs callbacks on a tokio runtime after a real delay.
//! [`ManualScheduler`] keeps a virtual clock that tests advance explicitly,
//! so animations can be stepped without waiting.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

/// Work to run once a delay has elapsed.
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a scheduled callback.
///
/// Cancelling prevents a callback that has not fired yet from firing.
/// Cancelling after it fired, or twice, does nothing.
#[derive(Debug, Clone, Default)]
pub struct ScheduledTask {
    token: CancellationToken,
}

impl ScheduledTask {
    fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Runs callbacks after a delay.
pub trait Scheduler: Send + Sync {
    /// Schedules `callback` to run once, no earlier than `delay` from now.
    ///
    /// Implementations never run the callback before returning, so callers
    /// may hold locks the callback also takes.
    fn after(&self, delay: Duration, callback: Callback) -> ScheduledTask;
}

/// Scheduler backed by tokio timers.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Uses the runtime the caller is running on.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Scheduler for TokioScheduler {
    fn after(&self, delay: Duration, callback: Callback) -> ScheduledTask {
        let task = ScheduledTask::new();
        let token = task.token.clone();
        self.handle.spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    if !token.is_cancelled() {
                        callback();
                    }
                }
            }
        });
        task
    }
}

struct Pending {
    due: Duration,
    seq: u64,
    task: ScheduledTask,
    callback: Callback,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_seq: u64,
    queue: Vec<Pending>,
}

impl ManualState {
    /// Removes and returns the earliest live entry due at or before `limit`.
    fn pop_due(&mut self, limit: Option<Duration>) -> Option<Pending> {
        self.queue.retain(|p| !p.task.is_cancelled());
        let idx = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, p)| limit.is_none_or(|limit| p.due <= limit))
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(idx, _)| idx)?;
        let pending = self.queue.swap_remove(idx);
        self.now = self.now.max(pending.due);
        Some(pending)
    }
}

/// Scheduler with a virtual clock.
///
/// Nothing fires until [`run_next`](Self::run_next) or
/// [`advance`](Self::advance) is called. Callbacks due at the same instant
/// fire in scheduling order.
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<ManualState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current virtual time, measured from creation.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of callbacks that are scheduled and not cancelled.
    pub fn pending(&self) -> usize {
        self.lock()
            .queue
            .iter()
            .filter(|p| !p.task.is_cancelled())
            .count()
    }

    /// Due time of the next live callback.
    pub fn next_due(&self) -> Option<Duration> {
        self.lock()
            .queue
            .iter()
            .filter(|p| !p.task.is_cancelled())
            .map(|p| p.due)
            .min()
    }

    /// Jumps the clock to the next due callback and runs it.
    ///
    /// Returns false if nothing is pending.
    pub fn run_next(&self) -> bool {
        let next = self.lock().pop_due(None);
        let Some(pending) = next else {
            return false;
        };
        (pending.callback)();
        true
    }

    /// Moves the clock forward by `by`, running everything that falls due,
    /// including callbacks scheduled along the way. Returns how many ran.
    ///
    /// A chain of zero-delay callbacks never lets the clock pass, so drive
    /// those with [`run_next`](Self::run_next) instead.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut fired = 0;
        loop {
            let next = self.lock().pop_due(Some(target));
            let Some(pending) = next else {
                break;
            };
            (pending.callback)();
            fired += 1;
        }
        let mut state = self.lock();
        state.now = state.now.max(target);
        fired
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("queued", &state.queue.len())
            .finish()
    }
}

impl Scheduler for ManualScheduler {
    fn after(&self, delay: Duration, callback: Callback) -> ScheduledTask {
        let task = ScheduledTask::new();
        let mut state = self.lock();
        let seq = state.next_seq;
        state.next_seq += 1;
        let due = state.now + delay;
        state.queue.push(Pending {
            due,
            seq,
            task: task.clone(),
            callback,
        });
        task
    }
}
