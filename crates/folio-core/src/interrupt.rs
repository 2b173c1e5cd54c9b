use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use tokio::sync::Notify;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static INTERRUPT_NOTIFY: OnceLock<Notify> = OnceLock::new();
static RESTORE_HOOK: OnceLock<Box<dyn Fn() + Send + Sync>> = OnceLock::new();

/// Exit code used when the user interrupts.
pub const EXIT_INTERRUPTED: i32 = 130;

#[derive(Debug)]
pub struct InterruptedError;

impl std::fmt::Display for InterruptedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interrupted")
    }
}

impl std::error::Error for InterruptedError {}

/// Installs the Ctrl+C handler.
///
/// SIGTERM and SIGHUP are routed to the same handler. The handler only sets
/// a flag and wakes waiters; printing is left to whoever owns the terminal.
///
/// # Errors
/// Returns an error if a handler is already installed.
pub fn init() -> Result<()> {
    ctrlc::set_handler(trigger).context("install Ctrl+C handler")
}

/// Requests an interrupt. A second request force-exits.
pub fn trigger() {
    if INTERRUPTED.swap(true, Ordering::SeqCst) {
        // process::exit skips Drop, so restore the terminal first.
        if let Some(hook) = RESTORE_HOOK.get() {
            hook();
        }
        std::process::exit(EXIT_INTERRUPTED);
    }
    INTERRUPT_NOTIFY.get_or_init(Notify::new).notify_waiters();
}

pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Waits until an interrupt is requested.
pub async fn wait_for_interrupt() {
    loop {
        let notified = INTERRUPT_NOTIFY.get_or_init(Notify::new).notified();
        if is_interrupted() {
            return;
        }
        notified.await;
    }
}

pub fn reset() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

/// Registers a hook run before a forced exit, e.g. to leave raw mode.
pub fn set_restore_hook<F>(hook: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let _ = RESTORE_HOOK.set(Box::new(hook));
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_trigger_wakes_waiter_and_reset_clears() {
        reset();
        let waiter = tokio::spawn(wait_for_interrupt());
        tokio::time::sleep(Duration::from_millis(10)).await;

        trigger();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert!(is_interrupted());

        reset();
        assert!(!is_interrupted());
    }

    #[test]
    fn test_interrupted_error_display() {
        assert_eq!(InterruptedError.to_string(), "Interrupted");
    }
}
