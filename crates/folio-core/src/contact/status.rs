/// What the submit button shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed(String),
}

impl SubmitStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SubmitStatus::Idle => "Send Message",
            SubmitStatus::Sending => "Sending...",
            SubmitStatus::Sent => "Message Sent!",
            SubmitStatus::Failed(_) => "Failed, try again",
        }
    }

    pub fn is_sending(&self) -> bool {
        matches!(self, SubmitStatus::Sending)
    }
}

/// Drives `SubmitStatus` through `Idle -> Sending -> Sent | Failed -> Idle`.
///
/// Each submission gets an attempt number. Completions and resets carrying a
/// stale attempt are ignored, so a late reset timer cannot clobber a newer
/// submission.
#[derive(Debug, Clone, Default)]
pub struct SubmitTracker {
    status: SubmitStatus,
    attempt: u64,
}

impl SubmitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    /// Starts a submission. Returns `None` while one is already in flight.
    pub fn begin(&mut self) -> Option<u64> {
        if self.status.is_sending() {
            return None;
        }
        self.attempt += 1;
        self.status = SubmitStatus::Sending;
        Some(self.attempt)
    }

    /// Records the outcome of `attempt`. Returns false if it is stale.
    pub fn finish(&mut self, attempt: u64, result: Result<(), String>) -> bool {
        if attempt != self.attempt || !self.status.is_sending() {
            return false;
        }
        self.status = match result {
            Ok(()) => SubmitStatus::Sent,
            Err(msg) => SubmitStatus::Failed(msg),
        };
        true
    }

    /// Returns the button to idle after `attempt` finished.
    pub fn reset(&mut self, attempt: u64) -> bool {
        if attempt != self.attempt || matches!(self.status, SubmitStatus::Idle | SubmitStatus::Sending) {
            return false;
        }
        self.status = SubmitStatus::Idle;
        true
    }
}
