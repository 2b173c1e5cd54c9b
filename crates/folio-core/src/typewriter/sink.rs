use std::sync::{Arc, Mutex, PoisonError};

/// Where the typewriter writes its text.
///
/// Implementations must accept any string, including the empty one. A sink
/// whose target has gone away should silently drop writes.
pub trait TextSink: Send {
    fn set_text(&mut self, value: &str);
}

impl<F> TextSink for F
where
    F: FnMut(&str) + Send,
{
    fn set_text(&mut self, value: &str) {
        self(value);
    }
}

/// Sink that records every write. Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    writes: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes so far, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The most recent write.
    pub fn last(&self) -> Option<String> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl TextSink for RecordingSink {
    fn set_text(&mut self, value: &str) {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(value.to_string());
    }
}
