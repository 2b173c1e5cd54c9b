use folio_core::typewriter::TextSink;
use tokio::sync::mpsc;

use crate::events::UiEvent;

/// Forwards typewriter text to the runtime inbox.
///
/// Once the runtime is gone, writes are dropped.
#[derive(Debug, Clone)]
pub struct InboxSink {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl InboxSink {
    pub fn new(tx: mpsc::UnboundedSender<UiEvent>) -> Self {
        Self { tx }
    }
}

impl TextSink for InboxSink {
    fn set_text(&mut self, value: &str) {
        let _ = self.tx.send(UiEvent::RoleText(value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwards_text() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut sink = InboxSink::new(tx);
        sink.set_text("Dj");
        assert!(matches!(rx.try_recv(), Ok(UiEvent::RoleText(text)) if text == "Dj"));
    }

    #[test]
    fn test_closed_inbox_is_ignored() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut sink = InboxSink::new(tx);
        sink.set_text("still fine");
    }
}
