use tokio::sync::broadcast;

/// Notification emitted on every committed chapter replace or clear. Carries
/// no payload; consumers re-query the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterEvent {
    ChaptersUpdated,
}

/// Lightweight in-process bus that fans out chapter notifications to
/// playback and UI observers. Sends are fire-and-forget; a bus with no
/// subscribers drops events silently.
#[derive(Debug, Clone)]
pub struct ChapterEvents {
    sender: broadcast::Sender<ChapterEvent>,
}

impl ChapterEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChapterEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ChapterEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for ChapterEvents {
    fn default() -> Self {
        Self::new(16)
    }
}
