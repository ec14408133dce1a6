//! Narrow OS seam: asset loading plus a queued intent-event channel the
//! host pushes lifecycle/deep-link events into.

use crate::{ShellError, ShellResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8.
    pub pixels: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentEvent {
    Resume,
    Pause,
    Focus(bool),
    /// Deep link / view intent carrying its uri payload.
    ActionView(String),
}

pub trait Platform {
    fn load_file(&self, path: &str) -> ShellResult<Vec<u8>>;

    fn load_image(&self, path: &str) -> ShellResult<ImageData> {
        let _ = path;
        Err(ShellError::Unavailable(
            "image loading not provided by this platform".to_string(),
        ))
    }

    fn queue_event(&mut self, event: IntentEvent);

    fn drain_events(&mut self) -> Vec<IntentEvent>;
}

/// In-process platform backed by the local filesystem and a plain event
/// queue. Desktop embeddings and tests use this directly.
#[derive(Debug, Default)]
pub struct QueuedPlatform {
    events: Vec<IntentEvent>,
}

impl Platform for QueuedPlatform {
    fn load_file(&self, path: &str) -> ShellResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| ShellError::Io(format!("read {path}: {e}")))
    }

    fn queue_event(&mut self, event: IntentEvent) {
        self.events.push(event);
    }

    fn drain_events(&mut self) -> Vec<IntentEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_then_drain_preserves_order() {
        let mut platform = QueuedPlatform::default();
        platform.queue_event(IntentEvent::Resume);
        platform.queue_event(IntentEvent::Focus(true));
        let drained = platform.drain_events();
        assert_eq!(drained, vec![IntentEvent::Resume, IntentEvent::Focus(true)]);
        assert!(platform.drain_events().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let platform = QueuedPlatform::default();
        let err = platform.load_file("/nonexistent/vantage-test").unwrap_err();
        assert!(matches!(err, ShellError::Io(_)));
    }
}
