use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cancellation handle for a running session.
///
/// Clones share one flag. Signaling it stops the render loop at the next
/// event-loop turn, so a host (or a test) can terminate a session without
/// closing the window.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unstopped() {
        assert!(!StopToken::new().is_stopped());
    }

    #[test]
    fn stop_is_visible_through_clones() {
        let token = StopToken::new();
        let clone = token.clone();
        clone.stop();
        assert!(token.is_stopped());
    }
}
