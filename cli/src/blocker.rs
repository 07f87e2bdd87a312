use std::cell::Cell;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

/// Debounce window of the blocking overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLimit {
    /// Requests settling faster than this never show the overlay
    pub lower: Duration,
    /// Once shown, the overlay stays until this much time has passed since `block`
    pub upper: Duration,
}

impl Default for TimeLimit {
    fn default() -> Self {
        Self {
            lower: Duration::from_millis(350),
            upper: Duration::from_millis(1000),
        }
    }
}

/// Global gate disabling trip-mutating interaction while a request is in flight
pub struct UiBlocker {
    limits: TimeLimit,
    started: Cell<Option<Instant>>,
}

impl UiBlocker {
    pub fn new(limits: TimeLimit) -> Self {
        Self {
            limits,
            started: Cell::new(None),
        }
    }

    pub fn block(&self) {
        debug!("UI blocked");
        self.started.set(Some(Instant::now()));
    }

    /// Release the gate, holding it long enough that a visible overlay does not flicker
    pub async fn unblock(&self) {
        let Some(started) = self.started.get() else {
            return;
        };

        let elapsed = started.elapsed();
        if elapsed >= self.limits.lower && elapsed < self.limits.upper {
            tokio::time::sleep(self.limits.upper - elapsed).await;
        }

        self.started.set(None);
        debug!("UI unblocked after {:?}", started.elapsed());
    }

    pub fn is_blocked(&self) -> bool {
        self.started.get().is_some()
    }

    /// Whether the overlay would currently be on screen
    pub fn is_overlay_visible(&self) -> bool {
        self.started
            .get()
            .is_some_and(|started| started.elapsed() >= self.limits.lower)
    }
}
