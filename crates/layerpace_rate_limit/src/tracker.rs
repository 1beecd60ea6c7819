//! Fixed-window state reconstructed from lockout observations.
//!
//! The server never tells us where its windows start. It only says whether
//! the quota is exhausted and how long a window lasts. Assuming every window
//! since the tracker was created had the same length, the boundary following
//! the last observed lockout is
//!
//! ```text
//! boundary = last_hit + (window - (last_hit - anchor) mod window)
//! ```
//!
//! For windows of 4s, a tracker anchored at the first request and locked out
//! by a request 10s later (10 mod 4 = 2, so 2s left) waits until 12s:
//!
//! ```text
//!   [X---][--X-][XX--][----]
//!    ^            ^     ^
//!  anchor      last_hit boundary
//! ```

use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// Rate-limit state for one tier, or one routing key within the burst tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowTracker {
    anchor: Instant,
    last_hit: Option<Instant>,
    window: Duration,
    locked: bool,
}

impl WindowTracker {
    /// Create an unlocked tracker anchored at `anchor`.
    pub fn new(anchor: Instant) -> Self {
        Self {
            anchor,
            last_hit: None,
            window: Duration::ZERO,
            locked: false,
        }
    }

    /// Create an unlocked tracker anchored at the current instant.
    pub fn starting_now() -> Self {
        Self::new(Instant::now())
    }

    /// Instant the tracker was created.
    pub fn anchor(&self) -> Instant {
        self.anchor
    }

    /// Instant of the most recent registration, if any.
    pub fn last_hit(&self) -> Option<Instant> {
        self.last_hit
    }

    /// Window length learned from the server, zero until first observed.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether the last registered response exhausted the window.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// How long to wait before the next request, as seen from `now`.
    ///
    /// Zero unless the tracker is locked with a known window of at least one
    /// second. Zero as well once `now` has reached the reconstructed boundary.
    pub fn delay_at(&self, now: Instant) -> Duration {
        if !self.locked {
            return Duration::ZERO;
        }
        let Some(last_hit) = self.last_hit else {
            return Duration::ZERO;
        };
        let window_secs = self.window.as_secs();
        if window_secs == 0 {
            return Duration::ZERO;
        }

        let elapsed_secs = last_hit.saturating_duration_since(self.anchor).as_secs();
        let remaining_secs = window_secs - elapsed_secs % window_secs;
        let boundary = last_hit + Duration::from_secs(remaining_secs);

        boundary.saturating_duration_since(now)
    }

    /// How long to wait before the next request.
    pub fn delay(&self) -> Duration {
        self.delay_at(Instant::now())
    }

    /// Record one completed round trip observed at `now`.
    pub fn register_at(&mut self, now: Instant, locked: bool, window: Duration) {
        self.last_hit = Some(now);
        self.locked = locked;
        self.window = window;
    }

    /// Record one completed round trip observed now.
    pub fn register(&mut self, locked: bool, window: Duration) {
        self.register_at(Instant::now(), locked, window);
    }

    /// Clear the lock after its window has been waited out.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Serializable view of the tracker as seen from `now`.
    pub fn snapshot_at(&self, now: Instant) -> WindowSnapshot {
        WindowSnapshot {
            locked: self.locked,
            window_secs: self.window.as_secs(),
            last_hit_secs: self
                .last_hit
                .map(|hit| hit.saturating_duration_since(self.anchor).as_secs()),
            age_secs: now.saturating_duration_since(self.anchor).as_secs(),
            delay_ms: self.delay_at(now).as_millis() as u64,
        }
    }

    /// Serializable view of the tracker right now.
    pub fn snapshot(&self) -> WindowSnapshot {
        self.snapshot_at(Instant::now())
    }
}

/// Point-in-time copy of a [`WindowTracker`], with instants expressed as
/// whole seconds since the tracker's anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowSnapshot {
    /// Whether the tracker is locked.
    pub locked: bool,
    /// Learned window length, zero if unknown.
    pub window_secs: u64,
    /// Seconds from anchor to the last registration, `None` if never registered.
    pub last_hit_secs: Option<u64>,
    /// Seconds since the tracker was created.
    pub age_secs: u64,
    /// Pending delay in milliseconds.
    pub delay_ms: u64,
}

impl WindowSnapshot {
    /// True once at least one response has been registered.
    pub fn is_registered(&self) -> bool {
        self.last_hit_secs.is_some()
    }
}
