//! Sliding-window rate limiting for outbound generation calls.
//!
//! Caps the number of generation requests in a rolling time window.
//! [`QaEngine`](crate::engine::QaEngine) acquires a slot before calling the
//! [`AnswerGenerator`](crate::traits::AnswerGenerator); cache hits bypass
//! the limiter entirely, which is one of the reasons caching answers pays
//! off beyond the USD savings.
//!
//! The window state sits behind a plain mutex; the wait itself is a tokio
//! sleep taken *outside* the lock, so a throttled caller never blocks
//! others from checking the window.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

/// Sliding-window rate limiter.
///
/// Allows at most `max_requests` acquisitions per rolling `window`.
/// [`acquire`](RateLimiter::acquire) sleeps until a slot frees, then
/// records the acquisition.
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    timestamps: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Create a limiter allowing `max_requests` per `window`.
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            timestamps: Mutex::new(VecDeque::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Instant>> {
        self.timestamps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Wait until the window has a free slot, then claim it.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let now = Instant::now();
                let mut stamps = self.lock();

                // Drop timestamps that have slid out of the window.
                while stamps
                    .front()
                    .is_some_and(|&t| now.duration_since(t) >= self.window)
                {
                    stamps.pop_front();
                }

                if stamps.len() < self.max_requests {
                    stamps.push_back(now);
                    return;
                }

                // Window full: the oldest entry decides when a slot frees.
                // Lock is released before sleeping.
                let oldest = *stamps.front().expect("window full implies non-empty");
                self.window - now.duration_since(oldest)
            };

            tracing::debug!(wait_ms = wait.as_millis() as u64, "rate limit reached, waiting");
            tokio::time::sleep(wait).await;
        }
    }

    /// Number of acquisitions currently inside the window.
    pub fn in_flight(&self) -> usize {
        let now = Instant::now();
        let stamps = self.lock();
        stamps
            .iter()
            .filter(|&&t| now.duration_since(t) < self.window)
            .count()
    }
}
