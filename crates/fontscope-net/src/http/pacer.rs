//! Minimum spacing between outgoing requests.

use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Spaces requests at least `delay` apart.
///
/// Each caller reserves the next free slot under a short lock and then
/// sleeps outside it, so concurrent callers queue up in arrival order.
#[derive(Debug)]
pub struct RequestPacer {
    delay: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RequestPacer {
    /// Create a pacer. A zero delay never waits.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_slot: Mutex::new(None),
        }
    }

    /// The configured spacing.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait until this caller's slot comes up.
    pub async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }

        let now = Instant::now();
        let start = {
            let mut next_slot = self.next_slot.lock();
            let start = match *next_slot {
                Some(slot) if slot > now => slot,
                _ => now,
            };
            *next_slot = Some(start + self.delay);
            start
        };

        if start > now {
            tokio::time::sleep_until(start).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_request_is_immediate() {
        let pacer = RequestPacer::new(Duration::from_secs(5));
        let started = Instant::now();
        pacer.wait().await;
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn consecutive_requests_are_spaced() {
        let pacer = RequestPacer::new(Duration::from_millis(40));
        let started = Instant::now();
        pacer.wait().await;
        pacer.wait().await;
        pacer.wait().await;
        assert!(started.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn zero_delay_never_waits() {
        let pacer = RequestPacer::new(Duration::ZERO);
        let started = Instant::now();
        for _ in 0..100 {
            pacer.wait().await;
        }
        assert!(started.elapsed() < Duration::from_millis(100));
    }
}
