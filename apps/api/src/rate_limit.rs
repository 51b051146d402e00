//! Per-client sliding-window rate limiter.
//!
//! Each client IP owns an ordered window of recent request timestamps. The
//! prune + count + append sequence runs under the DashMap entry guard, so two
//! concurrent requests from the same client cannot both observe the
//! pre-append count and slip past the limit.

use std::collections::VecDeque;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Every SWEEP_INTERVAL-th check evicts clients whose entire window has aged
/// out, so one-off clients do not accumulate map entries for the process
/// lifetime.
const SWEEP_INTERVAL: u64 = 64;

pub struct SlidingWindow {
    windows: DashMap<IpAddr, VecDeque<Instant>>,
    max_requests: u32,
    window: Duration,
    checks: AtomicU64,
}

impl SlidingWindow {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests,
            window,
            checks: AtomicU64::new(0),
        }
    }

    /// Admits or rejects a request from `client`. Admission appends the
    /// current timestamp; rejection leaves the window untouched.
    pub fn check(&self, client: IpAddr) -> bool {
        self.check_at(client, Instant::now())
    }

    /// Number of client IPs currently tracked.
    #[allow(dead_code)]
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    fn check_at(&self, client: IpAddr, now: Instant) -> bool {
        // Sweep before taking the entry guard to avoid self-deadlock.
        if self.checks.fetch_add(1, Ordering::Relaxed) % SWEEP_INTERVAL == SWEEP_INTERVAL - 1 {
            self.sweep(now);
        }

        let mut window = self.windows.entry(client).or_default();

        // Lazily prune timestamps that have aged out of the trailing window.
        while window
            .front()
            .is_some_and(|&t| now.duration_since(t) >= self.window)
        {
            window.pop_front();
        }

        if (window.len() as u32) < self.max_requests {
            window.push_back(now);
            true
        } else {
            false
        }
    }

    /// Drops clients whose newest timestamp has aged out of the window.
    fn sweep(&self, now: Instant) {
        self.windows
            .retain(|_, window| {
                window
                    .back()
                    .is_some_and(|&t| now.duration_since(t) < self.window)
            });
    }
}
