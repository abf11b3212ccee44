use std::{
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;

/// Fixed-window request counter keyed by client IP.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<DashMap<String, RequestWindow>>,
    requests_per_window: u32,
    window_duration: Duration,
}

#[derive(Debug)]
struct RequestWindow {
    started: Instant,
    request_count: u32,
}

impl RateLimiter {
    pub fn new(requests_per_second: u32) -> Self {
        Self::with_window(requests_per_second.saturating_mul(60), Duration::from_secs(60))
    }

    pub fn with_window(requests_per_window: u32, window_duration: Duration) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            requests_per_window,
            window_duration,
        }
    }

    pub fn get_client_key(&self, addr: &SocketAddr) -> String {
        addr.ip().to_string()
    }

    pub fn check_rate_limit(&self, client_key: &str) -> bool {
        let now = Instant::now();

        let mut entry = self
            .windows
            .entry(client_key.to_string())
            .or_insert(RequestWindow {
                started: now,
                request_count: 0,
            });

        if now.duration_since(entry.started) >= self.window_duration {
            entry.started = now;
            entry.request_count = 0;
        }

        if entry.request_count >= self.requests_per_window {
            return false;
        }

        entry.request_count += 1;
        true
    }

    /// Drops clients whose window has run out. Returns how many were removed.
    pub fn purge_stale(&self) -> usize {
        let now = Instant::now();
        let before = self.windows.len();

        self.windows
            .retain(|_, window| now.duration_since(window.started) < self.window_duration);

        before.saturating_sub(self.windows.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}
