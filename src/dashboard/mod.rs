mod leaderboard;
mod tokens;
pub use leaderboard::{LeaderboardBoard, LeaderboardQuery, LeaderboardSnapshot};
pub use tokens::{TokenDirectory, TokenSnapshot};

use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared view state of the dashboard. Built once at start-up and handed to
/// every handler through `AppState`.
#[derive(Default)]
pub struct DashboardContext {
    pub tokens: TokenDirectory,
    pub leaderboard: LeaderboardBoard,
}

impl DashboardContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Counts one in-flight request for as long as it lives. The owner reads
/// as loading while the count is non-zero.
pub struct LoadingGuard<'a> {
    in_flight: &'a AtomicUsize,
}

impl<'a> LoadingGuard<'a> {
    pub fn raise(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self { in_flight }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

pub(crate) fn is_loading(in_flight: &AtomicUsize) -> bool {
    in_flight.load(Ordering::SeqCst) > 0
}
