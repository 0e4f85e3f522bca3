//! Query size limits.
//!
//! Oversized requests are clamped to the configured limit, never rejected.

use crate::LeaderboardConfig;

/// Upper bounds applied to every query a [`crate::Leaderboard`] serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryLimits {
    pub max_top_n: Option<usize>,
    pub max_window: Option<usize>,
}

impl QueryLimits {
    pub fn from_config(config: &LeaderboardConfig) -> Self {
        Self {
            max_top_n: config.max_top_n,
            max_window: config.max_window,
        }
    }

    pub fn top_n(&self, n: usize) -> usize {
        self.max_top_n.map_or(n, |max| n.min(max))
    }

    pub fn window(&self, window: usize) -> usize {
        self.max_window.map_or(window, |max| window.min(max))
    }
}
