//! Podium Leaderboard Service
//!
//! [`Leaderboard`] is the handle an embedding application shares between
//! threads (`Arc<Leaderboard>`). It owns:
//! - The ranked index, behind a reader-writer lock
//! - Query limits from [`LeaderboardConfig`]
//!
//! # Locking
//!
//! Score updates and removals take the write lock, so they are mutually
//! exclusive with each other and with reads. Queries take the read lock and
//! run concurrently. A repositioning update is never observable half done.
//! [`Leaderboard::view`] holds one read guard across several queries so they
//! all see the same standings.
//!
//! Identifiers are opaque: any string, the empty string included, is a valid
//! player id. Validating them is up to the embedding layer.

#![deny(unsafe_code)]

pub mod limits;

use parking_lot::{RwLock, RwLockReadGuard};
use podium_core::{
    RankError, RankInfo, RankedIndex, RankingMode, Result, Score, ScoreEntry, Timestamp,
    UpdateOutcome, query,
};
use tracing::{debug, info, trace};

pub use limits::QueryLimits;

// ============================================================================
// Configuration
// ============================================================================

/// Leaderboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderboardConfig {
    /// Upper bound on `n` for top-N queries. `None` is unbounded.
    pub max_top_n: Option<usize>,
    /// Upper bound on the neighbors window. `None` is unbounded.
    pub max_window: Option<usize>,
}

// ============================================================================
// Leaderboard
// ============================================================================

/// Thread-safe leaderboard handle.
pub struct Leaderboard {
    config: LeaderboardConfig,
    limits: QueryLimits,
    index: RwLock<RankedIndex>,
}

impl Leaderboard {
    pub fn new(config: LeaderboardConfig) -> Self {
        info!(
            target: "podium.board",
            max_top_n = ?config.max_top_n,
            max_window = ?config.max_window,
            "leaderboard created"
        );

        Self {
            limits: QueryLimits::from_config(&config),
            index: RwLock::new(RankedIndex::new()),
            config,
        }
    }

    pub fn config(&self) -> &LeaderboardConfig {
        &self.config
    }

    /// Insert or reposition a player. An unchanged `(score, timestamp)` is a
    /// no-op. Never fails.
    pub fn update_score(
        &self,
        player_id: &str,
        score: Score,
        timestamp: Timestamp,
    ) -> UpdateOutcome {
        let outcome = self.index.write().update_score(player_id, score, timestamp);
        match outcome {
            UpdateOutcome::Inserted { position } => {
                debug!(target: "podium.board", player_id, score, timestamp, position, "player inserted");
            }
            UpdateOutcome::Moved { from, to } => {
                debug!(target: "podium.board", player_id, score, timestamp, from, to, "player moved");
            }
            UpdateOutcome::Unchanged { position } => {
                trace!(target: "podium.board", player_id, position, "score unchanged");
            }
        }
        outcome
    }

    /// Delete a player. Returns the entry it held.
    pub fn remove_player(&self, player_id: &str) -> Result<ScoreEntry> {
        let entry = self
            .index
            .write()
            .remove_player(player_id)
            .inspect_err(log_not_found)?;
        debug!(target: "podium.board", player_id, score = entry.score, "player removed");
        Ok(entry)
    }

    /// Read-locked view for several queries against one snapshot.
    pub fn view(&self) -> BoardView<'_> {
        BoardView {
            guard: self.index.read(),
            limits: self.limits,
        }
    }

    pub fn lookup_score(&self, player_id: &str) -> Result<(Score, Timestamp)> {
        self.view().lookup_score(player_id)
    }

    pub fn position_of(&self, player_id: &str) -> Result<usize> {
        self.view().position_of(player_id)
    }

    pub fn size(&self) -> usize {
        self.view().size()
    }

    /// Every entry in canonical order, copied out of the lock.
    pub fn snapshot(&self) -> Vec<ScoreEntry> {
        self.view().snapshot()
    }

    pub fn rank_of(&self, mode: RankingMode, player_id: &str) -> Result<RankInfo> {
        self.view().rank_of(mode, player_id)
    }

    pub fn top_n(&self, mode: RankingMode, n: usize) -> Vec<RankInfo> {
        self.view().top_n(mode, n)
    }

    pub fn neighbors(
        &self,
        mode: RankingMode,
        player_id: &str,
        window: usize,
    ) -> Result<Vec<RankInfo>> {
        self.view().neighbors(mode, player_id, window)
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(LeaderboardConfig::default())
    }
}

impl std::fmt::Debug for Leaderboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Leaderboard")
            .field("config", &self.config)
            .field("players", &self.size())
            .finish()
    }
}

// ============================================================================
// Board View
// ============================================================================

/// Consistent read-only view of a [`Leaderboard`].
///
/// Writers block while a view is alive, so keep it short.
pub struct BoardView<'a> {
    guard: RwLockReadGuard<'a, RankedIndex>,
    limits: QueryLimits,
}

impl BoardView<'_> {
    /// The underlying index, for queries not wrapped here.
    pub fn index(&self) -> &RankedIndex {
        &self.guard
    }

    pub fn size(&self) -> usize {
        self.guard.size()
    }

    pub fn lookup_score(&self, player_id: &str) -> Result<(Score, Timestamp)> {
        self.guard
            .lookup_score(player_id)
            .inspect_err(log_not_found)
    }

    pub fn position_of(&self, player_id: &str) -> Result<usize> {
        self.guard
            .position_of(player_id)
            .inspect_err(log_not_found)
    }

    pub fn snapshot(&self) -> Vec<ScoreEntry> {
        self.guard.iterate().cloned().collect()
    }

    pub fn rank_of(&self, mode: RankingMode, player_id: &str) -> Result<RankInfo> {
        let info = query::rank_of(&self.guard, mode, player_id).inspect_err(log_not_found)?;
        trace!(target: "podium.board", %mode, player_id, rank = info.rank, "rank_of");
        Ok(info)
    }

    /// Top-N under `mode`, with `n` clamped to the configured limit.
    pub fn top_n(&self, mode: RankingMode, n: usize) -> Vec<RankInfo> {
        let n = self.limits.top_n(n);
        let rows = query::top_n(&self.guard, mode, n);
        trace!(target: "podium.board", %mode, n, rows = rows.len(), "top_n");
        rows
    }

    /// Neighbors under `mode`, with `window` clamped to the configured limit.
    pub fn neighbors(
        &self,
        mode: RankingMode,
        player_id: &str,
        window: usize,
    ) -> Result<Vec<RankInfo>> {
        let window = self.limits.window(window);
        let rows = query::neighbors(&self.guard, mode, player_id, window)
            .inspect_err(log_not_found)?;
        trace!(target: "podium.board", %mode, player_id, window, rows = rows.len(), "neighbors");
        Ok(rows)
    }
}

fn log_not_found(error: &RankError) {
    debug!(target: "podium.board", %error, "lookup failed");
}

// ============================================================================
// Tests
// ============================================================================
