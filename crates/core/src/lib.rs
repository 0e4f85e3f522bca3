//! Podium Ranking Core
//!
//! This crate owns the canonical ordering of players on a leaderboard and
//! derives rank numbers from it. It is pure and synchronous: no I/O, no
//! clocks, no logging, no shared state.
//!
//! # Components
//!
//! - [`RankedIndex`]: the reverse lookup `player_id -> (score, timestamp)`
//!   kept in lockstep with the canonical order of [`ScoreEntry`] keys.
//! - [`standard`] and [`dense`]: the two rank query policies, each serving
//!   `rank_of`, `top_n` and `neighbors`.
//! - [`query`]: dispatch over [`RankingMode`] for callers that pick the
//!   policy at runtime.
//!
//! # Canonical Order
//!
//! Players are ordered by score descending, then timestamp ascending (the
//! earlier update wins a tie), then `player_id` ascending. Every rank
//! computation reads this single order.
//!
//! ```rust
//! use podium_core::{RankedIndex, dense, standard};
//!
//! let mut index = RankedIndex::new();
//! index.update_score("A", 100, 1);
//! index.update_score("B", 100, 2);
//! index.update_score("C", 95, 3);
//!
//! assert_eq!(standard::rank_of(&index, "C").unwrap().rank, 3);
//! assert_eq!(dense::rank_of(&index, "C").unwrap().rank, 2);
//! ```

#![deny(unsafe_code)]

pub mod dense;
pub mod error;
pub mod index;
pub mod query;
pub mod standard;
pub mod tree;

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

pub use error::{RankError, Result};
pub use index::{RankedIndex, UpdateOutcome};
pub use tree::OrderStatisticTree;

// ============================================================================
// Type Aliases
// ============================================================================

/// Opaque player identity. Shared between the reverse lookup and the
/// canonical order so each identifier is allocated once.
pub type PlayerId = Arc<str>;

/// Player score. Higher is better.
pub type Score = i64;

/// Caller-supplied update timestamp. Lower wins ties on equal score.
pub type Timestamp = i64;

/// 1-based rank number.
pub type Rank = usize;

// ============================================================================
// Core Types
// ============================================================================

/// One player's position key in the canonical order.
///
/// `Ord` encodes the canonical order directly: score descending, timestamp
/// ascending, player_id ascending. Two entries compare equal only when all
/// three fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreEntry {
    pub score: Score,
    pub timestamp: Timestamp,
    pub player_id: PlayerId,
}

impl ScoreEntry {
    pub fn new(player_id: PlayerId, score: Score, timestamp: Timestamp) -> Self {
        Self {
            score,
            timestamp,
            player_id,
        }
    }
}

impl Ord for ScoreEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.timestamp.cmp(&other.timestamp))
            .then_with(|| self.player_id.cmp(&other.player_id))
    }
}

impl PartialOrd for ScoreEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result row of a rank query. Produced on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankInfo {
    pub player_id: PlayerId,
    pub rank: Rank,
    pub score: Score,
}

impl RankInfo {
    pub fn new(entry: &ScoreEntry, rank: Rank) -> Self {
        Self {
            player_id: Arc::clone(&entry.player_id),
            rank,
            score: entry.score,
        }
    }
}

/// Which ranking policy a query uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RankingMode {
    /// Rank = 1 + number of entries ahead in canonical order.
    #[default]
    Standard,
    /// Rank = 1 + number of distinct better scores; ties share a rank.
    Dense,
}

impl RankingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Dense => "dense",
        }
    }
}

impl fmt::Display for RankingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
