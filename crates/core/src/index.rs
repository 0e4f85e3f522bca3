//! Ranked Index: the canonical order of players and its reverse lookup.
//!
//! Three structures are kept in lockstep by every mutation:
//! - `players`: `player_id -> (score, timestamp)`, the reverse lookup.
//! - `order`: every player's [`ScoreEntry`] in canonical order, with
//!   positional access.
//! - `tier_sizes` / `tiers`: the distinct scores present and how many
//!   players hold each, for dense ranks without a full scan.
//!
//! Mutation takes `&mut self`, so a remove-then-insert repositioning is never
//! observable half done.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use crate::tree::{Iter, OrderStatisticTree};
use crate::{PlayerId, Rank, RankError, Result, Score, ScoreEntry, Timestamp};

/// What an [`RankedIndex::update_score`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// First score for this player; placed at `position`.
    Inserted { position: usize },
    /// Existing player repositioned from `from` to `to`.
    Moved { from: usize, to: usize },
    /// `(score, timestamp)` identical to the stored pair; nothing changed.
    Unchanged { position: usize },
}

impl UpdateOutcome {
    /// Whether the canonical order changed.
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Unchanged { .. })
    }

    /// Position of the player after the call.
    pub fn position(&self) -> usize {
        match *self {
            Self::Inserted { position } | Self::Unchanged { position } => position,
            Self::Moved { to, .. } => to,
        }
    }
}

/// Players in canonical order with reverse lookup by identity.
#[derive(Debug, Clone, Default)]
pub struct RankedIndex {
    players: HashMap<PlayerId, (Score, Timestamp)>,
    order: OrderStatisticTree<ScoreEntry>,
    /// Number of players holding each distinct score.
    tier_sizes: HashMap<Score, usize>,
    /// Distinct scores, best first.
    tiers: OrderStatisticTree<Reverse<Score>>,
}

impl RankedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or reposition `player_id` at `(score, timestamp)`.
    ///
    /// An unchanged pair is a no-op. Never fails.
    pub fn update_score(
        &mut self,
        player_id: &str,
        score: Score,
        timestamp: Timestamp,
    ) -> UpdateOutcome {
        let existing = self
            .players
            .get_key_value(player_id)
            .map(|(id, &pair)| (Arc::clone(id), pair));

        let Some((id, (old_score, old_timestamp))) = existing else {
            let entry = ScoreEntry::new(Arc::from(player_id), score, timestamp);
            let position = self.place(entry);
            return UpdateOutcome::Inserted { position };
        };

        if old_score == score && old_timestamp == timestamp {
            let position = self
                .order
                .rank(&ScoreEntry::new(id, old_score, old_timestamp));
            return UpdateOutcome::Unchanged { position };
        }

        let stale = ScoreEntry::new(Arc::clone(&id), old_score, old_timestamp);
        let from = self.order.rank(&stale);
        self.order.remove(&stale);
        self.leave_tier(old_score);

        let to = self.place(ScoreEntry::new(id, score, timestamp));
        UpdateOutcome::Moved { from, to }
    }

    /// Delete a player. Returns the entry it held.
    pub fn remove_player(&mut self, player_id: &str) -> Result<ScoreEntry> {
        let (id, (score, timestamp)) = self
            .players
            .remove_entry(player_id)
            .ok_or_else(|| RankError::not_found(player_id))?;

        let entry = ScoreEntry::new(id, score, timestamp);
        self.order.remove(&entry);
        self.leave_tier(score);
        Ok(entry)
    }

    /// Current `(score, timestamp)` of a player.
    pub fn lookup_score(&self, player_id: &str) -> Result<(Score, Timestamp)> {
        self.players
            .get(player_id)
            .copied()
            .ok_or_else(|| RankError::not_found(player_id))
    }

    /// Canonical-order key of a player.
    pub fn entry_of(&self, player_id: &str) -> Result<ScoreEntry> {
        let (id, &(score, timestamp)) = self
            .players
            .get_key_value(player_id)
            .ok_or_else(|| RankError::not_found(player_id))?;
        Ok(ScoreEntry::new(Arc::clone(id), score, timestamp))
    }

    /// 0-based position of a player in canonical order.
    pub fn position_of(&self, player_id: &str) -> Result<usize> {
        self.locate(player_id).map(|(position, _)| position)
    }

    /// Position and key of a player.
    pub fn locate(&self, player_id: &str) -> Result<(usize, ScoreEntry)> {
        let entry = self.entry_of(player_id)?;
        Ok((self.order.rank(&entry), entry))
    }

    /// Fresh traversal of all entries in canonical order.
    pub fn iterate(&self) -> Iter<'_, ScoreEntry> {
        self.order.iter()
    }

    /// Traversal starting at 0-based `position`.
    pub fn iter_from(&self, position: usize) -> Iter<'_, ScoreEntry> {
        self.order.iter_from(position)
    }

    /// Entry at 0-based `position`.
    pub fn entry_at(&self, position: usize) -> Option<&ScoreEntry> {
        self.order.select(position)
    }

    /// Number of players tracked.
    pub fn size(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.players.contains_key(player_id)
    }

    /// Number of distinct score values present.
    pub fn distinct_scores(&self) -> usize {
        self.tier_sizes.len()
    }

    /// Dense rank of a score value: 1 + distinct scores strictly greater.
    ///
    /// Meaningful for any score, present or not.
    pub fn dense_rank_of_score(&self, score: Score) -> Rank {
        self.tiers.rank(&Reverse(score)) + 1
    }

    // ========================================================================
    // Internal Methods
    // ========================================================================

    /// Insert `entry` into every structure and return its position.
    fn place(&mut self, entry: ScoreEntry) -> usize {
        let position = self.order.rank(&entry);
        self.join_tier(entry.score);
        self.players
            .insert(Arc::clone(&entry.player_id), (entry.score, entry.timestamp));
        self.order.insert(entry);
        position
    }

    fn join_tier(&mut self, score: Score) {
        let count = self.tier_sizes.entry(score).or_insert(0);
        *count += 1;
        if *count == 1 {
            self.tiers.insert(Reverse(score));
        }
    }

    fn leave_tier(&mut self, score: Score) {
        let Some(count) = self.tier_sizes.get_mut(&score) else {
            return;
        };
        *count -= 1;
        if *count == 0 {
            self.tier_sizes.remove(&score);
            self.tiers.remove(&Reverse(score));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
