//! Dense ranking.
//!
//! Players sharing a score share a rank, and the rank only grows by one
//! when the score changes walking down the canonical order. A player's
//! dense rank is 1 + the number of distinct scores better than its own.
//!
//! `top_n` is bounded by rank number, so it can return more than `n`
//! players when the last rank is tied. `neighbors` is bounded by canonical
//! position around the target, so a tied tier can be cut at the window edge.

use crate::query::window_bounds;
use crate::{Rank, RankInfo, RankedIndex, Result, Score, ScoreEntry};

/// Dense rank of one player.
pub fn rank_of(index: &RankedIndex, player_id: &str) -> Result<RankInfo> {
    let entry = index.entry_of(player_id)?;
    Ok(RankInfo::new(&entry, index.dense_rank_of_score(entry.score)))
}

/// Every player whose dense rank is at most `n`, in canonical order.
pub fn top_n(index: &RankedIndex, n: usize) -> Vec<RankInfo> {
    if n == 0 {
        return Vec::new();
    }

    with_dense_ranks(index.iterate(), 1)
        .take_while(|info| info.rank <= n)
        .collect()
}

/// Players within `window` canonical positions of `player_id`, each with
/// its dense rank. The window is clamped to the index bounds.
pub fn neighbors(index: &RankedIndex, player_id: &str, window: usize) -> Result<Vec<RankInfo>> {
    let (position, _) = index.locate(player_id)?;
    let (start, end) = window_bounds(position, window, index.size());

    let mut entries = index.iter_from(start).take(end - start + 1).peekable();
    let first_rank = entries
        .peek()
        .map_or(1, |entry| index.dense_rank_of_score(entry.score));

    Ok(with_dense_ranks(entries, first_rank).collect())
}

/// Annotate consecutive canonical-order entries with dense ranks, the first
/// entry receiving `first_rank`.
fn with_dense_ranks<'a, I>(entries: I, first_rank: Rank) -> impl Iterator<Item = RankInfo> + 'a
where
    I: Iterator<Item = &'a ScoreEntry> + 'a,
{
    entries.scan(None::<(Score, Rank)>, move |previous, entry| {
        let rank = match *previous {
            None => first_rank,
            Some((score, rank)) if score == entry.score => rank,
            Some((_, rank)) => rank + 1,
        };
        *previous = Some((entry.score, rank));
        Some(RankInfo::new(entry, rank))
    })
}

// ============================================================================
// Tests
// ============================================================================
