//! Rank queries dispatched on [`RankingMode`].

use crate::{RankInfo, RankedIndex, RankingMode, Result, dense, standard};

/// Rank of one player under `mode`.
pub fn rank_of(index: &RankedIndex, mode: RankingMode, player_id: &str) -> Result<RankInfo> {
    match mode {
        RankingMode::Standard => standard::rank_of(index, player_id),
        RankingMode::Dense => dense::rank_of(index, player_id),
    }
}

/// Leading players under `mode`. See [`standard::top_n`] and [`dense::top_n`]
/// for how `n` bounds the result.
pub fn top_n(index: &RankedIndex, mode: RankingMode, n: usize) -> Vec<RankInfo> {
    match mode {
        RankingMode::Standard => standard::top_n(index, n),
        RankingMode::Dense => dense::top_n(index, n),
    }
}

/// Players around `player_id` under `mode`.
pub fn neighbors(
    index: &RankedIndex,
    mode: RankingMode,
    player_id: &str,
    window: usize,
) -> Result<Vec<RankInfo>> {
    match mode {
        RankingMode::Standard => standard::neighbors(index, player_id, window),
        RankingMode::Dense => dense::neighbors(index, player_id, window),
    }
}

/// Inclusive position range `[position - window, position + window]`
/// clamped to `[0, size - 1]`.
///
/// `position` must be a valid position, so `size >= 1`.
pub(crate) fn window_bounds(position: usize, window: usize, size: usize) -> (usize, usize) {
    let start = position.saturating_sub(window);
    let end = position
        .saturating_add(window)
        .min(size.saturating_sub(1));
    (start, end)
}
