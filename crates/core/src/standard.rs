//! Standard (competition) ranking.
//!
//! Rank = 1 + number of entries strictly ahead in canonical order. The
//! timestamp and player_id tie-breakers make every key distinct, so the
//! standard rank of a player is always its 1-based position.

use crate::query::window_bounds;
use crate::{RankInfo, RankedIndex, Result};

/// Standard rank of one player.
pub fn rank_of(index: &RankedIndex, player_id: &str) -> Result<RankInfo> {
    let (position, entry) = index.locate(player_id)?;
    Ok(RankInfo::new(&entry, position + 1))
}

/// The first `min(n, size)` players, ranked `1..`.
pub fn top_n(index: &RankedIndex, n: usize) -> Vec<RankInfo> {
    index
        .iterate()
        .take(n)
        .enumerate()
        .map(|(position, entry)| RankInfo::new(entry, position + 1))
        .collect()
}

/// Players ranked within `window` of `player_id`'s own rank, clamped to
/// `[1, size]`. The target is always included.
pub fn neighbors(index: &RankedIndex, player_id: &str, window: usize) -> Result<Vec<RankInfo>> {
    let (position, _) = index.locate(player_id)?;
    let (start, end) = window_bounds(position, window, index.size());

    Ok(index
        .iter_from(start)
        .take(end - start + 1)
        .enumerate()
        .map(|(offset, entry)| RankInfo::new(entry, start + offset + 1))
        .collect())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RankError;

    fn sample_index() -> RankedIndex {
        let mut index = RankedIndex::new();
        index.update_score("A", 100, 1);
        index.update_score("B", 100, 2);
        index.update_score("C", 95, 3);
        index.update_score("D", 95, 4);
        index.update_score("E", 90, 5);
        index
    }

    fn summary(rows: &[RankInfo]) -> Vec<(String, usize, i64)> {
        rows.iter()
            .map(|r| (r.player_id.to_string(), r.rank, r.score))
            .collect()
    }

    fn row(id: &str, rank: usize, score: i64) -> (String, usize, i64) {
        (id.to_string(), rank, score)
    }

    #[test]
    fn test_rank_of_is_position_plus_one() {
        let index = sample_index();
        assert_eq!(rank_of(&index, "A").unwrap().rank, 1);
        assert_eq!(rank_of(&index, "C").unwrap().rank, 3);
        assert_eq!(rank_of(&index, "E").unwrap().rank, 5);

        for entry in index.iterate() {
            let info = rank_of(&index, &entry.player_id).unwrap();
            assert_eq!(info.rank, index.position_of(&entry.player_id).unwrap() + 1);
            assert_eq!(info.score, entry.score);
        }
    }

    #[test]
    fn test_rank_of_unknown_player() {
        let index = sample_index();
        assert_eq!(rank_of(&index, "Z"), Err(RankError::not_found("Z")));
    }

    #[test]
    fn test_top_n() {
        let index = sample_index();
        assert_eq!(
            summary(&top_n(&index, 3)),
            [row("A", 1, 100), row("B", 2, 100), row("C", 3, 95)]
        );
    }

    #[test]
    fn test_top_n_larger_than_size() {
        let index = sample_index();
        let rows = top_n(&index, 50);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows.last().unwrap().rank, 5);
    }

    #[test]
    fn test_top_zero_is_empty() {
        let index = sample_index();
        assert!(top_n(&index, 0).is_empty());
        assert!(top_n(&RankedIndex::new(), 10).is_empty());
    }

    #[test]
    fn test_neighbors_middle() {
        let index = sample_index();
        assert_eq!(
            summary(&neighbors(&index, "C", 1).unwrap()),
            [row("B", 2, 100), row("C", 3, 95), row("D", 4, 95)]
        );
    }

    #[test]
    fn test_neighbors_clamped_to_bounds() {
        let index = sample_index();
        let rows = neighbors(&index, "E", 10).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[4].rank, 5);

        let rows = neighbors(&index, "A", 2).unwrap();
        assert_eq!(
            summary(&rows),
            [row("A", 1, 100), row("B", 2, 100), row("C", 3, 95)]
        );
    }

    #[test]
    fn test_neighbors_zero_window_is_target_only() {
        let index = sample_index();
        assert_eq!(
            summary(&neighbors(&index, "D", 0).unwrap()),
            [row("D", 4, 95)]
        );
    }

    #[test]
    fn test_neighbors_huge_window_does_not_overflow() {
        let index = sample_index();
        assert_eq!(neighbors(&index, "C", usize::MAX).unwrap().len(), 5);
    }

    #[test]
    fn test_neighbors_unknown_player() {
        assert_eq!(
            neighbors(&RankedIndex::new(), "Z", 3),
            Err(RankError::not_found("Z"))
        );
    }

    #[test]
    fn test_update_repositions_rank() {
        let mut index = sample_index();
        let leader_before = rank_of(&index, "A").unwrap().rank;

        index.update_score("E", 1000, 99);

        assert_eq!(rank_of(&index, "E").unwrap().rank, 1);
        assert_eq!(rank_of(&index, "A").unwrap().rank, leader_before + 1);
    }
}
