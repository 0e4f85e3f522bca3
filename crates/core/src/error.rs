//! Error type for ranking operations.

use thiserror::Error;

/// Failure of a ranking operation.
///
/// The only failure is a query naming a player that was never submitted.
/// It is a caller error and never transient.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    /// No score has been recorded for this player.
    #[error("player not found: '{player_id}'")]
    NotFound { player_id: String },
}

impl RankError {
    pub fn not_found(player_id: &str) -> Self {
        Self::NotFound {
            player_id: player_id.to_string(),
        }
    }
}

/// Result alias for ranking operations.
pub type Result<T> = std::result::Result<T, RankError>;
