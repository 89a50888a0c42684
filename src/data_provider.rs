/// Trait for the player-data and persistence collaborator, abstracting over
/// the file-backed store and test doubles
use async_trait::async_trait;
use thiserror::Error;

use crate::types::{BigBoardView, Board, Player, PlayerFilter, PlayerId};

/// Failures reported by the collaborator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("malformed data: {0}")]
    Malformed(String),
}

/// Player data reads and board writes, implemented by `FileStore` and test providers
#[async_trait]
pub trait ScoutDataProvider: Send + Sync {
    /// Get players matching the filter
    async fn players(&self, filter: &PlayerFilter) -> Result<Vec<Player>, ProviderError>;

    /// Get a single player by id
    async fn player(&self, player_id: PlayerId) -> Result<Player, ProviderError>;

    /// Get the distinct positions, sorted
    async fn positions(&self) -> Result<Vec<String>, ProviderError>;

    /// Get the distinct schools, sorted
    async fn schools(&self) -> Result<Vec<String>, ProviderError>;

    /// Get the members of a big board in rank order (index 0 = rank 1)
    async fn big_board(&self, view: &BigBoardView) -> Result<Vec<Player>, ProviderError>;

    /// Add a player to a big board
    ///
    /// Fails with `Conflict` if the player is already a member.
    async fn add_to_board(
        &self,
        view: &BigBoardView,
        player_id: PlayerId,
    ) -> Result<(), ProviderError>;

    /// Remove a player from a big board
    async fn remove_from_board(
        &self,
        view: &BigBoardView,
        player_id: PlayerId,
    ) -> Result<(), ProviderError>;

    /// Replace the full ordered id sequence of a big board
    async fn reorder_board(
        &self,
        view: &BigBoardView,
        player_ids: &[PlayerId],
    ) -> Result<(), ProviderError>;

    /// Get the current ranking-source settings
    async fn board_settings(&self) -> Result<Vec<Board>, ProviderError>;

    /// Replace all ranking-source settings in one request
    async fn save_board_settings(&self, boards: &[Board]) -> Result<(), ProviderError>;
}
