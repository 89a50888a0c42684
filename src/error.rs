use thiserror::Error;

use crate::data_provider::ProviderError;
use crate::types::PlayerId;

/// How a failure should be surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Collaborator unreachable or failed; local state was rolled back
    Transient,
    /// Rejected before any network call; nothing changed
    Validation,
    /// The request contradicts current remote state
    Conflict,
}

/// Big board and board-settings errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    #[error("Enter a valid board position (1 or greater).")]
    InvalidRank(String),

    #[error("Select a position for a positional board")]
    EmptyBoardSelection,

    #[error("Player already exists on this board")]
    AlreadyOnBoard(PlayerId),

    #[error("Player {0} is not on this board")]
    NotOnBoard(PlayerId),

    #[error("Unknown board: {0}")]
    UnknownBoard(String),

    #[error("Board weight must not be negative (got {0})")]
    NegativeWeight(f64),

    #[error("Another change to this board is still being saved")]
    Busy,

    #[error("Big board is not loaded")]
    NotLoaded,

    #[error("Big board view is closed")]
    Closed,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl BoardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyOnBoard(_) | Self::Provider(ProviderError::Conflict(_)) => {
                ErrorKind::Conflict
            }
            Self::Provider(_) => ErrorKind::Transient,
            _ => ErrorKind::Validation,
        }
    }
}

/// Result type for board operations
pub type BoardResult<T> = Result<T, BoardError>;
