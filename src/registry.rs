//! Weight, primary and visibility settings for the ranking sources.
//!
//! Edits are applied in memory and only sent to the collaborator by an
//! explicit [`BoardSettingsRegistry::save`], which sends the whole list.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::aggregate::{effective_weight, BoardWeight};
use crate::data_provider::ScoutDataProvider;
use crate::error::{BoardError, BoardResult};
use crate::types::{Board, SourceType};

/// How boards are combined into a consensus rank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightingMode {
    /// Every visible board counts once
    Equal,
    /// Boards count by their configured weight
    Weighted,
}

/// One board's contribution to the consensus rank
#[derive(Debug, Clone, PartialEq)]
pub struct BoardShare {
    pub board_key: String,
    pub board_name: String,
    pub weight: f64,
    /// Fraction of the total, in `0.0..=1.0`
    pub share: f64,
    pub visible: bool,
    pub is_primary: bool,
}

impl BoardShare {
    pub fn percent_label(&self) -> String {
        format!("{:.0}%", self.share * 100.0)
    }
}

pub struct BoardSettingsRegistry {
    provider: Arc<dyn ScoutDataProvider>,
    boards: Vec<Board>,
    confirmed: Vec<Board>,
    use_custom_weights: bool,
}

impl BoardSettingsRegistry {
    pub fn new(provider: Arc<dyn ScoutDataProvider>, use_custom_weights: bool) -> Self {
        Self {
            provider,
            boards: Vec::new(),
            confirmed: Vec::new(),
            use_custom_weights,
        }
    }

    /// Fetch the board list
    ///
    /// If the collaborator reports several primaries only the first is kept.
    pub async fn load(&mut self) -> BoardResult<()> {
        let mut boards = self.provider.board_settings().await?;

        let mut seen_primary = false;
        for board in boards.iter_mut().filter(|b| b.is_primary) {
            if seen_primary {
                warn!("REGISTRY: clearing extra primary flag on {}", board.board_key);
                board.is_primary = false;
            }
            seen_primary = true;
        }

        debug!("REGISTRY: loaded {} boards", boards.len());
        self.confirmed = boards.clone();
        self.boards = boards;
        Ok(())
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, board_key: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.board_key == board_key)
    }

    fn board_mut(&mut self, board_key: &str) -> BoardResult<&mut Board> {
        self.boards
            .iter_mut()
            .find(|b| b.board_key == board_key)
            .ok_or_else(|| BoardError::UnknownBoard(board_key.to_string()))
    }

    /// True when there are edits not yet saved
    pub fn is_dirty(&self) -> bool {
        self.boards != self.confirmed
    }

    pub fn use_custom_weights(&self) -> bool {
        self.use_custom_weights
    }

    pub fn set_use_custom_weights(&mut self, enabled: bool) {
        debug!("REGISTRY: custom weights {}", if enabled { "on" } else { "off" });
        self.use_custom_weights = enabled;
    }

    pub fn weighting_mode(&self) -> WeightingMode {
        if self.use_custom_weights {
            WeightingMode::Weighted
        } else {
            WeightingMode::Equal
        }
    }

    /// Switch modes; `Equal` also resets every weight to 1
    pub fn apply_weighting_mode(&mut self, mode: WeightingMode) {
        match mode {
            WeightingMode::Equal => {
                for board in &mut self.boards {
                    board.weight = 1.0;
                }
                self.use_custom_weights = false;
            }
            WeightingMode::Weighted => self.use_custom_weights = true,
        }
        debug!("REGISTRY: weighting mode {:?}", mode);
    }

    /// Set a board's weight; negative weights are rejected, non-finite ones become 0
    pub fn set_weight(&mut self, board_key: &str, weight: f64) -> BoardResult<()> {
        let weight = if weight.is_finite() { weight } else { 0.0 };
        if weight < 0.0 {
            return Err(BoardError::NegativeWeight(weight));
        }
        self.board_mut(board_key)?.weight = weight;
        debug!("REGISTRY: {} weight = {}", board_key, weight);
        Ok(())
    }

    /// Make one board primary, clearing the flag everywhere else
    pub fn set_primary(&mut self, board_key: &str) -> BoardResult<()> {
        self.board_mut(board_key)?;
        for board in &mut self.boards {
            board.is_primary = board.board_key == board_key;
        }
        debug!("REGISTRY: primary = {}", board_key);
        Ok(())
    }

    pub fn set_visible(&mut self, board_key: &str, visible: bool) -> BoardResult<()> {
        self.board_mut(board_key)?.visible = visible;
        debug!("REGISTRY: {} visible = {}", board_key, visible);
        Ok(())
    }

    /// The flagged primary, else the first consensus board, else the first board
    pub fn effective_primary(&self) -> Option<&Board> {
        self.boards
            .iter()
            .find(|b| b.is_primary)
            .or_else(|| {
                self.boards
                    .iter()
                    .find(|b| b.source_type == SourceType::Consensus)
            })
            .or_else(|| self.boards.first())
    }

    /// Settings keyed by board, as consumed by the aggregator
    pub fn weights(&self) -> HashMap<String, BoardWeight> {
        self.boards
            .iter()
            .map(|b| {
                (
                    b.board_key.clone(),
                    BoardWeight {
                        weight: b.weight,
                        visible: b.visible,
                    },
                )
            })
            .collect()
    }

    /// Each board's share of the consensus, from in-memory settings only
    pub fn summary(&self) -> Vec<BoardShare> {
        let contribution = |board: &Board| -> f64 {
            if !board.visible {
                0.0
            } else if self.use_custom_weights {
                effective_weight(board.weight)
            } else {
                1.0
            }
        };
        let total: f64 = self.boards.iter().map(contribution).sum();

        self.boards
            .iter()
            .map(|board| BoardShare {
                board_key: board.board_key.clone(),
                board_name: board.board_name.clone(),
                weight: board.weight,
                share: if total > 0.0 {
                    contribution(board) / total
                } else {
                    0.0
                },
                visible: board.visible,
                is_primary: board.is_primary,
            })
            .collect()
    }

    /// Send the full board list in one request
    ///
    /// On failure the in-memory settings go back to the last saved state.
    pub async fn save(&mut self) -> BoardResult<()> {
        match self.provider.save_board_settings(&self.boards).await {
            Ok(()) => {
                self.confirmed = self.boards.clone();
                info!("REGISTRY: saved {} boards", self.boards.len());
                Ok(())
            }
            Err(e) => {
                warn!("REGISTRY: save failed, restoring settings: {}", e);
                self.boards = self.confirmed.clone();
                Err(e.into())
            }
        }
    }
}
