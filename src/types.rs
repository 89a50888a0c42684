/// Shared data model
///
/// Players and ranking sources are owned by the external collaborator; this
/// module holds the typed records the core works with, plus the boundary
/// conversion from loosely-shaped collaborator payloads.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

use crate::data_provider::ProviderError;

pub type PlayerId = i64;

/// One board's rank for a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardRank {
    pub board_key: String,
    pub board_name: String,
    /// Fractional ranks are allowed (consensus boards average several sources)
    pub rank: f64,
    #[serde(default)]
    pub is_primary: bool,
}

/// A number that may arrive as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn as_finite(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Board rank exactly as the collaborator sent it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBoardRank {
    #[serde(default)]
    pub board_key: Option<String>,
    #[serde(default)]
    pub board_name: Option<String>,
    #[serde(default)]
    pub rank: Option<NumberOrText>,
    #[serde(default)]
    pub is_primary: Option<bool>,
}

impl TryFrom<RawBoardRank> for BoardRank {
    type Error = ProviderError;

    fn try_from(raw: RawBoardRank) -> Result<Self, Self::Error> {
        let board_key = raw
            .board_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ProviderError::Malformed("board rank without a board key".to_string()))?;

        let rank = raw
            .rank
            .as_ref()
            .and_then(NumberOrText::as_finite)
            .filter(|r| *r > 0.0)
            .ok_or_else(|| {
                ProviderError::Malformed(format!("board {} has no usable rank", board_key))
            })?;

        let board_name = raw
            .board_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| board_key.clone());

        Ok(BoardRank {
            board_key,
            board_name,
            rank,
            is_primary: raw.is_primary.unwrap_or(false),
        })
    }
}

/// A draft-eligible player, as consumed by the ranking core
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub scouted: bool,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub grade_secondary: String,
    /// Direct rank (personal override or primary-board rank)
    #[serde(default)]
    pub rank: Option<f64>,
    #[serde(default, alias = "weighted_avg_rank", alias = "consensus_rank")]
    pub weighted_average_rank: Option<f64>,
    /// Rank from the original scraped source, used as a last resort
    #[serde(default, alias = "tankathon_rank")]
    pub source_rank: Option<f64>,
    #[serde(default)]
    pub board_ranks: Vec<BoardRank>,
}

/// Player exactly as the collaborator sent it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlayer {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub scouted: bool,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub grade_secondary: Option<String>,
    #[serde(default)]
    pub rank: Option<NumberOrText>,
    #[serde(default, alias = "weighted_avg_rank", alias = "consensus_rank")]
    pub weighted_average_rank: Option<NumberOrText>,
    #[serde(default, alias = "tankathon_rank")]
    pub source_rank: Option<NumberOrText>,
    #[serde(default)]
    pub board_ranks: Vec<RawBoardRank>,
}

impl Player {
    /// Normalize a raw payload into a strict record
    ///
    /// Malformed board ranks are dropped (and logged), duplicate board keys
    /// keep their first entry.
    pub fn from_raw(raw: RawPlayer) -> Self {
        let mut seen = HashSet::new();
        let mut board_ranks = Vec::with_capacity(raw.board_ranks.len());
        for entry in raw.board_ranks {
            match BoardRank::try_from(entry) {
                Ok(rank) => {
                    if seen.insert(rank.board_key.clone()) {
                        board_ranks.push(rank);
                    } else {
                        warn!("PLAYER: {} has duplicate board key {}", raw.id, rank.board_key);
                    }
                }
                Err(e) => warn!("PLAYER: dropping board rank for {}: {}", raw.id, e),
            }
        }

        Self {
            id: raw.id,
            name: raw.name,
            position: raw.position.unwrap_or_default(),
            school: raw.school.unwrap_or_default(),
            scouted: raw.scouted,
            grade: raw.grade.unwrap_or_default(),
            grade_secondary: raw.grade_secondary.unwrap_or_default(),
            rank: raw.rank.as_ref().and_then(NumberOrText::as_finite),
            weighted_average_rank: raw
                .weighted_average_rank
                .as_ref()
                .and_then(NumberOrText::as_finite),
            source_rank: raw.source_rank.as_ref().and_then(NumberOrText::as_finite),
            board_ranks,
        }
    }

    /// True if either grade slot holds something other than whitespace
    pub fn has_any_grade(&self) -> bool {
        !self.grade.trim().is_empty() || !self.grade_secondary.trim().is_empty()
    }
}

/// Provenance of a ranking source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Imported from a pasted or downloaded board
    #[default]
    Imported,
    /// Computed or scraped consensus
    Consensus,
    /// Entered by the scout
    Manual,
}

impl SourceType {
    pub fn name(&self) -> &str {
        match self {
            Self::Imported => "imported",
            Self::Consensus => "consensus",
            Self::Manual => "manual",
        }
    }
}

fn default_weight() -> f64 {
    1.0
}

fn default_visible() -> bool {
    true
}

/// A ranking source with its weighting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub board_key: String,
    pub board_name: String,
    #[serde(default)]
    pub source_type: SourceType,
    #[serde(default)]
    pub player_count: usize,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Board {
    pub fn new(board_key: &str, board_name: &str) -> Self {
        Self {
            board_key: board_key.to_string(),
            board_name: board_name.to_string(),
            source_type: SourceType::default(),
            player_count: 0,
            weight: default_weight(),
            is_primary: false,
            visible: default_visible(),
        }
    }
}

/// Which personal big board is being edited
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "position", rename_all = "snake_case")]
pub enum BigBoardView {
    Overall,
    Position(String),
}

impl BigBoardView {
    pub fn position(&self) -> Option<&str> {
        match self {
            Self::Overall => None,
            Self::Position(p) => Some(p.as_str()),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Self::Overall => "Overall Big Board".to_string(),
            Self::Position(p) => format!("{} Big Board", p),
        }
    }
}

impl Default for BigBoardView {
    fn default() -> Self {
        Self::Overall
    }
}

impl fmt::Display for BigBoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overall => write!(f, "overall"),
            Self::Position(p) => write!(f, "position:{}", p),
        }
    }
}

/// Filters for the player list query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerFilter {
    pub positions: Vec<String>,
    pub max_rank: Option<u32>,
    pub include_scouted: bool,
    pub name: Option<String>,
    pub school: Option<String>,
}
