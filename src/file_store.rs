/// TOML-backed implementation of the scout data collaborator
///
/// Holds players, ranking sources and per-view big board orderings in one
/// document. When opened from a path the whole document is rewritten after
/// every write, and a write only takes effect once the file has been saved;
/// `in_memory` stores never touch the filesystem.
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::data_provider::{ProviderError, ScoutDataProvider};
use crate::grade::compare_for_auto_sort;
use crate::types::{BigBoardView, Board, Player, PlayerFilter, PlayerId, RawPlayer};

const OVERALL: &str = "overall";
const POSITION: &str = "position";

/// Ordered members of one big board view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredBigBoard {
    pub board_type: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub player_ids: Vec<PlayerId>,
}

impl StoredBigBoard {
    fn for_view(view: &BigBoardView) -> Self {
        let (board_type, position) = view_key(view);
        Self {
            board_type: board_type.to_string(),
            position: position.map(str::to_string),
            player_ids: Vec::new(),
        }
    }

    fn matches(&self, view: &BigBoardView) -> bool {
        let (board_type, position) = view_key(view);
        self.board_type == board_type && self.position.as_deref() == position
    }
}

fn view_key(view: &BigBoardView) -> (&'static str, Option<&str>) {
    match view {
        BigBoardView::Overall => (OVERALL, None),
        BigBoardView::Position(p) => (POSITION, Some(p.as_str())),
    }
}

/// Read players through the raw boundary shape so loose ranks get normalized
fn deserialize_players<'de, D>(deserializer: D) -> Result<Vec<Player>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<RawPlayer>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(Player::from_raw).collect())
}

/// Everything the store persists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default, deserialize_with = "deserialize_players")]
    pub players: Vec<Player>,
    #[serde(default)]
    pub boards: Vec<Board>,
    #[serde(default)]
    pub big_boards: Vec<StoredBigBoard>,
}

impl StoreDocument {
    fn find_player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    fn big_board(&self, view: &BigBoardView) -> Option<&StoredBigBoard> {
        self.big_boards.iter().find(|b| b.matches(view))
    }

    fn big_board_mut(&mut self, view: &BigBoardView) -> &mut StoredBigBoard {
        let index = match self.big_boards.iter().position(|b| b.matches(view)) {
            Some(index) => index,
            None => {
                self.big_boards.push(StoredBigBoard::for_view(view));
                self.big_boards.len() - 1
            }
        };
        &mut self.big_boards[index]
    }
}

/// Check a player's listed position against a filter position
///
/// Combo positions like "EDGE/DL" match either half.
fn position_matches(player_position: &str, wanted: &str) -> bool {
    player_position.eq_ignore_ascii_case(wanted)
        || player_position
            .split('/')
            .any(|part| part.trim().eq_ignore_ascii_case(wanted))
}

fn matches_filter(player: &Player, filter: &PlayerFilter) -> bool {
    if !filter.include_scouted && player.scouted {
        return false;
    }
    if !filter.positions.is_empty()
        && !filter
            .positions
            .iter()
            .any(|p| position_matches(&player.position, p))
    {
        return false;
    }
    if let Some(max_rank) = filter.max_rank {
        match player.rank {
            Some(rank) if rank <= max_rank as f64 => {}
            _ => return false,
        }
    }
    if let Some(name) = filter.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        if !player.name.to_lowercase().contains(&name.to_lowercase()) {
            return false;
        }
    }
    if let Some(school) = filter.school.as_deref() {
        if !player.school.eq_ignore_ascii_case(school) {
            return false;
        }
    }
    true
}

pub struct FileStore {
    path: Option<PathBuf>,
    document: Mutex<StoreDocument>,
}

impl FileStore {
    /// Create a store that lives only in memory
    pub fn in_memory(document: StoreDocument) -> Self {
        Self {
            path: None,
            document: Mutex::new(document),
        }
    }

    /// Open a store file, starting empty if it does not exist yet
    pub fn open(path: &Path) -> Result<Self, ProviderError> {
        let document = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| ProviderError::Storage(format!("{}: {}", path.display(), e)))?;
            toml::from_str(&content)
                .map_err(|e| ProviderError::Malformed(format!("{}: {}", path.display(), e)))?
        } else {
            debug!("STORE: {} does not exist, starting empty", path.display());
            StoreDocument::default()
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            document: Mutex::new(document),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Replace the whole document (and write it out)
    pub async fn replace(&self, document: StoreDocument) -> Result<(), ProviderError> {
        let mut current = self.document.lock().await;
        self.persist(&document)?;
        *current = document;
        Ok(())
    }

    /// Copy of the current document
    pub async fn snapshot(&self) -> StoreDocument {
        self.document.lock().await.clone()
    }

    fn persist(&self, document: &StoreDocument) -> Result<(), ProviderError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ProviderError::Storage(format!("{}: {}", parent.display(), e)))?;
        }
        let content =
            toml::to_string_pretty(document).map_err(|e| ProviderError::Storage(e.to_string()))?;
        fs::write(path, content)
            .map_err(|e| ProviderError::Storage(format!("{}: {}", path.display(), e)))?;
        debug!("STORE: wrote {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl ScoutDataProvider for FileStore {
    async fn players(&self, filter: &PlayerFilter) -> Result<Vec<Player>, ProviderError> {
        let document = self.document.lock().await;
        let mut players: Vec<Player> = document
            .players
            .iter()
            .filter(|p| matches_filter(p, filter))
            .cloned()
            .collect();
        players.sort_by(|a, b| {
            let a_rank = a.rank.unwrap_or(f64::INFINITY);
            let b_rank = b.rank.unwrap_or(f64::INFINITY);
            a_rank.total_cmp(&b_rank).then_with(|| a.name.cmp(&b.name))
        });
        Ok(players)
    }

    async fn player(&self, player_id: PlayerId) -> Result<Player, ProviderError> {
        let document = self.document.lock().await;
        document
            .find_player(player_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("Player {} not found", player_id)))
    }

    async fn positions(&self) -> Result<Vec<String>, ProviderError> {
        let document = self.document.lock().await;
        let mut positions: Vec<String> = document
            .players
            .iter()
            .map(|p| p.position.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        positions.sort();
        Ok(positions)
    }

    async fn schools(&self) -> Result<Vec<String>, ProviderError> {
        let document = self.document.lock().await;
        let mut schools: Vec<String> = document
            .players
            .iter()
            .map(|p| p.school.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        schools.sort();
        Ok(schools)
    }

    async fn big_board(&self, view: &BigBoardView) -> Result<Vec<Player>, ProviderError> {
        let document = self.document.lock().await;
        let Some(board) = document.big_board(view) else {
            return Ok(Vec::new());
        };
        Ok(board
            .player_ids
            .iter()
            .filter_map(|id| document.find_player(*id).cloned())
            .collect())
    }

    async fn add_to_board(
        &self,
        view: &BigBoardView,
        player_id: PlayerId,
    ) -> Result<(), ProviderError> {
        let mut document = self.document.lock().await;
        if document
            .big_board(view)
            .is_some_and(|b| b.player_ids.contains(&player_id))
        {
            return Err(ProviderError::Conflict(
                "Player already exists on this board".to_string(),
            ));
        }
        let player = document
            .find_player(player_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound("Player not found".to_string()))?;

        // Grade-first default insertion: before the first member that sorts after
        let insert_at = {
            let members = document
                .big_board(view)
                .map(|b| b.player_ids.clone())
                .unwrap_or_default();
            members
                .iter()
                .position(|id| {
                    document
                        .find_player(*id)
                        .is_some_and(|member| compare_for_auto_sort(&player, member).is_lt())
                })
                .unwrap_or(members.len())
        };

        let mut updated = document.clone();
        updated
            .big_board_mut(view)
            .player_ids
            .insert(insert_at, player_id);
        self.persist(&updated)?;
        *document = updated;
        info!("STORE: added {} to {} at #{}", player_id, view, insert_at + 1);
        Ok(())
    }

    async fn remove_from_board(
        &self,
        view: &BigBoardView,
        player_id: PlayerId,
    ) -> Result<(), ProviderError> {
        let mut document = self.document.lock().await;
        let mut updated = document.clone();
        updated
            .big_board_mut(view)
            .player_ids
            .retain(|id| *id != player_id);
        self.persist(&updated)?;
        *document = updated;
        info!("STORE: removed {} from {}", player_id, view);
        Ok(())
    }

    async fn reorder_board(
        &self,
        view: &BigBoardView,
        player_ids: &[PlayerId],
    ) -> Result<(), ProviderError> {
        let mut document = self.document.lock().await;

        let mut seen = HashSet::with_capacity(player_ids.len());
        for id in player_ids {
            if !seen.insert(*id) {
                return Err(ProviderError::Conflict(format!(
                    "Player {} appears twice in the new order",
                    id
                )));
            }
            if document.find_player(*id).is_none() {
                return Err(ProviderError::NotFound(format!("Player {} not found", id)));
            }
        }

        let mut updated = document.clone();
        updated.big_board_mut(view).player_ids = player_ids.to_vec();
        self.persist(&updated)?;
        *document = updated;
        debug!("STORE: reordered {} ({} players)", view, player_ids.len());
        Ok(())
    }

    async fn board_settings(&self) -> Result<Vec<Board>, ProviderError> {
        Ok(self.document.lock().await.boards.clone())
    }

    async fn save_board_settings(&self, boards: &[Board]) -> Result<(), ProviderError> {
        let mut document = self.document.lock().await;
        let updated = StoreDocument {
            boards: boards.to_vec(),
            ..document.clone()
        };
        self.persist(&updated)?;
        *document = updated;
        info!("STORE: saved settings for {} boards", boards.len());
        Ok(())
    }
}
