//! UI-facing surface for the big board screen.
//!
//! [`BigBoardController`] wires one [`BigBoardStore`], the
//! [`BoardSettingsRegistry`] and the active [`DragSession`] together, and
//! turns every failure into a status notice instead of propagating it
//! further than the caller.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::aggregate::{self, preferred_rank_label};
use crate::cache;
use crate::candidates::rank_candidates;
use crate::config::Config;
use crate::data_provider::ScoutDataProvider;
use crate::drag::{DragSession, DragSource, DropOutcome, DropPreview, ItemBounds};
use crate::error::{BoardError, BoardResult};
use crate::grade::compare_for_auto_sort;
use crate::registry::BoardSettingsRegistry;
use crate::store::{BigBoardStore, Confirmation, Placement, StorePhase};
use crate::types::{BigBoardView, Player, PlayerFilter, PlayerId};

pub const DEFAULT_STATUS_MESSAGE: &str = "Drag players to reorder, or search to add";

pub const AUTO_SORT_PROMPT: &str =
    "Auto-sort will reorder this board by current grades. Manual ordering will be lost. Continue?";

pub const LOAD_FAILED: &str = "Load Failed";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusState {
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl StatusState {
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = false;
    }

    pub fn set_status_error_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = true;
    }

    pub fn reset_status_message(&mut self) {
        self.status_message = Some(DEFAULT_STATUS_MESSAGE.to_string());
        self.status_is_error = false;
    }
}

/// Model for the "add at rank" dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddDialog {
    pub player_id: PlayerId,
    pub title: String,
    pub default_rank: usize,
    pub min_rank: usize,
    pub max_rank: usize,
}

/// One rendered big board line
#[derive(Debug, Clone, PartialEq)]
pub struct BoardRow {
    pub player_id: PlayerId,
    pub rank_label: String,
    pub name: String,
    /// Preferred rank from the ranking sources, "#N" or "Unranked"
    pub preferred_rank: String,
    pub meta: String,
}

/// Parse the rank typed into the add dialog
pub fn parse_rank_input(input: &str) -> BoardResult<usize> {
    match input.trim().parse::<i64>() {
        Ok(rank) if rank >= 1 => Ok(rank as usize),
        _ => Err(BoardError::InvalidRank(input.to_string())),
    }
}

pub struct BigBoardController {
    provider: Arc<dyn ScoutDataProvider>,
    config: Config,
    store: BigBoardStore,
    registry: BoardSettingsRegistry,
    drag: Option<DragSession>,
    status: StatusState,
}

impl BigBoardController {
    pub fn new(provider: Arc<dyn ScoutDataProvider>, config: Config, view: BigBoardView) -> Self {
        let store = BigBoardStore::new(provider.clone(), view);
        let registry = BoardSettingsRegistry::new(provider.clone(), config.use_custom_weights);
        let mut status = StatusState::default();
        status.reset_status_message();
        Self {
            provider,
            config,
            store,
            registry,
            drag: None,
            status,
        }
    }

    pub fn status(&self) -> &StatusState {
        &self.status
    }

    pub fn store(&self) -> &BigBoardStore {
        &self.store
    }

    pub fn registry(&self) -> &BoardSettingsRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BoardSettingsRegistry {
        &mut self.registry
    }

    pub fn view(&self) -> &BigBoardView {
        self.store.view()
    }

    pub fn title(&self) -> String {
        self.store.view().title()
    }

    /// Surface an error as a notice and pass the result through
    fn report<T>(&mut self, result: BoardResult<T>) -> BoardResult<T> {
        if let Err(e) = &result {
            warn!("BOARD: {:?} failure: {}", e.kind(), e);
            self.status.set_status_error_message(e.to_string());
        }
        result
    }

    /// Load board settings and the current view
    ///
    /// Settings failing to load is reported but does not stop the board
    /// from loading; ranks then average with default weights.
    pub async fn load_big_board(&mut self) -> BoardResult<()> {
        if let Err(e) = self.registry.load().await {
            warn!("BOARD: board settings unavailable: {}", e);
            self.status.set_status_error_message(e.to_string());
        }
        let result = self.store.load().await;
        self.report(result)
    }

    /// Switch to another view, discarding any drag in progress
    pub async fn set_view(&mut self, view: BigBoardView) -> BoardResult<()> {
        let view = match view {
            BigBoardView::Position(position) => {
                let position = position.trim().to_string();
                if position.is_empty() {
                    return self.report(Err(BoardError::EmptyBoardSelection));
                }
                BigBoardView::Position(position)
            }
            BigBoardView::Overall => BigBoardView::Overall,
        };

        debug!("BOARD: switching {} -> {}", self.store.view(), view);
        self.drag = None;
        self.store.close();
        self.store = BigBoardStore::new(self.provider.clone(), view);
        let result = self.store.load().await;
        self.report(result)
    }

    /// Players that could be added to this view, best suggestions first
    pub async fn search_candidates(&mut self, query: &str) -> BoardResult<Vec<Player>> {
        let query = query.trim();
        let filter = PlayerFilter {
            positions: self
                .store
                .view()
                .position()
                .map(|p| vec![p.to_string()])
                .unwrap_or_default(),
            include_scouted: true,
            name: (!query.is_empty()).then(|| query.to_string()),
            ..Default::default()
        };

        let result = self
            .provider
            .players(&filter)
            .await
            .map_err(BoardError::from)
            .map(|players| {
                rank_candidates(players, &self.store.member_ids(), self.config.candidate_limit())
            });
        self.report(result)
    }

    pub fn open_add_dialog(&self, player: &Player) -> AddDialog {
        let bottom = self.store.len() + 1;
        AddDialog {
            player_id: player.id,
            title: format!("Add {} to Big Board", player.name),
            default_rank: bottom,
            min_rank: 1,
            max_rank: bottom,
        }
    }

    fn position_of(&self, player_id: PlayerId) -> Option<usize> {
        self.store.ids().iter().position(|id| *id == player_id)
    }

    async fn add(&mut self, player: &Player, placement: Placement) -> BoardResult<usize> {
        self.store.add_player(player.id, placement).await?;
        let index = self
            .position_of(player.id)
            .ok_or(BoardError::NotOnBoard(player.id))?;
        self.status
            .set_status_message(format!("Added {} at #{}", player.name, index + 1));
        Ok(index)
    }

    /// Add a player at the rank typed into the dialog, returning its index
    ///
    /// Ranks past the end of the board go to the bottom.
    pub async fn confirm_add_to_rank(&mut self, player: &Player, rank_input: &str) -> BoardResult<usize> {
        let result = match parse_rank_input(rank_input) {
            Ok(rank) => {
                let rank = rank.min(self.store.len() + 1);
                self.add(player, Placement::Rank(rank)).await
            }
            Err(e) => Err(e),
        };
        self.report(result)
    }

    /// Add a player wherever its grade puts it
    pub async fn confirm_add(&mut self, player: &Player) -> BoardResult<usize> {
        let result = self.add(player, Placement::Default).await;
        self.report(result)
    }

    pub async fn confirm_add_to_bottom(&mut self, player: &Player) -> BoardResult<usize> {
        let result = self.add(player, Placement::Bottom).await;
        self.report(result)
    }

    /// Move a member to a typed rank, returning its new index
    pub async fn move_to_rank(&mut self, player_id: PlayerId, rank_input: &str) -> BoardResult<usize> {
        let result = if !self.store.contains(player_id) {
            Err(BoardError::NotOnBoard(player_id))
        } else {
            match parse_rank_input(rank_input) {
                Ok(rank) => self.store.insert_at_rank(player_id, rank).await,
                Err(e) => Err(e),
            }
        };
        if let Ok(index) = result {
            self.status
                .set_status_message(format!("Moved to #{}", index + 1));
        }
        self.report(result)
    }

    pub async fn remove_from_board(&mut self, player_id: PlayerId) -> BoardResult<()> {
        let name = self
            .store
            .player(player_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("Player {}", player_id));
        let result = self.store.remove(player_id).await;
        if result.is_ok() {
            self.status.set_status_message(format!("Removed {}", name));
        }
        self.report(result)
    }

    /// Re-sort the board by grade once the prompt has been answered
    pub async fn auto_sort(&mut self, confirmation: Confirmation) -> BoardResult<bool> {
        let result = self.store.auto_sort(confirmation, compare_for_auto_sort).await;
        if let Ok(true) = result {
            self.status
                .set_status_message(format!("{} sorted by grade", self.title()));
        }
        self.report(result)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Begin a drag of a member or of a suggested player
    pub fn drag_start(&mut self, source: DragSource, player_id: PlayerId) -> BoardResult<()> {
        let check = match self.store.phase() {
            StorePhase::Ready => match source {
                DragSource::Board if !self.store.contains(player_id) => {
                    Err(BoardError::NotOnBoard(player_id))
                }
                DragSource::AddCandidate if self.store.contains(player_id) => {
                    Err(BoardError::AlreadyOnBoard(player_id))
                }
                _ => Ok(()),
            },
            StorePhase::Mutating => Err(BoardError::Busy),
            StorePhase::Closed => Err(BoardError::Closed),
            StorePhase::Idle | StorePhase::Loading => Err(BoardError::NotLoaded),
        };
        self.report(check)?;

        self.drag = Some(DragSession::start(
            source,
            player_id,
            self.config.drag.metrics(),
        ));
        Ok(())
    }

    /// Move the placeholder; `items` excludes the dragged player
    pub fn drag_over(&mut self, items: &[ItemBounds], pointer_y: f64) -> Option<DropPreview> {
        self.drag
            .as_mut()
            .map(|session| session.on_drag_over(items, pointer_y))
    }

    /// Finish the drag, returning the player's new index if anything changed
    pub async fn drop(&mut self) -> BoardResult<Option<usize>> {
        let Some(session) = self.drag.take() else {
            return Ok(None);
        };

        let result = match session.on_drop() {
            None => Ok(None),
            Some(DropOutcome::Move { player_id, index }) => {
                self.store.move_via_drag(player_id, index).await.map(Some)
            }
            Some(DropOutcome::Add { player_id, index }) => {
                let placement = index.map_or(Placement::Default, |i| Placement::Rank(i + 1));
                match self.store.add_player(player_id, placement).await {
                    Ok(()) => Ok(self.position_of(player_id)),
                    Err(e) => Err(e),
                }
            }
        };
        self.report(result)
    }

    /// Abandon the drag without changing anything
    pub fn drag_end(&mut self) {
        if self.drag.take().is_some() {
            debug!("DRAG: cancelled");
        }
    }

    /// Rows for the board list, in rank order
    pub fn rows(&self) -> Vec<BoardRow> {
        let weights = self.registry.weights();
        let use_custom_weights = self.registry.use_custom_weights();

        self.store
            .ids()
            .iter()
            .enumerate()
            .filter_map(|(index, id)| self.store.player(*id).map(|p| (index, p)))
            .map(|(index, player)| {
                let mut meta = vec![
                    non_empty_or(&player.position, "N/A"),
                    non_empty_or(&player.school, "Unknown"),
                ];
                if self.config.show_consensus_on_board {
                    // the collaborator's average only stands in when no board ranks the player
                    let consensus = if player.board_ranks.is_empty() {
                        player.weighted_average_rank
                    } else {
                        aggregate::weighted_average(
                            &player.board_ranks,
                            &weights,
                            use_custom_weights,
                        )
                    }
                    .filter(|r| r.is_finite() && *r > 0.0);
                    meta.push(match consensus {
                        Some(rank) => format!("Consensus Grade #{}", rank.round()),
                        None => "Consensus Grade N/A".to_string(),
                    });
                }
                if !player.grade.trim().is_empty() {
                    meta.push(player.grade.trim().to_string());
                }

                BoardRow {
                    player_id: player.id,
                    rank_label: format!("#{}", index + 1),
                    name: player.name.clone(),
                    preferred_rank: preferred_rank_label(player),
                    meta: meta.join(" • "),
                }
            })
            .collect()
    }

    /// Fetch a player for the report panel
    pub async fn open_player_report(&mut self, player_id: PlayerId) -> Option<Player> {
        match cache::fetch_player_cached(self.provider.as_ref(), player_id).await {
            Ok(player) => Some(player),
            Err(e) => {
                warn!("BOARD: report for {} failed: {}", player_id, e);
                self.status.set_status_error_message(LOAD_FAILED.to_string());
                None
            }
        }
    }

    /// Positions for the view selector
    pub async fn positions(&mut self) -> BoardResult<Vec<String>> {
        let result = cache::fetch_positions_cached(self.provider.as_ref())
            .await
            .map_err(BoardError::from);
        self.report(result)
    }

    pub async fn save_settings(&mut self) -> BoardResult<()> {
        let result = self.registry.save().await;
        if result.is_ok() {
            self.status
                .set_status_message("Board settings saved".to_string());
        }
        self.report(result)
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::file_store::StoreDocument;
    use crate::fixtures;
    use crate::testing::{FlakyProvider, Operation};

    async fn controller_with(
        document: StoreDocument,
        config: Config,
    ) -> (Arc<FlakyProvider>, BigBoardController) {
        let provider = Arc::new(FlakyProvider::new(document));
        let mut controller =
            BigBoardController::new(provider.clone(), config, BigBoardView::Overall);
        controller.load_big_board().await.unwrap();
        (provider, controller)
    }

    async fn controller() -> (Arc<FlakyProvider>, BigBoardController) {
        controller_with(fixtures::create_mock_document(), Config::default()).await
    }

    fn player(id: PlayerId) -> Player {
        fixtures::create_mock_players()
            .into_iter()
            .find(|p| p.id == id)
            .unwrap()
    }

    /// 40px rows with 10px gaps
    fn items(count: usize) -> Vec<ItemBounds> {
        (0..count)
            .map(|i| {
                let top = i as f64 * 50.0;
                ItemBounds::new(top, top + 40.0)
            })
            .collect()
    }

    fn ids(controller: &BigBoardController) -> Vec<PlayerId> {
        controller.store().ids().to_vec()
    }

    #[test]
    fn test_parse_rank_input() {
        assert_eq!(parse_rank_input(" 3 "), Ok(3));
        assert_eq!(parse_rank_input("999"), Ok(999));
        assert!(parse_rank_input("0").is_err());
        assert!(parse_rank_input("-2").is_err());
        assert!(parse_rank_input("2.5").is_err());
        assert!(parse_rank_input("first").is_err());
    }

    #[test]
    fn test_status_state() {
        let mut status = StatusState::default();
        status.set_status_error_message("boom".to_string());
        assert!(status.status_is_error);

        status.reset_status_message();
        assert_eq!(status.status_message.as_deref(), Some(DEFAULT_STATUS_MESSAGE));
        assert!(!status.status_is_error);
    }

    #[tokio::test]
    async fn test_rows() {
        let (_, controller) = controller().await;
        let rows = controller.rows();

        assert_eq!(rows.len(), 5);
        assert_eq!(controller.title(), "Overall Big Board");
        assert_eq!(rows[0].rank_label, "#1");
        assert_eq!(rows[0].name, "Travis Hunter");
        assert_eq!(rows[0].preferred_rank, "#1");
        assert_eq!(
            rows[0].meta,
            "CB • Colorado • Consensus Grade #1 • Poker Chip - Purple"
        );
        // Will Campbell: (5 + 6) / 2 rounds up, no grade
        assert_eq!(rows[2].meta, "OT • LSU • Consensus Grade #6");
    }

    #[tokio::test]
    async fn test_rows_without_consensus() {
        let config = Config {
            show_consensus_on_board: false,
            ..Config::default()
        };
        let (_, controller) = controller_with(fixtures::create_mock_document(), config).await;

        assert_eq!(controller.rows()[2].meta, "OT • LSU");
    }

    #[tokio::test]
    async fn test_rows_for_player_without_ranks() {
        let (_, mut controller) = controller().await;

        controller.confirm_add_to_bottom(&player(42)).await.unwrap();

        let row = controller.rows().pop().unwrap();
        assert_eq!(row.rank_label, "#6");
        assert_eq!(row.meta, "QB • Alabama • Consensus Grade N/A");
        assert_eq!(row.preferred_rank, "#58");
    }

    #[tokio::test]
    async fn test_rows_when_every_weight_is_zero() {
        let (_, mut controller) = controller().await;
        controller
            .set_view(BigBoardView::Position("QB".to_string()))
            .await
            .unwrap();

        let registry = controller.registry_mut();
        registry.set_use_custom_weights(true);
        for key in ["consensus", "espn", "athletic", "pff"] {
            registry.set_weight(key, 0.0).unwrap();
        }

        let rows = controller.rows();
        assert_eq!(rows[1].name, "Arch Manning");
        assert_eq!(rows[1].meta, "QB • Texas • Consensus Grade N/A");
    }

    #[tokio::test]
    async fn test_rows_use_collaborator_average_without_board_ranks() {
        let mut document = fixtures::create_mock_document();
        if let Some(milroe) = document.players.iter_mut().find(|p| p.id == 42) {
            milroe.weighted_average_rank = Some(56.6);
        }
        let (_, mut controller) = controller_with(document, Config::default()).await;

        controller.confirm_add_to_bottom(&player(42)).await.unwrap();

        let row = controller.rows().pop().unwrap();
        assert_eq!(row.meta, "QB • Alabama • Consensus Grade #57");
    }

    #[tokio::test]
    async fn test_add_dialog_defaults() {
        let (_, controller) = controller().await;

        let dialog = controller.open_add_dialog(&player(3));

        assert_eq!(dialog.title, "Add Tetairoa McMillan to Big Board");
        assert_eq!(dialog.default_rank, 6);
        assert_eq!(dialog.max_rank, 6);
        assert_eq!(dialog.min_rank, 1);
    }

    #[tokio::test]
    async fn test_confirm_add_to_rank_clamps_large_ranks() {
        let mut document = fixtures::create_mock_document();
        document.big_boards[0].player_ids = vec![1, 2, 4];
        let (_, mut controller) = controller_with(document, Config::default()).await;

        let index = controller.confirm_add_to_rank(&player(3), "999").await.unwrap();

        assert_eq!(index, 3);
        assert_eq!(ids(&controller), vec![1, 2, 4, 3]);
        assert!(!controller.status().status_is_error);
    }

    #[tokio::test]
    async fn test_confirm_add_to_rank() {
        let (_, mut controller) = controller().await;

        let index = controller.confirm_add_to_rank(&player(9), "1").await.unwrap();

        assert_eq!(index, 0);
        assert_eq!(ids(&controller), vec![9, 1, 2, 4, 5, 7]);
        assert_eq!(
            controller.status().status_message.as_deref(),
            Some("Added Emeka Egbuka at #1")
        );
    }

    #[tokio::test]
    async fn test_invalid_rank_input_is_rejected_inline() {
        let (provider, mut controller) = controller().await;

        for input in ["0", "abc", ""] {
            let err = controller
                .confirm_add_to_rank(&player(3), input)
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }

        assert_eq!(
            controller.status().status_message.as_deref(),
            Some("Enter a valid board position (1 or greater).")
        );
        assert!(controller.status().status_is_error);
        assert_eq!(provider.calls(Operation::Add), 0);
        assert_eq!(controller.store().len(), 5);
    }

    #[tokio::test]
    async fn test_adding_a_member_is_a_conflict() {
        let (_, mut controller) = controller().await;

        let err = controller.confirm_add_to_bottom(&player(2)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(
            controller.status().status_message.as_deref(),
            Some("Player already exists on this board")
        );
    }

    #[tokio::test]
    async fn test_search_candidates() {
        let (_, mut controller) = controller().await;

        let candidates = controller.search_candidates("  ").await.unwrap();

        let ids: Vec<PlayerId> = candidates.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 9, 8, 6, 42]);
    }

    #[tokio::test]
    async fn test_search_candidates_by_name() {
        let (_, mut controller) = controller().await;

        let candidates = controller.search_candidates("egb").await.unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Emeka Egbuka");
    }

    #[tokio::test]
    async fn test_search_candidates_limit() {
        let config = Config {
            candidate_limit: 2,
            ..Config::default()
        };
        let (_, mut controller) = controller_with(fixtures::create_mock_document(), config).await;

        let candidates = controller.search_candidates("").await.unwrap();

        assert_eq!(candidates.len(), 2);
    }

    #[tokio::test]
    async fn test_positional_view() {
        let (_, mut controller) = controller().await;

        controller
            .set_view(BigBoardView::Position(" QB ".to_string()))
            .await
            .unwrap();

        assert_eq!(controller.title(), "QB Big Board");
        assert_eq!(ids(&controller), vec![7, 6]);
        let candidates = controller.search_candidates("").await.unwrap();
        let candidate_ids: Vec<PlayerId> = candidates.iter().map(|p| p.id).collect();
        assert_eq!(candidate_ids, vec![42]);
    }

    #[tokio::test]
    async fn test_empty_position_is_rejected() {
        let (provider, mut controller) = controller().await;
        let loads = provider.calls(Operation::BigBoard);

        let err = controller
            .set_view(BigBoardView::Position("  ".to_string()))
            .await
            .unwrap_err();

        assert_eq!(err, BoardError::EmptyBoardSelection);
        assert_eq!(controller.view(), &BigBoardView::Overall);
        assert_eq!(provider.calls(Operation::BigBoard), loads);
    }

    #[tokio::test]
    async fn test_switching_views_discards_drag() {
        let (_, mut controller) = controller().await;
        controller.drag_start(DragSource::Board, 1).unwrap();

        controller
            .set_view(BigBoardView::Position("QB".to_string()))
            .await
            .unwrap();

        assert!(!controller.is_dragging());
        assert_eq!(controller.drop().await, Ok(None));
    }

    #[tokio::test]
    async fn test_drag_member_to_bottom() {
        let (_, mut controller) = controller().await;

        controller.drag_start(DragSource::Board, 1).unwrap();
        let preview = controller.drag_over(&items(4), 500.0).unwrap();
        assert_eq!(preview.label, "Drop at #5");

        assert_eq!(controller.drop().await, Ok(Some(4)));
        assert_eq!(ids(&controller), vec![2, 4, 5, 7, 1]);
        assert!(!controller.is_dragging());
    }

    #[tokio::test]
    async fn test_drag_candidate_onto_board() {
        let (_, mut controller) = controller().await;

        controller.drag_start(DragSource::AddCandidate, 3).unwrap();
        controller.drag_over(&items(5), -50.0);

        assert_eq!(controller.drop().await, Ok(Some(0)));
        assert_eq!(ids(&controller), vec![3, 1, 2, 4, 5, 7]);
    }

    #[tokio::test]
    async fn test_drag_candidate_without_slot_uses_grade_order() {
        let (_, mut controller) = controller().await;

        controller.drag_start(DragSource::AddCandidate, 3).unwrap();

        assert_eq!(controller.drop().await, Ok(Some(2)));
    }

    #[tokio::test]
    async fn test_drag_start_checks_membership() {
        let (_, mut controller) = controller().await;

        assert_eq!(
            controller.drag_start(DragSource::Board, 42),
            Err(BoardError::NotOnBoard(42))
        );
        assert_eq!(
            controller.drag_start(DragSource::AddCandidate, 1),
            Err(BoardError::AlreadyOnBoard(1))
        );
        assert!(!controller.is_dragging());
    }

    #[tokio::test]
    async fn test_drag_end_cancels() {
        let (provider, mut controller) = controller().await;

        controller.drag_start(DragSource::Board, 1).unwrap();
        controller.drag_over(&items(4), 500.0);
        controller.drag_end();

        assert_eq!(controller.drop().await, Ok(None));
        assert_eq!(provider.calls(Operation::Reorder), 0);
        assert!(controller.drag_over(&items(4), 0.0).is_none());
    }

    #[tokio::test]
    async fn test_failed_drop_rolls_back_with_notice() {
        let (provider, mut controller) = controller().await;
        provider.fail(Operation::Reorder);

        controller.drag_start(DragSource::Board, 1).unwrap();
        controller.drag_over(&items(4), 500.0);
        let err = controller.drop().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transient);
        assert_eq!(ids(&controller), vec![1, 2, 4, 5, 7]);
        assert!(controller.status().status_is_error);
    }

    #[tokio::test]
    async fn test_move_to_rank() {
        let (_, mut controller) = controller().await;

        assert_eq!(controller.move_to_rank(7, "2").await, Ok(1));
        assert_eq!(ids(&controller), vec![1, 7, 2, 4, 5]);

        assert_eq!(
            controller.move_to_rank(42, "1").await,
            Err(BoardError::NotOnBoard(42))
        );
        assert!(controller.move_to_rank(7, "zero").await.is_err());
        assert_eq!(ids(&controller), vec![1, 7, 2, 4, 5]);
    }

    #[tokio::test]
    async fn test_remove_from_board() {
        let (_, mut controller) = controller().await;

        controller.remove_from_board(4).await.unwrap();

        assert_eq!(ids(&controller), vec![1, 2, 5, 7]);
        assert_eq!(
            controller.status().status_message.as_deref(),
            Some("Removed Will Campbell")
        );
    }

    #[tokio::test]
    async fn test_auto_sort() {
        let (_, mut controller) = controller().await;

        assert_eq!(controller.auto_sort(Confirmation::Cancelled).await, Ok(false));
        assert_eq!(ids(&controller), vec![1, 2, 4, 5, 7]);

        assert_eq!(controller.auto_sort(Confirmation::Confirmed).await, Ok(true));
        assert_eq!(ids(&controller), vec![1, 7, 5, 2, 4]);
    }

    #[tokio::test]
    async fn test_player_report() {
        let (_, mut controller) = controller().await;

        let report = controller.open_player_report(8).await.unwrap();
        assert_eq!(report.name, "Luther Burden");

        assert!(controller.open_player_report(9999).await.is_none());
        assert_eq!(controller.status().status_message.as_deref(), Some(LOAD_FAILED));
        assert!(controller.status().status_is_error);
    }

    #[tokio::test]
    async fn test_settings_failure_still_loads_board() {
        let provider = Arc::new(FlakyProvider::new(fixtures::create_mock_document()));
        provider.fail(Operation::BoardSettings);
        let mut controller =
            BigBoardController::new(provider.clone(), Config::default(), BigBoardView::Overall);

        controller.load_big_board().await.unwrap();

        assert_eq!(controller.store().len(), 5);
        assert!(controller.registry().boards().is_empty());
    }

    #[tokio::test]
    async fn test_save_settings() {
        let (provider, mut controller) = controller().await;
        controller.registry_mut().set_primary("espn").unwrap();

        controller.save_settings().await.unwrap();

        let saved = provider.snapshot().await.boards;
        assert!(saved.iter().find(|b| b.board_key == "espn").unwrap().is_primary);
        assert_eq!(
            controller.status().status_message.as_deref(),
            Some("Board settings saved")
        );
    }
}
