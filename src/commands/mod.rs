pub mod add;
pub mod autosort;
pub mod board;
pub mod candidates;
pub mod player;
pub mod remove;
pub mod reorder;
pub mod seed;
pub mod settings;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::controller::BigBoardController;
use crate::data_provider::ScoutDataProvider;
use crate::types::{BigBoardView, Player, PlayerId};

/// Map the `--position` option to a board view
///
/// A blank position means the overall board.
pub fn parse_view(position: Option<String>) -> BigBoardView {
    match position.map(|p| p.trim().to_uppercase()) {
        Some(p) if !p.is_empty() => BigBoardView::Position(p),
        _ => BigBoardView::Overall,
    }
}

/// Create a controller for a view and load it
pub async fn load_controller(
    client: Arc<dyn ScoutDataProvider>,
    config: &Config,
    view: BigBoardView,
) -> Result<BigBoardController> {
    let title = view.title();
    let mut controller = BigBoardController::new(client, config.clone(), view);
    controller
        .load_big_board()
        .await
        .with_context(|| format!("Failed to load {}", title))?;
    Ok(controller)
}

/// Look up a player, failing with a readable message
pub async fn fetch_player(client: &dyn ScoutDataProvider, player_id: PlayerId) -> Result<Player> {
    client
        .player(player_id)
        .await
        .with_context(|| format!("Failed to fetch player {}", player_id))
}
