use anyhow::{Context, Result};
use std::sync::Arc;

use crate::commands::load_controller;
use crate::config::Config;
use crate::data_provider::ScoutDataProvider;
use crate::types::{BigBoardView, PlayerId};

/// Move a board member to a new rank
pub async fn run(
    client: Arc<dyn ScoutDataProvider>,
    config: &Config,
    view: BigBoardView,
    player_id: PlayerId,
    rank: String,
) -> Result<()> {
    let mut controller = load_controller(client, config, view).await?;

    let index = controller
        .move_to_rank(player_id, &rank)
        .await
        .with_context(|| format!("Failed to move player {}", player_id))?;

    let name = controller
        .store()
        .player(player_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| player_id.to_string());
    println!("Moved {} to #{} on {}", name, index + 1, controller.title());
    Ok(())
}
