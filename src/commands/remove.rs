use anyhow::{Context, Result};
use std::sync::Arc;

use crate::commands::load_controller;
use crate::config::Config;
use crate::data_provider::ScoutDataProvider;
use crate::types::{BigBoardView, PlayerId};

pub async fn run(
    client: Arc<dyn ScoutDataProvider>,
    config: &Config,
    view: BigBoardView,
    player_id: PlayerId,
) -> Result<()> {
    let mut controller = load_controller(client, config, view).await?;
    let title = controller.title();

    controller
        .remove_from_board(player_id)
        .await
        .with_context(|| format!("Failed to remove player {} from {}", player_id, title))?;

    if let Some(message) = &controller.status().status_message {
        println!("{}", message);
    }
    Ok(())
}
