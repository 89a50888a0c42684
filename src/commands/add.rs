use anyhow::{Context, Result};
use std::sync::Arc;

use crate::commands::{fetch_player, load_controller};
use crate::config::Config;
use crate::data_provider::ScoutDataProvider;
use crate::types::{BigBoardView, PlayerId};

/// Where the `add` command puts the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddAt {
    /// Rank exactly as typed, validated by the controller
    Rank(String),
    Bottom,
    /// Grade-first position chosen by the store
    Default,
}

impl AddAt {
    pub fn from_args(rank: Option<String>, bottom: bool) -> Self {
        match (rank, bottom) {
            (Some(rank), _) => Self::Rank(rank),
            (None, true) => Self::Bottom,
            (None, false) => Self::Default,
        }
    }
}

pub async fn run(
    client: Arc<dyn ScoutDataProvider>,
    config: &Config,
    view: BigBoardView,
    player_id: PlayerId,
    at: AddAt,
) -> Result<()> {
    let player = fetch_player(client.as_ref(), player_id).await?;
    let mut controller = load_controller(client, config, view).await?;
    let title = controller.title();

    let index = match at {
        AddAt::Rank(rank) => controller.confirm_add_to_rank(&player, &rank).await,
        AddAt::Bottom => controller.confirm_add_to_bottom(&player).await,
        AddAt::Default => controller.confirm_add(&player).await,
    }
    .with_context(|| format!("Failed to add {} to {}", player.name, title))?;

    println!("Added {} to {} at #{}", player.name, title, index + 1);
    Ok(())
}
