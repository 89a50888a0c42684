use anyhow::{Context, Result};
use std::sync::Arc;

use crate::aggregate::preferred_rank_label;
use crate::commands::load_controller;
use crate::config::Config;
use crate::data_provider::ScoutDataProvider;
use crate::formatting::{align_right, format_header, pad_to_width};
use crate::types::{BigBoardView, Player};

/// Width of the player id column
const ID_COL_WIDTH: usize = 6;

/// Width of the player name column
const NAME_COL_WIDTH: usize = 24;

/// Width of the position column
const POSITION_COL_WIDTH: usize = 8;

/// Width of the preferred rank column
const RANK_COL_WIDTH: usize = 9;

fn scouting_status(player: &Player) -> String {
    if player.scouted {
        "Scouted".to_string()
    } else if !player.grade.trim().is_empty() {
        player.grade.trim().to_string()
    } else if !player.grade_secondary.trim().is_empty() {
        player.grade_secondary.trim().to_string()
    } else {
        "-".to_string()
    }
}

pub fn format_candidates(title: &str, players: &[Player]) -> String {
    let mut output = format_header(&format!("Add to {}", title), false);

    if players.is_empty() {
        output.push_str("No matching players.\n");
        return output;
    }

    for player in players {
        output.push_str(&format!(
            "{} {} {} {} {}\n",
            align_right(&player.id.to_string(), ID_COL_WIDTH),
            pad_to_width(&player.name, NAME_COL_WIDTH),
            pad_to_width(&player.position, POSITION_COL_WIDTH),
            pad_to_width(&preferred_rank_label(player), RANK_COL_WIDTH),
            scouting_status(player)
        ));
    }
    output
}

pub async fn run(
    client: Arc<dyn ScoutDataProvider>,
    config: &Config,
    view: BigBoardView,
    query: Option<String>,
) -> Result<()> {
    let mut controller = load_controller(client, config, view).await?;
    let candidates = controller
        .search_candidates(query.as_deref().unwrap_or(""))
        .await
        .context("Failed to search players")?;

    print!("{}", format_candidates(&controller.title(), &candidates));
    Ok(())
}
