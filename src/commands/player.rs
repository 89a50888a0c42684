use anyhow::{bail, Result};
use std::collections::HashMap;
use std::sync::Arc;

use crate::aggregate::{
    format_board_rank, preferred_rank_label, weighted_average, weighted_average_label, BoardWeight,
};
use crate::commands::load_controller;
use crate::config::Config;
use crate::data_provider::ScoutDataProvider;
use crate::formatting::{format_header, pad_to_width};
use crate::types::{BigBoardView, Player};

/// Width of the label column in the report
const LABEL_COL_WIDTH: usize = 18;

fn line(label: &str, value: &str) -> String {
    format!("{}{}\n", pad_to_width(label, LABEL_COL_WIDTH), value)
}

fn or_dash(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

pub fn format_player_report(
    player: &Player,
    weights: &HashMap<String, BoardWeight>,
    use_custom_weights: bool,
) -> String {
    let mut output = format_header(&player.name, true);
    output.push_str(&line("Position:", or_dash(&player.position)));
    output.push_str(&line("School:", or_dash(&player.school)));
    output.push_str(&line("Scouted:", if player.scouted { "yes" } else { "no" }));
    output.push_str(&line("Grade:", or_dash(&player.grade)));
    if !player.grade_secondary.trim().is_empty() {
        output.push_str(&line("Secondary grade:", player.grade_secondary.trim()));
    }
    output.push_str(&line("Preferred rank:", &preferred_rank_label(player)));

    output.push('\n');
    output.push_str(&format_header("Board Ranks", false));
    if player.board_ranks.is_empty() {
        output.push_str("Not ranked on any board.\n");
    }
    for entry in &player.board_ranks {
        let hidden = weights
            .get(&entry.board_key)
            .is_some_and(|w| !w.visible);
        let rank = format_board_rank(entry.rank);
        let value = if hidden {
            format!("{} (hidden)", rank)
        } else {
            rank
        };
        output.push_str(&line(&entry.board_name, &value));
    }

    let average = weighted_average(&player.board_ranks, weights, use_custom_weights);
    let label = if use_custom_weights {
        "Weighted average:"
    } else {
        "Average:"
    };
    output.push('\n');
    output.push_str(&line(label, &weighted_average_label(average)));
    output
}

pub async fn run(
    client: Arc<dyn ScoutDataProvider>,
    config: &Config,
    player_id: i64,
) -> Result<()> {
    let mut controller = load_controller(client, config, BigBoardView::Overall).await?;

    let Some(player) = controller.open_player_report(player_id).await else {
        bail!(
            "{}",
            controller
                .status()
                .status_message
                .clone()
                .unwrap_or_default()
        );
    };

    let registry = controller.registry();
    print!(
        "{}",
        format_player_report(&player, &registry.weights(), registry.use_custom_weights())
    );
    Ok(())
}
