use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::{self, Config};
use crate::data_provider::ScoutDataProvider;
use crate::formatting::{align_right, format_header, pad_to_width};
use crate::registry::{BoardSettingsRegistry, BoardShare, WeightingMode};
use crate::types::Board;

/// Width of the board key column
const KEY_COL_WIDTH: usize = 12;

/// Width of the board name column
const NAME_COL_WIDTH: usize = 18;

/// Width of the source type column
const SOURCE_COL_WIDTH: usize = 10;

/// Width of the weight column
const WEIGHT_COL_WIDTH: usize = 6;

/// Width of the share column
const SHARE_COL_WIDTH: usize = 5;

fn mode_name(mode: WeightingMode) -> &'static str {
    match mode {
        WeightingMode::Equal => "equal",
        WeightingMode::Weighted => "weighted",
    }
}

pub fn format_board_list(boards: &[Board], shares: &[BoardShare], mode: WeightingMode) -> String {
    let mut output = format_header("Ranking Sources", true);
    output.push_str(&format!("Weighting: {}\n\n", mode_name(mode)));

    if boards.is_empty() {
        output.push_str("No boards imported yet.\n");
        return output;
    }

    for (board, share) in boards.iter().zip(shares) {
        let mut flags = Vec::new();
        if board.is_primary {
            flags.push("primary");
        }
        if !board.visible {
            flags.push("hidden");
        }

        let line = format!(
            "{} {} {} {} {} {}",
            pad_to_width(&board.board_key, KEY_COL_WIDTH),
            pad_to_width(&board.board_name, NAME_COL_WIDTH),
            pad_to_width(board.source_type.name(), SOURCE_COL_WIDTH),
            align_right(&format!("{}", board.weight), WEIGHT_COL_WIDTH),
            align_right(&share.percent_label(), SHARE_COL_WIDTH),
            flags.join(", ")
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

async fn load_registry(client: Arc<dyn ScoutDataProvider>, config: &Config) -> Result<BoardSettingsRegistry> {
    let mut registry = BoardSettingsRegistry::new(client, config.use_custom_weights);
    registry
        .load()
        .await
        .context("Failed to load board settings")?;
    Ok(registry)
}

fn print_registry(registry: &BoardSettingsRegistry) {
    print!(
        "{}",
        format_board_list(registry.boards(), &registry.summary(), registry.weighting_mode())
    );
}

/// List boards, optionally switching the weighting mode first
pub async fn run_list(
    client: Arc<dyn ScoutDataProvider>,
    config: &Config,
    mode: Option<WeightingMode>,
) -> Result<()> {
    let mut registry = load_registry(client, config).await?;

    if let Some(mode) = mode {
        registry.apply_weighting_mode(mode);
        if registry.is_dirty() {
            registry.save().await.context("Failed to save board settings")?;
        }
        let updated = Config {
            use_custom_weights: mode == WeightingMode::Weighted,
            ..config.clone()
        };
        config::write(&updated).context("Failed to save weighting mode")?;
    }

    print_registry(&registry);
    Ok(())
}

pub async fn run_weight(
    client: Arc<dyn ScoutDataProvider>,
    config: &Config,
    board_key: &str,
    weight: f64,
) -> Result<()> {
    let mut registry = load_registry(client, config).await?;
    registry.set_weight(board_key, weight)?;
    registry.save().await.context("Failed to save board settings")?;
    print_registry(&registry);
    Ok(())
}

pub async fn run_primary(client: Arc<dyn ScoutDataProvider>, config: &Config, board_key: &str) -> Result<()> {
    let mut registry = load_registry(client, config).await?;
    registry.set_primary(board_key)?;
    registry.save().await.context("Failed to save board settings")?;
    print_registry(&registry);
    Ok(())
}

pub async fn run_visibility(
    client: Arc<dyn ScoutDataProvider>,
    config: &Config,
    board_key: &str,
    visible: bool,
) -> Result<()> {
    let mut registry = load_registry(client, config).await?;
    registry.set_visible(board_key, visible)?;
    registry.save().await.context("Failed to save board settings")?;
    print_registry(&registry);
    Ok(())
}
