use anyhow::{Context, Result};
use std::sync::Arc;

use crate::commands::board::format_board;
use crate::commands::load_controller;
use crate::config::Config;
use crate::controller::AUTO_SORT_PROMPT;
use crate::data_provider::ScoutDataProvider;
use crate::store::Confirmation;
use crate::types::BigBoardView;

/// Re-sort a board by grade; nothing happens without `--yes`
pub async fn run(
    client: Arc<dyn ScoutDataProvider>,
    config: &Config,
    view: BigBoardView,
    yes: bool,
) -> Result<()> {
    let mut controller = load_controller(client, config, view).await?;

    let confirmation = if yes {
        Confirmation::Confirmed
    } else {
        Confirmation::Cancelled
    };
    let sorted = controller
        .auto_sort(confirmation)
        .await
        .context("Failed to auto-sort board")?;

    if sorted {
        print!("{}", format_board(&controller.title(), &controller.rows()));
    } else {
        println!("{}", AUTO_SORT_PROMPT);
        println!("Re-run with --yes to confirm.");
    }
    Ok(())
}
