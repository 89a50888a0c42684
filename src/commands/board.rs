use anyhow::Result;
use std::sync::Arc;

use crate::commands::load_controller;
use crate::config::Config;
use crate::controller::BoardRow;
use crate::data_provider::ScoutDataProvider;
use crate::formatting::{align_right, format_header, pad_to_width};
use crate::types::BigBoardView;

/// Width of the board rank column
const RANK_COL_WIDTH: usize = 4;

/// Width of the player name column
const NAME_COL_WIDTH: usize = 24;

/// Width of the preferred rank column
const PREFERRED_COL_WIDTH: usize = 9;

pub fn format_board(title: &str, rows: &[BoardRow]) -> String {
    let mut output = format_header(title, true);

    if rows.is_empty() {
        output.push_str("No players on this board yet.\n");
        return output;
    }

    for row in rows {
        output.push_str(&format!(
            "{} {} {} {}\n",
            align_right(&row.rank_label, RANK_COL_WIDTH),
            pad_to_width(&row.name, NAME_COL_WIDTH),
            pad_to_width(&row.preferred_rank, PREFERRED_COL_WIDTH),
            row.meta
        ));
    }
    output
}

pub async fn run(client: Arc<dyn ScoutDataProvider>, config: &Config, view: BigBoardView) -> Result<()> {
    let controller = load_controller(client, config, view).await?;
    print!("{}", format_board(&controller.title(), &controller.rows()));
    Ok(())
}
