use anyhow::{bail, Context, Result};

use crate::file_store::FileStore;
use crate::fixtures;

/// Fill the store with the sample prospects and boards
///
/// Refuses to overwrite a store that already has players unless `force` is set.
pub async fn run(store: &FileStore, force: bool) -> Result<()> {
    let existing = store.snapshot().await;
    if !existing.players.is_empty() && !force {
        bail!(
            "Store already has {} players; use --force to replace them",
            existing.players.len()
        );
    }

    let document = fixtures::create_mock_document();
    let (players, boards) = (document.players.len(), document.boards.len());
    store
        .replace(document)
        .await
        .context("Failed to write sample data")?;

    let location = store
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "memory".to_string());
    println!("Seeded {} players and {} boards into {}", players, boards, location);
    Ok(())
}
