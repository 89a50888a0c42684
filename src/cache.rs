use crate::data_provider::{ProviderError, ScoutDataProvider};
use crate::types::{Player, PlayerId};
use cached::proc_macro::cached;

#[cached(
    name = "PLAYER_CACHE",
    type = "cached::TimedSizedCache<PlayerId, Player>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(100, 300) }",
    convert = r#"{ player_id }"#,
    result = true
)]
pub async fn fetch_player_cached(
    client: &dyn ScoutDataProvider,
    player_id: PlayerId,
) -> Result<Player, ProviderError> {
    client.player(player_id).await
}

#[allow(clippy::unused_unit)]
#[cached(
    name = "POSITIONS_CACHE",
    type = "cached::TimedSizedCache<(), Vec<String>>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(1, 3600) }",
    convert = r#"{ () }"#,
    result = true
)]
pub async fn fetch_positions_cached(
    client: &dyn ScoutDataProvider,
) -> Result<Vec<String>, ProviderError> {
    client.positions().await
}
