/// Failure-injecting collaborator for tests
///
/// Wraps an in-memory [`FileStore`], counts calls per operation and fails
/// any operation switched on with [`FlakyProvider::fail`].
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::data_provider::{ProviderError, ScoutDataProvider};
use crate::file_store::{FileStore, StoreDocument};
use crate::types::{BigBoardView, Board, Player, PlayerFilter, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Players,
    Player,
    Positions,
    Schools,
    BigBoard,
    Add,
    Remove,
    Reorder,
    BoardSettings,
    SaveBoardSettings,
}

pub struct FlakyProvider {
    inner: FileStore,
    failing: Mutex<HashSet<Operation>>,
    calls: Mutex<HashMap<Operation, usize>>,
}

impl FlakyProvider {
    pub fn new(document: StoreDocument) -> Self {
        Self {
            inner: FileStore::in_memory(document),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn fail(&self, operation: Operation) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn recover(&self, operation: Operation) {
        self.failing.lock().unwrap().remove(&operation);
    }

    pub fn calls(&self, operation: Operation) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&operation)
            .copied()
            .unwrap_or(0)
    }

    pub async fn snapshot(&self) -> StoreDocument {
        self.inner.snapshot().await
    }

    fn check(&self, operation: Operation) -> Result<(), ProviderError> {
        *self.calls.lock().unwrap().entry(operation).or_insert(0) += 1;
        if self.failing.lock().unwrap().contains(&operation) {
            return Err(ProviderError::Network(format!("{:?}: connection reset", operation)));
        }
        Ok(())
    }
}

#[async_trait]
impl ScoutDataProvider for FlakyProvider {
    async fn players(&self, filter: &PlayerFilter) -> Result<Vec<Player>, ProviderError> {
        self.check(Operation::Players)?;
        self.inner.players(filter).await
    }

    async fn player(&self, player_id: PlayerId) -> Result<Player, ProviderError> {
        self.check(Operation::Player)?;
        self.inner.player(player_id).await
    }

    async fn positions(&self) -> Result<Vec<String>, ProviderError> {
        self.check(Operation::Positions)?;
        self.inner.positions().await
    }

    async fn schools(&self) -> Result<Vec<String>, ProviderError> {
        self.check(Operation::Schools)?;
        self.inner.schools().await
    }

    async fn big_board(&self, view: &BigBoardView) -> Result<Vec<Player>, ProviderError> {
        self.check(Operation::BigBoard)?;
        self.inner.big_board(view).await
    }

    async fn add_to_board(&self, view: &BigBoardView, player_id: PlayerId) -> Result<(), ProviderError> {
        self.check(Operation::Add)?;
        self.inner.add_to_board(view, player_id).await
    }

    async fn remove_from_board(
        &self,
        view: &BigBoardView,
        player_id: PlayerId,
    ) -> Result<(), ProviderError> {
        self.check(Operation::Remove)?;
        self.inner.remove_from_board(view, player_id).await
    }

    async fn reorder_board(
        &self,
        view: &BigBoardView,
        player_ids: &[PlayerId],
    ) -> Result<(), ProviderError> {
        self.check(Operation::Reorder)?;
        self.inner.reorder_board(view, player_ids).await
    }

    async fn board_settings(&self) -> Result<Vec<Board>, ProviderError> {
        self.check(Operation::BoardSettings)?;
        self.inner.board_settings().await
    }

    async fn save_board_settings(&self, boards: &[Board]) -> Result<(), ProviderError> {
        self.check(Operation::SaveBoardSettings)?;
        self.inner.save_board_settings(boards).await
    }
}
