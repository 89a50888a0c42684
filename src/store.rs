//! The personal big board for one view.
//!
//! [`BigBoardStore`] owns the ordered member sequence and moves through
//! `Idle → Loading → Ready ⇄ Mutating → Closed`. Every mutation is applied
//! locally first and then persisted with a single full-sequence reorder
//! call; if that call fails the sequence goes back to the last confirmed
//! snapshot.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::data_provider::ScoutDataProvider;
use crate::error::{BoardError, BoardResult};
use crate::types::{BigBoardView, Player, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePhase {
    Idle,
    Loading,
    Ready,
    Mutating,
    Closed,
}

/// Where a newly added player should land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// 1-based rank, clamped to the board
    Rank(usize),
    Bottom,
    /// Wherever the collaborator puts it
    Default,
}

/// Answer to the "reorder this whole board?" prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

/// Move `player_id` to 1-based `target_rank`, returning its new index
///
/// The player is removed first if present, so the rank is measured over
/// the remaining members and clamped to `[1, len + 1]`.
pub fn splice_at_rank(order: &mut Vec<PlayerId>, player_id: PlayerId, target_rank: usize) -> usize {
    order.retain(|id| *id != player_id);
    let index = (target_rank.max(1) - 1).min(order.len());
    order.insert(index, player_id);
    index
}

pub struct BigBoardStore {
    provider: Arc<dyn ScoutDataProvider>,
    view: BigBoardView,
    phase: StorePhase,
    order: Vec<PlayerId>,
    players: HashMap<PlayerId, Player>,
}

impl BigBoardStore {
    pub fn new(provider: Arc<dyn ScoutDataProvider>, view: BigBoardView) -> Self {
        Self {
            provider,
            view,
            phase: StorePhase::Idle,
            order: Vec::new(),
            players: HashMap::new(),
        }
    }

    pub fn view(&self) -> &BigBoardView {
        &self.view
    }

    pub fn phase(&self) -> StorePhase {
        self.phase
    }

    /// Member ids in rank order (index 0 = rank 1)
    pub fn ids(&self) -> &[PlayerId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.order.contains(&player_id)
    }

    pub fn member_ids(&self) -> HashSet<PlayerId> {
        self.order.iter().copied().collect()
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.get(&player_id)
    }

    /// Members in rank order, skipping ids with no loaded record
    pub fn members(&self) -> impl Iterator<Item = &Player> + '_ {
        self.order.iter().filter_map(|id| self.players.get(id))
    }

    /// Fetch the ordered members for this view
    ///
    /// On failure the board is left `Ready` and empty, and the error is
    /// returned for display.
    pub async fn load(&mut self) -> BoardResult<()> {
        if self.phase == StorePhase::Closed {
            return Err(BoardError::Closed);
        }
        debug!("STORE: loading {}", self.view);
        self.phase = StorePhase::Loading;

        let result = self.provider.big_board(&self.view).await;
        self.phase = StorePhase::Ready;
        match result {
            Ok(players) => {
                self.set_members(players);
                debug!("STORE: loaded {} ({} players)", self.view, self.order.len());
                Ok(())
            }
            Err(e) => {
                warn!("STORE: failed to load {}: {}", self.view, e);
                self.order.clear();
                self.players.clear();
                Err(e.into())
            }
        }
    }

    fn set_members(&mut self, players: Vec<Player>) {
        self.order = players.iter().map(|p| p.id).collect();
        self.players = players.into_iter().map(|p| (p.id, p)).collect();
    }

    fn ensure_ready(&self) -> BoardResult<()> {
        match self.phase {
            StorePhase::Ready => Ok(()),
            StorePhase::Mutating => Err(BoardError::Busy),
            StorePhase::Closed => Err(BoardError::Closed),
            StorePhase::Idle | StorePhase::Loading => Err(BoardError::NotLoaded),
        }
    }

    /// Enter `Mutating`, returning the confirmed sequence to roll back to
    fn begin_mutation(&mut self) -> BoardResult<Vec<PlayerId>> {
        self.ensure_ready()?;
        self.phase = StorePhase::Mutating;
        Ok(self.order.clone())
    }

    /// Persist the current sequence, or restore `snapshot` if that fails
    async fn commit(&mut self, snapshot: Vec<PlayerId>) -> BoardResult<()> {
        let result = self.provider.reorder_board(&self.view, &self.order).await;
        self.phase = StorePhase::Ready;
        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("STORE: reorder of {} failed, rolling back: {}", self.view, e);
                self.order = snapshot;
                Err(e.into())
            }
        }
    }

    /// Add a player to the backing board, then position it
    ///
    /// Fails fast with `AlreadyOnBoard` for an existing member. The
    /// collaborator add is confirmed and the board refetched before the
    /// player is repositioned. If the refetch fails the current members are
    /// kept and the confirmed player is appended at the bottom.
    pub async fn add_player(&mut self, player_id: PlayerId, placement: Placement) -> BoardResult<()> {
        self.ensure_ready()?;
        if self.contains(player_id) {
            return Err(BoardError::AlreadyOnBoard(player_id));
        }
        if placement == Placement::Rank(0) {
            return Err(BoardError::InvalidRank("0".to_string()));
        }

        self.phase = StorePhase::Mutating;
        if let Err(e) = self.provider.add_to_board(&self.view, player_id).await {
            self.phase = StorePhase::Ready;
            return Err(e.into());
        }
        info!("STORE: added {} to {}", player_id, self.view);

        let refreshed = self.provider.big_board(&self.view).await;
        match refreshed {
            Ok(players) => self.set_members(players),
            Err(e) => {
                warn!("STORE: refetch of {} after add failed: {}", self.view, e);
                self.order.push(player_id);
                if let Ok(player) = self.provider.player(player_id).await {
                    self.players.insert(player_id, player);
                }
                self.phase = StorePhase::Ready;
                return Err(e.into());
            }
        }
        self.phase = StorePhase::Ready;
        if !self.contains(player_id) {
            warn!("STORE: {} missing from {} after add", player_id, self.view);
            return Err(BoardError::NotOnBoard(player_id));
        }

        match placement {
            Placement::Rank(rank) => self.insert_at_rank(player_id, rank).await.map(|_| ()),
            Placement::Bottom => self.insert_at_bottom(player_id).await.map(|_| ()),
            Placement::Default => Ok(()),
        }
    }

    /// Place a player at a 1-based rank and persist, returning its index
    pub async fn insert_at_rank(&mut self, player_id: PlayerId, target_rank: usize) -> BoardResult<usize> {
        if target_rank < 1 {
            return Err(BoardError::InvalidRank(target_rank.to_string()));
        }
        let snapshot = self.begin_mutation()?;
        let index = splice_at_rank(&mut self.order, player_id, target_rank);
        self.commit(snapshot).await?;
        info!("STORE: {} now #{} on {}", player_id, index + 1, self.view);
        Ok(index)
    }

    pub async fn insert_at_bottom(&mut self, player_id: PlayerId) -> BoardResult<usize> {
        let bottom = self.order.len() + 1;
        self.insert_at_rank(player_id, bottom).await
    }

    /// Reorder a member to a drop index
    ///
    /// `index` is measured over the sequence without the dragged player.
    pub async fn move_via_drag(&mut self, player_id: PlayerId, index: usize) -> BoardResult<usize> {
        self.ensure_ready()?;
        let Some(from) = self.order.iter().position(|id| *id == player_id) else {
            return Err(BoardError::NotOnBoard(player_id));
        };

        let snapshot = self.begin_mutation()?;
        self.order.remove(from);
        let to = index.min(self.order.len());
        self.order.insert(to, player_id);
        debug!("STORE: drag {} from {} to {}", player_id, from, to);

        self.commit(snapshot).await?;
        Ok(to)
    }

    /// Re-sort every member by `compare` and persist the result
    ///
    /// Members without a loaded record keep their relative order at the end.
    /// Returns false when the prompt was cancelled.
    pub async fn auto_sort<F>(&mut self, confirmation: Confirmation, compare: F) -> BoardResult<bool>
    where
        F: Fn(&Player, &Player) -> Ordering,
    {
        if confirmation == Confirmation::Cancelled {
            debug!("STORE: auto-sort of {} cancelled", self.view);
            return Ok(false);
        }
        let snapshot = self.begin_mutation()?;

        let players = &self.players;
        self.order
            .sort_by(|a, b| match (players.get(a), players.get(b)) {
                (Some(pa), Some(pb)) => compare(pa, pb),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });

        self.commit(snapshot).await?;
        info!("STORE: auto-sorted {}", self.view);
        Ok(true)
    }

    /// Remove a member from the backing board and persist the new order
    pub async fn remove(&mut self, player_id: PlayerId) -> BoardResult<()> {
        self.ensure_ready()?;
        if !self.contains(player_id) {
            return Err(BoardError::NotOnBoard(player_id));
        }

        self.begin_mutation()?;
        if let Err(e) = self.provider.remove_from_board(&self.view, player_id).await {
            self.phase = StorePhase::Ready;
            warn!("STORE: remove of {} from {} failed: {}", player_id, self.view, e);
            return Err(e.into());
        }

        self.order.retain(|id| *id != player_id);
        self.players.remove(&player_id);
        // the removal itself is confirmed, so it is the new rollback point
        let snapshot = self.order.clone();
        self.commit(snapshot).await?;
        info!("STORE: removed {} from {}", player_id, self.view);
        Ok(())
    }

    /// Stop accepting work; later calls fail with `Closed`
    pub fn close(&mut self) {
        debug!("STORE: closing {}", self.view);
        self.phase = StorePhase::Closed;
        self.order.clear();
        self.players.clear();
    }
}
