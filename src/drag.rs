//! Drag-to-reorder support for the big board list.
//!
//! The pointer position during a drag is turned into a discrete insertion
//! index by [`resolve_drop_index`], a pure function of the visible item
//! geometry, the pointer's vertical coordinate and the previously resolved
//! index. Around each item's midpoint there is a dead zone where the previous
//! index is kept, so the placeholder does not flicker when the pointer hovers
//! near the boundary between two slots.
//!
//! [`DragSession`] tracks one gesture (`start → over* → drop | end`) and never
//! outlives the view it started in.

use tracing::{debug, trace};

use crate::types::PlayerId;

/// Default overlap added above and below each item's slot
pub const DEFAULT_SLOT_PADDING: f64 = 18.0;

/// Default half-height of the dead zone around an item's midpoint
pub const DEFAULT_DEAD_ZONE: f64 = 12.0;

/// Vertical extent of one rendered list item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBounds {
    pub top: f64,
    pub bottom: f64,
}

impl ItemBounds {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn midpoint(&self) -> f64 {
        self.top + (self.bottom - self.top) / 2.0
    }
}

/// Tuning for slot overlap and hysteresis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZoneMetrics {
    pub slot_padding: f64,
    pub dead_zone: f64,
}

impl Default for DropZoneMetrics {
    fn default() -> Self {
        Self {
            slot_padding: DEFAULT_SLOT_PADDING,
            dead_zone: DEFAULT_DEAD_ZONE,
        }
    }
}

/// Resolve the insertion index for a pointer over a vertical list
///
/// `items` are the visible items top-to-bottom, excluding the one being
/// dragged. The result is in `0..=items.len()`.
///
/// Inside an item's dead zone `previous` is returned as-is (clamped to the
/// list), even when it points far from that item, so a stale index can
/// leave the placeholder away from the pointer until it leaves the zone.
pub fn resolve_drop_index(
    items: &[ItemBounds],
    pointer_y: f64,
    previous: Option<usize>,
    metrics: &DropZoneMetrics,
) -> usize {
    for (index, item) in items.iter().enumerate() {
        let slot_top = item.top - metrics.slot_padding;
        let slot_bottom = item.bottom + metrics.slot_padding;

        if pointer_y < slot_top {
            return index;
        }

        if pointer_y <= slot_bottom {
            let midpoint = item.midpoint();
            return if pointer_y < midpoint - metrics.dead_zone {
                index
            } else if pointer_y > midpoint + metrics.dead_zone {
                index + 1
            } else {
                previous.map_or(index + 1, |p| p.min(items.len()))
            };
        }
    }
    items.len()
}

/// Label shown on the drop placeholder
pub fn drop_label(index: usize) -> String {
    format!("Drop at #{}", index + 1)
}

/// Where the dragged player came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    /// A member of the board being reordered
    Board,
    /// A suggestion from the add-to-board list
    AddCandidate,
}

/// Placeholder position while dragging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropPreview {
    pub index: usize,
    pub label: String,
}

/// What to do when a gesture is dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Reorder a member to an index over the sequence without it
    Move { player_id: PlayerId, index: usize },
    /// Add a candidate, at the resolved slot if there was one
    Add {
        player_id: PlayerId,
        index: Option<usize>,
    },
}

/// One in-progress drag gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    source: DragSource,
    dragged_id: PlayerId,
    last_resolved_index: Option<usize>,
    metrics: DropZoneMetrics,
}

impl DragSession {
    pub fn start(source: DragSource, dragged_id: PlayerId, metrics: DropZoneMetrics) -> Self {
        debug!("DRAG: start {:?} player={}", source, dragged_id);
        Self {
            source,
            dragged_id,
            last_resolved_index: None,
            metrics,
        }
    }

    pub fn source(&self) -> DragSource {
        self.source
    }

    pub fn dragged_id(&self) -> PlayerId {
        self.dragged_id
    }

    pub fn last_resolved_index(&self) -> Option<usize> {
        self.last_resolved_index
    }

    /// Handle a pointer move over the list
    ///
    /// Cheap enough to run on every move event; performs no I/O.
    pub fn on_drag_over(&mut self, items: &[ItemBounds], pointer_y: f64) -> DropPreview {
        let index = resolve_drop_index(items, pointer_y, self.last_resolved_index, &self.metrics);
        if self.last_resolved_index != Some(index) {
            trace!("DRAG: placeholder -> {}", index);
        }
        self.last_resolved_index = Some(index);
        DropPreview {
            index,
            label: drop_label(index),
        }
    }

    /// Finish the gesture, consuming the session
    ///
    /// A board drag with no resolved slot has nowhere to go and yields `None`.
    pub fn on_drop(self) -> Option<DropOutcome> {
        debug!(
            "DRAG: drop {:?} player={} at {:?}",
            self.source, self.dragged_id, self.last_resolved_index
        );
        match self.source {
            DragSource::Board => self.last_resolved_index.map(|index| DropOutcome::Move {
                player_id: self.dragged_id,
                index,
            }),
            DragSource::AddCandidate => Some(DropOutcome::Add {
                player_id: self.dragged_id,
                index: self.last_resolved_index,
            }),
        }
    }
}
