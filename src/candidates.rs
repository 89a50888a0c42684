//! Ordering of players not yet on the active board.
//!
//! Suggestions list scouted players first, then graded ones, then the rest;
//! ties go to the better direct rank, then to the name.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::types::{Player, PlayerId};

/// Priority tier for add-to-board suggestions (lower sorts first)
pub fn candidate_tier(player: &Player) -> u8 {
    if player.scouted {
        0
    } else if player.has_any_grade() {
        1
    } else {
        2
    }
}

fn rank_key(player: &Player) -> f64 {
    player
        .rank
        .filter(|r| r.is_finite())
        .unwrap_or(f64::INFINITY)
}

/// Compare two candidates
///
/// Strict weak ordering: tier, then ascending rank (missing ranks last), then name.
pub fn compare_candidates(a: &Player, b: &Player) -> Ordering {
    candidate_tier(a)
        .cmp(&candidate_tier(b))
        .then_with(|| rank_key(a).total_cmp(&rank_key(b)))
        .then_with(|| a.name.cmp(&b.name))
}

/// Drop current members, sort what is left, and keep the first `limit`
pub fn rank_candidates(
    players: Vec<Player>,
    members: &HashSet<PlayerId>,
    limit: usize,
) -> Vec<Player> {
    let mut available: Vec<Player> = players
        .into_iter()
        .filter(|p| !members.contains(&p.id))
        .collect();
    available.sort_by(compare_candidates);
    available.truncate(limit);
    available
}
