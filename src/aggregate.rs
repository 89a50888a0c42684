//! Rank aggregation across ranking sources.
//!
//! Pure functions: a player's preferred rank, the (optionally weighted)
//! average of their board ranks, and the display rule for board ranks.

use std::collections::HashMap;

use crate::types::{BoardRank, Player};

/// Minimum number of boards with positive weight needed for an average
pub const MIN_CONTRIBUTING_BOARDS: usize = 1;

/// Per-board settings consulted when averaging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardWeight {
    pub weight: f64,
    pub visible: bool,
}

impl Default for BoardWeight {
    fn default() -> Self {
        Self {
            weight: 1.0,
            visible: true,
        }
    }
}

fn positive_rounded(value: Option<f64>) -> Option<u32> {
    value
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| v.round().max(1.0) as u32)
}

/// Resolve the rank to show for a player
///
/// First usable source wins: direct rank, then weighted-average rank, then
/// the source rank. `None` must be rendered as "Unranked".
pub fn preferred_rank(player: &Player) -> Option<u32> {
    positive_rounded(player.rank)
        .or_else(|| positive_rounded(player.weighted_average_rank))
        .or_else(|| positive_rounded(player.source_rank))
}

/// Text for a player's preferred rank
pub fn preferred_rank_label(player: &Player) -> String {
    match preferred_rank(player) {
        Some(rank) => format!("#{}", rank),
        None => "Unranked".to_string(),
    }
}

/// Average a player's board ranks
///
/// With `use_custom_weights` off every visible board counts once. With it on
/// each visible board counts by its configured weight, where non-finite or
/// non-positive weights count as zero. Boards missing from `weights` use the
/// defaults (weight 1, visible). Returns `None` when nothing contributes.
pub fn weighted_average(
    board_ranks: &[BoardRank],
    weights: &HashMap<String, BoardWeight>,
    use_custom_weights: bool,
) -> Option<f64> {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    let mut contributing = 0usize;

    for entry in board_ranks {
        if !entry.rank.is_finite() {
            continue;
        }
        let settings = weights.get(&entry.board_key).copied().unwrap_or_default();
        if !settings.visible {
            continue;
        }
        let weight = if use_custom_weights {
            effective_weight(settings.weight)
        } else {
            1.0
        };
        if weight <= 0.0 {
            continue;
        }
        weighted_sum += entry.rank * weight;
        total_weight += weight;
        contributing += 1;
    }

    if contributing < MIN_CONTRIBUTING_BOARDS || total_weight <= 0.0 {
        return None;
    }
    Some(weighted_sum / total_weight)
}

/// Weight a board actually contributes
pub fn effective_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Format a board rank with one decimal, dropping a trailing `.0`
///
/// `12.0` → `"12"`, `12.5` → `"12.5"`, `8.333` → `"8.3"`.
pub fn format_board_rank(rank: f64) -> String {
    let text = format!("{:.1}", rank);
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

/// Text for an average that may be unavailable
pub fn weighted_average_label(average: Option<f64>) -> String {
    match average {
        Some(value) => format_board_rank(value),
        None => "Weighted average unavailable".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(key: &str, value: f64) -> BoardRank {
        BoardRank {
            board_key: key.to_string(),
            board_name: key.to_uppercase(),
            rank: value,
            is_primary: false,
        }
    }

    fn weights(entries: &[(&str, f64, bool)]) -> HashMap<String, BoardWeight> {
        entries
            .iter()
            .map(|(key, weight, visible)| {
                (
                    key.to_string(),
                    BoardWeight {
                        weight: *weight,
                        visible: *visible,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_preferred_rank_order() {
        let mut player = Player {
            rank: Some(3.4),
            weighted_average_rank: Some(8.0),
            source_rank: Some(12.0),
            ..Default::default()
        };
        assert_eq!(preferred_rank(&player), Some(3));

        player.rank = None;
        assert_eq!(preferred_rank(&player), Some(8));

        player.weighted_average_rank = Some(f64::NAN);
        assert_eq!(preferred_rank(&player), Some(12));
    }

    #[test]
    fn test_preferred_rank_skips_non_positive() {
        let player = Player {
            rank: Some(0.0),
            weighted_average_rank: Some(-2.0),
            source_rank: Some(5.6),
            ..Default::default()
        };
        assert_eq!(preferred_rank(&player), Some(6));
    }

    #[test]
    fn test_preferred_rank_never_zero() {
        let player = Player {
            rank: Some(0.3),
            ..Default::default()
        };
        assert_eq!(preferred_rank(&player), Some(1));
    }

    #[test]
    fn test_preferred_rank_unranked() {
        let player = Player {
            rank: Some(f64::INFINITY),
            weighted_average_rank: Some(0.0),
            source_rank: None,
            ..Default::default()
        };
        assert_eq!(preferred_rank(&player), None);
        assert_eq!(preferred_rank_label(&player), "Unranked");
    }

    #[test]
    fn test_simple_mean_without_custom_weights() {
        let ranks = vec![rank("a", 4.0), rank("b", 10.0), rank("c", 7.0)];
        let w = weights(&[("a", 5.0, true), ("b", 0.0, true)]);

        assert_eq!(weighted_average(&ranks, &w, false), Some(7.0));
    }

    #[test]
    fn test_custom_weights_scenario() {
        let ranks = vec![rank("a", 5.0), rank("b", 15.0)];
        let w = weights(&[("a", 2.0, true), ("b", 1.0, true)]);

        let average = weighted_average(&ranks, &w, true).unwrap();
        assert!((average - 25.0 / 3.0).abs() < 1e-9);
        assert_eq!(format_board_rank(average), "8.3");
    }

    #[test]
    fn test_hidden_and_invalid_weights_contribute_nothing() {
        let ranks = vec![rank("a", 5.0), rank("b", 15.0), rank("c", 40.0), rank("d", 1.0)];
        let w = weights(&[
            ("a", 1.0, true),
            ("b", f64::NAN, true),
            ("c", -3.0, true),
            ("d", 4.0, false),
        ]);

        assert_eq!(weighted_average(&ranks, &w, true), Some(5.0));
        // hidden boards are excluded from the simple mean too
        assert_eq!(weighted_average(&ranks, &w, false), Some(20.0));
    }

    #[test]
    fn test_zero_total_weight_is_unavailable() {
        let ranks = vec![rank("a", 5.0), rank("b", 15.0)];
        let w = weights(&[("a", 0.0, true), ("b", 0.0, true)]);

        let average = weighted_average(&ranks, &w, true);
        assert_eq!(average, None);
        assert_eq!(weighted_average_label(average), "Weighted average unavailable");
        assert_eq!(weighted_average(&[], &w, false), None);
    }

    #[test]
    fn test_single_board_average_is_its_rank() {
        let ranks = vec![rank("a", 9.5)];
        assert_eq!(weighted_average(&ranks, &HashMap::new(), true), Some(9.5));
    }

    #[test]
    fn test_average_within_rank_bounds_and_idempotent() {
        let ranks = vec![rank("a", 3.0), rank("b", 30.0), rank("c", 11.5), rank("d", 19.0)];
        let w = weights(&[("a", 0.25, true), ("b", 7.0, true), ("c", 1.5, true), ("d", 2.0, true)]);
        let before = ranks.clone();

        let first = weighted_average(&ranks, &w, true).unwrap();
        let second = weighted_average(&ranks, &w, true).unwrap();

        assert_eq!(first, second);
        assert!((3.0..=30.0).contains(&first));
        assert_eq!(ranks, before);
    }

    #[test]
    fn test_format_board_rank() {
        assert_eq!(format_board_rank(12.0), "12");
        assert_eq!(format_board_rank(12.5), "12.5");
        assert_eq!(format_board_rank(12.04), "12");
        assert_eq!(format_board_rank(3.76), "3.8");
    }
}
