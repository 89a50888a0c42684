/// Mock fixture data for testing and development
///
/// This module provides consistent, deterministic fixture data that can be used for:
/// 1. Unit tests - ensuring tests have predictable data
/// 2. The `seed` command - writing a sample store to try the CLI against
/// 3. Benchmarks - providing consistent data for performance testing
///
/// Ten prospects ranked by four sources, an overall big board and a QB board.
use crate::file_store::{StoreDocument, StoredBigBoard};
use crate::types::{Board, BoardRank, Player, PlayerId, SourceType};

/// Create the mock ranking sources
///
/// `consensus` is primary, `espn` is weighted double and `pff` is hidden.
pub fn create_mock_boards() -> Vec<Board> {
    vec![
        Board {
            source_type: SourceType::Consensus,
            player_count: 250,
            is_primary: true,
            ..Board::new("consensus", "Consensus")
        },
        Board {
            player_count: 150,
            weight: 2.0,
            ..Board::new("espn", "ESPN")
        },
        Board {
            player_count: 100,
            ..Board::new("athletic", "The Athletic")
        },
        Board {
            source_type: SourceType::Manual,
            player_count: 50,
            visible: false,
            ..Board::new("pff", "PFF")
        },
    ]
}

/// Helper to build a board rank entry for one of the mock boards
fn board_rank(board_key: &str, rank: f64) -> BoardRank {
    let board_name = create_mock_boards()
        .into_iter()
        .find(|b| b.board_key == board_key)
        .map(|b| b.board_name)
        .unwrap_or_else(|| board_key.to_string());

    BoardRank {
        board_key: board_key.to_string(),
        board_name,
        rank,
        is_primary: board_key == "consensus",
    }
}

/// Helper to create a mock prospect
#[allow(clippy::too_many_arguments)]
fn create_mock_player(
    id: PlayerId,
    name: &str,
    position: &str,
    school: &str,
    scouted: bool,
    grade: &str,
    rank: Option<f64>,
    board_ranks: &[(&str, f64)],
) -> Player {
    Player {
        id,
        name: name.to_string(),
        position: position.to_string(),
        school: school.to_string(),
        scouted,
        grade: grade.to_string(),
        rank,
        board_ranks: board_ranks
            .iter()
            .map(|(key, rank)| board_rank(key, *rank))
            .collect(),
        ..Default::default()
    }
}

/// Create the mock prospect pool
pub fn create_mock_players() -> Vec<Player> {
    let mut players = vec![
        create_mock_player(
            1,
            "Travis Hunter",
            "CB",
            "Colorado",
            true,
            "Poker Chip - Purple",
            Some(1.0),
            &[("consensus", 1.4), ("espn", 1.0), ("athletic", 2.0)],
        ),
        create_mock_player(
            2,
            "Abdul Carter",
            "EDGE/DL",
            "Penn State",
            true,
            "Early-Round 1",
            Some(2.0),
            &[("consensus", 2.2), ("espn", 3.0), ("athletic", 1.0)],
        ),
        create_mock_player(
            3,
            "Tetairoa McMillan",
            "WR",
            "Arizona",
            false,
            "Mid-Round 1",
            Some(8.0),
            &[("consensus", 8.6), ("espn", 7.0), ("pff", 12.0)],
        ),
        create_mock_player(
            4,
            "Will Campbell",
            "OT",
            "LSU",
            false,
            "",
            Some(5.0),
            &[("consensus", 5.0), ("athletic", 6.0)],
        ),
        create_mock_player(
            5,
            "Mason Graham",
            "DL",
            "Michigan",
            false,
            "Alphabet - A",
            Some(4.0),
            &[("consensus", 4.5), ("espn", 5.0), ("athletic", 4.0)],
        ),
        create_mock_player(
            6,
            "Arch Manning",
            "QB",
            "Texas",
            false,
            "",
            None,
            &[("espn", 28.0), ("athletic", 33.0)],
        ),
        create_mock_player(
            7,
            "Cam Ward",
            "QB",
            "Miami",
            true,
            "Numerical - 88",
            Some(3.0),
            &[("consensus", 6.1), ("espn", 2.0), ("athletic", 9.0)],
        ),
        create_mock_player(
            8,
            "Luther Burden",
            "WR",
            "Missouri",
            false,
            "",
            Some(25.0),
            &[("consensus", 24.0)],
        ),
        create_mock_player(
            9,
            "Emeka Egbuka",
            "WR",
            "Ohio State",
            false,
            "Late-Round 1",
            Some(19.0),
            &[("consensus", 21.3), ("espn", 17.0)],
        ),
        create_mock_player(
            42,
            "Jalen Milroe",
            "QB",
            "Alabama",
            false,
            "",
            None,
            &[],
        ),
    ];

    // Rank fallbacks for players without a direct rank
    if let Some(manning) = players.iter_mut().find(|p| p.id == 6) {
        manning.weighted_average_rank = Some(30.5);
        manning.source_rank = Some(41.0);
    }
    if let Some(burden) = players.iter_mut().find(|p| p.id == 8) {
        burden.grade_secondary = "Alphabet - B+".to_string();
    }
    if let Some(milroe) = players.iter_mut().find(|p| p.id == 42) {
        milroe.source_rank = Some(58.0);
    }

    players
}

/// Create the full mock store: players, boards and two big boards
pub fn create_mock_document() -> StoreDocument {
    StoreDocument {
        players: create_mock_players(),
        boards: create_mock_boards(),
        big_boards: vec![
            StoredBigBoard {
                board_type: "overall".to_string(),
                position: None,
                player_ids: vec![1, 2, 4, 5, 7],
            },
            StoredBigBoard {
                board_type: "position".to_string(),
                position: Some("QB".to_string()),
                player_ids: vec![7, 6],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_player_ids_are_unique() {
        let players = create_mock_players();
        let ids: HashSet<PlayerId> = players.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), players.len());
    }

    #[test]
    fn test_big_boards_reference_known_players() {
        let document = create_mock_document();
        let ids: HashSet<PlayerId> = document.players.iter().map(|p| p.id).collect();
        for board in &document.big_boards {
            assert!(board.player_ids.iter().all(|id| ids.contains(id)));
        }
    }

    #[test]
    fn test_exactly_one_primary_board() {
        let boards = create_mock_boards();
        assert_eq!(boards.iter().filter(|b| b.is_primary).count(), 1);
    }
}
