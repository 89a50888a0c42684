use phf::phf_map;
use std::cmp::Ordering;

use crate::types::Player;

/// Priority of an unknown or missing grade
pub const UNGRADED: (u8, u32) = (9, 999);

/// Rank used for players without a direct rank when sorting by grade
const MISSING_RANK: f64 = 9999.0;

/// Poker chip colors, best to worst
static POKER_CHIPS: phf::Map<&'static str, u32> = phf_map! {
    "purple" => 0,
    "black" => 1,
    "blue" => 2,
    "green" => 3,
    "red" => 4,
    "white" => 5,
};

/// Projected draft slots
static ROUND_PROJECTIONS: phf::Map<&'static str, u32> = phf_map! {
    "early-round 1" => 10,
    "mid-round 1" => 11,
    "late-round 1" => 12,
    "early-round 2" => 20,
    "mid-round 2" => 21,
    "late-round 2" => 22,
    "early-round 3" => 30,
    "mid-round 3" => 31,
    "late-round 3" => 32,
    "early-round 4" => 40,
    "mid-round 4" => 41,
    "late-round 4" => 42,
    "early-round 5" => 50,
    "mid-round 5" => 51,
    "late-round 5" => 52,
    "early-round 6" => 60,
    "mid-round 6" => 61,
    "late-round 6" => 62,
    "early-round 7" => 70,
    "mid-round 7" => 71,
    "late-round 7" => 72,
};

const LETTER_GRADES: [&str; 15] = [
    "A+", "A", "A-", "B+", "B", "B-", "C+", "C", "C-", "D+", "D", "D-", "F+", "F", "F-",
];

/// Sort key for a grade string, lower is better
///
/// Supported systems, in tier order: "Poker Chip - <color>",
/// "Numerical - <0..100>", "Alphabet - <A+..F->", and round projections
/// ("Mid-Round 2", "UDFA"). Anything else sorts last.
pub fn grade_priority(grade: &str) -> (u8, u32) {
    let grade = grade.trim();
    if grade.is_empty() {
        return UNGRADED;
    }
    let lower = grade.to_lowercase();

    if let Some(chip) = lower.strip_prefix("poker chip - ") {
        return (0, POKER_CHIPS.get(chip.trim()).copied().unwrap_or(99));
    }

    if let Some(number) = lower.strip_prefix("numerical - ") {
        return match number.trim().parse::<i64>() {
            Ok(n) => (1, 100 - n.clamp(0, 100) as u32),
            Err(_) => UNGRADED,
        };
    }

    if let Some(letter) = lower.strip_prefix("alphabet - ") {
        let letter = letter.trim().to_uppercase();
        return match LETTER_GRADES.iter().position(|g| *g == letter) {
            Some(index) => (2, index as u32),
            None => UNGRADED,
        };
    }

    if lower == "udfa" || lower == "udfa (undrafted free agent)" {
        return (3, 100);
    }

    match ROUND_PROJECTIONS.get(lower.as_str()) {
        Some(slot) => (3, *slot),
        None => UNGRADED,
    }
}

fn rank_or_missing(player: &Player) -> f64 {
    player
        .rank
        .filter(|r| r.is_finite())
        .unwrap_or(MISSING_RANK)
}

/// Auto-sort order for board members: grade, then direct rank, then name
pub fn compare_for_auto_sort(a: &Player, b: &Player) -> Ordering {
    grade_priority(&a.grade)
        .cmp(&grade_priority(&b.grade))
        .then_with(|| rank_or_missing(a).total_cmp(&rank_or_missing(b)))
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, grade: &str, rank: Option<f64>) -> Player {
        Player {
            name: name.to_string(),
            grade: grade.to_string(),
            rank,
            ..Default::default()
        }
    }

    #[test]
    fn test_poker_chip_grades() {
        assert_eq!(grade_priority("Poker Chip - Purple"), (0, 0));
        assert_eq!(grade_priority("poker chip - white"), (0, 5));
        assert_eq!(grade_priority("Poker Chip - Gold"), (0, 99));
    }

    #[test]
    fn test_numerical_grades_clamp() {
        assert_eq!(grade_priority("Numerical - 92"), (1, 8));
        assert_eq!(grade_priority("Numerical - 140"), (1, 0));
        assert_eq!(grade_priority("Numerical - -5"), (1, 100));
        assert_eq!(grade_priority("Numerical - great"), UNGRADED);
    }

    #[test]
    fn test_alphabet_grades() {
        assert_eq!(grade_priority("Alphabet - A+"), (2, 0));
        assert_eq!(grade_priority("Alphabet - b-"), (2, 5));
        assert_eq!(grade_priority("Alphabet - Z"), UNGRADED);
    }

    #[test]
    fn test_round_projections() {
        assert_eq!(grade_priority("Early-Round 1"), (3, 10));
        assert_eq!(grade_priority(" Late-Round 7 "), (3, 72));
        assert_eq!(grade_priority("UDFA (Undrafted Free Agent)"), (3, 100));
        assert_eq!(grade_priority("udfa"), (3, 100));
    }

    #[test]
    fn test_unknown_grades_sort_last() {
        assert_eq!(grade_priority(""), UNGRADED);
        assert_eq!(grade_priority("   "), UNGRADED);
        assert_eq!(grade_priority("Day 2 guy"), UNGRADED);
    }

    #[test]
    fn test_auto_sort_order() {
        let mut players = vec![
            player("Zed", "", Some(1.0)),
            player("Cole", "Mid-Round 1", None),
            player("Bryce", "Mid-Round 1", Some(20.0)),
            player("Amos", "Poker Chip - Blue", Some(50.0)),
            player("Abe", "Mid-Round 1", Some(20.0)),
        ];

        players.sort_by(compare_for_auto_sort);

        let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Amos", "Abe", "Bryce", "Cole", "Zed"]);
    }
}
