//! Attributes the game log source does not publish, recovered from the stats themselves.

use crate::Position;
use once_cell::sync::Lazy;
use regex::Regex;

pub const UNKNOWN_OPPONENT: &str = "Unknown";

/// Receiving yards above which a pass catcher is treated as a wide receiver
pub const WR_RECEIVING_YARDS: f64 = 30.0;

static MATCHUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"vs (\w+)|@ (\w+)").expect("matchup pattern is valid"));

/// Guesses a position from a single game's yardage.
///
/// Anyone with passing yards is a QB. Otherwise, if receiving beats rushing the
/// player is a WR (over 30 yards) or a TE; everyone else is an RB. A missing value
/// should be passed as NaN, which makes its comparisons false.
pub fn infer_position(passing_yards: f64, rushing_yards: f64, receiving_yards: f64) -> Position {
    if passing_yards > 0.0 {
        Position::Qb
    } else if receiving_yards > rushing_yards {
        if receiving_yards > WR_RECEIVING_YARDS {
            Position::Wr
        } else {
            Position::Te
        }
    } else {
        Position::Rb
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matchup {
    pub opponent: Option<String>,
    pub home: bool,
}

impl Matchup {
    pub fn opponent_or_unknown(&self) -> &str {
        self.opponent.as_deref().unwrap_or(UNKNOWN_OPPONENT)
    }
}

/// Reads the opponent out of a descriptor like `"KC vs BUF"` or `"KC @ BUF"`.
pub fn parse_matchup(game_string: &str) -> Matchup {
    let opponent = MATCHUP.captures(game_string).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    });

    Matchup {
        opponent,
        home: game_string.contains("vs"),
    }
}

/// Parses a `home` cell from an alternate source that stored it as text
pub fn parse_home_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "home"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_yards_always_mean_qb() {
        assert_eq!(infer_position(1.0, 0.0, 0.0), Position::Qb);
        assert_eq!(infer_position(250.0, 40.0, 0.0), Position::Qb);
        // a trick-play pass still wins over big receiving numbers
        assert_eq!(infer_position(12.0, 0.0, 140.0), Position::Qb);
    }

    #[test]
    fn receiving_heavy_games_split_on_thirty_yards() {
        assert_eq!(infer_position(0.0, 10.0, 31.0), Position::Wr);
        assert_eq!(infer_position(0.0, 10.0, 30.0), Position::Te);
        assert_eq!(infer_position(0.0, 0.0, 5.0), Position::Te);
    }

    #[test]
    fn everything_else_is_rb() {
        assert_eq!(infer_position(0.0, 80.0, 20.0), Position::Rb);
        assert_eq!(infer_position(0.0, 30.0, 30.0), Position::Rb);
        assert_eq!(infer_position(0.0, 0.0, 0.0), Position::Rb);
    }

    #[test]
    fn missing_yardage_falls_through_to_rb() {
        assert_eq!(infer_position(f64::NAN, f64::NAN, f64::NAN), Position::Rb);
        assert_eq!(infer_position(f64::NAN, f64::NAN, 90.0), Position::Rb);
    }

    #[test]
    fn exhaustive_grid_follows_precedence() {
        let values = [0.0, 5.0, 30.0, 30.5, 75.0];
        for &pass in &values {
            for &rush in &values {
                for &rec in &values {
                    let position = infer_position(pass, rush, rec);
                    let expected = if pass > 0.0 {
                        Position::Qb
                    } else if rec > rush && rec > 30.0 {
                        Position::Wr
                    } else if rec > rush {
                        Position::Te
                    } else {
                        Position::Rb
                    };
                    assert_eq!(position, expected, "pass={pass} rush={rush} rec={rec}");
                }
            }
        }
    }

    #[test]
    fn home_matchup() {
        let m = parse_matchup("KC vs BUF");
        assert_eq!(m.opponent.as_deref(), Some("BUF"));
        assert!(m.home);
    }

    #[test]
    fn away_matchup() {
        let m = parse_matchup("KC @ BAL");
        assert_eq!(m.opponent.as_deref(), Some("BAL"));
        assert!(!m.home);
    }

    #[test]
    fn unparsable_matchup() {
        let m = parse_matchup("bye");
        assert_eq!(m.opponent, None);
        assert_eq!(m.opponent_or_unknown(), UNKNOWN_OPPONENT);
        assert!(!m.home);
    }

    #[test]
    fn home_flags_from_text() {
        assert!(parse_home_flag("True"));
        assert!(parse_home_flag(" true "));
        assert!(!parse_home_flag("False"));
        assert!(!parse_home_flag(""));
    }
}
