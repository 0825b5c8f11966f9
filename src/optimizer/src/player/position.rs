use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// The four roster position groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerPosition {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl PlayerPosition {
    pub const ALL: [PlayerPosition; 4] = [
        PlayerPosition::Goalkeeper,
        PlayerPosition::Defender,
        PlayerPosition::Midfielder,
        PlayerPosition::Forward,
    ];

    pub fn get_short_name(&self) -> &'static str {
        match self {
            PlayerPosition::Goalkeeper => "GK",
            PlayerPosition::Defender => "DEF",
            PlayerPosition::Midfielder => "MID",
            PlayerPosition::Forward => "FWD",
        }
    }

    /// Stable index into per-position arrays.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parses a position code or full word, case-insensitively.
    /// Returns None for anything unrecognized so the caller can report
    /// which record carried the bad value.
    pub fn from_code(value: &str) -> Option<PlayerPosition> {
        match value.trim().to_uppercase().as_str() {
            "GK" | "GKP" | "GOALKEEPER" => Some(PlayerPosition::Goalkeeper),
            "DEF" | "DEFENDER" => Some(PlayerPosition::Defender),
            "MID" | "MIDFIELDER" => Some(PlayerPosition::Midfielder),
            "FWD" | "FW" | "FORWARD" => Some(PlayerPosition::Forward),
            _ => None,
        }
    }
}

impl Display for PlayerPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.get_short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_accepts_codes_and_words() {
        assert_eq!(
            PlayerPosition::from_code("GK"),
            Some(PlayerPosition::Goalkeeper)
        );
        assert_eq!(
            PlayerPosition::from_code("defender"),
            Some(PlayerPosition::Defender)
        );
        assert_eq!(
            PlayerPosition::from_code("Midfielder"),
            Some(PlayerPosition::Midfielder)
        );
        assert_eq!(
            PlayerPosition::from_code(" fwd "),
            Some(PlayerPosition::Forward)
        );
    }

    #[test]
    fn test_from_code_rejects_unknown() {
        assert_eq!(PlayerPosition::from_code("COACH"), None);
        assert_eq!(PlayerPosition::from_code(""), None);
    }

    #[test]
    fn test_index_matches_all_order() {
        for (idx, position) in PlayerPosition::ALL.iter().enumerate() {
            assert_eq!(position.index(), idx);
        }
    }
}
