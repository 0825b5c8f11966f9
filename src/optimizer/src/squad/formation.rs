use crate::player::PlayerPosition;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Outfield shape of a starting lineup. Every formation fields exactly one
/// goalkeeper, so only the outfield counts vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Formation {
    pub defenders: u8,
    pub midfielders: u8,
    pub forwards: u8,
}

/// All legal lineup shapes: 3-5 defenders, 2-5 midfielders, 1-3 forwards,
/// ten outfield players in total.
pub const FORMATIONS: &[Formation] = &[
    Formation { defenders: 3, midfielders: 4, forwards: 3 },
    Formation { defenders: 3, midfielders: 5, forwards: 2 },
    Formation { defenders: 4, midfielders: 3, forwards: 3 },
    Formation { defenders: 4, midfielders: 4, forwards: 2 },
    Formation { defenders: 4, midfielders: 5, forwards: 1 },
    Formation { defenders: 5, midfielders: 2, forwards: 3 },
    Formation { defenders: 5, midfielders: 3, forwards: 2 },
    Formation { defenders: 5, midfielders: 4, forwards: 1 },
];

impl Formation {
    #[inline]
    pub fn count(&self, position: PlayerPosition) -> u8 {
        match position {
            PlayerPosition::Goalkeeper => 1,
            PlayerPosition::Defender => self.defenders,
            PlayerPosition::Midfielder => self.midfielders,
            PlayerPosition::Forward => self.forwards,
        }
    }

    pub fn formation_description(&self) -> String {
        format!("{}-{}-{}", self.defenders, self.midfielders, self.forwards)
    }
}

impl Display for Formation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.formation_description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_formation_fields_eleven() {
        for formation in FORMATIONS {
            let total: u8 = PlayerPosition::ALL
                .iter()
                .map(|&p| formation.count(p))
                .sum();
            assert_eq!(total, 11, "formation {}", formation);
        }
    }

    #[test]
    fn test_formation_bounds() {
        for formation in FORMATIONS {
            assert!((3..=5).contains(&formation.defenders));
            assert!((2..=5).contains(&formation.midfielders));
            assert!((1..=3).contains(&formation.forwards));
        }
    }

    #[test]
    fn test_formation_description() {
        let formation = Formation {
            defenders: 4,
            midfielders: 4,
            forwards: 2,
        };
        assert_eq!(formation.formation_description(), "4-4-2");
    }
}
