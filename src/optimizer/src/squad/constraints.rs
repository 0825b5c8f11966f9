use crate::player::PlayerPosition;

/// Allowed count range for one position group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionLimit {
    pub min: u8,
    pub max: u8,
}

impl PositionLimit {
    pub fn new(min: u8, max: u8) -> Self {
        PositionLimit { min, max }
    }

    #[inline]
    pub fn contains(&self, count: u8) -> bool {
        count >= self.min && count <= self.max
    }
}

/// The ruleset a squad must satisfy.
///
/// `Default` is the standard game: 15 players, 100.0 budget, at most 3 per
/// club, 2 goalkeepers / 5 defenders / 5 midfielders / 3 forwards at the top
/// end, two roster changes per gameweek of which one may be penalized.
#[derive(Debug, Clone)]
pub struct SquadConstraints {
    pub squad_size: u8,
    pub budget: f32,
    pub max_per_team: u8,
    pub goalkeepers: PositionLimit,
    pub defenders: PositionLimit,
    pub midfielders: PositionLimit,
    pub forwards: PositionLimit,
    pub max_transfers_per_gameweek: u8,
    pub max_hits_per_gameweek: u8,
}

impl SquadConstraints {
    #[inline]
    pub fn limit(&self, position: PlayerPosition) -> PositionLimit {
        match position {
            PlayerPosition::Goalkeeper => self.goalkeepers,
            PlayerPosition::Defender => self.defenders,
            PlayerPosition::Midfielder => self.midfielders,
            PlayerPosition::Forward => self.forwards,
        }
    }
}

impl Default for SquadConstraints {
    fn default() -> Self {
        SquadConstraints {
            squad_size: 15,
            budget: 100.0,
            max_per_team: 3,
            goalkeepers: PositionLimit::new(1, 2),
            defenders: PositionLimit::new(3, 5),
            midfielders: PositionLimit::new(3, 5),
            forwards: PositionLimit::new(1, 3),
            max_transfers_per_gameweek: 2,
            max_hits_per_gameweek: 1,
        }
    }
}
