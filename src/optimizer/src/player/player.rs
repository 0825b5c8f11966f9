use crate::player::PlayerPosition;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A candidate for squad selection.
#[derive(Debug, Clone)]
pub struct Player {
    //identity
    pub id: u32,
    pub name: String,
    pub team_id: u32,
    pub team_name: String,

    //roster data
    pub position: PlayerPosition,
    pub price: f32,

    //projections, one entry per gameweek of the horizon
    pub expected_points: Vec<f32>,
}

impl Player {
    pub fn new(
        id: u32,
        name: String,
        team_id: u32,
        team_name: String,
        position: PlayerPosition,
        price: f32,
        expected_points: Vec<f32>,
    ) -> Self {
        Player {
            id,
            name,
            team_id,
            team_name,
            position,
            price,
            expected_points,
        }
    }

    /// Expected points for a single gameweek (1-based). Gameweeks past the
    /// horizon score zero, which lets lookahead run off the end safely.
    #[inline]
    pub fn points_for(&self, gameweek: usize) -> f32 {
        debug_assert!(gameweek >= 1);
        self.expected_points
            .get(gameweek - 1)
            .copied()
            .unwrap_or(0.0)
    }

    /// Expected points from `gameweek` (1-based) to the end of the horizon.
    #[inline]
    pub fn points_from(&self, gameweek: usize) -> f32 {
        debug_assert!(gameweek >= 1);
        self.expected_points.iter().skip(gameweek - 1).sum()
    }

    /// Expected points over the whole horizon.
    #[inline]
    pub fn total_points(&self) -> f32 {
        self.expected_points.iter().sum()
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} ({} {}, {:.1})",
            self.name, self.team_name, self.position, self.price
        )
    }
}
