use crate::error::{OptimizerError, Result};
use crate::player::{Player, PlayerPosition};
use serde::Deserialize;
use std::collections::HashMap;
use std::ops::Index;

/// Raw input shape, as deserialized from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRecord {
    pub id: u32,
    pub name: String,
    pub team: String,
    pub position: String,
    pub price: f32,
    pub expected_points: Vec<f32>,
}

/// Immutable, validated candidate pool.
///
/// Team names are interned to ids in first-appearance order, so pools built
/// from the same records are identical. The gameweek count is taken from the
/// first record; every other record must match it.
#[derive(Debug, Clone)]
pub struct PlayerPool {
    players: Vec<Player>,
    id_index: HashMap<u32, usize>,
    teams: Vec<String>,
    gameweeks: usize,
}

impl PlayerPool {
    pub fn from_records(records: Vec<PlayerRecord>) -> Result<PlayerPool> {
        if records.is_empty() {
            return Err(OptimizerError::EmptyPool);
        }

        let gameweeks = records[0].expected_points.len();
        if gameweeks == 0 {
            return Err(OptimizerError::ScoreCountMismatch {
                player: records[0].name.clone(),
                expected: 1,
                found: 0,
            });
        }

        let mut players = Vec::with_capacity(records.len());
        let mut id_index = HashMap::with_capacity(records.len());
        let mut teams: Vec<String> = Vec::new();
        let mut team_index: HashMap<String, u32> = HashMap::new();

        for record in records {
            if record.price < 0.0 {
                return Err(OptimizerError::NegativePrice {
                    player: record.name,
                    price: record.price,
                });
            }

            let position = PlayerPosition::from_code(&record.position).ok_or_else(|| {
                OptimizerError::UnknownPosition {
                    player: record.name.clone(),
                    value: record.position.clone(),
                }
            })?;

            if record.expected_points.len() != gameweeks {
                return Err(OptimizerError::ScoreCountMismatch {
                    player: record.name,
                    expected: gameweeks,
                    found: record.expected_points.len(),
                });
            }

            let team_id = match team_index.get(&record.team) {
                Some(&id) => id,
                None => {
                    let id = teams.len() as u32;
                    teams.push(record.team.clone());
                    team_index.insert(record.team.clone(), id);
                    id
                }
            };

            if id_index.insert(record.id, players.len()).is_some() {
                return Err(OptimizerError::DuplicatePlayer { id: record.id });
            }

            players.push(Player::new(
                record.id,
                record.name,
                team_id,
                record.team,
                position,
                record.price,
                record.expected_points,
            ));
        }

        Ok(PlayerPool {
            players,
            id_index,
            teams,
            gameweeks,
        })
    }

    #[inline]
    pub fn get(&self, id: u32) -> Option<&Player> {
        self.id_index.get(&id).map(|&slot| &self.players[slot])
    }

    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Number of gameweeks covered by every player's projections.
    #[inline]
    pub fn gameweeks(&self) -> usize {
        self.gameweeks
    }

    pub fn by_position(&self, position: PlayerPosition) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.position == position)
    }

    pub fn position_count(&self, position: PlayerPosition) -> usize {
        self.by_position(position).count()
    }

    pub fn team_name(&self, team_id: u32) -> &str {
        &self.teams[team_id as usize]
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }
}

impl Index<u32> for PlayerPool {
    type Output = Player;

    fn index(&self, id: u32) -> &Player {
        self.get(id)
            .unwrap_or_else(|| panic!("unknown player id {}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_test_record(id: u32, position: &str) -> PlayerRecord {
        PlayerRecord {
            id,
            name: format!("Player {}", id),
            team: "TST".to_string(),
            position: position.to_string(),
            price: 5.0,
            expected_points: vec![1.0, 2.0, 3.0],
        }
    }

    #[test]
    fn test_pool_builds_and_interns_teams() {
        let mut first = generate_test_record(1, "GK");
        first.team = "AAA".to_string();
        let mut second = generate_test_record(2, "DEF");
        second.team = "BBB".to_string();
        let mut third = generate_test_record(3, "MID");
        third.team = "AAA".to_string();

        let pool = PlayerPool::from_records(vec![first, second, third]).unwrap();

        assert_eq!(pool.len(), 3);
        assert_eq!(pool.gameweeks(), 3);
        assert_eq!(pool.team_count(), 2);
        assert_eq!(pool[1].team_id, pool[3].team_id);
        assert_ne!(pool[1].team_id, pool[2].team_id);
        assert_eq!(pool.team_name(pool[2].team_id), "BBB");
        assert_eq!(pool.position_count(PlayerPosition::Defender), 1);
    }

    #[test]
    fn test_empty_pool_is_rejected() {
        let err = PlayerPool::from_records(Vec::new()).unwrap_err();
        assert!(matches!(err, OptimizerError::EmptyPool));
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let mut record = generate_test_record(1, "GK");
        record.price = -0.5;

        let err = PlayerPool::from_records(vec![record]).unwrap_err();
        match err {
            OptimizerError::NegativePrice { player, price } => {
                assert_eq!(player, "Player 1");
                assert_eq!(price, -0.5);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unknown_position_is_rejected() {
        let record = generate_test_record(1, "SWEEPER");

        let err = PlayerPool::from_records(vec![record]).unwrap_err();
        match err {
            OptimizerError::UnknownPosition { value, .. } => assert_eq!(value, "SWEEPER"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_score_count_mismatch_is_rejected() {
        let first = generate_test_record(1, "GK");
        let mut second = generate_test_record(2, "DEF");
        second.expected_points = vec![1.0, 2.0];

        let err = PlayerPool::from_records(vec![first, second]).unwrap_err();
        match err {
            OptimizerError::ScoreCountMismatch {
                expected, found, ..
            } => {
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let first = generate_test_record(7, "GK");
        let second = generate_test_record(7, "DEF");

        let err = PlayerPool::from_records(vec![first, second]).unwrap_err();
        assert!(matches!(err, OptimizerError::DuplicatePlayer { id: 7 }));
    }
}
