use crate::player::{PlayerPool, PlayerPosition};
use crate::squad::{Squad, SquadConstraints};
use itertools::Itertools;
use thiserror::Error;

/// One broken squad rule, with the numbers behind it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleViolation {
    #[error("squad has {actual} players, expected {expected}")]
    SquadSize { expected: u8, actual: usize },

    #[error("duplicate player: {name}")]
    DuplicatePlayer { name: String },

    #[error("not enough {position} players: {actual} of {minimum} required")]
    TooFewAtPosition {
        position: PlayerPosition,
        minimum: u8,
        actual: u8,
    },

    #[error("too many {position} players: {actual}, maximum {maximum}")]
    TooManyAtPosition {
        position: PlayerPosition,
        maximum: u8,
        actual: u8,
    },

    #[error("too many players from {team}: {actual}, maximum {maximum}")]
    TooManyFromTeam {
        team: String,
        maximum: u8,
        actual: u8,
    },

    #[error("squad cost {cost:.1} exceeds budget {budget:.1}")]
    OverBudget { cost: f32, budget: f32 },
}

pub struct SquadValidator;

impl SquadValidator {
    /// Checks every rule and returns the full list of violations, in rule
    /// order: size, duplicates, positions, teams, budget. Reads only the
    /// squad's aggregates, so it is cheap enough to call after every change.
    pub fn validate(
        squad: &Squad,
        pool: &PlayerPool,
        constraints: &SquadConstraints,
    ) -> Vec<RuleViolation> {
        let mut violations = Vec::new();

        if squad.len() != constraints.squad_size as usize {
            violations.push(RuleViolation::SquadSize {
                expected: constraints.squad_size,
                actual: squad.len(),
            });
        }

        for &id in squad.members().iter().duplicates() {
            violations.push(RuleViolation::DuplicatePlayer {
                name: pool[id].name.clone(),
            });
        }

        for position in PlayerPosition::ALL {
            let limit = constraints.limit(position);
            let actual = squad.position_count(position);
            if actual < limit.min {
                violations.push(RuleViolation::TooFewAtPosition {
                    position,
                    minimum: limit.min,
                    actual,
                });
            } else if actual > limit.max {
                violations.push(RuleViolation::TooManyAtPosition {
                    position,
                    maximum: limit.max,
                    actual,
                });
            }
        }

        for (team_id, actual) in squad.team_counts().sorted_by_key(|&(team, _)| team) {
            if actual > constraints.max_per_team {
                violations.push(RuleViolation::TooManyFromTeam {
                    team: pool.team_name(team_id).to_string(),
                    maximum: constraints.max_per_team,
                    actual,
                });
            }
        }

        if squad.total_price() > constraints.budget {
            violations.push(RuleViolation::OverBudget {
                cost: squad.total_price(),
                budget: constraints.budget,
            });
        }

        violations
    }

    pub fn is_valid(squad: &Squad, pool: &PlayerPool, constraints: &SquadConstraints) -> bool {
        Self::validate(squad, pool, constraints).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerRecord;

    fn generate_test_records() -> Vec<PlayerRecord> {
        let mut records = Vec::new();
        let mut id = 0;
        let mut push = |count: usize, position: &str, records: &mut Vec<PlayerRecord>| {
            for _ in 0..count {
                id += 1;
                records.push(PlayerRecord {
                    id,
                    name: format!("Player {}", id),
                    team: format!("T{}", id % 7),
                    position: position.to_string(),
                    price: 5.0,
                    expected_points: vec![2.0, 2.0],
                });
            }
        };
        push(2, "GK", &mut records);
        push(5, "DEF", &mut records);
        push(5, "MID", &mut records);
        push(3, "FWD", &mut records);
        records
    }

    fn generate_test_pool() -> PlayerPool {
        PlayerPool::from_records(generate_test_records()).unwrap()
    }

    #[test]
    fn test_legal_squad_has_no_violations() {
        let pool = generate_test_pool();
        let constraints = SquadConstraints::default();
        let squad = Squad::from_players(pool.players());

        assert!(SquadValidator::is_valid(&squad, &pool, &constraints));
    }

    #[test]
    fn test_short_squad_reports_size_and_minimums() {
        let pool = generate_test_pool();
        let constraints = SquadConstraints::default();
        // Leave out every forward
        let squad = Squad::from_players(
            pool.players()
                .iter()
                .filter(|p| p.position != PlayerPosition::Forward),
        );

        let violations = SquadValidator::validate(&squad, &pool, &constraints);

        assert!(violations.contains(&RuleViolation::SquadSize {
            expected: 15,
            actual: 12
        }));
        assert!(violations.contains(&RuleViolation::TooFewAtPosition {
            position: PlayerPosition::Forward,
            minimum: 1,
            actual: 0
        }));
    }

    #[test]
    fn test_team_cap_violation_names_the_team() {
        let mut records = generate_test_records();
        for record in records.iter_mut().take(4) {
            record.team = "Overloaded".to_string();
        }
        let pool = PlayerPool::from_records(records).unwrap();
        let constraints = SquadConstraints::default();
        let squad = Squad::from_players(pool.players());

        let violations = SquadValidator::validate(&squad, &pool, &constraints);

        assert_eq!(
            violations,
            vec![RuleViolation::TooManyFromTeam {
                team: "Overloaded".to_string(),
                maximum: 3,
                actual: 4
            }]
        );
    }

    #[test]
    fn test_budget_violation_carries_cost() {
        let mut records = generate_test_records();
        records[0].price = 40.0;
        let pool = PlayerPool::from_records(records).unwrap();
        let constraints = SquadConstraints::default();
        let squad = Squad::from_players(pool.players());

        let violations = SquadValidator::validate(&squad, &pool, &constraints);

        assert_eq!(
            violations,
            vec![RuleViolation::OverBudget {
                cost: 110.0,
                budget: 100.0
            }]
        );
    }

    #[test]
    fn test_violation_messages_read_well() {
        let violation = RuleViolation::TooFewAtPosition {
            position: PlayerPosition::Defender,
            minimum: 3,
            actual: 2,
        };
        assert_eq!(
            violation.to_string(),
            "not enough DEF players: 2 of 3 required"
        );
    }
}
