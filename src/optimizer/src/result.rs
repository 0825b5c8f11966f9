use crate::player::{Player, PlayerPool, PlayerPosition};
use crate::search::{SearchOutcome, SearchStats};
use crate::squad::{LineupSelector, StartingLineup};
use crate::transfers::TransferPlan;
use itertools::Itertools;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Serialize)]
pub struct SquadEntry {
    pub id: u32,
    pub name: String,
    pub team: String,
    pub position: String,
    pub price: f32,
    pub expected_points: f32,
}

impl SquadEntry {
    fn from_player(player: &Player) -> Self {
        SquadEntry {
            id: player.id,
            name: player.name.clone(),
            team: player.team_name.clone(),
            position: player.position.get_short_name().to_string(),
            price: player.price,
            expected_points: player.total_points(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionCount {
    pub position: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamCount {
    pub team: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineupReport {
    pub formation: String,
    pub expected_points: f32,
    pub starters: Vec<SquadEntry>,
    pub bench: Vec<SquadEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameweekPoints {
    pub gameweek: usize,
    pub lineup_points: f32,
}

/// Everything the run produced, ready for reporting or JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    pub squad: Vec<SquadEntry>,
    pub lineup: LineupReport,
    pub total_price: f32,
    pub squad_points: f32,
    pub positions: Vec<PositionCount>,
    pub teams: Vec<TeamCount>,
    /// Weekly lineup points of the selected squad before any transfers.
    pub gameweek_breakdown: Vec<GameweekPoints>,
    pub stats: SearchStats,
    pub plan: TransferPlan,
}

impl OptimizationResult {
    pub fn assemble(
        pool: &PlayerPool,
        outcome: &SearchOutcome,
        lineup: &StartingLineup,
        plan: TransferPlan,
    ) -> Self {
        let mut members: Vec<&Player> = outcome.squad.players(pool).collect();
        members.sort_by(|a, b| {
            a.position
                .index()
                .cmp(&b.position.index())
                .then_with(|| {
                    b.total_points()
                        .partial_cmp(&a.total_points())
                        .unwrap_or(Ordering::Equal)
                })
        });

        let positions = PlayerPosition::ALL
            .iter()
            .map(|&position| PositionCount {
                position: position.get_short_name().to_string(),
                count: outcome.squad.position_count(position) as usize,
            })
            .collect();

        let teams = outcome
            .squad
            .team_counts()
            .map(|(team_id, count)| TeamCount {
                team: pool.team_name(team_id).to_string(),
                count: count as usize,
            })
            .sorted_by(|a, b| b.count.cmp(&a.count).then_with(|| a.team.cmp(&b.team)))
            .collect();

        let gameweek_breakdown = (1..=pool.gameweeks())
            .map(|gameweek| {
                let weekly = LineupSelector::select_for_gameweek(&outcome.squad, pool, gameweek);
                GameweekPoints {
                    gameweek,
                    lineup_points: weekly.expected_points,
                }
            })
            .collect();

        let entries = |ids: &[u32]| -> Vec<SquadEntry> {
            ids.iter()
                .map(|&id| SquadEntry::from_player(&pool[id]))
                .collect()
        };

        OptimizationResult {
            squad: members.into_iter().map(SquadEntry::from_player).collect(),
            lineup: LineupReport {
                formation: lineup.formation.formation_description(),
                expected_points: lineup.expected_points,
                starters: entries(&lineup.starters),
                bench: entries(&lineup.bench),
            },
            total_price: outcome.squad.total_price(),
            squad_points: outcome.score,
            positions,
            teams,
            gameweek_breakdown,
            stats: outcome.stats.clone(),
            plan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PlayerPool, PlayerRecord};
    use crate::search::{SearchOptions, SquadOptimizer};
    use crate::squad::SquadConstraints;
    use crate::transfers::{PlannerOptions, TransferPlanner};

    fn generate_test_pool() -> PlayerPool {
        let mut records = Vec::new();
        let mut id = 0;
        for &(position, count) in &[("GK", 2), ("DEF", 6), ("MID", 6), ("FWD", 6)] {
            for n in 0..count {
                id += 1;
                records.push(PlayerRecord {
                    id,
                    name: format!("Player {}", id),
                    team: format!("T{}", id % 7),
                    position: position.to_string(),
                    price: 4.0 + (n % 4) as f32,
                    expected_points: vec![2.0 + (n % 5) as f32; 3],
                });
            }
        }
        PlayerPool::from_records(records).unwrap()
    }

    fn build_result() -> OptimizationResult {
        let pool = generate_test_pool();
        let constraints = SquadConstraints::default();
        let options = SearchOptions {
            max_iterations: 1_000,
            plateau_limit: 300,
            seed: 3,
            chains: 1,
        };

        let outcome = SquadOptimizer::optimize(&pool, &constraints, &options, None).unwrap();
        let lineup = LineupSelector::select(&outcome.squad, &pool);
        let plan = TransferPlanner::plan(
            &outcome.squad,
            &pool,
            &constraints,
            &PlannerOptions::default(),
            None,
        );

        OptimizationResult::assemble(&pool, &outcome, &lineup, plan)
    }

    #[test]
    fn test_result_reports_squad_shape() {
        let result = build_result();

        assert_eq!(result.squad.len(), 15);
        assert_eq!(result.lineup.starters.len(), 11);
        assert_eq!(result.lineup.bench.len(), 4);
        assert_eq!(result.gameweek_breakdown.len(), 3);
        assert_eq!(result.plan.gameweeks.len(), 3);

        let counts: Vec<usize> = result.positions.iter().map(|p| p.count).collect();
        assert_eq!(counts, vec![2, 5, 5, 3]);

        let squad_total: usize = result.teams.iter().map(|t| t.count).sum();
        assert_eq!(squad_total, 15);
        assert!(result.teams.windows(2).all(|w| w[0].count >= w[1].count));
        assert!(result.total_price <= 100.0);
    }

    #[test]
    fn test_result_serializes_without_internal_state() {
        let result = build_result();

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["squad"].as_array().unwrap().len(), 15);
        assert!(value["stats"]["converged"].is_boolean());
        // The working squad inside the plan stays out of the export
        assert!(value["plan"].get("final_squad").is_none());
        assert!(value["plan"]["gameweeks"].as_array().unwrap().len() > 0);
    }
}
