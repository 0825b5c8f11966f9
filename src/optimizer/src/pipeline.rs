use crate::error::Result;
use crate::player::PlayerPool;
use crate::result::OptimizationResult;
use crate::search::{SearchOptions, SquadOptimizer};
use crate::squad::{LineupSelector, SquadConstraints};
use crate::transfers::{PlannerOptions, TransferPlanner};
use log::info;
use std::sync::atomic::AtomicBool;

/// Runs the full pass: squad search, starting eleven, transfer plan.
pub struct OptimizationPipeline;

impl OptimizationPipeline {
    pub fn run(
        pool: &PlayerPool,
        constraints: &SquadConstraints,
        search: &SearchOptions,
        planner: &PlannerOptions,
        stop: Option<&AtomicBool>,
    ) -> Result<OptimizationResult> {
        info!(
            "selecting squad from {} candidates over {} gameweeks",
            pool.len(),
            pool.gameweeks()
        );

        let outcome = SquadOptimizer::optimize(pool, constraints, search, stop)?;
        info!(
            "squad selected: {:.1} pts for {:.1} of {:.1} budget ({} iterations, {} improvements)",
            outcome.score,
            outcome.squad.total_price(),
            constraints.budget,
            outcome.stats.iterations,
            outcome.stats.improvements
        );

        let lineup = LineupSelector::select(&outcome.squad, pool);
        info!(
            "starting eleven: {} formation, {:.1} pts",
            lineup.formation, lineup.expected_points
        );

        let plan = TransferPlanner::plan(&outcome.squad, pool, constraints, planner, stop);
        info!(
            "transfer plan: {} moves, {} hits, {:+.1} net over {} gameweeks",
            plan.transfer_count(),
            plan.total_hits,
            plan.total_net_benefit,
            plan.gameweeks.len()
        );

        Ok(OptimizationResult::assemble(pool, &outcome, &lineup, plan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerRecord;
    use crate::squad::SquadValidator;

    fn generate_test_pool() -> PlayerPool {
        let mut records = Vec::new();
        let mut id = 0;
        for &(position, count) in &[("GK", 3), ("DEF", 8), ("MID", 8), ("FWD", 5)] {
            for n in 0..count {
                id += 1;
                records.push(PlayerRecord {
                    id,
                    name: format!("Player {}", id),
                    team: format!("T{}", id % 9),
                    position: position.to_string(),
                    price: 4.0 + (n % 5) as f32 * 1.5,
                    expected_points: (0..4).map(|gw| 2.0 + ((id + gw) % 5) as f32).collect(),
                });
            }
        }
        PlayerPool::from_records(records).unwrap()
    }

    #[test]
    fn test_pipeline_runs_end_to_end() {
        let pool = generate_test_pool();
        let constraints = SquadConstraints::default();
        let search = SearchOptions {
            max_iterations: 2_000,
            plateau_limit: 400,
            seed: 17,
            chains: 2,
        };

        let result = OptimizationPipeline::run(
            &pool,
            &constraints,
            &search,
            &PlannerOptions::default(),
            None,
        )
        .unwrap();

        assert_eq!(result.squad.len(), 15);
        assert!(result.squad_points > 0.0);
        assert!(result.plan.completed);
        assert_eq!(result.plan.gameweeks.len(), 4);
        assert!(SquadValidator::is_valid(
            &result.plan.final_squad,
            &pool,
            &constraints
        ));
    }
}
