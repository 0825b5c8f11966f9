use crate::error::{OptimizerError, Result};
use crate::player::{Player, PlayerPool, PlayerPosition};
use crate::search::{SearchOptions, SearchState};
use crate::squad::{Squad, SquadConstraints, SquadValidator};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{RngExt, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

pub struct SquadOptimizer;

/// Share of iterations that try a paired cross-position swap instead of a
/// single replacement. Pairs can escape optima a budget-locked single swap
/// cannot reach.
const DOUBLE_SWAP_CHANCE: f32 = 0.2;

/// The squad a search run settled on.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub squad: Squad,
    pub score: f32,
    pub stats: SearchStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchStats {
    pub iterations: u32,
    pub improvements: u32,
    pub initial_score: f32,
    pub converged: bool,
}

enum Acceptance {
    Improved,
    Cheaper,
    Rejected,
}

impl SquadOptimizer {
    /// Runs the squad search: feasibility checks, a greedy starting squad,
    /// then seeded stochastic hill-climbing. With `chains > 1` the restarts
    /// run in parallel and the best result wins; ties go to the cheaper
    /// squad, then to the lower chain index, so a fixed seed always yields
    /// the same squad.
    pub fn optimize(
        pool: &PlayerPool,
        constraints: &SquadConstraints,
        options: &SearchOptions,
        stop: Option<&AtomicBool>,
    ) -> Result<SearchOutcome> {
        Self::check_feasibility(pool, constraints)?;

        let chains = options.chains.max(1);
        if chains == 1 {
            return Self::run_chain(pool, constraints, options, options.seed, stop);
        }

        let results: Vec<Result<SearchOutcome>> = (0..chains)
            .into_par_iter()
            .map(|chain| {
                Self::run_chain(
                    pool,
                    constraints,
                    options,
                    options.seed.wrapping_add(chain as u64),
                    stop,
                )
            })
            .collect();

        let mut merged: Option<SearchOutcome> = None;
        for result in results {
            let outcome = result?;
            merged = Some(match merged {
                None => outcome,
                Some(best) => Self::better(best, outcome),
            });
        }

        match merged {
            Some(outcome) => Ok(outcome),
            // chains >= 2 always yields an outcome; kept as a fallback
            None => Self::run_chain(pool, constraints, options, options.seed, stop),
        }
    }

    /// Keeps `best` on ties so earlier chains win.
    fn better(best: SearchOutcome, candidate: SearchOutcome) -> SearchOutcome {
        if candidate.score > best.score
            || (candidate.score == best.score
                && candidate.squad.total_price() < best.squad.total_price())
        {
            candidate
        } else {
            best
        }
    }

    // ==================== FEASIBILITY ====================

    fn check_feasibility(pool: &PlayerPool, constraints: &SquadConstraints) -> Result<()> {
        for position in PlayerPosition::ALL {
            let required = constraints.limit(position).min as usize;
            let available = pool.position_count(position);
            if available < required {
                return Err(OptimizerError::InsufficientCandidates {
                    position,
                    required,
                    available,
                });
            }
        }

        let minimum_cost = Self::cheapest_fill_cost(pool, constraints)?;
        if minimum_cost > constraints.budget {
            return Err(OptimizerError::BudgetInfeasible {
                minimum_cost,
                budget: constraints.budget,
            });
        }

        let required = constraints.squad_size as usize;
        let selectable: usize = Self::team_sizes(pool)
            .values()
            .map(|&count| count.min(constraints.max_per_team as usize))
            .sum();
        if selectable < required {
            return Err(OptimizerError::TeamLimitInfeasible {
                required,
                selectable,
            });
        }

        Ok(())
    }

    fn team_sizes(pool: &PlayerPool) -> HashMap<u32, usize> {
        let mut sizes = HashMap::new();
        for player in pool.players() {
            *sizes.entry(player.team_id).or_insert(0) += 1;
        }
        sizes
    }

    /// Price of the cheapest squad that honors the position limits: the
    /// `min` cheapest players per position, topped up to squad size with the
    /// cheapest players still inside their position maximum. Team caps are
    /// ignored here, so this is a lower bound.
    fn cheapest_fill_cost(pool: &PlayerPool, constraints: &SquadConstraints) -> Result<f32> {
        let size = constraints.squad_size as usize;
        let mut total = 0.0f64;
        let mut reserved = 0usize;
        let mut flex: Vec<f32> = Vec::new();

        for position in PlayerPosition::ALL {
            let limit = constraints.limit(position);
            let mut prices: Vec<f32> = pool.by_position(position).map(|p| p.price).collect();
            prices.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

            if prices.len() < limit.min as usize {
                return Err(OptimizerError::InsufficientCandidates {
                    position,
                    required: limit.min as usize,
                    available: prices.len(),
                });
            }

            total += prices[..limit.min as usize]
                .iter()
                .map(|&p| p as f64)
                .sum::<f64>();
            reserved += limit.min as usize;
            flex.extend(&prices[limit.min as usize..(limit.max as usize).min(prices.len())]);
        }

        let open_slots = size - reserved.min(size);
        if flex.len() < open_slots {
            // The pool cannot reach squad size inside the position maxima;
            // report the position with the deepest shortfall.
            let (position, required, available) = PlayerPosition::ALL
                .iter()
                .map(|&position| {
                    let limit = constraints.limit(position);
                    let available = pool.position_count(position);
                    (position, limit.max as usize, available)
                })
                .max_by_key(|&(_, max, available)| max.saturating_sub(available))
                .unwrap_or((PlayerPosition::Goalkeeper, 0, 0));
            return Err(OptimizerError::InsufficientCandidates {
                position,
                required,
                available,
            });
        }

        flex.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        total += flex[..open_slots].iter().map(|&p| p as f64).sum::<f64>();

        Ok(total as f32)
    }

    // ==================== INITIAL SQUAD ====================

    /// Greedy by projected points, with a guard that keeps every pick
    /// completable: enough slots for the unmet position minimums, and
    /// enough budget left to fill the remaining slots at floor prices.
    fn build_initial_squad(pool: &PlayerPool, constraints: &SquadConstraints) -> Result<Squad> {
        let size = constraints.squad_size as usize;
        let cheapest = Self::by_position_price_sorted(pool);

        let mut by_points: Vec<&Player> = pool.players().iter().collect();
        by_points.sort_by(|a, b| {
            b.total_points()
                .partial_cmp(&a.total_points())
                .unwrap_or(Ordering::Equal)
        });

        let mut squad = Squad::new();
        for player in &by_points {
            if squad.len() == size {
                break;
            }
            if squad.can_add(player, constraints)
                && Self::can_complete_with(&cheapest, constraints, &squad, player)
            {
                squad.add(player);
            }
        }

        // Cheapness pass for anything the score pass could not afford
        if squad.len() < size {
            let mut by_price: Vec<&Player> = pool.players().iter().collect();
            by_price.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));
            for player in &by_price {
                if squad.len() == size {
                    break;
                }
                if squad.can_add(player, constraints)
                    && Self::can_complete_with(&cheapest, constraints, &squad, player)
                {
                    squad.add(player);
                }
            }
        }

        if squad.len() < size || !squad.satisfies(constraints) {
            return Err(OptimizerError::BudgetInfeasible {
                minimum_cost: Self::cheapest_fill_cost(pool, constraints)?,
                budget: constraints.budget,
            });
        }

        Ok(squad)
    }

    fn by_position_price_sorted(pool: &PlayerPool) -> [Vec<&Player>; 4] {
        let mut sorted: [Vec<&Player>; 4] = Default::default();
        for player in pool.players() {
            sorted[player.position.index()].push(player);
        }
        for group in sorted.iter_mut() {
            group.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));
        }
        sorted
    }

    /// Whether the squad can still be completed after adding `pending`:
    /// slots remain for every unmet minimum and the cheapest completion
    /// fits the budget. Team caps are not part of the estimate.
    fn can_complete_with(
        cheapest: &[Vec<&Player>; 4],
        constraints: &SquadConstraints,
        squad: &Squad,
        pending: &Player,
    ) -> bool {
        let size = constraints.squad_size as usize;
        let open_after = size - (squad.len() + 1);

        let mut reserved = 0usize;
        let mut completion_cost = 0.0f64;
        let mut flex_prices: Vec<f32> = Vec::new();

        for position in PlayerPosition::ALL {
            let limit = constraints.limit(position);
            let count = squad.position_count(position) as usize
                + (pending.position == position) as usize;
            let need = (limit.min as usize).saturating_sub(count);
            let flex_room = (limit.max as usize).saturating_sub(count + need);
            reserved += need;

            let mut taken = 0usize;
            let mut extras = 0usize;
            for player in &cheapest[position.index()] {
                if player.id == pending.id || squad.contains(player.id) {
                    continue;
                }
                if taken < need {
                    completion_cost += player.price as f64;
                    taken += 1;
                } else if extras < flex_room {
                    flex_prices.push(player.price);
                    extras += 1;
                } else {
                    break;
                }
            }
            if taken < need {
                return false;
            }
        }

        if reserved > open_after {
            return false;
        }
        let flex_slots = open_after - reserved;
        if flex_prices.len() < flex_slots {
            return false;
        }
        flex_prices.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        completion_cost += flex_prices[..flex_slots].iter().map(|&p| p as f64).sum::<f64>();

        squad.total_price() as f64 + pending.price as f64 + completion_cost
            <= constraints.budget as f64
    }

    // ==================== SEARCH LOOP ====================

    fn run_chain(
        pool: &PlayerPool,
        constraints: &SquadConstraints,
        options: &SearchOptions,
        seed: u64,
        stop: Option<&AtomicBool>,
    ) -> Result<SearchOutcome> {
        let initial = Self::build_initial_squad(pool, constraints)?;
        let initial_score = initial.window_points(pool);
        debug!(
            "initial squad: {:.1} pts, {:.1} cost",
            initial_score,
            initial.total_price()
        );

        let mut state = SearchState::new(initial, initial_score);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut candidates: [Vec<u32>; 4] = Default::default();
        for player in pool.players() {
            candidates[player.position.index()].push(player.id);
        }

        let mut converged = true;
        while state.iteration < options.max_iterations {
            if let Some(flag) = stop {
                if flag.load(AtomicOrdering::SeqCst) {
                    converged = false;
                    break;
                }
            }
            if state.plateau >= options.plateau_limit {
                break;
            }
            state.iteration += 1;

            let acceptance = if rng.random::<f32>() < DOUBLE_SWAP_CHANCE {
                Self::try_double_swap(&mut state, pool, constraints, &candidates, &mut rng)
            } else {
                Self::try_single_swap(&mut state, pool, constraints, &candidates, &mut rng)
            };

            match acceptance {
                Acceptance::Improved => {
                    state.improvements += 1;
                    state.plateau = 0;
                    if state.current_score > state.best_score {
                        state.best_score = state.current_score;
                        state.best = state.current.clone();
                    }
                }
                Acceptance::Cheaper => {
                    // Same score, lower cost: keep it, but the objective
                    // did not move
                    state.plateau += 1;
                    state.best = state.current.clone();
                }
                Acceptance::Rejected => state.plateau += 1,
            }
        }

        let score = state.best.window_points(pool);
        debug!(
            "chain done: {} iterations, {} improvements, {:.1} pts",
            state.iteration, state.improvements, score
        );
        debug_assert!(SquadValidator::validate(&state.best, pool, constraints).is_empty());

        Ok(SearchOutcome {
            squad: state.best,
            score,
            stats: SearchStats {
                iterations: state.iteration,
                improvements: state.improvements,
                initial_score,
                converged,
            },
        })
    }

    fn try_single_swap(
        state: &mut SearchState,
        pool: &PlayerPool,
        constraints: &SquadConstraints,
        candidates: &[Vec<u32>; 4],
        rng: &mut StdRng,
    ) -> Acceptance {
        let Some(&out_id) = state.current.members().choose(rng) else {
            return Acceptance::Rejected;
        };
        let out = &pool[out_id];

        let Some(&in_id) = candidates[out.position.index()].choose(rng) else {
            return Acceptance::Rejected;
        };
        if state.current.contains(in_id) {
            return Acceptance::Rejected;
        }
        let incoming = &pool[in_id];

        if !state.current.can_swap(out, incoming, constraints) {
            return Acceptance::Rejected;
        }

        let delta = incoming.total_points() - out.total_points();
        if delta > 0.0 {
            state.current.swap(out, incoming);
            state.current_score += delta;
            Acceptance::Improved
        } else if delta == 0.0 && incoming.price < out.price {
            state.current.swap(out, incoming);
            Acceptance::Cheaper
        } else {
            Acceptance::Rejected
        }
    }

    /// Replaces two members of different positions atomically. Validated on
    /// a scratch squad because the pair may only be legal together.
    fn try_double_swap(
        state: &mut SearchState,
        pool: &PlayerPool,
        constraints: &SquadConstraints,
        candidates: &[Vec<u32>; 4],
        rng: &mut StdRng,
    ) -> Acceptance {
        let members = state.current.members();
        let first = rng.random_range(0..members.len());
        let second = rng.random_range(0..members.len());
        if first == second {
            return Acceptance::Rejected;
        }

        let out_one = &pool[members[first]];
        let out_two = &pool[members[second]];
        if out_one.position == out_two.position {
            return Acceptance::Rejected;
        }

        let Some(&in_one_id) = candidates[out_one.position.index()].choose(rng) else {
            return Acceptance::Rejected;
        };
        let Some(&in_two_id) = candidates[out_two.position.index()].choose(rng) else {
            return Acceptance::Rejected;
        };
        if state.current.contains(in_one_id) || state.current.contains(in_two_id) {
            return Acceptance::Rejected;
        }
        let in_one = &pool[in_one_id];
        let in_two = &pool[in_two_id];

        let delta = in_one.total_points() + in_two.total_points()
            - out_one.total_points()
            - out_two.total_points();
        let cheaper = in_one.price + in_two.price < out_one.price + out_two.price;
        if delta < 0.0 || (delta == 0.0 && !cheaper) {
            return Acceptance::Rejected;
        }

        let mut scratch = state.current.clone();
        scratch.remove(out_one);
        scratch.remove(out_two);
        scratch.add(in_one);
        scratch.add(in_two);
        if !scratch.satisfies(constraints) {
            return Acceptance::Rejected;
        }

        state.current = scratch;
        if delta > 0.0 {
            state.current_score += delta;
            Acceptance::Improved
        } else {
            Acceptance::Cheaper
        }
    }
}
