use crate::player::PlayerPool;
use crate::squad::{LineupSelector, Squad, SquadConstraints, SquadValidator};
use crate::transfers::{GameweekPlan, Transfer, TransferDecision, TransferPlan};
use itertools::Itertools;
use log::debug;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

pub struct TransferPlanner;

/// How many top singles per position seed the paired-move enumeration.
const TOP_SINGLES_PER_POSITION: usize = 5;

#[derive(Debug, Clone)]
pub struct PlannerOptions {
    /// Points paid for each transfer beyond the free allowance.
    pub hit_cost: f32,
    /// Most free transfers that can be banked.
    pub max_free_transfers: u8,
    pub initial_free_transfers: u8,
    /// Gameweeks peeked ahead before paying a hit; capped at one.
    pub lookahead: u8,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        PlannerOptions {
            hit_cost: 4.0,
            max_free_transfers: 2,
            initial_free_transfers: 1,
            lookahead: 1,
        }
    }
}

#[derive(Debug, Clone)]
struct CandidateMove {
    out: u32,
    incoming: u32,
    gain: f32,
}

impl TransferPlanner {
    /// Walks the horizon week by week: pick the best move for the gameweek,
    /// apply it, score the lineup, roll the free-transfer allowance.
    pub fn plan(
        squad: &Squad,
        pool: &PlayerPool,
        constraints: &SquadConstraints,
        options: &PlannerOptions,
        stop: Option<&AtomicBool>,
    ) -> TransferPlan {
        let mut current = squad.clone();
        let mut free = options.initial_free_transfers.min(options.max_free_transfers);
        let mut gameweeks = Vec::with_capacity(pool.gameweeks());
        let mut total_hits = 0u32;
        let mut total_net_benefit = 0.0f32;
        let mut cumulative = 0.0f32;
        let mut completed = true;

        for gameweek in 1..=pool.gameweeks() {
            if let Some(flag) = stop {
                if flag.load(AtomicOrdering::SeqCst) {
                    completed = false;
                    break;
                }
            }

            let decision = Self::decide(&current, pool, constraints, options, gameweek, free);

            let used = decision.transfer_count();
            for transfer in decision.transfers() {
                current.swap(&pool[transfer.player_out], &pool[transfer.player_in]);
            }
            debug_assert!(SquadValidator::validate(&current, pool, constraints).is_empty());

            let hits = used.saturating_sub(free);
            let penalty = hits as f32 * options.hit_cost;
            let net_benefit = decision.total_gain() - penalty;
            let lineup = LineupSelector::select_for_gameweek(&current, pool, gameweek);
            cumulative += lineup.expected_points - penalty;
            total_hits += hits as u32;
            total_net_benefit += net_benefit;

            debug!(
                "gw {}: {} moves ({} free, {} hits), net {:.1}, lineup {:.1}",
                gameweek, used, free, hits, net_benefit, lineup.expected_points
            );

            let mut members = current.members().to_vec();
            members.sort_unstable();
            gameweeks.push(GameweekPlan {
                gameweek,
                free_transfers: free,
                decision,
                members,
                hits,
                penalty,
                net_benefit,
                lineup_points: lineup.expected_points,
                cumulative_points: cumulative,
            });

            free = (free + 1 - used.min(free)).min(options.max_free_transfers);
        }

        TransferPlan {
            gameweeks,
            total_hits,
            total_net_benefit,
            final_squad: current,
            completed,
        }
    }

    fn decide(
        squad: &Squad,
        pool: &PlayerPool,
        constraints: &SquadConstraints,
        options: &PlannerOptions,
        gameweek: usize,
        free: u8,
    ) -> TransferDecision {
        let (decision, net, hits) =
            Self::best_move(squad, pool, constraints, options, gameweek, free);

        // A hit is only worth paying if waiting a week with a banked
        // transfer would not do better
        if hits > 0 && options.lookahead >= 1 && gameweek < pool.gameweeks() {
            let banked = (free + 1).min(options.max_free_transfers);
            let (_, deferred_net, _) =
                Self::best_move(squad, pool, constraints, options, gameweek + 1, banked);
            if deferred_net > net {
                debug!(
                    "gw {}: deferring, {:.1} next week beats {:.1} now",
                    gameweek, deferred_net, net
                );
                return TransferDecision::NoChange;
            }
        }

        decision
    }

    /// Best single or paired move for the gameweek, or `NoChange` when
    /// nothing nets positive. Ties prefer the single.
    fn best_move(
        squad: &Squad,
        pool: &PlayerPool,
        constraints: &SquadConstraints,
        options: &PlannerOptions,
        gameweek: usize,
        free: u8,
    ) -> (TransferDecision, f32, u8) {
        let (legal, seeds) = Self::enumerate_moves(squad, pool, constraints, gameweek);

        let mut best: Option<(TransferDecision, f32, u8)> = None;

        if constraints.max_transfers_per_gameweek >= 1 {
            let hits = 1u8.saturating_sub(free);
            if hits <= constraints.max_hits_per_gameweek {
                if let Some(mv) = legal.first() {
                    let net = mv.gain - hits as f32 * options.hit_cost;
                    let transfer = Transfer::new(&pool[mv.out], &pool[mv.incoming], mv.gain);
                    best = Some((TransferDecision::Single(transfer), net, hits));
                }
            }
        }

        if constraints.max_transfers_per_gameweek >= 2 {
            let hits = 2u8.saturating_sub(free);
            if hits <= constraints.max_hits_per_gameweek {
                if let Some((a, b)) = Self::best_pair(squad, pool, constraints, &seeds) {
                    let net = a.gain + b.gain - hits as f32 * options.hit_cost;
                    if best.as_ref().map_or(true, |(_, single_net, _)| net > *single_net) {
                        let first = Transfer::new(&pool[a.out], &pool[a.incoming], a.gain);
                        let second = Transfer::new(&pool[b.out], &pool[b.incoming], b.gain);
                        best = Some((TransferDecision::Double(first, second), net, hits));
                    }
                }
            }
        }

        match best {
            Some((decision, net, hits)) if net > 0.0 => (decision, net, hits),
            _ => (TransferDecision::NoChange, 0.0, 0),
        }
    }

    /// All improving same-position replacements, measured over the rest of
    /// the horizon. `legal` passes every squad rule; `seeds` relaxes only
    /// the budget, because a pair can fund a move a single cannot.
    fn enumerate_moves(
        squad: &Squad,
        pool: &PlayerPool,
        constraints: &SquadConstraints,
        gameweek: usize,
    ) -> (Vec<CandidateMove>, [Vec<CandidateMove>; 4]) {
        let mut legal = Vec::new();
        let mut seeds: [Vec<CandidateMove>; 4] = Default::default();

        for &out_id in squad.members() {
            let out = &pool[out_id];
            let out_points = out.points_from(gameweek);
            for incoming in pool.by_position(out.position) {
                if squad.contains(incoming.id) {
                    continue;
                }
                let gain = incoming.points_from(gameweek) - out_points;
                if gain <= 0.0 {
                    continue;
                }
                let mv = CandidateMove {
                    out: out_id,
                    incoming: incoming.id,
                    gain,
                };
                if squad.can_swap(out, incoming, constraints) {
                    legal.push(mv.clone());
                }
                if incoming.team_id == out.team_id
                    || squad.team_count(incoming.team_id) < constraints.max_per_team
                {
                    seeds[out.position.index()].push(mv);
                }
            }
        }

        let rank = |a: &CandidateMove, b: &CandidateMove| {
            b.gain
                .partial_cmp(&a.gain)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.out.cmp(&b.out))
                .then_with(|| a.incoming.cmp(&b.incoming))
        };
        legal.sort_by(rank);
        for group in seeds.iter_mut() {
            group.sort_by(rank);
            group.truncate(TOP_SINGLES_PER_POSITION);
        }

        (legal, seeds)
    }

    /// Highest-gain pair of seed moves with distinct players that is legal
    /// as a whole. Ties keep the earlier pair, so the result is stable.
    fn best_pair<'s>(
        squad: &Squad,
        pool: &PlayerPool,
        constraints: &SquadConstraints,
        seeds: &'s [Vec<CandidateMove>; 4],
    ) -> Option<(&'s CandidateMove, &'s CandidateMove)> {
        let flat: Vec<&CandidateMove> = seeds.iter().flatten().collect();

        let mut best: Option<(&CandidateMove, &CandidateMove, f32)> = None;
        for (a, b) in flat.iter().copied().tuple_combinations() {
            if a.out == b.out || a.incoming == b.incoming {
                continue;
            }
            let gain = a.gain + b.gain;
            if let Some((_, _, best_gain)) = best {
                if gain <= best_gain {
                    continue;
                }
            }
            let mut scratch = squad.clone();
            scratch.remove(&pool[a.out]);
            scratch.remove(&pool[b.out]);
            scratch.add(&pool[a.incoming]);
            scratch.add(&pool[b.incoming]);
            if !scratch.satisfies(constraints) {
                continue;
            }
            best = Some((a, b, gain));
        }

        best.map(|(a, b, _)| (a, b))
    }
}
