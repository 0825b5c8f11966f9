use crate::player::{Player, PlayerPool, PlayerPosition};
use crate::squad::{FORMATIONS, Formation, Squad};
use log::warn;
use std::cmp::Ordering;

pub struct LineupSelector;

const LINEUP_SIZE: usize = 11;

/// The eleven starters plus the ordered bench for one scoring window.
#[derive(Debug, Clone)]
pub struct StartingLineup {
    pub starters: Vec<u32>,
    pub bench: Vec<u32>,
    pub formation: Formation,
    pub expected_points: f32,
}

impl LineupSelector {
    /// Best lineup for the whole horizon.
    pub fn select(squad: &Squad, pool: &PlayerPool) -> StartingLineup {
        Self::select_by(squad, pool, |p| p.total_points())
    }

    /// Best lineup for a single gameweek.
    pub fn select_for_gameweek(squad: &Squad, pool: &PlayerPool, gameweek: usize) -> StartingLineup {
        Self::select_by(squad, pool, |p| p.points_for(gameweek))
    }

    fn select_by<F>(squad: &Squad, pool: &PlayerPool, score: F) -> StartingLineup
    where
        F: Fn(&Player) -> f32,
    {
        // Members per position, best first
        let mut groups: [Vec<&Player>; 4] = Default::default();
        for player in squad.players(pool) {
            groups[player.position.index()].push(player);
        }
        for group in groups.iter_mut() {
            group.sort_by(|a, b| score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal));
        }

        let mut best: Option<(Formation, f32)> = None;
        for &formation in FORMATIONS {
            if !Self::is_feasible(&groups, formation) {
                continue;
            }
            let total = Self::formation_total(&groups, formation, &score);
            match best {
                Some((_, best_total)) if total <= best_total => {}
                _ => best = Some((formation, total)),
            }
        }

        let (formation, expected_points) = best.unwrap_or_else(|| {
            // Only reachable for squads that break the position rules
            warn!("no legal formation for squad of {} players", squad.len());
            let fallback = FORMATIONS[0];
            (fallback, Self::formation_total(&groups, fallback, &score))
        });

        let mut starters = Vec::with_capacity(LINEUP_SIZE);
        for position in PlayerPosition::ALL {
            let take = formation.count(position) as usize;
            starters.extend(
                groups[position.index()]
                    .iter()
                    .take(take)
                    .map(|player| player.id),
            );
        }

        let mut bench: Vec<&Player> = squad
            .players(pool)
            .filter(|player| !starters.contains(&player.id))
            .collect();
        bench.sort_by(|a, b| score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal));

        StartingLineup {
            starters,
            bench: bench.into_iter().map(|player| player.id).collect(),
            formation,
            expected_points,
        }
    }

    fn is_feasible(groups: &[Vec<&Player>; 4], formation: Formation) -> bool {
        PlayerPosition::ALL
            .iter()
            .all(|&position| groups[position.index()].len() >= formation.count(position) as usize)
    }

    fn formation_total<F>(groups: &[Vec<&Player>; 4], formation: Formation, score: &F) -> f32
    where
        F: Fn(&Player) -> f32,
    {
        PlayerPosition::ALL
            .iter()
            .map(|&position| {
                groups[position.index()]
                    .iter()
                    .take(formation.count(position) as usize)
                    .map(|player| score(player))
                    .sum::<f32>()
            })
            .sum()
    }
}
