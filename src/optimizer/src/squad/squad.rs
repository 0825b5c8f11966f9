use crate::player::{Player, PlayerPool, PlayerPosition};
use crate::squad::SquadConstraints;
use std::collections::HashMap;

/// A working roster.
///
/// Aggregates (position counts, team counts, total price) are maintained on
/// every mutation so legality checks never rescan the member list. The price
/// total accumulates in f64 to keep thousands of incremental swaps from
/// drifting.
#[derive(Debug, Clone, Default)]
pub struct Squad {
    members: Vec<u32>,
    position_counts: [u8; 4],
    team_counts: HashMap<u32, u8>,
    total_price: f64,
}

impl Squad {
    pub fn new() -> Self {
        Squad::default()
    }

    pub fn from_players<'p>(players: impl IntoIterator<Item = &'p Player>) -> Self {
        let mut squad = Squad::new();
        for player in players {
            squad.add(player);
        }
        squad
    }

    pub fn add(&mut self, player: &Player) {
        debug_assert!(!self.contains(player.id));
        self.members.push(player.id);
        self.position_counts[player.position.index()] += 1;
        *self.team_counts.entry(player.team_id).or_insert(0) += 1;
        self.total_price += player.price as f64;
    }

    pub fn remove(&mut self, player: &Player) {
        let slot = self
            .members
            .iter()
            .position(|&id| id == player.id)
            .unwrap_or_else(|| panic!("player {} is not in the squad", player.id));
        self.members.swap_remove(slot);
        self.position_counts[player.position.index()] -= 1;
        match self.team_counts.get_mut(&player.team_id) {
            Some(count) if *count > 1 => *count -= 1,
            _ => {
                self.team_counts.remove(&player.team_id);
            }
        }
        self.total_price -= player.price as f64;
    }

    pub fn swap(&mut self, out: &Player, incoming: &Player) {
        self.remove(out);
        self.add(incoming);
    }

    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.members.contains(&id)
    }

    #[inline]
    pub fn members(&self) -> &[u32] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn position_count(&self, position: PlayerPosition) -> u8 {
        self.position_counts[position.index()]
    }

    #[inline]
    pub fn team_count(&self, team_id: u32) -> u8 {
        self.team_counts.get(&team_id).copied().unwrap_or(0)
    }

    pub fn team_counts(&self) -> impl Iterator<Item = (u32, u8)> + '_ {
        self.team_counts.iter().map(|(&team, &count)| (team, count))
    }

    #[inline]
    pub fn total_price(&self) -> f32 {
        self.total_price as f32
    }

    /// Whether adding `player` keeps the squad legal and completable.
    pub fn can_add(&self, player: &Player, constraints: &SquadConstraints) -> bool {
        if self.contains(player.id) || self.len() >= constraints.squad_size as usize {
            return false;
        }
        if self.position_count(player.position) >= constraints.limit(player.position).max {
            return false;
        }
        if self.team_count(player.team_id) >= constraints.max_per_team {
            return false;
        }
        self.total_price + player.price as f64 <= constraints.budget as f64
    }

    /// Whether replacing `out` with `incoming` keeps the squad legal.
    /// Works for cross-position replacements too, so the caller does not
    /// have to special-case them.
    pub fn can_swap(
        &self,
        out: &Player,
        incoming: &Player,
        constraints: &SquadConstraints,
    ) -> bool {
        if !self.contains(out.id) || self.contains(incoming.id) {
            return false;
        }

        if out.position != incoming.position {
            let out_limit = constraints.limit(out.position);
            let in_limit = constraints.limit(incoming.position);
            if self.position_count(out.position) - 1 < out_limit.min {
                return false;
            }
            if self.position_count(incoming.position) + 1 > in_limit.max {
                return false;
            }
        }

        if incoming.team_id != out.team_id
            && self.team_count(incoming.team_id) >= constraints.max_per_team
        {
            return false;
        }

        self.total_price - out.price as f64 + incoming.price as f64 <= constraints.budget as f64
    }

    /// Full legality check against the aggregates. Does not look for
    /// duplicate members; construction prevents those.
    pub fn satisfies(&self, constraints: &SquadConstraints) -> bool {
        if self.len() != constraints.squad_size as usize {
            return false;
        }
        for position in PlayerPosition::ALL {
            if !constraints
                .limit(position)
                .contains(self.position_count(position))
            {
                return false;
            }
        }
        if self
            .team_counts
            .values()
            .any(|&count| count > constraints.max_per_team)
        {
            return false;
        }
        self.total_price <= constraints.budget as f64
    }

    pub fn players<'p>(&'p self, pool: &'p PlayerPool) -> impl Iterator<Item = &'p Player> + 'p {
        self.members.iter().map(move |&id| &pool[id])
    }

    /// Projected points of all members over the whole horizon.
    pub fn window_points(&self, pool: &PlayerPool) -> f32 {
        self.players(pool).map(|p| p.total_points()).sum()
    }

    /// Projected points of all members for a single gameweek.
    pub fn gameweek_points(&self, pool: &PlayerPool, gameweek: usize) -> f32 {
        self.players(pool).map(|p| p.points_for(gameweek)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_test_player(id: u32, position: PlayerPosition, team_id: u32, price: f32) -> Player {
        Player::new(
            id,
            format!("Player {}", id),
            team_id,
            format!("T{}", team_id),
            position,
            price,
            vec![2.0, 2.0],
        )
    }

    #[test]
    fn test_aggregates_follow_mutations() {
        let gk = generate_test_player(1, PlayerPosition::Goalkeeper, 1, 4.5);
        let def = generate_test_player(2, PlayerPosition::Defender, 1, 5.0);
        let mid = generate_test_player(3, PlayerPosition::Midfielder, 2, 7.5);

        let mut squad = Squad::new();
        squad.add(&gk);
        squad.add(&def);
        squad.add(&mid);

        assert_eq!(squad.len(), 3);
        assert_eq!(squad.position_count(PlayerPosition::Defender), 1);
        assert_eq!(squad.team_count(1), 2);
        assert_eq!(squad.total_price(), 17.0);

        squad.remove(&def);

        assert_eq!(squad.len(), 2);
        assert_eq!(squad.position_count(PlayerPosition::Defender), 0);
        assert_eq!(squad.team_count(1), 1);
        assert_eq!(squad.total_price(), 12.0);
        assert!(!squad.contains(2));
    }

    #[test]
    fn test_swap_updates_aggregates() {
        let out = generate_test_player(1, PlayerPosition::Forward, 1, 6.0);
        let incoming = generate_test_player(2, PlayerPosition::Forward, 2, 8.0);

        let mut squad = Squad::from_players([&out]);
        squad.swap(&out, &incoming);

        assert!(!squad.contains(1));
        assert!(squad.contains(2));
        assert_eq!(squad.team_count(1), 0);
        assert_eq!(squad.team_count(2), 1);
        assert_eq!(squad.total_price(), 8.0);
    }

    #[test]
    fn test_can_swap_enforces_team_cap_and_budget() {
        let constraints = SquadConstraints {
            budget: 20.0,
            max_per_team: 2,
            ..SquadConstraints::default()
        };

        let a = generate_test_player(1, PlayerPosition::Midfielder, 1, 5.0);
        let b = generate_test_player(2, PlayerPosition::Midfielder, 2, 5.0);
        let c = generate_test_player(3, PlayerPosition::Midfielder, 2, 5.0);
        let squad = Squad::from_players([&a, &b, &c]);

        // Team 2 is already at the cap
        let from_team_two = generate_test_player(4, PlayerPosition::Midfielder, 2, 5.0);
        assert!(!squad.can_swap(&a, &from_team_two, &constraints));

        // Same team swap stays inside the cap
        let replacement = generate_test_player(5, PlayerPosition::Midfielder, 2, 5.0);
        assert!(squad.can_swap(&b, &replacement, &constraints));

        // Too expensive
        let pricey = generate_test_player(6, PlayerPosition::Midfielder, 3, 12.0);
        assert!(!squad.can_swap(&a, &pricey, &constraints));
    }

    #[test]
    fn test_can_swap_rejects_members_and_strangers() {
        let constraints = SquadConstraints::default();
        let a = generate_test_player(1, PlayerPosition::Defender, 1, 5.0);
        let b = generate_test_player(2, PlayerPosition::Defender, 2, 5.0);
        let outsider = generate_test_player(3, PlayerPosition::Defender, 3, 5.0);

        let squad = Squad::from_players([&a, &b]);

        // Incoming already in the squad
        assert!(!squad.can_swap(&a, &b, &constraints));
        // Outgoing not in the squad
        assert!(!squad.can_swap(&outsider, &b, &constraints));
    }
}
