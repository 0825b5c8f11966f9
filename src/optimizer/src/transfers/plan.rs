use crate::squad::Squad;
use crate::transfers::TransferDecision;
use serde::Serialize;

/// What happened in one gameweek of the plan.
#[derive(Debug, Clone, Serialize)]
pub struct GameweekPlan {
    pub gameweek: usize,
    /// Free transfers available before this gameweek's moves.
    pub free_transfers: u8,
    pub decision: TransferDecision,
    /// Squad after the moves were applied.
    pub members: Vec<u32>,
    pub hits: u8,
    pub penalty: f32,
    /// Rest-of-horizon gain of the moves minus the penalty paid.
    pub net_benefit: f32,
    /// Best starting eleven for this gameweek, after the moves.
    pub lineup_points: f32,
    pub cumulative_points: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferPlan {
    pub gameweeks: Vec<GameweekPlan>,
    pub total_hits: u32,
    pub total_net_benefit: f32,
    #[serde(skip)]
    pub final_squad: Squad,
    /// False when the plan was cut short by a stop request.
    pub completed: bool,
}

impl TransferPlan {
    pub fn transfer_count(&self) -> usize {
        self.gameweeks
            .iter()
            .map(|gw| gw.decision.transfer_count() as usize)
            .sum()
    }

    pub fn total_points(&self) -> f32 {
        self.gameweeks
            .last()
            .map(|gw| gw.cumulative_points)
            .unwrap_or(0.0)
    }
}
