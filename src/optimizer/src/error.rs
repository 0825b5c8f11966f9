use crate::player::PlayerPosition;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OptimizerError>;

/// Everything that can stop an optimization run before it produces a squad.
///
/// Data problems are reported while the pool is built; infeasibility is
/// detected before the first search iteration. A search that runs out of
/// time is not an error and is reported through the outcome instead.
#[derive(Error, Debug, Clone)]
pub enum OptimizerError {
    // ==================== DATA ====================
    #[error("player pool is empty")]
    EmptyPool,

    #[error("{player}: negative price {price}")]
    NegativePrice { player: String, price: f32 },

    #[error("{player}: unknown position '{value}'")]
    UnknownPosition { player: String, value: String },

    #[error("{player}: expected {expected} gameweek scores, found {found}")]
    ScoreCountMismatch {
        player: String,
        expected: usize,
        found: usize,
    },

    #[error("duplicate player id {id}")]
    DuplicatePlayer { id: u32 },

    // ==================== FEASIBILITY ====================
    #[error("not enough {position} candidates: need {required}, pool has {available} (short {})", .required - .available)]
    InsufficientCandidates {
        position: PlayerPosition,
        required: usize,
        available: usize,
    },

    #[error("cheapest valid squad costs {minimum_cost:.1}, budget is {budget:.1}")]
    BudgetInfeasible { minimum_cost: f32, budget: f32 },

    #[error("team limit allows only {selectable} selectable players, squad needs {required}")]
    TeamLimitInfeasible { required: usize, selectable: usize },
}

impl OptimizerError {
    /// How many candidates the pool is missing, for feasibility errors.
    pub fn shortfall(&self) -> Option<usize> {
        match self {
            OptimizerError::InsufficientCandidates {
                required,
                available,
                ..
            } => Some(required - available),
            OptimizerError::TeamLimitInfeasible {
                required,
                selectable,
            } => Some(required - selectable),
            _ => None,
        }
    }
}
