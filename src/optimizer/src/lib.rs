pub mod error;
pub mod pipeline;
pub mod player;
pub mod result;
pub mod search;
pub mod squad;
pub mod transfers;
pub mod utils;

// Re-export player items
pub use player::{Player, PlayerPool, PlayerPosition, PlayerRecord};

// Re-export squad items
pub use squad::{
    Formation, LineupSelector, PositionLimit, RuleViolation, Squad, SquadConstraints,
    SquadValidator, StartingLineup, FORMATIONS,
};

// Re-export search items
pub use search::{SearchOptions, SearchOutcome, SearchStats, SquadOptimizer};

// Re-export transfer items
pub use transfers::{
    GameweekPlan, PlannerOptions, Transfer, TransferDecision, TransferPlan, TransferPlanner,
};

pub use error::{OptimizerError, Result};
pub use pipeline::OptimizationPipeline;
pub use result::{
    GameweekPoints, LineupReport, OptimizationResult, PositionCount, SquadEntry, TeamCount,
};
pub use utils::*;
