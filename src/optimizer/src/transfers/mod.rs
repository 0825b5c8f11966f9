pub mod decision;
pub mod plan;
pub mod planner;

pub use decision::*;
pub use plan::*;
pub use planner::*;
