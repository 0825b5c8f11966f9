pub mod engine;
pub mod options;
pub mod state;

pub use engine::*;
pub use options::*;
pub use state::*;
