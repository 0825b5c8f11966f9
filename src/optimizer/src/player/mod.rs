pub mod player;
pub mod pool;
pub mod position;

pub use player::*;
pub use pool::*;
pub use position::*;
