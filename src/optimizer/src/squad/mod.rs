pub mod constraints;
pub mod formation;
pub mod lineup;
pub mod squad;
pub mod validator;

pub use constraints::*;
pub use formation::*;
pub use lineup::*;
pub use squad::*;
pub use validator::*;
