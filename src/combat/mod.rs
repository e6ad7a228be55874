//! Actors, skills, buffs and the combat loop.

pub mod buff;
pub mod logic;
pub mod skill;
pub mod types;

pub use buff::*;
pub use logic::*;
pub use skill::*;
pub use types::*;
