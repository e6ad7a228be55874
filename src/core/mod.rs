//! Combat constants and pure combat math.

pub mod balance;
pub mod combat_math;
pub mod constants;

pub use balance::*;
pub use combat_math::*;
pub use constants::*;
