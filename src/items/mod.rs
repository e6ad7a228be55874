//! Reward items and the weighted reward generator.

pub mod drops;
pub mod types;

pub use drops::*;
pub use types::*;
