//! Player inputs, stat model and battle-start stat resolution.

pub mod derived_stats;
pub mod loadout;
pub mod stats;

pub use derived_stats::*;
pub use loadout::*;
pub use stats::*;
