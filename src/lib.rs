//! Skirmish - Deterministic Combat Engine
//!
//! Resolves one battle from participant loadouts, balance tables and a seed
//! into a replayable battle log plus rewards. The same inputs produce the
//! same log, byte for byte, on every machine.
//!
//! Entry points are the mode front ends in [`modes`]; [`combat::simulate`]
//! runs already-resolved input directly.

pub mod character;
pub mod combat;
pub mod core;
pub mod error;
pub mod items;
pub mod log;
pub mod modes;
pub mod rng;
pub mod simulator;
pub mod tables;
