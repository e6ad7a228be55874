//! Error types for the combat engine.
//!
//! Configuration errors mean the balance tables cannot drive a battle and are
//! always fatal to the run. Input errors mean the caller handed over something
//! the simulator refuses to start with. Losing to the turn budget is not an
//! error at all; it is a [`crate::log::BattleResult`].

use thiserror::Error;

/// Top-level error type for simulator operations.
#[derive(Debug, Error)]
pub enum SimError {
    /// Balance tables are missing data or reference data that does not exist
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Caller supplied input that fails a precondition
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// IO errors (table and loadout loading only)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors (table and loadout loading only)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Balance-table errors. Never recovered from by substituting a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A lookup referenced a row that is not in the sheet
    #[error("{table} has no row for key {key}")]
    MissingRow {
        /// Sheet name
        table: &'static str,
        /// Debug rendering of the missing key
        key: String,
    },

    /// Two rows in one sheet share a key
    #[error("{table} has a duplicate row for key {key}")]
    DuplicateRow {
        /// Sheet name
        table: &'static str,
        /// Debug rendering of the duplicated key
        key: String,
    },

    /// A wave without enemies can never be cleared or lost
    #[error("wave {wave} of {owner} has no enemies")]
    EmptyWave {
        /// Stage, floor or raid that owns the wave
        owner: String,
        /// Wave number
        wave: u32,
    },

    /// A stage or floor without waves
    #[error("{owner} has no waves")]
    NoWaves {
        /// Stage or floor description
        owner: String,
    },

    /// Waves must be numbered 1, 2, 3, ... in order
    #[error("{owner} lists wave {found} where wave {expected} was expected")]
    WaveOrder {
        /// Stage, floor or run description
        owner: String,
        /// Expected wave number
        expected: u32,
        /// Wave number found
        found: u32,
    },

    /// Drop table with no entries or a zero total weight
    #[error("drop table {id} has no weighted entries")]
    EmptyDropTable {
        /// Drop table id
        id: u32,
    },

    /// Drop table whose count range is inverted
    #[error("drop table {id} has min_count {min} above max_count {max}")]
    InvalidDropRange {
        /// Drop table id
        id: u32,
        /// Minimum draw count
        min: u32,
        /// Maximum draw count
        max: u32,
    },

    /// A buff uses a category that has no limit row
    #[error("buff {buff} uses category {category} which has no buff limit")]
    MissingBuffLimit {
        /// Buff id
        buff: u32,
        /// Buff category
        category: u32,
    },

    /// A trigger chance outside 0..=100
    #[error("{owner} has trigger chance {chance}, expected 0..=100")]
    InvalidChance {
        /// Skill or link description
        owner: String,
        /// Offending chance
        chance: u32,
    },

    /// A combat constant outside its allowed range
    #[error("constant {name} = {value} is out of range")]
    InvalidConstant {
        /// Constant field name
        name: &'static str,
        /// Offending value
        value: i64,
    },

    /// An enemy actor id does not fit in 32 bits
    #[error("wave {wave} slot {slot} has no valid actor id")]
    ActorIdOverflow {
        /// Wave number
        wave: u32,
        /// Enemy slot within the wave
        slot: usize,
    },

    /// Zero turn budget on a stage, floor or raid
    #[error("{owner} has a zero turn budget")]
    InvalidTurnBudget {
        /// Stage, floor or raid description
        owner: String,
    },
}

/// Caller input errors, rejected before the combat loop starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Sweep play count must be positive
    #[error("play count must be positive, got {0}")]
    InvalidPlayCount(i32),

    /// Every combatant must start alive
    #[error("actor {actor} has non-positive HP {hp}")]
    NonPositiveHp {
        /// Actor id
        actor: u32,
        /// Resolved max HP
        hp: i64,
    },

    /// At least one player-side combatant is required
    #[error("no player-side combatants")]
    NoPlayers,

    /// Gear-granted skills carry a trigger chance in 0..=100
    #[error("actor {actor} skill {skill} has trigger chance {chance}, expected 0..=100")]
    InvalidSkillChance {
        /// Actor id
        actor: u32,
        /// Granted skill id
        skill: u32,
        /// Offending chance
        chance: u32,
    },

    /// Actor ids must be unique within one run
    #[error("actor id {0} is used more than once")]
    DuplicateActorId(u32),

    /// Sweep needs the stage to have been cleared before
    #[error("stage {stage} is not cleared (cleared up to {cleared})")]
    StageLocked {
        /// Requested stage
        stage: u32,
        /// Highest cleared stage
        cleared: u32,
    },

    /// Tower floors must be climbed in order
    #[error("floor {floor} is locked (cleared up to {cleared})")]
    FloorLocked {
        /// Requested floor
        floor: u32,
        /// Highest cleared floor
        cleared: u32,
    },

    /// A historical request version that cannot carry this input
    #[error("{field} is not supported by {version} requests")]
    UnsupportedForVersion {
        /// Request version name
        version: &'static str,
        /// Input field that is not supported
        field: &'static str,
    },
}

/// Result type alias for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
