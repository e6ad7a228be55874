// Default combat constants. Balance tables may override every one of these
// through `CombatConstants`; the defaults exist so tables can omit the block.

// Skills
pub const BASIC_ATTACK_SKILL_ID: u32 = 100_000;

// Hit resolution (percent)
pub const BASE_HIT_CHANCE: i64 = 100;
pub const MIN_HIT_CHANCE: i64 = 50;
pub const MAX_HIT_CHANCE: i64 = 100;

// Critical hits (percent)
pub const MAX_CRIT_CHANCE: i64 = 100;
pub const BASE_CRIT_DAMAGE_PERCENT: i64 = 150;

// Elemental multipliers (percent): Fire > Wind > Land > Water > Fire
pub const ELEMENTAL_ADVANTAGE_PERCENT: i64 = 120;
pub const ELEMENTAL_DISADVANTAGE_PERCENT: i64 = 80;

// Damage floor and cap. A cap of 0 disables it.
pub const MIN_DAMAGE: i64 = 1;
pub const DAMAGE_CAP: i64 = 0;
pub const MAX_DAMAGE_REDUCTION_RATE: i64 = 90;

// Turn budgets (actions, not rounds)
pub const DEFAULT_STAGE_TURN_BUDGET: u32 = 200;
pub const ARENA_TURN_BUDGET: u32 = 200;

// Arena score brackets: (max score difference, win delta, lose delta).
// The difference is opponent score minus own score; the first bracket whose
// bound is >= the difference applies, the last bracket catches the rest.
pub const ARENA_SCORE_BRACKETS: [(i64, i64, i64); 5] = [
    (-200, 10, -20),
    (-50, 16, -18),
    (50, 20, -15),
    (200, 26, -12),
    (i64::MAX, 32, -8),
];
