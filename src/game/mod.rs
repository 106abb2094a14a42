//! Battle resolution: card policy, turn loop and logging

pub mod battle_loop;
pub mod logger;
pub mod policy;

pub use battle_loop::{Battle, BattleOutcome, BattleState, TurnReport, VerbosityLevel};
pub use logger::{BattleLogger, LogEntry, OutputMode};
pub use policy::{CardSelection, Combo, ComboRule, HeuristicPolicy, COMBO_RULES, PLAY_PRIORITY};
