//! Core battle entities

pub mod card;
pub mod monster;
pub mod player;

pub use card::{Card, CardId, CardKind, KindCounts};
pub use monster::{Monster, MonsterAction, MonsterTurn, ACTION_CYCLE};
pub use player::Player;
