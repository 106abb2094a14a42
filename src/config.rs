//! Balance configuration
//!
//! Every tunable number of the game lives here. The defaults reproduce the
//! reference balance; a JSON file may override any subset of fields.

use crate::core::CardKind;
use crate::game::Combo;
use crate::loader::{DeckEntry, DeckList};
use crate::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// Player
pub const PLAYER_MAX_HEALTH: i32 = 40;
pub const PLAYER_LOW_HEALTH_THRESHOLD: i32 = 10;

// Monster
pub const MONSTER_HEALTH: i32 = 13;
pub const MONSTER_LIGHT_ATTACK_DAMAGE: i32 = 3;
pub const MONSTER_HEAVY_ATTACK_DAMAGE: i32 = 7;
pub const MONSTER_POWER_GAIN: i32 = 1;

// Card counts
pub const CARD_A_COUNT: u8 = 3;
pub const CARD_B_COUNT: u8 = 3;
pub const CARD_D_COUNT: u8 = 2;
pub const CARD_E_COUNT: u8 = 2;

// Card effects
pub const CARD_AB_DAMAGE: i32 = 3;
pub const CARD_AB_ARMOR: i32 = 2;
pub const CARD_D_DAMAGE: i32 = 1;
pub const CARD_D_STUN_CHANCE: f64 = 1.0 / 3.0;
pub const CARD_E_ARMOR: i32 = 4;

// Turn structure
pub const CARDS_DRAWN_PER_TURN: usize = 5;
pub const MAX_CARDS_PLAYED_PER_TURN: usize = 3;

// Combo bonuses
pub const AAB_COMBO_BONUS_DAMAGE: i32 = 5;
pub const AAD_COMBO_BONUS_DAMAGE: i32 = 3;

// Harness
pub const DEFAULT_BATTLE_COUNT: usize = 10_000;
pub const PROGRESS_REPORT_INTERVAL: usize = 1_000;

/// Player tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: i32,
    /// At or below this health the dual cards grant armor instead of damage
    pub low_health_threshold: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            max_health: PLAYER_MAX_HEALTH,
            low_health_threshold: PLAYER_LOW_HEALTH_THRESHOLD,
        }
    }
}

/// Monster tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterConfig {
    pub health: i32,
    pub light_attack_damage: i32,
    pub heavy_attack_damage: i32,
    pub power_gain: i32,
}

impl Default for MonsterConfig {
    fn default() -> Self {
        MonsterConfig {
            health: MONSTER_HEALTH,
            light_attack_damage: MONSTER_LIGHT_ATTACK_DAMAGE,
            heavy_attack_damage: MONSTER_HEAVY_ATTACK_DAMAGE,
            power_gain: MONSTER_POWER_GAIN,
        }
    }
}

/// Deck composition and per-kind card effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub a_count: u8,
    pub b_count: u8,
    pub d_count: u8,
    pub e_count: u8,
    /// Damage of the A and B dual cards
    pub ab_damage: i32,
    /// Armor of the A and B dual cards (used in defensive mode)
    pub ab_armor: i32,
    pub d_damage: i32,
    pub d_stun_chance: f64,
    pub e_armor: i32,
}

impl Default for CardConfig {
    fn default() -> Self {
        CardConfig {
            a_count: CARD_A_COUNT,
            b_count: CARD_B_COUNT,
            d_count: CARD_D_COUNT,
            e_count: CARD_E_COUNT,
            ab_damage: CARD_AB_DAMAGE,
            ab_armor: CARD_AB_ARMOR,
            d_damage: CARD_D_DAMAGE,
            d_stun_chance: CARD_D_STUN_CHANCE,
            e_armor: CARD_E_ARMOR,
        }
    }
}

/// Turn structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub cards_drawn_per_turn: usize,
    pub max_cards_played_per_turn: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            cards_drawn_per_turn: CARDS_DRAWN_PER_TURN,
            max_cards_played_per_turn: MAX_CARDS_PLAYED_PER_TURN,
        }
    }
}

/// Bonus damage granted by the 3-card combos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboConfig {
    pub aab_bonus_damage: i32,
    pub aad_bonus_damage: i32,
}

impl Default for ComboConfig {
    fn default() -> Self {
        ComboConfig {
            aab_bonus_damage: AAB_COMBO_BONUS_DAMAGE,
            aad_bonus_damage: AAD_COMBO_BONUS_DAMAGE,
        }
    }
}

/// Complete set of balance knobs for one simulation run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    pub player: PlayerConfig,
    pub monster: MonsterConfig,
    pub cards: CardConfig,
    pub rules: RulesConfig,
    pub combos: ComboConfig,
}

impl BalanceConfig {
    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate a configuration from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let config: BalanceConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the battle engine cannot run meaningfully
    pub fn validate(&self) -> Result<()> {
        if self.player.max_health <= 0 {
            return Err(invalid("player max_health must be positive"));
        }
        if self.monster.health <= 0 {
            return Err(invalid("monster health must be positive"));
        }
        if self.deck_list().total_cards() == 0 {
            return Err(invalid("deck must contain at least one card"));
        }
        if self.rules.cards_drawn_per_turn == 0 {
            return Err(invalid("cards_drawn_per_turn must be at least 1"));
        }
        if self.rules.max_cards_played_per_turn == 0 {
            return Err(invalid("max_cards_played_per_turn must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.cards.d_stun_chance) {
            return Err(invalid(&format!(
                "d_stun_chance must be within [0, 1], got {}",
                self.cards.d_stun_chance
            )));
        }

        let non_negative = [
            ("monster light_attack_damage", self.monster.light_attack_damage),
            ("monster heavy_attack_damage", self.monster.heavy_attack_damage),
            ("monster power_gain", self.monster.power_gain),
            ("ab_damage", self.cards.ab_damage),
            ("ab_armor", self.cards.ab_armor),
            ("d_damage", self.cards.d_damage),
            ("e_armor", self.cards.e_armor),
            ("aab_bonus_damage", self.combos.aab_bonus_damage),
            ("aad_bonus_damage", self.combos.aad_bonus_damage),
        ];
        for (name, value) in non_negative {
            if value < 0 {
                return Err(invalid(&format!("{name} must not be negative, got {value}")));
            }
        }

        Ok(())
    }

    /// Deck composition in canonical kind order (A, B, D, E)
    pub fn deck_list(&self) -> DeckList {
        let entries = CardKind::ALL
            .iter()
            .map(|&kind| DeckEntry {
                kind,
                count: self.card_count(kind),
            })
            .collect();
        DeckList { entries }
    }

    pub fn card_count(&self, kind: CardKind) -> u8 {
        match kind {
            CardKind::A => self.cards.a_count,
            CardKind::B => self.cards.b_count,
            CardKind::D => self.cards.d_count,
            CardKind::E => self.cards.e_count,
        }
    }

    /// Bonus damage granted when a combo fires
    pub fn combo_bonus(&self, combo: Combo) -> i32 {
        match combo {
            Combo::Aab => self.combos.aab_bonus_damage,
            Combo::Aad => self.combos.aad_bonus_damage,
        }
    }
}

fn invalid(message: &str) -> SimError {
    SimError::InvalidConfig(message.to_string())
}
