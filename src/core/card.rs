//! Card kinds and card instances

use crate::config::BalanceConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense integer identity of a card instance within one battle
///
/// IDs are assigned in deck-construction order and never reused, so the
/// set of IDs across all piles is the whole deck at every point in a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(u32);

impl CardId {
    pub fn new(id: u32) -> Self {
        CardId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four card symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardKind {
    /// Damage/armor dual, the combo anchor
    A,
    /// Damage/armor dual
    B,
    /// Low damage with a chance to stun
    D,
    /// Pure armor
    E,
}

impl CardKind {
    /// All kinds in deck-construction and play-priority order
    pub const ALL: [CardKind; 4] = [CardKind::A, CardKind::B, CardKind::D, CardKind::E];

    /// Position in per-kind count arrays
    pub fn index(self) -> usize {
        match self {
            CardKind::A => 0,
            CardKind::B => 1,
            CardKind::D => 2,
            CardKind::E => 3,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            CardKind::A => 'A',
            CardKind::B => 'B',
            CardKind::D => 'D',
            CardKind::E => 'E',
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Immutable card instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    pub damage: i32,
    /// Incoming-damage absorption granted when played for armor
    pub armor: i32,
    /// Probability in [0, 1] of stunning the monster for its next action
    pub stun_chance: f64,
}

impl Card {
    /// Build a card of the given kind using the configured per-kind effects
    pub fn from_config(id: CardId, kind: CardKind, config: &BalanceConfig) -> Self {
        let cards = &config.cards;
        let (damage, armor, stun_chance) = match kind {
            CardKind::A | CardKind::B => (cards.ab_damage, cards.ab_armor, 0.0),
            CardKind::D => (cards.d_damage, 0, cards.d_stun_chance),
            CardKind::E => (0, cards.e_armor, 0.0),
        };
        Card {
            id,
            kind,
            damage,
            armor,
            stun_chance,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

/// Per-kind card counts, indexed by [`CardKind::index`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindCounts([usize; 4]);

impl KindCounts {
    pub fn from_kinds(kinds: impl IntoIterator<Item = CardKind>) -> Self {
        let mut counts = KindCounts::default();
        for kind in kinds {
            counts.0[kind.index()] += 1;
        }
        counts
    }

    pub fn get(&self, kind: CardKind) -> usize {
        self.0[kind.index()]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// True if every kind in `self` is present at least as often in `other`
    pub fn is_subset_of(&self, other: &KindCounts) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(need, have)| need <= have)
    }
}
