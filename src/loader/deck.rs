//! Deck lists and deck construction

use crate::config::BalanceConfig;
use crate::core::{Card, CardId, CardKind};
use rand::seq::SliceRandom;
use rand::Rng;

/// Represents a deck entry (card kind and count)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub kind: CardKind,
    pub count: u8,
}

/// Represents a complete deck list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckList {
    pub entries: Vec<DeckEntry>,
}

impl DeckList {
    /// Total cards in the deck
    pub fn total_cards(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    pub fn count_of(&self, kind: CardKind) -> usize {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.count as usize)
            .sum()
    }

    /// Expand the entries into card instances, in entry order, with dense IDs
    pub fn expand(&self, config: &BalanceConfig) -> Vec<Card> {
        let mut cards = Vec::with_capacity(self.total_cards());
        let mut next_id = 0u32;
        for entry in &self.entries {
            for _ in 0..entry.count {
                cards.push(Card::from_config(CardId::new(next_id), entry.kind, config));
                next_id += 1;
            }
        }
        cards
    }
}

/// Build the configured deck and shuffle it
pub fn build_deck(config: &BalanceConfig, rng: &mut impl Rng) -> Vec<Card> {
    let mut deck = config.deck_list().expand(config);
    deck.shuffle(rng);
    deck
}
