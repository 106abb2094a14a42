//! Card piles (draw pile, hand, discard pile)

use crate::core::{Card, CardId, KindCounts};

/// The three places a card can be during a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pile {
    Draw,
    Hand,
    Discard,
}

/// A pile of cards (ordered for the draw pile, unordered for the others)
#[derive(Debug, Clone)]
pub struct CardPile {
    pub pile_type: Pile,

    /// Cards in this pile; for the draw pile the top is the end
    pub cards: Vec<Card>,
}

impl CardPile {
    pub fn new(pile_type: Pile) -> Self {
        CardPile {
            pile_type,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn remove(&mut self, card_id: CardId) -> Option<Card> {
        // remove() keeps iteration order stable, which keeps seeded runs reproducible
        let pos = self.cards.iter().position(|c| c.id == card_id)?;
        Some(self.cards.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw from top (for the draw pile)
    pub fn draw_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    /// Move every card out of this pile, in order
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn kind_counts(&self) -> KindCounts {
        KindCounts::from_kinds(self.cards.iter().map(|c| c.kind))
    }
}

/// All piles belonging to the player
#[derive(Debug, Clone)]
pub struct PlayerZones {
    pub draw_pile: CardPile,
    pub hand: CardPile,
    pub discard_pile: CardPile,
}

impl PlayerZones {
    /// Start with the given (already shuffled) deck as the draw pile
    pub fn with_deck(deck: Vec<Card>) -> Self {
        PlayerZones {
            draw_pile: CardPile {
                pile_type: Pile::Draw,
                cards: deck,
            },
            hand: CardPile::new(Pile::Hand),
            discard_pile: CardPile::new(Pile::Discard),
        }
    }

    /// Move the whole discard pile into the draw pile and reshuffle it
    ///
    /// Returns false (and does nothing) if the discard pile is empty.
    pub fn refill_from_discard(&mut self, rng: &mut impl rand::Rng) -> bool {
        if self.discard_pile.is_empty() {
            return false;
        }
        let recycled = self.discard_pile.take_all();
        self.draw_pile.cards.extend(recycled);
        self.draw_pile.shuffle(rng);
        true
    }

    pub fn total_cards(&self) -> usize {
        self.draw_pile.len() + self.hand.len() + self.discard_pile.len()
    }

    /// Sorted IDs of every card across all piles
    pub fn all_card_ids(&self) -> Vec<CardId> {
        let mut ids: Vec<CardId> = self
            .draw_pile
            .iter()
            .chain(self.hand.iter())
            .chain(self.discard_pile.iter())
            .map(|c| c.id)
            .collect();
        ids.sort();
        ids
    }
}
