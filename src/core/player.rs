//! Player representation and card economy

use crate::core::{Card, CardId};
use crate::zones::{CardPile, PlayerZones};
use rand::Rng;
use smallvec::SmallVec;

/// The card-playing side of a battle
///
/// The player exclusively owns its piles; the battle loop moves cards only
/// through the methods below, so cards are never duplicated or lost.
#[derive(Debug, Clone)]
pub struct Player {
    pub max_health: i32,

    /// Current health; may drop to zero or below on the losing turn
    pub health: i32,

    /// Absorbs the next incoming damage instance, then resets to zero
    pub block: i32,

    zones: PlayerZones,
}

impl Player {
    /// Create a player at full health with `deck` as the draw pile (top = end)
    pub fn new(max_health: i32, deck: Vec<Card>) -> Self {
        Self::with_zones(max_health, PlayerZones::with_deck(deck))
    }

    /// Create a player with explicitly arranged piles
    pub fn with_zones(max_health: i32, zones: PlayerZones) -> Self {
        Player {
            max_health,
            health: max_health,
            block: 0,
            zones,
        }
    }

    pub fn zones(&self) -> &PlayerZones {
        &self.zones
    }

    pub fn hand(&self) -> &CardPile {
        &self.zones.hand
    }

    pub fn total_cards(&self) -> usize {
        self.zones.total_cards()
    }

    /// Draw up to `count` cards into hand, returning how many were drawn
    ///
    /// An empty draw pile is refilled from the shuffled discard pile. Once both
    /// are empty drawing stops early with a partial hand.
    pub fn draw(&mut self, count: usize, rng: &mut impl Rng) -> usize {
        let mut drawn = 0;
        while drawn < count {
            if self.zones.draw_pile.is_empty() && !self.zones.refill_from_discard(rng) {
                break;
            }
            match self.zones.draw_pile.draw_top() {
                Some(card) => {
                    self.zones.hand.add(card);
                    drawn += 1;
                }
                None => break,
            }
        }
        drawn
    }

    /// Move the selected cards from hand straight to the discard pile
    ///
    /// IDs not in hand are ignored. Returns the played cards in selection order.
    pub fn play_cards(&mut self, selection: &[CardId]) -> SmallVec<[Card; 3]> {
        let mut played = SmallVec::new();
        for &card_id in selection {
            if let Some(card) = self.zones.hand.remove(card_id) {
                self.zones.discard_pile.add(card);
                played.push(card);
            }
        }
        played
    }

    /// Discard every card still in hand
    pub fn discard_hand(&mut self) {
        let hand = self.zones.hand.take_all();
        self.zones.discard_pile.cards.extend(hand);
    }

    /// Apply one damage instance, returning the damage that got through block
    ///
    /// Block is consumed by this call whether or not it absorbed anything.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = (amount - self.block).max(0);
        self.health -= actual;
        self.block = 0;
        actual
    }

    pub fn gain_block(&mut self, amount: i32) {
        self.block += amount;
    }

    /// At or below the threshold the player plays dual cards for armor
    pub fn is_low_health(&self, threshold: i32) -> bool {
        self.health <= threshold
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}
