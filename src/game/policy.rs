//! Heuristic card-selection policy
//!
//! The player AI is an ordered rule list: first every combo row of
//! [`COMBO_RULES`] is tried in order, and the first one the hand can pay for
//! is played as-is. If no combo fits, slots are filled greedily in
//! [`PLAY_PRIORITY`] order. Adding a combo means adding a row, not a branch.

use crate::core::{Card, CardId, CardKind, KindCounts};
use crate::zones::CardPile;
use smallvec::SmallVec;
use std::fmt;

/// Card compositions that grant bonus damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combo {
    /// Two A plus one B
    Aab,
    /// Two A plus one D
    Aad,
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combo::Aab => write!(f, "AAB"),
            Combo::Aad => write!(f, "AAD"),
        }
    }
}

/// One row of the combo table
#[derive(Debug, Clone, Copy)]
pub struct ComboRule {
    pub combo: Combo,
    pub cards: [CardKind; 3],
}

impl ComboRule {
    pub fn requirement(&self) -> KindCounts {
        KindCounts::from_kinds(self.cards)
    }
}

/// Combos in priority order; earlier rows win when several fit
pub const COMBO_RULES: [ComboRule; 2] = [
    ComboRule {
        combo: Combo::Aab,
        cards: [CardKind::A, CardKind::A, CardKind::B],
    },
    ComboRule {
        combo: Combo::Aad,
        cards: [CardKind::A, CardKind::A, CardKind::D],
    },
];

/// Fallback fill order when no combo is available
pub const PLAY_PRIORITY: [CardKind; 4] = CardKind::ALL;

impl Combo {
    /// Which combo, if any, a played set of cards forms
    ///
    /// Matches on composition only: the order the cards were chosen in is
    /// irrelevant, and the set must be exactly the combo's cards.
    pub fn detect(kinds: &[CardKind]) -> Option<Combo> {
        let played = KindCounts::from_kinds(kinds.iter().copied());
        COMBO_RULES
            .iter()
            .find(|rule| rule.cards.len() == kinds.len() && rule.requirement() == played)
            .map(|rule| rule.combo)
    }
}

/// Cards chosen for one turn, in play order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardSelection {
    pub cards: SmallVec<[Card; 3]>,
    /// Combo row that produced this selection, if any
    pub combo: Option<Combo>,
}

impl CardSelection {
    pub fn ids(&self) -> SmallVec<[CardId; 3]> {
        self.cards.iter().map(|c| c.id).collect()
    }

    pub fn kinds(&self) -> SmallVec<[CardKind; 3]> {
        self.cards.iter().map(|c| c.kind).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Fixed heuristic that picks which cards to play from a hand
#[derive(Debug, Clone, Copy)]
pub struct HeuristicPolicy {
    max_cards: usize,
}

impl HeuristicPolicy {
    pub fn new(max_cards: usize) -> Self {
        HeuristicPolicy { max_cards }
    }

    /// Choose at most `max_cards` cards from `hand`
    ///
    /// Deterministic for a given hand: ties between cards of the same kind
    /// are broken by hand order.
    pub fn choose_cards(&self, hand: &CardPile) -> CardSelection {
        if hand.is_empty() {
            return CardSelection::default();
        }

        let available = hand.kind_counts();
        for rule in COMBO_RULES.iter() {
            if rule.cards.len() <= self.max_cards && rule.requirement().is_subset_of(&available) {
                return CardSelection {
                    cards: take_kinds(hand, &rule.requirement()),
                    combo: Some(rule.combo),
                };
            }
        }

        let mut cards: SmallVec<[Card; 3]> = SmallVec::new();
        'fill: for kind in PLAY_PRIORITY {
            for card in hand.iter().filter(|c| c.kind == kind) {
                if cards.len() >= self.max_cards {
                    break 'fill;
                }
                cards.push(*card);
            }
        }
        CardSelection { cards, combo: None }
    }
}

/// Pick cards from hand, in hand order, until each kind's quota is met
fn take_kinds(hand: &CardPile, quota: &KindCounts) -> SmallVec<[Card; 3]> {
    let mut taken = [0usize; 4];
    let mut cards = SmallVec::new();
    for card in hand.iter() {
        let count = &mut taken[card.kind.index()];
        if *count < quota.get(card.kind) {
            *count += 1;
            cards.push(*card);
        }
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BalanceConfig;
    use crate::zones::Pile;

    fn hand(symbols: &str) -> CardPile {
        let config = BalanceConfig::default();
        let mut pile = CardPile::new(Pile::Hand);
        for (i, symbol) in symbols.chars().enumerate() {
            let kind = match symbol {
                'A' => CardKind::A,
                'B' => CardKind::B,
                'D' => CardKind::D,
                'E' => CardKind::E,
                other => panic!("unknown card symbol {other}"),
            };
            pile.add(Card::from_config(CardId::new(i as u32), kind, &config));
        }
        pile
    }

    fn chosen(symbols: &str) -> (String, Option<Combo>) {
        let selection = HeuristicPolicy::new(3).choose_cards(&hand(symbols));
        let mut kinds: Vec<char> = selection.kinds().iter().map(|k| k.symbol()).collect();
        kinds.sort();
        (kinds.into_iter().collect(), selection.combo)
    }

    #[test]
    fn test_aab_combo_selected() {
        assert_eq!(chosen("BAEAD"), ("AAB".to_string(), Some(Combo::Aab)));
        assert_eq!(chosen("AAABB"), ("AAB".to_string(), Some(Combo::Aab)));
    }

    #[test]
    fn test_aab_beats_aad() {
        assert_eq!(chosen("DAABD"), ("AAB".to_string(), Some(Combo::Aab)));
    }

    #[test]
    fn test_aad_combo_when_no_b() {
        assert_eq!(chosen("DEAAE"), ("AAD".to_string(), Some(Combo::Aad)));
    }

    #[test]
    fn test_greedy_priority_fill() {
        // One A only: no combo, fill A then B then D then E
        assert_eq!(chosen("EDBAE"), ("ABD".to_string(), None));
        // Several of a kind are taken before moving on
        assert_eq!(chosen("BBBAE"), ("ABB".to_string(), None));
        assert_eq!(chosen("EEDDE"), ("DDE".to_string(), None));
        // Two A without B or D: no combo, third slot goes to E
        assert_eq!(chosen("AAEEE"), ("AAE".to_string(), None));
    }

    #[test]
    fn test_short_and_empty_hands() {
        assert_eq!(chosen("E"), ("E".to_string(), None));
        assert_eq!(chosen("AE"), ("AE".to_string(), None));
        assert_eq!(chosen(""), (String::new(), None));
    }

    #[test]
    fn test_never_more_than_max_cards() {
        let policy = HeuristicPolicy::new(3);
        for symbols in ["AAAAA", "BBBBB", "EEEEE", "ABDEA", "DDDDD"] {
            assert_eq!(policy.choose_cards(&hand(symbols)).len(), 3, "hand {symbols}");
        }
        assert_eq!(HeuristicPolicy::new(2).choose_cards(&hand("AABDE")).len(), 2);
    }

    #[test]
    fn test_combo_picks_first_cards_in_hand_order() {
        let selection = HeuristicPolicy::new(3).choose_cards(&hand("AABAB"));
        let ids: Vec<u32> = selection.ids().iter().map(|id| id.as_u32()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_combo_detection_is_order_insensitive() {
        use CardKind::*;
        assert_eq!(Combo::detect(&[A, A, B]), Some(Combo::Aab));
        assert_eq!(Combo::detect(&[B, A, A]), Some(Combo::Aab));
        assert_eq!(Combo::detect(&[A, B, A]), Some(Combo::Aab));
        assert_eq!(Combo::detect(&[D, A, A]), Some(Combo::Aad));
        assert_eq!(Combo::detect(&[A, D, A]), Some(Combo::Aad));
    }

    #[test]
    fn test_combo_detection_rejects_other_sets() {
        use CardKind::*;
        assert_eq!(Combo::detect(&[A, B, B]), None);
        assert_eq!(Combo::detect(&[A, A, A]), None);
        assert_eq!(Combo::detect(&[A, A, E]), None);
        assert_eq!(Combo::detect(&[A, B, D]), None);
        assert_eq!(Combo::detect(&[A, A]), None);
        assert_eq!(Combo::detect(&[]), None);
    }
}
