//! Deck construction from the balance configuration

pub mod deck;

pub use deck::{build_deck, DeckEntry, DeckList};
