use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck reset while {0} cards are still in play")]
    InPlay(usize),
    #[error("deck exhausted")]
    Exhausted,
}

/// A standard 52-card deck, shuffled with an explicitly passed RNG so every
/// simulation instance owns its randomness. Cards dealt out stay "in play"
/// until the round controller reclaims them; resetting a deck with cards
/// still in play is an error.
///
/// ```
/// use holdem_rs::deck::Deck;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let mut deck = Deck::new();
/// deck.reset(&mut rng).unwrap();
/// assert_eq!(deck.len(), 52);
/// ```
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    outstanding: usize,
}

impl Deck {
    /// A full deck in canonical order; call [`Deck::reset`] to shuffle.
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(52);
        for &suit in &Suit::ALL {
            for &rank in &Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards, outstanding: 0 }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards dealt out and not yet reclaimed.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Repopulate all 52 cards and apply a uniform shuffle.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), DeckError> {
        if self.outstanding > 0 {
            return Err(DeckError::InPlay(self.outstanding));
        }
        *self = Deck::new();
        self.cards.shuffle(rng);
        Ok(())
    }

    /// Deal the next card.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        match self.cards.pop() {
            Some(card) => {
                self.outstanding += 1;
                Ok(card)
            }
            None => Err(DeckError::Exhausted),
        }
    }

    /// Draw and discard one card.
    pub fn burn(&mut self) -> Result<(), DeckError> {
        self.draw().map(|_| ())
    }

    /// Mark every dealt card as returned; the next [`Deck::reset`] is then
    /// legal. Called by the round controller when a round ends.
    pub fn reclaim(&mut self) {
        self.outstanding = 0;
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn fresh_deck_has_52_distinct_cards() {
        let d = Deck::new();
        assert_eq!(d.len(), 52);
        let set: HashSet<Card> = d.cards.iter().copied().collect();
        assert_eq!(set.len(), 52);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut r1 = ChaCha8Rng::seed_from_u64(42);
        let mut r2 = ChaCha8Rng::seed_from_u64(42);
        let mut d1 = Deck::new();
        let mut d2 = Deck::new();
        d1.reset(&mut r1).unwrap();
        d2.reset(&mut r2).unwrap();
        assert_eq!(d1.cards, d2.cards);
    }

    #[test]
    fn draw_reduces_length_and_never_repeats() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut d = Deck::new();
        d.reset(&mut rng).unwrap();
        let mut seen = HashSet::new();
        for _ in 0..52 {
            assert!(seen.insert(d.draw().unwrap()));
        }
        assert!(d.is_empty());
        assert_eq!(d.draw(), Err(DeckError::Exhausted));
    }

    #[test]
    fn reset_refuses_while_cards_in_play() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut d = Deck::new();
        d.reset(&mut rng).unwrap();
        let _ = d.draw().unwrap();
        let _ = d.draw().unwrap();
        assert_eq!(d.reset(&mut rng), Err(DeckError::InPlay(2)));
        d.reclaim();
        d.reset(&mut rng).unwrap();
        assert_eq!(d.len(), 52);
    }

    #[test]
    fn reset_leaves_no_carryover() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut d = Deck::new();
        d.reset(&mut rng).unwrap();
        for _ in 0..28 {
            let _ = d.draw().unwrap();
        }
        d.reclaim();
        d.reset(&mut rng).unwrap();
        assert_eq!(d.len(), 52);
        let set: HashSet<Card> = d.cards.iter().copied().collect();
        assert_eq!(set.len(), 52);
    }
}
