use super::Category;
use crate::cards::{Card, Rank, Suit};

/// Precomputed facts about one five-card hand: rank-sorted cards, rank
/// multiplicities grouped by (count desc, rank desc), flush suit, and the
/// straight top card (wheel counted as 5-high).
#[derive(Debug, Clone)]
pub(crate) struct HandAnalysis {
    pub(crate) sorted: [Card; 5],
    groups: Vec<(Rank, u8)>,
    flush_suit: Option<Suit>,
    straight_high: Option<Rank>,
}

impl HandAnalysis {
    pub(crate) fn new(cards: &[Card; 5]) -> Self {
        let mut sorted = *cards;
        sorted.sort_by(|a, b| b.rank().cmp(&a.rank()).then(b.suit().cmp(&a.suit())));

        let mut counts = [0u8; 15];
        for c in &sorted {
            counts[c.rank().value() as usize] += 1;
        }
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .copied()
            .filter(|r| counts[r.value() as usize] > 0)
            .map(|r| (r, counts[r.value() as usize]))
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

        let first = sorted[0].suit();
        let flush_suit = if sorted.iter().all(|c| c.suit() == first) { Some(first) } else { None };

        Self { sorted, groups, flush_suit, straight_high: straight_high(&sorted) }
    }

    fn of_count(&self, count: u8) -> impl Iterator<Item = Rank> + '_ {
        self.groups.iter().filter(move |(_, n)| *n == count).map(|(r, _)| *r)
    }

    pub(crate) fn quad(&self) -> Option<Rank> {
        self.of_count(4).next()
    }
    pub(crate) fn trips(&self) -> Option<Rank> {
        self.of_count(3).next()
    }
    pub(crate) fn pairs(&self) -> Vec<Rank> {
        self.of_count(2).collect()
    }
    pub(crate) fn kickers(&self) -> Vec<Rank> {
        self.of_count(1).collect()
    }

    /// Classify the hand, highest category first, returning the category
    /// and its five tiebreak ranks. Unused tiebreak slots are padded with
    /// Two, which is below every meaningful position and so never decides a
    /// comparison.
    pub(crate) fn classify(&self) -> (Category, [Rank; 5]) {
        let mut ranks = [Rank::Two; 5];
        for (i, c) in self.sorted.iter().enumerate() {
            ranks[i] = c.rank();
        }

        if let Some(high) = self.straight_high {
            if self.flush_suit.is_some() {
                return (Category::StraightFlush, pad(&[high]));
            }
        }
        if let Some(quad) = self.quad() {
            let kicker = self.kickers().first().copied().unwrap_or(Rank::Two);
            return (Category::FourOfAKind, pad(&[quad, kicker]));
        }
        if let Some(trips) = self.trips() {
            if let Some(&pair) = self.pairs().first() {
                return (Category::FullHouse, pad(&[trips, pair]));
            }
        }
        if self.flush_suit.is_some() {
            return (Category::Flush, ranks);
        }
        if let Some(high) = self.straight_high {
            return (Category::Straight, pad(&[high]));
        }
        if let Some(trips) = self.trips() {
            let ks = self.kickers();
            return (Category::ThreeOfAKind, pad(&[trips, ks[0], ks[1]]));
        }
        let pairs = self.pairs();
        match pairs.len() {
            2 => {
                let kicker = self.kickers()[0];
                (Category::TwoPair, pad(&[pairs[0], pairs[1], kicker]))
            }
            1 => {
                let ks = self.kickers();
                (Category::Pair, pad(&[pairs[0], ks[0], ks[1], ks[2]]))
            }
            _ => (Category::HighCard, ranks),
        }
    }
}

fn pad(meaningful: &[Rank]) -> [Rank; 5] {
    let mut out = [Rank::Two; 5];
    out[..meaningful.len()].copy_from_slice(meaningful);
    out
}

/// Top card of a straight formed by the five rank-descending cards, if any.
/// The wheel A-5-4-3-2 reads as a 5-high straight.
fn straight_high(sorted_desc: &[Card; 5]) -> Option<Rank> {
    let mut r = [0u8; 5];
    for (i, c) in sorted_desc.iter().enumerate() {
        r[i] = c.rank().value();
    }
    if (0..4).all(|i| r[i] == r[i + 1] + 1) {
        return Some(sorted_desc[0].rank());
    }
    if r == [14, 5, 4, 3, 2] {
        return Some(Rank::Five);
    }
    None
}
