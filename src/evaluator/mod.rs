pub(crate) mod analysis;
pub(crate) mod combinations;

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use analysis::HandAnalysis;
use combinations::ChooseFive;
use core::cmp::Ordering;

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Compact, comparable hand strength; higher is better. The category sits in
/// the top bits, followed by the five tiebreak ranks, four bits each, so
/// integer comparison reproduces the poker ordering exactly. Equal values
/// are true ties; suits never participate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u32);

impl HandValue {
    pub(crate) fn from_parts(category: Category, tiebreak: &[Rank; 5]) -> Self {
        let mut v = (category as u32) << 20;
        for (i, r) in tiebreak.iter().enumerate() {
            v |= (r.value() as u32) << (16 - 4 * i as u32);
        }
        HandValue(v)
    }

    /// The packed value, exposed for caching and diagnostics.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// One scored five-card hand. Ordering is by packed value alone.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    pub category: Category,
    pub best_five: [Card; 5],
    value: HandValue,
}

impl Evaluation {
    pub const fn value(&self) -> HandValue {
        self.value
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Evaluation {}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("need 5 to 7 cards to evaluate, got {0}")]
    CardCount(usize),
}

/// Evaluate exactly five cards: classify the category and encode tiebreaks.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    let analysis = HandAnalysis::new(cards);
    let (category, tiebreak) = analysis.classify();
    Evaluation { category, best_five: analysis.sorted, value: HandValue::from_parts(category, &tiebreak) }
}

/// Best five-card hand choosable from 5–7 cards: every 5-card subset is
/// scored and the maximum kept (C(7,5) = 21 in the worst case).
pub fn evaluate_best(cards: &[Card]) -> Result<Evaluation, EvalError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EvalError::CardCount(cards.len()));
    }
    let mut best: Option<Evaluation> = None;
    for idx in ChooseFive::new(cards.len()) {
        let five = [cards[idx[0]], cards[idx[1]], cards[idx[2]], cards[idx[3]], cards[idx[4]]];
        let eval = evaluate_five(&five);
        if best.as_ref().map_or(true, |b| eval > *b) {
            best = Some(eval);
        }
    }
    best.ok_or(EvalError::CardCount(cards.len()))
}

/// Evaluate a Hold'em hand: two hole cards against a board of 3–5 community
/// cards. Validates card uniqueness first.
///
/// ```
/// use holdem_rs::evaluator::{evaluate_holdem, Category};
/// use holdem_rs::hand::{Board, HoleCards};
///
/// let hole: HoleCards = "As Ah".parse().unwrap();
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let eval = evaluate_holdem(&hole, &board).unwrap();
/// assert_eq!(eval.category, Category::Pair);
/// ```
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, board)?;
    if board.len() < 3 {
        return Err(EvalError::CardCount(board.len() + 2));
    }
    let mut cards = Vec::with_capacity(7);
    cards.push(hole.high());
    cards.push(hole.low());
    cards.extend_from_slice(board.as_slice());
    evaluate_best(&cards)
}

/// Compare two Hold'em hands on a shared board.
pub fn compare_holdem(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    let va = evaluate_holdem(a, board)?;
    let vb = evaluate_holdem(b, board)?;
    Ok(va.cmp(&vb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn five(s: &str) -> Evaluation {
        let cards: [Card; 5] = parse_cards(s).unwrap().try_into().unwrap();
        evaluate_five(&cards)
    }

    #[test]
    fn royal_fixture_is_a_straight_flush() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let board: Board = "Qs Js 10s 2d 3c".parse().unwrap();
        let eval = evaluate_holdem(&hole, &board).unwrap();
        assert_eq!(eval.category, Category::StraightFlush);
    }

    #[test]
    fn quads_fixture_beats_a_full_house() {
        let quads_hole: HoleCards = "2d 2c".parse().unwrap();
        let quads_board: Board = "2s 2h 9c 9d 5c".parse().unwrap();
        let quads = evaluate_holdem(&quads_hole, &quads_board).unwrap();
        assert_eq!(quads.category, Category::FourOfAKind);

        let boat = five("Ah Ad Ac Kd Kc");
        assert_eq!(boat.category, Category::FullHouse);
        assert!(quads > boat);
    }

    #[test]
    fn every_category_detected() {
        assert_eq!(five("As Ks Qs Js 10s").category, Category::StraightFlush);
        assert_eq!(five("Kc Kd Kh Ks 2s").category, Category::FourOfAKind);
        assert_eq!(five("10c 10d 10h 2s 2h").category, Category::FullHouse);
        assert_eq!(five("Ah 9h 7h 3h 2h").category, Category::Flush);
        assert_eq!(five("Ac 2d 3h 4s 5c").category, Category::Straight);
        assert_eq!(five("Qc Qd Qh 9s 2c").category, Category::ThreeOfAKind);
        assert_eq!(five("Jc Jd 9c 9h 2s").category, Category::TwoPair);
        assert_eq!(five("Ah Ad 10s 9c 2d").category, Category::Pair);
        assert_eq!(five("Ah Kd 7s 5c 2d").category, Category::HighCard);
    }

    #[test]
    fn wheel_ranks_below_six_high_straight() {
        let wheel = five("Ac 2d 3h 4s 5c");
        let six_high = five("2c 3d 4h 5s 6c");
        assert!(wheel < six_high);
    }

    #[test]
    fn suits_never_break_ties() {
        let hearts = five("Ah 9h 7h 3h 2h");
        let spades = five("As 9s 7s 3s 2s");
        assert_eq!(hearts, spades);
        assert_eq!(hearts.value(), spades.value());
    }

    #[test]
    fn kickers_order_one_pair_hands() {
        let better = five("Ah Ad Ks 9c 2d");
        let worse = five("Ac As Qs 9d 2h");
        assert!(better > worse);
    }

    #[test]
    fn best_of_seven_picks_the_flush() {
        let cards = parse_cards("Ah Kh 7h 3h 2h 2c 2d").unwrap();
        let eval = evaluate_best(&cards).unwrap();
        assert_eq!(eval.category, Category::Flush);
    }

    #[test]
    fn card_count_bounds_are_enforced() {
        let four = parse_cards("Ah Kh 7h 3h").unwrap();
        assert!(matches!(evaluate_best(&four), Err(EvalError::CardCount(4))));
        let eight = parse_cards("Ah Kh 7h 3h 2h 2c 2d 2s").unwrap();
        assert!(matches!(evaluate_best(&eight), Err(EvalError::CardCount(8))));
    }

    #[test]
    fn short_board_is_rejected() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let board: Board = "2c".parse().unwrap();
        assert!(matches!(evaluate_holdem(&hole, &board), Err(EvalError::CardCount(3))));
    }

    #[test]
    fn compare_holdem_orders_overpair() {
        let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
        let aces: HoleCards = "As Ah".parse().unwrap();
        let kings: HoleCards = "Ks Kh".parse().unwrap();
        assert_eq!(compare_holdem(&aces, &kings, &board).unwrap(), Ordering::Greater);
    }
}
