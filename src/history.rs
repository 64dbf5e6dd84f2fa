use crate::cards::Card;
use crate::hand::HoleCards;
use serde::{Deserialize, Serialize};

/// One betting phase of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Street {
    Preflop = 0,
    Flop = 1,
    Turn = 2,
    River = 3,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One seat's action within a street: the seat's total street stake after
/// acting, the chips the action moved into the pot, and whether it folded.
/// Blind posts appear as the first entries of the preflop log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: usize,
    pub street_stake: u64,
    pub added: u64,
    pub folded: bool,
}

/// The complete record of one round. Built append-only by the round
/// controller, finalized at round end, then owned by the caller and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundHistory {
    /// The blind unit for this round (small blind 1x, big blind 2x).
    pub blind: u64,
    pub button: usize,
    /// Hole cards per seat; `None` for seats sitting the round out.
    pub hole_cards: Vec<Option<HoleCards>>,
    pub board: Vec<Card>,
    /// Action logs per street, indexed by [`Street::index`].
    pub streets: [Vec<ActionRecord>; 4],
    /// Chips paid out to each seat at round end.
    pub payouts: Vec<u64>,
    /// Seats that won any pot this round.
    pub winners: Vec<usize>,
}

impl RoundHistory {
    pub(crate) fn new(blind: u64, button: usize, seats: usize) -> Self {
        Self {
            blind,
            button,
            hole_cards: vec![None; seats],
            board: Vec::with_capacity(5),
            streets: [Vec::new(), Vec::new(), Vec::new(), Vec::new()],
            payouts: vec![0; seats],
            winners: Vec::new(),
        }
    }

    /// The action log for one street.
    pub fn street(&self, street: Street) -> &[ActionRecord] {
        &self.streets[street.index()]
    }

    /// Total chips the round moved into the pot, summed over every action.
    pub fn pot_total(&self) -> u64 {
        self.streets.iter().flatten().map(|r| r.added).sum()
    }

    pub(crate) fn record(&mut self, street: Street, record: ActionRecord) {
        self.streets[street.index()].push(record);
    }
}
