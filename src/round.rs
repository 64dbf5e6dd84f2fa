//! One hand from blinds to payout.

use crate::betting::{lone_contestant, BettingStreet, StreetOutcome};
use crate::deck::{Deck, DeckError};
use crate::evaluator::{evaluate_holdem, EvalError, Evaluation};
use crate::hand::{Board, HoleCards};
use crate::history::{ActionRecord, RoundHistory, Street};
use crate::policy::DecisionPolicy;
use crate::pot::PotManager;
use crate::seat::SeatState;

/// Fatal engine failures: structural invariant violations that abort the
/// round instead of being papered over.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EngineError {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("chips not conserved: had {before}, ended with {after}")]
    ChipImbalance { before: u64, after: u64 },
}

/// Runs one complete hand: blinds, hole cards, the four betting streets
/// with burns before each board deal, then showdown or early award. All
/// round state is exclusively owned here for the round's duration; the
/// policies are the only suspension points.
pub struct RoundController<'a> {
    seats: &'a mut [SeatState],
    policies: &'a mut [Box<dyn DecisionPolicy>],
    deck: &'a mut Deck,
    button: usize,
    blind: u64,
}

impl<'a> RoundController<'a> {
    pub fn new(
        seats: &'a mut [SeatState],
        policies: &'a mut [Box<dyn DecisionPolicy>],
        deck: &'a mut Deck,
        button: usize,
        blind: u64,
    ) -> Self {
        Self { seats, policies, deck, button, blind }
    }

    /// Play the round to completion and return its finalized history.
    pub fn play(mut self) -> Result<RoundHistory, EngineError> {
        let before: u64 = self.seats.iter().map(|s| s.stack).sum();
        let mut history = RoundHistory::new(self.blind, self.button, self.seats.len());
        let mut pot = PotManager::new();
        let mut board = Board::new(Vec::new());

        for seat in self.seats.iter_mut() {
            seat.reset_for_round();
        }
        if self.seats.iter().filter(|s| !s.folded).count() < 2 {
            // Nothing to contest.
            return Ok(history);
        }

        let mut holes: Vec<Option<HoleCards>> = vec![None; self.seats.len()];
        self.deal_holes(&mut holes)?;
        history.hole_cards = holes.clone();

        let big_blind = 2 * self.blind;
        let (sb, bb) = self.blind_seats();
        let posted_sb = pot.contribute(&mut self.seats[sb], self.blind);
        history.record(
            Street::Preflop,
            ActionRecord { seat: sb, street_stake: posted_sb, added: posted_sb, folded: false },
        );
        let posted_bb = pot.contribute(&mut self.seats[bb], big_blind);
        history.record(
            Street::Preflop,
            ActionRecord { seat: bb, street_stake: posted_bb, added: posted_bb, folded: false },
        );

        let mut outcome = {
            let first = self.first_to_act(bb);
            let mut street = BettingStreet::open_preflop(
                self.seats.len(),
                posted_sb.max(posted_bb),
                big_blind,
                first,
            );
            street.run(self.seats, self.policies, &mut pot, &board, &holes, self.blind, &mut history)
        };

        for street_kind in [Street::Flop, Street::Turn, Street::River] {
            if matches!(outcome, StreetOutcome::FoldedOut(_)) {
                break;
            }
            self.deal_board(street_kind, &mut board)?;
            if matches!(outcome, StreetOutcome::AllInLocked) {
                continue;
            }
            for seat in self.seats.iter_mut() {
                seat.reset_for_street();
            }
            let first = self.first_to_act(self.button);
            let mut street =
                BettingStreet::open(street_kind, self.seats.len(), big_blind, first);
            outcome = street.run(
                self.seats,
                self.policies,
                &mut pot,
                &board,
                &holes,
                self.blind,
                &mut history,
            );
        }

        // Showdown: evaluate every remaining hand; a lone contestant is paid
        // without one.
        let mut rankings: Vec<Option<Evaluation>> = vec![None; self.seats.len()];
        if lone_contestant(self.seats).is_none() {
            for (i, seat) in self.seats.iter().enumerate() {
                if !seat.contesting() {
                    continue;
                }
                if let Some(hole) = holes[i] {
                    rankings[i] = Some(evaluate_holdem(&hole, &board)?);
                }
            }
        }
        let pots = pot.build_pots(self.seats);
        let payouts = pot.award(&pots, &rankings, self.button, self.seats);

        history.board = board.as_slice().to_vec();
        history.winners =
            payouts.iter().enumerate().filter(|(_, &p)| p > 0).map(|(i, _)| i).collect();
        history.payouts = payouts;

        let after: u64 = self.seats.iter().map(|s| s.stack).sum();
        if after != before {
            return Err(EngineError::ChipImbalance { before, after });
        }
        self.deck.reclaim();
        Ok(history)
    }

    /// Two cards to every seat dealt in, starting left of the button.
    fn deal_holes(&mut self, holes: &mut [Option<HoleCards>]) -> Result<(), EngineError> {
        let n = self.seats.len();
        for offset in 1..=n {
            let i = (self.button + offset) % n;
            if self.seats[i].folded {
                continue;
            }
            let a = self.deck.draw()?;
            let b = self.deck.draw()?;
            holes[i] = Some(HoleCards::try_new(a, b).map_err(EvalError::InvalidHand)?);
        }
        Ok(())
    }

    /// Small and big blind seats. Heads-up the button posts the small blind;
    /// otherwise the blinds sit left of the button.
    fn blind_seats(&self) -> (usize, usize) {
        let live = self.seats.iter().filter(|s| !s.folded).count();
        let sb = if live == 2 && !self.seats[self.button].folded {
            self.button
        } else {
            self.next_live(self.button)
        };
        (sb, self.next_live(sb))
    }

    fn next_live(&self, from: usize) -> usize {
        let n = self.seats.len();
        let mut i = (from + 1) % n;
        for _ in 0..n {
            if !self.seats[i].folded {
                return i;
            }
            i = (i + 1) % n;
        }
        from
    }

    /// First seat still able to act, scanning clockwise from `from`.
    fn first_to_act(&self, from: usize) -> usize {
        let n = self.seats.len();
        let mut i = (from + 1) % n;
        for _ in 0..n {
            if self.seats[i].can_act() {
                return i;
            }
            i = (i + 1) % n;
        }
        from
    }

    /// Burn one card, then deal the street's board cards.
    fn deal_board(&mut self, street: Street, board: &mut Board) -> Result<(), EngineError> {
        self.deck.burn()?;
        let count = if matches!(street, Street::Flop) { 3 } else { 1 };
        for _ in 0..count {
            board.push(self.deck.draw()?);
        }
        Ok(())
    }
}
