//! The per-street betting state machine.
//!
//! A street runs `Open -> ActionPending(seat) -> ... -> Closed`. Action
//! rotates clockwise from the first actor; any action that raises the
//! current bet reopens action, so every other active seat must act again
//! before the street can close. A street is never bounded to a fixed number
//! of passes.

use crate::hand::{Board, HoleCards};
use crate::history::{ActionRecord, RoundHistory, Street};
use crate::policy::{Decision, DecisionPolicy, PolicyView};
use crate::pot::PotManager;
use crate::seat::SeatState;

/// How a betting street ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreetOutcome {
    /// Every active seat matched the bet; play continues on the next street.
    Completed,
    /// Only one non-folded seat remains; the round ends immediately.
    FoldedOut(usize),
    /// Fewer than two seats can still act; remaining streets are dealt with
    /// no further betting.
    AllInLocked,
}

/// One street's betting state: the bet to match, the minimum raise, and
/// which active seats have acted since the last raise.
pub struct BettingStreet {
    street: Street,
    current_bet: u64,
    min_raise: u64,
    acted: Vec<bool>,
    cursor: usize,
}

impl BettingStreet {
    /// A fresh postflop street: no bet to match, minimum raise of one big
    /// blind, action starting left of the button.
    pub fn open(street: Street, seats: usize, big_blind: u64, first_to_act: usize) -> Self {
        Self {
            street,
            current_bet: 0,
            min_raise: big_blind,
            acted: vec![false; seats],
            cursor: first_to_act,
        }
    }

    /// The preflop street: blinds are already posted, so the bet to match
    /// starts at the posted blind and the big blind seat keeps its option.
    pub fn open_preflop(seats: usize, posted: u64, big_blind: u64, first_to_act: usize) -> Self {
        Self {
            street: Street::Preflop,
            current_bet: posted,
            min_raise: big_blind,
            acted: vec![false; seats],
            cursor: first_to_act,
        }
    }

    /// Drive the street to its close, querying each seat's policy in turn.
    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &mut self,
        seats: &mut [SeatState],
        policies: &mut [Box<dyn DecisionPolicy>],
        pot: &mut PotManager,
        board: &Board,
        holes: &[Option<HoleCards>],
        blind: u64,
        history: &mut RoundHistory,
    ) -> StreetOutcome {
        while let Some(seat) = self.next_actor(seats) {
            let hole = match holes[seat] {
                Some(hole) => hole,
                None => {
                    // A seat without cards cannot contest anything.
                    self.fold(seat, seats, history);
                    continue;
                }
            };
            let decision = {
                let view = PolicyView {
                    seat,
                    hole,
                    board,
                    street: self.street,
                    blind,
                    min_call: self.current_bet,
                    min_raise_to: self.current_bet + self.min_raise,
                    street_contribution: seats[seat].street_contribution,
                    stack: seats[seat].stack,
                    pot_total: pot.total(),
                    street_log: history.street(self.street),
                };
                policies[seat].decide(&view)
            };
            self.apply(seat, decision, seats, pot, history);
            if let Some(winner) = lone_contestant(seats) {
                return StreetOutcome::FoldedOut(winner);
            }
        }

        let actionable = seats.iter().filter(|s| s.can_act()).count();
        if actionable <= 1 && seats.iter().filter(|s| s.contesting()).count() > 1 {
            StreetOutcome::AllInLocked
        } else {
            StreetOutcome::Completed
        }
    }

    /// The next seat owing action: active, and either not yet acted since
    /// the last raise or sitting below the current bet.
    fn next_actor(&mut self, seats: &[SeatState]) -> Option<usize> {
        let n = seats.len();
        for offset in 0..n {
            let i = (self.cursor + offset) % n;
            let s = &seats[i];
            if s.can_act() && (!self.acted[i] || s.street_contribution < self.current_bet) {
                self.cursor = (i + 1) % n;
                return Some(i);
            }
        }
        None
    }

    fn apply(
        &mut self,
        seat: usize,
        decision: Decision,
        seats: &mut [SeatState],
        pot: &mut PotManager,
        history: &mut RoundHistory,
    ) {
        match decision {
            Decision::Fold => self.fold(seat, seats, history),
            Decision::CheckOrCall => {
                let to_call = self.current_bet.saturating_sub(seats[seat].street_contribution);
                let added = pot.contribute(&mut seats[seat], to_call);
                self.acted[seat] = true;
                self.log(seat, seats, added, false, history);
            }
            Decision::RaiseTo(target) => {
                let stake = seats[seat].street_contribution;
                let max_stake = stake + seats[seat].stack;
                let capped = target.min(max_stake);
                let full_raise_to = self.current_bet + self.min_raise;
                if capped < full_raise_to && capped < max_stake {
                    // Below the legal minimum without being all-in: the
                    // action is rejected and recorded as a fold.
                    self.fold(seat, seats, history);
                    return;
                }
                let added = pot.contribute(&mut seats[seat], capped - stake);
                self.acted[seat] = true;
                let new_stake = seats[seat].street_contribution;
                if new_stake > self.current_bet {
                    let delta = new_stake - self.current_bet;
                    if delta >= self.min_raise {
                        self.min_raise = delta;
                    }
                    self.current_bet = new_stake;
                    // Reopen: everyone else must act again against the new bet.
                    for (i, acted) in self.acted.iter_mut().enumerate() {
                        *acted = i == seat;
                    }
                }
                self.log(seat, seats, added, false, history);
            }
        }
    }

    fn fold(&mut self, seat: usize, seats: &mut [SeatState], history: &mut RoundHistory) {
        seats[seat].folded = true;
        self.acted[seat] = true;
        self.log(seat, seats, 0, true, history);
    }

    fn log(
        &self,
        seat: usize,
        seats: &[SeatState],
        added: u64,
        folded: bool,
        history: &mut RoundHistory,
    ) {
        history.record(
            self.street,
            ActionRecord {
                seat,
                street_stake: seats[seat].street_contribution,
                added,
                folded,
            },
        );
    }
}

/// The single remaining non-folded seat, if the field has collapsed to one.
pub(crate) fn lone_contestant(seats: &[SeatState]) -> Option<usize> {
    let mut contenders = seats.iter().enumerate().filter(|(_, s)| s.contesting());
    match (contenders.next(), contenders.next()) {
        (Some((i, _)), None) => Some(i),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::policy::ScriptedPolicy;

    fn seats(stacks: &[u64]) -> Vec<SeatState> {
        stacks.iter().map(|&s| SeatState::new(s)).collect()
    }

    fn holes(n: usize) -> Vec<Option<HoleCards>> {
        // Distinct fixed cards per seat; the scripted policies ignore them.
        let cards = parse_cards("2c 3c 4c 5c 6c 7c 8c 9c 2d 3d 4d 5d 6d 7d 8d 9d 2h 3h 4h 5h").unwrap();
        (0..n)
            .map(|i| Some(HoleCards::try_new(cards[2 * i], cards[2 * i + 1]).unwrap()))
            .collect()
    }

    fn scripted(scripts: Vec<Vec<Decision>>) -> Vec<Box<dyn DecisionPolicy>> {
        scripts
            .into_iter()
            .map(|s| Box::new(ScriptedPolicy::new(s)) as Box<dyn DecisionPolicy>)
            .collect()
    }

    #[test]
    fn check_check_raise_requeries_earlier_checkers() {
        let mut seats = seats(&[1_000, 1_000, 1_000]);
        let holes = holes(3);
        let mut pot = PotManager::new();
        let board = Board::new(Vec::new());
        let mut history = RoundHistory::new(5, 2, 3);
        let mut policies = scripted(vec![
            vec![Decision::CheckOrCall],
            vec![Decision::CheckOrCall],
            vec![Decision::RaiseTo(30)],
        ]);

        let mut street = BettingStreet::open(Street::Flop, 3, 10, 0);
        let outcome =
            street.run(&mut seats, &mut policies, &mut pot, &board, &holes, 5, &mut history);

        assert_eq!(outcome, StreetOutcome::Completed);
        let log = history.street(Street::Flop);
        // check, check, raise, then both checkers are queried again.
        assert_eq!(log.len(), 5);
        assert_eq!(log[2].seat, 2);
        assert_eq!(log[2].street_stake, 30);
        assert_eq!(log[3].seat, 0);
        assert_eq!(log[4].seat, 1);
        for s in &seats {
            assert_eq!(s.street_contribution, 30);
        }
        assert_eq!(pot.total(), 90);
    }

    #[test]
    fn street_never_closes_below_the_current_bet() {
        let mut seats = seats(&[1_000, 1_000, 1_000]);
        let holes = holes(3);
        let mut pot = PotManager::new();
        let board = Board::new(Vec::new());
        let mut history = RoundHistory::new(5, 2, 3);
        // Seat 1 re-raises over seat 0's bet; everyone must match 60 before
        // the street can close.
        let mut policies = scripted(vec![
            vec![Decision::RaiseTo(20)],
            vec![Decision::RaiseTo(60)],
            vec![],
        ]);

        let mut street = BettingStreet::open(Street::Flop, 3, 10, 0);
        let outcome =
            street.run(&mut seats, &mut policies, &mut pot, &board, &holes, 5, &mut history);

        assert_eq!(outcome, StreetOutcome::Completed);
        for s in seats.iter().filter(|s| s.contesting()) {
            assert_eq!(s.street_contribution, 60);
        }
        assert_eq!(pot.total(), 180);
    }

    #[test]
    fn below_minimum_raise_is_recorded_as_fold() {
        let mut seats = seats(&[1_000, 1_000]);
        let holes = holes(2);
        let mut pot = PotManager::new();
        let board = Board::new(Vec::new());
        let mut history = RoundHistory::new(5, 0, 2);
        // Minimum raise is 10; a target of 4 is neither legal nor all-in.
        let mut policies = scripted(vec![vec![Decision::RaiseTo(4)], vec![]]);

        let mut street = BettingStreet::open(Street::Flop, 2, 10, 0);
        let outcome =
            street.run(&mut seats, &mut policies, &mut pot, &board, &holes, 5, &mut history);

        assert_eq!(outcome, StreetOutcome::FoldedOut(1));
        assert!(seats[0].folded);
        let log = history.street(Street::Flop);
        assert_eq!(log.len(), 1);
        assert!(log[0].folded);
    }

    #[test]
    fn over_stack_raise_clamps_to_all_in() {
        let mut seats = seats(&[50, 1_000]);
        let holes = holes(2);
        let mut pot = PotManager::new();
        let board = Board::new(Vec::new());
        let mut history = RoundHistory::new(5, 0, 2);
        let mut policies = scripted(vec![
            vec![Decision::RaiseTo(400)],
            vec![Decision::CheckOrCall],
        ]);

        let mut street = BettingStreet::open(Street::Flop, 2, 10, 0);
        let outcome =
            street.run(&mut seats, &mut policies, &mut pot, &board, &holes, 5, &mut history);

        assert_eq!(outcome, StreetOutcome::AllInLocked);
        assert!(seats[0].all_in);
        assert_eq!(seats[0].street_contribution, 50);
        assert_eq!(seats[1].street_contribution, 50);
        assert_eq!(pot.total(), 100);
    }

    #[test]
    fn short_all_in_call_closes_the_street() {
        let mut seats = seats(&[1_000, 30]);
        let holes = holes(2);
        let mut pot = PotManager::new();
        let board = Board::new(Vec::new());
        let mut history = RoundHistory::new(5, 0, 2);
        let mut policies = scripted(vec![
            vec![Decision::RaiseTo(100)],
            vec![Decision::CheckOrCall],
        ]);

        let mut street = BettingStreet::open(Street::Flop, 2, 10, 0);
        let outcome =
            street.run(&mut seats, &mut policies, &mut pot, &board, &holes, 5, &mut history);

        // Seat 1 could only call for less; no action remains.
        assert_eq!(outcome, StreetOutcome::AllInLocked);
        assert_eq!(seats[1].street_contribution, 30);
        assert!(seats[1].all_in);
        assert_eq!(pot.total(), 130);
    }

    #[test]
    fn fold_to_one_ends_the_round() {
        let mut seats = seats(&[1_000, 1_000, 1_000]);
        let holes = holes(3);
        let mut pot = PotManager::new();
        let board = Board::new(Vec::new());
        let mut history = RoundHistory::new(5, 2, 3);
        let mut policies = scripted(vec![
            vec![Decision::RaiseTo(40)],
            vec![Decision::Fold],
            vec![Decision::Fold],
        ]);

        let mut street = BettingStreet::open(Street::Flop, 3, 10, 0);
        let outcome =
            street.run(&mut seats, &mut policies, &mut pot, &board, &holes, 5, &mut history);

        assert_eq!(outcome, StreetOutcome::FoldedOut(0));
        assert_eq!(pot.total(), 40);
    }

    #[test]
    fn big_blind_keeps_its_option_preflop() {
        let mut seats = seats(&[1_000, 1_000]);
        let holes = holes(2);
        let mut pot = PotManager::new();
        let board = Board::new(Vec::new());
        let mut history = RoundHistory::new(5, 0, 2);
        // Button/SB posts 5, BB posts 10 (done here by direct contribution).
        pot.contribute(&mut seats[0], 5);
        pot.contribute(&mut seats[1], 10);
        let mut policies = scripted(vec![
            vec![Decision::CheckOrCall],
            vec![Decision::RaiseTo(30)],
        ]);

        let mut street = BettingStreet::open_preflop(2, 10, 10, 0);
        let outcome =
            street.run(&mut seats, &mut policies, &mut pot, &board, &holes, 5, &mut history);

        // SB completes, BB exercises its option with a raise, SB calls.
        assert_eq!(outcome, StreetOutcome::Completed);
        assert_eq!(seats[0].street_contribution, 30);
        assert_eq!(seats[1].street_contribution, 30);
    }
}
