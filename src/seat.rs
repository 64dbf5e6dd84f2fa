use serde::{Deserialize, Serialize};

/// Per-seat chip state. The stack persists across rounds; every other field
/// is round-scoped and reset by the round controller.
///
/// Invariant: `street_contribution <= round_contribution`, and both only
/// ever grow within their scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatState {
    pub stack: u64,
    /// Chips put in during the current street; reset each street.
    pub street_contribution: u64,
    /// Chips put in during the whole round; reset each round.
    pub round_contribution: u64,
    pub folded: bool,
    pub all_in: bool,
}

impl SeatState {
    pub fn new(stack: u64) -> Self {
        Self {
            stack,
            street_contribution: 0,
            round_contribution: 0,
            folded: false,
            all_in: false,
        }
    }

    /// The seat can still take actions this round.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }

    /// The seat still contests the pot.
    pub fn contesting(&self) -> bool {
        !self.folded
    }

    pub(crate) fn reset_for_round(&mut self) {
        self.street_contribution = 0;
        self.round_contribution = 0;
        self.all_in = false;
        // A seat with no chips sits the round out.
        self.folded = self.stack == 0;
    }

    pub(crate) fn reset_for_street(&mut self) {
        self.street_contribution = 0;
    }
}
