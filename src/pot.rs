use crate::evaluator::Evaluation;
use crate::seat::SeatState;
use serde::{Deserialize, Serialize};

/// One pot layer: its chips and the seats eligible to win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u64,
    pub eligible: Vec<usize>,
}

/// Tracks chips committed during a round and settles them into a main pot
/// plus side pots at round end. Created empty each round and fully disbursed
/// by [`PotManager::award`].
#[derive(Debug, Default, Clone)]
pub struct PotManager {
    total: u64,
}

impl PotManager {
    pub fn new() -> Self {
        Self { total: 0 }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Move up to `amount` chips from the seat's stack into the pot. If the
    /// amount exceeds the stack it clamps to the remaining stack and the
    /// seat is marked all-in; this is the only implicit clamp in the engine.
    /// Returns the chips actually paid.
    pub fn contribute(&mut self, seat: &mut SeatState, amount: u64) -> u64 {
        let paid = amount.min(seat.stack);
        seat.stack -= paid;
        seat.street_contribution += paid;
        seat.round_contribution += paid;
        if seat.stack == 0 && !seat.folded {
            seat.all_in = true;
        }
        self.total += paid;
        paid
    }

    /// Partition the round's contributions into pots.
    ///
    /// Thresholds are the distinct round-contribution levels of non-folded
    /// seats, ascending. Each layer collects `level - previous level` from
    /// every seat that reached it (folded chips included) and is contested
    /// only by the non-folded seats that reached it, so a short all-in caps
    /// the pot it can win while larger stacks contest the layers above.
    pub fn build_pots(&self, seats: &[SeatState]) -> Vec<Pot> {
        let mut levels: Vec<u64> = seats
            .iter()
            .filter(|s| s.contesting() && s.round_contribution > 0)
            .map(|s| s.round_contribution)
            .collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots = Vec::new();
        let mut prev = 0u64;
        for level in levels {
            let mut amount = 0u64;
            let mut eligible = Vec::new();
            for (i, s) in seats.iter().enumerate() {
                amount += s.round_contribution.clamp(prev, level) - prev;
                if s.contesting() && s.round_contribution >= level {
                    eligible.push(i);
                }
            }
            if amount > 0 {
                pots.push(Pot { amount, eligible });
            }
            prev = level;
        }

        // Folded chips above the top contested level stay in the highest pot.
        let assigned: u64 = pots.iter().map(|p| p.amount).sum();
        if assigned < self.total {
            if let Some(last) = pots.last_mut() {
                last.amount += self.total - assigned;
            }
        }
        pots
    }

    /// Pay out every pot independently: each goes to its eligible seat(s)
    /// holding the best hand, split equally, with any remainder chips
    /// assigned one each to the winners seated earliest clockwise from the
    /// button. Returns per-seat payouts; the chips awarded always equal the
    /// chips contributed.
    pub fn award(
        &mut self,
        pots: &[Pot],
        rankings: &[Option<Evaluation>],
        button: usize,
        seats: &mut [SeatState],
    ) -> Vec<u64> {
        let n = seats.len();
        let start = (button + 1) % n.max(1);
        let mut payouts = vec![0u64; n];
        for pot in pots {
            let best = pot.eligible.iter().filter_map(|&i| rankings[i].map(|e| e.value())).max();
            let mut winners: Vec<usize> = match best {
                Some(top) => pot
                    .eligible
                    .iter()
                    .copied()
                    .filter(|&i| rankings[i].map(|e| e.value()) == Some(top))
                    .collect(),
                // No hands to compare: the pot's eligible seats keep it
                // (the fold-out path, where a single contestant remains).
                None => pot.eligible.clone(),
            };
            if winners.is_empty() {
                continue;
            }
            winners.sort_by_key(|&i| (i + n - start) % n);
            let share = pot.amount / winners.len() as u64;
            let mut remainder = (pot.amount % winners.len() as u64) as usize;
            for &w in &winners {
                let mut amount = share;
                if remainder > 0 {
                    amount += 1;
                    remainder -= 1;
                }
                payouts[w] += amount;
            }
        }
        for (i, seat) in seats.iter_mut().enumerate() {
            seat.stack += payouts[i];
        }
        self.total = 0;
        payouts
    }
}
