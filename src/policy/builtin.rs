use super::{Decision, DecisionPolicy, PolicyView};
use crate::evaluator::evaluate_best;
use crate::hand::HoleCards;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;

/// Seeded baseline: folds a fixed fraction of the time when facing a bet,
/// otherwise calls or raises a random number of blind units on top of the
/// minimum raise.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: StdRng,
    fold_chance: f64,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), fold_chance: 0.2 }
    }

    pub fn with_fold_chance(mut self, fold_chance: f64) -> Self {
        self.fold_chance = fold_chance.clamp(0.0, 1.0);
        self
    }
}

impl DecisionPolicy for RandomPolicy {
    fn decide(&mut self, view: &PolicyView<'_>) -> Decision {
        // Checking is free, so never fold to nothing.
        if view.to_call() > 0 && self.rng.random::<f64>() < self.fold_chance {
            return Decision::Fold;
        }
        let units = self.rng.random_range(0..4u64);
        if units == 0 || view.stack <= view.to_call() {
            return Decision::CheckOrCall;
        }
        Decision::RaiseTo(view.min_raise_to + (units - 1) * view.blind)
    }
}

/// Always checks or calls. Deterministic; useful as a benchmark opponent
/// and in tests.
#[derive(Debug, Default, Clone)]
pub struct CallingPolicy;

impl DecisionPolicy for CallingPolicy {
    fn decide(&mut self, _view: &PolicyView<'_>) -> Decision {
        Decision::CheckOrCall
    }
}

/// Plays a fixed script of decisions, then checks or calls. The scripted
/// analogue of a queued human intent; used by tests and replays.
#[derive(Debug, Default)]
pub struct ScriptedPolicy {
    queue: VecDeque<Decision>,
}

impl ScriptedPolicy {
    pub fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = Decision>,
    {
        Self { queue: script.into_iter().collect() }
    }
}

impl DecisionPolicy for ScriptedPolicy {
    fn decide(&mut self, _view: &PolicyView<'_>) -> Decision {
        self.queue.pop_front().unwrap_or(Decision::CheckOrCall)
    }
}

/// Rule-based baseline: preflop hand scoring plus postflop made-hand
/// strength, folding to bets with poor pot odds and raising strong hands
/// about half the pot.
#[derive(Debug)]
pub struct HeuristicPolicy {
    rng: StdRng,
    aggression: f64,
}

impl HeuristicPolicy {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), aggression: 0.35 }
    }

    pub fn with_aggression(mut self, aggression: f64) -> Self {
        self.aggression = aggression.clamp(0.0, 1.0);
        self
    }

    /// Hand strength in 0..=1; made-hand category once a flop exists,
    /// otherwise a preflop heuristic.
    fn strength(view: &PolicyView<'_>) -> f64 {
        let board = view.board.as_slice();
        if board.len() < 3 {
            return preflop_strength(&view.hole);
        }
        let mut cards = Vec::with_capacity(7);
        cards.push(view.hole.high());
        cards.push(view.hole.low());
        cards.extend_from_slice(board);
        match evaluate_best(&cards) {
            Ok(eval) => {
                let base = eval.category.ordinal() as f64 / 8.0;
                let high = eval.best_five[0].rank().value() as f64 / 14.0;
                (base * 0.85 + high * 0.15).clamp(0.0, 1.0)
            }
            Err(_) => preflop_strength(&view.hole),
        }
    }

    fn raise_target(&mut self, view: &PolicyView<'_>) -> Decision {
        let target = view.min_raise_to + view.pot_total / 2;
        Decision::RaiseTo(target)
    }
}

fn preflop_strength(hole: &HoleCards) -> f64 {
    let high = hole.high().rank().value() as f64;
    let low = hole.low().rank().value() as f64;
    let mut score = high / 14.0 * 0.5 + low / 14.0 * 0.1;
    if hole.high().rank() == hole.low().rank() {
        score += 0.3 + high / 14.0 * 0.1;
    }
    if hole.high().suit() == hole.low().suit() {
        score += 0.05;
    }
    if high - low == 1.0 {
        score += 0.05;
    }
    score.clamp(0.0, 1.0)
}

impl DecisionPolicy for HeuristicPolicy {
    fn decide(&mut self, view: &PolicyView<'_>) -> Decision {
        let strength = Self::strength(view);
        let to_call = view.to_call();

        if to_call == 0 {
            if strength > 0.62 && self.rng.random::<f64>() < self.aggression + strength * 0.3 {
                return self.raise_target(view);
            }
            return Decision::CheckOrCall;
        }

        let pot_odds = to_call as f64 / (view.pot_total + to_call) as f64;
        if strength + 0.05 < pot_odds || strength < 0.2 {
            return Decision::Fold;
        }
        if strength > 0.75 && self.rng.random::<f64>() < self.aggression {
            return self.raise_target(view);
        }
        Decision::CheckOrCall
    }
}
