//! Decision policies: pluggable per-seat players.
//!
//! The engine queries one [`DecisionPolicy`] per seat and never inspects how
//! a decision is computed: random, rule-based, and learned policies all plug
//! in through the same one-method trait, selected by composition.

use crate::hand::{Board, HoleCards};
use crate::history::{ActionRecord, Street};
use serde::{Deserialize, Serialize};

mod builtin;

pub use builtin::{CallingPolicy, HeuristicPolicy, RandomPolicy, ScriptedPolicy};

/// An action returned by a policy. `RaiseTo` names the total street stake
/// the seat wants to reach, not the increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Fold,
    CheckOrCall,
    RaiseTo(u64),
}

/// Everything a seat may see when asked to act: its private cards and chips,
/// the public board, and the state of the current street.
#[derive(Debug)]
pub struct PolicyView<'a> {
    pub seat: usize,
    pub hole: HoleCards,
    pub board: &'a Board,
    pub street: Street,
    /// The blind unit (small blind 1x, big blind 2x).
    pub blind: u64,
    /// Highest street contribution so far; the stake a seat must reach to
    /// stay in.
    pub min_call: u64,
    /// Smallest street stake that counts as a full raise.
    pub min_raise_to: u64,
    pub street_contribution: u64,
    pub stack: u64,
    pub pot_total: u64,
    /// Actions taken on this street so far, blind posts included.
    pub street_log: &'a [ActionRecord],
}

impl PolicyView<'_> {
    /// Chips this seat must add to match the current minimum call.
    pub fn to_call(&self) -> u64 {
        self.min_call.saturating_sub(self.street_contribution)
    }
}

/// A seat's decision procedure. Takes `&mut self` so stateful policies
/// (seeded RNGs, learned models) are supported; `Send` so independent
/// tournaments can run on separate threads.
pub trait DecisionPolicy: Send {
    fn decide(&mut self, view: &PolicyView<'_>) -> Decision;
}
