//! holdem-rs: a No-Limit Texas Hold'em self-play engine.
//!
//! Goals:
//! - Correct multi-way betting: raises reopen action, all-ins cap side pots,
//!   chips are conserved to the last unit
//! - Deterministic, seeded simulation so parallel data generation stays
//!   reproducible and isolated
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! The engine is policy-agnostic: each seat is driven by a
//! [`policy::DecisionPolicy`], and every round emits a
//! [`history::RoundHistory`] for downstream consumers such as a learning
//! loop.
//!
//! ## Quick start: run a seeded tournament
//! ```
//! use holdem_rs::policy::{DecisionPolicy, RandomPolicy};
//! use holdem_rs::tournament::{TournamentConfig, TournamentController};
//!
//! let policies: Vec<Box<dyn DecisionPolicy>> = (0..4)
//!     .map(|i| Box::new(RandomPolicy::new(100 + i as u64)) as Box<dyn DecisionPolicy>)
//!     .collect();
//! let config = TournamentConfig { max_rounds: Some(20), ..TournamentConfig::default() };
//! let mut tournament = TournamentController::new(policies, config, 7).unwrap();
//!
//! let histories = tournament.run().unwrap();
//! assert!(!histories.is_empty());
//! for history in &histories {
//!     assert_eq!(history.payouts.iter().sum::<u64>(), history.pot_total());
//! }
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod evaluator;
pub mod hand;
pub mod history;
pub mod policy;
pub mod pot;
pub mod round;
pub mod seat;
pub mod tournament;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
