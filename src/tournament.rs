//! The tournament loop: rounds, button rotation, blind escalation,
//! bust-outs, termination.

use crate::deck::Deck;
use crate::history::RoundHistory;
use crate::policy::DecisionPolicy;
use crate::round::{EngineError, RoundController};
use crate::seat::SeatState;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = 10;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("seat count {0} outside {MIN_SEATS}..={MAX_SEATS}")]
    SeatCount(usize),
    #[error("starting stack must be positive")]
    ZeroStack,
    #[error("blind unit must be positive")]
    ZeroBlind,
    #[error("blind doubling interval must be positive")]
    ZeroInterval,
}

/// Tournament parameters, validated before any round runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentConfig {
    pub starting_stack: u64,
    pub blind_unit: u64,
    /// Rounds between blind doublings.
    pub blind_doubling_interval: u64,
    /// Hard cap on rounds; `None` plays until one seat holds all the chips.
    pub max_rounds: Option<u64>,
}

impl TournamentConfig {
    fn validate(&self, seats: usize) -> Result<(), ConfigError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&seats) {
            return Err(ConfigError::SeatCount(seats));
        }
        if self.starting_stack == 0 {
            return Err(ConfigError::ZeroStack);
        }
        if self.blind_unit == 0 {
            return Err(ConfigError::ZeroBlind);
        }
        if self.blind_doubling_interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self { starting_stack: 1_000, blind_unit: 5, blind_doubling_interval: 30, max_rounds: None }
    }
}

/// Sequences rounds until one seat holds all the chips (or the round cap is
/// reached): resets the deck, rotates the button among seats that still have
/// chips, doubles the blind on the configured interval, and leaves busted
/// seats permanently sitting out. Owns its seats, policies, deck, and a
/// seeded RNG, so independent tournaments are isolated and reproducible.
pub struct TournamentController {
    config: TournamentConfig,
    seats: Vec<SeatState>,
    policies: Vec<Box<dyn DecisionPolicy>>,
    deck: Deck,
    rng: ChaCha8Rng,
    button: usize,
    blind: u64,
    rounds_played: u64,
}

impl TournamentController {
    /// One policy per seat; the seat count is the policy count.
    pub fn new(
        policies: Vec<Box<dyn DecisionPolicy>>,
        config: TournamentConfig,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate(policies.len())?;
        let seats = (0..policies.len()).map(|_| SeatState::new(config.starting_stack)).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let button = rng.random_range(0..policies.len());
        let blind = config.blind_unit;
        Ok(Self {
            config,
            seats,
            policies,
            deck: Deck::new(),
            rng,
            button,
            blind,
            rounds_played: 0,
        })
    }

    pub fn seats(&self) -> &[SeatState] {
        &self.seats
    }

    pub fn stacks(&self) -> Vec<u64> {
        self.seats.iter().map(|s| s.stack).collect()
    }

    pub fn blind(&self) -> u64 {
        self.blind
    }

    pub fn button(&self) -> usize {
        self.button
    }

    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    fn stacked(&self) -> usize {
        self.seats.iter().filter(|s| s.stack > 0).count()
    }

    /// The tournament is over when at most one seat retains chips, or the
    /// configured round cap has been reached.
    pub fn is_finished(&self) -> bool {
        self.stacked() <= 1
            || self.config.max_rounds.map_or(false, |cap| self.rounds_played >= cap)
    }

    /// Play exactly one round. Callers that need cancellation check between
    /// calls; a round, once started, always runs to completion.
    pub fn play_round(&mut self) -> Result<RoundHistory, EngineError> {
        self.rounds_played += 1;
        if self.rounds_played % self.config.blind_doubling_interval == 0 {
            self.blind *= 2;
        }
        self.deck.reset(&mut self.rng)?;
        let history = RoundController::new(
            &mut self.seats,
            &mut self.policies,
            &mut self.deck,
            self.button,
            self.blind,
        )
        .play()?;
        self.advance_button();
        Ok(history)
    }

    /// Drive rounds to termination, returning every round's history.
    pub fn run(&mut self) -> Result<Vec<RoundHistory>, EngineError> {
        let mut histories = Vec::new();
        while !self.is_finished() {
            histories.push(self.play_round()?);
        }
        Ok(histories)
    }

    fn advance_button(&mut self) {
        let n = self.seats.len();
        let mut i = (self.button + 1) % n;
        for _ in 0..n {
            if self.seats[i].stack > 0 {
                self.button = i;
                return;
            }
            i = (i + 1) % n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{CallingPolicy, RandomPolicy};

    fn policies(n: usize) -> Vec<Box<dyn DecisionPolicy>> {
        (0..n).map(|i| Box::new(RandomPolicy::new(100 + i as u64)) as Box<dyn DecisionPolicy>).collect()
    }

    #[test]
    fn config_rejects_bad_seat_counts() {
        let config = TournamentConfig::default();
        assert_eq!(
            TournamentController::new(policies(1), config.clone(), 0).err(),
            Some(ConfigError::SeatCount(1))
        );
        assert_eq!(
            TournamentController::new(policies(11), config, 0).err(),
            Some(ConfigError::SeatCount(11))
        );
    }

    #[test]
    fn config_rejects_zero_parameters() {
        let zero_stack = TournamentConfig { starting_stack: 0, ..TournamentConfig::default() };
        assert_eq!(
            TournamentController::new(policies(2), zero_stack, 0).err(),
            Some(ConfigError::ZeroStack)
        );
        let zero_blind = TournamentConfig { blind_unit: 0, ..TournamentConfig::default() };
        assert_eq!(
            TournamentController::new(policies(2), zero_blind, 0).err(),
            Some(ConfigError::ZeroBlind)
        );
        let zero_interval =
            TournamentConfig { blind_doubling_interval: 0, ..TournamentConfig::default() };
        assert_eq!(
            TournamentController::new(policies(2), zero_interval, 0).err(),
            Some(ConfigError::ZeroInterval)
        );
    }

    #[test]
    fn blind_doubles_on_the_interval() {
        let config = TournamentConfig {
            starting_stack: 100_000,
            blind_unit: 5,
            blind_doubling_interval: 2,
            max_rounds: Some(4),
        };
        let calling: Vec<Box<dyn DecisionPolicy>> =
            (0..3).map(|_| Box::new(CallingPolicy) as Box<dyn DecisionPolicy>).collect();
        let mut t = TournamentController::new(calling, config, 1).unwrap();

        t.play_round().unwrap();
        assert_eq!(t.blind(), 5);
        t.play_round().unwrap();
        assert_eq!(t.blind(), 10);
        t.play_round().unwrap();
        assert_eq!(t.blind(), 10);
        t.play_round().unwrap();
        assert_eq!(t.blind(), 20);
        assert!(t.is_finished());
    }

    #[test]
    fn button_rotation_skips_busted_seats() {
        let mut t = TournamentController::new(policies(4), TournamentConfig::default(), 3).unwrap();
        t.button = 0;
        t.seats[1].stack = 0;
        t.advance_button();
        assert_eq!(t.button(), 2);
        t.seats[3].stack = 0;
        t.advance_button();
        assert_eq!(t.button(), 0);
    }

    #[test]
    fn finishes_when_one_seat_has_all_chips() {
        let mut t = TournamentController::new(policies(2), TournamentConfig::default(), 5).unwrap();
        t.seats[0].stack = 2_000;
        t.seats[1].stack = 0;
        assert!(t.is_finished());
    }

    #[test]
    fn round_cap_bounds_the_run() {
        let config = TournamentConfig { max_rounds: Some(3), ..TournamentConfig::default() };
        let mut t = TournamentController::new(policies(3), config, 9).unwrap();
        let histories = t.run().unwrap();
        assert!(histories.len() <= 3);
        assert!(t.is_finished());
    }
}
