// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Automated seat strategies.
use clap::ValueEnum;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use headsup_core::{action::BetAction, replay::View};

/// A heads-up seat strategy.
pub trait Strategy {
    /// Picks one of the legal actions given the match view.
    ///
    /// Returning `None` leaves the seat without an answer until the turn times
    /// out and the scheduler folds it.
    fn execute(&mut self, actions: &[BetAction], view: &View) -> Option<BetAction>;
}

/// The available strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    /// Checks or calls whenever it can.
    Passive,
    /// Picks a random legal action.
    Random,
    /// Raises whenever it can.
    Aggressive,
    /// Like random but sometimes doesn't answer.
    Sleepy,
}

impl StrategyKind {
    /// Creates a strategy of this kind.
    pub fn build(self, seed: u64) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Passive => Box::new(Passive),
            StrategyKind::Random => Box::new(RandomPlayer::new(seed, 0.0)),
            StrategyKind::Aggressive => Box::new(Aggressive),
            StrategyKind::Sleepy => Box::new(RandomPlayer::new(seed, 0.1)),
        }
    }
}

/// Checks or calls, goes all in only when it cannot call.
#[derive(Debug, Clone)]
pub struct Passive;

impl Strategy for Passive {
    fn execute(&mut self, actions: &[BetAction], _view: &View) -> Option<BetAction> {
        actions
            .iter()
            .find(|a| matches!(a, BetAction::Check))
            .or_else(|| actions.iter().find(|a| matches!(a, BetAction::Call { .. })))
            .or_else(|| actions.iter().find(|a| matches!(a, BetAction::AllIn)))
            .or(actions.first())
            .copied()
    }
}

/// Raises when it can, otherwise calls.
#[derive(Debug, Clone)]
pub struct Aggressive;

impl Strategy for Aggressive {
    fn execute(&mut self, actions: &[BetAction], view: &View) -> Option<BetAction> {
        actions
            .iter()
            .find(|a| matches!(a, BetAction::Raise { .. }))
            .copied()
            .or_else(|| Passive.execute(actions, view))
    }
}

/// Picks random actions and sometimes stalls.
#[derive(Debug)]
pub struct RandomPlayer {
    rng: StdRng,
    stall: f64,
}

impl RandomPlayer {
    /// Creates a player that stalls with the given probability.
    pub fn new(seed: u64, stall: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            stall,
        }
    }
}

impl Strategy for RandomPlayer {
    fn execute(&mut self, actions: &[BetAction], _view: &View) -> Option<BetAction> {
        if self.rng.random_bool(self.stall) {
            return None;
        }

        // Fold less often than the other actions.
        let choices = if actions.len() > 1 && self.rng.random_bool(0.8) {
            &actions[1..]
        } else {
            actions
        };

        choices.choose(&mut self.rng).copied()
    }
}
