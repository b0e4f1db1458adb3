// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Runs matches between automated seats.
use anyhow::{Result, bail};
use log::{info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use std::{fs, path::PathBuf, thread, time::Duration};

use headsup_core::{
    action::{BetAction, DealerAction, DealerActionKind, Showdown},
    game::Match,
    history::{EventLog, EventSink},
    poker::{Chips, Position},
    timed::TimedMatch,
};

use crate::strategy::{Strategy, StrategyKind};

/// Simulation config.
#[derive(Debug, Clone)]
pub struct Config {
    /// The small blind.
    pub blind: Chips,
    /// The starting stack for both seats.
    pub stack: Chips,
    /// The number of matches to play.
    pub matches: u32,
    /// Stop a match after this many hands.
    pub max_hands: u32,
    /// The seats strategies.
    pub strategies: [StrategyKind; 2],
    /// Seed for strategies and showdowns, random if not set.
    pub seed: Option<u64>,
    /// How long a seat has to act before it is folded.
    pub timeout: Duration,
    /// Directory where to store the match logs.
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let blind = Chips::new(10);
        Self {
            blind,
            stack: blind * Match::STARTING_BLINDS,
            matches: 1,
            max_hands: 1_000,
            strategies: [StrategyKind::Random, StrategyKind::Passive],
            seed: None,
            timeout: Duration::from_millis(50),
            output: None,
        }
    }
}

/// Simulation results.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Matches won by each seat.
    pub wins: [u32; 2],
    /// Matches that reached the hands limit.
    pub unfinished: u32,
    /// Total hands played.
    pub hands: u32,
}

/// Plays the configured matches.
pub fn run(config: Config) -> Result<Summary> {
    if config.blind.is_zero() || config.stack.is_zero() {
        bail!("Blind and stack must be positive");
    }

    if config.stack.checked_mul(2).is_none() {
        bail!("Stack {} is too large for a match", config.stack);
    }

    if let Some(dir) = &config.output {
        fs::create_dir_all(dir)?;
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut summary = Summary::default();

    for idx in 0..config.matches {
        let mut strategies = config.strategies.map(|kind| kind.build(rng.random()));
        let game = Match::with_stacks(config.blind, [config.stack; 2]);
        let game = play_match(game, &config, &mut strategies, &mut rng)?;

        summary.hands += game.game().hand_no();
        match game.game().winner() {
            Some(seat) => {
                summary.wins[seat.index()] += 1;
                info!(
                    "Match {idx} won by seat {seat} in {} hands",
                    game.game().hand_no()
                );
            }
            None => {
                summary.unfinished += 1;
                info!("Match {idx} stopped after {} hands", game.game().hand_no());
            }
        }

        if let Some(dir) = &config.output {
            let path = dir.join(format!("match-{idx}.log"));
            fs::write(&path, game.sink().serialize())?;
            info!("Match {idx} log saved to {}", path.display());
        }
    }

    Ok(summary)
}

/// Plays a match until a seat wins or the hands limit.
///
/// This loop is the match scheduler: it asks the acting seat for an action,
/// folds a seat that doesn't answer before the timeout, and resolves showdowns.
pub fn play_match<R: Rng>(
    game: Match,
    config: &Config,
    strategies: &mut [Box<dyn Strategy>; 2],
    rng: &mut R,
) -> Result<TimedMatch<EventLog>> {
    let mut game = TimedMatch::new(game, EventLog::default());

    while game.game().can_deal() && game.game().hand_no() < config.max_hands {
        game.deal()?;

        while game.game().running_round().is_some() {
            if let Some(seat) = game.game().acting_seat() {
                let actions = game.game().legal_actions();
                let view = game.game().view();

                match strategies[seat.index()].execute(&actions, &view) {
                    Some(action) => {
                        if let Err(e) = game.try_player_action(seat, action) {
                            warn!("{e}, folding seat {seat}");
                            game.try_player_action(seat, BetAction::Fold)?;
                        }
                    }
                    None => wait_timeout(&mut game, config.timeout)?,
                }
            } else if let Some(kind) = game.game().dealer_action() {
                let action = match kind {
                    DealerActionKind::NextBettingRound => DealerAction::NextBettingRound,
                    DealerActionKind::FoldSharePots => DealerAction::FoldSharePots,
                    DealerActionKind::ShowdownSharePots => {
                        DealerAction::ShowdownSharePots(showdown(rng))
                    }
                };

                game.try_dealer_action(action)?;
            } else {
                bail!("Hand {} is stuck", game.game().hand_no());
            }
        }
    }

    Ok(game)
}

/// Waits for the acting seat turn to expire and folds it.
fn wait_timeout<S: EventSink>(game: &mut TimedMatch<S>, timeout: Duration) -> Result<()> {
    loop {
        if let Some(seat) = game.expired(timeout) {
            info!("Seat {seat} timed out");
            game.try_player_action(seat, BetAction::Fold)?;
            return Ok(());
        }

        thread::sleep(timeout / 10);
    }
}

/// Stands in for the hand evaluator.
fn showdown<R: Rng>(rng: &mut R) -> Showdown {
    if rng.random_bool(0.1) {
        Showdown::Tie
    } else {
        Showdown::Winner(*Position::BOTH.choose(rng).unwrap_or(&Position::Zero))
    }
}
