// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Heads-up no-limit betting engine.
//!
//! A [Match](game::Match) deals hands between two seats, each hand is a
//! [BettingRound](round::BettingRound) state machine that accepts the legal
//! actions of the acting seat and the dealer transitions that move the hand
//! to the next round or distribute the pots:
//!
//! ```
//! # use headsup_core::{action::*, game::Match, poker::*};
//! let mut game = Match::new(Chips::new(10));
//! game.deal().unwrap();
//!
//! let call = BetAction::Call { to_call: Chips::new(10) };
//! game.try_player_action(Position::Zero, call).unwrap();
//! assert_eq!(game.dealer_action(), Some(DealerActionKind::NextBettingRound));
//! ```
//!
//! A [TimedMatch](timed::TimedMatch) records every accepted transition in an
//! event log that [replay](replay::replay) turns back into the views the
//! players saw.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod action;
pub mod game;
pub mod history;
pub mod poker;
pub mod replay;
pub mod round;
pub mod timed;
