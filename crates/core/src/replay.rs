// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Rebuilds the match views from an event log.
//!
//! The replay is a pure left fold over the events and doesn't depend on the
//! betting state machine: stacks move with the bet events, the bets of a round
//! are the sum of the bet events since the last round boundary, and the pot
//! grows at each boundary until a distribution empties it.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    action::{BetAction, DealerAction, PotsShared},
    history::Event,
    poker::{Chips, Position, RoundType},
};

/// What the players see of a match, positions are match seats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    /// The chips behind for each seat.
    pub stacks: [Chips; 2],
    /// The bets in the current betting round.
    pub bets: [Chips; 2],
    /// The chips swept from completed betting rounds.
    pub pot: Chips,
    /// The current betting round if a hand is in progress.
    pub round: Option<RoundType>,
    /// The seat holding the turn if a hand is in progress.
    pub acting: Option<Position>,
}

impl View {
    /// All the chips in this view.
    pub fn total_chips(&self) -> Chips {
        self.stacks[0] + self.stacks[1] + self.pot + self.bets[0] + self.bets[1]
    }
}

/// An event with the view after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The event.
    pub event: Event,
    /// The view after the event.
    pub view: View,
}

/// An event that moves chips the log doesn't have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// The starting stacks overflow the chips total.
    #[error("Event {index}: starting stacks overflow the chips total")]
    StacksOverflow {
        /// The event index.
        index: usize,
        /// The starting stacks.
        stacks: [Chips; 2],
    },
    /// A hand is dealt while chips of the previous one are still in play.
    #[error("Event {index}: new hand dealt before the pots were shared")]
    HandInProgress {
        /// The event index.
        index: usize,
    },
    /// A seat bets more than its stack.
    #[error("Event {index}: seat {seat} bets more than its {stack} stack")]
    Overbet {
        /// The event index.
        index: usize,
        /// The betting seat.
        seat: Position,
        /// The seat stack before the bet.
        stack: Chips,
    },
    /// A payout doesn't match the pot.
    #[error("Event {index}: payout doesn't match the {pot} pot")]
    PayoutMismatch {
        /// The event index.
        index: usize,
        /// The pot before the payout.
        pot: Chips,
    },
}

/// Replays events returning a snapshot for each event.
///
/// Fails at the first event that moves chips the previous events don't account
/// for.
pub fn replay(events: &[Event]) -> Result<Vec<Snapshot>, ReplayError> {
    let mut replay = Replay::default();

    events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            replay.apply(index, event)?;
            Ok(Snapshot {
                event: event.clone(),
                view: replay.view,
            })
        })
        .collect()
}

/// Replay accumulator.
#[derive(Debug, Default)]
struct Replay {
    blind: Chips,
    button: Option<Position>,
    view: View,
}

impl Replay {
    fn apply(&mut self, index: usize, event: &Event) -> Result<(), ReplayError> {
        let view = &mut self.view;

        match event {
            Event::GameCreate { blind, stacks } => {
                if stacks[0].checked_add(stacks[1]).is_none() {
                    return Err(ReplayError::StacksOverflow {
                        index,
                        stacks: *stacks,
                    });
                }

                self.blind = *blind;
                self.button = None;
                *view = View {
                    stacks: *stacks,
                    ..View::default()
                };
            }
            Event::NewDeal { acting, .. } => {
                if !(view.pot + view.bets[0] + view.bets[1]).is_zero() {
                    return Err(ReplayError::HandInProgress { index });
                }

                self.button = Some(*acting);
                view.round = Some(RoundType::Preflop);
                view.acting = Some(*acting);

                // The big blind is capped by the stack like the small one.
                let big_blind = self.blind.checked_mul(2).unwrap_or(Chips::new(u32::MAX));
                let blinds = [(*acting, self.blind), (acting.other(), big_blind)];
                for (seat, blind) in blinds {
                    let idx = seat.index();
                    let posted = blind.min(view.stacks[idx]);
                    view.stacks[idx] -= posted;
                    view.bets[idx] += posted;
                }
            }
            Event::Bet { seat, action } => {
                let idx = seat.index();
                let stack = view.stacks[idx];
                let amount = match action {
                    BetAction::AllIn => Some(stack),
                    BetAction::Raise { to_call, raise } => to_call.checked_add(*raise),
                    _ => Some(action.total()),
                };

                let Some(amount) = amount.filter(|amount| *amount <= stack) else {
                    return Err(ReplayError::Overbet {
                        index,
                        seat: *seat,
                        stack,
                    });
                };

                view.stacks[idx] -= amount;
                view.bets[idx] += amount;

                if matches!(
                    action,
                    BetAction::Check | BetAction::Call { .. } | BetAction::Raise { .. }
                ) {
                    view.acting = Some(seat.other());
                }
            }
            Event::Dealer(action) => {
                view.pot += view.bets[0] + view.bets[1];
                view.bets = [Chips::ZERO; 2];

                if let DealerAction::NextBettingRound = action {
                    view.round = view.round.and_then(RoundType::next);
                    view.acting = self.button.map(Position::other);
                }
            }
            Event::PotsShared(shared) => {
                let Some(payouts) = checked_payouts(shared).filter(|p| {
                    p[0].checked_add(p[1]) == Some(view.pot + view.bets[0] + view.bets[1])
                }) else {
                    return Err(ReplayError::PayoutMismatch {
                        index,
                        pot: view.pot,
                    });
                };

                for seat in Position::BOTH {
                    view.stacks[seat.index()] += payouts[seat.index()];
                }

                *view = View {
                    stacks: view.stacks,
                    ..View::default()
                };
            }
        }

        Ok(())
    }
}

/// The payout of each seat, `None` if it overflows.
fn checked_payouts(shared: &PotsShared) -> Option<[Chips; 2]> {
    let [zero, one] = Position::BOTH.map(|p| {
        shared.shares[p.index()].checked_add(shared.returned[p.index()])
    });

    Some([zero?, one?])
}
