// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Turn clock and event recording around a match.
use std::time::{Duration, Instant};

use crate::{
    action::{BetAction, DealerAction, PotsShared},
    game::{GameError, Match},
    history::{Event, EventLog, EventSink},
    poker::Position,
};

/// Who has to move the match forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// A seat has to act.
    Seat(Position),
    /// The dealer has to act.
    Dealer,
}

/// A turn and the time it started.
#[derive(Debug, Clone, Copy)]
pub struct TurnClock {
    /// The turn.
    pub turn: Turn,
    /// When the turn started.
    pub since: Instant,
}

/// A match that records its events and the turn start time.
///
/// Each accepted transition is appended to the event sink with the match view
/// after it. Timeouts are not enforced here: a scheduler checks
/// [TimedMatch::expired] and submits a fold for the timed out seat.
#[derive(Debug)]
pub struct TimedMatch<S = EventLog> {
    game: Match,
    sink: S,
    clock: Option<TurnClock>,
}

impl<S: EventSink> TimedMatch<S> {
    /// Wraps a new match, the creation is the first recorded event.
    pub fn new(game: Match, mut sink: S) -> Self {
        let event = Event::GameCreate {
            blind: game.blind(),
            stacks: game.stacks(),
        };
        sink.append(&event, &game.view());

        Self {
            game,
            sink,
            clock: None,
        }
    }

    /// The match.
    pub fn game(&self) -> &Match {
        &self.game
    }

    /// The event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes this match returning the event sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// The current turn clock.
    pub fn clock(&self) -> Option<TurnClock> {
        self.clock
    }

    /// Who has to move the match forward.
    pub fn turn(&self) -> Option<Turn> {
        self.clock.map(|clock| clock.turn)
    }

    /// The seat whose turn started more than `timeout` ago.
    pub fn expired(&self, timeout: Duration) -> Option<Position> {
        match self.clock {
            Some(TurnClock {
                turn: Turn::Seat(seat),
                since,
            }) if since.elapsed() >= timeout => Some(seat),
            _ => None,
        }
    }

    /// Deals a new hand.
    pub fn deal(&mut self) -> Result<(), GameError> {
        self.game.deal()?;

        self.append(Event::NewDeal {
            acting: self.game.button(),
            hand_no: self.game.hand_no(),
        });
        self.start_turn();

        Ok(())
    }

    /// A seat tries an action, see [Match::try_player_action].
    pub fn try_player_action(
        &mut self,
        seat: Position,
        action: BetAction,
    ) -> Result<BetAction, GameError> {
        let action = self.game.try_player_action(seat, action)?;

        self.append(Event::Bet { seat, action });
        self.start_turn();

        Ok(action)
    }

    /// The dealer tries an action, a settled hand is collected right away.
    pub fn try_dealer_action(
        &mut self,
        action: DealerAction,
    ) -> Result<Option<PotsShared>, GameError> {
        let shared = self.game.try_dealer_action(action)?;
        self.append(Event::Dealer(action));

        if let Some(shared) = shared {
            self.game.collect_round()?;
            self.append(Event::PotsShared(shared));
        }

        self.start_turn();

        Ok(shared)
    }

    fn append(&mut self, event: Event) {
        self.sink.append(&event, &self.game.view());
    }

    fn start_turn(&mut self) {
        let turn = match self.game.acting_seat() {
            Some(seat) => Some(Turn::Seat(seat)),
            None if self.game.dealer_action().is_some() => Some(Turn::Dealer),
            None => None,
        };

        self.clock = turn.map(|turn| TurnClock {
            turn,
            since: Instant::now(),
        });
    }
}
