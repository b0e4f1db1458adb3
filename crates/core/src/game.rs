// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A heads-up match made of consecutive hands.
use log::{debug, info};
use thiserror::Error;

use crate::{
    action::{BetAction, DealerAction, DealerActionKind, PotsShared, Showdown},
    poker::{Chips, Position, RoundType},
    replay::View,
    round::BettingRound,
};

/// A request the match rejected without changing its state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A new hand cannot be dealt.
    #[error("Cannot deal a new hand")]
    CannotDeal,
    /// There is no hand in progress.
    #[error("No hand in progress")]
    NoRunningHand,
    /// The seat is not the one that has to act.
    #[error("Seat {0} is not the acting seat")]
    NotActingSeat(Position),
    /// The action is not in the legal actions.
    #[error("Illegal action {0}")]
    IllegalAction(BetAction),
    /// The dealer action is not the one the hand requires.
    #[error("Unexpected dealer action {0}")]
    UnexpectedDealerAction(DealerAction),
    /// The hand pots have not been shared yet.
    #[error("Hand is not settled")]
    NotSettled,
}

/// Two seats playing hands until one of them runs out of chips.
#[derive(Debug, Clone)]
pub struct Match {
    stacks: [Chips; 2],
    button: Position,
    blind: Chips,
    hand_no: u32,
    running_round: Option<BettingRound>,
}

impl Match {
    /// The starting stack in small blinds.
    pub const STARTING_BLINDS: u32 = 100;

    /// Creates a match where each seat starts with 100 small blinds.
    pub fn new(blind: Chips) -> Self {
        Self::with_stacks(blind, [blind * Self::STARTING_BLINDS; 2])
    }

    /// Creates a match with the given small blind and starting stacks.
    ///
    /// Panics if the total chips don't fit in [Chips].
    pub fn with_stacks(blind: Chips, stacks: [Chips; 2]) -> Self {
        assert!(
            stacks[0].checked_add(stacks[1]).is_some(),
            "Stacks {} and {} overflow the match total",
            stacks[0],
            stacks[1]
        );

        Self {
            stacks,
            button: Position::Zero,
            blind,
            hand_no: 0,
            running_round: None,
        }
    }

    /// The seats stacks between hands.
    pub fn stacks(&self) -> [Chips; 2] {
        self.stacks
    }

    /// The seat with the button.
    pub fn button(&self) -> Position {
        self.button
    }

    /// The small blind.
    pub fn blind(&self) -> Chips {
        self.blind
    }

    /// The number of hands dealt.
    pub fn hand_no(&self) -> u32 {
        self.hand_no
    }

    /// The hand in progress.
    pub fn running_round(&self) -> Option<&BettingRound> {
        self.running_round.as_ref()
    }

    /// The seat that won the match.
    pub fn winner(&self) -> Option<Position> {
        Position::BOTH
            .into_iter()
            .find(|p| self.stacks[p.other().index()].is_zero())
    }

    /// Checks if both seats have chips.
    pub fn is_running(&self) -> bool {
        self.stacks.iter().all(|c| !c.is_zero())
    }

    /// Checks if a new hand can be dealt.
    pub fn can_deal(&self) -> bool {
        self.is_running() && self.running_round.is_none()
    }

    /// Checks if the hand in progress can be collected.
    pub fn can_collect_round(&self) -> bool {
        self.running_round
            .as_ref()
            .is_some_and(BettingRound::is_settled)
    }

    /// The seat that has to act, if a player action is expected.
    pub fn acting_seat(&self) -> Option<Position> {
        self.running_round
            .as_ref()
            .filter(|r| r.is_awaiting_player())
            .map(|r| r.acting_turn().rotate(self.button))
    }

    /// The dealer action the hand in progress requires.
    pub fn dealer_action(&self) -> Option<DealerActionKind> {
        self.running_round
            .as_ref()
            .and_then(BettingRound::dealer_action)
    }

    /// The actions the acting seat can submit.
    pub fn legal_actions(&self) -> Vec<BetAction> {
        self.running_round
            .as_ref()
            .map(BettingRound::legal_actions)
            .unwrap_or_default()
    }

    /// The total chips in the match.
    pub fn total_chips(&self) -> Chips {
        match &self.running_round {
            Some(round) => round.total_chips(),
            None => self.stacks[0] + self.stacks[1],
        }
    }

    /// Deals a new hand posting the blinds.
    pub fn deal(&mut self) -> Result<(), GameError> {
        if !self.can_deal() {
            return Err(GameError::CannotDeal);
        }

        let stacks = Position::rotate_pair(self.stacks, self.button);
        self.running_round = Some(BettingRound::new(stacks, self.blind));
        self.hand_no += 1;

        info!(
            "Hand {} dealt, button {} stacks {} {}",
            self.hand_no, self.button, self.stacks[0], self.stacks[1]
        );

        Ok(())
    }

    /// A seat tries an action.
    ///
    /// Returns the applied action: a raise larger than the seat stack is
    /// reduced to the stack.
    pub fn try_player_action(
        &mut self,
        seat: Position,
        action: BetAction,
    ) -> Result<BetAction, GameError> {
        let button = self.button;
        let round = self
            .running_round
            .as_mut()
            .ok_or(GameError::NoRunningHand)?;

        if round.acting_turn().rotate(button) != seat {
            debug!("Rejected {action} from seat {seat} out of turn");
            return Err(GameError::NotActingSeat(seat));
        }

        let Some(legal) = round
            .legal_actions()
            .into_iter()
            .find(|legal| action.matches(legal))
        else {
            debug!("Rejected illegal {action} from seat {seat}");
            return Err(GameError::IllegalAction(action));
        };

        let action = match (action, legal) {
            (BetAction::Raise { to_call, raise }, BetAction::Raise { raise: max, .. }) => {
                BetAction::Raise {
                    to_call,
                    raise: raise.min(max),
                }
            }
            _ => action,
        };

        match action {
            BetAction::Fold => round.fold(),
            BetAction::Check => round.check(),
            BetAction::Call { to_call } => round.call(to_call),
            BetAction::Raise { to_call, raise } => round.raise(to_call, raise),
            BetAction::AllIn => round.allin(),
        }

        debug!("Seat {seat} {action}");
        Ok(action)
    }

    /// The dealer tries an action.
    ///
    /// The showdown winner is a match seat, the returned distribution is in
    /// match seats too.
    pub fn try_dealer_action(
        &mut self,
        action: DealerAction,
    ) -> Result<Option<PotsShared>, GameError> {
        let button = self.button;
        let round = self
            .running_round
            .as_mut()
            .ok_or(GameError::NoRunningHand)?;

        if round.dealer_action() != Some(action.kind()) {
            debug!("Rejected unexpected {action}");
            return Err(GameError::UnexpectedDealerAction(action));
        }

        let shared = match action {
            DealerAction::NextBettingRound => {
                round.next_betting_round();
                None
            }
            DealerAction::ShowdownSharePots(showdown) => {
                let showdown = match showdown {
                    Showdown::Winner(seat) => Showdown::Winner(seat.rotate(button)),
                    Showdown::Tie => Showdown::Tie,
                };
                Some(round.showdown_share_pots(showdown).rotate(button))
            }
            DealerAction::FoldSharePots => Some(round.fold_share_pots().rotate(button)),
        };

        debug!("Dealer {action}");
        Ok(shared)
    }

    /// Collects the settled hand stacks and moves the button.
    pub fn collect_round(&mut self) -> Result<(), GameError> {
        if !self.can_collect_round() {
            return Err(GameError::NotSettled);
        }

        if let Some(round) = self.running_round.take() {
            self.stacks = Position::rotate_pair(round.stacks(), self.button);
        }

        self.button = self.button.other();

        info!(
            "Hand {} collected, stacks {} {}",
            self.hand_no, self.stacks[0], self.stacks[1]
        );

        if let Some(winner) = self.winner() {
            info!("Seat {winner} won the match after {} hands", self.hand_no);
        }

        Ok(())
    }

    /// The match state as seen by the players, in match seats.
    ///
    /// A settled hand that has not been collected yet shows its pot before the
    /// distribution.
    pub fn view(&self) -> View {
        let Some(round) = &self.running_round else {
            return View {
                stacks: self.stacks,
                ..View::default()
            };
        };

        let button = self.button;
        let mut stacks = Position::rotate_pair(round.stacks(), button);
        let mut pot = round.pot();

        if let Some(shared) = round.pots_shared() {
            let shared = shared.rotate(button);
            for seat in Position::BOTH {
                stacks[seat.index()] -= shared.payout(seat);
            }
            pot = shared.total();
        }

        View {
            stacks,
            bets: Position::rotate_pair(round.bets(), button),
            pot,
            round: Some(round.round_type()),
            acting: Some(round.acting_turn().rotate(button)),
        }
    }

    /// The current betting round type.
    pub fn round_type(&self) -> Option<RoundType> {
        self.running_round.as_ref().map(BettingRound::round_type)
    }
}
