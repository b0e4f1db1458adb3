// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Player and dealer actions.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::poker::{Chips, Position};

/// An action submitted by the seat that has to act.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetAction {
    /// Give up the hand.
    Fold,
    /// Pass when bets are equal.
    Check,
    /// Equalize the opponent bet.
    Call {
        /// The chips needed to equalize bets.
        to_call: Chips,
    },
    /// Equalize and bet more.
    Raise {
        /// The chips needed to equalize bets.
        to_call: Chips,
        /// The chips above the equalized bet.
        raise: Chips,
    },
    /// Put the whole remaining stack in.
    AllIn,
}

impl BetAction {
    /// The chips declared by this action.
    ///
    /// Fold, check and all-in declare no amount, the all-in amount is the
    /// stack of the seat when the action is applied.
    pub fn total(&self) -> Chips {
        match self {
            BetAction::Fold | BetAction::Check | BetAction::AllIn => Chips::ZERO,
            BetAction::Call { to_call } => *to_call,
            BetAction::Raise { to_call, raise } => *to_call + *raise,
        }
    }

    /// Checks if this proposed action is equivalent to a generated legal action.
    ///
    /// A raise matches when it calls the same amount and raises at least the
    /// generated raise.
    pub fn matches(&self, legal: &BetAction) -> bool {
        match (self, legal) {
            (BetAction::Fold, BetAction::Fold)
            | (BetAction::Check, BetAction::Check)
            | (BetAction::AllIn, BetAction::AllIn) => true,
            (BetAction::Call { to_call: a }, BetAction::Call { to_call: b }) => a == b,
            (
                BetAction::Raise { to_call, raise },
                BetAction::Raise {
                    to_call: legal_call,
                    raise: min_raise,
                },
            ) => to_call == legal_call && raise >= min_raise,
            _ => false,
        }
    }

    /// The action label.
    pub fn label(&self) -> &'static str {
        match self {
            BetAction::Fold => "FOLD",
            BetAction::Check => "CHECK",
            BetAction::Call { .. } => "CALL",
            BetAction::Raise { .. } => "RAISE",
            BetAction::AllIn => "ALL-IN",
        }
    }
}

impl fmt::Display for BetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetAction::Call { to_call } => write!(f, "{} {to_call}", self.label()),
            BetAction::Raise { to_call, raise } => {
                write!(f, "{} {to_call}+{raise}", self.label())
            }
            _ => f.write_str(self.label()),
        }
    }
}

/// The showdown result supplied by the hand evaluator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Showdown {
    /// A seat has the best hand.
    Winner(Position),
    /// Both hands have the same value.
    Tie,
}

/// A transition driven by the dealer instead of a seat.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealerAction {
    /// Sweep bets into the pot and start the next betting round.
    NextBettingRound,
    /// Share the pots given the showdown result.
    ShowdownSharePots(Showdown),
    /// Give the pots to the seat that did not fold.
    FoldSharePots,
}

impl DealerAction {
    /// The kind of this action.
    pub fn kind(&self) -> DealerActionKind {
        match self {
            DealerAction::NextBettingRound => DealerActionKind::NextBettingRound,
            DealerAction::ShowdownSharePots(_) => DealerActionKind::ShowdownSharePots,
            DealerAction::FoldSharePots => DealerActionKind::FoldSharePots,
        }
    }
}

impl fmt::Display for DealerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealerAction::ShowdownSharePots(Showdown::Winner(p)) => {
                write!(f, "{} winner {p}", self.kind())
            }
            DealerAction::ShowdownSharePots(Showdown::Tie) => write!(f, "{} tie", self.kind()),
            _ => write!(f, "{}", self.kind()),
        }
    }
}

/// The dealer action a betting round requires, without payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealerActionKind {
    /// Bets are settled and there are more rounds to play.
    NextBettingRound,
    /// The hand goes to showdown.
    ShowdownSharePots,
    /// A seat folded.
    FoldSharePots,
}

impl fmt::Display for DealerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DealerActionKind::NextBettingRound => "NEXT ROUND",
            DealerActionKind::ShowdownSharePots => "SHOWDOWN",
            DealerActionKind::FoldSharePots => "FOLD SHARE",
        };

        f.write_str(label)
    }
}

/// How the chips of a hand have been distributed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotsShared {
    /// The chips each seat won from the contested pot.
    pub shares: [Chips; 2],
    /// Uncontested chips given back to the seat that bet them.
    pub returned: [Chips; 2],
    /// The pot was split.
    pub tie: bool,
}

impl PotsShared {
    /// The chips paid to a seat.
    pub fn payout(&self, seat: Position) -> Chips {
        self.shares[seat.index()] + self.returned[seat.index()]
    }

    /// The chips paid to both seats.
    pub fn total(&self) -> Chips {
        Position::BOTH.into_iter().map(|p| self.payout(p)).sum()
    }

    /// Maps this distribution between round and match seats.
    pub fn rotate(&self, button: Position) -> PotsShared {
        PotsShared {
            shares: Position::rotate_pair(self.shares, button),
            returned: Position::rotate_pair(self.returned, button),
            tie: self.tie,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(to_call: u32) -> BetAction {
        BetAction::Call {
            to_call: Chips::new(to_call),
        }
    }

    fn raise(to_call: u32, raise: u32) -> BetAction {
        BetAction::Raise {
            to_call: Chips::new(to_call),
            raise: Chips::new(raise),
        }
    }

    #[test]
    fn action_totals() {
        assert_eq!(BetAction::Fold.total(), Chips::ZERO);
        assert_eq!(BetAction::AllIn.total(), Chips::ZERO);
        assert_eq!(call(10).total(), Chips::new(10));
        assert_eq!(raise(10, 970).total(), Chips::new(980));
    }

    #[test]
    fn action_equivalence() {
        assert!(BetAction::Fold.matches(&BetAction::Fold));
        assert!(BetAction::Check.matches(&BetAction::Check));
        assert!(!BetAction::Check.matches(&BetAction::Fold));

        assert!(call(10).matches(&call(10)));
        assert!(!call(5).matches(&call(10)));

        // A raise can be larger than the generated raise but not smaller.
        assert!(raise(10, 970).matches(&raise(10, 970)));
        assert!(raise(10, 1_000).matches(&raise(10, 970)));
        assert!(!raise(10, 500).matches(&raise(10, 970)));
        assert!(!raise(20, 970).matches(&raise(10, 970)));
        assert!(!call(10).matches(&raise(10, 970)));
    }

    #[test]
    fn dealer_action_kind() {
        let action = DealerAction::ShowdownSharePots(Showdown::Tie);
        assert_eq!(action.kind(), DealerActionKind::ShowdownSharePots);
        assert_eq!(action.to_string(), "SHOWDOWN tie");
    }

    #[test]
    fn pots_shared_rotation() {
        let shared = PotsShared {
            shares: [Chips::new(40), Chips::ZERO],
            returned: [Chips::ZERO, Chips::new(15)],
            tie: false,
        };

        assert_eq!(shared.total(), Chips::new(55));

        let rotated = shared.rotate(Position::One);
        assert_eq!(rotated.payout(Position::One), Chips::new(40));
        assert_eq!(rotated.payout(Position::Zero), Chips::new(15));
        assert_eq!(shared.rotate(Position::Zero), shared);
    }
}
