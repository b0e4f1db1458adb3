// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Match events and the append-only event log.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    action::{BetAction, DealerAction, PotsShared},
    poker::{Chips, Position},
    replay::{Snapshot, View},
};

/// Something that happened in a match, positions are match seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A match has been created.
    GameCreate {
        /// The small blind.
        blind: Chips,
        /// The starting stacks.
        stacks: [Chips; 2],
    },
    /// A hand has been dealt.
    NewDeal {
        /// The seat that acts first, the button.
        acting: Position,
        /// The hand number.
        hand_no: u32,
    },
    /// A seat action was accepted.
    Bet {
        /// The seat that acted.
        seat: Position,
        /// The applied action.
        action: BetAction,
    },
    /// A dealer action was accepted.
    Dealer(DealerAction),
    /// The hand pots have been distributed.
    PotsShared(PotsShared),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::GameCreate { blind, stacks } => {
                write!(f, "GAME blind {blind} stacks {} {}", stacks[0], stacks[1])
            }
            Event::NewDeal { acting, hand_no } => write!(f, "DEAL #{hand_no} button {acting}"),
            Event::Bet { seat, action } => write!(f, "SEAT {seat} {action}"),
            Event::Dealer(action) => write!(f, "DEALER {action}"),
            Event::PotsShared(shared) => write!(
                f,
                "PAYOUT {} {}",
                shared.payout(Position::Zero),
                shared.payout(Position::One)
            ),
        }
    }
}

/// A consumer of match events.
pub trait EventSink {
    /// Appends an event together with the match view after the event.
    fn append(&mut self, event: &Event, view: &View);
}

/// Records snapshots as the match produces them.
impl EventSink for Vec<Snapshot> {
    fn append(&mut self, event: &Event, view: &View) {
        self.push(Snapshot {
            event: event.clone(),
            view: *view,
        });
    }
}

/// The ordered log of a match events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Appends an event to this log.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// The logged events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Checks if the log has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Serializes this log.
    pub fn serialize(&self) -> Vec<u8> {
        bincode::serialize(self).expect("Should serialize event log")
    }

    /// Deserializes a log.
    pub fn deserialize(buf: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize::<EventLog>(buf)?)
    }
}

impl EventSink for EventLog {
    fn append(&mut self, event: &Event, _view: &View) {
        self.push(event.clone());
    }
}

impl From<Vec<Event>> for EventLog {
    fn from(events: Vec<Event>) -> Self {
        Self { events }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Showdown;

    fn sample_log() -> EventLog {
        EventLog::from(vec![
            Event::GameCreate {
                blind: Chips::new(10),
                stacks: [Chips::new(1_000); 2],
            },
            Event::NewDeal {
                acting: Position::Zero,
                hand_no: 1,
            },
            Event::Bet {
                seat: Position::Zero,
                action: BetAction::Raise {
                    to_call: Chips::new(10),
                    raise: Chips::new(980),
                },
            },
            Event::Bet {
                seat: Position::One,
                action: BetAction::AllIn,
            },
            Event::Dealer(DealerAction::ShowdownSharePots(Showdown::Tie)),
            Event::PotsShared(PotsShared {
                shares: [Chips::new(1_000); 2],
                returned: [Chips::ZERO; 2],
                tie: true,
            }),
        ])
    }

    #[test]
    fn event_log_encoding() {
        let log = sample_log();
        let bytes = log.serialize();

        let decoded = EventLog::deserialize(&bytes).unwrap();
        assert_eq!(decoded, log);
        assert_eq!(decoded.len(), 6);
    }

    #[test]
    fn truncated_log_fails() {
        let bytes = sample_log().serialize();
        assert!(EventLog::deserialize(&bytes[..bytes.len() / 2]).is_err());
    }

    #[test]
    fn event_labels() {
        let log = sample_log();
        let labels = log.events().iter().map(|e| e.to_string()).collect::<Vec<_>>();
        assert_eq!(labels[1], "DEAL #1 button 0");
        assert_eq!(labels[2], "SEAT 0 RAISE 10+980");
        assert_eq!(labels[4], "DEALER SHOWDOWN tie");
        assert_eq!(labels[5], "PAYOUT 1,000 1,000");
    }
}
