// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Value types used by the betting engine.
use serde::{Deserialize, Serialize};
use std::{fmt, iter, ops};

/// Chips amount.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Chips(u32);

impl Chips {
    /// The zero chips.
    pub const ZERO: Chips = Chips(0);

    /// Creates chips with the given value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The integer amount.
    pub fn amount(&self) -> u32 {
        self.0
    }

    /// Checks if there are no chips.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds chips, `None` on overflow.
    pub fn checked_add(self, rhs: Chips) -> Option<Chips> {
        self.0.checked_add(rhs.0).map(Chips)
    }

    /// Subtracts chips, `None` if `rhs` is larger.
    pub fn checked_sub(self, rhs: Chips) -> Option<Chips> {
        self.0.checked_sub(rhs.0).map(Chips)
    }

    /// Multiplies chips, `None` on overflow.
    pub fn checked_mul(self, rhs: u32) -> Option<Chips> {
        self.0.checked_mul(rhs).map(Chips)
    }
}

impl From<u32> for Chips {
    fn from(val: u32) -> Self {
        Chips(val)
    }
}

impl From<Chips> for u32 {
    fn from(val: Chips) -> Self {
        val.0
    }
}

// Chips never overflow or go negative, an operation that would is a bug in the
// caller and panics in every build.
impl ops::Add for Chips {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs)
            .unwrap_or_else(|| panic!("chips overflow {} + {}", self.0, rhs.0))
    }
}

impl ops::AddAssign for Chips {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl ops::Sub<Chips> for Chips {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs)
            .unwrap_or_else(|| panic!("chips underflow {} - {}", self.0, rhs.0))
    }
}

impl ops::SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl ops::Mul<u32> for Chips {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        self.checked_mul(rhs)
            .unwrap_or_else(|| panic!("chips overflow {} * {rhs}", self.0))
    }
}

impl ops::Div<u32> for Chips {
    type Output = Self;

    fn div(self, rhs: u32) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl ops::Rem<u32> for Chips {
    type Output = Self;

    fn rem(self, rhs: u32) -> Self::Output {
        Self(self.0 % rhs)
    }
}

impl iter::Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + c)
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.0;
        let s = if amount >= 1_000_000 {
            format!(
                "{},{:03},{:03}",
                amount / 1_000_000,
                amount % 1_000_000 / 1_000,
                amount % 1000
            )
        } else if amount >= 1_000 {
            format!("{},{:03}", amount / 1000, amount % 1000)
        } else {
            amount.to_string()
        };

        // Honor width and alignment.
        f.pad(&s)
    }
}

/// One of the two seats at a heads-up table.
///
/// Inside a [BettingRound](crate::round::BettingRound) seat [Position::Zero] is
/// the button and posts the small blind, while at the match level positions
/// are the fixed seats that own the persistent stacks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// The first seat.
    Zero,
    /// The second seat.
    One,
}

impl Position {
    /// Both positions in seat order.
    pub const BOTH: [Position; 2] = [Position::Zero, Position::One];

    /// The opponent seat.
    pub fn other(self) -> Position {
        match self {
            Position::Zero => Position::One,
            Position::One => Position::Zero,
        }
    }

    /// The array index for this seat.
    pub fn index(self) -> usize {
        match self {
            Position::Zero => 0,
            Position::One => 1,
        }
    }

    /// Maps between match seats and round seats given the button seat.
    ///
    /// The mapping is its own inverse: it is the identity when the button is
    /// seat zero and swaps seats otherwise.
    pub fn rotate(self, button: Position) -> Position {
        match button {
            Position::Zero => self,
            Position::One => self.other(),
        }
    }

    /// Reorders a per-seat pair given the button seat, see [Position::rotate].
    pub fn rotate_pair<T: Copy>(pair: [T; 2], button: Position) -> [T; 2] {
        match button {
            Position::Zero => pair,
            Position::One => [pair[1], pair[0]],
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// The betting round of a hand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoundType {
    /// Betting before the flop, opened by the blinds.
    Preflop,
    /// Betting after the flop.
    Flop,
    /// Betting after the turn.
    Turn,
    /// Last betting round.
    River,
}

impl RoundType {
    /// The round that follows this one, river is terminal.
    pub fn next(self) -> Option<RoundType> {
        match self {
            RoundType::Preflop => Some(RoundType::Flop),
            RoundType::Flop => Some(RoundType::Turn),
            RoundType::Turn => Some(RoundType::River),
            RoundType::River => None,
        }
    }

    /// The round label.
    pub fn label(&self) -> &'static str {
        match self {
            RoundType::Preflop => "preflop",
            RoundType::Flop => "flop",
            RoundType::Turn => "turn",
            RoundType::River => "river",
        }
    }
}

impl fmt::Display for RoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
