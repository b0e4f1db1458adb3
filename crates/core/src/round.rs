// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The betting state machine for a single hand.
//!
//! A [BettingRound] tracks the stacks and bets of the two seats from the blinds
//! to the pots distribution. Seat [Position::Zero] has the button, posts the
//! small blind and acts first preflop, seat [Position::One] posts the big blind
//! and acts first on the following rounds.
//!
//! After every mutation [BettingRound::dealer_action] tells whether a seat has
//! to act, in which case [BettingRound::legal_actions] lists its choices, or
//! the dealer has to move the hand forward.
use crate::{
    action::{BetAction, DealerActionKind, PotsShared, Showdown},
    poker::{Chips, Position, RoundType},
};

/// The state of a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BettingRound {
    /// Chips not yet wagered.
    stacks: [Chips; 2],
    /// Chips wagered in the current betting round.
    bets: [Chips; 2],
    /// Chips swept from completed betting rounds.
    pot: Chips,
    small_blind: Chips,
    round_type: RoundType,
    acting_turn: Position,
    /// Both seats had a chance to act in the current betting round.
    has_everyone_acted: bool,
    folded_stack: Option<Position>,
    /// The most a seat can lose to the opponent, set when its stack empties.
    side_pot_cap: [Option<Chips>; 2],
    /// Chips each seat put in this hand.
    contributed: [Chips; 2],
    /// Set once the pots have been distributed.
    pots_shared: Option<PotsShared>,
}

impl BettingRound {
    /// Starts a hand posting the blinds from the given stacks.
    ///
    /// The first stack is the button stack that posts the small blind, the
    /// second posts twice the small blind. A stack shorter than its blind posts
    /// all its chips.
    pub fn new(stacks: [Chips; 2], small_blind: Chips) -> Self {
        let mut round = Self {
            stacks,
            bets: [Chips::ZERO; 2],
            pot: Chips::ZERO,
            small_blind,
            round_type: RoundType::Preflop,
            acting_turn: Position::Zero,
            has_everyone_acted: false,
            folded_stack: None,
            side_pot_cap: [None; 2],
            contributed: [Chips::ZERO; 2],
            pots_shared: None,
        };

        round.post(Position::Zero, small_blind);
        round.post(Position::One, small_blind * 2);
        round
    }

    /// The chips behind for each seat.
    pub fn stacks(&self) -> [Chips; 2] {
        self.stacks
    }

    /// The bets in the current betting round.
    pub fn bets(&self) -> [Chips; 2] {
        self.bets
    }

    /// The chips swept from completed betting rounds.
    pub fn pot(&self) -> Chips {
        self.pot
    }

    /// The small blind for this hand.
    pub fn small_blind(&self) -> Chips {
        self.small_blind
    }

    /// The current betting round.
    pub fn round_type(&self) -> RoundType {
        self.round_type
    }

    /// The seat whose turn it is.
    pub fn acting_turn(&self) -> Position {
        self.acting_turn
    }

    /// Checks if both seats acted in this betting round.
    pub fn has_everyone_acted(&self) -> bool {
        self.has_everyone_acted
    }

    /// The seat that folded if any.
    pub fn folded_stack(&self) -> Option<Position> {
        self.folded_stack
    }

    /// The per seat cap on the chips the opponent can win, `None` if uncapped.
    pub fn side_pot_cap(&self) -> [Option<Chips>; 2] {
        self.side_pot_cap
    }

    /// The pots distribution once the hand is settled.
    pub fn pots_shared(&self) -> Option<&PotsShared> {
        self.pots_shared.as_ref()
    }

    /// Checks if the pots have been distributed.
    pub fn is_settled(&self) -> bool {
        self.pots_shared.is_some()
    }

    /// All the chips in play in this hand.
    pub fn total_chips(&self) -> Chips {
        self.stacks[0] + self.stacks[1] + self.pot + self.bets[0] + self.bets[1]
    }

    /// Checks if the acting seat has to submit an action.
    pub fn is_awaiting_player(&self) -> bool {
        !self.is_settled() && self.dealer_action().is_none()
    }

    /// The dealer action required to move the hand forward.
    ///
    /// Returns `None` when the hand is settled or a seat has to act.
    pub fn dealer_action(&self) -> Option<DealerActionKind> {
        if self.is_settled() {
            return None;
        }

        let any_empty = self.stacks.iter().any(Chips::is_zero);
        if self.bets[0] == self.bets[1] && self.has_everyone_acted {
            if self.round_type == RoundType::River || any_empty {
                Some(DealerActionKind::ShowdownSharePots)
            } else {
                Some(DealerActionKind::NextBettingRound)
            }
        } else if self.folded_stack.is_some() {
            Some(DealerActionKind::FoldSharePots)
        } else if Position::BOTH.into_iter().any(|p| self.cannot_act(p)) {
            // A seat is all in and is not ahead of the opponent bet, nothing
            // else can change the contested chips.
            Some(DealerActionKind::ShowdownSharePots)
        } else {
            None
        }
    }

    /// The actions the acting seat can submit.
    ///
    /// The list is empty if no player action is expected.
    pub fn legal_actions(&self) -> Vec<BetAction> {
        if !self.is_awaiting_player() {
            return Vec::new();
        }

        let acting = self.acting_turn.index();
        let other = self.acting_turn.other().index();

        let mut actions = vec![BetAction::Fold];

        if self.bets[acting] == self.bets[other] {
            actions.push(BetAction::Check);
        }

        let to_call = self.bets[other] - self.bets[acting];
        let stack = self.stacks[acting];

        // Not enough chips for a full call.
        if stack <= to_call {
            actions.push(BetAction::AllIn);
            return actions;
        }

        if to_call > Chips::ZERO {
            actions.push(BetAction::Call { to_call });
        }

        let raise = stack - to_call;
        if raise > self.small_blind {
            actions.push(BetAction::Raise { to_call, raise });
        }

        actions
    }

    /// The acting seat folds.
    pub fn fold(&mut self) {
        self.folded_stack = Some(self.acting_turn);
    }

    /// The acting seat checks.
    pub fn check(&mut self) {
        // The check of the seat that did not open the round closes it.
        if !self.has_everyone_acted && self.acting_turn != self.opener() {
            self.has_everyone_acted = true;
        }

        self.acting_turn = self.acting_turn.other();
    }

    /// The acting seat calls the given amount.
    ///
    /// # Panics
    ///
    /// Panics if the seat has fewer chips than the amount.
    pub fn call(&mut self, to_call: Chips) {
        self.put(self.acting_turn, to_call);
        self.has_everyone_acted = true;
        self.acting_turn = self.acting_turn.other();
    }

    /// The acting seat calls and raises.
    ///
    /// # Panics
    ///
    /// Panics if the seat has fewer chips than the total amount.
    pub fn raise(&mut self, to_call: Chips, raise: Chips) {
        self.put(self.acting_turn, to_call + raise);
        self.acting_turn = self.acting_turn.other();
    }

    /// The acting seat puts its whole stack in.
    pub fn allin(&mut self) {
        let stack = self.stacks[self.acting_turn.index()];
        self.put(self.acting_turn, stack);
        self.has_everyone_acted = true;
    }

    /// Sweeps the bets into the pot and starts the next betting round.
    ///
    /// # Panics
    ///
    /// Panics on the river.
    pub fn next_betting_round(&mut self) {
        let Some(next) = self.round_type.next() else {
            panic!("No betting round after the {}", self.round_type);
        };

        self.sweep_bets();
        self.round_type = next;
        self.has_everyone_acted = false;
        self.acting_turn = Position::One;
    }

    /// Shares the pots given the showdown result.
    ///
    /// Chips a seat bet above what the opponent could match are given back
    /// before the contested pot is awarded. On a tie an odd chip goes to the
    /// seat out of position.
    ///
    /// # Panics
    ///
    /// Panics if the pots have already been shared.
    pub fn showdown_share_pots(&mut self, showdown: Showdown) -> PotsShared {
        assert!(!self.is_settled(), "Pots already shared");

        self.sweep_bets();

        let mut returned = [Chips::ZERO; 2];
        let lowest_cap = Position::BOTH
            .into_iter()
            .filter_map(|p| self.side_pot_cap[p.index()].map(|cap| (p, cap)))
            .min_by_key(|(_, cap)| *cap);

        if let Some((capped, cap)) = lowest_cap {
            let other = capped.other().index();
            if self.contributed[other] > cap {
                returned[other] = self.contributed[other] - cap;
            }
        }

        self.pot -= returned[0] + returned[1];

        let mut shares = [Chips::ZERO; 2];
        match showdown {
            Showdown::Winner(winner) => shares[winner.index()] = self.pot,
            Showdown::Tie => {
                let half = self.pot / 2;
                shares = [half, half];
                shares[Position::One.index()] += self.pot % 2;
            }
        }

        self.distribute(PotsShared {
            shares,
            returned,
            tie: matches!(showdown, Showdown::Tie),
        })
    }

    /// Gives the pots to the seat that did not fold.
    ///
    /// # Panics
    ///
    /// Panics if no seat folded or the pots have already been shared.
    pub fn fold_share_pots(&mut self) -> PotsShared {
        let Some(folded) = self.folded_stack else {
            panic!("No folded stack to share pots");
        };

        assert!(!self.is_settled(), "Pots already shared");

        self.sweep_bets();

        let mut shares = [Chips::ZERO; 2];
        shares[folded.other().index()] = self.pot;

        self.distribute(PotsShared {
            shares,
            returned: [Chips::ZERO; 2],
            tie: false,
        })
    }

    /// The seat that opens the current betting round.
    fn opener(&self) -> Position {
        match self.round_type {
            RoundType::Preflop => Position::Zero,
            _ => Position::One,
        }
    }

    /// Checks if a seat has no chips and is not ahead of the opponent bet.
    fn cannot_act(&self, seat: Position) -> bool {
        let (idx, other) = (seat.index(), seat.other().index());
        self.stacks[idx].is_zero() && self.bets[idx] <= self.bets[other]
    }

    fn post(&mut self, seat: Position, blind: Chips) {
        let chips = blind.min(self.stacks[seat.index()]);
        self.put(seat, chips);
    }

    /// Moves chips from a seat stack to its bet.
    fn put(&mut self, seat: Position, chips: Chips) {
        let idx = seat.index();
        assert!(
            chips <= self.stacks[idx],
            "Seat {seat} bets {chips} with {} behind",
            self.stacks[idx]
        );

        self.stacks[idx] -= chips;
        self.bets[idx] += chips;
        self.contributed[idx] += chips;

        if self.stacks[idx].is_zero() && self.side_pot_cap[idx].is_none() {
            self.side_pot_cap[idx] = Some(self.contributed[idx]);
        }
    }

    fn sweep_bets(&mut self) {
        self.pot += self.bets[0] + self.bets[1];
        self.bets = [Chips::ZERO; 2];
    }

    fn distribute(&mut self, shared: PotsShared) -> PotsShared {
        for seat in Position::BOTH {
            self.stacks[seat.index()] += shared.payout(seat);
        }

        debug_assert_eq!(shared.total(), self.pot + shared.returned[0] + shared.returned[1]);
        self.pot = Chips::ZERO;
        self.pots_shared = Some(shared);
        shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

    const SB: Chips = Chips::new(10);

    fn chips(amount: u32) -> Chips {
        Chips::new(amount)
    }

    fn new_round(s0: u32, s1: u32) -> BettingRound {
        BettingRound::new([chips(s0), chips(s1)], SB)
    }

    fn apply(round: &mut BettingRound, action: BetAction) {
        match action {
            BetAction::Fold => round.fold(),
            BetAction::Check => round.check(),
            BetAction::Call { to_call } => round.call(to_call),
            BetAction::Raise { to_call, raise } => round.raise(to_call, raise),
            BetAction::AllIn => round.allin(),
        }
    }

    #[test]
    fn deal_posts_blinds() {
        let round = new_round(1_000, 1_000);
        assert_eq!(round.stacks(), [chips(990), chips(980)]);
        assert_eq!(round.bets(), [chips(10), chips(20)]);
        assert_eq!(round.acting_turn(), Position::Zero);
        assert_eq!(round.round_type(), RoundType::Preflop);
        assert_eq!(round.dealer_action(), None);
        assert_eq!(
            round.legal_actions(),
            vec![
                BetAction::Fold,
                BetAction::Call { to_call: chips(10) },
                BetAction::Raise {
                    to_call: chips(10),
                    raise: chips(980)
                }
            ]
        );
    }

    #[test]
    fn call_then_next_round() {
        let mut round = new_round(1_000, 1_000);
        round.call(chips(10));
        assert_eq!(round.bets(), [chips(20), chips(20)]);
        assert_eq!(round.dealer_action(), Some(DealerActionKind::NextBettingRound));
        assert!(round.legal_actions().is_empty());

        round.next_betting_round();
        assert_eq!(round.pot(), chips(40));
        assert_eq!(round.bets(), [Chips::ZERO; 2]);
        assert_eq!(round.round_type(), RoundType::Flop);
        assert_eq!(round.acting_turn(), Position::One);
        assert!(!round.has_everyone_acted());
        assert_eq!(round.total_chips(), chips(2_000));
    }

    #[test]
    fn postflop_checks_close_the_round() {
        let mut round = new_round(1_000, 1_000);
        round.call(chips(10));
        round.next_betting_round();

        // The first check keeps the round open.
        assert!(round.legal_actions().contains(&BetAction::Check));
        round.check();
        assert_eq!(round.acting_turn(), Position::Zero);
        assert_eq!(round.dealer_action(), None);

        round.check();
        assert_eq!(round.acting_turn(), Position::One);
        assert_eq!(round.dealer_action(), Some(DealerActionKind::NextBettingRound));
    }

    #[test]
    fn river_goes_to_showdown() {
        let mut round = new_round(1_000, 1_000);
        round.call(chips(10));
        for _ in 0..3 {
            round.next_betting_round();
            round.check();
            round.check();
        }

        assert_eq!(round.round_type(), RoundType::River);
        assert_eq!(round.dealer_action(), Some(DealerActionKind::ShowdownSharePots));

        let shared = round.showdown_share_pots(Showdown::Winner(Position::One));
        assert_eq!(shared.shares, [Chips::ZERO, chips(40)]);
        assert_eq!(round.stacks(), [chips(980), chips(1_020)]);
        assert!(round.is_settled());
        assert_eq!(round.dealer_action(), None);
        assert!(round.legal_actions().is_empty());
    }

    #[test]
    #[should_panic(expected = "No betting round after the river")]
    fn no_round_after_river() {
        let mut round = new_round(1_000, 1_000);
        round.call(chips(10));
        for _ in 0..4 {
            round.next_betting_round();
        }
    }

    #[test]
    fn short_stack_can_only_go_all_in() {
        let mut round = new_round(1_000, 1_000);
        round.stacks = [chips(15), chips(990)];
        round.bets = [Chips::ZERO, chips(20)];

        assert_eq!(round.legal_actions(), vec![BetAction::Fold, BetAction::AllIn]);

        round.allin();
        assert_eq!(round.acting_turn(), Position::Zero);
        assert_eq!(round.dealer_action(), Some(DealerActionKind::ShowdownSharePots));
    }

    #[test]
    fn small_raise_is_not_offered() {
        let mut round = new_round(1_000, 1_000);
        round.stacks = [chips(20), chips(980)];

        // Calling leaves 10 chips which is not more than the small blind.
        assert_eq!(
            round.legal_actions(),
            vec![BetAction::Fold, BetAction::Call { to_call: chips(10) }]
        );
    }

    #[test]
    fn fold_gives_pot_to_opponent() {
        let mut round = new_round(1_000, 1_000);
        round.fold();
        assert_eq!(round.acting_turn(), Position::Zero);
        assert_eq!(round.dealer_action(), Some(DealerActionKind::FoldSharePots));

        let shared = round.fold_share_pots();
        assert_eq!(shared.shares, [Chips::ZERO, chips(30)]);
        assert_eq!(round.stacks(), [chips(990), chips(1_010)]);
        assert_eq!(round.total_chips(), chips(2_000));
    }

    #[test]
    #[should_panic(expected = "No folded stack")]
    fn fold_share_without_fold() {
        let mut round = new_round(1_000, 1_000);
        round.fold_share_pots();
    }

    #[test]
    fn tie_splits_pot() {
        let mut round = new_round(1_000, 1_000);
        round.call(chips(10));
        round.next_betting_round();
        round.raise(Chips::ZERO, chips(30));
        round.call(chips(30));
        assert_eq!(round.pot() + round.bets()[0] + round.bets()[1], chips(100));

        let shared = round.showdown_share_pots(Showdown::Tie);
        assert!(shared.tie);
        assert_eq!(shared.shares, [chips(50), chips(50)]);
        assert_eq!(round.stacks(), [chips(1_000), chips(1_000)]);
    }

    #[test]
    fn odd_tie_chip_goes_out_of_position() {
        let mut round = new_round(1_000, 1_000);
        round.stacks = [chips(950), chips(949)];
        round.bets = [Chips::ZERO; 2];
        round.pot = chips(101);

        let shared = round.showdown_share_pots(Showdown::Tie);
        assert_eq!(shared.shares, [chips(50), chips(51)]);
        assert_eq!(round.stacks(), [chips(1_000), chips(1_000)]);
    }

    #[test]
    fn deep_stack_excess_is_returned() {
        let mut round = new_round(300, 1_000);

        // The button shoves 300, the big blind raises all in.
        round.raise(chips(10), chips(280));
        assert_eq!(round.side_pot_cap(), [Some(chips(300)), None]);
        assert_eq!(round.dealer_action(), None);
        assert_eq!(
            round.legal_actions(),
            vec![
                BetAction::Fold,
                BetAction::Call { to_call: chips(280) },
                BetAction::Raise {
                    to_call: chips(280),
                    raise: chips(700)
                }
            ]
        );

        round.raise(chips(280), chips(700));
        assert_eq!(round.dealer_action(), Some(DealerActionKind::ShowdownSharePots));

        let shared = round.showdown_share_pots(Showdown::Winner(Position::Zero));
        assert_eq!(shared.returned, [Chips::ZERO, chips(700)]);
        assert_eq!(shared.shares, [chips(600), Chips::ZERO]);
        assert_eq!(round.stacks(), [chips(600), chips(700)]);
    }

    #[test]
    fn short_all_in_call_returns_excess() {
        let mut round = new_round(1_000, 400);

        round.raise(chips(10), chips(980));
        assert_eq!(round.legal_actions(), vec![BetAction::Fold, BetAction::AllIn]);

        round.allin();
        assert_eq!(round.dealer_action(), Some(DealerActionKind::ShowdownSharePots));

        let shared = round.showdown_share_pots(Showdown::Winner(Position::One));
        assert_eq!(shared.returned, [chips(600), Chips::ZERO]);
        assert_eq!(shared.shares, [Chips::ZERO, chips(800)]);
        assert_eq!(round.stacks(), [chips(600), chips(800)]);
    }

    #[test]
    fn short_blinds_go_to_showdown() {
        // The big blind cannot cover the small blind.
        let mut round = new_round(1_000, 5);
        assert_eq!(round.bets(), [chips(10), chips(5)]);
        assert_eq!(round.dealer_action(), Some(DealerActionKind::ShowdownSharePots));

        let shared = round.showdown_share_pots(Showdown::Tie);
        assert_eq!(shared.returned, [chips(5), Chips::ZERO]);
        assert_eq!(round.stacks(), [chips(1_000), chips(5)]);

        // The button cannot cover the big blind.
        let mut round = new_round(15, 1_000);
        assert_eq!(round.dealer_action(), None);
        assert_eq!(round.legal_actions(), vec![BetAction::Fold, BetAction::AllIn]);
        round.allin();

        let shared = round.showdown_share_pots(Showdown::Winner(Position::Zero));
        assert_eq!(shared.returned, [Chips::ZERO, chips(5)]);
        assert_eq!(round.stacks(), [chips(30), chips(985)]);
    }

    #[test]
    fn big_blind_all_in_must_be_answered() {
        let mut round = new_round(1_000, 20);
        assert_eq!(round.stacks(), [chips(990), Chips::ZERO]);
        assert_eq!(round.dealer_action(), None);

        round.call(chips(10));
        assert_eq!(round.dealer_action(), Some(DealerActionKind::ShowdownSharePots));
    }

    #[test]
    fn random_hands_conserve_chips() {
        let mut rng = StdRng::seed_from_u64(13);

        for _ in 0..2_000 {
            let s0 = rng.random_range(1..=400);
            let s1 = rng.random_range(1..=400);
            let total = chips(s0 + s1);
            let mut round = new_round(s0, s1);
            let mut last_round_type = round.round_type();

            loop {
                assert_eq!(round.total_chips(), total);
                assert!(round.round_type() >= last_round_type);
                last_round_type = round.round_type();

                let actions = round.legal_actions();
                match round.dealer_action() {
                    None => {
                        assert!(!actions.is_empty());
                        let action = *actions.choose(&mut rng).unwrap();
                        let acting = round.acting_turn();
                        apply(&mut round, action);

                        match action {
                            BetAction::Fold | BetAction::AllIn => {
                                assert_eq!(round.acting_turn(), acting);
                            }
                            _ => assert_eq!(round.acting_turn(), acting.other()),
                        }
                    }
                    Some(kind) => {
                        assert!(actions.is_empty());
                        match kind {
                            DealerActionKind::NextBettingRound => round.next_betting_round(),
                            DealerActionKind::FoldSharePots => {
                                round.fold_share_pots();
                            }
                            DealerActionKind::ShowdownSharePots => {
                                let showdown = match rng.random_range(0..3) {
                                    0 => Showdown::Tie,
                                    1 => Showdown::Winner(Position::Zero),
                                    _ => Showdown::Winner(Position::One),
                                };
                                round.showdown_share_pots(showdown);
                            }
                        }
                    }
                }

                if round.is_settled() {
                    break;
                }
            }

            let shared = round.pots_shared().unwrap();
            assert_eq!(shared.total(), total);
            assert_eq!(round.stacks()[0] + round.stacks()[1], total);
            assert_eq!(round.pot(), Chips::ZERO);
        }
    }
}
