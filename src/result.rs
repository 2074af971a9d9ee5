//! Round and settlement result types.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::card::Card;

/// Result of a wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Player wins (dealer busts, player has higher value, or side bet hit its target).
    Win,
    /// Player has a natural blackjack.
    Blackjack,
    /// Push (tie); the stake is returned.
    Push,
    /// Player loses; the stake was already taken at placement.
    Lose,
}

/// Which part of the table resolved a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettlementPath {
    /// The blackjack round.
    Cards,
    /// The arcade side bet.
    SideBet,
}

/// A committed settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// The settled bet.
    pub bet_id: u64,
    /// What resolved it.
    pub path: SettlementPath,
    /// The outcome.
    pub outcome: Outcome,
    /// The stake that was debited at placement.
    pub stake: u64,
    /// Amount credited back to the balance.
    pub payout: u64,
    /// Balance after the credit.
    pub balance: u64,
    /// Message sent to the player.
    pub message: String,
}

impl Settlement {
    /// Net result of the bet (positive = profit).
    #[must_use]
    #[expect(clippy::cast_possible_wrap, reason = "payout values fit in i64")]
    pub const fn net(&self) -> i64 {
        self.payout as i64 - self.stake as i64
    }
}

/// Result of a finished blackjack round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    /// The player's final cards.
    pub player_cards: Vec<Card>,
    /// The player's final value.
    pub player_value: u8,
    /// The dealer's final cards.
    pub dealer_cards: Vec<Card>,
    /// The dealer's final value.
    pub dealer_value: u8,
    /// Settlement of the round's bet; `None` if the side bet had already
    /// resolved it and the round was voided.
    pub settlement: Option<Settlement>,
}

impl RoundResult {
    /// Returns the outcome, if the round was settled.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.settlement.as_ref().map(|s| s.outcome)
    }
}
