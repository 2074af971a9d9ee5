//! Payout rules.
//!
//! Stakes are debited when a bet is placed, so every payout here is the full
//! amount credited back: stake plus winnings.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use crate::notice::Severity;
use crate::options::{GameOptions, RoundingMode};
use crate::result::{Outcome, SettlementPath};

/// Balance change and player message for a settled bet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payout {
    /// Amount to credit.
    pub delta: u64,
    /// Message for the player.
    pub message: String,
    /// Notice severity for the message.
    pub severity: Severity,
}

#[cfg(feature = "std")]
fn round_amount(amount: f64, mode: RoundingMode) -> u64 {
    match mode {
        RoundingMode::Up => amount.ceil() as u64,
        RoundingMode::Down => amount.floor() as u64,
        RoundingMode::Nearest => amount.round() as u64,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(amount: f64, mode: RoundingMode) -> u64 {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as u64,
        RoundingMode::Down => libm::floor(amount) as u64,
        RoundingMode::Nearest => libm::round(amount) as u64,
    }
}

/// Computes the payout for an outcome.
///
/// | outcome   | credit                           |
/// |-----------|----------------------------------|
/// | Win       | 2 x stake (side bet: multiplier) |
/// | Blackjack | stake + rounded 3:2 winnings     |
/// | Push      | stake                            |
/// | Lose      | 0                                |
///
/// The path only changes the win multiplier and the wording.
///
/// # Example
///
/// ```
/// use sidejack::{GameOptions, Outcome, SettlementPath, settle};
///
/// let options = GameOptions::default();
/// assert_eq!(settle(Outcome::Blackjack, 10, SettlementPath::Cards, &options).delta, 25);
/// assert_eq!(settle(Outcome::Blackjack, 5, SettlementPath::Cards, &options).delta, 13);
/// assert_eq!(settle(Outcome::Push, 10, SettlementPath::SideBet, &options).delta, 10);
/// ```
#[must_use]
pub fn settle(outcome: Outcome, stake: u64, path: SettlementPath, options: &GameOptions) -> Payout {
    match (outcome, path) {
        (Outcome::Win, SettlementPath::SideBet) => {
            let delta = stake.saturating_mul(options.side_bet_multiplier);
            Payout {
                delta,
                message: format!("You hit the target! You win ${delta}."),
                severity: Severity::Success,
            }
        }
        (Outcome::Win, SettlementPath::Cards) => {
            let delta = stake.saturating_mul(2);
            Payout {
                delta,
                message: format!("You win ${delta}!"),
                severity: Severity::Success,
            }
        }
        (Outcome::Blackjack, _) => {
            #[expect(
                clippy::cast_precision_loss,
                reason = "f64 has sufficient precision for monetary values"
            )]
            let winnings = round_amount(
                stake as f64 * options.blackjack_pays,
                options.rounding_blackjack,
            );
            let delta = stake.saturating_add(winnings);
            Payout {
                delta,
                message: format!("Blackjack! You win ${delta}!"),
                severity: Severity::Success,
            }
        }
        (Outcome::Push, _) => Payout {
            delta: stake,
            message: String::from("Push: your stake is returned."),
            severity: Severity::Info,
        },
        (Outcome::Lose, SettlementPath::SideBet) => Payout {
            delta: 0,
            message: format!("You lost the bet of ${stake}."),
            severity: Severity::Error,
        },
        (Outcome::Lose, SettlementPath::Cards) => Payout {
            delta: 0,
            message: format!("You lost ${stake}."),
            severity: Severity::Error,
        },
    }
}
