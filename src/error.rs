//! Error types for table operations.

extern crate alloc;

use alloc::string::String;
use thiserror::Error;

/// Errors that can occur when placing a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// The stake exceeds the balance.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// A bet is already active or a round is still being played.
    #[error("a bet is already active")]
    IllegalAction,
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The action is not valid in the current table state.
    #[error("action not allowed in the current state")]
    IllegalAction,
}

/// Errors from the settlement gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettleError {
    /// No bet has been placed.
    #[error("no bet to settle")]
    NoBet,
    /// The bet was already settled.
    #[error("bet {0} was already settled")]
    AlreadySettled(u64),
}

/// Errors reported by a balance store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing storage could not be read or written.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// The stored value could not be decoded.
    #[error("corrupted value for key {key}: {reason}")]
    Corrupted {
        /// Key whose value failed to decode.
        key: String,
        /// Decoder message.
        reason: String,
    },
}
