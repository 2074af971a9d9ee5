//! A shoe-based blackjack table with an arcade side bet and optional `no_std` support.
//!
//! The crate provides a [`Game`] type that runs one wagered round at a time:
//! bet placement, the deal, player actions, dealer play and settlement. The
//! same bet can instead be resolved by an external arcade score through
//! [`Game::score_progress`] and [`Game::round_ended`]; whichever path
//! resolves it first is the only one that pays.
//!
//! # Example
//!
//! ```
//! use sidejack::{Game, GameOptions, GameState, Wager};
//!
//! let game = Game::new(GameOptions::default(), 42);
//! let state = game.place_bet(Wager::new(10, 5)).unwrap();
//! if state == GameState::PlayerTurn {
//!     let _ = game.stand();
//! }
//! assert!(game.active_bet().is_none());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod error;
pub mod game;
pub mod hand;
pub mod notice;
pub mod options;
pub mod result;
pub mod settle;
pub mod shoe;
pub mod store;
mod sync;

// Re-export main types
pub use card::{COPIES_PER_FACE, Card, DECK_SIZE};
pub use error::{ActionError, BetError, SettleError, StoreError};
pub use game::{Bet, Game, GameState, Wager};
pub use hand::{BLACKJACK, DealerHand, Hand, hand_value, is_soft};
pub use notice::{LogNotifier, Notice, NoticeQueue, Notifier, Severity};
pub use options::{GameOptions, RoundingMode};
pub use result::{Outcome, RoundResult, Settlement, SettlementPath};
pub use settle::{Payout, settle};
pub use shoe::Shoe;
#[cfg(feature = "json-store")]
pub use store::JsonFileStore;
pub use store::{BalanceStore, Commit, Ledger, MemoryStore};
