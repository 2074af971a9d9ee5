//! Table engine and state management.

use core::sync::atomic::{AtomicU64, Ordering};

use alloc::boxed::Box;
use alloc::string::String;

use crate::sync::Mutex;

use crate::card::Card;
use crate::error::{SettleError, StoreError};
use crate::hand::{DealerHand, Hand};
use crate::notice::{LogNotifier, Notice, Notifier, Severity};
use crate::options::GameOptions;
use crate::result::{Outcome, RoundResult, Settlement, SettlementPath};
use crate::settle::settle;
use crate::shoe::Shoe;
use crate::store::{BalanceStore, Commit, Ledger, MemoryStore};

mod actions;
mod bet;
mod dealer;
mod side_bet;
pub mod state;

pub use state::{Bet, GameState, Wager};

/// A single-seat blackjack table with an arcade side bet.
///
/// The table owns the shoe, both hands, the one active bet and the balance
/// ledger. Every bet is resolved exactly once, either by the card round or by
/// the side bet, through [`Game::settle_bet`].
pub struct Game {
    /// Table options.
    pub options: GameOptions,
    /// The shoe.
    pub shoe: Mutex<Shoe>,
    /// Current round state.
    pub state: Mutex<GameState>,
    /// The player's hand.
    pub player_hand: Mutex<Hand>,
    /// The dealer's hand.
    pub dealer_hand: Mutex<DealerHand>,
    /// The most recent bet, active or settled.
    bet: Mutex<Option<Bet>>,
    /// Balance ledger. Locked after `bet` when both are needed.
    ledger: Mutex<Ledger>,
    /// Latest arcade score.
    score: Mutex<u64>,
    /// Next bet serial.
    next_bet_id: AtomicU64,
    /// Result of the last finished round.
    last_result: Mutex<Option<RoundResult>>,
    notifier: Box<dyn Notifier>,
}

impl Game {
    /// Creates a table with an in-memory balance and log notices.
    ///
    /// # Example
    ///
    /// ```
    /// use sidejack::{Game, GameOptions};
    ///
    /// let game = Game::new(GameOptions::default(), 42);
    /// assert_eq!(game.balance(), 100);
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        Self::with_collaborators(
            options,
            seed,
            Box::new(MemoryStore::new()),
            Box::new(LogNotifier),
        )
    }

    /// Creates a table over the given balance store and notice sink.
    ///
    /// The balance is loaded once here; a missing value starts at
    /// `options.starting_balance`.
    #[must_use]
    pub fn with_collaborators(
        options: GameOptions,
        seed: u64,
        store: Box<dyn BalanceStore>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let shoe = Shoe::new(options.decks, options.penetration, seed);
        let ledger = Ledger::open(store, &options.balance_key, options.starting_balance);
        log::debug!(
            "table opened: {} decks, seed {seed}, balance {}",
            shoe.decks(),
            ledger.balance()
        );

        Self {
            shoe: Mutex::new(shoe),
            options,
            state: Mutex::new(GameState::Idle),
            player_hand: Mutex::new(Hand::new()),
            dealer_hand: Mutex::new(DealerHand::new()),
            bet: Mutex::new(None),
            ledger: Mutex::new(ledger),
            score: Mutex::new(0),
            next_bet_id: AtomicU64::new(1),
            last_result: Mutex::new(None),
            notifier,
        }
    }

    /// Sends a notice to the sink with the table's default lifetime.
    fn notify(&self, message: impl Into<String>, severity: Severity) {
        let mut notice = Notice::new(message, severity);
        notice.ttl_ms = self.options.notice_ttl_ms;
        self.notifier.notify(notice);
    }

    fn report_commit(&self, commit: Commit) {
        if !commit.saved {
            self.notify(
                "Your balance could not be saved. It will be retried.",
                Severity::Error,
            );
        }
    }

    /// Draws a card, announcing a reshuffle if one happened first.
    fn draw(&self) -> Card {
        let mut shoe = self.shoe.lock();
        let reshuffled = shoe.ensure_fresh();
        let card = shoe.draw();
        drop(shoe);

        if reshuffled {
            self.notify("Shuffling shoe", Severity::Info);
        }
        card
    }

    /// Reshuffles the shoe if it is below penetration, announcing it.
    fn refresh_shoe(&self) {
        let reshuffled = self.shoe.lock().ensure_fresh();
        if reshuffled {
            self.notify("Shuffling shoe", Severity::Info);
        }
    }

    /// Settles bet `bet_id` with `outcome`.
    ///
    /// This is the only place the balance is credited. The credit and the
    /// bet's deactivation happen under one lock, so a bet can be settled by
    /// either the card round or the side bet, never both.
    ///
    /// # Errors
    ///
    /// Returns [`SettleError::NoBet`] if no bet was ever placed and
    /// [`SettleError::AlreadySettled`] if `bet_id` is not the active bet.
    pub fn settle_bet(
        &self,
        bet_id: u64,
        outcome: Outcome,
        path: SettlementPath,
    ) -> Result<Settlement, SettleError> {
        let mut bet = self.bet.lock();
        let active = bet.as_mut().ok_or(SettleError::NoBet)?;
        if active.id != bet_id || !active.active {
            log::debug!("rejected second settlement of bet {bet_id}");
            return Err(SettleError::AlreadySettled(bet_id));
        }

        let payout = settle(outcome, active.amount, path, &self.options);
        let mut ledger = self.ledger.lock();
        let commit = if payout.delta > 0 {
            ledger.credit(payout.delta)
        } else {
            Commit {
                balance: ledger.balance(),
                saved: ledger.flush().is_ok(),
            }
        };
        drop(ledger);
        active.active = false;
        let stake = active.amount;
        drop(bet);

        log::info!(
            "bet {bet_id} settled by {path:?}: {outcome:?}, credited {} (balance {})",
            payout.delta,
            commit.balance
        );
        self.notify(payout.message.clone(), payout.severity);
        self.report_commit(commit);

        Ok(Settlement {
            bet_id,
            path,
            outcome,
            stake,
            payout: payout.delta,
            balance: commit.balance,
            message: payout.message,
        })
    }

    /// Retries saving the balance after a store failure.
    ///
    /// # Errors
    ///
    /// Returns the store error if the save fails again.
    pub fn flush_balance(&self) -> Result<(), StoreError> {
        self.ledger.lock().flush()
    }

    /// Returns whether the current balance has not reached the store.
    pub fn balance_unsaved(&self) -> bool {
        self.ledger.lock().is_unsaved()
    }

    /// Returns the current balance.
    pub fn balance(&self) -> u64 {
        self.ledger.lock().balance()
    }

    /// Returns the most recent bet, active or settled.
    pub fn bet(&self) -> Option<Bet> {
        *self.bet.lock()
    }

    /// Returns the active bet, if any.
    pub fn active_bet(&self) -> Option<Bet> {
        self.bet().filter(|bet| bet.active)
    }

    /// Returns the current round state.
    pub fn state(&self) -> GameState {
        *self.state.lock()
    }

    /// Returns the latest arcade score.
    pub fn score(&self) -> u64 {
        *self.score.lock()
    }

    /// Returns a clone of the player's hand.
    pub fn get_player_hand(&self) -> Hand {
        self.player_hand.lock().clone()
    }

    /// Returns a clone of the dealer's hand.
    pub fn get_dealer_hand(&self) -> DealerHand {
        self.dealer_hand.lock().clone()
    }

    /// Returns the result of the last finished round.
    pub fn last_result(&self) -> Option<RoundResult> {
        self.last_result.lock().clone()
    }

    /// Returns the number of cards remaining in the shoe.
    pub fn cards_remaining(&self) -> usize {
        self.shoe.lock().remaining()
    }

    /// Clears both hands and the last result.
    fn clear_hands(&self) {
        self.player_hand.lock().clear();
        self.dealer_hand.lock().clear();
        *self.last_result.lock() = None;
    }
}
