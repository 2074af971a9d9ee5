use core::sync::atomic::Ordering;

use crate::error::BetError;
use crate::hand::BLACKJACK;
use crate::notice::Severity;
use crate::result::Outcome;

use super::{Bet, Game, GameState, Wager};

impl Game {
    /// Places a bet and deals a new round.
    ///
    /// The stake is debited once, here. The side bet marker is the arcade
    /// score at this moment. Stake and target below [`Wager::MIN`] are raised
    /// to it. Returns the state after the deal: `PlayerTurn`,
    /// or `Resolved` when a natural ended the round immediately.
    ///
    /// # Errors
    ///
    /// Returns [`BetError::IllegalAction`] while a bet is active or a round is
    /// in progress, and [`BetError::InsufficientFunds`] if the stake exceeds
    /// the balance. Nothing is changed in either case.
    pub fn place_bet(&self, wager: Wager) -> Result<GameState, BetError> {
        let state = self.state();
        if !matches!(state, GameState::Idle | GameState::Resolved) {
            log::debug!("bet refused in state {state:?}");
            return Err(BetError::IllegalAction);
        }

        let mut bet = self.bet.lock();
        if bet.is_some_and(|bet| bet.active) {
            log::debug!("bet refused: a bet is already active");
            return Err(BetError::IllegalAction);
        }

        let amount = wager.amount.max(Wager::MIN);
        let target = wager.target.max(Wager::MIN);
        let commit = self.ledger.lock().debit(amount);
        let Some(commit) = commit else {
            drop(bet);
            self.notify("Insufficient balance to place that bet.", Severity::Error);
            return Err(BetError::InsufficientFunds);
        };

        let placed = Bet {
            id: self.next_bet_id.fetch_add(1, Ordering::SeqCst),
            amount,
            target,
            placed_at_marker: self.score(),
            active: true,
        };
        *bet = Some(placed);
        drop(bet);

        *self.state.lock() = GameState::BetPlaced;
        log::debug!(
            "bet {} placed: {} on target {} (balance {})",
            placed.id,
            placed.amount,
            placed.target,
            commit.balance
        );
        self.report_commit(commit);

        Ok(self.start_round())
    }

    /// Deals two cards each to the player and the dealer and checks naturals.
    fn start_round(&self) -> GameState {
        self.clear_hands();
        self.refresh_shoe();

        for _ in 0..2 {
            let card = self.draw();
            self.player_hand.lock().add_card(card);
        }
        for _ in 0..2 {
            let card = self.draw();
            self.dealer_hand.lock().add_card(card);
        }

        let player_value = self.player_hand.lock().value();
        let dealer_value = self.dealer_hand.lock().value();

        if player_value == BLACKJACK && dealer_value != BLACKJACK {
            self.finish_round(Outcome::Blackjack);
        } else if player_value == BLACKJACK {
            self.finish_round(Outcome::Push);
        } else {
            *self.state.lock() = GameState::PlayerTurn;
        }

        self.state()
    }
}
