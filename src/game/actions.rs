use crate::card::Card;
use crate::error::ActionError;
use crate::result::{Outcome, RoundResult};

use super::{Game, GameState};

impl Game {
    fn ensure_player_turn(&self) -> Result<(), ActionError> {
        let state = self.state();
        if state == GameState::PlayerTurn {
            Ok(())
        } else {
            log::debug!("player action ignored in state {state:?}");
            Err(ActionError::IllegalAction)
        }
    }

    /// Player action: Hit (draw a card).
    ///
    /// A bust ends the round as a loss without playing the dealer's hand.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::IllegalAction`] outside the player's turn. The
    /// table is left untouched.
    pub fn hit(&self) -> Result<Card, ActionError> {
        self.ensure_player_turn()?;

        let card = self.draw();
        let mut hand = self.player_hand.lock();
        hand.add_card(card);
        let bust = hand.is_bust();
        drop(hand);

        if bust {
            self.finish_round(Outcome::Lose);
        }

        Ok(card)
    }

    /// Player action: Stand (dealer plays, then the round is resolved).
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::IllegalAction`] outside the player's turn. The
    /// table is left untouched.
    pub fn stand(&self) -> Result<RoundResult, ActionError> {
        self.ensure_player_turn()?;

        *self.state.lock() = GameState::DealerTurn;
        self.dealer_play();

        let player_value = self.player_hand.lock().value();
        let dealer = self.dealer_hand.lock();
        let outcome = if dealer.is_bust() || player_value > dealer.value() {
            Outcome::Win
        } else if player_value == dealer.value() {
            Outcome::Push
        } else {
            Outcome::Lose
        };
        drop(dealer);

        Ok(self.finish_round(outcome))
    }

    /// Clears the finished round and returns the table to `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::IllegalAction`] unless the round is resolved.
    pub fn next_hand(&self) -> Result<(), ActionError> {
        let mut state = self.state.lock();
        if *state != GameState::Resolved {
            log::debug!("next hand ignored in state {:?}", *state);
            return Err(ActionError::IllegalAction);
        }
        *state = GameState::Idle;
        drop(state);

        self.clear_hands();
        Ok(())
    }
}
