use alloc::vec::Vec;

use crate::card::Card;
use crate::result::{Outcome, RoundResult, Settlement, SettlementPath};

use super::{Game, GameState};

impl Game {
    /// Dealer plays their hand according to the rules.
    ///
    /// The dealer reveals their hole card and draws until reaching 17 or
    /// higher. With `stand_on_soft_17` (the default) every 17 stands, which is
    /// the classic "draw while under 17" rule. Otherwise a soft 17 is hit.
    ///
    /// Returns the cards drawn by the dealer.
    pub(super) fn dealer_play(&self) -> Vec<Card> {
        self.dealer_hand.lock().reveal_hole();

        let mut drawn_cards = Vec::new();

        loop {
            let dealer = self.dealer_hand.lock();
            let value = dealer.value();
            let is_soft = dealer.is_soft();
            drop(dealer);

            if value > 17 {
                break;
            }
            if value == 17 && (!is_soft || self.options.stand_on_soft_17) {
                break;
            }

            let card = self.draw();
            self.dealer_hand.lock().add_card(card);
            drawn_cards.push(card);
        }

        log::debug!("dealer drew {} card(s)", drawn_cards.len());
        drawn_cards
    }

    /// Ends the round with `outcome`, settling its bet if still active.
    pub(super) fn finish_round(&self, outcome: Outcome) -> RoundResult {
        self.dealer_hand.lock().reveal_hole();

        let active_id = self.active_bet().map(|bet| bet.id);
        let settlement = active_id.and_then(|id| {
            self.settle_bet(id, outcome, SettlementPath::Cards)
                .inspect_err(|err| log::warn!("round settlement refused: {err}"))
                .ok()
        });

        *self.state.lock() = GameState::Resolved;
        self.record_result(settlement)
    }

    /// Ends a round whose bet was resolved by the side bet.
    pub(super) fn void_round(&self) -> RoundResult {
        self.dealer_hand.lock().reveal_hole();
        *self.state.lock() = GameState::Resolved;
        log::debug!("round voided: its bet was settled by the side bet");
        self.record_result(None)
    }

    fn record_result(&self, settlement: Option<Settlement>) -> RoundResult {
        let player = self.get_player_hand();
        let dealer = self.get_dealer_hand();
        let result = RoundResult {
            player_cards: player.cards().to_vec(),
            player_value: player.value(),
            dealer_cards: dealer.cards().to_vec(),
            dealer_value: dealer.value(),
            settlement,
        };
        *self.last_result.lock() = Some(result.clone());
        result
    }
}
