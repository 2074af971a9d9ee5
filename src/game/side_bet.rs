use crate::result::{Outcome, Settlement, SettlementPath};

use super::Game;

impl Game {
    /// Records an arcade score update.
    ///
    /// If the active bet's target is reached the bet is settled as a side-bet
    /// win and any round still being played for it is voided. Returns the
    /// settlement when one happened.
    pub fn score_progress(&self, current: u64) -> Option<Settlement> {
        *self.score.lock() = current;

        let bet = self.active_bet()?;
        if current < bet.target {
            return None;
        }

        let settlement = self
            .settle_bet(bet.id, Outcome::Win, SettlementPath::SideBet)
            .ok()?;
        self.void_if_in_round();
        Some(settlement)
    }

    /// Records a lost arcade round.
    ///
    /// An active bet is settled as a side-bet loss. The stake was taken at
    /// placement, so nothing is credited.
    pub fn round_ended(&self) -> Option<Settlement> {
        let bet = self.active_bet()?;
        let settlement = self
            .settle_bet(bet.id, Outcome::Lose, SettlementPath::SideBet)
            .ok()?;
        self.void_if_in_round();
        Some(settlement)
    }

    /// Resets the arcade score after the arcade game restarts.
    pub fn arcade_restarted(&self) {
        *self.score.lock() = 0;
    }

    /// Returns how many points the active bet still needs.
    pub fn side_bet_remaining(&self) -> Option<u64> {
        let bet = self.active_bet()?;
        Some(bet.target.saturating_sub(self.score()))
    }

    fn void_if_in_round(&self) {
        if self.state().in_round() {
            self.void_round();
        }
    }
}
