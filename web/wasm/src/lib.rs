use sidejack::{
    BalanceStore, Bet, Card, DealerHand, Game, GameOptions, GameState, Hand, Notice, NoticeQueue,
    Outcome, RoundResult, Settlement, SettlementPath, StoreError, Wager,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = store, js_name = loadData, catch)]
    fn load_data(key: &str, default: f64) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = store, js_name = saveData, catch)]
    fn save_data(key: &str, value: f64) -> Result<(), JsValue>;
}

/// Balance store over the page's `store.loadData` / `store.saveData` helpers.
struct PageStore;

impl BalanceStore for PageStore {
    fn load(&self, key: &str, default: u64) -> Result<u64, StoreError> {
        let raw = load_data(key, default as f64).map_err(store_err)?;
        match raw.as_f64() {
            Some(value) if value.is_finite() && value >= 0.0 && value.fract() == 0.0 => {
                Ok(value as u64)
            }
            _ => Err(StoreError::Corrupted {
                key: key.to_string(),
                reason: format!("not a whole non-negative number: {raw:?}"),
            }),
        }
    }

    fn save(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        save_data(key, value as f64).map_err(store_err)
    }
}

#[wasm_bindgen]
pub struct WasmTable {
    game: Game,
    notices: NoticeQueue,
}

#[wasm_bindgen]
impl WasmTable {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Self {
        let notices = NoticeQueue::new();
        let game = Game::with_collaborators(
            GameOptions::default().with_notice_ttl_ms(Some(3000)),
            u64::from(seed),
            Box::new(PageStore),
            Box::new(notices.clone()),
        );
        Self { game, notices }
    }

    /// Places a bet from raw form input and deals.
    pub fn place_bet(&self, amount: &str, target: &str) -> Result<String, JsValue> {
        let wager = Wager::parse(amount, target);
        self.game
            .place_bet(wager)
            .map(|state| state_to_str(state).to_string())
            .map_err(js_err)
    }

    pub fn hit(&self) -> Result<String, JsValue> {
        self.game
            .hit()
            .map(|card| card.label().to_string())
            .map_err(js_err)
    }

    pub fn stand(&self) -> Result<JsValue, JsValue> {
        let result = self.game.stand().map_err(js_err)?;
        to_js_value(&JsRoundResult::from(result))
    }

    pub fn next_hand(&self) -> Result<(), JsValue> {
        self.game.next_hand().map_err(js_err)
    }

    pub fn score_progress(&self, current: u32) -> Result<JsValue, JsValue> {
        let settlement = self
            .game
            .score_progress(u64::from(current))
            .map(JsSettlement::from);
        to_js_value(&settlement)
    }

    pub fn round_ended(&self) -> Result<JsValue, JsValue> {
        let settlement = self.game.round_ended().map(JsSettlement::from);
        to_js_value(&settlement)
    }

    pub fn arcade_restarted(&self) {
        self.game.arcade_restarted();
    }

    pub fn flush_balance(&self) -> Result<(), JsValue> {
        self.game.flush_balance().map_err(js_err)
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let player = self.game.get_player_hand();
        let snapshot = Snapshot {
            state: state_to_str(self.game.state()),
            balance: self.game.balance(),
            balance_unsaved: self.game.balance_unsaved(),
            score: self.game.score(),
            bet: self.game.active_bet().map(JsBet::from),
            side_bet_remaining: self.game.side_bet_remaining(),
            player: JsHand::from(&player),
            dealer: JsDealer::from(&self.game.get_dealer_hand()),
            last_result: self.game.last_result().map(JsRoundResult::from),
            cards_remaining: self.game.cards_remaining() as u32,
        };

        to_js_value(&snapshot)
    }

    pub fn drain_notices(&self) -> Result<JsValue, JsValue> {
        let notices: Vec<JsNotice> = self.notices.drain().into_iter().map(JsNotice::from).collect();
        to_js_value(&notices)
    }
}

#[derive(Serialize)]
struct Snapshot {
    state: &'static str,
    balance: u64,
    balance_unsaved: bool,
    score: u64,
    bet: Option<JsBet>,
    side_bet_remaining: Option<u64>,
    player: JsHand,
    dealer: JsDealer,
    last_result: Option<JsRoundResult>,
    cards_remaining: u32,
}

#[derive(Serialize)]
struct JsBet {
    id: u64,
    amount: u64,
    target: u64,
    placed_at_marker: u64,
}

impl From<Bet> for JsBet {
    fn from(bet: Bet) -> Self {
        Self {
            id: bet.id,
            amount: bet.amount,
            target: bet.target,
            placed_at_marker: bet.placed_at_marker,
        }
    }
}

#[derive(Serialize)]
struct JsHand {
    cards: Vec<&'static str>,
    value: u8,
    is_soft: bool,
    is_blackjack: bool,
    is_bust: bool,
}

impl From<&Hand> for JsHand {
    fn from(hand: &Hand) -> Self {
        Self {
            cards: labels(hand.cards()),
            value: hand.value(),
            is_soft: hand.is_soft(),
            is_blackjack: hand.is_blackjack(),
            is_bust: hand.is_bust(),
        }
    }
}

#[derive(Serialize)]
struct JsDealer {
    cards: Vec<Option<&'static str>>,
    visible_value: u8,
    hole_revealed: bool,
}

impl From<&DealerHand> for JsDealer {
    fn from(dealer: &DealerHand) -> Self {
        Self {
            cards: dealer
                .visible_cards()
                .into_iter()
                .map(|card| card.map(Card::label))
                .collect(),
            visible_value: dealer.visible_value(),
            hole_revealed: dealer.is_hole_revealed(),
        }
    }
}

#[derive(Serialize)]
struct JsSettlement {
    bet_id: u64,
    path: &'static str,
    outcome: &'static str,
    stake: u64,
    payout: u64,
    net: i64,
    balance: u64,
    message: String,
}

impl From<Settlement> for JsSettlement {
    fn from(settlement: Settlement) -> Self {
        Self {
            bet_id: settlement.bet_id,
            path: match settlement.path {
                SettlementPath::Cards => "Cards",
                SettlementPath::SideBet => "SideBet",
            },
            outcome: outcome_to_str(settlement.outcome),
            stake: settlement.stake,
            payout: settlement.payout,
            net: settlement.net(),
            balance: settlement.balance,
            message: settlement.message,
        }
    }
}

#[derive(Serialize)]
struct JsRoundResult {
    player_cards: Vec<&'static str>,
    player_value: u8,
    dealer_cards: Vec<&'static str>,
    dealer_value: u8,
    settlement: Option<JsSettlement>,
}

impl From<RoundResult> for JsRoundResult {
    fn from(result: RoundResult) -> Self {
        Self {
            player_cards: labels(&result.player_cards),
            player_value: result.player_value,
            dealer_cards: labels(&result.dealer_cards),
            dealer_value: result.dealer_value,
            settlement: result.settlement.map(JsSettlement::from),
        }
    }
}

#[derive(Serialize)]
struct JsNotice {
    message: String,
    severity: &'static str,
    ttl_ms: Option<u32>,
}

impl From<Notice> for JsNotice {
    fn from(notice: Notice) -> Self {
        Self {
            severity: notice.severity.as_str(),
            message: notice.message,
            ttl_ms: notice.ttl_ms,
        }
    }
}

fn labels(cards: &[Card]) -> Vec<&'static str> {
    cards.iter().map(|card| card.label()).collect()
}

fn state_to_str(state: GameState) -> &'static str {
    match state {
        GameState::Idle => "Idle",
        GameState::BetPlaced => "BetPlaced",
        GameState::PlayerTurn => "PlayerTurn",
        GameState::DealerTurn => "DealerTurn",
        GameState::Resolved => "Resolved",
    }
}

fn outcome_to_str(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win => "Win",
        Outcome::Blackjack => "Blackjack",
        Outcome::Push => "Push",
        Outcome::Lose => "Lose",
    }
}

fn store_err(err: JsValue) -> StoreError {
    StoreError::Unavailable(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn js_err<E: core::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
