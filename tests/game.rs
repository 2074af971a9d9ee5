//! Table integration tests.

use sidejack::{
    ActionError, BetError, Card, Game, GameOptions, GameState, MemoryStore, NoticeQueue, Outcome,
    SettleError, SettlementPath, Severity, Wager,
};

fn table(options: GameOptions) -> (Game, NoticeQueue) {
    let notices = NoticeQueue::new();
    let game = Game::with_collaborators(
        options,
        7,
        Box::new(MemoryStore::new()),
        Box::new(notices.clone()),
    );
    (game, notices)
}

/// Arranges the next draws: player, player, dealer, dealer, then hits.
fn stack(game: &Game, draws: &[Card]) {
    assert!(game.shoe.lock().stack(draws));
}

#[test]
fn bet_is_debited_once_at_placement() {
    let (game, _) = table(GameOptions::default());
    stack(&game, &[Card::Ten, Card::Six, Card::Nine, Card::Seven]);

    let state = game.place_bet(Wager::new(10, 50)).unwrap();
    assert_eq!(state, GameState::PlayerTurn);
    assert_eq!(game.balance(), 90);

    let bet = game.active_bet().unwrap();
    assert_eq!(bet.amount, 10);
    assert_eq!(bet.target, 50);
    assert_eq!(bet.placed_at_marker, 0);
    assert_eq!(game.get_player_hand().len(), 2);
    assert_eq!(game.get_dealer_hand().len(), 2);
}

#[test]
fn natural_blackjack_pays_three_to_two() {
    let (game, notices) = table(GameOptions::default());
    stack(&game, &[Card::Ace, Card::King, Card::Nine, Card::Eight]);

    let state = game.place_bet(Wager::new(10, 50)).unwrap();
    assert_eq!(state, GameState::Resolved);

    let result = game.last_result().unwrap();
    let settlement = result.settlement.unwrap();
    assert_eq!(settlement.outcome, Outcome::Blackjack);
    assert_eq!(settlement.payout, 25);
    assert_eq!(settlement.net(), 15);
    assert_eq!(result.player_value, 21);
    assert_eq!(result.dealer_value, 17);
    assert_eq!(game.balance(), 115);
    assert!(game.active_bet().is_none());
    assert!(game.get_dealer_hand().is_hole_revealed());

    let notices = notices.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "Blackjack! You win $25!");
    assert_eq!(notices[0].severity, Severity::Success);
}

#[test]
fn both_naturals_push() {
    let (game, _) = table(GameOptions::default());
    stack(&game, &[Card::Ace, Card::King, Card::Queen, Card::Ace]);

    assert_eq!(game.place_bet(Wager::new(10, 50)).unwrap(), GameState::Resolved);
    assert_eq!(game.last_result().unwrap().outcome(), Some(Outcome::Push));
    assert_eq!(game.balance(), 100);
}

#[test]
fn dealer_natural_does_not_end_the_deal() {
    let (game, _) = table(GameOptions::default());
    stack(&game, &[Card::Ten, Card::Nine, Card::Ace, Card::King]);

    assert_eq!(
        game.place_bet(Wager::new(10, 50)).unwrap(),
        GameState::PlayerTurn
    );
    let result = game.stand().unwrap();
    assert_eq!(result.outcome(), Some(Outcome::Lose));
    assert_eq!(game.balance(), 90);
}

#[test]
fn player_bust_loses_without_further_debit() {
    let (game, notices) = table(GameOptions::default());
    stack(
        &game,
        &[Card::Ten, Card::Nine, Card::Seven, Card::Eight, Card::Five],
    );

    game.place_bet(Wager::new(10, 50)).unwrap();
    assert_eq!(game.balance(), 90);

    let card = game.hit().unwrap();
    assert_eq!(card, Card::Five);
    assert_eq!(game.state(), GameState::Resolved);

    let result = game.last_result().unwrap();
    assert_eq!(result.player_value, 24);
    assert_eq!(result.outcome(), Some(Outcome::Lose));
    // The dealer's hand is not played out after a bust.
    assert_eq!(result.dealer_cards.len(), 2);
    assert_eq!(game.balance(), 90);
    assert_eq!(notices.drain()[0].message, "You lost $10.");
}

#[test]
fn stand_win_pays_double() {
    let (game, _) = table(GameOptions::default());
    stack(&game, &[Card::Ten, Card::Nine, Card::Ten, Card::Seven]);

    game.place_bet(Wager::new(10, 50)).unwrap();
    let result = game.stand().unwrap();

    assert_eq!(result.outcome(), Some(Outcome::Win));
    assert_eq!(result.settlement.unwrap().payout, 20);
    assert_eq!(game.balance(), 110);
}

#[test]
fn stand_tie_returns_stake() {
    let (game, notices) = table(GameOptions::default());
    stack(&game, &[Card::Ten, Card::Eight, Card::Queen, Card::Eight]);

    game.place_bet(Wager::new(10, 50)).unwrap();
    let result = game.stand().unwrap();

    assert_eq!(result.outcome(), Some(Outcome::Push));
    assert_eq!(game.balance(), 100);
    let notice = &notices.drain()[0];
    assert_eq!(notice.severity, Severity::Info);
}

#[test]
fn dealer_draws_below_seventeen() {
    let (game, _) = table(GameOptions::default());
    stack(
        &game,
        &[Card::Ten, Card::Eight, Card::Five, Card::Six, Card::King],
    );

    game.place_bet(Wager::new(10, 50)).unwrap();
    let result = game.stand().unwrap();

    assert_eq!(result.dealer_cards, vec![Card::Five, Card::Six, Card::King]);
    assert_eq!(result.dealer_value, 21);
    assert_eq!(result.outcome(), Some(Outcome::Lose));
}

#[test]
fn dealer_bust_wins() {
    let (game, _) = table(GameOptions::default());
    stack(
        &game,
        &[Card::Ten, Card::Two, Card::Ten, Card::Six, Card::Nine],
    );

    game.place_bet(Wager::new(10, 50)).unwrap();
    let result = game.stand().unwrap();

    assert_eq!(result.dealer_value, 25);
    assert_eq!(result.outcome(), Some(Outcome::Win));
    assert_eq!(game.balance(), 110);
}

#[test]
fn dealer_stands_on_soft_17_by_default() {
    let (game, _) = table(GameOptions::default());
    stack(
        &game,
        &[Card::Ten, Card::Eight, Card::Ace, Card::Six, Card::Four],
    );

    game.place_bet(Wager::new(10, 50)).unwrap();
    let result = game.stand().unwrap();

    assert_eq!(result.dealer_cards.len(), 2);
    assert_eq!(result.outcome(), Some(Outcome::Win));
}

#[test]
fn dealer_hits_soft_17_when_configured() {
    let (game, _) = table(GameOptions::default().with_stand_on_soft_17(false));
    stack(
        &game,
        &[Card::Ten, Card::Eight, Card::Ace, Card::Six, Card::Four],
    );

    game.place_bet(Wager::new(10, 50)).unwrap();
    let result = game.stand().unwrap();

    assert_eq!(result.dealer_cards, vec![Card::Ace, Card::Six, Card::Four]);
    assert_eq!(result.dealer_value, 21);
    assert_eq!(result.outcome(), Some(Outcome::Lose));
}

#[test]
fn insufficient_funds_changes_nothing() {
    let (game, notices) = table(GameOptions::default());

    assert_eq!(
        game.place_bet(Wager::new(101, 5)).unwrap_err(),
        BetError::InsufficientFunds
    );
    assert_eq!(game.balance(), 100);
    assert_eq!(game.state(), GameState::Idle);
    assert!(game.bet().is_none());
    assert!(game.get_player_hand().is_empty());

    let notices = notices.drain();
    assert_eq!(notices[0].message, "Insufficient balance to place that bet.");
    assert_eq!(notices[0].severity, Severity::Error);
}

#[test]
fn whole_balance_can_be_staked() {
    let (game, _) = table(GameOptions::default());
    stack(&game, &[Card::Ten, Card::Six, Card::Nine, Card::Seven]);

    game.place_bet(Wager::new(100, 5)).unwrap();
    assert_eq!(game.balance(), 0);
}

#[test]
fn hand_built_wager_is_raised_to_minimum() {
    let (game, _) = table(GameOptions::default());
    stack(&game, &[Card::Ten, Card::Six, Card::Nine, Card::Seven]);

    let wager = Wager {
        amount: 0,
        target: 0,
        adjusted: false,
    };
    assert_eq!(game.place_bet(wager).unwrap(), GameState::PlayerTurn);

    let bet = game.active_bet().unwrap();
    assert_eq!((bet.amount, bet.target), (Wager::MIN, Wager::MIN));
    assert_eq!(game.balance(), 99);
}

#[test]
fn second_bet_while_active_is_refused() {
    let (game, _) = table(GameOptions::default());
    stack(&game, &[Card::Ten, Card::Six, Card::Nine, Card::Seven]);

    game.place_bet(Wager::new(10, 50)).unwrap();
    let first = game.active_bet().unwrap();

    assert_eq!(
        game.place_bet(Wager::new(20, 5)).unwrap_err(),
        BetError::IllegalAction
    );
    assert_eq!(game.balance(), 90);
    assert_eq!(game.active_bet(), Some(first));
}

#[test]
fn actions_outside_player_turn_are_ignored() {
    let (game, notices) = table(GameOptions::default());

    assert_eq!(game.hit().unwrap_err(), ActionError::IllegalAction);
    assert_eq!(game.stand().unwrap_err(), ActionError::IllegalAction);
    assert_eq!(game.next_hand().unwrap_err(), ActionError::IllegalAction);
    assert_eq!(game.state(), GameState::Idle);
    assert!(notices.is_empty());

    stack(&game, &[Card::Ace, Card::King, Card::Nine, Card::Eight]);
    game.place_bet(Wager::new(10, 50)).unwrap();
    let balance = game.balance();
    assert_eq!(game.hit().unwrap_err(), ActionError::IllegalAction);
    assert_eq!(game.stand().unwrap_err(), ActionError::IllegalAction);
    assert_eq!(game.balance(), balance);
}

#[test]
fn settling_a_resolved_round_again_is_rejected() {
    let (game, _) = table(GameOptions::default());

    assert_eq!(
        game.settle_bet(1, Outcome::Win, SettlementPath::Cards)
            .unwrap_err(),
        SettleError::NoBet
    );

    stack(&game, &[Card::Ace, Card::King, Card::Nine, Card::Eight]);
    game.place_bet(Wager::new(10, 50)).unwrap();
    let bet_id = game.bet().unwrap().id;

    assert_eq!(
        game.settle_bet(bet_id, Outcome::Win, SettlementPath::Cards)
            .unwrap_err(),
        SettleError::AlreadySettled(bet_id)
    );
    assert_eq!(game.balance(), 115);
}

#[test]
fn next_hand_clears_the_table() {
    let (game, _) = table(GameOptions::default());
    stack(&game, &[Card::Ace, Card::King, Card::Nine, Card::Eight]);

    game.place_bet(Wager::new(10, 50)).unwrap();
    game.next_hand().unwrap();

    assert_eq!(game.state(), GameState::Idle);
    assert!(game.get_player_hand().is_empty());
    assert!(game.get_dealer_hand().is_empty());
    assert!(game.last_result().is_none());
}

#[test]
fn bet_can_follow_a_resolved_round_directly() {
    let (game, _) = table(GameOptions::default());
    stack(&game, &[Card::Ace, Card::King, Card::Nine, Card::Eight]);
    game.place_bet(Wager::new(10, 50)).unwrap();

    stack(&game, &[Card::Ten, Card::Six, Card::Nine, Card::Seven]);
    assert_eq!(
        game.place_bet(Wager::new(15, 50)).unwrap(),
        GameState::PlayerTurn
    );
    assert_eq!(game.balance(), 100);
    assert_eq!(game.get_player_hand().cards(), &[Card::Ten, Card::Six]);
    assert!(game.last_result().is_none());
}

#[test]
fn bet_ids_are_unique() {
    let (game, _) = table(GameOptions::default());
    stack(&game, &[Card::Ace, Card::King, Card::Nine, Card::Eight]);
    game.place_bet(Wager::new(10, 50)).unwrap();
    let first = game.bet().unwrap().id;

    stack(&game, &[Card::Ace, Card::King, Card::Nine, Card::Eight]);
    game.place_bet(Wager::new(10, 50)).unwrap();
    assert_ne!(game.bet().unwrap().id, first);
}

#[test]
fn reshuffle_during_a_round_is_announced() {
    let options = GameOptions::default()
        .with_decks(1)
        .with_penetration(0.99);
    let (game, notices) = table(options);

    game.place_bet(Wager::new(10, 50)).unwrap();

    let notices = notices.drain();
    assert!(
        notices
            .iter()
            .any(|n| n.message == "Shuffling shoe" && n.severity == Severity::Info)
    );
    let shoe = game.shoe.lock();
    assert_eq!(shoe.remaining() + shoe.discarded(), shoe.total());
}

#[test]
fn notices_carry_configured_ttl() {
    let (game, notices) = table(GameOptions::default().with_notice_ttl_ms(Some(4500)));
    let _ = game.place_bet(Wager::new(500, 5));

    assert_eq!(notices.drain()[0].ttl_ms, Some(4500));
}

#[test]
fn seeded_tables_deal_identically() {
    let first = Game::new(GameOptions::default(), 99);
    let second = Game::new(GameOptions::default(), 99);

    let _ = first.place_bet(Wager::default());
    let _ = second.place_bet(Wager::default());

    assert_eq!(first.get_player_hand(), second.get_player_hand());
    assert_eq!(first.get_dealer_hand(), second.get_dealer_hand());
    assert_eq!(first.balance(), second.balance());
}
