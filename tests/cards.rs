//! Shoe, hand valuation, wager and payout tests.

#![allow(clippy::float_cmp)]

use sidejack::{
    COPIES_PER_FACE, Card, DECK_SIZE, DealerHand, GameOptions, Hand, Outcome, RoundingMode,
    SettlementPath, Severity, Shoe, Wager, hand_value, is_soft, settle,
};

fn cards(labels: &[&str]) -> Vec<Card> {
    labels
        .iter()
        .map(|label| Card::from_label(label).unwrap())
        .collect()
}

#[test]
fn hand_values() {
    assert_eq!(hand_value(&cards(&["A", "A", "9"])), 21);
    assert_eq!(hand_value(&cards(&["A", "A"])), 12);
    assert_eq!(hand_value(&cards(&["K", "Q"])), 20);
    assert_eq!(hand_value(&cards(&["9", "9", "9"])), 27);
    assert_eq!(hand_value(&cards(&["A", "K"])), 21);
    assert_eq!(hand_value(&cards(&["A", "A", "A", "A", "7"])), 21);
    assert_eq!(hand_value(&cards(&["K", "Q", "A", "A"])), 22);
    assert_eq!(hand_value(&[]), 0);
}

#[test]
fn hand_value_ignores_order() {
    let hand = cards(&["A", "5", "A", "10", "3"]);
    let mut reversed = hand.clone();
    reversed.reverse();
    let mut sorted = hand.clone();
    sorted.sort();

    assert_eq!(hand_value(&hand), 20);
    assert_eq!(hand_value(&reversed), 20);
    assert_eq!(hand_value(&sorted), 20);
}

#[test]
fn soft_totals() {
    assert!(is_soft(&cards(&["A", "6"])));
    assert!(!is_soft(&cards(&["A", "6", "10"])));
    assert!(is_soft(&cards(&["A", "A"])));
    assert!(!is_soft(&cards(&["10", "7"])));
}

#[test]
fn hand_blackjack_and_bust() {
    let hand = Hand::from(cards(&["A", "J"]));
    assert!(hand.is_blackjack());
    assert!(hand.is_soft());

    let mut three_card = Hand::from(cards(&["7", "7"]));
    three_card.add_card(Card::Seven);
    assert_eq!(three_card.value(), 21);
    assert!(!three_card.is_blackjack());

    three_card.add_card(Card::Two);
    assert!(three_card.is_bust());
}

#[test]
fn dealer_hole_card_hidden_until_revealed() {
    let mut dealer = DealerHand::new();
    dealer.add_card(Card::Ace);
    dealer.add_card(Card::Six);

    assert_eq!(dealer.visible_value(), 11);
    assert_eq!(dealer.visible_cards(), vec![Some(Card::Ace), None]);
    assert_eq!(dealer.value(), 17);

    dealer.reveal_hole();
    assert_eq!(dealer.visible_value(), 17);
    assert_eq!(dealer.visible_cards(), vec![Some(Card::Ace), Some(Card::Six)]);
    assert!(dealer.is_soft());
}

#[test]
fn card_labels_round_trip() {
    for face in Card::FACES {
        assert_eq!(Card::from_label(face.label()), Some(face));
        assert_eq!(face.to_string(), face.label());
    }
    assert_eq!(Card::from_label("X"), None);
}

#[test]
fn new_shoe_holds_four_of_each_face_per_deck() {
    let shoe = Shoe::new(6, 0.25, 3);
    assert_eq!(shoe.remaining(), 6 * DECK_SIZE);
    assert_eq!(shoe.total(), 6 * DECK_SIZE);

    for face in Card::FACES {
        let count = shoe.cards().iter().filter(|&&c| c == face).count();
        assert_eq!(count, 6 * COPIES_PER_FACE);
    }
}

#[test]
fn zero_decks_is_clamped_to_one() {
    let shoe = Shoe::new(0, 0.25, 3);
    assert_eq!(shoe.decks(), 1);
    assert_eq!(shoe.remaining(), DECK_SIZE);
}

#[test]
fn shuffle_is_seeded() {
    let a = Shoe::new(2, 0.25, 42);
    let b = Shoe::new(2, 0.25, 42);
    let c = Shoe::new(2, 0.25, 43);

    assert_eq!(a.cards(), b.cards());
    assert_ne!(a.cards(), c.cards());
    assert_eq!(a.seed(), 42);
}

#[test]
fn draws_keep_shoe_and_discard_total() {
    let mut shoe = Shoe::new(1, 0.25, 5);
    let total = shoe.total();

    // 13 of 52 left is exactly the threshold, so 39 draws never reshuffle.
    for drawn in 1..=39 {
        let card = shoe.draw();
        assert_eq!(shoe.discard().last(), Some(&card));
        assert_eq!(shoe.discarded(), drawn);
        assert_eq!(shoe.remaining() + shoe.discarded(), total);
    }
    assert_eq!(shoe.shuffles(), 1);
    assert!(!shoe.needs_reshuffle());

    shoe.draw();
    assert!(shoe.needs_reshuffle());
    assert!(shoe.ensure_fresh());
    assert_eq!(shoe.remaining(), total);
    assert_eq!(shoe.discarded(), 0);
    assert_eq!(shoe.shuffles(), 2);
}

#[test]
fn draw_reshuffles_a_depleted_shoe() {
    let mut shoe = Shoe::new(1, 0.0, 5);
    for _ in 0..DECK_SIZE {
        shoe.draw();
    }
    assert_eq!(shoe.remaining(), 0);

    shoe.draw();
    assert_eq!(shoe.remaining(), DECK_SIZE - 1);
    assert_eq!(shoe.discarded(), 1);
}

#[test]
fn stack_preserves_the_card_multiset() {
    let mut shoe = Shoe::new(1, 0.25, 9);
    let mut before = shoe.cards().to_vec();
    before.sort();

    assert!(shoe.stack(&[Card::Ace, Card::King, Card::Ace]));
    let mut after = shoe.cards().to_vec();
    after.sort();
    assert_eq!(before, after);

    assert_eq!(shoe.draw(), Card::Ace);
    assert_eq!(shoe.draw(), Card::King);
    assert_eq!(shoe.draw(), Card::Ace);

    assert!(!shoe.stack(&[Card::Two; 5]));
}

#[test]
fn wager_clamps_to_minimum() {
    let wager = Wager::new(0, -4);
    assert_eq!((wager.amount, wager.target), (1, 1));
    assert!(wager.adjusted);

    let wager = Wager::new(20, 7);
    assert_eq!((wager.amount, wager.target), (20, 7));
    assert!(!wager.adjusted);

    let wager = Wager::parse("", "12.9");
    assert_eq!((wager.amount, wager.target), (1, 12));
    assert!(wager.adjusted);

    let wager = Wager::parse(" 15 ", "3");
    assert_eq!((wager.amount, wager.target), (15, 3));
    assert!(!wager.adjusted);

    assert_eq!(Wager::default().amount, 5);
    assert_eq!(Wager::default().target, 10);
}

#[test]
fn payout_table() {
    let options = GameOptions::default();
    let cards = SettlementPath::Cards;

    assert_eq!(settle(Outcome::Win, 10, cards, &options).delta, 20);
    assert_eq!(settle(Outcome::Blackjack, 10, cards, &options).delta, 25);
    assert_eq!(settle(Outcome::Push, 10, cards, &options).delta, 10);
    assert_eq!(settle(Outcome::Lose, 10, cards, &options).delta, 0);

    let side = SettlementPath::SideBet;
    assert_eq!(settle(Outcome::Win, 10, side, &options).delta, 20);
    assert_eq!(settle(Outcome::Lose, 10, side, &options).delta, 0);
}

#[test]
fn blackjack_rounding() {
    let nearest = GameOptions::default();
    let down = GameOptions::default().with_rounding_blackjack(RoundingMode::Down);
    let cards = SettlementPath::Cards;

    assert_eq!(settle(Outcome::Blackjack, 5, cards, &nearest).delta, 13);
    assert_eq!(settle(Outcome::Blackjack, 5, cards, &down).delta, 12);
    assert_eq!(settle(Outcome::Blackjack, 1, cards, &nearest).delta, 3);
}

#[test]
fn payout_messages() {
    let options = GameOptions::default();

    let win = settle(Outcome::Win, 10, SettlementPath::Cards, &options);
    assert_eq!(win.message, "You win $20!");
    assert_eq!(win.severity, Severity::Success);

    let lose = settle(Outcome::Lose, 10, SettlementPath::Cards, &options);
    assert_eq!(lose.message, "You lost $10.");
    assert_eq!(lose.severity, Severity::Error);
}

#[test]
fn options_builder_sets_fields() {
    let options = GameOptions::default()
        .with_decks(4)
        .with_penetration(0.5)
        .with_blackjack_pays(1.2)
        .with_rounding_blackjack(RoundingMode::Up)
        .with_stand_on_soft_17(false)
        .with_side_bet_multiplier(3)
        .with_starting_balance(250)
        .with_balance_key("alt")
        .with_notice_ttl_ms(Some(1000));

    assert_eq!(options.decks, 4);
    assert_eq!(options.penetration, 0.5);
    assert_eq!(options.blackjack_pays, 1.2);
    assert_eq!(options.rounding_blackjack, RoundingMode::Up);
    assert!(!options.stand_on_soft_17);
    assert_eq!(options.side_bet_multiplier, 3);
    assert_eq!(options.starting_balance, 250);
    assert_eq!(options.balance_key, "alt");
    assert_eq!(options.notice_ttl_ms, Some(1000));
}
