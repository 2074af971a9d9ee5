//! CLI table example.
//!
//! Plays card rounds against the dealer while a simulated arcade score feeds
//! the side bet. The balance is kept in `sidejack_balance.json`.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use sidejack::{
    Card, DealerHand, Game, GameOptions, GameState, Hand, JsonFileStore, NoticeQueue, Severity,
    Wager,
};

fn main() {
    env_logger::init();
    println!("Blackjack side bet CLI example (type 'help' for commands)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let notices = NoticeQueue::new();
    let game = Game::with_collaborators(
        GameOptions::default(),
        seed,
        Box::new(JsonFileStore::new("sidejack_balance.json")),
        Box::new(notices.clone()),
    );

    loop {
        print_notices(&notices);
        print_table(&game);

        let line = prompt_line("> ");
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();

        match command {
            "b" | "bet" => {
                let wager = Wager::parse(words.next().unwrap_or(""), words.next().unwrap_or(""));
                if wager.adjusted {
                    println!("Wager adjusted to {} on target {}.", wager.amount, wager.target);
                }
                if let Err(err) = game.place_bet(wager) {
                    println!("Bet error: {err}");
                }
            }
            "h" | "hit" => match game.hit() {
                Ok(card) => println!("You draw {}.", format_card(card)),
                Err(err) => println!("Action error: {err}"),
            },
            "s" | "stand" => {
                if let Err(err) = game.stand() {
                    println!("Action error: {err}");
                }
            }
            "n" | "next" => {
                if let Err(err) = game.next_hand() {
                    println!("Action error: {err}");
                }
            }
            "score" => match words.next().map(str::parse::<u64>) {
                Some(Ok(score)) => {
                    game.score_progress(score);
                }
                _ => println!("Usage: score <points>"),
            },
            "miss" => {
                game.round_ended();
            }
            "restart" => game.arcade_restarted(),
            "help" => print_help(),
            "q" | "quit" => break,
            "" => {}
            _ => println!("Unknown command."),
        }
    }

    if game.flush_balance().is_err() {
        println!("Balance could not be saved.");
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn print_help() {
    println!("  bet <amount> <target>  place a bet and deal");
    println!("  hit | stand            play the hand");
    println!("  next                   clear the table after a round");
    println!("  score <points>         report the arcade score");
    println!("  miss                   report a lost arcade round");
    println!("  restart                reset the arcade score");
    println!("  quit");
}

fn print_notices(notices: &NoticeQueue) {
    for notice in notices.drain() {
        let code = match notice.severity {
            Severity::Info => "36",
            Severity::Success => "32",
            Severity::Error => "31",
        };
        println!("{}", colorize(&notice.message, code));
    }
}

fn print_table(game: &Game) {
    println!(
        "\nBalance: {} | Score: {} | Shoe: {} cards",
        game.balance(),
        game.score(),
        game.cards_remaining()
    );

    if let Some(bet) = game.active_bet() {
        let remaining = game.side_bet_remaining().unwrap_or_default();
        println!(
            "Bet #{}: {} on target {} ({remaining} to go)",
            bet.id, bet.amount, bet.target
        );
    }

    let state = game.state();
    if state == GameState::Idle {
        println!();
        return;
    }

    let dealer = game.get_dealer_hand();
    let dealer_value = if dealer.is_hole_revealed() {
        dealer.value()
    } else {
        dealer.visible_value()
    };
    println!("Dealer: {} (value {dealer_value})", format_dealer(&dealer));

    let player = game.get_player_hand();
    println!("You:    {} (value {})", format_hand(&player), player.value());

    if state == GameState::Resolved {
        println!("Round over. Type 'next' or place another bet.");
    }
    println!();
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_dealer(dealer: &DealerHand) -> String {
    if dealer.is_empty() {
        return "(no cards)".to_string();
    }

    dealer
        .visible_cards()
        .into_iter()
        .map(|card| card.map_or_else(|| "??".to_string(), format_card))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_hand(hand: &Hand) -> String {
    if hand.is_empty() {
        return "(empty)".to_string();
    }
    hand.cards()
        .iter()
        .copied()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: Card) -> String {
    if card.value() >= 10 {
        colorize(card.label(), "33")
    } else {
        card.label().to_string()
    }
}
