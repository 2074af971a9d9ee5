//! Table configuration options.

extern crate alloc;

use alloc::string::String;

/// Rounding mode for fractional payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest, halves away from zero.
    Nearest,
}

/// Configuration options for a table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use sidejack::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(2)
///     .with_penetration(0.5)
///     .with_stand_on_soft_17(false);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameOptions {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Fraction of the shoe that must remain before a reshuffle is forced.
    pub penetration: f64,
    /// Blackjack winnings ratio on top of the returned stake (typically 1.5).
    pub blackjack_pays: f64,
    /// Rounding mode for blackjack winnings.
    pub rounding_blackjack: RoundingMode,
    /// Whether the dealer stands on soft 17.
    pub stand_on_soft_17: bool,
    /// Multiple of the stake credited when the side bet reaches its target.
    pub side_bet_multiplier: u64,
    /// Balance used when the store holds no value yet.
    pub starting_balance: u64,
    /// Key under which the balance is persisted.
    pub balance_key: String,
    /// Display lifetime for notices; `None` leaves it to the sink.
    pub notice_ttl_ms: Option<u32>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 6,
            penetration: 0.25,
            blackjack_pays: 1.5,
            rounding_blackjack: RoundingMode::Nearest,
            stand_on_soft_17: true,
            side_bet_multiplier: 2,
            starting_balance: 100,
            balance_key: String::from("player_balance_v1"),
            notice_ttl_ms: None,
        }
    }
}

impl GameOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use sidejack::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(1);
    /// assert_eq!(options.decks, 1);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the remaining-shoe fraction that forces a reshuffle.
    ///
    /// # Example
    ///
    /// ```
    /// use sidejack::GameOptions;
    ///
    /// let options = GameOptions::default().with_penetration(0.5);
    /// assert_eq!(options.penetration, 0.5);
    /// ```
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    /// Sets the blackjack payout ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use sidejack::GameOptions;
    ///
    /// let options = GameOptions::default().with_blackjack_pays(1.2);
    /// assert_eq!(options.blackjack_pays, 1.2);
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    ///
    /// # Example
    ///
    /// ```
    /// use sidejack::{GameOptions, RoundingMode};
    ///
    /// let options = GameOptions::default().with_rounding_blackjack(RoundingMode::Down);
    /// assert_eq!(options.rounding_blackjack, RoundingMode::Down);
    /// ```
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets whether the dealer stands on soft 17.
    ///
    /// # Example
    ///
    /// ```
    /// use sidejack::GameOptions;
    ///
    /// let options = GameOptions::default().with_stand_on_soft_17(false);
    /// assert!(!options.stand_on_soft_17);
    /// ```
    #[must_use]
    pub const fn with_stand_on_soft_17(mut self, stand: bool) -> Self {
        self.stand_on_soft_17 = stand;
        self
    }

    /// Sets the side bet payout multiple.
    #[must_use]
    pub const fn with_side_bet_multiplier(mut self, multiplier: u64) -> Self {
        self.side_bet_multiplier = multiplier;
        self
    }

    /// Sets the balance used when nothing is stored yet.
    #[must_use]
    pub const fn with_starting_balance(mut self, balance: u64) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Sets the store key for the balance.
    #[must_use]
    pub fn with_balance_key(mut self, key: impl Into<String>) -> Self {
        self.balance_key = key.into();
        self
    }

    /// Sets the display lifetime attached to notices.
    #[must_use]
    pub const fn with_notice_ttl_ms(mut self, ttl_ms: Option<u32>) -> Self {
        self.notice_ttl_ms = ttl_ms;
        self
    }
}
