//! Table state, bets and wagers.

/// Round state.
///
/// A round runs `Idle -> BetPlaced -> PlayerTurn -> DealerTurn -> Resolved`
/// and `next_hand` (or the next bet) returns the table to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// No round in progress; a bet may be placed.
    Idle,
    /// The stake has been taken and the deal is about to start.
    BetPlaced,
    /// Waiting for the player to hit or stand.
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Round has ended and been settled; cards stay on the table.
    Resolved,
}

impl GameState {
    /// Returns whether a round is being played.
    #[must_use]
    pub const fn in_round(self) -> bool {
        matches!(self, Self::BetPlaced | Self::PlayerTurn | Self::DealerTurn)
    }
}

/// A placed bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bet {
    /// Serial number, unique per table.
    pub id: u64,
    /// Stake, debited at placement.
    pub amount: u64,
    /// Arcade score that wins the side bet.
    pub target: u64,
    /// Arcade score when the bet was placed.
    pub placed_at_marker: u64,
    /// Whether the bet is still waiting for a settlement.
    pub active: bool,
}

/// A normalised bet request.
///
/// Amounts and targets below 1 are raised to 1 instead of being refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wager {
    /// Stake.
    pub amount: u64,
    /// Side bet target score.
    pub target: u64,
    /// Whether either input had to be raised to the minimum.
    pub adjusted: bool,
}

impl Wager {
    /// Lowest accepted stake and target.
    pub const MIN: u64 = 1;

    /// Builds a wager, clamping both values to at least [`Wager::MIN`].
    ///
    /// # Example
    ///
    /// ```
    /// use sidejack::Wager;
    ///
    /// let wager = Wager::new(-3, 10);
    /// assert_eq!(wager.amount, 1);
    /// assert!(wager.adjusted);
    /// ```
    #[must_use]
    pub const fn new(amount: i64, target: i64) -> Self {
        let adjusted = amount < Self::MIN as i64 || target < Self::MIN as i64;
        Self {
            amount: clamp_min(amount),
            target: clamp_min(target),
            adjusted,
        }
    }

    /// Builds a wager from raw form input.
    ///
    /// Non-numeric input counts as 0 and fractions are truncated, so both
    /// end up clamped to the minimum.
    ///
    /// # Example
    ///
    /// ```
    /// use sidejack::Wager;
    ///
    /// let wager = Wager::parse("25", "abc");
    /// assert_eq!((wager.amount, wager.target), (25, 1));
    /// ```
    #[must_use]
    pub fn parse(amount: &str, target: &str) -> Self {
        let (amount, amount_clean) = parse_field(amount);
        let (target, target_clean) = parse_field(target);
        let mut wager = Self::new(amount, target);
        wager.adjusted |= !(amount_clean && target_clean);
        if wager.adjusted {
            log::debug!("wager input adjusted to {} / {}", wager.amount, wager.target);
        }
        wager
    }
}

impl Default for Wager {
    fn default() -> Self {
        Self {
            amount: 5,
            target: 10,
            adjusted: false,
        }
    }
}

const fn clamp_min(value: i64) -> u64 {
    if value < Wager::MIN as i64 {
        Wager::MIN
    } else {
        value as u64
    }
}

fn parse_field(raw: &str) -> (i64, bool) {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return (value, true);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => (value as i64, false),
        _ => (0, false),
    }
}
