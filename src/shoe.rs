//! The multi-deck shoe and its discard pile.

use alloc::vec::Vec;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{COPIES_PER_FACE, Card, DECK_SIZE};

/// A shuffled multi-deck card supply.
///
/// Cards are drawn from the tail of the live supply and land on the discard
/// pile, so `remaining() + discarded() == total()` holds between reshuffles.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    discard: Vec<Card>,
    decks: u8,
    penetration: f64,
    seed: u64,
    shuffles: u64,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Builds a freshly shuffled shoe.
    ///
    /// `decks` is clamped to at least one. `penetration` is the fraction of
    /// the shoe that must remain; once fewer cards are left the next draw
    /// reshuffles. It is clamped to `0.0..=1.0`, and 0 reshuffles only when
    /// the shoe is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use sidejack::Shoe;
    ///
    /// let shoe = Shoe::new(6, 0.25, 7);
    /// assert_eq!(shoe.remaining(), 312);
    /// assert_eq!(shoe.discarded(), 0);
    /// ```
    #[must_use]
    pub fn new(decks: u8, penetration: f64, seed: u64) -> Self {
        let decks = decks.max(1);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let cards = Self::create_shoe(decks, &mut rng);

        Self {
            cards,
            discard: Vec::new(),
            decks,
            penetration: penetration.clamp(0.0, 1.0),
            seed,
            shuffles: 1,
            rng,
        }
    }

    fn create_shoe(decks: u8, rng: &mut ChaCha8Rng) -> Vec<Card> {
        let mut cards = Vec::with_capacity(decks as usize * DECK_SIZE);

        for _ in 0..decks {
            for face in Card::FACES {
                for _ in 0..COPIES_PER_FACE {
                    cards.push(face);
                }
            }
        }

        cards.shuffle(rng);
        cards
    }

    /// Replaces the live supply with a full freshly shuffled shoe and empties
    /// the discard pile.
    pub fn reshuffle(&mut self) {
        self.cards = Self::create_shoe(self.decks, &mut self.rng);
        self.discard.clear();
        self.shuffles += 1;
        log::info!(
            "shoe reshuffled ({} decks, shuffle #{})",
            self.decks,
            self.shuffles
        );
    }

    /// Returns whether the shoe is empty or below the penetration threshold.
    #[must_use]
    pub fn needs_reshuffle(&self) -> bool {
        if self.cards.is_empty() {
            return true;
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let remaining_ratio = self.cards.len() as f64 / self.total() as f64;

        remaining_ratio < self.penetration
    }

    /// Reshuffles if needed. Returns `true` if a reshuffle was performed.
    pub fn ensure_fresh(&mut self) -> bool {
        if self.needs_reshuffle() {
            self.reshuffle();
            true
        } else {
            false
        }
    }

    /// Draws one card, reshuffling first if the shoe is depleted.
    ///
    /// The drawn card is also recorded on the discard pile.
    #[expect(
        clippy::missing_panics_doc,
        reason = "a reshuffled shoe holds at least one deck"
    )]
    pub fn draw(&mut self) -> Card {
        self.ensure_fresh();
        let card = self
            .cards
            .pop()
            .expect("ensure_fresh leaves at least one card in the shoe");
        self.discard.push(card);
        card
    }

    /// Moves `draws` to the draw end of the live supply so that the next
    /// draws yield them in order.
    ///
    /// The cards are taken out of the live supply, so the shoe still holds
    /// the same multiset of cards. Returns `false` and leaves the shoe
    /// untouched if the supply does not hold every requested card.
    pub fn stack(&mut self, draws: &[Card]) -> bool {
        let mut live = self.cards.clone();

        for card in draws {
            let Some(position) = live.iter().rposition(|c| c == card) else {
                return false;
            };
            live.remove(position);
        }

        live.extend(draws.iter().rev());
        self.cards = live;
        true
    }

    /// Returns the live cards, next draw last.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the discard pile, oldest first.
    #[must_use]
    pub fn discard(&self) -> &[Card] {
        &self.discard
    }

    /// Returns the number of cards left to draw.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Returns the number of cards on the discard pile.
    #[must_use]
    pub fn discarded(&self) -> usize {
        self.discard.len()
    }

    /// Returns the size of a full shoe.
    #[must_use]
    pub fn total(&self) -> usize {
        self.decks as usize * DECK_SIZE
    }

    /// Returns the number of decks.
    #[must_use]
    pub const fn decks(&self) -> u8 {
        self.decks
    }

    /// Returns the seed the shoe's generator was built from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns how many times the shoe has been shuffled, counting the first.
    #[must_use]
    pub const fn shuffles(&self) -> u64 {
        self.shuffles
    }
}
