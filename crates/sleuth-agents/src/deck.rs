//! The card deck: case-file selection and dealing.

use std::collections::BTreeSet;

use sleuth_board::{RandomDraw, choose_uniformly};
use sleuth_types::{Card, CardKind, SolutionCardSet};
use tracing::info;

use crate::error::AgentError;

/// The 21 cards, tracking which are still undealt.
#[derive(Debug, Clone)]
pub struct CardDeck {
    undealt: BTreeSet<Card>,
    case_file: Option<SolutionCardSet>,
}

impl Default for CardDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl CardDeck {
    /// A full, undealt deck.
    pub fn new() -> Self {
        Self {
            undealt: Card::full_deck().into_iter().collect(),
            case_file: None,
        }
    }

    /// Cards not yet in the case file or a hand.
    pub const fn undealt(&self) -> &BTreeSet<Card> {
        &self.undealt
    }

    /// The case file, once chosen.
    pub const fn case_file(&self) -> Option<SolutionCardSet> {
        self.case_file
    }

    /// Choose one card of each category for the case file.
    ///
    /// # Errors
    ///
    /// Returns an [`AgentError`] if a category has no undealt card left.
    pub fn choose_case_file(
        &mut self,
        draw: &mut dyn RandomDraw,
    ) -> Result<SolutionCardSet, AgentError> {
        let mut picks = Vec::with_capacity(CardKind::ALL.len());
        for kind in CardKind::ALL {
            let pool: Vec<Card> = self
                .undealt
                .iter()
                .copied()
                .filter(|c| c.kind() == kind)
                .collect();
            let card = choose_uniformly(draw, &pool)?;
            self.undealt.remove(&card);
            picks.push(card);
        }
        let &[person, weapon, room] = picks.as_slice() else {
            return Err(AgentError::NoCandidates);
        };
        let case_file = SolutionCardSet::try_from_cards(person, weapon, room)?;
        self.case_file = Some(case_file);
        info!("Case file sealed");
        Ok(case_file)
    }

    /// Install a known case file.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::CardNotInDeck`] if a component is not undealt.
    pub fn set_case_file(&mut self, case_file: SolutionCardSet) -> Result<(), AgentError> {
        if let Some(card) = case_file
            .cards()
            .into_iter()
            .find(|c| !self.undealt.contains(c))
        {
            return Err(AgentError::CardNotInDeck(card));
        }
        for card in case_file.cards() {
            self.undealt.remove(&card);
        }
        self.case_file = Some(case_file);
        Ok(())
    }

    /// Deal every undealt card, one at a time, to seats `0, 1, ..` in turn.
    ///
    /// Each card is drawn uniformly from the undealt cards. Returns one
    /// hand per seat.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NoSeats`] if `seats` is zero.
    pub fn deal_round_robin(
        &mut self,
        seats: usize,
        draw: &mut dyn RandomDraw,
    ) -> Result<Vec<Vec<Card>>, AgentError> {
        if seats == 0 {
            return Err(AgentError::NoSeats);
        }
        let mut hands = vec![Vec::new(); seats];
        for seat in (0..seats).cycle() {
            if self.undealt.is_empty() {
                break;
            }
            let pool: Vec<Card> = self.undealt.iter().copied().collect();
            let card = choose_uniformly(draw, &pool)?;
            self.undealt.remove(&card);
            if let Some(hand) = hands.get_mut(seat) {
                hand.push(card);
            }
        }
        info!(seats, "Cards dealt");
        Ok(hands)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sleuth_board::{MidpointDraw, SeededDraw};
    use sleuth_types::{ErrorKind, Person, Room, Weapon};

    use super::*;

    #[test]
    fn case_file_takes_one_card_per_category() {
        let mut deck = CardDeck::new();
        let case_file = deck.choose_case_file(&mut SeededDraw::new(3)).unwrap();
        assert_eq!(deck.undealt().len(), 18);
        for card in case_file.cards() {
            assert!(!deck.undealt().contains(&card));
        }
        assert_eq!(deck.case_file(), Some(case_file));
    }

    #[test]
    fn known_case_file_must_be_undealt() {
        let mut deck = CardDeck::new();
        let set = SolutionCardSet::new(Person::MissScarlet, Weapon::Knife, Room::Kitchen);
        deck.set_case_file(set).unwrap();
        let err = deck.set_case_file(set).unwrap_err();
        assert!(matches!(err, AgentError::CardNotInDeck(_)));
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn dealing_is_round_robin_and_exhaustive() {
        let mut deck = CardDeck::new();
        deck.choose_case_file(&mut MidpointDraw).unwrap();
        let hands = deck.deal_round_robin(4, &mut MidpointDraw).unwrap();
        let sizes: Vec<usize> = hands.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![5, 5, 4, 4]);
        assert!(deck.undealt().is_empty());

        let mut all: BTreeSet<Card> = hands.into_iter().flatten().collect();
        all.extend(deck.case_file().unwrap().cards());
        assert_eq!(all.len(), Card::DECK_SIZE);
    }

    #[test]
    fn zero_seats_is_insufficient_data() {
        let mut deck = CardDeck::new();
        let err = deck.deal_round_robin(0, &mut MidpointDraw).unwrap_err();
        assert!(matches!(err, AgentError::NoSeats));
    }
}
