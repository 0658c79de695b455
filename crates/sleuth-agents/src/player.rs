//! Automated players.
//!
//! A [`Player`] owns its private hand, its [`DetectiveNotebook`], the
//! per-turn [`TurnFlags`], and the lifetime winner / false-accuser flags.
//! Its token is addressed through its character: the board tracks where
//! `Token::Person(character)` is.

use std::collections::BTreeSet;

use sleuth_board::RandomDraw;
use sleuth_types::{AgentId, Card, Person, Room, SolutionCardSet, Token, TurnOption};
use tracing::debug;

use crate::error::AgentError;
use crate::notebook::DetectiveNotebook;

/// Flags reset at the end of every turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnFlags {
    /// The player has moved this turn.
    pub moved: bool,
    /// The player has made a suggestion this turn.
    pub suggested: bool,
    /// Another player's suggestion pulled this player's token into a room
    /// since its last turn.
    pub moved_out_of_turn: bool,
}

/// One automated participant.
#[derive(Debug, Clone)]
pub struct Player {
    id: AgentId,
    name: String,
    character: Person,
    hand: BTreeSet<Card>,
    notebook: DetectiveNotebook,
    flags: TurnFlags,
    false_accuser: bool,
    winner: bool,
}

impl Player {
    /// Create a player with an empty hand.
    pub fn new(name: impl Into<String>, character: Person) -> Self {
        Self {
            id: AgentId::new(),
            name: name.into(),
            character,
            hand: BTreeSet::new(),
            notebook: DetectiveNotebook::new(character),
            flags: TurnFlags::default(),
            false_accuser: false,
            winner: false,
        }
    }

    /// Unique identifier.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The suspect this player moves.
    pub const fn character(&self) -> Person {
        self.character
    }

    /// The player's token on the board.
    pub const fn token(&self) -> Token {
        Token::Person(self.character)
    }

    /// Cards in the player's hand.
    pub const fn hand(&self) -> &BTreeSet<Card> {
        &self.hand
    }

    /// The player's deduction ledger.
    pub const fn notebook(&self) -> &DetectiveNotebook {
        &self.notebook
    }

    /// Mutable access to the deduction ledger.
    pub const fn notebook_mut(&mut self) -> &mut DetectiveNotebook {
        &mut self.notebook
    }

    /// Current turn flags.
    pub const fn flags(&self) -> TurnFlags {
        self.flags
    }

    /// Whether the player has made a false accusation.
    pub const fn is_false_accuser(&self) -> bool {
        self.false_accuser
    }

    /// Whether the player has won.
    pub const fn is_winner(&self) -> bool {
        self.winner
    }

    // ----- State transitions -----

    /// Take a dealt card into hand and note it in the ledger.
    pub fn accept_card(&mut self, card: Card) {
        self.hand.insert(card);
        self.notebook.record_owned_card(card);
    }

    /// Mark that the player moved this turn.
    pub const fn mark_moved(&mut self) {
        self.flags.moved = true;
    }

    /// Mark that the player suggested this turn.
    pub const fn mark_suggested(&mut self) {
        self.flags.suggested = true;
    }

    /// Mark that another player's suggestion pulled this token.
    pub const fn mark_moved_out_of_turn(&mut self) {
        self.flags.moved_out_of_turn = true;
    }

    /// Reset the per-turn flags after the player's turn.
    pub fn clear_turn_flags(&mut self) {
        self.flags = TurnFlags::default();
    }

    /// Permanently bar the player from taking turns.
    pub const fn mark_false_accuser(&mut self) {
        self.false_accuser = true;
    }

    /// Mark the player as the winner.
    pub const fn mark_winner(&mut self) {
        self.winner = true;
    }

    // ----- Decisions -----

    /// Cards in hand that match any component of `suggestion`, in card
    /// order.
    pub fn counter_evidence_for(&self, suggestion: SolutionCardSet) -> Vec<Card> {
        self.hand
            .iter()
            .copied()
            .filter(|c| suggestion.matches(*c))
            .collect()
    }

    /// Answer another player's suggestion.
    ///
    /// Returns the card shown, or `None` if the hand holds no match. A shown
    /// card is recorded as shown to the suggester.
    ///
    /// # Errors
    ///
    /// Returns an [`AgentError`] if the card choice or bookkeeping fails.
    pub fn respond_to_suggestion(
        &mut self,
        suggestion: SolutionCardSet,
        suggester: Person,
        draw: &mut dyn RandomDraw,
    ) -> Result<Option<Card>, AgentError> {
        let candidates = self.counter_evidence_for(suggestion);
        if candidates.is_empty() {
            return Ok(None);
        }
        let card = self.notebook.decide_card_to_show(&candidates, draw)?;
        self.notebook.record_shown_to(card, suggester)?;
        debug!(
            player = %self.name,
            suggester = %suggester,
            card = %card,
            candidates = candidates.len(),
            "Counter-evidence chosen"
        );
        Ok(Some(card))
    }

    /// Build a suggestion naming the ledger's chosen suspect and weapon in
    /// `room`.
    ///
    /// # Errors
    ///
    /// Returns an [`AgentError`] if the ledger cannot choose.
    pub fn build_suggestion(&self, room: Room) -> Result<SolutionCardSet, AgentError> {
        Ok(SolutionCardSet::new(
            self.notebook.choose_person_for_suggestion()?,
            self.notebook.choose_weapon_for_suggestion()?,
            room,
        ))
    }

    /// Pick an action from the legal options, standing in `room`.
    ///
    /// Preference: accuse, then suggest, then move, then do nothing. A
    /// suggestion is only made where the ledger still wants to question
    /// the room; otherwise a summoned player moves on and a player that
    /// moved into the room ends its turn.
    pub fn choose_turn_option(
        &self,
        options: &BTreeSet<TurnOption>,
        room: Option<Room>,
    ) -> TurnOption {
        if options.contains(&TurnOption::MakeAccusation) {
            return TurnOption::MakeAccusation;
        }
        if options.contains(&TurnOption::MakeSuggestion)
            && room.is_some_and(|r| self.notebook.wants_to_question(r))
        {
            return TurnOption::MakeSuggestion;
        }
        if options.contains(&TurnOption::Move) {
            return TurnOption::Move;
        }
        TurnOption::DoNothing
    }
}
