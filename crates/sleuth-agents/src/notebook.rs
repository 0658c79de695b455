//! Per-agent deduction ledger.
//!
//! A [`DetectiveNotebook`] records which cards an agent has seen and who
//! holds them, infers solution components, and drives the agent's
//! automated choices.
//!
//! # Deduction
//!
//! - **Elimination**: when the known cards of a category reach
//!   `category size - 1`, the single unaccounted identifier is the
//!   suspected component. This fires once, on the entry that reaches the
//!   threshold, so later entries never re-derive a different answer.
//! - **Direct inference**: an unrefuted suggestion proves that each
//!   suggested card missing from the suggester's own hand is in the case
//!   file.
//!
//! # Move preference
//!
//! Candidate next steps are scored by the hop count of the best route
//! through them to the nearest target room. Targets depend on the
//! [`PreferenceMode`]: rooms still needing questioning, or (once a room is
//! suspected) rooms held in hand plus the suspected room.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use sleuth_board::{Board, REENTRY_HOPS, RandomDraw, choose_uniformly};
use sleuth_types::{Card, CardKind, LocationId, Person, Room, SolutionCardSet, Weapon};
use tracing::debug;

use crate::error::AgentError;

/// What the notebook knows about one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookEntry {
    /// The player whose hand holds the card.
    pub owner: Person,
    /// Opponents this notebook's owner has shown the card to.
    pub shown_to: BTreeSet<Person>,
}

/// Which rooms the movement heuristic steers toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceMode {
    /// Nearest room not yet questioned or accounted for.
    NeedsQuestioning,
    /// Nearest room held in hand or suspected to be in the case file.
    SuspectedOrInHand,
}

/// One agent's belief state about the 21-card universe.
#[derive(Debug, Clone)]
pub struct DetectiveNotebook {
    owner: Person,
    entries: BTreeMap<Card, NotebookEntry>,
    suspected_person: Option<Person>,
    suspected_weapon: Option<Weapon>,
    suspected_room: Option<Room>,
    rooms_in_hand: BTreeSet<Room>,
    rooms_needing_questioning: BTreeSet<Room>,
}

impl DetectiveNotebook {
    /// Create an empty notebook for the player using `owner`'s token.
    pub fn new(owner: Person) -> Self {
        Self {
            owner,
            entries: BTreeMap::new(),
            suspected_person: None,
            suspected_weapon: None,
            suspected_room: None,
            rooms_in_hand: BTreeSet::new(),
            rooms_needing_questioning: Room::ALL.into_iter().collect(),
        }
    }

    // ----- Queries -----

    /// The character whose notebook this is.
    pub const fn owner(&self) -> Person {
        self.owner
    }

    /// The entry for a card, if the card has been seen.
    pub fn entry(&self, card: Card) -> Option<&NotebookEntry> {
        self.entries.get(&card)
    }

    /// Whether the card has been seen in some hand.
    pub fn is_known(&self, card: Card) -> bool {
        self.entries.contains_key(&card)
    }

    /// Number of known cards in a category.
    pub fn known_count(&self, kind: CardKind) -> usize {
        self.entries.keys().filter(|c| c.kind() == kind).count()
    }

    /// The suspect believed to be in the case file.
    pub const fn suspected_person(&self) -> Option<Person> {
        self.suspected_person
    }

    /// The weapon believed to be in the case file.
    pub const fn suspected_weapon(&self) -> Option<Weapon> {
        self.suspected_weapon
    }

    /// The room believed to be in the case file.
    pub const fn suspected_room(&self) -> Option<Room> {
        self.suspected_room
    }

    /// Room cards in the owner's hand.
    pub const fn rooms_in_hand(&self) -> &BTreeSet<Room> {
        &self.rooms_in_hand
    }

    /// Rooms the owner still wants to suggest in.
    pub const fn rooms_needing_questioning(&self) -> &BTreeSet<Room> {
        &self.rooms_needing_questioning
    }

    /// Whether the opponent has been shown this card.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::EntryNotFound`] if the card is unknown.
    pub fn has_shown_to(&self, card: Card, opponent: Person) -> Result<bool, AgentError> {
        self.entries
            .get(&card)
            .map(|e| e.shown_to.contains(&opponent))
            .ok_or(AgentError::EntryNotFound(card))
    }

    /// Whether any opponent has been shown this card.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::EntryNotFound`] if the card is unknown.
    pub fn has_shown_to_anyone(&self, card: Card) -> Result<bool, AgentError> {
        self.entries
            .get(&card)
            .map(|e| !e.shown_to.is_empty())
            .ok_or(AgentError::EntryNotFound(card))
    }

    /// Whether all three solution components are suspected.
    pub const fn is_ready_for_accusation(&self) -> bool {
        self.suspected_person.is_some()
            && self.suspected_weapon.is_some()
            && self.suspected_room.is_some()
    }

    /// The accusation built from the three suspected components.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NotReadyForAccusation`] if any is missing.
    pub fn accusation(&self) -> Result<SolutionCardSet, AgentError> {
        match (
            self.suspected_person,
            self.suspected_weapon,
            self.suspected_room,
        ) {
            (Some(person), Some(weapon), Some(room)) => {
                Ok(SolutionCardSet::new(person, weapon, room))
            }
            _ => Err(AgentError::NotReadyForAccusation),
        }
    }

    // ----- Evidence -----

    /// Record a card dealt into the owner's hand.
    pub fn record_owned_card(&mut self, card: Card) {
        if let Card::Room(room) = card {
            self.rooms_in_hand.insert(room);
        }
        if !self.entries.contains_key(&card) {
            self.add_entry(card, self.owner);
        }
    }

    /// Record a card an opponent showed as counter-evidence.
    ///
    /// Entries are never reassigned: a card already known is left alone.
    pub fn record_shown_card(&mut self, card: Card, shown_by: Person) {
        if !self.entries.contains_key(&card) {
            self.add_entry(card, shown_by);
        }
    }

    /// Record that nobody could refute a suggested card, which places the
    /// card in the case file.
    pub fn record_no_counter_evidence(&mut self, card: Card) {
        match card {
            Card::Person(p) => self.suspected_person = Some(p),
            Card::Weapon(w) => self.suspected_weapon = Some(w),
            Card::Room(r) => {
                self.suspected_room = Some(r);
                self.rooms_needing_questioning.clear();
            }
        }
        debug!(owner = %self.owner, card = %card, "Inferred from unrefuted suggestion");
    }

    /// Record that the owner showed one of its cards to an opponent.
    ///
    /// # Errors
    ///
    /// - [`AgentError::EntryNotFound`] if the card is unknown
    /// - [`AgentError::CardNotOwned`] if the owner does not hold it
    pub fn record_shown_to(&mut self, card: Card, opponent: Person) -> Result<(), AgentError> {
        let owner = self.owner;
        let entry = self
            .entries
            .get_mut(&card)
            .ok_or(AgentError::EntryNotFound(card))?;
        if entry.owner != owner {
            return Err(AgentError::CardNotOwned {
                card,
                owner: entry.owner,
                claimed: owner,
            });
        }
        entry.shown_to.insert(opponent);
        Ok(())
    }

    /// Note that the owner has suggested in `room`.
    pub fn note_room_questioned(&mut self, room: Room) {
        self.rooms_needing_questioning.remove(&room);
    }

    fn add_entry(&mut self, card: Card, owner: Person) {
        self.entries.insert(
            card,
            NotebookEntry {
                owner,
                shown_to: BTreeSet::new(),
            },
        );
        if let Card::Room(room) = card {
            self.rooms_needing_questioning.remove(&room);
        }

        let kind = card.kind();
        if self.known_count(kind) == kind.size().saturating_sub(1) {
            self.infer_missing(kind);
        }
    }

    /// Mark the single unknown card of a category as suspected.
    fn infer_missing(&mut self, kind: CardKind) {
        let Some(missing) = Card::of_kind(kind)
            .into_iter()
            .find(|c| !self.entries.contains_key(c))
        else {
            return;
        };
        match missing {
            Card::Person(p) => self.suspected_person = Some(p),
            Card::Weapon(w) => self.suspected_weapon = Some(w),
            Card::Room(r) => {
                self.suspected_room = Some(r);
                self.rooms_needing_questioning.clear();
            }
        }
        debug!(owner = %self.owner, card = %missing, "Inferred by elimination");
    }

    // ----- Choices -----

    /// Pick the suspect to name in a suggestion.
    ///
    /// Once a suspect is suspected, a suspect from the owner's own hand is
    /// preferred, falling back to the suspected one. Before that, the first
    /// unknown suspect in enumeration order is named.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::CategoryExhausted`] if every suspect is known
    /// and none is suspected.
    pub fn choose_person_for_suggestion(&self) -> Result<Person, AgentError> {
        let card = self.choose_for_suggestion(
            CardKind::Person,
            self.suspected_person.map(Card::Person),
        )?;
        Ok(Person::try_from(card)?)
    }

    /// Pick the weapon to name in a suggestion.
    ///
    /// Follows the same preference order as
    /// [`DetectiveNotebook::choose_person_for_suggestion`].
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::CategoryExhausted`] if every weapon is known
    /// and none is suspected.
    pub fn choose_weapon_for_suggestion(&self) -> Result<Weapon, AgentError> {
        let card = self.choose_for_suggestion(
            CardKind::Weapon,
            self.suspected_weapon.map(Card::Weapon),
        )?;
        Ok(Weapon::try_from(card)?)
    }

    fn choose_for_suggestion(
        &self,
        kind: CardKind,
        suspected: Option<Card>,
    ) -> Result<Card, AgentError> {
        let candidates = Card::of_kind(kind);
        if let Some(suspected) = suspected {
            let in_hand = candidates
                .iter()
                .copied()
                .find(|c| self.entries.get(c).is_some_and(|e| e.owner == self.owner));
            return Ok(in_hand.unwrap_or(suspected));
        }
        candidates
            .into_iter()
            .find(|c| !self.entries.contains_key(c))
            .ok_or(AgentError::CategoryExhausted(kind))
    }

    /// Pick which matching card to show a suggester.
    ///
    /// A single candidate must be shown; otherwise one is chosen uniformly.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NoCandidates`] if `candidates` is empty.
    pub fn decide_card_to_show(
        &self,
        candidates: &[Card],
        draw: &mut dyn RandomDraw,
    ) -> Result<Card, AgentError> {
        if candidates.is_empty() {
            return Err(AgentError::NoCandidates);
        }
        Ok(choose_uniformly(draw, candidates)?)
    }

    // ----- Movement preference -----

    /// The active preference mode.
    pub const fn preference_mode(&self) -> PreferenceMode {
        if self.suspected_room.is_some() {
            PreferenceMode::SuspectedOrInHand
        } else {
            PreferenceMode::NeedsQuestioning
        }
    }

    /// Rooms the given mode steers toward.
    ///
    /// When no room needs questioning any more but none is suspected yet,
    /// every room without an entry becomes a target, so the agent keeps
    /// visiting rooms that can still teach it something.
    pub fn preference_targets(&self, mode: PreferenceMode) -> BTreeSet<Room> {
        match mode {
            PreferenceMode::SuspectedOrInHand => self
                .rooms_in_hand
                .iter()
                .copied()
                .chain(self.suspected_room)
                .collect(),
            PreferenceMode::NeedsQuestioning if self.rooms_needing_questioning.is_empty() => {
                Room::ALL
                    .into_iter()
                    .filter(|r| !self.entries.contains_key(&Card::Room(*r)))
                    .collect()
            }
            PreferenceMode::NeedsQuestioning => self.rooms_needing_questioning.clone(),
        }
    }

    /// Whether a suggestion in `room` is worth making now: the room still
    /// needs questioning or is a target of the active preference mode.
    ///
    /// Every such suggestion either draws an unseen card or goes
    /// unrefuted, so the ledger gains an entry or a suspicion.
    pub fn wants_to_question(&self, room: Room) -> bool {
        self.rooms_needing_questioning.contains(&room)
            || self.preference_targets(self.preference_mode()).contains(&room)
    }

    /// Hop count of the best route from `origin` through `next` to the
    /// nearest target room.
    ///
    /// Standing in a target room scores [`REENTRY_HOPS`] for leaving and
    /// coming back. Stepping straight into a target room scores 1. Returns
    /// `u32::MAX` when the mode has no targets.
    ///
    /// # Errors
    ///
    /// Returns an [`AgentError::Board`] if a location or chart lookup fails.
    pub fn shortest_path_preference(
        &self,
        board: &Board,
        origin: LocationId,
        next: LocationId,
        mode: PreferenceMode,
    ) -> Result<u32, AgentError> {
        let origin_room = board.location(origin)?.room();
        let next_room = board.location(next)?.room();

        let mut best = u32::MAX;
        for target in self.preference_targets(mode) {
            let score = if origin_room == Some(target) {
                REENTRY_HOPS
            } else if next_room == Some(target) {
                1
            } else {
                board.shortest_step(next, target)?.hops.saturating_add(1)
            };
            best = best.min(score);
        }
        Ok(best)
    }

    /// Keep only the move options with the best preference score.
    ///
    /// All options are kept when none of them has a finite score.
    ///
    /// # Errors
    ///
    /// Returns an [`AgentError::Board`] if a lookup fails.
    pub fn narrow_move_options(
        &self,
        board: &Board,
        origin: LocationId,
        options: &[LocationId],
    ) -> Result<Vec<LocationId>, AgentError> {
        let mode = self.preference_mode();
        let mut scored = Vec::with_capacity(options.len());
        for &next in options {
            scored.push((next, self.shortest_path_preference(board, origin, next, mode)?));
        }

        let best = scored.iter().map(|(_, s)| *s).min().unwrap_or(u32::MAX);
        if best == u32::MAX {
            return Ok(options.to_vec());
        }

        let narrowed: Vec<LocationId> = scored
            .into_iter()
            .filter(|(_, s)| *s == best)
            .map(|(id, _)| id)
            .collect();
        debug!(
            owner = %self.owner,
            mode = ?mode,
            best,
            kept = narrowed.len(),
            offered = options.len(),
            "Move options narrowed"
        );
        Ok(narrowed)
    }
}
