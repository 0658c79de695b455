//! The turn engine.
//!
//! A [`Game`] owns the board, the seated players, the sealed case file,
//! and the injected [`RandomDraw`]. Each seat's turn is a small state
//! machine: the legal [`TurnOption`]s are recomputed after every executed
//! action until none remain or the player chooses to do nothing.
//!
//! | Precondition | Option |
//! |---|---|
//! | winner or false accuser | none |
//! | not moved, not suggested, a move exists | `Move` |
//! | pulled into this room since last turn, not moved, not suggested | `MakeSuggestion` |
//! | moved, standing in a room, not suggested | `MakeSuggestion` |
//! | ledger ready | `MakeAccusation` |
//!
//! Game events are buffered and drained by the runner.

use std::collections::BTreeSet;

use sleuth_agents::{CardDeck, Player};
use sleuth_board::{Board, RandomDraw, choose_uniformly};
use sleuth_types::{Card, GameId, Person, SolutionCardSet, Token, TurnOption};
use tracing::{debug, info, warn};

use crate::error::GameError;
use crate::events::GameEvent;

/// A game in progress.
pub struct Game {
    id: GameId,
    board: Board,
    players: Vec<Player>,
    case_file: SolutionCardSet,
    draw: Box<dyn RandomDraw>,
    false_accusations: u32,
    events: Vec<GameEvent>,
}

impl Game {
    // ----- Setup -----

    /// Seal a random case file, deal the rest round-robin, and place the
    /// weapons.
    ///
    /// # Errors
    ///
    /// - [`GameError::NoPlayers`] for an empty roster
    /// - [`GameError::DuplicateCharacter`] if a character is seated twice
    pub fn new(players: Vec<Player>, mut draw: Box<dyn RandomDraw>) -> Result<Self, GameError> {
        check_roster(&players)?;
        let mut deck = CardDeck::new();
        let case_file = deck.choose_case_file(draw.as_mut())?;
        Self::deal_and_seat(players, deck, case_file, draw)
    }

    /// Like [`Game::new`], but with a known case file.
    ///
    /// # Errors
    ///
    /// As [`Game::new`].
    pub fn with_case_file(
        players: Vec<Player>,
        case_file: SolutionCardSet,
        draw: Box<dyn RandomDraw>,
    ) -> Result<Self, GameError> {
        check_roster(&players)?;
        let mut deck = CardDeck::new();
        deck.set_case_file(case_file)?;
        Self::deal_and_seat(players, deck, case_file, draw)
    }

    /// Seat players whose hands are already dealt.
    ///
    /// # Errors
    ///
    /// As [`Game::new`], plus [`GameError::CaseFileCardDealt`] if a hand
    /// holds a case-file card and [`GameError::CardDealtTwice`] if two
    /// hands share a card.
    pub fn from_dealt(
        players: Vec<Player>,
        case_file: SolutionCardSet,
        draw: Box<dyn RandomDraw>,
    ) -> Result<Self, GameError> {
        check_roster(&players)?;
        for card in case_file.cards() {
            if players.iter().any(|p| p.hand().contains(&card)) {
                return Err(GameError::CaseFileCardDealt(card));
            }
        }
        let mut dealt = BTreeSet::new();
        for card in players.iter().flat_map(|p| p.hand().iter().copied()) {
            if !dealt.insert(card) {
                return Err(GameError::CardDealtTwice(card));
            }
        }
        Self::seat(players, case_file, draw)
    }

    fn deal_and_seat(
        mut players: Vec<Player>,
        mut deck: CardDeck,
        case_file: SolutionCardSet,
        mut draw: Box<dyn RandomDraw>,
    ) -> Result<Self, GameError> {
        let hands = deck.deal_round_robin(players.len(), draw.as_mut())?;
        for (player, hand) in players.iter_mut().zip(hands) {
            for card in hand {
                player.accept_card(card);
            }
        }
        Self::seat(players, case_file, draw)
    }

    fn seat(
        players: Vec<Player>,
        case_file: SolutionCardSet,
        mut draw: Box<dyn RandomDraw>,
    ) -> Result<Self, GameError> {
        let mut board = Board::new()?;
        board.distribute_weapons(draw.as_mut())?;

        let id = GameId::new();
        let seats: Vec<Person> = players.iter().map(Player::character).collect();
        info!(game_id = %id, players = seats.len(), "Game set up");

        Ok(Self {
            id,
            board,
            players,
            case_file,
            draw,
            false_accusations: 0,
            events: vec![GameEvent::GameStarted { game_id: id, seats }],
        })
    }

    // ----- Lookup -----

    /// Game identifier.
    pub const fn id(&self) -> GameId {
        self.id
    }

    /// The board.
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access, for scripted positions.
    pub const fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Players in seating order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of seats.
    pub fn seat_count(&self) -> usize {
        self.players.len()
    }

    /// The player at `seat`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SeatOutOfRange`] for an unknown seat.
    pub fn player(&self, seat: usize) -> Result<&Player, GameError> {
        self.players.get(seat).ok_or(GameError::SeatOutOfRange {
            seat,
            seats: self.players.len(),
        })
    }

    /// Mutable access to the player at `seat`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SeatOutOfRange`] for an unknown seat.
    pub fn player_mut(&mut self, seat: usize) -> Result<&mut Player, GameError> {
        let seats = self.players.len();
        self.players
            .get_mut(seat)
            .ok_or(GameError::SeatOutOfRange { seat, seats })
    }

    /// The sealed case file.
    pub const fn case_file(&self) -> SolutionCardSet {
        self.case_file
    }

    /// How many false accusations have been made.
    pub const fn false_accusations(&self) -> u32 {
        self.false_accusations
    }

    /// Seat of the winner, if any.
    pub fn winner(&self) -> Option<usize> {
        self.players.iter().position(Player::is_winner)
    }

    /// Whether every player has made a false accusation.
    pub fn all_false_accusers(&self) -> bool {
        self.players.iter().all(Player::is_false_accuser)
    }

    /// Take the buffered events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ----- Turn state machine -----

    /// Options currently legal for `seat`.
    ///
    /// # Errors
    ///
    /// Returns a [`GameError`] for an unknown seat or a board lookup failure.
    pub fn turn_options(&self, seat: usize) -> Result<BTreeSet<TurnOption>, GameError> {
        let player = self.player(seat)?;
        let mut options = BTreeSet::new();
        if player.is_winner() || player.is_false_accuser() {
            return Ok(options);
        }

        let flags = player.flags();
        let here = self.board.location_of(player.token())?;
        let in_room = self.board.location(here)?.is_room();

        if !flags.moved && !flags.suggested && !self.board.move_options(here)?.is_empty() {
            options.insert(TurnOption::Move);
        }
        if !flags.suggested && in_room && (flags.moved || flags.moved_out_of_turn) {
            options.insert(TurnOption::MakeSuggestion);
        }
        if player.notebook().is_ready_for_accusation() {
            options.insert(TurnOption::MakeAccusation);
        }
        Ok(options)
    }

    /// Execute one action for `seat`.
    ///
    /// [`TurnOption::DoNothing`] is always accepted and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IllegalAction`] if the option is not currently
    /// legal, or the error raised while executing it.
    pub fn execute_action(&mut self, seat: usize, option: TurnOption) -> Result<(), GameError> {
        if option == TurnOption::DoNothing {
            return Ok(());
        }
        if !self.turn_options(seat)?.contains(&option) {
            return Err(GameError::IllegalAction { seat, option });
        }
        match option {
            TurnOption::DoNothing => Ok(()),
            TurnOption::Move => self.execute_move(seat),
            TurnOption::MakeSuggestion => self.execute_suggestion(seat),
            TurnOption::MakeAccusation => self.execute_accusation(seat),
        }
    }

    /// Play a whole turn for `seat` with the player's own choice policy.
    ///
    /// Winners and false accusers are skipped.
    ///
    /// # Errors
    ///
    /// Returns the first [`GameError`] raised by an action.
    pub fn execute_turn(&mut self, seat: usize) -> Result<(), GameError> {
        let player = self.player(seat)?;
        if player.is_winner() || player.is_false_accuser() {
            debug!(seat, player = %player.name(), "Turn skipped");
            return Ok(());
        }
        let name = player.name().to_owned();
        self.events.push(GameEvent::TurnStarted { seat, player: name });

        loop {
            let options = self.turn_options(seat)?;
            if options.is_empty() {
                break;
            }
            let player = self.player(seat)?;
            let room = self.board.room_of(player.token())?;
            let choice = player.choose_turn_option(&options, room);
            if choice == TurnOption::DoNothing {
                break;
            }
            self.execute_action(seat, choice)?;
        }

        self.player_mut(seat)?.clear_turn_flags();
        self.events.push(GameEvent::TurnEnded { seat });
        Ok(())
    }

    // ----- Actions -----

    fn execute_move(&mut self, seat: usize) -> Result<(), GameError> {
        let player = self.player(seat)?;
        let token = player.token();
        let here = self.board.location_of(token)?;
        let options = self.board.move_options(here)?;
        let narrowed = player
            .notebook()
            .narrow_move_options(&self.board, here, &options)?;
        let destination = choose_uniformly(self.draw.as_mut(), &narrowed)?;

        self.board.place_token(token, destination)?;
        self.player_mut(seat)?.mark_moved();

        let to_name = self.board.location(destination)?.name.clone();
        debug!(seat, from = %here, to = %destination, name = %to_name, "Player moved");
        self.events.push(GameEvent::Moved {
            seat,
            from: here,
            to: destination,
            to_name,
        });
        Ok(())
    }

    fn execute_suggestion(&mut self, seat: usize) -> Result<(), GameError> {
        let player = self.player(seat)?;
        let suggester = player.character();
        let room = self
            .board
            .room_of(player.token())?
            .ok_or(GameError::NotInRoom { seat })?;
        let suggestion = player.build_suggestion(room)?;
        self.events.push(GameEvent::SuggestionMade { seat, suggestion });

        // The named tokens move whether or not the suggestion is refuted.
        for token in [
            Token::Person(suggestion.person),
            Token::Weapon(suggestion.weapon),
        ] {
            if !self.board.relocate_to_room(token, room)? {
                continue;
            }
            self.events.push(GameEvent::TokenSummoned { token, room });
            if let Token::Person(person) = token {
                if let Some(summoned) = self
                    .players
                    .iter_mut()
                    .find(|p| p.character() == person && person != suggester)
                {
                    summoned.mark_moved_out_of_turn();
                }
            }
        }
        self.player_mut(seat)?.notebook_mut().note_room_questioned(room);

        let refutation = self.poll_for_counter_evidence(seat, suggester, suggestion)?;

        let player = self.player_mut(seat)?;
        match refutation {
            Some((responder, shown_by, card)) => {
                player.notebook_mut().record_shown_card(card, shown_by);
                self.events.push(GameEvent::SuggestionRefuted {
                    seat,
                    responder,
                    card,
                });
            }
            None => {
                let unheld: Vec<Card> = suggestion
                    .cards()
                    .into_iter()
                    .filter(|c| !player.hand().contains(c))
                    .collect();
                for card in unheld {
                    player.notebook_mut().record_no_counter_evidence(card);
                }
                info!(seat, %suggestion, "Nobody could refute");
                self.events.push(GameEvent::SuggestionUnrefuted { seat });
            }
        }
        self.player_mut(seat)?.mark_suggested();
        Ok(())
    }

    /// Ask seats after `seat`, in order and wrapping, for a matching card.
    /// Stops at the first seat that shows one.
    fn poll_for_counter_evidence(
        &mut self,
        seat: usize,
        suggester: Person,
        suggestion: SolutionCardSet,
    ) -> Result<Option<(usize, Person, Card)>, GameError> {
        let seats = self.players.len();
        let order = (0..seats)
            .cycle()
            .skip(seat.saturating_add(1))
            .take(seats.saturating_sub(1));

        for responder_seat in order {
            let responder = self
                .players
                .get_mut(responder_seat)
                .ok_or(GameError::SeatOutOfRange {
                    seat: responder_seat,
                    seats,
                })?;
            let shown =
                responder.respond_to_suggestion(suggestion, suggester, self.draw.as_mut())?;
            self.events.push(GameEvent::PollAnswered {
                seat: responder_seat,
                player: responder.name().to_owned(),
                refuted: shown.is_some(),
            });
            if let Some(card) = shown {
                return Ok(Some((responder_seat, responder.character(), card)));
            }
        }
        Ok(None)
    }

    fn execute_accusation(&mut self, seat: usize) -> Result<(), GameError> {
        let case_file = self.case_file;
        let player = self.player_mut(seat)?;
        let accusation = player.notebook().accusation()?;
        let correct = accusation == case_file;
        let name = player.name().to_owned();

        if correct {
            player.mark_winner();
            info!(seat, player = %name, %accusation, "Correct accusation");
        } else {
            player.mark_false_accuser();
            warn!(seat, player = %name, %accusation, "False accusation");
        }
        self.events.push(GameEvent::AccusationMade {
            seat,
            accusation,
            correct,
        });

        if correct {
            self.events.push(GameEvent::GameWon {
                seat,
                player: name,
                case_file,
            });
        } else {
            self.false_accusations = self.false_accusations.saturating_add(1);
        }
        Ok(())
    }
}

fn check_roster(players: &[Player]) -> Result<(), GameError> {
    if players.is_empty() {
        return Err(GameError::NoPlayers);
    }
    let mut seen = BTreeSet::new();
    for player in players {
        if !seen.insert(player.character()) {
            return Err(GameError::DuplicateCharacter(player.character()));
        }
    }
    Ok(())
}
