//! Game loop runner.
//!
//! [`run_game`] plays rounds of seat-ordered turns until a termination
//! condition is met:
//!
//! - **Winner**: a player made a correct accusation
//! - **All false accusers**: nobody is left to take a turn
//! - **Round cap**: `max_rounds` rounds have been played
//!
//! After every turn the game's buffered events are stamped and handed to
//! the [`EventSink`]; after every round the board's occupancy invariants
//! are checked.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sleuth_board::BoardError;
use tracing::{info, warn};

use crate::error::GameError;
use crate::events::{EventRecord, EventSink, SinkError};
use crate::game::Game;

/// Errors that can occur during a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A turn failed.
    #[error("game error: {source}")]
    Game {
        /// The underlying game error.
        #[from]
        source: GameError,
    },

    /// The end-of-round occupancy check failed.
    #[error("board invariant violated: {source}")]
    Board {
        /// The underlying board error.
        #[from]
        source: BoardError,
    },

    /// The event sink failed.
    #[error("event sink error: {source}")]
    Sink {
        /// The underlying sink error.
        #[from]
        source: SinkError,
    },
}

/// Why a game stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum GameEndReason {
    /// A player solved the case.
    Winner {
        /// Seat of the winner.
        seat: usize,
        /// Winner name.
        player: String,
    },
    /// Every player made a false accusation.
    AllFalseAccusers,
    /// The round cap was reached.
    MaxRoundsReached,
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Why the game stopped.
    pub end_reason: GameEndReason,
    /// Rounds started, including a final partial one.
    pub rounds_played: u32,
    /// False accusations made.
    pub false_accusations: u32,
}

/// Stamps drained events with sequence numbers.
struct Publisher<'a> {
    sink: &'a mut dyn EventSink,
    next_seq: u64,
}

impl Publisher<'_> {
    fn publish(&mut self, game: &mut Game, round: u32) -> Result<(), SinkError> {
        for event in game.drain_events() {
            let record = EventRecord {
                seq: self.next_seq,
                round,
                timestamp: Utc::now(),
                event,
            };
            self.sink.emit(&record)?;
            self.next_seq = self.next_seq.saturating_add(1);
        }
        Ok(())
    }
}

/// Play until a winner, universal false accusation, or the round cap.
///
/// # Errors
///
/// Returns [`RunnerError`] if a turn, the occupancy check, or the sink
/// fails.
pub fn run_game(
    game: &mut Game,
    max_rounds: u32,
    sink: &mut dyn EventSink,
) -> Result<GameResult, RunnerError> {
    info!(
        game_id = %game.id(),
        players = game.seat_count(),
        max_rounds,
        "Game starting"
    );

    let mut publisher = Publisher { sink, next_seq: 0 };
    publisher.publish(game, 0)?;

    let mut rounds_played: u32 = 0;
    let end_reason = loop {
        if let Some(reason) = end_condition(game) {
            break reason;
        }
        if rounds_played >= max_rounds {
            info!(rounds_played, max_rounds, "Round cap reached");
            break GameEndReason::MaxRoundsReached;
        }

        rounds_played = rounds_played.saturating_add(1);
        for seat in 0..game.seat_count() {
            game.execute_turn(seat)?;
            publisher.publish(game, rounds_played)?;
            if game.winner().is_some() {
                break;
            }
        }
        game.board().verify_occupancy()?;
    };

    publisher.sink.flush()?;
    Ok(GameResult {
        end_reason,
        rounds_played,
        false_accusations: game.false_accusations(),
    })
}

fn end_condition(game: &Game) -> Option<GameEndReason> {
    if let Some(seat) = game.winner() {
        let player = game
            .players()
            .get(seat)
            .map(|p| p.name().to_owned())
            .unwrap_or_default();
        return Some(GameEndReason::Winner { seat, player });
    }
    if game.all_false_accusers() {
        warn!("Every player has made a false accusation");
        return Some(GameEndReason::AllFalseAccusers);
    }
    None
}

/// Log the outcome of a run.
pub fn log_game_end(result: &GameResult) {
    info!(
        reason = ?result.end_reason,
        rounds_played = result.rounds_played,
        false_accusations = result.false_accusations,
        "Game ended"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use sleuth_agents::Player;
    use sleuth_board::MidpointDraw;
    use sleuth_types::{Person, Room, SolutionCardSet, Weapon};

    use super::*;
    use crate::events::{GameEvent, RecordingSink};

    fn lone_player_game() -> Game {
        let case_file = SolutionCardSet::new(Person::MrGreen, Weapon::Rope, Room::Hall);
        let players = vec![Player::new("Solo", Person::MrsPeacock)];
        Game::with_case_file(players, case_file, Box::new(MidpointDraw)).unwrap()
    }

    #[test]
    fn zero_round_cap_stops_before_any_turn() {
        let mut game = lone_player_game();
        let mut sink = RecordingSink::new();
        let result = run_game(&mut game, 0, &mut sink).unwrap();
        assert_eq!(result.end_reason, GameEndReason::MaxRoundsReached);
        assert_eq!(result.rounds_played, 0);
        assert_eq!(sink.records().len(), 1);
        assert!(matches!(
            sink.records()[0].event,
            GameEvent::GameStarted { .. }
        ));
    }

    #[test]
    fn lone_player_holding_everything_else_solves_the_case() {
        let mut game = lone_player_game();
        // 18 cards in hand: the ledger already points at the case file.
        assert!(game.player(0).unwrap().notebook().is_ready_for_accusation());
        let mut sink = RecordingSink::new();
        let result = run_game(&mut game, 5, &mut sink).unwrap();
        assert_eq!(
            result.end_reason,
            GameEndReason::Winner {
                seat: 0,
                player: "Solo".to_owned()
            }
        );
        assert_eq!(result.rounds_played, 1);
        assert_eq!(result.false_accusations, 0);

        let seqs: Vec<u64> = sink.records().iter().map(|r| r.seq).collect();
        let expected: Vec<u64> = (0_u64..).take(seqs.len()).collect();
        assert_eq!(seqs, expected);
        assert!(sink
            .events()
            .any(|e| matches!(e, GameEvent::GameWon { seat: 0, .. })));
        log_game_end(&result);
    }
}
