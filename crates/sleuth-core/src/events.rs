//! Game narration as a structured event stream.
//!
//! The turn engine buffers [`GameEvent`]s as it executes actions; the
//! runner drains them, stamps each with a sequence number, round, and UTC
//! timestamp, and hands the resulting [`EventRecord`] to an [`EventSink`].
//! Sinks never influence game decisions.
//!
//! - [`TracingSink`] -- narrates through `tracing`
//! - [`RecordingSink`] -- keeps records in memory
//! - [`JsonLinesSink`] -- one JSON object per line to any writer
//! - [`CompositeSink`] -- fans out to several sinks
//! - [`NoOpSink`] -- discards everything

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sleuth_types::{Card, GameId, LocationId, Person, Room, SolutionCardSet, Token};
use tracing::{debug, info, warn};

/// Something that happened during a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Setup is complete and play is about to begin.
    GameStarted {
        /// The game identifier.
        game_id: GameId,
        /// Characters in seating order.
        seats: Vec<Person>,
    },
    /// A seat's turn began.
    TurnStarted {
        /// Seat index.
        seat: usize,
        /// Player name.
        player: String,
    },
    /// A player moved its token.
    Moved {
        /// Seat index.
        seat: usize,
        /// Location left.
        from: LocationId,
        /// Location entered.
        to: LocationId,
        /// Name of the location entered.
        to_name: String,
    },
    /// A player made a suggestion.
    SuggestionMade {
        /// Seat index of the suggester.
        seat: usize,
        /// The suggested triple.
        suggestion: SolutionCardSet,
    },
    /// A token was pulled into a room by a suggestion.
    TokenSummoned {
        /// The token moved.
        token: Token,
        /// The room it was moved to.
        room: Room,
    },
    /// A seat was asked for counter-evidence.
    PollAnswered {
        /// Seat index of the responder.
        seat: usize,
        /// Responder name.
        player: String,
        /// Whether the responder produced a card.
        refuted: bool,
    },
    /// A suggestion was refuted.
    SuggestionRefuted {
        /// Seat index of the suggester.
        seat: usize,
        /// Seat index of the responder.
        responder: usize,
        /// The card shown to the suggester.
        card: Card,
    },
    /// No seat could refute a suggestion.
    SuggestionUnrefuted {
        /// Seat index of the suggester.
        seat: usize,
    },
    /// A player made an accusation.
    AccusationMade {
        /// Seat index of the accuser.
        seat: usize,
        /// The accused triple.
        accusation: SolutionCardSet,
        /// Whether it matched the case file.
        correct: bool,
    },
    /// A player solved the case.
    GameWon {
        /// Seat index of the winner.
        seat: usize,
        /// Winner name.
        player: String,
        /// The revealed case file.
        case_file: SolutionCardSet,
    },
    /// A seat's turn ended.
    TurnEnded {
        /// Seat index.
        seat: usize,
    },
}

/// A [`GameEvent`] stamped for the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Monotonic sequence number, starting at 0.
    pub seq: u64,
    /// Round in which the event happened (0 for setup).
    pub round: u32,
    /// When the record was stamped.
    pub timestamp: DateTime<Utc>,
    /// The event itself.
    pub event: GameEvent,
}

/// Errors raised by an event sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The underlying writer failed.
    #[error("failed to write event: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The record could not be serialized.
    #[error("failed to serialize event: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Receives stamped game events.
pub trait EventSink {
    /// Handle one record.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] if the record cannot be written.
    fn emit(&mut self, record: &EventRecord) -> Result<(), SinkError>;

    /// Flush buffered output.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] if the flush fails.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Discards every record.
#[derive(Debug, Default)]
pub struct NoOpSink;

impl EventSink for NoOpSink {
    fn emit(&mut self, _record: &EventRecord) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Narrates records through `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, record: &EventRecord) -> Result<(), SinkError> {
        let round = record.round;
        match &record.event {
            GameEvent::GameStarted { game_id, seats } => {
                info!(%game_id, players = seats.len(), "Game started");
            }
            GameEvent::TurnStarted { seat, player } => {
                debug!(round, seat, %player, "Turn started");
            }
            GameEvent::Moved {
                seat, to, to_name, ..
            } => {
                info!(round, seat, location = %to, name = %to_name, "Moved");
            }
            GameEvent::SuggestionMade { seat, suggestion } => {
                info!(round, seat, %suggestion, "Suggestion made");
            }
            GameEvent::TokenSummoned { token, room } => {
                debug!(round, ?token, %room, "Token summoned");
            }
            GameEvent::PollAnswered {
                seat,
                player,
                refuted,
            } => {
                debug!(round, seat, %player, refuted, "Poll answered");
            }
            GameEvent::SuggestionRefuted {
                seat,
                responder,
                card,
            } => {
                info!(round, seat, responder, %card, "Suggestion refuted");
            }
            GameEvent::SuggestionUnrefuted { seat } => {
                info!(round, seat, "Suggestion unrefuted");
            }
            GameEvent::AccusationMade {
                seat,
                accusation,
                correct,
            } => {
                if *correct {
                    info!(round, seat, %accusation, "Accusation made");
                } else {
                    warn!(round, seat, %accusation, "False accusation");
                }
            }
            GameEvent::GameWon {
                seat,
                player,
                case_file,
            } => {
                info!(round, seat, %player, %case_file, "Case solved");
            }
            GameEvent::TurnEnded { seat } => {
                debug!(round, seat, "Turn ended");
            }
        }
        Ok(())
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Vec<EventRecord>,
}

impl RecordingSink {
    /// An empty recorder.
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Records received so far.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Events received so far, without their stamps.
    pub fn events(&self) -> impl Iterator<Item = &GameEvent> {
        self.records.iter().map(|r| &r.event)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, record: &EventRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// Writes one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn emit(&mut self, record: &EventRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Forwards every record to each inner sink in order.
#[derive(Default)]
pub struct CompositeSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl CompositeSink {
    /// A composite with no inner sinks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink.
    #[must_use]
    pub fn with(mut self, sink: Box<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Number of inner sinks.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether there are no inner sinks.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for CompositeSink {
    fn emit(&mut self, record: &EventRecord) -> Result<(), SinkError> {
        for sink in &mut self.sinks {
            sink.emit(record)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use sleuth_types::Weapon;

    use super::*;

    fn record(seq: u64, event: GameEvent) -> EventRecord {
        EventRecord {
            seq,
            round: 1,
            timestamp: Utc::now(),
            event,
        }
    }

    #[test]
    fn event_serializes_with_type_tag() {
        let event = GameEvent::SuggestionUnrefuted { seat: 2 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "suggestion_unrefuted");
        assert_eq!(json["seat"], 2);
    }

    #[test]
    fn json_lines_sink_writes_one_line_per_record() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.emit(&record(0, GameEvent::TurnStarted {
            seat: 0,
            player: "Player 1".to_owned(),
        }))
        .unwrap();
        sink.emit(&record(1, GameEvent::TurnEnded { seat: 0 }))
            .unwrap();
        sink.flush().unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: EventRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.seq, 1);
        assert_eq!(second.event, GameEvent::TurnEnded { seat: 0 });
    }

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        let accusation = SolutionCardSet::new(Person::MrGreen, Weapon::Rope, Room::Hall);
        sink.emit(&record(0, GameEvent::AccusationMade {
            seat: 1,
            accusation,
            correct: false,
        }))
        .unwrap();
        sink.emit(&record(1, GameEvent::TurnEnded { seat: 1 }))
            .unwrap();
        assert_eq!(sink.records().len(), 2);
        assert!(matches!(
            sink.events().next(),
            Some(GameEvent::AccusationMade { correct: false, .. })
        ));
    }

    #[test]
    fn composite_fans_out_and_tracing_sink_accepts_everything() {
        let mut sink = CompositeSink::new()
            .with(Box::new(TracingSink))
            .with(Box::new(NoOpSink));
        assert_eq!(sink.len(), 2);
        sink.emit(&record(0, GameEvent::TokenSummoned {
            token: Token::Weapon(Weapon::Knife),
            room: Room::Kitchen,
        }))
        .unwrap();
        sink.flush().unwrap();
    }
}
