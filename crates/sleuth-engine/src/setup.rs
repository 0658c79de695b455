//! Startup helpers: seating the roster, seeding the draw, and wiring the
//! event sinks.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use sleuth_agents::Player;
use sleuth_board::SeededDraw;
use sleuth_core::config::PlayerConfig;
use sleuth_core::{CompositeSink, JsonLinesSink, TracingSink};
use tracing::info;

use crate::error::EngineError;

/// Create one player per roster entry, in seating order.
pub fn seat_players(roster: &[PlayerConfig]) -> Vec<Player> {
    roster
        .iter()
        .enumerate()
        .map(|(seat, entry)| {
            info!(seat, name = %entry.name, character = %entry.character, "Player seated");
            Player::new(entry.name.clone(), entry.character)
        })
        .collect()
}

/// A draw seeded from the configured seed, or from entropy when none is
/// set. The seed is logged either way so the run can be replayed.
pub fn seeded_draw(seed: Option<u64>) -> SeededDraw {
    let draw = seed.map_or_else(SeededDraw::from_entropy, SeededDraw::new);
    info!(
        seed = draw.seed(),
        configured = seed.is_some(),
        "Random draw seeded"
    );
    draw
}

/// Tracing narration, plus a JSON-lines file when `event_log` is set.
///
/// # Errors
///
/// Returns [`EngineError::EventLog`] if the file cannot be created.
pub fn event_sinks(event_log: Option<&Path>) -> Result<CompositeSink, EngineError> {
    let sinks = CompositeSink::new().with(Box::new(TracingSink));
    let Some(path) = event_log else {
        return Ok(sinks);
    };
    let file = File::create(path).map_err(|source| EngineError::EventLog {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), "Writing event log");
    Ok(sinks.with(Box::new(JsonLinesSink::new(BufWriter::new(file)))))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use sleuth_types::Person;

    use super::*;

    #[test]
    fn roster_order_is_seating_order() {
        let roster = vec![
            PlayerConfig {
                name: "Ann".to_owned(),
                character: Person::MrsWhite,
            },
            PlayerConfig {
                name: "Ben".to_owned(),
                character: Person::MrGreen,
            },
        ];
        let players = seat_players(&roster);
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name(), "Ann");
        assert_eq!(players[1].character(), Person::MrGreen);
        assert!(players.iter().all(|p| p.hand().is_empty()));
    }

    #[test]
    fn configured_seed_is_kept() {
        assert_eq!(seeded_draw(Some(42)).seed(), 42);
    }

    #[test]
    fn no_event_log_means_tracing_only() {
        let sinks = event_sinks(None).unwrap();
        assert_eq!(sinks.len(), 1);
    }

    #[test]
    fn unwritable_event_log_is_reported() {
        let err = event_sinks(Some(Path::new("/nonexistent-dir/events.jsonl")))
            .err()
            .unwrap();
        assert!(matches!(err, EngineError::EventLog { .. }));
    }
}
