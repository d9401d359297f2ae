//! Fixed timestep simulation tick

use rand::Rng;

use super::collision;
use super::motion;
use super::state::{EntityKind, GameEvent, GamePhase, GameState, PopupKind};
use crate::consts::DEFAULT_TRACK_WIDTH;
use crate::tuning::Tuning;

/// Input sampled for a single tick
#[derive(Debug, Clone)]
pub struct TickInput {
    /// Boost control held: adds the boost increment to the scroll speed
    pub boost: bool,
    /// Current track width in world units, reported by the embedder
    pub track_width: f32,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            boost: false,
            track_width: DEFAULT_TRACK_WIDTH,
        }
    }
}

/// Advance the game state by exactly one tick.
///
/// Does nothing unless the phase is Running. Order within a tick: spawn,
/// then motion and culling (a fresh spawn moves too), then collision
/// reactions. Returns the events raised, in the order they occurred.
pub fn tick<R: Rng>(
    state: &mut GameState,
    input: &TickInput,
    tuning: &Tuning,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return events,
        GamePhase::Running => {}
    }

    state.time_ticks += 1;

    // --- Spawning ---
    if let Some(entity) = state.try_spawn(tuning, rng) {
        let (id, kind) = (entity.id, entity.kind);
        log::debug!("tick {}: spawned {:?} #{}", state.time_ticks, kind, id);
    }

    // --- Motion and culling ---
    let retired = motion::advance(
        &mut state.entities,
        state.speed,
        input.boost,
        input.track_width,
        tuning,
    );
    if !retired.is_empty() {
        log::trace!("tick {}: retired {:?}", state.time_ticks, retired);
    }

    // --- Collision reactions ---
    let player_box = state.player.bounding_box(tuning);
    let hits = collision::detect(&player_box, &state.entities, input.track_width);
    for hit in hits {
        // every hit consumes its entity, exactly once
        state.entities.retain(|e| e.id != hit.id);
        match hit.kind {
            EntityKind::Obstacle => {
                state.phase = GamePhase::GameOver;
                state.popup = None;
                log::info!(
                    "tick {}: obstacle hit, run over at score {}",
                    state.time_ticks,
                    state.score
                );
                events.push(GameEvent::GameOver {
                    final_score: state.score,
                });
                break;
            }
            EntityKind::Coin => {
                state.score += 1;
                state.phase = GamePhase::Paused;
                state.popup = Some(PopupKind::Fact);
                events.push(GameEvent::ScoreChanged(state.score));
                events.push(GameEvent::FactRequested);
            }
            EntityKind::Heart => {
                state.phase = GamePhase::Paused;
                state.popup = Some(PopupKind::Donation);
                events.push(GameEvent::DonationRequested);
            }
        }
    }

    events
}
