//! Game state and core simulation types

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::spawn::{SpawnHistory, Spawner};
use crate::tuning::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks execute and signals are live
    Running,
    /// A popup is up; ticks and the jump timer are held until it is dismissed
    Paused,
    /// The run ended; terminal until a restart
    GameOver,
}

/// What an entity is, and therefore what touching it does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Fatal on contact
    Obstacle,
    /// Scores a point and raises the fact popup
    Coin,
    /// Raises the donation popup
    Heart,
}

/// Which popup is holding the game paused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PopupKind {
    Fact,
    Donation,
}

/// Outbound notification raised by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Score changed; carries the new total
    ScoreChanged(u32),
    /// A coin was collected and the embedder should present a fact
    FactRequested,
    /// A heart was collected and the embedder should present a donation prompt
    DonationRequested,
    /// An obstacle was hit
    GameOver { final_score: u32 },
}

/// Phase of the player's jump arc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpState {
    /// On the ground and able to jump
    Grounded,
    /// Rising toward the apex
    Ascending,
    /// Falling back to the baseline
    Descending,
}

/// A scrolling entity on the track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Distance travelled from the spawn edge: the entity's right edge sits
    /// this far left of the track's right edge. Negative while still
    /// off-track on the spawn side.
    pub offset: f32,
    /// Height of the bottom edge above the ground
    pub elevation: f32,
    pub size: Vec2,
}

impl Entity {
    /// A fresh entity just beyond the spawn edge
    pub fn spawn(id: u32, kind: EntityKind, tuning: &Tuning) -> Self {
        Self {
            id,
            kind,
            offset: -tuning.spawn_lead,
            elevation: tuning.elevation_of(kind),
            size: tuning.size_of(kind),
        }
    }

    /// Collision box in the track frame (x from the exit edge, y up)
    pub fn bounding_box(&self, track_width: f32) -> Rect {
        let left = track_width - self.offset - self.size.x;
        Rect::from_min_size(Vec2::new(left, self.elevation), self.size)
    }

    /// True once the entity has scrolled past the exit edge by the margin
    #[inline]
    pub fn is_offscreen(&self, track_width: f32, margin: f32) -> bool {
        self.offset > track_width + margin
    }
}

/// The player sprite. Horizontal position is fixed; only the world scrolls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Height of the bottom edge above the ground
    pub vertical_offset: f32,
    pub jump_state: JumpState,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            vertical_offset: tuning.player_baseline,
            jump_state: JumpState::Grounded,
        }
    }

    /// Collision box in the track frame
    pub fn bounding_box(&self, tuning: &Tuning) -> Rect {
        Rect::from_min_size(
            Vec2::new(tuning.player_x, self.vertical_offset),
            Vec2::new(tuning.player_width, tuning.player_height),
        )
    }

    #[inline]
    pub fn airborne(&self) -> bool {
        self.jump_state != JumpState::Grounded
    }

    /// Begin a jump. Does nothing unless grounded; phase gating is the
    /// caller's job.
    pub fn start_jump(&mut self) {
        if self.jump_state == JumpState::Grounded {
            self.jump_state = JumpState::Ascending;
        }
    }

    /// Advance the jump arc by one sub-tick
    pub fn advance_jump(&mut self, tuning: &Tuning) {
        match self.jump_state {
            JumpState::Grounded => {}
            JumpState::Ascending => {
                self.vertical_offset += tuning.gravity_step;
                if self.vertical_offset >= tuning.player_baseline + tuning.jump_height {
                    self.jump_state = JumpState::Descending;
                }
            }
            JumpState::Descending => {
                self.vertical_offset -= tuning.gravity_step;
                if self.vertical_offset <= tuning.player_baseline {
                    self.vertical_offset = tuning.player_baseline;
                    self.jump_state = JumpState::Grounded;
                }
            }
        }
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Coins collected this run
    pub score: u32,
    /// Main ticks executed this run
    pub time_ticks: u64,
    /// Base scroll speed, fixed at session start
    pub speed: f32,
    pub player: Player,
    /// Live entities in creation order
    pub entities: Vec<Entity>,
    /// Spawn countdown
    pub spawner: Spawner,
    /// Recent spawn kinds for declustering
    pub history: SpawnHistory,
    /// Popup currently holding the game paused, if any
    pub popup: Option<PopupKind>,
    /// Next entity ID (monotonic, never reused within a run)
    next_id: u32,
}

impl GameState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Running,
            score: 0,
            time_ticks: 0,
            speed: tuning.base_speed,
            player: Player::new(tuning),
            entities: Vec::new(),
            spawner: Spawner::new(tuning),
            history: SpawnHistory::new(),
            popup: None,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Run the spawn policy for this tick. At most one entity appears per
    /// elapsed countdown; it is pushed at the back so creation order holds.
    pub fn try_spawn<R: Rng>(&mut self, tuning: &Tuning, rng: &mut R) -> Option<&Entity> {
        let kind = self.spawner.draw(&mut self.history, tuning, rng)?;
        let id = self.next_entity_id();
        self.entities.push(Entity::spawn(id, kind, tuning));
        self.entities.last()
    }
}
