//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, injected by the caller
//! - Stable iteration order (entities in creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod motion;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Hit, detect};
pub use motion::{advance, effective_speed};
pub use rect::Rect;
pub use spawn::{SpawnHistory, Spawner, decluster, kind_for_roll};
pub use state::{
    Entity, EntityKind, GameEvent, GamePhase, GameState, JumpState, Player, PopupKind,
};
pub use tick::{TickInput, tick};
