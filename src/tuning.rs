//! Data-driven game balance
//!
//! Everything that shapes a run lives here so balance variants can be loaded
//! from JSON instead of recompiling. Defaults reproduce the classic feel.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::EntityKind;

/// Balance knobs for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// World scroll speed in track units per tick
    pub base_speed: f32,
    /// Added to the scroll speed while the boost control is held
    pub boost_increment: f32,
    /// How far beyond the spawn edge new entities start
    pub spawn_lead: f32,
    /// Extra distance past the exit edge before an entity is culled
    pub cull_margin: f32,

    /// Countdown before the very first spawn, in ticks
    pub spawn_delay_initial: u32,
    /// Smallest re-armed spawn countdown, in ticks
    pub spawn_delay_min: u32,
    /// Upper bound (exclusive) of the re-armed spawn countdown, in ticks
    pub spawn_delay_max: u32,

    /// Kind weights; must sum to 1
    pub obstacle_weight: f32,
    pub coin_weight: f32,
    pub heart_weight: f32,

    /// Left edge of the player box; the player never moves horizontally
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Resting height of the player's bottom edge above the ground
    pub player_baseline: f32,
    /// Peak jump rise above the baseline
    pub jump_height: f32,
    /// Vertical distance covered per jump sub-tick
    pub gravity_step: f32,

    /// Collision box per kind
    pub obstacle_size: Vec2,
    pub coin_size: Vec2,
    pub heart_size: Vec2,
    /// Bottom-edge heights; obstacles always sit on the ground
    pub coin_elevation: f32,
    pub heart_elevation: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: 4.0,
            boost_increment: 1.6,
            spawn_lead: 150.0,
            cull_margin: 200.0,

            spawn_delay_initial: 80,
            spawn_delay_min: 60,
            spawn_delay_max: 140,

            obstacle_weight: 0.65,
            coin_weight: 0.25,
            heart_weight: 0.10,

            player_x: 60.0,
            player_width: 40.0,
            player_height: 60.0,
            player_baseline: 5.0,
            jump_height: 120.0,
            gravity_step: 6.0,

            obstacle_size: Vec2::new(30.0, 45.0),
            coin_size: Vec2::new(30.0, 30.0),
            heart_size: Vec2::new(34.0, 30.0),
            coin_elevation: 85.0,
            heart_elevation: 95.0,
        }
    }
}

impl Tuning {
    /// Collision box dimensions for a kind
    pub fn size_of(&self, kind: EntityKind) -> Vec2 {
        match kind {
            EntityKind::Obstacle => self.obstacle_size,
            EntityKind::Coin => self.coin_size,
            EntityKind::Heart => self.heart_size,
        }
    }

    /// Bottom-edge height for a kind
    pub fn elevation_of(&self, kind: EntityKind) -> f32 {
        match kind {
            EntityKind::Obstacle => 0.0,
            EntityKind::Coin => self.coin_elevation,
            EntityKind::Heart => self.heart_elevation,
        }
    }

    /// Load a balance variant from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
