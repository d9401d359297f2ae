//! Skyline Dash - side-scrolling runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, game state)
//! - `session`: Timer scheduling, input signals and the seeded RNG
//! - `tuning`: Data-driven game balance
//!
//! The crate is headless: rendering, popup content and input devices belong
//! to the embedding application. It consumes signals and elapsed wall time,
//! and reports back through [`sim::GameEvent`] values.

pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed main simulation timestep (60 Hz)
    pub const TICK_DT: f32 = 1.0 / 60.0;
    /// Fixed jump sub-timestep (20 ms), scheduled independently of the
    /// main tick
    pub const JUMP_DT: f32 = 0.02;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Track width assumed until the embedder reports a real viewport
    pub const DEFAULT_TRACK_WIDTH: f32 = 800.0;

    /// Spawn kinds remembered for declustering
    pub const SPAWN_HISTORY_CAP: usize = 6;
}
