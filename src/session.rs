//! Session scheduling and input signals
//!
//! Owns the wall-clock side of a run: the fixed-timestep accumulator for the
//! main tick, the finer jump sub-timer, held input state and the seeded RNG.
//! The sim underneath never sees real time, so an embedder can drive a
//! session from a frame callback, a test loop or a replay with identical
//! results.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{DEFAULT_TRACK_WIDTH, JUMP_DT, MAX_SUBSTEPS, TICK_DT};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// One playthrough: game state plus the two cooperative timers driving it
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    tuning: Tuning,
    rng: Pcg32,
    seed: u64,
    /// Wall time banked toward the next main tick
    tick_accum: f32,
    /// Wall time banked toward the next jump sub-tick; only grows while the
    /// player is airborne
    jump_accum: f32,
    boost_held: bool,
    track_width: f32,
}

impl Session {
    /// Start a run with the default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        log::info!("session start, seed {}", seed);
        Self {
            state: GameState::new(&tuning),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            tick_accum: 0.0,
            jump_accum: 0.0,
            boost_held: false,
            track_width: DEFAULT_TRACK_WIDTH,
            tuning,
        }
    }

    /// Read access for rendering and tests
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Feed elapsed wall time; runs however many whole main ticks and jump
    /// sub-ticks fit, and returns every event they raised in order.
    ///
    /// While the session is not Running no time is banked at all, so a
    /// popup or a finished run can never replay the wall time it spent
    /// sitting there. A tick that pauses or ends the run stops the rest of
    /// the batch immediately.
    pub fn advance(&mut self, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state.phase != GamePhase::Running {
            return events;
        }

        // clamp huge stalls (tab switch, debugger) to one burst of catch-up
        let dt = dt.min(0.1);
        self.tick_accum += dt;
        if self.state.player.airborne() {
            self.jump_accum += dt;
        }

        let input = TickInput {
            boost: self.boost_held,
            track_width: self.track_width,
        };

        let mut substeps = 0;
        while self.tick_accum >= TICK_DT && substeps < MAX_SUBSTEPS {
            events.extend(tick(&mut self.state, &input, &self.tuning, &mut self.rng));
            self.tick_accum -= TICK_DT;
            substeps += 1;
            if self.state.phase != GamePhase::Running {
                break;
            }
        }

        let mut substeps = 0;
        while self.state.phase == GamePhase::Running
            && self.state.player.airborne()
            && self.jump_accum >= JUMP_DT
            && substeps < MAX_SUBSTEPS
        {
            self.state.player.advance_jump(&self.tuning);
            self.jump_accum -= JUMP_DT;
            substeps += 1;
        }

        events
    }

    /// Discrete jump press. Ignored unless the session is Running and the
    /// player is grounded. An accepted press starts the sub-timer from
    /// zero; banked time from an earlier arc never shortens the first step.
    pub fn jump_signal(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        if !self.state.player.airborne() {
            self.jump_accum = 0.0;
            self.state.player.start_jump();
        }
    }

    /// Continuous boost control; a held key survives pauses and restarts
    pub fn set_boost(&mut self, active: bool) {
        self.boost_held = active;
    }

    /// Track width used for culling and collision, reported by the embedder
    pub fn set_track_width(&mut self, width: f32) {
        self.track_width = width;
    }

    /// Dismiss the active popup and resume play. Ignored unless Paused.
    pub fn dismiss_signal(&mut self) {
        if self.state.phase != GamePhase::Paused {
            return;
        }
        self.state.popup = None;
        self.state.phase = GamePhase::Running;
    }

    /// Reset to the initial state and replay the same seed.
    ///
    /// Both timers are cancelled: nothing banked before the restart can
    /// leak into the new run. The held boost key and the reported track
    /// width carry over; everything else resets.
    pub fn restart(&mut self) {
        log::info!("session restart, seed {}", self.seed);
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.state = GameState::new(&self.tuning);
        self.tick_accum = 0.0;
        self.jump_accum = 0.0;
    }
}
