//! Skyline Dash headless demo
//!
//! Drives one session with a small autopilot and prints the popups the core
//! requests. Popup content lives out here: the simulation only ever says
//! "a fact is due" or "a donation prompt is due", and the embedder decides
//! what that means.

use std::time::{SystemTime, UNIX_EPOCH};

use skyline_dash::Session;
use skyline_dash::consts::TICK_DT;
use skyline_dash::sim::{EntityKind, GameEvent, GamePhase};

const FACTS: [&str; 5] = [
    "Chondrosarcoma is the second most common primary malignant tumor of bone (after myeloma and osteosarcoma).",
    "Most patients with conventional chondrosarcoma are typically older than 50 years at diagnosis.",
    "Chondrosarcoma most often occurs in the pelvis, hip, and shoulder bones, where cartilage is present.",
    "A common symptom is dull, worsening pain - especially at night - that may be persistent.",
    "Treatment often requires complete surgical removal; many chondrosarcomas are resistant to chemo and radiation.",
];

const DONATION_URL: &str = "https://sarcomaalliance.org/";

const TRACK_WIDTH: f32 = 800.0;
/// Obstacle distance ahead of the player that triggers an autopilot jump
const JUMP_LEAD: f32 = 60.0;
/// Distance within which the autopilot stops boosting and lines up a jump
const CAUTION_RANGE: f32 = 400.0;
/// Give up on a run that refuses to end
const MAX_TICKS: u64 = 20_000;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(clock_seed);

    println!("skyline-dash demo, seed {} (pass a number to replay)", seed);
    let mut session = Session::new(seed);
    session.set_track_width(TRACK_WIDTH);

    let mut fact_index = 0usize;
    let mut dismiss_pending = false;

    while session.state().time_ticks < MAX_TICKS {
        // a popup shown last frame has been "read"; dismiss it now
        if dismiss_pending {
            session.dismiss_signal();
            dismiss_pending = false;
        }

        autopilot(&mut session);
        let events = session.advance(TICK_DT);

        for event in events {
            match event {
                GameEvent::ScoreChanged(score) => {
                    log::info!("score: {}", score);
                }
                GameEvent::FactRequested => {
                    println!("Did you know? {}", FACTS[fact_index % FACTS.len()]);
                    fact_index += 1;
                    dismiss_pending = true;
                }
                GameEvent::DonationRequested => {
                    println!("Support sarcoma research: {}", DONATION_URL);
                    dismiss_pending = true;
                }
                GameEvent::GameOver { final_score } => {
                    println!(
                        "Game over after {} ticks. Final score: {}",
                        session.state().time_ticks,
                        final_score
                    );
                    return;
                }
            }
        }
    }

    println!(
        "Run capped at {} ticks with score {}",
        MAX_TICKS,
        session.state().score
    );
}

/// Boost on open track, ease off when an obstacle approaches, and jump once
/// it enters the lead window.
fn autopilot(session: &mut Session) {
    let state = session.state();
    if state.phase != GamePhase::Running {
        return;
    }
    let player_front = session.tuning().player_x + session.tuning().player_width;

    let nearest_obstacle = state
        .entities
        .iter()
        .filter(|e| e.kind == EntityKind::Obstacle)
        .map(|e| e.bounding_box(TRACK_WIDTH).min.x)
        .filter(|&front| front > player_front)
        .fold(f32::INFINITY, f32::min);

    session.set_boost(nearest_obstacle > player_front + CAUTION_RANGE);
    if nearest_obstacle < player_front + JUMP_LEAD {
        session.jump_signal();
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
