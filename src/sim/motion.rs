//! Entity motion and off-screen culling

use super::state::Entity;
use crate::tuning::Tuning;

/// Scroll speed for this tick after the boost modifier
#[inline]
pub fn effective_speed(speed: f32, boost: bool, boost_increment: f32) -> f32 {
    if boost {
        speed + boost_increment
    } else {
        speed
    }
}

/// Advance every live entity by the effective speed, then drop the ones
/// past the exit edge. Every entity moves by the same step, including one
/// spawned earlier in the same tick.
///
/// Returns the IDs of culled entities in creation order.
pub fn advance(
    entities: &mut Vec<Entity>,
    speed: f32,
    boost: bool,
    track_width: f32,
    tuning: &Tuning,
) -> Vec<u32> {
    let step = effective_speed(speed, boost, tuning.boost_increment);
    for entity in entities.iter_mut() {
        entity.offset += step;
    }

    let mut retired = Vec::new();
    entities.retain(|entity| {
        if entity.is_offscreen(track_width, tuning.cull_margin) {
            retired.push(entity.id);
            false
        } else {
            true
        }
    });
    retired
}
