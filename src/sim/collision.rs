//! Player-versus-entity collision scan

use super::rect::Rect;
use super::state::{Entity, EntityKind};

/// One overlap found during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub id: u32,
    pub kind: EntityKind,
}

/// Scan the entities in creation order and report every strict overlap with
/// the player's box.
///
/// The scan halts at the first Obstacle hit: a fatal contact ends the tick,
/// so nothing behind it is examined. Coins and Hearts do not stop the scan;
/// several rewards can land in one tick.
pub fn detect(player_box: &Rect, entities: &[Entity], track_width: f32) -> Vec<Hit> {
    let mut hits = Vec::new();
    for entity in entities {
        if player_box.overlaps(&entity.bounding_box(track_width)) {
            hits.push(Hit {
                id: entity.id,
                kind: entity.kind,
            });
            if entity.kind == EntityKind::Obstacle {
                break;
            }
        }
    }
    hits
}
