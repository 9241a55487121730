/// Laser ↔ target collision resolution.
///
/// A target is hit when its bounding square strictly overlaps a laser
/// rectangle.  Lasers are scanned in insertion order and the first overlap
/// wins: that laser and that target are removed together and the score goes
/// up by exactly one.
use crate::entities::{EntityId, Rect};
use crate::store::EntityStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub laser: EntityId,
    pub target: EntityId,
}

/// First live laser (in insertion order) that overlaps `bounds`.
pub fn first_overlap(store: &EntityStore, bounds: &Rect) -> Option<EntityId> {
    store
        .lasers()
        .iter()
        .find(|laser| bounds.intersects(&laser.rect))
        .map(|laser| laser.id)
}

/// Test one target against every live laser.  On a hit, both entities are
/// removed and `score` is incremented.  A target id that is already gone is a
/// no-op.
pub fn resolve_target(store: &mut EntityStore, target: EntityId, score: &mut u32) -> Option<Hit> {
    let bounds = store.targets().iter().find(|t| t.id == target)?.bounds();
    let laser = first_overlap(store, &bounds)?;

    store.remove_target(target);
    store.remove_laser(laser);
    *score += 1;
    tracing::debug!(laser, target, "target destroyed");
    Some(Hit { laser, target })
}

/// Full pass over every target in insertion order.
pub fn resolve_all(store: &mut EntityStore, score: &mut u32) -> Vec<Hit> {
    let ids: Vec<EntityId> = store.targets().iter().map(|t| t.id).collect();
    ids.into_iter()
        .filter_map(|id| resolve_target(store, id, score))
        .collect()
}
