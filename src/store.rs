/// Live laser and target collections.
///
/// Membership changes are the only side effect.  Removal is idempotent:
/// removing an id that is already gone returns `false` instead of failing.
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{EntityId, Laser, Paddle, Rect, Target};
use crate::spawner;

#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    lasers: Vec<Laser>,
    targets: Vec<Target>,
    next_id: EntityId,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lasers(&self) -> &[Laser] {
        &self.lasers
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ── Spawning ──────────────────────────────────────────────────────────────

    /// Append a laser centred on the paddle, sitting directly above it.
    pub fn spawn_laser(&mut self, paddle: &Paddle, config: &GameConfig) -> EntityId {
        let id = self.allocate_id();
        let rect = Rect::new(
            paddle.rect.center_x() - config.laser_width / 2,
            paddle.rect.top() - config.laser_height,
            config.laser_width,
            config.laser_height,
        );
        self.lasers.push(Laser { id, rect });
        id
    }

    /// Append a target at `(x, y)`.
    pub fn spawn_target(&mut self, x: i32, y: i32, config: &GameConfig) -> EntityId {
        let id = self.allocate_id();
        self.targets.push(Target {
            id,
            x,
            y,
            radius: config.target_radius,
        });
        id
    }

    /// Append a target at a random x along the top edge.
    pub fn spawn_random_target(&mut self, config: &GameConfig, rng: &mut impl Rng) -> EntityId {
        let (x, y) = spawner::target_origin(config, rng);
        self.spawn_target(x, y, config)
    }

    // ── Movement ──────────────────────────────────────────────────────────────

    /// Move every laser up and every target down by one tick.
    pub fn advance(&mut self, config: &GameConfig) {
        self.advance_lasers(config);
        for target in &mut self.targets {
            target.y += config.target_speed;
        }
    }

    pub fn advance_lasers(&mut self, config: &GameConfig) {
        for laser in &mut self.lasers {
            laser.rect.y -= config.laser_speed;
        }
    }

    /// Move a single target down one tick and return its new y, or `None`
    /// if it no longer exists.
    pub fn advance_target(&mut self, id: EntityId, config: &GameConfig) -> Option<i32> {
        let target = self.targets.iter_mut().find(|t| t.id == id)?;
        target.y += config.target_speed;
        Some(target.y)
    }

    /// Drop lasers whose bottom edge has left the top of the screen.
    /// Returns how many were removed.
    pub fn prune_offscreen(&mut self) -> usize {
        let before = self.lasers.len();
        self.lasers.retain(|l| l.rect.bottom() >= 0);
        before - self.lasers.len()
    }

    // ── Removal ───────────────────────────────────────────────────────────────

    pub fn remove_laser(&mut self, id: EntityId) -> bool {
        match self.lasers.iter().position(|l| l.id == id) {
            Some(index) => {
                self.lasers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_target(&mut self, id: EntityId) -> bool {
        match self.targets.iter().position(|t| t.id == id) {
            Some(index) => {
                self.targets.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.lasers.clear();
        self.targets.clear();
    }
}
