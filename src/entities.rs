/// All game entity types: pure data plus a few geometry helpers.

/// Stable handle for a laser or target, unique within one `EntityStore`.
pub type EntityId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world units, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Strict overlap on both axes.  Rectangles that only share an edge do
    /// not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Paddle {
    pub rect: Rect,
}

// ── Projectiles & targets ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Laser {
    pub id: EntityId,
    pub rect: Rect,
}

/// A falling circle.  Collision uses its bounding square of side 2×radius.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub id: EntityId,
    pub x: i32,
    pub y: i32,
    pub radius: i32,
}

impl Target {
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x - self.radius,
            self.y - self.radius,
            self.radius * 2,
            self.radius * 2,
        )
    }
}
