//! Shared entity types: pure data, no game logic.

use serde::Deserialize;

// ── Viewport ──────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;
/// Row every level lays its ground tiles on.
pub const FLOOR_Y: f32 = 575.0;

// ── Bounding box ──────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in viewport pixels.
///
/// Position is mutable, size is fixed after creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    w: f32,
    h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn width(&self) -> f32 {
        self.w
    }

    pub fn height(&self) -> f32 {
        self.h
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// The same box moved by `(dx, dy)`.
    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect { x: self.x + dx, y: self.y + dy, ..*self }
    }
}

// ── Kinds ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum EnemyKind {
    /// Ground patroller (the slime).
    Walker,
    /// Airborne patroller (the fly).
    Flyer,
}

/// Structure tiles a platform can be built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum Tile {
    GrassLeft,
    GrassMiddle,
    GrassRight,
    GrassRound,
    StonePlatformLeft,
    StonePlatformMiddle,
    StonePlatformRight,
    StoneCliffLeft,
    StoneCliffMiddle,
    StoneCliffRight,
    /// Full-height blocker at the level edges. Collides, never drawn.
    InvisibleWall,
}

impl Tile {
    /// Pixel size `(w, h)` of one tile.
    pub fn size(&self) -> (f32, f32) {
        match self {
            Tile::InvisibleWall => (70.0, 600.0),
            Tile::GrassRound => (70.0, 40.0),
            _ => (70.0, 70.0),
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Tile::InvisibleWall)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum LevelKind {
    Menu,
    Stage,
    Victory,
    GameOver,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Abstract player intents; the only input-facing API of the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    GoLeft,
    GoRight,
    Stop,
    Jump,
    Duck,
    StandUp,
}

// ── Visual state ──────────────────────────────────────────────────────────────

/// Opaque "what to draw" handle read by the renderer every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteId {
    PlayerWalk { facing: Facing, frame: usize },
    FlyerWings { facing: Facing, frame: usize },
    FlyerDead,
    WalkerStep { facing: Facing, frame: usize },
    WalkerDead,
    Block(Tile),
}
