//! Static and moving platforms.
//!
//! A moving platform oscillates on exactly one axis between a boundary pair.
//! Horizontal bounds are level-local (world shift removed); vertical bounds
//! are plain viewport rows since the world only scrolls horizontally.

use crate::entities::{Rect, SpriteId, Tile};
use crate::error::{check_boundary, GameError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Path {
    Horizontal { min: f32, max: f32 },
    Vertical { min: f32, max: f32 },
}

#[derive(Clone, Debug)]
pub struct Platform {
    pub rect: Rect,
    tile: Tile,
    /// `None` for static blocks.
    path: Option<Path>,
    /// Signed per-tick displacement along the path axis.
    speed: f32,
}

impl Platform {
    pub fn fixed(tile: Tile, x: f32, y: f32) -> Self {
        let (w, h) = tile.size();
        Self {
            rect: Rect::new(x, y, w, h),
            tile,
            path: None,
            speed: 0.0,
        }
    }

    /// A platform that patrols `path`, starting at `(x, y)` with `speed` px/tick.
    pub fn moving(tile: Tile, x: f32, y: f32, path: Path, speed: f32) -> Result<Self, GameError> {
        match path {
            Path::Horizontal { min, max } => check_boundary("platform horizontal", min, max)?,
            Path::Vertical { min, max } => check_boundary("platform vertical", min, max)?,
        }
        Ok(Self {
            path: Some(path),
            speed,
            ..Self::fixed(tile, x, y)
        })
    }

    pub fn tile(&self) -> Tile {
        self.tile
    }

    pub fn path(&self) -> Option<Path> {
        self.path
    }

    pub fn is_moving(&self) -> bool {
        self.path.is_some()
    }

    /// Horizontal displacement per tick; what a rider gets carried by.
    pub fn change_x(&self) -> f32 {
        match self.path {
            Some(Path::Horizontal { .. }) => self.speed,
            _ => 0.0,
        }
    }

    pub fn change_y(&self) -> f32 {
        match self.path {
            Some(Path::Vertical { .. }) => self.speed,
            _ => 0.0,
        }
    }

    pub fn sprite(&self) -> SpriteId {
        SpriteId::Block(self.tile)
    }

    /// Advance one tick. The velocity flips once the platform reaches or
    /// passes the boundary it is heading for; position is never clamped.
    ///
    /// A player the move runs into is shoved out along the axis of travel,
    /// so a rising platform lifts its rider and a sliding one pushes.
    pub fn update(&mut self, world_shift: f32, player: &mut Rect) {
        let Some(path) = self.path else {
            return;
        };
        let moved = self.speed;
        match path {
            Path::Horizontal { min, max } => {
                self.rect.x += moved;
                let local = self.rect.x - world_shift;
                self.speed = reverse_at_bounds(local, moved, min, max);
            }
            Path::Vertical { min, max } => {
                self.rect.y += moved;
                self.speed = reverse_at_bounds(self.rect.y, moved, min, max);
            }
        }

        if !self.rect.overlaps(player) {
            return;
        }
        match path {
            Path::Horizontal { .. } if moved > 0.0 => player.set_left(self.rect.right()),
            Path::Horizontal { .. } => player.set_right(self.rect.left()),
            Path::Vertical { .. } if moved < 0.0 => player.set_bottom(self.rect.top()),
            Path::Vertical { .. } => player.set_top(self.rect.bottom()),
        }
    }
}

/// Shared patrol rule for platforms and enemies.
pub(crate) fn reverse_at_bounds(pos: f32, speed: f32, min: f32, max: f32) -> f32 {
    if (speed > 0.0 && pos >= max) || (speed < 0.0 && pos <= min) {
        -speed
    } else {
        speed
    }
}
