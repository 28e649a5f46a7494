//! Patrolling enemies.
//!
//! Both kinds share one state machine:
//!
//! ```text
//!   Alive ──stomped──▶ Dying ──700 ms──▶ (removed from the level)
//! ```
//!
//! Alive enemies walk back and forth inside their level-local patrol range
//! and test themselves against the player every tick. A player falling onto
//! an enemy kills it; any other contact hurts the player.

use log::debug;

use crate::entities::{EnemyKind, Facing, Rect, SpriteId};
use crate::error::{check_boundary, GameError};
use crate::platform::{reverse_at_bounds, Platform};
use crate::player::Player;

const DYING_MS: u64 = 700;
const DYING_FALL_SPEED: f32 = 10.0;
const STOMP_SCORE: u32 = 10;
const PATROL_SPEED: f32 = 1.0;
const PX_PER_FRAME: f32 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Alive,
    Dying { since: u64 },
}

/// What the owning level should do with an enemy after its update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Despawn {
    Keep,
    Remove,
}

/// Everything an enemy may look at or touch during its update, borrowed from
/// the level and the session for the duration of one call.
pub struct EnemyContext<'a> {
    pub player: &'a mut Player,
    pub platforms: &'a [Platform],
    pub world_shift: f32,
    pub now: u64,
    /// Points earned this tick, credited to the level by the caller.
    pub score: u32,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub kind: EnemyKind,
    pub change_x: f32,
    boundary_left: f32,
    boundary_right: f32,
    state: EnemyState,
    sprite: SpriteId,
}

impl Enemy {
    /// An enemy at `(x, y)` patrolling the level-local range `[left, right]`.
    pub fn new(kind: EnemyKind, x: f32, y: f32, left: f32, right: f32) -> Result<Self, GameError> {
        check_boundary("enemy patrol", left, right)?;
        let (w, h) = Self::size(kind);
        Ok(Self {
            rect: Rect::new(x, y, w, h),
            kind,
            change_x: PATROL_SPEED,
            boundary_left: left,
            boundary_right: right,
            state: EnemyState::Alive,
            sprite: Self::walk_sprite(kind, Facing::Right, 0),
        })
    }

    /// Default placement used by level data: the patrol starts at `x` and
    /// reaches further for flyers than for walkers.
    pub fn spawn(kind: EnemyKind, x: f32, y: f32) -> Result<Self, GameError> {
        let reach = match kind {
            EnemyKind::Walker => 100.0,
            EnemyKind::Flyer => 300.0,
        };
        Self::new(kind, x, y, x, x + reach)
    }

    pub fn size(kind: EnemyKind) -> (f32, f32) {
        match kind {
            EnemyKind::Walker => (50.0, 28.0),
            EnemyKind::Flyer => (72.0, 36.0),
        }
    }

    pub fn boundaries(&self) -> (f32, f32) {
        (self.boundary_left, self.boundary_right)
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == EnemyState::Alive
    }

    pub fn sprite(&self) -> SpriteId {
        self.sprite
    }

    // ── Per-frame update ──────────────────────────────────────────────────────

    pub fn update(&mut self, ctx: &mut EnemyContext<'_>) -> Despawn {
        match self.state {
            EnemyState::Alive => {
                self.patrol(ctx);
                Despawn::Keep
            }
            EnemyState::Dying { since } => {
                if ctx.now.saturating_sub(since) >= DYING_MS {
                    debug!("{:?} despawned", self.kind);
                    return Despawn::Remove;
                }
                self.rect.y += DYING_FALL_SPEED;
                Despawn::Keep
            }
        }
    }

    fn patrol(&mut self, ctx: &mut EnemyContext<'_>) {
        let local = self.rect.x - ctx.world_shift;
        let frame = (local / PX_PER_FRAME).floor().rem_euclid(2.0) as usize;
        let facing = if self.change_x < 0.0 { Facing::Left } else { Facing::Right };
        self.sprite = Self::walk_sprite(self.kind, facing, frame);

        self.rect.x += self.change_x;

        if self.rect.overlaps(&ctx.player.rect) && !ctx.player.invincible {
            if ctx.player.change_y > 0.0 {
                self.die(ctx.now);
                // The stomped body counts as ground, so a stomp in mid-air
                // still bounces.
                ctx.player.bounce(ctx.platforms, &self.rect);
                ctx.score += STOMP_SCORE;
                debug!("{:?} stomped", self.kind);
                return;
            }
            ctx.player.hit(ctx.now);
        }

        let local = self.rect.x - ctx.world_shift;
        self.change_x =
            reverse_at_bounds(local, self.change_x, self.boundary_left, self.boundary_right);
    }

    /// Alive → Dying. Later calls keep the first timestamp.
    pub fn die(&mut self, now: u64) {
        if self.state == EnemyState::Alive {
            self.state = EnemyState::Dying { since: now };
            self.sprite = match self.kind {
                EnemyKind::Walker => SpriteId::WalkerDead,
                EnemyKind::Flyer => SpriteId::FlyerDead,
            };
        }
    }

    fn walk_sprite(kind: EnemyKind, facing: Facing, frame: usize) -> SpriteId {
        match kind {
            EnemyKind::Walker => SpriteId::WalkerStep { facing, frame },
            EnemyKind::Flyer => SpriteId::FlyerWings { facing, frame },
        }
    }
}
