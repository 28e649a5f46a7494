//! Player controller: gravity, platform collision, jump eligibility and the
//! hit / invincibility / death state.
//!
//! The player does not own a level. Every call that needs the world takes the
//! current level (or its platform list) as an argument.

use log::debug;

use crate::entities::{Facing, Intent, Rect, SpriteId, SCREEN_HEIGHT};
use crate::level::Level;
use crate::platform::Platform;

pub const PLAYER_WIDTH: f32 = 66.0;
pub const PLAYER_HEIGHT: f32 = 90.0;
pub const MAX_HEALTH: u32 = 100;

const WALK_SPEED: f32 = 6.0;
const GRAVITY: f32 = 0.35;
const JUMP_IMPULSE: f32 = -11.0;
const STOMP_BOUNCE: f32 = -5.0;
/// How far below the feet `jump` looks for ground.
const GROUND_PROBE: f32 = 2.0;
const HIT_DAMAGE: u32 = 10;
const FALL_DAMAGE: u32 = 20;
const INVINCIBLE_MS: u64 = 3000;
const RESPAWN_X: f32 = 340.0;
const WALK_FRAMES: usize = 7;
/// Pixels travelled per walk-cycle frame.
const PX_PER_FRAME: f32 = 30.0;

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub change_x: f32,
    pub change_y: f32,
    pub facing: Facing,
    pub health: u32,
    pub invincible: bool,
    pub last_hit: u64,
    pub score: u32,
    pub death_time: Option<u64>,
    sprite: SpriteId,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            rect: Rect::new(
                RESPAWN_X,
                SCREEN_HEIGHT - PLAYER_HEIGHT - 25.0,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            change_x: 0.0,
            change_y: 0.0,
            facing: Facing::Right,
            health: MAX_HEALTH,
            invincible: false,
            last_hit: 0,
            score: 0,
            death_time: None,
            sprite: SpriteId::PlayerWalk { facing: Facing::Right, frame: 0 },
        }
    }

    pub fn sprite(&self) -> SpriteId {
        self.sprite
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    // ── Per-frame update ──────────────────────────────────────────────────────

    pub fn update(&mut self, level: &Level, now: u64) {
        let absolute_x = self.rect.x + level.world_shift();
        self.apply_gravity(now);

        // Horizontal pass
        self.rect.x += self.change_x;
        for block in level.platforms() {
            if !self.rect.overlaps(&block.rect) {
                continue;
            }
            if self.change_x > 0.0 {
                self.rect.set_right(block.rect.left());
            } else if self.change_x < 0.0 {
                self.rect.set_left(block.rect.right());
            }
        }

        let frame = (absolute_x.abs() / PX_PER_FRAME) as usize % WALK_FRAMES;
        self.sprite = SpriteId::PlayerWalk { facing: self.facing, frame };

        if self.invincible && now.saturating_sub(self.last_hit) > INVINCIBLE_MS {
            self.invincible = false;
        }

        // Vertical pass
        self.rect.y += self.change_y;
        for block in level.platforms() {
            if !self.rect.overlaps(&block.rect) {
                continue;
            }
            if self.change_y > 0.0 {
                self.rect.set_bottom(block.rect.top());
            } else if self.change_y < 0.0 {
                self.rect.set_top(block.rect.bottom());
            }
            self.change_y = 0.0;

            if block.is_moving() {
                self.rect.x += block.change_x();
            }
        }
    }

    /// Accelerate the fall and catch the player once they drop out of the
    /// bottom of the screen.
    fn apply_gravity(&mut self, now: u64) {
        if self.change_y == 0.0 {
            self.change_y = 1.0;
        } else {
            self.change_y += GRAVITY;
        }

        if self.rect.y >= SCREEN_HEIGHT + self.rect.height() && self.change_y >= 0.0 {
            self.change_y = 0.0;
            self.rect.x = RESPAWN_X;
            self.rect.y = 0.0;
            self.take_damage(FALL_DAMAGE, now);
            debug!("Player fell out of the world, health {}", self.health);
        }
    }

    // ── Intents ───────────────────────────────────────────────────────────────

    pub fn apply(&mut self, intent: Intent, platforms: &[Platform]) {
        match intent {
            Intent::GoLeft => self.go_left(),
            Intent::GoRight => self.go_right(),
            Intent::Stop => self.stop(),
            Intent::Jump => self.jump(platforms),
            Intent::Duck => self.duck(),
            Intent::StandUp => self.stand_up(),
        }
    }

    /// Jump only when standing on something.
    pub fn jump(&mut self, platforms: &[Platform]) {
        if self.on_ground(platforms, None) {
            self.change_y = JUMP_IMPULSE;
        }
    }

    pub fn go_left(&mut self) {
        self.change_x = -WALK_SPEED;
        self.facing = Facing::Left;
    }

    pub fn go_right(&mut self) {
        self.change_x = WALK_SPEED;
        self.facing = Facing::Right;
    }

    pub fn stop(&mut self) {
        self.change_x = 0.0;
    }

    // Crouching has no physics yet.
    pub fn duck(&mut self) {}

    pub fn stand_up(&mut self) {}

    // ── Damage ────────────────────────────────────────────────────────────────

    pub fn hit(&mut self, now: u64) {
        self.take_damage(HIT_DAMAGE, now);
        debug!("Player hit, health {}", self.health);
    }

    fn take_damage(&mut self, amount: u32, now: u64) {
        self.health = self.health.saturating_sub(amount);
        self.invincible = true;
        self.last_hit = now;
        if self.health == 0 && self.death_time.is_none() {
            self.death_time = Some(now);
        }
    }

    /// Kick the player back up after stomping the enemy at `stomped`.
    pub fn bounce(&mut self, platforms: &[Platform], stomped: &Rect) {
        if self.on_ground(platforms, Some(stomped)) {
            self.change_y = STOMP_BOUNCE;
        }
    }

    /// Full health, no pending death.
    pub fn revive(&mut self) {
        self.health = MAX_HEALTH;
        self.death_time = None;
    }

    /// Probe a couple of pixels below the feet for something to stand on:
    /// any platform, the optional extra box, or the bottom of the screen.
    ///
    /// `extra` is the enemy being stomped. Enemies are not platforms, and
    /// without it a stomp away from the ground would never bounce.
    fn on_ground(&self, platforms: &[Platform], extra: Option<&Rect>) -> bool {
        let probe = self.rect.offset(0.0, GROUND_PROBE);
        platforms.iter().any(|p| probe.overlaps(&p.rect))
            || extra.is_some_and(|r| probe.overlaps(r))
            || self.rect.bottom() >= SCREEN_HEIGHT
    }
}
