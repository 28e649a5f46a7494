//! One level: its platforms, its enemies, and how far it has scrolled.
//!
//! The camera never moves. Scrolling shifts every platform and enemy by the
//! same amount and remembers the running total in `world_shift`, so
//! `rect.x - world_shift` is always an entity's level-local position.

use crate::backdrop::Backdrop;
use crate::enemy::{Despawn, Enemy, EnemyContext};
use crate::entities::LevelKind;
use crate::platform::Platform;
use crate::player::Player;

#[derive(Clone, Debug)]
pub struct Level {
    pub name: String,
    pub kind: LevelKind,
    platforms: Vec<Platform>,
    enemies: Vec<Enemy>,
    world_shift: f32,
    /// Reaching `player.x + world_shift <= level_limit` ends the level.
    level_limit: f32,
    /// Points scored by stomping enemies in this level.
    score: u32,
    backdrop: Backdrop,
}

impl Level {
    pub fn new(name: impl Into<String>, kind: LevelKind, level_limit: f32) -> Self {
        Self {
            name: name.into(),
            kind,
            platforms: Vec::new(),
            enemies: Vec::new(),
            world_shift: 0.0,
            level_limit,
            score: 0,
            backdrop: Backdrop::empty(),
        }
    }

    pub fn with_backdrop(mut self, backdrop: Backdrop) -> Self {
        self.backdrop = backdrop;
        self
    }

    pub fn add_platform(&mut self, platform: Platform) {
        self.platforms.push(platform);
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn world_shift(&self) -> f32 {
        self.world_shift
    }

    pub fn level_limit(&self) -> f32 {
        self.level_limit
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    /// Horizontal offset for the background layer (a third of the world
    /// scroll).
    pub fn backdrop_offset(&self) -> f32 {
        (self.world_shift / 3.0).floor()
    }

    // ── Per-frame update ──────────────────────────────────────────────────────

    /// Move every platform one tick, pushing `player` out of any mover that
    /// runs into them. Runs before the player so riders see the platform
    /// where it is this frame.
    pub fn update_platforms(&mut self, player: &mut Player) {
        let shift = self.world_shift;
        for platform in &mut self.platforms {
            platform.update(shift, &mut player.rect);
        }
    }

    /// Advance every enemy against the already-updated player and drop the
    /// ones whose death animation has finished.
    pub fn update_enemies(&mut self, player: &mut Player, now: u64) {
        let mut ctx = EnemyContext {
            player,
            platforms: &self.platforms,
            world_shift: self.world_shift,
            now,
            score: 0,
        };
        self.enemies
            .retain_mut(|enemy| enemy.update(&mut ctx) == Despawn::Keep);

        if ctx.score > 0 {
            self.score += ctx.score;
            ctx.player.score += ctx.score;
        }
    }

    /// Scroll the world by `dx` pixels (negative moves everything left).
    pub fn shift_world(&mut self, dx: f32) {
        self.world_shift += dx;
        for platform in &mut self.platforms {
            platform.rect.x += dx;
        }
        for enemy in &mut self.enemies {
            enemy.rect.x += dx;
        }
    }
}
