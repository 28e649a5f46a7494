//! Session state and the per-frame orchestration.
//!
//! Frame order: platforms → player → enemies → camera scroll → level
//! transition → death handling. The transition check reads the world shift
//! the scroll step just produced.

use log::info;

use crate::entities::{Intent, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::GameError;
use crate::level::Level;
use crate::player::Player;

/// The player is kept between these screen columns; beyond them the world
/// scrolls instead.
pub const SCROLL_RIGHT: f32 = 500.0;
pub const SCROLL_LEFT: f32 = 120.0;
/// Screen column a player enters a new level at.
pub const ENTRY_X: f32 = 120.0;
/// Time spent on the game-over screen before starting over.
pub const RESPAWN_GRACE_MS: u64 = 2000;

#[derive(Clone, Debug)]
pub struct Game {
    levels: Vec<Level>,
    current: usize,
    pub player: Player,
}

impl Game {
    /// A session over `levels`, starting at index `start`. The last level is
    /// the game-over screen.
    pub fn new(levels: Vec<Level>, start: usize) -> Result<Self, GameError> {
        if levels.is_empty() {
            return Err(GameError::NoLevels);
        }
        if start >= levels.len() {
            return Err(GameError::Config(format!(
                "start level {} out of range (0..{})",
                start,
                levels.len()
            )));
        }
        info!("Session started on level {} ({})", start, levels[start].name);
        Ok(Self {
            levels,
            current: start,
            player: Player::new(),
        })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.current]
    }

    pub fn current_level_mut(&mut self) -> &mut Level {
        &mut self.levels[self.current]
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    fn game_over_index(&self) -> usize {
        self.levels.len() - 1
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    pub fn apply(&mut self, intent: Intent) {
        let level = &self.levels[self.current];
        self.player.apply(intent, level.platforms());
    }

    /// Debug shortcut: jump one level back or forward, if there is one.
    pub fn skip_level(&mut self, forward: bool) {
        let target = if forward {
            (self.current + 1).min(self.levels.len() - 1)
        } else {
            self.current.saturating_sub(1)
        };
        if target != self.current {
            self.enter_level(target);
            self.player.rect.y = SCREEN_HEIGHT - self.player.rect.height() - 25.0;
        }
    }

    fn enter_level(&mut self, index: usize) {
        self.current = index;
        info!("Entering level {} ({})", index, self.levels[index].name);
    }

    // ── Per-frame update ──────────────────────────────────────────────────────

    /// Advance the whole session by one frame at time `now` (ms).
    pub fn tick(&mut self, now: u64) {
        let level = &mut self.levels[self.current];
        level.update_platforms(&mut self.player);
        self.player.update(level, now);
        level.update_enemies(&mut self.player, now);

        self.scroll();
        self.check_transition();
        self.check_death(now);
    }

    /// Keep the player inside the scroll band by moving the world.
    fn scroll(&mut self) {
        let level = &mut self.levels[self.current];
        let player = &mut self.player.rect;

        if player.x >= SCROLL_RIGHT {
            let diff = player.x - SCROLL_RIGHT;
            player.x = SCROLL_RIGHT;
            level.shift_world(-diff);
        }

        if player.x <= SCROLL_LEFT && level.world_shift() < -1.0 {
            let diff = SCROLL_LEFT - player.x;
            player.x = SCROLL_LEFT;
            level.shift_world(diff);
        }
    }

    /// Move on to the next level once the player has walked past the current
    /// level's limit. Returns `true` if the limit was reached; on the last
    /// level the player is only put back at the entry column.
    pub fn check_transition(&mut self) -> bool {
        let level = &self.levels[self.current];
        if self.player.rect.x + level.world_shift() > level.level_limit() {
            return false;
        }
        self.player.rect.x = ENTRY_X;
        if self.current < self.levels.len() - 1 {
            self.enter_level(self.current + 1);
            self.player.rect.y = SCREEN_HEIGHT - self.player.rect.height() - 25.0;
        }
        true
    }

    /// Park a dead player on the game-over screen, then start over from the
    /// first level once the grace period has passed.
    fn check_death(&mut self, now: u64) {
        if !self.player.is_dead() {
            return;
        }
        let game_over = self.game_over_index();
        if self.current != game_over {
            self.enter_level(game_over);
            info!("Player died with score {}", self.player.score);
        }
        let rect = &mut self.player.rect;
        rect.y = SCREEN_HEIGHT - rect.height() - 40.0;
        rect.x = SCREEN_WIDTH / 2.0 - rect.width() / 2.0;

        let died_at = *self.player.death_time.get_or_insert(now);
        if now.saturating_sub(died_at) > RESPAWN_GRACE_MS {
            self.player.revive();
            self.enter_level(0);
            self.player.rect.y = SCREEN_HEIGHT - self.player.rect.height() - 40.0;
            info!("Player respawned");
        }
    }
}
