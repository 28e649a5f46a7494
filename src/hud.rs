//! HUD observers for player health and score.
//!
//! Each observer keeps its own display decomposition and rebuilds it only
//! when the watched value moves in the direction that matters.

use crate::player::MAX_HEALTH;

pub const HEART_SLOTS: u32 = 5;
const HEALTH_PER_HEART: u32 = MAX_HEALTH / HEART_SLOTS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heart {
    Full,
    Half,
    Empty,
}

/// `(full, half, empty)` heart counts for `health`.
pub fn hearts(health: u32) -> (u32, u32, u32) {
    let health = health.min(MAX_HEALTH);
    let full = health / HEALTH_PER_HEART;
    let half = u32::from(health % HEALTH_PER_HEART != 0);
    (full, half, HEART_SLOTS - full - half)
}

/// Decimal digits of `score`, most significant first.
pub fn digits(score: u32) -> Vec<u8> {
    score.to_string().bytes().map(|b| b - b'0').collect()
}

#[derive(Clone, Debug)]
pub struct HealthHud {
    last_health: u32,
    hearts: Vec<Heart>,
}

impl HealthHud {
    pub fn new(health: u32) -> Self {
        let mut hud = Self { last_health: health, hearts: Vec::new() };
        hud.rebuild(health);
        hud
    }

    /// Returns `true` when the hearts were rebuilt.
    pub fn observe(&mut self, health: u32) -> bool {
        // A refill only happens on respawn; rebuild for that too.
        if health < self.last_health || (health == MAX_HEALTH && self.last_health != MAX_HEALTH) {
            self.rebuild(health);
            return true;
        }
        false
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    fn rebuild(&mut self, health: u32) {
        self.last_health = health;
        let (full, half, empty) = hearts(health);
        self.hearts.clear();
        self.hearts.extend((0..full).map(|_| Heart::Full));
        self.hearts.extend((0..half).map(|_| Heart::Half));
        self.hearts.extend((0..empty).map(|_| Heart::Empty));
    }
}

#[derive(Clone, Debug)]
pub struct ScoreHud {
    last_score: u32,
    digits: Vec<u8>,
}

impl ScoreHud {
    pub fn new(score: u32) -> Self {
        Self { last_score: score, digits: digits(score) }
    }

    /// Returns `true` when the digits were rebuilt.
    pub fn observe(&mut self, score: u32) -> bool {
        if score > self.last_score {
            self.last_score = score;
            self.digits = digits(score);
            return true;
        }
        false
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }
}
