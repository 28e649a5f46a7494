//! Level-definition data and the loader that turns it into live levels.
//!
//! Levels are authored as RON. The built-in table ships inside the binary;
//! a file on disk can replace it.

use std::fs;
use std::path::Path;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::backdrop::{Backdrop, BackdropDef};
use crate::enemy::Enemy;
use crate::entities::{EnemyKind, LevelKind, Tile, FLOOR_Y, SCREEN_WIDTH};
use crate::error::GameError;
use crate::level::Level;
use crate::platform::{Path as MoverPath, Platform};

const BUILTIN_LEVELS: &str = include_str!("../assets/levels.ron");
/// Horizontal distance between consecutive floor tiles.
const FLOOR_TILE_STEP: f32 = 70.0;

#[derive(Clone, Debug, Deserialize)]
pub struct LevelSet {
    pub levels: Vec<LevelDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LevelDef {
    pub name: String,
    pub kind: LevelKind,
    pub level_limit: f32,
    pub backdrop: BackdropDef,
    /// Lifts blocks and floor tiles (not enemies or movers) by this many pixels.
    #[serde(default)]
    pub y_offset: f32,
    #[serde(default)]
    pub blocks: Vec<(Tile, f32, f32)>,
    #[serde(default)]
    pub floors: Vec<FloorDef>,
    #[serde(default)]
    pub enemies: Vec<(EnemyKind, f32, f32)>,
    #[serde(default)]
    pub movers: Vec<MoverDef>,
}

/// A run of identical tiles along the floor line.
#[derive(Clone, Debug, Deserialize)]
pub struct FloorDef {
    pub tile: Tile,
    pub x: f32,
    pub length: f32,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub enum PathDef {
    Horizontal(f32, f32),
    Vertical(f32, f32),
}

#[derive(Clone, Debug, Deserialize)]
pub struct MoverDef {
    pub tile: Tile,
    pub x: f32,
    pub y: f32,
    pub path: PathDef,
    pub speed: f32,
}

impl FloorDef {
    /// Tile x positions; a partial trailing tile is dropped.
    pub fn tile_xs(&self) -> impl Iterator<Item = f32> + '_ {
        let count = (self.length / FLOOR_TILE_STEP).floor().max(0.0) as usize;
        (0..count).map(move |i| self.x + i as f32 * FLOOR_TILE_STEP)
    }
}

impl LevelDef {
    /// Build the live level. Fails on any inverted patrol or mover range.
    pub fn build(&self) -> Result<Level, GameError> {
        let span = self.level_limit.abs() / 3.0 + SCREEN_WIDTH;
        let mut rng = StdRng::seed_from_u64(self.backdrop.seed);
        let backdrop = Backdrop::generate(self.backdrop.style, span, &mut rng);
        let mut level = Level::new(self.name.clone(), self.kind, self.level_limit)
            .with_backdrop(backdrop);

        for &(tile, x, y) in &self.blocks {
            level.add_platform(Platform::fixed(tile, x, y - self.y_offset));
        }
        for floor in &self.floors {
            for x in floor.tile_xs() {
                level.add_platform(Platform::fixed(floor.tile, x, FLOOR_Y - self.y_offset));
            }
        }
        for &(kind, x, y) in &self.enemies {
            level.add_enemy(Enemy::spawn(kind, x, y)?);
        }
        for mover in &self.movers {
            let path = match mover.path {
                PathDef::Horizontal(min, max) => MoverPath::Horizontal { min, max },
                PathDef::Vertical(min, max) => MoverPath::Vertical { min, max },
            };
            level.add_platform(Platform::moving(mover.tile, mover.x, mover.y, path, mover.speed)?);
        }
        Ok(level)
    }
}

/// Parse a RON level table. `source` names it in error messages.
pub fn parse_levels(text: &str, source: &str) -> Result<Vec<Level>, GameError> {
    let set: LevelSet = ron::from_str(text).map_err(|e| GameError::LevelData {
        source: source.to_string(),
        message: format!("Parse error: {}", e),
    })?;
    if set.levels.is_empty() {
        return Err(GameError::NoLevels);
    }
    if set.levels.last().map(|l| l.kind) != Some(LevelKind::GameOver) {
        return Err(GameError::LevelData {
            source: source.to_string(),
            message: "the last level must be the game-over screen".to_string(),
        });
    }

    let levels = set
        .levels
        .iter()
        .map(LevelDef::build)
        .collect::<Result<Vec<_>, _>>()?;
    info!("Loaded {} levels from {}", levels.len(), source);
    Ok(levels)
}

/// Load levels from `path`, or the built-in table when `None`.
pub fn load_levels(path: Option<&Path>) -> Result<Vec<Level>, GameError> {
    match path {
        None => parse_levels(BUILTIN_LEVELS, "built-in levels"),
        Some(path) => {
            let source = path.display().to_string();
            let text = fs::read_to_string(path).map_err(|e| GameError::LevelData {
                source: source.clone(),
                message: format!("IO error: {}", e),
            })?;
            parse_levels(&text, &source)
        }
    }
}
