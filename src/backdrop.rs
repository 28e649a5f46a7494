//! Background scenery behind a level.
//!
//! Levels carry a seed instead of a background image; the scenery is scattered
//! once at level construction so it stays put for the whole session. It
//! scrolls at a third of the world speed, which the renderer gets from
//! `Level::backdrop_offset`.

use rand::Rng;
use serde::Deserialize;

use crate::entities::{FLOOR_Y, SCREEN_WIDTH};

const CLOUD_SPACING: f32 = 140.0;
const HILL_SPACING: f32 = 260.0;
const SKY_TOP: f32 = 20.0;
const SKY_BOTTOM: f32 = 260.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum BackdropStyle {
    /// Clouds over rolling hills.
    Meadow,
    /// Clouds over snowy peaks.
    Ice,
    /// Sparse stars, no ground features.
    Night,
    /// Empty sky (menus and end screens).
    Plain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct BackdropDef {
    pub seed: u64,
    pub style: BackdropStyle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneryKind {
    Cloud,
    Hill,
    Peak,
    Star,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scenery {
    pub x: f32,
    pub y: f32,
    pub kind: SceneryKind,
}

#[derive(Clone, Debug)]
pub struct Backdrop {
    pub style: BackdropStyle,
    pub items: Vec<Scenery>,
}

impl Backdrop {
    /// Scatter scenery across `span` pixels of parallax-scrolled background.
    /// All randomness comes through `rng` so a seeded generator reproduces the
    /// same sky every time.
    pub fn generate(style: BackdropStyle, span: f32, rng: &mut impl Rng) -> Self {
        let span = span.max(SCREEN_WIDTH);
        let mut items = Vec::new();

        let sky = match style {
            BackdropStyle::Meadow | BackdropStyle::Ice => Some((SceneryKind::Cloud, CLOUD_SPACING)),
            BackdropStyle::Night => Some((SceneryKind::Star, CLOUD_SPACING / 3.0)),
            BackdropStyle::Plain => None,
        };
        if let Some((kind, spacing)) = sky {
            let count = (span / spacing) as usize;
            for i in 0..count {
                let x = i as f32 * spacing + rng.gen_range(0.0..spacing);
                let y = rng.gen_range(SKY_TOP..SKY_BOTTOM);
                items.push(Scenery { x, y, kind });
            }
        }

        let ground = match style {
            BackdropStyle::Meadow => Some(SceneryKind::Hill),
            BackdropStyle::Ice => Some(SceneryKind::Peak),
            _ => None,
        };
        if let Some(kind) = ground {
            let count = (span / HILL_SPACING) as usize;
            for i in 0..count {
                let x = i as f32 * HILL_SPACING + rng.gen_range(0.0..HILL_SPACING / 2.0);
                let y = FLOOR_Y - rng.gen_range(60.0..180.0);
                items.push(Scenery { x, y, kind });
            }
        }

        Self { style, items }
    }

    pub fn empty() -> Self {
        Self { style: BackdropStyle::Plain, items: Vec::new() }
    }
}
