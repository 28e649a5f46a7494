use homeward::backdrop::{Backdrop, BackdropStyle};
use homeward::enemy::Enemy;
use homeward::entities::*;
use homeward::level::Level;
use homeward::platform::{Path, Platform};
use homeward::player::Player;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_level() -> Level {
    let mut level = Level::new("test", LevelKind::Stage, -2500.0);
    level.add_platform(Platform::fixed(Tile::GrassMiddle, -5.0, FLOOR_Y));
    level.add_platform(Platform::fixed(Tile::GrassMiddle, 65.0, FLOOR_Y));
    level.add_platform(
        Platform::moving(
            Tile::StonePlatformMiddle,
            1350.0,
            300.0,
            Path::Horizontal { min: 1350.0, max: 1600.0 },
            1.0,
        )
        .unwrap(),
    );
    level.add_enemy(Enemy::spawn(EnemyKind::Flyer, 700.0, 250.0).unwrap());
    level.add_enemy(Enemy::spawn(EnemyKind::Walker, 1600.0, 550.0).unwrap());
    level
}

fn positions(level: &Level) -> Vec<(f32, f32)> {
    level
        .platforms()
        .iter()
        .map(|p| (p.rect.x, p.rect.y))
        .chain(level.enemies().iter().map(|e| (e.rect.x, e.rect.y)))
        .collect()
}

// ── World shift ───────────────────────────────────────────────────────────────

#[test]
fn shift_world_moves_every_entity_and_accumulates() {
    let mut level = make_level();
    let before = positions(&level);
    level.shift_world(-50.0);
    level.shift_world(-25.0);
    assert_eq!(level.world_shift(), -75.0);
    for ((x0, y0), (x1, y1)) in before.iter().zip(positions(&level)) {
        assert_eq!(x1, x0 - 75.0);
        assert_eq!(y1, *y0);
    }
}

#[test]
fn shift_world_round_trip_is_identity() {
    let mut level = make_level();
    let before = positions(&level);
    level.shift_world(5.0);
    level.shift_world(-5.0);
    assert_eq!(level.world_shift(), 0.0);
    assert_eq!(positions(&level), before);
}

#[test]
fn backdrop_scrolls_at_a_third_of_the_world() {
    let mut level = make_level();
    assert_eq!(level.backdrop_offset(), 0.0);
    level.shift_world(-300.0);
    assert_eq!(level.backdrop_offset(), -100.0);
    level.shift_world(200.0);
    // floor(-100 / 3)
    assert_eq!(level.backdrop_offset(), -34.0);
}

#[test]
fn backdrop_is_kept() {
    let mut rng = StdRng::seed_from_u64(3);
    let level = Level::new("sky", LevelKind::Stage, -100.0)
        .with_backdrop(Backdrop::generate(BackdropStyle::Meadow, 1200.0, &mut rng));
    assert_eq!(level.backdrop().style, BackdropStyle::Meadow);
    assert!(!level.backdrop().items.is_empty());
}

// ── Updates ───────────────────────────────────────────────────────────────────

#[test]
fn update_platforms_moves_only_moving_platforms() {
    let mut level = make_level();
    let mut player = Player::new();
    player.rect.x = -5000.0;
    level.update_platforms(&mut player);
    let xs: Vec<f32> = level.platforms().iter().map(|p| p.rect.x).collect();
    assert_eq!(xs, vec![-5.0, 65.0, 1351.0]);
}

#[test]
fn update_on_an_empty_level_is_a_no_op() {
    let mut level = Level::new("empty", LevelKind::Stage, 0.0);
    let mut player = Player::new();
    let before = player.rect;
    level.update_platforms(&mut player);
    level.update_enemies(&mut player, 0);
    assert_eq!(player.rect, before);
    assert_eq!(player.health, 100);
    assert_eq!(level.score(), 0);
}

#[test]
fn enemies_advance_once_per_update() {
    let mut level = make_level();
    let mut player = Player::new();
    player.rect.x = -5000.0;
    level.update_enemies(&mut player, 0);
    let xs: Vec<f32> = level.enemies().iter().map(|e| e.rect.x).collect();
    assert_eq!(xs, vec![701.0, 1601.0]);
}
