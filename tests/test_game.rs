use homeward::clock::{Clock, ManualClock};
use homeward::entities::*;
use homeward::error::GameError;
use homeward::game::*;
use homeward::level::Level;
use homeward::levels::FloorDef;
use homeward::platform::{Path, Platform};

/// A stage with a long floor so the player can walk without falling.
fn stage(name: &str, limit: f32) -> Level {
    let mut level = Level::new(name, LevelKind::Stage, limit);
    let floor = FloorDef { tile: Tile::GrassMiddle, x: -5.0, length: 4000.0 };
    for x in floor.tile_xs() {
        level.add_platform(Platform::fixed(Tile::GrassMiddle, x, FLOOR_Y));
    }
    level
}

fn game_over() -> Level {
    Level::new("Game Over", LevelKind::GameOver, 800.0)
}

fn make_game() -> Game {
    Game::new(
        vec![stage("one", -1000.0), stage("two", -1000.0), game_over()],
        0,
    )
    .unwrap()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn empty_session_is_rejected() {
    assert!(matches!(Game::new(Vec::new(), 0), Err(GameError::NoLevels)));
}

#[test]
fn start_level_out_of_range_is_rejected() {
    let err = Game::new(vec![game_over()], 1).unwrap_err();
    assert!(matches!(err, GameError::Config(_)));
}

#[test]
fn session_starts_on_the_requested_level() {
    let game = Game::new(vec![stage("a", -10.0), stage("b", -10.0), game_over()], 1).unwrap();
    assert_eq!(game.current_index(), 1);
    assert_eq!(game.current_level().name, "b");
    assert_eq!(game.levels().len(), 3);
}

// ── Camera scroll ─────────────────────────────────────────────────────────────

#[test]
fn walking_past_the_right_band_scrolls_the_world() {
    let mut game = make_game();
    game.player.rect.x = 600.0;
    game.player.rect.y = 0.0;
    game.tick(0);
    assert_eq!(game.player.rect.x, SCROLL_RIGHT);
    assert_eq!(game.current_level().world_shift(), -100.0);
}

#[test]
fn walking_past_the_left_band_scrolls_back() {
    let mut game = make_game();
    game.current_level_mut().shift_world(-300.0);
    game.player.rect.x = 50.0;
    game.player.rect.y = 0.0;
    game.tick(0);
    assert_eq!(game.player.rect.x, SCROLL_LEFT);
    assert_eq!(game.current_level().world_shift(), -230.0);
}

#[test]
fn no_scrolling_back_past_the_level_start() {
    let mut game = make_game();
    game.player.rect.x = 50.0;
    game.player.rect.y = 0.0;
    game.tick(0);
    assert_eq!(game.player.rect.x, 50.0);
    assert_eq!(game.current_level().world_shift(), 0.0);
}

#[test]
fn platforms_move_before_the_player_so_riders_keep_up() {
    let mut level = Level::new("ride", LevelKind::Stage, -1000.0);
    level.add_platform(
        Platform::moving(
            Tile::StonePlatformMiddle,
            300.0,
            500.0,
            Path::Horizontal { min: 0.0, max: 1000.0 },
            2.0,
        )
        .unwrap(),
    );
    let mut game = Game::new(vec![level, game_over()], 0).unwrap();
    game.player.rect.x = 300.0;
    game.player.rect.y = 500.0 - game.player.rect.height();
    for _ in 0..5 {
        game.tick(0);
    }
    assert_eq!(game.player.rect.x, 310.0);
    assert_eq!(game.current_level().platforms()[0].rect.x, 310.0);
}

#[test]
fn rider_stays_on_top_of_a_rising_platform() {
    let mut level = Level::new("lift", LevelKind::Stage, -1000.0);
    level.add_platform(
        Platform::moving(
            Tile::StonePlatformMiddle,
            200.0,
            400.0,
            Path::Vertical { min: 100.0, max: 500.0 },
            -3.0,
        )
        .unwrap(),
    );
    let mut game = Game::new(vec![level, game_over()], 0).unwrap();
    game.player.rect.x = 150.0;
    game.player.rect.y = 400.0 - game.player.rect.height();
    game.apply(Intent::GoRight);

    for step in 1..=10 {
        game.tick(0);
        let top = game.current_level().platforms()[0].rect.top();
        assert_eq!(top, 400.0 - 3.0 * step as f32);
        assert_eq!(game.player.rect.bottom(), top);
    }
    assert_eq!(game.player.rect.x, 210.0);
}

#[test]
fn sliding_platform_pushes_a_bystander_sideways() {
    let mut level = Level::new("slide", LevelKind::Stage, -1000.0);
    level.add_platform(
        Platform::moving(
            Tile::StonePlatformMiddle,
            134.0,
            400.0,
            Path::Horizontal { min: 0.0, max: 1000.0 },
            5.0,
        )
        .unwrap(),
    );
    let mut game = Game::new(vec![level, game_over()], 0).unwrap();
    game.player.rect.x = 204.0;
    game.player.rect.y = 380.0;

    game.tick(0);
    let block = game.current_level().platforms()[0].rect;
    assert_eq!(block.right(), 209.0);
    assert_eq!(game.player.rect.left(), 209.0);
    // Pushed aside, not lifted onto the top
    assert_eq!(game.player.rect.y, 381.0);
}

// ── Level transitions ─────────────────────────────────────────────────────────

#[test]
fn reaching_the_level_limit_moves_to_the_next_level() {
    let mut game = make_game();
    game.player.rect.x = 0.0;
    for _ in 0..20 {
        game.current_level_mut().shift_world(-50.0);
    }
    assert_eq!(game.current_level().world_shift(), -1000.0);

    assert!(game.check_transition());
    assert_eq!(game.current_index(), 1);
    assert_eq!(game.player.rect.x, ENTRY_X);
}

#[test]
fn walking_right_through_a_level_advances_the_session() {
    let mut game = make_game();
    game.apply(Intent::GoRight);
    let mut ticks = 0;
    while game.current_index() == 0 && ticks < 1000 {
        game.tick(ticks);
        ticks += 1;
    }
    assert_eq!(game.current_index(), 1);
    assert_eq!(game.player.rect.x, ENTRY_X);
    assert_eq!(game.player.rect.y, SCREEN_HEIGHT - game.player.rect.height() - 25.0);
    // The finished level keeps its scroll for the rest of the session
    assert!(game.levels()[0].world_shift() <= -1000.0 + SCROLL_RIGHT);
}

#[test]
fn last_level_does_not_advance() {
    let mut game = Game::new(vec![stage("only", -10.0), game_over()], 1).unwrap();
    game.tick(0);
    assert_eq!(game.current_index(), 1);
    assert_eq!(game.player.rect.x, ENTRY_X);
}

#[test]
fn skip_level_is_clamped_to_the_list() {
    let mut game = make_game();
    game.skip_level(false);
    assert_eq!(game.current_index(), 0);
    game.skip_level(true);
    game.skip_level(true);
    game.skip_level(true);
    assert_eq!(game.current_index(), 2);
    game.skip_level(false);
    assert_eq!(game.current_index(), 1);
    assert_eq!(game.player.rect.y, SCREEN_HEIGHT - game.player.rect.height() - 25.0);
}

// ── Death and respawn ─────────────────────────────────────────────────────────

#[test]
fn death_moves_the_player_to_the_game_over_screen() {
    let mut game = make_game();
    game.player.health = 20;
    game.player.hit(1000);
    game.player.hit(1000);
    assert_eq!(game.player.health, 0);
    assert_eq!(game.player.death_time, Some(1000));

    game.tick(1000);
    assert_eq!(game.current_index(), 2);
    assert_eq!(game.current_level().kind, LevelKind::GameOver);
    let rect = game.player.rect;
    assert_eq!(rect.x, SCREEN_WIDTH / 2.0 - rect.width() / 2.0);
    assert_eq!(rect.y, SCREEN_HEIGHT - rect.height() - 40.0);
}

#[test]
fn respawn_after_the_grace_period() {
    let mut game = make_game();
    game.player.health = 10;
    game.player.hit(1000);

    game.tick(1000);
    game.tick(1000 + RESPAWN_GRACE_MS);
    assert_eq!(game.current_index(), 2);
    assert!(game.player.is_dead());

    game.tick(1001 + RESPAWN_GRACE_MS);
    assert_eq!(game.current_index(), 0);
    assert_eq!(game.player.health, 100);
    assert!(game.player.death_time.is_none());
}

#[test]
fn score_survives_a_respawn() {
    let mut game = make_game();
    game.player.score = 40;
    game.player.health = 10;
    game.player.hit(0);
    game.tick(0);
    game.tick(RESPAWN_GRACE_MS + 1);
    assert_eq!(game.current_index(), 0);
    assert_eq!(game.player.score, 40);
}

#[test]
fn invincibility_and_respawn_follow_the_clock() {
    let clock = ManualClock::new(10_000);
    let mut game = make_game();
    game.player.health = 20;

    game.player.hit(clock.now_ms());
    game.tick(clock.now_ms());
    assert!(game.player.invincible);
    assert_eq!(game.current_index(), 0);

    clock.advance(3001);
    game.tick(clock.now_ms());
    assert!(!game.player.invincible);

    game.player.hit(clock.now_ms());
    game.tick(clock.now_ms());
    assert_eq!(game.current_index(), 2);

    clock.advance(RESPAWN_GRACE_MS + 1);
    game.tick(clock.now_ms());
    assert_eq!(game.current_index(), 0);
    assert_eq!(game.player.health, 100);
}
