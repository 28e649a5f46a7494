mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use log::info;

use homeward::clock::{Clock, MonotonicClock};
use homeward::config::{GameConfig, DEFAULT_CONFIG_PATH};
use homeward::entities::Intent;
use homeward::error::GameError;
use homeward::game::Game;
use homeward::hud::{HealthHud, ScoreHud};
use homeward::levels::load_levels;

/// Homeward, a side-scrolling platformer for the terminal.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// RON level table to play instead of the built-in levels.
    #[arg(long, value_name = "PATH")]
    levels: Option<PathBuf>,

    /// Index of the level to start on.
    #[arg(long, value_name = "N")]
    start_level: Option<usize>,

    /// Frame rate cap.
    #[arg(long, value_name = "N")]
    fps: Option<u32>,

    /// Log file (the terminal itself is busy with the game).
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Returns true if `key` was seen within the last `window` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64, window: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= window)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64, window: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame, window))
}

const LEFT_KEYS: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const DOWN_KEYS: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key. Each frame the live set of held keys is
/// turned into intents, so Jump + a direction work together. Keys expire
/// after `hold_window` quiet frames on terminals that never report releases;
/// keyboard-enhancement terminals remove them on release right away.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> std::io::Result<()> {
    let clock = MonotonicClock::new();
    let frame_time = Duration::from_secs(1) / config.target_fps;
    let window = config.hold_window;

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut health_hud = HealthHud::new(game.player.health);
    let mut score_hud = ScoreHud::new(game.player.score);
    let mut was_moving = false;
    let mut was_ducking = false;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Pending key events ────────────────────────────────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Left if modifiers.contains(KeyModifiers::SHIFT) => {
                            game.skip_level(false);
                        }
                        KeyCode::Right if modifiers.contains(KeyModifiers::SHIFT) => {
                            game.skip_level(true);
                        }
                        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char(' ') => {
                            game.apply(Intent::Jump);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Held keys → intents ───────────────────────────────────────────────
        let left = any_held(&key_frame, LEFT_KEYS, frame, window);
        let right = any_held(&key_frame, RIGHT_KEYS, frame, window);
        let down = any_held(&key_frame, DOWN_KEYS, frame, window);

        if left && !right {
            game.apply(Intent::GoLeft);
        } else if right && !left {
            game.apply(Intent::GoRight);
        } else if was_moving {
            game.apply(Intent::Stop);
        }
        was_moving = left != right;

        if down && !was_ducking {
            game.apply(Intent::Duck);
        } else if !down && was_ducking {
            game.apply(Intent::StandUp);
        }
        was_ducking = down;

        game.tick(clock.now_ms());

        health_hud.observe(game.player.health);
        score_hud.observe(game.player.score);
        display::render(out, game, &health_hud, &score_hud, frame)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<(), GameError> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<(), GameError> {
    let cli = Cli::parse();

    let mut config = GameConfig::load(&cli.config)?;
    if let Some(levels) = cli.levels {
        config.levels_path = Some(levels);
    }
    if let Some(start) = cli.start_level {
        config.start_level = start;
    }
    if let Some(fps) = cli.fps {
        config.target_fps = fps;
    }
    if let Some(log) = cli.log {
        config.log_path = log;
    }
    config.validate()?;
    init_logging(&config.log_path)?;
    config.log_summary(&cli.config);

    let levels = load_levels(config.levels_path.as_deref())?;
    let mut game = Game::new(levels, config.start_level)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for release and repeat events. Terminals without the kitty
    // protocol ignore this and fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads happen on their own thread; the loop only polls the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, &mut game, &rx, &config);

    // Restore the terminal even when the loop failed
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("Quit with score {}", game.player.score);
    result.map_err(GameError::from)
}
