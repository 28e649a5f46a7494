//! Game configuration loaded from an INI file.
//!
//! ```ini
//! [game]
//! target_fps = 60
//! start_level = 0
//!
//! [input]
//! hold_window = 4
//!
//! [files]
//! levels = assets/levels.ron
//! log = homeward.log
//! ```
//!
//! Every key is optional. A missing file means "all defaults".

use std::path::{Path, PathBuf};

use configparser::ini::Ini;
use log::{info, warn};

use crate::error::GameError;

const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_START_LEVEL: usize = 0;
const DEFAULT_HOLD_WINDOW: u64 = 4;
const DEFAULT_LOG_PATH: &str = "homeward.log";
pub const DEFAULT_CONFIG_PATH: &str = "./homeward.ini";

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub target_fps: u32,
    pub start_level: usize,
    /// Frames a key counts as held after its last press or repeat event.
    pub hold_window: u64,
    /// Level table override; `None` uses the built-in levels.
    pub levels_path: Option<PathBuf>,
    pub log_path: PathBuf,
    /// File the values were read from; `None` when running on defaults.
    pub source: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            start_level: DEFAULT_START_LEVEL,
            hold_window: DEFAULT_HOLD_WINDOW,
            levels_path: None,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            source: None,
        }
    }
}

impl GameConfig {
    /// Read `path`, falling back to defaults if it does not exist.
    ///
    /// Nothing is logged here since the log file itself is configured by the
    /// result; call [`GameConfig::log_summary`] once logging is up.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let mut config = Self::default();
        if path.exists() {
            config.load_from_file(path)?;
        }
        Ok(config)
    }

    /// Overlay values from the INI file at `path`. Missing keys keep their
    /// current values.
    pub fn load_from_file(&mut self, path: &Path) -> Result<(), GameError> {
        let mut ini = Ini::new();
        ini.load(path)
            .map_err(|e| GameError::Config(format!("Failed to load {:?}: {}", path, e)))?;

        if let Some(fps) = ini.getuint("game", "target_fps").map_err(GameError::Config)? {
            self.target_fps = u32::try_from(fps)
                .map_err(|_| GameError::Config(format!("target_fps {} is out of range", fps)))?;
        }
        if let Some(start) = ini.getuint("game", "start_level").map_err(GameError::Config)? {
            self.start_level = usize::try_from(start)
                .map_err(|_| GameError::Config(format!("start_level {} is out of range", start)))?;
        }
        if let Some(window) = ini.getuint("input", "hold_window").map_err(GameError::Config)? {
            self.hold_window = window;
        }
        if let Some(levels) = ini.get("files", "levels") {
            self.levels_path = Some(PathBuf::from(levels));
        }
        if let Some(log) = ini.get("files", "log") {
            self.log_path = PathBuf::from(log);
        }

        self.validate()?;
        self.source = Some(path.to_path_buf());
        Ok(())
    }

    pub fn log_summary(&self, requested: &Path) {
        match &self.source {
            Some(path) => info!("Loaded config from {:?}", path),
            None => warn!("No config file at {:?}, using defaults", requested),
        }
        info!(
            "Config: fps={}, start_level={}, hold_window={}, levels={:?}",
            self.target_fps, self.start_level, self.hold_window, self.levels_path
        );
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.target_fps == 0 {
            return Err(GameError::Config("target_fps must be positive".to_string()));
        }
        Ok(())
    }
}
