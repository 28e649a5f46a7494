//! Error type for configuration, level data, and terminal I/O.
//!
//! The physics core never fails; everything here is raised while building
//! a session or talking to the terminal.

use std::fmt;

#[derive(Debug)]
pub enum GameError {
    /// A boundary pair with `min > max`.
    InvalidBoundary { what: &'static str, min: f32, max: f32 },
    /// Level table unreadable or malformed.
    LevelData { source: String, message: String },
    Config(String),
    /// A session needs at least one level.
    NoLevels,
    Io(std::io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidBoundary { what, min, max } => {
                write!(f, "{} boundary is inverted: min {} > max {}", what, min, max)
            }
            GameError::LevelData { source, message } => {
                write!(f, "Failed to load levels from {}: {}", source, message)
            }
            GameError::Config(msg) => write!(f, "Configuration error: {}", msg),
            GameError::NoLevels => write!(f, "No levels to play"),
            GameError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}

/// Reject a boundary pair whose ends are swapped.
pub(crate) fn check_boundary(what: &'static str, min: f32, max: f32) -> Result<(), GameError> {
    if min > max {
        Err(GameError::InvalidBoundary { what, min, max })
    } else {
        Ok(())
    }
}
