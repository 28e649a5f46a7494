//! Homeward: a side-scrolling platformer core.
//!
//! The library owns all game state and rules and never touches the terminal;
//! the `homeward` binary reads input, drives [`game::Game::tick`] at a fixed
//! rate, and draws whatever the core exposes.

pub mod backdrop;
pub mod clock;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod game;
pub mod hud;
pub mod level;
pub mod levels;
pub mod platform;
pub mod player;
