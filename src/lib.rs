//! Pongify - a two-paddle Pong simulation with a reactive AI opponent
//!
//! Core modules:
//! - `sim`: Per-tick simulation (ball physics, paddle control, scoring)
//! - `config`: Match configuration and validation
//! - `difficulty`: Named difficulty presets
//! - `frame`: Fixed-timestep frame clock for presentation adapters
//!
//! Rendering, menus and input wiring live outside this crate. An adapter
//! feeds [`sim::TickInput`] into [`sim::tick`] once per frame and draws the
//! resulting [`sim::MatchSnapshot`].

pub mod config;
pub mod difficulty;
pub mod error;
pub mod frame;
pub mod sim;

pub use config::{Arena, MatchConfig};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use error::ConfigError;
pub use frame::FrameClock;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the clock will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 500.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 20.0;
    /// Gap between a side wall and the paddle facing it
    pub const PADDLE_MARGIN: f32 = 32.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 13.0;
    /// Speed gained on every paddle hit (units per tick)
    pub const BALL_SPEED_STEP: f32 = 0.5;
    /// Maximum ball speed (units per tick)
    pub const BALL_MAX_SPEED: f32 = 18.0;
    /// Steepest launch/bounce angle from horizontal (45 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

    /// Width of the AI prediction error band at zero accuracy (pixels)
    pub const AI_NOISE_SPAN: f32 = 180.0;

    /// Points needed to win a match
    pub const DEFAULT_MAX_SCORE: u32 = 10;
}
