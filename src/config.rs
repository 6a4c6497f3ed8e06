//! Match configuration
//!
//! Built in code (`MatchConfig::default().with_difficulty(..)`) or loaded
//! from JSON handed over by the presentation layer. Missing JSON fields fall
//! back to the defaults of the classic 800x500 table.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::difficulty::{Difficulty, DifficultyProfile, require_positive};
use crate::error::ConfigError;

/// Playing field size (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Serve point
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Difficulty as written in a config: a preset name or explicit values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DifficultySetting {
    Preset(Difficulty),
    Custom(DifficultyProfile),
}

impl Default for DifficultySetting {
    fn default() -> Self {
        DifficultySetting::Preset(Difficulty::default())
    }
}

impl DifficultySetting {
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            DifficultySetting::Preset(difficulty) => difficulty.profile(),
            DifficultySetting::Custom(profile) => *profile,
        }
    }
}

/// Everything needed to start a match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub arena: Arena,
    pub difficulty: DifficultySetting,
    /// Points needed to win
    pub max_score: u32,
    pub ball_radius: f32,
    pub paddle_width: f32,
    /// Gap between each side wall and its paddle
    pub paddle_margin: f32,
    /// RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            difficulty: DifficultySetting::default(),
            max_score: DEFAULT_MAX_SCORE,
            ball_radius: BALL_RADIUS,
            paddle_width: PADDLE_WIDTH,
            paddle_margin: PADDLE_MARGIN,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Default table with the given difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::default().with_difficulty(difficulty)
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = DifficultySetting::Preset(difficulty);
        self
    }

    pub fn with_profile(mut self, profile: DifficultyProfile) -> Self {
        self.difficulty = DifficultySetting::Custom(profile);
        self
    }

    pub fn with_arena(mut self, arena: Arena) -> Self {
        self.arena = arena;
        self
    }

    pub fn with_max_score(mut self, max_score: u32) -> Self {
        self.max_score = max_score;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolved difficulty values
    pub fn profile(&self) -> DifficultyProfile {
        self.difficulty.profile()
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_score == 0 {
            return Err(ConfigError::ZeroMaxScore);
        }
        require_positive("arena.width", self.arena.width)?;
        require_positive("arena.height", self.arena.height)?;
        require_positive("ball_radius", self.ball_radius)?;
        require_positive("paddle_width", self.paddle_width)?;
        require_positive("paddle_margin", self.paddle_margin)?;

        let profile = self.profile();
        profile.validate()?;

        if profile.paddle_height > self.arena.height {
            return Err(ConfigError::PaddleTooTall {
                paddle: profile.paddle_height,
                arena: self.arena.height,
            });
        }
        if profile.ball_speed > BALL_MAX_SPEED {
            return Err(ConfigError::BallTooFast {
                speed: profile.ball_speed,
                max: BALL_MAX_SPEED,
            });
        }

        // Both paddles plus a ball-wide gap between them
        let needed = 2.0 * (self.paddle_margin + self.paddle_width) + 2.0 * self.ball_radius;
        if needed >= self.arena.width {
            return Err(ConfigError::PaddlesDoNotFit {
                needed,
                arena: self.arena.width,
            });
        }
        Ok(())
    }
}
