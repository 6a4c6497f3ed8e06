//! Difficulty presets
//!
//! A difficulty is picked once from the menu before a match starts and never
//! changes while it runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Named difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Tuning values for this level
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                ball_speed: 5.0,
                ai_speed: 5.0,
                paddle_speed: 8.0,
                paddle_height: 120.0,
                ai_accuracy: 0.70,
            },
            Difficulty::Medium => DifficultyProfile {
                ball_speed: 7.0,
                ai_speed: 7.0,
                paddle_speed: 9.0,
                paddle_height: 100.0,
                ai_accuracy: 0.85,
            },
            Difficulty::Hard => DifficultyProfile {
                ball_speed: 9.0,
                ai_speed: 10.0,
                paddle_speed: 10.0,
                paddle_height: 80.0,
                ai_accuracy: 0.98,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Speeds and sizes that make up a difficulty level
///
/// All speeds are in arena units per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Ball speed at every serve
    pub ball_speed: f32,
    /// Opponent paddle speed
    pub ai_speed: f32,
    /// Player paddle speed (only used while autoplay steers the player)
    pub paddle_speed: f32,
    /// Height of both paddles
    pub paddle_height: f32,
    /// Opponent aim accuracy in [0, 1]; 1.0 tracks the ball perfectly
    pub ai_accuracy: f32,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::default().profile()
    }
}

impl From<Difficulty> for DifficultyProfile {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.profile()
    }
}

impl DifficultyProfile {
    /// Check the profile on its own (arena-independent rules)
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("ball_speed", self.ball_speed)?;
        require_positive("ai_speed", self.ai_speed)?;
        require_positive("paddle_speed", self.paddle_speed)?;
        require_positive("paddle_height", self.paddle_height)?;
        if !(0.0..=1.0).contains(&self.ai_accuracy) {
            return Err(ConfigError::AccuracyOutOfRange(self.ai_accuracy));
        }
        Ok(())
    }
}

/// Reject zero, negative and NaN values
pub(crate) fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
