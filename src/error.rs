//! Configuration errors
//!
//! The simulation itself never fails; everything here is raised while
//! building a match from a [`crate::MatchConfig`].

/// Reasons a match configuration is rejected
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("max score must be at least 1")]
    ZeroMaxScore,

    #[error("`{field}` must be a positive number - got `{value}`")]
    NonPositive { field: &'static str, value: f32 },

    #[error("AI accuracy must lie in [0, 1] - got `{0}`")]
    AccuracyOutOfRange(f32),

    #[error("paddle height {paddle} does not fit in an arena {arena} tall")]
    PaddleTooTall { paddle: f32, arena: f32 },

    #[error("paddles need {needed} horizontal units but the arena is only {arena} wide")]
    PaddlesDoNotFit { needed: f32, arena: f32 },

    #[error("ball speed {speed} exceeds the speed cap {max}")]
    BallTooFast { speed: f32, max: f32 },

    #[error("Unknown difficulty `{0}` - expected easy, medium or hard")]
    UnknownDifficulty(String),

    #[error("Parsing failed : {0}")]
    Json(#[from] serde_json::Error),
}
