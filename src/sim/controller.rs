//! Paddle control policies
//!
//! A controller decides where a paddle wants its top edge to be this tick.
//! The paddle itself applies the arena clamp, so every policy shares the
//! same bounds handling.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle};
use crate::consts::AI_NOISE_SPAN;

/// Decision policy for one paddle
pub trait PaddleController {
    /// Desired top edge for this tick (before the arena clamp)
    ///
    /// May update `paddle.target_y` as a side effect.
    fn compute_next_y<R: Rng + ?Sized>(
        &mut self,
        paddle: &mut Paddle,
        ball: &Ball,
        rng: &mut R,
    ) -> f32;
}

/// Follows a pointer position latched by the presentation layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManualController {
    /// Pending paddle centre, consumed by the next tick
    target_center: Option<f32>,
}

impl ManualController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a new pointer position (newer calls overwrite older ones)
    pub fn set_target(&mut self, center_y: f32) {
        if center_y.is_finite() {
            self.target_center = Some(center_y);
        }
    }

    pub fn pending(&self) -> Option<f32> {
        self.target_center
    }
}

impl PaddleController for ManualController {
    fn compute_next_y<R: Rng + ?Sized>(
        &mut self,
        paddle: &mut Paddle,
        _ball: &Ball,
        _rng: &mut R,
    ) -> f32 {
        match self.target_center.take() {
            Some(center) => {
                paddle.target_y = center - paddle.height / 2.0;
                paddle.target_y
            }
            None => paddle.y,
        }
    }
}

/// Tracks the ball with an aim error that shrinks as accuracy grows
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReactiveController {
    accuracy: f32,
}

impl ReactiveController {
    pub fn new(accuracy: f32) -> Self {
        Self {
            accuracy: accuracy.clamp(0.0, 1.0),
        }
    }

    pub fn accuracy(&self) -> f32 {
        self.accuracy
    }

    /// Random aim offset: up to +/- 90 px at zero accuracy, none at 1.0
    fn aim_error<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let roll: f32 = rng.random_range(-0.5..0.5);
        roll * (1.0 - self.accuracy) * AI_NOISE_SPAN
    }
}

impl PaddleController for ReactiveController {
    fn compute_next_y<R: Rng + ?Sized>(
        &mut self,
        paddle: &mut Paddle,
        ball: &Ball,
        rng: &mut R,
    ) -> f32 {
        // Only re-aim while the ball is incoming; otherwise finish the last move
        if ball.is_moving_toward(paddle.side) {
            let prediction = ball.pos.y + self.aim_error(rng);
            paddle.target_y = prediction - paddle.height / 2.0;
        }
        paddle.step_toward_target()
    }
}

/// The controller currently steering a paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Controller {
    Manual(ManualController),
    Reactive(ReactiveController),
}

impl Controller {
    pub fn is_manual(&self) -> bool {
        matches!(self, Controller::Manual(_))
    }
}

impl PaddleController for Controller {
    fn compute_next_y<R: Rng + ?Sized>(
        &mut self,
        paddle: &mut Paddle,
        ball: &Ball,
        rng: &mut R,
    ) -> f32 {
        match self {
            Controller::Manual(manual) => manual.compute_next_y(paddle, ball, rng),
            Controller::Reactive(reactive) => reactive.compute_next_y(paddle, ball, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Arena;
    use crate::sim::state::Side;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn opponent_paddle(arena: &Arena) -> Paddle {
        Paddle::new(Side::Opponent, arena, 20.0, 100.0, 32.0, 7.0)
    }

    fn ball_at(pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(13.0, 7.0);
        ball.pos = pos;
        ball.vel = vel;
        ball
    }

    #[test]
    fn test_manual_consumes_target_once() {
        let arena = Arena::default();
        let mut paddle = Paddle::new(Side::Player, &arena, 20.0, 100.0, 32.0, 9.0);
        let ball = Ball::new(13.0, 7.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut manual = ManualController::new();

        manual.set_target(300.0);
        assert_eq!(manual.compute_next_y(&mut paddle, &ball, &mut rng), 250.0);
        assert_eq!(manual.pending(), None);

        // Nothing latched: paddle stays where it is
        paddle.y = 42.0;
        assert_eq!(manual.compute_next_y(&mut paddle, &ball, &mut rng), 42.0);
    }

    #[test]
    fn test_manual_ignores_non_finite() {
        let mut manual = ManualController::new();
        manual.set_target(f32::NAN);
        assert_eq!(manual.pending(), None);
    }

    #[test]
    fn test_perfect_accuracy_has_no_noise() {
        let arena = Arena::default();
        let mut paddle = opponent_paddle(&arena);
        let mut rng = Pcg32::seed_from_u64(99);
        let mut ai = ReactiveController::new(1.0);

        for y in [13.0, 120.5, 250.0, 487.0] {
            let ball = ball_at(Vec2::new(400.0, y), Vec2::new(5.0, 1.0));
            ai.compute_next_y(&mut paddle, &ball, &mut rng);
            assert_eq!(paddle.target_y, y - paddle.height / 2.0);
        }
    }

    #[test]
    fn test_ignores_outgoing_ball() {
        let arena = Arena::default();
        let mut paddle = opponent_paddle(&arena);
        let before = paddle.target_y;
        let mut rng = Pcg32::seed_from_u64(3);
        let mut ai = ReactiveController::new(0.5);

        let ball = ball_at(Vec2::new(400.0, 20.0), Vec2::new(-5.0, 0.0));
        let next = ai.compute_next_y(&mut paddle, &ball, &mut rng);
        assert_eq!(paddle.target_y, before);
        assert_eq!(next, paddle.y);
    }

    #[test]
    fn test_noise_stays_in_band() {
        let arena = Arena::default();
        let mut paddle = opponent_paddle(&arena);
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ai = ReactiveController::new(0.0);
        let ball = ball_at(Vec2::new(400.0, 250.0), Vec2::new(5.0, 0.0));

        let mut spread = 0.0f32;
        for _ in 0..500 {
            ai.compute_next_y(&mut paddle, &ball, &mut rng);
            let error = paddle.target_y - (250.0 - paddle.height / 2.0);
            assert!(error.abs() <= AI_NOISE_SPAN / 2.0);
            spread = spread.max(error.abs());
        }
        // Zero accuracy should actually miss by a wide margin sometimes
        assert!(spread > 45.0);
    }

    #[test]
    fn test_moves_at_speed_without_overshoot() {
        let arena = Arena::default();
        let mut paddle = opponent_paddle(&arena);
        let mut rng = Pcg32::seed_from_u64(5);
        let mut ai = ReactiveController::new(1.0);
        let start = paddle.y;

        // Target 10 px below: first step is a full 7, second lands exactly
        let ball = ball_at(
            Vec2::new(400.0, start + paddle.height / 2.0 + 10.0),
            Vec2::new(5.0, 0.0),
        );
        let next = ai.compute_next_y(&mut paddle, &ball, &mut rng);
        assert_eq!(next, start + 7.0);
        paddle.y = next;
        let next = ai.compute_next_y(&mut paddle, &ball, &mut rng);
        assert_eq!(next, start + 10.0);
    }

    #[test]
    fn test_enum_dispatch() {
        let arena = Arena::default();
        let mut paddle = opponent_paddle(&arena);
        let mut rng = Pcg32::seed_from_u64(11);
        let ball = ball_at(Vec2::new(400.0, 100.0), Vec2::new(5.0, 0.0));

        let mut control = Controller::Reactive(ReactiveController::new(1.0));
        assert!(!control.is_manual());
        control.compute_next_y(&mut paddle, &ball, &mut rng);
        assert_eq!(paddle.target_y, 100.0 - paddle.height / 2.0);
    }
}
