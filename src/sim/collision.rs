//! Ball against paddle collision detection and response
//!
//! Contact is tested against the ball's *next* position so a fast ball
//! cannot skip through a 20 px paddle between two ticks. The response
//! ignores the incoming angle entirely: where the ball meets the paddle
//! decides where it goes.

use super::state::{Ball, Paddle, Side};
use crate::consts::{BALL_MAX_SPEED, BALL_SPEED_STEP, MAX_BOUNCE_ANGLE};

/// What a resolved paddle hit did to the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Paddle that returned the ball
    pub side: Side,
    /// Outgoing angle from horizontal (radians, positive is downward)
    pub angle: f32,
    /// Ball speed after the hit
    pub speed: f32,
}

/// Check whether the ball will overlap the paddle after its next step
pub fn predicted_contact(ball: &Ball, paddle: &Paddle) -> bool {
    paddle
        .bounding_box()
        .overlaps_circle(ball.next_pos(), ball.radius)
}

/// Outgoing angle for a ball meeting the paddle at height `ball_y`
///
/// Centre hits go straight back, edge hits leave at 45 degrees.
pub fn bounce_angle(ball_y: f32, paddle: &Paddle) -> f32 {
    let half_height = paddle.height / 2.0;
    let normalized = ((ball_y - paddle.center_y()) / half_height).clamp(-1.0, 1.0);
    normalized * MAX_BOUNCE_ANGLE
}

/// Send the ball back off `paddle`
///
/// Pushes the ball clear of the paddle face it came from so the next tick
/// cannot hit again, speeds it up (capped) and aims it by hit position.
pub fn resolve_contact(ball: &mut Ball, paddle: &Paddle) -> Contact {
    let rect = paddle.bounding_box();
    let was_moving_left = ball.vel.x < 0.0;

    if was_moving_left {
        ball.pos.x = rect.right + ball.radius;
    } else {
        ball.pos.x = rect.left - ball.radius;
    }

    let angle = bounce_angle(ball.pos.y, paddle);
    ball.speed = (ball.speed + BALL_SPEED_STEP).min(BALL_MAX_SPEED);

    let direction = if was_moving_left { 1.0 } else { -1.0 };
    ball.vel.x = direction * ball.speed * angle.cos();
    ball.vel.y = ball.speed * angle.sin();
    ball.last_hit_by = Some(paddle.side);

    Contact {
        side: paddle.side,
        angle,
        speed: ball.speed,
    }
}

/// Test for contact and resolve it; leaves everything untouched on a miss
pub fn collide(ball: &mut Ball, paddle: &Paddle) -> Option<Contact> {
    if predicted_contact(ball, paddle) {
        Some(resolve_contact(ball, paddle))
    } else {
        None
    }
}
