//! Per-frame simulation tick
//!
//! Core game loop that advances a match by exactly one step.

use super::collision::collide;
use super::state::{Match, MatchEvent, MatchPhase, Side};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer height to centre the player paddle on (latched if set)
    pub player_target: Option<f32>,
    /// Restart the match before stepping (restart button)
    pub restart: bool,
}

impl TickInput {
    pub fn pointer(y: f32) -> Self {
        Self {
            player_target: Some(y),
            ..Default::default()
        }
    }
}

/// Advance the match by one tick
pub fn tick(state: &mut Match, input: &TickInput) {
    state.events.clear();

    if input.restart {
        state.restart();
    }
    if let Some(y) = input.player_target {
        state.set_player_target(y);
    }

    // Frozen once someone has won
    if state.phase != MatchPhase::Running {
        return;
    }

    state.time_ticks += 1;
    let arena = *state.arena();

    // Player paddle: latched pointer position (or autoplay)
    state.player.drive(
        &mut state.player_control,
        &state.ball,
        arena.height,
        &mut state.rng,
    );

    if state.ball.advance(&arena) {
        state.events.push(MatchEvent::WallBounce);
    }

    state.opponent.drive(
        &mut state.opponent_control,
        &state.ball,
        arena.height,
        &mut state.rng,
    );

    // Player first, then opponent, each against the ball as it stands
    for side in [Side::Player, Side::Opponent] {
        let paddle = match side {
            Side::Player => &state.player,
            Side::Opponent => &state.opponent,
        };
        if let Some(contact) = collide(&mut state.ball, paddle) {
            log::trace!(
                "{:?} hit: angle {:.2}, speed {:.1}",
                contact.side,
                contact.angle,
                contact.speed
            );
            state.events.push(MatchEvent::PaddleHit(contact.side));
        }
    }

    // Ball fully past a side wall is a point for the other side
    let ball = &state.ball;
    if ball.pos.x - ball.radius < 0.0 {
        state.award_point(Side::Opponent);
    } else if ball.pos.x + ball.radius > arena.width {
        state.award_point(Side::Player);
    }

    state.check_for_winner();
}
