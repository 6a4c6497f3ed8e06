//! Match state and core simulation types
//!
//! Everything a tick reads or writes lives here. Cross-entity physics
//! (ball against paddle) is kept out of these types and handled in
//! `collision` and `tick`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::controller::{Controller, ManualController, PaddleController, ReactiveController};
use super::rect::Rect;
use crate::config::{Arena, MatchConfig};
use crate::consts::*;
use crate::difficulty::DifficultyProfile;
use crate::error::ConfigError;

/// Which end of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human paddle on the left wall
    Player,
    /// AI paddle on the right wall
    Opponent,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Sign of a horizontal velocity heading toward this side
    pub fn incoming_sign(self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Opponent => 1.0,
        }
    }
}

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Rallies in progress
    Running,
    /// Someone reached the max score; the table is frozen
    Ended { winner: Side },
}

/// Things that happened during the last tick (for sound/flash cues)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// Ball bounced off the top or bottom wall
    WallBounce,
    /// Ball was returned by a paddle
    PaddleHit(Side),
    /// A point was won by this side
    PointScored(Side),
    /// The match just ended
    MatchOver { winner: Side },
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Speed after every serve
    pub base_speed: f32,
    /// Current speed; grows on paddle hits, reset on serve
    pub speed: f32,
    /// Last paddle to touch the ball this rally
    pub last_hit_by: Option<Side>,
}

impl Ball {
    pub fn new(radius: f32, base_speed: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
            base_speed,
            speed: base_speed,
            last_hit_by: None,
        }
    }

    /// Put the ball on the centre spot with a fresh random launch
    ///
    /// Launch angle is uniform within 45 degrees of horizontal, toward
    /// either paddle with equal odds.
    pub fn serve<R: Rng + ?Sized>(&mut self, center: Vec2, rng: &mut R) {
        self.pos = center;
        self.speed = self.base_speed;
        let angle: f32 = rng.random_range(-MAX_BOUNCE_ANGLE..=MAX_BOUNCE_ANGLE);
        let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.vel = Vec2::new(dir * self.speed * angle.cos(), self.speed * angle.sin());
        self.last_hit_by = None;
    }

    /// Where the centre will be after one more step
    #[inline]
    pub fn next_pos(&self) -> Vec2 {
        self.pos + self.vel
    }

    /// Check if the ball is heading for the given side's wall
    pub fn is_moving_toward(&self, side: Side) -> bool {
        self.vel.x * side.incoming_sign() > 0.0
    }

    /// Integrate one tick and bounce off the top/bottom walls
    ///
    /// Side walls are not solid; crossing them is a point. Returns true if
    /// a wall bounce happened.
    pub fn advance(&mut self, arena: &Arena) -> bool {
        self.pos += self.vel;

        let mut bounced = false;
        if self.pos.y - self.radius < 0.0 {
            self.pos.y = self.radius;
            self.vel.y = -self.vel.y;
            bounced = true;
        }
        if self.pos.y + self.radius > arena.height {
            self.pos.y = arena.height - self.radius;
            self.vel.y = -self.vel.y;
            bounced = true;
        }
        bounced
    }
}

/// A paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Left edge (fixed for the match)
    pub x: f32,
    /// Top edge, always within `[0, arena.height - height]`
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Max travel per tick when stepping toward `target_y`
    pub speed: f32,
    /// Top edge the paddle is heading for
    pub target_y: f32,
}

impl Paddle {
    /// Paddle for `side`, centred vertically, `margin` away from its wall
    pub fn new(side: Side, arena: &Arena, width: f32, height: f32, margin: f32, speed: f32) -> Self {
        let x = match side {
            Side::Player => margin,
            Side::Opponent => arena.width - margin - width,
        };
        let y = arena.height / 2.0 - height / 2.0;
        Self {
            side,
            x,
            y,
            width,
            height,
            speed,
            target_y: y,
        }
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_xywh(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Lowest allowed top edge
    #[inline]
    pub fn max_y(&self, arena_height: f32) -> f32 {
        (arena_height - self.height).max(0.0)
    }

    /// Set the top edge, clamped inside the arena
    pub fn set_y_clamped(&mut self, y: f32, arena_height: f32) {
        self.y = y.clamp(0.0, self.max_y(arena_height));
    }

    /// Centre the paddle on a pointer position
    pub fn move_manual(&mut self, target_center_y: f32, arena_height: f32) {
        self.set_y_clamped(target_center_y - self.height / 2.0, arena_height);
    }

    /// One step of at most `speed` toward `target_y`, landing on it when close
    pub fn step_toward_target(&self) -> f32 {
        if self.y < self.target_y {
            (self.y + self.speed).min(self.target_y)
        } else if self.y > self.target_y {
            (self.y - self.speed).max(self.target_y)
        } else {
            self.y
        }
    }

    /// Let a controller pick the next position, then clamp it
    pub fn drive<C, R>(&mut self, controller: &mut C, ball: &Ball, arena_height: f32, rng: &mut R)
    where
        C: PaddleController,
        R: Rng + ?Sized,
    {
        let next = controller.compute_next_y(self, ball, rng);
        self.set_y_clamped(next, arena_height);
    }

    /// Track the ball the way the AI opponent does
    pub fn move_autonomous<R: Rng + ?Sized>(
        &mut self,
        ball: &Ball,
        arena_height: f32,
        accuracy: f32,
        rng: &mut R,
    ) {
        let mut controller = ReactiveController::new(accuracy);
        self.drive(&mut controller, ball, arena_height, rng);
    }
}

/// Ball as the renderer needs it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Read-only frame of match state for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub player: Rect,
    pub opponent: Rect,
    pub ball: BallView,
    pub player_score: u32,
    pub opponent_score: u32,
    pub phase: MatchPhase,
}

impl MatchSnapshot {
    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            MatchPhase::Running => None,
            MatchPhase::Ended { winner } => Some(winner),
        }
    }
}

/// One play session: two paddles, one ball, a scoreboard
#[derive(Debug, Clone)]
pub struct Match {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    arena: Arena,
    profile: DifficultyProfile,
    max_score: u32,
    /// Left paddle, steered by pointer input (or autoplay)
    pub player: Paddle,
    /// Right paddle, steered by the reactive AI
    pub opponent: Paddle,
    pub ball: Ball,
    pub(crate) player_control: Controller,
    pub(crate) opponent_control: Controller,
    pub player_score: u32,
    pub opponent_score: u32,
    pub phase: MatchPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) events: Vec<MatchEvent>,
}

impl Match {
    /// Validate the config and serve the first ball
    pub fn new(config: &MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let profile = config.profile();
        let arena = config.arena;

        let player = Paddle::new(
            Side::Player,
            &arena,
            config.paddle_width,
            profile.paddle_height,
            config.paddle_margin,
            profile.paddle_speed,
        );
        let opponent = Paddle::new(
            Side::Opponent,
            &arena,
            config.paddle_width,
            profile.paddle_height,
            config.paddle_margin,
            profile.ai_speed,
        );

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena,
            profile,
            max_score: config.max_score,
            player,
            opponent,
            ball: Ball::new(config.ball_radius, profile.ball_speed),
            player_control: Controller::Manual(ManualController::new()),
            opponent_control: Controller::Reactive(ReactiveController::new(profile.ai_accuracy)),
            player_score: 0,
            opponent_score: 0,
            phase: MatchPhase::Running,
            time_ticks: 0,
            events: Vec::new(),
        };
        state.serve();

        log::info!(
            "Match started: {}x{} arena, first to {}, seed {}",
            arena.width,
            arena.height,
            state.max_score,
            seed
        );
        Ok(state)
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            MatchPhase::Running => None,
            MatchPhase::Ended { winner } => Some(winner),
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_score,
            Side::Opponent => self.opponent_score,
        }
    }

    /// Events raised by the most recent tick
    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    /// Latch a pointer position for the player paddle (applied next tick)
    pub fn set_player_target(&mut self, center_y: f32) {
        if let Controller::Manual(manual) = &mut self.player_control {
            manual.set_target(center_y);
        }
    }

    /// Hand the player paddle to the AI (demo/idle mode) or back to input
    pub fn set_autoplay(&mut self, enabled: bool) {
        if enabled == self.autoplay() {
            return;
        }
        self.player_control = if enabled {
            Controller::Reactive(ReactiveController::new(self.profile.ai_accuracy))
        } else {
            Controller::Manual(ManualController::new())
        };
        // Don't chase a target left over from the other controller
        self.player.target_y = self.player.y;
        log::info!("Autoplay: {}", enabled);
    }

    pub fn autoplay(&self) -> bool {
        !self.player_control.is_manual()
    }

    /// Advance by one tick
    pub fn tick(&mut self, input: &super::tick::TickInput) {
        super::tick::tick(self, input);
    }

    /// Zero the scores and serve again; paddles keep their positions
    pub fn restart(&mut self) {
        self.player_score = 0;
        self.opponent_score = 0;
        self.phase = MatchPhase::Running;
        self.serve();
        log::info!("Match restarted");
    }

    /// Centre the ball and launch it at base speed
    pub fn serve(&mut self) {
        let center = self.arena.center();
        self.ball.serve(center, &mut self.rng);
    }

    /// Credit a point, re-serve, and end the match if it was the last one
    pub(crate) fn award_point(&mut self, side: Side) {
        match side {
            Side::Player => self.player_score += 1,
            Side::Opponent => self.opponent_score += 1,
        }
        log::debug!(
            "{:?} scores ({} - {})",
            side,
            self.player_score,
            self.opponent_score
        );
        self.events.push(MatchEvent::PointScored(side));
        self.serve();
    }

    /// Move to `Ended` once either side reaches the max score
    pub(crate) fn check_for_winner(&mut self) {
        if self.phase != MatchPhase::Running {
            return;
        }
        let winner = if self.player_score >= self.max_score {
            Side::Player
        } else if self.opponent_score >= self.max_score {
            Side::Opponent
        } else {
            return;
        };
        self.phase = MatchPhase::Ended { winner };
        self.events.push(MatchEvent::MatchOver { winner });
        log::info!(
            "Match over: {:?} wins {} - {}",
            winner,
            self.player_score,
            self.opponent_score
        );
    }

    /// Renderable view of the current state
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            player: self.player.bounding_box(),
            opponent: self.opponent.bounding_box(),
            ball: BallView {
                x: self.ball.pos.x,
                y: self.ball.pos.y,
                radius: self.ball.radius,
            },
            player_score: self.player_score,
            opponent_score: self.opponent_score,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;

    fn seeded(difficulty: Difficulty, seed: u64) -> Match {
        Match::new(&MatchConfig::from_difficulty(difficulty).with_seed(seed)).unwrap()
    }

    #[test]
    fn test_new_match_layout() {
        let state = seeded(Difficulty::Medium, 1);
        assert!(state.is_running());
        assert_eq!(state.player_score, 0);
        assert_eq!(state.opponent_score, 0);

        assert_eq!(state.player.x, 32.0);
        assert_eq!(state.opponent.x, 800.0 - 32.0 - 20.0);
        assert_eq!(state.player.height, 100.0);
        assert_eq!(state.player.y, 200.0);
        assert_eq!(state.opponent.speed, 7.0);
        assert_eq!(state.player.speed, 9.0);

        assert_eq!(state.ball.pos, Vec2::new(400.0, 250.0));
        assert_eq!(state.ball.speed, 7.0);
        assert!((state.ball.vel.length() - 7.0).abs() < 1e-4);
        assert!(!state.autoplay());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MatchConfig::default().with_max_score(0);
        assert!(matches!(Match::new(&config), Err(ConfigError::ZeroMaxScore)));
    }

    #[test]
    fn test_same_seed_same_serve() {
        let a = seeded(Difficulty::Hard, 424242);
        let b = seeded(Difficulty::Hard, 424242);
        assert_eq!(a.ball.vel, b.ball.vel);
    }

    #[test]
    fn test_serve_resets_rally_state() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut ball = Ball::new(13.0, 5.0);
        ball.speed = 12.5;
        ball.last_hit_by = Some(Side::Opponent);
        ball.serve(Vec2::new(400.0, 250.0), &mut rng);

        assert_eq!(ball.pos, Vec2::new(400.0, 250.0));
        assert_eq!(ball.speed, 5.0);
        assert_eq!(ball.last_hit_by, None);
        assert!((ball.vel.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_serve_distribution() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut ball = Ball::new(13.0, 7.0);
        let trials = 1000;
        let mut rightward = 0;

        for _ in 0..trials {
            ball.serve(Vec2::new(400.0, 250.0), &mut rng);
            if ball.vel.x > 0.0 {
                rightward += 1;
            }
            let angle = (ball.vel.y / ball.vel.x.abs()).atan();
            assert!(angle.abs() <= MAX_BOUNCE_ANGLE + 1e-5);
        }
        // Roughly even split between the two paddles
        assert!((400..=600).contains(&rightward), "rightward serves: {rightward}");
    }

    #[test]
    fn test_advance_integrates_velocity() {
        let arena = Arena::default();
        let mut ball = Ball::new(13.0, 5.0);
        ball.pos = Vec2::new(400.0, 250.0);
        ball.vel = Vec2::new(-4.0, 3.0);
        assert!(!ball.advance(&arena));
        assert_eq!(ball.pos, Vec2::new(396.0, 253.0));
        assert_eq!(ball.vel, Vec2::new(-4.0, 3.0));
    }

    #[test]
    fn test_advance_bounces_off_top_and_bottom() {
        let arena = Arena::default();
        let mut ball = Ball::new(13.0, 5.0);

        ball.pos = Vec2::new(400.0, 15.0);
        ball.vel = Vec2::new(3.0, -4.0);
        assert!(ball.advance(&arena));
        assert_eq!(ball.pos.y, 13.0);
        assert_eq!(ball.vel.y, 4.0);

        ball.pos = Vec2::new(400.0, 485.0);
        ball.vel = Vec2::new(3.0, 4.0);
        assert!(ball.advance(&arena));
        assert_eq!(ball.pos.y, 487.0);
        assert_eq!(ball.vel.y, -4.0);
    }

    #[test]
    fn test_advance_does_not_bounce_off_sides() {
        let arena = Arena::default();
        let mut ball = Ball::new(13.0, 5.0);
        ball.pos = Vec2::new(2.0, 250.0);
        ball.vel = Vec2::new(-5.0, 0.0);
        assert!(!ball.advance(&arena));
        assert_eq!(ball.pos.x, -3.0);
        assert_eq!(ball.vel.x, -5.0);
    }

    #[test]
    fn test_move_manual_clamps() {
        let arena = Arena::default();
        let mut paddle = Paddle::new(Side::Player, &arena, 20.0, 120.0, 32.0, 8.0);

        paddle.move_manual(250.0, arena.height);
        assert_eq!(paddle.y, 190.0);
        paddle.move_manual(-1000.0, arena.height);
        assert_eq!(paddle.y, 0.0);
        paddle.move_manual(1000.0, arena.height);
        assert_eq!(paddle.y, 380.0);
    }

    #[test]
    fn test_move_autonomous_tracks_ball() {
        let arena = Arena::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut paddle = Paddle::new(Side::Opponent, &arena, 20.0, 80.0, 32.0, 10.0);
        let mut ball = Ball::new(13.0, 9.0);
        ball.pos = Vec2::new(400.0, 60.0);
        ball.vel = Vec2::new(9.0, 0.0);

        for _ in 0..100 {
            paddle.move_autonomous(&ball, arena.height, 1.0, &mut rng);
        }
        assert_eq!(paddle.target_y, 20.0);
        assert_eq!(paddle.y, 20.0);
    }

    #[test]
    fn test_move_autonomous_clamps_to_arena() {
        let arena = Arena::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut paddle = Paddle::new(Side::Opponent, &arena, 20.0, 80.0, 32.0, 10.0);
        let mut ball = Ball::new(13.0, 9.0);
        ball.pos = Vec2::new(400.0, 13.0);
        ball.vel = Vec2::new(9.0, -2.0);

        for _ in 0..100 {
            paddle.move_autonomous(&ball, arena.height, 1.0, &mut rng);
            assert!(paddle.y >= 0.0);
        }
        // Target sits above the wall; paddle parks against it
        assert!(paddle.target_y < 0.0);
        assert_eq!(paddle.y, 0.0);
    }

    #[test]
    fn test_bounding_box() {
        let arena = Arena::default();
        let paddle = Paddle::new(Side::Opponent, &arena, 20.0, 100.0, 32.0, 7.0);
        let rect = paddle.bounding_box();
        assert_eq!(rect.left, 748.0);
        assert_eq!(rect.right, 768.0);
        assert_eq!(rect.top, 200.0);
        assert_eq!(rect.bottom, 300.0);
    }

    #[test]
    fn test_autoplay_toggle() {
        let mut state = seeded(Difficulty::Easy, 5);
        state.set_autoplay(true);
        assert!(state.autoplay());
        // Pointer input is ignored while the AI drives
        state.set_player_target(10.0);
        state.set_autoplay(false);
        assert!(!state.autoplay());
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let state = seeded(Difficulty::Easy, 6);
        let snap = state.snapshot();
        assert_eq!(snap.player, state.player.bounding_box());
        assert_eq!(snap.opponent, state.opponent.bounding_box());
        assert_eq!(snap.ball.radius, 13.0);
        assert!(snap.is_running());
        assert_eq!(snap.winner(), None);

        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"player_score\":0"));
        assert!(json.contains("\"Running\""));
    }
}
