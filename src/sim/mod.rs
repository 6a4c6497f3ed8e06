//! Match simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed step per tick, no wall-clock time
//! - Seeded RNG only (owned by the match)
//! - No rendering or platform dependencies

pub mod collision;
pub mod controller;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Contact, bounce_angle, collide, predicted_contact, resolve_contact};
pub use controller::{Controller, ManualController, PaddleController, ReactiveController};
pub use rect::Rect;
pub use state::{Ball, BallView, Match, MatchEvent, MatchPhase, MatchSnapshot, Paddle, Side};
pub use tick::{TickInput, tick};
