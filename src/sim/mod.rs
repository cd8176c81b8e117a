//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame, no wall-clock time
//! - Randomness only through the RNG handed in by the caller
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod round;
pub mod state;
pub mod tick;

pub use ai::{AiPolicy, ai_displacement, ai_step};
pub use collision::{hits_left_paddle, hits_right_paddle, hits_wall, past_left_goal, past_right_goal};
pub use round::init_round;
pub use state::{Ball, GameEvent, GameState, LeftPaddle, RightPaddle, Score, Side};
pub use tick::{TickInput, tick};
