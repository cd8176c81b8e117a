//! Opponent paddle controller
//!
//! The AI only ever looks at the ball's height and moves the right paddle.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::clamp_paddle_y;
use crate::consts::{AI_JITTER_MAX, AI_SPEED_FACTOR, PLAYER_SPEED};

/// Tracking strategy for the right paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiPolicy {
    /// Move `PLAYER_SPEED` toward the ball every frame
    Deterministic,
    /// Move a jittered `PLAYER_SPEED * 0.7 * [0, 2)` toward the ball
    #[default]
    Noisy,
}

/// Signed step of at most `speed` toward `target`, or 0 when already within `speed`
#[inline]
fn step_toward(current: f32, target: f32, speed: f32) -> f32 {
    if (target - current).abs() > speed {
        if target > current { speed } else { -speed }
    } else {
        0.0
    }
}

/// Vertical displacement for the right paddle this frame.
///
/// `reaction_delay` gates the noisy policy: it reacts on a frame only when a
/// uniform draw from `0..reaction_delay` comes up 0, so 1 means every frame.
pub fn ai_displacement<R: Rng>(
    policy: AiPolicy,
    reaction_delay: u32,
    ball_y: f32,
    paddle_y: f32,
    rng: &mut R,
) -> f32 {
    match policy {
        AiPolicy::Deterministic => step_toward(paddle_y, ball_y, PLAYER_SPEED),
        AiPolicy::Noisy => {
            let random_factor = rng.random::<f32>() * AI_JITTER_MAX;
            let ai_speed = PLAYER_SPEED * AI_SPEED_FACTOR * random_factor;

            if rng.random_range(0..reaction_delay.max(1)) == 0 {
                step_toward(paddle_y, ball_y, ai_speed)
            } else {
                0.0
            }
        }
    }
}

/// Move the right paddle toward the ball and keep it inside the arena
pub fn ai_step<R: Rng>(
    state: &mut GameState,
    policy: AiPolicy,
    reaction_delay: u32,
    rng: &mut R,
) {
    let dy = ai_displacement(policy, reaction_delay, state.ball.pos.y, state.paddle_right.y, rng);
    state.paddle_right.y = clamp_paddle_y(state.paddle_right.y + dy);
}
