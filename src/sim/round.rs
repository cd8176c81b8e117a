//! Round start: re-center everything and serve

use rand::Rng;

use super::state::GameState;
use crate::consts::*;
use crate::serve_velocity;
use crate::settings::Settings;

/// Reset ball and paddles for a new point.
///
/// With `randomized_serve` the ball leaves at a uniform angle in
/// [30°, 150°] (always downward) and, half of the time, toward the left.
/// Otherwise it leaves at `(BALL_SPEED, BALL_SPEED)`.
pub fn init_round<R: Rng>(state: &mut GameState, settings: &Settings, rng: &mut R) {
    state.ball.pos.x = ARENA_WIDTH / 2.0;
    state.ball.pos.y = ARENA_HEIGHT / 2.0;

    if settings.randomized_serve {
        let angle = rng.random_range(SERVE_ANGLE_MIN_DEG..SERVE_ANGLE_MAX_DEG);
        let mut vel = serve_velocity(BALL_SPEED, angle);
        if rng.random_bool(0.5) {
            vel.x = -vel.x;
        }
        state.ball.vel = vel;
    } else {
        state.ball.vel.x = BALL_SPEED;
        state.ball.vel.y = BALL_SPEED;
    }

    state.paddle_left.y = ARENA_HEIGHT / 2.0;
    state.paddle_right.y = ARENA_HEIGHT / 2.0;
    if settings.horizontal_paddle_movement {
        state.paddle_left.x = 0.0;
    }
}
