//! Collision tests for the rectangular arena
//!
//! All checks are discrete and inclusive: they look at the ball's position
//! after integration only, so a fast ball can pass through a paddle between
//! two frames. Nothing here moves the ball out of overlap.

use super::state::{Ball, LeftPaddle, RightPaddle};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, PADDLE_WIDTH};

/// Ball touches or overlaps the top or bottom wall
#[inline]
pub fn hits_wall(ball: &Ball) -> bool {
    ball.top() <= 0.0 || ball.bottom() >= ARENA_HEIGHT
}

/// Ball overlaps the left paddle's x-span and its center is within the
/// paddle's vertical span
pub fn hits_left_paddle(ball: &Ball, paddle: &LeftPaddle) -> bool {
    let overlaps_x = ball.left() <= paddle.x + PADDLE_WIDTH && ball.right() >= paddle.x;
    overlaps_x && paddle.covers_y(ball.pos.y)
}

/// Ball reaches the right paddle's face and its center is within the
/// paddle's vertical span.
///
/// There is no "ball already beyond the wall" check: the goal-line test
/// resets such a ball in the same tick anyway.
pub fn hits_right_paddle(ball: &Ball, paddle: &RightPaddle) -> bool {
    ball.right() >= paddle.x() && paddle.covers_y(ball.pos.y)
}

/// Ball touches the left goal line (the right side scores)
#[inline]
pub fn past_left_goal(ball: &Ball) -> bool {
    ball.left() <= 0.0
}

/// Ball touches the right goal line (the left side scores)
#[inline]
pub fn past_right_goal(ball: &Ball) -> bool {
    ball.right() >= ARENA_WIDTH
}
