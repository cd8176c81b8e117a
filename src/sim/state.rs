//! Game state and core simulation types
//!
//! One `GameState` per match. It owns no external resources, so a host may
//! drop it at any point between ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which end of the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Human-controlled paddle, defends x = 0
    Left,
    /// AI-controlled paddle, defends x = ARENA_WIDTH
    Right,
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom wall
    WallBounce,
    /// Ball bounced off a paddle
    PaddleHit { side: Side },
    /// Ball left the arena; `scorer` is the side that won the point
    PointScored { scorer: Side },
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0),
            vel: Vec2::new(BALL_SPEED, BALL_SPEED),
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    /// Leftmost extent
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    /// Rightmost extent
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// The human paddle. `x` is its left edge, `y` its vertical center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeftPaddle {
    pub x: f32,
    pub y: f32,
}

impl Default for LeftPaddle {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: ARENA_HEIGHT / 2.0,
        }
    }
}

impl LeftPaddle {
    /// True if `y` lies within the paddle's vertical span (inclusive)
    pub fn covers_y(&self, y: f32) -> bool {
        y >= self.y - PADDLE_HALF_HEIGHT && y <= self.y + PADDLE_HALF_HEIGHT
    }
}

/// The AI paddle. Its left edge is pinned to `ARENA_WIDTH - PADDLE_WIDTH`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RightPaddle {
    pub y: f32,
}

impl Default for RightPaddle {
    fn default() -> Self {
        Self {
            y: ARENA_HEIGHT / 2.0,
        }
    }
}

impl RightPaddle {
    /// Left edge of the paddle
    #[inline]
    pub fn x(&self) -> f32 {
        ARENA_WIDTH - PADDLE_WIDTH
    }

    pub fn covers_y(&self, y: f32) -> bool {
        y >= self.y - PADDLE_HALF_HEIGHT && y <= self.y + PADDLE_HALF_HEIGHT
    }
}

/// Points won this session. Lives only as long as the match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn award(&mut self, scorer: Side) {
        match scorer {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }
}

/// Complete match state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub ball: Ball,
    pub paddle_left: LeftPaddle,
    pub paddle_right: RightPaddle,
    pub score: Score,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Centered ball moving right and down, both paddles centered
    pub fn new() -> Self {
        Self {
            ball: Ball::default(),
            paddle_left: LeftPaddle::default(),
            paddle_right: RightPaddle::default(),
            score: Score::default(),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_centered() {
        let state = GameState::new();
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(5.0, 5.0));
        assert_eq!(state.paddle_left.x, 0.0);
        assert_eq!(state.paddle_left.y, 300.0);
        assert_eq!(state.paddle_right.y, 300.0);
        assert_eq!(state.paddle_right.x(), 790.0);
    }

    #[test]
    fn test_paddle_covers_y_is_inclusive() {
        let paddle = LeftPaddle { x: 0.0, y: 300.0 };
        assert!(paddle.covers_y(250.0));
        assert!(paddle.covers_y(350.0));
        assert!(!paddle.covers_y(350.1));
    }

    #[test]
    fn test_score_award_and_drain_events() {
        let mut state = GameState::new();
        state.score.award(Side::Right);
        state.events.push(GameEvent::PointScored { scorer: Side::Right });
        assert_eq!(state.score, Score { left: 0, right: 1 });

        let events = state.drain_events();
        assert_eq!(events, vec![GameEvent::PointScored { scorer: Side::Right }]);
        assert!(state.events.is_empty());
    }
}
