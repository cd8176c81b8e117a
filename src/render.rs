//! Draw commands for a 2D surface
//!
//! The simulation decides what is on screen; a [`Renderer`] decides how.
//! Coordinates are arena units with the origin at the top-left corner.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::GameState;

/// One 2D drawing primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Clear the whole surface
    Clear { width: f32, height: f32 },
    /// Filled axis-aligned rectangle, `(x, y)` is the top-left corner
    FillRect { x: f32, y: f32, width: f32, height: f32 },
    /// Filled circle
    FillCircle { x: f32, y: f32, radius: f32 },
}

/// Something that can put a frame on screen
pub trait Renderer {
    fn draw(&mut self, commands: &[DrawCommand]);
}

/// Collects frames, handy for headless hosts and tests
impl Renderer for Vec<Vec<DrawCommand>> {
    fn draw(&mut self, commands: &[DrawCommand]) {
        self.push(commands.to_vec());
    }
}

/// Commands for the current frame, in paint order:
/// clear, left paddle, right paddle, ball
pub fn draw_list(state: &GameState) -> [DrawCommand; 4] {
    [
        DrawCommand::Clear {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        },
        DrawCommand::FillRect {
            x: state.paddle_left.x,
            y: state.paddle_left.y - PADDLE_HALF_HEIGHT,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        },
        DrawCommand::FillRect {
            x: state.paddle_right.x(),
            y: state.paddle_right.y - PADDLE_HALF_HEIGHT,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        },
        DrawCommand::FillCircle {
            x: state.ball.pos.x,
            y: state.ball.pos.y,
            radius: state.ball.radius,
        },
    ]
}
