//! Canvas Pong - a classic two-paddle arcade match
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball kinematics, collisions, AI, serves)
//! - `input`: Logical key queries consumed by the simulation
//! - `render`: Draw commands emitted for an external 2D surface
//! - `scheduler`: Fixed-cadence frame driving
//! - `settings`: Rule flags and persistence

pub mod input;
pub mod render;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use input::{InputAdapter, Key, KeySet, NoInput};
pub use render::{DrawCommand, Renderer};
pub use scheduler::Match;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Frames per second the match is designed around
    pub const TICK_RATE: u32 = 60;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_HALF_HEIGHT: f32 = PADDLE_HEIGHT / 2.0;
    /// Human paddle displacement per frame while a key is held
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 10.0;
    pub const BALL_RADIUS: f32 = BALL_SIZE / 2.0;
    /// Serve speed, restored at every round start
    pub const BALL_SPEED: f32 = 5.0;

    /// Serve angle range (degrees, measured from +x)
    pub const SERVE_ANGLE_MIN_DEG: f32 = 30.0;
    pub const SERVE_ANGLE_MAX_DEG: f32 = 150.0;

    /// Vertical velocity added per unit of impact offset from paddle center
    pub const SPIN_FACTOR: f32 = 0.05;
    /// Default cap on |vel.y| after spin
    pub const MAX_VERTICAL_SPEED: f32 = 20.0;

    /// Noisy AI speed relative to the player (before jitter)
    pub const AI_SPEED_FACTOR: f32 = 0.7;
    /// Upper bound (exclusive) of the noisy AI jitter multiplier
    pub const AI_JITTER_MAX: f32 = 2.0;
}

use consts::*;

/// Clamp a paddle center Y so the whole paddle stays inside the arena
#[inline]
pub fn clamp_paddle_y(y: f32) -> f32 {
    y.clamp(PADDLE_HALF_HEIGHT, ARENA_HEIGHT - PADDLE_HALF_HEIGHT)
}

/// Clamp the human paddle's left edge to the left half of the arena
#[inline]
pub fn clamp_paddle_x(x: f32) -> f32 {
    x.clamp(0.0, ARENA_WIDTH / 2.0 - PADDLE_WIDTH)
}

/// Velocity for a serve at `angle_deg` (degrees from +x, y pointing down)
#[inline]
pub fn serve_velocity(speed: f32, angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(speed * rad.cos(), speed * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_paddle_y_bounds() {
        assert_eq!(clamp_paddle_y(-40.0), 50.0);
        assert_eq!(clamp_paddle_y(1000.0), 550.0);
        assert_eq!(clamp_paddle_y(300.0), 300.0);
    }

    #[test]
    fn test_clamp_paddle_x_bounds() {
        assert_eq!(clamp_paddle_x(-5.0), 0.0);
        assert_eq!(clamp_paddle_x(500.0), 390.0);
        assert_eq!(clamp_paddle_x(120.0), 120.0);
    }

    #[test]
    fn test_serve_velocity_straight_down() {
        let v = serve_velocity(5.0, 90.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 5.0).abs() < 1e-5);
    }
}
