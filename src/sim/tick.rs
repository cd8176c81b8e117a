//! One simulation frame
//!
//! Order matters and is fixed: integrate, wall bounce, left paddle, right
//! paddle, human paddle, AI paddle, goal check. The goal check runs last
//! against the integrated position, so a bounce earlier in the same frame
//! does not save a ball that is already on the goal line.

use rand::Rng;

use super::ai::ai_step;
use super::collision::{
    hits_left_paddle, hits_right_paddle, hits_wall, past_left_goal, past_right_goal,
};
use super::round::init_round;
use super::state::{GameEvent, GameState, Side};
use crate::consts::*;
use crate::input::{InputAdapter, Key};
use crate::settings::Settings;
use crate::{clamp_paddle_x, clamp_paddle_y};

/// Human paddle displacement for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub move_x: f32,
    pub move_y: f32,
}

impl TickInput {
    /// Sample the held keys.
    ///
    /// Opposite keys do not cancel: Down beats Up and Right beats Left.
    pub fn from_adapter(input: &impl InputAdapter) -> Self {
        let mut move_y = 0.0;
        if input.is_pressed(Key::Up) {
            move_y = -PLAYER_SPEED;
        }
        if input.is_pressed(Key::Down) {
            move_y = PLAYER_SPEED;
        }

        let mut move_x = 0.0;
        if input.is_pressed(Key::Left) {
            move_x = -PLAYER_SPEED;
        }
        if input.is_pressed(Key::Right) {
            move_x = PLAYER_SPEED;
        }

        Self { move_x, move_y }
    }
}

/// Advance the match by one frame
pub fn tick<R: Rng>(state: &mut GameState, input: &TickInput, settings: &Settings, rng: &mut R) {
    state.time_ticks += 1;

    // Integrate
    state.ball.pos += state.ball.vel;

    // Top/bottom walls. No position correction: the ball may sit in the
    // wall for a frame.
    if hits_wall(&state.ball) {
        state.ball.vel.y = -state.ball.vel.y;
        state.events.push(GameEvent::WallBounce);
    }

    if hits_left_paddle(&state.ball, &state.paddle_left) {
        state.ball.vel.x = -state.ball.vel.x;
        if settings.paddle_spin {
            // Off-center hits steer the rebound
            state.ball.vel.y += (state.ball.pos.y - state.paddle_left.y) * SPIN_FACTOR;
            // max/min rather than clamp: an unchecked NaN cap leaves vel.y alone
            let cap = settings.max_vertical_speed.abs();
            state.ball.vel.y = state.ball.vel.y.max(-cap).min(cap);
        }
        state.events.push(GameEvent::PaddleHit { side: Side::Left });
    }

    if hits_right_paddle(&state.ball, &state.paddle_right) {
        state.ball.vel.x = -state.ball.vel.x;
        state.events.push(GameEvent::PaddleHit { side: Side::Right });
    }

    // Human paddle
    state.paddle_left.y = clamp_paddle_y(state.paddle_left.y + input.move_y);
    if settings.horizontal_paddle_movement {
        state.paddle_left.x = clamp_paddle_x(state.paddle_left.x + input.move_x);
    }

    ai_step(state, settings.ai_policy, settings.ai_reaction_delay, rng);

    if !state.ball.pos.is_finite() || !state.ball.vel.is_finite() {
        log::warn!(
            "Non-finite ball state at tick {} (pos {:?}, vel {:?}), re-serving",
            state.time_ticks,
            state.ball.pos,
            state.ball.vel
        );
        init_round(state, settings, rng);
        return;
    }

    let scorer = if past_right_goal(&state.ball) {
        Some(Side::Left)
    } else if past_left_goal(&state.ball) {
        Some(Side::Right)
    } else {
        None
    };

    if let Some(scorer) = scorer {
        state.score.award(scorer);
        state.events.push(GameEvent::PointScored { scorer });
        log::debug!(
            "Point to {:?} at tick {} ({}-{})",
            scorer,
            state.time_ticks,
            state.score.left,
            state.score.right
        );
        init_round(state, settings, rng);
    }

    log::trace!(
        "tick {} ball=({:.1}, {:.1}) vel=({:.2}, {:.2})",
        state.time_ticks,
        state.ball.pos.x,
        state.ball.pos.y,
        state.ball.vel.x,
        state.ball.vel.y
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeySet, NoInput};
    use crate::sim::AiPolicy;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn classic() -> (GameState, Settings, Pcg32) {
        (GameState::new(), Settings::classic(), Pcg32::seed_from_u64(12345))
    }

    #[test]
    fn test_first_tick_moves_ball_diagonally() {
        let (mut state, settings, mut rng) = classic();
        tick(&mut state, &TickInput::default(), &settings, &mut rng);

        assert_eq!(state.ball.pos, Vec2::new(405.0, 305.0));
        assert_eq!(state.ball.vel, Vec2::new(5.0, 5.0));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_top_wall_bounce() {
        let (mut state, settings, mut rng) = classic();
        state.ball.pos = Vec2::new(400.0, 9.0);
        state.ball.vel = Vec2::new(5.0, -5.0);

        tick(&mut state, &TickInput::default(), &settings, &mut rng);
        assert_eq!(state.ball.pos.y, 4.0);
        assert_eq!(state.ball.vel.y, 5.0);
        assert!(state.events.contains(&GameEvent::WallBounce));
    }

    #[test]
    fn test_bottom_wall_bounce_without_position_correction() {
        let (mut state, settings, mut rng) = classic();
        state.ball.pos = Vec2::new(400.0, 593.0);
        state.ball.vel = Vec2::new(5.0, 5.0);

        tick(&mut state, &TickInput::default(), &settings, &mut rng);
        assert_eq!(state.ball.pos.y, 598.0);
        assert_eq!(state.ball.vel.y, -5.0);
    }

    #[test]
    fn test_left_paddle_returns_ball() {
        let (mut state, settings, mut rng) = classic();
        state.ball.pos = Vec2::new(13.0, 320.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);

        tick(&mut state, &TickInput::default(), &settings, &mut rng);
        assert_eq!(state.ball.pos, Vec2::new(8.0, 320.0));
        assert_eq!(state.ball.vel.x, 5.0);
        assert_eq!(state.ball.vel.y, 0.0);
        assert!(state.events.contains(&GameEvent::PaddleHit { side: Side::Left }));
    }

    #[test]
    fn test_left_paddle_spin_follows_offset() {
        let (mut state, mut settings, mut rng) = classic();
        settings.paddle_spin = true;
        state.ball.pos = Vec2::new(13.0, 320.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);

        tick(&mut state, &TickInput::default(), &settings, &mut rng);
        assert_eq!(state.ball.vel.x, 5.0);
        assert!((state.ball.vel.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_spin_is_capped() {
        let (mut state, mut settings, mut rng) = classic();
        settings.paddle_spin = true;
        settings.max_vertical_speed = 3.0;
        state.ball.pos = Vec2::new(13.0, 300.0);
        state.ball.vel = Vec2::new(-5.0, 2.5);
        state.paddle_left.y = 260.0;

        tick(&mut state, &TickInput::default(), &settings, &mut rng);
        assert_eq!(state.ball.vel.y, 3.0);
    }

    #[test]
    fn test_unchecked_spin_cap_does_not_panic() {
        let (mut state, mut settings, mut rng) = classic();
        settings.paddle_spin = true;
        settings.max_vertical_speed = f32::NAN;
        state.ball.pos = Vec2::new(13.0, 320.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);

        tick(&mut state, &TickInput::default(), &settings, &mut rng);
        assert_eq!(state.ball.vel.x, 5.0);
        assert!((state.ball.vel.y - 1.0).abs() < 1e-5);

        settings.max_vertical_speed = -0.5;
        state.ball.pos = Vec2::new(13.0, 320.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);
        tick(&mut state, &TickInput::default(), &settings, &mut rng);
        assert_eq!(state.ball.vel.y, 0.5);
    }

    #[test]
    fn test_wall_and_paddle_flip_in_same_tick() {
        let (mut state, settings, mut rng) = classic();
        state.paddle_left.y = 50.0;
        state.ball.pos = Vec2::new(13.0, 9.0);
        state.ball.vel = Vec2::new(-5.0, -5.0);

        tick(&mut state, &TickInput::default(), &settings, &mut rng);
        assert_eq!(state.ball.pos, Vec2::new(8.0, 4.0));
        assert_eq!(state.ball.vel, Vec2::new(5.0, 5.0));
        assert!(state.events.contains(&GameEvent::WallBounce));
        assert!(state.events.contains(&GameEvent::PaddleHit { side: Side::Left }));
    }

    #[test]
    fn test_right_paddle_returns_ball() {
        let (mut state, settings, mut rng) = classic();
        state.ball.pos = Vec2::new(782.0, 300.0);
        state.ball.vel = Vec2::new(5.0, 0.0);

        tick(&mut state, &TickInput::default(), &settings, &mut rng);
        assert_eq!(state.ball.pos.x, 787.0);
        assert_eq!(state.ball.vel.x, -5.0);
        assert_eq!(state.score.left, 0);
    }

    #[test]
    fn test_right_goal_resets_and_scores() {
        let (mut state, settings, mut rng) = classic();
        state.ball.pos = Vec2::new(791.0, 100.0);
        state.ball.vel = Vec2::new(5.0, 0.0);

        tick(&mut state, &TickInput::default(), &settings, &mut rng);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(5.0, 5.0));
        assert_eq!(state.score.left, 1);
        assert!(state.events.contains(&GameEvent::PointScored { scorer: Side::Left }));
    }

    #[test]
    fn test_left_goal_scores_for_right() {
        let (mut state, settings, mut rng) = classic();
        state.ball.pos = Vec2::new(9.0, 500.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);

        tick(&mut state, &TickInput::default(), &settings, &mut rng);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.score.right, 1);
    }

    #[test]
    fn test_bounce_on_goal_line_still_resets() {
        let (mut state, settings, mut rng) = classic();
        state.ball.pos = Vec2::new(792.0, 300.0);
        state.ball.vel = Vec2::new(5.0, 0.0);

        tick(&mut state, &TickInput::default(), &settings, &mut rng);
        assert_eq!(state.ball.pos.x, 400.0);
        assert!(state.events.contains(&GameEvent::PaddleHit { side: Side::Right }));
        assert_eq!(state.score.left, 1);
    }

    #[test]
    fn test_down_wins_over_up() {
        let keys = KeySet::with(&[Key::Up, Key::Down]);
        let input = TickInput::from_adapter(&keys);
        assert_eq!(input.move_y, PLAYER_SPEED);

        let keys = KeySet::with(&[Key::Left, Key::Right, Key::Up]);
        let input = TickInput::from_adapter(&keys);
        assert_eq!(input.move_x, PLAYER_SPEED);
        assert_eq!(input.move_y, -PLAYER_SPEED);

        assert_eq!(TickInput::from_adapter(&NoInput), TickInput::default());
    }

    #[test]
    fn test_horizontal_movement_only_when_enabled() {
        let (mut state, mut settings, mut rng) = classic();
        let input = TickInput::from_adapter(&KeySet::with(&[Key::Right, Key::Down]));

        tick(&mut state, &input, &settings, &mut rng);
        assert_eq!(state.paddle_left.x, 0.0);
        assert_eq!(state.paddle_left.y, 305.0);

        settings.horizontal_paddle_movement = true;
        tick(&mut state, &input, &settings, &mut rng);
        assert_eq!(state.paddle_left.x, 5.0);
    }

    #[test]
    fn test_left_paddle_clamped_to_half_field() {
        let (mut state, mut settings, mut rng) = classic();
        settings.horizontal_paddle_movement = true;
        state.paddle_left.x = 388.0;
        state.paddle_left.y = 53.0;
        let input = TickInput::from_adapter(&KeySet::with(&[Key::Right, Key::Up]));

        tick(&mut state, &input, &settings, &mut rng);
        assert_eq!(state.paddle_left.x, 390.0);
        assert_eq!(state.paddle_left.y, 50.0);
    }

    #[test]
    fn test_ai_moves_toward_ball() {
        let (mut state, settings, mut rng) = classic();
        assert_eq!(settings.ai_policy, AiPolicy::Deterministic);
        state.ball.pos = Vec2::new(400.0, 395.0);
        state.ball.vel = Vec2::new(5.0, 5.0);

        tick(&mut state, &TickInput::default(), &settings, &mut rng);
        assert_eq!(state.ball.pos.y, 400.0);
        assert_eq!(state.paddle_right.y, 305.0);
    }

    #[test]
    fn test_nan_velocity_reserves() {
        let (mut state, settings, mut rng) = classic();
        state.ball.vel = Vec2::new(f32::NAN, 5.0);

        tick(&mut state, &TickInput::default(), &settings, &mut rng);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(5.0, 5.0));
        assert_eq!(state.score.left + state.score.right, 0);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings::default();
        let mut a = GameState::new();
        let mut b = GameState::new();
        let mut rng_a = Pcg32::seed_from_u64(99999);
        let mut rng_b = Pcg32::seed_from_u64(99999);

        let inputs = [
            TickInput { move_x: 5.0, move_y: 0.0 },
            TickInput { move_x: 0.0, move_y: -5.0 },
            TickInput::default(),
        ];
        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut a, input, &settings, &mut rng_a);
            tick(&mut b, input, &settings, &mut rng_b);
        }

        assert_eq!(a, b);
    }
}
