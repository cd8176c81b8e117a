//! Frame driving
//!
//! A [`Match`] exposes one "update, then emit for render" cycle. How often
//! that cycle runs is the host's business: the browser re-arms a timeout
//! after every frame, the native runner uses [`run_fixed_rate`], and tests
//! just call [`Match::step`] in a loop.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::input::InputAdapter;
use crate::render::{Renderer, draw_list};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, init_round, tick};

/// Seed from the wall clock
#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// A running match: state, rules and the RNG behind serves and AI jitter
#[derive(Debug, Clone)]
pub struct Match {
    state: GameState,
    settings: Settings,
    seed: u64,
    rng: Pcg32,
}

impl Match {
    /// Start a match, seeding from `settings.seed` or the clock
    pub fn new(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(clock_seed);
        Self::with_seed(settings, seed)
    }

    /// Start a match with an explicit seed and serve the first ball
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut state = GameState::new();
        init_round(&mut state, &settings, &mut rng);
        log::info!("Match started with seed {} ({:?} AI)", seed, settings.ai_policy);
        Self {
            state,
            settings,
            seed,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Time between frames at the configured tick rate
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.settings.tick_rate.max(1) as f64)
    }

    /// Frame period in whole milliseconds, rounded, for timer APIs
    pub fn frame_delay_ms(&self) -> i32 {
        (1000.0 / self.settings.tick_rate.max(1) as f64).round() as i32
    }

    /// Advance one frame without rendering
    pub fn step(&mut self, input: &impl InputAdapter) {
        let input = TickInput::from_adapter(input);
        tick(&mut self.state, &input, &self.settings, &mut self.rng);
    }

    /// One full cycle: update, then hand the new frame to the renderer
    pub fn frame(&mut self, input: &impl InputAdapter, renderer: &mut impl Renderer) {
        self.step(input);
        renderer.draw(&draw_list(&self.state));
    }

    /// Take events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

/// Call `cycle` every `period` until it returns `ControlFlow::Break`.
///
/// Each cycle is run to completion before the next is scheduled; the loop
/// sleeps for whatever is left of the frame budget. A cycle that overruns
/// its budget pushes the schedule back rather than triggering a catch-up
/// burst. Returns the number of cycles run.
pub fn run_fixed_rate<F>(period: Duration, mut cycle: F) -> u64
where
    F: FnMut() -> ControlFlow<()>,
{
    let mut cycles = 0;
    let mut next = Instant::now();
    loop {
        cycles += 1;
        if cycle().is_break() {
            return cycles;
        }

        next += period;
        let now = Instant::now();
        if next > now {
            std::thread::sleep(next - now);
        } else {
            log::debug!("Frame overran its budget by {:?}", now - next);
            next = now;
        }
    }
}
