//! Canvas Pong entry point
//!
//! Browser: draws on `#gameCanvas`, reads the arrow keys and re-arms a
//! timeout after every frame. Native: runs the match headless at the same
//! cadence and logs the score.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use canvas_pong::sim::GameEvent;
    use canvas_pong::{DrawCommand, Key, KeySet, Match, Renderer, Settings};

    /// Canvas 2D implementation of the draw command list
    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
    }

    impl Renderer for CanvasRenderer {
        fn draw(&mut self, commands: &[DrawCommand]) {
            for command in commands {
                match *command {
                    DrawCommand::Clear { width, height } => {
                        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
                    }
                    DrawCommand::FillRect {
                        x,
                        y,
                        width,
                        height,
                    } => {
                        self.ctx
                            .fill_rect(x as f64, y as f64, width as f64, height as f64);
                    }
                    DrawCommand::FillCircle { x, y, radius } => {
                        self.ctx.begin_path();
                        if let Err(e) = self.ctx.arc(
                            x as f64,
                            y as f64,
                            radius as f64,
                            0.0,
                            std::f64::consts::TAU,
                        ) {
                            log::warn!("Canvas arc failed: {:?}", e);
                        }
                        self.ctx.fill();
                    }
                }
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Match,
        renderer: CanvasRenderer,
        /// None until the key listeners are installed
        keys: Option<KeySet>,
    }

    impl Game {
        fn frame(&mut self) {
            self.session.frame(&self.keys, &mut self.renderer);
            for event in self.session.drain_events() {
                if let GameEvent::PointScored { scorer } = event {
                    let score = self.session.state().score;
                    log::info!("Point to {:?} ({} - {})", scorer, score.left, score.right);
                }
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Canvas Pong starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("missing #gameCanvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        // Write back so the stored copy has every field, ready for hand edits
        let settings = Settings::load();
        settings.save();
        let game = Rc::new(RefCell::new(Game {
            session: Match::new(settings),
            renderer: CanvasRenderer { ctx },
            keys: None,
        }));

        setup_input_handlers(&window, game.clone());
        game_loop(game);

        log::info!("Canvas Pong running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    event.prevent_default();
                    if let Some(keys) = game.borrow_mut().keys.as_mut() {
                        keys.press(key);
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    if let Some(keys) = game.borrow_mut().keys.as_mut() {
                        keys.release(key);
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur swallows key-up events
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                if let Some(keys) = game.borrow_mut().keys.as_mut() {
                    keys.clear();
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        game.borrow_mut().keys = Some(KeySet::new());
    }

    fn schedule_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window gone, stopping game loop");
            return;
        };
        let delay = game.borrow().session.frame_delay_ms();
        let closure = Closure::once(move || {
            game_loop(game);
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay,
        );
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        schedule_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::ops::ControlFlow;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use canvas_pong::scheduler::run_fixed_rate;
    use canvas_pong::sim::{GameEvent, GameState};
    use canvas_pong::{DrawCommand, Key, KeySet, Match, Renderer, Settings};

    #[derive(Parser)]
    #[command(name = "canvas-pong")]
    #[command(about = "Headless Canvas Pong match")]
    pub struct Args {
        /// Stop after this many frames (0 = run until interrupted)
        #[arg(short, long, default_value_t = 3600)]
        ticks: u64,

        /// RNG seed (overrides the settings file)
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON settings file
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Use the classic rules (fixed serve, no spin, perfect AI)
        #[arg(long)]
        classic: bool,

        /// Let a simple tracker hold the arrow keys for the left paddle
        #[arg(long)]
        autopilot: bool,

        /// Run frames back to back instead of at the tick rate
        #[arg(long)]
        fast: bool,
    }

    /// Logs each frame at trace level
    struct TraceRenderer;

    impl Renderer for TraceRenderer {
        fn draw(&mut self, commands: &[DrawCommand]) {
            if log::log_enabled!(log::Level::Trace) {
                log::trace!("frame: {:?}", commands);
            }
        }
    }

    /// Hold Up or Down to follow the ball
    fn autopilot_keys(state: &GameState) -> KeySet {
        let gap = state.ball.pos.y - state.paddle_left.y;
        if gap > canvas_pong::consts::PLAYER_SPEED {
            KeySet::with(&[Key::Down])
        } else if gap < -canvas_pong::consts::PLAYER_SPEED {
            KeySet::with(&[Key::Up])
        } else {
            KeySet::new()
        }
    }

    pub fn run(args: Args) -> Result<()> {
        let mut settings = match &args.settings {
            Some(path) => Settings::load_from(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None if args.classic => Settings::classic(),
            None => Settings::load(),
        };
        if args.seed.is_some() {
            settings.seed = args.seed;
        }
        settings.validate().context("invalid settings")?;

        let mut session = Match::new(settings);
        let mut renderer = TraceRenderer;
        let period = session.frame_period();
        let limit = args.ticks;

        let mut cycle = || {
            let keys = if args.autopilot {
                Some(autopilot_keys(session.state()))
            } else {
                None
            };
            session.frame(&keys, &mut renderer);

            for event in session.drain_events() {
                if let GameEvent::PointScored { scorer } = event {
                    let score = session.state().score;
                    log::info!("Point to {:?} ({} - {})", scorer, score.left, score.right);
                }
            }

            if limit != 0 && session.state().time_ticks >= limit {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        };

        if args.fast {
            while cycle().is_continue() {}
        } else {
            run_fixed_rate(period, cycle);
        }

        let score = session.state().score;
        log::info!(
            "Finished after {} ticks: {} - {} (seed {})",
            session.state().time_ticks,
            score.left,
            score.right,
            session.seed()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Canvas Pong (native) starting...");

    native::run(native::Args::parse())
}
