//! Brick Break entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use brick_break::audio::{AudioManager, Volume};
    use brick_break::consts::{FIELD_HEIGHT, FIELD_WIDTH};
    use brick_break::hud::{self, HudChange};
    use brick_break::input::{HeldInput, Key};
    use brick_break::renderer::RenderState;
    use brick_break::sim::{GamePhase, GameState};
    use brick_break::{Error, Game, Settings};

    type WebGame = Game<HeldInput, Option<RenderState>, AudioManager>;

    /// Game plus the page it lives on
    struct App {
        game: WebGame,
        document: Document,
        canvas: HtmlCanvasElement,
        /// An animation frame callback is already queued
        frame_pending: bool,
        /// Phase the screens were last laid out for
        last_phase: GamePhase,
    }

    impl App {
        /// Sync score, lives, screens, paused label and the pause button with the game
        fn update_hud(&mut self) {
            let (score, lives, phase) = {
                let state = self.game.state();
                (state.score, state.lives, state.phase)
            };
            set_text(&self.document, "score", &score.to_string());
            set_text(&self.document, "lives", &lives.to_string());

            if phase == self.last_phase {
                return;
            }
            self.last_phase = phase;

            for change in hud::phase_changes(phase, score) {
                match change {
                    HudChange::Text(id, text) => set_text(&self.document, id, &text),
                    HudChange::Display(id, display) => set_display(&self.document, id, display),
                }
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_display(document: &Document, id: &str, display: &str) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", display);
        }
    }

    pub async fn run() -> Result<(), Error> {
        let window = web_sys::window().ok_or_else(|| Error::MissingElement("window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| Error::MissingElement("document".into()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or_else(|| Error::MissingElement("gameCanvas".into()))?;
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", seed);

        let renderer = match init_renderer(&canvas).await {
            Ok(renderer) => Some(renderer),
            Err(e) => {
                log::warn!("{e}; drawing disabled");
                None
            }
        };
        let tones = AudioManager::new(Volume::from_settings(&settings));
        let game = Game::new(GameState::new(seed), HeldInput::default(), renderer, tones)
            .with_settings(&settings);

        let app = Rc::new(RefCell::new(App {
            game,
            document: document.clone(),
            canvas,
            frame_pending: false,
            last_phase: GamePhase::Idle,
        }));

        // Board behind the start screen
        app.borrow_mut().game.frame();

        setup_keyboard(app.clone(), &document);
        setup_pointer(app.clone(), &document);
        setup_buttons(app, &document);

        log::info!("Brick Break ready");
        Ok(())
    }

    async fn init_renderer(canvas: &HtmlCanvasElement) -> Result<RenderState, Error> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| Error::RendererUnavailable(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| Error::RendererUnavailable(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, canvas.width(), canvas.height()).await
    }

    /// Queue the next frame unless one is queued already or the game stopped
    fn request_frame(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            if a.frame_pending || !a.game.is_running() {
                return;
            }
            a.frame_pending = true;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let keep_going = {
            let mut a = app.borrow_mut();
            a.frame_pending = false;
            let running = a.game.frame();
            a.update_hud();
            running
        };
        if keep_going {
            request_frame(app);
        }
    }

    fn on_start(app: &Rc<RefCell<App>>) {
        let started = {
            let mut a = app.borrow_mut();
            let started = a.game.start();
            a.update_hud();
            started
        };
        if started {
            request_frame(app.clone());
        }
    }

    fn on_toggle_pause(app: &Rc<RefCell<App>>) {
        let toggled = {
            let mut a = app.borrow_mut();
            let toggled = a.game.toggle_pause();
            a.update_hud();
            toggled
        };
        if toggled {
            request_frame(app.clone());
        }
    }

    fn setup_keyboard(app: Rc<RefCell<App>>, document: &Document) {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match Key::from_name(&event.key()) {
                    Some(Key::Pause) => on_toggle_pause(&app),
                    Some(key) => app.borrow_mut().game.input_mut().keys.press(key),
                    None => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_name(&event.key()) {
                app.borrow_mut().game.input_mut().keys.release(key);
            }
        });
        let _ = document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pointer(app: Rc<RefCell<App>>, document: &Document) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut a = app.borrow_mut();
            let rect = a.canvas.get_bounding_client_rect();
            let relative_x = event.client_x() as f32 - rect.left() as f32;
            // CSS pixels to field units
            let scale = if rect.width() > 0.0 {
                FIELD_WIDTH / rect.width() as f32
            } else {
                1.0
            };
            a.game
                .input_mut()
                .pointer
                .moved(relative_x * scale, FIELD_WIDTH);
        });
        let _ = document
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(app: Rc<RefCell<App>>, document: &Document) {
        // Restart after game over and "next level" both replay the single level
        for id in [
            "startButton",
            "restartButton",
            "newGameButton",
            "nextLevelButton",
        ] {
            let app = app.clone();
            on_click(document, id, move || on_start(&app));
        }
        on_click(document, "pauseButton", move || on_toggle_pause(&app));
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Button '{id}' not found");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Brick Break starting...");
    if let Err(e) = wasm_game::run().await {
        log::error!("{e}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use brick_break::audio::{LogTonePlayer, Volume};
    use brick_break::input::{InputSource, PaddleDirection};
    use brick_break::renderer::{FrameSnapshot, Renderer};
    use brick_break::sim::GameState;
    use brick_break::{Game, Settings};

    /// Frame cap for a session (ten minutes at 60 Hz)
    const MAX_FRAMES: u64 = 36_000;

    /// Keeps the pointer over the ball
    #[derive(Default)]
    struct Autopilot {
        target: Option<f32>,
    }

    impl InputSource for Autopilot {
        fn paddle_direction(&self) -> PaddleDirection {
            PaddleDirection::None
        }

        fn take_pointer_x(&mut self) -> Option<f32> {
            self.target.take()
        }

        fn reset(&mut self) {
            self.target = None;
        }
    }

    /// Logs HUD changes instead of drawing
    #[derive(Default)]
    struct HudLog {
        score: u32,
        lives: u8,
    }

    impl Renderer for HudLog {
        fn draw_frame(&mut self, frame: &FrameSnapshot<'_>) {
            if (frame.score, frame.lives) != (self.score, self.lives) {
                self.score = frame.score;
                self.lives = frame.lives;
                log::info!("Score {} | Lives {}", frame.score, frame.lives);
            }
        }
    }

    fn time_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }

    pub fn run() {
        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(time_seed);
        log::info!("Headless session with seed {seed}");

        let tones = LogTonePlayer::new(Volume::from_settings(&settings));
        let mut game = Game::new(
            GameState::new(seed),
            Autopilot::default(),
            HudLog::default(),
            tones,
        )
        .with_settings(&settings);

        game.start();
        let mut frames = 0;
        loop {
            let ball_x = game.state().ball().pos.x;
            game.input_mut().target = Some(ball_x);
            frames += 1;
            if !game.frame() || frames >= MAX_FRAMES {
                break;
            }
        }

        let state = game.state();
        if !state.phase.is_terminal() {
            log::warn!("Frame cap reached before the round ended");
        }
        log::info!(
            "Stopped after {} frames: {:?}, score {}, lives {}, {} bricks left, {} tone samples",
            frames,
            state.phase,
            state.score,
            state.lives,
            state.grid.count_alive(),
            game.tones().rendered
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brick Break (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` to play");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
