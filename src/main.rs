//! Apple Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, EventTarget, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use apple_catch::audio::AudioManager;
    use apple_catch::consts::*;
    use apple_catch::renderer::{self, RenderState};
    use apple_catch::sim::{
        CoinFountain, Direction, GameController, KeyState, Presenter, SessionResult, steer,
    };
    use apple_catch::ui::Labels;
    use apple_catch::{HighScores, PlatformError, Settings};

    type Controller = GameController<AudioManager, CoinFountain, DomPresenter>;

    fn js_err(e: JsValue) -> PlatformError {
        PlatformError::Js(format!("{:?}", e))
    }

    fn element(document: &Document, id: &'static str) -> Result<Element, PlatformError> {
        document
            .get_element_by_id(id)
            .ok_or(PlatformError::MissingElement(id))
    }

    fn html_element(document: &Document, id: &'static str) -> Result<HtmlElement, PlatformError> {
        element(document, id)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PlatformError::WrongElementType(id))
    }

    fn set_display(el: &HtmlElement, display: &str) {
        let _ = el.style().set_property("display", display);
    }

    /// Writes HUD text and the end panel into the page
    struct DomPresenter {
        labels: Labels,
        score: Element,
        time: Element,
        end_panel: HtmlElement,
        end_score: Element,
        end_label: Element,
        end_best: Element,
        high_scores: HighScores,
    }

    impl DomPresenter {
        fn new(document: &Document, settings: &Settings) -> Result<Self, PlatformError> {
            Ok(Self {
                labels: Labels::new(settings.locale),
                score: element(document, "hud-score")?,
                time: element(document, "hud-time")?,
                end_panel: html_element(document, "game-end")?,
                end_score: element(document, "game-end-score")?,
                end_label: element(document, "game-win-lose")?,
                end_best: element(document, "game-end-best")?,
                high_scores: HighScores::load(),
            })
        }
    }

    impl Presenter for DomPresenter {
        fn show_score(&mut self, score: u32) {
            self.score.set_text_content(Some(&self.labels.score(score)));
        }

        fn show_remaining(&mut self, seconds: u32) {
            self.time
                .set_text_content(Some(&self.labels.remaining(seconds)));
        }

        fn show_result(&mut self, result: &SessionResult) {
            self.end_score
                .set_text_content(Some(&result.score.to_string()));
            self.end_label
                .set_text_content(Some(self.labels.outcome(result.outcome)));

            if let Some(rank) = self.high_scores.record(result, js_sys::Date::now()) {
                log::info!("New leaderboard entry at rank {}", rank);
                self.high_scores.save();
            }
            self.end_best
                .set_text_content(Some(&self.labels.best(self.high_scores.best())));

            set_display(&self.end_panel, "flex");
        }
    }

    /// Every DOM listener bound for the session, removed together on teardown
    #[derive(Default)]
    struct Listeners {
        entries: Vec<(EventTarget, &'static str, Closure<dyn FnMut(web_sys::Event)>)>,
    }

    impl Listeners {
        fn add(
            &mut self,
            target: &EventTarget,
            event: &'static str,
            handler: impl FnMut(web_sys::Event) + 'static,
        ) -> Result<(), PlatformError> {
            let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
            target
                .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
            self.entries.push((target.clone(), event, closure));
            Ok(())
        }

        fn clear(&mut self) {
            for (target, event, closure) in self.entries.drain(..) {
                let _ = target
                    .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            }
            log::info!("Input listeners removed");
        }
    }

    /// Game instance holding all state
    struct Game {
        controller: Controller,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        keys: KeyState,
        /// Demo mode: the autopilot steers
        autopilot: bool,
        settings: Settings,
    }

    impl Game {
        fn new(seed: u64, settings: &Settings, presenter: DomPresenter) -> Self {
            Self {
                controller: GameController::new(
                    seed,
                    AudioManager::new(settings),
                    CoinFountain::with_capacity(seed ^ 0x5eed, settings.max_particles()),
                    presenter,
                ),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                keys: KeyState::default(),
                autopilot: false,
                settings: settings.clone(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let keys = if self.autopilot {
                    steer(self.controller.state())
                } else {
                    self.keys
                };
                self.controller.step(SIM_DT, keys);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = renderer::scene(
                self.controller.state(),
                self.controller.particles().particles(),
            );
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() -> Result<(), PlatformError> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Apple Catch starting...");

        let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
        let document = window.document().ok_or(PlatformError::NoDocument)?;

        let canvas: HtmlCanvasElement = element(&document, "canvas")?
            .dyn_into()
            .map_err(|_| PlatformError::WrongElementType("canvas"))?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let presenter = DomPresenter::new(&document, &settings)?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, &settings, presenter)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| PlatformError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| PlatformError::Adapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;
        game.borrow_mut().render_state = Some(render_state);

        // Bound once for the whole session; torn down at game over
        let listeners = Rc::new(RefCell::new(Listeners::default()));
        {
            let mut registry = listeners.borrow_mut();
            setup_input_handlers(&window, &document, &mut registry, game.clone())?;
            setup_start_button(&document, &mut registry, game.clone())?;
        }
        setup_restart_button(&document)?;

        // Draw the paused scene behind the start panel
        request_animation_frame(game, listeners);

        log::info!("Apple Catch running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        document: &Document,
        listeners: &mut Listeners,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), PlatformError> {
        // Keyboard: arrow state is polled by the sim each tick
        {
            let game = game.clone();
            listeners.add(window, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => {
                        event.prevent_default();
                        g.keys.left = true;
                    }
                    "ArrowRight" => {
                        event.prevent_default();
                        g.keys.right = true;
                    }
                    "i" | "I" => {
                        g.autopilot = !g.autopilot;
                        log::info!("Autopilot: {}", g.autopilot);
                    }
                    "m" | "M" => {
                        g.settings.muted = !g.settings.muted;
                        g.settings.save();
                        let settings = g.settings.clone();
                        g.controller.audio_mut().apply_settings(&settings);
                    }
                    _ => {}
                }
            })?;
        }
        {
            let game = game.clone();
            listeners.add(window, "keyup", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.keys.left = false,
                    "ArrowRight" => g.keys.right = false,
                    _ => {}
                }
            })?;
        }
        // Losing focus drops held keys
        {
            let game = game.clone();
            listeners.add(window, "blur", move |_event| {
                game.borrow_mut().keys = KeyState::default();
            })?;
        }

        // On-screen controls latch while held
        for (id, dir) in [
            ("control-left", Direction::Left),
            ("control-right", Direction::Right),
        ] {
            let button = element(document, id)?;
            for event in ["mousedown", "touchstart"] {
                let game = game.clone();
                listeners.add(&button, event, move |event| {
                    event.prevent_default();
                    game.borrow_mut().controller.press(dir);
                })?;
            }
            for event in ["mouseup", "mouseleave", "touchend", "touchcancel"] {
                let game = game.clone();
                listeners.add(&button, event, move |_event| {
                    game.borrow_mut().controller.release(dir);
                })?;
            }
        }

        Ok(())
    }

    fn setup_start_button(
        document: &Document,
        listeners: &mut Listeners,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), PlatformError> {
        let button = element(document, "game-start-btn")?;
        let start_panel = html_element(document, "game-start")?;
        listeners.add(&button, "click", move |_event| {
            set_display(&start_panel, "none");
            let mut g = game.borrow_mut();
            g.controller.audio().resume();
            g.controller.start();
        })
    }

    fn setup_restart_button(document: &Document) -> Result<(), PlatformError> {
        let button = element(document, "game-restart-btn")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            if let Some(window) = web_sys::window() {
                let _ = window.location().reload();
            }
        });
        button
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, listeners: Rc<RefCell<Listeners>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, listeners, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, listeners: Rc<RefCell<Listeners>>, time: f64) {
        let finished = {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.controller.result().is_some()
        };

        if finished {
            // Session destroyed: stop the loop and unbind input
            listeners.borrow_mut().clear();
            log::info!("Frame loop stopped");
            return;
        }

        request_animation_frame(game, listeners);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Apple Catch failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use apple_catch::consts::*;
    use apple_catch::sim::{CoinFountain, GameController, LogPresenter, Silent, steer};

    env_logger::init();
    log::info!("Apple Catch (native) starting...");
    log::info!("Native mode runs a headless autopilot session - run with `trunk serve` for the web version");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut game = GameController::new(
        seed,
        Silent,
        CoinFountain::new(seed),
        LogPresenter::default(),
    );
    game.start();

    let max_ticks = ((SESSION_SECONDS + 1.0) / SIM_DT) as u32;
    let mut ticks = 0;
    while game.result().is_none() && ticks < max_ticks {
        let keys = steer(game.state());
        game.step(SIM_DT, keys);
        ticks += 1;
    }

    match game.result() {
        Some(result) => println!(
            "\nSeed {}: {:?} with {} catches after {:.2}s",
            seed,
            result.outcome,
            result.score,
            ticks as f32 * SIM_DT
        ),
        None => println!("\nSeed {}: session did not finish", seed),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
