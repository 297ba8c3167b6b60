//! Galaxy Defender entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use galaxy_defender::platform::{FrameDriver, InputState, SystemClock};
    use galaxy_defender::renderer::{HudModel, RenderState, Viewport, scene};
    use galaxy_defender::sim::UiAction;
    use galaxy_defender::{AudioManager, Session, SessionStats, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: InputState,
        audio: AudioManager,
        driver: FrameDriver<SystemClock>,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        document: Document,
    }

    impl Game {
        fn new(settings: Settings, seed: u64, canvas: HtmlCanvasElement, document: Document) -> Self {
            let audio = AudioManager::from_settings(&settings);
            Self {
                session: Session::with_seed(SessionStats::new(), settings, seed),
                input: InputState::new(),
                audio,
                driver: FrameDriver::new(SystemClock::new()),
                render_state: None,
                canvas,
                document,
            }
        }

        /// Client coordinates to canvas units
        fn canvas_pos(&self, event: &MouseEvent) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            let client = Vec2::new(
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
            );
            let size = Vec2::new(rect.width() as f32, rect.height() as f32);
            let viewport = match &self.render_state {
                Some(render_state) => render_state.viewport(),
                None => Viewport::new(self.canvas.width(), self.canvas.height()),
            };
            viewport.client_to_canvas(client, size)
        }

        fn apply_action(&mut self, action: UiAction) {
            if !self.session.handle_action(action) {
                return;
            }
            if self.session.take_input_reset() {
                self.input.clear();
            }
            // Hover belongs to the screen the pointer is on now
            if let Some(pos) = self.input.pointer {
                self.input.pointer_moved(self.session.phase(), pos);
            }
        }

        fn frame(&mut self) {
            let tick_input = self.input.tick_input();
            self.driver
                .frame(&mut self.session, &tick_input, &mut self.audio);
            if self.session.take_input_reset() {
                self.input.clear();
            }

            self.render();
            self.update_hud();
        }

        /// Match the backing store to the displayed canvas size
        fn fit_canvas(&mut self, dpr: f64) {
            let width = (self.canvas.client_width() as f64 * dpr) as u32;
            let height = (self.canvas.client_height() as f64 * dpr) as u32;
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            if render_state.size() == (width, height) {
                return;
            }
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            render_state.resize(width, height);
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = scene::build(&self.session, &self.input);
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn set_text(&self, id: &str, text: Option<&str>) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(text);
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_class_name(if visible { "" } else { "hidden" });
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let now_ms = self.driver.now().as_secs_f64() * 1000.0;
            let hud = HudModel::build(&self.session, now_ms);

            self.set_text("hud-score", hud.score.as_deref());
            self.set_visible("hud-score", hud.score.is_some());

            if let Some(el) = self.document.get_element_by_id("hud-shield") {
                match &hud.shield {
                    Some(shield) => {
                        el.set_text_content(Some(&shield.text));
                        el.set_class_name("");
                        if let Ok(el) = el.dyn_into::<HtmlElement>() {
                            let style = el.style();
                            let _ = style.set_property("color", shield.color);
                            let _ = style.set_property("opacity", &shield.alpha.to_string());
                        }
                    }
                    None => el.set_class_name("hidden"),
                }
            }

            self.set_text("overlay-heading", hud.heading.as_deref());
            let lines = hud.lines.join("\n");
            self.set_text("overlay-lines", Some(&lines));
            self.set_text("overlay-footer", hud.footer.as_deref());

            let [sortie, menu] = hud.controls.unwrap_or(["", ""]);
            self.set_text("label-sortie", Some(sortie));
            self.set_text("label-menu", Some(menu));

            match &hud.notice {
                Some([message, score]) => {
                    self.set_text("notice-message", Some(message));
                    self.set_text("notice-score", Some(score));
                    self.set_visible("notice", true);
                }
                None => self.set_visible("notice", false),
            }

            let cursor = self.input.cursor_hint(self.session.phase());
            let _ = self.canvas.style().set_property("cursor", cursor.css());
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Galaxy Defender starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(
            settings,
            seed,
            canvas.clone(),
            document.clone(),
        )));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {e}"),
                        }
                    }
                    Err(e) => log::error!("No WebGPU adapter: {e}"),
                }
            }
            Err(e) => log::error!("Failed to create surface: {e}"),
        }

        if let Some(loading) = document.get_element_by_id("loading") {
            loading.set_class_name("hidden");
        }

        setup_input_handlers(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Galaxy Defender running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Keyboard down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if matches!(key.as_str(), " " | "ArrowLeft" | "ArrowRight") {
                    // Keep the page from scrolling
                    event.prevent_default();
                }
                if event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                g.audio.resume();
                if let Some(action) = g.input.key_down(&key) {
                    g.apply_action(action);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
                game.borrow_mut().fit_canvas(dpr);
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move (hover state)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.canvas_pos(&event);
                let phase = g.session.phase();
                g.input.pointer_moved(phase, pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                let pos = g.canvas_pos(&event);
                let phase = g.session.phase();
                let action = g.input.pointer_down(phase, pos);
                g.apply_action(action);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // The notice overlays the canvas, so it acknowledges clicks itself
        if let Some(notice) = game.borrow().document.get_element_by_id("notice") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().apply_action(UiAction::PointerDown);
            });
            let _ = notice
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: an autopilot plays a few games on a simulated clock and
/// the final session statistics are printed as JSON.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::Duration;

    use galaxy_defender::consts::{PLAYER_SIZE, SIM_DT};
    use galaxy_defender::platform::{FrameDriver, InputState, ManualClock};
    use galaxy_defender::renderer::HudModel;
    use galaxy_defender::sim::{GamePhase, UiAction};
    use galaxy_defender::{AudioManager, Session, SessionStats, Settings};

    const GAMES: u32 = 3;
    /// Give up on a game after this much simulated time
    const GAME_LIMIT: Duration = Duration::from_secs(600);

    env_logger::init();
    log::info!("Galaxy Defender (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    let settings = Settings::load();
    let mut audio = AudioManager::from_settings(&settings);
    let mut session = Session::new(SessionStats::new(), settings);
    let clock = ManualClock::new();
    let mut driver = FrameDriver::new(&clock);
    let mut input = InputState::new();

    for _ in 0..GAMES {
        session.handle_action(UiAction::Sortie);
        if session.phase() == GamePhase::Tutorial {
            session.handle_action(UiAction::Confirm);
        }
        input.clear();

        let mut played = Duration::ZERO;
        while session.phase() == GamePhase::Playing && played < GAME_LIMIT {
            // Chase the lowest enemy and keep the trigger down
            let state = session.state();
            let player_center = state.player.pos.x + PLAYER_SIZE / 2.0;
            let target = state
                .enemies
                .iter()
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|e| e.rect().center().x);
            input.left = target.is_some_and(|x| x < player_center - 2.0);
            input.right = target.is_some_and(|x| x > player_center + 2.0);
            input.fire = true;

            clock.advance(SIM_DT);
            played += SIM_DT;
            driver.frame(&mut session, &input.tick_input(), &mut audio);
        }

        let hud = HudModel::build(&session, played.as_secs_f64() * 1000.0);
        if let Some(lines) = hud.notice {
            println!("{}\n{}", lines[0], lines[1]);
        } else if let Some(score) = hud.score {
            println!("Time limit reached. {score}");
        }
        session.handle_action(UiAction::Confirm);
    }

    let stats = session.into_stats();
    match serde_json::to_string_pretty(&stats) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize stats: {e}"),
    }
}
