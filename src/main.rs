//! PPT Attack entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use ppt_attack::quotes::QuoteTimers;
    use ppt_attack::renderer::{FrameStyle, RenderState};
    use ppt_attack::{App, Bounds, FrameToken, Screen, TickStatus, Tuning};

    const PROFESSOR_QUOTES: [&str; 4] = [
        "¿SUBISTE TU PPT?",
        "¿TIENES EJEMPLO PRÁCTICO?",
        "¡ME DOLERÁ PONERTE ESE 0!",
        "¿VAS A EXPONER?",
    ];

    /// Panels toggled per screen, by element id
    const PANELS: [&str; 4] = ["login", "hud", "game-over", "victory"];

    /// Game instance holding all state
    struct Game {
        app: App,
        render_state: Option<RenderState>,
        style: FrameStyle,
        /// Pending requestAnimationFrame handle
        raf_id: Option<i32>,
        quote_timers: Option<QuoteTimers>,
        /// Screen the DOM currently shows
        shown: Option<Screen>,
    }

    impl Game {
        /// Render the current frame
        fn render(&mut self) {
            let Some(vertices) = self.app.render(&self.style) else {
                return;
            };
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM (only when values changed)
        fn update_hud(&mut self, document: &Document) {
            let Some(hud) = self.app.hud_update() else {
                return;
            };
            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&hud.score_label()));
            }
            if let Some(el) = document.get_element_by_id("hud-progress") {
                el.set_text_content(Some(&hud.progress_label()));
            }
            if let Some(bar) = element::<HtmlElement>(document, "hud-progress-bar") {
                let _ = bar.style().set_property("width", &hud.bar_width());
            }
        }

        /// Show the panel for the current screen, hide the rest
        fn sync_screen(&mut self, document: &Document) {
            let screen = self.app.screen();
            if self.shown == Some(screen) {
                return;
            }
            for id in PANELS {
                if let Some(el) = document.get_element_by_id(id) {
                    let class = if id == screen.panel_id() { "" } else { "hidden" };
                    let _ = el.set_attribute("class", class);
                }
            }
            if let Some(score) = screen.final_score() {
                let id = match screen {
                    Screen::Victory { .. } => "victory-score",
                    _ => "game-over-score",
                };
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(&score.to_string()));
                }
            }
            if let Some(el) = document.get_element_by_id("logout-btn") {
                let class = if screen == Screen::Login { "hidden" } else { "" };
                let _ = el.set_attribute("class", class);
            }
            self.shown = Some(screen);
        }

        /// Stop the frame loop and quote timers
        fn teardown(&mut self, document: &Document) {
            if let Some(id) = self.raf_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
            // Dropping the guard clears both browser timers
            self.quote_timers = None;
            self.app.hide_quote();
            hide_quote_bubble(document);
        }
    }

    fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
        document.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn show_quote_bubble(document: &Document, quote: &str, professor_x: f32) {
        if let Some(el) = element::<HtmlElement>(document, "quote") {
            el.set_text_content(Some(quote));
            let _ = el.style().set_property("left", &format!("{}px", professor_x));
            let _ = el.set_attribute("class", "");
        }
    }

    fn hide_quote_bubble(document: &Document) {
        if let Some(el) = document.get_element_by_id("quote") {
            let _ = el.set_attribute("class", "hidden");
        }
    }

    /// Window size in CSS pixels
    fn viewport() -> Option<(f64, f64)> {
        let window = web_sys::window()?;
        let width = window.inner_width().ok()?.as_f64()?;
        let height = window.inner_height().ok()?.as_f64()?;
        Some((width, height))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("PPT Attack starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = element(&document, "canvas").ok_or("no canvas")?;
        let (width, height) = viewport().ok_or("no viewport size")?;
        let bounds = Bounds::from_host(width, height).map_err(|e| e.to_string())?;
        let (w, h) = bounds.size();
        canvas.set_width(w);
        canvas.set_height(h);

        let seed = js_sys::Date::now() as u64;
        let quotes = PROFESSOR_QUOTES.iter().map(|q| q.to_string()).collect();
        let app = App::new(bounds, Tuning::load(), seed, quotes).map_err(|e| e.to_string())?;
        let game = Rc::new(RefCell::new(Game {
            app,
            render_state: None,
            style: FrameStyle::default(),
            raf_id: None,
            quote_timers: None,
            shown: None,
        }));

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
                        match RenderState::new(surface, &adapter, w, h).await {
                            Ok(render_state) => {
                                game.borrow_mut().render_state = Some(render_state)
                            }
                            Err(e) => log::error!("Renderer unavailable: {}", e),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        setup_input_handlers(game.clone());
        setup_resize_handler(&canvas, game.clone());
        setup_buttons(game.clone());

        game.borrow_mut().sync_screen(&document);

        log::info!("PPT Attack running!");
        Ok(())
    }

    /// Common tail of login and restart
    fn begin_session(game: &Rc<RefCell<Game>>, token: FrameToken) {
        let timers = {
            let on_show = {
                let game = game.clone();
                move || {
                    let Ok(mut g) = game.try_borrow_mut() else {
                        return;
                    };
                    let Some(quote) = g.app.show_quote() else {
                        return;
                    };
                    let professor_x = g.app.session().map_or(0.0, |s| s.professor_x);
                    if let Some(document) = document() {
                        show_quote_bubble(&document, &quote, professor_x);
                    }
                }
            };
            let on_hide = {
                let game = game.clone();
                move || {
                    if let Ok(mut g) = game.try_borrow_mut() {
                        g.app.hide_quote();
                    }
                    if let Some(document) = document() {
                        hide_quote_bubble(&document);
                    }
                }
            };
            QuoteTimers::start(on_show, on_hide)
        };

        {
            let mut g = game.borrow_mut();
            g.quote_timers = Some(timers);
            if let Some(document) = document() {
                g.sync_screen(&document);
            }
        }
        request_animation_frame(game.clone(), token);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, token: FrameToken) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handle = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game, token);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => handle.borrow_mut().raf_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, token: FrameToken) {
        let Some(document) = document() else {
            return;
        };
        let status = {
            let mut g = game.borrow_mut();
            g.raf_id = None;

            let status = g.app.frame(token);
            if status.is_running() {
                g.render();
                g.update_hud(&document);
            } else if let TickStatus::Finished(outcome) = status {
                // The end screen replaces the board; no final draw
                log::info!("Session over: {:?}", outcome);
                g.teardown(&document);
                g.sync_screen(&document);
            }
            status
        };

        if status.is_running() {
            request_animation_frame(game, token);
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().app.key_down(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().app.key_up(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (click outside): keyups will never arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().app.blur();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some((width, height)) = viewport() else {
                return;
            };
            let mut g = game.borrow_mut();
            // Rejected sizes are logged by the driver; keep the old canvas
            let Ok(bounds) = g.app.resize(width, height) else {
                return;
            };
            let (w, h) = bounds.size();
            canvas.set_width(w);
            canvas.set_height(h);
            if let Some(render_state) = g.render_state.as_mut() {
                render_state.resize(w, h);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                handler();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(doc) = document() else {
            return;
        };

        {
            let game = game.clone();
            on_click(&doc, "login-btn", move || {
                let login = game.borrow_mut().app.login();
                match login {
                    Ok(token) => begin_session(&game, token),
                    Err(e) => log::warn!("{}", e),
                }
            });
        }

        for id in ["retry-btn", "replay-btn"] {
            let game = game.clone();
            on_click(&doc, id, move || {
                let restart = game.borrow_mut().app.restart();
                match restart {
                    Ok(token) => begin_session(&game, token),
                    Err(e) => log::warn!("{}", e),
                }
            });
        }

        on_click(&doc, "logout-btn", move || {
            let Some(document) = document() else {
                return;
            };
            let mut g = game.borrow_mut();
            match g.app.logout() {
                Ok(()) => {
                    g.teardown(&document);
                    g.sync_screen(&document);
                }
                Err(e) => log::warn!("{}", e),
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("PPT Attack (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    demo::run(std::env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(7));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless seeded session: a scripted player sweeps side to side until the
/// session ends
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use ppt_attack::{App, Bounds, Screen, TickStatus, Tuning};

    const WIDTH: u32 = 800;
    const HEIGHT: u32 = 600;
    const FRAME_LIMIT: u64 = 100_000;

    pub fn run(seed: u64) {
        let Ok(bounds) = Bounds::new(WIDTH, HEIGHT) else {
            log::error!("Demo surface rejected");
            return;
        };
        let mut app = match App::new(bounds, Tuning::default(), seed, Vec::new()) {
            Ok(app) => app,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };
        let token = match app.login() {
            Ok(token) => token,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };

        let mut heading_left = true;
        for frame in 0..FRAME_LIMIT {
            let x = app.session().map_or(0.0, |s| s.player.pos.x);
            if x <= 0.0 {
                heading_left = false;
            } else if x >= (WIDTH as f32 - 40.0) {
                heading_left = true;
            }
            app.key_up(if heading_left { "ArrowRight" } else { "ArrowLeft" });
            app.key_down(if heading_left { "ArrowLeft" } else { "ArrowRight" });

            match app.frame(token) {
                TickStatus::Running => {}
                TickStatus::Finished(outcome) => {
                    log::info!("Demo finished after {} frames: {:?}", frame + 1, outcome);
                    break;
                }
                TickStatus::Halted => break,
            }
        }

        match app.screen() {
            Screen::Victory { score } => println!("VICTORY - score {}", score),
            Screen::GameOver { score } => println!("GAME OVER - score {}", score),
            screen => println!("Demo stopped on {:?}", screen),
        }
    }
}
