//! Flappy entry point
//!
//! The browser build drives a `Session` from requestAnimationFrame and draws
//! it with WebGPU. The native build runs headless autopilot rounds and
//! prints a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy::consts::SIM_DT;
    use flappy::platform::{FixedStep, InputEvent};
    use flappy::renderer::SdfRenderState;
    use flappy::{Control, GameConfig, Screen, Session};

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<SdfRenderState>,
        step: FixedStep,
        last_time: f64,
        /// Input collected since the last frame, applied before its ticks
        pending: Vec<InputEvent>,
        running: bool,
        /// Overlay currently shown, so the DOM is only touched on change
        shown_screen: Option<Screen>,
    }

    impl Game {
        fn new(session: Session) -> Self {
            Self {
                session,
                render_state: None,
                step: FixedStep::new(),
                last_time: 0.0,
                pending: Vec::new(),
                running: true,
                shown_screen: None,
            }
        }

        /// Apply queued input, then run however many ticks this frame owes
        fn update(&mut self, dt: f64) {
            let events = std::mem::take(&mut self.pending);
            if self.session.handle_events(&events) == Control::Quit {
                self.running = false;
                return;
            }

            let before = self.session.screen;
            for _ in 0..self.step.advance(dt) {
                self.session.step();
            }
            if self.session.screen != before {
                self.step.reset();
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let frame = self.session.frame();
            let screen = self.session.screen;
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&frame, screen, time) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD and overlays in the DOM
        fn update_hud(&mut self, document: &Document) {
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.session.game.score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-autopilot") {
                let class = if self.session.autopilot { "hud-item" } else { "hud-item hidden" };
                let _ = el.set_attribute("class", class);
            }

            let screen = self.session.screen;
            if self.shown_screen == Some(screen) {
                return;
            }
            self.shown_screen = Some(screen);

            set_visible(document, "start-screen", screen == Screen::Title);
            set_visible(document, "end-screen", screen == Screen::GameOver);

            if screen == Screen::GameOver {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.session.game.score.to_string()));
                }
                if let Some(el) = document.get_element_by_id("best-score") {
                    let best = self.session.high_scores.top_score().unwrap_or(0);
                    el.set_text_content(Some(&best.to_string()));
                }
            }
        }

        fn show_goodbye(&self, document: &Document) {
            set_visible(document, "start-screen", false);
            set_visible(document, "end-screen", false);
            set_visible(document, "hud", false);
            set_visible(document, "quit-screen", true);
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn canvas_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Flappy starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        set_visible(&document, "loading", false);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (width, height) = canvas_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(GameConfig::default(), seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let game = Rc::new(RefCell::new(Game::new(session)));

        let mut render_state = SdfRenderState::from_canvas(canvas.clone(), width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        render_state.set_start_time(js_sys::Date::now());
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, &canvas, game.clone());
        setup_resize(&window, &canvas, game.clone());

        set_visible(&document, "hud", true);

        request_animation_frame(game);

        log::info!("Flappy running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Mouse click flaps
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().pending.push(InputEvent::Flap);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch flaps too
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().pending.push(InputEvent::Flap);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                // Holding a key is one press
                if event.repeat() {
                    return;
                }
                let key = event.key();
                if key == " " {
                    event.prevent_default(); // Don't scroll the page
                }
                game.borrow_mut().pending.push(InputEvent::from_key(&key));
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = canvas_size(&window, &canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(ref mut render_state) = game.borrow_mut().render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                (time - g.last_time) / 1000.0
            } else {
                SIM_DT as f64
            };
            g.last_time = time;

            g.update(dt);
            if !g.running {
                g.show_goodbye(&document);
                log::info!("Flappy stopped");
                return;
            }
            g.render(time);
            g.update_hud(&document);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

/// Longest a single headless round may run before the runner gives up on it
#[cfg(not(target_arch = "wasm32"))]
const MAX_ROUND_TICKS: u64 = 120 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use flappy::platform::InputEvent;
    use flappy::{GameConfig, Screen, Session};

    env_logger::init();

    let rounds: u32 = env_or("FLAPPY_ROUNDS", 3)?;
    let seed: u64 = env_or("FLAPPY_SEED", 0x5eed)?;

    let config = GameConfig::default();
    log::info!(
        "Flappy (native) playing {} headless rounds with config {}",
        rounds,
        serde_json::to_string(&config)?
    );

    let mut session = Session::new(config, seed).context("invalid game configuration")?;
    session.handle_events(&[InputEvent::ToggleAutopilot]);

    let mut unfinished = None;
    while (session.results.len() as u32) < rounds {
        session.step();
        if session.screen == Screen::Playing && session.game.time_ticks >= MAX_ROUND_TICKS {
            log::warn!(
                "Round {} still alive after {} ticks, stopping",
                session.round,
                session.game.time_ticks
            );
            unfinished = Some(session.game.score);
            break;
        }
    }

    let summary = RunSummary {
        seed,
        rounds: &session.results,
        best: session.high_scores.top_score(),
        unfinished,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(serde::Serialize)]
struct RunSummary<'a> {
    seed: u64,
    rounds: &'a [flappy::session::RoundSummary],
    best: Option<u32>,
    /// Score of a round cut off by the tick cap
    unfinished: Option<u32>,
}

#[cfg(not(target_arch = "wasm32"))]
fn env_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    use anyhow::Context;

    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a number, got {raw:?}")),
        Err(_) => Ok(default),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
