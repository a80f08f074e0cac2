//! Oval Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, PointerEvent};

    use oval_rush::consts::*;
    use oval_rush::hud::{Display, START_PROMPT, score_label_position};
    use oval_rush::renderer::SdfRenderState;
    use oval_rush::scene::{ObjectId, ObjectKind, SceneGraph, SceneHandle};
    use oval_rush::sim::GamePhase;
    use oval_rush::{Config, Control, Game, InputEvent, InputSource, LoopControl};

    /// Scene graph drawn through WebGPU
    struct WebScene {
        graph: SceneGraph,
        renderer: Option<SdfRenderState>,
    }

    impl SceneHandle for WebScene {
        fn add(&mut self, kind: ObjectKind) -> ObjectId {
            self.graph.add(kind)
        }

        fn remove(&mut self, id: ObjectId) {
            self.graph.remove(id);
        }

        fn place(&mut self, id: ObjectId, position: glam::Vec2, rotation: f32) {
            self.graph.place(id, position, rotation);
        }

        fn render(&mut self) {
            self.graph.render();
            if let Some(ref mut renderer) = self.renderer {
                match renderer.render(&self.graph) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        renderer.resize(renderer.size.0, renderer.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    /// Score readout and panels in the page
    struct DomHud {
        score: HtmlElement,
        buttons: HtmlElement,
        instructions: HtmlElement,
        results: HtmlElement,
    }

    impl DomHud {
        fn new(document: &Document) -> Result<Self, JsValue> {
            Ok(Self {
                score: html_element(document, "score")?,
                buttons: html_element(document, "buttons")?,
                instructions: html_element(document, "instructions")?,
                results: html_element(document, "results")?,
            })
        }

        /// Put the score label over the player's lane
        fn position_score(&self, width: f32, height: f32) {
            let (left, top) = score_label_position(width, height);
            let style = self.score.style();
            let _ = style.set_property("left", &format!("{}px", left));
            let _ = style.set_property("top", &format!("{}px", top));
        }
    }

    impl Display for DomHud {
        fn show_score(&mut self, laps: u32) {
            self.score.set_inner_text(&laps.to_string());
        }

        fn show_prompt(&mut self) {
            self.score.set_inner_text(START_PROMPT);
        }

        fn set_results_visible(&mut self, visible: bool) {
            let display = if visible { "flex" } else { "none" };
            let _ = self.results.style().set_property("display", display);
        }

        fn set_controls_visible(&mut self, visible: bool) {
            let opacity = if visible { "1" } else { "0" };
            let _ = self.buttons.style().set_property("opacity", opacity);
        }

        fn set_instructions_visible(&mut self, visible: bool) {
            let opacity = if visible { "1" } else { "0" };
            let _ = self.instructions.style().set_property("opacity", opacity);
        }
    }

    fn html_element(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
        let element = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))?;
        Ok(element.dyn_into::<HtmlElement>()?)
    }

    /// Game instance plus animation loop bookkeeping
    struct App {
        game: Game<WebScene, DomHud>,
        /// Whether an animation frame is pending
        looping: bool,
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        config: &Config,
    ) -> Result<SdfRenderState, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| e.to_string())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| e.to_string())?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        SdfRenderState::new(surface, &adapter, width, height, config)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Oval Rush starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let config = Config::load();
        log::info!(
            "Hit zones: {} ({})",
            if config.show_hit_zones { "shown" } else { "hidden" },
            config.hit_zone_heading.as_str()
        );

        let renderer = match init_renderer(&canvas, width, height, &config).await {
            Ok(renderer) => Some(renderer),
            Err(e) => {
                log::error!("Renderer unavailable, running without graphics: {}", e);
                None
            }
        };

        let hud = DomHud::new(&document)?;
        hud.position_score(client_w as f32, client_h as f32);

        let scene = WebScene {
            graph: SceneGraph::new(),
            renderer,
        };

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(config, seed, scene, hud),
            looping: false,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(app.clone())?;
        setup_buttons(&document, app.clone())?;
        setup_resize(&canvas, app.clone())?;
        schedule_hints(app)?;

        log::info!("Oval Rush ready!");
        Ok(())
    }

    /// Apply an input event and start the animation loop if a run began
    fn dispatch(app: &Rc<RefCell<App>>, event: InputEvent) {
        let start_loop = {
            let mut a = app.borrow_mut();
            let started = a.game.handle_input(event) == Some(GamePhase::Running);
            if started && !a.looping {
                a.looping = true;
                true
            } else {
                false
            }
        };

        if start_loop {
            request_animation_frame(app.clone());
        }
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(input) = InputEvent::from_key(&event.key(), pressed) {
                    dispatch(&app, input);
                }
            });
            window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        for (id, control) in [
            ("accelerate", Control::Accelerate),
            ("decelerate", Control::Decelerate),
        ] {
            let button = html_element(document, id)?;

            {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                    dispatch(&app, InputEvent::Pressed(control, InputSource::Button));
                });
                button.add_event_listener_with_callback(
                    "pointerdown",
                    closure.as_ref().unchecked_ref(),
                )?;
                closure.forget();
            }

            {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                    dispatch(&app, InputEvent::Released(control));
                });
                button
                    .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
        }

        Ok(())
    }

    fn setup_resize(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let canvas = canvas.clone();

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let client_w = canvas.client_width();
            let client_h = canvas.client_height();
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            let mut a = app.borrow_mut();
            a.game.display().position_score(client_w as f32, client_h as f32);
            let scene = a.game.scene_mut();
            if let Some(ref mut renderer) = scene.renderer {
                renderer.resize(width, height);
            }
            scene.render();
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }

    fn schedule_hints(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::once(move || {
            app.borrow_mut().game.reveal_hints();
        });
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            HINT_DELAY_MS,
        )?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let control = {
            let mut a = app.borrow_mut();
            let control = a.game.frame(time);
            if control == LoopControl::Stop {
                a.looping = false;
            }
            control
        };

        if control == LoopControl::Continue {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use oval_rush::{Config, Control, Game, HudState, InputEvent, InputSource, LoopControl, SceneGraph};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5EED);
    let max_frames: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 120);

    log::info!("Oval Rush (native) starting headless run with seed {}", seed);
    log::info!("Browser build renders with WebGPU - run with `trunk serve` for the web version");

    let mut game = Game::new(Config::load(), seed, SceneGraph::new(), HudState::default());
    game.handle_input(InputEvent::Pressed(Control::Accelerate, InputSource::Keyboard));

    // Hold accelerate at 60 fps until a crash or the frame budget runs out
    let frame_ms = 1000.0 / 60.0;
    let mut crashed = false;
    for frame in 0..=max_frames {
        if game.frame(frame as f64 * frame_ms) == LoopControl::Stop {
            crashed = true;
            break;
        }
    }

    println!(
        "{} laps, {} vehicles on track, {}",
        game.score(),
        game.state().traffic.len(),
        if crashed { "crashed" } else { "still driving" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
