//! Pong Duel entry point
//!
//! Browser builds wire the DOM to the simulation and run the game loop.
//! Native builds play a headless demo match with an autopilot on the
//! player side.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent,
        TouchEvent,
    };

    use pong_duel::Settings;
    use pong_duel::audio::{AudioManager, WebAudioBackend};
    use pong_duel::consts::FRAME_DT;
    use pong_duel::platform::{FrameClock, clock_seed, init_logging};
    use pong_duel::renderer::{self, Vertex};
    use pong_duel::sim::{
        GameState, PlayerInput, Surface, resize, start_match, touch_move, touch_start,
    };
    use pong_duel::ui::{Hud, UiUpdate};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: PlayerInput,
        clock: FrameClock,
        audio: AudioManager<WebAudioBackend>,
        hud: Hud,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
    }

    impl Game {
        /// Start or restart; ignored mid-match
        fn start(&mut self) {
            self.audio.resume();
            if start_match(&mut self.state).is_some() {
                self.clock.reset();
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let events = self.clock.advance(dt, &mut self.state, &mut self.input);
            self.audio.play_events(&events);
        }

        /// Render the current frame
        fn render(&self) {
            draw_triangles(&self.ctx, &renderer::scene(&self.state));
        }

        /// Push overlay and score changes into the DOM
        fn update_hud(&mut self, document: &Document) {
            for update in self.hud.sync(&self.state) {
                match update {
                    UiUpdate::Overlay(overlay) => {
                        if let Some(el) = document.get_element_by_id("overlay") {
                            let class = if overlay.visible { "" } else { "hidden" };
                            let _ = el.set_attribute("class", class);
                        }
                        if let Some(el) = document.get_element_by_id("overlay-title") {
                            el.set_text_content(Some(overlay.title));
                        }
                        if let Some(el) = document.get_element_by_id("overlay-subtitle") {
                            el.set_text_content(Some(overlay.subtitle));
                        }
                    }
                    UiUpdate::Scores { player, opponent } => {
                        if let Some(el) = document.get_element_by_id("player-score") {
                            el.set_text_content(Some(&player));
                        }
                        if let Some(el) = document.get_element_by_id("cpu-score") {
                            el.set_text_content(Some(&opponent));
                        }
                    }
                }
            }
        }

        /// Size the canvas to the window and tell the simulation
        fn fit_to_window(&mut self, window: &web_sys::Window) {
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
            let surface = Surface::fit_viewport(w as f32, h as f32);
            self.canvas.set_width(surface.width as u32);
            self.canvas.set_height(surface.height as u32);
            resize(&mut self.state, surface);
        }

        /// Convert a client y coordinate to surface space
        fn surface_y(&self, client_y: i32) -> f32 {
            let rect = self.canvas.get_bounding_client_rect();
            client_y as f32 - rect.top() as f32
        }
    }

    fn css_color(color: [f32; 4]) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (color[0] * 255.0) as u8,
            (color[1] * 255.0) as u8,
            (color[2] * 255.0) as u8,
            color[3]
        )
    }

    /// Fill a triangle list on a 2D canvas
    fn draw_triangles(ctx: &CanvasRenderingContext2d, vertices: &[Vertex]) {
        for tri in vertices.chunks_exact(3) {
            ctx.set_fill_style_str(&css_color(tri[0].color));
            ctx.begin_path();
            ctx.move_to(tri[0].position[0] as f64, tri[0].position[1] as f64);
            ctx.line_to(tri[1].position[0] as f64, tri[1].position[1] as f64);
            ctx.line_to(tri[2].position[0] as f64, tri[2].position[1] as f64);
            ctx.close_path();
            ctx.fill();
        }
    }

    pub fn run() -> Result<(), JsValue> {
        init_logging();
        log::info!("Pong Duel starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(clock_seed);
        let state = GameState::with_tuning(Surface::new(800.0, 600.0), settings.tuning(), seed);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            input: PlayerInput::new(),
            clock: FrameClock::new(),
            audio: AudioManager::from_settings(WebAudioBackend::new(), &settings),
            hud: Hud::new(),
            canvas: canvas.clone(),
            ctx,
            last_time: 0.0,
        }));
        game.borrow_mut().fit_to_window(&window);

        setup_input_handlers(&window, &canvas, game.clone());

        request_animation_frame(game);
        log::info!("Pong Duel running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Pointer position
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let y = g.surface_y(event.client_y());
                g.input.set_pointer_y(y);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click on the playfield starts or restarts
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start();
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start: start trigger when idle, paddle sample while playing
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if let Some(touch) = event.touches().get(0) {
                    let y = g.surface_y(touch.client_y());
                    let g = &mut *g;
                    if touch_start(&mut g.state, &mut g.input, y).is_some() {
                        g.audio.resume();
                        g.clock.reset();
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if let Some(touch) = event.touches().get(0) {
                    let y = g.surface_y(touch.client_y());
                    let g = &mut *g;
                    touch_move(&g.state, &mut g.input, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_down(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(window) = web_sys::window() {
                    game.borrow_mut().fit_to_window(&window);
                }
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Headless demo match
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use pong_duel::Settings;
    use pong_duel::audio::{AudioManager, LogBackend};
    use pong_duel::consts::FRAME_DT;
    use pong_duel::platform::{FrameClock, clock_seed, init_logging};
    use pong_duel::renderer;
    use pong_duel::sim::{GameState, MatchPhase, PlayerInput, Surface, autopilot, start_match};
    use pong_duel::ui::{Hud, UiUpdate};

    /// Window size the demo pretends to have
    const WINDOW: (f32, f32) = (840.0, 800.0);
    /// Autopilot holds still within this distance of the ball
    const AUTOPILOT_DEAD_ZONE: f32 = 6.0;
    /// Give up after an hour of simulated play
    const MAX_FRAMES: u64 = 60 * 60 * 60;

    fn report(updates: Vec<UiUpdate>) {
        for update in updates {
            match update {
                UiUpdate::Overlay(overlay) if overlay.visible => {
                    log::info!("[overlay] {} - {}", overlay.title, overlay.subtitle);
                }
                UiUpdate::Overlay(_) => {}
                UiUpdate::Scores { player, opponent } => {
                    log::info!("[score] YOU {} : {} CPU", player, opponent);
                }
            }
        }
    }

    pub fn run() {
        init_logging();
        log::info!("Pong Duel (native demo) starting...");

        let settings = std::env::args()
            .nth(1)
            .map(Settings::load_or_default)
            .unwrap_or_default();
        let seed = settings.seed.unwrap_or_else(clock_seed);
        log::info!(
            "Seed {}, difficulty {}, first to {}",
            seed,
            settings.difficulty.as_str(),
            settings.winning_score
        );

        let surface = Surface::fit_viewport(WINDOW.0, WINDOW.1);
        let mut state = GameState::with_tuning(surface, settings.tuning(), seed);
        let audio = AudioManager::from_settings(LogBackend, &settings);
        let mut input = PlayerInput::new();
        let mut clock = FrameClock::new();
        let mut hud = Hud::new();

        report(hud.sync(&state));
        audio.resume();
        start_match(&mut state);

        let mut frames = 0;
        while state.phase == MatchPhase::Playing && frames < MAX_FRAMES {
            autopilot(&mut input, &state.player, &state.ball, AUTOPILOT_DEAD_ZONE);
            let events = clock.advance(FRAME_DT, &mut state, &mut input);
            audio.play_events(&events);
            report(hud.sync(&state));
            frames += 1;
        }

        let draw_list = renderer::scene(&state);
        log::debug!(
            "Final frame: {} vertices ({} bytes)",
            draw_list.len(),
            renderer::as_bytes(&draw_list).len()
        );

        match state.winner {
            Some(winner) => {
                let (player, cpu) = state.scores();
                log::info!(
                    "{:?} won {} - {} after {} ticks",
                    winner,
                    player,
                    cpu,
                    state.time_ticks
                );
            }
            None => log::warn!("No winner after {} frames", frames),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
