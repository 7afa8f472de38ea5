//! Dino Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use dino_dash::persistence::StorageSink;
    use dino_dash::platform::input::from_key_code;
    use dino_dash::renderer::vertex::colors;
    use dino_dash::renderer::{ActorPose, RenderFrame, shapes};
    use dino_dash::{Game, GamePhase, HighScore, Tuning};

    /// Keys the game binds; the browser keeps its default for the rest
    const BOUND_KEYS: [&str; 3] = ["Space", "ArrowUp", "ArrowDown"];

    /// Browser-side state around the game
    struct App {
        game: Game,
        high_score: HighScore,
        ctx: Option<CanvasRenderingContext2d>,
        /// Draw shrunk collision boxes over the sprites
        show_hitboxes: bool,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            if let Some(report) = self.game.frame(time) {
                if self.high_score.record(report.score as f64) {
                    log::info!("New high score: {}", report.score);
                    self.save_high_score();
                }
            }
            for event in self.game.drain_events() {
                log::debug!("{:?}", event);
            }
            self.render();
            self.update_hud();
        }

        fn render(&self) {
            let Some(ctx) = &self.ctx else {
                return;
            };
            let session = self.game.session();
            let tuning = self.game.tuning();
            let frame = RenderFrame::capture(session);

            ctx.clear_rect(0.0, 0.0, tuning.world_width as f64, tuning.world_height as f64);

            // Background strip, drawn twice for the seamless wrap
            ctx.set_fill_style_str("#f4f1e8");
            for offset in [0.0, frame.background_width] {
                ctx.fill_rect(
                    (frame.background_x + offset) as f64,
                    0.0,
                    frame.background_width as f64,
                    frame.ground_y as f64,
                );
            }

            for (i, sprite) in frame.sprites.iter().enumerate() {
                let color = match (i, frame.actor_pose) {
                    (0, ActorPose::Airborne) => "#3a6",
                    (0, _) => "#283",
                    _ => "#a63",
                };
                ctx.set_fill_style_str(color);
                ctx.fill_rect(
                    sprite.position[0] as f64,
                    sprite.position[1] as f64,
                    sprite.size[0] as f64,
                    sprite.size[1] as f64,
                );
            }

            let ground = shapes::line(frame.ground_y + 1.0, 0.0, tuning.world_width, 1.0, colors::GROUND);
            let mut quads = vec![ground];
            if self.show_hitboxes {
                quads.extend(
                    shapes::hitbox_quads(session)
                        .chunks_exact(6)
                        .filter_map(|quad| <[_; 6]>::try_from(quad).ok()),
                );
            }
            for quad in &quads {
                let [x0, y0] = quad[0].position;
                let [x1, y1] = quad[5].position;
                ctx.set_fill_style_str(&colors::to_css(quad[0].color));
                ctx.fill_rect(x0 as f64, y0 as f64, (x1 - x0) as f64, (y1 - y0) as f64);
            }
        }

        fn save_high_score(&self) {
            if let Err(e) = self.high_score.save() {
                log::warn!("Failed to save high score: {}", e);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let score = self.game.session().score.display_score();
            let high = self.game.session().score.display_high_score();

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", score)));
            }
            if let Some(el) = document.get_element_by_id("highScore") {
                el.set_text_content(Some(&format!("High Score: {}", high)));
            }
            if let Some(el) = document.get_element_by_id("gameID") {
                el.set_text_content(Some(&format!("Game ID: {}", self.game.identity().game_id)));
            }
            if let Some(el) = document.get_element_by_id("gameOver") {
                let class = if self.game.phase() == GamePhase::Terminated {
                    "overlay"
                } else {
                    "overlay hidden"
                };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Dino Dash starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let ctx = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(|canvas| canvas.get_context("2d").ok().flatten())
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        if ctx.is_none() {
            log::warn!("No 2d canvas found; running without drawing");
        }

        let username = document
            .get_element_by_id("username")
            .and_then(|el| el.get_attribute("data-username"))
            .unwrap_or_default();

        let high_score = HighScore::load();
        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(Tuning::load(), seed, username)
            .with_sink(Box::new(StorageSink))
            .with_high_score(high_score.best() as f64);
        // Presses are ignored until the page has finished loading
        let loading = document.ready_state() != web_sys::DocumentReadyState::Complete;
        game.set_ready(!loading);

        if let Some(el) = document.get_element_by_id("username") {
            el.set_text_content(Some(&format!("Username: {}", game.identity().username)));
        }

        let app = Rc::new(RefCell::new(App {
            game,
            high_score,
            ctx,
            show_hitboxes: false,
        }));

        setup_input_handlers(&window, app.clone());
        setup_page_handlers(&window, app.clone(), loading);

        app.borrow().update_hud();

        request_animation_frame(app);
    }

    fn setup_input_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut app = app.borrow_mut();
                if event.code() == "KeyH" {
                    app.show_hitboxes = !app.show_hitboxes;
                    log::info!("Hitboxes: {}", app.show_hitboxes);
                    return;
                }
                if event.repeat() {
                    return;
                }
                let code = event.code();
                if let Some(input) = from_key_code(&code, true) {
                    if BOUND_KEYS.contains(&code.as_str()) {
                        event.prevent_default();
                    }
                    app.game.push_input(input);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(input) = from_key_code(&event.code(), false) {
                    app.borrow_mut().game.push_input(input);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_page_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>, loading: bool) {
        if loading {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::Event| {
                app.borrow_mut().game.set_ready(true);
                hide_loading();
                log::info!("Page loaded, ready to start");
            });
            let _ = window.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            hide_loading();
        }

        // Keep the best score when the page goes away mid-run
        let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::Event| {
            let mut app = app.borrow_mut();
            let score = app.game.high_score();
            if app.high_score.record(score) {
                app.save_high_score();
            }
        });
        let _ = window.add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn hide_loading() {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("loading"))
        {
            let _ = el.set_attribute("class", "hidden");
        }
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
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Headless demo: the autopilot plays one run at 60 fps
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dino_dash::sim::autopilot;
    use dino_dash::sim::{GameEvent, InputEvent};
    use dino_dash::{Game, HighScore, Tuning};

    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    env_logger::init();
    log::info!("Dino Dash (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::load_from_path(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                eprintln!("{}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::load(),
    };
    let seed = std::env::var("DINO_DASH_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);

    let mut high_score = HighScore::load();
    let mut game = Game::new(tuning, seed, "Autopilot").with_high_score(high_score.best() as f64);
    game.push_input(InputEvent::Primary);

    let mut report = None;
    let mut jumps = 0u32;
    for i in 0..MAX_FRAMES {
        if let Some(input) = autopilot::suggest(game.session()) {
            game.push_input(input);
        }
        report = game.frame(i as f64 * FRAME_MS);
        for event in game.drain_events() {
            match event {
                GameEvent::Jumped => jumps += 1,
                GameEvent::SpeedUp(speed) => log::info!("Speed up to {:.1}", speed),
                other => log::debug!("{:?}", other),
            }
        }
        if report.is_some() {
            break;
        }
    }

    let session = game.session();
    println!(
        "Ran {} ticks ({:.1}s), speed {:.1}, score {}",
        session.ticks,
        session.elapsed_ms / 1000.0,
        session.difficulty.speed(),
        session.score.display_score()
    );
    println!("Jumped {} times", jumps);
    for (variant, count) in session.field.passed.iter() {
        println!("  passed {:>3} {}", count, variant.as_str());
    }
    if high_score.record(session.score.score()) {
        if let Err(e) = high_score.save() {
            log::warn!("Failed to save high score: {}", e);
        }
        println!("New high score: {}", high_score.best());
    }

    match report {
        Some(report) => match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("Could not serialize report: {}", e),
        },
        None => println!("Survived the whole demo without a collision"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
