//! Burger Invaders entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
use burger_invaders::Tuning;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::{PI, TAU};
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use burger_invaders::consts::MAX_FRAME_DT;
    use burger_invaders::highscore::LocalStorageStore;
    use burger_invaders::platform::key_action;
    use burger_invaders::sim::{GamePhase, GameState, Invader, Part, Playfield, ProjectileKind};
    use burger_invaders::{Session, Tuning};

    const FONT_LARGE: &str = "30px \"Press Start 2P\", monospace";
    const FONT_SMALL: &str = "16px \"Press Start 2P\", monospace";

    /// Game instance holding the session and canvas
    struct Game {
        session: Session<LocalStorageStore>,
        ctx: CanvasRenderingContext2d,
        last_time: Option<f64>,
    }

    impl Game {
        fn update(&mut self, time: f64) {
            let dt = match self.last_time {
                Some(last) => (((time - last) / 1000.0) as f32).min(MAX_FRAME_DT),
                None => 0.0,
            };
            self.last_time = Some(time);
            self.session.tick(dt);
        }

        /// Paint the current frame
        fn render(&self) {
            let state = self.session.state();
            let (w, h) = (state.field.width as f64, state.field.height as f64);
            let ctx = &self.ctx;
            ctx.clear_rect(0.0, 0.0, w, h);

            match state.phase.phase() {
                GamePhase::Menu => paint_menu(ctx, state),
                GamePhase::Playing => {
                    paint_entities(ctx, state);
                    paint_hud(ctx, state);
                }
                GamePhase::Paused => {
                    paint_entities(ctx, state);
                    paint_hud(ctx, state);
                    paint_overlay(ctx, state, 0.5, &["PAUSED", "Press P to Resume"]);
                }
                GamePhase::GameOver => {
                    paint_entities(ctx, state);
                    paint_hud(ctx, state);
                    let score = format!("FINAL SCORE: {}", state.score);
                    let high = if state.new_high_score {
                        "NEW HIGH SCORE!".to_string()
                    } else {
                        format!("HIGH SCORE: {}", state.high_score)
                    };
                    let level = format!("LEVEL REACHED: {}", state.level);
                    paint_overlay(
                        ctx,
                        state,
                        0.7,
                        &["GAME OVER", &score, &high, &level, "Press ENTER to Restart"],
                    );
                }
            }
        }
    }

    fn paint_entities(ctx: &CanvasRenderingContext2d, state: &GameState) {
        let p = &state.player;
        ctx.set_fill_style_str("#5F9EA0");
        ctx.fill_rect(p.pos.x as f64, p.pos.y as f64, p.size.x as f64, p.size.y as f64);
        // Chef hat
        ctx.set_fill_style_str("#FFFFFF");
        ctx.fill_rect(
            (p.pos.x + p.size.x * 0.2) as f64,
            (p.pos.y - 5.0) as f64,
            (p.size.x * 0.6) as f64,
            5.0,
        );

        for shot in &p.projectiles {
            ctx.set_fill_style_str(match shot.kind {
                ProjectileKind::Primary => "#FF3B30",
                ProjectileKind::Secondary => "#FFCC00",
            });
            ctx.fill_rect(
                shot.pos.x as f64,
                shot.pos.y as f64,
                shot.size.x as f64,
                shot.size.y as f64,
            );
        }

        for invader in &state.swarm.invaders {
            paint_invader(ctx, invader);
        }
    }

    fn paint_invader(ctx: &CanvasRenderingContext2d, inv: &Invader) {
        let (x, y) = (inv.pos.x as f64, inv.pos.y as f64);
        let (w, h) = (inv.size.x as f64, inv.size.y as f64);
        let cx = x + w / 2.0;

        for (part, offset) in inv.part_offsets() {
            let (color, rx, ry) = match part {
                Part::Bun => ("#F0C080", w / 2.0, h / 8.0),
                Part::Patty => ("#8B4513", w / 2.0 - 2.0, h / 10.0),
                Part::Cheese => ("#FFA500", w / 2.0, h / 16.0),
            };
            ctx.set_fill_style_str(color);
            ctx.begin_path();
            let _ = ctx.ellipse(cx, y + offset as f64, rx, ry, 0.0, 0.0, TAU);
            ctx.fill();
        }

        // Eyes on the top bun, mouth follows the animation frame
        let spacing = h / (inv.kind.parts().len() + 1) as f64;
        let eye = w / 10.0;
        let eye_y = y + spacing - h / 16.0;
        ctx.set_fill_style_str("#000");
        for ex in [x + w / 3.0, x + 2.0 * w / 3.0] {
            ctx.begin_path();
            let _ = ctx.arc(ex, eye_y, eye, 0.0, TAU);
            ctx.fill();
        }
        ctx.begin_path();
        let _ = if inv.frame == 0 {
            ctx.arc(cx, eye_y + eye * 2.0, eye * 1.5, 0.0, PI)
        } else {
            ctx.arc(cx, eye_y + eye * 2.0, eye, 0.0, TAU)
        };
        ctx.fill();
    }

    fn paint_hud(ctx: &CanvasRenderingContext2d, state: &GameState) {
        let w = state.field.width as f64;
        let h = state.field.height as f64;
        ctx.set_fill_style_str("#FFFFFF");
        ctx.set_font(FONT_SMALL);
        ctx.set_text_align("left");
        let _ = ctx.fill_text(&format!("SCORE: {}", state.score), 20.0, 30.0);
        let _ = ctx.fill_text(&format!("LIVES: {}", state.lives), 20.0, h - 20.0);
        ctx.set_text_align("right");
        let _ = ctx.fill_text(&format!("HIGH SCORE: {}", state.high_score), w - 20.0, 30.0);
        ctx.set_text_align("center");
        let _ = ctx.fill_text(&format!("LEVEL: {}", state.level), w / 2.0, 30.0);
    }

    fn paint_menu(ctx: &CanvasRenderingContext2d, state: &GameState) {
        let w = state.field.width as f64;
        let h = state.field.height as f64;
        ctx.set_fill_style_str("#0f0");
        ctx.set_text_align("center");
        ctx.set_font(FONT_LARGE);
        let _ = ctx.fill_text("BURGER SPACE INVADERS", w / 2.0, h / 3.0);
        ctx.set_font(FONT_SMALL);
        let _ = ctx.fill_text("Press ENTER to Start", w / 2.0, h / 2.0);
        let _ = ctx.fill_text("Move: ← →", w / 2.0, h / 2.0 + 40.0);
        let _ = ctx.fill_text("Shoot: SPACE", w / 2.0, h / 2.0 + 70.0);
        if state.high_score > 0 {
            let _ = ctx.fill_text(
                &format!("HIGH SCORE: {}", state.high_score),
                w / 2.0,
                h / 2.0 + 110.0,
            );
        }
    }

    /// Dimmed overlay with a title line and smaller lines beneath
    fn paint_overlay(ctx: &CanvasRenderingContext2d, state: &GameState, alpha: f64, lines: &[&str]) {
        let w = state.field.width as f64;
        let h = state.field.height as f64;
        ctx.set_fill_style_str(&format!("rgba(0, 0, 0, {alpha})"));
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str("#0f0");
        ctx.set_text_align("center");
        for (i, line) in lines.iter().enumerate() {
            ctx.set_font(if i == 0 { FONT_LARGE } else { FONT_SMALL });
            let _ = ctx.fill_text(line, w / 2.0, h / 2.0 - 40.0 + i as f64 * 35.0);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Burger Invaders starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (width, height) = canvas_size(&canvas);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        // Optional balance overrides: <script id="tuning" type="application/json">
        let tuning_json = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content());
        let session = Session::new(
            LocalStorageStore,
            Playfield::new(width, height),
            Tuning::from_json_or_default(tuning_json.as_deref()),
        );
        let game = Rc::new(RefCell::new(Game {
            session,
            ctx,
            last_time: None,
        }));

        setup_input_handlers(game.clone())?;
        setup_resize(canvas, game.clone())?;

        request_animation_frame(game);

        log::info!("Burger Invaders running!");
        Ok(())
    }

    /// Size the canvas to its container at 4:3
    fn canvas_size(canvas: &HtmlCanvasElement) -> (f32, f32) {
        let width = canvas
            .parent_element()
            .map(|p| p.client_width())
            .filter(|w| *w > 0)
            .unwrap_or(800) as u32;
        let height = width * 3 / 4;
        canvas.set_width(width);
        canvas.set_height(height);
        (width as f32, height as f32)
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = key_action(&event.code()) {
                    event.prevent_default();
                    game.borrow_mut()
                        .session
                        .key_down(action, js_sys::Date::now());
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(action) = key_action(&event.code()) {
                game.borrow_mut().session.key_up(action);
            }
        });
        window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (w, h) = canvas_size(&canvas);
            game.borrow_mut().session.resize(w, h);
            log::info!("Resized to {}x{}", w, h);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
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
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Burger Invaders (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    // Optional tuning file: `burger-invaders path/to/tuning.json`
    let tuning_json = std::env::args().nth(1).and_then(|path| {
        std::fs::read_to_string(&path)
            .map_err(|e| log::warn!("Cannot read tuning file {}: {}", path, e))
            .ok()
    });
    let tuning = Tuning::from_json_or_default(tuning_json.as_deref());

    headless::run_demo(tuning, 60 * 120);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted autopilot session used for native smoke runs
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use burger_invaders::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
    use burger_invaders::sim::{GameEvent, GamePhase, Playfield};
    use burger_invaders::{MemoryStore, Session, Tuning};

    const DT: f32 = 1.0 / 60.0;

    pub fn run_demo(tuning: Tuning, frames: u32) {
        let mut session = Session::new(
            MemoryStore::new(),
            Playfield::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
            tuning,
        );
        session.start();

        for frame in 0..frames {
            steer(&mut session);
            let now_ms = frame as f64 * 1000.0 * DT as f64;
            session.shoot(now_ms);

            for event in session.tick(DT) {
                if let GameEvent::LifeLost { lives_left } = event {
                    log::info!("Frame {}: life lost ({} left)", frame, lives_left);
                }
            }

            if session.phase() == GamePhase::GameOver {
                break;
            }
        }

        let state = session.state();
        println!(
            "Demo finished: phase={} score={} level={} lives={} high={}",
            state.phase.phase(),
            state.score,
            state.level,
            state.lives,
            state.high_score
        );
    }

    /// Chase the horizontal center of the nearest remaining column
    fn steer(session: &mut Session<MemoryStore>) {
        let state = session.state();
        let center = state.player.pos.x + state.player.size.x / 2.0;
        let target = state
            .swarm
            .invaders
            .iter()
            .map(|inv| inv.pos.x + inv.size.x / 2.0)
            .min_by(|a, b| {
                (a - center)
                    .abs()
                    .partial_cmp(&(b - center).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let (left, right) = match target {
            Some(t) if t < center - 2.0 => (true, false),
            Some(t) if t > center + 2.0 => (false, true),
            _ => (false, false),
        };
        session.set_moving_left(left);
        session.set_moving_right(right);
    }
}
