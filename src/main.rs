//! Ball Chimes entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent};

    use ball_chimes::sim::Ball;
    use ball_chimes::sound::WebSynth;
    use ball_chimes::{Settings, Toy, Tuning};

    /// Pastel ball colours, indexed by `Ball::color`
    const PALETTE: [&str; 6] = [
        "#B4D4F7", // Soft Blue
        "#FFB5B5", // Soft Pink
        "#B5E6B5", // Soft Green
        "#FFE0B5", // Soft Yellow
        "#E0B5FF", // Soft Purple
        "#FFB5E0", // Soft Rose
    ];
    const BACKGROUND: &str = "#F0F2FF";
    const OVERLAY_ID: &str = "start-overlay";

    /// Front-end state holding the toy and its drawing surface
    struct App {
        toy: Toy<WebSynth>,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl App {
        /// Match the canvas to its container and tell the toy
        fn fit_canvas(&mut self) {
            let (w, h) = self
                .canvas
                .parent_element()
                .map(|parent| {
                    let rect = parent.get_bounding_client_rect();
                    (rect.width(), rect.height())
                })
                .unwrap_or((0.0, 0.0));
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            self.toy.resize(w.floor(), h.floor());
            log::info!("Canvas resized: {}x{}", w as u32, h as u32);
        }

        fn frame(&mut self, time_ms: f64) {
            let bounds = self.toy.bounds();
            match self.toy.step(time_ms / 1000.0) {
                Some(balls) => draw(&self.ctx, balls, bounds.x, bounds.y),
                None => {
                    log::debug!("Canvas not sized yet, retrying");
                    self.fit_canvas();
                }
            }
        }
    }

    fn draw(ctx: &CanvasRenderingContext2d, balls: &[Ball], width: f64, height: f64) {
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, width, height);

        for ball in balls {
            let color = PALETTE[ball.color as usize % PALETTE.len()];
            ctx.begin_path();
            let _ = ctx.arc(ball.pos.x, ball.pos.y, ball.radius, 0.0, TAU);
            ctx.set_global_alpha(if ball.hovered { 1.0 } else { 0.9 });
            ctx.set_fill_style_str(color);
            ctx.fill();
            if ball.hovered {
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(2.0);
                ctx.stroke();
            }
        }
        ctx.set_global_alpha(1.0);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ball Chimes starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let toy = Toy::new(seed, Tuning::default(), WebSynth::new(Settings::default()));
        log::info!("Toy initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App { toy, canvas: canvas.clone(), ctx }));
        app.borrow_mut().fit_canvas();

        create_start_overlay();
        setup_input_handlers(&canvas, app.clone());
        setup_audio_start(app.clone());
        setup_resize(app.clone());

        request_animation_frame(app);

        log::info!("Ball Chimes running!");
    }

    fn create_start_overlay() {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(body) = document.body() else { return };
        let Ok(overlay) = document.create_element("div") else {
            return;
        };
        overlay.set_id(OVERLAY_ID);
        let _ = overlay.set_attribute(
            "style",
            "position:fixed;inset:0;display:flex;justify-content:center;align-items:center;\
             background:rgba(255,255,255,0.85);backdrop-filter:blur(10px);cursor:pointer;\
             z-index:1000;font-family:'Poppins',sans-serif;color:#9BA0BC;",
        );
        overlay.set_inner_html(
            "<div style=\"text-align:center;padding:20px;\">\
             <h2 style=\"font-size:24px;margin-bottom:10px;color:#8B95C9;\">Click or Touch to Start</h2>\
             <p style=\"font-size:16px;opacity:0.8;\">Every collision plays a note</p></div>",
        );
        let _ = body.append_child(&overlay);
    }

    fn hide_start_overlay() {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(overlay) = document
            .get_element_by_id(OVERLAY_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = overlay.style().set_property("display", "none");
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .toy
                    .on_pointer_move(event.offset_x() as f64, event.offset_y() as f64);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse leave
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().toy.on_pointer_leave();
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move (canvas-local coordinates from the first touch)
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f64 - rect.left();
                    let y = touch.client_y() as f64 - rect.top();
                    app.borrow_mut().toy.on_pointer_move(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                app.borrow_mut().toy.on_pointer_leave();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Audio may only start inside a user gesture
    fn setup_audio_start(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        for event_name in ["click", "touchstart"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if app.borrow_mut().toy.on_user_gesture() {
                    hide_start_overlay();
                }
            });
            let _ = document
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().fit_canvas();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Read a JSON config file, falling back to defaults with a warning
#[cfg(not(target_arch = "wasm32"))]
fn load_or_default<T: Default>(
    path: Option<String>,
    what: &str,
    parse: fn(&str) -> Result<T, String>,
) -> T {
    let Some(path) = path else {
        return T::default();
    };
    match std::fs::read_to_string(&path)
        .map_err(|err| format!("Failed to read {path}: {err}"))
        .and_then(|json| parse(&json))
    {
        Ok(value) => {
            log::info!("Loaded {} from {}", what, path);
            value
        }
        Err(err) => {
            log::warn!("{}; using default {}", err, what);
            T::default()
        }
    }
}

/// Headless run: `ball-chimes [frames] [tuning.json] [settings.json]`
///
/// Drives the toy with a 60 Hz synthetic clock and a pointer sweeping
/// across the box, logging every sound (`RUST_LOG=debug`) and a summary.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ball_chimes::sound::LogBackend;
    use ball_chimes::{Settings, Toy, Tuning};

    const WIDTH: f64 = 800.0;
    const HEIGHT: f64 = 600.0;
    const FRAME_DT: f64 = 1.0 / 60.0;

    env_logger::init();
    log::info!("Ball Chimes (native) starting...");

    let mut args = std::env::args().skip(1);
    let frames: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(600);
    let tuning = load_or_default(args.next(), "tuning", Tuning::from_json);
    let settings = load_or_default(args.next(), "settings", Settings::from_json);

    let mut toy = Toy::new(42, tuning, LogBackend::new(settings));
    toy.resize(WIDTH, HEIGHT);
    toy.on_user_gesture();

    for frame in 0..frames {
        let now = frame as f64 * FRAME_DT;
        // Figure-eight sweep, leaving the box every few seconds
        let x = WIDTH / 2.0 + WIDTH * 0.6 * (now * 0.7).sin();
        let y = HEIGHT / 2.0 + HEIGHT * 0.3 * (now * 1.4).sin();
        if (0.0..WIDTH).contains(&x) {
            toy.on_pointer_move(x, y);
        } else {
            toy.on_pointer_leave();
        }
        toy.step(now);
    }

    let energy = toy.world().kinetic_energy();
    log::info!(
        "{} frames: {} collisions, {} notes, {} accents, kinetic energy {:.2}",
        frames,
        toy.total_collisions(),
        toy.audio().notes_played(),
        toy.audio().accents_played(),
        energy
    );
}
