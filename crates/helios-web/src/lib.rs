pub mod capture;
pub mod runner;

pub use capture::WebcamCapture;
pub use runner::GameRunner;

// Re-exported so `export_game!` expands without extra imports in the game crate.
pub use helios_engine as engine;
pub use web_sys;

/// Seed for the scene RNG, drawn from `Math.random()` so every page load
/// starts the planets at different angles.
pub fn random_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64
}

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner and the webcam handle
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (init, tick, object picking, orbit input,
///   custom events, shared-buffer accessors, capture stream)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGame;
///
/// helios_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `helios_engine::Game`
///   and has a `new()` constructor
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
            static CAPTURE: RefCell<Option<$crate::WebcamCapture>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        /// `settings_json` is an optional settings document applied before init.
        #[wasm_bindgen]
        pub fn game_init(settings_json: Option<String>) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let capture = $crate::WebcamCapture::new();
            CAPTURE.with(|cell| {
                *cell.borrow_mut() = Some(capture.clone());
            });

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::with_capture(
                game,
                Box::new(capture),
                $crate::random_seed(),
            );

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| {
                if let Some(json) = settings_json.as_deref() {
                    r.load_settings(json);
                }
                r.init()
            });
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        // ---- Object picking (renderer reports what is under the pointer) ----

        #[wasm_bindgen]
        pub fn game_click(entity: u32) {
            let entity = $crate::engine::EntityId(entity);
            with_runner(|r| r.push_input($crate::engine::InputEvent::Click { entity }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_over(entity: u32) {
            let entity = $crate::engine::EntityId(entity);
            with_runner(|r| r.push_input($crate::engine::InputEvent::PointerOver { entity }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_out(entity: u32) {
            let entity = $crate::engine::EntityId(entity);
            with_runner(|r| r.push_input($crate::engine::InputEvent::PointerOut { entity }));
        }

        // ---- Free-orbit input ----

        #[wasm_bindgen]
        pub fn game_orbit_drag(dx: f32, dy: f32) {
            with_runner(|r| r.push_input($crate::engine::InputEvent::OrbitDrag { dx, dy }));
        }

        #[wasm_bindgen]
        pub fn game_zoom(delta: f32) {
            with_runner(|r| r.push_input($crate::engine::InputEvent::Zoom { delta }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input($crate::engine::InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr())
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sdf_instances_ptr() -> *const f32 {
            with_runner(|r| r.sdf_instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sdf_instance_count() -> u32 {
            with_runner(|r| r.sdf_instance_count())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_sdf_instances() -> u32 {
            with_runner(|r| r.max_sdf_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }

        // ---- Webcam ----

        /// The live webcam stream for the preview `<video>`, if capture is active.
        #[wasm_bindgen]
        pub fn get_capture_stream() -> Option<$crate::web_sys::MediaStream> {
            CAPTURE.with(|cell| cell.borrow().as_ref().and_then(|c| c.stream()))
        }
    };
}
