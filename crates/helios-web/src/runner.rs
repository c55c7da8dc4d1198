use helios_engine::bridge::protocol::{
    ProtocolLayout, HEADER_CAPTURE_STATUS, HEADER_EVENT_COUNT, HEADER_FLOATS,
    HEADER_FRAME_COUNTER, HEADER_MAX_EVENTS, HEADER_MAX_SDF_INSTANCES, HEADER_PROTOCOL_VERSION,
    HEADER_SDF_INSTANCE_COUNT, PROTOCOL_VERSION,
};
use helios_engine::{
    build_sdf_buffer_or_placeholder, CameraUniform, CaptureDevice, CaptureSession,
    EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue, NullCapture,
    SDFBuffer,
};

/// Seed used when the host does not supply one.
const DEFAULT_SEED: u64 = 42;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    sdf_buffer: SDFBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    capture: CaptureSession,
    camera: CameraUniform,
    header: [f32; HEADER_FLOATS],
    frame: u32,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    /// Runner without a capture device and with the default seed.
    pub fn new(game: G) -> Self {
        Self::with_capture(game, Box::new(NullCapture::default()), DEFAULT_SEED)
    }

    pub fn with_capture(game: G, device: Box<dyn CaptureDevice>, seed: u64) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt, config.max_steps_per_frame);
        let layout = ProtocolLayout::from_config(&config);
        let ctx = EngineContext::with_seed(seed);
        let camera = ctx.camera.uniform();

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            sdf_buffer: SDFBuffer::with_capacity(config.max_sdf_instances),
            timestep,
            layout,
            config,
            capture: CaptureSession::new(device),
            camera,
            header: [0.0; HEADER_FLOATS],
            frame: 0,
            initialized: false,
        }
    }

    /// Hand a JSON settings document to the game. Call before `init`.
    pub fn load_settings(&mut self, json: &str) {
        if self.initialized {
            log::warn!("settings loaded after init; only per-frame tunables take effect");
        }
        self.game.load_settings(json);
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.timestep = FixedTimestep::new(self.config.fixed_dt, self.config.max_steps_per_frame);
        self.sdf_buffer = SDFBuffer::with_capacity(self.config.max_sdf_instances);
        self.game.init(&mut self.ctx);
        self.capture.sync(self.ctx.capture_wanted);
        self.publish();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Viewport resize.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.camera.resize(width, height);
    }

    /// Run one frame: fixed-step updates, capture reconciliation, buffer rebuild.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.ctx.capture_status = self.capture.status();
            self.game.update(&mut self.ctx, &self.input, self.timestep.dt());
            // Disabling gesture input must release the camera in this same step.
            self.capture.sync(self.ctx.capture_wanted);
            // Input belongs to the first step only
            self.input.drain();
        }

        if self.ctx.events.len() > self.layout.max_events {
            log::warn!(
                "dropping {} game events over capacity",
                self.ctx.events.len() - self.layout.max_events
            );
            self.ctx.events.truncate(self.layout.max_events);
        }

        self.publish();
    }

    /// Rebuild everything the host reads from the shared buffer.
    fn publish(&mut self) {
        build_sdf_buffer_or_placeholder(self.ctx.scene.iter(), &mut self.sdf_buffer);
        self.camera = self.ctx.camera.uniform();
        self.frame = self.frame.wrapping_add(1);

        self.header[HEADER_FRAME_COUNTER] = self.frame as f32;
        self.header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        self.header[HEADER_MAX_SDF_INSTANCES] = self.layout.max_sdf_instances as f32;
        self.header[HEADER_SDF_INSTANCE_COUNT] = self.sdf_buffer.instance_count() as f32;
        self.header[HEADER_MAX_EVENTS] = self.layout.max_events as f32;
        self.header[HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        self.header[HEADER_CAPTURE_STATUS] = self.capture.status().code();
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for shared-buffer reads ----

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }

    pub fn sdf_instances_ptr(&self) -> *const f32 {
        self.sdf_buffer.instances_ptr()
    }

    pub fn sdf_instance_count(&self) -> u32 {
        self.sdf_buffer.instance_count() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_sdf_instances(&self) -> u32 {
        self.layout.max_sdf_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
