use crate::api::types::EntityId;

/// Input event types the engine understands.
/// Generic, with no game-specific semantics. Object events come from the
/// renderer's picking pass, which is the only thing that knows what is under
/// the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer clicked an entity.
    Click { entity: EntityId },
    /// The pointer entered an entity.
    PointerOver { entity: EntityId },
    /// The pointer left an entity.
    PointerOut { entity: EntityId },
    /// Free-orbit drag, in screen pixels since the previous event.
    OrbitDrag { dx: f32, dy: f32 },
    /// Zoom wheel; positive values zoom in.
    Zoom { delta: f32 },
    /// A custom event from the UI layer (HUD buttons, sliders, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
