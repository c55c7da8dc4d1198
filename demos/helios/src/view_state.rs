/// Shared view state: selection, hover, simulation speed and gesture.
///
/// UI intents mutate it through the setters below; the motion model and the
/// camera controller read it. Subscribers are told which fields changed and
/// only hear about the fields they asked for.

use crate::bodies::{self, PlanetSpec};

/// Coarse camera-mode label derived from the active planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Orbital,
    Locked,
}

impl CameraMode {
    pub fn label(self) -> &'static str {
        match self {
            CameraMode::Orbital => "ORBITAL",
            CameraMode::Locked => "LOCKED",
        }
    }

    pub fn code(self) -> f32 {
        match self {
            CameraMode::Orbital => 0.0,
            CameraMode::Locked => 1.0,
        }
    }
}

/// Recognized (or simulated) hand gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Hover / explore.
    OpenHand,
    /// Grab / rotate.
    ClosedFist,
    /// Select / focus. Pulls the free camera toward the overview pose.
    Pointing,
    /// Zoom out. Releases a locked planet.
    Victory,
}

impl Gesture {
    pub fn code(self) -> f32 {
        match self {
            Gesture::Idle => 0.0,
            Gesture::OpenHand => 1.0,
            Gesture::ClosedFist => 2.0,
            Gesture::Pointing => 3.0,
            Gesture::Victory => 4.0,
        }
    }

    /// Inverse of `code`. Unknown or fractional codes yield None.
    pub fn from_code(code: f32) -> Option<Self> {
        if !code.is_finite() || code.fract() != 0.0 {
            return None;
        }
        match code as i32 {
            0 => Some(Gesture::Idle),
            1 => Some(Gesture::OpenHand),
            2 => Some(Gesture::ClosedFist),
            3 => Some(Gesture::Pointing),
            4 => Some(Gesture::Victory),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gesture::Idle => "IDLE",
            Gesture::OpenHand => "OPEN_HAND",
            Gesture::ClosedFist => "CLOSED_FIST",
            Gesture::Pointing => "POINTING",
            Gesture::Victory => "VICTORY",
        }
    }
}

/// Bit set of view-state fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeSet(u8);

impl ChangeSet {
    pub const NONE: ChangeSet = ChangeSet(0);
    pub const ACTIVE: ChangeSet = ChangeSet(1 << 0);
    pub const CAMERA_MODE: ChangeSet = ChangeSet(1 << 1);
    pub const HOVERED: ChangeSet = ChangeSet(1 << 2);
    pub const SPEED: ChangeSet = ChangeSet(1 << 3);
    pub const GESTURE: ChangeSet = ChangeSet(1 << 4);
    pub const GESTURE_ENABLED: ChangeSet = ChangeSet(1 << 5);
    pub const ALL: ChangeSet = ChangeSet(0b11_1111);

    #[cfg(test)]
    pub fn contains(self, other: ChangeSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: ChangeSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for ChangeSet {
    type Output = ChangeSet;
    fn bitor(self, rhs: ChangeSet) -> ChangeSet {
        ChangeSet(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for ChangeSet {
    fn bitor_assign(&mut self, rhs: ChangeSet) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for ChangeSet {
    type Output = ChangeSet;
    fn bitand(self, rhs: ChangeSet) -> ChangeSet {
        ChangeSet(self.0 & rhs.0)
    }
}

/// The fields themselves. Subscribers receive a reference to this.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub active_planet: Option<&'static PlanetSpec>,
    pub hovered_planet: Option<&'static PlanetSpec>,
    pub camera_mode: CameraMode,
    pub simulation_speed: f32,
    pub gesture: Gesture,
    pub confidence: f32,
    pub gesture_enabled: bool,
}

impl Default for ViewSnapshot {
    fn default() -> Self {
        Self {
            active_planet: None,
            hovered_planet: None,
            camera_mode: CameraMode::Orbital,
            simulation_speed: 1.0,
            gesture: Gesture::Idle,
            confidence: 0.0,
            gesture_enabled: true,
        }
    }
}

impl ViewSnapshot {
    pub fn active_id(&self) -> Option<&'static str> {
        self.active_planet.map(|p| p.id)
    }

    pub fn hovered_id(&self) -> Option<&'static str> {
        self.hovered_planet.map(|p| p.id)
    }
}

/// Callback invoked with the new state and the fields (within its interest) that changed.
pub type ViewListener = Box<dyn FnMut(&ViewSnapshot, ChangeSet)>;

/// Handle returned by `subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u32);

struct Subscriber {
    id: SubscriptionId,
    interest: ChangeSet,
    listener: ViewListener,
}

/// Observable view state.
pub struct ViewState {
    snapshot: ViewSnapshot,
    subscribers: Vec<Subscriber>,
    next_subscription: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewState")
            .field("snapshot", &self.snapshot)
            .field("subscribers", &self.subscribers.iter().map(|s| s.id.0).collect::<Vec<_>>())
            .finish()
    }
}

/// Resolve an optional planet id. Unknown ids mean no planet.
fn resolve(id: Option<&str>, what: &str) -> Option<&'static PlanetSpec> {
    let id = id?;
    let spec = bodies::find(id);
    if spec.is_none() {
        log::warn!("unknown planet id {id:?} for {what}, treating as none");
    }
    spec
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            snapshot: ViewSnapshot::default(),
            subscribers: Vec::new(),
            next_subscription: 1,
        }
    }

    pub fn snapshot(&self) -> &ViewSnapshot {
        &self.snapshot
    }

    pub fn active_planet(&self) -> Option<&'static PlanetSpec> {
        self.snapshot.active_planet
    }

    pub fn simulation_speed(&self) -> f32 {
        self.snapshot.simulation_speed
    }

    pub fn gesture(&self) -> Gesture {
        self.snapshot.gesture
    }

    pub fn gesture_enabled(&self) -> bool {
        self.snapshot.gesture_enabled
    }

    /// Register a listener for the fields in `interest`.
    pub fn subscribe(&mut self, interest: ChangeSet, listener: ViewListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push(Subscriber { id, interest, listener });
        id
    }

    /// Select a planet (or none). Also sets the camera mode.
    pub fn set_active_planet(&mut self, id: Option<&str>) {
        let planet = resolve(id, "selection");
        let mode = if planet.is_some() {
            CameraMode::Locked
        } else {
            CameraMode::Orbital
        };
        let mut changed = ChangeSet::NONE;
        if self.snapshot.active_id() != planet.map(|p| p.id) {
            self.snapshot.active_planet = planet;
            changed |= ChangeSet::ACTIVE;
        }
        if self.snapshot.camera_mode != mode {
            log::debug!("camera mode {}", mode.label());
            self.snapshot.camera_mode = mode;
            changed |= ChangeSet::CAMERA_MODE;
        }
        self.notify(changed);
    }

    pub fn set_hovered_planet(&mut self, id: Option<&str>) {
        let planet = resolve(id, "hover");
        if self.snapshot.hovered_id() != planet.map(|p| p.id) {
            self.snapshot.hovered_planet = planet;
            self.notify(ChangeSet::HOVERED);
        }
    }

    /// Callers clamp to the slider range. Non-finite values are ignored.
    pub fn set_simulation_speed(&mut self, speed: f32) {
        if !speed.is_finite() {
            log::warn!("ignoring non-finite simulation speed");
            return;
        }
        if self.snapshot.simulation_speed != speed {
            self.snapshot.simulation_speed = speed;
            self.notify(ChangeSet::SPEED);
        }
    }

    pub fn set_gesture(&mut self, gesture: Gesture, confidence: f32) {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if self.snapshot.gesture != gesture || self.snapshot.confidence != confidence {
            self.snapshot.gesture = gesture;
            self.snapshot.confidence = confidence;
            self.notify(ChangeSet::GESTURE);
        }
    }

    pub fn toggle_gesture_enabled(&mut self) {
        self.snapshot.gesture_enabled = !self.snapshot.gesture_enabled;
        self.notify(ChangeSet::GESTURE_ENABLED);
    }

    fn notify(&mut self, changed: ChangeSet) {
        if changed.is_empty() {
            return;
        }
        let snapshot = &self.snapshot;
        for sub in &mut self.subscribers {
            let relevant = changed & sub.interest;
            if !relevant.is_empty() {
                (sub.listener)(snapshot, relevant);
            }
        }
    }
}

#[cfg(test)]
impl ViewState {
    pub fn hovered_planet(&self) -> Option<&'static PlanetSpec> {
        self.snapshot.hovered_planet
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.snapshot.camera_mode
    }

    pub fn confidence(&self) -> f32 {
        self.snapshot.confidence
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }
}
