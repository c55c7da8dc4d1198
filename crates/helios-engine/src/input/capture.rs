//! Capture-device seam.
//!
//! The webcam (or any other capture source) is acquired asynchronously by the
//! host and must never block the frame loop. Games only say whether they want
//! capture; the runner owns a `CaptureSession` and reconciles it every tick.

/// Lifecycle of a capture handle as observed by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureStatus {
    /// No handle held, nothing requested.
    #[default]
    Inactive,
    /// Acquisition started; waiting on the host (permission prompt).
    Pending,
    /// A live handle is held.
    Active,
    /// Acquisition failed (permission denied or no device).
    Denied,
}

impl CaptureStatus {
    /// Numeric code for the event wire format.
    pub fn code(self) -> f32 {
        match self {
            CaptureStatus::Inactive => 0.0,
            CaptureStatus::Pending => 1.0,
            CaptureStatus::Active => 2.0,
            CaptureStatus::Denied => 3.0,
        }
    }

    pub fn is_active(self) -> bool {
        self == CaptureStatus::Active
    }
}

/// A capture source the runner can start and stop.
pub trait CaptureDevice {
    /// Begin acquiring a handle. May complete later; progress shows in `status`.
    fn start(&mut self);

    /// Halt capture and release any held handle before returning.
    /// A pending acquisition that completes afterwards must be released
    /// immediately instead of becoming active.
    fn stop(&mut self);

    /// Current status.
    fn status(&self) -> CaptureStatus;
}

/// Device for hosts without a camera. Every start is denied.
#[derive(Debug, Default)]
pub struct NullCapture {
    status: CaptureStatus,
}

impl CaptureDevice for NullCapture {
    fn start(&mut self) {
        self.status = CaptureStatus::Denied;
    }

    fn stop(&mut self) {
        self.status = CaptureStatus::Inactive;
    }

    fn status(&self) -> CaptureStatus {
        self.status
    }
}

/// Owns a capture device and keeps it in line with what the game wants.
/// Start and stop are issued only on edges, so at most one handle is
/// requested at a time.
pub struct CaptureSession {
    device: Box<dyn CaptureDevice>,
    requested: bool,
}

impl CaptureSession {
    pub fn new(device: Box<dyn CaptureDevice>) -> Self {
        Self {
            device,
            requested: false,
        }
    }

    /// Start or stop the device if `wanted` differs from the current request.
    pub fn sync(&mut self, wanted: bool) {
        if wanted == self.requested {
            return;
        }
        self.requested = wanted;
        if wanted {
            log::info!("capture: starting");
            self.device.start();
        } else {
            log::info!("capture: stopping");
            self.device.stop();
        }
    }

    pub fn status(&self) -> CaptureStatus {
        self.device.status()
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        if self.requested {
            self.device.stop();
        }
    }
}
