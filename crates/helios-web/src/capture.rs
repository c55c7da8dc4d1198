//! Browser webcam behind the engine's `CaptureDevice` seam.
//!
//! `getUserMedia` resolves asynchronously; the frame loop never waits on it.
//! Each start/stop bumps a generation counter so a permission grant that
//! lands after the user disabled gestures is released on arrival.

use std::cell::RefCell;
use std::rc::Rc;

use helios_engine::{CaptureDevice, CaptureStatus};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaStream, MediaStreamConstraints, MediaStreamTrack};

/// Start/stop bookkeeping, generic over the stream handle so it runs natively.
struct Session<S> {
    generation: u64,
    stream: Option<S>,
    status: CaptureStatus,
}

impl<S> Default for Session<S> {
    fn default() -> Self {
        Self {
            generation: 0,
            stream: None,
            status: CaptureStatus::Inactive,
        }
    }
}

impl<S> Session<S> {
    /// Open a new request. The returned ticket identifies it.
    fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.status = CaptureStatus::Pending;
        self.generation
    }

    /// Permission granted. Hands the stream back if the request went stale,
    /// in which case the caller must release it.
    fn grant(&mut self, ticket: u64, stream: S) -> Option<S> {
        if ticket != self.generation {
            return Some(stream);
        }
        self.stream = Some(stream);
        self.status = CaptureStatus::Active;
        None
    }

    /// Permission refused. Stale refusals are ignored.
    fn deny(&mut self, ticket: u64) {
        if ticket == self.generation {
            self.status = CaptureStatus::Denied;
        }
    }

    /// Invalidate any pending request and hand back the held stream.
    fn end(&mut self) -> Option<S> {
        self.generation += 1;
        self.status = CaptureStatus::Inactive;
        self.stream.take()
    }
}

/// Webcam capture. Clones share the same underlying stream, so the export
/// layer can hand the live stream to a `<video>` element.
#[derive(Clone, Default)]
pub struct WebcamCapture {
    shared: Rc<RefCell<Session<MediaStream>>>,
}

impl WebcamCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live stream, if one is held.
    pub fn stream(&self) -> Option<MediaStream> {
        self.shared.borrow().stream.clone()
    }

    fn request() -> Result<js_sys::Promise, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let devices = window.navigator().media_devices()?;
        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&JsValue::TRUE);
        devices.get_user_media_with_constraints(&constraints)
    }
}

fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

impl CaptureDevice for WebcamCapture {
    fn start(&mut self) {
        let ticket = self.shared.borrow_mut().begin();

        let promise = match Self::request() {
            Ok(promise) => promise,
            Err(err) => {
                log::error!("Camera access unavailable: {err:?}");
                self.shared.borrow_mut().deny(ticket);
                return;
            }
        };

        let shared = Rc::clone(&self.shared);
        wasm_bindgen_futures::spawn_local(async move {
            let result = JsFuture::from(promise).await;
            let mut shared = shared.borrow_mut();
            match result {
                Ok(value) => match shared.grant(ticket, value.unchecked_into()) {
                    None => log::info!("capture: stream active"),
                    Some(stale) => {
                        stop_tracks(&stale);
                        log::info!("capture: released stream granted after stop");
                    }
                },
                Err(err) => {
                    log::error!("Camera access denied or unavailable: {err:?}");
                    shared.deny(ticket);
                }
            }
        });
    }

    fn stop(&mut self) {
        if let Some(stream) = self.shared.borrow_mut().end() {
            stop_tracks(&stream);
        }
    }

    fn status(&self) -> CaptureStatus {
        self.shared.borrow().status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_for_current_request_is_kept() {
        let mut session = Session::default();
        let ticket = session.begin();
        assert_eq!(session.status, CaptureStatus::Pending);
        assert_eq!(session.grant(ticket, "cam"), None);
        assert_eq!(session.status, CaptureStatus::Active);
        assert_eq!(session.end(), Some("cam"));
        assert_eq!(session.status, CaptureStatus::Inactive);
    }

    #[test]
    fn grant_after_stop_is_released() {
        let mut session = Session::default();
        let ticket = session.begin();
        assert_eq!(session.end(), None);
        assert_eq!(session.grant(ticket, "late"), Some("late"));
        assert_eq!(session.status, CaptureStatus::Inactive);
        assert!(session.stream.is_none());
    }

    #[test]
    fn only_the_latest_request_counts() {
        let mut session = Session::default();
        let first = session.begin();
        session.end();
        let second = session.begin();
        assert_eq!(session.grant(first, 1), Some(1));
        session.deny(first);
        assert_eq!(session.status, CaptureStatus::Pending);
        assert_eq!(session.grant(second, 2), None);
        assert_eq!(session.stream, Some(2));
    }

    #[test]
    fn denial_of_current_request_is_reported() {
        let mut session = Session::<u32>::default();
        let ticket = session.begin();
        session.deny(ticket);
        assert_eq!(session.status, CaptureStatus::Denied);
    }
}
