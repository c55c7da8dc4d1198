/// Simulated gesture input. HUD buttons stand in for a recognizer: each
/// press reports a gesture at fixed confidence, which falls back to idle
/// after a delay measured in simulated frame time.

use crate::settings::GestureSettings;
use crate::view_state::{Gesture, ViewState};

#[derive(Debug, Clone, Default)]
pub struct GestureSimulator {
    /// Seconds until the current gesture resets, if one is pending.
    reset_in: Option<f32>,
}

impl GestureSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `gesture` as recognized. A newer gesture restarts the delay.
    pub fn trigger(&mut self, gesture: Gesture, view: &mut ViewState, settings: &GestureSettings) {
        log::debug!("simulated gesture {}", gesture.label());
        if gesture == Gesture::Idle {
            view.set_gesture(Gesture::Idle, 0.0);
            self.reset_in = None;
        } else {
            view.set_gesture(gesture, settings.confidence);
            self.reset_in = Some(settings.reset_after);
        }
    }

    /// Advance the reset timer.
    pub fn tick(&mut self, dt: f32, view: &mut ViewState) {
        if let Some(remaining) = self.reset_in.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.reset_in = None;
                view.set_gesture(Gesture::Idle, 0.0);
            }
        }
    }

    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.reset_in.is_some()
    }
}
