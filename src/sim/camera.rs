//! Tracking camera controller
//!
//! The camera follows the primary ball for a fixed number of ball impacts,
//! counted on the ball's own hit counter, not in frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::scene::{EntityId, Scene};

/// What the host camera should show while tracking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    /// Object to follow
    pub target: EntityId,
    /// World-space frame size around the target
    pub frame_size: Vec2,
    /// Screen size the frame is mapped onto
    pub window_size: Vec2,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Tracking {
    view: CameraView,
    hits_to_reach: u32,
}

/// The single camera of a level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraController {
    tracking: Option<Tracking>,
    tracking_hits: u32,
    frame_size: Vec2,
    window_size: Vec2,
}

impl CameraController {
    /// `tracking_hits`: impacts the camera stays on for after it starts.
    /// `frame_factor`: frame size relative to the window.
    pub fn new(tracking_hits: u32, window_size: Vec2, frame_factor: f32) -> Self {
        Self {
            tracking: None,
            tracking_hits,
            frame_size: window_size * frame_factor,
            window_size,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Current view, `None` when the camera is static
    pub fn view(&self) -> Option<CameraView> {
        self.tracking.map(|t| t.view)
    }

    /// Hit count after which tracking stops
    pub fn hits_to_reach(&self) -> Option<u32> {
        self.tracking.map(|t| t.hits_to_reach)
    }

    /// Start following `target`, whose hit counter currently reads `current_hits`.
    /// Returns false (and changes nothing) if already tracking.
    pub fn start_tracking(&mut self, target: EntityId, current_hits: u32) -> bool {
        if self.tracking.is_some() {
            return false;
        }
        let hits_to_reach = current_hits + self.tracking_hits;
        self.tracking = Some(Tracking {
            view: CameraView {
                target,
                frame_size: self.frame_size,
                window_size: self.window_size,
            },
            hits_to_reach,
        });
        log::info!(
            "Camera tracking {:?} until hit {} (now {})",
            target,
            hits_to_reach,
            current_hits
        );
        true
    }

    /// Per-frame check. Turns tracking off once the target's hit counter has
    /// passed the threshold, or if the target left the scene.
    /// Returns true when tracking was switched off by this call.
    pub fn reconcile(&mut self, scene: &Scene) -> bool {
        let Some(tracking) = self.tracking else {
            return false;
        };
        let done = match scene.ball(tracking.view.target) {
            Some(ball) => ball.hits > tracking.hits_to_reach,
            None => true,
        };
        if done {
            self.tracking = None;
            log::info!("Camera tracking off");
        }
        done
    }

    /// Drop tracking without waiting for the hit budget
    pub fn reset(&mut self) {
        self.tracking = None;
    }
}
