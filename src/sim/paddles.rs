//! Duplicate paddle lifecycle
//!
//! At most one duplicate paddle exists at a time. The guard is the
//! `duplicate` handle itself: it is `Some` exactly while the duplicate is
//! registered in the scene.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::scene::{EntityId, Layer, Scene, SceneObject};
use super::state::{AssetId, Paddle, PaddleKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaddleLifecycle {
    duplicate: Option<EntityId>,
    max_hits: u32,
}

impl PaddleLifecycle {
    /// `max_hits`: collisions a duplicate absorbs before it disappears
    pub fn new(max_hits: u32) -> Self {
        Self {
            duplicate: None,
            max_hits,
        }
    }

    pub fn is_active(&self) -> bool {
        self.duplicate.is_some()
    }

    pub fn duplicate(&self) -> Option<EntityId> {
        self.duplicate
    }

    /// Spawn the duplicate paddle unless one already exists
    pub fn spawn_duplicate(
        &mut self,
        scene: &mut Scene,
        rect: Rect,
        sprite: AssetId,
    ) -> Option<EntityId> {
        if self.duplicate.is_some() {
            log::debug!("Duplicate paddle already active, not spawning another");
            return None;
        }
        let paddle = Paddle {
            kind: PaddleKind::Duplicate,
            rect,
            hits: 0,
            sprite,
        };
        let id = scene.add(SceneObject::Paddle(paddle), Layer::Default);
        self.duplicate = Some(id);
        log::info!("Duplicate paddle {:?} spawned", id);
        Some(id)
    }

    /// Count a collision on `paddle`. Removes the duplicate once it has
    /// absorbed `max_hits` collisions. Returns true if it was removed.
    pub fn register_hit(&mut self, scene: &mut Scene, paddle: EntityId) -> bool {
        if self.duplicate != Some(paddle) {
            return false;
        }
        let Some(dup) = scene.paddle_mut(paddle) else {
            // Removed behind our back; release the guard
            self.duplicate = None;
            return false;
        };
        dup.hits += 1;
        if dup.hits < self.max_hits {
            return false;
        }

        scene.remove(paddle, Layer::Default);
        self.duplicate = None;
        log::info!("Duplicate paddle {:?} expired", paddle);
        true
    }
}
