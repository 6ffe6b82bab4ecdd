//! Scene object types
//!
//! Every object the core spawns or despawns through the scene registry.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::rect::Rect;

/// Opaque reference to an engine-owned image or sound.
///
/// The core only carries these around; loading and decoding is the host's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u32);

/// Asset handles the effects and the level hand to spawned objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assets {
    pub brick: AssetId,
    pub ball: AssetId,
    pub extra_ball: AssetId,
    pub paddle: AssetId,
    pub second_paddle: AssetId,
    pub heart: AssetId,
    pub collision_sound: AssetId,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            brick: AssetId(1),
            ball: AssetId(2),
            extra_ball: AssetId(3),
            paddle: AssetId(4),
            second_paddle: AssetId(5),
            heart: AssetId(6),
            collision_sound: AssetId(7),
        }
    }
}

/// Which ball this is. Only the primary ball costs lives and drives the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallKind {
    Primary,
    Extra,
}

/// A ball (projectile)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub kind: BallKind,
    pub rect: Rect,
    pub vel: Vec2,
    /// Collisions this ball has taken part in since it was spawned
    pub hits: u32,
    pub sprite: AssetId,
    pub collision_sound: AssetId,
}

impl Ball {
    pub fn new(kind: BallKind, center: Vec2, size: Vec2, sprite: AssetId, sound: AssetId) -> Self {
        Self {
            kind,
            rect: Rect::centered(center, size),
            vel: Vec2::ZERO,
            hits: 0,
            sprite,
            collision_sound: sound,
        }
    }

    /// One of the four diagonals at `speed` per axis, chosen uniformly
    pub fn random_diagonal<R: Rng + ?Sized>(rng: &mut R, speed: f32) -> Vec2 {
        let x = if rng.random_bool(0.5) { -speed } else { speed };
        let y = if rng.random_bool(0.5) { -speed } else { speed };
        Vec2::new(x, y)
    }
}

/// A destructible brick bound to one effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    pub sprite: AssetId,
    pub effect: Effect,
    /// Set the first time the block resolves; never cleared
    pub resolved: bool,
}

impl Block {
    pub fn new(rect: Rect, sprite: AssetId, effect: Effect) -> Self {
        Self {
            rect,
            sprite,
            effect,
            resolved: false,
        }
    }
}

/// A falling heart pickup. Only the primary paddle can catch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heart {
    pub rect: Rect,
    pub vel: Vec2,
    pub sprite: AssetId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleKind {
    Primary,
    Duplicate,
}

/// A player paddle. Both kinds follow the same input binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub kind: PaddleKind,
    pub rect: Rect,
    /// Collisions absorbed (only duplicates care)
    pub hits: u32,
    pub sprite: AssetId,
}

impl Paddle {
    /// Move horizontally by `direction * speed * dt`, keeping `margin` from both edges
    pub fn steer(&mut self, direction: f32, speed: f32, dt: f32, window_width: f32, margin: f32) {
        self.rect.translate(Vec2::new(direction * speed * dt, 0.0));
        self.rect.clamp_x(margin, window_width - margin);
    }
}

/// A static wall balls bounce off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub rect: Rect,
}

/// Numeric lives label color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelColor {
    Red,
    Yellow,
    Green,
}

impl LabelColor {
    /// Red at one life (or none), yellow at two, green from three up
    pub fn for_lives(lives: u32) -> Self {
        match lives {
            0 | 1 => LabelColor::Red,
            2 => LabelColor::Yellow,
            _ => LabelColor::Green,
        }
    }
}

/// The numeric lives label in the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeLabel {
    pub rect: Rect,
    pub text: String,
    pub color: LabelColor,
}

/// One heart icon in the HUD lives row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeIcon {
    pub slot: usize,
    pub rect: Rect,
    pub sprite: AssetId,
}

/// Gameplay events for audio/VFX, drained by the host once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A ball bounced off something (play its collision sound)
    BallBounce { sound: AssetId },
    BlockBroken,
    HeartSpawned,
    HeartCaught,
    ExtraBallsSpawned { count: u32 },
    DuplicatePaddleSpawned,
    DuplicatePaddleExpired,
    CameraTrackingOn,
    CameraTrackingOff,
    /// Primary ball fell out; `lives_left` after the loss
    BallLost { lives_left: u32 },
}
