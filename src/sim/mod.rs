//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies
//!
//! Bricks carry an [`Effect`] drawn by the [`EffectFactory`]. When a ball
//! breaks a brick the effect runs against the [`Level`], which owns the
//! scene and the managers effects act through.

pub mod camera;
pub mod catalog;
pub mod collision;
pub mod effect;
pub mod factory;
pub mod level;
pub mod lives;
pub mod paddles;
pub mod rect;
pub mod scene;
pub mod state;
pub mod tick;

pub use camera::{CameraController, CameraView};
pub use catalog::{EffectKind, SpecialEffect};
pub use collision::{reflect_velocity, should_collide};
pub use effect::Effect;
pub use factory::EffectFactory;
pub use level::{Level, LevelStatus};
pub use lives::LivesLedger;
pub use paddles::PaddleLifecycle;
pub use rect::Rect;
pub use scene::{EntityId, Layer, Scene, SceneObject};
pub use state::{
    AssetId, Assets, Ball, BallKind, Block, GameEvent, Heart, LabelColor, LifeIcon, LifeLabel,
    Paddle, PaddleKind, Wall,
};
pub use tick::{TickInput, paddle_velocity, tick};
