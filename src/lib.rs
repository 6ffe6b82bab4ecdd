//! Bricker - a brick-breaking arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision effects, lives, camera, paddles)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, input polling and collision detection belong to the host engine.
//! The engine reports overlaps through [`sim::Level::report_collision`] and
//! drives one [`sim::tick`] per frame.

pub mod sim;
pub mod tuning;

pub use tuning::{EffectWeights, HudLayout, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 700.0;
    pub const WINDOW_HEIGHT: f32 = 500.0;

    /// Wall thickness (top, left and right walls)
    pub const WALL_THICKNESS: f32 = 5.0;

    /// Brick grid defaults
    pub const BRICK_ROWS: u32 = 7;
    pub const BRICK_COLS: u32 = 8;
    pub const BRICK_HEIGHT: f32 = 15.0;
    pub const BRICK_DISTANCE_FROM_WALLS: f32 = 20.0;
    pub const BRICK_TO_BRICK_DISTANCE: f32 = 5.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Distance from the paddle center to the bottom of the window
    pub const PADDLE_BOTTOM_OFFSET: f32 = 30.0;
    pub const PADDLE_SPEED: f32 = 300.0;
    /// Paddles never get closer than this to the side edges
    pub const PADDLE_EDGE_MARGIN: f32 = 7.0;
    /// Hits a duplicate paddle absorbs before it disappears
    pub const DUPLICATE_PADDLE_MAX_HITS: u32 = 4;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 20.0;
    /// Per-axis speed (balls always travel diagonally)
    pub const BALL_SPEED: f32 = 250.0;
    /// Extra balls are smaller than the primary one
    pub const EXTRA_BALL_RATIO: f32 = 0.75;
    pub const EXTRA_BALLS_PER_BLOCK: u32 = 2;

    /// Heart pickup defaults
    pub const HEART_SIZE: f32 = 15.0;
    pub const HEART_FALL_SPEED: f32 = 100.0;

    /// Lives
    pub const INITIAL_LIVES: u32 = 3;
    pub const MAX_LIVES: u32 = 4;

    /// Ball hits the tracking camera stays on for
    pub const CAMERA_TRACKING_HITS: u32 = 4;
    /// Camera frame size relative to the window
    pub const CAMERA_FRAME_FACTOR: f32 = 1.2;

    /// HUD layout for the lives row (bottom-left corner)
    pub const HUD_LEFT: f32 = 10.0;
    pub const HUD_BOTTOM: f32 = 20.0;
    pub const HUD_ICON_SIZE: f32 = 15.0;
    pub const HUD_ICON_SPACING: f32 = 25.0;
}
