//! Data-driven game balance
//!
//! Every gameplay constant the core reads lives here so a level can be
//! re-balanced from a JSON file without recompiling. Defaults reproduce the
//! classic Bricker numbers from [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Relative weights for the top-level effect draw.
///
/// Plain removal should stay substantially more likely than any single
/// special effect, otherwise the board fills with hearts and extra balls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectWeights {
    pub remove: u32,
    pub add_life: u32,
    pub second_paddle: u32,
    pub tracking_camera: u32,
    pub extra_balls: u32,
    pub composite: u32,
}

impl Default for EffectWeights {
    fn default() -> Self {
        // 50% removal, 10% each for the rest
        Self {
            remove: 5,
            add_life: 1,
            second_paddle: 1,
            tracking_camera: 1,
            extra_balls: 1,
            composite: 1,
        }
    }
}

impl EffectWeights {
    /// Sum of all six weights. Widened so any `u32` weights fit.
    pub fn total(&self) -> u64 {
        [
            self.remove,
            self.add_life,
            self.second_paddle,
            self.tracking_camera,
            self.extra_balls,
            self.composite,
        ]
        .iter()
        .map(|w| u64::from(*w))
        .sum()
    }

    /// Sum of the four special effect weights (the composite sub-draw domain)
    pub fn special_total(&self) -> u64 {
        [
            self.add_life,
            self.second_paddle,
            self.tracking_camera,
            self.extra_balls,
        ]
        .iter()
        .map(|w| u64::from(*w))
        .sum()
    }
}

/// Placement of the lives row in the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudLayout {
    /// Distance of the first icon from the left edge
    pub left: f32,
    /// Distance of the row from the bottom edge
    pub bottom: f32,
    pub icon_size: f32,
    pub icon_spacing: f32,
}

impl Default for HudLayout {
    fn default() -> Self {
        Self {
            left: HUD_LEFT,
            bottom: HUD_BOTTOM,
            icon_size: HUD_ICON_SIZE,
            icon_spacing: HUD_ICON_SPACING,
        }
    }
}

/// Gameplay tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub window_size: Vec2,
    pub wall_thickness: f32,

    // === Bricks ===
    pub brick_rows: u32,
    pub brick_cols: u32,
    pub brick_height: f32,
    pub brick_distance_from_walls: f32,
    pub brick_to_brick_distance: f32,

    // === Paddles ===
    pub paddle_size: Vec2,
    pub paddle_bottom_offset: f32,
    pub paddle_speed: f32,
    pub paddle_edge_margin: f32,
    pub duplicate_paddle_max_hits: u32,

    // === Balls ===
    pub ball_size: Vec2,
    pub ball_speed: f32,
    pub extra_ball_ratio: f32,
    pub extra_balls_per_block: u32,

    // === Hearts & lives ===
    pub heart_size: Vec2,
    pub heart_fall_speed: f32,
    pub initial_lives: u32,
    pub max_lives: u32,

    // === Camera ===
    pub camera_tracking_hits: u32,
    pub camera_frame_factor: f32,

    // === HUD ===
    pub hud: HudLayout,

    // === Effects ===
    pub effect_weights: EffectWeights,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            window_size: Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            wall_thickness: WALL_THICKNESS,

            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
            brick_height: BRICK_HEIGHT,
            brick_distance_from_walls: BRICK_DISTANCE_FROM_WALLS,
            brick_to_brick_distance: BRICK_TO_BRICK_DISTANCE,

            paddle_size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,
            paddle_speed: PADDLE_SPEED,
            paddle_edge_margin: PADDLE_EDGE_MARGIN,
            duplicate_paddle_max_hits: DUPLICATE_PADDLE_MAX_HITS,

            ball_size: Vec2::splat(BALL_SIZE),
            ball_speed: BALL_SPEED,
            extra_ball_ratio: EXTRA_BALL_RATIO,
            extra_balls_per_block: EXTRA_BALLS_PER_BLOCK,

            heart_size: Vec2::splat(HEART_SIZE),
            heart_fall_speed: HEART_FALL_SPEED,
            initial_lives: INITIAL_LIVES,
            max_lives: MAX_LIVES,

            camera_tracking_hits: CAMERA_TRACKING_HITS,
            camera_frame_factor: CAMERA_FRAME_FACTOR,

            hud: HudLayout::default(),

            effect_weights: EffectWeights::default(),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Serialize tuning to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values that would break level invariants
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.max_lives == 0 {
            log::warn!("max_lives must be at least 1, using {}", defaults.max_lives);
            self.max_lives = defaults.max_lives;
        }
        if self.initial_lives > self.max_lives {
            log::warn!(
                "initial_lives {} exceeds max_lives {}, clamping",
                self.initial_lives,
                self.max_lives
            );
            self.initial_lives = self.max_lives;
        }
        if self.brick_cols == 0 {
            log::warn!("brick_cols must be at least 1, using {}", defaults.brick_cols);
            self.brick_cols = defaults.brick_cols;
        }
        if self.duplicate_paddle_max_hits == 0 {
            log::warn!(
                "duplicate_paddle_max_hits must be at least 1, using {}",
                defaults.duplicate_paddle_max_hits
            );
            self.duplicate_paddle_max_hits = defaults.duplicate_paddle_max_hits;
        }
        if self.effect_weights.total() == 0 {
            log::warn!("effect weights are all zero, using defaults");
            self.effect_weights = defaults.effect_weights;
        }

        self
    }

    /// Width of a single brick so that `brick_cols` bricks fill the row
    pub fn brick_width(&self) -> f32 {
        let cols = self.brick_cols.max(1) as f32;
        let margins = (self.wall_thickness + self.brick_distance_from_walls) * 2.0;
        let gaps = self.brick_to_brick_distance * (cols - 1.0);
        (self.window_size.x - margins - gaps) / cols
    }

    /// Total bricks in the layout
    pub fn brick_count(&self) -> u32 {
        self.brick_rows * self.brick_cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_brick_width_fills_row() {
        let tuning = Tuning::default();
        let width = tuning.brick_width();
        // (700 - 50 - 35) / 8
        assert!((width - 76.875).abs() < 0.001);
        assert_eq!(tuning.brick_count(), 56);
    }

    #[test]
    fn test_remove_dominates_default_weights() {
        let weights = EffectWeights::default();
        assert_eq!(weights.total(), 10);
        assert_eq!(weights.special_total(), 4);
        assert!(weights.remove > weights.add_life);
        assert!(weights.remove > weights.composite);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "brick_rows": 2, "brick_cols": 3 }"#)
            .expect("valid json");
        assert_eq!(tuning.brick_count(), 6);
        assert_eq!(tuning.max_lives, MAX_LIVES);
        assert_eq!(tuning.effect_weights, EffectWeights::default());
    }

    #[test]
    fn test_sanitize_clamps_lives_and_weights() {
        let json = r#"{
            "initial_lives": 9,
            "max_lives": 5,
            "effect_weights": {
                "remove": 0, "add_life": 0, "second_paddle": 0,
                "tracking_camera": 0, "extra_balls": 0, "composite": 0
            }
        }"#;
        let tuning = Tuning::from_json(json).expect("valid json");
        assert_eq!(tuning.initial_lives, 5);
        assert_eq!(tuning.effect_weights, EffectWeights::default());
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().expect("serialize");
        assert_eq!(Tuning::from_json(&json).expect("parse"), tuning);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_huge_weights_parse_without_overflow() {
        let json = r#"{
            "effect_weights": {
                "remove": 4294967295, "add_life": 4294967295, "second_paddle": 4294967295,
                "tracking_camera": 4294967295, "extra_balls": 4294967295, "composite": 4294967295
            }
        }"#;
        let tuning = Tuning::from_json(json).expect("valid json");
        assert_eq!(tuning.effect_weights.remove, u32::MAX);
        assert_eq!(tuning.effect_weights.total(), 6 * u64::from(u32::MAX));
        assert_eq!(tuning.effect_weights.special_total(), 4 * u64::from(u32::MAX));
    }

    #[test]
    fn test_hud_layout_from_json() {
        let tuning = Tuning::from_json(r#"{ "hud": { "left": 30.0 } }"#).expect("valid json");
        assert_eq!(tuning.hud.left, 30.0);
        assert_eq!(tuning.hud.icon_size, HUD_ICON_SIZE);
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let dir = std::env::temp_dir().join(format!("bricker-tuning-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");

        // Missing file
        let missing = dir.join("missing.json");
        assert_eq!(Tuning::load_or_default(&missing), Tuning::default());

        // Unparseable file
        let broken = dir.join("broken.json");
        std::fs::write(&broken, "{ not json").expect("write");
        assert_eq!(Tuning::load_or_default(&broken), Tuning::default());

        // Valid file is honored
        let valid = dir.join("valid.json");
        std::fs::write(&valid, r#"{ "brick_rows": 2 }"#).expect("write");
        assert_eq!(Tuning::load_or_default(&valid).brick_rows, 2);

        std::fs::remove_dir_all(&dir).expect("cleanup");
    }
}
