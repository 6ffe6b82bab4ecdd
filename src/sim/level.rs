//! Level: owns the scene, the block counter and the managers effects mutate
//!
//! The host engine reports overlaps through [`Level::report_collision`] and
//! calls [`super::tick`] once per frame; the outer loop polls
//! [`Level::status`] to decide when to offer a restart.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::CameraController;
use super::collision::{reflect_velocity, should_collide};
use super::effect::Effect;
use super::factory::EffectFactory;
use super::lives::LivesLedger;
use super::paddles::PaddleLifecycle;
use super::rect::Rect;
use super::scene::{EntityId, Layer, Scene, SceneObject};
use super::state::{Assets, Ball, BallKind, Block, GameEvent, Paddle, PaddleKind, Wall};
use crate::tuning::Tuning;

/// RNG streams derived from the level seed
const FACTORY_STREAM: u64 = 1;
const GAMEPLAY_STREAM: u64 = 2;

/// Outcome the outer loop acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelStatus {
    Playing,
    Won,
    Lost,
}

pub struct Level {
    pub(crate) tuning: Tuning,
    pub(crate) assets: Assets,
    pub(crate) scene: Scene,
    /// Bricks still standing; the level is clear at zero or below
    pub(crate) remaining_blocks: i32,
    pub(crate) lives: LivesLedger,
    pub(crate) camera: CameraController,
    pub(crate) paddles: PaddleLifecycle,
    /// Gameplay randomness (ball directions)
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    primary_ball: EntityId,
    primary_paddle: EntityId,
    skipped: bool,
    last_status: LevelStatus,
}

impl Level {
    /// Build a level whose bricks get factory-drawn effects
    pub fn new(tuning: Tuning, assets: Assets, seed: u64) -> Self {
        let mut factory = EffectFactory::with_rng(
            tuning.effect_weights,
            Pcg32::new(seed, FACTORY_STREAM),
        );
        Self::with_layout(tuning, assets, seed, |_, _| factory.create_effect())
    }

    /// Build a level, asking `assign(row, col)` for each brick's effect
    pub fn with_layout(
        tuning: Tuning,
        assets: Assets,
        seed: u64,
        mut assign: impl FnMut(u32, u32) -> Effect,
    ) -> Self {
        let tuning = tuning.sanitized();
        let window = tuning.window_size;
        let mut scene = Scene::new();
        let mut rng = Pcg32::new(seed, GAMEPLAY_STREAM);

        add_walls(&mut scene, window, tuning.wall_thickness);

        let primary_ball = serve_primary_ball(&mut scene, &tuning, &assets, &mut rng);

        let paddle_center = Vec2::new(window.x / 2.0, window.y - tuning.paddle_bottom_offset);
        let primary_paddle = scene.add(
            SceneObject::Paddle(Paddle {
                kind: PaddleKind::Primary,
                rect: Rect::centered(paddle_center, tuning.paddle_size),
                hits: 0,
                sprite: assets.paddle,
            }),
            Layer::Default,
        );

        let lives = LivesLedger::new(
            tuning.initial_lives,
            tuning.max_lives,
            window,
            tuning.hud,
            assets.heart,
            &mut scene,
        );

        let brick_size = Vec2::new(tuning.brick_width(), tuning.brick_height);
        let origin = tuning.wall_thickness + tuning.brick_distance_from_walls;
        let step = brick_size + Vec2::splat(tuning.brick_to_brick_distance);
        for row in 0..tuning.brick_rows {
            for col in 0..tuning.brick_cols {
                let top_left = Vec2::splat(origin) + Vec2::new(col as f32, row as f32) * step;
                let block = Block::new(Rect::new(top_left, brick_size), assets.brick, assign(row, col));
                scene.add(SceneObject::Block(block), Layer::StaticObjects);
            }
        }

        log::info!(
            "Level ready: {}x{} bricks, {} lives, seed {}",
            tuning.brick_rows,
            tuning.brick_cols,
            lives.lives(),
            seed
        );

        Self {
            remaining_blocks: tuning.brick_count() as i32,
            camera: CameraController::new(
                tuning.camera_tracking_hits,
                window,
                tuning.camera_frame_factor,
            ),
            paddles: PaddleLifecycle::new(tuning.duplicate_paddle_max_hits),
            tuning,
            assets,
            scene,
            lives,
            rng,
            events: Vec::new(),
            primary_ball,
            primary_paddle,
            skipped: false,
            last_status: LevelStatus::Playing,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn lives(&self) -> &LivesLedger {
        &self.lives
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn paddles(&self) -> &PaddleLifecycle {
        &self.paddles
    }

    pub fn primary_ball(&self) -> EntityId {
        self.primary_ball
    }

    pub fn primary_paddle(&self) -> EntityId {
        self.primary_paddle
    }

    /// Bricks still registered, in layout order
    pub fn block_ids(&self) -> Vec<EntityId> {
        self.scene.block_ids()
    }

    /// Bricks still standing
    pub fn remaining_blocks(&self) -> i32 {
        self.remaining_blocks
    }

    pub fn is_losing(&self) -> bool {
        self.lives.is_losing()
    }

    /// Lose takes precedence over win
    pub fn status(&self) -> LevelStatus {
        if self.is_losing() {
            LevelStatus::Lost
        } else if self.remaining_blocks <= 0 || self.skipped {
            LevelStatus::Won
        } else {
            LevelStatus::Playing
        }
    }

    /// Start a new round on the same board: restore the initial life count,
    /// drop camera tracking and serve the primary ball again if it was lost.
    pub fn restart_lives(&mut self) {
        self.lives.restart();
        self.camera.reset();
        if !self.scene.contains(self.primary_ball) {
            self.primary_ball =
                serve_primary_ball(&mut self.scene, &self.tuning, &self.assets, &mut self.rng);
        }
        log::info!("Lives restored to {}", self.lives.lives());
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Handle one overlap reported by the engine.
    ///
    /// The non-brick side reacts first, so a brick's effect sees the ball's
    /// hit counter including this impact. Pairs involving objects that are no
    /// longer registered are ignored.
    pub fn report_collision(&mut self, a: EntityId, b: EntityId, normal: Vec2) {
        let (Some(obj_a), Some(obj_b)) = (self.scene.get(a), self.scene.get(b)) else {
            return;
        };
        if !should_collide(obj_a, obj_b) {
            return;
        }

        let (first, second) = if matches!(obj_a, SceneObject::Block(_)) {
            (b, a)
        } else {
            (a, b)
        };
        self.on_collision_enter(first, second, normal);
        self.on_collision_enter(second, first, normal);
    }

    fn on_collision_enter(&mut self, this: EntityId, other: EntityId, normal: Vec2) {
        let Some(object) = self.scene.get_mut(this) else {
            return;
        };
        match object {
            SceneObject::Ball(ball) => {
                ball.vel = reflect_velocity(ball.vel, normal);
                ball.hits += 1;
                let sound = ball.collision_sound;
                self.events.push(GameEvent::BallBounce { sound });
            }
            SceneObject::Paddle(paddle) if paddle.kind == PaddleKind::Duplicate => {
                if self.paddles.register_hit(&mut self.scene, this) {
                    self.events.push(GameEvent::DuplicatePaddleExpired);
                }
            }
            SceneObject::Heart(_) => {
                self.scene.remove(this, Layer::Default);
                self.lives.increment();
                self.events.push(GameEvent::HeartCaught);
                log::debug!("Heart caught, lives {}", self.lives.lives());
            }
            SceneObject::Block(block) => {
                let effect = block.effect;
                effect.apply_on_collision(this, other, self);
            }
            _ => {}
        }
    }

    /// Remove hearts and extra balls that fell out; a lost primary ball costs
    /// a life and is served again unless the player is out of lives.
    pub(crate) fn drop_out_of_bounds(&mut self) {
        let lower_bound = self.tuning.window_size.y;

        for id in self.scene.heart_ids() {
            let fell = matches!(self.scene.get(id), Some(SceneObject::Heart(h)) if h.rect.is_below(lower_bound));
            if fell {
                self.scene.remove(id, Layer::Default);
            }
        }

        for id in self.scene.ball_ids() {
            let Some(kind) = self
                .scene
                .ball(id)
                .filter(|b| b.rect.is_below(lower_bound))
                .map(|b| b.kind)
            else {
                continue;
            };
            match kind {
                BallKind::Extra => {
                    self.scene.remove(id, Layer::Default);
                }
                BallKind::Primary => self.lose_primary_ball(id),
            }
        }
    }

    fn lose_primary_ball(&mut self, id: EntityId) {
        self.lives.decrement();
        let lives_left = self.lives.lives();
        self.events.push(GameEvent::BallLost { lives_left });
        log::info!("Ball lost, {} lives left", lives_left);

        if self.lives.is_losing() {
            self.scene.remove(id, Layer::Default);
            return;
        }

        let center = self.tuning.window_size / 2.0;
        let vel = Ball::random_diagonal(&mut self.rng, self.tuning.ball_speed);
        if let Some(ball) = self.scene.ball_mut(id) {
            ball.rect.set_center(center);
            ball.vel = vel;
        }
    }

    /// Force the win status (debug skip)
    pub(crate) fn skip(&mut self) {
        if !self.skipped {
            log::info!("Level skipped");
        }
        self.skipped = true;
    }

    /// Log status transitions once
    pub(crate) fn note_status(&mut self) {
        let status = self.status();
        if status != self.last_status {
            match status {
                LevelStatus::Won => log::info!("Level cleared"),
                LevelStatus::Lost => log::info!("Out of lives"),
                LevelStatus::Playing => {}
            }
            self.last_status = status;
        }
    }
}

/// Primary ball at the window center with a random diagonal velocity
fn serve_primary_ball(
    scene: &mut Scene,
    tuning: &Tuning,
    assets: &Assets,
    rng: &mut Pcg32,
) -> EntityId {
    let mut ball = Ball::new(
        BallKind::Primary,
        tuning.window_size / 2.0,
        tuning.ball_size,
        assets.ball,
        assets.collision_sound,
    );
    ball.vel = Ball::random_diagonal(rng, tuning.ball_speed);
    scene.add(SceneObject::Ball(ball), Layer::Default)
}

fn add_walls(scene: &mut Scene, window: Vec2, thickness: f32) {
    let walls = [
        Rect::new(Vec2::ZERO, Vec2::new(window.x, thickness)),
        Rect::new(Vec2::ZERO, Vec2::new(thickness, window.y)),
        Rect::new(
            Vec2::new(window.x - thickness, 0.0),
            Vec2::new(thickness, window.y),
        ),
    ];
    for rect in walls {
        scene.add(SceneObject::Wall(Wall { rect }), Layer::Default);
    }
}
