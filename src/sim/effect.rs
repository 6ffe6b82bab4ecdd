//! Collision effects
//!
//! Every brick owns one [`Effect`]. When the engine reports that something hit
//! the brick, the level calls [`Effect::apply_on_collision`], which always
//! starts with the basic removal (deactivate, despawn, decrement the
//! remaining-block counter) and then runs the special part, if any.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::SpecialEffect;
use super::level::Level;
use super::rect::Rect;
use super::scene::{EntityId, Layer, SceneObject};
use super::state::{Ball, BallKind, GameEvent, Heart};

/// Behavior a brick runs when struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Basic removal only
    Remove,
    /// Basic removal plus one special effect
    Special(SpecialEffect),
    /// Basic removal once, then `first`, then `second`
    Composite(SpecialEffect, SpecialEffect),
}

impl Effect {
    /// Resolve `block` after `collider` hit it.
    ///
    /// Idempotent: once the block has resolved, further calls do nothing.
    pub fn apply_on_collision(&self, block: EntityId, collider: EntityId, level: &mut Level) {
        let Some(center) = remove_block(block, level) else {
            return;
        };

        match *self {
            Effect::Remove => {}
            Effect::Special(special) => special.apply(center, collider, level),
            Effect::Composite(first, second) => {
                first.apply(center, collider, level);
                second.apply(center, collider, level);
            }
        }
    }

    /// Special effects this brick carries, in application order
    pub fn specials(&self) -> Vec<SpecialEffect> {
        match *self {
            Effect::Remove => Vec::new(),
            Effect::Special(special) => vec![special],
            Effect::Composite(first, second) => vec![first, second],
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Effect::Composite(..))
    }
}

impl SpecialEffect {
    /// Run the special part only. Basic removal has already happened.
    fn apply(self, block_center: Vec2, collider: EntityId, level: &mut Level) {
        match self {
            SpecialEffect::AddLife => spawn_heart(block_center, level),
            SpecialEffect::SecondPaddle => spawn_second_paddle(level),
            SpecialEffect::TrackingCamera => track_ball(collider, level),
            SpecialEffect::ExtraBalls => spawn_extra_balls(block_center, level),
        }
    }
}

/// Basic removal. Returns the brick's center if this call resolved it.
fn remove_block(block: EntityId, level: &mut Level) -> Option<Vec2> {
    let brick = level.scene.block_mut(block)?;
    if brick.resolved {
        return None;
    }
    brick.resolved = true;
    let center = brick.rect.center();

    level.scene.remove(block, Layer::StaticObjects);
    level.remaining_blocks -= 1;
    level.events.push(GameEvent::BlockBroken);
    log::debug!(
        "Block {:?} removed, {} remaining",
        block,
        level.remaining_blocks
    );
    Some(center)
}

fn spawn_heart(center: Vec2, level: &mut Level) {
    let heart = Heart {
        rect: Rect::centered(center, level.tuning.heart_size),
        vel: Vec2::new(0.0, level.tuning.heart_fall_speed),
        sprite: level.assets.heart,
    };
    level.scene.add(SceneObject::Heart(heart), Layer::Default);
    level.events.push(GameEvent::HeartSpawned);
}

fn spawn_second_paddle(level: &mut Level) {
    let window = level.tuning.window_size;
    let size = level.tuning.paddle_size;
    let top_left = Vec2::new(window.x / 2.0 - size.x / 2.0, window.y / 2.0);

    let spawned = level.paddles.spawn_duplicate(
        &mut level.scene,
        Rect::new(top_left, size),
        level.assets.second_paddle,
    );
    if spawned.is_some() {
        level.events.push(GameEvent::DuplicatePaddleSpawned);
    }
}

fn track_ball(collider: EntityId, level: &mut Level) {
    let Some(ball) = level.scene.ball(collider) else {
        return;
    };
    if ball.kind != BallKind::Primary || level.camera.is_tracking() {
        return;
    }
    let hits = ball.hits;
    level.camera.start_tracking(collider, hits);
    level.events.push(GameEvent::CameraTrackingOn);
}

fn spawn_extra_balls(center: Vec2, level: &mut Level) {
    let size = level.tuning.ball_size * level.tuning.extra_ball_ratio;
    let count = level.tuning.extra_balls_per_block;

    for _ in 0..count {
        let mut ball = Ball::new(
            BallKind::Extra,
            center,
            size,
            level.assets.extra_ball,
            level.assets.collision_sound,
        );
        ball.vel = Ball::random_diagonal(&mut level.rng, level.tuning.ball_speed);
        level.scene.add(SceneObject::Ball(ball), Layer::Default);
    }
    level.events.push(GameEvent::ExtraBallsSpawned { count });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Assets, PaddleKind};
    use crate::tuning::Tuning;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn level_with(effects: &[Effect]) -> Level {
        let tuning = Tuning {
            brick_rows: 1,
            brick_cols: effects.len() as u32,
            ..Tuning::default()
        };
        Level::with_layout(tuning, Assets::default(), 42, |_, col| effects[col as usize])
    }

    fn count_objects(level: &Level, pred: impl Fn(&SceneObject) -> bool) -> usize {
        level
            .scene()
            .iter_layer(Layer::Default)
            .filter(|(_, o)| pred(o))
            .count()
    }

    #[test]
    fn test_every_effect_decrements_once() {
        let effects = [
            Effect::Remove,
            Effect::Special(SpecialEffect::AddLife),
            Effect::Special(SpecialEffect::SecondPaddle),
            Effect::Special(SpecialEffect::TrackingCamera),
            Effect::Special(SpecialEffect::ExtraBalls),
            Effect::Composite(SpecialEffect::AddLife, SpecialEffect::ExtraBalls),
        ];
        let mut level = level_with(&effects);
        let ball = level.primary_ball();
        let blocks = level.block_ids();
        assert_eq!(level.remaining_blocks(), 6);

        for (i, block) in blocks.iter().enumerate() {
            let effect = effects[i];
            effect.apply_on_collision(*block, ball, &mut level);
            assert_eq!(level.remaining_blocks(), 5 - i as i32);
            // Applying again must not decrement a second time
            effect.apply_on_collision(*block, ball, &mut level);
            assert_eq!(level.remaining_blocks(), 5 - i as i32);
            assert!(!level.scene().contains(*block));
        }
    }

    #[test]
    fn test_add_life_drops_centered_heart() {
        let mut level = level_with(&[Effect::Special(SpecialEffect::AddLife)]);
        let block = level.block_ids()[0];
        let center = level.scene().block(block).map(|b| b.rect.center()).unwrap();

        let ball = level.primary_ball();
        level.report_collision(block, ball, Vec2::Y);

        let hearts: Vec<_> = level
            .scene()
            .iter_layer(Layer::Default)
            .filter_map(|(_, o)| match o {
                SceneObject::Heart(h) => Some(h.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(hearts.len(), 1);
        assert!((hearts[0].rect.center() - center).length() < 0.001);
        assert_eq!(hearts[0].vel, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn test_second_paddle_spawns_once() {
        let mut level = level_with(&[
            Effect::Special(SpecialEffect::SecondPaddle),
            Effect::Special(SpecialEffect::SecondPaddle),
        ]);
        let ball = level.primary_ball();
        let blocks = level.block_ids();

        level.report_collision(blocks[0], ball, Vec2::Y);
        let duplicate = level.paddles().duplicate().expect("duplicate spawned");
        let paddle = level.scene().paddle(duplicate).expect("in scene");
        assert_eq!(paddle.kind, PaddleKind::Duplicate);
        assert_eq!(paddle.rect.top_left, Vec2::new(300.0, 250.0));

        level.report_collision(blocks[1], ball, Vec2::Y);
        let duplicates = count_objects(&level, |o| {
            matches!(o, SceneObject::Paddle(p) if p.kind == PaddleKind::Duplicate)
        });
        assert_eq!(duplicates, 1);
        assert_eq!(level.paddles().duplicate(), Some(duplicate));
        assert_eq!(level.remaining_blocks(), 0);
    }

    #[test]
    fn test_extra_balls_spawn_small_diagonal() {
        let mut level = level_with(&[Effect::Special(SpecialEffect::ExtraBalls)]);
        let block = level.block_ids()[0];
        let center = level.scene().block(block).map(|b| b.rect.center()).unwrap();
        let ball = level.primary_ball();
        level.report_collision(block, ball, Vec2::Y);

        let extras: Vec<Ball> = level
            .scene()
            .iter_layer(Layer::Default)
            .filter_map(|(_, o)| match o {
                SceneObject::Ball(b) if b.kind == BallKind::Extra => Some(b.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(extras.len(), 2);
        for extra in &extras {
            assert_eq!(extra.rect.size, Vec2::splat(15.0));
            assert!((extra.rect.center() - center).length() < 0.001);
            assert_eq!(extra.vel.x.abs(), 250.0);
            assert_eq!(extra.vel.y.abs(), 250.0);
            assert_eq!(extra.hits, 0);
        }
    }

    #[test]
    fn test_camera_ignores_extra_balls() {
        let mut level = level_with(&[
            Effect::Special(SpecialEffect::ExtraBalls),
            Effect::Special(SpecialEffect::TrackingCamera),
        ]);
        let ball = level.primary_ball();
        let blocks = level.block_ids();
        level.report_collision(blocks[0], ball, Vec2::Y);

        let extra = level
            .scene()
            .ball_ids()
            .into_iter()
            .find(|id| *id != ball)
            .expect("extra ball");
        level.report_collision(blocks[1], extra, Vec2::Y);
        assert!(!level.camera().is_tracking());
        assert_eq!(level.remaining_blocks(), 0);
    }

    #[test]
    fn test_composite_applies_both_in_order() {
        let mut level = level_with(&[Effect::Composite(
            SpecialEffect::TrackingCamera,
            SpecialEffect::AddLife,
        )]);
        let block = level.block_ids()[0];
        let ball = level.primary_ball();
        level.report_collision(block, ball, Vec2::Y);

        assert_eq!(level.remaining_blocks(), 0);
        assert!(level.camera().is_tracking());
        assert_eq!(level.scene().heart_ids().len(), 1);

        let events = level.drain_events();
        let on = events.iter().position(|e| *e == GameEvent::CameraTrackingOn);
        let heart = events.iter().position(|e| *e == GameEvent::HeartSpawned);
        let broken = events.iter().position(|e| *e == GameEvent::BlockBroken);
        assert!(broken < on && on < heart);
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::BlockBroken).count(),
            1
        );
    }

    #[test]
    fn test_specials_listing() {
        assert!(Effect::Remove.specials().is_empty());
        assert_eq!(
            Effect::Composite(SpecialEffect::ExtraBalls, SpecialEffect::ExtraBalls).specials(),
            vec![SpecialEffect::ExtraBalls, SpecialEffect::ExtraBalls]
        );
        assert!(!Effect::Special(SpecialEffect::AddLife).is_composite());
    }

    fn special() -> impl Strategy<Value = SpecialEffect> {
        prop::sample::select(SpecialEffect::ALL.to_vec())
    }

    fn effect() -> impl Strategy<Value = Effect> {
        prop_oneof![
            Just(Effect::Remove),
            special().prop_map(Effect::Special),
            (special(), special()).prop_map(|(a, b)| Effect::Composite(a, b)),
        ]
    }

    proptest! {
        #[test]
        fn prop_each_block_counts_once(
            effects in prop::collection::vec(effect(), 1..12),
            strikes in prop::collection::vec(any::<prop::sample::Index>(), 0..40),
        ) {
            let mut level = level_with(&effects);
            let ball = level.primary_ball();
            let blocks = level.block_ids();
            let mut struck = HashSet::new();

            for index in strikes {
                let block = blocks[index.index(blocks.len())];
                level.report_collision(ball, block, Vec2::Y);
                struck.insert(block);
                prop_assert_eq!(
                    level.remaining_blocks(),
                    (blocks.len() - struck.len()) as i32
                );
            }
            prop_assert!(level.paddles().duplicate().map_or(true, |id| level.scene().contains(id)));
        }
    }
}
