//! Per-frame update
//!
//! Moves paddles and free objects, applies the lower-bound rules, then
//! reconciles the lives HUD and the tracking camera against their counters.

use glam::Vec2;

use super::level::Level;
use super::scene::SceneObject;
use super::state::GameEvent;

/// Input state for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left arrow held
    pub left: bool,
    /// Right arrow held
    pub right: bool,
    /// Skip the level (debug/testing)
    pub skip_level: bool,
}

impl TickInput {
    /// -1 left, 1 right, 0 when neither or both are held
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the level by one frame of `dt` seconds
pub fn tick(level: &mut Level, input: &TickInput, dt: f32) {
    if input.skip_level {
        level.skip();
    }

    // Every paddle, primary or duplicate, follows the same binding
    let direction = input.direction();
    let speed = level.tuning.paddle_speed;
    let width = level.tuning.window_size.x;
    let margin = level.tuning.paddle_edge_margin;
    for (_, object) in level.scene.iter_mut() {
        match object {
            SceneObject::Paddle(paddle) => paddle.steer(direction, speed, dt, width, margin),
            SceneObject::Ball(ball) => ball.rect.translate(ball.vel * dt),
            SceneObject::Heart(heart) => heart.rect.translate(heart.vel * dt),
            _ => {}
        }
    }

    level.drop_out_of_bounds();

    level.lives.reconcile(&mut level.scene);
    if level.camera.reconcile(&level.scene) {
        level.events.push(GameEvent::CameraTrackingOff);
    }

    level.note_status();
}

/// Velocity a paddle would have this frame (for hosts that animate it)
pub fn paddle_velocity(level: &Level, input: &TickInput) -> Vec2 {
    Vec2::new(input.direction() * level.tuning.paddle_speed, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::SpecialEffect;
    use crate::sim::effect::Effect;
    use crate::sim::level::LevelStatus;
    use crate::sim::scene::Layer;
    use crate::sim::state::Assets;
    use crate::tuning::Tuning;

    const DT: f32 = 1.0 / 60.0;

    fn level(effects: &[Effect]) -> Level {
        let tuning = Tuning {
            brick_rows: 1,
            brick_cols: effects.len() as u32,
            ..Tuning::default()
        };
        Level::with_layout(tuning, Assets::default(), 11, |_, col| effects[col as usize])
    }

    /// Push the primary ball past the lower bound
    fn drop_ball(level: &mut Level) {
        let id = level.primary_ball();
        if let Some(ball) = level.scene.ball_mut(id) {
            ball.rect.set_center(Vec2::new(350.0, 600.0));
        }
    }

    #[test]
    fn test_paddles_share_input() {
        let mut level = level(&[Effect::Special(SpecialEffect::SecondPaddle)]);
        let ball = level.primary_ball();
        level.report_collision(ball, level.block_ids()[0], Vec2::Y);
        let duplicate = level.paddles().duplicate().unwrap();
        let primary = level.primary_paddle();

        let x0 = level.scene().paddle(primary).unwrap().rect.top_left.x;
        let d0 = level.scene().paddle(duplicate).unwrap().rect.top_left.x;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut level, &input, 0.1);
        let x1 = level.scene().paddle(primary).unwrap().rect.top_left.x;
        let d1 = level.scene().paddle(duplicate).unwrap().rect.top_left.x;
        assert!((x1 - x0 - 30.0).abs() < 0.001);
        assert!((d1 - d0 - 30.0).abs() < 0.001);
        assert_eq!(paddle_velocity(&level, &input), Vec2::new(300.0, 0.0));
    }

    #[test]
    fn test_lost_ball_costs_life_and_reserves() {
        let mut level = level(&[Effect::Remove]);
        drop_ball(&mut level);
        tick(&mut level, &TickInput::default(), DT);

        assert_eq!(level.lives().lives(), 2);
        assert_eq!(level.lives().visible_icons(), vec![0, 1]);
        let ball = level.scene().ball(level.primary_ball()).unwrap();
        assert_eq!(ball.rect.center(), Vec2::new(350.0, 250.0));
        assert!(
            level
                .drain_events()
                .contains(&GameEvent::BallLost { lives_left: 2 })
        );
    }

    #[test]
    fn test_losing_all_lives() {
        let mut level = level(&[Effect::Remove]);
        for _ in 0..3 {
            drop_ball(&mut level);
            tick(&mut level, &TickInput::default(), DT);
        }
        assert!(level.is_losing());
        assert_eq!(level.status(), LevelStatus::Lost);
        assert!(!level.scene().contains(level.primary_ball()));
        assert!(level.lives().visible_icons().is_empty());

        // Nothing left to lose
        tick(&mut level, &TickInput::default(), DT);
        assert_eq!(level.lives().lives(), 0);
    }

    #[test]
    fn test_heart_catch_then_ball_loss() {
        let mut level = level(&[Effect::Special(SpecialEffect::AddLife), Effect::Remove]);
        let ball = level.primary_ball();
        level.report_collision(ball, level.block_ids()[0], Vec2::Y);
        let heart = level.scene().heart_ids()[0];
        level.report_collision(heart, level.primary_paddle(), Vec2::Y);
        tick(&mut level, &TickInput::default(), DT);
        assert_eq!(level.lives().visible_icons(), vec![0, 1, 2, 3]);

        drop_ball(&mut level);
        tick(&mut level, &TickInput::default(), DT);
        assert_eq!(level.lives().visible_icons(), vec![0, 1, 2]);
    }

    #[test]
    fn test_fallen_heart_and_extra_balls_removed() {
        let mut level = level(&[
            Effect::Composite(SpecialEffect::AddLife, SpecialEffect::ExtraBalls),
            Effect::Remove,
        ]);
        let ball = level.primary_ball();
        level.report_collision(ball, level.block_ids()[0], Vec2::Y);
        assert_eq!(level.scene().heart_ids().len(), 1);
        assert_eq!(level.scene().ball_ids().len(), 3);

        // Park the primary ball so only the spawned objects fall out
        if let Some(b) = level.scene.ball_mut(ball) {
            b.vel = Vec2::ZERO;
        }
        let heart = level.scene().heart_ids()[0];
        for id in level.scene().ball_ids() {
            if id != ball {
                if let Some(b) = level.scene.ball_mut(id) {
                    b.vel = Vec2::new(0.0, 250.0);
                }
            }
        }
        for _ in 0..600 {
            tick(&mut level, &TickInput::default(), DT);
        }
        assert!(!level.scene().contains(heart));
        assert_eq!(level.scene().ball_ids(), vec![ball]);
        assert_eq!(level.lives().lives(), 3);
        assert_eq!(level.scene().iter_layer(Layer::StaticObjects).count(), 1);
    }

    #[test]
    fn test_camera_turns_off_after_budget() {
        let mut level = level(&[Effect::Special(SpecialEffect::TrackingCamera), Effect::Remove]);
        let ball = level.primary_ball();
        level.report_collision(ball, level.block_ids()[0], Vec2::Y);
        assert!(level.camera().is_tracking());

        let paddle = level.primary_paddle();
        for _ in 0..4 {
            level.report_collision(ball, paddle, Vec2::Y);
            tick(&mut level, &TickInput::default(), 0.0);
            assert!(level.camera().is_tracking());
        }
        level.report_collision(ball, paddle, Vec2::Y);
        tick(&mut level, &TickInput::default(), 0.0);
        assert!(!level.camera().is_tracking());
        assert!(level.drain_events().contains(&GameEvent::CameraTrackingOff));
    }

    #[test]
    fn test_skip_level_wins() {
        let mut level = level(&[Effect::Remove]);
        let input = TickInput {
            skip_level: true,
            ..Default::default()
        };
        tick(&mut level, &input, DT);
        assert_eq!(level.status(), LevelStatus::Won);
        assert_eq!(level.remaining_blocks(), 1);
    }
}
