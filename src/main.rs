//! Bricker headless demo
//!
//! Plays one level with an autopilot paddle. A plain AABB contact pass stands
//! in for the engine's collision detection and reports new overlaps to the
//! level, the same way a host engine would.
//!
//! Usage: `bricker [rows cols] [--tuning file.json] [--seed n]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by a web host; there is no standalone entry point
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::HashSet;
    use std::path::PathBuf;

    use bricker::Tuning;
    use bricker::consts::SIM_DT;
    use bricker::sim::{
        Assets, EntityId, GameEvent, Layer, Level, LevelStatus, SceneObject, TickInput, tick,
    };
    use glam::Vec2;

    /// Ten minutes of simulated play
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    const DEFAULT_SEED: u64 = 0x00b1_c4e7;
    /// Autopilot ignores offsets smaller than this
    const DEAD_ZONE: f32 = 5.0;

    type Contact = (EntityId, EntityId);

    struct Args {
        grid: Option<(u32, u32)>,
        tuning: Option<PathBuf>,
        seed: u64,
    }

    fn parse_args() -> Result<Args, String> {
        let mut args = Args {
            grid: None,
            tuning: None,
            seed: DEFAULT_SEED,
        };
        let mut positional = Vec::new();
        let mut iter = std::env::args().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--tuning" => {
                    args.tuning = Some(iter.next().ok_or("--tuning needs a path")?.into());
                }
                "--seed" => {
                    let value = iter.next().ok_or("--seed needs a value")?;
                    args.seed = value
                        .parse()
                        .map_err(|e| format!("bad seed {value}: {e}"))?;
                }
                other => positional.push(
                    other
                        .parse::<u32>()
                        .map_err(|e| format!("bad grid size {other}: {e}"))?,
                ),
            }
        }
        match positional.as_slice() {
            [] => {}
            [rows, cols] => args.grid = Some((*rows, *cols)),
            _ => return Err("expected `rows cols`".into()),
        }
        Ok(args)
    }

    pub fn run() {
        env_logger::init();

        let args = match parse_args() {
            Ok(args) => args,
            Err(e) => {
                log::error!("{}", e);
                eprintln!("usage: bricker [rows cols] [--tuning file.json] [--seed n]");
                std::process::exit(2);
            }
        };

        let mut tuning = args
            .tuning
            .as_deref()
            .map(Tuning::load_or_default)
            .unwrap_or_default();
        if let Some((rows, cols)) = args.grid {
            tuning.brick_rows = rows;
            tuning.brick_cols = cols;
        }

        log::info!("Bricker (headless) starting, seed {}", args.seed);
        let mut level = Level::new(tuning, Assets::default(), args.seed);
        let mut touching = HashSet::new();
        let mut broken = 0u32;
        let mut frames = 0u32;

        while level.status() == LevelStatus::Playing && frames < MAX_FRAMES {
            let input = autopilot(&level);
            tick(&mut level, &input, SIM_DT);
            touching = report_contacts(&mut level, &touching);

            for event in level.drain_events() {
                match event {
                    GameEvent::BlockBroken => broken += 1,
                    GameEvent::BallBounce { .. } => {}
                    other => log::debug!("frame {}: {:?}", frames, other),
                }
            }
            frames += 1;
        }

        let status = level.status();
        log::info!(
            "{:?} after {} frames: {} of {} bricks broken, {} left, {} lives",
            status,
            frames,
            broken,
            level.tuning().brick_count(),
            level.remaining_blocks(),
            level.lives().lives()
        );
        println!(
            "{:?}: {} bricks broken in {:.1}s, {} lives left",
            status,
            broken,
            frames as f32 * SIM_DT,
            level.lives().lives()
        );
    }

    /// Steer toward the primary ball
    fn autopilot(level: &Level) -> TickInput {
        let scene = level.scene();
        let (Some(ball), Some(paddle)) = (
            scene.ball(level.primary_ball()),
            scene.paddle(level.primary_paddle()),
        ) else {
            return TickInput::default();
        };
        let offset = ball.rect.center().x - paddle.rect.center().x;
        TickInput {
            left: offset < -DEAD_ZONE,
            right: offset > DEAD_ZONE,
            skip_level: false,
        }
    }

    /// Report overlaps that started this frame; returns the current set
    fn report_contacts(level: &mut Level, previous: &HashSet<Contact>) -> HashSet<Contact> {
        let mut current = HashSet::new();
        for (mover, other, normal) in find_contacts(level) {
            current.insert((mover, other));
            if !previous.contains(&(mover, other)) {
                level.report_collision(mover, other, normal);
            }
        }
        current
    }

    fn find_contacts(level: &Level) -> Vec<(EntityId, EntityId, Vec2)> {
        let scene = level.scene();
        let solids: Vec<(EntityId, &SceneObject)> = scene
            .iter_layer(Layer::Default)
            .chain(scene.iter_layer(Layer::StaticObjects))
            .filter(|(_, o)| {
                matches!(
                    o,
                    SceneObject::Wall(_) | SceneObject::Block(_) | SceneObject::Paddle(_)
                )
            })
            .collect();

        let mut contacts = Vec::new();
        for mover in scene.ball_ids().into_iter().chain(scene.heart_ids()) {
            let Some(object) = scene.get(mover) else {
                continue;
            };
            for (id, solid) in &solids {
                if let Some(normal) = object.rect().contact_normal(solid.rect()) {
                    contacts.push((mover, *id, normal));
                }
            }
        }
        contacts
    }
}
