use glam::{Quat, Vec3};
use noisy_float::prelude::*;
use rhythm_lightshow::{
    events::LightChannel,
    replay::Pose,
    Bpm, Difficulty, EngineConfig, PlaybackContext, PlaybackDriver, RawBoostEvent, RawEvent,
    RawFrame, ReplayInfo, ReplaySampler, Settings, Trigger,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const TICK: f32 = 1. / 30.;

fn demo_difficulty() -> Difficulty {
    let events = vec![
        RawEvent::new(0., 0, 1, 1.),
        RawEvent::new(0., 4, 5, 1.),
        RawEvent::new(1., 1, 2, 1.),
        RawEvent::new(2., 12, 3, 1.),
        RawEvent::new(2., 13, 3, 1.),
        RawEvent::new(2., 2, 6, 1.),
        RawEvent::new(2., 3, 6, 1.),
        RawEvent::new(3., 8, 0, 1.),
        RawEvent::new(4., 0, 0, 1.),
        RawEvent::new(6., 0, 8, 1.),
        RawEvent::new(7., 4, 11, 0.8),
    ];

    Difficulty {
        environment: "DefaultEnvironment".into(),
        events,
        boosts: vec![
            RawBoostEvent { beat: 4., active: true },
            RawBoostEvent { beat: 6., active: false },
        ],
    }
}

fn demo_replay() -> Vec<RawFrame> {
    (0..=120)
        .map(|i| i as f32 * 0.05)
        .map(|time| {
            let sway = Quat::from_rotation_y(time.sin() * 0.3);
            RawFrame {
                time,
                head: Pose::new(Vec3::new(0., 1.7, time.sin() * 0.05), sway),
                left_hand: Pose::new(Vec3::new(-0.3, 1.1, 0.3), sway),
                right_hand: Pose::new(Vec3::new(0.3, 1.1, 0.3), sway.inverse()),
            }
        })
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rhythm_lightshow=info")),
        )
        .init();

    let tempo = Bpm::new(120.);
    let settings = Settings::default();
    let difficulty = demo_difficulty();

    let mut driver = PlaybackDriver::new(EngineConfig {
        seed: Some(2023),
        ..Default::default()
    });
    let mut sampler = ReplaySampler::new(Default::default());
    sampler.load(&demo_replay(), ReplayInfo::default());

    let start = PlaybackContext::at(r32(0.), &tempo, true);
    driver.handle(Trigger::DifficultyLoaded { difficulty: &difficulty, tempo: &tempo }, &start, &settings);

    let forward = (0..120).map(|i| i as f32 * TICK);
    let scrub = [3.2, 1.1, 0.4, 2.6].into_iter();

    forward.chain(scrub).enumerate().for_each(|(frame, time)| {
        let playing = frame < 120;
        let ctx = PlaybackContext::at(r32(time), &tempo, playing);

        if frame == 120 {
            driver.handle(Trigger::PlayingChanged, &ctx, &settings);
        }

        let pose = sampler.sample(ctx.time, &settings);
        if let Some(lights) = driver.tick(&ctx, &settings) {
            if frame % 15 == 0 || lights.is_static {
                let back = lights.light(LightChannel::BackLasers).color;
                info!(
                    time,
                    state = %driver.state(),
                    boost = lights.boost,
                    back = ?(back.r, back.g, back.b, back.a),
                    head = ?pose.pose.head.position,
                    "tick"
                );
            }
        }
    });

    let trail = sampler.trail(&settings).map_or(0, <[_]>::len);
    info!(trail, "done");
}
