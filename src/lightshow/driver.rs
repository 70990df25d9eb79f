use derive_more::Display;
use noisy_float::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{info, trace};

use super::*;
use crate::{
    config::{keys, EngineConfig, LightStyle, SettingsProvider},
    events::*,
    timing::TempoMap,
    utils::SeekExtensions,
};

#[derive(Debug, Display, Default, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Nothing loaded.
    #[default]
    Inactive,
    /// Fixed layout, events aren't evaluated.
    StaticFallback,
    EventDriven,
}

/// Discrete notifications the driver reacts to outside of regular ticks.
pub enum Trigger<'a> {
    DifficultyLoaded {
        difficulty: &'a Difficulty,
        tempo: &'a dyn TempoMap,
    },
    Unloaded,
    /// Carries the changed key, `"all"` for a bulk reload.
    SettingsChanged(&'a str),
    PaletteChanged(ColorPalette),
    PlayingChanged,
}

/// Where playback is at for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackContext {
    pub time: R32,
    pub beat: f32,
    pub playing: bool,
}

impl PlaybackContext {
    pub fn at(time: R32, tempo: &dyn TempoMap, playing: bool) -> Self {
        Self {
            time,
            beat: tempo.beat_at(time.raw()),
            playing,
        }
    }
}
//
//
//
//
//
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelOutput {
    pub channel: LightChannel,
    pub color: Rgba,
    pub properties: LightProperties,
}

impl ChannelOutput {
    fn new(channel: LightChannel, color: Rgba, style: &LightStyle, glow_brightness: f32) -> Self {
        Self {
            channel,
            color,
            properties: LightProperties::derive(color, style, glow_brightness),
        }
    }
}

/// The speed event in effect with its per-unit rotation assignments, or
/// `None` when the lasers should stand still.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationOutput {
    pub channel: SpeedChannel,
    pub event: Option<LaserSpeedEvent>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RingOutput {
    pub spin: Option<RingEvent>,
    pub zoom: Option<RingEvent>,
}

/// Everything the renderer needs for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct LightFrame {
    pub time: R32,
    pub lights: [ChannelOutput; 5],
    pub rotations: [RotationOutput; 2],
    pub rings: RingOutput,
    pub boost: bool,
    pub is_static: bool,
}

impl LightFrame {
    pub fn light(&self, channel: LightChannel) -> &ChannelOutput {
        &self.lights[channel.index()]
    }

    pub fn rotation(&self, channel: SpeedChannel) -> &RotationOutput {
        &self.rotations[channel.index()]
    }
}
//
//
//
//
//
/// Owns the loaded timeline and decides each tick whether lights follow the
/// events or hold the static layout.
pub struct PlaybackDriver<R = StdRng> {
    config: EngineConfig,
    palette: ColorPalette,
    rotations: RotationResolver<R>,
    timeline: Timeline,
    cursors: TimelineCursors,
    loaded: bool,
    /// Set on load for maps that can't be event driven at all.
    forced_static: bool,
    state: DriverState,
}

impl PlaybackDriver<StdRng> {
    /// Rotation assignments are seeded from `config.seed` if present.
    pub fn new(config: EngineConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> PlaybackDriver<R> {
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        Self {
            palette: config.palette,
            rotations: RotationResolver::new(rng, config.rotation),
            config,
            timeline: Timeline::default(),
            cursors: TimelineCursors::default(),
            loaded: false,
            forced_static: false,
            state: DriverState::Inactive,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    /// Replaces the timeline. Cursors start over since they index the old one.
    pub fn load(&mut self, difficulty: &Difficulty, tempo: &dyn TempoMap) -> RebuildSummary {
        let (timeline, summary) = Timeline::build(difficulty, tempo, &mut self.rotations);

        self.timeline = timeline;
        self.cursors.reset();
        self.loaded = true;
        self.forced_static = difficulty.events.is_empty()
            || self.config.is_static_environment(&difficulty.environment);

        if self.forced_static {
            info!(
                environment = %difficulty.environment,
                events = difficulty.events.len(),
                "lights forced static"
            );
        }
        summary
    }

    pub fn unload(&mut self) {
        self.timeline = Timeline::default();
        self.cursors.reset();
        self.loaded = false;
        self.forced_static = false;
    }

    /// Applies a trigger and recomputes the frame if the trigger affects
    /// lighting. `None` means there's nothing new to render.
    pub fn handle(
        &mut self,
        trigger: Trigger,
        ctx: &PlaybackContext,
        settings: &dyn SettingsProvider,
    ) -> Option<LightFrame> {
        match trigger {
            Trigger::DifficultyLoaded { difficulty, tempo } => {
                self.load(difficulty, tempo);
            }
            Trigger::Unloaded => self.unload(),
            Trigger::SettingsChanged(key) if keys::LIGHT_SETTINGS.contains(&key) => {}
            Trigger::SettingsChanged(_) => return None,
            Trigger::PaletteChanged(palette) => self.palette = palette,
            // Ticks pick up the state once playback runs
            Trigger::PlayingChanged if ctx.playing => return None,
            Trigger::PlayingChanged => {}
        }

        self.refresh(ctx, settings, true)
    }

    /// Per rendered frame. Event driven ticks always produce a frame, the
    /// static layout is only produced when entering it.
    pub fn tick(&mut self, ctx: &PlaybackContext, settings: &dyn SettingsProvider) -> Option<LightFrame> {
        self.refresh(ctx, settings, false)
    }

    fn evaluate(&self, ctx: &PlaybackContext, settings: &dyn SettingsProvider) -> DriverState {
        let scrubbing = !ctx.playing && settings.get_bool(keys::STATIC_LIGHTS_WHILE_SCRUBBING);

        if !self.loaded {
            DriverState::Inactive
        } else if self.forced_static || scrubbing || settings.get_bool(keys::STATIC_LIGHTS) {
            DriverState::StaticFallback
        } else {
            DriverState::EventDriven
        }
    }

    fn enter(&mut self, next: DriverState) -> bool {
        let changed = self.state != next;
        if changed {
            info!(from = %self.state, to = %next, "playback state changed");
            self.state = next;
        }
        changed
    }

    fn refresh(
        &mut self,
        ctx: &PlaybackContext,
        settings: &dyn SettingsProvider,
        force: bool,
    ) -> Option<LightFrame> {
        let next = self.evaluate(ctx, settings);
        let changed = self.enter(next);

        match next {
            DriverState::Inactive => None,
            DriverState::StaticFallback => (changed || force).then(|| self.static_frame(ctx.time, settings)),
            DriverState::EventDriven => Some(self.resolve(ctx, settings)),
        }
    }

    fn resolve(&mut self, ctx: &PlaybackContext, settings: &dyn SettingsProvider) -> LightFrame {
        let Self {
            config,
            palette,
            timeline,
            cursors,
            ..
        } = self;
        let time = ctx.time;
        let glow = settings.get_float(keys::LIGHT_GLOW_BRIGHTNESS);

        let boost = resolve_boost(time, ctx.beat, timeline.boosts(), &mut cursors.boost);
        let light_ctx = LightContext { time, palette, boost };

        let lights = LightChannel::ALL.map(|channel| {
            let cursor = &mut cursors.lights[channel.index()];
            let color = resolve_light(&light_ctx, timeline.lights(channel), cursor);
            ChannelOutput::new(channel, color, &config.style, glow)
        });

        let rotations = SpeedChannel::ALL.map(|channel| RotationOutput {
            channel,
            event: resolve_speed(time, timeline.speeds(channel), &mut cursors.speeds[channel.index()])
                .cloned(),
        });

        let spins = timeline.rings(RingEventKind::Spin);
        let zooms = timeline.rings(RingEventKind::Zoom);
        let rings = RingOutput {
            spin: spins.seek(&mut cursors.ring_spin, time).and_then(|index| spins.get(index)).copied(),
            zoom: zooms.seek(&mut cursors.ring_zoom, time).and_then(|index| zooms.get(index)).copied(),
        };

        trace!(time = time.raw(), boost, "resolved light frame");
        LightFrame {
            time,
            lights,
            rotations,
            rings,
            boost,
            is_static: false,
        }
    }

    /// Blue back lasers, rings and center lights, rotating lasers off and
    /// standing still. Never boosted.
    fn static_frame(&self, time: R32, settings: &dyn SettingsProvider) -> LightFrame {
        let glow = settings.get_float(keys::LIGHT_GLOW_BRIGHTNESS);
        let light_ctx = LightContext {
            time: r32(0.),
            palette: &self.palette,
            boost: false,
        };

        let lights = LightChannel::ALL.map(|channel| {
            let value = match channel {
                LightChannel::LeftRotatingLasers | LightChannel::RightRotatingLasers => LightValue::Off,
                _ => LightValue::On(Hue::Blue),
            };
            let event = LightEvent::new(channel, 0., r32(0.), value);
            ChannelOutput::new(channel, light_ctx.event_color(Some(&event), None), &self.config.style, glow)
        });

        LightFrame {
            time,
            lights,
            rotations: SpeedChannel::ALL.map(|channel| RotationOutput { channel, event: None }),
            rings: RingOutput::default(),
            boost: false,
            is_static: true,
        }
    }
}
